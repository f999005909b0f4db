//! glTF/GLB model loading and the shared [`Model`] handle.
//!
//! Every triangle primitive in the default scene is flattened into one
//! [`MeshData`] with node transforms baked in, so a model is a single
//! indexed draw. Missing normals are generated; missing indices are
//! treated as a plain triangle list.

use std::path::Path;

use glam::{Mat3, Mat4, Vec3};

use super::mesh::{MeshData, MeshId};
use super::shader::Shader;
use crate::error::SceneError;

/// Cheap handle to a loaded model. Copies share one GPU mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Model {
    mesh: MeshId,
}

impl Model {
    /// Wrap an uploaded mesh.
    #[must_use]
    pub const fn new(mesh: MeshId) -> Self {
        Self { mesh }
    }

    /// The mesh this model draws.
    #[must_use]
    pub const fn mesh(&self) -> MeshId {
        self.mesh
    }

    /// Issue the model's draw with the shader's current uniforms.
    pub fn draw(&self, shader: &mut dyn Shader) {
        shader.draw_mesh(self.mesh);
    }
}

/// Load a `.gltf`/`.glb` file into flattened mesh data.
///
/// # Errors
///
/// [`SceneError::ModelLoad`] if the file cannot be read or parsed, or
/// contains no triangles.
pub fn load_mesh_data(path: &Path) -> Result<MeshData, SceneError> {
    let fail = |reason: String| SceneError::ModelLoad {
        path: path.display().to_string(),
        reason,
    };
    let (document, buffers, _images) =
        gltf::import(path).map_err(|e| fail(e.to_string()))?;
    let mesh = flatten(&document, &buffers).map_err(fail)?;
    log::info!(
        "Loaded model {}: {} vertices, {} triangles",
        path.display(),
        mesh.vertices.len(),
        mesh.indices.len() / 3
    );
    Ok(mesh)
}

/// Parse an in-memory glTF/GLB document (buffers must be embedded).
///
/// # Errors
///
/// [`SceneError::ModelLoad`] as for [`load_mesh_data`], with `<memory>` as
/// the path.
pub fn mesh_data_from_slice(bytes: &[u8]) -> Result<MeshData, SceneError> {
    let fail = |reason: String| SceneError::ModelLoad {
        path: "<memory>".into(),
        reason,
    };
    let (document, buffers, _images) =
        gltf::import_slice(bytes).map_err(|e| fail(e.to_string()))?;
    flatten(&document, &buffers).map_err(fail)
}

fn flatten(
    document: &gltf::Document,
    buffers: &[gltf::buffer::Data],
) -> Result<MeshData, String> {
    let scene = document
        .default_scene()
        .or_else(|| document.scenes().next())
        .ok_or("document has no scene")?;

    let mut mesh = MeshData::default();
    for node in scene.nodes() {
        process_node(&node, Mat4::IDENTITY, buffers, &mut mesh)?;
    }
    if mesh.is_empty() {
        return Err("no triangle primitives".into());
    }
    Ok(mesh)
}

/// Process a glTF node and its children recursively.
fn process_node(
    node: &gltf::Node<'_>,
    parent: Mat4,
    buffers: &[gltf::buffer::Data],
    out: &mut MeshData,
) -> Result<(), String> {
    let world =
        parent * Mat4::from_cols_array_2d(&node.transform().matrix());

    if let Some(mesh) = node.mesh() {
        let normal_matrix = Mat3::from_mat4(world).inverse().transpose();
        for primitive in mesh.primitives() {
            if primitive.mode() != gltf::mesh::Mode::Triangles {
                log::debug!(
                    "Skipping {:?} primitive in mesh {}",
                    primitive.mode(),
                    mesh.name().unwrap_or("unnamed")
                );
                continue;
            }
            let reader = primitive
                .reader(|buffer| buffers.get(buffer.index()).map(|d| d.0.as_slice()));

            let positions: Vec<Vec3> = reader
                .read_positions()
                .ok_or_else(|| {
                    format!(
                        "missing positions in mesh {}",
                        mesh.name().unwrap_or("unnamed")
                    )
                })?
                .map(|p| world.transform_point3(Vec3::from(p)))
                .collect();
            let normals: Option<Vec<Vec3>> = reader.read_normals().map(|it| {
                it.map(|n| {
                    (normal_matrix * Vec3::from(n)).normalize_or_zero()
                })
                .collect()
            });
            #[allow(clippy::cast_possible_truncation)]
            let indices: Vec<u32> = reader.read_indices().map_or_else(
                || (0..positions.len() as u32).collect(),
                |it| it.into_u32().collect(),
            );

            out.append(&positions, normals.as_deref(), &indices);
        }
    }

    for child in node.children() {
        process_node(&child, world, buffers, out)?;
    }
    Ok(())
}
