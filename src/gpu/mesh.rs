//! Mesh data on the CPU, its GPU upload, and the id-indexed library the
//! renderer draws from.

use glam::Vec3;
use wgpu::util::DeviceExt;

/// Vertex with position and normal.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Object-space position.
    pub position: [f32; 3],
    /// Object-space unit normal.
    pub normal: [f32; 3],
}

impl Vertex {
    const ATTRIBS: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

    /// Vertex buffer layout descriptor.
    #[must_use]
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// Indexed triangle list ready for upload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    /// Vertex attributes.
    pub vertices: Vec<Vertex>,
    /// Triangle list indices into `vertices`.
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Append a primitive. Its indices are rebased past the existing
    /// vertices; missing normals are generated from the triangles.
    pub fn append(
        &mut self,
        positions: &[Vec3],
        normals: Option<&[Vec3]>,
        indices: &[u32],
    ) {
        let generated;
        let normals = match normals {
            Some(n) if n.len() == positions.len() => n,
            _ => {
                generated = compute_normals(positions, indices);
                generated.as_slice()
            }
        };

        #[allow(clippy::cast_possible_truncation)]
        let base = self.vertices.len() as u32;
        self.vertices.extend(positions.iter().zip(normals).map(|(p, n)| {
            Vertex {
                position: p.to_array(),
                normal: n.to_array(),
            }
        }));
        self.indices.extend(indices.iter().map(|i| i + base));
    }

    /// Number of indices to draw.
    #[must_use]
    pub fn index_count(&self) -> u32 {
        #[allow(clippy::cast_possible_truncation)]
        let n = self.indices.len() as u32;
        n
    }

    /// Whether there is nothing to draw.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Smooth per-vertex normals: the area-weighted sum of adjacent face
/// normals. Vertices on no triangle (or only degenerate ones) get +Y.
#[must_use]
pub fn compute_normals(positions: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; positions.len()];
    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| i as usize);
        let (Some(pa), Some(pb), Some(pc)) =
            (positions.get(a), positions.get(b), positions.get(c))
        else {
            continue;
        };
        // Unnormalized: magnitude is twice the triangle area.
        let face = (*pb - *pa).cross(*pc - *pa);
        normals[a] += face;
        normals[b] += face;
        normals[c] += face;
    }
    normals
        .into_iter()
        .map(|n| n.try_normalize().unwrap_or(Vec3::Y))
        .collect()
}

/// Handle to a mesh uploaded into a [`MeshLibrary`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshId(u32);

impl MeshId {
    /// Wrap a raw library slot.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Library slot.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

/// Vertex and index buffers of one uploaded mesh.
pub struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

impl GpuMesh {
    /// Upload `data` into fresh, fixed-size buffers.
    #[must_use]
    pub fn upload(device: &wgpu::Device, label: &str, data: &MeshData) -> Self {
        let vertex_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} Vertices")),
                contents: bytemuck::cast_slice(&data.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let index_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} Indices")),
                contents: bytemuck::cast_slice(&data.indices),
                usage: wgpu::BufferUsages::INDEX,
            });
        Self {
            vertex_buffer,
            index_buffer,
            index_count: data.index_count(),
        }
    }

    /// Bind buffers and draw every triangle.
    ///
    /// Caller must set the pipeline and bind groups before calling this.
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        if self.index_count == 0 {
            return;
        }
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(
            self.index_buffer.slice(..),
            wgpu::IndexFormat::Uint32,
        );
        render_pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

/// Every mesh the renderer can draw, addressed by [`MeshId`].
#[derive(Default)]
pub struct MeshLibrary {
    meshes: Vec<GpuMesh>,
}

impl MeshLibrary {
    /// Take ownership of an uploaded mesh.
    pub fn insert(&mut self, mesh: GpuMesh) -> MeshId {
        #[allow(clippy::cast_possible_truncation)]
        let id = MeshId::new(self.meshes.len() as u32);
        self.meshes.push(mesh);
        id
    }

    /// Look up a mesh. Ids from another library may miss.
    #[must_use]
    pub fn get(&self, id: MeshId) -> Option<&GpuMesh> {
        self.meshes.get(id.index() as usize)
    }

    /// Number of meshes held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    /// Whether the library is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }
}
