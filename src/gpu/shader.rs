//! The immediate-mode shader interface and its CPU-side state.
//!
//! Drawables talk to a [`Shader`]: "set these named uniforms, draw this
//! mesh". [`ProgramSet`] implements it for the two programs of the scene.
//! Uniform writes land in the current program's blocks; every
//! [`Shader::draw_mesh`] snapshots the per-object block into a
//! [`FrameStaging`] arena so the GPU side can replay the frame with one
//! buffer upload.

use glam::{Mat4, Vec3};

use super::mesh::MeshId;
use super::uniforms::{
    LightSourceGlobals, LightSourceObject, LitGlobals, LitObject,
    UniformBlock, UniformPath, UniformValue,
};

/// Dynamic uniform offsets must be multiples of this
/// (`min_uniform_buffer_offset_alignment` in the default limits).
pub const UNIFORM_ALIGNMENT: usize = 256;

/// The shader programs a drawable can be drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Program {
    /// Phong shading with the full light rig and fog.
    Lit,
    /// Flat emissive colour with fog.
    LightSource,
}

/// Immediate-mode uniform and draw interface.
///
/// Values persist until overwritten, like GL program state. Unknown names
/// and values of the wrong type are ignored.
pub trait Shader {
    /// Write a named uniform of the current program.
    fn set_uniform(&mut self, name: &str, value: UniformValue);

    /// Draw `mesh` with the current uniform values.
    fn draw_mesh(&mut self, mesh: MeshId);

    /// Write a `float` uniform.
    fn set_float(&mut self, name: &str, value: f32) {
        self.set_uniform(name, UniformValue::Float(value));
    }

    /// Write a `vec3` uniform.
    fn set_vec3(&mut self, name: &str, value: Vec3) {
        self.set_uniform(name, UniformValue::Vec3(value));
    }

    /// Write a `bool` uniform.
    fn set_bool(&mut self, name: &str, value: bool) {
        self.set_uniform(name, UniformValue::Bool(value));
    }

    /// Write a `mat4` uniform.
    fn set_mat4(&mut self, name: &str, value: Mat4) {
        self.set_uniform(name, UniformValue::Mat4(value));
    }
}

/// Uniform state of one program: a global block uploaded once per frame
/// and a per-object block snapshotted at every draw.
#[derive(Debug, Clone, Default)]
pub struct ShaderProgram<G, L> {
    globals: G,
    locals: L,
}

impl<G: UniformBlock, L: UniformBlock> ShaderProgram<G, L> {
    /// Route a named write: per-object names first, then globals.
    pub fn set(&mut self, name: &str, value: UniformValue) -> bool {
        let Some(path) = UniformPath::parse(name) else {
            return false;
        };
        self.locals.set(&path, value) || self.globals.set(&path, value)
    }

    /// Current global block.
    pub fn globals(&self) -> &G {
        &self.globals
    }

    /// Current per-object block.
    pub fn locals(&self) -> &L {
        &self.locals
    }
}

/// One recorded draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawCommand {
    /// Program the draw uses.
    pub program: Program,
    /// Mesh to draw.
    pub mesh: MeshId,
    /// Byte offset of the per-object block in the staging arena.
    pub offset: u32,
}

/// Per-frame scratch: per-object uniform snapshots and the draw list.
#[derive(Debug, Clone, Default)]
pub struct FrameStaging {
    arena: Vec<u8>,
    draws: Vec<DrawCommand>,
}

impl FrameStaging {
    /// Snapshot `locals` at the next aligned offset and record a draw.
    pub fn push<L: bytemuck::Pod>(
        &mut self,
        program: Program,
        mesh: MeshId,
        locals: &L,
    ) {
        let offset = self.arena.len();
        self.arena.extend_from_slice(bytemuck::bytes_of(locals));
        self.arena
            .resize(self.arena.len().next_multiple_of(UNIFORM_ALIGNMENT), 0);
        #[allow(clippy::cast_possible_truncation)]
        let offset = offset as u32;
        self.draws.push(DrawCommand {
            program,
            mesh,
            offset,
        });
    }

    /// Packed per-object uniform bytes.
    #[must_use]
    pub fn arena(&self) -> &[u8] {
        &self.arena
    }

    /// Draws in submission order.
    #[must_use]
    pub fn draws(&self) -> &[DrawCommand] {
        &self.draws
    }

    /// Whether nothing was drawn.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.draws.is_empty()
    }

    /// Forget everything, keeping the allocations.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.draws.clear();
    }
}

/// The lit and light-source programs plus the current-program cursor.
#[derive(Debug, Clone)]
pub struct ProgramSet {
    lit: ShaderProgram<LitGlobals, LitObject>,
    light_source: ShaderProgram<LightSourceGlobals, LightSourceObject>,
    current: Program,
    staging: FrameStaging,
}

impl Default for ProgramSet {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgramSet {
    /// Both programs with default uniforms; `Lit` is current.
    #[must_use]
    pub fn new() -> Self {
        Self {
            lit: ShaderProgram::default(),
            light_source: ShaderProgram::default(),
            current: Program::Lit,
            staging: FrameStaging::default(),
        }
    }

    /// Make `program` current and return it as a [`Shader`].
    pub fn use_program(&mut self, program: Program) -> &mut dyn Shader {
        self.current = program;
        self
    }

    /// The program uniform writes currently go to.
    #[must_use]
    pub fn current(&self) -> Program {
        self.current
    }

    /// Lit program state.
    #[must_use]
    pub fn lit(&self) -> &ShaderProgram<LitGlobals, LitObject> {
        &self.lit
    }

    /// Light-source program state.
    #[must_use]
    pub fn light_source(
        &self,
    ) -> &ShaderProgram<LightSourceGlobals, LightSourceObject> {
        &self.light_source
    }

    /// Draws recorded since the last [`Self::take_staging`].
    #[must_use]
    pub fn staging(&self) -> &FrameStaging {
        &self.staging
    }

    /// Move the frame's staging out, leaving an empty one behind.
    pub fn take_staging(&mut self) -> FrameStaging {
        std::mem::take(&mut self.staging)
    }

    /// Hand a consumed staging back so its allocations are reused.
    pub fn recycle(&mut self, mut staging: FrameStaging) {
        staging.clear();
        self.staging = staging;
    }

    /// Drop any draws recorded for an abandoned frame.
    pub fn clear_staging(&mut self) {
        self.staging.clear();
    }
}

impl Shader for ProgramSet {
    fn set_uniform(&mut self, name: &str, value: UniformValue) {
        let accepted = match self.current {
            Program::Lit => self.lit.set(name, value),
            Program::LightSource => self.light_source.set(name, value),
        };
        if !accepted {
            log::trace!(
                "{:?} program ignored uniform {name} = {value:?}",
                self.current
            );
        }
    }

    fn draw_mesh(&mut self, mesh: MeshId) {
        match self.current {
            Program::Lit => {
                self.staging.push(Program::Lit, mesh, &self.lit.locals);
            }
            Program::LightSource => self.staging.push(
                Program::LightSource,
                mesh,
                &self.light_source.locals,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_route_to_current_program() {
        let mut programs = ProgramSet::new();
        programs
            .use_program(Program::LightSource)
            .set_vec3("lightColor", Vec3::new(0.1, 0.1, 0.9));
        programs.use_program(Program::Lit).set_float("material.shininess", 16.0);

        assert_eq!(programs.light_source().locals().light_color, [0.1, 0.1, 0.9]);
        assert_eq!(programs.lit().locals().material.shininess, 16.0);
    }

    #[test]
    fn unknown_names_are_ignored() {
        let mut programs = ProgramSet::new();
        let before = programs.lit().globals().to_owned();
        let shader = programs.use_program(Program::Lit);
        shader.set_vec3("lightColor", Vec3::ONE);
        shader.set_float("no.such.uniform", 1.0);
        shader.set_mat4("viewPos", Mat4::IDENTITY);
        assert_eq!(*programs.lit().globals(), before);
    }

    #[test]
    fn draws_snapshot_locals_at_aligned_offsets() {
        let mut programs = ProgramSet::new();
        let shader = programs.use_program(Program::Lit);
        shader.set_float("material.shininess", 8.0);
        shader.draw_mesh(MeshId::new(0));
        shader.set_float("material.shininess", 32.0);
        shader.draw_mesh(MeshId::new(0));
        programs.use_program(Program::LightSource).draw_mesh(MeshId::new(1));

        let staging = programs.staging();
        let offsets: Vec<_> = staging.draws().iter().map(|d| d.offset).collect();
        assert_eq!(offsets, vec![0, 256, 512]);
        assert_eq!(staging.arena().len(), 768);
        assert_eq!(staging.draws()[2].program, Program::LightSource);

        let second: LitObject = bytemuck::pod_read_unaligned(
            &staging.arena()[256..256 + size_of::<LitObject>()],
        );
        assert_eq!(second.material.shininess, 32.0);
    }

    #[test]
    fn locals_persist_between_draws() {
        let mut programs = ProgramSet::new();
        let shader = programs.use_program(Program::Lit);
        shader.set_bool("useDirectionalLight", true);
        shader.draw_mesh(MeshId::new(0));
        shader.draw_mesh(MeshId::new(0));
        let arena = programs.staging().arena();
        let second: LitObject = bytemuck::pod_read_unaligned(
            &arena[256..256 + size_of::<LitObject>()],
        );
        assert_eq!(second.use_directional_light, 1);
    }

    #[test]
    fn recycled_staging_is_empty() {
        let mut programs = ProgramSet::new();
        programs.use_program(Program::Lit).draw_mesh(MeshId::new(0));
        let staging = programs.take_staging();
        assert_eq!(staging.draws().len(), 1);
        assert!(programs.staging().is_empty());
        programs.recycle(staging);
        assert!(programs.staging().is_empty());
        assert!(programs.staging().arena().is_empty());
    }
}
