//! In-memory [`Shader`] that logs every call, for tests.

use super::mesh::MeshId;
use super::shader::Shader;
use super::uniforms::UniformValue;

/// One call made through the [`Shader`] interface.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ShaderCall {
    /// A uniform write.
    Set(String, UniformValue),
    /// A `draw_mesh` call.
    Draw(MeshId),
}

/// Shader that keeps every call in order instead of drawing.
#[derive(Debug, Default)]
pub(crate) struct RecordingShader {
    /// Calls received so far.
    pub(crate) calls: Vec<ShaderCall>,
}

impl RecordingShader {
    /// Most recent value written to `name`.
    pub(crate) fn last(&self, name: &str) -> Option<UniformValue> {
        self.calls.iter().rev().find_map(|call| match call {
            ShaderCall::Set(n, v) if n == name => Some(*v),
            _ => None,
        })
    }

    /// Meshes drawn, in order.
    pub(crate) fn draws(&self) -> Vec<MeshId> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                ShaderCall::Draw(mesh) => Some(*mesh),
                ShaderCall::Set(..) => None,
            })
            .collect()
    }

    /// Value of `name` at the moment of the `draw`-th draw call.
    pub(crate) fn at_draw(&self, draw: usize, name: &str) -> Option<UniformValue> {
        let end = self
            .calls
            .iter()
            .enumerate()
            .filter(|(_, call)| matches!(call, ShaderCall::Draw(_)))
            .nth(draw)?
            .0;
        self.calls[..end].iter().rev().find_map(|call| match call {
            ShaderCall::Set(n, v) if n == name => Some(*v),
            _ => None,
        })
    }
}

impl Shader for RecordingShader {
    fn set_uniform(&mut self, name: &str, value: UniformValue) {
        self.calls.push(ShaderCall::Set(name.to_owned(), value));
    }

    fn draw_mesh(&mut self, mesh: MeshId) {
        self.calls.push(ShaderCall::Draw(mesh));
    }
}
