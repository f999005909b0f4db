//! GPU side of the scene.
//!
//! Device/surface setup, the uniform blocks and the immediate-mode
//! [`Shader`] interface drawables talk to, glTF mesh loading, and the wgpu
//! [`Renderer`] that replays a frame's recorded draws.

/// Full-screen copy of the scene target to the swapchain.
pub mod blit;
/// Growable GPU buffers with automatic reallocation.
pub mod dynamic_buffer;
/// Vertex layout, CPU mesh data, and uploaded meshes.
pub mod mesh;
/// glTF loading and the shared model handle.
pub mod model;
/// Shared wgpu boilerplate for pipelines and bind group layouts.
pub mod pipeline_helpers;
/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// The wgpu render backend.
pub mod renderer;
/// Named-uniform programs and per-frame draw staging.
pub mod shader;
/// WGSL shader composition with `#import` support via naga-oil.
pub mod shader_composer;
/// Offscreen colour and depth targets.
pub mod texture;
/// `#[repr(C)]` uniform blocks mirrored in WGSL.
pub mod uniforms;

pub use model::Model;
pub use renderer::Renderer;
pub use shader::{Program, Shader};
pub use uniforms::UniformValue;

#[cfg(test)]
pub(crate) mod recording;
