//! Crate-level error types.

use std::fmt;

use crate::gpu::render_context::RenderContextError;

/// Errors produced by the pantheon crate.
#[derive(Debug)]
pub enum SceneError {
    /// GPU context initialization failure.
    Gpu(RenderContextError),
    /// Failed to load a model file.
    ModelLoad {
        /// Path of the model that failed to load.
        path: String,
        /// Loader diagnostic.
        reason: String,
    },
    /// WGSL composition or validation failure.
    Shader(String),
    /// The presentation surface could not hand out a frame.
    Surface(wgpu::SurfaceError),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Viewer event-loop failure.
    Viewer(String),
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::ModelLoad { path, reason } => {
                write!(f, "failed to load model {path}: {reason}")
            }
            Self::Shader(msg) => write!(f, "shader error: {msg}"),
            Self::Surface(e) => write!(f, "surface error: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
        }
    }
}

impl std::error::Error for SceneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            Self::Surface(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RenderContextError> for SceneError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<wgpu::SurfaceError> for SceneError {
    fn from(e: wgpu::SurfaceError) -> Self {
        Self::Surface(e)
    }
}

impl From<std::io::Error> for SceneError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
