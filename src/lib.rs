// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Real-time 3D scene demo built on wgpu.
//!
//! A fly-through camera looks at a small pantheon of models (Zeus, Jupiter,
//! a pointing hand, a cupcake) lit by a directional light, a candle, a
//! field of orbiting stars and a spotlight that circles the scene.
//!
//! # Key entry points
//!
//! - [`scene::Scene`] - per-frame update-and-draw loop
//! - [`camera::Camera`] - first-person camera with pure input transitions
//! - [`drawable::Drawable`] - the one capability every scene object has
//! - [`gpu::renderer::Renderer`] - the wgpu [`scene::RenderBackend`]
//! - [`options::Options`] - runtime configuration (display, camera, lighting,
//!   fog, scene contents, key bindings)
//!
//! # Architecture
//!
//! Everything above the GPU talks to an immediate-mode uniform interface
//! ([`gpu::shader::Shader`]): pick a program, set named uniforms, draw a
//! mesh. The wgpu backend snapshots per-object uniforms into a per-frame
//! staging arena and replays the draws with dynamic offsets when the frame
//! ends, so the scene logic stays testable without a GPU.

pub mod camera;
pub mod drawable;
pub mod error;
pub mod gpu;
pub mod input;
pub mod lights;
pub mod options;
pub mod scene;
pub mod util;
#[cfg(feature = "viewer")]
pub mod viewer;

pub use error::SceneError;
pub use input::{FrameInput, InputEvent, InputProcessor, KeyAction};
#[cfg(feature = "viewer")]
pub use viewer::Viewer;
