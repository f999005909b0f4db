//! Camera system for 3D scene viewing.
//!
//! Provides a first-person fly camera driven by per-frame input snapshots:
//! WASD-style movement, mouse look with a clamped pitch, and scroll zoom.

/// Core camera struct, its pure input transitions, and view/projection
/// matrices.
pub mod core;

pub use self::core::{
    front_from_angles, Camera, MAX_FOV, MIN_FOV, MOUSE_SENSITIVITY, PITCH_LIMIT,
};
