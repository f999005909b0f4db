//! Shared utilities for the scene.

/// Frame timing: per-frame delta and smoothed FPS.
pub mod frame_clock;

pub use frame_clock::FrameClock;
