//! Input handling: event types, bindable actions, and the processor that
//! turns raw window events into per-frame snapshots.

/// Platform-agnostic input events.
pub mod event;
/// Bindable actions and the held-action set.
pub mod keyboard;
/// Converts raw events into frame snapshots.
pub mod processor;

pub use event::InputEvent;
pub use keyboard::{HeldActions, KeyAction};
pub use processor::{FrameInput, InputProcessor};
