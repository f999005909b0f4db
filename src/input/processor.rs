//! Folds raw platform events into per-frame input snapshots.
//!
//! The `InputProcessor` owns all transient input state (held keys, latest
//! cursor position, scroll accumulated since the last frame) and the
//! key-binding map. It is the only thing that sits between raw window
//! events and [`Scene::frame`](crate::scene::Scene::frame).

use glam::Vec2;

use super::event::InputEvent;
use super::keyboard::{HeldActions, KeyAction};
use crate::options::KeybindingOptions;

/// Everything the scene needs to know about input for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameInput {
    /// Actions whose keys are down at the end of the frame.
    pub held: HeldActions,
    /// Latest cursor position, if the cursor has ever been seen.
    pub cursor: Option<Vec2>,
    /// Scroll accumulated since the previous frame.
    pub scroll: f32,
}

impl FrameInput {
    /// Whether `action` is held this frame.
    #[must_use]
    pub fn is_held(&self, action: KeyAction) -> bool {
        self.held.contains(action)
    }
}

/// Converts raw window events into [`FrameInput`] snapshots.
///
/// # Usage
///
/// ```ignore
/// // In the event loop:
/// input_processor.handle_event(event);
///
/// // Once per redraw:
/// let input = input_processor.take_frame();
/// scene.frame(now, &input, &mut renderer)?;
/// ```
pub struct InputProcessor {
    held: HeldActions,
    cursor: Option<Vec2>,
    scroll: f32,
    /// Key string → action mapping.
    key_bindings: KeybindingOptions,
}

impl InputProcessor {
    /// Create a new processor with default key bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_key_bindings(KeybindingOptions::default())
    }

    /// Create a processor with custom key bindings.
    #[must_use]
    pub fn with_key_bindings(key_bindings: KeybindingOptions) -> Self {
        Self {
            held: HeldActions::default(),
            cursor: None,
            scroll: 0.0,
            key_bindings,
        }
    }

    /// Read-only access to the key bindings.
    #[must_use]
    pub fn key_bindings(&self) -> &KeybindingOptions {
        &self.key_bindings
    }

    /// Replace the key bindings. Keys held under the old map are released.
    pub fn set_key_bindings(&mut self, key_bindings: KeybindingOptions) {
        self.key_bindings = key_bindings;
        self.held = HeldActions::default();
    }

    /// Record one raw event.
    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::CursorMoved { x, y } => {
                self.cursor = Some(Vec2::new(x, y));
            }
            InputEvent::Scroll { delta } => self.scroll += delta,
            InputEvent::Key { code, pressed } => {
                // Unbound keys are ignored.
                if let Some(action) = self.key_bindings.lookup(&code) {
                    if pressed {
                        self.held.insert(action);
                    } else {
                        self.held.remove(action);
                    }
                }
            }
            InputEvent::FocusLost => self.held = HeldActions::default(),
        }
    }

    /// Snapshot input for the frame about to run and reset the per-frame
    /// accumulators. Held keys and the cursor position carry over.
    pub fn take_frame(&mut self) -> FrameInput {
        let frame = FrameInput {
            held: self.held,
            cursor: self.cursor,
            scroll: self.scroll,
        };
        self.scroll = 0.0;
        frame
    }
}

impl Default for InputProcessor {
    fn default() -> Self {
        Self::new()
    }
}
