/// Platform-agnostic input events.
///
/// These are fed into an [`InputProcessor`](super::InputProcessor), which
/// folds everything that arrived since the last frame into one
/// [`FrameInput`](super::FrameInput) snapshot.
///
/// # Example
///
/// ```
/// use pantheon::{InputEvent, InputProcessor};
///
/// let mut input = InputProcessor::new();
/// input.handle_event(InputEvent::Key { code: "KeyW".into(), pressed: true });
/// input.handle_event(InputEvent::Scroll { delta: 1.0 });
/// let frame = input.take_frame();
/// assert_eq!(frame.scroll, 1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Cursor moved to absolute screen position.
    CursorMoved {
        /// Horizontal position in physical pixels.
        x: f32,
        /// Vertical position in physical pixels.
        y: f32,
    },
    /// Scroll wheel (positive = zoom in).
    Scroll {
        /// Scroll amount in lines.
        delta: f32,
    },
    /// Physical key pressed or released.
    Key {
        /// Key code in `winit::keyboard::KeyCode` debug format (`"KeyW"`,
        /// `"Space"`, `"Escape"`).
        code: String,
        /// `true` for press, `false` for release.
        pressed: bool,
    },
    /// Window lost keyboard focus; every held key counts as released.
    FocusLost,
}
