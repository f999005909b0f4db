use serde::{Deserialize, Serialize};

/// Scene-level actions that can be bound to keys.
///
/// Serde serializes as `snake_case` strings so TOML presets stay readable:
/// ```toml
/// [keybindings.bindings]
/// move_forward = "KeyW"
/// freeze_frame = "Space"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    /// Fly along the look direction.
    MoveForward,
    /// Fly against the look direction.
    MoveBackward,
    /// Slide left, perpendicular to the look direction.
    StrafeLeft,
    /// Slide right, perpendicular to the look direction.
    StrafeRight,
    /// While held, skip clearing the frame so motion leaves trails.
    FreezeFrame,
    /// Close the scene.
    Quit,
}

impl KeyAction {
    /// Every action, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::MoveForward,
        Self::MoveBackward,
        Self::StrafeLeft,
        Self::StrafeRight,
        Self::FreezeFrame,
        Self::Quit,
    ];

    const fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// Set of actions whose keys are currently held down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeldActions(u8);

impl HeldActions {
    /// Mark `action` as held.
    pub fn insert(&mut self, action: KeyAction) {
        self.0 |= action.bit();
    }

    /// Mark `action` as released.
    pub fn remove(&mut self, action: KeyAction) {
        self.0 &= !action.bit();
    }

    /// Whether `action` is held.
    #[must_use]
    pub fn contains(self, action: KeyAction) -> bool {
        self.0 & action.bit() != 0
    }

    /// Whether nothing is held.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterate the held actions.
    pub fn iter(self) -> impl Iterator<Item = KeyAction> {
        KeyAction::ALL.into_iter().filter(move |a| self.contains(*a))
    }
}
