use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Night sky: the default clear colour and fog colour.
pub const NIGHT_COLOR: [f32; 3] = [0.0, 0.0, 0.0];
/// Daytime sky blue, for presets that want a lit backdrop.
pub const DAY_COLOR: [f32; 3] = [0.529, 0.808, 0.922];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Display", inline)]
#[serde(default)]
/// Window and presentation settings.
pub struct DisplayOptions {
    /// Window title.
    #[schemars(skip)]
    pub title: String,
    /// Initial window width in logical pixels.
    #[schemars(title = "Width", range(min = 320, max = 7680))]
    pub width: u32,
    /// Initial window height in logical pixels.
    #[schemars(title = "Height", range(min = 240, max = 4320))]
    pub height: u32,
    /// Clear colour behind the scene.
    #[schemars(title = "Background")]
    pub background_color: [f32; 3],
    /// Wait for vertical blank when presenting.
    #[schemars(title = "VSync")]
    pub vsync: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            title: "Pantheon".into(),
            width: 800,
            height: 600,
            background_color: NIGHT_COLOR,
            vsync: true,
        }
    }
}
