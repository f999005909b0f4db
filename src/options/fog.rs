use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::display::NIGHT_COLOR;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Fog", inline)]
#[serde(default)]
/// Exponential-squared distance fog shared by both shader programs.
pub struct FogOptions {
    /// Whether fog is applied at all.
    #[schemars(title = "Enabled")]
    pub enabled: bool,
    /// Colour fragments fade toward.
    #[schemars(skip)]
    pub color: [f32; 3],
    /// Fog density per world unit.
    #[schemars(title = "Density", range(min = 0.0, max = 0.5), extend("step" = 0.005))]
    pub density: f32,
}

impl Default for FogOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            color: NIGHT_COLOR,
            density: 0.03,
        }
    }
}
