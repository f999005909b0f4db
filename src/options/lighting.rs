use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Candle pink shared by the candle and every star light.
pub const CANDLE_COLOR: [f32; 3] = [1.0, 110.0 / 255.0, 199.0 / 255.0];

#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[schemars(title = "Lighting", inline)]
#[serde(default)]
/// Parameters of the fixed light rig.
pub struct LightingOptions {
    /// Sun-like light shared by objects that opt into it.
    pub directional: DirectionalLightOptions,
    /// Attenuated point lights (the candle and every star).
    pub point: PointLightOptions,
    /// The spotlight carried by the orbiting blue light.
    pub spot: SpotLightOptions,
}

/// The single directional light.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Directional Light", inline)]
#[serde(default)]
pub struct DirectionalLightOptions {
    /// Direction the light travels.
    #[schemars(skip)]
    pub direction: [f32; 3],
    /// Ambient intensity, grey.
    #[schemars(title = "Ambient", range(min = 0.0, max = 0.2), extend("step" = 0.005))]
    pub ambient: f32,
    /// Diffuse intensity, grey.
    #[schemars(title = "Diffuse", range(min = 0.0, max = 1.0), extend("step" = 0.05))]
    pub diffuse: f32,
    /// Specular intensity, grey.
    #[schemars(title = "Specular", range(min = 0.0, max = 1.0), extend("step" = 0.05))]
    pub specular: f32,
}

impl Default for DirectionalLightOptions {
    fn default() -> Self {
        Self {
            direction: [-0.2, -1.0, -0.3],
            ambient: 0.005,
            diffuse: 0.4,
            specular: 0.5,
        }
    }
}

/// Shared by the candle and every star light.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Point Lights", inline)]
#[serde(default)]
pub struct PointLightOptions {
    /// Ambient colour.
    #[schemars(skip)]
    pub ambient: [f32; 3],
    /// Diffuse and specular colour.
    #[schemars(skip)]
    pub color: [f32; 3],
    /// Constant attenuation.
    #[schemars(skip)]
    pub constant: f32,
    /// Linear attenuation.
    #[schemars(title = "Linear Falloff", range(min = 0.0, max = 1.0), extend("step" = 0.01))]
    pub linear: f32,
    /// Quadratic attenuation.
    #[schemars(title = "Quadratic Falloff", range(min = 0.0, max = 2.0), extend("step" = 0.01))]
    pub quadratic: f32,
}

impl Default for PointLightOptions {
    fn default() -> Self {
        Self {
            ambient: [0.0; 3],
            color: CANDLE_COLOR,
            constant: 1.0,
            linear: 0.14,
            quadratic: 0.07,
        }
    }
}

/// The spotlight riding on the light of Gabriel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Spotlight", inline)]
#[serde(default)]
pub struct SpotLightOptions {
    /// Full-intensity cone half-angle, degrees.
    #[schemars(title = "Inner Cone", range(min = 1.0, max = 45.0), extend("step" = 0.5))]
    pub cut_off_deg: f32,
    /// Falloff cone half-angle, degrees.
    #[schemars(title = "Outer Cone", range(min = 1.0, max = 60.0), extend("step" = 0.5))]
    pub outer_cut_off_deg: f32,
    /// Ambient colour.
    #[schemars(skip)]
    pub ambient: [f32; 3],
    /// Diffuse and specular colour.
    #[schemars(skip)]
    pub color: [f32; 3],
    /// Constant attenuation.
    #[schemars(skip)]
    pub constant: f32,
    /// Linear attenuation.
    #[schemars(skip)]
    pub linear: f32,
    /// Quadratic attenuation.
    #[schemars(skip)]
    pub quadratic: f32,
}

impl Default for SpotLightOptions {
    fn default() -> Self {
        Self {
            cut_off_deg: 8.5,
            outer_cut_off_deg: 13.5,
            ambient: [0.0; 3],
            color: [0.5, 0.5, 0.9],
            constant: 1.0,
            linear: 0.027,
            quadratic: 0.0028,
        }
    }
}
