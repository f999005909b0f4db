use std::path::PathBuf;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Most stars the lit shader can light: the candle takes point light 0.
pub const MAX_STARS: u32 = 63;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Scene", inline)]
#[serde(default)]
/// Asset locations and the procedural star field.
pub struct SceneOptions {
    /// Directory the model file names are resolved against.
    #[schemars(skip)]
    pub asset_dir: PathBuf,
    /// Model files, relative to `asset_dir`.
    #[schemars(skip)]
    pub models: ModelFiles,
    /// Number of orbiting stars (clamped to [`MAX_STARS`]).
    #[schemars(title = "Stars", range(min = 0, max = 63))]
    pub star_count: u32,
    /// Seed for star placement; equal seeds give equal skies.
    #[schemars(title = "Star Seed")]
    pub star_seed: u64,
}

impl SceneOptions {
    /// `star_count` clamped to the point-light capacity.
    #[must_use]
    pub fn effective_star_count(&self) -> usize {
        self.star_count.min(MAX_STARS) as usize
    }

    /// Absolute path of a model file.
    #[must_use]
    pub fn model_path(&self, file: &str) -> PathBuf {
        self.asset_dir.join(file)
    }
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            asset_dir: PathBuf::from("assets/models"),
            models: ModelFiles::default(),
            star_count: 50,
            star_seed: 0x5eed,
        }
    }
}

/// Model file names, relative to [`SceneOptions::asset_dir`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(default)]
pub struct ModelFiles {
    /// Statue at the centre.
    pub zeus: String,
    /// Orbiting planet.
    pub jupiter: String,
    /// Shared by the candle, the blue light and every star.
    pub star: String,
    /// Hand hovering overhead.
    pub pointy_hand: String,
    /// Cupcake circling the base.
    pub cupcake: String,
}

impl Default for ModelFiles {
    fn default() -> Self {
        Self {
            zeus: "zeus.glb".into(),
            jupiter: "jupiter.glb".into(),
            star: "sun.glb".into(),
            pointy_hand: "pointy_hand.glb".into(),
            cupcake: "cupcake.glb".into(),
        }
    }
}
