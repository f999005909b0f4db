//! Scene options with TOML preset support.
//!
//! Everything that used to be a hard-coded constant of the demo (window
//! size, camera start pose, light parameters, fog, asset names, key
//! bindings) lives here. Options serialize to/from TOML so a preset can
//! override any subset of them.

mod camera;
mod display;
mod fog;
mod keybindings;
mod lighting;
mod scene;

use std::path::Path;

pub use camera::CameraOptions;
pub use display::{DisplayOptions, DAY_COLOR, NIGHT_COLOR};
pub use fog::FogOptions;
pub use keybindings::KeybindingOptions;
pub use lighting::{
    DirectionalLightOptions, LightingOptions, PointLightOptions,
    SpotLightOptions, CANDLE_COLOR,
};
pub use scene::{ModelFiles, SceneOptions, MAX_STARS};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::SceneError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[fog]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Window and presentation settings.
    pub display: DisplayOptions,
    /// Camera start pose and controls.
    pub camera: CameraOptions,
    /// Light rig parameters.
    pub lighting: LightingOptions,
    /// Distance fog.
    pub fog: FogOptions,
    /// Assets and star field.
    pub scene: SceneOptions,
    /// Keyboard binding options.
    #[schemars(skip)]
    pub keybindings: KeybindingOptions,
}

impl Options {
    /// Generate JSON Schema describing the editable options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Write the JSON Schema to `path` for external editors.
    ///
    /// # Errors
    ///
    /// [`SceneError::Io`] if the file cannot be written.
    pub fn write_json_schema(path: &Path) -> Result<(), SceneError> {
        let content = serde_json::to_string_pretty(&Self::json_schema())
            .map_err(|e| SceneError::OptionsParse(e.to_string()))?;
        std::fs::write(path, content).map_err(SceneError::Io)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// [`SceneError::Io`] if the file cannot be read,
    /// [`SceneError::OptionsParse`] if it is not valid options TOML.
    pub fn load(path: &Path) -> Result<Self, SceneError> {
        let content = std::fs::read_to_string(path).map_err(SceneError::Io)?;
        toml::from_str(&content)
            .map_err(|e| SceneError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// [`SceneError::Io`] if the file or its directory cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), SceneError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| SceneError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(SceneError::Io)?;
        }
        std::fs::write(path, content).map_err(SceneError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[fog]
density = 0.1

[lighting.spot]
cut_off_deg = 10.0
";
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.fog.density, 0.1);
        assert!(opts.fog.enabled);
        assert_eq!(opts.lighting.spot.cut_off_deg, 10.0);
        assert_eq!(opts.lighting.spot.outer_cut_off_deg, 13.5);
        assert_eq!(opts.lighting.point.linear, 0.14);
        assert_eq!(opts.camera.position, [0.0, 0.0, -7.0]);
        assert_eq!(opts.display.width, 800);
    }

    #[test]
    fn keybinding_lookup() {
        use crate::input::KeyAction;
        let opts = Options::default();
        assert_eq!(opts.keybindings.lookup("KeyW"), Some(KeyAction::MoveForward));
        assert_eq!(opts.keybindings.lookup("Space"), Some(KeyAction::FreezeFrame));
        assert_eq!(opts.keybindings.lookup("Escape"), Some(KeyAction::Quit));
        assert_eq!(opts.keybindings.lookup("KeyZ"), None);
    }

    #[test]
    fn rebinding_from_toml_rebuilds_lookup() {
        use crate::input::KeyAction;
        let toml_str = r#"
[keybindings.bindings]
move_forward = "ArrowUp"
quit = "KeyQ"
"#;
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.keybindings.lookup("ArrowUp"), Some(KeyAction::MoveForward));
        assert_eq!(opts.keybindings.lookup("KeyQ"), Some(KeyAction::Quit));
        assert_eq!(opts.keybindings.lookup("KeyW"), None);
    }

    #[test]
    fn star_count_is_clamped_to_light_capacity() {
        let mut scene = SceneOptions::default();
        assert_eq!(scene.effective_star_count(), 50);
        scene.star_count = 500;
        assert_eq!(scene.effective_star_count(), MAX_STARS as usize);
    }

    #[test]
    fn save_then_load_preserves_options() {
        let dir = std::env::temp_dir()
            .join(format!("pantheon-options-{}", std::process::id()));
        let path = dir.join("night.toml");
        let mut opts = Options::default();
        opts.display.background_color = DAY_COLOR;
        opts.scene.star_count = 12;
        opts.save(&path).unwrap();

        assert_eq!(Options::load(&path).unwrap(), opts);
        assert_eq!(Options::list_presets(&dir), vec!["night".to_owned()]);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn malformed_file_is_an_options_error() {
        let dir = std::env::temp_dir()
            .join(format!("pantheon-bad-options-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad.toml");
        std::fs::write(&path, "[fog\ndensity = ").unwrap();
        assert!(matches!(
            Options::load(&path),
            Err(SceneError::OptionsParse(_))
        ));
        assert!(matches!(
            Options::load(&dir.join("missing.toml")),
            Err(SceneError::Io(_))
        ));
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn schema_file_is_valid_json() {
        let dir = std::env::temp_dir()
            .join(format!("pantheon-schema-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("options.schema.json");
        Options::write_json_schema(&path).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap())
                .unwrap();
        assert!(value["properties"]["fog"].is_object());
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("display"));
        assert!(props.contains_key("camera"));
        assert!(props.contains_key("lighting"));
        assert!(props.contains_key("fog"));
        assert!(props.contains_key("scene"));
        assert!(!props.contains_key("keybindings"));

        let fog = &props["fog"]["properties"];
        assert!(fog.get("density").is_some());
        assert!(fog.get("color").is_none());

        let camera = &props["camera"]["properties"];
        assert!(camera.get("fovy").is_some());
        assert!(camera.get("position").is_none());
    }
}
