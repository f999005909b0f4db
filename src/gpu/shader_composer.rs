use std::borrow::Cow;

use naga_oil::compose::{
    ComposableModuleDescriptor, Composer, NagaModuleDescriptor,
    ShaderLanguage, ShaderType,
};

use crate::error::SceneError;

/// The lit Phong program.
pub const LIT_SHADER: (&str, &str) =
    (include_str!("../../assets/shaders/lit.wgsl"), "lit.wgsl");
/// The flat emissive program for light sources.
pub const LIGHT_SOURCE_SHADER: (&str, &str) = (
    include_str!("../../assets/shaders/light_source.wgsl"),
    "light_source.wgsl",
);
/// Full-screen copy of the scene target to the swapchain.
pub const BLIT_SHADER: (&str, &str) =
    (include_str!("../../assets/shaders/blit.wgsl"), "blit.wgsl");

/// Wraps `naga_oil::compose::Composer` to provide shader composition with
/// `#import` support.
///
/// Pre-loads the shared WGSL modules at construction time. Consuming
/// shaders use `#import pantheon::module_name` to pull in shared code. The
/// composer produces `naga::Module` IR directly, skipping WGSL re-parse at
/// runtime.
pub struct ShaderComposer {
    composer: Composer,
}

/// Shared module definition: (source, file_path)
struct ModuleDef {
    source: &'static str,
    file_path: &'static str,
}

impl ShaderComposer {
    /// Register the shared modules.
    ///
    /// # Errors
    ///
    /// [`SceneError::Shader`] if a shared module fails to parse.
    pub fn new() -> Result<Self, SceneError> {
        let mut composer = Composer::default();

        // Modules with no dependencies first.
        let modules: &[ModuleDef] = &[
            ModuleDef {
                source: include_str!("../../assets/shaders/modules/camera.wgsl"),
                file_path: "modules/camera.wgsl",
            },
            ModuleDef {
                source: include_str!("../../assets/shaders/modules/fog.wgsl"),
                file_path: "modules/fog.wgsl",
            },
        ];

        for m in modules {
            let _ = composer
                .add_composable_module(ComposableModuleDescriptor {
                    source: m.source,
                    file_path: m.file_path,
                    language: ShaderLanguage::Wgsl,
                    ..Default::default()
                })
                .map_err(|e| {
                    SceneError::Shader(format!(
                        "failed to register module '{}': {e}",
                        m.file_path
                    ))
                })?;
        }

        Ok(Self { composer })
    }

    /// Compose a shader source string (which may contain `#import`
    /// directives) into a `wgpu::ShaderModule` ready for pipeline creation.
    ///
    /// # Errors
    ///
    /// [`SceneError::Shader`] if composition fails.
    pub fn compose(
        &mut self,
        device: &wgpu::Device,
        label: &str,
        (source, file_path): (&str, &str),
    ) -> Result<wgpu::ShaderModule, SceneError> {
        let naga_module = self.compose_naga(source, file_path)?;
        Ok(device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Naga(Cow::Owned(naga_module)),
        }))
    }

    /// Compose a shader source into a `naga::Module` without creating a wgpu
    /// shader module. Useful for testing shader composition without a GPU
    /// device.
    ///
    /// # Errors
    ///
    /// [`SceneError::Shader`] if composition fails.
    pub fn compose_naga(
        &mut self,
        source: &str,
        file_path: &str,
    ) -> Result<naga::Module, SceneError> {
        self.composer
            .make_naga_module(NagaModuleDescriptor {
                source,
                file_path,
                shader_type: ShaderType::Wgsl,
                ..Default::default()
            })
            .map_err(|e| {
                SceneError::Shader(format!(
                    "failed to compose '{file_path}': {e}"
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validate(module: &naga::Module) -> naga::valid::ModuleInfo {
        naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::default(),
        )
        .validate(module)
        .unwrap()
    }

    #[test]
    fn all_shaders_compose_and_validate() {
        let mut composer = ShaderComposer::new().unwrap();
        for (source, file_path) in
            [LIT_SHADER, LIGHT_SOURCE_SHADER, BLIT_SHADER]
        {
            let module = composer
                .compose_naga(source, file_path)
                .unwrap_or_else(|e| panic!("{file_path}: {e}"));
            let _ = validate(&module);
        }
    }

    #[test]
    fn scene_shaders_expose_expected_entry_points() {
        let mut composer = ShaderComposer::new().unwrap();
        for (source, file_path) in [LIT_SHADER, LIGHT_SOURCE_SHADER] {
            let module = composer.compose_naga(source, file_path).unwrap();
            let names: Vec<_> =
                module.entry_points.iter().map(|e| e.name.as_str()).collect();
            assert!(names.contains(&"vs_main"), "{file_path}");
            assert!(names.contains(&"fs_main"), "{file_path}");
        }
    }

    #[test]
    fn broken_source_is_a_shader_error() {
        let mut composer = ShaderComposer::new().unwrap();
        let err = composer
            .compose_naga("fn broken( {", "broken.wgsl")
            .unwrap_err();
        assert!(matches!(err, SceneError::Shader(_)));
    }
}
