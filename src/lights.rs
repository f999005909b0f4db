//! The light rig: one directional light, the candle and star point
//! lights, and the spotlight riding on the light of Gabriel.
//!
//! Constant parameters are written once when the scene starts
//! ([`LightRig::setup_lit`], [`LightRig::setup_light_source`]); the moving
//! lights are rewritten every frame by [`LightRig::animate`] as closed-form
//! functions of absolute time.

use glam::Vec3;

use crate::drawable::{Orbit, Stars};
use crate::gpu::Shader;
use crate::options::{FogOptions, LightingOptions};

/// Point light slot driven by the candle. Star `i` drives slot `i + 1`.
pub const CANDLE_SLOT: usize = 0;

/// Light and fog parameters shared by both programs.
#[derive(Debug, Clone, PartialEq)]
pub struct LightRig {
    lighting: LightingOptions,
    fog: FogOptions,
    background: Vec3,
}

impl LightRig {
    /// Rig from the configured lighting and fog over `background`.
    #[must_use]
    pub fn new(
        lighting: &LightingOptions,
        fog: &FogOptions,
        background: [f32; 3],
    ) -> Self {
        Self {
            lighting: lighting.clone(),
            fog: fog.clone(),
            background: Vec3::from_array(background),
        }
    }

    /// Point light slot of star `index`.
    #[must_use]
    pub const fn star_slot(index: usize) -> usize {
        index + CANDLE_SLOT + 1
    }

    /// Write the start-up uniforms of the lit program: camera position,
    /// background, fog, and every light.
    pub fn setup_lit(
        &self,
        shader: &mut dyn Shader,
        view_pos: Vec3,
        candle: Vec3,
        stars: &Stars,
        time: f32,
    ) {
        shader.set_vec3("viewPos", view_pos);
        shader.set_vec3("backgroundColor", self.background);
        self.write_fog(shader);

        let dir = &self.lighting.directional;
        shader.set_vec3("dirLight.direction", Vec3::from_array(dir.direction));
        shader.set_vec3("dirLight.ambient", Vec3::splat(dir.ambient));
        shader.set_vec3("dirLight.diffuse", Vec3::splat(dir.diffuse));
        shader.set_vec3("dirLight.specular", Vec3::splat(dir.specular));

        #[allow(clippy::cast_precision_loss)]
        let count = (stars.len() + 1) as f32;
        shader.set_float("pointLightCount", count);
        self.write_point_light(shader, CANDLE_SLOT, candle);
        for (i, position) in stars.positions(time).enumerate() {
            self.write_point_light(shader, Self::star_slot(i), position);
        }

        let spot = &self.lighting.spot;
        shader.set_float("spotLights[0].cutOff", spot.cut_off_deg.to_radians().cos());
        shader.set_float(
            "spotLights[0].outerCutOff",
            spot.outer_cut_off_deg.to_radians().cos(),
        );
        shader.set_vec3("spotLights[0].ambient", Vec3::from_array(spot.ambient));
        shader.set_vec3("spotLights[0].diffuse", Vec3::from_array(spot.color));
        shader.set_vec3("spotLights[0].specular", Vec3::from_array(spot.color));
        shader.set_float("spotLights[0].constant", spot.constant);
        shader.set_float("spotLights[0].linear", spot.linear);
        shader.set_float("spotLights[0].quadratic", spot.quadratic);
    }

    /// Write the start-up uniforms of the light-source program.
    pub fn setup_light_source(&self, shader: &mut dyn Shader, view_pos: Vec3) {
        shader.set_vec3("lightColor", Vec3::ONE);
        shader.set_vec3("viewPos", view_pos);
        self.write_fog(shader);
    }

    /// Move the spotlight onto `spot_orbit` aimed at the Y axis, and every
    /// star light onto its star. Writes to the lit program.
    pub fn animate(
        &self,
        shader: &mut dyn Shader,
        time: f32,
        spot_orbit: &Orbit,
        stars: &Stars,
    ) {
        shader.set_vec3("spotLights[0].position", spot_orbit.position(time));
        shader.set_vec3("spotLights[0].direction", spot_orbit.inward(time));
        for (i, position) in stars.positions(time).enumerate() {
            shader.set_vec3(
                &format!("pointLights[{}].position", Self::star_slot(i)),
                position,
            );
        }
    }

    fn write_fog(&self, shader: &mut dyn Shader) {
        shader.set_bool("fog.useFog", self.fog.enabled);
        shader.set_vec3("fog.color", Vec3::from_array(self.fog.color));
        shader.set_float("fog.density", self.fog.density);
    }

    fn write_point_light(&self, shader: &mut dyn Shader, slot: usize, position: Vec3) {
        let point = &self.lighting.point;
        let color = Vec3::from_array(point.color);
        let field = |name: &str| format!("pointLights[{slot}].{name}");
        shader.set_vec3(&field("position"), position);
        shader.set_vec3(&field("ambient"), Vec3::from_array(point.ambient));
        shader.set_vec3(&field("diffuse"), color);
        shader.set_vec3(&field("specular"), color);
        shader.set_float(&field("constant"), point.constant);
        shader.set_float(&field("linear"), point.linear);
        shader.set_float(&field("quadratic"), point.quadratic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drawable::LightOfGabriel;
    use crate::gpu::mesh::MeshId;
    use crate::gpu::recording::RecordingShader;
    use crate::gpu::shader::{Program, ProgramSet};
    use crate::gpu::{Model, UniformValue};
    use crate::options::{Options, CANDLE_COLOR};

    fn rig() -> LightRig {
        let opts = Options::default();
        LightRig::new(&opts.lighting, &opts.fog, opts.display.background_color)
    }

    fn stars(count: usize) -> Stars {
        Stars::new(Model::new(MeshId::new(0)), count, 3)
    }

    #[test]
    fn setup_writes_default_light_constants() {
        let mut shader = RecordingShader::default();
        rig().setup_lit(&mut shader, Vec3::ZERO, Vec3::X, &stars(2), 0.0);

        assert_eq!(
            shader.last("dirLight.ambient"),
            Some(UniformValue::Vec3(Vec3::splat(0.005)))
        );
        assert_eq!(
            shader.last("pointLights[2].diffuse"),
            Some(UniformValue::Vec3(Vec3::from_array(CANDLE_COLOR)))
        );
        assert_eq!(
            shader.last("pointLights[0].position"),
            Some(UniformValue::Vec3(Vec3::X))
        );
        assert_eq!(
            shader.last("pointLightCount"),
            Some(UniformValue::Float(3.0))
        );
        let Some(UniformValue::Float(cut)) = shader.last("spotLights[0].cutOff")
        else {
            panic!("cutOff not written");
        };
        assert!((cut - 8.5_f32.to_radians().cos()).abs() < 1e-6);
        assert_eq!(shader.last("fog.useFog"), Some(UniformValue::Bool(true)));
        assert!(shader.draws().is_empty());
    }

    #[test]
    fn spotlight_tracks_gabriel() {
        let mut shader = RecordingShader::default();
        let orbit = LightOfGabriel::ORBIT;
        let t = 2.3;
        rig().animate(&mut shader, t, &orbit, &stars(0));

        let p = orbit.position(t);
        assert_eq!(
            shader.last("spotLights[0].position"),
            Some(UniformValue::Vec3(p))
        );
        assert_eq!(
            shader.last("spotLights[0].direction"),
            Some(UniformValue::Vec3(-Vec3::new(p.x, 0.0, p.z)))
        );
    }

    #[test]
    fn star_i_drives_point_light_i_plus_one() {
        let sky = stars(4);
        let mut shader = RecordingShader::default();
        rig().animate(&mut shader, 1.0, &LightOfGabriel::ORBIT, &sky);
        for i in 0..4 {
            let expected = sky.position(i, 1.0).unwrap();
            assert_eq!(
                shader.last(&format!("pointLights[{}].position", i + 1)),
                Some(UniformValue::Vec3(expected))
            );
        }
        assert_eq!(shader.last("pointLights[0].position"), None);
    }

    #[test]
    fn setup_lands_in_lit_globals() {
        let mut programs = ProgramSet::new();
        let sky = stars(63);
        rig().setup_lit(
            programs.use_program(Program::Lit),
            Vec3::new(0.0, 0.0, -7.0),
            Vec3::new(0.6, 0.45, -0.35),
            &sky,
            0.0,
        );
        let globals = programs.lit().globals();
        assert_eq!(globals.point_light_count, 64);
        assert_eq!(globals.point_lights[0].position, [0.6, 0.45, -0.35]);
        assert_eq!(globals.fog.use_fog, 1);
    }

    #[test]
    fn light_source_setup_is_white_with_fog() {
        let mut shader = RecordingShader::default();
        rig().setup_light_source(&mut shader, Vec3::Z);
        assert_eq!(
            shader.last("lightColor"),
            Some(UniformValue::Vec3(Vec3::ONE))
        );
        assert_eq!(
            shader.last("fog.density"),
            Some(UniformValue::Float(0.03))
        );
    }
}
