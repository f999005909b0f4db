use std::f32::consts::TAU;

use glam::{Mat4, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{Drawable, Material, Orbit};
use crate::gpu::{Model, Shader};

/// The planet, circling Zeus with a slow spin.
#[derive(Debug, Clone)]
pub struct Jupiter {
    model: Model,
    orbit: Orbit,
}

impl Jupiter {
    /// Orbit of the planet's centre.
    pub const ORBIT: Orbit = Orbit::new(1.25, 0.5, -0.5, 1.0);
    /// Uniform scale applied to the model.
    pub const SCALE: f32 = 0.3;
    /// Spin about Y in degrees per second.
    pub const SPIN_DEG_PER_SEC: f32 = 20.0;
    /// Surface material.
    pub const MATERIAL: Material = Material {
        ambient: Vec3::ONE,
        diffuse: Vec3::splat(0.7),
        specular: Vec3::splat(0.1),
        shininess: 16.0,
    };

    /// Wrap a loaded planet model.
    #[must_use]
    pub const fn new(model: Model) -> Self {
        Self {
            model,
            orbit: Self::ORBIT,
        }
    }

    /// The orbit this object travels.
    #[must_use]
    pub const fn orbit(&self) -> Orbit {
        self.orbit
    }

    /// Centre of the planet at `time`.
    #[must_use]
    pub fn position(&self, time: f32) -> Vec3 {
        self.orbit.position(time)
    }
}

impl Drawable for Jupiter {
    fn transform(&self, time: f32) -> Mat4 {
        Mat4::from_translation(self.position(time))
            * Mat4::from_scale(Vec3::splat(Self::SCALE))
            * Mat4::from_rotation_y(time * Self::SPIN_DEG_PER_SEC.to_radians())
    }

    fn draw(&self, time: f32, shader: &mut dyn Shader) {
        shader.set_mat4("model", self.transform(time));
        Self::MATERIAL.apply(shader);
        // Jupiter is lit only by the candle, the stars and the spotlight.
        shader.set_bool("useDirectionalLight", false);
        self.model.draw(shader);
    }
}

/// A field of small emissive stars, each on its own seeded orbit and each
/// driving one point light.
#[derive(Debug, Clone)]
pub struct Stars {
    model: Model,
    orbits: Vec<Orbit>,
}

impl Stars {
    /// Uniform scale of every star.
    pub const SCALE: f32 = 0.01;
    /// Emissive colour.
    pub const COLOR: Vec3 = Vec3::ONE;

    /// `count` stars whose orbits are drawn from a `StdRng` seeded with
    /// `seed`. The same seed always gives the same sky.
    #[must_use]
    pub fn new(model: Model, count: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let orbits = (0..count)
            .map(|_| {
                Orbit::new(
                    rng.random_range(6.0..14.0),
                    rng.random_range(-3.0..5.0),
                    rng.random_range(0.05..0.3),
                    rng.random_range(0.2..1.0),
                )
                .with_speed(rng.random_range(0.02..0.1))
                .with_phase(rng.random_range(0.0..TAU))
            })
            .collect();
        Self { model, orbits }
    }

    /// Number of stars.
    #[must_use]
    pub fn len(&self) -> usize {
        self.orbits.len()
    }

    /// Whether the sky is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orbits.is_empty()
    }

    /// Orbits in star order.
    #[must_use]
    pub fn orbits(&self) -> &[Orbit] {
        &self.orbits
    }

    /// Position of star `index` at `time`, if it exists.
    #[must_use]
    pub fn position(&self, index: usize, time: f32) -> Option<Vec3> {
        self.orbits.get(index).map(|o| o.position(time))
    }

    /// Every star's position at `time`, in star order.
    pub fn positions(&self, time: f32) -> impl Iterator<Item = Vec3> + '_ {
        self.orbits.iter().map(move |o| o.position(time))
    }
}

impl Drawable for Stars {
    /// The scale shared by every star; each star is then translated onto
    /// its own orbit.
    fn transform(&self, _time: f32) -> Mat4 {
        Mat4::from_scale(Vec3::splat(Self::SCALE))
    }

    fn draw(&self, time: f32, shader: &mut dyn Shader) {
        let local = self.transform(time);
        shader.set_vec3("lightColor", Self::COLOR);
        for position in self.positions(time) {
            shader.set_mat4("model", Mat4::from_translation(position) * local);
            self.model.draw(shader);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpu::mesh::MeshId;
    use crate::gpu::recording::RecordingShader;
    use crate::gpu::UniformValue;

    fn model() -> Model {
        Model::new(MeshId::new(0))
    }

    #[test]
    fn jupiter_transform_composes_translate_scale_spin() {
        let jupiter = Jupiter::new(model());
        let t = 1.5;
        let m = jupiter.transform(t);
        let centre = m.transform_point3(Vec3::ZERO);
        assert!((centre - Jupiter::ORBIT.position(t)).length() < 1e-5);

        // A unit X vector is spun by t·20° then scaled by 0.3.
        let x = m.transform_vector3(Vec3::X);
        let angle = (t * 20.0).to_radians();
        let expected = Vec3::new(angle.cos(), 0.0, -angle.sin()) * 0.3;
        assert!((x - expected).length() < 1e-5);
    }

    #[test]
    fn jupiter_disables_directional_light() {
        let mut shader = RecordingShader::default();
        Jupiter::new(model()).draw(0.0, &mut shader);
        assert_eq!(
            shader.last("useDirectionalLight"),
            Some(UniformValue::Bool(false))
        );
        assert_eq!(
            shader.last("material.ambient"),
            Some(UniformValue::Vec3(Vec3::ONE))
        );
        assert_eq!(shader.draws().len(), 1);
    }

    #[test]
    fn stars_are_deterministic_per_seed() {
        let a = Stars::new(model(), 20, 7);
        let b = Stars::new(model(), 20, 7);
        let c = Stars::new(model(), 20, 8);
        assert_eq!(a.orbits(), b.orbits());
        assert_ne!(a.orbits(), c.orbits());
    }

    #[test]
    fn star_orbits_stay_in_range() {
        let stars = Stars::new(model(), 50, 0x5eed);
        assert_eq!(stars.len(), 50);
        for orbit in stars.orbits() {
            assert!((6.0..14.0).contains(&orbit.radius));
            assert!((-3.0..5.0).contains(&orbit.height));
        }
    }

    #[test]
    fn stars_draw_once_each_at_their_positions() {
        let stars = Stars::new(model(), 3, 1);
        let mut shader = RecordingShader::default();
        stars.draw(2.0, &mut shader);
        assert_eq!(shader.draws().len(), 3);
        for i in 0..3 {
            let Some(UniformValue::Mat4(m)) = shader.at_draw(i, "model") else {
                panic!("no model matrix for star {i}");
            };
            let expected = stars.position(i, 2.0).unwrap();
            assert!((m.transform_point3(Vec3::ZERO) - expected).length() < 1e-5);
        }
        assert_eq!(
            shader.last("lightColor"),
            Some(UniformValue::Vec3(Vec3::ONE))
        );
    }

    #[test]
    fn empty_sky_draws_nothing() {
        let stars = Stars::new(model(), 0, 1);
        let mut shader = RecordingShader::default();
        stars.draw(0.0, &mut shader);
        assert!(stars.is_empty());
        assert!(shader.draws().is_empty());
        assert_eq!(stars.position(0, 0.0), None);
    }
}
