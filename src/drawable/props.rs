use glam::{Mat4, Vec3};

use super::{Drawable, Material, Orbit};
use crate::gpu::{Model, Shader};

/// The statue at the centre of the scene.
#[derive(Debug, Clone)]
pub struct Zeus {
    model: Model,
}

impl Zeus {
    /// Base of the statue.
    pub const POSITION: Vec3 = Vec3::new(0.0, -1.0, 0.0);
    /// Uniform scale of the model.
    pub const SCALE: f32 = 0.35;
    /// White marble.
    pub const MATERIAL: Material = Material {
        ambient: Vec3::splat(0.6),
        diffuse: Vec3::splat(0.8),
        specular: Vec3::splat(0.5),
        shininess: 32.0,
    };

    /// Wrap the statue model.
    #[must_use]
    pub const fn new(model: Model) -> Self {
        Self { model }
    }
}

impl Drawable for Zeus {
    fn transform(&self, _time: f32) -> Mat4 {
        Mat4::from_translation(Self::POSITION)
            * Mat4::from_scale(Vec3::splat(Self::SCALE))
    }

    fn draw(&self, time: f32, shader: &mut dyn Shader) {
        shader.set_mat4("model", self.transform(time));
        Self::MATERIAL.apply(shader);
        shader.set_bool("useDirectionalLight", true);
        self.model.draw(shader);
    }
}

/// A pointing hand hovering over Zeus.
#[derive(Debug, Clone)]
pub struct PointyHand {
    model: Model,
}

impl PointyHand {
    /// Resting position.
    pub const POSITION: Vec3 = Vec3::new(0.0, 1.6, -0.4);
    /// Hover amplitude.
    pub const HOVER: f32 = 0.08;
    /// Uniform scale of the model.
    pub const SCALE: f32 = 0.1;
    /// Matte skin.
    pub const MATERIAL: Material = Material {
        ambient: Vec3::new(0.5, 0.4, 0.35),
        diffuse: Vec3::new(0.8, 0.65, 0.55),
        specular: Vec3::splat(0.2),
        shininess: 8.0,
    };

    /// Wrap the hand model.
    #[must_use]
    pub const fn new(model: Model) -> Self {
        Self { model }
    }

    /// Hover position at `time`.
    #[must_use]
    pub fn position(time: f32) -> Vec3 {
        Self::POSITION + Vec3::Y * Self::HOVER * (2.0 * time).sin()
    }
}

impl Drawable for PointyHand {
    fn transform(&self, time: f32) -> Mat4 {
        Mat4::from_translation(Self::position(time))
            * Mat4::from_rotation_y(0.5 * (0.5 * time).sin())
            * Mat4::from_scale(Vec3::splat(Self::SCALE))
    }

    fn draw(&self, time: f32, shader: &mut dyn Shader) {
        shader.set_mat4("model", self.transform(time));
        Self::MATERIAL.apply(shader);
        shader.set_bool("useDirectionalLight", true);
        self.model.draw(shader);
    }
}

/// A cupcake circling the statue's feet.
#[derive(Debug, Clone)]
pub struct Cupcake {
    model: Model,
    orbit: Orbit,
}

impl Cupcake {
    /// Orbit of the cupcake. Runs the opposite way to Jupiter.
    pub const ORBIT: Orbit = Orbit::new(0.7, 0.15, 0.05, 3.0).with_speed(-0.8);
    /// Uniform scale of the model.
    pub const SCALE: f32 = 0.08;
    /// Pink icing.
    pub const MATERIAL: Material = Material {
        ambient: Vec3::new(0.6, 0.35, 0.45),
        diffuse: Vec3::new(0.9, 0.55, 0.7),
        specular: Vec3::splat(0.3),
        shininess: 8.0,
    };

    /// Wrap the cupcake model.
    #[must_use]
    pub const fn new(model: Model) -> Self {
        Self {
            model,
            orbit: Self::ORBIT,
        }
    }

    /// Position at `time`.
    #[must_use]
    pub fn position(&self, time: f32) -> Vec3 {
        self.orbit.position(time)
    }
}

impl Drawable for Cupcake {
    fn transform(&self, time: f32) -> Mat4 {
        Mat4::from_translation(self.position(time))
            * Mat4::from_rotation_y(time)
            * Mat4::from_scale(Vec3::splat(Self::SCALE))
    }

    fn draw(&self, time: f32, shader: &mut dyn Shader) {
        shader.set_mat4("model", self.transform(time));
        Self::MATERIAL.apply(shader);
        shader.set_bool("useDirectionalLight", true);
        self.model.draw(shader);
    }
}
