use std::f32::consts::PI;

use glam::{Mat4, Vec3};

use super::{Drawable, Orbit};
use crate::gpu::{Model, Shader};
use crate::options::CANDLE_COLOR;

/// A small blue light circling the scene. The spotlight rides on it.
#[derive(Debug, Clone)]
pub struct LightOfGabriel {
    model: Model,
    orbit: Orbit,
}

impl LightOfGabriel {
    /// Orbit of the light and of the spotlight attached to it.
    pub const ORBIT: Orbit = Orbit::new(-2.25, 0.0, 0.1, PI);
    /// Uniform scale of the star mesh.
    pub const SCALE: f32 = 0.02;
    /// Emissive colour.
    pub const COLOR: Vec3 = Vec3::new(0.1, 0.1, 0.9);

    /// Wrap the star model.
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

    /// Position at `time`.
    #[must_use]
    pub fn position(&self, time: f32) -> Vec3 {
        self.orbit.position(time)
    }
}

impl Drawable for LightOfGabriel {
    fn transform(&self, time: f32) -> Mat4 {
        Mat4::from_translation(self.position(time))
            * Mat4::from_scale(Vec3::splat(Self::SCALE))
    }

    fn draw(&self, time: f32, shader: &mut dyn Shader) {
        shader.set_mat4("model", self.transform(time));
        shader.set_vec3("lightColor", Self::COLOR);
        self.model.draw(shader);
    }
}

/// A flickering candle flame beside Zeus. It is point light 0.
#[derive(Debug, Clone)]
pub struct CandleLight {
    model: Model,
}

impl CandleLight {
    /// Where the flame sits.
    pub const POSITION: Vec3 = Vec3::new(0.6, 0.45, -0.35);
    /// Resting scale of the flame.
    pub const SCALE: f32 = 0.015;
    /// Relative flicker amplitude.
    pub const FLICKER: f32 = 0.08;
    /// Flicker angular frequency (rad/s).
    pub const FLICKER_FREQUENCY: f32 = 13.0;
    /// Emissive colour, matching the point light it drives.
    pub const COLOR: Vec3 = Vec3::from_array(CANDLE_COLOR);

    /// Wrap the star model.
    #[must_use]
    pub const fn new(model: Model) -> Self {
        Self { model }
    }

    /// Flame scale at `time`.
    #[must_use]
    pub fn scale(time: f32) -> f32 {
        Self::SCALE
            * Self::FLICKER.mul_add((Self::FLICKER_FREQUENCY * time).sin(), 1.0)
    }
}

impl Drawable for CandleLight {
    fn transform(&self, time: f32) -> Mat4 {
        Mat4::from_translation(Self::POSITION)
            * Mat4::from_scale(Vec3::splat(Self::scale(time)))
    }

    fn draw(&self, time: f32, shader: &mut dyn Shader) {
        shader.set_mat4("model", self.transform(time));
        shader.set_vec3("lightColor", Self::COLOR);
        self.model.draw(shader);
    }
}
