//! Scene objects.
//!
//! Every object is a [`Drawable`]: a shared [`Model`](crate::gpu::Model)
//! plus constants, with its transform a closed-form function of absolute
//! scene time. Nothing here holds per-frame state, so sampling the same
//! time twice always yields the same matrices.

/// Jupiter and the star field.
pub mod celestial;
/// Light-emitting objects: the candle and the light of Gabriel.
pub mod lights;
/// Statue, hand and cupcake.
pub mod props;

use glam::{Mat4, Vec3};

pub use celestial::{Jupiter, Stars};
pub use lights::{CandleLight, LightOfGabriel};
pub use props::{Cupcake, PointyHand, Zeus};

use crate::gpu::Shader;

/// Something the scene can place and draw.
pub trait Drawable {
    /// Model matrix at scene time `time` (seconds).
    fn transform(&self, time: f32) -> Mat4;

    /// Write per-object uniforms and draw with the current program.
    fn draw(&self, time: f32, shader: &mut dyn Shader);
}

/// Circular orbit around the Y axis with a vertical bob.
///
/// `position(t) = (r·sin(s·t + φ), h + b·sin(f·t), r·cos(s·t + φ))`. A
/// negative radius starts the orbit on the opposite side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orbit {
    /// Orbit radius `r`.
    pub radius: f32,
    /// Centre height `h`.
    pub height: f32,
    /// Bob amplitude `b`.
    pub bob: f32,
    /// Bob angular frequency `f` (rad/s).
    pub bob_frequency: f32,
    /// Angular speed `s` (rad/s).
    pub speed: f32,
    /// Phase `φ` (rad).
    pub phase: f32,
}

impl Orbit {
    /// Unit-speed orbit with zero phase.
    #[must_use]
    pub const fn new(radius: f32, height: f32, bob: f32, bob_frequency: f32) -> Self {
        Self {
            radius,
            height,
            bob,
            bob_frequency,
            speed: 1.0,
            phase: 0.0,
        }
    }

    /// Same orbit travelled at `speed` rad/s.
    #[must_use]
    pub const fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    /// Same orbit shifted by `phase` rad.
    #[must_use]
    pub const fn with_phase(mut self, phase: f32) -> Self {
        self.phase = phase;
        self
    }

    /// Position at time `t`.
    #[must_use]
    pub fn position(&self, t: f32) -> Vec3 {
        let angle = self.speed.mul_add(t, self.phase);
        Vec3::new(
            self.radius * angle.sin(),
            self.bob.mul_add((self.bob_frequency * t).sin(), self.height),
            self.radius * angle.cos(),
        )
    }

    /// Horizontal direction from the orbit position at `t` back to the
    /// Y axis. Unnormalized.
    #[must_use]
    pub fn inward(&self, t: f32) -> Vec3 {
        let p = self.position(t);
        -Vec3::new(p.x, 0.0, p.z)
    }
}

/// Phong material of the lit program.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Ambient reflectance.
    pub ambient: Vec3,
    /// Diffuse reflectance.
    pub diffuse: Vec3,
    /// Specular reflectance.
    pub specular: Vec3,
    /// Specular exponent.
    pub shininess: f32,
}

impl Material {
    /// Write `material.*`.
    pub fn apply(&self, shader: &mut dyn Shader) {
        shader.set_vec3("material.ambient", self.ambient);
        shader.set_vec3("material.diffuse", self.diffuse);
        shader.set_vec3("material.specular", self.specular);
        shader.set_float("material.shininess", self.shininess);
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::{PI, TAU};

    use super::*;
    use crate::gpu::recording::RecordingShader;
    use crate::gpu::UniformValue;

    #[test]
    fn orbit_at_zero() {
        let orbit = Orbit::new(1.25, 0.5, -0.5, 1.0);
        let p = orbit.position(0.0);
        assert!((p - Vec3::new(0.0, 0.5, 1.25)).length() < 1e-6);
    }

    #[test]
    fn orbit_is_periodic() {
        let orbit = Orbit::new(1.25, 0.5, -0.5, 1.0);
        for t in [0.0, 0.3, 1.7, 4.0] {
            let a = orbit.position(t);
            let b = orbit.position(t + TAU);
            assert!((a - b).length() < 1e-4, "t = {t}: {a} vs {b}");
        }
    }

    #[test]
    fn negative_radius_starts_opposite() {
        let orbit = Orbit::new(-2.25, 0.0, 0.1, PI);
        let p = orbit.position(0.0);
        assert!((p - Vec3::new(0.0, 0.0, -2.25)).length() < 1e-6);
        let p = orbit.position(PI / 2.0);
        assert!((p.x + 2.25).abs() < 1e-5);
        assert!((p.y - 0.1 * (PI * PI / 2.0).sin()).abs() < 1e-5);
    }

    #[test]
    fn speed_and_phase() {
        let orbit = Orbit::new(1.0, 0.0, 0.0, 0.0)
            .with_speed(2.0)
            .with_phase(PI / 2.0);
        let p = orbit.position(PI / 4.0);
        // angle = π: (sin π, 0, cos π)
        assert!((p - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-5);
    }

    #[test]
    fn inward_points_at_axis() {
        let orbit = Orbit::new(2.0, 3.0, 1.0, 1.0);
        for t in [0.0, 1.0, 2.5] {
            let p = orbit.position(t);
            let d = orbit.inward(t);
            assert_eq!(d.y, 0.0);
            assert!((Vec3::new(p.x, 0.0, p.z) + d).length() < 1e-6);
        }
    }

    #[test]
    fn material_writes_all_fields() {
        let mut shader = RecordingShader::default();
        Material {
            ambient: Vec3::ONE,
            diffuse: Vec3::splat(0.7),
            specular: Vec3::splat(0.1),
            shininess: 16.0,
        }
        .apply(&mut shader);
        assert_eq!(
            shader.last("material.diffuse"),
            Some(UniformValue::Vec3(Vec3::splat(0.7)))
        );
        assert_eq!(
            shader.last("material.shininess"),
            Some(UniformValue::Float(16.0))
        );
        assert_eq!(shader.calls.len(), 4);
    }
}
