//! Render attributes derived from a particle after integration

use glam::{EulerRot, Quat, Vec3};

use crate::color::Color;
use crate::constants::{COLOR_SPEED_GAIN, SPEED_SCALE_BOOST};
use crate::particle::Particle;

/// Look parameters read from the simulation parameters every tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttributeParams {
    pub particle_size: f32,
    /// Reached by fast particles
    pub core_color: Color,
    /// Reached by particles at rest
    pub edge_color: Color,
}

/// Render-ready state of one particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleAttributes {
    pub position: Vec3,
    /// Euler XYZ angles in radians
    pub rotation: Vec3,
    pub scale: f32,
    pub color: Color,
}

impl Default for ParticleAttributes {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: 0.0,
            color: Color::rgb(0.0, 0.0, 0.0),
        }
    }
}

impl ParticleAttributes {
    pub fn rotation_quat(&self) -> Quat {
        Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        )
    }
}

/// Scale grows up to 1.5x with in-plane speed
#[inline]
pub fn scale(intrinsic_scale: f32, particle_size: f32, velocity: Vec3) -> f32 {
    let speed = (velocity.x.abs() + velocity.y.abs()).clamp(0.0, 1.0);
    intrinsic_scale * particle_size * (1.0 + speed * SPEED_SCALE_BOOST)
}

/// Orientation mirrors the velocity components one to one; it is only visual flicker
#[inline]
pub fn rotation(velocity: Vec3) -> Vec3 {
    velocity
}

/// Edge-to-core blend factor, always within [0, 1]
#[inline]
pub fn color_blend(velocity: Vec3) -> f32 {
    let horizontal_speed = (velocity.x * velocity.x + velocity.y * velocity.y).sqrt();
    (horizontal_speed * COLOR_SPEED_GAIN).clamp(0.0, 1.0)
}

#[inline]
pub fn color(velocity: Vec3, params: &AttributeParams) -> Color {
    params
        .edge_color
        .lerp(params.core_color, color_blend(velocity))
}

/// Derive every render attribute for a particle
pub fn derive(particle: &Particle, params: &AttributeParams) -> ParticleAttributes {
    let velocity = particle.velocity();
    ParticleAttributes {
        position: particle.position(),
        rotation: rotation(velocity),
        scale: scale(particle.intrinsic_scale(), params.particle_size, velocity),
        color: color(velocity, params),
    }
}
