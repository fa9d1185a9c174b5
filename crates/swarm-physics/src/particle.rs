//! Per-particle simulation state

use glam::Vec3;

/// One swarm member, in swarm-local space
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    position: Vec3,
    /// Velocity in world units per tick
    velocity: Vec3,
    /// Render scale drawn at creation, never changed afterwards
    intrinsic_scale: f32,
}

impl Particle {
    /// Create a particle at rest
    pub fn new(position: Vec3, intrinsic_scale: f32) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            intrinsic_scale,
        }
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    #[inline]
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    #[inline]
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    #[inline]
    pub fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    #[inline]
    pub fn intrinsic_scale(&self) -> f32 {
        self.intrinsic_scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_particle_is_at_rest() {
        let p = Particle::new(Vec3::new(1.0, 2.0, 3.0), 0.75);
        assert_eq!(p.position(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(p.velocity(), Vec3::ZERO);
        assert_eq!(p.intrinsic_scale(), 0.75);
    }

    #[test]
    fn test_setters_leave_scale_alone() {
        let mut p = Particle::new(Vec3::ZERO, 0.6);
        p.set_position(Vec3::X);
        p.set_velocity(Vec3::Y);
        assert_eq!(p.position(), Vec3::X);
        assert_eq!(p.velocity(), Vec3::Y);
        assert_eq!(p.intrinsic_scale(), 0.6);
    }
}
