//! Damped semi-implicit Euler, one step per rendered frame
//!
//! Nothing here is scaled by a time delta: a tick is a frame, so the swarm
//! moves faster on faster displays.

use glam::Vec3;

use crate::constants::DAMPING;
use crate::particle::Particle;

/// Advance a velocity by one tick.
///
/// Returns the new velocity and the position delta, which are the same vector:
/// the position moves by the freshly updated velocity.
#[inline]
pub fn step(velocity: Vec3, force: Vec3, damping: f32) -> (Vec3, Vec3) {
    let new_velocity = velocity * damping + force;
    (new_velocity, new_velocity)
}

/// [`step`] with the default damping
#[inline]
pub fn step_default(velocity: Vec3, force: Vec3) -> (Vec3, Vec3) {
    step(velocity, force, DAMPING)
}

/// Apply one step to a particle in place
#[inline]
pub fn integrate(particle: &mut Particle, force: Vec3, damping: f32) {
    let (velocity, delta) = step(particle.velocity(), force, damping);
    particle.set_velocity(velocity);
    particle.set_position(particle.position() + delta);
}
