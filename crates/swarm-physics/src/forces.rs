//! Force model: repulsion from the perturbation source, spring return to target
//!
//! Each particle is evaluated on its own against shared read-only inputs. There
//! is no particle-particle interaction.

use glam::Vec3;

use crate::constants::{INTERACTION_RADIUS, TRIGGER_RADIUS};

/// Which branch of the force model produced a force
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForceMode {
    /// Pushed away from the perturbation source
    Repel,
    /// Pulled back toward the particle's target
    Attract,
}

/// Strength knobs read from the simulation parameters every tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceParams {
    /// Peak repulsion at zero distance
    pub explosion_force: f32,
    /// Spring constant toward the target
    pub return_speed: f32,
}

/// Geometry of the perturbation interaction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceModel {
    /// Particles closer than this to the source are repelled
    pub interaction_radius: f32,
    /// Distance from `reference_point` at which the source arms repulsion by itself
    pub trigger_radius: f32,
    /// Geometric reference point of the swarm
    pub reference_point: Vec3,
}

impl Default for ForceModel {
    fn default() -> Self {
        Self {
            interaction_radius: INTERACTION_RADIUS,
            trigger_radius: TRIGGER_RADIUS,
            reference_point: Vec3::ZERO,
        }
    }
}

impl ForceModel {
    /// Whether the source is armed this tick, from hover or from proximity to the swarm.
    ///
    /// Independent of any particle, so the step evaluates it once per tick.
    #[inline]
    pub fn is_armed(&self, source: Vec3, is_perturbing: bool) -> bool {
        is_perturbing || source.distance(self.reference_point) < self.trigger_radius
    }

    /// Force on one particle for this tick.
    ///
    /// `_velocity` is accepted so the signature matches the other per-particle
    /// stages; the current model does not use it.
    pub fn compute_force(
        &self,
        position: Vec3,
        _velocity: Vec3,
        target: Vec3,
        source: Vec3,
        is_perturbing: bool,
        params: &ForceParams,
    ) -> (Vec3, ForceMode) {
        self.force_when(
            position,
            target,
            source,
            self.is_armed(source, is_perturbing),
            params,
        )
    }

    /// Same as [`ForceModel::compute_force`] with the arming decision already made
    #[inline]
    pub fn force_when(
        &self,
        position: Vec3,
        target: Vec3,
        source: Vec3,
        armed: bool,
        params: &ForceParams,
    ) -> (Vec3, ForceMode) {
        let d = position - source;
        let dist = d.length();

        // dist == 0 has no direction; such a particle takes the spring path this tick
        if armed && dist < self.interaction_radius && dist > 0.0 {
            let falloff = (self.interaction_radius - dist) / self.interaction_radius;
            let magnitude = falloff * params.explosion_force;
            return ((d / dist) * magnitude, ForceMode::Repel);
        }

        ((target - position) * params.return_speed, ForceMode::Attract)
    }
}
