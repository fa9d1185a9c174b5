//! Simulation parameters for runtime tuning

use std::ops::RangeInclusive;
use std::sync::{Arc, RwLock};

use swarm_physics::color::{DEEP_GREEN, GOLD};
use swarm_physics::{AttributeParams, Color, ForceParams};

pub const EXPLOSION_FORCE_RANGE: RangeInclusive<f32> = 0.1..=5.0;
pub const RETURN_SPEED_RANGE: RangeInclusive<f32> = 0.01..=0.2;
pub const PARTICLE_SIZE_RANGE: RangeInclusive<f32> = 0.05..=0.3;

/// Operator-tunable knobs, read as one snapshot per tick
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimulationParameters {
    /// Repulsion strength near the perturbation source
    pub explosion_force: f32,
    /// Spring constant pulling particles back to their targets
    pub return_speed: f32,
    /// Base render scale multiplier
    pub particle_size: f32,
    pub core_color: Color,
    pub edge_color: Color,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            explosion_force: 1.5,
            return_speed: 0.08,
            particle_size: 0.15,
            core_color: GOLD,
            edge_color: DEEP_GREEN,
        }
    }
}

impl SimulationParameters {
    /// Copy with every scalar forced into its published range.
    ///
    /// Non-finite values are replaced by the default for that field.
    pub fn clamped(&self) -> Self {
        let defaults = Self::default();
        let fit = |value: f32, range: &RangeInclusive<f32>, fallback: f32| {
            if value.is_finite() {
                value.clamp(*range.start(), *range.end())
            } else {
                fallback
            }
        };

        Self {
            explosion_force: fit(
                self.explosion_force,
                &EXPLOSION_FORCE_RANGE,
                defaults.explosion_force,
            ),
            return_speed: fit(
                self.return_speed,
                &RETURN_SPEED_RANGE,
                defaults.return_speed,
            ),
            particle_size: fit(
                self.particle_size,
                &PARTICLE_SIZE_RANGE,
                defaults.particle_size,
            ),
            core_color: self.core_color,
            edge_color: self.edge_color,
        }
    }

    /// True when every scalar already sits inside its range
    pub fn is_within_ranges(&self) -> bool {
        EXPLOSION_FORCE_RANGE.contains(&self.explosion_force)
            && RETURN_SPEED_RANGE.contains(&self.return_speed)
            && PARTICLE_SIZE_RANGE.contains(&self.particle_size)
    }

    pub fn force_params(&self) -> ForceParams {
        ForceParams {
            explosion_force: self.explosion_force,
            return_speed: self.return_speed,
        }
    }

    pub fn attribute_params(&self) -> AttributeParams {
        AttributeParams {
            particle_size: self.particle_size,
            core_color: self.core_color,
            edge_color: self.edge_color,
        }
    }
}

/// Process-wide parameter store shared between a control surface and the frame driver.
///
/// Writers replace the whole value; readers copy it out under one read lock, so
/// a tick never observes half of an update.
#[derive(Clone, Debug, Default)]
pub struct ParameterStore {
    inner: Arc<RwLock<SimulationParameters>>,
}

impl ParameterStore {
    pub fn new(params: SimulationParameters) -> Self {
        Self {
            inner: Arc::new(RwLock::new(params.clamped())),
        }
    }

    /// Consistent copy of the current parameters
    pub fn snapshot(&self) -> SimulationParameters {
        match self.inner.read() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    /// Replace the parameters, clamping them into range first.
    ///
    /// Returns the value actually stored.
    pub fn update(&self, params: SimulationParameters) -> SimulationParameters {
        let clamped = params.clamped();
        if clamped != params {
            log::warn!(
                "Clamped parameter update: force={} return={} size={} \
                 -> force={} return={} size={}",
                params.explosion_force,
                params.return_speed,
                params.particle_size,
                clamped.explosion_force,
                clamped.return_speed,
                clamped.particle_size
            );
        }

        match self.inner.write() {
            Ok(mut guard) => *guard = clamped,
            Err(poisoned) => *poisoned.into_inner() = clamped,
        }
        clamped
    }

    /// Read-modify-write under a single write lock
    pub fn modify(&self, f: impl FnOnce(&mut SimulationParameters)) -> SimulationParameters {
        let mut guard = match self.inner.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let mut next = *guard;
        f(&mut next);
        *guard = next.clamped();
        *guard
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_in_range() {
        assert!(SimulationParameters::default().is_within_ranges());
    }

    #[test]
    fn test_clamped_pins_to_range_edges() {
        let wild = SimulationParameters {
            explosion_force: 50.0,
            return_speed: 0.0,
            particle_size: f32::NAN,
            ..Default::default()
        };
        let tame = wild.clamped();

        assert_eq!(tame.explosion_force, 5.0);
        assert_eq!(tame.return_speed, 0.01);
        let defaults = SimulationParameters::default();
        assert_eq!(tame.particle_size, defaults.particle_size);
        assert!(tame.is_within_ranges());
    }

    #[test]
    fn test_store_update_is_visible_to_clones() {
        let store = ParameterStore::new(SimulationParameters::default());
        let panel = store.clone();

        panel.update(SimulationParameters {
            explosion_force: 3.0,
            ..Default::default()
        });

        assert_eq!(store.snapshot().explosion_force, 3.0);
    }

    #[test]
    fn test_store_clamps_updates() {
        let store = ParameterStore::default();
        let stored = store.update(SimulationParameters {
            return_speed: 1.0,
            ..Default::default()
        });
        assert_eq!(stored.return_speed, 0.2);
        assert_eq!(store.snapshot().return_speed, 0.2);
    }

    #[test]
    fn test_modify() {
        let store = ParameterStore::default();
        let after = store.modify(|p| p.particle_size = 0.25);
        assert_eq!(after.particle_size, 0.25);
        assert_eq!(store.snapshot().particle_size, 0.25);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let store = ParameterStore::default();
        let before = store.snapshot();
        store.modify(|p| p.explosion_force = 4.0);
        assert_eq!(before.explosion_force, 1.5);
    }
}
