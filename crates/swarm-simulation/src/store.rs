//! Fixed-size storage for per-particle state

use glam::Vec3;
use rand::Rng;
use swarm_physics::{Particle, MAX_INTRINSIC_SCALE, MIN_INTRINSIC_SCALE};

/// Owns every particle of a swarm.
///
/// The population is fixed at construction: there is no insertion or removal,
/// and a particle's intrinsic scale cannot be changed once drawn.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleStore {
    particles: Vec<Particle>,
}

impl ParticleStore {
    /// Scatter `count` particles uniformly in the cube `[-extent, extent]³`, at rest
    pub fn scattered(count: usize, extent: f32, rng: &mut impl Rng) -> Self {
        let extent = extent.abs();
        let particles = (0..count)
            .map(|_| {
                let position = Vec3::new(
                    rng.random_range(-extent..=extent),
                    rng.random_range(-extent..=extent),
                    rng.random_range(-extent..=extent),
                );
                let scale = rng.random_range(MIN_INTRINSIC_SCALE..=MAX_INTRINSIC_SCALE);
                Particle::new(position, scale)
            })
            .collect();

        Self { particles }
    }

    /// Build a store from explicit particles, e.g. a hand-placed scenario
    pub fn from_particles(particles: Vec<Particle>) -> Self {
        Self { particles }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Particle> {
        self.particles.get(index)
    }

    pub fn position(&self, index: usize) -> Option<Vec3> {
        self.get(index).map(Particle::position)
    }

    pub fn velocity(&self, index: usize) -> Option<Vec3> {
        self.get(index).map(Particle::velocity)
    }

    /// Returns `false` if `index` is out of bounds
    pub fn set_position(&mut self, index: usize, position: Vec3) -> bool {
        match self.particles.get_mut(index) {
            Some(p) => {
                p.set_position(position);
                true
            }
            None => false,
        }
    }

    /// Returns `false` if `index` is out of bounds
    pub fn set_velocity(&mut self, index: usize, velocity: Vec3) -> bool {
        match self.particles.get_mut(index) {
            Some(p) => {
                p.set_velocity(velocity);
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [Particle] {
        &mut self.particles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_scattered_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let store = ParticleStore::scattered(1000, 5.0, &mut rng);

        assert_eq!(store.len(), 1000);
        for p in store.iter() {
            assert!(p.position().abs().max_element() <= 5.0);
            assert_eq!(p.velocity(), Vec3::ZERO);
            assert!((0.5..=1.0).contains(&p.intrinsic_scale()));
        }
    }

    #[test]
    fn test_same_seed_same_store() {
        let a = ParticleStore::scattered(64, 5.0, &mut StdRng::seed_from_u64(42));
        let b = ParticleStore::scattered(64, 5.0, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_indexed_access() {
        let mut store = ParticleStore::from_particles(vec![Particle::new(Vec3::ZERO, 0.5)]);

        assert!(store.set_position(0, Vec3::ONE));
        assert!(store.set_velocity(0, Vec3::X));
        assert_eq!(store.position(0), Some(Vec3::ONE));
        assert_eq!(store.velocity(0), Some(Vec3::X));

        assert!(!store.set_position(1, Vec3::ONE));
        assert_eq!(store.position(1), None);
    }
}
