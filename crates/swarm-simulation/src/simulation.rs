//! CPU swarm simulation
//!
//! One [`Swarm::tick`] per rendered frame. Every particle reads only shared,
//! read-only inputs during a tick (its target, the perturbation source and the
//! parameter snapshot), so the per-particle loop has no ordering dependency and
//! can run on the rayon pool with the `parallel` feature.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use swarm_physics::{
    attributes, integrator, target, AttributeParams, ForceMode, ForceModel, ForceParams, Particle,
    ParticleAttributes, SpiralShape, DAMPING, DEFAULT_PARTICLE_COUNT, ROOT_SPIN_PER_TICK,
    SPAWN_EXTENT,
};

use crate::error::SwarmError;
use crate::output::RenderOutput;
use crate::params::{ParameterStore, SimulationParameters};
use crate::store::ParticleStore;

/// Emit a debug summary every this many ticks
const LOG_INTERVAL: u64 = 300;

/// Shared perturbation input, sampled once per frame
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PerturbationSource {
    /// Pointer position mapped into swarm space
    pub position: Vec3,
    /// Hover signal from the collision surface
    pub active: bool,
}

impl PerturbationSource {
    pub fn new(position: Vec3, active: bool) -> Self {
        Self { position, active }
    }
}

/// Construction options for a [`Swarm`]
#[derive(Clone, Debug, PartialEq)]
pub struct SwarmConfig {
    pub count: usize,
    /// `None` draws a fresh seed from OS entropy
    pub seed: Option<u64>,
    pub shape: SpiralShape,
    pub force_model: ForceModel,
    pub damping: f32,
    /// Root rotation about +Y per tick, radians
    pub spin_per_tick: f32,
    /// Half-extent of the scatter cube
    pub spawn_extent: f32,
}

impl Default for SwarmConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_PARTICLE_COUNT,
            seed: None,
            shape: SpiralShape::default(),
            force_model: ForceModel::default(),
            damping: DAMPING,
            spin_per_tick: ROOT_SPIN_PER_TICK,
            spawn_extent: SPAWN_EXTENT,
        }
    }
}

impl SwarmConfig {
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_shape(mut self, shape: SpiralShape) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_force_model(mut self, force_model: ForceModel) -> Self {
        self.force_model = force_model;
        self
    }

    pub fn with_damping(mut self, damping: f32) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_spin(mut self, spin_per_tick: f32) -> Self {
        self.spin_per_tick = spin_per_tick;
        self
    }

    pub fn with_spawn_extent(mut self, extent: f32) -> Self {
        self.spawn_extent = extent;
        self
    }

    /// Check the settings a swarm cannot recover from at runtime.
    ///
    /// Damping must lie in (0, 1) or velocities never decay; the radii must be
    /// finite and positive, and the spawn extent and spin finite.
    pub fn validate(&self) -> Result<(), SwarmError> {
        let finite = [
            ("spawn_extent", self.spawn_extent),
            ("spin_per_tick", self.spin_per_tick),
        ];
        let positive = [
            ("interaction_radius", self.force_model.interaction_radius),
            ("trigger_radius", self.force_model.trigger_radius),
        ];

        if !(self.damping > 0.0 && self.damping < 1.0) {
            return Err(invalid("damping", self.damping, "a value in (0, 1)"));
        }
        if let Some(&(name, value)) = finite.iter().find(|(_, v)| !v.is_finite()) {
            return Err(invalid(name, value, "a finite value"));
        }
        if let Some(&(name, value)) = positive.iter().find(|(_, v)| !(v.is_finite() && *v > 0.0)) {
            return Err(invalid(name, value, "a finite value > 0"));
        }

        Ok(())
    }
}

fn invalid(name: &'static str, value: f32, expected: &'static str) -> SwarmError {
    SwarmError::InvalidSetting {
        name,
        value,
        expected,
    }
}

/// Create a swarm of `count` particles on the default spiral.
///
/// Fails only for a negative count.
pub fn create_swarm(count: i64, seed: Option<u64>) -> Result<Swarm, SwarmError> {
    let count = usize::try_from(count).map_err(|_| SwarmError::InvalidSwarmSize(count))?;
    let config = SwarmConfig {
        count,
        seed,
        ..Default::default()
    };
    Swarm::with_config(config)
}

/// A fixed population of particles forming the spiral tree
pub struct Swarm {
    store: ParticleStore,
    targets: Vec<Vec3>,
    output: RenderOutput,

    force_model: ForceModel,
    damping: f32,
    spin_per_tick: f32,

    root_rotation: f32,
    seed: u64,
    tick_count: u64,
    last_repelled: usize,
}

impl Swarm {
    pub fn with_config(config: SwarmConfig) -> Result<Self, SwarmError> {
        config.validate()?;

        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        let mut rng = StdRng::seed_from_u64(seed);

        let store = ParticleStore::scattered(config.count, config.spawn_extent, &mut rng);
        let targets = target::generate_with(config.count, &config.shape);

        log::info!(
            "Initialized swarm: {} particles, seed {}",
            config.count,
            seed
        );

        Ok(Self::assemble(store, targets, &config, seed))
    }

    /// Build a swarm from hand-placed particles and targets.
    ///
    /// `targets` is truncated or padded with the origin to match the particle count.
    pub fn from_parts(
        store: ParticleStore,
        mut targets: Vec<Vec3>,
        config: SwarmConfig,
    ) -> Result<Self, SwarmError> {
        config.validate()?;
        targets.resize(store.len(), Vec3::ZERO);
        let seed = config.seed.unwrap_or_default();
        Ok(Self::assemble(store, targets, &config, seed))
    }

    fn assemble(
        store: ParticleStore,
        targets: Vec<Vec3>,
        config: &SwarmConfig,
        seed: u64,
    ) -> Self {
        let output = RenderOutput::with_len(store.len());
        Self {
            store,
            targets,
            output,
            force_model: config.force_model,
            damping: config.damping,
            spin_per_tick: config.spin_per_tick,
            root_rotation: 0.0,
            seed,
            tick_count: 0,
            last_repelled: 0,
        }
    }

    /// Advance the swarm by one frame and return the fresh render output.
    ///
    /// `_dt` is ignored: the integrator advances one fixed step per call.
    /// `source` must be finite; sanitizing pointer input is the caller's job.
    pub fn tick(
        &mut self,
        _dt: f32,
        source: Vec3,
        is_perturbing: bool,
        params: &SimulationParameters,
    ) -> &RenderOutput {
        self.advance(source, is_perturbing, params, ParticleStep::run)
    }

    fn advance(
        &mut self,
        source: Vec3,
        is_perturbing: bool,
        params: &SimulationParameters,
        runner: StepRunner,
    ) -> &RenderOutput {
        debug_assert!(source.is_finite(), "perturbation source must be finite");

        let force_params = params.force_params();
        let attribute_params = params.attribute_params();
        let armed = self.force_model.is_armed(source, is_perturbing);

        let step = ParticleStep {
            model: self.force_model,
            damping: self.damping,
            source,
            armed,
            force_params,
            attribute_params,
        };

        self.last_repelled = runner(
            &step,
            self.store.as_mut_slice(),
            &self.targets,
            &mut self.output.attributes,
        );

        // Group-level spin, after and independent of the particle updates
        self.root_rotation = (self.root_rotation + self.spin_per_tick).rem_euclid(TAU);
        self.output.root_rotation = self.root_rotation;
        self.tick_count += 1;

        if self.tick_count % LOG_INTERVAL == 0 {
            log::debug!(
                "tick {}: {} repelled, mean target distance {:.3}",
                self.tick_count,
                self.last_repelled,
                self.mean_target_distance()
            );
        }

        &self.output
    }

    /// [`Swarm::tick`] with a [`PerturbationSource`]
    pub fn tick_source(
        &mut self,
        dt: f32,
        source: PerturbationSource,
        params: &SimulationParameters,
    ) -> &RenderOutput {
        self.tick(dt, source.position, source.active, params)
    }

    /// Tick with a fresh snapshot taken from a shared parameter store
    pub fn tick_with_store(
        &mut self,
        dt: f32,
        source: PerturbationSource,
        store: &ParameterStore,
    ) -> &RenderOutput {
        let params = store.snapshot();
        self.tick_source(dt, source, &params)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn particles(&self) -> &ParticleStore {
        &self.store
    }

    pub fn targets(&self) -> &[Vec3] {
        &self.targets
    }

    /// Output of the most recent tick (all defaults before the first one)
    pub fn output(&self) -> &RenderOutput {
        &self.output
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn root_rotation(&self) -> f32 {
        self.root_rotation
    }

    /// Particles that took the repel branch on the last tick
    pub fn repelled_count(&self) -> usize {
        self.last_repelled
    }

    /// Average distance between each particle and its target; 0 for an empty swarm
    pub fn mean_target_distance(&self) -> f32 {
        if self.store.is_empty() {
            return 0.0;
        }

        let total: f32 = self
            .store
            .iter()
            .zip(&self.targets)
            .map(|(p, t)| p.position().distance(*t))
            .sum();
        total / self.store.len() as f32
    }
}

/// Per-tick loop over every particle; returns how many were repelled
type StepRunner = fn(&ParticleStep, &mut [Particle], &[Vec3], &mut [ParticleAttributes]) -> usize;

/// Everything one particle update reads, copied out of the swarm for the tick
#[derive(Clone, Copy)]
struct ParticleStep {
    model: ForceModel,
    damping: f32,
    source: Vec3,
    armed: bool,
    force_params: ForceParams,
    attribute_params: AttributeParams,
}

impl ParticleStep {
    /// Force, integrate, derive. Returns true if the particle was repelled.
    #[inline]
    fn apply(&self, particle: &mut Particle, target: Vec3, slot: &mut ParticleAttributes) -> bool {
        let (force, mode) = self.model.force_when(
            particle.position(),
            target,
            self.source,
            self.armed,
            &self.force_params,
        );
        integrator::integrate(particle, force, self.damping);
        *slot = attributes::derive(particle, &self.attribute_params);
        mode == ForceMode::Repel
    }

    fn run(
        &self,
        particles: &mut [Particle],
        targets: &[Vec3],
        slots: &mut [ParticleAttributes],
    ) -> usize {
        #[cfg(feature = "parallel")]
        let repelled = self.run_parallel(particles, targets, slots);
        #[cfg(not(feature = "parallel"))]
        let repelled = self.run_sequential(particles, targets, slots);
        repelled
    }

    #[cfg_attr(all(feature = "parallel", not(test)), allow(dead_code))]
    fn run_sequential(
        &self,
        particles: &mut [Particle],
        targets: &[Vec3],
        slots: &mut [ParticleAttributes],
    ) -> usize {
        particles
            .iter_mut()
            .zip(targets)
            .zip(slots.iter_mut())
            .map(|((p, t), slot)| usize::from(self.apply(p, *t, slot)))
            .sum()
    }

    #[cfg(feature = "parallel")]
    fn run_parallel(
        &self,
        particles: &mut [Particle],
        targets: &[Vec3],
        slots: &mut [ParticleAttributes],
    ) -> usize {
        use rayon::prelude::*;

        particles
            .par_iter_mut()
            .zip(targets.par_iter())
            .zip(slots.par_iter_mut())
            .map(|((p, t), slot)| usize::from(self.apply(p, *t, slot)))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(position: Vec3, target: Vec3) -> Swarm {
        let store = ParticleStore::from_particles(vec![Particle::new(position, 1.0)]);
        Swarm::from_parts(store, vec![target], SwarmConfig::default()).unwrap()
    }

    #[test]
    fn test_negative_count_is_rejected() {
        assert_eq!(
            create_swarm(-1, Some(0)).err(),
            Some(SwarmError::InvalidSwarmSize(-1))
        );
    }

    #[test]
    fn test_empty_swarm_ticks() {
        let mut swarm = create_swarm(0, Some(0)).unwrap();
        let output = swarm.tick(0.016, Vec3::ZERO, true, &SimulationParameters::default());
        assert!(output.is_empty());
        assert_eq!(swarm.mean_target_distance(), 0.0);
    }

    #[test]
    fn test_default_count_and_seed() {
        let swarm = Swarm::with_config(SwarmConfig::default().with_seed(5)).unwrap();
        assert_eq!(swarm.len(), DEFAULT_PARTICLE_COUNT);
        assert_eq!(swarm.seed(), 5);
        assert_eq!(swarm.targets().len(), DEFAULT_PARTICLE_COUNT);
    }

    #[test]
    fn test_root_spins_each_tick() {
        let mut swarm = create_swarm(3, Some(1)).unwrap();
        let params = SimulationParameters::default();
        let far = Vec3::new(100.0, 0.0, 0.0);

        swarm.tick(0.016, far, false, &params);
        swarm.tick(0.016, far, false, &params);

        assert!((swarm.root_rotation() - 2.0 * ROOT_SPIN_PER_TICK).abs() < 1e-7);
        assert_eq!(swarm.output().root_rotation, swarm.root_rotation());
        assert_eq!(swarm.tick_count(), 2);
    }

    #[test]
    fn test_root_rotation_wraps() {
        let config = SwarmConfig::default()
            .with_count(1)
            .with_seed(1)
            .with_spin(4.0);
        let mut swarm = Swarm::with_config(config).unwrap();
        let params = SimulationParameters::default();
        for _ in 0..5 {
            swarm.tick(0.016, Vec3::splat(100.0), false, &params);
            assert!((0.0..TAU).contains(&swarm.root_rotation()));
        }
    }

    #[test]
    fn test_repelled_count() {
        let mut swarm = single(Vec3::new(1.0, 0.0, 0.0), Vec3::ZERO);
        swarm.tick(0.016, Vec3::ZERO, true, &SimulationParameters::default());
        assert_eq!(swarm.repelled_count(), 1);

        swarm.tick(0.016, Vec3::splat(100.0), false, &SimulationParameters::default());
        assert_eq!(swarm.repelled_count(), 0);
    }

    #[test]
    fn test_tick_with_store_reads_snapshot() {
        let store = ParameterStore::default();
        store.modify(|p| p.particle_size = 0.3);

        let mut swarm = single(Vec3::ZERO, Vec3::ZERO);
        let output = swarm.tick_with_store(
            0.016,
            PerturbationSource::new(Vec3::splat(100.0), false),
            &store,
        );
        // At rest on target: scale is intrinsic * size
        assert!((output.attributes[0].scale - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_from_parts_pads_targets() {
        let store = ParticleStore::from_particles(vec![
            Particle::new(Vec3::ONE, 1.0),
            Particle::new(Vec3::ONE, 1.0),
        ]);
        let swarm = Swarm::from_parts(store, vec![Vec3::X], SwarmConfig::default()).unwrap();
        assert_eq!(swarm.targets(), &[Vec3::X, Vec3::ZERO]);
    }

    #[test]
    fn test_damping_outside_unit_interval_is_rejected() {
        for damping in [0.0, 1.0, 1.5, f32::NAN] {
            let config = SwarmConfig::default().with_count(4).with_damping(damping);
            assert!(matches!(
                Swarm::with_config(config),
                Err(SwarmError::InvalidSetting { name: "damping", .. })
            ));
        }
    }

    #[test]
    fn test_non_finite_spawn_extent_is_rejected() {
        for extent in [f32::NAN, f32::INFINITY] {
            let config = SwarmConfig::default().with_count(4).with_spawn_extent(extent);
            assert!(matches!(
                Swarm::with_config(config),
                Err(SwarmError::InvalidSetting { name: "spawn_extent", .. })
            ));
        }
    }

    #[test]
    fn test_bad_radii_are_rejected() {
        let zero_trigger = ForceModel {
            trigger_radius: 0.0,
            ..Default::default()
        };
        let infinite_reach = ForceModel {
            interaction_radius: f32::INFINITY,
            ..Default::default()
        };

        let store = ParticleStore::from_particles(vec![Particle::new(Vec3::ZERO, 1.0)]);
        let config = SwarmConfig::default().with_force_model(zero_trigger);
        assert!(matches!(
            Swarm::from_parts(store, vec![Vec3::ZERO], config),
            Err(SwarmError::InvalidSetting { name: "trigger_radius", .. })
        ));

        let config = SwarmConfig::default().with_force_model(infinite_reach);
        assert!(matches!(
            config.validate(),
            Err(SwarmError::InvalidSetting { name: "interaction_radius", .. })
        ));
    }

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(SwarmConfig::default().validate(), Ok(()));
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let config = SwarmConfig::default().with_count(500).with_seed(11);
        let mut parallel = Swarm::with_config(config.clone()).unwrap();
        let mut sequential = Swarm::with_config(config).unwrap();
        let params = SimulationParameters::default();

        for frame in 0..200 {
            // Sweep through the swarm, hovering on every other 20-frame block
            let angle = frame as f32 * 0.05;
            let source = Vec3::new(angle.cos() * 2.0, 0.5, angle.sin() * 2.0);
            let hovering = (frame / 20) % 2 == 0;

            let a = parallel
                .advance(source, hovering, &params, ParticleStep::run_parallel)
                .clone();
            let b = sequential.advance(source, hovering, &params, ParticleStep::run_sequential);

            assert_eq!(&a, b, "frame {frame}");
        }
        assert_eq!(parallel.particles(), sequential.particles());
        assert_eq!(parallel.repelled_count(), sequential.repelled_count());
    }
}
