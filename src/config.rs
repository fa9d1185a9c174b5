//! Scene configuration loaded from YAML.
//!
//! Every section and field is optional; anything left out falls back to the
//! built-in defaults. Example:
//!
//! ```yaml
//! swarm:
//!   count: 2000
//!   seed: 42
//!   spin_per_tick: 0.002
//!   shape:
//!     turns: 4.0
//!     max_radius: 2.0
//!
//! parameters:
//!   explosion_force: 1.5
//!   return_speed: 0.08
//!   particle_size: 0.15
//!   core_color: "#FFD700"
//!   edge_color: "#004D33"
//!
//! driver:
//!   frames: 600
//!   orbit_radius: 3.0
//!   hover_period: 180
//!   hover_duration: 60
//!   panel:
//!     - frame: 300
//!       explosion_force: 4.0
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use glam::Vec3;
use serde::Deserialize;
use swarm_physics::{
    ForceModel, SpiralShape, DAMPING, DEFAULT_PARTICLE_COUNT, INTERACTION_RADIUS,
    ROOT_SPIN_PER_TICK, SPAWN_EXTENT, TRIGGER_RADIUS,
};
use swarm_simulation::{SimulationParameters, SwarmConfig, DEFAULT_ORNAMENT_COUNT};

/// Top-level scene file
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct SceneConfig {
    pub swarm: SwarmSection,
    pub parameters: SimulationParameters,
    pub driver: DriverSection,
}

/// Construction-time swarm settings
#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct SwarmSection {
    pub count: usize,
    pub seed: Option<u64>,
    pub shape: SpiralShape,
    pub damping: f32,
    pub spin_per_tick: f32,
    pub spawn_extent: f32,
    pub interaction_radius: f32,
    pub trigger_radius: f32,
    pub reference_point: [f32; 3],
    pub ornaments: usize,
}

impl Default for SwarmSection {
    fn default() -> Self {
        Self {
            count: DEFAULT_PARTICLE_COUNT,
            seed: None,
            shape: SpiralShape::default(),
            damping: DAMPING,
            spin_per_tick: ROOT_SPIN_PER_TICK,
            spawn_extent: SPAWN_EXTENT,
            interaction_radius: INTERACTION_RADIUS,
            trigger_radius: TRIGGER_RADIUS,
            reference_point: [0.0; 3],
            ornaments: DEFAULT_ORNAMENT_COUNT,
        }
    }
}

impl SwarmSection {
    /// Build the simulation's construction options, rejecting settings the
    /// integrator cannot run with
    pub fn to_swarm_config(&self) -> Result<SwarmConfig> {
        let mut config = SwarmConfig::default()
            .with_count(self.count)
            .with_shape(self.shape)
            .with_damping(self.damping)
            .with_spin(self.spin_per_tick)
            .with_spawn_extent(self.spawn_extent)
            .with_force_model(ForceModel {
                interaction_radius: self.interaction_radius,
                trigger_radius: self.trigger_radius,
                reference_point: Vec3::from_array(self.reference_point),
            });
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        config.validate().context("invalid swarm section")?;
        Ok(config)
    }
}

/// Headless frame driver: how long to run and how the fake pointer moves
#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct DriverSection {
    pub frames: usize,
    /// Only forwarded to `tick`; the simulation steps once per frame regardless
    pub frame_rate: f32,
    pub orbit_radius: f32,
    /// Radians per frame
    pub orbit_speed: f32,
    pub orbit_height: f32,
    /// Hover toggles on for `hover_duration` frames out of every `hover_period`
    pub hover_period: usize,
    pub hover_duration: usize,
    /// Log a status line every this many frames
    pub report_every: usize,
    /// Scripted parameter changes, standing in for a settings panel
    pub panel: Vec<PanelChange>,
}

impl Default for DriverSection {
    fn default() -> Self {
        Self {
            frames: 600,
            frame_rate: 60.0,
            orbit_radius: 3.0,
            orbit_speed: 0.02,
            orbit_height: 0.5,
            hover_period: 180,
            hover_duration: 60,
            report_every: 60,
            panel: Vec::new(),
        }
    }
}

/// A settings-panel edit applied at the start of `frame`
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct PanelChange {
    pub frame: usize,
    pub explosion_force: Option<f32>,
    pub return_speed: Option<f32>,
    pub particle_size: Option<f32>,
}

impl PanelChange {
    pub fn apply(&self, params: &mut SimulationParameters) {
        if let Some(v) = self.explosion_force {
            params.explosion_force = v;
        }
        if let Some(v) = self.return_speed {
            params.return_speed = v;
        }
        if let Some(v) = self.particle_size {
            params.particle_size = v;
        }
    }
}

impl SceneConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read scene config {}", path.display()))?;
        Self::from_yaml(&text)
            .with_context(|| format!("failed to load scene config {}", path.display()))
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        serde_yaml::from_str(text).context("failed to parse scene config")
    }
}
