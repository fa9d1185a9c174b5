//! Tuning constants for the swarm
//!
//! Distances are in world units. Forces and velocities are per tick, not per
//! second: one tick is one rendered frame.

/// Default number of particles in a swarm
pub const DEFAULT_PARTICLE_COUNT: usize = 2000;

/// Velocity multiplier applied every tick before the new force is added
pub const DAMPING: f32 = 0.9;

/// Particles closer than this to the perturbation source get pushed away
pub const INTERACTION_RADIUS: f32 = 5.0;

/// The source arms repulsion when it comes this close to the swarm reference point,
/// even without an explicit hover signal
pub const TRIGGER_RADIUS: f32 = 2.5;

/// Half-extent of the cube particles are scattered in at startup
pub const SPAWN_EXTENT: f32 = 5.0;

/// Range of the per-particle intrinsic scale
pub const MIN_INTRINSIC_SCALE: f32 = 0.5;
pub const MAX_INTRINSIC_SCALE: f32 = 1.0;

/// Swarm root rotation about +Y, radians per tick
pub const ROOT_SPIN_PER_TICK: f32 = 0.002;

// Spiral target shape
/// Number of full turns the spiral makes from base to tip
pub const SPIRAL_TURNS: f32 = 4.0;
/// Radius at the base of the spiral (t = 0)
pub const SPIRAL_MAX_RADIUS: f32 = 2.0;
/// Vertical span covered by the spiral
pub const SPIRAL_HEIGHT_RANGE: f32 = 4.0;
/// How far below the origin the base sits
pub const SPIRAL_HEIGHT_OFFSET: f32 = 1.5;

// Attribute derivation
/// Scale boost at full speed (1.0 + this)
pub const SPEED_SCALE_BOOST: f32 = 0.5;
/// Horizontal speed is multiplied by this before it becomes the color blend factor
pub const COLOR_SPEED_GAIN: f32 = 3.0;
