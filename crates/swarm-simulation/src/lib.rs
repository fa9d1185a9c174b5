//! # Swarm Simulation Engine
//!
//! CPU frame-stepped swarm that scatters around a pointer and reassembles into
//! a spiral tree. The renderer owns nothing here: it calls [`Swarm::tick`] once
//! per frame and draws the returned [`RenderOutput`].

pub mod error;
pub mod ornaments;
pub mod output;
pub mod params;
pub mod simulation;
pub mod store;

pub use error::SwarmError;
pub use ornaments::{ornaments, Ornament, DEFAULT_ORNAMENT_COUNT};
pub use output::{InstanceRaw, RenderOutput};
pub use params::*;
pub use simulation::*;
pub use store::ParticleStore;
