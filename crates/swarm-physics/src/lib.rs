//! # Swarm Physics
//!
//! Per-particle math for the shape-forming swarm: the spiral target field,
//! the repel/attract force model, the damped integrator and the derived
//! render attributes. Everything here is pure and operates on one particle at
//! a time.

pub mod attributes;
pub mod color;
pub mod constants;
pub mod forces;
pub mod integrator;
pub mod particle;
pub mod target;

pub use attributes::{AttributeParams, ParticleAttributes};
pub use color::{Color, ParseColorError};
pub use constants::*;
pub use forces::*;
pub use particle::*;
pub use target::SpiralShape;
