//! Errors surfaced when building a swarm

/// Errors that can occur while creating a swarm
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SwarmError {
    /// A negative particle count was requested
    #[error("invalid swarm size {0}: particle count must not be negative")]
    InvalidSwarmSize(i64),

    /// A construction setting is outside the range the integrator tolerates
    #[error("invalid swarm setting {name} = {value}: expected {expected}")]
    InvalidSetting {
        name: &'static str,
        value: f32,
        expected: &'static str,
    },
}
