//! Error types for the engine.
//!
//! All validation happens at construction boundaries (particles, constraints,
//! scenes). The per-step path is infallible by design.

use thiserror::Error;

/// Errors raised while constructing particles, constraints, or scenes.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    /// Mass must be positive and finite.
    #[error("mass must be positive and finite, got {0}")]
    InvalidMass(f32),

    /// Radius must be positive and finite.
    #[error("radius must be positive and finite, got {0}")]
    InvalidRadius(f32),

    /// Damping must lie in (0, 1].
    #[error("damping must be in (0, 1], got {0}")]
    InvalidDamping(f32),

    /// Rest length of an anchored constraint must be positive and finite.
    #[error("rest length must be positive and finite, got {0}")]
    InvalidRestLength(f32),

    /// Restitution must lie in [0, 1].
    #[error("restitution must be in [0, 1], got {0}")]
    InvalidRestitution(f32),

    /// A scene parameter combination is invalid.
    #[error("invalid scene: {0}")]
    InvalidScene(String),

    /// Particle index is out of bounds for the arena it refers to.
    #[error("particle index {index} out of bounds (count: {count})")]
    ParticleOutOfBounds { index: usize, count: usize },
}

/// Convenience alias for fallible construction.
pub type SimResult<T> = Result<T, SimError>;
