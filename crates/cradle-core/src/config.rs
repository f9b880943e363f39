//! Solver configuration.
//!
//! Knobs for the contact resolver and the particle-particle collision
//! coefficient. Scene-shaped parameters (bob layout, gravity) live in
//! [`crate::scene::SceneConfig`].

use serde::{Deserialize, Serialize};

/// Largest time step the engine is tuned for, in seconds.
///
/// Callers are expected to clamp frame deltas to `[0, MAX_STEP]` before
/// passing them to [`crate::session::Simulation::step`]. Larger values are
/// not rejected but degrade accuracy.
pub const MAX_STEP: f32 = 0.02;

/// Configuration for the simulation step and contact resolver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Restitution coefficient for particle-particle collisions, in [0, 1].
    /// 1.0 is fully elastic (bobs exchange velocity cleanly).
    pub restitution: f32,

    /// Resolver iteration budget per contact. The resolver runs at most
    /// `iterations_per_contact * contact_count` passes each step.
    pub iterations_per_contact: u32,

    /// Penetration below this is considered resolved; the resolver stops
    /// early once no contact exceeds it.
    pub penetration_epsilon: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            restitution: 1.0,
            iterations_per_contact: 2,
            penetration_epsilon: 1.0e-5,
        }
    }
}

impl SimConfig {
    /// Validate the configuration. Called by the session at construction.
    pub fn validate(&self) -> crate::error::SimResult<()> {
        if !(0.0..=1.0).contains(&self.restitution) || !self.restitution.is_finite() {
            return Err(crate::error::SimError::InvalidRestitution(self.restitution));
        }
        Ok(())
    }
}
