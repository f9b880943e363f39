//! Point-mass particles and the semi-implicit integration step.

use glam::Vec3;

use crate::error::{SimError, SimResult};

/// A point mass. No orientation, no angular state.
///
/// `inverse_mass` and `damping` are validated at construction and fixed for
/// the particle's lifetime. Position and velocity are updated exactly once
/// per step, by [`Particle::integrate`] and then possibly by the contact
/// resolver.
#[derive(Debug, Clone)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Collision radius; also what a renderer draws.
    pub radius: f32,
    /// Force accumulated since the last integration step.
    force: Vec3,
    /// Acceleration applied by the most recent `integrate` call. The
    /// resolver reads this to discount gravity-induced closing velocity in
    /// resting contacts.
    acceleration: Vec3,
    inverse_mass: f32,
    damping: f32,
}

impl Particle {
    /// Create a movable particle.
    ///
    /// `mass` and `radius` must be positive and finite; `damping` must lie
    /// in (0, 1] (1.0 = no drag).
    pub fn new(position: Vec3, mass: f32, radius: f32, damping: f32) -> SimResult<Self> {
        if !(mass.is_finite() && mass > 0.0) {
            return Err(SimError::InvalidMass(mass));
        }
        if !(radius.is_finite() && radius > 0.0) {
            return Err(SimError::InvalidRadius(radius));
        }
        if !(damping.is_finite() && damping > 0.0 && damping <= 1.0) {
            return Err(SimError::InvalidDamping(damping));
        }
        Ok(Self {
            position,
            velocity: Vec3::ZERO,
            radius,
            force: Vec3::ZERO,
            acceleration: Vec3::ZERO,
            inverse_mass: 1.0 / mass,
            damping,
        })
    }

    /// Create an immovable particle (infinite mass). Never integrated and
    /// never displaced by the resolver.
    pub fn fixed(position: Vec3, radius: f32) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            radius,
            force: Vec3::ZERO,
            acceleration: Vec3::ZERO,
            inverse_mass: 0.0,
            damping: 1.0,
        }
    }

    /// Accumulate a force for the next integration step.
    pub fn add_force(&mut self, force: Vec3) {
        self.force += force;
    }

    /// Advance this particle by `dt` seconds.
    ///
    /// Velocity picks up `force * inverse_mass * dt`, is scaled by
    /// `damping^dt` (frame-rate independent drag), and then advances the
    /// position. The force accumulator is cleared afterward, also when
    /// `dt == 0`.
    ///
    /// Calling this on a fixed particle is a logged no-op.
    pub fn integrate(&mut self, dt: f32) {
        if self.inverse_mass <= 0.0 {
            tracing::warn!("integrate called on a fixed particle");
            return;
        }

        self.acceleration = self.force * self.inverse_mass;
        self.velocity += self.acceleration * dt;
        self.velocity *= self.damping.powf(dt);
        self.position += self.velocity * dt;
        self.force = Vec3::ZERO;
    }

    pub fn inverse_mass(&self) -> f32 {
        self.inverse_mass
    }

    pub fn damping(&self) -> f32 {
        self.damping
    }

    pub fn is_fixed(&self) -> bool {
        self.inverse_mass <= 0.0
    }

    /// Force accumulated so far this step.
    pub fn accumulated_force(&self) -> Vec3 {
        self.force
    }

    /// Acceleration applied by the most recent integration step.
    pub fn acceleration(&self) -> Vec3 {
        self.acceleration
    }
}
