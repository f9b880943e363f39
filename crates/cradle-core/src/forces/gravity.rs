//! Uniform gravity.

use glam::Vec3;

use crate::forces::ForceGenerator;
use crate::particle::Particle;

/// Applies a constant gravitational acceleration to registered particles.
///
/// The generator adds `acceleration * mass` as a force, so after
/// integration multiplies by the inverse mass the net effect on velocity is
/// the acceleration itself, independent of the particle's mass.
pub struct GravityForceGenerator {
    acceleration: Vec3,
}

impl GravityForceGenerator {
    pub fn new(acceleration: Vec3) -> Self {
        Self { acceleration }
    }

    pub fn acceleration(&self) -> Vec3 {
        self.acceleration
    }
}

impl ForceGenerator for GravityForceGenerator {
    fn apply(&self, particle: &mut Particle, _dt: f32) {
        // Immovable particles take no gravity; 1/inverse_mass would blow up.
        if particle.is_fixed() {
            return;
        }
        particle.add_force(self.acceleration / particle.inverse_mass());
    }
}
