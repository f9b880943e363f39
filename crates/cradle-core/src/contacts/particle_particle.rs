//! Sphere-sphere proximity contacts.

use glam::Vec3;

use crate::contacts::{Contact, ContactGenerator, ContactRegistry};
use crate::error::{SimError, SimResult};
use crate::particle::Particle;

/// Two particles closer than this (squared) are treated as coincident and
/// get a fallback separation axis instead of a normalized difference.
const COINCIDENT_EPSILON_SQ: f32 = 1.0e-12;

/// Emits a contact for every overlapping unordered pair of particles.
///
/// The particle counts here are small (a row of pendulum bobs), so this is
/// a plain all-pairs scan with an early squared-distance rejection.
pub struct ParticleParticleContactGenerator {
    restitution: f32,
}

impl ParticleParticleContactGenerator {
    /// `restitution` applies to every emitted contact; must be in [0, 1].
    pub fn new(restitution: f32) -> SimResult<Self> {
        if !(restitution.is_finite() && (0.0..=1.0).contains(&restitution)) {
            return Err(SimError::InvalidRestitution(restitution));
        }
        Ok(Self { restitution })
    }

    pub fn restitution(&self) -> f32 {
        self.restitution
    }
}

impl Default for ParticleParticleContactGenerator {
    /// Fully elastic collisions, the cradle behavior.
    fn default() -> Self {
        Self { restitution: 1.0 }
    }
}

impl ContactGenerator for ParticleParticleContactGenerator {
    fn generate(&self, particles: &[Particle], contacts: &mut ContactRegistry) {
        for i in 0..particles.len() {
            for j in (i + 1)..particles.len() {
                let diff = particles[j].position - particles[i].position;
                let min_dist = particles[i].radius + particles[j].radius;
                let dist_sq = diff.length_squared();
                if dist_sq >= min_dist * min_dist {
                    continue;
                }

                let (normal, penetration) = if dist_sq > COINCIDENT_EPSILON_SQ {
                    let dist = dist_sq.sqrt();
                    (diff / dist, min_dist - dist)
                } else {
                    // Near-coincident centers: the direction is undefined,
                    // fall back to a fixed axis so the normal is never NaN.
                    (Vec3::X, min_dist)
                };

                contacts.push(Contact {
                    a: i as u32,
                    b: Some(j as u32),
                    normal,
                    penetration,
                    restitution: self.restitution,
                });
            }
        }
    }
}
