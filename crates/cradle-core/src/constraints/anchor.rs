//! Anchored distance constraint.

use glam::Vec3;

use crate::contacts::{Contact, ContactGenerator, ContactRegistry};
use crate::error::{SimError, SimResult};
use crate::particle::Particle;

/// Deviations from the rest length below this emit no contact. Keeps a
/// settled bob from generating corrective chatter every frame.
pub const REST_TOLERANCE: f32 = 1.0e-4;

/// Ties one particle to a fixed world point at a fixed rest length.
///
/// The tether is rigid and inelastic: each step the constraint measures the
/// particle's distance to the anchor and, if it deviates from the rest
/// length beyond [`REST_TOLERANCE`], emits exactly one zero-restitution
/// contact whose resolution restores the length. A stretched tether pulls
/// the particle back in; a compressed one pushes it out. This is how an
/// equality constraint rides the contact resolver instead of needing a
/// solver of its own.
#[derive(Debug, Clone)]
pub struct EqualityAnchoredConstraint {
    particle: u32,
    anchor: Vec3,
    rest_length: f32,
}

impl EqualityAnchoredConstraint {
    pub fn new(particle: u32, anchor: Vec3, rest_length: f32) -> SimResult<Self> {
        if !(rest_length.is_finite() && rest_length > 0.0) {
            return Err(SimError::InvalidRestLength(rest_length));
        }
        Ok(Self {
            particle,
            anchor,
            rest_length,
        })
    }

    pub fn particle(&self) -> u32 {
        self.particle
    }

    pub fn anchor(&self) -> Vec3 {
        self.anchor
    }

    pub fn rest_length(&self) -> f32 {
        self.rest_length
    }

    /// Current distance from the particle to the anchor.
    pub fn current_length(&self, particles: &[Particle]) -> f32 {
        (self.anchor - particles[self.particle as usize].position).length()
    }
}

impl ContactGenerator for EqualityAnchoredConstraint {
    fn generate(&self, particles: &[Particle], contacts: &mut ContactRegistry) {
        let position = particles[self.particle as usize].position;
        let to_anchor = self.anchor - position;
        let dist = to_anchor.length();

        let deviation = dist - self.rest_length;
        if deviation.abs() <= REST_TOLERANCE {
            return; // satisfied
        }

        // A bob sitting on its own anchor has no defined axis; pick one.
        let toward = if dist > 1.0e-6 {
            to_anchor / dist
        } else {
            Vec3::X
        };

        // Penetration is always the positive deviation; the normal flips so
        // that displacing the particle along -normal restores the length.
        let (normal, penetration) = if deviation > 0.0 {
            (-toward, deviation) // stretched: pull back toward the anchor
        } else {
            (toward, -deviation) // compressed: push away from the anchor
        };

        contacts.push(Contact {
            a: self.particle,
            b: None,
            normal,
            penetration,
            restitution: 0.0,
        });
    }
}
