//! Contacts and the iterative contact resolver.
//!
//! A [`Contact`] is a point of interaction that needs velocity and position
//! correction: two overlapping bobs, or a bob violating its anchor tether.
//! Generators append contacts to the [`ContactRegistry`] each step; the
//! resolver consumes them in a single greedy worst-first pass.

pub mod particle_particle;

pub use particle_particle::ParticleParticleContactGenerator;

use glam::Vec3;

use crate::particle::Particle;

/// Anything that inspects particle state and emits contacts.
pub trait ContactGenerator {
    fn generate(&self, particles: &[Particle], contacts: &mut ContactRegistry);
}

/// One interaction between particle `a` and either particle `b` or a fixed
/// world anchor (`b == None`).
///
/// `normal` is a unit vector pointing from `a` toward `b`. A positive
/// `penetration` means the pair must be corrected by that distance along
/// the normal: `a` is displaced along `-normal`, `b` along `+normal`, each
/// in proportion to its inverse mass. An anchor participant has zero
/// inverse mass and zero velocity and absorbs nothing.
#[derive(Debug, Clone)]
pub struct Contact {
    pub a: u32,
    pub b: Option<u32>,
    pub normal: Vec3,
    pub penetration: f32,
    pub restitution: f32,
}

/// Ordered contact list for the current step, plus the resolver.
///
/// Lifecycle per step: [`clear`](ContactRegistry::clear) before any
/// generator runs, generators [`push`](ContactRegistry::push) contacts,
/// then [`resolve`](ContactRegistry::resolve) consumes the list. Contacts
/// never survive a step.
pub struct ContactRegistry {
    contacts: Vec<Contact>,
    iterations_per_contact: u32,
    penetration_epsilon: f32,
}

impl ContactRegistry {
    pub fn new(iterations_per_contact: u32, penetration_epsilon: f32) -> Self {
        Self {
            contacts: Vec::new(),
            iterations_per_contact,
            penetration_epsilon,
        }
    }

    /// Drop all contacts from the previous step.
    pub fn clear(&mut self) {
        self.contacts.clear();
    }

    pub fn push(&mut self, contact: Contact) {
        self.contacts.push(contact);
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    /// Resolve all current contacts against `particles`.
    ///
    /// Greedy worst-first: each iteration selects the contact with the
    /// largest penetration (ties keep the earliest-generated contact, which
    /// makes settling deterministic), corrects its closing velocity and
    /// interpenetration, then recomputes the stored penetration of every
    /// contact sharing a participant with it, since moving one bob changes
    /// its neighbors' depths. The budget is `iterations_per_contact *
    /// contact_count`; running out without convergence is expected with
    /// stacked constraints and is accepted as approximation.
    pub fn resolve(&mut self, particles: &mut [Particle], dt: f32) {
        if self.contacts.is_empty() {
            return;
        }

        let budget = self.contacts.len() * self.iterations_per_contact as usize;
        for _ in 0..budget {
            // Worst offender: max penetration, strict `>` keeps the first.
            let mut worst: Option<usize> = None;
            let mut deepest = self.penetration_epsilon;
            for (i, contact) in self.contacts.iter().enumerate() {
                if contact.penetration > deepest {
                    deepest = contact.penetration;
                    worst = Some(i);
                }
            }
            let Some(worst) = worst else {
                return; // converged
            };

            let contact = self.contacts[worst].clone();
            resolve_velocity(&contact, particles, dt);
            let (moved_a, moved_b) = resolve_interpenetration(&contact, particles);

            // Propagate the displacement into neighboring penetrations
            // (including the resolved contact itself, which lands on ~0).
            for other in &mut self.contacts {
                if other.a == contact.a {
                    other.penetration += moved_a.dot(other.normal);
                }
                if other.b == Some(contact.a) {
                    other.penetration -= moved_a.dot(other.normal);
                }
                if let Some(b) = contact.b {
                    if other.a == b {
                        other.penetration += moved_b.dot(other.normal);
                    }
                    if other.b == Some(b) {
                        other.penetration -= moved_b.dot(other.normal);
                    }
                }
            }
        }

        let residual = self
            .contacts
            .iter()
            .map(|c| c.penetration)
            .fold(0.0_f32, f32::max);
        if residual > self.penetration_epsilon {
            tracing::trace!(
                contacts = self.contacts.len(),
                budget,
                residual,
                "contact resolution budget exhausted"
            );
        }
    }
}

/// Inverse mass, velocity, and last-step acceleration of a contact side.
/// The anchor side is immovable and inertialess.
fn side_state(particles: &[Particle], side: Option<u32>) -> (f32, Vec3, Vec3) {
    match side {
        Some(i) => {
            let p = &particles[i as usize];
            (p.inverse_mass(), p.velocity, p.acceleration())
        }
        None => (0.0, Vec3::ZERO, Vec3::ZERO),
    }
}

/// Adjust velocities along the normal so the post-resolution closing
/// velocity is `-restitution * closing`.
///
/// Closing velocity built up by one frame of acceleration (a bob resting
/// against a taut tether under gravity) is discounted from the rebound, so
/// resting stacks do not gain energy from micro-collisions.
fn resolve_velocity(contact: &Contact, particles: &mut [Particle], dt: f32) {
    let (w_a, v_a, acc_a) = side_state(particles, Some(contact.a));
    let (w_b, v_b, acc_b) = side_state(particles, contact.b);

    let total_w = w_a + w_b;
    if total_w <= 0.0 {
        return; // both immovable
    }

    // Positive = approaching along the normal.
    let closing = (v_a - v_b).dot(contact.normal);
    if closing <= 0.0 {
        return; // separating or resting
    }

    let mut target = -contact.restitution * closing;
    let acc_closing = (acc_a - acc_b).dot(contact.normal) * dt;
    if acc_closing > 0.0 {
        target += contact.restitution * acc_closing;
        if target > 0.0 {
            target = 0.0;
        }
    }

    let impulse = (target - closing) / total_w;
    particles[contact.a as usize].velocity += contact.normal * impulse * w_a;
    if let Some(b) = contact.b {
        particles[b as usize].velocity -= contact.normal * impulse * w_b;
    }
}

/// Displace the participants out of penetration, split by inverse mass.
/// Returns the displacement applied to each side so the caller can update
/// neighboring contacts.
fn resolve_interpenetration(contact: &Contact, particles: &mut [Particle]) -> (Vec3, Vec3) {
    if contact.penetration <= 0.0 {
        return (Vec3::ZERO, Vec3::ZERO);
    }

    let (w_a, _, _) = side_state(particles, Some(contact.a));
    let (w_b, _, _) = side_state(particles, contact.b);
    let total_w = w_a + w_b;
    if total_w <= 0.0 {
        return (Vec3::ZERO, Vec3::ZERO);
    }

    let move_per_w = contact.normal * (contact.penetration / total_w);
    let moved_a = -move_per_w * w_a;
    let moved_b = move_per_w * w_b;

    particles[contact.a as usize].position += moved_a;
    if let Some(b) = contact.b {
        particles[b as usize].position += moved_b;
    }

    (moved_a, moved_b)
}
