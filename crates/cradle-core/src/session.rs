//! The simulation session: owns all mutable state and drives one step.

use crate::config::SimConfig;
use crate::constraints::EqualityAnchoredConstraint;
use crate::contacts::{ContactGenerator, ContactRegistry, ParticleParticleContactGenerator};
use crate::error::SimResult;
use crate::forces::{ForceGeneratorRegistry, GravityForceGenerator};
use crate::particle::Particle;
use crate::scene::SceneConfig;

/// A running pendulum-row simulation.
///
/// All engine state lives here: the particle arena, the force registry, the
/// anchored constraints, the pair-collision generator, and the per-step
/// contact registry. Every other component refers to particles by index
/// into this session's arena, so nothing can dangle across a reset.
///
/// The session is single-threaded and synchronous; a step runs to
/// completion before the next begins. There is no cancellation below the
/// caller simply not invoking [`step`](Simulation::step).
pub struct Simulation {
    config: SimConfig,
    particles: Vec<Particle>,
    forces: ForceGeneratorRegistry,
    constraints: Vec<EqualityAnchoredConstraint>,
    collisions: ParticleParticleContactGenerator,
    contacts: ContactRegistry,
    running: bool,
    elapsed: f32,
}

impl Simulation {
    /// Build a session and construct its initial scene.
    pub fn new(config: SimConfig, scene: &SceneConfig) -> SimResult<Self> {
        config.validate()?;
        let mut sim = Self {
            collisions: ParticleParticleContactGenerator::new(config.restitution)?,
            contacts: ContactRegistry::new(
                config.iterations_per_contact,
                config.penetration_epsilon,
            ),
            config,
            particles: Vec::new(),
            forces: ForceGeneratorRegistry::new(),
            constraints: Vec::new(),
            running: true,
            elapsed: 0.0,
        };
        sim.reset(scene)?;
        Ok(sim)
    }

    /// Tear down and rebuild the scene as a unit, zeroing the clock.
    ///
    /// Construction is deterministic: resetting twice with equal configs
    /// yields bit-identical initial particle state.
    pub fn reset(&mut self, scene: &SceneConfig) -> SimResult<()> {
        scene.validate()?;

        self.elapsed = 0.0;
        self.particles.clear();
        self.constraints.clear();
        self.contacts.clear();
        self.forces = ForceGeneratorRegistry::new();

        let gravity = self
            .forces
            .insert(Box::new(GravityForceGenerator::new(scene.gravity)));

        for i in 0..scene.bob_count {
            let bob = Particle::new(
                scene.bob_position(i),
                scene.bob_radius, // mass tracks the radius
                scene.bob_radius,
                scene.damping,
            )?;
            self.particles.push(bob);
            self.forces.add(i, gravity);
            self.constraints.push(EqualityAnchoredConstraint::new(
                i,
                scene.anchor_position(i),
                scene.rest_length,
            )?);
        }

        tracing::debug!(bobs = scene.bob_count, "scene reset");
        Ok(())
    }

    /// Advance the simulation by `dt` seconds.
    ///
    /// The caller is expected to clamp `dt` to `[0, MAX_STEP]`
    /// ([`crate::config::MAX_STEP`]); out-of-range values are not validated
    /// and give degraded but non-crashing behavior. A paused session
    /// returns immediately.
    ///
    /// Fixed order, once per frame: clear contacts, apply forces, generate
    /// contacts (constraints first, then pair collisions), integrate,
    /// resolve. With `dt == 0` generation is skipped, so the step clears
    /// the contact registry and the force accumulators but moves nothing.
    pub fn step(&mut self, dt: f32) {
        if !self.running {
            return;
        }
        self.elapsed += dt;

        self.contacts.clear();
        self.forces.apply_forces(&mut self.particles, dt);

        if dt > 0.0 {
            for constraint in &self.constraints {
                constraint.generate(&self.particles, &mut self.contacts);
            }
            self.collisions.generate(&self.particles, &mut self.contacts);
        }

        for particle in &mut self.particles {
            if !particle.is_fixed() {
                particle.integrate(dt);
            }
        }

        self.contacts.resolve(&mut self.particles, dt);
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Mutable particle access, for harness-side perturbation.
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn constraints(&self) -> &[EqualityAnchoredConstraint] {
        &self.constraints
    }

    /// Contacts left registered by the most recent step.
    pub fn contact_count(&self) -> usize {
        self.contacts.len()
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Simulated time accumulated since the last reset.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Pause or resume. A paused session ignores `step` entirely.
    pub fn set_running(&mut self, running: bool) {
        self.running = running;
    }
}
