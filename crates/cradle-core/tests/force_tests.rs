use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec3;

use cradle_core::{ForceGenerator, ForceGeneratorRegistry, GravityForceGenerator, Particle};

fn bob_at(x: f32) -> Particle {
    Particle::new(Vec3::new(x, 0.0, 0.0), 2.0, 0.5, 1.0).unwrap()
}

#[test]
fn test_gravity_through_registry() {
    let mut particles = vec![bob_at(0.0)];
    let mut forces = ForceGeneratorRegistry::new();
    let gravity = forces.insert(Box::new(GravityForceGenerator::new(Vec3::new(
        0.0, -10.0, 0.0,
    ))));
    forces.add(0, gravity);

    forces.apply_forces(&mut particles, 0.016);

    // force = acceleration * mass
    assert_eq!(particles[0].accumulated_force(), Vec3::new(0.0, -20.0, 0.0));
}

#[test]
fn test_duplicate_registration_applies_twice() {
    let mut particles = vec![bob_at(0.0)];
    let mut forces = ForceGeneratorRegistry::new();
    let gravity = forces.insert(Box::new(GravityForceGenerator::new(Vec3::new(
        0.0, -10.0, 0.0,
    ))));
    forces.add(0, gravity);
    forces.add(0, gravity);

    forces.apply_forces(&mut particles, 0.016);

    assert_eq!(particles[0].accumulated_force(), Vec3::new(0.0, -40.0, 0.0));
}

#[test]
fn test_clear_drops_pairings() {
    let mut particles = vec![bob_at(0.0)];
    let mut forces = ForceGeneratorRegistry::new();
    let gravity = forces.insert(Box::new(GravityForceGenerator::new(Vec3::new(
        0.0, -10.0, 0.0,
    ))));
    forces.add(0, gravity);
    forces.clear();
    assert!(forces.is_empty());

    forces.apply_forces(&mut particles, 0.016);
    assert_eq!(particles[0].accumulated_force(), Vec3::ZERO);

    // The generator survives a clear; re-pairing works without re-inserting.
    forces.add(0, gravity);
    forces.apply_forces(&mut particles, 0.016);
    assert_eq!(particles[0].accumulated_force(), Vec3::new(0.0, -20.0, 0.0));
}

/// Logs the x coordinate of every particle it is applied to.
struct Recorder {
    log: Rc<RefCell<Vec<f32>>>,
}

impl ForceGenerator for Recorder {
    fn apply(&self, particle: &mut Particle, _dt: f32) {
        self.log.borrow_mut().push(particle.position.x);
    }
}

#[test]
fn test_pairings_run_once_in_registration_order() {
    let mut particles = vec![bob_at(0.0), bob_at(1.0), bob_at(2.0)];
    let log = Rc::new(RefCell::new(Vec::new()));

    let mut forces = ForceGeneratorRegistry::new();
    let recorder = forces.insert(Box::new(Recorder { log: Rc::clone(&log) }));
    // Deliberately not in index order.
    forces.add(2, recorder);
    forces.add(0, recorder);
    forces.add(1, recorder);

    forces.apply_forces(&mut particles, 0.016);

    assert_eq!(
        *log.borrow(),
        vec![2.0, 0.0, 1.0],
        "pairings must be visited exactly once, in registration order"
    );
}
