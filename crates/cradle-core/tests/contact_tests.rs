use glam::Vec3;

use cradle_core::{
    Contact, ContactGenerator, ContactRegistry, Particle, ParticleParticleContactGenerator,
    SimConfig,
};

fn registry() -> ContactRegistry {
    let config = SimConfig::default();
    ContactRegistry::new(config.iterations_per_contact, config.penetration_epsilon)
}

fn bob(x: f32, radius: f32) -> Particle {
    Particle::new(Vec3::new(x, 0.0, 0.0), 1.0, radius, 1.0).unwrap()
}

#[test]
fn test_detects_overlapping_pair() {
    let particles = vec![bob(0.0, 0.5), bob(0.8, 0.5)];
    let generator = ParticleParticleContactGenerator::default();

    let mut contacts = registry();
    generator.generate(&particles, &mut contacts);

    assert_eq!(contacts.len(), 1, "should detect one contact");
    let contact = &contacts.contacts()[0];
    assert!(
        (contact.penetration - 0.2).abs() < 1e-5,
        "penetration ~0.2, got {}",
        contact.penetration
    );
    assert!((contact.normal - Vec3::X).length() < 1e-6);
}

#[test]
fn test_no_contact_when_apart_or_touching() {
    let generator = ParticleParticleContactGenerator::default();

    let particles = vec![bob(0.0, 0.5), bob(2.0, 0.5)];
    let mut contacts = registry();
    generator.generate(&particles, &mut contacts);
    assert!(contacts.is_empty(), "separated bobs should not collide");

    // Exactly touching is not overlap.
    let particles = vec![bob(0.0, 0.5), bob(1.0, 0.5)];
    let mut contacts = registry();
    generator.generate(&particles, &mut contacts);
    assert!(contacts.is_empty(), "touching bobs should not collide");
}

#[test]
fn test_coincident_particles_get_fallback_normal() {
    let particles = vec![bob(0.0, 0.5), bob(0.0, 0.5)];
    let generator = ParticleParticleContactGenerator::default();

    let mut contacts = registry();
    generator.generate(&particles, &mut contacts);

    assert_eq!(contacts.len(), 1);
    let contact = &contacts.contacts()[0];
    assert!(contact.normal.is_finite(), "normal must never be NaN");
    assert_eq!(contact.normal, Vec3::X);
    assert!((contact.penetration - 1.0).abs() < 1e-6);
}

#[test]
fn test_resolution_separates_overlapping_pair() {
    let mut particles = vec![bob(0.0, 0.5), bob(0.8, 0.5)];
    let generator = ParticleParticleContactGenerator::default();

    let mut contacts = registry();
    generator.generate(&particles, &mut contacts);
    contacts.resolve(&mut particles, 1.0 / 60.0);

    let dist = (particles[1].position - particles[0].position).length();
    assert!(
        dist >= 1.0 - 1e-4,
        "post-resolution distance {} should be at least the radii sum",
        dist
    );
    // Equal masses split the correction symmetrically.
    assert!((particles[0].position.x + 0.1).abs() < 1e-5);
    assert!((particles[1].position.x - 0.9).abs() < 1e-5);
}

#[test]
fn test_elastic_head_on_collision_swaps_velocities() {
    let mut particles = vec![bob(0.0, 0.5), bob(0.9, 0.5)];
    particles[0].velocity = Vec3::new(1.0, 0.0, 0.0);
    particles[1].velocity = Vec3::new(-1.0, 0.0, 0.0);

    let generator = ParticleParticleContactGenerator::new(1.0).unwrap();
    let mut contacts = registry();
    generator.generate(&particles, &mut contacts);
    contacts.resolve(&mut particles, 1.0 / 60.0);

    assert!(
        (particles[0].velocity - Vec3::new(-1.0, 0.0, 0.0)).length() < 1e-5,
        "bob 0 should bounce back, got {:?}",
        particles[0].velocity
    );
    assert!(
        (particles[1].velocity - Vec3::new(1.0, 0.0, 0.0)).length() < 1e-5,
        "bob 1 should bounce back, got {:?}",
        particles[1].velocity
    );
}

#[test]
fn test_inelastic_collision_kills_closing_velocity() {
    let mut particles = vec![bob(0.0, 0.5), bob(0.9, 0.5)];
    particles[0].velocity = Vec3::new(2.0, 0.0, 0.0);

    let generator = ParticleParticleContactGenerator::new(0.0).unwrap();
    let mut contacts = registry();
    generator.generate(&particles, &mut contacts);
    contacts.resolve(&mut particles, 1.0 / 60.0);

    let closing = (particles[0].velocity - particles[1].velocity).dot(Vec3::X);
    assert!(
        closing.abs() < 1e-5,
        "restitution 0 should leave no closing velocity, got {}",
        closing
    );
}

#[test]
fn test_fixed_participant_absorbs_the_whole_correction() {
    let mut particles = vec![bob(0.0, 0.5), Particle::fixed(Vec3::new(0.8, 0.0, 0.0), 0.5)];
    particles[0].velocity = Vec3::new(1.0, 0.0, 0.0);

    let generator = ParticleParticleContactGenerator::default();
    let mut contacts = registry();
    generator.generate(&particles, &mut contacts);
    contacts.resolve(&mut particles, 1.0 / 60.0);

    assert_eq!(
        particles[1].position,
        Vec3::new(0.8, 0.0, 0.0),
        "fixed particle must not move"
    );
    assert_eq!(particles[1].velocity, Vec3::ZERO);
    // The movable bob takes the full displacement.
    assert!((particles[0].position.x + 0.2).abs() < 1e-5);
    // And rebounds off the immovable one.
    assert!(particles[0].velocity.x < 0.0);
}

#[test]
fn test_worst_first_resolution_settles_a_chain() {
    // Three bobs in a row, middle one overlapping both neighbors, the right
    // overlap deeper. Greedy worst-first must still separate everything.
    let mut particles = vec![bob(0.0, 0.5), bob(0.9, 0.5), bob(1.6, 0.5)];
    let generator = ParticleParticleContactGenerator::default();

    // Chained corrections ping-pong between neighbors; give the resolver a
    // deeper budget than the default two passes per contact.
    let mut contacts = ContactRegistry::new(8, 1e-5);
    generator.generate(&particles, &mut contacts);
    assert_eq!(contacts.len(), 2);
    contacts.resolve(&mut particles, 1.0 / 60.0);

    for (i, j) in [(0, 1), (1, 2)] {
        let dist = (particles[j].position - particles[i].position).length();
        assert!(
            dist >= 1.0 - 1e-3,
            "pair ({}, {}) still penetrating: distance {}",
            i,
            j,
            dist
        );
    }
}

#[test]
fn test_resolve_on_empty_registry_is_a_no_op() {
    let mut particles = vec![bob(0.0, 0.5)];
    let mut contacts = registry();
    contacts.resolve(&mut particles, 1.0 / 60.0);
    assert_eq!(particles[0].position, Vec3::ZERO);
}

#[test]
fn test_both_sides_fixed_is_accepted_without_motion() {
    // Unresolvable by construction; the resolver burns budget and gives up
    // without erroring or moving anything.
    let mut particles = vec![
        Particle::fixed(Vec3::ZERO, 0.5),
        Particle::fixed(Vec3::new(0.5, 0.0, 0.0), 0.5),
    ];
    let mut contacts = registry();
    contacts.push(Contact {
        a: 0,
        b: Some(1),
        normal: Vec3::X,
        penetration: 0.5,
        restitution: 1.0,
    });

    contacts.resolve(&mut particles, 1.0 / 60.0);

    assert_eq!(particles[0].position, Vec3::ZERO);
    assert_eq!(particles[1].position, Vec3::new(0.5, 0.0, 0.0));
}
