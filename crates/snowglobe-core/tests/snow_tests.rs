// Host-side tests for the bounded snow field.

use snowglobe_core::snow::{expected_band_fraction, in_band, ParticleField};
use snowglobe_core::ConfigError;

const TOL: f32 = 1e-4;

fn assert_enclosed(field: &ParticleField) {
    let r = field.radius();
    for (i, p) in field.iter().enumerate() {
        assert!(
            p.position.length() <= r + TOL,
            "particle {i} outside sphere: {:?}",
            p.position
        );
        assert!(
            p.position.y >= -r * 0.5 - TOL,
            "particle {i} below floor: {:?}",
            p.position
        );
    }
}

#[test]
fn initial_particles_sit_in_band_inside_sphere() {
    let field = ParticleField::new(5_000, 10.0, 1).unwrap();
    assert!(!field.is_empty());
    assert!(field.len() < 5_000);
    for p in field.iter() {
        assert!(p.position.length() < 10.0 + TOL);
        assert!(in_band(p.position.y, 10.0));
    }
}

#[test]
fn enclosure_holds_after_every_update() {
    let mut field = ParticleField::new(2_000, 10.0, 3).unwrap();
    let mut recycled = 0;
    for _ in 0..1_000 {
        recycled += field.update();
        assert_enclosed(&field);
    }
    assert!(recycled > 0, "a thousand steps should recycle something");
}

#[test]
fn small_radius_recycles_constantly_but_stays_enclosed() {
    let mut field = ParticleField::new(2_000, 0.05, 5).unwrap();
    for _ in 0..200 {
        field.update();
        assert_enclosed(&field);
    }
}

#[test]
fn kept_fraction_matches_sampling_geometry() {
    // Uniform direction with linear radius keeps 1/2 + ln2/2 ≈ 84.7% of
    // candidates, well above the band-height/diameter ratio of one half.
    let requested = 10_000;
    let field = ParticleField::new(requested, 10.0, 2024).unwrap();
    let frac = field.len() as f32 / requested as f32;
    let expected = expected_band_fraction();
    assert!((expected - 0.8466).abs() < 1e-3);
    assert!(
        (frac - expected).abs() < 0.02,
        "kept {frac:.4}, expected about {expected:.4}"
    );
    assert!(field.len() < requested);
}

#[test]
fn velocity_is_fixed_for_particle_lifetime() {
    let mut field = ParticleField::new(1_000, 4.0, 9).unwrap();
    let initial = field.velocities().to_vec();
    let mut recycled = 0;
    for _ in 0..2_000 {
        recycled += field.update();
    }
    assert!(recycled > 0);
    assert_eq!(field.velocities(), initial.as_slice());
}

#[test]
fn velocities_span_both_directions() {
    let field = ParticleField::new(5_000, 10.0, 13).unwrap();
    let v = field.velocities();
    assert!(v.iter().all(|v| (-0.025..0.025).contains(v)));
    assert!(v.iter().any(|v| *v > 0.0));
    assert!(v.iter().any(|v| *v < 0.0));
}

#[test]
fn non_recycled_particle_moves_by_its_velocity() {
    let mut field = ParticleField::new(1_000, 10.0, 17).unwrap();
    let before: Vec<_> = field.iter().collect();
    field.update();
    let moved = before
        .iter()
        .zip(field.iter())
        .filter(|(a, b)| (a.position.x - b.position.x).abs() < f32::EPSILON)
        .all(|(a, b)| (a.position.y - a.velocity - b.position.y).abs() < 1e-5);
    assert!(moved);
}

#[test]
fn same_seed_same_field() {
    let a = ParticleField::new(500, 6.0, 99).unwrap();
    let b = ParticleField::new(500, 6.0, 99).unwrap();
    assert_eq!(a.positions(), b.positions());
    assert_eq!(a.velocities(), b.velocities());
}

#[test]
fn invalid_radius_is_rejected() {
    assert_eq!(
        ParticleField::new(10, 0.0, 1).err(),
        Some(ConfigError::InvalidRadius(0.0))
    );
    assert!(ParticleField::new(10, -2.0, 1).is_err());
    assert!(ParticleField::new(10, f32::NAN, 1).is_err());
}

#[test]
fn overlay_colors_leave_motion_alone() {
    let mut field = ParticleField::new(300, 5.0, 21).unwrap();
    assert!(field.take_colors_dirty());
    assert!(!field.colors_dirty());
    assert!(field.colors().iter().all(|c| *c == [1.0, 1.0, 1.0]));
    let positions = field.positions().to_vec();
    let velocities = field.velocities().to_vec();

    field.set_overlay_colors(|i| [i as f32 / 300.0, 0.5, 0.25]);

    assert!(field.colors_dirty());
    assert_eq!(field.colors()[2], [2.0 / 300.0, 0.5, 0.25]);
    assert_eq!(field.positions(), positions.as_slice());
    assert_eq!(field.velocities(), velocities.as_slice());
}

#[test]
fn update_marks_positions_dirty() {
    let mut field = ParticleField::new(100, 5.0, 23).unwrap();
    field.take_positions_dirty();
    assert!(!field.positions_dirty());
    field.update();
    assert!(field.take_positions_dirty());
    assert!(!field.take_positions_dirty());
}

#[test]
fn zero_request_gives_empty_field() {
    let mut field = ParticleField::new(0, 5.0, 1).unwrap();
    assert!(field.is_empty());
    assert_eq!(field.update(), 0);
}
