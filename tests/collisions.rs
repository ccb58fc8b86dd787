use boxsim::core::detector::{overlaps, OverlapDetector, PairWise};
use boxsim::core::resolver::resolve;
use boxsim::core::{Particle, Vec2};
use boxsim::error::Result;
use proptest::prelude::*;

fn particle(x: f64, y: f64, vx: f64, vy: f64, radius: f64, mass: f64) -> Particle {
    Particle::new(Vec2::new(x, y), Vec2::new(vx, vy), radius, mass).expect("valid particle")
}

/// Equal masses meeting head-on along the line of centers exchange velocities.
#[test]
fn head_on_equal_masses_swap() -> Result<()> {
    let mut p1 = particle(0.0, 0.0, 1.0, 0.0, 0.01, 1.0);
    let mut p2 = particle(0.015, 0.0, -1.0, 0.0, 0.01, 1.0);
    assert!(overlaps(&p1, &p2));
    resolve(&mut p1, &mut p2)?;
    assert!((p1.velocity() - Vec2::new(-1.0, 0.0)).norm() < 1e-12);
    assert!((p2.velocity() - Vec2::new(1.0, 0.0)).norm() < 1e-12);
    Ok(())
}

/// Overlap is strict: touching particles are not reported.
#[test]
fn overlap_detection_boundary() {
    let a = particle(0.0, 0.0, 0.0, 0.0, 0.01, 1.0);
    let touching = particle(0.02, 0.0, 0.0, 0.0, 0.01, 1.0);
    let inside = particle(0.02 - 1e-9, 0.0, 0.0, 0.0, 0.01, 1.0);
    assert!(!overlaps(&a, &touching));
    assert!(overlaps(&a, &inside));
    assert!(PairWise.find_overlapping_pairs(&[a.clone(), touching]).is_empty());
    assert_eq!(PairWise.find_overlapping_pairs(&[a, inside]), vec![(0, 1)]);
}

/// Every pair among mutually overlapping particles is reported exactly once.
#[test]
fn no_self_or_duplicate_pairs() {
    for n in 0..8usize {
        let particles: Vec<Particle> = (0..n)
            .map(|k| particle(0.001 * k as f64, 0.0005 * k as f64, 0.0, 0.0, 0.5, 1.0))
            .collect();
        let pairs = PairWise.find_overlapping_pairs(&particles);
        assert_eq!(pairs.len(), n * n.saturating_sub(1) / 2);
        let mut seen = std::collections::HashSet::new();
        for &(i, j) in &pairs {
            assert!(i < j && j < n);
            assert!(seen.insert((i, j)));
        }
    }
}

proptest! {
    /// m1 v1 + m2 v2 is unchanged by a collision.
    #[test]
    fn momentum_conserved(
        x2 in -1.0f64..1.0, y2 in -1.0f64..1.0,
        vx1 in -5.0f64..5.0, vy1 in -5.0f64..5.0,
        vx2 in -5.0f64..5.0, vy2 in -5.0f64..5.0,
        m1 in 0.1f64..10.0, m2 in 0.1f64..10.0,
    ) {
        prop_assume!(x2.hypot(y2) > 1e-3);
        let mut p1 = particle(0.0, 0.0, vx1, vy1, 1.0, m1);
        let mut p2 = particle(x2, y2, vx2, vy2, 1.0, m2);
        let before = p1.momentum() + p2.momentum();
        resolve(&mut p1, &mut p2).expect("distinct centers");
        let after = p1.momentum() + p2.momentum();
        let scale = before.norm().max(m1 * p1.speed()).max(1.0);
        prop_assert!((after - before).norm() <= 1e-9 * scale, "before {before:?}, after {after:?}");
    }

    /// Total kinetic energy is unchanged by a collision.
    #[test]
    fn kinetic_energy_conserved(
        x2 in -1.0f64..1.0, y2 in -1.0f64..1.0,
        vx1 in -5.0f64..5.0, vy1 in -5.0f64..5.0,
        vx2 in -5.0f64..5.0, vy2 in -5.0f64..5.0,
        m1 in 0.1f64..10.0, m2 in 0.1f64..10.0,
    ) {
        prop_assume!(x2.hypot(y2) > 1e-3);
        let mut p1 = particle(0.0, 0.0, vx1, vy1, 1.0, m1);
        let mut p2 = particle(x2, y2, vx2, vy2, 1.0, m2);
        let before = p1.kinetic_energy() + p2.kinetic_energy();
        resolve(&mut p1, &mut p2).expect("distinct centers");
        let after = p1.kinetic_energy() + p2.kinetic_energy();
        prop_assert!(
            (after - before).abs() <= 1e-9 * before.max(1.0),
            "before {before}, after {after}"
        );
    }
}
