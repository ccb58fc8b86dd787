mod common;

use boxsim::config::{CollisionHandler, SimulationConfig};
use boxsim::core::{Container, EventKind, Particle, ParticleState, Simulation, Vec2};
use boxsim::error::Result;
use common::{fill_random, init_logging, unit_square};

const HANDLERS: [CollisionHandler; 2] = [
    CollisionHandler::DiscreteDetection,
    CollisionHandler::ContinuousDetection,
];

fn weightless(handler: CollisionHandler) -> SimulationConfig {
    SimulationConfig::with_handler(handler).with_gravity_scale(0.0)
}

fn assert_contained(sim: &Simulation) -> Result<()> {
    let world = sim.world();
    for p in world.particles() {
        let bounds = world.bounds_of(p).expect("particle has a parent");
        assert!(
            bounds.contains(&p.position(), p.radius() - 1e-12),
            "particle at {:?} escaped {:?}",
            p.position(),
            bounds
        );
    }
    Ok(())
}

#[test]
fn resting_particle_without_gravity_stays_put() -> Result<()> {
    init_logging();
    for handler in HANDLERS {
        let mut world = unit_square()?;
        let root = world.root();
        world.add_particle(root, Particle::new(Vec2::new(0.3, 0.6), Vec2::zeros(), 0.01, 1.0)?)?;
        let mut sim = Simulation::new(world, weightless(handler))?;
        for _ in 0..1000 {
            assert!(sim.step(0.01)?.is_empty());
        }
        let p = &sim.world().container(root)?.particles()[0];
        assert_eq!(p.position(), Vec2::new(0.3, 0.6));
        assert_eq!(p.velocity(), Vec2::zeros());
        assert_eq!(p.energy(), 0.0);
    }
    Ok(())
}

#[test]
fn wall_reflection_flips_only_the_hit_axis() -> Result<()> {
    for handler in HANDLERS {
        let mut world = unit_square()?;
        let root = world.root();
        let p = Particle::new(Vec2::new(0.95, 0.5), Vec2::new(1.0, 0.25), 0.01, 1.0)?;
        world.add_particle(root, p)?;
        let mut sim = Simulation::new(world, weightless(handler))?;
        let report = sim.step(0.1)?;
        assert_eq!(report.wall_contacts(), 1);
        assert!(matches!(report.events[0].kind, EventKind::Wall { i: 0, wall_id: 1 }));

        let p = &sim.world().container(root)?.particles()[0];
        assert_eq!(p.vx(), -1.0);
        assert_eq!(p.vy(), 0.25);
        assert!(p.x() <= 0.99 + 1e-12);
        assert!((p.y() - 0.525).abs() < 1e-12);
    }
    Ok(())
}

#[test]
fn kinetic_energy_conserved_without_gravity() -> Result<()> {
    init_logging();
    for handler in HANDLERS {
        let mut world = unit_square()?;
        let root = world.root();
        fill_random(&mut world, root, 40, 0.02, 0.5, 7)?;
        let mut sim = Simulation::new(world, weightless(handler))?;
        let before = sim.kinetic_energy();
        let mut collisions = 0;
        for _ in 0..2000 {
            collisions += sim.step(1e-3)?.pair_collisions();
        }
        let after = sim.kinetic_energy();
        assert!(collisions > 0, "{handler:?}: scene never collided");
        assert!(
            (after - before).abs() <= 1e-9 * before,
            "{handler:?}: kinetic energy drifted from {before} to {after}"
        );
        assert!((sim.total_energy() - after).abs() <= 1e-9 * after);
    }
    Ok(())
}

#[test]
fn particles_stay_inside_under_gravity() -> Result<()> {
    for handler in HANDLERS {
        let mut world = unit_square()?;
        let root = world.root();
        fill_random(&mut world, root, 30, 0.015, 1.0, 11)?;
        let config = SimulationConfig::with_handler(handler).with_gravity_scale(1.0);
        let mut sim = Simulation::new(world, config)?;
        for _ in 0..1500 {
            sim.step(2e-3)?;
            assert_contained(&sim)?;
        }
        assert!((sim.time() - 3.0).abs() < 1e-9);
    }
    Ok(())
}

#[test]
fn nested_containers_confine_their_own_particles() -> Result<()> {
    let mut world = unit_square()?;
    let root = world.root();
    let half = Vec2::new(0.2, 0.4);
    let left = world.add_container(root, Container::new(Vec2::new(0.25, 0.5), half)?)?;
    let right = world.add_container(root, Container::new(Vec2::new(0.75, 0.5), half)?)?;
    fill_random(&mut world, left, 10, 0.01, 0.8, 3)?;
    fill_random(&mut world, right, 10, 0.01, 0.8, 4)?;
    fill_random(&mut world, root, 5, 0.01, 0.8, 5)?;
    assert_eq!(world.num_containers(), 3);
    assert_eq!(world.num_particles(), 25);

    for handler in HANDLERS {
        let mut sim = Simulation::new(world.clone(), SimulationConfig::with_handler(handler))?;
        for _ in 0..1000 {
            let report = sim.step(2e-3)?;
            for event in &report.events {
                if let EventKind::Pair { i, j } = event.kind {
                    let n = sim.world().container(event.container)?.particles().len();
                    assert!(i < j && j < n);
                }
            }
            assert_contained(&sim)?;
        }
        assert_eq!(sim.world().container(left)?.particles().len(), 10);
        assert_eq!(sim.world().container(right)?.particles().len(), 10);
    }
    Ok(())
}

#[test]
fn snapshot_serializes_to_json() -> Result<()> {
    let mut world = unit_square()?;
    let root = world.root();
    let inner_box = Container::new(Vec2::new(0.5, 0.5), Vec2::new(0.1, 0.1))?;
    let inner = world.add_container(root, inner_box)?;
    world.add_particle(root, Particle::new(Vec2::new(0.2, 0.2), Vec2::new(0.1, 0.0), 0.01, 1.0)?)?;
    world.add_particle(inner, Particle::new(Vec2::new(0.5, 0.5), Vec2::new(0.0, 0.1), 0.02, 2.0)?)?;

    let snapshot = world.snapshot();
    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot[0].container, root);
    assert_eq!(snapshot[1].container, inner);

    let json = serde_json::to_string(&snapshot)?;
    let back: Vec<ParticleState> = serde_json::from_str(&json)?;
    assert_eq!(back, snapshot);
    Ok(())
}

#[test]
fn edited_velocity_is_used_by_the_next_step() -> Result<()> {
    let mut world = unit_square()?;
    let root = world.root();
    world.add_particle(root, Particle::new(Vec2::new(0.5, 0.5), Vec2::zeros(), 0.01, 1.0)?)?;
    let mut sim = Simulation::new(world, weightless(CollisionHandler::DiscreteDetection))?;

    let p = &mut sim.world_mut().container_mut(root)?.particles_mut()[0];
    p.set_velocity(Vec2::new(0.0, 1.0))?;
    assert!(p.set_radius(-1.0).is_err());

    sim.step(0.1)?;
    let p = &sim.world().container(root)?.particles()[0];
    assert!((p.y() - 0.6).abs() < 1e-12);
    assert_eq!(p.radius(), 0.01);
    Ok(())
}
