#![allow(dead_code)]

use boxsim::core::{Container, ContainerId, Particle, Vec2, World};
use boxsim::error::Result;
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Install env_logger once so `RUST_LOG=boxsim=debug` shows step logs.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A world whose root is the unit square `[0, 1]²`.
pub fn unit_square() -> Result<World> {
    Ok(World::new(Container::new(
        Vec2::new(0.5, 0.5),
        Vec2::new(0.5, 0.5),
    )?))
}

/// Rejection sample `n` non-overlapping particles of `radius` inside `container`,
/// with speeds up to `max_speed` in random directions.
pub fn fill_random(
    world: &mut World,
    container: ContainerId,
    n: usize,
    radius: f64,
    max_speed: f64,
    seed: u64,
) -> Result<()> {
    let mut rng = StdRng::seed_from_u64(seed);
    let bounds = world.container(container)?.bounds();
    let mut placed: Vec<Vec2> = Vec::with_capacity(n);
    let max_attempts = 100_000usize;
    for _ in 0..n {
        let mut attempts = 0usize;
        let position = loop {
            assert!(attempts < max_attempts, "could not place particle without overlap");
            attempts += 1;
            let candidate = Vec2::new(
                rng.random_range(bounds.lower.x + radius..=bounds.upper.x - radius),
                rng.random_range(bounds.lower.y + radius..=bounds.upper.y - radius),
            );
            let min_sq = (2.0 * radius) * (2.0 * radius);
            if placed.iter().all(|q| (candidate - q).norm_squared() >= min_sq) {
                break candidate;
            }
        };
        placed.push(position);

        let speed = rng.random_range(0.0..=max_speed);
        let phi = rng.random_range(0.0..std::f64::consts::TAU);
        let velocity = boxsim::core::vector::polar_to_cartesian(speed, phi);
        world.add_particle(container, Particle::new(position, velocity, radius, 1.0)?)?;
    }
    Ok(())
}
