use crate::config::{CollisionHandler, SimulationConfig};
use crate::core::container::{Bounds, ContainerId};
use crate::core::detector::OverlapDetector;
use crate::core::event::{Event, StepReport};
use crate::core::integrator;
use crate::core::resolver::{self, pair_mut};
use crate::core::world::World;
use crate::error::{Error, Result};

/// Small numeric tolerance for time checks.
const EPS_TIME: f64 = 1e-12;

/// Advance `container` and everything nested in it by `dt`.
///
/// Children are stepped first (depth first), then the container's own particles are
/// integrated in list order, then every overlapping pair reported by the configured
/// detector is resolved in detector order. Particles in different containers never
/// interact.
///
/// Errors:
/// - `Error::InvalidParameter` if `dt` is not finite and > 0 (nothing is mutated)
/// - `Error::UnknownContainer` if `container` is not part of `world`
/// - `Error::DegenerateCollision` from the first pair with coincident centers; pairs
///   resolved before it keep their new velocities
pub fn step(
    world: &mut World,
    container: ContainerId,
    dt: f64,
    config: &SimulationConfig,
) -> Result<StepReport> {
    if !dt.is_finite() || dt <= 0.0 {
        return Err(Error::InvalidParameter("dt must be finite and > 0".into()));
    }
    world.container(container)?;

    let mut report = StepReport::default();
    if !config.physics_type.is_supported() {
        log::warn!(
            "physics type {} is not supported; skipping step",
            config.physics_type
        );
        return Ok(report);
    }
    step_container(world, container, dt, config, &mut report)?;
    Ok(report)
}

fn step_container(
    world: &mut World,
    id: ContainerId,
    dt: f64,
    config: &SimulationConfig,
    report: &mut StepReport,
) -> Result<()> {
    let children = world.container(id)?.children().to_vec();
    for child in children {
        step_container(world, child, dt, config, report)?;
    }

    let own_bounds = world.container(id)?.bounds();
    let bounds: Vec<Bounds> = world
        .container(id)?
        .particles()
        .iter()
        .map(|p| world.bounds_of(p).unwrap_or(own_bounds))
        .collect();

    let gravity = config.gravity();
    let handler = config.collision_handler;
    let particles = &mut world.container_mut(id)?.particles;

    let walls_before = report.wall_contacts();
    for (i, (p, b)) in particles.iter_mut().zip(&bounds).enumerate() {
        let hits = integrator::advance(p, b, dt, gravity, handler)?;
        for hit in hits.iter().flatten() {
            log::trace!(
                "container {}: particle {i} hit wall {} at t+{}",
                id.index(),
                hit.wall_id(),
                hit.time
            );
            report.push(Event::wall(id, i, hit));
        }
    }

    let pairs = config.collision_detection.find_overlapping_pairs(particles);
    let g = gravity.norm();
    for &(i, j) in &pairs {
        let (a, b) = pair_mut(particles, i, j)?;
        let time = match handler {
            CollisionHandler::DiscreteDetection => {
                resolver::resolve(a, b)?;
                dt
            }
            CollisionHandler::ContinuousDetection => {
                let t = resolver::resolve_continuous(a, b, dt)?;
                integrator::confine(a, &bounds[i]);
                integrator::confine(b, &bounds[j]);
                t
            }
        };
        a.refresh_energy(g);
        b.refresh_energy(g);
        log::trace!("container {}: resolved pair ({i}, {j}) at t+{time}", id.index());
        report.push(Event::pair(id, i, j, time));
    }

    log::debug!(
        "container {}: stepped {} particles by {dt}, {} wall contacts, {} pair collisions",
        id.index(),
        particles.len(),
        report.wall_contacts() - walls_before,
        pairs.len()
    );
    Ok(())
}

/// Simulation driver: a world, its configuration and a clock.
#[derive(Debug, Clone)]
pub struct Simulation {
    time_now: f64,
    steps: u64,
    world: World,
    config: SimulationConfig,
}

impl Simulation {
    /// Create a simulation over `world` after validating `config`.
    pub fn new(world: World, config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            time_now: 0.0,
            steps: 0,
            world,
            config,
        })
    }

    /// Returns current simulation time.
    pub fn time(&self) -> f64 {
        self.time_now
    }

    /// Number of steps taken so far.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Replace the configuration (validated).
    pub fn set_config(&mut self, config: SimulationConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Number of particles.
    pub fn num_particles(&self) -> usize {
        self.world.num_particles()
    }

    /// Compute total kinetic energy (diagnostic).
    pub fn kinetic_energy(&self) -> f64 {
        self.world.kinetic_energy()
    }

    /// Sum of cached kinetic + potential energies.
    pub fn total_energy(&self) -> f64 {
        self.world.total_energy()
    }

    /// Advance the whole world by one step of `dt`.
    pub fn step(&mut self, dt: f64) -> Result<StepReport> {
        let root = self.world.root();
        let report = step(&mut self.world, root, dt, &self.config)?;
        self.time_now += dt;
        self.steps += 1;
        Ok(report)
    }

    /// Advance the simulation to `target_time` (must be ≥ current time) in steps of at
    /// most `max_dt`; the last step is shortened to land on the target.
    pub fn advance_to(&mut self, target_time: f64, max_dt: f64) -> Result<StepReport> {
        if !target_time.is_finite() {
            return Err(Error::InvalidParameter("target_time must be finite".into()));
        }
        if target_time < self.time_now - EPS_TIME {
            return Err(Error::InvalidParameter(
                "target_time cannot be earlier than current time".into(),
            ));
        }
        if !max_dt.is_finite() || max_dt <= 0.0 {
            return Err(Error::InvalidParameter("max_dt must be finite and > 0".into()));
        }

        let mut report = StepReport::default();
        while self.time_now + EPS_TIME < target_time {
            let dt = max_dt.min(target_time - self.time_now);
            report.extend(self.step(dt)?);
        }
        Ok(report)
    }
}
