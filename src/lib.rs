//! # boxsim
//!
//! Circular particles moving under gravity inside nested axis-aligned boxes,
//! bouncing off the walls and colliding elastically with each other.
//!
//! ```no_run
//! use boxsim::config::{CollisionHandler, SimulationConfig};
//! use boxsim::core::{Container, Particle, Simulation, Vec2, World};
//!
//! # fn main() -> boxsim::error::Result<()> {
//! let mut world = World::new(Container::new(Vec2::new(0.5, 0.5), Vec2::new(0.5, 0.5))?);
//! let root = world.root();
//! world.add_particle(root, Particle::new(Vec2::new(0.2, 0.8), Vec2::new(0.3, 0.0), 0.01, 1.0)?)?;
//!
//! let config = SimulationConfig::with_handler(CollisionHandler::ContinuousDetection);
//! let mut sim = Simulation::new(world, config)?;
//! for _ in 0..100 {
//!     sim.step(0.01)?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod core;
pub mod error;

#[cfg(feature = "python")]
mod python;
