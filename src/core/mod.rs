//! Core simulation data structures and physics for boxsim.
//!
//! Leaf first: vector helpers, particles, containers and the world arena, then
//! the integrator, overlap detector and collision resolver, and finally the step
//! orchestration that ties them together.

pub mod container;
pub mod detector;
pub mod event;
pub mod integrator;
pub mod particle;
pub mod resolver;
pub mod sim;
pub mod vector;
pub mod world;

pub use container::{Bounds, Container, ContainerId};
pub use detector::{overlaps, OverlapDetector, PairWise};
pub use event::{Event, EventKind, StepReport};
pub use particle::Particle;
pub use sim::{step, Simulation};
pub use vector::Vec2;
pub use world::{ParticleState, World};
