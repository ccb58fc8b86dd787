use crate::core::container::{Bounds, Container, ContainerId};
use crate::core::particle::Particle;
use crate::core::vector::{Vec2, DIM};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Arena holding the container tree.
///
/// The root container is created together with the world and has id 0. New
/// containers can only be attached below an existing one, so the structure stays
/// a tree. Particles live inside their container and refer back to it by id.
#[derive(Debug, Clone)]
pub struct World {
    containers: Vec<Container>,
}

/// Observable state of one particle, for renderers and telemetry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleState {
    pub container: ContainerId,
    pub position: [f64; DIM],
    pub velocity: [f64; DIM],
    pub radius: f64,
    pub energy: f64,
}

impl World {
    /// Create a world whose root is `root`.
    pub fn new(root: Container) -> Self {
        Self {
            containers: vec![root],
        }
    }

    /// Id of the root container.
    #[inline]
    pub fn root(&self) -> ContainerId {
        ContainerId(0)
    }

    /// Attach `container` as the last child of `parent`.
    pub fn add_container(
        &mut self,
        parent: ContainerId,
        container: Container,
    ) -> Result<ContainerId> {
        self.check(parent)?;
        let id = ContainerId(self.containers.len());
        self.containers.push(container);
        self.containers[parent.0].children.push(id);
        Ok(id)
    }

    /// Hand `particle` over to `container` and return its index in that container.
    ///
    /// Particles placed outside the bounding rectangle are accepted; the integrator
    /// reflects them back in on the next step.
    pub fn add_particle(
        &mut self,
        container: ContainerId,
        mut particle: Particle,
    ) -> Result<usize> {
        self.check(container)?;
        let target = &mut self.containers[container.0];
        if !target.bounds().contains(&particle.position, particle.radius) {
            log::warn!(
                "particle at ({}, {}) with radius {} added outside container {}",
                particle.position.x,
                particle.position.y,
                particle.radius,
                container.0
            );
        }
        particle.parent = Some(container);
        target.particles.push(particle);
        Ok(target.particles.len() - 1)
    }

    pub fn container(&self, id: ContainerId) -> Result<&Container> {
        self.containers.get(id.0).ok_or(Error::UnknownContainer(id.0))
    }

    pub fn container_mut(&mut self, id: ContainerId) -> Result<&mut Container> {
        self.containers
            .get_mut(id.0)
            .ok_or(Error::UnknownContainer(id.0))
    }

    /// Bounding region a particle has to stay within, resolved through its parent id.
    pub fn bounds_of(&self, particle: &Particle) -> Option<Bounds> {
        particle
            .parent
            .and_then(|id| self.containers.get(id.0))
            .map(Container::bounds)
    }

    /// Number of containers, root included.
    pub fn num_containers(&self) -> usize {
        self.containers.len()
    }

    /// Total number of particles across all containers.
    pub fn num_particles(&self) -> usize {
        self.containers.iter().map(|c| c.particles.len()).sum()
    }

    /// All particles, container by container in depth-first order from the root.
    pub fn particles(&self) -> impl Iterator<Item = &Particle> + '_ {
        self.depth_first()
            .into_iter()
            .flat_map(move |id| self.containers[id.0].particles.iter())
    }

    /// Sum of the cached particle energies (kinetic + potential).
    pub fn total_energy(&self) -> f64 {
        self.particles().map(Particle::energy).sum()
    }

    /// Total kinetic energy (diagnostic).
    pub fn kinetic_energy(&self) -> f64 {
        self.particles().map(Particle::kinetic_energy).sum()
    }

    /// Total linear momentum.
    pub fn total_momentum(&self) -> Vec2 {
        self.particles().fold(Vec2::zeros(), |acc, p| acc + p.momentum())
    }

    /// Per-particle states in depth-first container order.
    pub fn snapshot(&self) -> Vec<ParticleState> {
        self.depth_first()
            .into_iter()
            .flat_map(|id| {
                self.containers[id.0]
                    .particles
                    .iter()
                    .map(move |p| ParticleState {
                        container: id,
                        position: [p.position.x, p.position.y],
                        velocity: [p.velocity.x, p.velocity.y],
                        radius: p.radius,
                        energy: p.energy,
                    })
            })
            .collect()
    }

    fn depth_first(&self) -> Vec<ContainerId> {
        let mut order = Vec::with_capacity(self.containers.len());
        let mut stack = vec![self.root()];
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.containers[id.0].children.iter().rev().copied());
        }
        order
    }

    fn check(&self, id: ContainerId) -> Result<()> {
        if id.0 >= self.containers.len() {
            return Err(Error::UnknownContainer(id.0));
        }
        Ok(())
    }
}
