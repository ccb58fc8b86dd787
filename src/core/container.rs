use crate::core::particle::Particle;
use crate::core::vector::{is_finite, Vec2, DIM};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Index of a container inside a [`World`](crate::core::World) arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContainerId(pub(crate) usize);

impl ContainerId {
    /// Raw arena index.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Axis-aligned bounding rectangle `[lower, upper]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub lower: Vec2,
    pub upper: Vec2,
}

impl Bounds {
    /// Whether a disc of `radius` centered at `position` lies inside, walls included.
    pub fn contains(&self, position: &Vec2, radius: f64) -> bool {
        (0..DIM).all(|k| {
            position[k] - radius >= self.lower[k] && position[k] + radius <= self.upper[k]
        })
    }
}

/// A box region that owns particles and, through the world arena, nested boxes.
///
/// `border_material` and `fill` are descriptive only; they do not change how
/// anything collides.
#[derive(Debug, Clone)]
pub struct Container {
    position: Vec2,
    velocity: Vec2,
    half_lengths: Vec2,
    border_material: String,
    fill: String,
    pub(crate) children: Vec<ContainerId>,
    pub(crate) particles: Vec<Particle>,
}

impl Container {
    /// Create a box centered at `position` spanning `position ± half_lengths`.
    ///
    /// Errors: `Error::InvalidParameter` if a half length is negative or any component is NaN/inf.
    pub fn new(position: Vec2, half_lengths: Vec2) -> Result<Self> {
        if !is_finite(&position) {
            return Err(Error::InvalidParameter(
                "container position must be finite".into(),
            ));
        }
        validate_half_lengths(&half_lengths)?;
        Ok(Self {
            position,
            velocity: Vec2::zeros(),
            half_lengths,
            border_material: "Inf".to_string(),
            fill: "vacuum".to_string(),
            children: Vec::new(),
            particles: Vec::new(),
        })
    }

    /// Set the (currently unintegrated) container velocity.
    pub fn with_velocity(mut self, velocity: Vec2) -> Result<Self> {
        if !is_finite(&velocity) {
            return Err(Error::InvalidParameter(
                "container velocity must be finite".into(),
            ));
        }
        self.velocity = velocity;
        Ok(self)
    }

    pub fn with_border_material(mut self, material: impl Into<String>) -> Self {
        self.border_material = material.into();
        self
    }

    pub fn with_fill(mut self, fill: impl Into<String>) -> Self {
        self.fill = fill.into();
        self
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    #[inline]
    pub fn half_lengths(&self) -> Vec2 {
        self.half_lengths
    }

    /// Update the half lengths (each component finite and >= 0).
    pub fn set_half_lengths(&mut self, half_lengths: Vec2) -> Result<()> {
        validate_half_lengths(&half_lengths)?;
        self.half_lengths = half_lengths;
        Ok(())
    }

    pub fn border_material(&self) -> &str {
        &self.border_material
    }

    pub fn fill(&self) -> &str {
        &self.fill
    }

    /// Bounding rectangle of this container.
    #[inline]
    pub fn bounds(&self) -> Bounds {
        Bounds {
            lower: self.position - self.half_lengths,
            upper: self.position + self.half_lengths,
        }
    }

    /// Nested containers, in insertion order.
    pub fn children(&self) -> &[ContainerId] {
        &self.children
    }

    /// Particles owned by this container, in insertion order.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Mutable view of the owned particles. Particles can be edited through their
    /// validated setters but not added or removed here.
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }
}

fn validate_half_lengths(half_lengths: &Vec2) -> Result<()> {
    if !half_lengths.iter().all(|&h| h.is_finite() && h >= 0.0) {
        return Err(Error::InvalidParameter(
            "half_lengths components must be finite and >= 0".into(),
        ));
    }
    Ok(())
}
