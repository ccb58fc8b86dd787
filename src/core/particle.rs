use crate::core::container::ContainerId;
use crate::core::vector::{is_finite, Vec2};
use crate::error::{Error, Result};

/// A circular point mass moving inside a container.
///
/// Fields are only mutable through validated setters outside the crate; the
/// integrator and resolver update them directly.
///
/// - `position`, `velocity`: current state in m and m/s
/// - `previous_position`: position at the start of the current step
/// - `radius`, `mass`: strictly positive
/// - `energy`: kinetic + potential, refreshed after every integration step
/// - `parent`: arena id of the owning container, used for bounds lookup only
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub(crate) position: Vec2,
    pub(crate) previous_position: Vec2,
    pub(crate) velocity: Vec2,
    pub(crate) radius: f64,
    pub(crate) mass: f64,
    pub(crate) energy: f64,
    pub(crate) parent: Option<ContainerId>,
}

impl Particle {
    /// Create a new particle after validating invariants.
    ///
    /// The energy cache starts as the kinetic energy; potential energy is added once
    /// the particle has been integrated under a gravity field.
    ///
    /// Errors:
    /// - `Error::InvalidParameter` if `radius` or `mass` is non-positive or any component
    ///   is NaN/inf.
    pub fn new(position: Vec2, velocity: Vec2, radius: f64, mass: f64) -> Result<Self> {
        validate_radius(radius)?;
        validate_mass(mass)?;
        validate_vector("position", &position)?;
        validate_vector("velocity", &velocity)?;
        let mut p = Self {
            position,
            previous_position: position,
            velocity,
            radius,
            mass,
            energy: 0.0,
            parent: None,
        };
        p.energy = p.kinetic_energy();
        Ok(p)
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Position at the start of the most recent integration step.
    #[inline]
    pub fn previous_position(&self) -> Vec2 {
        self.previous_position
    }

    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    #[inline]
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Cached kinetic + potential energy as of the last update.
    #[inline]
    pub fn energy(&self) -> f64 {
        self.energy
    }

    /// Container this particle belongs to, once added to a world.
    #[inline]
    pub fn parent(&self) -> Option<ContainerId> {
        self.parent
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.position.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.position.y
    }

    #[inline]
    pub fn vx(&self) -> f64 {
        self.velocity.x
    }

    #[inline]
    pub fn vy(&self) -> f64 {
        self.velocity.y
    }

    /// Velocity magnitude.
    #[inline]
    pub fn speed(&self) -> f64 {
        self.velocity.norm()
    }

    /// Returns the particle's kinetic energy: 1/2 m |v|^2.
    #[inline]
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.norm_squared()
    }

    /// Linear momentum m v.
    #[inline]
    pub fn momentum(&self) -> Vec2 {
        self.velocity * self.mass
    }

    /// Set position (validated as finite).
    pub fn set_position(&mut self, position: Vec2) -> Result<()> {
        validate_vector("position", &position)?;
        self.position = position;
        Ok(())
    }

    /// Set velocity (validated as finite).
    pub fn set_velocity(&mut self, velocity: Vec2) -> Result<()> {
        validate_vector("velocity", &velocity)?;
        self.velocity = velocity;
        Ok(())
    }

    /// Set radius (finite and > 0).
    pub fn set_radius(&mut self, radius: f64) -> Result<()> {
        validate_radius(radius)?;
        self.radius = radius;
        Ok(())
    }

    /// Set mass (finite and > 0).
    pub fn set_mass(&mut self, mass: f64) -> Result<()> {
        validate_mass(mass)?;
        self.mass = mass;
        Ok(())
    }

    /// Recompute the energy cache, using the y coordinate as height.
    pub(crate) fn refresh_energy(&mut self, gravity_magnitude: f64) {
        self.energy = self.kinetic_energy() + self.mass * gravity_magnitude * self.position.y;
    }
}

fn validate_radius(radius: f64) -> Result<()> {
    if !radius.is_finite() || radius <= 0.0 {
        return Err(Error::InvalidParameter(
            "radius must be finite and > 0".into(),
        ));
    }
    Ok(())
}

fn validate_mass(mass: f64) -> Result<()> {
    if !mass.is_finite() || mass <= 0.0 {
        return Err(Error::InvalidParameter("mass must be finite and > 0".into()));
    }
    Ok(())
}

fn validate_vector(name: &str, v: &Vec2) -> Result<()> {
    if !is_finite(v) {
        return Err(Error::InvalidParameter(format!("{name} must be finite")));
    }
    Ok(())
}
