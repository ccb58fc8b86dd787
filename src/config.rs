//! Simulation configuration.
//!
//! Loaded from JSON documents such as
//!
//! ```json
//! {
//!   "physics_type": "SimpleMechanics",
//!   "collision_detection": "PairWise",
//!   "collision_handler": "ContinuousDetection",
//!   "gravity_scale": 0.1
//! }
//! ```
//!
//! Every key is optional; missing keys take their defaults.

use crate::core::vector::{Vec2, STANDARD_GRAVITY};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Physics model driving integration and collisions.
///
/// Only `SimpleMechanics` is implemented. Any other name is kept as-is and turns
/// simulation steps into no-ops instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PhysicsType {
    #[default]
    SimpleMechanics,
    Unsupported(String),
}

impl PhysicsType {
    pub fn as_str(&self) -> &str {
        match self {
            PhysicsType::SimpleMechanics => "SimpleMechanics",
            PhysicsType::Unsupported(name) => name,
        }
    }

    #[inline]
    pub fn is_supported(&self) -> bool {
        matches!(self, PhysicsType::SimpleMechanics)
    }
}

impl From<String> for PhysicsType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "SimpleMechanics" => PhysicsType::SimpleMechanics,
            _ => PhysicsType::Unsupported(s),
        }
    }
}

impl From<PhysicsType> for String {
    fn from(p: PhysicsType) -> Self {
        match p {
            PhysicsType::SimpleMechanics => "SimpleMechanics".to_string(),
            PhysicsType::Unsupported(name) => name,
        }
    }
}

impl fmt::Display for PhysicsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Overlap detection policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CollisionDetection {
    /// Test every unordered particle pair.
    #[default]
    PairWise,
}

/// How wall and particle contacts are corrected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CollisionHandler {
    /// Clamp after the fact and flip velocity.
    #[default]
    DiscreteDetection,
    /// Reconstruct the impact instant and replay the rest of the step.
    ContinuousDetection,
}

/// Options recognised by the simulation core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub physics_type: PhysicsType,
    pub collision_detection: CollisionDetection,
    pub collision_handler: CollisionHandler,
    /// Fraction of standard gravity applied along -Y.
    pub gravity_scale: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            physics_type: PhysicsType::SimpleMechanics,
            collision_detection: CollisionDetection::PairWise,
            collision_handler: CollisionHandler::DiscreteDetection,
            gravity_scale: 0.1,
        }
    }
}

impl SimulationConfig {
    /// Default configuration with the given boundary/collision handler.
    pub fn with_handler(handler: CollisionHandler) -> Self {
        Self {
            collision_handler: handler,
            ..Self::default()
        }
    }

    /// Builder-style override of the gravity scale.
    pub fn with_gravity_scale(mut self, scale: f64) -> Self {
        self.gravity_scale = scale;
        self
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&text)?;
        log::info!(
            "Loaded simulation config from {}: {} / {:?} / {:?}, gravity_scale={}",
            path.display(),
            config.physics_type,
            config.collision_detection,
            config.collision_handler,
            config.gravity_scale
        );
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the numeric options.
    pub fn validate(&self) -> Result<()> {
        if !self.gravity_scale.is_finite() {
            return Err(Error::InvalidParameter(
                "gravity_scale must be finite".into(),
            ));
        }
        Ok(())
    }

    /// Constant gravitational acceleration, directed along -Y.
    #[inline]
    pub fn gravity(&self) -> Vec2 {
        Vec2::new(0.0, -self.gravity_scale * STANDARD_GRAVITY)
    }

    #[inline]
    pub fn gravity_magnitude(&self) -> f64 {
        self.gravity().norm()
    }
}
