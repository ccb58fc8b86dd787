use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the simulation core.
///
/// Every variant is a local condition the caller can recover from: the core never
/// retries, it reports and lets the driving layer decide (skip, abort, log and continue).
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid user or API parameter (non-positive `dt`, radius or mass, non-finite vectors).
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Two particles with coincident centers were handed to the collision resolver.
    #[error("degenerate collision: particle centers coincide at ({x}, {y})")]
    DegenerateCollision { x: f64, y: f64 },

    /// A container id that does not belong to the world.
    #[error("unknown container id {0}")]
    UnknownContainer(usize),

    /// Malformed configuration document.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// Propagated I/O errors (configuration files).
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
