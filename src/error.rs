use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures raised by the simulation core.
///
/// Collisions and game over are ordinary outcomes and never show up here.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum GameError {
    /// No free cell was left for food or wall placement.
    #[error("no free cell left on the {width}x{height} grid")]
    GridFull { width: u16, height: u16 },
    /// Internal state broke an invariant; the round cannot continue.
    #[error("invariant violated: {0}")]
    InvariantViolation(&'static str),
}

/// Failures while loading or validating a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(&'static str),
}

impl From<ConfigError> for io::Error {
    fn from(error: ConfigError) -> Self {
        io::Error::new(io::ErrorKind::InvalidData, error)
    }
}
