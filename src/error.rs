//! Error types for entity pools and startup configuration.
//!
//! The simulation itself has no recoverable runtime errors beyond pool
//! exhaustion; everything else here is raised while loading [`crate::Tuning`].

use std::fmt;

/// Returned by [`crate::sim::Pool::push`] when the pool is at capacity.
///
/// Spawners treat this as a silent drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolFull {
    pub capacity: usize,
}

impl fmt::Display for PoolFull {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pool full (capacity {})", self.capacity)
    }
}

impl std::error::Error for PoolFull {}

/// Failure to load or validate tuning data.
#[derive(Debug)]
pub enum TuningError {
    /// The tuning file could not be read.
    Io(std::io::Error),
    /// The JSON document is malformed or has wrongly typed fields.
    Parse(serde_json::Error),
    /// A field holds a value the simulation cannot run with.
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Io(e) => write!(f, "failed to read tuning file: {e}"),
            TuningError::Parse(e) => write!(f, "failed to parse tuning JSON: {e}"),
            TuningError::Invalid { field, reason } => {
                write!(f, "invalid tuning value for `{field}`: {reason}")
            }
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Io(e) => Some(e),
            TuningError::Parse(e) => Some(e),
            TuningError::Invalid { .. } => None,
        }
    }
}

impl From<std::io::Error> for TuningError {
    fn from(e: std::io::Error) -> Self {
        TuningError::Io(e)
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Parse(e)
    }
}
