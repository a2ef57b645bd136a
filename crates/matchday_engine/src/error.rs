use std::fmt;
use std::io;

use thiserror::Error;

/// Failure reported by a [`Store`](crate::Store) operation.
///
/// Only its display text leaves the pipeline, as an alert message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct StoreError {
    pub kind: StoreFailure,
    pub message: String,
}

impl StoreError {
    pub fn new(kind: StoreFailure, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(StoreFailure::Unavailable, message)
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self::new(StoreFailure::Rejected, message)
    }

    pub fn corrupt(message: impl Into<String>) -> Self {
        Self::new(StoreFailure::Corrupt, message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreFailure {
    /// The store could not be reached.
    Unavailable,
    /// The store refused the operation.
    Rejected,
    /// The store answered with data that could not be read.
    Corrupt,
}

impl fmt::Display for StoreFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreFailure::Unavailable => write!(f, "store unavailable"),
            StoreFailure::Rejected => write!(f, "rejected by store"),
            StoreFailure::Corrupt => write!(f, "corrupt store data"),
        }
    }
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to start refresh pipeline: {0}")]
    Startup(#[from] io::Error),
}
