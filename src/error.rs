//! Error taxonomy for the allocation core.

use thiserror::Error;

/// Errors raised by configuration validation and allocation lookups.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AllocError {
    /// A table layout or annealing parameter cannot produce a valid run.
    ///
    /// Raised before any solving starts.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A person name that was never registered with the preference graph.
    #[error("unknown person: {0}")]
    UnknownPerson(String),
}

impl AllocError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        AllocError::InvalidConfiguration(msg.into())
    }
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, AllocError>;
