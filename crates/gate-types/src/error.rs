//! Error types for the gate-types crate.
//!
//! Only identifiers coming from configuration or the wire can be invalid,
//! so the error surface here is deliberately small.

use thiserror::Error;

/// Errors that can occur while constructing domain identifiers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GateTypesError {
    /// An actor identifier that is not a non-negative integer
    #[error("Invalid fid: {0:?}")]
    InvalidFid(String),

    /// A cast reference that is empty or whitespace only
    #[error("Cast reference must not be empty")]
    EmptyCastRef,
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, GateTypesError>;
