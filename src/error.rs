//! Simulation Error Types
//!
//! Fatal errors: configuration rejection at world construction, invariant
//! violations during a run, and sink I/O failures.

use thiserror::Error;

/// Errors that can occur while constructing or running a simulation.
#[derive(Debug, Error)]
pub enum SimError {
    /// Configuration was rejected at load or world construction
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A runtime invariant was violated; the simulation must halt
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    /// I/O error (sink file operations)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parse error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}
