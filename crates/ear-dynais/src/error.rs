//! Error types for the DynAIS engine

use thiserror::Error;

/// DynAIS errors
#[derive(Debug, Error)]
pub enum DynaisError {
    /// Level buffers could not be reserved
    #[error("Allocation failed: window {window} x {levels} levels")]
    Allocation { window: usize, levels: usize },

    /// Configuration rejected by validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration could not be parsed
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for DynAIS operations
pub type DynaisResult<T> = Result<T, DynaisError>;
