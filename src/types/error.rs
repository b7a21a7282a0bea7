//! Error types for robokit

use thiserror::Error;

/// Error types for robokit operations
#[derive(Debug, Error)]
pub enum RoboError {
    /// Standard IO error (automatically converted via #[from])
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration (unreadable options file, bad CLI combination)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Raw options failed a structural check
    #[error("Validation error: {0}")]
    Validation(String),

    /// A required field was rejected by the sanitizer
    #[error("Unsafe or empty value for '{field}'")]
    UnsafeInput { field: &'static str },

    /// Scheduled task definition is invalid
    #[error("Schedule error: {0}")]
    Schedule(String),

    /// The external copy tool could not be started
    #[error("Failed to start '{program}': {reason}")]
    Spawn { program: String, reason: String },

    /// The background parser worker is gone or failed
    #[error("Parser worker error: {0}")]
    Worker(String),
}

impl RoboError {
    /// Check if this error is a validation error
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            RoboError::Validation(_)
                | RoboError::UnsafeInput { .. }
                | RoboError::Config(_)
                | RoboError::Schedule(_)
        )
    }

    /// Check if this error came from the process boundary
    pub fn is_process_error(&self) -> bool {
        matches!(self, RoboError::Spawn { .. })
    }
}
