//! Error types for TourForge

use thiserror::Error;

/// Main error type for TourForge operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TourForgeError {
    /// A caller-side precondition was violated (empty city set, zero
    /// iterations, empty tour, duplicate city id).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration could not be turned into a solver
    #[error("Configuration error: {0}")]
    Config(String),
}

impl TourForgeError {
    /// Shorthand for [`TourForgeError::InvalidInput`].
    pub fn invalid_input(message: impl Into<String>) -> Self {
        TourForgeError::InvalidInput(message.into())
    }

    /// Returns true for precondition violations.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, TourForgeError::InvalidInput(_))
    }
}

/// Result type alias for TourForge operations
pub type Result<T> = std::result::Result<T, TourForgeError>;
