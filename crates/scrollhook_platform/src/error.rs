//! Platform error types

use thiserror::Error;

/// Host-related errors
///
/// Raised by host implementations when they are driven into an invalid
/// state. The tracker itself never produces these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// No element with the given identifier exists in the host
    #[error("Unknown element: {0}")]
    UnknownElement(String),

    /// An element with the given identifier already exists
    #[error("Duplicate element: {0}")]
    DuplicateElement(String),

    /// Viewport or scroll state is out of range
    #[error("Invalid viewport: {0}")]
    InvalidViewport(String),

    /// Generic host error
    #[error("Platform error: {0}")]
    Other(String),
}

/// Result type for platform operations
pub type Result<T> = std::result::Result<T, PlatformError>;
