//! Error types for the sprite-sheet pipeline

use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building a sprite sheet
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to set up the pipeline (runtime or HTTP client construction)
    #[error("Initialization failed: {0}")]
    InitializationError(String),

    /// Input was missing, empty, or not a usable list of identifiers
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A byte-source fetch failed or timed out for one identifier
    #[error("Source unavailable for '{identifier}': {reason}")]
    SourceUnavailable { identifier: String, reason: String },

    /// Fetched bytes could not be decoded as an image
    #[error("Failed to decode '{identifier}': {reason}")]
    DecodeFailure { identifier: String, reason: String },

    /// The compositor received zero images
    #[error("Cannot compose an empty batch of images")]
    EmptyBatch,

    /// The requested canvas dimensions could not be represented or allocated
    #[error("Cannot allocate a {width}x{height} canvas")]
    CanvasAllocationFailed { width: u64, height: u64 },

    /// Encoding the finished canvas failed
    #[error("Failed to encode sheet: {0}")]
    EncodeFailure(String),

    /// The persistence collaborator could not store the sheet
    #[error("Failed to store sheet: {0}")]
    StoreFailed(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
