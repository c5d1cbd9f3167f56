//! Brush persistence error types.

/// Errors that can occur when loading or saving a brush record.
#[derive(Debug, thiserror::Error)]
pub enum BrushError {
    /// Failed to read the brush record from disk.
    #[error("failed to read brush record: {0}")]
    ReadError(#[source] std::io::Error),

    /// Failed to write the brush record to disk.
    #[error("failed to write brush record: {0}")]
    WriteError(#[source] std::io::Error),

    /// Failed to parse RON content.
    #[error("failed to parse brush record: {0}")]
    ParseError(#[source] ron::error::SpannedError),

    /// Failed to serialize the brush to RON.
    #[error("failed to serialize brush record: {0}")]
    SerializeError(#[source] ron::Error),
}
