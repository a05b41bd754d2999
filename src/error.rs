//! Error types shared across the capture pipeline.

use thiserror::Error;

/// Failure of the OCR / extraction stage.
///
/// "Nothing matched" is not an error; it is an empty result.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("OCR engine not available: {0}")]
    EngineUnavailable(String),

    #[error("OCR engine failed: {0}")]
    EngineFailed(String),

    #[error("Unreadable image: {0}")]
    UnreadableImage(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid extraction pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Failure of a capture request, from selection to extracted data.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("Please select an area before capturing.")]
    EmptySelection,

    #[error("Screen capture failed: {0}")]
    Capture(anyhow::Error),

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractionError),
}
