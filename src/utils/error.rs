//! Error types and handling
//!
//! Common error types used across the capture engine.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Engine-wide error type
#[derive(Error, Debug)]
pub enum CamError {
    /// A component is not initialized yet; the current tick or action is
    /// skipped without user-visible effect.
    #[error("not ready: {0}")]
    NotReady(&'static str),

    /// The detection backend failed for one frame. Absorbed by the sampling
    /// loop as an empty batch.
    #[error("detection failed: {0}")]
    DetectionFailure(#[source] anyhow::Error),

    /// The frame source was absent when a user action needed it. Surfaced
    /// once as a notice; the action is aborted.
    #[error("device unavailable: {0}")]
    DeviceUnavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("encode error: {0}")]
    Encode(String),

    #[error("media sink error: {0}")]
    Sink(String),
}

/// Error response for an embedding UI
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl From<CamError> for ErrorResponse {
    fn from(error: CamError) -> Self {
        let code = match &error {
            CamError::NotReady(_) => "NOT_READY",
            CamError::DetectionFailure(_) => "DETECTION_FAILURE",
            CamError::DeviceUnavailable(_) => "DEVICE_UNAVAILABLE",
            CamError::Io(_) => "IO_ERROR",
            CamError::Encode(_) => "ENCODE_ERROR",
            CamError::Sink(_) => "SINK_ERROR",
        };

        ErrorResponse {
            code: code.to_string(),
            message: error.to_string(),
        }
    }
}

/// Result type alias using CamError
pub type CamResult<T> = Result<T, CamError>;
