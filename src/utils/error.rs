//! Error types and handling
//!
//! Crate-wide error umbrella folding the per-module error enums, plus a
//! serializable response shape for host applications.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::capture::traits::CaptureError;
use crate::composition::engine::CompositionError;
use crate::export::types::ExportError;
use crate::recorder::clips::ClipError;
use crate::recorder::controller::RecordingError;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Recording error: {0}")]
    Recording(#[from] RecordingError),

    #[error("Capture error: {0}")]
    Capture(#[from] CaptureError),

    #[error("Clip error: {0}")]
    Clip(#[from] ClipError),

    #[error("Composition error: {0}")]
    Composition(#[from] CompositionError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),
}

/// Error response for host applications
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl From<AppError> for ErrorResponse {
    fn from(error: AppError) -> Self {
        let code = match &error {
            AppError::Io(_) => "IO_ERROR",
            AppError::Serialization(_) => "SERIALIZATION_ERROR",
            AppError::Recording(_) => "RECORDING_ERROR",
            AppError::Capture(_) => "CAPTURE_ERROR",
            AppError::Clip(_) => "CLIP_ERROR",
            AppError::Composition(_) => "COMPOSITION_ERROR",
            AppError::Export(_) => "EXPORT_ERROR",
        };

        ErrorResponse {
            code: code.to_string(),
            message: error.to_string(),
        }
    }
}

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_codes_match_variants() {
        let err = AppError::Export(ExportError::InProgress);
        let response = ErrorResponse::from(err);
        assert_eq!(response.code, "EXPORT_ERROR");
        assert!(!response.message.is_empty());
    }
}
