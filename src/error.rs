use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use sqlx::Error as SqlxError;
use std::path::PathBuf;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum VitrineError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("database error: {0}")]
    Database(#[from] SqlxError),

    #[error("secret file not found at {0}")]
    SecretFileMissing(PathBuf),

    #[error("failed to decode admin password: {0}")]
    SecretDecode(#[from] base64::DecodeError),

    #[error("decoded admin password is not valid UTF-8")]
    SecretNotUtf8(#[from] std::string::FromUtf8Error),

    #[error("secret key must be at least 32 bytes")]
    WeakSecretKey,

    #[error("invalid price: {0:?}")]
    InvalidPrice(String),

    #[error("invalid file type: {0:?}")]
    UnsupportedImageType(String),

    #[error("multipart error: {0}")]
    Multipart(#[from] MultipartError),
}

impl VitrineError {
    /// User-facing text for failures that become a flash message rather
    /// than an error response.
    pub fn flash_text(&self) -> String {
        match self {
            VitrineError::InvalidPrice(_) => "Invalid price. Please enter a number.".to_string(),
            VitrineError::UnsupportedImageType(_) => {
                "Invalid file type. Allowed types: png, jpg, jpeg, gif.".to_string()
            }
            other => format!("Error: {other}"),
        }
    }
}

impl IntoResponse for VitrineError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match &self {
            VitrineError::Multipart(e) => (e.status(), "Request body could not be read."),
            VitrineError::InvalidPrice(_) | VitrineError::UnsupportedImageType(_) => {
                (StatusCode::BAD_REQUEST, "Invalid form submission.")
            }
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An internal server error occurred.",
            ),
        };
        (status, Html(format!("<!doctype html><p>{body}</p>"))).into_response()
    }
}
