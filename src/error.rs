use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("No authentication token found.")]
    MissingToken,

    #[error("Not authorized ({0}). Please log in again.")]
    Unauthorized(StatusCode),

    #[error("API error {status}: {message}")]
    Api { status: StatusCode, message: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Export failed: {0}")]
    Export(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found")]
    NotFound,

    #[error("Screen halted after an authorization failure; remount to retry")]
    Halted,
}

/// Error body the API returns on non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorResponse {
    /// The `message` field of a JSON error body, else the trimmed body.
    pub fn message_of(body: &str) -> String {
        serde_json::from_str::<ErrorResponse>(body)
            .ok()
            .and_then(|e| e.message)
            .unwrap_or_else(|| body.trim().to_string())
    }
}

impl AppError {
    /// Builds the error for a non-2xx response from its status and raw body.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return AppError::Unauthorized(status);
        }
        if status == StatusCode::NOT_FOUND {
            return AppError::NotFound;
        }
        AppError::Api {
            status,
            message: ErrorResponse::message_of(body),
        }
    }

    /// Missing or rejected credentials.
    pub fn is_auth(&self) -> bool {
        matches!(self, AppError::MissingToken | AppError::Unauthorized(_))
    }

    /// Message shown to the operator when an auth form fails.
    pub fn auth_message(&self) -> String {
        match self {
            AppError::Api { message, .. } if !message.is_empty() => message.clone(),
            AppError::BadRequest(msg) => msg.clone(),
            _ => "Something went wrong. Try again!".to_string(),
        }
    }
}
