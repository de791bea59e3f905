//! Error handling for the application

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::pricing::{PriceResult, PricingError};

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            // Caller input problems go back as data, not as server failures
            AppError::Pricing(err) => {
                tracing::debug!(error_type = err.kind(), "Pricing request rejected: {}", err);
                (StatusCode::UNPROCESSABLE_ENTITY, Json(PriceResult::from(err))).into_response()
            }
            AppError::Config(msg) => {
                tracing::error!("Config error: {}", msg);
                internal_error()
            }
            AppError::Io(e) => {
                tracing::error!("I/O error: {}", e);
                internal_error()
            }
            AppError::Json(e) => {
                tracing::error!("JSON error: {}", e);
                internal_error()
            }
        }
    }
}

fn internal_error() -> Response {
    let body = serde_json::json!({
        "success": false,
        "error": "Internal error",
        "error_type": "internal",
    });
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}

pub type Result<T> = std::result::Result<T, AppError>;
