use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;
use tracing::error;

#[derive(Debug, ThisError)]
pub enum ReckonError {
    #[error("invalid expression")]
    InvalidExpression,

    #[error("{message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    #[error("Database error: {0}")]
    Database(#[from] SqlxError),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unexpected response status: {0}")]
    UnexpectedStatus(StatusCode),
}

impl ReckonError {
    /// Short field/message pair for a malformed create request.
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        ReckonError::Validation {
            field,
            message: message.into(),
        }
    }
}

impl IntoResponse for ReckonError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match self {
            ReckonError::Validation { field, message } => (
                StatusCode::BAD_REQUEST,
                ApiErrorBody {
                    message,
                    field: Some(field),
                },
            ),
            ReckonError::InvalidExpression => (
                StatusCode::BAD_REQUEST,
                ApiErrorBody {
                    message: "invalid expression".to_string(),
                    field: None,
                },
            ),
            ReckonError::Database(_) | ReckonError::Json(_) | ReckonError::Io(_) => {
                // Backing-store detail stays in the logs, never in the response.
                error!(error = %self, "internal error while serving request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiErrorBody {
                        message: "An internal server error occurred.".to_string(),
                        field: None,
                    },
                )
            }
            ReckonError::Http(_) | ReckonError::UrlParse(_) | ReckonError::UnexpectedStatus(_) => (
                StatusCode::BAD_GATEWAY,
                ApiErrorBody {
                    message: "Upstream service is unavailable.".to_string(),
                    field: None,
                },
            ),
        };
        (status, Json(body)).into_response()
    }
}

/// Standardized API error response body.
#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<&'static str>,
}
