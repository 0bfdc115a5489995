use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use derive_more::Display;
use serde_json::json;
use tracing::error;

/// Request failure taxonomy. Validation and not-found are raised before any
/// mutation; Database/Internal are raised after a rollback. Every response
/// body carries an "error" key; 500s echo the underlying message under
/// "details" (internal-grade service, clients rely on it).
#[derive(Debug, Display)]
pub enum ApiError {
    #[display(fmt = "{}", _0)]
    Validation(String),
    #[display(fmt = "Missing required fields")]
    MissingFields(&'static [&'static str]),
    #[display(fmt = "Invalid datetime format: {}", _0)]
    InvalidDatetime(chrono::ParseError),
    #[display(fmt = "{}", _0)]
    Conflict(&'static str),
    #[display(fmt = "Invalid email or password")]
    Unauthorized,
    #[display(fmt = "{} not found", _0)]
    NotFound(&'static str),
    #[display(fmt = "Database error: {}", _0)]
    Database(sqlx::Error),
    #[display(fmt = "Internal server error: {}", _0)]
    Internal(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_)
            | ApiError::MissingFields(_)
            | ApiError::InvalidDatetime(_)
            | ApiError::Conflict(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Database(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            ApiError::Validation(msg) => json!({ "error": msg }),
            ApiError::MissingFields(required) => {
                json!({ "error": "Missing required fields", "required": required })
            }
            ApiError::InvalidDatetime(e) => {
                json!({ "error": "Invalid datetime format", "details": e.to_string() })
            }
            ApiError::Conflict(msg) => json!({ "error": msg }),
            ApiError::Unauthorized => json!({ "error": "Invalid email or password" }),
            ApiError::NotFound(what) => json!({ "error": format!("{what} not found") }),
            ApiError::Database(e) => {
                error!(error = %e, "Database failure");
                json!({ "error": "Database error", "details": e.to_string() })
            }
            ApiError::Internal(msg) => {
                error!(error = %msg, "Unexpected failure");
                json!({ "error": "Internal server error", "details": msg })
            }
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        ApiError::Database(e)
    }
}

impl From<chrono::ParseError> for ApiError {
    fn from(e: chrono::ParseError) -> Self {
        ApiError::InvalidDatetime(e)
    }
}

impl From<argon2::password_hash::Error> for ApiError {
    fn from(e: argon2::password_hash::Error) -> Self {
        ApiError::Internal(e.to_string())
    }
}
