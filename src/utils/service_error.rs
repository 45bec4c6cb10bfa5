// Service error type shared by handlers and middleware.
// Every variant maps to an HTTP status plus a JSON `{"error": ...}` body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Missing required fields")]
    MissingFields,

    #[error("Not found")]
    NotFound,

    #[error("Campaign not found")]
    CampaignNotFound,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Account blocked")]
    AccountBlocked,

    #[error("Trial expired")]
    TrialExpired,

    #[error("Internal server error")]
    InternalError,
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ServiceError::DatabaseError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": msg }),
            ),
            ServiceError::ValidationError(msg) => {
                (StatusCode::BAD_REQUEST, json!({ "error": msg }))
            },
            ServiceError::MissingFields => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Missing required fields" }),
            ),
            ServiceError::NotFound => (
                StatusCode::NOT_FOUND,
                json!({ "error": "Resource not found" }),
            ),
            // The dispatcher polls on this body shape; `status` is part of
            // the wire contract, not decoration.
            ServiceError::CampaignNotFound => (
                StatusCode::NOT_FOUND,
                json!({ "error": "Campaign not found", "status": "not_found" }),
            ),
            ServiceError::Unauthorized => {
                (StatusCode::UNAUTHORIZED, json!({ "error": "Unauthorized" }))
            },
            ServiceError::AccountBlocked => (
                StatusCode::FORBIDDEN,
                json!({
                    "error": "account_blocked",
                    "message": "This account has been blocked. Contact support.",
                }),
            ),
            ServiceError::TrialExpired => (
                StatusCode::PAYMENT_REQUIRED,
                json!({
                    "error": "trial_expired",
                    "redirect": "/escolher-plano",
                }),
            ),
            ServiceError::InternalError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Internal server error" }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

// Conversion from various error types
impl From<diesel::result::Error> for ServiceError {
    fn from(error: diesel::result::Error) -> Self {
        match error {
            diesel::result::Error::NotFound => ServiceError::NotFound,
            _ => ServiceError::DatabaseError(error.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(error: validator::ValidationErrors) -> Self {
        ServiceError::ValidationError(error.to_string())
    }
}
