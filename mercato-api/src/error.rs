use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use mercato_core::FulfillmentError;

/// HTTP-facing error wrapper. Each engine failure maps to a distinct status
/// code and a stable machine-readable `code`, so callers can tell "waiting
/// on seller" (NOT_READY) apart from "lost the race, reload and retry"
/// (CONFLICT) even though both answer 409.
#[derive(Debug)]
pub enum ApiError {
    Fulfillment(FulfillmentError),
    BadRequest(String),
    Internal(anyhow::Error),
}

impl From<FulfillmentError> for ApiError {
    fn from(err: FulfillmentError) -> Self {
        Self::Fulfillment(err)
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            ApiError::Fulfillment(err) => {
                let message = err.to_string();
                match err {
                    FulfillmentError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND", message),
                    FulfillmentError::Forbidden(_) => (StatusCode::FORBIDDEN, "FORBIDDEN", message),
                    FulfillmentError::InvalidTransition { .. } => (
                        StatusCode::UNPROCESSABLE_ENTITY,
                        "INVALID_TRANSITION",
                        message,
                    ),
                    FulfillmentError::NotReady(_) => (StatusCode::CONFLICT, "NOT_READY", message),
                    FulfillmentError::Conflict { .. } => (StatusCode::CONFLICT, "CONFLICT", message),
                    FulfillmentError::Store(_) => {
                        tracing::error!("Store failure: {}", message);
                        (
                            StatusCode::INTERNAL_SERVER_ERROR,
                            "STORE",
                            "Internal Server Error".to_string(),
                        )
                    }
                }
            }
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", message),
            ApiError::Internal(err) => {
                tracing::error!("Internal Server Error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    "Internal Server Error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": message,
            "code": code,
        }));

        (status, body).into_response()
    }
}
