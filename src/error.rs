use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use boomabrovers_contact::FieldError;
use serde_json::json;

/// Failures surfaced by the HTTP layer. Server-side detail never reaches the body.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("validation failed")]
    Validation(Vec<FieldError>),

    #[error("{0}")]
    NotFound(&'static str),

    #[error("missing or invalid admin token")]
    Unauthorized,

    #[error("admin access is not configured")]
    Forbidden,

    #[error("{message}: {source}")]
    Internal {
        message: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

impl ApiError {
    /// Maps a domain failure, using `message` as the public text for server errors.
    pub fn contact(err: boomabrovers_contact::Error, message: &'static str) -> Self {
        match err {
            boomabrovers_contact::Error::Validation(errors) => ApiError::Validation(errors),
            boomabrovers_contact::Error::NotFound => ApiError::NotFound("Contact not found"),
            err => ApiError::Internal {
                message,
                source: err.into(),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "errors": errors }))).into_response()
            }
            ApiError::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(json!({ "message": message }))).into_response()
            }
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "message": "Unauthorized" })),
            )
                .into_response(),
            ApiError::Forbidden => (
                StatusCode::FORBIDDEN,
                Json(json!({ "message": "Forbidden" })),
            )
                .into_response(),
            ApiError::Internal { message, source } => {
                tracing::error!(error = ?source, "{message}");

                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": message })),
                )
                    .into_response()
            }
        }
    }
}
