use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use boomabrovers_contact::{ContactForm, FieldError};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::{Map, Value, json};

use crate::{auth::Admin, error::ApiError, routes::AppState};

const SUBMITTED_MESSAGE: &str = "Thank you for your message. We will get back to you soon!";

fn unreadable_body() -> ApiError {
    ApiError::Validation(vec![FieldError::new(
        "body",
        "Request body must be a JSON object",
    )])
}

/// Only JSON objects are read. Field values of any JSON type then become text.
fn body<T: DeserializeOwned>(
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<T, ApiError> {
    let Json(object) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Unreadable request body");

        unreadable_body()
    })?;

    serde_json::from_value(Value::Object(object)).map_err(|err| {
        tracing::debug!(error = %err, "Unexpected request body shape");

        unreadable_body()
    })
}

/// POST /api/contact
pub async fn submit(
    State(app_state): State<AppState>,
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let input: ContactForm = body(payload)?;

    let contact = app_state.command.submit(input).await.map_err(|err| {
        ApiError::contact(err, "Failed to submit contact form. Please try again later.")
    })?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": SUBMITTED_MESSAGE,
            "contact": contact,
        })),
    ))
}

/// GET /api/contact
pub async fn list(
    _admin: Admin,
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let contacts = app_state
        .query
        .all()
        .await
        .map_err(|err| ApiError::contact(err, "Failed to fetch contact submissions"))?;

    Ok(Json(contacts))
}

#[derive(Deserialize)]
pub struct StatusInput {
    #[serde(default, deserialize_with = "boomabrovers_contact::any_text")]
    pub status: String,
}

/// PATCH /api/contact/{id}/status
pub async fn update_status(
    _admin: Admin,
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let input: StatusInput = body(payload)?;

    let contact = app_state
        .command
        .update_status(&id, &input.status)
        .await
        .map_err(|err| ApiError::contact(err, "Failed to update contact status"))?;

    Ok(Json(contact))
}
