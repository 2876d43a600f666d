use axum::extract::rejection::JsonRejection;
use axum::Json;

use crate::bots::BotDefinition;
use crate::error::ApiError;
use crate::state::AppState;

/// Return a required request parameter or a 400 naming it.
pub fn require<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str, ApiError> {
    match value.as_deref() {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ApiError::bad_request(format!("Missing {} parameter", name))),
    }
}

/// Resolve the bot for a rich-menu operation. Must succeed before any LINE call.
pub fn menu_bot<'a>(state: &'a AppState, key: &str) -> Result<&'a BotDefinition, ApiError> {
    state.bots.resolve(key).ok_or_else(|| {
        tracing::warn!(bot = %key, "rejected unknown bot key");
        ApiError::bad_request("Invalid bot key")
    })
}

/// Unwrap a JSON body, reporting malformed input in the shared error shape.
pub fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ApiError::bad_request(format!("Invalid JSON body: {}", rejection.body_text())))
}
