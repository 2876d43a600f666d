// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use serde_json::{json, Value};

use crate::line::LineResponse;
use crate::richmenu::{DraftError, PublishError};

/// Coarse error category reported to clients alongside the message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    ClientError,
    UpstreamError,
    InternalError,
}

/// HTTP API error shared by every handler
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),

    // 404 Not Found
    NotFound(String),

    // LINE answered with a non-200 status. `status` is what LINE sent; the
    // HTTP response uses it when it is an error status, else 502.
    Upstream {
        status: u16,
        message: String,
        details: Option<Value>,
    },

    // 500 Internal Server Error
    InternalServerError(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) => 400,
            ApiError::NotFound(_) => 404,
            ApiError::Upstream { status, .. } if (400..=599).contains(status) => *status,
            ApiError::Upstream { .. } => 502,
            ApiError::InternalServerError(_) => 500,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::BadRequest(_) | ApiError::NotFound(_) => ErrorKind::ClientError,
            ApiError::Upstream { .. } => ErrorKind::UpstreamError,
            ApiError::InternalServerError(_) => ErrorKind::InternalError,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::Upstream { message, .. } => message,
            ApiError::InternalServerError(msg) => msg,
        }
    }

    /// Convert to JSON response body: `{error, kind, details?, upstreamStatus?}`
    pub fn to_json(&self) -> Value {
        let mut body = json!({
            "error": self.message(),
            "kind": self.kind(),
        });

        if let ApiError::Upstream { status, details, .. } = self {
            body["upstreamStatus"] = json!(status);
            if let Some(details) = details {
                body["details"] = details.clone();
            }
        }

        body
    }
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }

    /// Build an upstream error from a failed LINE call, carrying its status
    /// code and the upstream message as `details`.
    pub fn upstream(message: impl Into<String>, response: &LineResponse) -> Self {
        ApiError::Upstream {
            status: response.status,
            message: message.into(),
            details: Some(Value::String(response.error_message())),
        }
    }
}

impl From<DraftError> for ApiError {
    fn from(err: DraftError) -> Self {
        ApiError::bad_request(err.to_string())
    }
}

impl From<PublishError> for ApiError {
    fn from(err: PublishError) -> Self {
        match err {
            PublishError::ImageTooLarge { .. } | PublishError::EmptyImage => {
                ApiError::bad_request(err.to_string())
            }
            PublishError::Encode(e) => {
                tracing::error!("Failed to encode rich menu: {}", e);
                ApiError::internal_server_error("Failed to encode rich menu")
            }
            PublishError::CreateFailed(response) => {
                ApiError::upstream("Failed to create rich menu", &response)
            }
            PublishError::MissingMenuId => {
                tracing::error!("Rich menu create returned 200 without a richMenuId");
                ApiError::Upstream {
                    status: 200,
                    message: "Failed to create rich menu".to_string(),
                    details: Some(Value::String("richMenuId missing from response".to_string())),
                }
            }
            PublishError::UploadFailed(response) => {
                ApiError::upstream("Failed to upload image", &response)
            }
        }
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_error_body_has_no_details() {
        let err = ApiError::bad_request("Invalid bot key");
        let body = err.to_json();
        assert_eq!(body["error"], "Invalid bot key");
        assert_eq!(body["kind"], "client_error");
        assert!(body.get("details").is_none());
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn upstream_error_relays_status_and_message() {
        let response = LineResponse {
            status: 400,
            body: Some(json!({"message": "Image is too big"})),
            raw: r#"{"message":"Image is too big"}"#.to_string(),
        };
        let err = ApiError::upstream("Failed to upload image", &response);
        assert_eq!(err.status_code(), 400);

        let body = err.to_json();
        assert_eq!(body["error"], "Failed to upload image");
        assert_eq!(body["details"], "Image is too big");
        assert_eq!(body["upstreamStatus"], 400);
        assert_eq!(body["kind"], "upstream_error");
    }

    #[test]
    fn non_error_upstream_status_is_reported_but_answered_as_502() {
        let response = LineResponse::from_text(302, "moved".to_string());
        let err = ApiError::upstream("Failed to list rich menus", &response);
        assert_eq!(err.status_code(), 502);
        assert_eq!(err.to_json()["upstreamStatus"], 302);
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);

        let err = ApiError::from(PublishError::MissingMenuId);
        assert_eq!(err.status_code(), 502);
        assert_eq!(err.to_json()["upstreamStatus"], 200);
    }

    #[test]
    fn transport_failure_keeps_500() {
        let response = LineResponse::transport_failure("connection refused");
        let err = ApiError::upstream("Failed to create rich menu", &response);
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.to_json()["details"], "connection refused");
    }
}
