use async_trait::async_trait;
use axum::body::Bytes;
use reqwest::{header, Client, Method};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LineError {
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

/// Outbound body of a LINE call. `Image` switches the content type to
/// `image/jpeg` regardless of the actual source format.
#[derive(Debug, Clone)]
pub enum RequestBody {
    Empty,
    Json(Value),
    Image(Bytes),
}

impl RequestBody {
    pub fn content_type(&self) -> &'static str {
        match self {
            RequestBody::Image(_) => "image/jpeg",
            RequestBody::Empty | RequestBody::Json(_) => "application/json",
        }
    }
}

#[derive(Debug, Clone)]
pub struct LineRequest {
    pub url: String,
    pub method: Method,
    pub body: RequestBody,
    pub token: String,
}

/// Normalized result of a LINE call.
///
/// `body` is the decoded JSON when the response text parses, `raw` always
/// holds the text. Transport failures are folded into `status: 500` with the
/// error message in `raw`, so call sites only ever branch on `status`.
#[derive(Debug, Clone, PartialEq)]
pub struct LineResponse {
    pub status: u16,
    pub body: Option<Value>,
    pub raw: String,
}

impl LineResponse {
    pub fn from_text(status: u16, raw: String) -> Self {
        let body = serde_json::from_str(&raw).ok();
        Self { status, body, raw }
    }

    pub fn transport_failure(message: impl Into<String>) -> Self {
        Self {
            status: 500,
            body: None,
            raw: message.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    /// Read a string field from the decoded body.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.body.as_ref()?.get(name)?.as_str()
    }

    /// Upstream error message: LINE's `message` field when present, else the raw text.
    pub fn error_message(&self) -> String {
        match self.field("message") {
            Some(message) => message.to_string(),
            None => self.raw.clone(),
        }
    }
}

/// Undecoded response, used to relay menu images.
#[derive(Debug, Clone)]
pub struct BinaryResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// Seam between the LINE client and the network.
#[async_trait]
pub trait LineTransport: Send + Sync {
    /// Issue a call and normalize the outcome. Never fails outward.
    async fn call(&self, request: LineRequest) -> LineResponse;

    /// Fetch a binary resource without decoding it.
    async fn download(&self, url: &str, token: &str) -> Result<BinaryResponse, LineError>;
}

/// reqwest-backed transport used in production.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(timeout: Option<Duration>) -> Result<Self, LineError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    async fn send(&self, request: LineRequest) -> Result<LineResponse, LineError> {
        let content_type = request.body.content_type();
        let mut builder = self
            .client
            .request(request.method, &request.url)
            .bearer_auth(&request.token)
            .header(header::CONTENT_TYPE, content_type);

        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.body(value.to_string()),
            RequestBody::Image(bytes) => builder.body(bytes),
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let raw = response.text().await?;

        Ok(LineResponse::from_text(status, raw))
    }
}

#[async_trait]
impl LineTransport for HttpTransport {
    async fn call(&self, request: LineRequest) -> LineResponse {
        let method = request.method.clone();
        let url = request.url.clone();

        match self.send(request).await {
            Ok(response) => {
                tracing::debug!(%method, %url, status = response.status, "LINE call completed");
                response
            }
            Err(e) => {
                tracing::warn!(%method, %url, "LINE call failed: {}", e);
                LineResponse::transport_failure(e.to_string())
            }
        }
    }

    async fn download(&self, url: &str, token: &str) -> Result<BinaryResponse, LineError> {
        let response = self.client.get(url).bearer_auth(token).send().await?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().await?;

        tracing::debug!(%url, status, size = bytes.len(), "LINE content downloaded");

        Ok(BinaryResponse {
            status,
            content_type,
            bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_text_decodes_json_when_possible() {
        let response = LineResponse::from_text(200, r#"{"richMenuId":"richmenu-123"}"#.to_string());
        assert!(response.is_ok());
        assert_eq!(response.field("richMenuId"), Some("richmenu-123"));

        let plain = LineResponse::from_text(502, "Bad Gateway".to_string());
        assert_eq!(plain.body, None);
        assert_eq!(plain.error_message(), "Bad Gateway");
    }

    #[test]
    fn error_message_prefers_upstream_message_field() {
        let response = LineResponse {
            status: 400,
            body: Some(json!({"message": "The request body has 1 error(s)"})),
            raw: "ignored".to_string(),
        };
        assert_eq!(response.error_message(), "The request body has 1 error(s)");
    }

    #[test]
    fn image_body_is_always_jpeg() {
        assert_eq!(RequestBody::Image(Bytes::from_static(b"\x89PNG")).content_type(), "image/jpeg");
        assert_eq!(RequestBody::Empty.content_type(), "application/json");
        assert_eq!(RequestBody::Json(json!({})).content_type(), "application/json");
    }

    #[tokio::test]
    async fn unreachable_host_becomes_status_500() {
        let transport = HttpTransport::new(Some(Duration::from_secs(2))).expect("client");
        let response = transport
            .call(LineRequest {
                url: "http://127.0.0.1:1/v2/bot/info".to_string(),
                method: Method::GET,
                body: RequestBody::Empty,
                token: "token".to_string(),
            })
            .await;

        assert_eq!(response.status, 500);
        assert!(response.body.is_none());
        assert!(!response.raw.is_empty());
    }
}
