use async_trait::async_trait;
use axum::body::Bytes;
use reqwest::Method;
use std::sync::{Arc, Mutex};

use crate::bots::{BotDefinition, BotRegistry};
use crate::config::AppConfig;
use crate::line::{BinaryResponse, LineClient, LineError, LineRequest, LineResponse, LineTransport};
use crate::state::AppState;

struct Rule {
    method: Method,
    path: String,
    response: LineResponse,
}

/// Recording transport with canned responses matched by method and URL suffix.
/// Unmatched calls answer 200 `{}`.
#[derive(Default)]
pub struct MockTransport {
    rules: Mutex<Vec<Rule>>,
    calls: Mutex<Vec<LineRequest>>,
    image: Mutex<Option<BinaryResponse>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(&self, method: Method, path: &str, status: u16, raw: &str) -> &Self {
        self.rules.lock().unwrap().push(Rule {
            method,
            path: path.to_string(),
            response: LineResponse::from_text(status, raw.to_string()),
        });
        self
    }

    pub fn on_failure(&self, method: Method, path: &str, message: &str) -> &Self {
        self.rules.lock().unwrap().push(Rule {
            method,
            path: path.to_string(),
            response: LineResponse::transport_failure(message),
        });
        self
    }

    pub fn with_image(&self, status: u16, content_type: &str, bytes: &'static [u8]) -> &Self {
        *self.image.lock().unwrap() = Some(BinaryResponse {
            status,
            content_type: Some(content_type.to_string()),
            bytes: Bytes::from_static(bytes),
        });
        self
    }

    pub fn calls(&self) -> Vec<LineRequest> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of recorded calls with this method whose URL ends with `path`.
    pub fn count(&self, method: Method, path: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.method == method && c.url.ends_with(path))
            .count()
    }
}

#[async_trait]
impl LineTransport for MockTransport {
    async fn call(&self, request: LineRequest) -> LineResponse {
        let response = self
            .rules
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.method == request.method && request.url.ends_with(&r.path))
            .map(|r| r.response.clone())
            .unwrap_or_else(|| LineResponse::from_text(200, "{}".to_string()));
        self.calls.lock().unwrap().push(request);
        response
    }

    async fn download(&self, url: &str, token: &str) -> Result<BinaryResponse, LineError> {
        self.calls.lock().unwrap().push(LineRequest {
            url: url.to_string(),
            method: Method::GET,
            body: crate::line::RequestBody::Empty,
            token: token.to_string(),
        });
        let image = self.image.lock().unwrap().clone();
        Ok(image.unwrap_or(BinaryResponse {
            status: 404,
            content_type: Some("application/json".to_string()),
            bytes: Bytes::from_static(br#"{"message":"Not found"}"#),
        }))
    }
}

pub fn test_bots() -> BotRegistry {
    BotRegistry::new(vec![
        BotDefinition::new("traffy_main", "main-token"),
        BotDefinition::new("traffy_dev", "dev-token").with_name("Traffy Dev"),
    ])
    .expect("valid test registry")
}

pub fn test_client(mock: &Arc<MockTransport>) -> LineClient {
    LineClient::new(mock.clone(), &AppConfig::development().line)
}

/// Router state wired to a mock transport and the two test bots.
pub fn test_state(mock: &Arc<MockTransport>) -> AppState {
    AppState::new(AppConfig::development(), test_bots(), test_client(mock))
}
