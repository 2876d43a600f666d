use reqwest::Method;
use serde_json::Value;
use std::sync::Arc;

use super::transport::{BinaryResponse, LineError, LineRequest, LineResponse, LineTransport, RequestBody};
use crate::config::LineConfig;
use axum::body::Bytes;

/// Typed entry points for the LINE Messaging API endpoints this service uses.
///
/// Each method is a single passthrough call; none of them interpret the
/// response beyond what [`LineResponse`] already normalizes.
#[derive(Clone)]
pub struct LineClient {
    transport: Arc<dyn LineTransport>,
    api_base_url: String,
    data_api_base_url: String,
}

impl LineClient {
    pub fn new(transport: Arc<dyn LineTransport>, config: &LineConfig) -> Self {
        Self {
            transport,
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            data_api_base_url: config.data_api_base_url.trim_end_matches('/').to_string(),
        }
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.api_base_url, path)
    }

    fn data_url(&self, path: &str) -> String {
        format!("{}{}", self.data_api_base_url, path)
    }

    async fn call(&self, method: Method, url: String, body: RequestBody, token: &str) -> LineResponse {
        tracing::info!(%method, %url, "calling LINE API");
        let response = self
            .transport
            .call(LineRequest {
                url,
                method,
                body,
                token: token.to_string(),
            })
            .await;
        if !response.is_ok() {
            tracing::warn!(status = response.status, "LINE API returned an error: {}", response.error_message());
        }
        response
    }

    /// GET /v2/bot/info
    pub async fn bot_info(&self, token: &str) -> LineResponse {
        self.call(Method::GET, self.api_url("/v2/bot/info"), RequestBody::Empty, token)
            .await
    }

    /// GET /v2/bot/richmenu/list
    pub async fn list_menus(&self, token: &str) -> LineResponse {
        self.call(Method::GET, self.api_url("/v2/bot/richmenu/list"), RequestBody::Empty, token)
            .await
    }

    /// GET /v2/bot/user/all/richmenu - the menu currently served to every user
    pub async fn current_menu(&self, token: &str) -> LineResponse {
        self.call(Method::GET, self.api_url("/v2/bot/user/all/richmenu"), RequestBody::Empty, token)
            .await
    }

    /// POST /v2/bot/richmenu
    pub async fn create_menu(&self, token: &str, definition: Value) -> LineResponse {
        self.call(Method::POST, self.api_url("/v2/bot/richmenu"), RequestBody::Json(definition), token)
            .await
    }

    /// POST {data}/v2/bot/richmenu/{id}/content
    pub async fn upload_content(&self, token: &str, menu_id: &str, image: Bytes) -> LineResponse {
        let url = self.data_url(&format!("/v2/bot/richmenu/{}/content", menu_id));
        self.call(Method::POST, url, RequestBody::Image(image), token).await
    }

    /// POST /v2/bot/user/all/richmenu/{id}
    pub async fn set_default(&self, token: &str, menu_id: &str) -> LineResponse {
        let url = self.api_url(&format!("/v2/bot/user/all/richmenu/{}", menu_id));
        self.call(Method::POST, url, RequestBody::Empty, token).await
    }

    /// DELETE /v2/bot/richmenu/{id}
    pub async fn delete_menu(&self, token: &str, menu_id: &str) -> LineResponse {
        let url = self.api_url(&format!("/v2/bot/richmenu/{}", menu_id));
        self.call(Method::DELETE, url, RequestBody::Empty, token).await
    }

    /// GET {data}/v2/bot/richmenu/{id}/content
    pub async fn download_content(&self, token: &str, menu_id: &str) -> Result<BinaryResponse, LineError> {
        let url = self.data_url(&format!("/v2/bot/richmenu/{}/content", menu_id));
        tracing::info!(%url, "downloading rich menu image");
        self.transport.download(&url, token).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockTransport;

    fn client(mock: &Arc<MockTransport>) -> LineClient {
        let config = LineConfig {
            api_base_url: "https://api.line.me/".to_string(),
            data_api_base_url: "https://api-data.line.me".to_string(),
            timeout_secs: None,
        };
        LineClient::new(mock.clone(), &config)
    }

    #[tokio::test]
    async fn endpoints_use_fixed_paths() {
        let mock = Arc::new(MockTransport::new());
        let line = client(&mock);

        line.list_menus("t").await;
        line.current_menu("t").await;
        line.set_default("t", "richmenu-1").await;
        line.delete_menu("t", "richmenu-1").await;
        line.upload_content("t", "richmenu-1", Bytes::from_static(b"jpeg")).await;

        let calls = mock.calls();
        let seen: Vec<(String, String)> = calls
            .iter()
            .map(|c| (c.method.to_string(), c.url.clone()))
            .collect();
        assert_eq!(
            seen,
            vec![
                ("GET".into(), "https://api.line.me/v2/bot/richmenu/list".into()),
                ("GET".into(), "https://api.line.me/v2/bot/user/all/richmenu".into()),
                ("POST".into(), "https://api.line.me/v2/bot/user/all/richmenu/richmenu-1".into()),
                ("DELETE".into(), "https://api.line.me/v2/bot/richmenu/richmenu-1".into()),
                ("POST".into(), "https://api-data.line.me/v2/bot/richmenu/richmenu-1/content".into()),
            ]
        );
        assert!(calls.iter().all(|c| c.token == "t"));
        assert!(matches!(calls[4].body, RequestBody::Image(_)));
    }
}
