use serde::Serialize;

use super::registry::BotDefinition;
use crate::line::LineClient;

/// Public profile of a configured bot as shown in the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BotInfo {
    pub key: String,
    pub name: String,
    pub picture_url: Option<String>,
    pub basic_id: Option<String>,
    pub user_id: Option<String>,
}

impl BotInfo {
    /// Display value used when LINE cannot be reached or refuses the token.
    pub fn fallback(bot: &BotDefinition) -> Self {
        Self {
            key: bot.key.clone(),
            name: bot.display_name().to_string(),
            picture_url: None,
            basic_id: None,
            user_id: None,
        }
    }
}

/// Fetch the bot's LINE profile, falling back to its key on any failure.
pub async fn fetch_bot_info(line: &LineClient, bot: &BotDefinition) -> BotInfo {
    let response = line.bot_info(&bot.token).await;
    if !response.is_ok() {
        tracing::warn!(bot = %bot.key, status = response.status, "bot info unavailable, using fallback");
        return BotInfo::fallback(bot);
    }

    let owned = |field: &str| response.field(field).map(str::to_string);
    BotInfo {
        key: bot.key.clone(),
        name: owned("displayName").unwrap_or_else(|| bot.display_name().to_string()),
        picture_url: owned("pictureUrl"),
        basic_id: owned("basicId"),
        user_id: owned("userId"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{test_client, MockTransport};
    use reqwest::Method;
    use std::sync::Arc;

    #[tokio::test]
    async fn maps_line_profile_fields() {
        let mock = Arc::new(MockTransport::new());
        mock.on(
            Method::GET,
            "/v2/bot/info",
            200,
            r#"{"userId":"U123","basicId":"@traffy","displayName":"Traffy Fondue","pictureUrl":"https://profile.line-scdn.net/x"}"#,
        );

        let info = fetch_bot_info(&test_client(&mock), &BotDefinition::new("traffy_main", "t")).await;
        assert_eq!(
            info,
            BotInfo {
                key: "traffy_main".into(),
                name: "Traffy Fondue".into(),
                picture_url: Some("https://profile.line-scdn.net/x".into()),
                basic_id: Some("@traffy".into()),
                user_id: Some("U123".into()),
            }
        );
    }

    #[tokio::test]
    async fn falls_back_to_key_when_lookup_fails() {
        let mock = Arc::new(MockTransport::new());
        mock.on(Method::GET, "/v2/bot/info", 401, r#"{"message":"Authentication failed"}"#);

        let info = fetch_bot_info(&test_client(&mock), &BotDefinition::new("traffy_main", "t")).await;
        assert_eq!(info, BotInfo::fallback(&BotDefinition::new("traffy_main", "t")));
        assert_eq!(info.name, "traffy_main");
    }

    #[test]
    fn serializes_camel_case() {
        let info = BotInfo::fallback(&BotDefinition::new("k", "t"));
        let value = serde_json::to_value(&info).unwrap();
        assert!(value.get("pictureUrl").is_some());
        assert!(value.get("basicId").is_some());
        assert!(value.get("userId").is_some());
    }
}
