use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read bot config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid bot config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Duplicate bot key: {0}")]
    DuplicateKey(String),

    #[error("Bot key must not be empty")]
    EmptyKey,

    #[error("Bot '{0}' has no channel access token")]
    MissingToken(String),

    #[error("No bots configured: set BOTS_CONFIG or LINE_BOT_KEY and LINE_CHANNEL_ACCESS_TOKEN")]
    NoBots,
}

/// A LINE Official Account the service can act on behalf of.
#[derive(Clone, Deserialize)]
pub struct BotDefinition {
    pub key: String,
    pub token: String,
    #[serde(default)]
    pub secret: Option<String>,
    /// Display name used when LINE's bot info cannot be fetched
    #[serde(default)]
    pub name: Option<String>,
}

impl BotDefinition {
    pub fn new(key: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            token: token.into(),
            secret: None,
            name: None,
        }
    }

    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.key)
    }
}

// Credentials stay out of logs
impl std::fmt::Debug for BotDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotDefinition")
            .field("key", &self.key)
            .field("token", &"<redacted>")
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .field("name", &self.name)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct BotFile {
    bots: Vec<BotDefinition>,
}

/// Read-only map from bot key to its definition, built once at startup.
#[derive(Debug, Clone, Default)]
pub struct BotRegistry {
    bots: Vec<BotDefinition>,
}

impl BotRegistry {
    pub fn new(bots: Vec<BotDefinition>) -> Result<Self, ConfigError> {
        let mut seen = HashSet::new();
        for bot in &bots {
            if bot.key.trim().is_empty() {
                return Err(ConfigError::EmptyKey);
            }
            if bot.token.trim().is_empty() {
                return Err(ConfigError::MissingToken(bot.key.clone()));
            }
            if !seen.insert(bot.key.as_str()) {
                return Err(ConfigError::DuplicateKey(bot.key.clone()));
            }
        }
        Ok(Self { bots })
    }

    /// Parse `bots: [{key, token, secret?, name?}]` from YAML (JSON is accepted too).
    pub fn from_yaml_str(input: &str) -> Result<Self, ConfigError> {
        let file: BotFile = serde_yaml::from_str(input)?;
        Self::new(file.bots)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&contents)
    }

    /// Single-bot registry from `LINE_BOT_KEY` and `LINE_CHANNEL_ACCESS_TOKEN`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let (Ok(key), Ok(token)) = (
            std::env::var("LINE_BOT_KEY"),
            std::env::var("LINE_CHANNEL_ACCESS_TOKEN"),
        ) else {
            return Err(ConfigError::NoBots);
        };

        let mut bot = BotDefinition::new(key, token);
        if let Ok(secret) = std::env::var("LINE_CHANNEL_SECRET") {
            bot = bot.with_secret(secret);
        }
        if let Ok(name) = std::env::var("LINE_BOT_NAME") {
            bot = bot.with_name(name);
        }
        Self::new(vec![bot])
    }

    /// Load from the configured file, else from the environment.
    pub fn load(bots_file: Option<&Path>) -> Result<Self, ConfigError> {
        let registry = match bots_file {
            Some(path) => Self::from_file(path)?,
            None => Self::from_env()?,
        };
        if registry.is_empty() {
            return Err(ConfigError::NoBots);
        }
        Ok(registry)
    }

    pub fn resolve(&self, key: &str) -> Option<&BotDefinition> {
        self.bots.iter().find(|bot| bot.key == key)
    }

    pub fn token(&self, key: &str) -> Option<&str> {
        self.resolve(key).map(|bot| bot.token.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &BotDefinition> {
        self.bots.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.bots.iter().map(|bot| bot.key.as_str())
    }

    pub fn len(&self) -> usize {
        self.bots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const YAML: &str = r#"
bots:
  - key: traffy_main
    token: main-token
    secret: main-secret
    name: Traffy Fondue
  - key: traffy_dev
    token: dev-token
"#;

    #[test]
    fn loads_bots_in_configured_order() {
        let registry = BotRegistry::from_yaml_str(YAML).unwrap();
        assert_eq!(registry.keys().collect::<Vec<_>>(), vec!["traffy_main", "traffy_dev"]);
        assert_eq!(registry.token("traffy_main"), Some("main-token"));
        assert_eq!(registry.resolve("traffy_dev").unwrap().display_name(), "traffy_dev");
        assert_eq!(registry.resolve("traffy_main").unwrap().display_name(), "Traffy Fondue");
    }

    #[test]
    fn unknown_key_never_yields_a_token() {
        let registry = BotRegistry::from_yaml_str(YAML).unwrap();
        for key in ["nope", "", "TRAFFY_MAIN", "traffy_main ", "traffy"] {
            assert_eq!(registry.token(key), None, "key {:?} resolved", key);
        }
    }

    #[test]
    fn accepts_json_documents() {
        let registry =
            BotRegistry::from_yaml_str(r#"{"bots": [{"key": "a", "token": "t"}]}"#).unwrap();
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn rejects_duplicate_and_blank_entries() {
        let dup = BotRegistry::new(vec![BotDefinition::new("a", "t1"), BotDefinition::new("a", "t2")]);
        assert!(matches!(dup, Err(ConfigError::DuplicateKey(k)) if k == "a"));

        let blank_token = BotRegistry::new(vec![BotDefinition::new("a", " ")]);
        assert!(matches!(blank_token, Err(ConfigError::MissingToken(_))));

        let blank_key = BotRegistry::new(vec![BotDefinition::new("", "t")]);
        assert!(matches!(blank_key, Err(ConfigError::EmptyKey)));
    }

    #[test]
    fn debug_output_redacts_credentials() {
        let bot = BotDefinition::new("a", "super-secret-token").with_secret("shh");
        let printed = format!("{:?}", bot);
        assert!(!printed.contains("super-secret-token"));
        assert!(!printed.contains("shh"));
        assert!(printed.contains("<redacted>"));
    }
}
