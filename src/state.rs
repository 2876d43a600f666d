use std::sync::Arc;

use crate::bots::BotRegistry;
use crate::config::AppConfig;
use crate::line::LineClient;

/// Shared, read-only router state. Built once in `main` and cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub bots: Arc<BotRegistry>,
    pub line: LineClient,
}

impl AppState {
    pub fn new(config: AppConfig, bots: BotRegistry, line: LineClient) -> Self {
        Self {
            config: Arc::new(config),
            bots: Arc::new(bots),
            line,
        }
    }
}
