pub mod info;
pub mod registry;

pub use info::{fetch_bot_info, BotInfo};
pub use registry::{BotDefinition, BotRegistry, ConfigError};
