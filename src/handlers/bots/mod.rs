// handlers/bots/mod.rs - Bot profile lookups
pub mod info;
pub mod list;

pub use info::bot_get;
pub use list::bots_list;
