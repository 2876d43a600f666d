pub mod bots;
pub mod menu;
pub mod templates;
