pub mod api;
pub mod bots;
pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;
pub mod line;
pub mod richmenu;
pub mod server;
pub mod state;

#[cfg(test)]
pub mod testing;
