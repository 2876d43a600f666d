// handlers/mod.rs - HTTP surface of the admin service
//
// bots      -> /api/bot, /api/bots        (unknown bot: 404 "Bot not found")
// richmenu  -> /api/richmenu/*            (unknown bot: 400 "Invalid bot key")
// system    -> /, /health
pub mod bots;
pub mod richmenu;
pub mod system;
pub mod utils;
