// handlers/richmenu/mod.rs - Rich menu passthrough and publish handlers
//
// Every handler resolves the bot key before touching LINE; an unknown key
// is a 400 "Invalid bot key".
use serde::Deserialize;

pub mod current;
pub mod default;
pub mod delete;
pub mod image;
pub mod list;
pub mod templates;
pub mod upload;

pub use current::current_get;
pub use default::default_post;
pub use delete::delete_post;
pub use image::image_get;
pub use list::list_get;
pub use templates::templates_get;
pub use upload::upload_post;

#[derive(Debug, Deserialize)]
pub struct BotKeyQuery {
    #[serde(rename = "botKey")]
    pub bot_key: Option<String>,
}

/// `{botKey, menuId}` as sent in query strings and JSON bodies
#[derive(Debug, Deserialize)]
pub struct MenuRef {
    #[serde(rename = "botKey")]
    pub bot_key: Option<String>,
    #[serde(rename = "menuId")]
    pub menu_id: Option<String>,
}
