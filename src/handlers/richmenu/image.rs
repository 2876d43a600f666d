// handlers/richmenu/image.rs - GET /api/richmenu/image handler

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};

use super::MenuRef;
use crate::error::ApiError;
use crate::handlers::utils::{menu_bot, require};
use crate::line::LineResponse;
use crate::state::AppState;

const CACHE_CONTROL: &str = "public, max-age=3600";

/// GET /api/richmenu/image?botKey=&menuId= - relay the menu image bytes undecoded
pub async fn image_get(
    State(state): State<AppState>,
    Query(query): Query<MenuRef>,
) -> Result<Response, ApiError> {
    let bot = menu_bot(&state, require(&query.bot_key, "botKey")?)?;
    let menu_id = require(&query.menu_id, "menuId")?;

    let image = state
        .line
        .download_content(&bot.token, menu_id)
        .await
        .map_err(|e| ApiError::internal_server_error(format!("Failed to fetch menu image: {}", e)))?;

    if image.status != 200 {
        let response = LineResponse::from_text(image.status, String::from_utf8_lossy(&image.bytes).into_owned());
        return Err(ApiError::upstream("Failed to fetch menu image", &response));
    }

    let content_type = image.content_type.unwrap_or_else(|| "image/jpeg".to_string());
    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (header::CACHE_CONTROL, CACHE_CONTROL.to_string()),
        ],
        image.bytes,
    )
        .into_response())
}
