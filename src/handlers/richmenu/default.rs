// handlers/richmenu/default.rs - POST /api/richmenu/default handler

use axum::extract::{rejection::JsonRejection, State};
use axum::Json;
use serde_json::{json, Value};

use super::MenuRef;
use crate::api::{ApiResponse, ApiResult};
use crate::error::ApiError;
use crate::handlers::utils::{json_body, menu_bot, require};
use crate::state::AppState;

/// POST /api/richmenu/default `{botKey, menuId}` - serve an existing menu to every user
pub async fn default_post(
    State(state): State<AppState>,
    payload: Result<Json<MenuRef>, JsonRejection>,
) -> ApiResult<Value> {
    let request = json_body(payload)?;
    let bot = menu_bot(&state, require(&request.bot_key, "botKey")?)?;
    let menu_id = require(&request.menu_id, "menuId")?;

    let response = state.line.set_default(&bot.token, menu_id).await;
    if !response.is_ok() {
        return Err(ApiError::upstream("Failed to set default menu", &response));
    }

    Ok(ApiResponse::success(json!({
        "success": true,
        "message": "Menu set as default"
    })))
}
