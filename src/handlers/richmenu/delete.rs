// handlers/richmenu/delete.rs - POST /api/richmenu/delete handler

use axum::extract::{rejection::JsonRejection, State};
use axum::Json;
use serde_json::{json, Value};

use super::MenuRef;
use crate::api::{ApiResponse, ApiResult};
use crate::error::ApiError;
use crate::handlers::utils::{json_body, menu_bot, require};
use crate::state::AppState;

/// POST /api/richmenu/delete `{botKey, menuId}`. Upstream failures keep LINE's status.
pub async fn delete_post(
    State(state): State<AppState>,
    payload: Result<Json<MenuRef>, JsonRejection>,
) -> ApiResult<Value> {
    let request = json_body(payload)?;
    let bot = menu_bot(&state, require(&request.bot_key, "botKey")?)?;
    let menu_id = require(&request.menu_id, "menuId")?;

    let response = state.line.delete_menu(&bot.token, menu_id).await;
    if !response.is_ok() {
        return Err(ApiError::upstream("Failed to delete menu", &response));
    }

    tracing::info!(bot = %bot.key, %menu_id, "rich menu deleted");
    Ok(ApiResponse::success(json!({
        "success": true,
        "message": "Menu deleted successfully"
    })))
}
