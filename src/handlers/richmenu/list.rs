// handlers/richmenu/list.rs - GET /api/richmenu/list handler

use axum::extract::{Query, State};
use serde_json::{json, Value};

use super::BotKeyQuery;
use crate::api::{ApiResponse, ApiResult};
use crate::error::ApiError;
use crate::handlers::utils::{menu_bot, require};
use crate::state::AppState;

/// GET /api/richmenu/list?botKey= - `{richmenus: [...]}` exactly as LINE lists them
pub async fn list_get(State(state): State<AppState>, Query(query): Query<BotKeyQuery>) -> ApiResult<Value> {
    let bot = menu_bot(&state, require(&query.bot_key, "botKey")?)?;

    let response = state.line.list_menus(&bot.token).await;
    if !response.is_ok() {
        return Err(ApiError::upstream("Failed to list rich menus", &response));
    }

    let richmenus = response
        .body
        .as_ref()
        .and_then(|body| body.get("richmenus"))
        .cloned()
        .unwrap_or_else(|| json!([]));

    Ok(ApiResponse::success(json!({ "richmenus": richmenus })))
}
