// handlers/richmenu/current.rs - GET /api/richmenu/current handler

use axum::extract::{Query, State};
use serde::Serialize;

use super::BotKeyQuery;
use crate::api::{ApiResponse, ApiResult};
use crate::error::ApiError;
use crate::handlers::utils::{menu_bot, require};
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentMenu {
    pub current_menu_id: Option<String>,
}

/// GET /api/richmenu/current?botKey= - the menu LINE serves to every user.
/// LINE answers 404 when no default is set, which maps to `null`.
pub async fn current_get(
    State(state): State<AppState>,
    Query(query): Query<BotKeyQuery>,
) -> ApiResult<CurrentMenu> {
    let bot = menu_bot(&state, require(&query.bot_key, "botKey")?)?;

    let response = state.line.current_menu(&bot.token).await;
    let current_menu_id = match response.status {
        200 => response.field("richMenuId").map(str::to_string),
        404 => None,
        _ => return Err(ApiError::upstream("Failed to get current menu", &response)),
    };

    Ok(ApiResponse::success(CurrentMenu { current_menu_id }))
}
