// handlers/bots/info.rs - GET /api/bot handler

use axum::extract::{Query, State};
use serde::Deserialize;

use crate::api::{ApiResponse, ApiResult};
use crate::bots::{fetch_bot_info, BotInfo};
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct BotQuery {
    pub key: Option<String>,
    #[serde(rename = "botKey")]
    pub bot_key: Option<String>,
}

/// GET /api/bot?key= (or ?botKey=) - LINE profile of one configured bot.
/// Falls back to the bare key when LINE cannot be reached.
pub async fn bot_get(State(state): State<AppState>, Query(query): Query<BotQuery>) -> ApiResult<BotInfo> {
    let key = query
        .key
        .or(query.bot_key)
        .filter(|k| !k.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("Missing key parameter"))?;

    let bot = state
        .bots
        .resolve(&key)
        .ok_or_else(|| ApiError::not_found("Bot not found"))?;

    Ok(ApiResponse::success(fetch_bot_info(&state.line, bot).await))
}
