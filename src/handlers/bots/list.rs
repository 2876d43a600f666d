// handlers/bots/list.rs - GET /api/bots handler

use axum::extract::State;
use futures::future::join_all;

use crate::api::{ApiResponse, ApiResult};
use crate::bots::{fetch_bot_info, BotInfo};
use crate::state::AppState;

/// GET /api/bots - profile of every configured bot, in configuration order
pub async fn bots_list(State(state): State<AppState>) -> ApiResult<Vec<BotInfo>> {
    let lookups = state.bots.iter().map(|bot| fetch_bot_info(&state.line, bot));
    Ok(ApiResponse::success(join_all(lookups).await))
}
