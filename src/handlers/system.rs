use axum::{extract::State, response::Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET / - service banner
pub async fn root() -> Json<Value> {
    Json(json!({
        "name": "Traffy Fondue Admin API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "bots": "/api/bot?key=, /api/bots",
            "richmenu": "/api/richmenu/{current,list,delete,upload,default,image,templates}",
            "health": "/health",
        }
    }))
}

/// GET /health - liveness; never calls LINE
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now(),
        "environment": state.config.environment,
        "bots": state.bots.len(),
    }))
}
