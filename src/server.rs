use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::handlers::{bots, richmenu, system};
use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let body_limit = state.config.api.max_request_size_bytes;

    let mut router = Router::new()
        // Public
        .route("/", get(system::root))
        .route("/health", get(system::health))
        .merge(bot_routes())
        .merge(richmenu_routes())
        .layer(DefaultBodyLimit::max(body_limit));

    if let Some(cors) = cors_layer(&state.config) {
        router = router.layer(cors);
    }
    if state.config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router.with_state(state)
}

fn bot_routes() -> Router<AppState> {
    Router::new()
        .route("/api/bot", get(bots::bot_get))
        .route("/api/bots", get(bots::bots_list))
}

fn richmenu_routes() -> Router<AppState> {
    Router::new()
        .route("/api/richmenu/current", get(richmenu::current_get))
        .route("/api/richmenu/list", get(richmenu::list_get))
        .route("/api/richmenu/delete", post(richmenu::delete_post))
        .route("/api/richmenu/upload", post(richmenu::upload_post))
        .route("/api/richmenu/default", post(richmenu::default_post))
        .route("/api/richmenu/image", get(richmenu::image_get))
        .route("/api/richmenu/templates", get(richmenu::templates_get))
}

fn cors_layer(config: &AppConfig) -> Option<CorsLayer> {
    let security = &config.security;
    if !security.enable_cors {
        return None;
    }
    if config.is_development() || security.cors_origins.iter().any(|o| o == "*") {
        return Some(CorsLayer::permissive());
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([Method::GET, Method::POST])
            .allow_headers(Any),
    )
}
