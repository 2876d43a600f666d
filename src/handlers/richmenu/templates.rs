// handlers/richmenu/templates.rs - GET /api/richmenu/templates handler

use serde_json::{json, Value};

use crate::api::{ApiResponse, ApiResult};
use crate::richmenu::template;

/// GET /api/richmenu/templates - built-in layouts with pixel and percent bounds
pub async fn templates_get() -> ApiResult<Value> {
    let templates: Vec<_> = template::catalog().iter().map(|t| t.view()).collect();
    Ok(ApiResponse::success(json!({ "templates": templates })))
}
