// handlers/richmenu/upload.rs - POST /api/richmenu/upload handler

use axum::body::Bytes;
use axum::extract::{
    multipart::{MultipartError, MultipartRejection},
    Multipart, State,
};
use serde::Serialize;

use crate::api::{ApiResponse, ApiResult};
use crate::error::ApiError;
use crate::handlers::utils::{menu_bot, require};
use crate::richmenu::{check_image, publish, ActionBinding, MenuDraft, PublishOutcome};
use crate::state::AppState;

/// Fields of the multipart publish form
#[derive(Debug, Default)]
struct UploadForm {
    bot_key: Option<String>,
    menu_name: Option<String>,
    menu_image: Option<Bytes>,
    template: Option<String>,
    actions: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishResponse {
    pub success: bool,
    #[serde(flatten)]
    pub outcome: PublishOutcome,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

fn form_error(e: MultipartError) -> ApiError {
    ApiError::bad_request(format!("Invalid form data: {}", e.body_text()))
}

async fn read_form(mut multipart: Multipart) -> Result<UploadForm, ApiError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart.next_field().await.map_err(form_error)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "menuImage" => form.menu_image = Some(field.bytes().await.map_err(form_error)?),
            "botKey" => form.bot_key = Some(field.text().await.map_err(form_error)?),
            "menuName" => form.menu_name = Some(field.text().await.map_err(form_error)?),
            "template" => form.template = Some(field.text().await.map_err(form_error)?),
            "actions" => form.actions = Some(field.text().await.map_err(form_error)?),
            other => tracing::debug!(field = %other, "ignoring unknown form field"),
        }
    }

    Ok(form)
}

/// POST /api/richmenu/upload (multipart: botKey, menuName, menuImage[, template, actions])
///
/// Runs the publish workflow. A menu that was created and got its image but
/// could not be made the default answers 207 with `status: "partial"`.
pub async fn upload_post(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<PublishResponse> {
    let multipart = multipart.map_err(|e| ApiError::bad_request(format!("Invalid form data: {}", e.body_text())))?;
    let form = read_form(multipart).await?;

    let bot = menu_bot(&state, require(&form.bot_key, "botKey")?)?;
    let menu_name = require(&form.menu_name, "menuName")?.trim().to_string();
    let image = form
        .menu_image
        .ok_or_else(|| ApiError::bad_request("Missing menuImage parameter"))?;
    check_image(&image)?;

    let template = form.template.filter(|t| !t.trim().is_empty());
    let actions = form.actions.filter(|a| !a.trim().is_empty());

    let mut draft = MenuDraft::new(menu_name.clone());
    match (template, actions) {
        (Some(template), actions) => {
            let bindings = match actions {
                Some(actions) => ActionBinding::parse_list(&actions)?,
                None => Vec::new(),
            };
            draft = draft.with_template(template.trim(), bindings);
        }
        (None, Some(_)) => return Err(ApiError::bad_request("actions requires template")),
        (None, None) => {}
    }
    let menu = draft.build()?;

    let outcome = publish(&state.line, &bot.token, &menu, image).await?;
    let message = format!("Menu \"{}\" created successfully", menu_name);

    let warning = match &outcome {
        PublishOutcome::PublishedWithoutDefault { reason, .. } => {
            Some(format!("Menu was created but could not be set as default: {}", reason))
        }
        PublishOutcome::Published { .. } => None,
    };
    let is_default = outcome.is_default();
    let body = PublishResponse {
        success: true,
        outcome,
        message,
        warning,
    };

    Ok(if is_default { ApiResponse::success(body) } else { ApiResponse::partial(body) })
}
