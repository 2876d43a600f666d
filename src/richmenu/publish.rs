use axum::body::Bytes;
use serde::Serialize;
use thiserror::Error;

use super::model::RichMenu;
use crate::line::{LineClient, LineResponse};

/// Upper bound LINE accepts for rich menu images.
pub const MAX_IMAGE_BYTES: usize = 1_000_000;

fn kilobytes(bytes: &usize) -> usize {
    (bytes + 512) / 1024
}

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("File too large: {} KB (max 1MB)", kilobytes(.bytes))]
    ImageTooLarge { bytes: usize },

    #[error("Menu image is empty")]
    EmptyImage,

    #[error("Failed to encode rich menu: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Failed to create rich menu: {}", .0.error_message())]
    CreateFailed(LineResponse),

    #[error("Rich menu create response had no richMenuId")]
    MissingMenuId,

    #[error("Failed to upload image: {}", .0.error_message())]
    UploadFailed(LineResponse),
}

/// Result of a publish that got past the image upload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PublishOutcome {
    /// Menu created, image attached, and served to every user.
    Published {
        #[serde(rename = "richMenuId")]
        menu_id: String,
    },
    /// Menu created with its image but LINE refused to make it the default.
    #[serde(rename = "partial")]
    PublishedWithoutDefault {
        #[serde(rename = "richMenuId")]
        menu_id: String,
        reason: String,
    },
}

impl PublishOutcome {
    pub fn menu_id(&self) -> &str {
        match self {
            PublishOutcome::Published { menu_id }
            | PublishOutcome::PublishedWithoutDefault { menu_id, .. } => menu_id,
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, PublishOutcome::Published { .. })
    }
}

/// Reject images LINE would refuse, before any upstream call is made.
pub fn check_image(image: &[u8]) -> Result<(), PublishError> {
    if image.is_empty() {
        return Err(PublishError::EmptyImage);
    }
    if image.len() > MAX_IMAGE_BYTES {
        return Err(PublishError::ImageTooLarge { bytes: image.len() });
    }
    Ok(())
}

/// Create the menu shell, attach its image, then make it the default.
///
/// Steps run strictly in order since each needs the id from the first.
/// A failed upload deletes the shell so no menu is left without an image.
pub async fn publish(
    line: &LineClient,
    token: &str,
    menu: &RichMenu,
    image: Bytes,
) -> Result<PublishOutcome, PublishError> {
    check_image(&image)?;

    let definition = serde_json::to_value(menu)?;
    let created = line.create_menu(token, definition).await;
    if !created.is_ok() {
        return Err(PublishError::CreateFailed(created));
    }
    let menu_id = created
        .field("richMenuId")
        .filter(|id| !id.is_empty())
        .ok_or(PublishError::MissingMenuId)?
        .to_string();
    tracing::info!(menu = %menu.name, %menu_id, "rich menu shell created");

    let uploaded = line.upload_content(token, &menu_id, image).await;
    if !uploaded.is_ok() {
        let deleted = line.delete_menu(token, &menu_id).await;
        if deleted.is_ok() {
            tracing::warn!(%menu_id, "image upload failed, shell deleted");
        } else {
            tracing::error!(
                %menu_id,
                status = deleted.status,
                "image upload failed and shell could not be deleted: {}",
                deleted.error_message()
            );
        }
        return Err(PublishError::UploadFailed(uploaded));
    }
    tracing::info!(%menu_id, "rich menu image uploaded");

    let defaulted = line.set_default(token, &menu_id).await;
    if !defaulted.is_ok() {
        tracing::warn!(%menu_id, status = defaulted.status, "rich menu published but not set as default");
        return Ok(PublishOutcome::PublishedWithoutDefault {
            menu_id,
            reason: defaulted.error_message(),
        });
    }

    tracing::info!(%menu_id, "rich menu set as default");
    Ok(PublishOutcome::Published { menu_id })
}
