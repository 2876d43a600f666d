use std::path::PathBuf;

use anyhow::{bail, Context};
use axum::body::Bytes;
use clap::Subcommand;
use serde_json::{json, Value};

use crate::cli::utils::{format_table, output_empty_collection, output_record, output_success, output_warning};
use crate::cli::{CliContext, OutputFormat};
use crate::line::LineResponse;
use crate::richmenu::{publish, ActionBinding, MenuDraft, PublishOutcome};

#[derive(Subcommand)]
pub enum MenuCommands {
    #[command(about = "List rich menus of a bot")]
    List {
        #[arg(long, help = "Bot key")]
        bot: String,
    },

    #[command(about = "Show the menu currently served to all users")]
    Current {
        #[arg(long, help = "Bot key")]
        bot: String,
    },

    #[command(about = "Delete a rich menu")]
    Delete {
        #[arg(long, help = "Bot key")]
        bot: String,
        #[arg(long, help = "Rich menu ID")]
        id: String,
    },

    #[command(about = "Serve an existing rich menu to all users")]
    Default {
        #[arg(long, help = "Bot key")]
        bot: String,
        #[arg(long, help = "Rich menu ID")]
        id: String,
    },

    #[command(about = "Save a rich menu image to a file")]
    Download {
        #[arg(long, help = "Bot key")]
        bot: String,
        #[arg(long, help = "Rich menu ID")]
        id: String,
        #[arg(long, help = "Output file")]
        out: PathBuf,
    },

    #[command(about = "Create a rich menu, upload its image and make it the default")]
    Publish {
        #[arg(long, help = "Bot key")]
        bot: String,
        #[arg(long, help = "Menu name (the chat bar shows the first 14 characters)")]
        name: String,
        #[arg(long, help = "Menu image, at most 1MB")]
        image: PathBuf,
        #[arg(long, help = "Template ID, see `fondue templates`")]
        template: Option<String>,
        #[arg(long, requires = "template", help = "JSON file with one action per template area")]
        actions: Option<PathBuf>,
    },
}

fn upstream_failure(action: &str, response: &LineResponse) -> anyhow::Error {
    anyhow::anyhow!("{} (HTTP {}): {}", action, response.status, response.error_message())
}

pub async fn handle(cmd: MenuCommands, ctx: &CliContext, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        MenuCommands::List { bot } => {
            let bot = ctx.bot(&bot)?;
            let response = ctx.line.list_menus(&bot.token).await;
            if !response.is_ok() {
                return Err(upstream_failure("Failed to list rich menus", &response));
            }

            let menus = response
                .body
                .as_ref()
                .and_then(|b| b.get("richmenus"))
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default();
            if menus.is_empty() {
                return output_empty_collection(output_format, "richmenus", "No rich menus found");
            }

            match output_format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&json!({ "richmenus": menus }))?),
                OutputFormat::Text => {
                    let field = |menu: &Value, name: &str| menu[name].as_str().unwrap_or("-").to_string();
                    let rows: Vec<Vec<String>> = menus
                        .iter()
                        .map(|m| vec![field(m, "richMenuId"), field(m, "name"), field(m, "chatBarText")])
                        .collect();
                    println!("{}", format_table(&["ID", "NAME", "CHAT BAR"], &rows));
                }
            }
            Ok(())
        }
        MenuCommands::Current { bot } => {
            let bot = ctx.bot(&bot)?;
            let response = ctx.line.current_menu(&bot.token).await;
            let current = match response.status {
                200 => response.field("richMenuId").map(str::to_string),
                404 => None,
                _ => return Err(upstream_failure("Failed to get current menu", &response)),
            };
            output_record(output_format, &json!({ "currentMenuId": current }))
        }
        MenuCommands::Delete { bot, id } => {
            let bot = ctx.bot(&bot)?;
            let response = ctx.line.delete_menu(&bot.token, &id).await;
            if !response.is_ok() {
                return Err(upstream_failure("Failed to delete menu", &response));
            }
            output_success(output_format, &format!("Menu {} deleted", id), None)
        }
        MenuCommands::Default { bot, id } => {
            let bot = ctx.bot(&bot)?;
            let response = ctx.line.set_default(&bot.token, &id).await;
            if !response.is_ok() {
                return Err(upstream_failure("Failed to set default menu", &response));
            }
            output_success(output_format, &format!("Menu {} set as default", id), None)
        }
        MenuCommands::Download { bot, id, out } => {
            let bot = ctx.bot(&bot)?;
            let image = ctx.line.download_content(&bot.token, &id).await?;
            if image.status != 200 {
                bail!(
                    "Failed to fetch menu image (HTTP {}): {}",
                    image.status,
                    String::from_utf8_lossy(&image.bytes)
                );
            }
            tokio::fs::write(&out, &image.bytes)
                .await
                .with_context(|| format!("failed to write {}", out.display()))?;
            output_success(
                output_format,
                &format!("Saved {} bytes to {}", image.bytes.len(), out.display()),
                Some(json!({ "path": out.display().to_string(), "bytes": image.bytes.len() })),
            )
        }
        MenuCommands::Publish { bot, name, image, template, actions } => {
            let bot = ctx.bot(&bot)?;

            let bytes = tokio::fs::read(&image)
                .await
                .with_context(|| format!("failed to read {}", image.display()))?;

            let mut draft = MenuDraft::new(name.clone());
            if let Some(template) = template {
                let bindings = match actions {
                    Some(path) => {
                        let raw = tokio::fs::read_to_string(&path)
                            .await
                            .with_context(|| format!("failed to read {}", path.display()))?;
                        ActionBinding::parse_list(&raw)?
                    }
                    None => Vec::new(),
                };
                draft = draft.with_template(template, bindings);
            }
            let menu = draft.build()?;

            let outcome = publish(&ctx.line, &bot.token, &menu, Bytes::from(bytes)).await?;
            let data = serde_json::to_value(&outcome)?;
            let menu_id = outcome.menu_id();
            match &outcome {
                PublishOutcome::Published { .. } => output_success(
                    output_format,
                    &format!("Menu \"{}\" created successfully ({})", name, menu_id),
                    Some(data),
                ),
                PublishOutcome::PublishedWithoutDefault { reason, .. } => output_warning(
                    output_format,
                    &format!("Menu \"{}\" created as {} but not set as default: {}", name, menu_id, reason),
                    data,
                ),
            }
        }
    }
}
