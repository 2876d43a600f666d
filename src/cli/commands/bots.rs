use clap::Subcommand;
use futures::future::join_all;

use crate::bots::fetch_bot_info;
use crate::cli::utils::{format_table, output_record};
use crate::cli::{CliContext, OutputFormat};

#[derive(Subcommand)]
pub enum BotsCommands {
    #[command(about = "List configured bots with their LINE display names")]
    List,

    #[command(about = "Show the LINE profile of one bot")]
    Show {
        #[arg(help = "Bot key")]
        key: String,
    },
}

pub async fn handle(cmd: BotsCommands, ctx: &CliContext, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        BotsCommands::List => {
            let infos = join_all(ctx.bots.iter().map(|bot| fetch_bot_info(&ctx.line, bot))).await;
            match output_format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&infos)?),
                OutputFormat::Text => {
                    let rows: Vec<Vec<String>> = infos
                        .iter()
                        .map(|info| {
                            vec![
                                info.key.clone(),
                                info.name.clone(),
                                info.basic_id.clone().unwrap_or_else(|| "-".to_string()),
                            ]
                        })
                        .collect();
                    println!("{}", format_table(&["KEY", "NAME", "BASIC ID"], &rows));
                }
            }
            Ok(())
        }
        BotsCommands::Show { key } => {
            let bot = ctx.bot(&key)?;
            let info = fetch_bot_info(&ctx.line, bot).await;
            output_record(output_format, &serde_json::to_value(&info)?)
        }
    }
}
