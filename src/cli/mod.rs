pub mod commands;
pub mod utils;

use std::sync::Arc;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::bots::{BotDefinition, BotRegistry};
use crate::config::AppConfig;
use crate::line::{HttpTransport, LineClient};

#[derive(Parser)]
#[command(name = "fondue")]
#[command(about = "Traffy Fondue CLI - manage LINE rich menus for configured bots")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Configured bots and their LINE profiles")]
    Bots {
        #[command(subcommand)]
        cmd: commands::bots::BotsCommands,
    },

    #[command(about = "Rich menu operations")]
    Menu {
        #[command(subcommand)]
        cmd: commands::menu::MenuCommands,
    },

    #[command(about = "List built-in rich menu templates")]
    Templates,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// Bot registry plus a LINE client, built from the same environment as the server.
pub struct CliContext {
    pub bots: BotRegistry,
    pub line: LineClient,
}

impl CliContext {
    pub fn load() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();
        let bots = BotRegistry::load(config.bots_file.as_deref()).context("failed to load bot registry")?;
        let transport = HttpTransport::new(config.line.timeout())?;
        Ok(Self {
            bots,
            line: LineClient::new(Arc::new(transport), &config.line),
        })
    }

    pub fn bot(&self, key: &str) -> anyhow::Result<&BotDefinition> {
        self.bots
            .resolve(key)
            .with_context(|| format!("Invalid bot key: {}", key))
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Templates => commands::templates::handle(output_format),
        Commands::Bots { cmd } => commands::bots::handle(cmd, &CliContext::load()?, output_format).await,
        Commands::Menu { cmd } => commands::menu::handle(cmd, &CliContext::load()?, output_format).await,
    }
}
