//! Upkeep CLI Application
//!
//! Command-line interface and MCP server for the upkeep maintenance planner.

mod args;
mod cli;
mod mcp;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use mcp::{run_stdio_server, UpkeepMcpServer};
use renderer::TerminalRenderer;
use upkeep_core::{params::ListPlans, UpkeepBuilder};
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        command,
    } = Args::parse();

    let upkeep = UpkeepBuilder::new()
        .with_database_path(database_file)
        .build()
        .await
        .context("Failed to initialize upkeep")?;

    info!("Upkeep started with database {}", upkeep.database_path().display());

    let renderer = TerminalRenderer::new(!no_color);

    match command {
        Some(Plan { command }) => {
            Cli::new(upkeep, renderer)
                .handle_plan_command(command)
                .await
        }
        Some(Checklist { command }) => {
            Cli::new(upkeep, renderer)
                .handle_checklist_command(command)
                .await
        }
        Some(Order { command }) => {
            Cli::new(upkeep, renderer)
                .handle_order_command(command)
                .await
        }
        Some(Due(args)) => Cli::new(upkeep, renderer).run_due(args).await,
        Some(Serve) => {
            info!("Starting Upkeep MCP server");
            run_stdio_server(UpkeepMcpServer::new(upkeep))
                .await
                .context("MCP server failed")
        }
        None => {
            Cli::new(upkeep, renderer)
                .list_plans(&ListPlans::default())
                .await
        }
    }
}
