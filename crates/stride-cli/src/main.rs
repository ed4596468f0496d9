//! Stride CLI Application
//!
//! Command-line interface and MCP server for the Stride training plan
//! engine.

mod args;
mod cli;
mod mcp;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use mcp::{run_stdio_server, StrideMcpServer};
use renderer::TerminalRenderer;
use stride_core::{params::ListPlans, PlannerBuilder};
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        player,
        no_color,
        command,
    } = Args::parse();

    let planner = PlannerBuilder::new()
        .with_database_path(database_file)
        .build()
        .await
        .context("Failed to initialize planner")?;

    let renderer = TerminalRenderer::new(!no_color);

    info!("Stride started");

    match command {
        Some(Plan { command }) => {
            Cli::new(planner, renderer, player)
                .handle_plan_command(command)
                .await
        }
        Some(Session { command }) => {
            Cli::new(planner, renderer, player)
                .handle_session_command(command)
                .await
        }
        Some(Day { command }) => {
            Cli::new(planner, renderer, player)
                .handle_day_command(command)
                .await
        }
        Some(Exercise { command }) => {
            Cli::new(planner, renderer, player)
                .handle_exercise_command(command)
                .await
        }
        Some(Serve) => {
            info!("Starting Stride MCP server");
            run_stdio_server(StrideMcpServer::new(planner))
                .await
                .context("MCP server failed")
        }
        None => {
            let params = ListPlans {
                player_id: Some(player.clone()),
                include_inactive: false,
            };
            Cli::new(planner, renderer, player)
                .list_plans(&params)
                .await
        }
    }
}
