//! MCP server implementation for Stride
//!
//! Exposes plan progression and coaching adaptations as Model Context
//! Protocol tools so an AI coach can follow and adjust a player's plan.

use std::{future::Future, sync::Arc};

use anyhow::Result;
use log::{debug, error, info};
use rmcp::{
    handler::server::{router::tool::ToolRouter, tool::Parameters},
    model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ServerHandler,
};
use stride_core::Planner;
use tokio::signal::unix::{signal, SignalKind};

pub mod errors;
pub mod handlers;

pub use handlers::{ApplyAdaptation, ClonePlan, CompleteSession, Id, ListPlans, McpResult};

const INSTRUCTIONS: &str = r#"Stride tracks multi-week training plans for players and lets a coach adapt them.

## Core Concepts
- **Plan**: weeks of days of sessions, assigned to one player; at most one plan per player is active
- **Day**: completed, skipped, or a rest day; rest and skipped days do not count toward progress
- **Session**: a block of training with a type, duration in minutes and intensity from 1 to 5

## Workflow
1. `list_plans` to find the player's active plan
2. `current_day` to see what to train next; rest days on the way are completed automatically
3. `complete_session` or `skip_day` as the player reports back; completion rolls up to weeks and the plan
4. `apply_adaptation` to adjust a week: `modify_difficulty`, `add_session` or `remove_session`
5. `clone_plan` to restart a finished plan with progress reset

Session indexes in adaptations are 0-based positions within the day, in session order."#;

/// MCP server for Stride
#[derive(Clone)]
pub struct StrideMcpServer {
    planner: Arc<Planner>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl StrideMcpServer {
    pub fn new(planner: Planner) -> Self {
        Self {
            planner: Arc::new(planner),
            tool_router: Self::tool_router(),
        }
    }

    fn handlers(&self) -> handlers::McpHandlers {
        handlers::McpHandlers::new(Arc::clone(&self.planner))
    }

    #[tool(
        name = "list_plans",
        description = "List training plans with progress, completed weeks and the next day to train. Filter by player_id; set include_inactive=true to also see inactive and completed plans."
    )]
    async fn list_plans(&self, params: Parameters<ListPlans>) -> McpResult {
        self.handlers().list_plans(params).await
    }

    #[tool(
        name = "show_plan",
        description = "Show a plan with every week, day and session including IDs, completion state, intensities and linked exercises. Use the IDs shown here for the other tools."
    )]
    async fn show_plan(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().show_plan(params).await
    }

    #[tool(
        name = "current_day",
        description = "Find the day the player should train next in a plan (by plan id). Completed and skipped days are passed over and rest days are marked completed on the way."
    )]
    async fn current_day(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().current_day(params).await
    }

    #[tool(
        name = "complete_session",
        description = "Check off a session by ID, optionally recording actual_duration in minutes and actual_intensity (1-5). Completing the last session of a day completes the day, and completion rolls up to the week and plan."
    )]
    async fn complete_session(&self, params: Parameters<CompleteSession>) -> McpResult {
        self.handlers().complete_session(params).await
    }

    #[tool(
        name = "complete_day",
        description = "Mark a day completed by ID without checking off its sessions. Completion rolls up to the week and plan."
    )]
    async fn complete_day(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().complete_day(params).await
    }

    #[tool(
        name = "skip_day",
        description = "Skip a day by ID. Its sessions no longer count toward progress and the day counts as settled for week completion."
    )]
    async fn skip_day(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().skip_day(params).await
    }

    #[tool(
        name = "apply_adaptation",
        description = "Adjust one day of a plan week. adaptation.type is 'modify_difficulty' (day, sessionIndex, newDifficulty 1-5), 'add_session' (day, drill {name, category, duration, difficulty 1-5}) or 'remove_session' (day, sessionIndex). Targets that do not exist leave the plan unchanged."
    )]
    async fn apply_adaptation(&self, params: Parameters<ApplyAdaptation>) -> McpResult {
        self.handlers().apply_adaptation(params).await
    }

    #[tool(
        name = "clone_plan",
        description = "Copy a plan with all weeks, days and sessions and every completion flag reset. The copy is inactive and named 'Copy of <name>' unless name is given."
    )]
    async fn clone_plan(&self, params: Parameters<ClonePlan>) -> McpResult {
        self.handlers().clone_plan(params).await
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for StrideMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "stride".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some(INSTRUCTIONS.to_string()),
        }
    }
}

/// Run the MCP server with stdio transport
pub async fn run_stdio_server(server: StrideMcpServer) -> Result<()> {
    use rmcp::{transport::stdio, ServiceExt};

    info!("Starting Stride MCP server on stdio");
    debug!(
        "Server created with {} tools",
        server.tool_router.list_all().len()
    );

    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!("serving error: {e:?}");
    })?;

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(_) => info!("MCP server stopped normally"),
                Err(e) => error!("MCP server error: {e:?}"),
            }
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down gracefully...");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down gracefully...");
        }
    }

    info!("MCP server shutdown complete");
    Ok(())
}
