//! MCP tool handlers implementation

use std::sync::Arc;

use log::debug;
use rmcp::{
    handler::server::tool::Parameters,
    model::{CallToolResult, Content},
    ErrorData,
};
use schemars::JsonSchema;
use serde::Deserialize;
use stride_core::{
    display::{CreateResult, OperationStatus},
    params as core, Planner,
};

use super::errors::{not_found, to_mcp_error};

/// Generic MCP wrapper for core parameter types
///
/// Forwards deserialization and schema generation to the wrapped type so
/// core params need no MCP-specific derives.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct McpParams<T>(T)
where
    T: JsonSchema;

impl<T> JsonSchema for McpParams<T>
where
    T: JsonSchema,
{
    fn schema_name() -> std::borrow::Cow<'static, str> {
        T::schema_name()
    }

    fn json_schema(g: &mut schemars::SchemaGenerator) -> schemars::Schema {
        T::json_schema(g)
    }
}

impl<T> AsRef<T> for McpParams<T>
where
    T: JsonSchema,
{
    fn as_ref(&self) -> &T {
        &self.0
    }
}

pub type Id = McpParams<core::Id>;
pub type ListPlans = McpParams<core::ListPlans>;
pub type ClonePlan = McpParams<core::ClonePlan>;
pub type CompleteSession = McpParams<core::CompleteSession>;
pub type ApplyAdaptation = McpParams<core::ApplyAdaptation>;

pub type McpResult = Result<CallToolResult, ErrorData>;

fn text(body: String) -> CallToolResult {
    CallToolResult::success(vec![Content::text(body)])
}

/// Handler implementations for the MCP server
pub struct McpHandlers {
    planner: Arc<Planner>,
}

impl McpHandlers {
    pub fn new(planner: Arc<Planner>) -> Self {
        Self { planner }
    }

    pub async fn list_plans(&self, Parameters(params): Parameters<ListPlans>) -> McpResult {
        debug!("list_plans: {params:?}");

        let inner = params.as_ref();
        let summaries = self
            .planner
            .list_plans(inner)
            .await
            .map_err(|e| to_mcp_error("Failed to list plans", &e))?;

        if summaries.is_empty() {
            return Ok(text(summaries.to_string()));
        }
        let title = if inner.include_inactive {
            "All Plans"
        } else {
            "Active Plans"
        };
        Ok(text(format!("# {title}\n\n{summaries}")))
    }

    pub async fn show_plan(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("show_plan: {params:?}");

        let id = params.as_ref().id;
        let plan = self
            .planner
            .get_plan(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to get plan", &e))?
            .ok_or_else(|| not_found("Plan", id))?;
        Ok(text(plan.to_string()))
    }

    pub async fn current_day(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("current_day: {params:?}");

        let current = self
            .planner
            .current_day(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to resolve the current day", &e))?;
        match current {
            Some(day) => Ok(text(day.to_string())),
            None => Ok(text(
                OperationStatus::success(format!(
                    "Plan {} has no days left to train",
                    params.as_ref().id
                ))
                .to_string(),
            )),
        }
    }

    pub async fn complete_session(
        &self,
        Parameters(params): Parameters<CompleteSession>,
    ) -> McpResult {
        debug!("complete_session: {params:?}");

        let id = params.as_ref().id;
        let update = self
            .planner
            .complete_session(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to complete session", &e))?
            .ok_or_else(|| not_found("Session", id))?;
        Ok(text(update.to_string()))
    }

    pub async fn complete_day(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("complete_day: {params:?}");

        let id = params.as_ref().id;
        let update = self
            .planner
            .complete_day(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to complete day", &e))?
            .ok_or_else(|| not_found("Day", id))?;
        Ok(text(update.to_string()))
    }

    pub async fn skip_day(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("skip_day: {params:?}");

        let id = params.as_ref().id;
        let update = self
            .planner
            .skip_day(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to skip day", &e))?
            .ok_or_else(|| not_found("Day", id))?;
        Ok(text(update.to_string()))
    }

    pub async fn apply_adaptation(
        &self,
        Parameters(params): Parameters<ApplyAdaptation>,
    ) -> McpResult {
        debug!("apply_adaptation: {params:?}");

        let outcome = self
            .planner
            .apply_adaptation(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to apply adaptation", &e))?;
        Ok(text(outcome.to_string()))
    }

    pub async fn clone_plan(&self, Parameters(params): Parameters<ClonePlan>) -> McpResult {
        debug!("clone_plan: {params:?}");

        let copy = self
            .planner
            .clone_plan(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to clone plan", &e))?;
        Ok(text(CreateResult::new(copy).to_string()))
    }
}
