//! Parameter structures for Stride operations.
//!
//! These structures are shared by every interface (CLI, MCP) and carry no
//! framework-specific derives beyond serde and, behind the `schema` feature,
//! `schemars`. Interface layers wrap them with their own types and convert
//! via `From`:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │   MCP Params    │    │  Core Params    │
//! │  (clap derives) │───▶│ (serde derives) │───▶│ (minimal deps)  │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::models::{Adaptation, PlanBlueprint, PlanFilter};

/// Generic parameters for operations requiring just an ID.
///
/// Used for show_plan, current_day, activate_plan, complete_day and
/// skip_day.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: u64,
}

/// Parameters for importing a plan from a blueprint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CreatePlan {
    /// Player the plan is assigned to
    pub player_id: String,
    /// The plan tree to insert
    pub blueprint: PlanBlueprint,
    /// Make this the player's active plan
    #[serde(default)]
    pub activate: bool,
}

/// Parameters for listing plans.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ListPlans {
    /// Restrict to one player's plans
    #[serde(default)]
    pub player_id: Option<String>,
    /// Include inactive and completed plans
    #[serde(default)]
    pub include_inactive: bool,
}

impl From<&ListPlans> for PlanFilter {
    fn from(params: &ListPlans) -> Self {
        PlanFilter {
            player_id: params.player_id.clone(),
            include_inactive: params.include_inactive,
        }
    }
}

/// Parameters for permanently deleting a plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct DeletePlan {
    /// The ID of the plan to delete
    pub id: u64,
    /// Must be true; deletion removes every week, day and session
    #[serde(default)]
    pub confirmed: bool,
}

/// Parameters for cloning a plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ClonePlan {
    /// The ID of the plan to copy
    pub id: u64,
    /// Name for the copy; defaults to "Copy of <name>"
    #[serde(default)]
    pub name: Option<String>,
}

/// Parameters for checking off a session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CompleteSession {
    /// The ID of the session
    pub id: u64,
    /// Minutes actually trained
    #[serde(default)]
    pub actual_duration: Option<u32>,
    /// Perceived intensity, 1 through 5
    #[serde(default)]
    pub actual_intensity: Option<u8>,
}

/// Parameters for applying a coaching adaptation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ApplyAdaptation {
    /// The plan to adapt
    pub plan_id: u64,
    /// Week number the adaptation targets
    pub week_number: u32,
    /// The adaptation command
    pub adaptation: Adaptation,
}

/// Parameters for adding an exercise to the library.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct AddExercise {
    /// Exercise name, unique ignoring case
    pub name: String,
    /// Session type category; unknown values fall back to technical
    #[serde(default)]
    pub category: Option<String>,
}
