//! Plan model definition.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Root of a training program owned by a single player.
///
/// The week/day/session tree lives in [`crate::hierarchy::PlanHierarchy`];
/// this struct only carries the plan row itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Plan {
    /// Unique identifier for the plan
    pub id: u64,

    /// Player the plan is assigned to
    pub player_id: String,

    /// Display name of the plan
    pub name: String,

    /// Detailed multi-line description of the plan
    pub description: Option<String>,

    /// Target duration in weeks
    pub duration_weeks: u32,

    /// Free-form difficulty label ("Beginner", "Intermediate", ...)
    pub difficulty: String,

    /// Free-form category label ("Technical", "Physical", ...)
    pub category: String,

    /// Whether this is the player's current plan
    pub is_active: bool,

    /// Whether the plan ships as a built-in template
    #[serde(default)]
    pub is_prebuilt: bool,

    /// When the player first activated the plan
    pub started_at: Option<Timestamp>,

    /// When every week reported completed
    pub completed_at: Option<Timestamp>,

    /// Cached completion percentage in `[0, 100]`
    pub progress_percentage: f64,

    /// Timestamp when the plan was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the plan was last modified (UTC)
    pub updated_at: Timestamp,
}

impl Plan {
    /// Whether the plan has finished.
    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }
}
