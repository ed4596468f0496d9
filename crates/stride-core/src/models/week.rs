//! Week model definition.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A numbered week inside a plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Week {
    /// Unique identifier for the week
    pub id: u64,

    /// ID of the parent plan
    pub plan_id: u64,

    /// 1-indexed position within the plan
    pub week_number: u32,

    /// Theme of the week
    pub focus_area: Option<String>,

    /// Coaching notes for the week
    pub notes: Option<String>,

    /// Set once no actionable day remains
    pub is_completed: bool,

    /// When the week rolled up to completed
    pub completed_at: Option<Timestamp>,
}
