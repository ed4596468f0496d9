//! Read models derived from a plan hierarchy.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{Day, Session};
use crate::{engine::Changeset, hierarchy::PlanHierarchy};

/// Summary information about a plan with completion statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanSummary {
    /// Plan ID
    pub id: u64,
    /// Owning player
    pub player_id: String,
    /// Name of the plan
    pub name: String,
    /// Difficulty label
    pub difficulty: String,
    /// Category label
    pub category: String,
    /// Whether this is the player's current plan
    pub is_active: bool,
    /// Cached completion percentage
    pub progress_percentage: f64,
    /// Number of weeks
    pub total_weeks: u32,
    /// Number of weeks rolled up to completed
    pub completed_weeks: u32,
    /// Total number of sessions across the plan
    pub total_sessions: u32,
    /// Number of completed sessions
    pub completed_sessions: u32,
    /// Week number of the next open day
    pub current_week: Option<u32>,
    /// Day number of the next open day
    pub current_day: Option<u8>,
    /// Completion timestamp
    pub completed_at: Option<Timestamp>,
    /// Creation timestamp
    pub created_at: Timestamp,
}

impl From<&PlanHierarchy> for PlanSummary {
    fn from(hierarchy: &PlanHierarchy) -> Self {
        let plan = hierarchy.plan();
        let total_weeks = hierarchy.weeks().count() as u32;
        let completed_weeks = hierarchy.weeks().filter(|w| w.is_completed).count() as u32;
        let (total_sessions, completed_sessions) = hierarchy
            .all_sessions()
            .fold((0, 0), |(total, done), s| {
                (total + 1, done + u32::from(s.is_completed))
            });
        let position = hierarchy.next_open_day();

        Self {
            id: plan.id,
            player_id: plan.player_id.clone(),
            name: plan.name.clone(),
            difficulty: plan.difficulty.clone(),
            category: plan.category.clone(),
            is_active: plan.is_active,
            progress_percentage: plan.progress_percentage,
            total_weeks,
            completed_weeks,
            total_sessions,
            completed_sessions,
            current_week: position.map(|(week, _)| week.week_number),
            current_day: position.map(|(_, day)| day.day_number),
            completed_at: plan.completed_at,
            created_at: plan.created_at,
        }
    }
}

/// The day a player should work on next.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurrentDay {
    /// Plan the day belongs to
    pub plan_id: u64,
    /// Week number of the day
    pub week_number: u32,
    /// The actionable day
    pub day: Day,
    /// Its sessions in order
    pub sessions: Vec<Session>,
    /// Plan progress at the time of the lookup
    pub progress_percentage: f64,
}

impl CurrentDay {
    /// Day number within the week.
    pub fn day_number(&self) -> u8 {
        self.day.day_number
    }
}

/// Plan state after a completion event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProgressUpdate {
    /// Plan the event applied to
    pub plan_id: u64,
    /// Whether anything was written
    pub changed: bool,
    /// Progress after the cascade
    pub progress_percentage: f64,
    /// Week numbers that rolled up to completed
    pub weeks_completed: Vec<u32>,
    /// Whether the plan finished
    pub plan_completed: bool,
}

impl ProgressUpdate {
    /// Summarizes a hierarchy after the cascade recorded in `changes`.
    pub fn new(hierarchy: &PlanHierarchy, changes: &Changeset) -> Self {
        let plan = hierarchy.plan();
        Self {
            plan_id: plan.id,
            changed: !changes.is_empty(),
            progress_percentage: plan.progress_percentage,
            weeks_completed: changes.check_ins.iter().map(|c| c.week_number).collect(),
            plan_completed: plan.is_completed(),
        }
    }
}
