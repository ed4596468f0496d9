//! Day model definition.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A single day (1–7) inside a week.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Day {
    /// Unique identifier for the day
    pub id: u64,

    /// ID of the parent week
    pub week_id: u64,

    /// Position within the week, 1 through 7
    pub day_number: u8,

    /// Weekday label such as "Monday"
    pub day_of_week: Option<String>,

    /// Rest days never require sessions
    pub is_rest_day: bool,

    /// Explicitly bypassed by the player
    pub is_skipped: bool,

    /// Completed explicitly, via sessions, or automatically for rest days
    pub is_completed: bool,

    /// When the day was completed
    pub completed_at: Option<Timestamp>,

    /// Coaching notes for the day
    pub notes: Option<String>,
}

impl Day {
    /// Nothing actionable remains on this day.
    pub fn is_settled(&self) -> bool {
        self.is_completed || self.is_skipped || self.is_rest_day
    }

    /// Whether the day's sessions enter the progress percentage.
    pub fn counts_toward_progress(&self) -> bool {
        !self.is_skipped && !self.is_rest_day
    }
}
