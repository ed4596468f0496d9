//! Session model definition.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{ExerciseRef, SessionType};

/// A block of training inside a day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    /// Unique identifier for the session
    pub id: u64,

    /// ID of the parent day
    pub day_id: u64,

    /// Kind of work performed
    pub session_type: SessionType,

    /// Planned duration in minutes
    pub duration: u32,

    /// Planned intensity, 1 through 5
    pub intensity: u8,

    /// Stable ordering key within the day
    pub order_index: u32,

    /// Coaching notes, also used to record adaptation descriptions
    pub notes: Option<String>,

    /// Whether the player checked the session off
    pub is_completed: bool,

    /// When the session was checked off
    pub completed_at: Option<Timestamp>,

    /// Minutes actually trained, if reported
    pub actual_duration: Option<u32>,

    /// Perceived intensity, if reported
    pub actual_intensity: Option<u8>,

    /// Non-owning references into the exercise library
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exercises: Vec<ExerciseRef>,
}
