//! Coaching adaptation commands.
//!
//! Adaptations are produced by an external AI coach and arrive as JSON:
//!
//! ```json
//! { "type": "add_session", "day": 1,
//!   "drill": { "name": "Cone Weave", "category": "technical", "duration": 20, "difficulty": 2 },
//!   "description": "Extra close control work" }
//! ```
//!
//! Each kind carries exactly the fields it needs, so an `add_session`
//! without a drill cannot be represented.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Session;

/// A drill proposed by the coach for a new session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Drill {
    /// Drill name, used to look up matching exercises
    pub name: String,
    /// Free-form category, normalized to a session type
    pub category: String,
    /// Duration in minutes
    pub duration: u32,
    /// Intensity, 1 through 5
    pub difficulty: u8,
}

/// The mutation an adaptation performs on a day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AdaptationKind {
    /// Overwrite the intensity of the n-th session of a day
    ModifyDifficulty {
        day: u8,
        #[serde(rename = "sessionIndex")]
        session_index: usize,
        #[serde(rename = "newDifficulty")]
        new_difficulty: u8,
    },
    /// Append a new session built from a drill
    AddSession { day: u8, drill: Drill },
    /// Delete the n-th session of a day
    RemoveSession {
        day: u8,
        #[serde(rename = "sessionIndex")]
        session_index: usize,
    },
}

/// A coaching adjustment targeting one day of a week.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Adaptation {
    #[serde(flatten)]
    pub kind: AdaptationKind,
    /// Human-readable explanation from the coach
    #[serde(default)]
    pub description: String,
}

impl Adaptation {
    /// Day number the adaptation targets.
    pub fn day(&self) -> u8 {
        match &self.kind {
            AdaptationKind::ModifyDifficulty { day, .. }
            | AdaptationKind::AddSession { day, .. }
            | AdaptationKind::RemoveSession { day, .. } => *day,
        }
    }

    /// The intensity this adaptation would write, if any.
    pub fn requested_intensity(&self) -> Option<u8> {
        match &self.kind {
            AdaptationKind::ModifyDifficulty { new_difficulty, .. } => Some(*new_difficulty),
            AdaptationKind::AddSession { drill, .. } => Some(drill.difficulty),
            AdaptationKind::RemoveSession { .. } => None,
        }
    }
}

/// What applying an adaptation did to the plan.
#[derive(Debug, Clone, PartialEq)]
pub enum AdaptationOutcome {
    /// A session's intensity was overwritten
    Modified {
        session_id: u64,
        previous: u8,
        intensity: u8,
    },
    /// A session was appended
    Added(Session),
    /// A session was deleted
    Removed(Session),
    /// The target week, day or index did not resolve
    Ignored,
}

impl AdaptationOutcome {
    /// Whether the plan was changed.
    pub fn is_applied(&self) -> bool {
        !matches!(self, AdaptationOutcome::Ignored)
    }
}
