//! Exercise library types.

use jiff::Timestamp;
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Non-owning reference from a session into the exercise library.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ExerciseRef {
    /// ID of the referenced exercise
    pub id: u64,

    /// Exercise name at load time
    pub name: String,
}

/// An entry in the exercise library.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Exercise {
    /// Unique identifier for the exercise
    pub id: u64,

    /// Unique (case-insensitive) exercise name
    pub name: String,

    /// Session type the exercise is usually trained in
    pub category: super::SessionType,

    /// Timestamp when the exercise was added (UTC)
    pub created_at: Timestamp,
}

impl From<&Exercise> for ExerciseRef {
    fn from(exercise: &Exercise) -> Self {
        Self {
            id: exercise.id,
            name: exercise.name.clone(),
        }
    }
}
