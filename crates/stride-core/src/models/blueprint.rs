//! Plan blueprints: the tree shape used to build plans.
//!
//! A blueprint is what the plan generator returns and what template files
//! contain. Cloning an existing plan also goes through a blueprint, so there
//! is a single insertion path for new plan trees.

use std::collections::HashSet;

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{PlanError, Result};

fn default_difficulty() -> String {
    "Intermediate".to_string()
}

fn default_category() -> String {
    "Technical".to_string()
}

/// Complete description of a plan tree to insert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct PlanBlueprint {
    /// Name of the plan
    pub name: String,
    /// Optional description
    #[serde(default)]
    pub description: Option<String>,
    /// Difficulty label
    #[serde(default = "default_difficulty")]
    pub difficulty: String,
    /// Category label
    #[serde(default = "default_category")]
    pub category: String,
    /// Target duration; defaults to the number of weeks
    #[serde(default)]
    pub duration_weeks: Option<u32>,
    /// Built-in template flag
    #[serde(default)]
    pub is_prebuilt: bool,
    /// Weeks in any order; sorted by week number on insert
    pub weeks: Vec<WeekBlueprint>,
}

/// One week of a blueprint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct WeekBlueprint {
    pub week_number: u32,
    #[serde(default)]
    pub focus_area: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub days: Vec<DayBlueprint>,
}

/// One day of a blueprint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct DayBlueprint {
    pub day_number: u8,
    #[serde(default)]
    pub day_of_week: Option<String>,
    #[serde(default)]
    pub is_rest_day: bool,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub sessions: Vec<SessionBlueprint>,
}

/// One session of a blueprint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SessionBlueprint {
    /// Free-form type, normalized like drill categories
    pub session_type: String,
    pub duration: u32,
    pub intensity: u8,
    /// Explicit ordering key; the position in `sessions` when absent
    #[serde(default)]
    pub order_index: Option<u32>,
    #[serde(default)]
    pub notes: Option<String>,
    /// Exercise names to resolve through the exercise matcher
    #[serde(default)]
    pub suggested_exercise_names: Vec<String>,
    /// Exercise library IDs; unknown IDs are dropped on insert
    #[serde(default)]
    pub exercise_ids: Vec<u64>,
}

impl SessionBlueprint {
    /// The order index this session will be stored with.
    pub fn effective_order_index(&self, position: usize) -> u32 {
        self.order_index.unwrap_or(position as u32)
    }
}

impl PlanBlueprint {
    /// Parses a blueprint from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Target duration, falling back to the number of weeks.
    pub fn effective_duration_weeks(&self) -> u32 {
        self.duration_weeks.unwrap_or(self.weeks.len() as u32)
    }

    /// Checks the structural invariants of a plan tree.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(PlanError::invalid_input("name", "Plan name cannot be empty"));
        }
        if self.weeks.is_empty() {
            return Err(PlanError::invalid_input(
                "weeks",
                "A plan needs at least one week",
            ));
        }

        let mut week_numbers = HashSet::new();
        for week in &self.weeks {
            if week.week_number == 0 {
                return Err(PlanError::invalid_input(
                    "week_number",
                    "Week numbers start at 1",
                ));
            }
            if !week_numbers.insert(week.week_number) {
                return Err(PlanError::invalid_input(
                    "week_number",
                    format!("Week {} appears more than once", week.week_number),
                ));
            }

            let mut day_numbers = HashSet::new();
            for day in &week.days {
                if !(1..=7).contains(&day.day_number) {
                    return Err(PlanError::invalid_input(
                        "day_number",
                        format!(
                            "Day {} of week {} is outside 1..=7",
                            day.day_number, week.week_number
                        ),
                    ));
                }
                if !day_numbers.insert(day.day_number) {
                    return Err(PlanError::invalid_input(
                        "day_number",
                        format!(
                            "Day {} of week {} appears more than once",
                            day.day_number, week.week_number
                        ),
                    ));
                }

                let mut order_indexes = HashSet::new();
                for (position, session) in day.sessions.iter().enumerate() {
                    if !(1..=5).contains(&session.intensity) {
                        return Err(PlanError::invalid_input(
                            "intensity",
                            format!("Intensity {} is outside 1..=5", session.intensity),
                        ));
                    }
                    if !order_indexes.insert(session.effective_order_index(position)) {
                        return Err(PlanError::invalid_input(
                            "order_index",
                            format!(
                                "Duplicate session order in week {} day {}",
                                week.week_number, day.day_number
                            ),
                        ));
                    }
                }
            }
        }

        Ok(())
    }
}
