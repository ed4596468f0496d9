//! Session type enumeration.

use std::str::FromStr;

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Type-safe enumeration of session kinds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum SessionType {
    /// Ball work: passing, first touch, dribbling
    #[default]
    Technical,

    /// Conditioning: speed, endurance, strength
    Physical,

    /// Game understanding: positioning, decision making
    Tactical,

    /// Mobility, foam rolling, light recovery work
    Recovery,
}

impl FromStr for SessionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "technical" => Ok(SessionType::Technical),
            "physical" => Ok(SessionType::Physical),
            "tactical" => Ok(SessionType::Tactical),
            "recovery" => Ok(SessionType::Recovery),
            _ => Err(format!("Invalid session type: {s}")),
        }
    }
}

impl SessionType {
    /// All session types in display order.
    pub const ALL: [SessionType; 4] = [
        SessionType::Technical,
        SessionType::Physical,
        SessionType::Tactical,
        SessionType::Recovery,
    ];

    /// Resolve a free-form drill category, falling back to `Technical`.
    ///
    /// ```rust
    /// use stride_core::models::SessionType;
    ///
    /// assert_eq!(SessionType::from_category("PHYSICAL"), SessionType::Physical);
    /// assert_eq!(SessionType::from_category(" tactical "), SessionType::Tactical);
    /// assert_eq!(SessionType::from_category("juggling"), SessionType::Technical);
    /// ```
    pub fn from_category(category: &str) -> Self {
        category.parse().unwrap_or_default()
    }

    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionType::Technical => "technical",
            SessionType::Physical => "physical",
            SessionType::Tactical => "tactical",
            SessionType::Recovery => "recovery",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            SessionType::Technical => "Technical",
            SessionType::Physical => "Physical",
            SessionType::Tactical => "Tactical",
            SessionType::Recovery => "Recovery",
        }
    }
}
