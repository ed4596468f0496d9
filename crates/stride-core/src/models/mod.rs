//! Data models for training plans.
//!
//! A plan is a four-level tree: [`Plan`] → [`Week`] → [`Day`] →
//! [`Session`]. The models here are flat rows that refer to their parent by
//! id; [`crate::hierarchy::PlanHierarchy`] assembles them into an ordered
//! tree. Display implementations live in [`crate::display::models`].

pub mod adaptation;
pub mod blueprint;
pub mod day;
pub mod exercise;
pub mod filter;
pub mod plan;
pub mod session;
pub mod session_type;
pub mod summary;
pub mod week;


pub use adaptation::{Adaptation, AdaptationKind, AdaptationOutcome, Drill};
pub use blueprint::{DayBlueprint, PlanBlueprint, SessionBlueprint, WeekBlueprint};
pub use day::Day;
pub use exercise::{Exercise, ExerciseRef};
pub use filter::PlanFilter;
pub use plan::Plan;
pub use session::Session;
pub use session_type::SessionType;
pub use summary::{CurrentDay, PlanSummary, ProgressUpdate};
pub use week::Week;
