//! Core library for the Stride training plan engine.
//!
//! A training plan is a four-level tree (Plan → Week → Day → Session)
//! assigned to one player. This crate tracks progress through that tree,
//! rolls completion up from sessions to the whole plan, applies coaching
//! adaptations and clones plans, persisting everything in SQLite.
//!
//! # Layers
//!
//! - [`models`]: Plain data types and blueprints
//! - [`hierarchy`]: The ordered, id-keyed plan tree
//! - [`engine`]: Pure progression logic over a hierarchy
//! - [`db`]: SQLite persistence, one transaction per operation
//! - [`planner`]: The async service interfaces call into
//! - [`display`]: Markdown rendering of models and results
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use stride_core::{
//!     models::PlanBlueprint,
//!     params::{CreatePlan, Id},
//!     PlannerBuilder,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let planner = PlannerBuilder::new()
//!     .with_database_path(Some("stride.db"))
//!     .build()
//!     .await?;
//!
//! let blueprint = PlanBlueprint::from_json(&std::fs::read_to_string("plan.json")?)?;
//! let plan = planner
//!     .create_plan(&CreatePlan {
//!         player_id: "player-1".to_string(),
//!         blueprint,
//!         activate: true,
//!     })
//!     .await?;
//!
//! if let Some(today) = planner.current_day(&Id { id: plan.plan().id }).await? {
//!     println!("{today}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod checkin;
pub mod db;
pub mod display;
pub mod engine;
pub mod error;
pub mod hierarchy;
pub mod matcher;
pub mod models;
pub mod params;
pub mod planner;

// Re-export commonly used types
pub use checkin::{CheckIn, CheckInSink, LogCheckInSink};
pub use db::Database;
pub use display::{
    CreateResult, DeleteResult, Exercises, LocalDateTime, OperationStatus, PlanSummaries,
    UpdateResult,
};
pub use error::{PlanError, Result};
pub use hierarchy::PlanHierarchy;
pub use matcher::{ExerciseMatcher, LibraryMatcher};
pub use models::{
    Adaptation, AdaptationKind, AdaptationOutcome, CurrentDay, Day, Drill, Exercise, ExerciseRef,
    Plan, PlanBlueprint, PlanFilter, PlanSummary, ProgressUpdate, Session, SessionType, Week,
};
pub use params::{
    AddExercise, ApplyAdaptation, ClonePlan, CompleteSession, CreatePlan, DeletePlan, Id,
    ListPlans,
};
pub use planner::{Planner, PlannerBuilder};
