//! High-level planner API for training plans.
//!
//! [`Planner`] is the async service every interface talks to. It owns the
//! database location, the injected collaborators and one write lock per
//! plan. Each operation opens a fresh connection on a blocking worker, and
//! every write path follows the same shape:
//!
//! ```text
//! lock plan ─▶ load hierarchy ─▶ engine mutates in memory ─▶ one transaction ─▶ check-ins
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: Factory for creating [`Planner`] instances
//! - [`plan_ops`]: Import, listing, activation, cloning and deletion
//! - [`progress_ops`]: Current day, session/day completion, skipping
//! - [`adaptation_ops`]: Coaching adaptations
//! - [`exercise_ops`]: The exercise library
//!
//! # Usage
//!
//! ```rust,no_run
//! use stride_core::{params::Id, PlannerBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let planner = PlannerBuilder::new()
//!     .with_database_path(Some("stride.db"))
//!     .build()
//!     .await?;
//!
//! if let Some(today) = planner.current_day(&Id { id: 1 }).await? {
//!     println!("{today}");
//! }
//! # Ok(())
//! # }
//! ```

use std::{path::PathBuf, sync::Arc};

use log::{error, warn};
use tokio::task;

use crate::{
    checkin::{CheckIn, CheckInSink},
    db::Database,
    error::{join_error, Result},
    matcher::ExerciseMatcher,
};

pub mod adaptation_ops;
pub mod builder;
pub mod exercise_ops;
mod locks;
pub mod plan_ops;
pub mod progress_ops;

#[cfg(test)]
mod tests;

pub use builder::PlannerBuilder;
use locks::PlanLocks;

/// Main planner interface for training plans.
pub struct Planner {
    pub(crate) db_path: PathBuf,
    pub(crate) matcher: Arc<dyn ExerciseMatcher>,
    pub(crate) check_ins: Arc<dyn CheckInSink>,
    locks: PlanLocks,
}

impl Planner {
    pub(crate) fn new(
        db_path: PathBuf,
        matcher: Arc<dyn ExerciseMatcher>,
        check_ins: Arc<dyn CheckInSink>,
    ) -> Self {
        Self {
            db_path,
            matcher,
            check_ins,
            locks: PlanLocks::default(),
        }
    }

    /// Runs `op` against a fresh connection on a blocking worker.
    ///
    /// Storage failures are logged here; the transaction inside `op` has
    /// already rolled back by the time the error surfaces.
    pub(crate) async fn with_database<T, F>(&self, operation: &'static str, op: F) -> Result<T>
    where
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db_path = self.db_path.clone();
        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            op(&mut db)
        })
        .await
        .map_err(join_error)?
        .inspect_err(|e| {
            if e.is_storage_failure() {
                error!("{operation} failed, changes abandoned: {e}");
            }
        })
    }

    /// Hands committed check-ins to the sink. Failures are only logged.
    pub(crate) fn deliver_check_ins(&self, check_ins: &[CheckIn]) {
        for check_in in check_ins {
            if let Err(e) = self.check_ins.weekly_check_in_available(check_in) {
                warn!(
                    "Check-in for plan {} week {} was not delivered: {e:#}",
                    check_in.plan_id, check_in.week_number
                );
            }
        }
    }
}
