//! Completion and skip operations for the Planner.
//!
//! All of these run the cascade from [`crate::engine::completion`] under
//! the plan's write lock, persist the changeset in one transaction and
//! deliver weekly check-ins only after the commit.

use jiff::Timestamp;
use log::debug;

use super::Planner;
use crate::{
    checkin::CheckIn,
    engine::{self, Changeset, SessionActuals},
    error::{PlanError, Result},
    hierarchy::PlanHierarchy,
    models::{CurrentDay, ProgressUpdate},
    params::{CompleteSession, Id},
};

impl Planner {
    /// Finds the day the player should work on next.
    ///
    /// Rest days met on the way are completed (and their weeks rolled up)
    /// in one transaction before returning. `None` means nothing actionable
    /// remains.
    pub async fn current_day(&self, params: &Id) -> Result<Option<CurrentDay>> {
        let plan_id = params.id;
        let _guard = self.locks.lock(plan_id).await;

        let (current, check_ins) = self
            .with_database("resolve current day", move |db| {
                let mut hierarchy = db
                    .get_hierarchy(plan_id)?
                    .ok_or(PlanError::PlanNotFound { id: plan_id })?;
                let mut changes = Changeset::default();
                let current = engine::current_day(&mut hierarchy, Timestamp::now(), &mut changes);
                if !changes.is_empty() {
                    db.save_changes(&hierarchy, &changes)?;
                }
                Ok((current, changes.check_ins))
            })
            .await?;

        self.deliver_check_ins(&check_ins);
        Ok(current)
    }

    /// Checks off a session. Returns `None` if the session does not exist.
    pub async fn complete_session(
        &self,
        params: &CompleteSession,
    ) -> Result<Option<ProgressUpdate>> {
        if let Some(intensity) = params.actual_intensity {
            if !(1..=5).contains(&intensity) {
                return Err(PlanError::invalid_input(
                    "actual_intensity",
                    format!("Intensity {intensity} is outside 1..=5"),
                ));
            }
        }

        let session_id = params.id;
        let Some(plan_id) = self
            .with_database("look up session", move |db| db.plan_id_for_session(session_id))
            .await?
        else {
            debug!("Session {session_id} not found");
            return Ok(None);
        };

        let actuals = SessionActuals {
            duration: params.actual_duration,
            intensity: params.actual_intensity,
        };
        self.run_cascade("complete session", plan_id, move |hierarchy, now, changes| {
            engine::complete_session(hierarchy, session_id, actuals, now, changes)
        })
        .await
    }

    /// Marks a day completed. Returns `None` if the day does not exist.
    pub async fn complete_day(&self, params: &Id) -> Result<Option<ProgressUpdate>> {
        let day_id = params.id;
        let Some(plan_id) = self.plan_for_day(day_id).await? else {
            return Ok(None);
        };
        self.run_cascade("complete day", plan_id, move |hierarchy, now, changes| {
            engine::complete_day(hierarchy, day_id, now, changes)
        })
        .await
    }

    /// Marks a day skipped. Returns `None` if the day does not exist.
    pub async fn skip_day(&self, params: &Id) -> Result<Option<ProgressUpdate>> {
        let day_id = params.id;
        let Some(plan_id) = self.plan_for_day(day_id).await? else {
            return Ok(None);
        };
        self.run_cascade("skip day", plan_id, move |hierarchy, now, changes| {
            engine::skip_day(hierarchy, day_id, now, changes)
        })
        .await
    }

    async fn plan_for_day(&self, day_id: u64) -> Result<Option<u64>> {
        let plan_id = self
            .with_database("look up day", move |db| db.plan_id_for_day(day_id))
            .await?;
        if plan_id.is_none() {
            debug!("Day {day_id} not found");
        }
        Ok(plan_id)
    }

    /// Loads a plan under its lock, applies `mutate` and persists the
    /// result. `mutate` returns `false` when its target is gone.
    async fn run_cascade<F>(
        &self,
        operation: &'static str,
        plan_id: u64,
        mutate: F,
    ) -> Result<Option<ProgressUpdate>>
    where
        F: FnOnce(&mut PlanHierarchy, Timestamp, &mut Changeset) -> bool + Send + 'static,
    {
        let _guard = self.locks.lock(plan_id).await;

        let outcome: Option<(ProgressUpdate, Vec<CheckIn>)> = self
            .with_database(operation, move |db| {
                let Some(mut hierarchy) = db.get_hierarchy(plan_id)? else {
                    return Ok(None);
                };
                let mut changes = Changeset::default();
                if !mutate(&mut hierarchy, Timestamp::now(), &mut changes) {
                    return Ok(None);
                }
                if !changes.is_empty() {
                    db.save_changes(&hierarchy, &changes)?;
                }
                let update = ProgressUpdate::new(&hierarchy, &changes);
                Ok(Some((update, changes.check_ins)))
            })
            .await?;

        Ok(outcome.map(|(update, check_ins)| {
            self.deliver_check_ins(&check_ins);
            update
        }))
    }
}
