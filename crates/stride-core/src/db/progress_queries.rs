//! Persistence of completion cascades and adaptation edits.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension, Transaction};

use super::{
    plan_queries::{load_hierarchy, LINK_EXERCISE_SQL},
    rows::{self, stamp, SESSION_COLUMNS},
};
use crate::{
    checkin::CheckIn,
    engine::{complete_day_if_finished, progress_percentage, AdaptationEdit, Changeset},
    error::{DatabaseResultExt, PlanError, Result},
    hierarchy::PlanHierarchy,
    models::{AdaptationOutcome, Session},
};

/// `is_active` is only ever cleared here, on completion. Activation owns it
/// otherwise and may have changed it since the plan was loaded.
const UPDATE_PLAN_PROGRESS_SQL: &str = "UPDATE plans SET is_active = CASE WHEN ?1 IS NULL THEN is_active ELSE 0 END, completed_at = ?1, progress_percentage = ?2, updated_at = ?3 WHERE id = ?4";
const UPDATE_WEEK_SQL: &str = "UPDATE weeks SET is_completed = ?1, completed_at = ?2 WHERE id = ?3";
const UPDATE_DAY_SQL: &str =
    "UPDATE days SET is_skipped = ?1, is_completed = ?2, completed_at = ?3 WHERE id = ?4";
const UPDATE_SESSION_SQL: &str = "UPDATE sessions SET is_completed = ?1, completed_at = ?2, actual_duration = ?3, actual_intensity = ?4 WHERE id = ?5";
const UPDATE_SESSION_INTENSITY_SQL: &str = "UPDATE sessions SET intensity = ?1 WHERE id = ?2";
const INSERT_SESSION_SQL: &str = "INSERT INTO sessions (day_id, session_type, duration, intensity, order_index, notes) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const DELETE_SESSION_SQL: &str = "DELETE FROM sessions WHERE id = ?1";
const UPDATE_PLAN_PERCENTAGE_SQL: &str =
    "UPDATE plans SET progress_percentage = ?1, updated_at = ?2 WHERE id = ?3";
const TOUCH_PLAN_SQL: &str = "UPDATE plans SET updated_at = ?1 WHERE id = ?2";

/// Writes every entity named in `changes` from its state in `hierarchy`.
fn write_changes(tx: &Transaction, hierarchy: &PlanHierarchy, changes: &Changeset) -> Result<()> {
    for session in changes.sessions.iter().filter_map(|id| hierarchy.session(*id)) {
        tx.execute(
            UPDATE_SESSION_SQL,
            params![
                session.is_completed,
                stamp(session.completed_at),
                session.actual_duration,
                session.actual_intensity,
                session.id as i64
            ],
        )
        .db_context("Failed to update session")?;
    }

    for day in changes.days.iter().filter_map(|id| hierarchy.day(*id)) {
        tx.execute(
            UPDATE_DAY_SQL,
            params![
                day.is_skipped,
                day.is_completed,
                stamp(day.completed_at),
                day.id as i64
            ],
        )
        .db_context("Failed to update day")?;
    }

    for week in changes.weeks.iter().filter_map(|id| hierarchy.week(*id)) {
        tx.execute(
            UPDATE_WEEK_SQL,
            params![week.is_completed, stamp(week.completed_at), week.id as i64],
        )
        .db_context("Failed to update week")?;
    }

    if changes.plan {
        let plan = hierarchy.plan();
        tx.execute(
            UPDATE_PLAN_PROGRESS_SQL,
            params![
                stamp(plan.completed_at),
                plan.progress_percentage,
                plan.updated_at.to_string(),
                plan.id as i64
            ],
        )
        .db_context("Failed to update plan")?;
    }
    Ok(())
}

impl super::Database {
    /// Writes every entity named in `changes` from its state in
    /// `hierarchy`, all in one transaction.
    ///
    /// The plan's `is_active` flag is never restored from `hierarchy`; it
    /// is only cleared when the plan has completed.
    pub fn save_changes(&mut self, hierarchy: &PlanHierarchy, changes: &Changeset) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;
        write_changes(&tx, hierarchy, changes)?;
        tx.commit().db_context("Failed to commit transaction")
    }

    /// Applies a resolved adaptation edit to a plan in one transaction.
    ///
    /// The plan's `updated_at` is refreshed and, unless the plan has already
    /// finished, its progress is recomputed against the edited tree. When a
    /// removal leaves a day whose remaining sessions are all checked off,
    /// that day completes and cascades in the same transaction; the
    /// resulting check-ins are returned for delivery after the commit.
    pub fn apply_adaptation_edit(
        &mut self,
        plan_id: u64,
        edit: &AdaptationEdit,
        now: Timestamp,
    ) -> Result<(AdaptationOutcome, Vec<CheckIn>)> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let outcome = match edit {
            AdaptationEdit::SetIntensity {
                session_id,
                previous,
                intensity,
            } => {
                tx.execute(
                    UPDATE_SESSION_INTENSITY_SQL,
                    params![intensity, *session_id as i64],
                )
                .db_context("Failed to update session intensity")?;
                AdaptationOutcome::Modified {
                    session_id: *session_id,
                    previous: *previous,
                    intensity: *intensity,
                }
            }
            AdaptationEdit::Append(new) => {
                tx.execute(
                    INSERT_SESSION_SQL,
                    params![
                        new.day_id as i64,
                        new.session_type.as_str(),
                        new.duration,
                        new.intensity,
                        new.order_index,
                        new.notes.as_deref()
                    ],
                )
                .db_context("Failed to insert session")?;
                let session_id = tx.last_insert_rowid();

                for (position, exercise) in new.exercises.iter().enumerate() {
                    tx.execute(
                        LINK_EXERCISE_SQL,
                        params![session_id, exercise.id as i64, position as i64],
                    )
                    .db_context("Failed to link exercise")?;
                }

                AdaptationOutcome::Added(Session {
                    id: session_id as u64,
                    day_id: new.day_id,
                    session_type: new.session_type,
                    duration: new.duration,
                    intensity: new.intensity,
                    order_index: new.order_index,
                    notes: new.notes.clone(),
                    is_completed: false,
                    completed_at: None,
                    actual_duration: None,
                    actual_intensity: None,
                    exercises: new.exercises.clone(),
                })
            }
            AdaptationEdit::Remove { session_id } => {
                let removed = tx
                    .query_row(
                        &format!("SELECT {SESSION_COLUMNS} FROM sessions s WHERE s.id = ?1"),
                        params![*session_id as i64],
                        rows::session_from_row,
                    )
                    .optional()
                    .db_context("Failed to query session")?
                    .ok_or(PlanError::SessionNotFound { id: *session_id })?;
                tx.execute(DELETE_SESSION_SQL, params![*session_id as i64])
                    .db_context("Failed to delete session")?;
                AdaptationOutcome::Removed(removed)
            }
        };

        let mut hierarchy =
            load_hierarchy(&tx, plan_id)?.ok_or(PlanError::PlanNotFound { id: plan_id })?;
        let mut changes = Changeset::default();
        if let AdaptationOutcome::Removed(removed) = &outcome {
            complete_day_if_finished(&mut hierarchy, removed.day_id, now, &mut changes);
        }

        let now = now.to_string();
        if !changes.is_empty() {
            write_changes(&tx, &hierarchy, &changes)?;
        } else if hierarchy.plan().is_completed() {
            tx.execute(TOUCH_PLAN_SQL, params![&now, plan_id as i64])
                .db_context("Failed to update plan timestamp")?;
        } else {
            tx.execute(
                UPDATE_PLAN_PERCENTAGE_SQL,
                params![progress_percentage(&hierarchy), &now, plan_id as i64],
            )
            .db_context("Failed to update plan progress")?;
        }

        tx.commit().db_context("Failed to commit transaction")?;
        Ok((outcome, changes.check_ins))
    }
}
