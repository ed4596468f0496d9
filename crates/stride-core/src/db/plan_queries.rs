//! Plan tree insertion, loading and lifecycle queries.

use std::collections::HashMap;

use jiff::Timestamp;
use log::debug;
use rusqlite::{params, Connection, OptionalExtension, Transaction};

use super::rows::{self, DAY_COLUMNS, PLAN_COLUMNS, SESSION_COLUMNS, WEEK_COLUMNS};
use crate::{
    error::{DatabaseResultExt, PlanError, Result},
    hierarchy::PlanHierarchy,
    models::{ExerciseRef, Plan, PlanBlueprint, PlanFilter, PlanSummary, SessionType},
};

const INSERT_PLAN_SQL: &str = "INSERT INTO plans (player_id, name, description, duration_weeks, difficulty, category, is_active, is_prebuilt, started_at, progress_percentage, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, 0, ?10, ?10)";
const INSERT_WEEK_SQL: &str =
    "INSERT INTO weeks (plan_id, week_number, focus_area, notes) VALUES (?1, ?2, ?3, ?4)";
const INSERT_DAY_SQL: &str = "INSERT INTO days (week_id, day_number, day_of_week, is_rest_day, notes) VALUES (?1, ?2, ?3, ?4, ?5)";
const INSERT_SESSION_SQL: &str = "INSERT INTO sessions (day_id, session_type, duration, intensity, order_index, notes) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
/// Links an exercise only if it still exists in the library.
pub(super) const LINK_EXERCISE_SQL: &str = "INSERT OR IGNORE INTO session_exercises (session_id, exercise_id, position) SELECT ?1, id, ?3 FROM exercises WHERE id = ?2";
const DEACTIVATE_PLAYER_PLANS_SQL: &str = "UPDATE plans SET is_active = 0, updated_at = ?1 WHERE player_id = ?2 AND id != ?3 AND is_active = 1";
const ACTIVATE_PLAN_SQL: &str = "UPDATE plans SET is_active = 1, started_at = COALESCE(started_at, ?1), updated_at = ?1 WHERE id = ?2";
const SELECT_PLAYER_SQL: &str =
    "SELECT player_id, completed_at IS NOT NULL FROM plans WHERE id = ?1";
const DELETE_PLAN_SQL: &str = "DELETE FROM plans WHERE id = ?1";
const SELECT_PLAN_FOR_DAY_SQL: &str =
    "SELECT w.plan_id FROM days d JOIN weeks w ON w.id = d.week_id WHERE d.id = ?1";
const SELECT_PLAN_FOR_SESSION_SQL: &str = "SELECT w.plan_id FROM sessions s JOIN days d ON d.id = s.day_id JOIN weeks w ON w.id = d.week_id WHERE s.id = ?1";
const SELECT_SESSION_EXERCISES_SQL: &str = "SELECT se.session_id, e.id, e.name FROM session_exercises se JOIN exercises e ON e.id = se.exercise_id JOIN sessions s ON s.id = se.session_id JOIN days d ON d.id = s.day_id JOIN weeks w ON w.id = d.week_id WHERE w.plan_id = ?1 ORDER BY se.session_id, se.position";

/// Loads a plan and its whole tree, or `None` if the plan does not exist.
pub fn load_hierarchy(conn: &Connection, plan_id: u64) -> Result<Option<PlanHierarchy>> {
    let plan = conn
        .query_row(
            &format!("SELECT {PLAN_COLUMNS} FROM plans WHERE id = ?1"),
            params![plan_id as i64],
            rows::plan_from_row,
        )
        .optional()
        .db_context("Failed to query plan")?;
    let Some(plan) = plan else {
        return Ok(None);
    };

    let weeks = {
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {WEEK_COLUMNS} FROM weeks w WHERE w.plan_id = ?1"
            ))
            .db_context("Failed to prepare week query")?;
        let result = stmt.query_map(params![plan_id as i64], rows::week_from_row)
            .db_context("Failed to query weeks")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read weeks")?;
        result
    };

    let days = {
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {DAY_COLUMNS} FROM days d JOIN weeks w ON w.id = d.week_id WHERE w.plan_id = ?1"
            ))
            .db_context("Failed to prepare day query")?;
        let result = stmt.query_map(params![plan_id as i64], rows::day_from_row)
            .db_context("Failed to query days")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read days")?;
        result
    };

    let mut exercises: HashMap<u64, Vec<ExerciseRef>> = HashMap::new();
    {
        let mut stmt = conn
            .prepare(SELECT_SESSION_EXERCISES_SQL)
            .db_context("Failed to prepare exercise link query")?;
        let links = stmt
            .query_map(params![plan_id as i64], |row| {
                Ok((
                    rows::id(row, 0)?,
                    ExerciseRef {
                        id: rows::id(row, 1)?,
                        name: row.get(2)?,
                    },
                ))
            })
            .db_context("Failed to query exercise links")?;
        for link in links {
            let (session_id, exercise) = link.db_context("Failed to read exercise link")?;
            exercises.entry(session_id).or_default().push(exercise);
        }
    }

    let sessions = {
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {SESSION_COLUMNS} FROM sessions s JOIN days d ON d.id = s.day_id JOIN weeks w ON w.id = d.week_id WHERE w.plan_id = ?1"
            ))
            .db_context("Failed to prepare session query")?;
        let result = stmt.query_map(params![plan_id as i64], rows::session_from_row)
            .db_context("Failed to query sessions")?
            .map(|session| {
                session.map(|mut session| {
                    session.exercises = exercises.remove(&session.id).unwrap_or_default();
                    session
                })
            })
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read sessions")?;
        result
    };

    PlanHierarchy::new(plan, weeks, days, sessions).map(Some)
}

/// Deactivates every other active plan of the player.
fn deactivate_others(tx: &Transaction, player_id: &str, keep: u64, now: &str) -> Result<()> {
    tx.execute(
        DEACTIVATE_PLAYER_PLANS_SQL,
        params![now, player_id, keep as i64],
    )
    .db_context("Failed to deactivate player plans")?;
    Ok(())
}

impl super::Database {
    /// Inserts a validated blueprint as a new plan and returns its ID.
    ///
    /// Weeks, days and sessions are written in one transaction. Exercise IDs
    /// that are not in the library are skipped. With `activate`, the plan
    /// becomes the player's only active plan.
    pub fn insert_blueprint(
        &mut self,
        player_id: &str,
        blueprint: &PlanBlueprint,
        activate: bool,
    ) -> Result<u64> {
        blueprint.validate()?;

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now = Timestamp::now().to_string();
        tx.execute(
            INSERT_PLAN_SQL,
            params![
                player_id,
                blueprint.name.trim(),
                blueprint.description.as_deref(),
                blueprint.effective_duration_weeks(),
                blueprint.difficulty,
                blueprint.category,
                activate,
                blueprint.is_prebuilt,
                activate.then_some(now.as_str()),
                &now,
            ],
        )
        .db_context("Failed to insert plan")?;
        let plan_id = tx.last_insert_rowid() as u64;

        if activate {
            deactivate_others(&tx, player_id, plan_id, &now)?;
        }

        let mut weeks: Vec<_> = blueprint.weeks.iter().collect();
        weeks.sort_by_key(|week| week.week_number);

        for week in weeks {
            tx.execute(
                INSERT_WEEK_SQL,
                params![
                    plan_id as i64,
                    week.week_number,
                    week.focus_area.as_deref(),
                    week.notes.as_deref()
                ],
            )
            .db_context("Failed to insert week")?;
            let week_id = tx.last_insert_rowid();

            for day in &week.days {
                tx.execute(
                    INSERT_DAY_SQL,
                    params![
                        week_id,
                        day.day_number,
                        day.day_of_week.as_deref(),
                        day.is_rest_day,
                        day.notes.as_deref()
                    ],
                )
                .db_context("Failed to insert day")?;
                let day_id = tx.last_insert_rowid();

                for (position, session) in day.sessions.iter().enumerate() {
                    tx.execute(
                        INSERT_SESSION_SQL,
                        params![
                            day_id,
                            SessionType::from_category(&session.session_type).as_str(),
                            session.duration,
                            session.intensity,
                            session.effective_order_index(position),
                            session.notes.as_deref()
                        ],
                    )
                    .db_context("Failed to insert session")?;
                    let session_id = tx.last_insert_rowid();

                    for (position, exercise_id) in session.exercise_ids.iter().enumerate() {
                        let linked = tx
                            .execute(
                                LINK_EXERCISE_SQL,
                                params![session_id, *exercise_id as i64, position as i64],
                            )
                            .db_context("Failed to link exercise")?;
                        if linked == 0 {
                            debug!("Exercise {exercise_id} not in library, omitted from session {session_id}");
                        }
                    }
                }
            }
        }

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(plan_id)
    }

    /// Retrieves a plan with its full tree.
    pub fn get_hierarchy(&self, plan_id: u64) -> Result<Option<PlanHierarchy>> {
        load_hierarchy(&self.connection, plan_id)
    }

    /// Lists plan summaries, newest first.
    pub fn list_plans(&self, filter: &PlanFilter) -> Result<Vec<PlanSummary>> {
        let mut query = String::from("SELECT id FROM plans");
        let mut conditions = Vec::new();
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(ref player_id) = filter.player_id {
            conditions.push("player_id = ?");
            params_vec.push(Box::new(player_id.clone()));
        }
        if !filter.include_inactive {
            conditions.push("is_active = 1");
        }
        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }
        query.push_str(" ORDER BY created_at DESC, id DESC");

        let ids = {
            let mut stmt = self
                .connection
                .prepare(&query)
                .db_context("Failed to prepare query")?;
            let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|b| &**b).collect();
            let result = stmt.query_map(&params_refs[..], |row| rows::id(row, 0))
                .db_context("Failed to query plans")?
                .collect::<rusqlite::Result<Vec<_>>>()
                .db_context("Failed to read plans")?;
            result
        };

        let mut summaries = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(hierarchy) = self.get_hierarchy(id)? {
                summaries.push(PlanSummary::from(&hierarchy));
            }
        }
        Ok(summaries)
    }

    /// Makes a plan its player's only active plan, stamping `started_at` the
    /// first time. Returns the updated plan, or `None` if it does not exist.
    ///
    /// Completed plans cannot be reactivated; they are cloned instead.
    pub fn activate_plan(&mut self, plan_id: u64) -> Result<Option<Plan>> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let owner: Option<(String, bool)> = tx
            .query_row(SELECT_PLAYER_SQL, params![plan_id as i64], |row| {
                Ok((row.get(0)?, row.get(1)?))
            })
            .optional()
            .db_context("Failed to query plan owner")?;
        let Some((player_id, completed)) = owner else {
            return Ok(None);
        };
        if completed {
            return Err(PlanError::invalid_input(
                "id",
                format!("Plan {plan_id} is already completed, clone it to train it again"),
            ));
        }

        let now = Timestamp::now().to_string();
        deactivate_others(&tx, &player_id, plan_id, &now)?;
        tx.execute(ACTIVATE_PLAN_SQL, params![&now, plan_id as i64])
            .db_context("Failed to activate plan")?;

        let plan = tx
            .query_row(
                &format!("SELECT {PLAN_COLUMNS} FROM plans WHERE id = ?1"),
                params![plan_id as i64],
                rows::plan_from_row,
            )
            .db_context("Failed to reload plan")?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(Some(plan))
    }

    /// Deletes a plan and, through cascading foreign keys, its whole tree.
    /// Returns whether a plan was deleted.
    pub fn delete_plan(&mut self, plan_id: u64) -> Result<bool> {
        let deleted = self
            .connection
            .execute(DELETE_PLAN_SQL, params![plan_id as i64])
            .db_context("Failed to delete plan")?;
        Ok(deleted > 0)
    }

    /// The plan a day belongs to.
    pub fn plan_id_for_day(&self, day_id: u64) -> Result<Option<u64>> {
        self.connection
            .query_row(SELECT_PLAN_FOR_DAY_SQL, params![day_id as i64], |row| {
                rows::id(row, 0)
            })
            .optional()
            .db_context("Failed to look up day")
    }

    /// The plan a session belongs to.
    pub fn plan_id_for_session(&self, session_id: u64) -> Result<Option<u64>> {
        self.connection
            .query_row(
                SELECT_PLAN_FOR_SESSION_SQL,
                params![session_id as i64],
                |row| rows::id(row, 0),
            )
            .optional()
            .db_context("Failed to look up session")
    }
}
