//! Row mapping shared by the query modules.

use jiff::Timestamp;
use rusqlite::{types::Type, Row};

use crate::models::{Day, Exercise, Plan, Session, SessionType, Week};

pub(super) const PLAN_COLUMNS: &str = "id, player_id, name, description, duration_weeks, difficulty, category, is_active, is_prebuilt, started_at, completed_at, progress_percentage, created_at, updated_at";
pub(super) const WEEK_COLUMNS: &str =
    "w.id, w.plan_id, w.week_number, w.focus_area, w.notes, w.is_completed, w.completed_at";
pub(super) const DAY_COLUMNS: &str = "d.id, d.week_id, d.day_number, d.day_of_week, d.is_rest_day, d.is_skipped, d.is_completed, d.completed_at, d.notes";
pub(super) const SESSION_COLUMNS: &str = "s.id, s.day_id, s.session_type, s.duration, s.intensity, s.order_index, s.notes, s.is_completed, s.completed_at, s.actual_duration, s.actual_intensity";
pub(super) const EXERCISE_COLUMNS: &str = "id, name, category, created_at";

fn timestamp(row: &Row, idx: usize) -> rusqlite::Result<Timestamp> {
    row.get::<_, String>(idx)?
        .parse::<Timestamp>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn optional_timestamp(row: &Row, idx: usize) -> rusqlite::Result<Option<Timestamp>> {
    row.get::<_, Option<String>>(idx)?
        .map(|s| {
            s.parse::<Timestamp>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))
            })
        })
        .transpose()
}

fn session_type(row: &Row, idx: usize) -> rusqlite::Result<SessionType> {
    let value: String = row.get(idx)?;
    value.parse::<SessionType>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, e.into())
    })
}

pub(super) fn id(row: &Row, idx: usize) -> rusqlite::Result<u64> {
    Ok(row.get::<_, i64>(idx)? as u64)
}

/// Formats a timestamp for storage.
pub(super) fn stamp(ts: Option<Timestamp>) -> Option<String> {
    ts.map(|t| t.to_string())
}

/// Maps a row selected with [`PLAN_COLUMNS`].
pub(super) fn plan_from_row(row: &Row) -> rusqlite::Result<Plan> {
    Ok(Plan {
        id: id(row, 0)?,
        player_id: row.get(1)?,
        name: row.get(2)?,
        description: row.get(3)?,
        duration_weeks: row.get(4)?,
        difficulty: row.get(5)?,
        category: row.get(6)?,
        is_active: row.get(7)?,
        is_prebuilt: row.get(8)?,
        started_at: optional_timestamp(row, 9)?,
        completed_at: optional_timestamp(row, 10)?,
        progress_percentage: row.get(11)?,
        created_at: timestamp(row, 12)?,
        updated_at: timestamp(row, 13)?,
    })
}

/// Maps a row selected with [`WEEK_COLUMNS`].
pub(super) fn week_from_row(row: &Row) -> rusqlite::Result<Week> {
    Ok(Week {
        id: id(row, 0)?,
        plan_id: id(row, 1)?,
        week_number: row.get(2)?,
        focus_area: row.get(3)?,
        notes: row.get(4)?,
        is_completed: row.get(5)?,
        completed_at: optional_timestamp(row, 6)?,
    })
}

/// Maps a row selected with [`DAY_COLUMNS`].
pub(super) fn day_from_row(row: &Row) -> rusqlite::Result<Day> {
    Ok(Day {
        id: id(row, 0)?,
        week_id: id(row, 1)?,
        day_number: row.get(2)?,
        day_of_week: row.get(3)?,
        is_rest_day: row.get(4)?,
        is_skipped: row.get(5)?,
        is_completed: row.get(6)?,
        completed_at: optional_timestamp(row, 7)?,
        notes: row.get(8)?,
    })
}

/// Maps a row selected with [`SESSION_COLUMNS`]. Exercises are attached
/// separately.
pub(super) fn session_from_row(row: &Row) -> rusqlite::Result<Session> {
    Ok(Session {
        id: id(row, 0)?,
        day_id: id(row, 1)?,
        session_type: session_type(row, 2)?,
        duration: row.get(3)?,
        intensity: row.get(4)?,
        order_index: row.get(5)?,
        notes: row.get(6)?,
        is_completed: row.get(7)?,
        completed_at: optional_timestamp(row, 8)?,
        actual_duration: row.get(9)?,
        actual_intensity: row.get(10)?,
        exercises: Vec::new(),
    })
}

/// Maps a row selected with [`EXERCISE_COLUMNS`].
pub(super) fn exercise_from_row(row: &Row) -> rusqlite::Result<Exercise> {
    Ok(Exercise {
        id: id(row, 0)?,
        name: row.get(1)?,
        category: session_type(row, 2)?,
        created_at: timestamp(row, 3)?,
    })
}
