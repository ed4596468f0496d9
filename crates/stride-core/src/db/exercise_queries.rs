//! Exercise library queries.

use jiff::Timestamp;
use rusqlite::{params, params_from_iter, ErrorCode};

use super::rows::{self, EXERCISE_COLUMNS};
use crate::{
    error::{DatabaseResultExt, PlanError, Result},
    models::{Exercise, ExerciseRef, SessionType},
};

const INSERT_EXERCISE_SQL: &str =
    "INSERT INTO exercises (name, category, created_at) VALUES (?1, ?2, ?3)";

impl super::Database {
    /// Adds an exercise to the library. Names are unique ignoring case.
    pub fn add_exercise(&mut self, name: &str, category: SessionType) -> Result<Exercise> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PlanError::invalid_input(
                "name",
                "Exercise name cannot be empty",
            ));
        }

        let now = Timestamp::now();
        let inserted = self.connection.execute(
            INSERT_EXERCISE_SQL,
            params![name, category.as_str(), now.to_string()],
        );
        match inserted {
            Ok(_) => {}
            Err(rusqlite::Error::SqliteFailure(e, _)) if e.code == ErrorCode::ConstraintViolation => {
                return Err(PlanError::invalid_input(
                    "name",
                    format!("An exercise named '{name}' already exists"),
                ));
            }
            Err(e) => return Err(PlanError::database("Failed to insert exercise").with_source(e)),
        }

        Ok(Exercise {
            id: self.connection.last_insert_rowid() as u64,
            name: name.to_string(),
            category,
            created_at: now,
        })
    }

    /// Lists the library sorted by name.
    pub fn list_exercises(&self) -> Result<Vec<Exercise>> {
        let mut stmt = self
            .connection
            .prepare(&format!(
                "SELECT {EXERCISE_COLUMNS} FROM exercises ORDER BY name COLLATE NOCASE"
            ))
            .db_context("Failed to prepare query")?;
        let result = stmt.query_map([], rows::exercise_from_row)
            .db_context("Failed to query exercises")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read exercises");
        result
    }

    /// Finds exercises whose names match any of `names`, ignoring case and
    /// surrounding whitespace. Results follow the order of `names`.
    pub fn find_exercises_by_names(&self, names: &[String]) -> Result<Vec<ExerciseRef>> {
        let wanted: Vec<&str> = names
            .iter()
            .map(|n| n.trim())
            .filter(|n| !n.is_empty())
            .collect();
        if wanted.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = vec!["?"; wanted.len()].join(", ");
        let mut stmt = self
            .connection
            .prepare(&format!(
                "SELECT id, name FROM exercises WHERE name COLLATE NOCASE IN ({placeholders})"
            ))
            .db_context("Failed to prepare query")?;
        let found = stmt
            .query_map(params_from_iter(wanted.iter()), |row| {
                Ok(ExerciseRef {
                    id: rows::id(row, 0)?,
                    name: row.get(1)?,
                })
            })
            .db_context("Failed to query exercises")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read exercises")?;

        let mut ordered = Vec::with_capacity(found.len());
        for name in wanted {
            if let Some(exercise) = found.iter().find(|e| e.name.eq_ignore_ascii_case(name)) {
                if !ordered.contains(exercise) {
                    ordered.push(exercise.clone());
                }
            }
        }
        Ok(ordered)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use crate::{db::Database, error::PlanError, models::SessionType};

    #[test]
    fn test_library_names_are_unique_and_matched_case_insensitively() {
        let dir = TempDir::new().expect("tempdir");
        let mut db = Database::new(dir.path().join("test.db")).expect("database");

        let wall = db
            .add_exercise("Wall Passing", SessionType::Technical)
            .expect("add");
        let sprints = db.add_exercise("Sprints", SessionType::Physical).expect("add");
        let duplicate = db.add_exercise("wall passing", SessionType::Technical);
        assert!(matches!(duplicate, Err(PlanError::InvalidInput { .. })));
        assert!(db.add_exercise("  ", SessionType::Technical).is_err());

        let listed: Vec<String> = db
            .list_exercises()
            .expect("list")
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(listed, vec!["Sprints", "Wall Passing"]);

        let found = db
            .find_exercises_by_names(&[
                "SPRINTS".to_string(),
                " wall passing ".to_string(),
                "Rondo".to_string(),
                "sprints".to_string(),
            ])
            .expect("find");
        let ids: Vec<u64> = found.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![sprints.id, wall.id]);
        assert!(db.find_exercises_by_names(&[]).expect("find").is_empty());
    }
}
