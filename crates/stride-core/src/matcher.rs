//! Exercise matching collaborator.
//!
//! Sessions reference exercises owned by a separate library. When a plan is
//! imported or an adaptation adds a drill, names are resolved into
//! [`ExerciseRef`]s through an [`ExerciseMatcher`]. Zero matches is a valid
//! answer, and callers treat a matcher error the same way after logging it.

use std::path::PathBuf;

use log::warn;

use crate::{
    db::Database,
    models::{ExerciseRef, SessionType},
};

/// Resolves exercise names into library references.
///
/// Implementations may call out to a remote service; they run on a blocking
/// worker thread while the plan's write lock is held, so nothing they do can
/// observe a half-applied plan.
pub trait ExerciseMatcher: Send + Sync {
    /// Returns zero or more exercises matching `names`.
    fn match_exercises(
        &self,
        names: &[String],
        session_type: SessionType,
        player_id: &str,
    ) -> anyhow::Result<Vec<ExerciseRef>>;
}

/// Matches names case-insensitively against the local exercise library.
#[derive(Debug, Clone)]
pub struct LibraryMatcher {
    db_path: PathBuf,
}

impl LibraryMatcher {
    pub fn new(db_path: PathBuf) -> Self {
        Self { db_path }
    }
}

impl ExerciseMatcher for LibraryMatcher {
    fn match_exercises(
        &self,
        names: &[String],
        _session_type: SessionType,
        _player_id: &str,
    ) -> anyhow::Result<Vec<ExerciseRef>> {
        let db = Database::new(&self.db_path)?;
        Ok(db.find_exercises_by_names(names)?)
    }
}

/// Calls a matcher, degrading any failure to an empty match list.
pub(crate) fn match_or_empty(
    matcher: &dyn ExerciseMatcher,
    names: &[String],
    session_type: SessionType,
    player_id: &str,
) -> Vec<ExerciseRef> {
    matcher
        .match_exercises(names, session_type, player_id)
        .unwrap_or_else(|e| {
            warn!("Exercise matching failed for {names:?}, continuing without exercises: {e:#}");
            Vec::new()
        })
}
