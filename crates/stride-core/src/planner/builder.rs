//! Builder for creating and configuring Planner instances.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use log::debug;

use super::Planner;
use crate::{
    checkin::{CheckInSink, LogCheckInSink},
    error::{PlanError, Result},
    matcher::{ExerciseMatcher, LibraryMatcher},
};

/// Builder for creating and configuring Planner instances.
#[derive(Clone, Default)]
pub struct PlannerBuilder {
    database_path: Option<PathBuf>,
    matcher: Option<Arc<dyn ExerciseMatcher>>,
    check_in_sink: Option<Arc<dyn CheckInSink>>,
}

impl PlannerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/stride/stride.db` or `~/.local/share/stride/stride.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Replaces the default [`LibraryMatcher`].
    pub fn with_exercise_matcher(mut self, matcher: Arc<dyn ExerciseMatcher>) -> Self {
        self.matcher = Some(matcher);
        self
    }

    /// Replaces the default [`LogCheckInSink`].
    pub fn with_check_in_sink(mut self, sink: Arc<dyn CheckInSink>) -> Self {
        self.check_in_sink = Some(sink);
        self
    }

    /// Builds the configured planner instance.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::FileSystem` if the database directory cannot be
    /// created, `PlanError::XdgDirectory` if no default location exists, and
    /// `PlanError::Database` if schema initialization fails
    pub async fn build(self) -> Result<Planner> {
        let db_path = match self.database_path {
            Some(path) => path,
            None => Self::default_database_path()?,
        };

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| PlanError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let matcher = self
            .matcher
            .unwrap_or_else(|| Arc::new(LibraryMatcher::new(db_path.clone())));
        let check_ins = self
            .check_in_sink
            .unwrap_or_else(|| Arc::new(LogCheckInSink));

        let planner = Planner::new(db_path, matcher, check_ins);
        planner
            .with_database("initialize database", |_db| Ok(()))
            .await?;
        debug!("Planner ready at {}", planner.db_path.display());
        Ok(planner)
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("stride")
            .place_data_file("stride.db")
            .map_err(|e| PlanError::XdgDirectory(e.to_string()))
    }
}
