//! Exercise library operations for the Planner.

use super::Planner;
use crate::{
    display::Exercises,
    error::Result,
    models::{Exercise, SessionType},
    params::AddExercise,
};

impl Planner {
    /// Adds an exercise to the library.
    pub async fn add_exercise(&self, params: &AddExercise) -> Result<Exercise> {
        let name = params.name.clone();
        let category = params
            .category
            .as_deref()
            .map(SessionType::from_category)
            .unwrap_or_default();
        self.with_database("add exercise", move |db| db.add_exercise(&name, category))
            .await
    }

    /// Lists the library sorted by name.
    pub async fn list_exercises(&self) -> Result<Exercises> {
        self.with_database("list exercises", |db| db.list_exercises())
            .await
            .map(Exercises)
    }
}
