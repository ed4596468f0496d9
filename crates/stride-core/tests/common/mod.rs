use stride_core::{models::PlanBlueprint, params::CreatePlan, PlanHierarchy, Planner, PlannerBuilder};
use tempfile::TempDir;

/// Helper function to create a test planner
pub async fn create_test_planner() -> (TempDir, Planner) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let planner = PlannerBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create planner");
    (temp_dir, planner)
}

/// Two weeks, six sessions: 2 + rest + 1 in week one, 1 + 2 in week two.
pub fn two_week_blueprint() -> PlanBlueprint {
    PlanBlueprint::from_json(
        r#"{
            "name": "Winger Development",
            "description": "Pace and final ball",
            "difficulty": "Advanced",
            "category": "Physical",
            "weeks": [
                {
                    "week_number": 1,
                    "focus_area": "Acceleration",
                    "days": [
                        { "day_number": 1, "day_of_week": "Monday", "sessions": [
                            { "session_type": "physical", "duration": 25, "intensity": 4, "suggested_exercise_names": ["Sprints"] },
                            { "session_type": "technical", "duration": 30, "intensity": 3, "notes": "Crossing on the run" } ] },
                        { "day_number": 2, "day_of_week": "Tuesday", "is_rest_day": true },
                        { "day_number": 3, "day_of_week": "Wednesday", "sessions": [
                            { "session_type": "recovery", "duration": 20, "intensity": 1, "suggested_exercise_names": ["foam rolling"] } ] }
                    ]
                },
                {
                    "week_number": 2,
                    "focus_area": "Final third",
                    "days": [
                        { "day_number": 1, "sessions": [
                            { "session_type": "tactical", "duration": 40, "intensity": 3 } ] },
                        { "day_number": 2, "sessions": [
                            { "session_type": "technical", "duration": 30, "intensity": 2, "order_index": 4 },
                            { "session_type": "physical", "duration": 15, "intensity": 5, "order_index": 9 } ] }
                    ]
                }
            ]
        }"#,
    )
    .expect("valid blueprint")
}

pub async fn import(planner: &Planner, player_id: &str, activate: bool) -> PlanHierarchy {
    planner
        .create_plan(&CreatePlan {
            player_id: player_id.to_string(),
            blueprint: two_week_blueprint(),
            activate,
        })
        .await
        .expect("Failed to import plan")
}

/// Session counts per day, in schedule order.
pub fn day_shapes(hierarchy: &PlanHierarchy) -> Vec<Vec<usize>> {
    hierarchy
        .weeks()
        .map(|week| {
            hierarchy
                .days(week.id)
                .map(|day| hierarchy.session_count(day.id))
                .collect()
        })
        .collect()
}

/// The id of the n-th day (1-based) of a week.
pub fn day_id(hierarchy: &PlanHierarchy, week_number: u32, day_number: u8) -> u64 {
    let week = hierarchy.week_by_number(week_number).expect("week");
    hierarchy.day_by_number(week.id, day_number).expect("day").id
}
