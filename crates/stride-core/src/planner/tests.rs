//! Tests for the planner module.

use std::sync::{Arc, Mutex};

use tempfile::TempDir;

use super::{Planner, PlannerBuilder};
use crate::{
    checkin::{CheckIn, CheckInSink},
    hierarchy::PlanHierarchy,
    matcher::ExerciseMatcher,
    models::{
        Adaptation, AdaptationKind, AdaptationOutcome, Drill, ExerciseRef, PlanBlueprint,
        SessionType,
    },
    params::{
        AddExercise, ApplyAdaptation, ClonePlan, CompleteSession, CreatePlan, DeletePlan, Id,
        ListPlans,
    },
    PlanError,
};

/// Records every delivered check-in.
#[derive(Default)]
struct RecordingSink {
    received: Mutex<Vec<CheckIn>>,
    fail: bool,
}

impl CheckInSink for RecordingSink {
    fn weekly_check_in_available(&self, check_in: &CheckIn) -> anyhow::Result<()> {
        self.received.lock().expect("sink lock").push(*check_in);
        if self.fail {
            anyhow::bail!("notification service down");
        }
        Ok(())
    }
}

impl RecordingSink {
    fn weeks(&self) -> Vec<u32> {
        self.received
            .lock()
            .expect("sink lock")
            .iter()
            .map(|c| c.week_number)
            .collect()
    }
}

/// Answers every lookup with one fixed exercise.
struct StubMatcher(ExerciseRef);

impl ExerciseMatcher for StubMatcher {
    fn match_exercises(
        &self,
        _names: &[String],
        _session_type: SessionType,
        _player_id: &str,
    ) -> anyhow::Result<Vec<ExerciseRef>> {
        Ok(vec![self.0.clone()])
    }
}

async fn create_test_planner(sink: Arc<RecordingSink>) -> (TempDir, Planner) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let planner = PlannerBuilder::new()
        .with_database_path(Some(temp_dir.path().join("test.db")))
        .with_check_in_sink(sink)
        .build()
        .await
        .expect("Failed to create planner");
    (temp_dir, planner)
}

/// One week: day 1 with one session, day 2 rest, day 3 with one session.
fn scenario_blueprint() -> PlanBlueprint {
    PlanBlueprint::from_json(
        r#"{
            "name": "Ball Mastery",
            "weeks": [{
                "week_number": 1,
                "days": [
                    { "day_number": 1, "sessions": [ { "session_type": "technical", "duration": 30, "intensity": 3 } ] },
                    { "day_number": 2, "is_rest_day": true },
                    { "day_number": 3, "sessions": [ { "session_type": "physical", "duration": 20, "intensity": 4 } ] }
                ]
            }]
        }"#,
    )
    .expect("valid blueprint")
}

async fn import(planner: &Planner, blueprint: PlanBlueprint) -> PlanHierarchy {
    planner
        .create_plan(&CreatePlan {
            player_id: "player-1".to_string(),
            blueprint,
            activate: true,
        })
        .await
        .expect("Failed to import plan")
}

fn first_session_of_day(hierarchy: &PlanHierarchy, day_number: u8) -> u64 {
    let week = hierarchy.week_by_number(1).expect("week 1");
    let day = hierarchy.day_by_number(week.id, day_number).expect("day");
    hierarchy.session_at(day.id, 0).expect("session").id
}

fn day_id(hierarchy: &PlanHierarchy, day_number: u8) -> u64 {
    let week = hierarchy.week_by_number(1).expect("week 1");
    hierarchy.day_by_number(week.id, day_number).expect("day").id
}

#[tokio::test]
async fn test_session_completion_then_current_day_skips_rest() {
    let sink = Arc::new(RecordingSink::default());
    let (_temp_dir, planner) = create_test_planner(Arc::clone(&sink)).await;
    let plan = import(&planner, scenario_blueprint()).await;
    let plan_id = plan.plan().id;

    let update = planner
        .complete_session(&CompleteSession {
            id: first_session_of_day(&plan, 1),
            actual_duration: Some(35),
            actual_intensity: Some(4),
        })
        .await
        .expect("complete session")
        .expect("session exists");
    assert!(update.changed);
    assert_eq!(update.progress_percentage, 50.0);
    assert!(update.weeks_completed.is_empty());

    let current = planner
        .current_day(&Id { id: plan_id })
        .await
        .expect("current day")
        .expect("day 3 is open");
    assert_eq!(current.week_number, 1);
    assert_eq!(current.day_number(), 3);
    assert_eq!(current.sessions.len(), 1);

    let stored = planner
        .get_plan(&Id { id: plan_id })
        .await
        .expect("load")
        .expect("plan exists");
    let rest_day = stored.day(day_id(&stored, 2)).expect("rest day");
    assert!(rest_day.is_completed);
    assert!(rest_day.completed_at.is_some());
    let session = stored.session(first_session_of_day(&stored, 1)).expect("session");
    assert_eq!(session.actual_duration, Some(35));
    assert_eq!(session.actual_intensity, Some(4));

    // Stable without an intervening event
    let again = planner
        .current_day(&Id { id: plan_id })
        .await
        .expect("current day")
        .expect("day 3 is open");
    assert_eq!(again.day.id, current.day.id);
    assert!(sink.weeks().is_empty());
}

#[tokio::test]
async fn test_skipping_last_day_completes_week_and_plan() {
    let sink = Arc::new(RecordingSink::default());
    let (_temp_dir, planner) = create_test_planner(Arc::clone(&sink)).await;
    let plan = import(&planner, scenario_blueprint()).await;
    let plan_id = plan.plan().id;

    planner
        .complete_day(&Id { id: day_id(&plan, 1) })
        .await
        .expect("complete day")
        .expect("day exists");
    planner
        .current_day(&Id { id: plan_id })
        .await
        .expect("current day");

    let update = planner
        .skip_day(&Id { id: day_id(&plan, 3) })
        .await
        .expect("skip day")
        .expect("day exists");
    assert_eq!(update.weeks_completed, vec![1]);
    assert!(update.plan_completed);
    assert_eq!(update.progress_percentage, 100.0);
    assert_eq!(sink.weeks(), vec![1]);

    let stored = planner
        .get_plan(&Id { id: plan_id })
        .await
        .expect("load")
        .expect("plan exists");
    assert!(stored.plan().is_completed());
    assert!(!stored.plan().is_active);
    assert!(stored.weeks().all(|w| w.is_completed));
    assert!(planner
        .current_day(&Id { id: plan_id })
        .await
        .expect("current day")
        .is_none());

    // Skipping again changes nothing and sends no second check-in
    let repeat = planner
        .skip_day(&Id { id: day_id(&plan, 3) })
        .await
        .expect("skip day")
        .expect("day exists");
    assert!(!repeat.changed);
    assert_eq!(sink.weeks(), vec![1]);
}

#[tokio::test]
async fn test_sink_failure_does_not_fail_the_cascade() {
    let sink = Arc::new(RecordingSink {
        fail: true,
        ..Default::default()
    });
    let (_temp_dir, planner) = create_test_planner(Arc::clone(&sink)).await;
    let plan = import(&planner, scenario_blueprint()).await;

    planner
        .skip_day(&Id { id: day_id(&plan, 1) })
        .await
        .expect("skip day");
    let update = planner
        .skip_day(&Id { id: day_id(&plan, 3) })
        .await
        .expect("skip day still succeeds")
        .expect("day exists");
    assert!(update.plan_completed);
    assert_eq!(sink.weeks(), vec![1]);
}

#[tokio::test]
async fn test_missing_targets() {
    let (_temp_dir, planner) = create_test_planner(Arc::default()).await;

    let missing_session = planner
        .complete_session(&CompleteSession {
            id: 999,
            ..Default::default()
        })
        .await
        .expect("no error");
    assert!(missing_session.is_none());
    assert!(planner.skip_day(&Id { id: 999 }).await.expect("no error").is_none());
    assert!(planner.get_plan(&Id { id: 999 }).await.expect("no error").is_none());

    assert!(matches!(
        planner.current_day(&Id { id: 999 }).await,
        Err(PlanError::PlanNotFound { id: 999 })
    ));
    assert!(matches!(
        planner
            .clone_plan(&ClonePlan {
                id: 999,
                name: None
            })
            .await,
        Err(PlanError::PlanNotFound { id: 999 })
    ));
}

#[tokio::test]
async fn test_actual_intensity_is_validated() {
    let (_temp_dir, planner) = create_test_planner(Arc::default()).await;
    let plan = import(&planner, scenario_blueprint()).await;

    let result = planner
        .complete_session(&CompleteSession {
            id: first_session_of_day(&plan, 1),
            actual_duration: None,
            actual_intensity: Some(6),
        })
        .await;
    assert!(matches!(result, Err(PlanError::InvalidInput { .. })));
}

fn add_session_adaptation(difficulty: u8) -> Adaptation {
    Adaptation {
        kind: AdaptationKind::AddSession {
            day: 1,
            drill: Drill {
                name: "Cone Weave".to_string(),
                category: "technical".to_string(),
                duration: 20,
                difficulty,
            },
        },
        description: "Extra close control".to_string(),
    }
}

#[tokio::test]
async fn test_add_session_uses_matcher_and_refreshes_progress() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let planner = PlannerBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create planner");
    let exercise = planner
        .add_exercise(&AddExercise {
            name: "Cone Weaving".to_string(),
            category: Some("technical".to_string()),
        })
        .await
        .expect("add exercise");
    let planner = PlannerBuilder::new()
        .with_database_path(Some(&db_path))
        .with_exercise_matcher(Arc::new(StubMatcher(ExerciseRef::from(&exercise))))
        .build()
        .await
        .expect("Failed to create planner");

    let plan = import(&planner, scenario_blueprint()).await;
    let plan_id = plan.plan().id;
    planner
        .complete_session(&CompleteSession {
            id: first_session_of_day(&plan, 1),
            ..Default::default()
        })
        .await
        .expect("complete session");

    let outcome = planner
        .apply_adaptation(&ApplyAdaptation {
            plan_id,
            week_number: 1,
            adaptation: add_session_adaptation(2),
        })
        .await
        .expect("apply adaptation");
    let AdaptationOutcome::Added(session) = outcome else {
        panic!("expected a new session, got {outcome:?}");
    };
    assert_eq!(session.order_index, 1);
    assert_eq!(session.intensity, 2);
    assert_eq!(session.notes.as_deref(), Some("Extra close control"));

    let stored = planner
        .get_plan(&Id { id: plan_id })
        .await
        .expect("load")
        .expect("plan exists");
    let day = day_id(&stored, 1);
    assert_eq!(stored.session_count(day), 2);
    let added = stored.session(session.id).expect("added session");
    assert_eq!(added.exercises, vec![ExerciseRef::from(&exercise)]);
    // One of three countable sessions is done now
    assert!((stored.plan().progress_percentage - 100.0 / 3.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_adaptation_rejects_out_of_range_intensity() {
    let (_temp_dir, planner) = create_test_planner(Arc::default()).await;
    let plan = import(&planner, scenario_blueprint()).await;

    for difficulty in [0, 6] {
        let result = planner
            .apply_adaptation(&ApplyAdaptation {
                plan_id: plan.plan().id,
                week_number: 1,
                adaptation: add_session_adaptation(difficulty),
            })
            .await;
        assert!(matches!(result, Err(PlanError::InvalidInput { .. })));
    }

    let stored = planner
        .get_plan(&Id { id: plan.plan().id })
        .await
        .expect("load")
        .expect("plan exists");
    assert_eq!(stored.session_count(day_id(&stored, 1)), 1);
}

#[tokio::test]
async fn test_nonexistent_week_is_ignored() {
    let (_temp_dir, planner) = create_test_planner(Arc::default()).await;
    let plan = import(&planner, scenario_blueprint()).await;

    let outcome = planner
        .apply_adaptation(&ApplyAdaptation {
            plan_id: plan.plan().id,
            week_number: 7,
            adaptation: add_session_adaptation(3),
        })
        .await
        .expect("apply adaptation");
    assert_eq!(outcome, AdaptationOutcome::Ignored);
}

/// Makes every insert into `table` fail, simulating a storage failure.
fn break_inserts(db_path: &std::path::Path, table: &str) {
    let conn = rusqlite::Connection::open(db_path).expect("open");
    conn.execute_batch(&format!(
        "CREATE TRIGGER fail_{table} BEFORE INSERT ON {table} BEGIN SELECT RAISE(ABORT, 'disk full'); END;"
    ))
    .expect("create trigger");
}

#[tokio::test]
async fn test_failed_clone_leaves_no_partial_plan() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let planner = PlannerBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create planner");
    let plan = import(&planner, scenario_blueprint()).await;

    // Plan and week rows insert fine, the first session does not
    break_inserts(&db_path, "sessions");

    let result = planner
        .clone_plan(&ClonePlan {
            id: plan.plan().id,
            name: None,
        })
        .await;
    assert!(matches!(&result, Err(e) if e.is_storage_failure()));

    let all = planner
        .list_plans(&ListPlans {
            player_id: None,
            include_inactive: true,
        })
        .await
        .expect("list plans");
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, plan.plan().id);
}

#[tokio::test]
async fn test_failed_adaptation_leaves_sessions_unchanged() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let planner = PlannerBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create planner");
    let plan = import(&planner, scenario_blueprint()).await;
    let before = plan.plan().updated_at;

    break_inserts(&db_path, "sessions");

    let result = planner
        .apply_adaptation(&ApplyAdaptation {
            plan_id: plan.plan().id,
            week_number: 1,
            adaptation: add_session_adaptation(3),
        })
        .await;
    assert!(matches!(&result, Err(e) if e.is_storage_failure()));

    let stored = planner
        .get_plan(&Id { id: plan.plan().id })
        .await
        .expect("load")
        .expect("plan exists");
    assert_eq!(stored.session_count(day_id(&stored, 1)), 1);
    assert_eq!(stored.plan().updated_at, before);
}

#[tokio::test]
async fn test_delete_requires_confirmation() {
    let (_temp_dir, planner) = create_test_planner(Arc::default()).await;
    let plan = import(&planner, scenario_blueprint()).await;
    let plan_id = plan.plan().id;

    let refused = planner
        .delete_plan(&DeletePlan {
            id: plan_id,
            confirmed: false,
        })
        .await;
    assert!(matches!(refused, Err(PlanError::InvalidInput { .. })));

    let deleted = planner
        .delete_plan(&DeletePlan {
            id: plan_id,
            confirmed: true,
        })
        .await
        .expect("delete")
        .expect("plan existed");
    assert_eq!(deleted.total_sessions, 2);
    assert!(planner.get_plan(&Id { id: plan_id }).await.expect("load").is_none());
}

#[tokio::test]
async fn test_concurrent_completions_on_one_plan_are_serialized() {
    let sink = Arc::new(RecordingSink::default());
    let (_temp_dir, planner) = create_test_planner(Arc::clone(&sink)).await;
    let planner = Arc::new(planner);
    let plan = import(&planner, scenario_blueprint()).await;
    let plan_id = plan.plan().id;

    let handles: Vec<_> = [day_id(&plan, 1), day_id(&plan, 3)]
        .into_iter()
        .map(|day| {
            let planner = Arc::clone(&planner);
            tokio::spawn(async move { planner.complete_day(&Id { id: day }).await })
        })
        .collect();
    for handle in handles {
        handle.await.expect("task").expect("complete day");
    }

    // Whichever ran second saw the first's write and closed the week once
    assert_eq!(sink.weeks(), vec![1]);
    let stored = planner
        .get_plan(&Id { id: plan_id })
        .await
        .expect("load")
        .expect("plan exists");
    assert!(stored.plan().is_completed());
}
