//! Checks that CLI output is exactly the core Display output, so the CLI
//! and the MCP server show the same text.

use std::process::Command;

use stride_core::{
    models::PlanBlueprint,
    params::{CreatePlan, Id, ListPlans},
    Planner, PlannerBuilder,
};
use tempfile::TempDir;

async fn create_test_planner() -> (Planner, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let planner = PlannerBuilder::new()
        .with_database_path(Some(temp_dir.path().join("test.db")))
        .build()
        .await
        .expect("Failed to create planner");
    (planner, temp_dir)
}

/// Run a CLI command and capture its output
fn run_cli_command(temp_dir: &TempDir, args: &[&str]) -> String {
    let db_path = temp_dir.path().join("test.db");
    let output = Command::new(env!("CARGO_BIN_EXE_stride"))
        .arg("--no-color")
        .arg("--database-file")
        .arg(db_path)
        .args(args)
        .env_remove("STRIDE_PLAYER")
        .output()
        .expect("Failed to run CLI command");
    String::from_utf8(output.stdout).expect("Invalid UTF-8 in CLI output")
}

async fn import(planner: &Planner) -> u64 {
    let blueprint = PlanBlueprint::from_json(
        r#"{"name": "Strength Base", "category": "Physical", "weeks": [
            {"week_number": 1, "days": [
                {"day_number": 1, "sessions": [
                    {"session_type": "physical", "duration": 45, "intensity": 4, "notes": "Squats"},
                    {"session_type": "recovery", "duration": 15, "intensity": 1}]},
                {"day_number": 2, "is_rest_day": true}]},
            {"week_number": 2, "focus_area": "Power", "days": [
                {"day_number": 1, "sessions": [
                    {"session_type": "physical", "duration": 40, "intensity": 5}]}]}]}"#,
    )
    .expect("valid blueprint");
    planner
        .create_plan(&CreatePlan {
            player_id: "default".to_string(),
            blueprint,
            activate: true,
        })
        .await
        .expect("Failed to create plan")
        .plan()
        .id
}

#[tokio::test]
async fn test_show_plan_consistency() {
    let (planner, temp_dir) = create_test_planner().await;
    let plan_id = import(&planner).await;

    let plan = planner
        .get_plan(&Id { id: plan_id })
        .await
        .expect("Failed to get plan")
        .expect("plan exists");

    let cli_output = run_cli_command(&temp_dir, &["plan", "show", &plan_id.to_string()]);
    assert_eq!(cli_output, plan.to_string());
}

#[tokio::test]
async fn test_list_plans_consistency() {
    let (planner, temp_dir) = create_test_planner().await;
    import(&planner).await;

    let summaries = planner
        .list_plans(&ListPlans {
            player_id: Some("default".to_string()),
            include_inactive: false,
        })
        .await
        .expect("Failed to list plans");

    let cli_output = run_cli_command(&temp_dir, &["plan", "list"]);
    assert_eq!(cli_output, format!("# Active Plans\n\n{summaries}"));
}

#[tokio::test]
async fn test_current_day_consistency() {
    let (planner, temp_dir) = create_test_planner().await;
    let plan_id = import(&planner).await;

    let cli_output = run_cli_command(&temp_dir, &["plan", "current", &plan_id.to_string()]);
    let current = planner
        .current_day(&Id { id: plan_id })
        .await
        .expect("Failed to resolve current day")
        .expect("day 1 is open");
    assert_eq!(cli_output, current.to_string());
}
