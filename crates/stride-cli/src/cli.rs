//! Command handlers for the Stride CLI.
//!
//! Every handler calls one planner operation and renders the markdown
//! produced by the result's `Display` implementation. Missing plans, days
//! and sessions are reported as errors so the process exits non-zero.

use std::{fmt, fs};

use anyhow::{bail, Context, Result};
use stride_core::{
    display::{CreateResult, DeleteResult, OperationStatus, UpdateResult},
    models::{Adaptation, PlanBlueprint},
    params::{ApplyAdaptation, CreatePlan, Id, ListPlans},
    Planner,
};

use crate::{
    args::{
        AdaptPlanArgs, DayCommands, ExerciseCommands, ImportPlanArgs, PlanCommands,
        SessionCommands,
    },
    renderer::TerminalRenderer,
};

pub struct Cli {
    planner: Planner,
    renderer: TerminalRenderer,
    player: String,
}

impl Cli {
    pub fn new(planner: Planner, renderer: TerminalRenderer, player: String) -> Self {
        Self {
            planner,
            renderer,
            player,
        }
    }

    pub async fn handle_plan_command(&self, command: PlanCommands) -> Result<()> {
        match command {
            PlanCommands::Import(args) => self.import_plan(args).await?,
            PlanCommands::List(args) => {
                self.list_plans(&ListPlans {
                    player_id: Some(self.player.clone()),
                    include_inactive: args.all,
                })
                .await?;
            }
            PlanCommands::Show(args) => {
                let id = args.id;
                let plan = self
                    .planner
                    .get_plan(&args.into())
                    .await
                    .context("Failed to load plan")?;
                match plan {
                    Some(plan) => self.render(&plan),
                    None => bail!("Plan with ID {id} not found"),
                }
            }
            PlanCommands::Current(args) => {
                let current = self
                    .planner
                    .current_day(&args.into())
                    .await
                    .context("Failed to resolve the current day")?;
                match current {
                    Some(day) => self.render(&day),
                    None => self.render(&OperationStatus::success(
                        "Nothing left to train, every day is settled".to_string(),
                    )),
                }
            }
            PlanCommands::Activate(args) => {
                let id = args.id;
                let plan = self
                    .planner
                    .activate_plan(&args.into())
                    .await
                    .context("Failed to activate plan")?;
                match plan {
                    Some(plan) => {
                        let change = format!(
                            "Active plan for player '{}', any other plan deactivated",
                            plan.player_id
                        );
                        self.render(&UpdateResult::with_changes(plan, vec![change]));
                    }
                    None => bail!("Plan with ID {id} not found"),
                }
            }
            PlanCommands::Clone(args) => {
                let copy = self
                    .planner
                    .clone_plan(&args.into())
                    .await
                    .context("Failed to clone plan")?;
                self.render(&CreateResult::new(copy));
            }
            PlanCommands::Delete(args) => {
                let id = args.id;
                let deleted = self
                    .planner
                    .delete_plan(&args.into())
                    .await
                    .context("Failed to delete plan")?;
                match deleted {
                    Some(summary) => self.render(&DeleteResult::new(summary)),
                    None => bail!("Plan with ID {id} not found"),
                }
            }
            PlanCommands::Adapt(args) => self.adapt_plan(args).await?,
        }
        Ok(())
    }

    pub async fn handle_session_command(&self, command: SessionCommands) -> Result<()> {
        match command {
            SessionCommands::Complete(args) => {
                let id = args.id;
                let update = self
                    .planner
                    .complete_session(&args.into())
                    .await
                    .context("Failed to complete session")?;
                match update {
                    Some(update) => self.render(&update),
                    None => bail!("Session with ID {id} not found"),
                }
            }
        }
        Ok(())
    }

    pub async fn handle_day_command(&self, command: DayCommands) -> Result<()> {
        let (id, update) = match command {
            DayCommands::Complete(args) => {
                let id = args.id;
                let update = self
                    .planner
                    .complete_day(&args.into())
                    .await
                    .context("Failed to complete day")?;
                (id, update)
            }
            DayCommands::Skip(args) => {
                let id = args.id;
                let update = self
                    .planner
                    .skip_day(&args.into())
                    .await
                    .context("Failed to skip day")?;
                (id, update)
            }
        };
        match update {
            Some(update) => self.render(&update),
            None => bail!("Day with ID {id} not found"),
        }
        Ok(())
    }

    pub async fn handle_exercise_command(&self, command: ExerciseCommands) -> Result<()> {
        match command {
            ExerciseCommands::Add(args) => {
                let exercise = self
                    .planner
                    .add_exercise(&args.into())
                    .await
                    .context("Failed to add exercise")?;
                self.render(&CreateResult::new(exercise));
            }
            ExerciseCommands::List => {
                let exercises = self
                    .planner
                    .list_exercises()
                    .await
                    .context("Failed to list exercises")?;
                self.render(&exercises);
            }
        }
        Ok(())
    }

    pub async fn list_plans(&self, params: &ListPlans) -> Result<()> {
        let summaries = self
            .planner
            .list_plans(params)
            .await
            .context("Failed to list plans")?;

        let title = if params.include_inactive {
            "All Plans"
        } else {
            "Active Plans"
        };
        if summaries.is_empty() {
            self.renderer.render(&summaries.to_string());
        } else {
            self.renderer.render(&format!("# {title}\n\n{summaries}"));
        }
        Ok(())
    }

    async fn import_plan(&self, args: ImportPlanArgs) -> Result<()> {
        let json = fs::read_to_string(&args.file)
            .with_context(|| format!("Failed to read {}", args.file.display()))?;
        let blueprint = PlanBlueprint::from_json(&json)
            .with_context(|| format!("Invalid plan blueprint in {}", args.file.display()))?;

        let plan = self
            .planner
            .create_plan(&CreatePlan {
                player_id: self.player.clone(),
                blueprint,
                activate: args.activate,
            })
            .await
            .context("Failed to import plan")?;
        self.render(&CreateResult::new(plan));
        Ok(())
    }

    async fn adapt_plan(&self, args: AdaptPlanArgs) -> Result<()> {
        let adaptation = parse_adaptation(&args.adaptation)?;
        let outcome = self
            .planner
            .apply_adaptation(&ApplyAdaptation {
                plan_id: args.id,
                week_number: args.week,
                adaptation,
            })
            .await
            .context("Failed to apply adaptation")?;
        self.render(&outcome);

        if outcome.is_applied() {
            let progress = self
                .planner
                .progress(&Id { id: args.id })
                .await
                .context("Failed to read plan progress")?;
            self.renderer
                .render(&format!("\nPlan {} is {progress:.1}% complete.\n", args.id));
        }
        Ok(())
    }

    fn render(&self, value: &impl fmt::Display) {
        self.renderer.render(&value.to_string());
    }
}

/// Parses inline adaptation JSON, or reads it from a file when prefixed
/// with `@`.
fn parse_adaptation(source: &str) -> Result<Adaptation> {
    let json = match source.strip_prefix('@') {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read adaptation file {path}"))?,
        None => source.to_string(),
    };
    serde_json::from_str(&json).context("Invalid adaptation JSON")
}
