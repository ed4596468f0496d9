//! Plan lifecycle operations for the Planner.

use std::sync::Arc;

use log::{debug, info};

use super::Planner;
use crate::{
    display::PlanSummaries,
    engine::{clone_blueprint, progress_percentage, resolve_exercise_names},
    error::{PlanError, Result},
    hierarchy::PlanHierarchy,
    models::{Plan, PlanFilter, PlanSummary},
    params::{ClonePlan, CreatePlan, DeletePlan, Id, ListPlans},
};

impl Planner {
    /// Imports a blueprint as a new plan.
    ///
    /// Suggested exercise names are resolved through the exercise matcher
    /// before the tree is inserted in a single transaction.
    pub async fn create_plan(&self, params: &CreatePlan) -> Result<PlanHierarchy> {
        let player_id = params.player_id.trim().to_string();
        if player_id.is_empty() {
            return Err(PlanError::invalid_input(
                "player_id",
                "Player ID cannot be empty",
            ));
        }
        params.blueprint.validate()?;

        let mut blueprint = params.blueprint.clone();
        let activate = params.activate;
        let matcher = Arc::clone(&self.matcher);

        let hierarchy = self
            .with_database("import plan", move |db| {
                resolve_exercise_names(&mut blueprint, matcher.as_ref(), &player_id);
                let plan_id = db.insert_blueprint(&player_id, &blueprint, activate)?;
                db.get_hierarchy(plan_id)?
                    .ok_or(PlanError::PlanNotFound { id: plan_id })
            })
            .await?;

        info!(
            "Imported plan {} '{}' for player {}",
            hierarchy.plan().id,
            hierarchy.plan().name,
            hierarchy.plan().player_id
        );
        Ok(hierarchy)
    }

    /// Retrieves a plan with its full week/day/session tree.
    pub async fn get_plan(&self, params: &Id) -> Result<Option<PlanHierarchy>> {
        let plan_id = params.id;
        self.with_database("load plan", move |db| db.get_hierarchy(plan_id))
            .await
    }

    /// Lists plan summaries, newest first.
    pub async fn list_plans(&self, params: &ListPlans) -> Result<PlanSummaries> {
        let filter = PlanFilter::from(params);
        let summaries = self
            .with_database("list plans", move |db| db.list_plans(&filter))
            .await?;
        Ok(PlanSummaries(summaries))
    }

    /// Makes a plan its player's only active plan.
    pub async fn activate_plan(&self, params: &Id) -> Result<Option<Plan>> {
        let plan_id = params.id;
        let _guard = self.locks.lock(plan_id).await;
        let plan = self
            .with_database("activate plan", move |db| db.activate_plan(plan_id))
            .await?;
        if let Some(plan) = &plan {
            info!("Activated plan {} for player {}", plan.id, plan.player_id);
        }
        Ok(plan)
    }

    /// Recomputes a plan's completion percentage without writing anything.
    pub async fn progress(&self, params: &Id) -> Result<f64> {
        let plan_id = params.id;
        self.with_database("compute progress", move |db| {
            db.get_hierarchy(plan_id)?
                .map(|hierarchy| progress_percentage(&hierarchy))
                .ok_or(PlanError::PlanNotFound { id: plan_id })
        })
        .await
    }

    /// Copies a plan into a fresh, inactive plan for the same player.
    ///
    /// The copy keeps all content and ordering but none of the progress.
    /// Insertion is one transaction: a failure leaves no partial copy.
    pub async fn clone_plan(&self, params: &ClonePlan) -> Result<PlanHierarchy> {
        let source_id = params.id;
        let name = params.name.clone();
        let _guard = self.locks.lock(source_id).await;

        let copy = self
            .with_database("clone plan", move |db| {
                let source = db
                    .get_hierarchy(source_id)?
                    .ok_or(PlanError::PlanNotFound { id: source_id })?;
                let blueprint = clone_blueprint(&source, name.as_deref());
                let plan_id = db.insert_blueprint(&source.plan().player_id, &blueprint, false)?;
                db.get_hierarchy(plan_id)?
                    .ok_or(PlanError::PlanNotFound { id: plan_id })
            })
            .await?;

        info!(
            "Cloned plan {source_id} into plan {} '{}'",
            copy.plan().id,
            copy.plan().name
        );
        Ok(copy)
    }

    /// Permanently deletes a plan and its whole tree.
    ///
    /// Requires `confirmed`. Returns the summary of the deleted plan, or
    /// `None` if it did not exist.
    pub async fn delete_plan(&self, params: &DeletePlan) -> Result<Option<PlanSummary>> {
        if !params.confirmed {
            return Err(PlanError::invalid_input(
                "confirmed",
                "Deleting a plan removes all of its weeks, days and sessions; confirm to proceed",
            ));
        }

        let plan_id = params.id;
        let _guard = self.locks.lock(plan_id).await;
        let deleted = self
            .with_database("delete plan", move |db| {
                let Some(hierarchy) = db.get_hierarchy(plan_id)? else {
                    return Ok(None);
                };
                let summary = PlanSummary::from(&hierarchy);
                db.delete_plan(plan_id)?;
                Ok(Some(summary))
            })
            .await?;

        match &deleted {
            Some(summary) => info!("Deleted plan {} '{}'", summary.id, summary.name),
            None => debug!("Plan {plan_id} not found, nothing deleted"),
        }
        Ok(deleted)
    }
}
