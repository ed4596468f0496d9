//! Coaching adaptation operations for the Planner.

use std::sync::Arc;

use jiff::Timestamp;
use log::{debug, info};

use super::Planner;
use crate::{
    engine::resolve_adaptation,
    error::{PlanError, Result},
    models::AdaptationOutcome,
    params::ApplyAdaptation,
};

impl Planner {
    /// Applies a coaching adaptation to one week of a plan.
    ///
    /// A week, day or session index that does not exist is a no-op reported
    /// as [`AdaptationOutcome::Ignored`]. Intensities outside 1..=5 are
    /// rejected before anything is loaded. The edit and the refreshed
    /// progress are written in one transaction. Removing the last open
    /// session of a day completes that day and cascades.
    pub async fn apply_adaptation(&self, params: &ApplyAdaptation) -> Result<AdaptationOutcome> {
        if let Some(intensity) = params.adaptation.requested_intensity() {
            if !(1..=5).contains(&intensity) {
                return Err(PlanError::invalid_input(
                    "difficulty",
                    format!("Intensity {intensity} is outside 1..=5"),
                ));
            }
        }

        let plan_id = params.plan_id;
        let week_number = params.week_number;
        let adaptation = params.adaptation.clone();
        let matcher = Arc::clone(&self.matcher);
        let _guard = self.locks.lock(plan_id).await;

        let (outcome, check_ins) = self
            .with_database("apply adaptation", move |db| {
                let hierarchy = db
                    .get_hierarchy(plan_id)?
                    .ok_or(PlanError::PlanNotFound { id: plan_id })?;
                match resolve_adaptation(&hierarchy, week_number, &adaptation, matcher.as_ref()) {
                    Some(edit) => db.apply_adaptation_edit(plan_id, &edit, Timestamp::now()),
                    None => Ok((AdaptationOutcome::Ignored, Vec::new())),
                }
            })
            .await?;
        self.deliver_check_ins(&check_ins);

        if outcome.is_applied() {
            info!("Applied adaptation to plan {plan_id} week {week_number}: {outcome:?}");
        } else {
            debug!(
                "Adaptation for plan {plan_id} week {week_number} day {} did not resolve",
                params.adaptation.day()
            );
        }
        Ok(outcome)
    }
}
