//! The plan progression and adaptation engine.
//!
//! Everything in this module works on an in-memory
//! [`PlanHierarchy`](crate::hierarchy::PlanHierarchy) and performs no I/O.
//! Mutating functions record what they touched in a [`Changeset`]; the
//! planner persists a changeset in a single transaction and only then
//! delivers the check-ins it carries.
//!
//! - [`progress`]: completion percentage
//! - [`completion`]: current-day resolution and the completion cascade
//! - [`adaptation`]: coaching adjustments to a week/day
//! - [`cloner`]: deep copies and exercise-name resolution for blueprints

use std::collections::BTreeSet;

use crate::checkin::CheckIn;

pub mod adaptation;
pub mod cloner;
pub mod completion;
pub mod progress;

pub use adaptation::{resolve_adaptation, AdaptationEdit, NewSession};
pub use cloner::{clone_blueprint, resolve_exercise_names};
pub use completion::{
    complete_day, complete_day_if_finished, complete_session, current_day, skip_day,
    SessionActuals,
};
pub use progress::{progress_percentage, SessionTally};

/// Entities modified by an engine call, plus the check-ins it produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Changeset {
    /// The plan row changed
    pub plan: bool,
    /// Week ids whose completion state changed
    pub weeks: BTreeSet<u64>,
    /// Day ids whose flags changed
    pub days: BTreeSet<u64>,
    /// Session ids whose completion state changed
    pub sessions: BTreeSet<u64>,
    /// Weeks that rolled up to completed
    pub check_ins: Vec<CheckIn>,
}

impl Changeset {
    /// Nothing needs to be written.
    pub fn is_empty(&self) -> bool {
        !self.plan
            && self.weeks.is_empty()
            && self.days.is_empty()
            && self.sessions.is_empty()
            && self.check_ins.is_empty()
    }
}
