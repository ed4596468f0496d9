//! Applying coaching adaptations to a live plan.
//!
//! Resolution is separate from persistence: [`resolve_adaptation`] turns an
//! [`Adaptation`] into a concrete [`AdaptationEdit`] against the current
//! tree, and the database applies that edit in one transaction. A target
//! week, day or session index that does not resolve yields `None`, which
//! callers treat as a silent no-op.

use crate::{
    hierarchy::PlanHierarchy,
    matcher::{match_or_empty, ExerciseMatcher},
    models::{Adaptation, AdaptationKind, ExerciseRef, SessionType},
};

/// A session to append to a day.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSession {
    pub day_id: u64,
    pub session_type: SessionType,
    pub duration: u32,
    pub intensity: u8,
    pub order_index: u32,
    pub notes: Option<String>,
    pub exercises: Vec<ExerciseRef>,
}

/// A resolved, ready-to-persist change to a plan's sessions.
#[derive(Debug, Clone, PartialEq)]
pub enum AdaptationEdit {
    /// Overwrite one session's intensity
    SetIntensity {
        session_id: u64,
        previous: u8,
        intensity: u8,
    },
    /// Append a session at the end of a day
    Append(NewSession),
    /// Delete one session
    Remove { session_id: u64 },
}

/// Resolves an adaptation against week `target_week` of the plan.
///
/// Sessions are addressed by their position in `order_index` order. For
/// `add_session` the drill category is normalized to a session type and
/// the drill name is passed to the matcher; the new session goes after the
/// day's existing ones.
pub fn resolve_adaptation(
    hierarchy: &PlanHierarchy,
    target_week: u32,
    adaptation: &Adaptation,
    matcher: &dyn ExerciseMatcher,
) -> Option<AdaptationEdit> {
    let week = hierarchy.week_by_number(target_week)?;
    let day = hierarchy.day_by_number(week.id, adaptation.day())?;

    match &adaptation.kind {
        AdaptationKind::ModifyDifficulty {
            session_index,
            new_difficulty,
            ..
        } => {
            let session = hierarchy.session_at(day.id, *session_index)?;
            Some(AdaptationEdit::SetIntensity {
                session_id: session.id,
                previous: session.intensity,
                intensity: *new_difficulty,
            })
        }
        AdaptationKind::AddSession { drill, .. } => {
            let session_type = SessionType::from_category(&drill.category);
            let exercises = match_or_empty(
                matcher,
                std::slice::from_ref(&drill.name),
                session_type,
                &hierarchy.plan().player_id,
            );
            let description = adaptation.description.trim();

            Some(AdaptationEdit::Append(NewSession {
                day_id: day.id,
                session_type,
                duration: drill.duration,
                intensity: drill.difficulty,
                order_index: next_order_index(hierarchy, day.id),
                notes: (!description.is_empty()).then(|| description.to_string()),
                exercises,
            }))
        }
        AdaptationKind::RemoveSession { session_index, .. } => {
            let session = hierarchy.session_at(day.id, *session_index)?;
            Some(AdaptationEdit::Remove {
                session_id: session.id,
            })
        }
    }
}

/// The day's session count, or one past the highest index if that slot is
/// already taken after an earlier removal.
fn next_order_index(hierarchy: &PlanHierarchy, day_id: u64) -> u32 {
    let count = hierarchy.session_count(day_id) as u32;
    let highest = hierarchy.sessions(day_id).map(|s| s.order_index).max();
    match highest {
        Some(highest) if highest >= count => highest + 1,
        _ => count,
    }
}
