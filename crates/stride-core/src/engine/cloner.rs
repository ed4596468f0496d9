//! Deep copies of plans and exercise-name resolution for blueprints.

use crate::{
    hierarchy::PlanHierarchy,
    matcher::{match_or_empty, ExerciseMatcher},
    models::{DayBlueprint, PlanBlueprint, SessionBlueprint, SessionType, WeekBlueprint},
};

/// Captures a plan's structure as a blueprint for a fresh copy.
///
/// Content is copied (descriptions, focus areas, notes, rest-day flags,
/// session type/duration/intensity, exercise references and order indexes)
/// while all progress is left behind. The copy is never marked prebuilt and
/// is named `"Copy of <name>"` unless `new_name` is given.
pub fn clone_blueprint(hierarchy: &PlanHierarchy, new_name: Option<&str>) -> PlanBlueprint {
    let plan = hierarchy.plan();
    let name = match new_name.map(str::trim).filter(|n| !n.is_empty()) {
        Some(name) => name.to_string(),
        None => format!("Copy of {}", plan.name),
    };

    let weeks = hierarchy
        .weeks()
        .map(|week| WeekBlueprint {
            week_number: week.week_number,
            focus_area: week.focus_area.clone(),
            notes: week.notes.clone(),
            days: hierarchy
                .days(week.id)
                .map(|day| DayBlueprint {
                    day_number: day.day_number,
                    day_of_week: day.day_of_week.clone(),
                    is_rest_day: day.is_rest_day,
                    notes: day.notes.clone(),
                    sessions: hierarchy
                        .sessions(day.id)
                        .map(|session| SessionBlueprint {
                            session_type: session.session_type.as_str().to_string(),
                            duration: session.duration,
                            intensity: session.intensity,
                            order_index: Some(session.order_index),
                            notes: session.notes.clone(),
                            suggested_exercise_names: Vec::new(),
                            exercise_ids: session.exercises.iter().map(|e| e.id).collect(),
                        })
                        .collect(),
                })
                .collect(),
        })
        .collect();

    PlanBlueprint {
        name,
        description: plan.description.clone(),
        difficulty: plan.difficulty.clone(),
        category: plan.category.clone(),
        duration_weeks: Some(plan.duration_weeks),
        is_prebuilt: false,
        weeks,
    }
}

/// Resolves `suggested_exercise_names` into exercise ids in place.
///
/// Each session with suggestions is matched once; matched ids are appended
/// to `exercise_ids` without duplicates and the names are cleared.
pub fn resolve_exercise_names(
    blueprint: &mut PlanBlueprint,
    matcher: &dyn ExerciseMatcher,
    player_id: &str,
) {
    let sessions = blueprint
        .weeks
        .iter_mut()
        .flat_map(|week| week.days.iter_mut())
        .flat_map(|day| day.sessions.iter_mut());

    for session in sessions {
        let names = std::mem::take(&mut session.suggested_exercise_names);
        if names.is_empty() {
            continue;
        }
        let session_type = SessionType::from_category(&session.session_type);
        for exercise in match_or_empty(matcher, &names, session_type, player_id) {
            if !session.exercise_ids.contains(&exercise.id) {
                session.exercise_ids.push(exercise.id);
            }
        }
    }
}
