//! Current-day resolution and the completion cascade.
//!
//! Every leaf-level event (session completed, day completed, day skipped,
//! rest day auto-completed) re-evaluates every week and then the plan:
//!
//! ```text
//! Session ──all done──▶ Day ──all settled──▶ Week ──all done──▶ Plan
//! ```
//!
//! A day is *settled* when it is completed, skipped, or a rest day. Changes
//! are applied to the in-memory [`PlanHierarchy`] and recorded in a
//! [`Changeset`] so the caller can persist them in one transaction.

use jiff::Timestamp;

use super::{progress::progress_percentage, Changeset};
use crate::{checkin::CheckIn, hierarchy::PlanHierarchy, models::CurrentDay};

/// Values a player may report when checking off a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionActuals {
    /// Minutes actually trained
    pub duration: Option<u32>,
    /// Perceived intensity, 1 through 5
    pub intensity: Option<u8>,
}

/// Finds the day the player should work on next.
///
/// Weeks are scanned by `week_number` and days by `day_number`. Completed
/// and skipped days are passed over; rest days are marked completed on the
/// way (running the cascade) and never returned. Returns
/// `None` once nothing actionable remains.
pub fn current_day(
    hierarchy: &mut PlanHierarchy,
    now: Timestamp,
    changes: &mut Changeset,
) -> Option<CurrentDay> {
    let schedule: Vec<(u32, Vec<u64>)> = hierarchy
        .weeks()
        .map(|week| {
            let days = hierarchy.days(week.id).map(|day| day.id).collect();
            (week.week_number, days)
        })
        .collect();

    for (week_number, day_ids) in schedule {
        for day_id in day_ids {
            let Some(day) = hierarchy.day_mut(day_id) else {
                continue;
            };
            if day.is_completed || day.is_skipped {
                continue;
            }
            if day.is_rest_day {
                day.is_completed = true;
                day.completed_at = Some(now);
                changes.days.insert(day_id);
                roll_up(hierarchy, now, changes);
                continue;
            }

            let day = day.clone();
            let sessions = hierarchy.sessions(day_id).cloned().collect();
            return Some(CurrentDay {
                plan_id: hierarchy.plan().id,
                week_number,
                day,
                sessions,
                progress_percentage: hierarchy.plan().progress_percentage,
            });
        }
    }

    // Nothing actionable left: every day is settled, so the plan must be too.
    if !hierarchy.plan().is_completed() {
        roll_up(hierarchy, now, changes);
    }
    None
}

/// Checks off a session and cascades.
///
/// Returns `false` when the session is not part of the plan. Completing an
/// already-completed session changes nothing.
pub fn complete_session(
    hierarchy: &mut PlanHierarchy,
    session_id: u64,
    actuals: SessionActuals,
    now: Timestamp,
    changes: &mut Changeset,
) -> bool {
    let Some(session) = hierarchy.session_mut(session_id) else {
        return false;
    };
    if session.is_completed {
        return true;
    }

    session.is_completed = true;
    session.completed_at = Some(now);
    session.actual_duration = actuals.duration;
    session.actual_intensity = actuals.intensity;
    let day_id = session.day_id;
    changes.sessions.insert(session_id);

    if !complete_day_if_finished(hierarchy, day_id, now, changes) {
        roll_up(hierarchy, now, changes);
    }
    true
}

/// Completes a day once every one of its sessions is checked off, then
/// cascades. Returns `false` when the day is missing, already completed, or
/// still has open sessions.
pub fn complete_day_if_finished(
    hierarchy: &mut PlanHierarchy,
    day_id: u64,
    now: Timestamp,
    changes: &mut Changeset,
) -> bool {
    let finished = hierarchy.day(day_id).is_some_and(|day| !day.is_completed)
        && hierarchy.session_count(day_id) > 0
        && hierarchy.sessions(day_id).all(|s| s.is_completed);
    finished && complete_day(hierarchy, day_id, now, changes)
}

/// Marks a day completed without touching its sessions, then cascades.
pub fn complete_day(
    hierarchy: &mut PlanHierarchy,
    day_id: u64,
    now: Timestamp,
    changes: &mut Changeset,
) -> bool {
    let Some(day) = hierarchy.day_mut(day_id) else {
        return false;
    };
    if day.is_completed {
        return true;
    }

    day.is_completed = true;
    day.completed_at = Some(now);
    changes.days.insert(day_id);
    roll_up(hierarchy, now, changes);
    true
}

/// Marks a day skipped, then cascades.
///
/// Skipping is independent of the rest-day flag and of any sessions already
/// completed; the day simply leaves the progress denominator.
pub fn skip_day(
    hierarchy: &mut PlanHierarchy,
    day_id: u64,
    now: Timestamp,
    changes: &mut Changeset,
) -> bool {
    let Some(day) = hierarchy.day_mut(day_id) else {
        return false;
    };
    if day.is_skipped {
        return true;
    }

    day.is_skipped = true;
    changes.days.insert(day_id);
    roll_up(hierarchy, now, changes);
    true
}

/// Re-evaluates every week in order, then the plan.
///
/// Weeks already completed are left alone, so each check-in is raised once.
fn roll_up(hierarchy: &mut PlanHierarchy, now: Timestamp, changes: &mut Changeset) {
    let week_ids: Vec<u64> = hierarchy.weeks().map(|week| week.id).collect();
    for week_id in week_ids {
        roll_up_week(hierarchy, week_id, now, changes);
    }
    roll_up_plan(hierarchy, now, changes);
}

fn roll_up_week(
    hierarchy: &mut PlanHierarchy,
    week_id: u64,
    now: Timestamp,
    changes: &mut Changeset,
) {
    let plan_id = hierarchy.plan().id;
    let settled = hierarchy.days(week_id).all(|day| day.is_settled());
    let Some(week) = hierarchy.week_mut(week_id) else {
        return;
    };
    if !settled || week.is_completed {
        return;
    }

    week.is_completed = true;
    week.completed_at = Some(now);
    changes.weeks.insert(week_id);
    changes.check_ins.push(CheckIn {
        plan_id,
        week_number: week.week_number,
    });
}

/// Completes the plan when every week is done, otherwise refreshes the
/// cached percentage. `updated_at` moves on every pass.
fn roll_up_plan(hierarchy: &mut PlanHierarchy, now: Timestamp, changes: &mut Changeset) {
    let all_weeks_done = hierarchy.weeks().all(|week| week.is_completed);
    let progress = progress_percentage(hierarchy);

    let plan = hierarchy.plan_mut();
    if all_weeks_done {
        if plan.completed_at.is_none() {
            plan.completed_at = Some(now);
        }
        plan.progress_percentage = 100.0;
        plan.is_active = false;
    } else {
        plan.progress_percentage = progress;
    }
    plan.updated_at = now;
    changes.plan = true;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::fixtures;

    fn run<T>(
        hierarchy: &mut PlanHierarchy,
        f: impl FnOnce(&mut PlanHierarchy, Timestamp, &mut Changeset) -> T,
    ) -> (T, Changeset) {
        let mut changes = Changeset::default();
        let value = f(hierarchy, Timestamp::now(), &mut changes);
        (value, changes)
    }

    #[test]
    fn test_rest_day_is_auto_completed_and_skipped_over() {
        // Day 1: one session, Day 2: rest, Day 3: one session
        let mut hierarchy = fixtures::build(&[&[Some(1), None, Some(1)]]);

        let (found, _) = run(&mut hierarchy, |h, now, c| {
            complete_session(h, 300, SessionActuals::default(), now, c)
        });
        assert!(found);
        assert!(hierarchy.day(200).expect("day 1").is_completed);
        assert_eq!(hierarchy.plan().progress_percentage, 50.0);

        let (current, changes) = run(&mut hierarchy, current_day);
        let current = current.expect("day 3 is actionable");
        assert_eq!(current.week_number, 1);
        assert_eq!(current.day_number(), 3);
        assert_eq!(current.sessions.len(), 1);

        let rest = hierarchy.day(201).expect("rest day");
        assert!(rest.is_completed);
        assert!(rest.completed_at.is_some());
        assert!(changes.days.contains(&201));
        assert!(changes.check_ins.is_empty());
    }

    #[test]
    fn test_current_day_never_returns_rest_day() {
        let mut hierarchy = fixtures::build(&[&[None, None], &[None, Some(2), None]]);

        let (current, changes) = run(&mut hierarchy, current_day);
        let current = current.expect("week 2 day 2");
        assert!(!current.day.is_rest_day);
        assert_eq!((current.week_number, current.day_number()), (2, 2));

        // Week 1 only had rest days, so it rolled up on the way.
        assert!(hierarchy.week(100).expect("week 1").is_completed);
        assert_eq!(changes.check_ins, vec![CheckIn { plan_id: 1, week_number: 1 }]);
        assert!(hierarchy.day(202).expect("rest").is_completed);
        assert!(!hierarchy.day(204).expect("later rest").is_completed);
    }

    #[test]
    fn test_current_day_is_stable_without_new_events() {
        let mut hierarchy = fixtures::build(&[&[None, Some(1), Some(1)]]);

        let (first, first_changes) = run(&mut hierarchy, current_day);
        let (second, second_changes) = run(&mut hierarchy, current_day);
        assert_eq!(
            first.map(|c| c.day.id),
            second.as_ref().map(|c| c.day.id)
        );
        assert!(!first_changes.is_empty());
        assert!(second_changes.is_empty());
    }

    #[test]
    fn test_skip_completes_week_and_plan() {
        let mut hierarchy = fixtures::build(&[&[Some(1), None, Some(1)]]);
        run(&mut hierarchy, |h, now, c| {
            complete_session(h, 300, SessionActuals::default(), now, c)
        });

        let (found, changes) = run(&mut hierarchy, |h, now, c| skip_day(h, 202, now, c));
        assert!(found);

        let plan = hierarchy.plan();
        assert!(hierarchy.day(202).expect("day 3").is_skipped);
        assert!(hierarchy.week(100).expect("week").is_completed);
        assert!(plan.completed_at.is_some());
        assert_eq!(plan.progress_percentage, 100.0);
        assert!(!plan.is_active);
        assert_eq!(changes.check_ins, vec![CheckIn { plan_id: 1, week_number: 1 }]);
    }

    #[test]
    fn test_plan_stays_open_until_last_week() {
        let mut hierarchy = fixtures::build(&[&[Some(1)], &[Some(1)]]);

        run(&mut hierarchy, |h, now, c| {
            complete_session(h, 300, SessionActuals::default(), now, c)
        });
        assert!(hierarchy.week(100).expect("week 1").is_completed);
        assert!(hierarchy.plan().completed_at.is_none());
        assert!(hierarchy.plan().is_active);
        assert_eq!(hierarchy.plan().progress_percentage, 50.0);

        let (_, changes) = run(&mut hierarchy, |h, now, c| {
            complete_session(h, 301, SessionActuals::default(), now, c)
        });
        assert!(hierarchy.plan().completed_at.is_some());
        assert_eq!(changes.check_ins.len(), 1);
        assert_eq!(changes.check_ins[0].week_number, 2);
    }

    #[test]
    fn test_day_needs_every_session_before_completing() {
        let mut hierarchy = fixtures::build(&[&[Some(2)]]);
        let actuals = SessionActuals {
            duration: Some(25),
            intensity: Some(4),
        };

        run(&mut hierarchy, |h, now, c| complete_session(h, 300, actuals, now, c));
        assert!(!hierarchy.day(200).expect("day").is_completed);
        let session = hierarchy.session(300).expect("session");
        assert_eq!(session.actual_duration, Some(25));
        assert_eq!(session.actual_intensity, Some(4));

        run(&mut hierarchy, |h, now, c| {
            complete_session(h, 301, SessionActuals::default(), now, c)
        });
        assert!(hierarchy.day(200).expect("day").is_completed);
    }

    #[test]
    fn test_repeat_completion_is_a_no_op() {
        let mut hierarchy = fixtures::build(&[&[Some(1)], &[Some(1)]]);
        run(&mut hierarchy, |h, now, c| {
            complete_session(h, 300, SessionActuals::default(), now, c)
        });

        let (found, changes) = run(&mut hierarchy, |h, now, c| {
            complete_session(h, 300, SessionActuals::default(), now, c)
        });
        assert!(found);
        assert!(changes.is_empty());
        assert!(changes.check_ins.is_empty());
    }

    #[test]
    fn test_missing_targets_return_false() {
        let mut hierarchy = fixtures::build(&[&[Some(1)]]);
        let before = hierarchy.clone();

        let (found, changes) = run(&mut hierarchy, |h, now, c| {
            complete_session(h, 9999, SessionActuals::default(), now, c)
        });
        assert!(!found);
        assert!(changes.is_empty());
        assert!(!run(&mut hierarchy, |h, now, c| skip_day(h, 9999, now, c)).0);
        assert!(!run(&mut hierarchy, |h, now, c| complete_day(h, 9999, now, c)).0);
        assert_eq!(hierarchy, before);
    }

    #[test]
    fn test_complete_day_leaves_sessions_untouched() {
        let mut hierarchy = fixtures::build(&[&[Some(2), Some(1)]]);

        let (found, changes) = run(&mut hierarchy, |h, now, c| complete_day(h, 200, now, c));
        assert!(found);
        assert!(hierarchy.day(200).expect("day").is_completed);
        assert!(hierarchy.sessions(200).all(|s| !s.is_completed));
        assert!(changes.sessions.is_empty());
        assert!(!hierarchy.week(100).expect("week").is_completed);
    }

    #[test]
    fn test_all_settled_days_complete_the_plan() {
        let mut hierarchy = fixtures::build(&[&[Some(1), None], &[None, Some(1)]]);

        run(&mut hierarchy, |h, now, c| skip_day(h, 200, now, c));
        run(&mut hierarchy, |h, now, c| complete_day(h, 203, now, c));
        assert!(hierarchy.all_days().all(|d| d.is_settled()));

        let plan = hierarchy.plan();
        assert!(plan.completed_at.is_some());
        assert_eq!(plan.progress_percentage, 100.0);
        assert!(hierarchy.weeks().all(|w| w.is_completed));

        let (current, _) = run(&mut hierarchy, current_day);
        assert!(current.is_none());
    }

    #[test]
    fn test_settled_later_week_rolls_up_with_the_plan() {
        // Week 2 holds nothing but a rest day
        let mut hierarchy = fixtures::build(&[&[Some(1)], &[None]]);

        let (_, changes) = run(&mut hierarchy, |h, now, c| {
            complete_session(h, 300, SessionActuals::default(), now, c)
        });

        assert!(hierarchy.weeks().all(|w| w.is_completed));
        let plan = hierarchy.plan();
        assert!(plan.completed_at.is_some());
        assert!(!plan.is_active);
        assert_eq!(plan.progress_percentage, 100.0);
        let weeks: Vec<u32> = changes.check_ins.iter().map(|c| c.week_number).collect();
        assert_eq!(weeks, vec![1, 2]);
    }

    #[test]
    fn test_empty_week_does_not_keep_the_plan_open() {
        let mut hierarchy = fixtures::build(&[&[Some(1)], &[]]);

        run(&mut hierarchy, |h, now, c| {
            complete_session(h, 300, SessionActuals::default(), now, c)
        });
        assert!(hierarchy.week(101).expect("empty week").is_completed);
        assert!(hierarchy.plan().completed_at.is_some());
        assert!(!hierarchy.plan().is_active);

        let (current, changes) = run(&mut hierarchy, current_day);
        assert!(current.is_none());
        assert!(changes.is_empty());
    }

    #[test]
    fn test_current_day_completes_a_plan_with_nothing_left() {
        // Settled without ever running the cascade
        let mut hierarchy = fixtures::build(&[&[Some(1)], &[]]);
        hierarchy.day_mut(200).expect("day").is_skipped = true;

        let (current, changes) = run(&mut hierarchy, current_day);
        assert!(current.is_none());
        assert!(hierarchy.plan().completed_at.is_some());
        assert_eq!(changes.check_ins.len(), 2);

        let (_, repeat) = run(&mut hierarchy, current_day);
        assert!(repeat.is_empty());
    }

    #[test]
    fn test_day_completes_once_remaining_sessions_are_done() {
        let mut hierarchy = fixtures::build(&[&[Some(2), Some(1)]]);
        run(&mut hierarchy, |h, now, c| {
            complete_session(h, 300, SessionActuals::default(), now, c)
        });
        let settle = |h: &mut PlanHierarchy, now: Timestamp, c: &mut Changeset| {
            complete_day_if_finished(h, 200, now, c)
        };
        let (done, _) = run(&mut hierarchy, settle);
        assert!(!done);

        hierarchy.remove_session(301).expect("session");
        let (done, changes) = run(&mut hierarchy, settle);
        assert!(done);
        assert!(hierarchy.day(200).expect("day").is_completed);
        assert!(changes.days.contains(&200));
        assert!(changes.plan);

        let (again, _) = run(&mut hierarchy, settle);
        assert!(!again);
    }
}
