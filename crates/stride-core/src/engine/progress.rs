//! Progress percentage over a plan tree.

use crate::hierarchy::PlanHierarchy;

/// Session counts over the days that count toward progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionTally {
    pub total: usize,
    pub completed: usize,
}

impl SessionTally {
    /// Counts sessions on every day that is neither skipped nor a rest day.
    pub fn of(hierarchy: &PlanHierarchy) -> Self {
        hierarchy
            .all_days()
            .filter(|day| day.counts_toward_progress())
            .flat_map(|day| hierarchy.sessions(day.id))
            .fold(Self::default(), |tally, session| Self {
                total: tally.total + 1,
                completed: tally.completed + usize::from(session.is_completed),
            })
    }

    /// `completed / total * 100`, or 0 when nothing counts.
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.completed as f64 / self.total as f64 * 100.0
        }
    }
}

/// Completion percentage in `[0, 100]`.
///
/// Rest and skipped days are left out of both numerator and denominator, so
/// skipping a day never inflates progress and completing a rest day never
/// moves it.
pub fn progress_percentage(hierarchy: &PlanHierarchy) -> f64 {
    SessionTally::of(hierarchy).percentage()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::fixtures;

    #[test]
    fn test_empty_plan_is_zero() {
        let hierarchy = fixtures::build(&[&[None, None]]);
        assert_eq!(progress_percentage(&hierarchy), 0.0);
    }

    #[test]
    fn test_counts_completed_sessions() {
        let mut hierarchy = fixtures::build(&[&[Some(2), Some(2)]]);
        hierarchy.session_mut(300).expect("session").is_completed = true;
        assert_eq!(progress_percentage(&hierarchy), 25.0);

        hierarchy.session_mut(302).expect("session").is_completed = true;
        assert_eq!(progress_percentage(&hierarchy), 50.0);
    }

    #[test]
    fn test_skipped_and_rest_days_are_excluded() {
        let mut hierarchy = fixtures::build(&[&[Some(1), None, Some(1)]]);
        hierarchy.session_mut(300).expect("session").is_completed = true;
        assert_eq!(progress_percentage(&hierarchy), 50.0);

        hierarchy.day_mut(201).expect("rest day").is_completed = true;
        assert_eq!(progress_percentage(&hierarchy), 50.0);

        hierarchy.day_mut(202).expect("day").is_skipped = true;
        assert_eq!(progress_percentage(&hierarchy), 100.0);
    }

    #[test]
    fn test_completing_more_sessions_never_decreases() {
        let mut hierarchy = fixtures::build(&[&[Some(3), Some(2)], &[Some(1), None]]);
        let ids: Vec<u64> = hierarchy.all_sessions().map(|s| s.id).collect();

        let mut previous = progress_percentage(&hierarchy);
        for id in ids {
            hierarchy.session_mut(id).expect("session").is_completed = true;
            let current = progress_percentage(&hierarchy);
            assert!(current >= previous);
            previous = current;
        }
        assert_eq!(previous, 100.0);
    }
}
