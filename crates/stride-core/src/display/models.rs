//! Display implementations for domain models.
//!
//! All output is markdown: plans render as a heading per week and day with
//! a checklist of sessions.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::{
    hierarchy::PlanHierarchy,
    models::{
        AdaptationOutcome, CurrentDay, Day, Exercise, Plan, PlanSummary, ProgressUpdate, Session,
        SessionType,
    },
};

impl fmt::Display for SessionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Plan {
    /// Lifecycle status as shown to the player.
    pub fn status_label(&self) -> &'static str {
        if self.is_completed() {
            "✓ Completed"
        } else if self.is_active {
            "➤ Active"
        } else {
            "○ Inactive"
        }
    }

    fn fmt_metadata(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "- Status: {}", self.status_label())?;
        writeln!(f, "- Player: {}", self.player_id)?;
        writeln!(f, "- Difficulty: {}", self.difficulty)?;
        writeln!(f, "- Category: {}", self.category)?;
        writeln!(f, "- Duration: {} weeks", self.duration_weeks)?;
        writeln!(f, "- Progress: {:.1}%", self.progress_percentage)?;
        if let Some(started) = &self.started_at {
            writeln!(f, "- Started: {}", LocalDateTime(started))?;
        }
        if let Some(completed) = &self.completed_at {
            writeln!(f, "- Completed: {}", LocalDateTime(completed))?;
        }
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))
    }
}

impl Day {
    /// Status with icon, rest and skip taking precedence over completion.
    pub fn status_label(&self) -> &'static str {
        if self.is_skipped {
            "↷ Skipped"
        } else if self.is_rest_day {
            "☾ Rest"
        } else if self.is_completed {
            "✓ Done"
        } else {
            "○ Open"
        }
    }

    fn heading(&self) -> String {
        match &self.day_of_week {
            Some(name) => format!("Day {} ({name})", self.day_number),
            None => format!("Day {}", self.day_number),
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.name)?;
        writeln!(f)?;
        self.fmt_metadata(f)?;
        if let Some(desc) = &self.description {
            writeln!(f)?;
            writeln!(f, "{desc}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let check = if self.is_completed { "x" } else { " " };
        write!(
            f,
            "- [{check}] {}. {}, {} min, intensity {}/5",
            self.id, self.session_type, self.duration, self.intensity
        )?;
        if let Some(notes) = &self.notes {
            write!(f, ": {notes}")?;
        }
        writeln!(f)?;

        if self.is_completed
            && (self.actual_duration.is_some() || self.actual_intensity.is_some())
        {
            let duration = self
                .actual_duration
                .map_or_else(|| "?".to_string(), |d| d.to_string());
            let intensity = self
                .actual_intensity
                .map_or_else(|| "?".to_string(), |i| i.to_string());
            writeln!(f, "  - Actual: {duration} min, intensity {intensity}/5")?;
        }
        if !self.exercises.is_empty() {
            let names: Vec<&str> = self.exercises.iter().map(|e| e.name.as_str()).collect();
            writeln!(f, "  - Exercises: {}", names.join(", "))?;
        }
        Ok(())
    }
}

impl fmt::Display for PlanHierarchy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.plan())?;

        for week in self.weeks() {
            writeln!(f)?;
            write!(f, "## Week {}", week.week_number)?;
            if let Some(focus) = &week.focus_area {
                write!(f, ": {focus}")?;
            }
            if week.is_completed {
                write!(f, " ✓")?;
            }
            writeln!(f)?;
            if let Some(notes) = &week.notes {
                writeln!(f)?;
                writeln!(f, "{notes}")?;
            }

            for day in self.days(week.id) {
                writeln!(f)?;
                writeln!(f, "### {} (ID: {}) {}", day.heading(), day.id, day.status_label())?;
                if let Some(notes) = &day.notes {
                    writeln!(f)?;
                    writeln!(f, "{notes}")?;
                }
                if self.session_count(day.id) > 0 {
                    writeln!(f)?;
                    for session in self.sessions(day.id) {
                        write!(f, "{session}")?;
                    }
                }
            }
        }

        Ok(())
    }
}

impl fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {} (ID: {})", self.name, self.id)?;
        writeln!(f)?;

        let status = if self.completed_at.is_some() {
            "✓ Completed"
        } else if self.is_active {
            "➤ Active"
        } else {
            "○ Inactive"
        };
        writeln!(f, "- **Status**: {status}")?;
        writeln!(
            f,
            "- **Progress**: {:.1}% ({}/{} sessions, {}/{} weeks)",
            self.progress_percentage,
            self.completed_sessions,
            self.total_sessions,
            self.completed_weeks,
            self.total_weeks
        )?;
        if let (Some(week), Some(day)) = (self.current_week, self.current_day) {
            writeln!(f, "- **Next**: Week {week}, day {day}")?;
        }
        writeln!(f, "- **Level**: {} {}", self.difficulty, self.category)?;
        writeln!(f, "- **Created**: {}", LocalDateTime(&self.created_at))?;
        writeln!(f)
    }
}

impl fmt::Display for CurrentDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "# Week {}, {} (ID: {})",
            self.week_number,
            self.day.heading(),
            self.day.id
        )?;
        writeln!(f)?;
        writeln!(f, "Plan {} is {:.1}% complete.", self.plan_id, self.progress_percentage)?;
        if let Some(notes) = &self.day.notes {
            writeln!(f)?;
            writeln!(f, "{notes}")?;
        }
        writeln!(f)?;
        if self.sessions.is_empty() {
            writeln!(f, "No sessions scheduled.")?;
        }
        for session in &self.sessions {
            write!(f, "{session}")?;
        }
        Ok(())
    }
}

impl fmt::Display for ProgressUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.changed {
            writeln!(f, "Already recorded, nothing changed.")?;
        }
        writeln!(
            f,
            "Plan {} progress: {:.1}%",
            self.plan_id, self.progress_percentage
        )?;
        for week in &self.weeks_completed {
            writeln!(f, "- Week {week} completed, weekly check-in available")?;
        }
        if self.plan_completed {
            writeln!(f, "- Plan completed!")?;
        }
        Ok(())
    }
}

impl fmt::Display for AdaptationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdaptationOutcome::Modified {
                session_id,
                previous,
                intensity,
            } => writeln!(
                f,
                "Session {session_id} intensity changed from {previous} to {intensity}"
            ),
            AdaptationOutcome::Added(session) => {
                writeln!(f, "Added session {}", session.id)?;
                writeln!(f)?;
                write!(f, "{session}")
            }
            AdaptationOutcome::Removed(session) => writeln!(
                f,
                "Removed session {} ({}, {} min)",
                session.id, session.session_type, session.duration
            ),
            AdaptationOutcome::Ignored => {
                writeln!(f, "Adaptation target not found, plan unchanged")
            }
        }
    }
}

impl fmt::Display for Exercise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}. {} ({})", self.id, self.name, self.category)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        hierarchy::fixtures,
        models::{AdaptationOutcome, ExerciseRef},
    };

    #[test]
    fn test_hierarchy_renders_weeks_days_and_sessions() {
        let mut hierarchy = fixtures::build(&[&[Some(2), None]]);
        {
            let session = hierarchy.session_mut(300).expect("session");
            session.is_completed = true;
            session.actual_duration = Some(25);
            session.exercises = vec![ExerciseRef {
                id: 1,
                name: "Wall Passing".to_string(),
            }];
        }
        hierarchy.week_mut(100).expect("week").focus_area = Some("Passing".to_string());
        hierarchy.day_mut(200).expect("day").day_of_week = Some("Monday".to_string());

        let output = hierarchy.to_string();
        assert!(output.starts_with("# 1. Ball Mastery\n"));
        assert!(output.contains("- Status: ➤ Active"));
        assert!(output.contains("## Week 1: Passing"));
        assert!(output.contains("### Day 1 (Monday) (ID: 200) ○ Open"));
        assert!(output.contains("### Day 2 (ID: 201) ☾ Rest"));
        assert!(output.contains("- [x] 300. Technical, 30 min, intensity 3/5"));
        assert!(output.contains("  - Actual: 25 min, intensity ?/5"));
        assert!(output.contains("  - Exercises: Wall Passing"));
        assert!(output.contains("- [ ] 301. Technical"));
    }

    #[test]
    fn test_adaptation_outcome_messages() {
        let modified = AdaptationOutcome::Modified {
            session_id: 4,
            previous: 2,
            intensity: 5,
        };
        assert_eq!(
            modified.to_string(),
            "Session 4 intensity changed from 2 to 5\n"
        );
        assert!(AdaptationOutcome::Ignored.to_string().contains("unchanged"));
    }
}
