//! Arena storage for a plan's week/day/session tree.
//!
//! Weeks, days and sessions are kept in id-keyed maps. Children refer to
//! their parent by id only, and every parent owns one [`OrderedIds`]
//! sequence that is sorted on construction and kept sorted on insert and
//! delete. Traversal order is therefore explicit:
//!
//! - weeks by `week_number`
//! - days by `day_number`
//! - sessions by `order_index`

use std::collections::{HashMap, HashSet};

use crate::{
    error::{PlanError, Result},
    models::{Day, Plan, Session, Week},
};

/// Ids sorted by an ordering key, ties broken by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderedIds {
    entries: Vec<(u32, u64)>,
}

impl OrderedIds {
    /// Builds a sequence from unsorted `(key, id)` pairs.
    pub fn from_unsorted(mut entries: Vec<(u32, u64)>) -> Self {
        entries.sort_unstable();
        Self { entries }
    }

    /// Inserts an id at the position given by its key.
    pub fn insert(&mut self, key: u32, id: u64) {
        let position = self.entries.partition_point(|entry| *entry < (key, id));
        self.entries.insert(position, (key, id));
    }

    /// Removes an id, returning whether it was present.
    pub fn remove(&mut self, id: u64) -> bool {
        match self.entries.iter().position(|(_, existing)| *existing == id) {
            Some(position) => {
                self.entries.remove(position);
                true
            }
            None => false,
        }
    }

    /// Id at a 0-based position.
    pub fn get(&self, index: usize) -> Option<u64> {
        self.entries.get(index).map(|(_, id)| *id)
    }

    /// Ids in order.
    pub fn ids(&self) -> impl Iterator<Item = u64> + '_ {
        self.entries.iter().map(|(_, id)| *id)
    }

    /// Whether any entry uses the given key.
    pub fn contains_key(&self, key: u32) -> bool {
        self.entries.iter().any(|(existing, _)| *existing == key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A plan together with its complete week/day/session tree.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanHierarchy {
    plan: Plan,
    weeks: HashMap<u64, Week>,
    days: HashMap<u64, Day>,
    sessions: HashMap<u64, Session>,
    week_order: OrderedIds,
    day_order: HashMap<u64, OrderedIds>,
    session_order: HashMap<u64, OrderedIds>,
}

impl PlanHierarchy {
    /// Assembles a hierarchy from flat rows, checking structural invariants.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::InvalidHierarchy`] when a row points at a missing
    /// parent, when week numbers, day numbers or order indexes collide, or
    /// when a day number or intensity is out of range.
    pub fn new(
        plan: Plan,
        weeks: Vec<Week>,
        days: Vec<Day>,
        sessions: Vec<Session>,
    ) -> Result<Self> {
        let mut week_map = HashMap::with_capacity(weeks.len());
        let mut week_numbers = HashSet::new();
        let mut week_entries = Vec::with_capacity(weeks.len());
        for week in weeks {
            if week.plan_id != plan.id {
                return Err(invalid(format!(
                    "week {} belongs to plan {}, not {}",
                    week.id, week.plan_id, plan.id
                )));
            }
            if week.week_number == 0 || !week_numbers.insert(week.week_number) {
                return Err(invalid(format!(
                    "week number {} is zero or repeated",
                    week.week_number
                )));
            }
            week_entries.push((week.week_number, week.id));
            week_map.insert(week.id, week);
        }

        let mut day_map = HashMap::with_capacity(days.len());
        let mut day_order: HashMap<u64, OrderedIds> =
            week_map.keys().map(|id| (*id, OrderedIds::default())).collect();
        for day in days {
            let Some(siblings) = day_order.get_mut(&day.week_id) else {
                return Err(invalid(format!(
                    "day {} references missing week {}",
                    day.id, day.week_id
                )));
            };
            let key = u32::from(day.day_number);
            if !(1..=7).contains(&day.day_number) || siblings.contains_key(key) {
                return Err(invalid(format!(
                    "day number {} in week {} is out of range or repeated",
                    day.day_number, day.week_id
                )));
            }
            siblings.insert(key, day.id);
            day_map.insert(day.id, day);
        }

        let mut session_map = HashMap::with_capacity(sessions.len());
        let mut session_order: HashMap<u64, OrderedIds> =
            day_map.keys().map(|id| (*id, OrderedIds::default())).collect();
        for session in sessions {
            let Some(siblings) = session_order.get_mut(&session.day_id) else {
                return Err(invalid(format!(
                    "session {} references missing day {}",
                    session.id, session.day_id
                )));
            };
            check_session(&session, siblings)?;
            siblings.insert(session.order_index, session.id);
            session_map.insert(session.id, session);
        }

        Ok(Self {
            plan,
            weeks: week_map,
            days: day_map,
            sessions: session_map,
            week_order: OrderedIds::from_unsorted(week_entries),
            day_order,
            session_order,
        })
    }

    pub fn plan(&self) -> &Plan {
        &self.plan
    }

    pub(crate) fn plan_mut(&mut self) -> &mut Plan {
        &mut self.plan
    }

    /// Weeks in ascending `week_number`.
    pub fn weeks(&self) -> impl Iterator<Item = &Week> + '_ {
        self.week_order.ids().filter_map(move |id| self.weeks.get(&id))
    }

    /// Days of a week in ascending `day_number`.
    pub fn days(&self, week_id: u64) -> impl Iterator<Item = &Day> + '_ {
        self.day_order
            .get(&week_id)
            .into_iter()
            .flat_map(|order| order.ids())
            .filter_map(move |id| self.days.get(&id))
    }

    /// Sessions of a day in ascending `order_index`.
    pub fn sessions(&self, day_id: u64) -> impl Iterator<Item = &Session> + '_ {
        self.session_order
            .get(&day_id)
            .into_iter()
            .flat_map(|order| order.ids())
            .filter_map(move |id| self.sessions.get(&id))
    }

    /// Every day of the plan, in plan order.
    pub fn all_days(&self) -> impl Iterator<Item = &Day> + '_ {
        self.weeks().flat_map(move |week| self.days(week.id))
    }

    /// Every session of the plan, in plan order.
    pub fn all_sessions(&self) -> impl Iterator<Item = &Session> + '_ {
        self.all_days().flat_map(move |day| self.sessions(day.id))
    }

    pub fn week(&self, id: u64) -> Option<&Week> {
        self.weeks.get(&id)
    }

    pub fn day(&self, id: u64) -> Option<&Day> {
        self.days.get(&id)
    }

    pub fn session(&self, id: u64) -> Option<&Session> {
        self.sessions.get(&id)
    }

    pub(crate) fn week_mut(&mut self, id: u64) -> Option<&mut Week> {
        self.weeks.get_mut(&id)
    }

    pub(crate) fn day_mut(&mut self, id: u64) -> Option<&mut Day> {
        self.days.get_mut(&id)
    }

    pub(crate) fn session_mut(&mut self, id: u64) -> Option<&mut Session> {
        self.sessions.get_mut(&id)
    }

    /// Week with the given number.
    pub fn week_by_number(&self, week_number: u32) -> Option<&Week> {
        self.weeks().find(|week| week.week_number == week_number)
    }

    /// Day with the given number inside a week.
    pub fn day_by_number(&self, week_id: u64, day_number: u8) -> Option<&Day> {
        self.days(week_id).find(|day| day.day_number == day_number)
    }

    /// The `index`-th session of a day in `order_index` order.
    pub fn session_at(&self, day_id: u64, index: usize) -> Option<&Session> {
        self.session_order
            .get(&day_id)
            .and_then(|order| order.get(index))
            .and_then(|id| self.sessions.get(&id))
    }

    /// Number of sessions on a day.
    pub fn session_count(&self, day_id: u64) -> usize {
        self.session_order.get(&day_id).map_or(0, OrderedIds::len)
    }

    /// The week a day belongs to.
    pub fn parent_week(&self, day_id: u64) -> Option<&Week> {
        self.days
            .get(&day_id)
            .and_then(|day| self.weeks.get(&day.week_id))
    }

    /// The day a session belongs to.
    pub fn parent_day(&self, session_id: u64) -> Option<&Day> {
        self.sessions
            .get(&session_id)
            .and_then(|session| self.days.get(&session.day_id))
    }

    /// First day, in schedule order, that still needs work. Unlike
    /// [`crate::engine::current_day`] this does not settle rest days.
    pub fn next_open_day(&self) -> Option<(&Week, &Day)> {
        self.weeks().find_map(|week| {
            self.days(week.id)
                .find(|day| !day.is_settled())
                .map(|day| (week, day))
        })
    }

    /// Adds a session to its day, keeping the day's order.
    pub fn insert_session(&mut self, session: Session) -> Result<()> {
        let Some(siblings) = self.session_order.get_mut(&session.day_id) else {
            return Err(PlanError::DayNotFound { id: session.day_id });
        };
        check_session(&session, siblings)?;
        siblings.insert(session.order_index, session.id);
        self.sessions.insert(session.id, session);
        Ok(())
    }

    /// Removes a session from its day.
    pub fn remove_session(&mut self, session_id: u64) -> Option<Session> {
        let session = self.sessions.remove(&session_id)?;
        if let Some(siblings) = self.session_order.get_mut(&session.day_id) {
            siblings.remove(session_id);
        }
        Some(session)
    }
}

fn check_session(session: &Session, siblings: &OrderedIds) -> Result<()> {
    if siblings.contains_key(session.order_index) {
        return Err(invalid(format!(
            "order index {} repeated on day {}",
            session.order_index, session.day_id
        )));
    }
    if !(1..=5).contains(&session.intensity) {
        return Err(invalid(format!(
            "session {} intensity {} is outside 1..=5",
            session.id, session.intensity
        )));
    }
    Ok(())
}

fn invalid(reason: String) -> PlanError {
    PlanError::InvalidHierarchy(reason)
}
