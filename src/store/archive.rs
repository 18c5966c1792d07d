use std::collections::{HashMap, HashSet};
use uuid::Uuid;

use crate::models::WeekHistory;

/// Completed weeks per habit, in the order they were rolled over.
#[derive(Debug, Clone, Default)]
pub struct WeekArchive {
    weeks: HashMap<Uuid, Vec<WeekHistory>>,
}

impl WeekArchive {
    pub fn push(&mut self, habit_id: Uuid, week: WeekHistory) {
        self.weeks.entry(habit_id).or_default().push(week);
    }

    /// Every archived week, duplicates included.
    pub fn all(&self, habit_id: Uuid) -> &[WeekHistory] {
        self.weeks.get(&habit_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Archived weeks with identical content collapsed to the first one.
    pub fn unique(&self, habit_id: Uuid) -> Vec<&WeekHistory> {
        let mut seen = HashSet::new();
        self.all(habit_id)
            .iter()
            .filter(|week| seen.insert(week.signature()))
            .collect()
    }
}
