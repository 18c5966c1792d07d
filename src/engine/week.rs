use uuid::Uuid;

use crate::error::HabitError;
use crate::models::{DayEntry, WeekHistory, Weekday};

impl WeekHistory {
    /// Seven empty days with fresh ids.
    pub fn fresh() -> Self {
        Self {
            days: Weekday::ALL.map(DayEntry::empty),
        }
    }

    pub fn with_values(values: [f64; 7]) -> Self {
        let mut history = Self::fresh();
        for (entry, value) in history.days.iter_mut().zip(values) {
            entry.value = value;
        }
        history
    }

    /// Builds a history from loosely ordered entries, sorting them into
    /// canonical weekday order.
    pub fn from_entries(mut entries: Vec<DayEntry>) -> Result<Self, HabitError> {
        if entries.len() != 7 {
            return Err(HabitError::WrongDayCount(entries.len()));
        }
        entries.sort_by_key(|entry| entry.day);
        if let Some(pair) = entries.windows(2).find(|pair| pair[0].day == pair[1].day) {
            return Err(HabitError::DuplicateDay(pair[0].day));
        }
        let days: [DayEntry; 7] = entries
            .try_into()
            .map_err(|rest: Vec<DayEntry>| HabitError::WrongDayCount(rest.len()))?;
        Ok(Self { days })
    }

    /// Replaces the entry for `day`, leaving the other six untouched.
    pub fn record(&mut self, day: Weekday, value: f64) {
        self.days[day.index()] = DayEntry {
            id: Uuid::new_v4(),
            day,
            value,
        };
    }

    /// First weekday with nothing logged, or `None` once the week is full.
    pub fn next_editable_day(&self) -> Option<Weekday> {
        self.iter().find(|entry| !entry.is_logged()).map(|entry| entry.day)
    }

    pub fn is_complete(&self) -> bool {
        self.iter().all(DayEntry::is_logged)
    }

    /// Deep copy with new ids so archived weeks never alias live entries.
    pub fn snapshot(&self) -> Self {
        Self {
            days: self.days.clone().map(|entry| DayEntry {
                id: Uuid::new_v4(),
                ..entry
            }),
        }
    }

    /// Content key used to spot duplicate archives, e.g. `Mon:1800,Tue:2000,...`.
    pub fn signature(&self) -> String {
        self.iter()
            .map(|entry| format!("{}:{}", entry.day, entry.value))
            .collect::<Vec<_>>()
            .join(",")
    }
}
