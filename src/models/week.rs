use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::HabitError;
use crate::models::Weekday;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayEntry {
    pub id: Uuid,
    pub day: Weekday,
    /// Exactly zero means nothing was logged for the day.
    pub value: f64,
}

impl DayEntry {
    pub fn empty(day: Weekday) -> Self {
        Self {
            id: Uuid::new_v4(),
            day,
            value: 0.0,
        }
    }

    pub fn is_logged(&self) -> bool {
        self.value != 0.0
    }
}

/// One entry per weekday, always in Mon..Sun order.
///
/// The slot for a weekday is its canonical index, so the
/// "exactly seven, unique, sorted" shape cannot be broken from outside.
/// Deserialization goes through [`WeekHistory::from_entries`] and rejects
/// anything else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<DayEntry>", into = "Vec<DayEntry>")]
pub struct WeekHistory {
    pub(crate) days: [DayEntry; 7],
}

impl WeekHistory {
    pub fn get(&self, day: Weekday) -> &DayEntry {
        &self.days[day.index()]
    }

    pub fn value(&self, day: Weekday) -> f64 {
        self.get(day).value
    }

    pub fn entries(&self) -> &[DayEntry; 7] {
        &self.days
    }

    pub fn iter(&self) -> impl Iterator<Item = &DayEntry> {
        self.days.iter()
    }

    pub fn values(&self) -> [f64; 7] {
        std::array::from_fn(|i| self.days[i].value)
    }
}

impl TryFrom<Vec<DayEntry>> for WeekHistory {
    type Error = HabitError;

    fn try_from(entries: Vec<DayEntry>) -> Result<Self, Self::Error> {
        Self::from_entries(entries)
    }
}

impl From<WeekHistory> for Vec<DayEntry> {
    fn from(history: WeekHistory) -> Self {
        history.days.into()
    }
}
