use thiserror::Error;

use crate::models::Weekday;

#[derive(Debug, Error, PartialEq)]
pub enum HabitError {
    #[error("Unknown weekday: {0}")]
    UnknownWeekday(String),

    #[error("Unknown chart kind: {0} (expected line, bar or pie)")]
    UnknownChartKind(String),

    #[error("Week history has {0} entries, expected 7")]
    WrongDayCount(usize),

    #[error("Week history lists {0} more than once")]
    DuplicateDay(Weekday),
}
