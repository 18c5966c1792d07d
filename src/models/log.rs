use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Weekday;

/// Immutable record of a value entered for a day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyLog {
    pub id: Uuid,
    pub habit_id: Uuid,
    pub day: Weekday,
    pub value: f64,
    pub notes: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    /// RFC 3339 creation date.
    pub date: String,
    /// Week sequence number of the owning habit when the log was written.
    pub week: u32,
}
