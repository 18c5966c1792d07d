pub mod habit;
pub mod log;
pub mod stats;
pub mod week;
pub mod weekday;

pub use habit::{ChartKind, Habit, NewHabit};
pub use log::DailyLog;
pub use stats::{Streak, WeekProgress};
pub use week::{DayEntry, WeekHistory};
pub use weekday::Weekday;
