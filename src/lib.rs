pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod store;
pub mod utils;

pub use engine::{calculate_max_streak, calculate_streak, meets_goal};
pub use error::HabitError;
pub use models::{DailyLog, DayEntry, Habit, NewHabit, WeekHistory, Weekday};
pub use store::HabitStore;
