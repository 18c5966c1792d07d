pub mod goal;
pub mod streak;
pub mod week;

pub use goal::meets_goal;
pub use streak::{calculate_max_streak, calculate_streak, evaluate_streak, week_progress};
