use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streak {
    pub current: u32,
    pub best: u32,
}

/// Per-week tallies shown next to a habit's chart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeekProgress {
    pub logged_days: u32,
    pub missed_days: u32,
    pub below_goal_days: u32,
    pub successful_days: u32,
}

impl WeekProgress {
    pub fn percent_logged(&self) -> f64 {
        self.logged_days as f64 / 7.0 * 100.0
    }

    pub fn success_rate(&self) -> u32 {
        (self.successful_days as f64 / 7.0 * 100.0).round() as u32
    }
}
