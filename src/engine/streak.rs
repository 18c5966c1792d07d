use crate::engine::meets_goal;
use crate::models::{Streak, WeekHistory, WeekProgress, Weekday};

/// Consecutive successes ending at `reference`, walking back toward Monday.
///
/// The first failing day stops the walk. Days after `reference` are ignored.
pub fn calculate_streak(
    history: &WeekHistory,
    goal: f64,
    healthy_if_less: bool,
    reference: Weekday,
) -> u32 {
    history.entries()[..=reference.index()]
        .iter()
        .rev()
        .take_while(|entry| meets_goal(entry.value, goal, healthy_if_less))
        .count() as u32
}

/// Longest run of consecutive successes anywhere in the week.
pub fn calculate_max_streak(history: &WeekHistory, goal: f64, healthy_if_less: bool) -> u32 {
    let mut best = 0u32;
    let mut run = 0u32;
    for entry in history.iter() {
        if meets_goal(entry.value, goal, healthy_if_less) {
            run += 1;
            best = best.max(run);
        } else {
            run = 0;
        }
    }
    best
}

pub fn evaluate_streak(
    history: &WeekHistory,
    goal: f64,
    healthy_if_less: bool,
    reference: Weekday,
) -> Streak {
    Streak {
        current: calculate_streak(history, goal, healthy_if_less, reference),
        best: calculate_max_streak(history, goal, healthy_if_less),
    }
}

pub fn week_progress(history: &WeekHistory, goal: f64, healthy_if_less: bool) -> WeekProgress {
    let mut progress = WeekProgress::default();
    for entry in history.iter() {
        if !entry.is_logged() {
            progress.missed_days += 1;
            continue;
        }
        progress.logged_days += 1;
        if meets_goal(entry.value, goal, healthy_if_less) {
            progress.successful_days += 1;
        } else {
            progress.below_goal_days += 1;
        }
    }
    progress
}
