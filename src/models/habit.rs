use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::HabitError;
use crate::models::{DailyLog, WeekHistory};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Line,
    Bar,
    Pie,
}

impl ChartKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::Line => "line",
            ChartKind::Bar => "bar",
            ChartKind::Pie => "pie",
        }
    }
}

impl std::fmt::Display for ChartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ChartKind {
    type Err = HabitError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "line" => Ok(ChartKind::Line),
            "bar" => Ok(ChartKind::Bar),
            "pie" => Ok(ChartKind::Pie),
            _ => Err(HabitError::UnknownChartKind(s.to_string())),
        }
    }
}

/// Input for [`crate::store::HabitStore::create_habit`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewHabit {
    pub name: String,
    pub unit: String,
    pub goal: f64,
    pub healthy_if_less: bool,
}

impl NewHabit {
    pub fn new(name: impl Into<String>, unit: impl Into<String>, goal: f64) -> Self {
        Self {
            name: name.into(),
            unit: unit.into(),
            goal,
            healthy_if_less: false,
        }
    }

    pub fn healthy_if_less(mut self, healthy_if_less: bool) -> Self {
        self.healthy_if_less = healthy_if_less;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    pub id: Uuid,
    pub name: String,
    pub unit: String,
    /// `true` makes the goal a ceiling, `false` a floor.
    pub healthy_if_less: bool,
    pub goal: f64,
    /// Today's value, mirrored from `history`.
    pub current: f64,
    pub streak: u32,
    pub max_streak: u32,
    pub history: WeekHistory,
    pub chart: ChartKind,
    pub logs: Vec<DailyLog>,
    /// Incremented on every rollover.
    pub week: u32,
}

impl Habit {
    pub fn has_logs(&self) -> bool {
        !self.logs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chart_kind_parses_case_insensitively() {
        assert_eq!("Bar".parse::<ChartKind>().unwrap(), ChartKind::Bar);
        assert_eq!("pie".parse::<ChartKind>().unwrap(), ChartKind::Pie);
        assert_eq!(
            "radar".parse::<ChartKind>(),
            Err(HabitError::UnknownChartKind("radar".to_string()))
        );
    }

    #[test]
    fn new_habit_defaults_to_floor_goal() {
        let habit = NewHabit::new("Water", "ml", 2000.0);
        assert!(!habit.healthy_if_less);
        assert!(habit.healthy_if_less(true).healthy_if_less);
    }
}
