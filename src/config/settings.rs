use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::models::{ChartKind, NewHabit};

fn default_unit() -> String {
    "hours".to_string()
}
fn default_goal() -> f64 {
    8.0
}
fn default_bar_width() -> usize {
    12
}
fn default_true() -> bool {
    true
}

/// Values prefilled when a habit is added without explicit options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitDefaults {
    #[serde(default = "default_unit")]
    pub unit: String,
    #[serde(default = "default_goal")]
    pub goal: f64,
    #[serde(default)]
    pub healthy_if_less: bool,
    #[serde(default)]
    pub chart: ChartKind,
}

impl Default for HabitDefaults {
    fn default() -> Self {
        Self {
            unit: default_unit(),
            goal: default_goal(),
            healthy_if_less: false,
            chart: ChartKind::default(),
        }
    }
}

impl HabitDefaults {
    pub fn habit(&self, name: &str) -> NewHabit {
        NewHabit::new(name, self.unit.clone(), self.goal).healthy_if_less(self.healthy_if_less)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ReminderConfig {
    /// Starting state of the reminder toggle. No mail is sent.
    #[serde(default)]
    pub email_enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_true")]
    pub color: bool,
    #[serde(default = "default_bar_width")]
    pub bar_width: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: true,
            bar_width: default_bar_width(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub defaults: HabitDefaults,
    #[serde(default)]
    pub reminders: ReminderConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

impl AppConfig {
    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("", "", "habitweek")
            .context("Could not determine project directories")
    }

    pub fn config_path() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content =
            std::fs::read_to_string(path).with_context(|| format!("Reading {:?}", path))?;
        let config: AppConfig = toml::from_str(&content).context("Parsing config.toml")?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml()?).with_context(|| format!("Writing {:?}", path))?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Serializing config")
    }
}
