use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "habitweek", version, author, about = "Weekly habit goals and streaks in your terminal")]
pub struct Cli {
    /// Use this config file instead of the platform default
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start an interactive session (the default)
    Session,
    /// Replay session commands from a file, one per line
    Run {
        /// Script path; lines starting with '#' are skipped
        script: PathBuf,
    },
    /// Inspect or create the config file
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Write a config file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the effective configuration
    Show,
}

/// One line typed into a session.
#[derive(Parser, Debug)]
#[command(no_binary_name = true, disable_version_flag = true)]
pub struct SessionLine {
    #[command(subcommand)]
    pub command: SessionCommand,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum SessionCommand {
    /// Add a habit
    Add {
        /// Habit name (quote names with spaces)
        name: String,
        /// Unit label, e.g. ml or hours
        #[arg(long)]
        unit: Option<String>,
        /// Daily goal
        #[arg(long)]
        goal: Option<f64>,
        /// Goal is a ceiling: staying at or under it counts
        #[arg(long, conflicts_with = "more")]
        less: bool,
        /// Goal is a floor: reaching or passing it counts
        #[arg(long)]
        more: bool,
    },
    /// Show every habit with this week's values and streaks
    List,
    /// Log a value for a weekday
    Log {
        habit: String,
        /// Weekday (mon..sun)
        day: String,
        #[arg(allow_negative_numbers = true)]
        value: f64,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Set today's value
    Today {
        habit: String,
        #[arg(allow_negative_numbers = true)]
        value: f64,
    },
    /// Change an existing log entry
    EditLog {
        /// Log id or id prefix (see `logs`)
        log: String,
        #[arg(allow_negative_numbers = true)]
        value: f64,
        /// Replace the notes; left as they are when omitted
        #[arg(long)]
        notes: Option<String>,
        /// Move the log to another weekday
        #[arg(long)]
        day: Option<String>,
    },
    /// Change a habit's goal
    Goal {
        habit: String,
        #[arg(allow_negative_numbers = true)]
        value: f64,
    },
    /// Switch between ceiling (less) and floor (more) goals
    Polarity { habit: String, direction: Direction },
    /// Pick the chart shown for a habit (line, bar, pie)
    Chart { habit: String, kind: String },
    /// Archive a fully logged week and start a new one
    Rollover { habit: String },
    /// List a habit's logs, newest first
    Logs { habit: String },
    /// Show archived weeks for every habit
    Summary,
    /// Move "today" to another weekday
    Day { day: String },
    /// Toggle the email reminder
    Remind { state: Toggle },
    /// End the session
    #[command(alias = "exit")]
    Quit,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
pub enum Direction {
    Less,
    More,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
pub enum Toggle {
    On,
    Off,
}
