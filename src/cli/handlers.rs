use anyhow::{anyhow, Result};
use chrono::{DateTime, Local, Utc};
use std::fmt::Display;
use std::io::Write;
use std::str::FromStr;
use uuid::Uuid;

use crate::cli::args::{Direction, SessionCommand, Toggle};
use crate::config::AppConfig;
use crate::engine::meets_goal;
use crate::models::{ChartKind, DailyLog, Habit, Weekday};
use crate::store::HabitStore;
use crate::utils::format::{format_value, goal_label, pad_display, progress_bar};

// ─── ANSI helpers ────────────────────────────────────────────────────────────

const GREEN: &str = "\x1b[32m";
const AMBER: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const INDIGO: &str = "\x1b[38;2;99;102;241m";

/// Writer that colours lines only when the display config allows it.
pub struct Output<W: Write> {
    inner: W,
    color: bool,
}

impl<W: Write> Output<W> {
    pub fn new(inner: W, color: bool) -> Self {
        Self { inner, color }
    }

    pub fn line(&mut self, text: impl Display) -> Result<()> {
        writeln!(self.inner, "{}", text)?;
        Ok(())
    }

    pub fn colored(&mut self, color: &str, text: impl Display) -> Result<()> {
        if self.color {
            writeln!(self.inner, "{}{}\x1b[0m", color, text)?;
        } else {
            writeln!(self.inner, "{}", text)?;
        }
        Ok(())
    }

    pub fn blank(&mut self) -> Result<()> {
        self.line("")
    }

    pub fn prompt(&mut self, text: &str) -> Result<()> {
        write!(self.inner, "{}", text)?;
        self.inner.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

/// Whether the session should keep reading commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub fn dispatch<W: Write>(
    store: &mut HabitStore,
    config: &AppConfig,
    out: &mut Output<W>,
    command: SessionCommand,
) -> Result<Flow> {
    match command {
        SessionCommand::Add {
            name,
            unit,
            goal,
            less,
            more,
        } => {
            let direction = match (less, more) {
                (true, _) => Some(Direction::Less),
                (_, true) => Some(Direction::More),
                _ => None,
            };
            handle_add(store, config, out, &name, unit, goal, direction)?
        }
        SessionCommand::List => handle_list(store, config, out)?,
        SessionCommand::Log {
            habit,
            day,
            value,
            notes,
        } => handle_log(store, out, &habit, &day, value, notes.as_deref())?,
        SessionCommand::Today { habit, value } => handle_today(store, out, &habit, value)?,
        SessionCommand::EditLog {
            log,
            value,
            notes,
            day,
        } => handle_edit_log(store, out, &log, value, notes.as_deref(), day.as_deref())?,
        SessionCommand::Goal { habit, value } => handle_goal(store, out, &habit, value)?,
        SessionCommand::Polarity { habit, direction } => {
            handle_polarity(store, out, &habit, direction)?
        }
        SessionCommand::Chart { habit, kind } => handle_chart(store, out, &habit, &kind)?,
        SessionCommand::Rollover { habit } => handle_rollover(store, out, &habit)?,
        SessionCommand::Logs { habit } => handle_logs(store, out, &habit)?,
        SessionCommand::Summary => handle_summary(store, out)?,
        SessionCommand::Day { day } => handle_day(store, out, &day)?,
        SessionCommand::Remind { state } => handle_remind(store, out, state)?,
        SessionCommand::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

// ─── Habits ──────────────────────────────────────────────────────────────────

pub fn handle_add<W: Write>(
    store: &mut HabitStore,
    config: &AppConfig,
    out: &mut Output<W>,
    name: &str,
    unit: Option<String>,
    goal: Option<f64>,
    direction: Option<Direction>,
) -> Result<()> {
    let mut new = config.defaults.habit(name);
    if let Some(unit) = unit {
        new.unit = unit;
    }
    if let Some(goal) = goal {
        new.goal = goal;
    }
    if let Some(direction) = direction {
        new.healthy_if_less = direction == Direction::Less;
    }

    let lower = name.trim().to_lowercase();
    if store.habits().iter().any(|h| h.name.to_lowercase() == lower) {
        return out.colored(RED, format!("  Habit not added: \"{}\" already exists", name.trim()));
    }
    let Some(id) = store.create_habit(new).map(|h| h.id) else {
        return out.colored(RED, "  Habit not added: it needs a name and a goal above 0");
    };
    let habit = store
        .set_chart_kind(id, config.defaults.chart)
        .ok_or_else(|| anyhow!("Habit {} vanished after creation", id))?;
    out.colored(
        GREEN,
        format!(
            "  ✓ \"{}\" added ({})",
            habit.name,
            goal_label(habit.goal, &habit.unit, habit.healthy_if_less)
        ),
    )
}

pub fn handle_list<W: Write>(
    store: &HabitStore,
    config: &AppConfig,
    out: &mut Output<W>,
) -> Result<()> {
    out.blank()?;
    if store.habits().is_empty() {
        out.colored(DIM, "  No habits yet. Try: add \"Drink water\" --unit ml --goal 2000")?;
        out.blank()?;
        return Ok(());
    }

    let today = store.today();
    let reminder = if store.email_reminder() { "on" } else { "off" };
    out.colored(
        INDIGO,
        format!("  Habits — today is {}  ·  reminder {}", today, reminder),
    )?;
    out.blank()?;

    let width = store
        .habits()
        .iter()
        .map(|h| unicode_width::UnicodeWidthStr::width(h.name.as_str()))
        .max()
        .unwrap_or(0);
    for habit in store.habits() {
        render_habit(store, config, out, habit, width)?;
    }
    Ok(())
}

fn render_habit<W: Write>(
    store: &HabitStore,
    config: &AppConfig,
    out: &mut Output<W>,
    habit: &Habit,
    width: usize,
) -> Result<()> {
    let progress = store.week_progress(habit.id).unwrap_or_default();
    out.colored(
        BOLD,
        format!(
            "  {}  {}  [{}]  {}",
            pad_display(&habit.name, width),
            goal_label(habit.goal, &habit.unit, habit.healthy_if_less),
            habit.chart,
            short_id(habit.id),
        ),
    )?;

    let days: Vec<String> = habit
        .history
        .iter()
        .map(|entry| {
            let mark = if !entry.is_logged() {
                "·"
            } else if meets_goal(entry.value, habit.goal, habit.healthy_if_less) {
                "✓"
            } else {
                "✗"
            };
            format!("{} {}{}", entry.day, format_value(entry.value), mark)
        })
        .collect();
    out.line(format!("    {}", days.join("  ")))?;

    out.colored(
        GREEN,
        format!(
            "    {}  {} days current  |  {} days best",
            progress_bar(habit.streak, 7, config.display.bar_width),
            habit.streak,
            habit.max_streak
        ),
    )?;
    out.colored(
        DIM,
        format!(
            "    Logged {}/7 ({:.0}%)  ·  missed {}  ·  below goal {}  ·  success {}%",
            progress.logged_days,
            progress.percent_logged(),
            progress.missed_days,
            progress.below_goal_days,
            progress.success_rate()
        ),
    )?;
    match habit.history.next_editable_day() {
        Some(day) => out.colored(DIM, format!("    Next entry: {}", day))?,
        None => out.colored(AMBER, "    Week complete — run `rollover` to start a new one")?,
    }
    out.blank()
}

pub fn handle_chart<W: Write>(
    store: &mut HabitStore,
    out: &mut Output<W>,
    query: &str,
    kind: &str,
) -> Result<()> {
    let kind = ChartKind::from_str(kind)?;
    let id = resolve_habit(store, query)?;
    if let Some(habit) = store.set_chart_kind(id, kind) {
        out.colored(GREEN, format!("  ✓ {} now shows a {} chart", habit.name, habit.chart))?;
    }
    Ok(())
}

// ─── Logging values ──────────────────────────────────────────────────────────

pub fn handle_log<W: Write>(
    store: &mut HabitStore,
    out: &mut Output<W>,
    query: &str,
    day: &str,
    value: f64,
    notes: Option<&str>,
) -> Result<()> {
    let day = Weekday::from_str(day)?;
    let id = resolve_habit(store, query)?;
    match store.record_day_value(id, day, value, notes) {
        Some(habit) => report_value(out, habit, day, value),
        None => out.colored(RED, format!("  Value {} not saved", format_value(value))),
    }
}

pub fn handle_today<W: Write>(
    store: &mut HabitStore,
    out: &mut Output<W>,
    query: &str,
    value: f64,
) -> Result<()> {
    let id = resolve_habit(store, query)?;
    let today = store.today();
    match store.set_today_value(id, value) {
        Some(habit) => report_value(out, habit, today, value),
        None => out.colored(RED, format!("  Value {} not saved", format_value(value))),
    }
}

pub fn handle_edit_log<W: Write>(
    store: &mut HabitStore,
    out: &mut Output<W>,
    query: &str,
    value: f64,
    notes: Option<&str>,
    day: Option<&str>,
) -> Result<()> {
    let day = day.map(Weekday::from_str).transpose()?;
    let log_id = resolve_log(store, query)?;
    match store.edit_log(log_id, value, notes, day) {
        Some(habit) => out.colored(
            GREEN,
            format!(
                "  ✓ Log updated — {}: {} days current, {} best",
                habit.name, habit.streak, habit.max_streak
            ),
        ),
        None => out.colored(RED, format!("  Value {} not saved", format_value(value))),
    }
}

pub fn handle_logs<W: Write>(store: &HabitStore, out: &mut Output<W>, query: &str) -> Result<()> {
    let id = resolve_habit(store, query)?;
    let logs = store.logs_newest_first(id);
    let unit = store.habit(id).map(|h| h.unit.as_str()).unwrap_or_default();

    out.blank()?;
    if logs.is_empty() {
        out.colored(DIM, "  No logs yet for this habit")?;
    }
    for log in logs {
        out.line(format_log(log, unit))?;
    }
    out.blank()
}

fn format_log(log: &DailyLog, unit: &str) -> String {
    let when = DateTime::<Utc>::from_timestamp_millis(log.timestamp)
        .map(|t| t.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| log.date.clone());
    let mut line = format!(
        "  {}  {}  {} {}  {}",
        short_id(log.id),
        log.day,
        format_value(log.value),
        unit,
        when
    );
    if !log.notes.is_empty() {
        line.push_str(&format!("  — {}", log.notes));
    }
    line
}

fn report_value<W: Write>(out: &mut Output<W>, habit: &Habit, day: Weekday, value: f64) -> Result<()> {
    out.colored(
        GREEN,
        format!(
            "  📝 {} saved for {}: {} {} — {} days current, {} best",
            day,
            habit.name,
            format_value(value),
            habit.unit,
            habit.streak,
            habit.max_streak
        ),
    )
}

// ─── Goals ───────────────────────────────────────────────────────────────────

pub fn handle_goal<W: Write>(
    store: &mut HabitStore,
    out: &mut Output<W>,
    query: &str,
    goal: f64,
) -> Result<()> {
    let id = resolve_habit(store, query)?;
    match store.update_goal(id, goal) {
        Some(habit) => out.colored(
            GREEN,
            format!(
                "  🎯 Goal updated: {} — {} days current, {} best",
                goal_label(habit.goal, &habit.unit, habit.healthy_if_less),
                habit.streak,
                habit.max_streak
            ),
        ),
        None => out.colored(RED, "  Goal must be above 0"),
    }
}

pub fn handle_polarity<W: Write>(
    store: &mut HabitStore,
    out: &mut Output<W>,
    query: &str,
    direction: Direction,
) -> Result<()> {
    let id = resolve_habit(store, query)?;
    if let Some(habit) = store.set_polarity(id, direction == Direction::Less) {
        out.colored(
            GREEN,
            format!(
                "  ✓ {} goal is now {}",
                habit.name,
                goal_label(habit.goal, &habit.unit, habit.healthy_if_less)
            ),
        )?;
    }
    Ok(())
}

// ─── Weeks ───────────────────────────────────────────────────────────────────

pub fn handle_rollover<W: Write>(store: &mut HabitStore, out: &mut Output<W>, query: &str) -> Result<()> {
    let id = resolve_habit(store, query)?;
    match store.rollover_week(id) {
        Some(_) => out.colored(GREEN, "  🔄 New week started"),
        None => {
            let next = store
                .habit(id)
                .and_then(|h| h.history.next_editable_day())
                .map(|d| d.to_string())
                .unwrap_or_default();
            out.colored(AMBER, format!("  Week not complete yet — next entry: {}", next))
        }
    }
}

pub fn handle_summary<W: Write>(store: &HabitStore, out: &mut Output<W>) -> Result<()> {
    out.blank()?;
    out.colored(INDIGO, "  📈 Weekly Habit Summary")?;
    for habit in store.habits() {
        out.blank()?;
        out.colored(BOLD, format!("  {}", habit.name))?;
        let weeks = store.past_weeks(habit.id);
        if weeks.is_empty() {
            out.colored(DIM, "    No past data yet")?;
        }
        for (i, week) in weeks.iter().enumerate() {
            let days: Vec<String> = week
                .iter()
                .map(|e| format!("{} {}", e.day, format_value(e.value)))
                .collect();
            out.line(format!("    Week {}  {}", i + 1, days.join("  ")))?;
        }
    }
    out.blank()
}

pub fn handle_day<W: Write>(store: &mut HabitStore, out: &mut Output<W>, day: &str) -> Result<()> {
    let day = Weekday::from_str(day)?;
    store.on_day_rollover(day);
    out.colored(DIM, format!("  Today is now {}", day))
}

pub fn handle_remind<W: Write>(store: &mut HabitStore, out: &mut Output<W>, state: Toggle) -> Result<()> {
    store.set_email_reminder(state == Toggle::On);
    if store.email_reminder() {
        out.colored(GREEN, "  🔔 Reminder on")
    } else {
        out.colored(DIM, "  🔕 Reminder off")
    }
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn short_id(id: Uuid) -> String {
    id.simple().to_string()[..8].to_string()
}

fn resolve_habit(store: &HabitStore, query: &str) -> Result<Uuid> {
    store
        .resolve(query)
        .map(|h| h.id)
        .ok_or_else(|| anyhow!("No habit matches '{}'", query))
}

fn resolve_log(store: &HabitStore, query: &str) -> Result<Uuid> {
    if let Ok(id) = Uuid::parse_str(query) {
        return store
            .find_log(id)
            .map(|(_, log)| log.id)
            .ok_or_else(|| anyhow!("No log with id '{}'", query));
    }
    let prefix = query.trim().to_lowercase();
    let mut matches = store
        .habits()
        .iter()
        .flat_map(|h| h.logs.iter())
        .filter(|log| !prefix.is_empty() && log.id.simple().to_string().starts_with(&prefix));
    match (matches.next(), matches.next()) {
        (Some(log), None) => Ok(log.id),
        (Some(_), Some(_)) => Err(anyhow!("Log id '{}' is ambiguous", query)),
        _ => Err(anyhow!("No log with id '{}'", query)),
    }
}
