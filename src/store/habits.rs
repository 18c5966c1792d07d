use chrono::Utc;
use log::{debug, info, warn};
use uuid::Uuid;

use crate::engine::{evaluate_streak, week_progress};
use crate::models::{
    ChartKind, DailyLog, Habit, NewHabit, WeekHistory, WeekProgress, Weekday,
};
use crate::store::WeekArchive;

/// Owns every habit, its logs and its archived weeks for one session.
///
/// Mutators return the updated habit, or `None` when the action was
/// declined (invalid input or unknown id). Declining never changes state.
#[derive(Debug, Clone)]
pub struct HabitStore {
    habits: Vec<Habit>,
    archive: WeekArchive,
    today: Weekday,
    email_reminder: bool,
}

impl HabitStore {
    pub fn new(today: Weekday) -> Self {
        Self {
            habits: Vec::new(),
            archive: WeekArchive::default(),
            today,
            email_reminder: false,
        }
    }

    // ─── Reads ───────────────────────────────────────────────────────────────

    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    pub fn habit(&self, id: Uuid) -> Option<&Habit> {
        self.habits.iter().find(|h| h.id == id)
    }

    /// Looks a habit up by full id, id prefix, or case-insensitive name.
    /// A name or prefix shared by several habits matches none of them.
    pub fn resolve(&self, query: &str) -> Option<&Habit> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }
        if let Ok(id) = Uuid::parse_str(query) {
            return self.habit(id);
        }
        let lower = query.to_lowercase();
        let by_name = self.habits.iter().filter(|h| h.name.to_lowercase() == lower);
        if let Some(habit) = single(by_name) {
            return habit;
        }
        single(
            self.habits
                .iter()
                .filter(|h| h.id.simple().to_string().starts_with(&lower)),
        )
        .flatten()
    }

    pub fn today(&self) -> Weekday {
        self.today
    }

    pub fn email_reminder(&self) -> bool {
        self.email_reminder
    }

    pub fn find_log(&self, log_id: Uuid) -> Option<(&Habit, &DailyLog)> {
        self.habits
            .iter()
            .find_map(|h| h.logs.iter().find(|l| l.id == log_id).map(|l| (h, l)))
    }

    /// Logs for a habit, most recent first.
    pub fn logs_newest_first(&self, habit_id: Uuid) -> Vec<&DailyLog> {
        let Some(habit) = self.habit(habit_id) else {
            return Vec::new();
        };
        let mut logs: Vec<&DailyLog> = habit.logs.iter().rev().collect();
        logs.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        logs
    }

    /// Archived weeks for a habit with duplicate content removed.
    pub fn past_weeks(&self, habit_id: Uuid) -> Vec<&WeekHistory> {
        self.archive.unique(habit_id)
    }

    pub fn week_progress(&self, habit_id: Uuid) -> Option<WeekProgress> {
        self.habit(habit_id)
            .map(|h| week_progress(&h.history, h.goal, h.healthy_if_less))
    }

    // ─── Habit lifecycle ─────────────────────────────────────────────────────

    pub fn create_habit(&mut self, new: NewHabit) -> Option<&Habit> {
        let name = new.name.trim();
        if name.is_empty() {
            warn!("Ignoring habit with an empty name");
            return None;
        }
        if !valid_goal(new.goal) {
            warn!("Ignoring habit '{}' with goal {}", name, new.goal);
            return None;
        }

        let mut habit = Habit {
            id: Uuid::new_v4(),
            name: name.to_string(),
            unit: new.unit.trim().to_string(),
            healthy_if_less: new.healthy_if_less,
            goal: new.goal,
            current: 0.0,
            streak: 0,
            max_streak: 0,
            history: WeekHistory::fresh(),
            chart: ChartKind::default(),
            logs: Vec::new(),
            week: 0,
        };
        refresh_streak(&mut habit, self.today);
        info!("Created habit '{}' ({})", habit.name, habit.id);

        self.habits.push(habit);
        self.habits.last()
    }

    pub fn set_chart_kind(&mut self, habit_id: Uuid, chart: ChartKind) -> Option<&Habit> {
        let habit = self.habit_mut(habit_id)?;
        habit.chart = chart;
        Some(&*habit)
    }

    pub fn set_email_reminder(&mut self, enabled: bool) {
        // Nothing is ever sent; the flag only drives the UI.
        info!("Email reminder {}", if enabled { "enabled" } else { "disabled" });
        self.email_reminder = enabled;
    }

    // ─── Day values and logs ─────────────────────────────────────────────────

    /// Stores `value` for `day`, appends a log and recomputes streaks with
    /// `day` as the reference.
    pub fn record_day_value(
        &mut self,
        habit_id: Uuid,
        day: Weekday,
        value: f64,
        notes: Option<&str>,
    ) -> Option<&Habit> {
        if !valid_value(value) {
            warn!("Ignoring value {} for {}", value, day);
            return None;
        }
        let today = self.today;
        let habit = self.habit_mut(habit_id)?;
        let now = Utc::now();

        let log = DailyLog {
            id: Uuid::new_v4(),
            habit_id,
            day,
            value,
            notes: notes.unwrap_or_default().to_string(),
            timestamp: now.timestamp_millis(),
            date: now.to_rfc3339(),
            week: habit.week,
        };
        habit.logs.push(log);
        apply_value(habit, day, value, today);
        refresh_streak(habit, day);
        Some(&*habit)
    }

    /// Records a value against today.
    pub fn set_today_value(&mut self, habit_id: Uuid, value: f64) -> Option<&Habit> {
        let today = self.today;
        self.record_day_value(habit_id, today, value, None)
    }

    /// Rewrites an existing log in place. Notes are kept when `notes` is
    /// `None`. The value only reaches `history` when the log was written
    /// during the habit's current week.
    pub fn edit_log(
        &mut self,
        log_id: Uuid,
        value: f64,
        notes: Option<&str>,
        day: Option<Weekday>,
    ) -> Option<&Habit> {
        if !valid_value(value) {
            warn!("Ignoring edited value {}", value);
            return None;
        }
        let today = self.today;
        let habit = self
            .habits
            .iter_mut()
            .find(|h| h.logs.iter().any(|l| l.id == log_id))?;
        let current_week = habit.week;

        let log = habit.logs.iter_mut().find(|l| l.id == log_id)?;
        log.value = value;
        if let Some(notes) = notes {
            log.notes = notes.to_string();
        }
        if let Some(day) = day {
            log.day = day;
        }
        let (day, week) = (log.day, log.week);

        if week == current_week {
            apply_value(habit, day, value, today);
            refresh_streak(habit, day);
        } else {
            debug!("Log {} belongs to week {}, history untouched", log_id, week);
        }
        Some(&*habit)
    }

    // ─── Goals ───────────────────────────────────────────────────────────────

    pub fn update_goal(&mut self, habit_id: Uuid, goal: f64) -> Option<&Habit> {
        if !valid_goal(goal) {
            warn!("Ignoring goal {}", goal);
            return None;
        }
        let today = self.today;
        let habit = self.habit_mut(habit_id)?;
        info!("Goal for '{}' changed {} -> {}", habit.name, habit.goal, goal);
        habit.goal = goal;
        refresh_streak(habit, today);
        Some(&*habit)
    }

    pub fn set_polarity(&mut self, habit_id: Uuid, healthy_if_less: bool) -> Option<&Habit> {
        let today = self.today;
        let habit = self.habit_mut(habit_id)?;
        habit.healthy_if_less = healthy_if_less;
        refresh_streak(habit, today);
        Some(&*habit)
    }

    // ─── Week and day rollover ───────────────────────────────────────────────

    /// Archives a fully logged week and starts a blank one. Returns the
    /// archived copy, or `None` if the week still has empty days.
    pub fn rollover_week(&mut self, habit_id: Uuid) -> Option<WeekHistory> {
        let today = self.today;
        let habit = self.habits.iter_mut().find(|h| h.id == habit_id)?;
        if !habit.history.is_complete() {
            warn!("Week for '{}' is not complete yet", habit.name);
            return None;
        }

        let archived = habit.history.snapshot();
        habit.history = WeekHistory::fresh();
        habit.current = 0.0;
        habit.week += 1;
        refresh_streak(habit, today);
        info!("Started week {} for '{}'", habit.week, habit.name);

        self.archive.push(habit_id, archived.clone());
        Some(archived)
    }

    /// Moves "today" and recomputes every habit that has been logged.
    /// Habits with no logs keep their zero streaks.
    pub fn on_day_rollover(&mut self, today: Weekday) {
        self.today = today;
        for habit in self.habits.iter_mut().filter(|h| h.has_logs()) {
            refresh_streak(habit, today);
        }
    }

    fn habit_mut(&mut self, id: Uuid) -> Option<&mut Habit> {
        self.habits.iter_mut().find(|h| h.id == id)
    }
}

/// `None` when nothing matched, `Some(None)` when more than one did.
fn single<'a>(mut matches: impl Iterator<Item = &'a Habit>) -> Option<Option<&'a Habit>> {
    let first = matches.next()?;
    match matches.next() {
        None => Some(Some(first)),
        Some(_) => Some(None),
    }
}

fn valid_goal(goal: f64) -> bool {
    goal.is_finite() && goal > 0.0
}

fn valid_value(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

fn apply_value(habit: &mut Habit, day: Weekday, value: f64, today: Weekday) {
    habit.history.record(day, value);
    if day == today {
        habit.current = value;
    }
}

fn refresh_streak(habit: &mut Habit, reference: Weekday) {
    let streak = evaluate_streak(&habit.history, habit.goal, habit.healthy_if_less, reference);
    habit.streak = streak.current;
    habit.max_streak = streak.best;
    debug!(
        "'{}' streak {} (best {}) as of {}",
        habit.name, habit.streak, habit.max_streak, reference
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with_water() -> (HabitStore, Uuid) {
        let mut store = HabitStore::new(Weekday::Sun);
        let id = store
            .create_habit(NewHabit::new("Water", "ml", 2000.0))
            .unwrap()
            .id;
        (store, id)
    }

    fn fill_week(store: &mut HabitStore, id: Uuid, values: [f64; 7]) {
        for (day, value) in Weekday::ALL.into_iter().zip(values) {
            store.record_day_value(id, day, value, None).unwrap();
        }
    }

    #[test]
    fn create_rejects_blank_name_and_bad_goal() {
        let mut store = HabitStore::new(Weekday::Mon);
        assert!(store.create_habit(NewHabit::new("   ", "ml", 1.0)).is_none());
        assert!(store.create_habit(NewHabit::new("Run", "km", 0.0)).is_none());
        assert!(store.create_habit(NewHabit::new("Run", "km", -2.0)).is_none());
        assert!(store.create_habit(NewHabit::new("Run", "km", f64::NAN)).is_none());
        assert!(store.habits().is_empty());
    }

    #[test]
    fn create_trims_name_and_starts_empty() {
        let mut store = HabitStore::new(Weekday::Mon);
        let habit = store
            .create_habit(NewHabit::new("  Sleep ", "hours", 8.0))
            .unwrap();
        assert_eq!(habit.name, "Sleep");
        assert!(!habit.healthy_if_less);
        assert_eq!((habit.streak, habit.max_streak), (0, 0));
        assert_eq!(habit.history.values(), [0.0; 7]);
        assert_eq!(habit.chart, ChartKind::Line);
    }

    #[test]
    fn record_appends_log_and_uses_edited_day_as_reference() {
        let (mut store, id) = store_with_water();
        fill_week(&mut store, id, [1800.0, 2000.0, 1900.0, 2100.0, 2000.0, 1600.0, 750.0]);

        let habit = store.habit(id).unwrap();
        assert_eq!(habit.logs.len(), 7);
        assert_eq!(habit.streak, 0);
        assert_eq!(habit.max_streak, 2);
        assert_eq!(habit.current, 750.0);

        let habit = store.record_day_value(id, Weekday::Fri, 2050.0, Some("late")).unwrap();
        assert_eq!(habit.streak, 2);
        assert_eq!(habit.logs.len(), 8);
        assert_eq!(habit.logs[7].notes, "late");
        assert_eq!(habit.current, 750.0);
    }

    #[test]
    fn record_declines_negative_value_and_unknown_habit() {
        let (mut store, id) = store_with_water();
        assert!(store.record_day_value(id, Weekday::Mon, -1.0, None).is_none());
        assert!(store
            .record_day_value(Uuid::new_v4(), Weekday::Mon, 1.0, None)
            .is_none());
        assert!(store.habit(id).unwrap().logs.is_empty());
    }

    #[test]
    fn today_value_updates_current() {
        let (mut store, id) = store_with_water();
        let habit = store.set_today_value(id, 2200.0).unwrap();
        assert_eq!(habit.current, 2200.0);
        assert_eq!(habit.history.value(Weekday::Sun), 2200.0);
        assert_eq!(habit.streak, 1);
    }

    #[test]
    fn goal_change_recomputes_without_touching_values() {
        let (mut store, id) = store_with_water();
        fill_week(&mut store, id, [1800.0, 2000.0, 1900.0, 2100.0, 2000.0, 1600.0, 750.0]);
        let before = store.habit(id).unwrap().history.values();

        let habit = store.update_goal(id, 1700.0).unwrap();
        assert_eq!(habit.max_streak, 5);
        assert_eq!(habit.history.values(), before);

        assert!(store.update_goal(id, 0.0).is_none());
        assert_eq!(store.habit(id).unwrap().goal, 1700.0);
    }

    #[test]
    fn polarity_change_recomputes() {
        let mut store = HabitStore::new(Weekday::Sun);
        let id = store
            .create_habit(NewHabit::new("Screen", "hours", 4.0))
            .unwrap()
            .id;
        fill_week(&mut store, id, [3.0, 4.0, 2.0, 5.0, 4.0, 1.0, 3.0]);
        assert_eq!(store.habit(id).unwrap().max_streak, 2);

        let habit = store.set_polarity(id, true).unwrap();
        assert_eq!(habit.streak, 3);
        assert_eq!(habit.max_streak, 3);
    }

    #[test]
    fn edit_log_propagates_to_history() {
        let (mut store, id) = store_with_water();
        store.record_day_value(id, Weekday::Sat, 1000.0, None).unwrap();
        let log_id = store.habit(id).unwrap().logs[0].id;

        let habit = store.edit_log(log_id, 2500.0, Some("fixed"), None).unwrap();
        assert_eq!(habit.history.value(Weekday::Sat), 2500.0);
        assert_eq!(habit.logs.len(), 1);
        assert_eq!(habit.logs[0].value, 2500.0);
        assert_eq!(habit.logs[0].notes, "fixed");
        assert_eq!(habit.streak, 1);
    }

    #[test]
    fn edit_log_can_move_day() {
        let (mut store, id) = store_with_water();
        store.record_day_value(id, Weekday::Mon, 2000.0, None).unwrap();
        let log_id = store.habit(id).unwrap().logs[0].id;

        let habit = store.edit_log(log_id, 2100.0, None, Some(Weekday::Tue)).unwrap();
        assert_eq!(habit.logs[0].day, Weekday::Tue);
        assert_eq!(habit.history.value(Weekday::Tue), 2100.0);
        assert_eq!(habit.streak, 2);
    }

    #[test]
    fn edit_log_from_archived_week_leaves_history_alone() {
        let (mut store, id) = store_with_water();
        fill_week(&mut store, id, [2000.0; 7]);
        let old_log = store.habit(id).unwrap().logs[0].id;
        store.rollover_week(id).unwrap();

        let habit = store.edit_log(old_log, 3000.0, None, None).unwrap();
        assert_eq!(habit.history.values(), [0.0; 7]);
        assert_eq!(habit.logs[0].value, 3000.0);
        assert_eq!(store.past_weeks(id)[0].values(), [2000.0; 7]);
    }

    #[test]
    fn edit_log_keeps_notes_unless_replaced() {
        let (mut store, id) = store_with_water();
        store
            .record_day_value(id, Weekday::Mon, 1800.0, Some("after gym"))
            .unwrap();
        let log_id = store.habit(id).unwrap().logs[0].id;

        let habit = store.edit_log(log_id, 2100.0, None, None).unwrap();
        assert_eq!(habit.logs[0].notes, "after gym");

        let habit = store.edit_log(log_id, 2100.0, Some(""), None).unwrap();
        assert_eq!(habit.logs[0].notes, "");
    }

    #[test]
    fn log_timestamp_and_date_agree() {
        let (mut store, id) = store_with_water();
        let habit = store.record_day_value(id, Weekday::Mon, 1.0, None).unwrap();
        let log = &habit.logs[0];
        let date = chrono::DateTime::parse_from_rfc3339(&log.date).unwrap();
        assert_eq!(date.timestamp_millis(), log.timestamp);
    }

    #[test]
    fn edit_log_with_unknown_id_is_declined() {
        let (mut store, _) = store_with_water();
        assert!(store.edit_log(Uuid::new_v4(), 1.0, None, None).is_none());
    }

    #[test]
    fn rollover_requires_complete_week() {
        let (mut store, id) = store_with_water();
        store.record_day_value(id, Weekday::Mon, 2000.0, None).unwrap();
        assert!(store.rollover_week(id).is_none());
        assert!(store.past_weeks(id).is_empty());
    }

    #[test]
    fn rollover_archives_once_and_resets() {
        let (mut store, id) = store_with_water();
        let values = [1800.0, 2000.0, 1900.0, 2100.0, 2000.0, 1600.0, 750.0];
        fill_week(&mut store, id, values);

        let archived = store.rollover_week(id).unwrap();
        assert_eq!(archived.values(), values);
        assert!(store.rollover_week(id).is_none());

        let habit = store.habit(id).unwrap();
        assert_eq!(habit.history.values(), [0.0; 7]);
        assert_eq!(habit.current, 0.0);
        assert_eq!((habit.streak, habit.max_streak), (0, 0));
        assert_eq!(habit.week, 1);
        assert_eq!(store.past_weeks(id).len(), 1);
    }

    #[test]
    fn identical_archived_weeks_are_shown_once() {
        let (mut store, id) = store_with_water();
        let values = [2000.0, 2000.0, 2000.0, 2000.0, 2000.0, 2000.0, 1.0];
        fill_week(&mut store, id, values);
        store.rollover_week(id).unwrap();
        fill_week(&mut store, id, values);
        store.rollover_week(id).unwrap();

        assert_eq!(store.archive.all(id).len(), 2);
        let past = store.past_weeks(id);
        assert_eq!(past.len(), 1);
        assert_eq!(past[0].values(), values);
    }

    #[test]
    fn day_rollover_skips_habits_without_logs() {
        let mut store = HabitStore::new(Weekday::Mon);
        let logged = store
            .create_habit(NewHabit::new("Water", "ml", 2000.0))
            .unwrap()
            .id;
        let idle = store
            .create_habit(NewHabit::new("Read", "pages", 10.0))
            .unwrap()
            .id;
        store.record_day_value(logged, Weekday::Mon, 2000.0, None).unwrap();
        store.record_day_value(logged, Weekday::Tue, 2000.0, None).unwrap();
        store.record_day_value(logged, Weekday::Wed, 2000.0, None).unwrap();

        store.on_day_rollover(Weekday::Tue);
        assert_eq!(store.today(), Weekday::Tue);
        assert_eq!(store.habit(logged).unwrap().streak, 2);
        assert_eq!(store.habit(idle).unwrap().streak, 0);
        assert!(!store.habit(idle).unwrap().has_logs());
    }

    #[test]
    fn logs_listed_newest_first() {
        let (mut store, id) = store_with_water();
        store.record_day_value(id, Weekday::Mon, 1.0, None).unwrap();
        store.record_day_value(id, Weekday::Tue, 2.0, None).unwrap();
        store.record_day_value(id, Weekday::Wed, 3.0, None).unwrap();

        let days: Vec<Weekday> = store.logs_newest_first(id).iter().map(|l| l.day).collect();
        assert_eq!(days, vec![Weekday::Wed, Weekday::Tue, Weekday::Mon]);
        assert!(store.logs_newest_first(Uuid::new_v4()).is_empty());
    }

    #[test]
    fn resolve_refuses_ambiguous_names() {
        let (mut store, _) = store_with_water();
        store.create_habit(NewHabit::new("water", "ml", 2.0)).unwrap();

        assert!(store.resolve("WATER").is_none());
        assert!(store.resolve("Water").is_none());
    }

    #[test]
    fn resolve_by_name_and_id_prefix() {
        let (mut store, id) = store_with_water();
        store.create_habit(NewHabit::new("Sleep", "hours", 8.0)).unwrap();

        assert_eq!(store.resolve("water").unwrap().id, id);
        assert_eq!(store.resolve(&id.to_string()).unwrap().id, id);
        let prefix = &id.simple().to_string()[..8];
        assert_eq!(store.resolve(prefix).unwrap().id, id);
        assert!(store.resolve("nothing").is_none());
        assert!(store.resolve("").is_none());
    }

    #[test]
    fn chart_and_reminder_settings() {
        let (mut store, id) = store_with_water();
        assert_eq!(store.set_chart_kind(id, ChartKind::Pie).unwrap().chart, ChartKind::Pie);
        assert!(store.set_chart_kind(Uuid::new_v4(), ChartKind::Bar).is_none());

        assert!(!store.email_reminder());
        store.set_email_reminder(true);
        assert!(store.email_reminder());
    }
}
