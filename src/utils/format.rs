use unicode_width::UnicodeWidthStr;

/// Format a logged value, trimming a trailing ".0"
pub fn format_value(value: f64) -> String {
    if value == value.floor() {
        format!("{}", value)
    } else {
        format!("{:.1}", value)
    }
}

/// Create a simple ASCII progress bar
pub fn progress_bar(filled: u32, total: u32, width: usize) -> String {
    if total == 0 {
        return "░".repeat(width);
    }
    let ratio = (filled as f64 / total as f64).min(1.0);
    let filled_count = (ratio * width as f64).round() as usize;
    let empty_count = width.saturating_sub(filled_count);
    format!("{}{}", "█".repeat(filled_count), "░".repeat(empty_count))
}

/// Pad to a display width, counting wide characters (emoji, CJK) correctly
pub fn pad_display(text: &str, width: usize) -> String {
    let used = UnicodeWidthStr::width(text);
    format!("{}{}", text, " ".repeat(width.saturating_sub(used)))
}

/// "≤ 4 hours" for ceiling goals, "≥ 2000 ml" for floor goals
pub fn goal_label(goal: f64, unit: &str, healthy_if_less: bool) -> String {
    let sign = if healthy_if_less { "≤" } else { "≥" };
    format!("{} {} {}", sign, format_value(goal), unit).trim_end().to_string()
}
