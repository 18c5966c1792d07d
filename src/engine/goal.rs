/// Whether a day's value satisfies the habit's goal.
///
/// A value of exactly zero is "nothing logged" and never succeeds, under
/// either polarity and for any goal, including a floor goal of zero.
pub fn meets_goal(value: f64, goal: f64, healthy_if_less: bool) -> bool {
    if value == 0.0 {
        return false;
    }
    if healthy_if_less {
        value <= goal
    } else {
        value >= goal
    }
}
