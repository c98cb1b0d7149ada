//! Per-answer scoring with a speed bonus.

/// Points for any correct answer.
pub const BASE_POINTS: u32 = 100;

/// Bonus points per whole second left on the clock.
pub const SPEED_BONUS_PER_SECOND: u32 = 10;

/// Default per-question countdown in seconds.
pub const DEFAULT_TIMER_SECS: u32 = 15;

/// Default number of questions in a session.
pub const DEFAULT_QUESTION_COUNT: u32 = 10;

/// Score a single answer.
///
/// Incorrect answers score 0. Correct answers score
/// `100 + max(0, floor(timer_secs - elapsed_secs) * 10)`.
///
/// Callers are expected to clamp `elapsed_secs` to `[0, timer_secs]`; out of
/// range values are not rejected, a negative bonus just counts as zero.
pub fn score(is_correct: bool, elapsed_secs: f64, timer_secs: f64) -> u32 {
    if !is_correct {
        return 0;
    }
    // f64::max discards NaN, so a NaN remainder also yields no bonus.
    let remaining = (timer_secs - elapsed_secs).floor().max(0.0);
    let bonus = (remaining as u32).saturating_mul(SPEED_BONUS_PER_SECOND);
    BASE_POINTS.saturating_add(bonus)
}

/// Highest score a single answer can earn with the given timer.
pub fn max_points(timer_secs: f64) -> u32 {
    score(true, 0.0, timer_secs)
}
