//! Lifetime stat aggregation.
//!
//! Session results are folded into the running totals with an additive merge.
//! `fastest_answer` is the one exception: it merges with `min`.

use crate::model::{GameStats, StatsDelta};

/// Merge a partial session update into lifetime stats.
///
/// Absent delta fields act as the identity (0 for counters, +∞ for the
/// minimum), so a partial update never disturbs unrelated counters.
pub fn merge_stats(current: &GameStats, delta: &StatsDelta) -> GameStats {
    let add = |base: u64, extra: Option<u64>| base.saturating_add(extra.unwrap_or(0));

    GameStats {
        games_played: add(current.games_played, delta.games_played),
        total_score: add(current.total_score, delta.total_score),
        questions_answered: add(current.questions_answered, delta.questions_answered),
        correct_answers: add(current.correct_answers, delta.correct_answers),
        fastest_answer: current
            .fastest_answer
            .min(delta.fastest_answer.unwrap_or(f64::INFINITY)),
        perfect_games: add(current.perfect_games, delta.perfect_games),
    }
}
