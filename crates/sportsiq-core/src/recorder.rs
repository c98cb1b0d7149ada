//! End-of-session recording.
//!
//! Runs once a session finishes: merge stats, evaluate achievements against
//! the merged totals, persist newly unlocked ids, and work out whether the
//! score qualifies for the high-score table.

use serde::Serialize;

use crate::achievements::{evaluate, AchievementDefinition, ACHIEVEMENTS};
use crate::error::TriviaError;
use crate::model::{GameStats, ScoreEntry, SessionSummary};
use crate::session::QuizSession;
use crate::store::{KeyValueStore, TriviaStore};

/// Everything the score screen needs after a session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionOutcome {
    pub summary: SessionSummary,
    /// Lifetime stats including this session.
    pub stats: GameStats,
    /// Achievements earned by this session, in definition order.
    pub new_achievements: Vec<&'static AchievementDefinition>,
    /// Whether the score would make the high-score table.
    pub high_score_eligible: bool,
}

/// Record a finished session.
pub fn record_session<S: KeyValueStore>(
    store: &TriviaStore<S>,
    session: &QuizSession,
) -> Result<SessionOutcome, TriviaError> {
    if !session.is_finished() {
        return Err(TriviaError::SessionInProgress {
            answered: session.answers().len(),
            total: session.total_questions(),
        });
    }

    let summary = session.summary();
    let stats = store.save_stats_delta(&session.stats_delta());

    let mut unlocked = store.unlocked_achievements();
    let new_achievements = evaluate(ACHIEVEMENTS, &unlocked, &stats, &summary);
    if !new_achievements.is_empty() {
        for def in &new_achievements {
            unlocked.insert(def.id);
        }
        store.save_unlocked_achievements(&unlocked);
        tracing::info!(
            count = new_achievements.len(),
            "unlocked new achievements"
        );
    }

    let high_score_eligible = store.is_high_score(summary.score, summary.difficulty);

    Ok(SessionOutcome {
        summary,
        stats,
        new_achievements,
        high_score_eligible,
    })
}

/// Save the session's score under the given initials.
///
/// Returns the stored entry. Callers normally check
/// [`SessionOutcome::high_score_eligible`] first; an entry that does not make
/// the cut is dropped by truncation.
pub fn save_high_score<S: KeyValueStore>(
    store: &TriviaStore<S>,
    outcome: &SessionOutcome,
    initials: &str,
) -> Result<ScoreEntry, TriviaError> {
    let entry = ScoreEntry::new(outcome.summary.score, initials)?;
    store.save_high_score(entry.clone(), outcome.summary.difficulty);
    Ok(entry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Difficulty, Question};
    use crate::store::MemoryStore;

    fn questions(n: usize) -> Vec<Question> {
        (0..n)
            .map(|i| {
                Question::new(format!("Q{i}"), vec!["a".into(), "b".into()], "a").unwrap()
            })
            .collect()
    }

    #[test]
    fn unfinished_session_is_rejected() {
        let store = TriviaStore::new(MemoryStore::new());
        let mut session = QuizSession::new(Difficulty::Easy, questions(3), 15).unwrap();
        session.answer(Some("a"), 1.0).unwrap();
        assert!(matches!(
            record_session(&store, &session),
            Err(TriviaError::SessionInProgress {
                answered: 1,
                total: 3
            })
        ));
        assert_eq!(store.stats().games_played, 0);
    }

    #[test]
    fn achievements_fire_only_once() {
        let store = TriviaStore::new(MemoryStore::new());
        let mut session = QuizSession::new(Difficulty::Easy, questions(2), 15).unwrap();
        session.answer(Some("b"), 1.0).unwrap();
        session.answer(Some("b"), 1.0).unwrap();

        let first = record_session(&store, &session).unwrap();
        let ids: Vec<_> = first.new_achievements.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec!["first_game"]);

        let second = record_session(&store, &session).unwrap();
        assert!(second.new_achievements.is_empty());
        assert_eq!(
            store.backend().get("achievements").unwrap().as_deref(),
            Some(r#"["first_game"]"#)
        );
        assert_eq!(second.stats.games_played, 2);
    }

    #[test]
    fn zero_score_is_not_eligible() {
        let store = TriviaStore::new(MemoryStore::new());
        let mut session = QuizSession::new(Difficulty::Hard, questions(1), 15).unwrap();
        session.answer(None, 15.0).unwrap();
        let outcome = record_session(&store, &session).unwrap();
        assert_eq!(outcome.summary.score, 0);
        assert!(!outcome.high_score_eligible);
    }

    #[test]
    fn save_high_score_validates_initials() {
        let store = TriviaStore::new(MemoryStore::new());
        let mut session = QuizSession::new(Difficulty::Medium, questions(1), 15).unwrap();
        session.answer(Some("a"), 5.0).unwrap();
        let outcome = record_session(&store, &session).unwrap();
        assert!(outcome.high_score_eligible);

        assert!(save_high_score(&store, &outcome, "").is_err());
        let entry = save_high_score(&store, &outcome, "xy").unwrap();
        assert_eq!(entry.initials, "XY");
        assert_eq!(store.high_scores(Difficulty::Medium), vec![entry]);
    }
}
