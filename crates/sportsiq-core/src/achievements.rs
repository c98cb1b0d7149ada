//! Achievement definitions and unlock evaluation.
//!
//! Rules are plain data: each definition carries an [`AchievementCondition`]
//! and a single dispatcher decides whether it holds for the lifetime stats
//! and the session that just ended.

use serde::{Deserialize, Serialize};

use crate::model::{Difficulty, GameStats, SessionSummary};

/// The condition an achievement checks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AchievementCondition {
    /// Lifetime games played reaches `count`.
    GamesPlayedAtLeast { count: u64 },
    /// Lifetime correct answers reaches `count`.
    CorrectAnswersAtLeast { count: u64 },
    /// Every question in the session was answered correctly.
    PerfectSession,
    /// The session contained a run of at least `length` correct answers.
    StreakAtLeast { length: u32 },
    /// A session on `difficulty` finished with accuracy strictly above `ratio`.
    DifficultyAccuracyAbove { difficulty: Difficulty, ratio: f64 },
}

impl AchievementCondition {
    /// Whether the condition holds. `stats` already includes `session`.
    pub fn matches(&self, stats: &GameStats, session: &SessionSummary) -> bool {
        match *self {
            AchievementCondition::GamesPlayedAtLeast { count } => stats.games_played >= count,
            AchievementCondition::CorrectAnswersAtLeast { count } => {
                stats.correct_answers >= count
            }
            AchievementCondition::PerfectSession => {
                session.correct_answers == session.total_questions
            }
            AchievementCondition::StreakAtLeast { length } => session.max_correct_streak >= length,
            AchievementCondition::DifficultyAccuracyAbove { difficulty, ratio } => {
                session.difficulty == difficulty
                    && session.total_questions > 0
                    && f64::from(session.correct_answers) / f64::from(session.total_questions)
                        > ratio
            }
        }
    }
}

/// A single achievement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AchievementDefinition {
    /// Stable identifier, persisted in the unlocked set.
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub condition: AchievementCondition,
}

/// Every achievement, in presentation order.
pub const ACHIEVEMENTS: &[AchievementDefinition] = &[
    AchievementDefinition {
        id: "first_game",
        title: "Newcomer",
        description: "Play your first game of Sports IQ Challenge.",
        icon: "👋",
        condition: AchievementCondition::GamesPlayedAtLeast { count: 1 },
    },
    AchievementDefinition {
        id: "perfect_score",
        title: "Perfectionist",
        description: "Get a perfect score in any difficulty.",
        icon: "🎯",
        condition: AchievementCondition::PerfectSession,
    },
    AchievementDefinition {
        id: "on_a_roll",
        title: "On a Roll!",
        description: "Answer 5 questions correctly in a row.",
        icon: "🚀",
        condition: AchievementCondition::StreakAtLeast { length: 5 },
    },
    AchievementDefinition {
        id: "hard_mode_win",
        title: "Hard Mode Hero",
        description: "Finish a game on Hard with over 50% correct.",
        icon: "🔥",
        condition: AchievementCondition::DifficultyAccuracyAbove {
            difficulty: Difficulty::Hard,
            ratio: 0.5,
        },
    },
    AchievementDefinition {
        id: "know_it_all",
        title: "Know-It-All",
        description: "Answer 100 questions correctly in total.",
        icon: "🧠",
        condition: AchievementCondition::CorrectAnswersAtLeast { count: 100 },
    },
    AchievementDefinition {
        id: "veteran",
        title: "Seasoned Veteran",
        description: "Play 25 games.",
        icon: "🏅",
        condition: AchievementCondition::GamesPlayedAtLeast { count: 25 },
    },
];

/// Look up a built-in achievement by id.
pub fn find(id: &str) -> Option<&'static AchievementDefinition> {
    ACHIEVEMENTS.iter().find(|a| a.id == id)
}

/// Ids the player has already earned, in the order they were earned.
///
/// Behaves as a set: inserting an id that is already present does nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnlockedAchievements(Vec<String>);

impl UnlockedAchievements {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.iter().any(|u| u == id)
    }

    /// Add an id. Returns `false` if it was already present.
    pub fn insert(&mut self, id: impl Into<String>) -> bool {
        let id = id.into();
        if self.contains(&id) {
            return false;
        }
        self.0.push(id);
        true
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for UnlockedAchievements {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for id in iter {
            set.insert(id);
        }
        set
    }
}

/// Evaluate `rules` and return the ones newly earned, in rule order.
///
/// Rules already in `unlocked` are skipped. Each rule fires at most once per
/// pass even if the table lists its id twice. The caller is responsible for
/// adding the returned ids to the persisted set.
pub fn evaluate<'a>(
    rules: &'a [AchievementDefinition],
    unlocked: &UnlockedAchievements,
    stats: &GameStats,
    session: &SessionSummary,
) -> Vec<&'a AchievementDefinition> {
    let mut working = unlocked.clone();
    let mut newly_unlocked = Vec::new();

    for rule in rules {
        if working.contains(rule.id) {
            continue;
        }
        if rule.condition.matches(stats, session) {
            working.insert(rule.id);
            newly_unlocked.push(rule);
        }
    }

    newly_unlocked
}
