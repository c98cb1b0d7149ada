//! Core data model types for sportsiq.
//!
//! Questions, answers, high-score entries, lifetime stats and the per-session
//! summary that achievement rules are evaluated against.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TriviaError;

/// Question difficulty. Partitions the high-score tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Every difficulty, easiest first.
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Lowercase name used by the question bank and in storage keys.
    pub fn api_name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Medium => write!(f, "Medium"),
            Difficulty::Hard => write!(f, "Hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

/// A multiple-choice question.
///
/// Options keep the order they were generated in. The correct answer is
/// always one of the options; construction and deserialization both check it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawQuestion")]
pub struct Question {
    prompt: String,
    options: Vec<String>,
    correct_answer: String,
}

#[derive(Deserialize)]
struct RawQuestion {
    prompt: String,
    options: Vec<String>,
    correct_answer: String,
}

impl TryFrom<RawQuestion> for Question {
    type Error = TriviaError;

    fn try_from(raw: RawQuestion) -> Result<Self, Self::Error> {
        Question::new(raw.prompt, raw.options, raw.correct_answer)
    }
}

impl Question {
    pub fn new(
        prompt: impl Into<String>,
        options: Vec<String>,
        correct_answer: impl Into<String>,
    ) -> Result<Self, TriviaError> {
        let prompt = prompt.into();
        let correct_answer = correct_answer.into();

        if options.len() < 2 {
            return Err(TriviaError::InvalidQuestion(format!(
                "{prompt:?} has {} option(s), need at least 2",
                options.len()
            )));
        }
        if !options.contains(&correct_answer) {
            return Err(TriviaError::InvalidQuestion(format!(
                "correct answer {correct_answer:?} is not among the options of {prompt:?}"
            )));
        }

        Ok(Self {
            prompt,
            options,
            correct_answer,
        })
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    pub fn is_correct(&self, answer: &str) -> bool {
        self.correct_answer == answer
    }
}

/// A question together with what the player did with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnsweredQuestion {
    /// The question that was asked.
    pub question: Question,
    /// The chosen option. `None` when the timer ran out.
    pub chosen: Option<String>,
    /// Seconds between the question appearing and the answer.
    pub elapsed_secs: f64,
}

impl AnsweredQuestion {
    pub fn is_correct(&self) -> bool {
        self.chosen
            .as_deref()
            .is_some_and(|c| self.question.is_correct(c))
    }

    pub fn timed_out(&self) -> bool {
        self.chosen.is_none()
    }
}

/// Maximum length of high-score initials.
pub const MAX_INITIALS: usize = 3;

/// One row of a high-score table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub score: u32,
    pub initials: String,
    #[serde(alias = "date")]
    pub created_at: DateTime<Utc>,
}

impl ScoreEntry {
    /// Build an entry stamped with the current time.
    ///
    /// Initials are trimmed and upper-cased, and must then be 1 to 3 characters.
    pub fn new(score: u32, initials: &str) -> Result<Self, TriviaError> {
        Self::with_timestamp(score, initials, Utc::now())
    }

    pub fn with_timestamp(
        score: u32,
        initials: &str,
        created_at: DateTime<Utc>,
    ) -> Result<Self, TriviaError> {
        let normalized = initials.trim().to_uppercase();
        let len = normalized.chars().count();
        if len == 0 || len > MAX_INITIALS {
            return Err(TriviaError::InvalidInitials(initials.to_string()));
        }
        Ok(Self {
            score,
            initials: normalized,
            created_at,
        })
    }
}

/// Lifetime counters across every finished session.
///
/// `fastest_answer` is a running minimum of per-session average answer times
/// and stays at +∞ until a session with a measurable time is recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameStats {
    #[serde(default)]
    pub games_played: u64,
    #[serde(default)]
    pub total_score: u64,
    #[serde(default)]
    pub questions_answered: u64,
    #[serde(default)]
    pub correct_answers: u64,
    #[serde(default = "infinity", with = "running_min")]
    pub fastest_answer: f64,
    #[serde(default)]
    pub perfect_games: u64,
}

impl Default for GameStats {
    fn default() -> Self {
        Self {
            games_played: 0,
            total_score: 0,
            questions_answered: 0,
            correct_answers: 0,
            fastest_answer: f64::INFINITY,
            perfect_games: 0,
        }
    }
}

impl GameStats {
    /// Fraction of answered questions that were correct. 0 before any play.
    pub fn accuracy(&self) -> f64 {
        if self.questions_answered == 0 {
            0.0
        } else {
            self.correct_answers as f64 / self.questions_answered as f64
        }
    }

    /// The fastest session average, if one has been recorded.
    pub fn fastest_answer_secs(&self) -> Option<f64> {
        self.fastest_answer.is_finite().then_some(self.fastest_answer)
    }
}

fn infinity() -> f64 {
    f64::INFINITY
}

/// JSON has no infinity; the unset minimum is stored as `null`.
mod running_min {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_some(value)
        } else {
            serializer.serialize_none()
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::INFINITY))
    }
}

/// A partial stats update produced at the end of a session.
///
/// Absent fields leave the matching counter untouched when merged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsDelta {
    pub games_played: Option<u64>,
    pub total_score: Option<u64>,
    pub questions_answered: Option<u64>,
    pub correct_answers: Option<u64>,
    pub fastest_answer: Option<f64>,
    pub perfect_games: Option<u64>,
}

/// What achievement rules see about the session that just ended.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub score: u32,
    pub total_questions: u32,
    pub difficulty: Difficulty,
    pub correct_answers: u32,
    pub max_correct_streak: u32,
}
