//! The question-source trait.
//!
//! Implemented by the `sportsiq-sources` crate. The core only ever consumes
//! decoded [`Question`] values; fetching and decoding belong to the source.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::model::{Difficulty, Question};
use crate::scoring::DEFAULT_QUESTION_COUNT;

/// Question bank category for "Entertainment: Sports".
pub const SPORTS_CATEGORY: u32 = 21;

/// A remote or local bank of trivia questions.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Human-readable source name (e.g. "opentdb").
    fn name(&self) -> &str;

    /// Fetch a batch of questions. Failures carry a descriptive message.
    async fn fetch_questions(&self, request: &QuestionRequest) -> anyhow::Result<Vec<Question>>;
}

/// Shape of the answers a question offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerType {
    /// Four options.
    Multiple,
    /// True / False.
    Boolean,
}

impl AnswerType {
    pub fn api_name(&self) -> &'static str {
        match self {
            AnswerType::Multiple => "multiple",
            AnswerType::Boolean => "boolean",
        }
    }
}

impl fmt::Display for AnswerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.api_name())
    }
}

/// Parameters for a question fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRequest {
    /// Number of questions wanted.
    pub amount: u32,
    /// Question bank category id.
    pub category: u32,
    pub difficulty: Difficulty,
    pub answer_type: AnswerType,
}

impl QuestionRequest {
    /// A standard sports request for `difficulty`.
    pub fn sports(difficulty: Difficulty) -> Self {
        Self {
            amount: DEFAULT_QUESTION_COUNT,
            category: SPORTS_CATEGORY,
            difficulty,
            answer_type: AnswerType::Multiple,
        }
    }

    pub fn with_amount(mut self, amount: u32) -> Self {
        self.amount = amount;
        self
    }
}
