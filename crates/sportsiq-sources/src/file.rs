//! Local JSON question bank.

use std::path::{Path, PathBuf};

use anyhow::Context;
use async_trait::async_trait;
use rand::seq::SliceRandom;
use serde::Deserialize;

use sportsiq_core::model::{Difficulty, Question};
use sportsiq_core::traits::{QuestionRequest, QuestionSource};

use crate::error::SourceError;
use crate::opentdb::assemble_question;

/// Reads questions from a JSON file on disk.
///
/// The file is an array of records in the same shape the online bank uses,
/// with plain-text fields:
///
/// ```json
/// [{"question": "...", "correct_answer": "...", "incorrect_answers": ["..."], "difficulty": "easy"}]
/// ```
///
/// Records without a `difficulty` are offered at every difficulty.
pub struct FileSource {
    path: PathBuf,
}

#[derive(Debug, Deserialize)]
struct BankEntry {
    question: String,
    correct_answer: String,
    incorrect_answers: Vec<String>,
    #[serde(default)]
    difficulty: Option<Difficulty>,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn pick(mut entries: Vec<BankEntry>, request: &QuestionRequest) -> Vec<BankEntry> {
    entries.retain(|e| e.difficulty.map_or(true, |d| d == request.difficulty));
    entries.shuffle(&mut rand::thread_rng());
    entries.truncate(request.amount as usize);
    entries
}

#[async_trait]
impl QuestionSource for FileSource {
    fn name(&self) -> &str {
        "file"
    }

    async fn fetch_questions(&self, request: &QuestionRequest) -> anyhow::Result<Vec<Question>> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("failed to read question bank: {}", self.path.display()))?;
        let entries: Vec<BankEntry> = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse question bank: {}", self.path.display()))?;

        let total = entries.len();
        let chosen = pick(entries, request);
        tracing::debug!(
            path = %self.path.display(),
            total,
            chosen = chosen.len(),
            "loaded question bank"
        );
        if chosen.is_empty() {
            return Err(SourceError::NoResults { code: 1 }.into());
        }

        let questions = chosen
            .into_iter()
            .map(|e| assemble_question(e.question, e.correct_answer, e.incorrect_answers))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(questions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn bank_file(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    const BANK: &str = r#"[
        {"question": "How many players in a rugby union team?", "correct_answer": "15", "incorrect_answers": ["13", "11", "12"], "difficulty": "easy"},
        {"question": "Which country hosted the 1966 World Cup?", "correct_answer": "England", "incorrect_answers": ["Brazil", "Italy", "Chile"], "difficulty": "medium"},
        {"question": "What is a perfect score in ten-pin bowling?", "correct_answer": "300", "incorrect_answers": ["200", "250", "350"]},
        {"question": "Who holds the record for most Grand Slam titles in men's tennis?", "correct_answer": "Novak Djokovic", "incorrect_answers": ["Roger Federer", "Rafael Nadal", "Pete Sampras"], "difficulty": "hard"}
    ]"#;

    #[tokio::test]
    async fn filters_by_difficulty() {
        let file = bank_file(BANK);
        let source = FileSource::new(file.path());

        let questions = source
            .fetch_questions(&QuestionRequest::sports(Difficulty::Easy))
            .await
            .unwrap();
        let mut prompts: Vec<_> = questions.iter().map(|q| q.prompt().to_string()).collect();
        prompts.sort();
        assert_eq!(
            prompts,
            vec![
                "How many players in a rugby union team?",
                "What is a perfect score in ten-pin bowling?",
            ]
        );
    }

    #[tokio::test]
    async fn respects_amount() {
        let file = bank_file(BANK);
        let source = FileSource::new(file.path());
        let questions = source
            .fetch_questions(&QuestionRequest::sports(Difficulty::Hard).with_amount(1))
            .await
            .unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].options().len(), 4);
    }

    #[tokio::test]
    async fn no_matching_questions() {
        let file = bank_file(
            r#"[{"question": "Q", "correct_answer": "A", "incorrect_answers": ["B"], "difficulty": "hard"}]"#,
        );
        let source = FileSource::new(file.path());
        let err = source
            .fetch_questions(&QuestionRequest::sports(Difficulty::Easy))
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SourceError>(),
            Some(SourceError::NoResults { .. })
        ));
    }

    #[tokio::test]
    async fn missing_file_names_the_path() {
        let source = FileSource::new("/nonexistent/bank.json");
        let err = source
            .fetch_questions(&QuestionRequest::sports(Difficulty::Easy))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("/nonexistent/bank.json"));
    }

    #[tokio::test]
    async fn malformed_bank() {
        let file = bank_file("{not json");
        let source = FileSource::new(file.path());
        let err = source
            .fetch_questions(&QuestionRequest::sports(Difficulty::Easy))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("failed to parse question bank"));
    }
}
