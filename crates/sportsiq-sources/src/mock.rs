//! Mock question source for testing.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use sportsiq_core::model::Question;
use sportsiq_core::traits::{QuestionRequest, QuestionSource};

use crate::error::SourceError;

/// A question source that serves a fixed batch without any I/O.
///
/// Returns at most `request.amount` questions, in the order given.
pub struct MockSource {
    questions: Vec<Question>,
    /// When set, every fetch fails with this network error.
    failure: Option<String>,
    call_count: AtomicU32,
    last_request: Mutex<Option<QuestionRequest>>,
}

impl MockSource {
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions,
            failure: None,
            call_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// A source whose fetches always fail.
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::new(Vec::new())
        }
    }

    /// Number of fetches made.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    pub fn last_request(&self) -> Option<QuestionRequest> {
        self.last_request
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait]
impl QuestionSource for MockSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch_questions(&self, request: &QuestionRequest) -> anyhow::Result<Vec<Question>> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        *self.last_request.lock().unwrap_or_else(|e| e.into_inner()) = Some(request.clone());

        if let Some(message) = &self.failure {
            return Err(SourceError::NetworkError(message.clone()).into());
        }
        if self.questions.is_empty() {
            return Err(SourceError::NoResults { code: 1 }.into());
        }

        Ok(self
            .questions
            .iter()
            .take(request.amount as usize)
            .cloned()
            .collect())
    }
}
