//! A single quiz run: questions in order, one answer each.

use serde::Serialize;

use crate::error::TriviaError;
use crate::model::{AnsweredQuestion, Difficulty, Question, SessionSummary, StatsDelta};
use crate::scoring::score;

/// Result of answering one question.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub points: u32,
    /// The right answer, for feedback.
    pub correct_answer: String,
    /// Consecutive correct answers including this one.
    pub streak: u32,
    /// Session score after this answer.
    pub total_score: u32,
}

/// Tracks answers, score and streaks for one batch of questions.
#[derive(Debug, Clone)]
pub struct QuizSession {
    difficulty: Difficulty,
    timer_secs: f64,
    questions: Vec<Question>,
    answers: Vec<AnsweredQuestion>,
    score: u32,
    streak: u32,
    max_streak: u32,
}

impl QuizSession {
    pub fn new(
        difficulty: Difficulty,
        questions: Vec<Question>,
        timer_secs: u32,
    ) -> Result<Self, TriviaError> {
        if questions.is_empty() {
            return Err(TriviaError::EmptySession);
        }
        Ok(Self {
            difficulty,
            timer_secs: f64::from(timer_secs),
            answers: Vec::with_capacity(questions.len()),
            questions,
            score: 0,
            streak: 0,
            max_streak: 0,
        })
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn timer_secs(&self) -> f64 {
        self.timer_secs
    }

    /// The question awaiting an answer, or `None` once finished.
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.answers.len())
    }

    /// 1-based number of the current question.
    pub fn question_number(&self) -> usize {
        (self.answers.len() + 1).min(self.questions.len())
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn is_finished(&self) -> bool {
        self.answers.len() >= self.questions.len()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn answers(&self) -> &[AnsweredQuestion] {
        &self.answers
    }

    pub fn correct_answers(&self) -> u32 {
        self.answers.iter().filter(|a| a.is_correct()).count() as u32
    }

    pub fn max_correct_streak(&self) -> u32 {
        self.max_streak
    }

    /// Answer the current question.
    ///
    /// `chosen` is `None` when the timer expired. `elapsed_secs` is clamped
    /// to the timer range before scoring.
    pub fn answer(
        &mut self,
        chosen: Option<&str>,
        elapsed_secs: f64,
    ) -> Result<AnswerOutcome, TriviaError> {
        let question = self
            .current_question()
            .cloned()
            .ok_or(TriviaError::SessionFinished(self.questions.len()))?;

        let elapsed = if elapsed_secs.is_nan() {
            self.timer_secs
        } else {
            elapsed_secs.clamp(0.0, self.timer_secs)
        };
        let correct = chosen.is_some_and(|c| question.is_correct(c));
        let points = score(correct, elapsed, self.timer_secs);

        if correct {
            self.streak += 1;
            self.max_streak = self.max_streak.max(self.streak);
        } else {
            self.streak = 0;
        }
        self.score = self.score.saturating_add(points);

        let correct_answer = question.correct_answer().to_string();
        self.answers.push(AnsweredQuestion {
            question,
            chosen: chosen.map(str::to_string),
            elapsed_secs: elapsed,
        });

        tracing::debug!(
            question = self.answers.len(),
            correct,
            points,
            "answer recorded"
        );

        Ok(AnswerOutcome {
            correct,
            points,
            correct_answer,
            streak: self.streak,
            total_score: self.score,
        })
    }

    /// Summary handed to achievement evaluation.
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            score: self.score,
            total_questions: self.questions.len() as u32,
            difficulty: self.difficulty,
            correct_answers: self.correct_answers(),
            max_correct_streak: self.max_streak,
        }
    }

    /// The session's contribution to lifetime stats.
    ///
    /// `fastest_answer` is the session's average answer time. It is left
    /// out when no time was recorded at all.
    pub fn stats_delta(&self) -> StatsDelta {
        let total = self.questions.len() as u64;
        let correct = u64::from(self.correct_answers());
        let total_elapsed: f64 = self.answers.iter().map(|a| a.elapsed_secs).sum();
        let average = (total_elapsed > 0.0).then(|| total_elapsed / total as f64);

        StatsDelta {
            games_played: Some(1),
            total_score: Some(u64::from(self.score)),
            questions_answered: Some(total),
            correct_answers: Some(correct),
            fastest_answer: average,
            perfect_games: Some(u64::from(correct == total)),
        }
    }
}
