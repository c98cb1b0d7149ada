//! The `sportsiq play` command.

use std::io::Write;

use anyhow::{Context, Result};
use tokio::time::Instant;

use sportsiq_core::model::{Difficulty, Question, ScoreEntry};
use sportsiq_core::preferences::SessionConfig;
use sportsiq_core::recorder::{record_session, save_high_score, SessionOutcome};
use sportsiq_core::scoring::max_points;
use sportsiq_core::session::{AnswerOutcome, QuizSession};
use sportsiq_core::store::TriviaStore;
use sportsiq_core::traits::{AnswerType, QuestionRequest};
use sportsiq_sources::create_source;

use super::Paths;
use crate::input::{deadline_in, LineReader, Reply};
use crate::ui::{format_secs, Cue, Role, Ui};

pub async fn execute(
    paths: &Paths,
    difficulty: Difficulty,
    question_count: Option<u32>,
    timer_secs: Option<u32>,
    initials: Option<String>,
) -> Result<()> {
    let (config, store) = paths.open()?;

    let session_config = SessionConfig {
        difficulty,
        question_count: question_count.unwrap_or(config.quiz.question_count),
        timer_secs: timer_secs.unwrap_or(config.quiz.timer_secs),
        theme: store.theme_preference(),
        sound_muted: store.sound_muted(),
    };
    anyhow::ensure!(
        session_config.question_count >= 1,
        "question count must be at least 1"
    );
    anyhow::ensure!(session_config.timer_secs >= 1, "timer must be at least 1 second");
    if let Some(initials) = &initials {
        ScoreEntry::new(0, initials)?;
    }

    let ui = Ui::new(&session_config);
    let source = create_source(&config.source)?;
    let request = QuestionRequest {
        amount: session_config.question_count,
        category: config.quiz.category,
        difficulty,
        answer_type: AnswerType::Multiple,
    };

    println!("Loading {difficulty} questions from {}...", source.name());
    let questions = source
        .fetch_questions(&request)
        .await
        .context("could not load questions")?;

    let mut session = QuizSession::new(difficulty, questions, session_config.timer_secs)?;
    let mut input = LineReader::stdin();
    run_session(&mut session, &ui, &mut input).await?;

    let outcome = record_session(&store, &session)?;
    print_summary(&ui, &outcome);

    if outcome.high_score_eligible {
        offer_high_score(&store, &outcome, initials, &mut input, &ui).await;
    } else {
        println!(
            "{}",
            ui.paint(
                Role::Muted,
                &format!("Your score didn't make the {difficulty} top 10.")
            )
        );
    }

    Ok(())
}

async fn run_session(session: &mut QuizSession, ui: &Ui, input: &mut LineReader) -> Result<()> {
    let timer = session.timer_secs();

    while let Some(question) = session.current_question().cloned() {
        println!();
        println!(
            "{}  {}",
            ui.paint(
                Role::Accent,
                &format!(
                    "Question {}/{}",
                    session.question_number(),
                    session.total_questions()
                )
            ),
            ui.paint(Role::Muted, &format!("Score: {}", session.score()))
        );
        println!("{}", question.prompt());
        for (i, option) in question.options().iter().enumerate() {
            println!("  {}) {option}", i + 1);
        }
        prompt(&format!(
            "Your answer ({}s, up to {} points): ",
            timer as u64,
            max_points(timer)
        ));

        let started = Instant::now();
        let deadline = deadline_in(timer);
        let chosen = loop {
            match input.read_until(deadline).await {
                Reply::Line(line) => match resolve_choice(&question, &line) {
                    Some(choice) => break Some(choice),
                    None => prompt(&format!(
                        "Pick 1-{} or type the answer: ",
                        question.options().len()
                    )),
                },
                Reply::TimedOut | Reply::Closed => break None,
            }
        };
        let elapsed = match chosen {
            Some(_) => started.elapsed().as_secs_f64(),
            None => timer,
        };

        let outcome = session.answer(chosen.as_deref(), elapsed)?;
        print_feedback(ui, &outcome, chosen.is_none(), elapsed);
    }

    Ok(())
}

/// Match a typed reply against the options: exact text first, then a
/// 1-based option number.
fn resolve_choice(question: &Question, reply: &str) -> Option<String> {
    let reply = reply.trim();
    if reply.is_empty() {
        return None;
    }
    if let Some(option) = question
        .options()
        .iter()
        .find(|o| o.eq_ignore_ascii_case(reply))
    {
        return Some(option.clone());
    }
    reply
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| question.options().get(i))
        .cloned()
}

fn print_feedback(ui: &Ui, outcome: &AnswerOutcome, timed_out: bool, elapsed: f64) {
    if timed_out {
        println!();
        println!(
            "{} The answer was {}.",
            ui.paint(Role::Bad, "Time's up!"),
            outcome.correct_answer
        );
        ui.cue(Cue::Incorrect);
    } else if outcome.correct {
        println!(
            "{} +{} points in {} (streak {})",
            ui.paint(Role::Good, "Correct!"),
            outcome.points,
            format_secs(elapsed),
            outcome.streak
        );
        ui.cue(Cue::Correct);
    } else {
        println!(
            "{} The answer was {}.",
            ui.paint(Role::Bad, "Wrong."),
            outcome.correct_answer
        );
        ui.cue(Cue::Incorrect);
    }
}

fn print_summary(ui: &Ui, outcome: &SessionOutcome) {
    let summary = &outcome.summary;
    println!();
    println!("{}", ui.paint(Role::Accent, "Game over!"));
    println!(
        "{}/{} correct on {}",
        summary.correct_answers, summary.total_questions, summary.difficulty
    );
    println!("Final score: {}", summary.score);
    println!("Best streak: {}", summary.max_correct_streak);

    if !outcome.new_achievements.is_empty() {
        println!();
        println!("{}", ui.paint(Role::Good, "Achievements unlocked:"));
        for def in &outcome.new_achievements {
            println!("  {} {}: {}", def.icon, def.title, def.description);
        }
    }
}

async fn offer_high_score(
    store: &TriviaStore,
    outcome: &SessionOutcome,
    initials: Option<String>,
    input: &mut LineReader,
    ui: &Ui,
) {
    println!();
    println!("{}", ui.paint(Role::Good, "New high score!"));

    let mut candidate = initials;
    loop {
        let initials = match candidate.take() {
            Some(i) => i,
            None => {
                prompt("Enter your initials (1-3 letters): ");
                match input.read_line().await {
                    Some(line) => line,
                    None => {
                        println!();
                        println!("No initials entered, score not saved.");
                        return;
                    }
                }
            }
        };

        match save_high_score(store, outcome, &initials) {
            Ok(entry) => {
                println!(
                    "Saved {} for {} on {}.",
                    entry.score, entry.initials, outcome.summary.difficulty
                );
                return;
            }
            Err(e) => println!("{}", ui.paint(Role::Bad, &e.to_string())),
        }
    }
}

fn prompt(text: &str) {
    print!("{text}");
    let _ = std::io::stdout().flush();
}
