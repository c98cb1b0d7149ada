//! Full `play` sessions driven through piped stdin.

use assert_cmd::Command;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use predicates::prelude::*;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// Every correct answer is "Brazil", so answers can be piped without knowing
// the shuffled question order.
const BANK: &str = r#"[
  {"question": "Who won the 2002 World Cup?", "correct_answer": "Brazil", "incorrect_answers": ["Germany", "Turkey", "South Korea"], "difficulty": "easy"},
  {"question": "Which country has won the most World Cups?", "correct_answer": "Brazil", "incorrect_answers": ["Italy", "Germany", "Argentina"], "difficulty": "easy"},
  {"question": "Where were the 2016 Summer Olympics held?", "correct_answer": "Brazil", "incorrect_answers": ["China", "England", "Greece"], "difficulty": "easy"},
  {"question": "Which country hosted the 1930 World Cup?", "correct_answer": "Uruguay", "incorrect_answers": ["Brazil", "Italy", "France"], "difficulty": "hard"}
]"#;

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn with_bank() -> Self {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("bank.json"), BANK).unwrap();
        let config = format!(
            "[source]\ntype = \"file\"\npath = \"{}\"\n",
            dir.path().join("bank.json").display()
        );
        std::fs::write(dir.path().join("sportsiq.toml"), config).unwrap();
        Self { dir }
    }

    fn with_opentdb(url: &str) -> Self {
        let dir = TempDir::new().unwrap();
        let config = format!("[source]\ntype = \"opentdb\"\nbase_url = \"{url}\"\ntimeout_secs = 5\n");
        std::fs::write(dir.path().join("sportsiq.toml"), config).unwrap();
        Self { dir }
    }

    fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("sportsiq").unwrap();
        cmd.current_dir(self.dir.path())
            .arg("--data-dir")
            .arg(self.data_dir())
            .arg("--config")
            .arg(self.dir.path().join("sportsiq.toml"))
            .env("NO_COLOR", "1")
            .env_remove("SPORTSIQ_DATA_DIR")
            .env_remove("SPORTSIQ_SOURCE_URL");
        cmd
    }

    fn data_dir(&self) -> std::path::PathBuf {
        self.dir.path().join("data")
    }

    fn stats(&self) -> serde_json::Value {
        let raw = std::fs::read_to_string(self.data_dir().join("stats.json")).unwrap();
        serde_json::from_str(&raw).unwrap()
    }
}

#[test]
fn perfect_session_saves_high_score() {
    let fx = Fixture::with_bank();

    fx.cmd()
        .args(["play", "--difficulty", "easy", "--questions", "3", "--initials", "abc"])
        .write_stdin("brazil\nBrazil\nBRAZIL\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Question 1/3"))
        .stdout(predicate::str::contains("Correct!"))
        .stdout(predicate::str::contains("3/3 correct on Easy"))
        .stdout(predicate::str::contains("Newcomer"))
        .stdout(predicate::str::contains("Perfectionist"))
        .stdout(predicate::str::contains("New high score!"))
        .stdout(predicate::str::contains("for ABC on Easy"));

    let stats = fx.stats();
    assert_eq!(stats["games_played"], 1);
    assert_eq!(stats["correct_answers"], 3);
    assert_eq!(stats["perfect_games"], 1);

    fx.cmd()
        .args(["scores", "--difficulty", "easy"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ABC"));
}

#[test]
fn closed_stdin_times_out_every_question() {
    let fx = Fixture::with_bank();

    fx.cmd()
        .args(["play", "--difficulty", "easy", "--questions", "2"])
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Time's up!"))
        .stdout(predicate::str::contains("0/2 correct"))
        .stdout(predicate::str::contains("Final score: 0"))
        .stdout(predicate::str::contains("didn't make the Easy top 10"));

    let stats = fx.stats();
    assert_eq!(stats["games_played"], 1);
    assert_eq!(stats["questions_answered"], 2);
    assert_eq!(stats["correct_answers"], 0);
}

#[test]
fn invalid_utf8_line_does_not_end_input() {
    let fx = Fixture::with_bank();

    fx.cmd()
        .args(["play", "--difficulty", "easy", "--questions", "1", "--initials", "abc"])
        .write_stdin(b"\xffbad\nbrazil\n".to_vec())
        .assert()
        .success()
        .stdout(predicate::str::contains("Pick 1-"))
        .stdout(predicate::str::contains("Correct!"))
        .stdout(predicate::str::contains("1/1 correct on Easy"));
}

#[test]
fn prompts_for_initials_and_retries_bad_ones() {
    let fx = Fixture::with_bank();

    fx.cmd()
        .args(["play", "--difficulty", "easy", "--questions", "1"])
        .write_stdin("brazil\nTOOLONG\nzz\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Enter your initials"))
        .stdout(predicate::str::contains("for ZZ on Easy"));
}

#[test]
fn wrong_answer_reveals_correct_one() {
    let fx = Fixture::with_bank();

    fx.cmd()
        .args(["play", "--difficulty", "hard", "--initials", "q"])
        .write_stdin("brazil\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrong. The answer was Uruguay."))
        .stdout(predicate::str::contains("0/1 correct on Hard"));
}

#[test]
fn invalid_initials_fail_before_playing() {
    let fx = Fixture::with_bank();

    fx.cmd()
        .args(["play", "--difficulty", "easy", "--initials", "ABCD"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("initials"));
    assert!(!fx.data_dir().join("stats.json").exists());
}

#[test]
fn no_questions_for_difficulty() {
    let fx = Fixture::with_bank();

    fx.cmd()
        .args(["play", "--difficulty", "medium"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("couldn't provide questions"));
}

fn b64(s: &str) -> String {
    STANDARD.encode(s)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn plays_against_opentdb() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "response_code": 0,
        "results": [{
            "type": b64("multiple"),
            "difficulty": b64("medium"),
            "category": b64("Sports"),
            "question": b64("Which team won Super Bowl LI?"),
            "correct_answer": b64("New England Patriots"),
            "incorrect_answers": [b64("Atlanta Falcons"), b64("Denver Broncos"), b64("Seattle Seahawks")],
        }]
    });
    Mock::given(method("GET"))
        .and(path("/api.php"))
        .and(query_param("difficulty", "medium"))
        .and(query_param("amount", "1"))
        .and(query_param("encode", "base64"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let fx = Fixture::with_opentdb(&server.uri());
    fx.cmd()
        .args(["play", "--difficulty", "medium", "--questions", "1", "--initials", "NE"])
        .write_stdin("new england patriots\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Which team won Super Bowl LI?"))
        .stdout(predicate::str::contains("1/1 correct on Medium"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn opentdb_rate_limit_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api.php"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"response_code": 5, "results": []})),
        )
        .mount(&server)
        .await;

    let fx = Fixture::with_opentdb("http://127.0.0.1:9");
    fx.cmd()
        .env("SPORTSIQ_SOURCE_URL", server.uri())
        .args(["play", "--difficulty", "easy"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("rate limiting"));
}
