//! The `sportsiq init` command.

use std::path::Path;

use anyhow::Result;

use sportsiq_sources::config::{LOCAL_CONFIG_FILE, SAMPLE_CONFIG};

const SAMPLE_BANK_FILE: &str = "questions.json";

pub fn execute() -> Result<()> {
    write_if_missing(Path::new(LOCAL_CONFIG_FILE), SAMPLE_CONFIG)?;
    write_if_missing(Path::new(SAMPLE_BANK_FILE), SAMPLE_BANK)?;

    println!("\nNext steps:");
    println!("  1. Run: sportsiq play --difficulty easy");
    println!("  2. To play offline, switch [source] in {LOCAL_CONFIG_FILE} to the file bank");
    println!("  3. Run: sportsiq scores");

    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, content)?;
        println!("Created {}", path.display());
    }
    Ok(())
}

const SAMPLE_BANK: &str = r#"[
  {
    "question": "How many players are on the field for one side in a soccer match?",
    "correct_answer": "11",
    "incorrect_answers": ["10", "9", "12"],
    "difficulty": "easy"
  },
  {
    "question": "Which sport is played at Wimbledon?",
    "correct_answer": "Tennis",
    "incorrect_answers": ["Cricket", "Golf", "Rugby"],
    "difficulty": "easy"
  },
  {
    "question": "In which city were the 2012 Summer Olympics held?",
    "correct_answer": "London",
    "incorrect_answers": ["Beijing", "Rio de Janeiro", "Athens"],
    "difficulty": "medium"
  },
  {
    "question": "Which NBA team did Michael Jordan win six championships with?",
    "correct_answer": "Chicago Bulls",
    "incorrect_answers": ["Washington Wizards", "Los Angeles Lakers", "Boston Celtics"],
    "difficulty": "medium"
  },
  {
    "question": "Which country won the first ever Rugby Union World Cup in 1987?",
    "correct_answer": "New Zealand",
    "incorrect_answers": ["Australia", "South Africa", "France"],
    "difficulty": "hard"
  },
  {
    "question": "How many dimples does a regulation golf ball typically have?",
    "correct_answer": "336",
    "incorrect_answers": ["256", "412", "298"]
  }
]
"#;
