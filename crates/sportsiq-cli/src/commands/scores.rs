//! The `sportsiq scores` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use sportsiq_core::model::{Difficulty, ScoreEntry};

use super::Paths;

pub fn execute(paths: &Paths, difficulty: Option<Difficulty>) -> Result<()> {
    let store = paths.store()?;
    let difficulties = match difficulty {
        Some(d) => vec![d],
        None => Difficulty::ALL.to_vec(),
    };

    for difficulty in difficulties {
        println!("{difficulty} high scores");
        let scores = store.high_scores(difficulty);
        if scores.is_empty() {
            println!("  No scores yet.\n");
            continue;
        }
        println!("{}\n", score_table(&scores));
    }

    Ok(())
}

fn score_table(scores: &[ScoreEntry]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["#", "Initials", "Score", "Date"]);
    for (rank, entry) in scores.iter().enumerate() {
        table.add_row(vec![
            Cell::new(rank + 1),
            Cell::new(&entry.initials),
            Cell::new(entry.score),
            Cell::new(
                entry
                    .created_at
                    .with_timezone(&chrono::Local)
                    .format("%Y-%m-%d %H:%M"),
            ),
        ]);
    }
    table
}
