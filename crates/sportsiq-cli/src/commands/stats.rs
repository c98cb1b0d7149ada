//! The `sportsiq stats` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use sportsiq_core::achievements::{UnlockedAchievements, ACHIEVEMENTS};
use sportsiq_core::model::GameStats;

use super::Paths;
use crate::ui::format_secs;

pub fn execute(paths: &Paths) -> Result<()> {
    let store = paths.store()?;
    let stats = store.stats();
    let unlocked = store.unlocked_achievements();

    println!("Lifetime stats");
    println!("{}\n", stats_table(&stats));

    println!("Achievements ({}/{} unlocked)", unlocked.len(), ACHIEVEMENTS.len());
    println!("{}", achievement_table(&unlocked));

    Ok(())
}

fn stats_table(stats: &GameStats) -> Table {
    let fastest = stats
        .fastest_answer_secs()
        .map(format_secs)
        .unwrap_or_else(|| "-".to_string());

    let mut table = Table::new();
    table.set_header(vec!["Stat", "Value"]);
    let rows = [
        ("Games played", stats.games_played.to_string()),
        ("Total score", stats.total_score.to_string()),
        ("Questions answered", stats.questions_answered.to_string()),
        ("Correct answers", stats.correct_answers.to_string()),
        ("Accuracy", format!("{:.1}%", stats.accuracy() * 100.0)),
        ("Perfect games", stats.perfect_games.to_string()),
        // Best average seconds per answer over a whole session.
        ("Fastest session average", fastest),
    ];
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label), Cell::new(value)]);
    }
    table
}

fn achievement_table(unlocked: &UnlockedAchievements) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["", "Achievement", "Description", "Status"]);
    for def in ACHIEVEMENTS {
        let status = if unlocked.contains(def.id) {
            "Unlocked"
        } else {
            "Locked"
        };
        table.add_row(vec![
            Cell::new(def.icon),
            Cell::new(def.title),
            Cell::new(def.description),
            Cell::new(status),
        ]);
    }
    table
}
