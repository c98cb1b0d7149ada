//! The `sportsiq reset-stats` command.

use std::io::Write;

use anyhow::Result;

use super::Paths;

pub fn execute(paths: &Paths, yes: bool) -> Result<()> {
    let store = paths.store()?;

    if !yes && !confirm()? {
        println!("Cancelled.");
        return Ok(());
    }

    store.clear_stats();
    println!("Stats and achievements cleared. High scores were kept.");
    Ok(())
}

fn confirm() -> Result<bool> {
    print!("Clear lifetime stats and achievements? [y/N] ");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(matches!(line.trim().to_lowercase().as_str(), "y" | "yes"))
}
