//! The `sportsiq theme` and `sportsiq sound` commands.

use anyhow::Result;

use sportsiq_core::preferences::Theme;

use super::Paths;

pub fn theme(paths: &Paths, theme: Option<Theme>) -> Result<()> {
    let store = paths.store()?;
    match theme {
        Some(theme) => {
            store.set_theme_preference(theme);
            println!("Theme set to {theme}.");
        }
        None => println!("Theme: {}", store.theme_preference()),
    }
    Ok(())
}

/// `muted` is `Some(true)` for `off`.
pub fn sound(paths: &Paths, muted: Option<bool>) -> Result<()> {
    let store = paths.store()?;
    match muted {
        Some(muted) => {
            store.set_sound_muted(muted);
            println!("Sound {}.", on_off(muted));
        }
        None => println!("Sound: {}", on_off(store.sound_muted())),
    }
    Ok(())
}

fn on_off(muted: bool) -> &'static str {
    if muted {
        "off"
    } else {
        "on"
    }
}
