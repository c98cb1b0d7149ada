//! Terminal styling and sound cues.

use std::io::{IsTerminal, Write};

use sportsiq_core::preferences::{SessionConfig, Theme};

const RESET: &str = "\x1b[0m";
const BELL: &str = "\x07";

/// What a piece of text is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Accent,
    Good,
    Bad,
    Muted,
}

/// ANSI colours for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    accent: &'static str,
    good: &'static str,
    bad: &'static str,
    muted: &'static str,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            // Dark variants stay readable on a white background.
            Theme::Light => Palette {
                accent: "\x1b[34m",
                good: "\x1b[32m",
                bad: "\x1b[31m",
                muted: "\x1b[90m",
            },
            Theme::Dark => Palette {
                accent: "\x1b[96m",
                good: "\x1b[92m",
                bad: "\x1b[91m",
                muted: "\x1b[37m",
            },
        }
    }

    fn code(&self, role: Role) -> &'static str {
        match role {
            Role::Accent => self.accent,
            Role::Good => self.good,
            Role::Bad => self.bad,
            Role::Muted => self.muted,
        }
    }
}

/// Sound cue played after an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Correct,
    Incorrect,
}

/// Renders text for the session's theme and plays cues unless muted.
pub struct Ui {
    palette: Option<Palette>,
    sound: bool,
}

impl Ui {
    /// Colour only goes to a terminal, and `NO_COLOR` turns it off.
    pub fn new(config: &SessionConfig) -> Self {
        let color = std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none();
        Self::with_color(config, color)
    }

    pub fn with_color(config: &SessionConfig, color: bool) -> Self {
        Self {
            palette: color.then(|| Palette::for_theme(config.theme)),
            sound: !config.sound_muted,
        }
    }

    pub fn paint(&self, role: Role, text: &str) -> String {
        match &self.palette {
            Some(p) => format!("{}{text}{RESET}", p.code(role)),
            None => text.to_string(),
        }
    }

    /// Bell sequence for a cue: one ring for correct, two for incorrect.
    pub fn cue_sequence(&self, cue: Cue) -> &'static str {
        match (self.sound, cue) {
            (false, _) => "",
            (true, Cue::Correct) => BELL,
            (true, Cue::Incorrect) => "\x07\x07",
        }
    }

    pub fn cue(&self, cue: Cue) {
        let seq = self.cue_sequence(cue);
        if !seq.is_empty() {
            let mut out = std::io::stdout();
            let _ = out.write_all(seq.as_bytes());
            let _ = out.flush();
        }
    }
}

/// Render a duration in seconds the way the score screens show it.
pub fn format_secs(secs: f64) -> String {
    format!("{secs:.1}s")
}
