//! Display and sound preferences, and the per-session configuration object.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::model::Difficulty;
use crate::scoring::{DEFAULT_QUESTION_COUNT, DEFAULT_TIMER_SECS};

/// Colour theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// The terminal's preference, read from `COLORFGBG`.
    pub fn detect() -> Self {
        Self::from_colorfgbg(std::env::var("COLORFGBG").ok().as_deref())
    }

    /// Interpret a `COLORFGBG` value such as `"15;0"`.
    ///
    /// The last field is the background colour index; 0-6 and 8 are dark.
    /// Missing or unparsable values mean light.
    pub fn from_colorfgbg(value: Option<&str>) -> Self {
        let background = value
            .and_then(|v| v.rsplit(';').next())
            .and_then(|bg| bg.trim().parse::<u8>().ok());
        match background {
            Some(0..=6 | 8) => Theme::Dark,
            _ => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme: {other}")),
        }
    }
}

/// Settings for one session, passed explicitly to the driver and the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub difficulty: Difficulty,
    pub question_count: u32,
    pub timer_secs: u32,
    pub theme: Theme,
    pub sound_muted: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Easy,
            question_count: DEFAULT_QUESTION_COUNT,
            timer_secs: DEFAULT_TIMER_SECS,
            theme: Theme::Light,
            sound_muted: false,
        }
    }
}
