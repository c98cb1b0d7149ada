//! Configuration loading and the question-source factory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use sportsiq_core::scoring::{DEFAULT_QUESTION_COUNT, DEFAULT_TIMER_SECS};
use sportsiq_core::traits::{QuestionSource, SPORTS_CATEGORY};

use crate::file::FileSource;
use crate::opentdb::{OpenTdbSource, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};

/// File name searched for in the current directory.
pub const LOCAL_CONFIG_FILE: &str = "sportsiq.toml";

/// Starter configuration written by `sportsiq init`.
pub const SAMPLE_CONFIG: &str = r#"# sportsiq configuration

# Where high scores, stats and preferences are kept.
# Defaults to the platform data directory.
# data_dir = "~/.local/share/sportsiq"

[quiz]
question_count = 10
timer_secs = 15

[source]
type = "opentdb"
base_url = "https://opentdb.com"
timeout_secs = 10

# Play offline from a local question bank instead:
# [source]
# type = "file"
# path = "questions.json"
"#;

/// Where questions come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SourceConfig {
    #[serde(rename = "opentdb")]
    OpenTdb {
        #[serde(default = "default_base_url")]
        base_url: String,
        #[serde(default = "default_timeout")]
        timeout_secs: u64,
    },
    File {
        path: PathBuf,
    },
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig::OpenTdb {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Session shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizConfig {
    #[serde(default = "default_question_count")]
    pub question_count: u32,
    #[serde(default = "default_timer")]
    pub timer_secs: u32,
    /// Question bank category id.
    #[serde(default = "default_category")]
    pub category: u32,
}

fn default_question_count() -> u32 {
    DEFAULT_QUESTION_COUNT
}
fn default_timer() -> u32 {
    DEFAULT_TIMER_SECS
}
fn default_category() -> u32 {
    SPORTS_CATEGORY
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            question_count: default_question_count(),
            timer_secs: default_timer(),
            category: default_category(),
        }
    }
}

/// Top-level sportsiq configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriviaConfig {
    /// Directory for persisted game data.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    #[serde(default)]
    pub quiz: QuizConfig,
    #[serde(default)]
    pub source: SourceConfig,
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Unset variables resolve to the empty string. Substituted values are
/// copied through as-is and never expanded again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + end];
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

fn resolve_source_config(config: &SourceConfig) -> SourceConfig {
    match config {
        SourceConfig::OpenTdb {
            base_url,
            timeout_secs,
        } => SourceConfig::OpenTdb {
            base_url: resolve_env_vars(base_url),
            timeout_secs: *timeout_secs,
        },
        SourceConfig::File { path } => SourceConfig::File {
            path: resolve_path(path),
        },
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `sportsiq.toml` in the current directory
/// 2. `<config dir>/sportsiq/config.toml`
///
/// Environment variable overrides: `SPORTSIQ_DATA_DIR`, `SPORTSIQ_SOURCE_URL`.
pub fn load_config() -> Result<TriviaConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<TriviaConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            Some(local)
        } else {
            global_config_path().filter(|p| p.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<TriviaConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => TriviaConfig::default(),
    };

    apply_env_overrides(&mut config, |name| std::env::var(name).ok());

    config.source = resolve_source_config(&config.source);
    config.data_dir = config.data_dir.as_deref().map(resolve_path);

    Ok(config)
}

fn apply_env_overrides(config: &mut TriviaConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(dir) = lookup("SPORTSIQ_DATA_DIR").filter(|d| !d.is_empty()) {
        config.data_dir = Some(PathBuf::from(dir));
    }

    if let Some(url) = lookup("SPORTSIQ_SOURCE_URL").filter(|u| !u.is_empty()) {
        match &mut config.source {
            SourceConfig::OpenTdb { base_url, .. } => *base_url = url,
            SourceConfig::File { .. } => {
                config.source = SourceConfig::OpenTdb {
                    base_url: url,
                    timeout_secs: default_timeout(),
                };
            }
        }
    }
}

/// `<config dir>/sportsiq/config.toml`, if the platform has a config dir.
pub fn global_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("sportsiq").join("config.toml"))
}

/// Pick the data directory: an explicit override, then the configured one,
/// then `<data dir>/sportsiq`.
pub fn resolve_data_dir(explicit: Option<&Path>, config: &TriviaConfig) -> Result<PathBuf> {
    if let Some(dir) = explicit.or(config.data_dir.as_deref()) {
        return Ok(dir.to_path_buf());
    }
    dirs::data_dir()
        .map(|d| d.join("sportsiq"))
        .context("could not determine a data directory; pass --data-dir or set SPORTSIQ_DATA_DIR")
}

/// Create a question source from its configuration.
pub fn create_source(config: &SourceConfig) -> Result<Box<dyn QuestionSource>> {
    match config {
        SourceConfig::OpenTdb {
            base_url,
            timeout_secs,
        } => Ok(Box::new(OpenTdbSource::new(base_url, *timeout_secs)?)),
        SourceConfig::File { path } => Ok(Box::new(FileSource::new(path))),
    }
}
