//! Durable local storage for high scores, stats, achievements and preferences.
//!
//! [`KeyValueStore`] is the raw backend seam. [`TriviaStore`] layers the typed,
//! namespaced operations on top of it. No storage failure ever reaches the
//! caller. Reads fall back to a default and writes are dropped, and each case
//! is logged.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::achievements::UnlockedAchievements;
use crate::error::StoreError;
use crate::model::{Difficulty, GameStats, ScoreEntry, StatsDelta};
use crate::preferences::Theme;
use crate::statistics::merge_stats;

/// Maximum entries kept per difficulty.
pub const HIGH_SCORE_LIMIT: usize = 10;

const STATS_KEY: &str = "stats";
const ACHIEVEMENTS_KEY: &str = "achievements";
const THEME_KEY: &str = "theme";
const SOUND_KEY: &str = "sound_muted";

fn high_scores_key(difficulty: Difficulty) -> String {
    format!("high_scores_{}", difficulty.api_name())
}

// ---------------------------------------------------------------------------
// Backends
// ---------------------------------------------------------------------------

/// A string key-value store.
pub trait KeyValueStore: Send + Sync {
    /// Read a value. `Ok(None)` when the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete a key. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Stores each key as `<key>.json` inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// The directory is created lazily on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            key: key.to_string(),
            source,
        };
        fs::create_dir_all(&self.dir).map_err(io_err)?;

        // Write-then-rename so a crash never leaves a half-written value.
        let path = self.path_for(key);
        let tmp = self.dir.join(format!(".{key}.json.tmp"));
        fs::write(&tmp, value).map_err(io_err)?;
        if let Err(source) = fs::rename(&tmp, &path) {
            let _ = fs::remove_file(&tmp);
            return Err(io_err(source));
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }
}

/// In-memory backend for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, StoreError> {
        self.entries
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".into()))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.lock()?.remove(key);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Typed store
// ---------------------------------------------------------------------------

/// Typed, namespaced access to everything the game persists.
#[derive(Debug)]
pub struct TriviaStore<S: KeyValueStore = FileStore> {
    backend: S,
}

impl TriviaStore<FileStore> {
    /// A store backed by files in `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        Self::new(FileStore::new(dir))
    }
}

impl<S: KeyValueStore> TriviaStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// High scores for a difficulty, best first. Empty if absent or malformed.
    pub fn high_scores(&self, difficulty: Difficulty) -> Vec<ScoreEntry> {
        let mut scores: Vec<ScoreEntry> = self
            .read_json(&high_scores_key(difficulty))
            .unwrap_or_default();
        sort_and_truncate(&mut scores);
        scores
    }

    /// Insert an entry, keeping only the best [`HIGH_SCORE_LIMIT`].
    ///
    /// Ties keep insertion order, so an equal later score ranks below.
    pub fn save_high_score(&self, entry: ScoreEntry, difficulty: Difficulty) {
        let mut scores = self.high_scores(difficulty);
        scores.push(entry);
        sort_and_truncate(&mut scores);
        self.write_json(&high_scores_key(difficulty), &scores);
    }

    /// Whether `score` would earn a place in the table for `difficulty`.
    pub fn is_high_score(&self, score: u32, difficulty: Difficulty) -> bool {
        if score == 0 {
            return false;
        }
        let scores = self.high_scores(difficulty);
        match scores.last() {
            Some(lowest) if scores.len() >= HIGH_SCORE_LIMIT => score > lowest.score,
            _ => true,
        }
    }

    /// Lifetime stats, or zeroed stats if absent or malformed.
    pub fn stats(&self) -> GameStats {
        self.read_json(STATS_KEY).unwrap_or_default()
    }

    /// Merge `delta` into the stored stats and write the result back.
    ///
    /// Returns the merged stats even if the write was lost.
    pub fn save_stats_delta(&self, delta: &StatsDelta) -> GameStats {
        let merged = merge_stats(&self.stats(), delta);
        self.write_json(STATS_KEY, &merged);
        merged
    }

    /// Reset lifetime stats and unlocked achievements together.
    pub fn clear_stats(&self) {
        for key in [STATS_KEY, ACHIEVEMENTS_KEY] {
            if let Err(e) = self.backend.remove(key) {
                tracing::error!("failed to clear '{key}': {e}");
            }
        }
    }

    pub fn unlocked_achievements(&self) -> UnlockedAchievements {
        self.read_json(ACHIEVEMENTS_KEY).unwrap_or_default()
    }

    pub fn save_unlocked_achievements(&self, unlocked: &UnlockedAchievements) {
        self.write_json(ACHIEVEMENTS_KEY, unlocked);
    }

    /// Stored theme, or the terminal's preference when none is stored.
    pub fn theme_preference(&self) -> Theme {
        self.theme_preference_or(Theme::detect())
    }

    /// Stored theme, or `fallback` when none is stored or it is unreadable.
    pub fn theme_preference_or(&self, fallback: Theme) -> Theme {
        self.read_json(THEME_KEY).unwrap_or(fallback)
    }

    pub fn set_theme_preference(&self, theme: Theme) {
        self.write_json(THEME_KEY, &theme);
    }

    /// Whether sound cues are muted. Defaults to `false`.
    pub fn sound_muted(&self) -> bool {
        self.read_json(SOUND_KEY).unwrap_or(false)
    }

    pub fn set_sound_muted(&self, muted: bool) {
        self.write_json(SOUND_KEY, &muted);
    }

    fn read_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.backend.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!("falling back to default: {e}");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(source) => {
                let e = StoreError::Malformed {
                    key: key.to_string(),
                    source,
                };
                tracing::warn!("falling back to default: {e}");
                None
            }
        }
    }

    fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let result = serde_json::to_string(value)
            .map_err(|source| StoreError::Malformed {
                key: key.to_string(),
                source,
            })
            .and_then(|json| self.backend.set(key, &json));
        if let Err(e) = result {
            tracing::error!("write dropped: {e}");
        }
    }
}

fn sort_and_truncate(scores: &mut Vec<ScoreEntry>) {
    // sort_by is stable: equal scores keep their insertion order.
    scores.sort_by(|a, b| b.score.cmp(&a.score));
    scores.truncate(HIGH_SCORE_LIMIT);
}
