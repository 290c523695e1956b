//! Storage for the single best score that outlives a game
//!
//! The file store keeps a flat JSON object, so other keys written next to
//! [`HIGH_SCORE_KEY`] survive a save. Anything unreadable loads as zero.

use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Key the best score is stored under
pub const HIGH_SCORE_KEY: &str = "snakeHighScore";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to write high score to {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode high score")]
    Encode(#[from] serde_json::Error),
}

pub trait HighScoreStore {
    /// Stored best score, or 0 when nothing valid is stored
    fn load_high_score(&self) -> u32;

    fn save_high_score(&mut self, score: u32) -> Result<(), StoreError>;
}

/// High score kept as a key in a JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Option<Map<String, Value>> {
        let json = match std::fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
            Err(err) => {
                warn!(path = ?self.path, %err, "cannot read high score file");
                return None;
            }
        };

        match serde_json::from_str::<Value>(&json) {
            Ok(Value::Object(entries)) => Some(entries),
            Ok(_) | Err(_) => {
                warn!(path = ?self.path, "high score file is not a JSON object, ignoring it");
                None
            }
        }
    }
}

/// Accepts a non-negative integer, either as a number or as a numeric string
fn parse_score(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

impl HighScoreStore for JsonFileStore {
    fn load_high_score(&self) -> u32 {
        let Some(entries) = self.read_entries() else {
            return 0;
        };

        match entries.get(HIGH_SCORE_KEY) {
            None => 0,
            Some(value) => parse_score(value).unwrap_or_else(|| {
                warn!(path = ?self.path, %value, "corrupt high score, defaulting to 0");
                0
            }),
        }
    }

    fn save_high_score(&mut self, score: u32) -> Result<(), StoreError> {
        let mut entries = self.read_entries().unwrap_or_default();
        entries.insert(HIGH_SCORE_KEY.to_string(), Value::from(score));

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let json = serde_json::to_string_pretty(&Value::Object(entries))?;
        std::fs::write(&self.path, json).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;

        debug!(path = ?self.path, score, "high score saved");
        Ok(())
    }
}

/// In-process store, forgotten when the program exits
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    score: Option<u32>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_score(score: u32) -> Self {
        Self { score: Some(score) }
    }
}

impl HighScoreStore for MemoryStore {
    fn load_high_score(&self) -> u32 {
        self.score.unwrap_or(0)
    }

    fn save_high_score(&mut self, score: u32) -> Result<(), StoreError> {
        self.score = Some(score);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_loads_zero() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp_dir.path().join("none.json"));
        assert_eq!(store.load_high_score(), 0);
    }

    #[test]
    fn test_save_then_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("scores.json");

        let mut store = JsonFileStore::new(&path);
        store.save_high_score(120).unwrap();

        assert_eq!(JsonFileStore::new(&path).load_high_score(), 120);
    }

    #[test]
    fn test_corrupt_values_load_zero() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("scores.json");
        let store = JsonFileStore::new(&path);

        for contents in [
            "garbage",
            "[1, 2, 3]",
            r#"{ "snakeHighScore": "abc" }"#,
            r#"{ "snakeHighScore": -5 }"#,
            r#"{ "snakeHighScore": 12.5 }"#,
            r#"{ "snakeHighScore": null }"#,
        ] {
            std::fs::write(&path, contents).unwrap();
            assert_eq!(store.load_high_score(), 0, "contents: {contents}");
        }
    }

    #[test]
    fn test_numeric_string_is_accepted() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("scores.json");
        std::fs::write(&path, r#"{ "snakeHighScore": "340" }"#).unwrap();

        assert_eq!(JsonFileStore::new(&path).load_high_score(), 340);
    }

    #[test]
    fn test_save_keeps_other_keys() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("scores.json");
        std::fs::write(&path, r#"{ "theme": "dark", "snakeHighScore": 10 }"#).unwrap();

        let mut store = JsonFileStore::new(&path);
        store.save_high_score(50).unwrap();

        let saved: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(saved["theme"], "dark");
        assert_eq!(saved[HIGH_SCORE_KEY], 50);
    }

    #[test]
    fn test_save_over_corrupt_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("scores.json");
        std::fs::write(&path, "not json").unwrap();

        let mut store = JsonFileStore::new(&path);
        store.save_high_score(30).unwrap();
        assert_eq!(store.load_high_score(), 30);
    }

    #[test]
    fn test_unwritable_path_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = JsonFileStore::new(temp_dir.path());

        assert!(matches!(store.save_high_score(10), Err(StoreError::Io { .. })));
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert_eq!(store.load_high_score(), 0);
        store.save_high_score(70).unwrap();
        assert_eq!(store.load_high_score(), 70);
        assert_eq!(MemoryStore::with_score(5).load_high_score(), 5);
    }
}
