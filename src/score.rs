use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

const APP_DIR_NAME: &str = "obstacle-snake";
const SCORE_FILE_NAME: &str = "scores.json";

/// Logical key the best score is stored under.
pub const BEST_SCORE_KEY: &str = "snake-best-score";

/// Storage for the single persisted best score.
///
/// Loading never fails: absent or malformed values read as `0`. Saving is
/// fire-and-forget; implementations log failures instead of returning them.
pub trait BestScoreStore {
    fn load_best_score(&self) -> u32;
    fn save_best_score(&mut self, value: u32);
}

/// Errors from the score file.
#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("score file i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error("score file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Returns the platform-correct score file path.
#[must_use]
pub fn scores_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(SCORE_FILE_NAME);
    base
}

/// Key/value JSON file holding the best score.
#[derive(Debug, Clone)]
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store at [`scores_path`].
    #[must_use]
    pub fn at_default_location() -> Self {
        Self::new(scores_path())
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BestScoreStore for FileScoreStore {
    fn load_best_score(&self) -> u32 {
        match load_best_score_from_path(&self.path) {
            Ok(score) => score,
            Err(error) => {
                log::warn!(
                    "ignoring unreadable best score in {}: {error}",
                    self.path.display()
                );
                0
            }
        }
    }

    fn save_best_score(&mut self, value: u32) {
        if let Err(error) = save_best_score_to_path(&self.path, value) {
            log::warn!(
                "failed to save best score to {}: {error}",
                self.path.display()
            );
        }
    }
}

/// Volatile store for tests and headless runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    value: Option<u32>,
    writes: usize,
}

impl MemoryScoreStore {
    #[must_use]
    pub fn with_value(value: u32) -> Self {
        Self {
            value: Some(value),
            writes: 0,
        }
    }

    /// Number of saves seen so far.
    #[must_use]
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl BestScoreStore for MemoryScoreStore {
    fn load_best_score(&self) -> u32 {
        self.value.unwrap_or(0)
    }

    fn save_best_score(&mut self, value: u32) {
        self.value = Some(value);
        self.writes += 1;
    }
}

type ScoreEntries = BTreeMap<String, Value>;

/// Reads the best score from `path`.
///
/// A missing file or key is `Ok(0)`; a present but non-numeric value is
/// coerced to `0` as well. Only unreadable files and invalid JSON are errors.
pub fn load_best_score_from_path(path: &Path) -> Result<u32, ScoreError> {
    let entries = match read_entries(path)? {
        Some(entries) => entries,
        None => return Ok(0),
    };

    Ok(entries.get(BEST_SCORE_KEY).map_or(0, coerce_score))
}

/// Writes `score` under [`BEST_SCORE_KEY`], keeping any other keys in the file.
pub fn save_best_score_to_path(path: &Path, score: u32) -> Result<(), ScoreError> {
    // A corrupt file is overwritten rather than blocking new records.
    let mut entries = read_entries(path).ok().flatten().unwrap_or_default();
    entries.insert(BEST_SCORE_KEY.to_owned(), Value::from(score));

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(&entries)?;
    fs::write(path, json)?;
    Ok(())
}

fn read_entries(path: &Path) -> Result<Option<ScoreEntries>, ScoreError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    Ok(Some(serde_json::from_str(&raw)?))
}

fn coerce_score(value: &Value) -> u32 {
    let parsed = match value {
        Value::Number(number) => number.as_u64(),
        Value::String(text) => text.trim().parse::<u64>().ok(),
        _ => None,
    };

    parsed
        .and_then(|score| u32::try_from(score).ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::{
        load_best_score_from_path, save_best_score_to_path, BestScoreStore, FileScoreStore,
        MemoryScoreStore,
    };

    #[test]
    fn score_serialization_round_trip() {
        let path = unique_test_path("round_trip");

        save_best_score_to_path(&path, 42).expect("score save should succeed");
        let loaded = load_best_score_from_path(&path).expect("load should succeed");

        assert_eq!(loaded, 42);
        cleanup_test_path(&path);
    }

    #[test]
    fn missing_score_file_returns_zero() {
        let path = unique_test_path("missing");
        // Deliberately do not create the file.
        let loaded = load_best_score_from_path(&path).expect("missing file should return Ok(0)");
        assert_eq!(loaded, 0);
    }

    #[test]
    fn malformed_score_values_read_as_zero() {
        for (label, body) in [
            ("negative", r#"{ "snake-best-score": -4 }"#),
            ("fraction", r#"{ "snake-best-score": 1.5 }"#),
            ("text", r#"{ "snake-best-score": "lots" }"#),
            ("absent", r#"{ "other": 9 }"#),
        ] {
            let path = write_test_file(label, body);
            assert_eq!(load_best_score_from_path(&path).expect(label), 0, "{label}");
            cleanup_test_path(&path);
        }
    }

    #[test]
    fn numeric_string_is_accepted() {
        let path = write_test_file("string", r#"{ "snake-best-score": "17" }"#);

        assert_eq!(load_best_score_from_path(&path).expect("should parse"), 17);
        cleanup_test_path(&path);
    }

    #[test]
    fn store_coerces_invalid_json_to_zero() {
        let path = write_test_file("not_json", "not-json");

        assert!(load_best_score_from_path(&path).is_err());
        assert_eq!(FileScoreStore::new(path.clone()).load_best_score(), 0);
        cleanup_test_path(&path);
    }

    #[test]
    fn save_keeps_unrelated_keys_and_replaces_corrupt_files() {
        let path = write_test_file("keeps_keys", r#"{ "theme": "dark" }"#);
        let mut store = FileScoreStore::new(path.clone());

        store.save_best_score(12);

        let raw = fs::read_to_string(&path).expect("file should exist");
        assert!(raw.contains("\"theme\""));
        assert_eq!(store.load_best_score(), 12);

        fs::write(&path, "garbage").expect("test file write should succeed");
        store.save_best_score(13);
        assert_eq!(store.load_best_score(), 13);
        cleanup_test_path(&path);
    }

    #[test]
    fn memory_store_counts_writes() {
        let mut store = MemoryScoreStore::with_value(3);
        assert_eq!(store.load_best_score(), 3);

        store.save_best_score(5);

        assert_eq!(store.load_best_score(), 5);
        assert_eq!(store.writes(), 1);
    }

    fn write_test_file(label: &str, body: &str) -> PathBuf {
        let path = unique_test_path(label);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("test parent directory should be creatable");
        }
        fs::write(&path, body).expect("test file write should succeed");
        path
    }

    fn unique_test_path(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after epoch")
            .as_nanos();

        std::env::temp_dir()
            .join("obstacle-snake-score-tests")
            .join(format!("{label}-{nanos}"))
            .join("scores.json")
    }

    fn cleanup_test_path(path: &PathBuf) {
        let _ = fs::remove_file(path);
        if let Some(parent) = path.parent() {
            let _ = fs::remove_dir(parent);
        }
    }
}
