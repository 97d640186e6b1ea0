//! High score table
//!
//! One best score per username, persisted as `{"high_scores": {name: score}}`.
//! A stored score only ever goes up.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::LEADERBOARD_SIZE;
use crate::error::StoreError;
use crate::persistence::{read_json, write_json};

/// A single leaderboard row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub username: String,
    pub score: u32,
}

/// Username -> best score
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScores {
    #[serde(default)]
    pub high_scores: HashMap<String, u32>,
}

impl HighScores {
    /// Create empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Best score for a username (0 if never recorded)
    pub fn best(&self, username: &str) -> u32 {
        self.high_scores.get(username).copied().unwrap_or(0)
    }

    /// Record a finished run. Returns true if the stored best changed.
    pub fn record(&mut self, username: &str, score: u32) -> bool {
        if username.is_empty() || score <= self.best(username) {
            return false;
        }
        self.high_scores.insert(username.to_string(), score);
        true
    }

    /// Top `n` scores, highest first. Equal scores are ordered by username.
    pub fn top(&self, n: usize) -> Vec<LeaderboardEntry> {
        let mut entries: Vec<LeaderboardEntry> = self
            .high_scores
            .iter()
            .map(|(username, &score)| LeaderboardEntry {
                username: username.clone(),
                score,
            })
            .collect();
        entries.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.username.cmp(&b.username)));
        entries.truncate(n);
        entries
    }

    /// The default-sized leaderboard
    pub fn leaderboard(&self) -> Vec<LeaderboardEntry> {
        self.top(LEADERBOARD_SIZE)
    }

    pub fn is_empty(&self) -> bool {
        self.high_scores.is_empty()
    }

    pub fn len(&self) -> usize {
        self.high_scores.len()
    }

    /// Strict load from a record file
    pub fn try_load(path: &Path) -> Result<Self, StoreError> {
        read_json(path)
    }

    /// Strict save to a record file
    pub fn try_save(&self, path: &Path) -> Result<(), StoreError> {
        write_json(path, self)
    }
}

/// The table plus the file backing it
///
/// Load failures fall back to an empty table and write failures are dropped,
/// both with a warning. Nothing here is fatal to a session.
#[derive(Debug, Clone)]
pub struct ScoreStore {
    path: PathBuf,
    table: HighScores,
}

impl ScoreStore {
    /// Load the table at `path`, or start fresh
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let table = match HighScores::try_load(&path) {
            Ok(table) => {
                log::info!("Loaded {} high scores from {}", table.len(), path.display());
                table
            }
            Err(StoreError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No high scores at {}, starting fresh", path.display());
                HighScores::new()
            }
            Err(err) => {
                log::warn!("Ignoring high score file {}: {}", path.display(), err);
                HighScores::new()
            }
        };
        Self { path, table }
    }

    /// Wrap an in-memory table (nothing is read)
    pub fn with_table(path: impl Into<PathBuf>, table: HighScores) -> Self {
        Self {
            path: path.into(),
            table,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn table(&self) -> &HighScores {
        &self.table
    }

    pub fn best(&self, username: &str) -> u32 {
        self.table.best(username)
    }

    /// Record a death score and persist immediately if it is a new best.
    /// Returns true if the stored best changed.
    pub fn submit(&mut self, username: &str, score: u32) -> bool {
        if !self.table.record(username, score) {
            return false;
        }
        log::info!("New high score for {}: {}", username, score);
        self.save();
        true
    }

    /// Overwrite the backing file with the whole table
    pub fn save(&self) {
        match self.table.try_save(&self.path) {
            Ok(()) => log::info!(
                "High scores saved ({} entries) to {}",
                self.table.len(),
                self.path.display()
            ),
            Err(err) => log::warn!("High scores not saved to {}: {}", self.path.display(), err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_record_only_raises() {
        let mut scores = HighScores::new();
        assert!(scores.record("Ann", 30));
        assert!(scores.record("Ann", 50));
        assert_eq!(scores.best("Ann"), 50);
        assert!(!scores.record("Ann", 20));
        assert!(!scores.record("Ann", 50));
        assert_eq!(scores.best("Ann"), 50);
    }

    #[test]
    fn test_usernames_are_case_sensitive() {
        let mut scores = HighScores::new();
        scores.record("ann", 5);
        assert_eq!(scores.best("Ann"), 0);
        assert_eq!(scores.best("ann"), 5);
    }

    #[test]
    fn test_empty_username_never_recorded() {
        let mut scores = HighScores::new();
        assert!(!scores.record("", 10));
        assert!(scores.is_empty());
    }

    #[test]
    fn test_top_sorted_with_name_tiebreak() {
        let mut scores = HighScores::new();
        scores.record("zed", 7);
        scores.record("amy", 7);
        scores.record("bob", 12);
        scores.record("cat", 1);

        let top = scores.top(3);
        let names: Vec<&str> = top.iter().map(|e| e.username.as_str()).collect();
        assert_eq!(names, ["bob", "amy", "zed"]);
    }

    #[test]
    fn test_leaderboard_caps_at_ten() {
        let mut scores = HighScores::new();
        for i in 0..15 {
            scores.record(&format!("p{i:02}"), i + 1);
        }
        let board = scores.leaderboard();
        assert_eq!(board.len(), LEADERBOARD_SIZE);
        assert_eq!(board[0].score, 15);
        assert_eq!(board[9].score, 6);
    }

    #[test]
    fn test_file_format_matches_record_layout() {
        let mut scores = HighScores::new();
        scores.record("Ann", 50);
        let json = serde_json::to_string(&scores).unwrap();
        assert_eq!(json, r#"{"high_scores":{"Ann":50}}"#);
    }

    #[test]
    fn test_open_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = ScoreStore::open(dir.path().join("scores.json"));
        assert!(store.table().is_empty());
    }

    #[test]
    fn test_open_empty_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.json");
        std::fs::write(&path, "").unwrap();
        let store = ScoreStore::open(&path);
        assert!(store.table().is_empty());
    }

    #[test]
    fn test_open_corrupt_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.json");
        std::fs::write(&path, r#"{"high_scores": {"Ann": "lots"}}"#).unwrap();
        let store = ScoreStore::open(&path);
        assert!(store.table().is_empty());
    }

    #[test]
    fn test_submit_persists_merge() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.json");

        let mut store = ScoreStore::open(&path);
        assert!(store.submit("Ann", 30));
        assert!(store.submit("Ann", 50));
        assert!(!store.submit("Ann", 20));

        let reloaded = ScoreStore::open(&path);
        assert_eq!(reloaded.best("Ann"), 50);
    }

    #[test]
    fn test_save_failure_is_silent() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be overwritten as a file
        let mut store = ScoreStore::open(dir.path());
        assert!(store.submit("Ann", 3));
        assert_eq!(store.best("Ann"), 3);
    }

    proptest! {
        #[test]
        fn prop_best_is_running_max(runs in proptest::collection::vec(0u32..1000, 0..40)) {
            let mut scores = HighScores::new();
            let mut previous = 0;
            for score in &runs {
                scores.record("Ann", *score);
                let best = scores.best("Ann");
                prop_assert!(best >= previous);
                prop_assert_eq!(best, previous.max(*score));
                previous = best;
            }
        }
    }
}
