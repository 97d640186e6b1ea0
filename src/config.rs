//! Runtime configuration read from the environment
//!
//! Gameplay tuning lives in `consts`; these only affect the binary.

use std::env;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

pub fn score_file() -> PathBuf {
    env::var("UPDRAFT_SCORE_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("scores.json"))
}

/// RNG seed; falls back to the wall clock so runs differ
pub fn seed() -> u64 {
    env::var("UPDRAFT_SEED")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        })
}

/// Frames the headless demo runs before exiting
pub fn demo_frames() -> u64 {
    env::var("UPDRAFT_DEMO_FRAMES")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3600)
}

/// Username the headless demo types at the menu
pub fn demo_user() -> String {
    env::var("UPDRAFT_DEMO_USER").unwrap_or_else(|_| "demo".to_string())
}
