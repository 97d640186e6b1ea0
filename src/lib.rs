//! Updraft - a fixed-tick arena shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, per-tick update)
//! - `session`: Mode state machine and the game session that drives `sim`
//! - `highscores`: Per-username best scores, persisted as JSON
//! - `settings`: Window size presets and the settings screen state
//! - `platform`: Presentation seam (input in, snapshots out)
//! - `persistence`: Whole-file JSON record helpers

pub mod config;
pub mod error;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;

pub use error::{InputError, StoreError};
pub use highscores::{HighScores, LeaderboardEntry, ScoreStore};
pub use session::{Action, Effect, FrameInput, Game, Mode, ReturnMode, Snapshot, UiCommand};
pub use settings::{Resolution, ScreenChoice, ScreenPreset, Settings, SettingsMenu, WindowSize};

/// Game configuration constants
pub mod consts {
    use std::ops::Range;

    /// Logical arena dimensions (independent of the window size)
    pub const ARENA_WIDTH: f32 = 640.0;
    pub const ARENA_HEIGHT: f32 = 480.0;

    /// Logical ticks per second driven by the frame scheduler
    pub const TICK_RATE: u32 = 60;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 32.0;
    /// Per-axis displacement per tick (diagonals are not normalized)
    pub const PLAYER_SPEED: f32 = 4.0;

    /// Player bullets travel straight up
    pub const BULLET_SIZE: f32 = 6.0;
    pub const BULLET_SPEED: f32 = 8.0;

    /// Enemies rise from the bottom edge
    pub const ENEMY_SIZE: f32 = 32.0;
    pub const ENEMY_SPEED: f32 = -2.0;
    /// Horizontal spawn margin on each side
    pub const ENEMY_SPAWN_MARGIN: f32 = 32.0;
    /// First shot delay for a freshly spawned enemy (ticks)
    pub const INITIAL_FIRE_COOLDOWN: Range<i32> = 30..90;
    /// Delay between subsequent shots (ticks)
    pub const FIRE_COOLDOWN: Range<i32> = 60..120;

    /// Aimed enemy shots
    pub const ENEMY_BULLET_SIZE: f32 = 6.0;
    pub const ENEMY_BULLET_SPEED: f32 = 5.0;

    /// Difficulty ramp: every DIFFICULTY_PERIOD ticks the spawn interval
    /// shrinks by SPAWN_INTERVAL_STEP, never below MIN_SPAWN_INTERVAL
    pub const INITIAL_SPAWN_INTERVAL: u32 = 90;
    pub const SPAWN_INTERVAL_STEP: u32 = 5;
    pub const MIN_SPAWN_INTERVAL: u32 = 10;
    pub const DIFFICULTY_PERIOD: u64 = 120;

    /// Menu / leaderboard
    pub const MAX_USERNAME_LEN: usize = 12;
    pub const LEADERBOARD_SIZE: usize = 10;

    /// Window pixels per logical pixel
    pub const WINDOW_SCALE: u32 = 2;
    /// Smallest accepted custom width or height
    pub const MIN_CUSTOM_DIMENSION: u32 = 100;
}
