//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering, input polling or file access

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{Rect, aim, clamp_to_arena, overlaps};
pub use state::{Bullet, Enemy, EnemyBullet, GameState, Player};
pub use tick::{Death, DeathCause, TickInput, TickOutcome, batch_size, tick};
