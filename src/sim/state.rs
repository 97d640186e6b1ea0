//! Game state and entity records
//!
//! Positions are top-left corners in arena units; every hitbox is a square.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::Rect;
use crate::consts::*;

/// The player's avatar
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub pos: Vec2,
    pub size: f32,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            size: PLAYER_SIZE,
        }
    }

    /// Spawn point for a fresh run
    pub fn spawn() -> Self {
        Self::new(Vec2::new(ARENA_WIDTH / 2.0, ARENA_HEIGHT / 2.0))
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }

    pub fn hitbox(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// A player bullet (travels straight up)
#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    pub pos: Vec2,
    /// Upward distance per tick
    pub speed: f32,
    pub size: f32,
}

impl Bullet {
    /// Fire from the horizontal center of the player's top edge
    pub fn fired_by(player: &Player) -> Self {
        Self {
            pos: Vec2::new(player.pos.x + player.size / 2.0 - BULLET_SIZE / 2.0, player.pos.y),
            speed: BULLET_SPEED,
            size: BULLET_SIZE,
        }
    }

    pub fn hitbox(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// An enemy drifting up from the bottom edge
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub pos: Vec2,
    pub size: f32,
    /// Vertical velocity per tick (negative is up)
    pub speed: f32,
    /// Ticks until the next shot; fires at or below zero
    pub cooldown: i32,
    /// Marked during the bullet pass, removed when the pass ends
    pub dead: bool,
}

impl Enemy {
    pub fn new(pos: Vec2, cooldown: i32) -> Self {
        Self {
            pos,
            size: ENEMY_SIZE,
            speed: ENEMY_SPEED,
            cooldown,
            dead: false,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }

    pub fn hitbox(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// An aimed enemy shot
#[derive(Debug, Clone, PartialEq)]
pub struct EnemyBullet {
    pub pos: Vec2,
    /// Fixed at fire time
    pub vel: Vec2,
    pub size: f32,
}

impl EnemyBullet {
    /// Centered on the shooter, flying along `vel`
    pub fn fired_from(origin: Vec2, vel: Vec2) -> Self {
        Self {
            pos: origin - Vec2::splat(ENEMY_BULLET_SIZE / 2.0),
            vel,
            size: ENEMY_BULLET_SIZE,
        }
    }

    pub fn hitbox(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// Everything one playthrough needs. Rebuilt by `reset` on every new run.
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub enemy_bullets: Vec<EnemyBullet>,
    /// Enemies destroyed this run
    pub score: u32,
    /// Ticks since the last spawn batch
    pub spawn_counter: u32,
    /// Ticks between spawn batches (only ever shrinks during a run)
    pub spawn_interval: u32,
    /// Ticks since the run started
    pub elapsed_ticks: u64,
    rng: Pcg32,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            player: Player::spawn(),
            bullets: Vec::new(),
            enemies: Vec::new(),
            enemy_bullets: Vec::new(),
            score: 0,
            spawn_counter: 0,
            spawn_interval: INITIAL_SPAWN_INTERVAL,
            elapsed_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Full session reset. The RNG keeps its stream so runs differ.
    pub fn reset(&mut self) {
        self.player = Player::spawn();
        self.bullets.clear();
        self.enemies.clear();
        self.enemy_bullets.clear();
        self.score = 0;
        self.spawn_counter = 0;
        self.spawn_interval = INITIAL_SPAWN_INTERVAL;
        self.elapsed_ticks = 0;
    }

    /// Spawn one enemy on the bottom edge at a random column
    pub fn spawn_enemy(&mut self) {
        let span = (ARENA_WIDTH - 2.0 * ENEMY_SPAWN_MARGIN) as u32;
        let x = ENEMY_SPAWN_MARGIN + self.rng.random_range(0..span) as f32;
        let cooldown = self.rng.random_range(INITIAL_FIRE_COOLDOWN);
        self.enemies.push(Enemy::new(Vec2::new(x, ARENA_HEIGHT), cooldown));
    }

    /// Cooldown after an enemy fires
    pub fn roll_fire_cooldown(&mut self) -> i32 {
        self.rng.random_range(FIRE_COOLDOWN)
    }
}
