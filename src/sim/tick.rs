//! Fixed timestep simulation tick
//!
//! Advances one playthrough by exactly one tick. Persistence and mode changes
//! are the session's job; this module only reports what happened.

use glam::Vec2;

use super::collision::{above_arena, aim, clamp_to_arena, fully_above, outside_arena, overlaps};
use super::state::{Bullet, EnemyBullet, GameState};
use crate::consts::*;

/// Input commands for a single tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Held directions
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Fire was pressed this tick (edge, not held)
    pub fire: bool,
}

/// What killed the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathCause {
    EnemyBullet,
    EnemyContact,
}

/// Player death, with the score at the moment it happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Death {
    pub cause: DeathCause,
    pub score: u32,
}

/// Summary of a tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// Enemies destroyed by player bullets
    pub kills: u32,
    /// Enemies spawned
    pub spawned: u32,
    pub death: Option<Death>,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) -> TickOutcome {
    let mut outcome = TickOutcome::default();

    state.elapsed_ticks += 1;

    move_player(state, input);

    if input.fire {
        state.bullets.push(Bullet::fired_by(&state.player));
    }

    ramp_difficulty(state);
    outcome.spawned = spawn_enemies(state);
    update_enemies(state);

    for eb in &mut state.enemy_bullets {
        eb.pos += eb.vel;
    }
    state.enemy_bullets.retain(|eb| !outside_arena(eb.hitbox()));

    for bullet in &mut state.bullets {
        bullet.pos.y -= bullet.speed;
    }
    state.bullets.retain(|b| !above_arena(b.hitbox()));

    outcome.kills = resolve_bullet_hits(state);
    outcome.death = check_player_death(state);

    outcome
}

/// Each held direction moves PLAYER_SPEED on its axis. Diagonals are the
/// plain sum, so they cover more ground than straight moves.
fn move_player(state: &mut GameState, input: &TickInput) {
    let mut delta = Vec2::ZERO;
    if input.up {
        delta.y -= PLAYER_SPEED;
    }
    if input.down {
        delta.y += PLAYER_SPEED;
    }
    if input.left {
        delta.x -= PLAYER_SPEED;
    }
    if input.right {
        delta.x += PLAYER_SPEED;
    }
    let player = &mut state.player;
    player.pos = clamp_to_arena(player.pos + delta, player.size);
}

fn ramp_difficulty(state: &mut GameState) {
    if state.elapsed_ticks.is_multiple_of(DIFFICULTY_PERIOD)
        && state.spawn_interval > MIN_SPAWN_INTERVAL
    {
        state.spawn_interval = state
            .spawn_interval
            .saturating_sub(SPAWN_INTERVAL_STEP)
            .max(MIN_SPAWN_INTERVAL);
        log::debug!(
            "Tick {}: spawn interval now {}",
            state.elapsed_ticks,
            state.spawn_interval
        );
    }
}

/// Enemies per batch for a given spawn interval (smaller interval, bigger batch)
pub fn batch_size(spawn_interval: u32) -> u32 {
    1 + INITIAL_SPAWN_INTERVAL.saturating_sub(spawn_interval) / 20
}

fn spawn_enemies(state: &mut GameState) -> u32 {
    state.spawn_counter += 1;
    if state.spawn_counter < state.spawn_interval {
        return 0;
    }
    state.spawn_counter = 0;

    let count = batch_size(state.spawn_interval);
    for _ in 0..count {
        state.spawn_enemy();
    }
    count
}

/// Move enemies, drop the ones gone off the top, and fire aimed shots
fn update_enemies(state: &mut GameState) {
    state.enemies.retain_mut(|e| {
        e.pos.y += e.speed;
        !fully_above(e.hitbox())
    });

    let target = state.player.center();
    for i in 0..state.enemies.len() {
        let enemy = &mut state.enemies[i];
        enemy.cooldown -= 1;
        if enemy.cooldown > 0 {
            continue;
        }

        // No direction when centers coincide; retry next tick
        let origin = enemy.center();
        let Some(vel) = aim(origin, target, ENEMY_BULLET_SPEED) else {
            continue;
        };
        state.enemy_bullets.push(EnemyBullet::fired_from(origin, vel));
        let cooldown = state.roll_fire_cooldown();
        state.enemies[i].cooldown = cooldown;
    }
}

/// Mark-then-compact pass. A bullet kills at most one live enemy and is
/// consumed; a marked enemy cannot be hit again this tick.
fn resolve_bullet_hits(state: &mut GameState) -> u32 {
    let mut kills = 0;
    let enemies = &mut state.enemies;

    state.bullets.retain(|bullet| {
        let hit = enemies
            .iter_mut()
            .find(|e| !e.dead && overlaps(bullet.hitbox(), e.hitbox()));
        match hit {
            Some(enemy) => {
                enemy.dead = true;
                kills += 1;
                false
            }
            None => true,
        }
    });

    state.enemies.retain(|e| !e.dead);
    state.score += kills;
    kills
}

/// Enemy bullets are checked first; contact only if no bullet landed
fn check_player_death(state: &mut GameState) -> Option<Death> {
    let player = state.player.hitbox();
    let score = state.score;

    let before = state.enemy_bullets.len();
    state.enemy_bullets.retain(|eb| !overlaps(eb.hitbox(), player));
    if state.enemy_bullets.len() != before {
        return Some(Death {
            cause: DeathCause::EnemyBullet,
            score,
        });
    }

    if state.enemies.iter().any(|e| overlaps(player, e.hitbox())) {
        return Some(Death {
            cause: DeathCause::EnemyContact,
            score,
        });
    }

    None
}
