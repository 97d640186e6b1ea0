//! Platform abstraction layer
//!
//! The core never polls devices or draws. A `Presenter` owns the window and
//! input devices; each frame it hands over a `FrameInput`, then draws the
//! `Snapshot` it gets back.

use glam::Vec2;

use crate::session::{FrameInput, Game, Mode, Snapshot};
use crate::settings::WindowSize;

/// Window, input and drawing collaborator
pub trait Presenter {
    /// Input signals for the coming frame
    fn poll_input(&mut self) -> FrameInput;
    /// Draw the frame. Must not mutate the session.
    fn draw(&mut self, snapshot: &Snapshot<'_>);
    /// Resize the window (the arena itself never changes size)
    fn set_window_size(&mut self, size: WindowSize);
}

/// One update phase then one draw phase per frame
pub fn run_frames(game: &mut Game, presenter: &mut impl Presenter, frames: u64) {
    for _ in 0..frames {
        let input = presenter.poll_input();
        if let Some(size) = game.update(&input) {
            presenter.set_window_size(size);
        }
        presenter.draw(&game.snapshot());
    }
}

/// Frames to linger on the death screen before playing again
const DEATH_SCREEN_FRAMES: u32 = 30;
/// Frames between demo shots
const FIRE_EVERY: u64 = 10;
/// Shots and rising enemies closer than this get dodged
const DODGE_RADIUS: f32 = 80.0;
/// Preferred cruising height
const CRUISE_Y: f32 = 380.0;

/// Headless presenter with a built-in demo pilot
///
/// Types a username, starts, then cruises low in the arena, lining up under
/// enemies that have risen past it and sidestepping anything close. After a
/// death it plays again. Nothing is drawn; frames are summarized in the log.
#[derive(Debug, Default)]
pub struct ScriptedPresenter {
    username: String,
    frame: u64,
    mode: Mode,
    dead_frames: u32,
    /// Intended movement for the next frame, decided during `draw`
    steer: FrameInput,
    pub deaths: u32,
    pub death_scores: Vec<u32>,
    pub window: Option<WindowSize>,
}

impl ScriptedPresenter {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            ..Default::default()
        }
    }

    pub fn best_run(&self) -> Option<u32> {
        self.death_scores.iter().copied().max()
    }

    fn pilot(&self, snapshot: &Snapshot<'_>) -> FrameInput {
        let player = snapshot.player;
        let center = player.center();
        let mut input = FrameInput::default();

        // Nearest shot or rising enemy inside the dodge radius
        let shots = snapshot
            .enemy_bullets
            .iter()
            .map(|eb| eb.pos + Vec2::splat(eb.size / 2.0));
        let rising = snapshot
            .enemies
            .iter()
            .filter(|e| e.pos.y >= player.pos.y)
            .map(|e| e.center());
        let threat = shots
            .chain(rising)
            .filter(|p| p.distance(center) < DODGE_RADIUS)
            .min_by(|a, b| a.distance(center).total_cmp(&b.distance(center)));

        if let Some(danger) = threat {
            input.left = danger.x >= center.x;
            input.right = !input.left;
            return input;
        }

        // Line up under the closest enemy that has already passed overhead
        let target = snapshot
            .enemies
            .iter()
            .filter(|e| e.pos.y + e.size <= player.pos.y)
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));
        if let Some(enemy) = target {
            let dx = enemy.center().x - center.x;
            input.left = dx < -2.0;
            input.right = dx > 2.0;
        }
        input.up = player.pos.y > CRUISE_Y;
        input.down = player.pos.y + player.size < CRUISE_Y;
        input
    }
}

impl Presenter for ScriptedPresenter {
    fn poll_input(&mut self) -> FrameInput {
        self.frame += 1;
        match self.mode {
            Mode::Menu if self.frame == 1 => FrameInput {
                typed: self.username.chars().collect(),
                ..Default::default()
            },
            Mode::Menu => FrameInput {
                confirm: true,
                ..Default::default()
            },
            Mode::Playing => {
                let mut input = std::mem::take(&mut self.steer);
                // Fire is an edge: one press every few frames
                input.fire = self.frame.is_multiple_of(FIRE_EVERY);
                input
            }
            Mode::Dead if self.dead_frames >= DEATH_SCREEN_FRAMES => FrameInput {
                confirm: true,
                ..Default::default()
            },
            _ => FrameInput::default(),
        }
    }

    fn draw(&mut self, snapshot: &Snapshot<'_>) {
        if snapshot.mode != self.mode {
            if snapshot.mode == Mode::Dead {
                self.deaths += 1;
                self.death_scores.push(snapshot.death_score);
                self.dead_frames = 0;
            }
            self.mode = snapshot.mode;
        }

        match snapshot.mode {
            Mode::Playing => self.steer = self.pilot(snapshot),
            Mode::Dead => self.dead_frames += 1,
            _ => {}
        }

        if self.frame.is_multiple_of(600) {
            log::debug!(
                "Frame {}: {:?} score={} enemies={} shots={}",
                self.frame,
                snapshot.mode,
                snapshot.score,
                snapshot.enemies.len(),
                snapshot.enemy_bullets.len()
            );
        }
    }

    fn set_window_size(&mut self, size: WindowSize) {
        log::info!("Window resize requested: {}x{}", size.width, size.height);
        self.window = Some(size);
    }
}
