//! Game session and mode state machine
//!
//! `transition` is the single source of truth for which mode follows which;
//! `Game` applies the side effect it asks for (reset a run, record a death).

use crate::consts::{LEADERBOARD_SIZE, MAX_USERNAME_LEN};
use crate::error::InputError;
use crate::highscores::{LeaderboardEntry, ScoreStore};
use crate::settings::{DropdownOption, ScreenChoice, Settings, SettingsMenu, WindowSize};
use crate::sim::{Bullet, Enemy, EnemyBullet, GameState, Player, TickInput, tick};

/// Where the settings screen returns to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnMode {
    Menu,
    Dead,
}

impl From<ReturnMode> for Mode {
    fn from(mode: ReturnMode) -> Self {
        match mode {
            ReturnMode::Menu => Mode::Menu,
            ReturnMode::Dead => Mode::Dead,
        }
    }
}

/// Top-level screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Username entry and leaderboard
    #[default]
    Menu,
    /// Simulation running
    Playing,
    /// Death screen
    Dead,
    /// Screen size settings
    Settings { back_to: ReturnMode },
}

/// Requests that may change the mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ConfirmUsername,
    OpenSettings,
    Back,
    PlayAgain,
    MainMenu,
    PlayerDied,
}

/// Side effect required by a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Fresh run: score, entities and timers back to their initial values
    ResetSession,
    /// Capture the death score and persist it if it beats the stored best
    RecordDeath,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub mode: Mode,
    pub effect: Effect,
}

impl Transition {
    fn to(mode: Mode, effect: Effect) -> Option<Self> {
        Some(Self { mode, effect })
    }
}

/// Next mode for `action` in `mode`, or `None` if the action does not apply
pub fn transition(mode: Mode, action: Action) -> Option<Transition> {
    match (mode, action) {
        (Mode::Menu, Action::ConfirmUsername) => {
            Transition::to(Mode::Playing, Effect::ResetSession)
        }
        (Mode::Menu, Action::OpenSettings) => Transition::to(
            Mode::Settings {
                back_to: ReturnMode::Menu,
            },
            Effect::None,
        ),
        (Mode::Playing, Action::PlayerDied) => Transition::to(Mode::Dead, Effect::RecordDeath),
        (Mode::Dead, Action::PlayAgain) => Transition::to(Mode::Playing, Effect::ResetSession),
        (Mode::Dead, Action::MainMenu) => Transition::to(Mode::Menu, Effect::ResetSession),
        (Mode::Dead, Action::OpenSettings) => Transition::to(
            Mode::Settings {
                back_to: ReturnMode::Dead,
            },
            Effect::None,
        ),
        (Mode::Settings { back_to }, Action::Back) => Transition::to(back_to.into(), Effect::None),
        _ => None,
    }
}

/// Button-level commands; the presentation layer resolves clicks into these
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiCommand {
    OpenSettings,
    Back,
    PlayAgain,
    MainMenu,
    ToggleDropdown,
    SelectScreen(DropdownOption),
}

/// Input signals for one frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameInput {
    /// Held movement keys
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Fire button pressed this frame
    pub fire: bool,
    /// Enter pressed this frame
    pub confirm: bool,
    /// Escape pressed this frame
    pub cancel: bool,
    /// Backspace pressed this frame
    pub backspace: bool,
    /// Characters typed this frame
    pub typed: Vec<char>,
    pub command: Option<UiCommand>,
}

impl FrameInput {
    fn tick_input(&self) -> TickInput {
        TickInput {
            up: self.up,
            down: self.down,
            left: self.left,
            right: self.right,
            fire: self.fire,
        }
    }
}

fn username_char_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// Read-only view handed to the renderer each frame
#[derive(Debug, Clone)]
pub struct Snapshot<'a> {
    pub mode: Mode,
    pub player: &'a Player,
    pub bullets: &'a [Bullet],
    pub enemies: &'a [Enemy],
    pub enemy_bullets: &'a [EnemyBullet],
    pub score: u32,
    pub death_score: u32,
    pub elapsed_ticks: u64,
    pub username: &'a str,
    pub username_input: &'a str,
    /// Stored best for the name being typed (menu) or the current player
    pub best: Option<u32>,
    pub leaderboard: Vec<LeaderboardEntry>,
    pub screen: ScreenChoice,
    pub dropdown_open: bool,
    pub custom_input: Option<&'a str>,
}

/// One player's session: mode, current run, and the score table it writes to
#[derive(Debug)]
pub struct Game {
    mode: Mode,
    state: GameState,
    scores: ScoreStore,
    settings: Settings,
    settings_menu: SettingsMenu,
    username: String,
    username_input: String,
    death_score: u32,
}

impl Game {
    pub fn new(seed: u64, scores: ScoreStore) -> Self {
        Self {
            mode: Mode::Menu,
            state: GameState::new(seed),
            scores,
            settings: Settings::default(),
            settings_menu: SettingsMenu::default(),
            username: String::new(),
            username_input: String::new(),
            death_score: 0,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn scores(&self) -> &ScoreStore {
        &self.scores
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn username_input(&self) -> &str {
        &self.username_input
    }

    pub fn death_score(&self) -> u32 {
        self.death_score
    }

    /// Apply an action. Returns false if it is not valid in the current mode.
    pub fn apply(&mut self, action: Action) -> bool {
        let Some(Transition { mode, effect }) = transition(self.mode, action) else {
            log::debug!("Ignoring {:?} in {:?}", action, self.mode);
            return false;
        };

        match effect {
            Effect::None => {}
            Effect::ResetSession => self.state.reset(),
            Effect::RecordDeath => {
                self.death_score = self.state.score;
                self.scores.submit(&self.username, self.death_score);
            }
        }

        log::info!("Mode {:?} -> {:?}", self.mode, mode);
        self.mode = mode;
        true
    }

    /// Take the typed name and start a run
    pub fn confirm_username(&mut self) -> Result<(), InputError> {
        if self.mode != Mode::Menu {
            return Err(InputError::NotAtMenu);
        }
        if self.username_input.is_empty() {
            return Err(InputError::EmptyUsername);
        }
        self.username = self.username_input.clone();
        self.apply(Action::ConfirmUsername);
        Ok(())
    }

    /// Advance one frame. Returns a window size for the presentation layer
    /// when the settings screen picked a new resolution.
    pub fn update(&mut self, input: &FrameInput) -> Option<WindowSize> {
        match self.mode {
            Mode::Menu => self.update_menu(input),
            Mode::Playing => self.update_playing(input),
            Mode::Dead => self.update_dead(input),
            Mode::Settings { .. } => return self.update_settings(input),
        }
        None
    }

    fn update_menu(&mut self, input: &FrameInput) {
        for &c in &input.typed {
            if self.username_input.len() < MAX_USERNAME_LEN && username_char_allowed(c) {
                self.username_input.push(c);
            }
        }
        if input.backspace {
            self.username_input.pop();
        }
        if input.confirm {
            if let Err(err) = self.confirm_username() {
                log::debug!("Start rejected: {}", err);
            }
            return;
        }
        if input.command == Some(UiCommand::OpenSettings) {
            self.apply(Action::OpenSettings);
        }
    }

    fn update_playing(&mut self, input: &FrameInput) {
        let outcome = tick(&mut self.state, &input.tick_input());
        if let Some(death) = outcome.death {
            log::info!(
                "{} died ({:?}) at tick {} with score {}",
                self.username,
                death.cause,
                self.state.elapsed_ticks,
                death.score
            );
            self.apply(Action::PlayerDied);
        }
    }

    fn update_dead(&mut self, input: &FrameInput) {
        let action = match input.command {
            Some(UiCommand::MainMenu) => Some(Action::MainMenu),
            Some(UiCommand::PlayAgain) => Some(Action::PlayAgain),
            Some(UiCommand::OpenSettings) => Some(Action::OpenSettings),
            _ if input.confirm => Some(Action::PlayAgain),
            _ if input.cancel => Some(Action::MainMenu),
            _ => None,
        };
        if let Some(action) = action {
            self.apply(action);
        }
    }

    fn update_settings(&mut self, input: &FrameInput) -> Option<WindowSize> {
        if self.settings_menu.is_editing() {
            self.settings_menu.type_chars(&input.typed);
            if input.backspace {
                self.settings_menu.backspace();
            }
            if input.confirm {
                match self.settings_menu.submit_custom(&mut self.settings) {
                    Ok(size) => return Some(size),
                    Err(err) => log::debug!("Custom resolution rejected: {}", err),
                }
            }
            if input.cancel {
                self.settings_menu.cancel_custom();
            }
            return None;
        }

        match input.command? {
            UiCommand::ToggleDropdown => {
                self.settings_menu.toggle_dropdown();
                None
            }
            UiCommand::SelectScreen(option) => {
                self.settings_menu.select(option, &mut self.settings)
            }
            UiCommand::Back => {
                self.apply(Action::Back);
                None
            }
            _ => None,
        }
    }

    /// Everything the renderer needs for this frame
    pub fn snapshot(&self) -> Snapshot<'_> {
        let best = match self.mode {
            Mode::Menu if !self.username_input.is_empty() => {
                Some(self.scores.best(&self.username_input))
            }
            Mode::Dead if !self.username.is_empty() => Some(self.scores.best(&self.username)),
            _ => None,
        };

        Snapshot {
            mode: self.mode,
            player: &self.state.player,
            bullets: &self.state.bullets,
            enemies: &self.state.enemies,
            enemy_bullets: &self.state.enemy_bullets,
            score: self.state.score,
            death_score: self.death_score,
            elapsed_ticks: self.state.elapsed_ticks,
            username: &self.username,
            username_input: &self.username_input,
            best,
            leaderboard: self.scores.table().top(LEADERBOARD_SIZE),
            screen: self.settings.screen,
            dropdown_open: self.settings_menu.dropdown_open,
            custom_input: self.settings_menu.custom_input.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::HighScores;
    use crate::settings::ScreenPreset;
    use glam::Vec2;
    use std::path::Path;

    fn game_at(path: &Path) -> Game {
        Game::new(1234, ScoreStore::open(path))
    }

    fn typed(text: &str) -> FrameInput {
        FrameInput {
            typed: text.chars().collect(),
            ..Default::default()
        }
    }

    fn confirm() -> FrameInput {
        FrameInput {
            confirm: true,
            ..Default::default()
        }
    }

    fn command(cmd: UiCommand) -> FrameInput {
        FrameInput {
            command: Some(cmd),
            ..Default::default()
        }
    }

    /// Put an enemy on top of the player so the next frame kills them
    fn die_with_score(game: &mut Game, score: u32) {
        game.state.score = score;
        let pos = game.state.player.pos + Vec2::new(0.0, 2.0);
        game.state.enemies.push(Enemy::new(pos, 10_000));
        game.update(&FrameInput::default());
        assert_eq!(game.mode(), Mode::Dead);
    }

    fn start(game: &mut Game, name: &str) {
        game.update(&typed(name));
        game.update(&confirm());
        assert_eq!(game.mode(), Mode::Playing);
    }

    #[test]
    fn test_transition_table() {
        let settings_from_menu = Mode::Settings {
            back_to: ReturnMode::Menu,
        };
        let settings_from_dead = Mode::Settings {
            back_to: ReturnMode::Dead,
        };

        let cases = [
            (Mode::Menu, Action::ConfirmUsername, Mode::Playing, Effect::ResetSession),
            (Mode::Menu, Action::OpenSettings, settings_from_menu, Effect::None),
            (Mode::Playing, Action::PlayerDied, Mode::Dead, Effect::RecordDeath),
            (Mode::Dead, Action::PlayAgain, Mode::Playing, Effect::ResetSession),
            (Mode::Dead, Action::MainMenu, Mode::Menu, Effect::ResetSession),
            (Mode::Dead, Action::OpenSettings, settings_from_dead, Effect::None),
            (settings_from_menu, Action::Back, Mode::Menu, Effect::None),
            (settings_from_dead, Action::Back, Mode::Dead, Effect::None),
        ];
        for (from, action, mode, effect) in cases {
            assert_eq!(transition(from, action), Some(Transition { mode, effect }));
        }
    }

    #[test]
    fn test_invalid_transitions_ignored() {
        assert_eq!(transition(Mode::Menu, Action::PlayAgain), None);
        assert_eq!(transition(Mode::Menu, Action::PlayerDied), None);
        assert_eq!(transition(Mode::Playing, Action::OpenSettings), None);
        assert_eq!(transition(Mode::Playing, Action::Back), None);
        assert_eq!(transition(Mode::Dead, Action::ConfirmUsername), None);
        assert_eq!(
            transition(
                Mode::Settings {
                    back_to: ReturnMode::Menu
                },
                Action::PlayerDied
            ),
            None
        );
    }

    #[test]
    fn test_username_filtering() {
        let dir = tempfile::tempdir().unwrap();
        let mut game = game_at(&dir.path().join("scores.json"));

        game.update(&typed("Ann! x_-9"));
        assert_eq!(game.username_input(), "Annx_-9");

        game.update(&typed("abcdefghij"));
        assert_eq!(game.username_input().len(), MAX_USERNAME_LEN);
        assert_eq!(game.username_input(), "Annx_-9abcde");

        game.update(&FrameInput {
            backspace: true,
            ..Default::default()
        });
        assert_eq!(game.username_input(), "Annx_-9abcd");
    }

    #[test]
    fn test_empty_username_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut game = game_at(&dir.path().join("scores.json"));

        game.update(&confirm());
        assert_eq!(game.mode(), Mode::Menu);
        assert_eq!(game.confirm_username(), Err(InputError::EmptyUsername));
    }

    #[test]
    fn test_confirm_outside_menu_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut game = game_at(&dir.path().join("scores.json"));
        start(&mut game, "Ann");
        game.state.score = 3;

        assert_eq!(game.confirm_username(), Err(InputError::NotAtMenu));
        assert_eq!(game.mode(), Mode::Playing);
        assert_eq!(game.state().score, 3);

        die_with_score(&mut game, 3);
        assert_eq!(game.confirm_username(), Err(InputError::NotAtMenu));
        assert_eq!(game.mode(), Mode::Dead);
    }

    #[test]
    fn test_confirm_starts_fresh_run() {
        let dir = tempfile::tempdir().unwrap();
        let mut game = game_at(&dir.path().join("scores.json"));
        game.state.score = 5;
        game.state.spawn_interval = 20;

        start(&mut game, "Ann");
        assert_eq!(game.username(), "Ann");
        assert_eq!(game.state().score, 0);
        assert_eq!(game.state().spawn_interval, 90);
    }

    #[test]
    fn test_playing_advances_simulation() {
        let dir = tempfile::tempdir().unwrap();
        let mut game = game_at(&dir.path().join("scores.json"));
        start(&mut game, "Ann");

        let before = game.state().player.pos;
        game.update(&FrameInput {
            left: true,
            fire: true,
            ..Default::default()
        });
        assert_eq!(game.state().elapsed_ticks, 1);
        assert_eq!(game.state().player.pos, before - Vec2::new(4.0, 0.0));
        assert_eq!(game.state().bullets.len(), 1);
    }

    #[test]
    fn test_death_records_high_score() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.json");
        let mut game = game_at(&path);
        start(&mut game, "Ann");

        die_with_score(&mut game, 30);
        assert_eq!(game.death_score(), 30);
        assert_eq!(game.scores().best("Ann"), 30);

        game.update(&confirm());
        assert_eq!(game.mode(), Mode::Playing);
        assert_eq!(game.state().score, 0);
        die_with_score(&mut game, 50);
        assert_eq!(game.scores().best("Ann"), 50);

        game.update(&command(UiCommand::PlayAgain));
        die_with_score(&mut game, 20);
        assert_eq!(game.death_score(), 20);
        assert_eq!(game.scores().best("Ann"), 50);

        // Written through to disk at the moment of death
        let on_disk = HighScores::try_load(&path).unwrap();
        assert_eq!(on_disk.best("Ann"), 50);
    }

    #[test]
    fn test_main_menu_keeps_username() {
        let dir = tempfile::tempdir().unwrap();
        let mut game = game_at(&dir.path().join("scores.json"));
        start(&mut game, "Ann");
        die_with_score(&mut game, 3);

        game.update(&FrameInput {
            cancel: true,
            ..Default::default()
        });
        assert_eq!(game.mode(), Mode::Menu);
        assert_eq!(game.username(), "Ann");
        assert_eq!(game.username_input(), "Ann");
        assert!(game.state().enemies.is_empty());

        let snap = game.snapshot();
        assert_eq!(snap.best, Some(3));
        assert_eq!(snap.leaderboard.len(), 1);
    }

    #[test]
    fn test_settings_returns_to_previous_mode() {
        let dir = tempfile::tempdir().unwrap();
        let mut game = game_at(&dir.path().join("scores.json"));

        game.update(&command(UiCommand::OpenSettings));
        assert_eq!(
            game.mode(),
            Mode::Settings {
                back_to: ReturnMode::Menu
            }
        );
        game.update(&command(UiCommand::Back));
        assert_eq!(game.mode(), Mode::Menu);

        start(&mut game, "Bo");
        die_with_score(&mut game, 1);
        game.update(&command(UiCommand::OpenSettings));
        game.update(&command(UiCommand::Back));
        assert_eq!(game.mode(), Mode::Dead);
        assert_eq!(game.death_score(), 1);
    }

    #[test]
    fn test_settings_forward_window_size() {
        let dir = tempfile::tempdir().unwrap();
        let mut game = game_at(&dir.path().join("scores.json"));
        game.update(&command(UiCommand::OpenSettings));

        // Options only apply through an open dropdown
        let xga = command(UiCommand::SelectScreen(DropdownOption::Preset(
            ScreenPreset::Xga,
        )));
        assert_eq!(game.update(&xga), None);
        assert_eq!(game.settings().screen, ScreenChoice::Preset(ScreenPreset::Vga));

        game.update(&command(UiCommand::ToggleDropdown));
        assert!(game.snapshot().dropdown_open);

        let size = game.update(&command(UiCommand::SelectScreen(DropdownOption::Preset(
            ScreenPreset::Xga,
        ))));
        assert_eq!(
            size,
            Some(WindowSize {
                width: 2048,
                height: 1536
            })
        );

        game.update(&command(UiCommand::ToggleDropdown));
        game.update(&command(UiCommand::SelectScreen(DropdownOption::Custom)));
        assert_eq!(game.snapshot().custom_input, Some(""));

        // Invalid text is rejected and left for correction
        game.update(&typed("50,50"));
        assert_eq!(game.update(&confirm()), None);
        assert_eq!(game.snapshot().custom_input, Some("50,50"));

        // Back is ignored while the prompt is open
        game.update(&command(UiCommand::Back));
        assert!(matches!(game.mode(), Mode::Settings { .. }));

        game.update(&FrameInput {
            cancel: true,
            ..Default::default()
        });
        game.update(&command(UiCommand::ToggleDropdown));
        game.update(&command(UiCommand::SelectScreen(DropdownOption::Custom)));
        game.update(&typed("900,700"));
        assert_eq!(
            game.update(&confirm()),
            Some(WindowSize {
                width: 1800,
                height: 1400
            })
        );
        // The arena itself does not change
        assert_eq!(game.state().player.size, crate::consts::PLAYER_SIZE);
    }

    #[test]
    fn test_snapshot_in_menu_shows_best_for_typed_name() {
        let dir = tempfile::tempdir().unwrap();
        let mut table = HighScores::new();
        table.record("Ann", 12);
        let mut game = Game::new(1, ScoreStore::with_table(dir.path().join("s.json"), table));

        assert_eq!(game.snapshot().best, None);
        game.update(&typed("Ann"));
        assert_eq!(game.snapshot().best, Some(12));
        game.update(&typed("e"));
        assert_eq!(game.snapshot().best, Some(0));
    }
}
