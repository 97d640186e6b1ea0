//! Updraft entry point
//!
//! Loads the score table, builds a session and drives it with the headless
//! scripted presenter. A windowed presenter plugs into the same
//! `platform::Presenter` seam.

use updraft::config;
use updraft::consts::TICK_RATE;
use updraft::platform::{ScriptedPresenter, run_frames};
use updraft::{Game, ScoreStore};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Updraft (headless) starting...");

    let scores = ScoreStore::open(config::score_file());
    let seed = config::seed();
    log::info!("Session seed: {}", seed);

    let mut game = Game::new(seed, scores);
    let mut presenter = ScriptedPresenter::new(config::demo_user());

    let frames = config::demo_frames();
    run_frames(&mut game, &mut presenter, frames);

    log::info!(
        "Ran {} frames ({}s of play): {} deaths, best run {}",
        frames,
        frames / u64::from(TICK_RATE),
        presenter.deaths,
        presenter.best_run().unwrap_or(0)
    );
    for (rank, entry) in game.scores().table().leaderboard().iter().enumerate() {
        log::info!("{:2}. {:<12} {:6}", rank + 1, entry.username, entry.score);
    }
}
