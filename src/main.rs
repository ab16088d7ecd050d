//! Slice Rush entry point
//!
//! Runs a headless demo round. The shipped game embeds `Round` behind a
//! window with a renderer and real pointer input; here a scripted drag
//! sweep stands in for the player so the whole loop runs end to end.

use std::path::Path;

use glam::Vec2;
use slice_rush::sim::{GameEvent, GamePhase, Round};
use slice_rush::{HighScores, Settings, SpriteCatalog};

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0xC0FFEE);
    let settings = Settings::load(Path::new("settings.json"));
    let catalog = SpriteCatalog::standard();
    let mut highscores = HighScores::load(Path::new("highscores.json"));

    let step_ms = settings.sim_tick_ms.max(1);
    let panel = Vec2::new(settings.panel_width, settings.panel_height);
    let mut round = Round::new(settings, catalog, seed);

    let mut now_ms: u64 = 0;
    let mut peak_entities = 0usize;
    while matches!(round.phase(), GamePhase::Playing | GamePhase::Exploding) {
        // Sweep the pointer back and forth across the lower half of the
        // panel, one sample per simulation step.
        let t = (now_ms / step_ms as u64) as f32;
        let x = (t * 7.0) % panel.x;
        let y = panel.y * 0.55 + (t * 0.21).sin() * 80.0;
        round.pointer_drag(Vec2::new(x, y));

        round.advance(step_ms);
        now_ms += step_ms as u64;

        for event in round.take_events() {
            match event {
                GameEvent::FruitSliced { kind, score, .. } => {
                    log::debug!("sliced fruit kind {kind}, score {score}");
                }
                GameEvent::BombHit { at } => log::info!("bomb hit at {at}"),
                GameEvent::RoundWon { score } => println!("Round won! Final score: {score}"),
                GameEvent::RoundLost { score } => {
                    println!("Sliced a bomb! Final score: {score}");
                }
            }
        }

        if round.take_redraw() {
            let scene = round.scene();
            peak_entities = peak_entities.max(scene.fruits.len() + scene.bombs.len());
        }
    }

    println!(
        "Round over after {:.1}s, peak of {peak_entities} entities on screen",
        now_ms as f64 / 1000.0
    );

    if let Some(score) = round.final_score() {
        if let Some(rank) = highscores.add_score("demo", score) {
            println!("High score rank: {rank}");
        }
        if let Err(err) = highscores.save(Path::new("highscores.json")) {
            log::warn!("could not save high scores: {err}");
        }
    }
}
