//! Probabilistic entity spawning
//!
//! Each simulation tick makes two independent spawn decisions, one for
//! fruit and one for bombs. Both entity types launch flush with the bottom
//! edge, moving upward with a small horizontal drift.

use glam::Vec2;
use rand::Rng;

use super::entity::{Bomb, Fruit, Kinematics};
use super::state::GameState;
use crate::settings::Settings;
use crate::sprites::{Sprite, SpriteCatalog};

/// Run both per-tick spawn decisions. They are independent: both, either,
/// or neither may fire on the same tick.
pub fn run(state: &mut GameState, settings: &Settings, catalog: &SpriteCatalog) {
    // random_bool rejects probabilities outside [0, 1]
    if state.rng.random_bool(settings.fruit_spawn_chance.clamp(0.0, 1.0)) {
        spawn_fruit(state, settings, catalog);
    }
    if state.rng.random_bool(settings.bomb_spawn_chance.clamp(0.0, 1.0)) {
        spawn_bomb(state, settings, catalog);
    }
}

fn spawn_fruit(state: &mut GameState, settings: &Settings, catalog: &SpriteCatalog) {
    if catalog.fruits.is_empty() {
        log::warn!("no fruit art loaded, skipping fruit spawn");
        return;
    }
    let kind = state.rng.random_range(0..catalog.fruits.len());
    let body = launch(state, settings, &catalog.fruits[kind].whole);
    state.fruits.push(Fruit::new(kind, body));
}

fn spawn_bomb(state: &mut GameState, settings: &Settings, catalog: &SpriteCatalog) {
    // A missing bomb image degrades the round to fruit-only rather than
    // failing it.
    let Some(sprite) = &catalog.bomb else {
        log::debug!("no bomb art loaded, skipping bomb spawn");
        return;
    };
    let body = launch(state, settings, sprite);
    state.bombs.push(Bomb::new(body));
}

/// Bottom-edge launch kinematics shared by both entity types.
fn launch(state: &mut GameState, settings: &Settings, sprite: &Sprite) -> Kinematics {
    // The x range degenerates when the panel is narrower than the sprite;
    // clamping the span to 1 keeps the sampler in-range (x falls back to
    // just inside the left edge).
    let span = (settings.panel_width - sprite.width).max(1.0);
    let x = state.rng.random::<f32>() * span;
    let y = settings.panel_height - sprite.height;

    let drift = settings.launch_drift_max;
    let vel_x = state.rng.random::<f32>() * 2.0 * drift - drift;
    let speed_span = settings.launch_speed_max - settings.launch_speed_min;
    let vel_y = -(settings.launch_speed_min + state.rng.random::<f32>() * speed_span);

    Kinematics::new(Vec2::new(x, y), Vec2::new(vel_x, vel_y), sprite.size())
}
