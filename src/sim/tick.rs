//! Fixed-timestep simulation tick and pointer-drag processing
//!
//! `tick` advances the play field by one simulation step; `countdown_tick`
//! and `explosion_tick` are the step functions for the two slower cadences.
//! All three are pure with respect to their inputs so the round controller
//! can drive them from any clock.

use glam::Vec2;

use super::entity::Bomb;
use super::spawn;
use super::state::{Explosion, GameEvent, GamePhase, GameState};
use crate::settings::Settings;
use crate::sprites::SpriteCatalog;

/// Input for a single simulation tick: the pointer-drag samples queued
/// since the previous tick, in arrival order, panel-local coordinates.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub drags: Vec<Vec2>,
}

/// Advance the round by one simulation tick.
///
/// Order within a tick: drag samples, then spawning, then movement and
/// culling (fruits before bombs). A bomb hit ends the tick immediately:
/// nothing spawns or moves once the round is over.
pub fn tick(state: &mut GameState, input: &TickInput, settings: &Settings, catalog: &SpriteCatalog) {
    if state.phase != GamePhase::Playing {
        return;
    }
    state.time_ticks += 1;

    for &sample in &input.drags {
        process_drag(state, sample, settings, catalog);
        if state.game_over() {
            return;
        }
    }

    spawn::run(state, settings, catalog);

    let (panel_w, panel_h) = (settings.panel_width, settings.panel_height);
    for fruit in &mut state.fruits {
        fruit.update(settings.fruit_gravity);
    }
    state.fruits.retain(|f| !f.is_off_screen(panel_w, panel_h));

    for bomb in &mut state.bombs {
        bomb.update(settings.bomb_gravity);
    }
    state.bombs.retain(|b| !b.is_off_screen(panel_h));
}

/// Test one drag sample against every live entity.
///
/// Every unsliced fruit under the sample is sliced and scored exactly once;
/// the `sliced` flag keeps repeat passes over the same fruit score-neutral.
/// Bombs are scanned afterwards and the first hit wins: that bomb is
/// removed, the round is over, and the remaining bombs are not checked.
pub fn process_drag(state: &mut GameState, sample: Vec2, settings: &Settings, catalog: &SpriteCatalog) {
    if state.game_over() {
        return;
    }

    for fruit in &mut state.fruits {
        if !fruit.is_sliced() && fruit.contains(sample) {
            fruit.slice();
            state.score += settings.slice_award;
            state.events.push(GameEvent::FruitSliced {
                kind: fruit.kind,
                at: fruit.body.pos,
                score: state.score,
            });
        }
    }

    if let Some(idx) = state.bombs.iter().position(|b| b.is_hit(sample)) {
        let bomb = state.bombs.remove(idx);
        state.phase = GamePhase::Exploding;
        state.explosion = Some(Explosion {
            pos: explosion_origin(&bomb, catalog),
            frame: 0,
        });
        state.events.push(GameEvent::BombHit { at: bomb.body.pos });
        log::info!("bomb hit, score frozen at {}", state.score);
    }
}

/// Center the first explosion frame over the hit bomb.
fn explosion_origin(bomb: &Bomb, catalog: &SpriteCatalog) -> Vec2 {
    let frame_size = catalog
        .explosion
        .first()
        .map(|s| s.size())
        .unwrap_or_else(|| bomb.body.size());
    bomb.body.pos + (bomb.body.size() - frame_size) / 2.0
}

/// One countdown tick: a second off the round clock. Saturates at zero.
pub fn countdown_tick(state: &mut GameState) {
    state.time_remaining = state.time_remaining.saturating_sub(1);
}

/// One explosion-animation tick. Returns true when the frame index has
/// reached the end of the sequence and the loss can be finalized.
pub fn explosion_tick(state: &mut GameState, frame_count: usize) -> bool {
    let Some(explosion) = state.explosion.as_mut() else {
        return true;
    };
    explosion.frame += 1;
    explosion.frame >= frame_count
}
