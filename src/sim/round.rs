//! Round controller
//!
//! Owns the per-round state, the three interval timers, and the pointer
//! queue. Everything is driven from a single external clock through
//! `advance`, preserving the one-mutator-at-a-time model: simulation ticks,
//! countdown ticks, explosion frames, and drag samples interleave but never
//! run concurrently.

use std::mem;

use glam::Vec2;

use super::entity::{Bomb, Fruit};
use super::state::{GameEvent, GamePhase, GameState};
use super::tick::{TickInput, countdown_tick, explosion_tick, tick};
use super::timer::IntervalTimer;
use crate::settings::Settings;
use crate::sprites::{Sprite, SpriteCatalog};

/// One play session, from start to a Won or Lost terminal transition.
#[derive(Debug, Clone)]
pub struct Round {
    state: GameState,
    settings: Settings,
    catalog: SpriteCatalog,
    sim_timer: IntervalTimer,
    countdown_timer: IntervalTimer,
    explosion_timer: IntervalTimer,
    drag_queue: Vec<Vec2>,
    redraw: bool,
}

/// Borrowed view of everything the renderer draws, back to front:
/// fruits, then bombs, then the explosion overlay.
#[derive(Debug)]
pub struct Scene<'a> {
    pub fruits: &'a [Fruit],
    pub bombs: &'a [Bomb],
    /// Active explosion frame and its top-left position
    pub explosion: Option<(&'a Sprite, Vec2)>,
}

impl Round {
    /// Start a fresh round: score and clock at their initial values, the
    /// simulation and countdown timers running.
    pub fn new(settings: Settings, catalog: SpriteCatalog, seed: u64) -> Self {
        let mut sim_timer = IntervalTimer::new(settings.sim_tick_ms);
        let mut countdown_timer = IntervalTimer::new(settings.countdown_tick_ms);
        let explosion_timer = IntervalTimer::new(settings.explosion_tick_ms);
        sim_timer.start();
        countdown_timer.start();
        log::info!(
            "round start: seed {seed}, {}s on the clock",
            settings.round_duration_secs
        );
        Self {
            state: GameState::new(seed, settings.round_duration_secs),
            settings,
            catalog,
            sim_timer,
            countdown_timer,
            explosion_timer,
            drag_queue: Vec::new(),
            redraw: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn time_remaining(&self) -> u32 {
        self.state.time_remaining
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn catalog(&self) -> &SpriteCatalog {
        &self.catalog
    }

    /// Queue a pointer-drag sample in panel-local coordinates. Samples are
    /// tested against the live entities on the next simulation tick, in
    /// arrival order. Ignored once the round is no longer playing.
    pub fn pointer_drag(&mut self, sample: Vec2) {
        if self.state.phase == GamePhase::Playing {
            self.drag_queue.push(sample);
        }
    }

    /// Advance all round clocks by `elapsed_ms` of wall time.
    ///
    /// Fires due simulation ticks first, then countdown ticks, then
    /// explosion frames; timers that stop mid-advance fire no further.
    pub fn advance(&mut self, elapsed_ms: u32) {
        let sim_fires = self.sim_timer.advance(elapsed_ms);
        for _ in 0..sim_fires {
            if self.state.phase != GamePhase::Playing {
                break;
            }
            let input = TickInput {
                drags: mem::take(&mut self.drag_queue),
            };
            tick(&mut self.state, &input, &self.settings, &self.catalog);
            self.redraw = true;
            if self.state.game_over() {
                // The simulation and countdown halt before the explosion
                // animation starts.
                self.sim_timer.stop();
                self.countdown_timer.stop();
                self.explosion_timer.start();
            }
        }
        if self.state.phase != GamePhase::Playing {
            self.drag_queue.clear();
        }

        let countdown_fires = self.countdown_timer.advance(elapsed_ms);
        for _ in 0..countdown_fires {
            countdown_tick(&mut self.state);
            if self.state.time_remaining == 0 {
                // The countdown stops itself at zero; reaching it without
                // a bomb hit is the win transition.
                self.countdown_timer.stop();
                if !self.state.game_over() {
                    self.finish_won();
                }
                break;
            }
        }

        let explosion_fires = self.explosion_timer.advance(elapsed_ms);
        for _ in 0..explosion_fires {
            if self.state.phase != GamePhase::Exploding {
                break;
            }
            if explosion_tick(&mut self.state, self.catalog.explosion.len()) {
                self.finish_lost();
                break;
            }
            self.redraw = true;
        }
    }

    /// Play again: the next round with the same tuning and art, reseeded,
    /// score and clock back at their initial values.
    pub fn restart(&self, seed: u64) -> Round {
        Round::new(self.settings.clone(), self.catalog.clone(), seed)
    }

    /// Abandon the round (menu navigation, window closed). Safe in any
    /// phase: all timers stop and the state returns to Idle.
    pub fn abort(&mut self) {
        self.stop_all_timers();
        self.state.phase = GamePhase::Idle;
    }

    /// Every terminal path calls this without tracking which timers are
    /// still running; stop is idempotent.
    fn stop_all_timers(&mut self) {
        self.sim_timer.stop();
        self.countdown_timer.stop();
        self.explosion_timer.stop();
    }

    fn finish_won(&mut self) {
        self.stop_all_timers();
        self.state.phase = GamePhase::Won;
        let score = self.state.score;
        self.state.events.push(GameEvent::RoundWon { score });
        log::info!("round won, final score {score}");
    }

    fn finish_lost(&mut self) {
        self.stop_all_timers();
        self.state.phase = GamePhase::Lost;
        self.state.explosion = None;
        let score = self.state.score;
        self.state.events.push(GameEvent::RoundLost { score });
        log::info!("round lost, final score {score}");
    }

    /// True when a simulation or explosion tick has requested a redraw
    /// that has not been consumed yet. Reading clears the flag.
    pub fn take_redraw(&mut self) -> bool {
        mem::take(&mut self.redraw)
    }

    /// Drain pending events for external collaborators.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        mem::take(&mut self.state.events)
    }

    /// Everything the renderer needs for one frame.
    pub fn scene(&self) -> Scene<'_> {
        let explosion = self
            .state
            .explosion
            .as_ref()
            .and_then(|e| self.catalog.explosion.get(e.frame).map(|s| (s, e.pos)));
        Scene {
            fruits: &self.state.fruits,
            bombs: &self.state.bombs,
            explosion,
        }
    }

    /// Final score once a terminal phase is reached.
    pub fn final_score(&self) -> Option<u32> {
        matches!(self.state.phase, GamePhase::Won | GamePhase::Lost).then_some(self.state.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::Kinematics;

    fn quiet_settings() -> Settings {
        Settings {
            fruit_spawn_chance: 0.0,
            bomb_spawn_chance: 0.0,
            ..Settings::default()
        }
    }

    fn quiet_round() -> Round {
        Round::new(quiet_settings(), SpriteCatalog::standard(), 7)
    }

    fn push_fruit(round: &mut Round, x: f32, y: f32) {
        round.state.fruits.push(Fruit::new(
            0,
            Kinematics::new(Vec2::new(x, y), Vec2::ZERO, Vec2::new(50.0, 50.0)),
        ));
    }

    fn push_bomb(round: &mut Round, x: f32, y: f32) {
        round.state.bombs.push(Bomb::new(Kinematics::new(
            Vec2::new(x, y),
            Vec2::ZERO,
            Vec2::new(80.0, 80.0),
        )));
    }

    #[test]
    fn test_round_starts_fresh() {
        let round = quiet_round();
        assert_eq!(round.phase(), GamePhase::Playing);
        assert_eq!(round.score(), 0);
        assert_eq!(round.time_remaining(), 60);
    }

    #[test]
    fn test_slice_then_bomb_then_replay() {
        let mut round = quiet_round();
        push_fruit(&mut round, 100.0, 200.0);

        round.pointer_drag(Vec2::new(110.0, 210.0));
        round.advance(20);
        assert_eq!(round.score(), 10);

        push_bomb(&mut round, 300.0, 300.0);
        round.pointer_drag(Vec2::new(320.0, 320.0));
        round.advance(20);
        assert!(round.state().game_over());
        assert_eq!(round.phase(), GamePhase::Exploding);

        // Replayed slice input after the bomb hit changes nothing
        push_fruit(&mut round, 100.0, 200.0);
        round.pointer_drag(Vec2::new(110.0, 210.0));
        round.advance(200);
        assert_eq!(round.score(), 10);

        // The countdown is stopped too: minutes of wall time change nothing
        let remaining = round.time_remaining();
        round.advance(120_000);
        assert_eq!(round.time_remaining(), remaining);
    }

    #[test]
    fn test_explosion_gates_the_loss() {
        let mut round = quiet_round();
        push_bomb(&mut round, 100.0, 100.0);
        round.pointer_drag(Vec2::new(120.0, 120.0));
        round.advance(20);
        assert_eq!(round.phase(), GamePhase::Exploding);
        assert!(round.final_score().is_none());

        // 16 frames at 10 ms each
        round.advance(5 * 10);
        assert_eq!(round.phase(), GamePhase::Exploding);
        round.advance(11 * 10);
        assert_eq!(round.phase(), GamePhase::Lost);
        assert_eq!(round.final_score(), Some(0));
        assert!(
            round
                .take_events()
                .iter()
                .any(|e| matches!(e, GameEvent::RoundLost { score: 0 }))
        );
    }

    #[test]
    fn test_countdown_win() {
        let mut round = quiet_round();
        push_fruit(&mut round, 100.0, 200.0);
        round.pointer_drag(Vec2::new(110.0, 210.0));
        round.advance(20);
        assert_eq!(round.score(), 10);

        // Run the full minute out
        round.advance(60_000);
        assert_eq!(round.phase(), GamePhase::Won);
        assert_eq!(round.time_remaining(), 0);
        assert_eq!(round.final_score(), Some(10));

        // Post-transition input is ignored
        push_fruit(&mut round, 100.0, 200.0);
        round.pointer_drag(Vec2::new(110.0, 210.0));
        round.advance(1_000);
        assert_eq!(round.score(), 10);
        assert!(
            round
                .take_events()
                .iter()
                .any(|e| matches!(e, GameEvent::RoundWon { score: 10 }))
        );
    }

    #[test]
    fn test_simulation_halts_on_game_over_before_explosion() {
        let mut round = quiet_round();
        push_bomb(&mut round, 100.0, 100.0);
        push_fruit(&mut round, 300.0, 300.0);
        round.pointer_drag(Vec2::new(120.0, 120.0));

        // One advance long enough for many simulation ticks: only the tick
        // that landed the hit may run, so the fruit must not have moved.
        round.advance(400);
        assert_eq!(round.state().fruits[0].body.pos, Vec2::new(300.0, 300.0));
    }

    #[test]
    fn test_redraw_once_per_tick() {
        let mut round = quiet_round();
        assert!(!round.take_redraw());
        round.advance(20);
        assert!(round.take_redraw());
        assert!(!round.take_redraw());
        round.advance(10); // not a full tick yet
        assert!(!round.take_redraw());
    }

    #[test]
    fn test_abort_is_idempotent() {
        let mut round = quiet_round();
        round.abort();
        assert_eq!(round.phase(), GamePhase::Idle);
        round.abort(); // stopping stopped timers is fine
        assert_eq!(round.phase(), GamePhase::Idle);

        // Nothing moves after an abort
        push_fruit(&mut round, 100.0, 200.0);
        round.advance(1_000);
        assert_eq!(round.state().fruits[0].body.pos, Vec2::new(100.0, 200.0));
        assert_eq!(round.time_remaining(), 60);
    }

    #[test]
    fn test_restart_resets_score_and_clock() {
        let mut round = quiet_round();
        push_fruit(&mut round, 100.0, 200.0);
        round.pointer_drag(Vec2::new(110.0, 210.0));
        round.advance(20);
        round.advance(60_000);
        assert_eq!(round.phase(), GamePhase::Won);
        assert_eq!(round.score(), 10);

        let next = round.restart(8);
        assert_eq!(next.phase(), GamePhase::Playing);
        assert_eq!(next.score(), 0);
        assert_eq!(next.time_remaining(), 60);
        assert!(next.state().fruits.is_empty());
    }

    #[test]
    fn test_scene_exposes_explosion_frame() {
        let mut round = quiet_round();
        push_bomb(&mut round, 100.0, 100.0);
        round.pointer_drag(Vec2::new(120.0, 120.0));
        round.advance(20);

        let scene = round.scene();
        assert!(scene.bombs.is_empty());
        let (sprite, _) = scene.explosion.expect("overlay active");
        assert_eq!(sprite.size(), round.catalog().explosion[0].size());
    }

    #[test]
    fn test_identical_seeds_play_identical_rounds() {
        let settings = Settings::default();
        let catalog = SpriteCatalog::standard();
        let mut a = Round::new(settings.clone(), catalog.clone(), 99);
        let mut b = Round::new(settings, catalog, 99);

        for i in 0..500u32 {
            let sample = Vec2::new((i % 480) as f32, 250.0);
            a.pointer_drag(sample);
            b.pointer_drag(sample);
            a.advance(20);
            b.advance(20);
        }
        assert_eq!(a.phase(), b.phase());
        assert_eq!(a.score(), b.score());
        assert_eq!(a.state().fruits, b.state().fruits);
        assert_eq!(a.state().bombs, b.state().bombs);
    }
}
