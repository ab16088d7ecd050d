//! Round state and core simulation types

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Bomb, Fruit};

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// No round in progress (menu)
    Idle,
    /// Active gameplay
    Playing,
    /// A bomb was hit; the explosion animation is playing out
    Exploding,
    /// Countdown reached zero with no bomb hit
    Won,
    /// Explosion finished
    Lost,
}

/// Events emitted by the simulation for external collaborators
/// (renderer effects, audio cues, the score sink).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    FruitSliced { kind: usize, at: Vec2, score: u32 },
    BombHit { at: Vec2 },
    RoundWon { score: u32 },
    RoundLost { score: u32 },
}

/// Explosion overlay: one frame advanced per animation tick, drawn at a
/// fixed position centered over the bomb that was hit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Explosion {
    pub pos: Vec2,
    pub frame: usize,
}

/// Complete per-round simulation state.
///
/// One instance exists per active round; a new round starts from a fresh
/// `GameState` so score and clock always begin at their initial values.
#[derive(Debug, Clone)]
pub struct GameState {
    /// Round seed for reproducibility
    pub seed: u64,
    pub score: u32,
    /// Seconds left on the round clock
    pub time_remaining: u32,
    pub phase: GamePhase,
    /// Live fruits, insertion-ordered
    pub fruits: Vec<Fruit>,
    /// Live bombs, insertion-ordered
    pub bombs: Vec<Bomb>,
    pub explosion: Option<Explosion>,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Pending events, drained by the embedder
    pub(crate) events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Fresh round state: empty play field, full clock, zero score.
    pub fn new(seed: u64, round_duration_secs: u32) -> Self {
        Self {
            seed,
            score: 0,
            time_remaining: round_duration_secs,
            phase: GamePhase::Playing,
            fruits: Vec::new(),
            bombs: Vec::new(),
            explosion: None,
            time_ticks: 0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// True once a bomb has been hit. Set exactly once per round and never
    /// cleared; winning leaves it false.
    pub fn game_over(&self) -> bool {
        matches!(self.phase, GamePhase::Exploding | GamePhase::Lost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_round_state() {
        let state = GameState::new(7, 60);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.time_remaining, 60);
        assert!(state.fruits.is_empty());
        assert!(state.bombs.is_empty());
        assert!(state.explosion.is_none());
        assert!(!state.game_over());
    }

    #[test]
    fn test_game_over_phases() {
        let mut state = GameState::new(7, 60);
        state.phase = GamePhase::Exploding;
        assert!(state.game_over());
        state.phase = GamePhase::Lost;
        assert!(state.game_over());
        state.phase = GamePhase::Won;
        assert!(!state.game_over());
    }
}
