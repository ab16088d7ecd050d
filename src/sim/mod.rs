//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed-interval ticks only, driven by one external clock
//! - Seeded RNG only
//! - Insertion-ordered entity collections
//! - No rendering or platform dependencies

pub mod entity;
pub mod round;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod timer;

pub use entity::{Bomb, Fruit, Kinematics};
pub use round::{Round, Scene};
pub use state::{Explosion, GameEvent, GamePhase, GameState};
pub use tick::{TickInput, countdown_tick, explosion_tick, process_drag, tick};
pub use timer::IntervalTimer;
