//! Data-driven game tuning
//!
//! Everything a designer might tweak in one serde struct: panel geometry,
//! tick cadences, spawn odds, gravity, and launch kinematics. Defaults are
//! the classic values; a JSON file next to the executable overrides them.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts;

/// Game tuning and geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Play-area dimensions in pixels
    pub panel_width: f32,
    pub panel_height: f32,

    /// Simulation tick period (ms)
    pub sim_tick_ms: u32,
    /// Countdown tick period (ms)
    pub countdown_tick_ms: u32,
    /// Explosion animation tick period (ms)
    pub explosion_tick_ms: u32,
    /// Round length (seconds)
    pub round_duration_secs: u32,

    /// Per-tick spawn probabilities
    pub fruit_spawn_chance: f64,
    pub bomb_spawn_chance: f64,
    /// Points per sliced fruit
    pub slice_award: u32,

    /// Downward acceleration per tick, per entity type
    pub fruit_gravity: f32,
    pub bomb_gravity: f32,
    /// Upward launch speed range (pixels/tick)
    pub launch_speed_min: f32,
    pub launch_speed_max: f32,
    /// Maximum horizontal drift at launch (pixels/tick)
    pub launch_drift_max: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            panel_width: consts::PANEL_WIDTH,
            panel_height: consts::PANEL_HEIGHT,
            sim_tick_ms: consts::SIM_TICK_MS,
            countdown_tick_ms: consts::COUNTDOWN_TICK_MS,
            explosion_tick_ms: consts::EXPLOSION_TICK_MS,
            round_duration_secs: consts::ROUND_DURATION_SECS,
            fruit_spawn_chance: consts::FRUIT_SPAWN_CHANCE,
            bomb_spawn_chance: consts::BOMB_SPAWN_CHANCE,
            slice_award: consts::SLICE_AWARD,
            fruit_gravity: consts::FRUIT_GRAVITY,
            bomb_gravity: consts::BOMB_GRAVITY,
            launch_speed_min: consts::LAUNCH_SPEED_MIN,
            launch_speed_max: consts::LAUNCH_SPEED_MAX,
            launch_drift_max: consts::LAUNCH_DRIFT_MAX,
        }
    }
}

impl Settings {
    /// Load from a JSON file, falling back to defaults when the file is
    /// missing or malformed.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("loaded settings from {}", path.display());
                    settings
                }
                Err(err) => {
                    log::warn!("ignoring malformed settings {}: {err}", path.display());
                    Self::default()
                }
            },
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::info!("no settings file at {}, using defaults", path.display());
                Self::default()
            }
            Err(err) => {
                log::warn!("could not read settings {}: {err}", path.display());
                Self::default()
            }
        }
    }

    /// Write the current settings out as pretty JSON.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        fs::write(path, json)
    }
}
