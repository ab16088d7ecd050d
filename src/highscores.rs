//! High score leaderboard
//!
//! One entry per player name (case-insensitive): a new round replaces the
//! player's previous score. Sorted descending, top 5 kept, persisted as
//! JSON.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 5;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub name: String,
    pub score: u32,
}

/// High score leaderboard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create an empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Record a finished round. The player's previous entry, if any, is
    /// replaced. Returns the 1-indexed rank achieved, or None when the
    /// score fell off the board.
    pub fn add_score(&mut self, name: &str, score: u32) -> Option<usize> {
        match self
            .entries
            .iter_mut()
            .find(|e| e.name.eq_ignore_ascii_case(name))
        {
            Some(existing) => existing.score = score,
            None => self.entries.push(HighScoreEntry {
                name: name.to_string(),
                score,
            }),
        }

        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(MAX_HIGH_SCORES);

        self.entries
            .iter()
            .position(|e| e.name.eq_ignore_ascii_case(name))
            .map(|i| i + 1)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    /// Load high scores from a JSON file, starting fresh when the file is
    /// missing or unreadable.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<HighScores>(&json) {
                Ok(scores) => {
                    log::info!("loaded {} high scores", scores.entries.len());
                    scores
                }
                Err(err) => {
                    log::warn!("ignoring malformed high scores {}: {err}", path.display());
                    Self::new()
                }
            },
            Err(_) => {
                log::info!("no high scores found, starting fresh");
                Self::new()
            }
        }
    }

    /// Save high scores to a JSON file.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        fs::write(path, json)
    }
}
