//! Runtime settings for the demo driver
//!
//! Loaded from an optional JSON file; every field has a default.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::sim::GameEngine;

/// Driver settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fixed RNG seed; random when absent
    pub seed: Option<u64>,
    /// Where the leaderboard is kept
    pub high_scores_path: PathBuf,
    /// Name recorded with new high scores
    pub player_name: String,
    /// Stop the demo after this many frames even if still alive
    pub max_frames: u64,
    /// Let the demo pilot play
    pub autopilot: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            high_scores_path: PathBuf::from("highscores.json"),
            player_name: "runner".to_string(),
            max_frames: 60 * 60 * 5,
            autopilot: true,
        }
    }
}

impl Settings {
    /// Load settings, falling back to defaults on any fault
    pub fn load(path: &Path) -> Self {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(err) => {
                log::warn!("Using default settings ({}: {err})", path.display());
                return Self::default();
            }
        };
        match serde_json::from_str(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(err) => {
                log::warn!("Using default settings ({} is malformed: {err})", path.display());
                Self::default()
            }
        }
    }

    /// Build an engine honoring the configured seed
    pub fn engine(&self) -> GameEngine {
        match self.seed {
            Some(seed) => GameEngine::with_seed(seed),
            None => GameEngine::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings: Settings = serde_json::from_str(r#"{ "seed": 7 }"#).expect("parse");
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.player_name, Settings::default().player_name);
        assert!(settings.autopilot);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("ascii-runner-no-such-settings.json");
        assert_eq!(Settings::load(&path), Settings::default());
    }

    #[test]
    fn test_seeded_engine() {
        let settings = Settings {
            seed: Some(1234),
            ..Settings::default()
        };
        assert_eq!(settings.engine().seed(), 1234);
    }
}
