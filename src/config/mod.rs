pub mod display;
pub mod gameplay;
pub mod loader;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Settings read from `config.toml`. Missing sections fall back to defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub gameplay: gameplay::GameplayConfig,
    pub display: display::DisplayConfig,
    pub high_scores: HighScoreConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighScoreConfig {
    // Overrides the platform data directory when set
    pub path: Option<PathBuf>,
}
