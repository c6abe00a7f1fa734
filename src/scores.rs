//! Persistent top-ten table.
//!
//! The store listens for the session's final score and never feeds anything
//! back into it, so a broken or unwritable file only costs the table.

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::components::{FinalScore, GameMode};
use crate::game::{HIGH_SCORE_CAPACITY, MAX_NAME_LENGTH};

pub const SCORES_ENV_VAR: &str = "BLOCKSTACK_SCORES";
const SCORES_FILE_PATH: &str = "blockstack_scores.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    pub score: u32,
    pub level: u32,
    pub mode: GameMode,
}

impl ScoreEntry {
    #[must_use]
    pub fn from_final(name: String, final_score: &FinalScore) -> Self {
        Self {
            name,
            score: final_score.score,
            level: final_score.level,
            mode: final_score.mode,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameError {
    Empty,
    TooLong,
}

impl fmt::Display for NameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameError::Empty => f.write_str("Please enter a name!"),
            NameError::TooLong => write!(
                f,
                "Your name is too long! Maximum {MAX_NAME_LENGTH} characters."
            ),
        }
    }
}

impl std::error::Error for NameError {}

/// Trims `name` and checks it fits on the table.
pub fn validate_name(name: &str) -> Result<String, NameError> {
    let name = name.trim();
    if name.is_empty() {
        Err(NameError::Empty)
    } else if name.chars().count() > MAX_NAME_LENGTH {
        Err(NameError::TooLong)
    } else {
        Ok(name.to_string())
    }
}

/// Entries sorted by descending score.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreTable {
    entries: Vec<ScoreEntry>,
}

impl HighScoreTable {
    /// The table a fresh install starts with.
    #[must_use]
    pub fn seeded() -> Self {
        let entries = (0..HIGH_SCORE_CAPACITY as u32)
            .rev()
            .map(|i| ScoreEntry {
                name: "Player".to_string(),
                score: (i + 1) * 100,
                level: i + 2,
                mode: GameMode::Classic,
            })
            .collect();
        Self { entries }
    }

    #[must_use]
    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.entries.len() >= HIGH_SCORE_CAPACITY
    }

    #[must_use]
    pub fn qualifies(&self, score: u32) -> bool {
        !self.is_full() || self.entries.last().is_some_and(|lowest| score >= lowest.score)
    }

    /// Inserts `entry` and returns its zero-based rank, or `None` when it
    /// does not make the table.
    pub fn add(&mut self, entry: ScoreEntry) -> Option<usize> {
        if !self.qualifies(entry.score) {
            return None;
        }
        if self.is_full() {
            self.entries.pop();
        }

        // After every existing entry with the same score
        let rank = self
            .entries
            .iter()
            .position(|existing| existing.score < entry.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(rank, entry);
        Some(rank)
    }

    /// Loads the table, creating a seeded file when none exists yet.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!(
                "High score file {} not found, creating a new one",
                path.display()
            );
            let table = Self::seeded();
            table.save(path)?;
            return Ok(table);
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("reading high scores from {}", path.display()))?;
        let mut table: Self = toml::from_str(&contents)
            .with_context(|| format!("parsing high scores in {}", path.display()))?;

        table.entries.sort_by(|a, b| b.score.cmp(&a.score));
        table.entries.truncate(HIGH_SCORE_CAPACITY);
        Ok(table)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
        }

        let contents = toml::to_string_pretty(self).context("serializing high scores")?;
        fs::write(path, contents)
            .with_context(|| format!("writing high scores to {}", path.display()))?;
        Ok(())
    }
}

/// Where the table lives: explicit override, env var, data dir, then cwd.
#[must_use]
pub fn scores_file_path(configured: Option<&Path>) -> PathBuf {
    if let Some(path) = configured {
        return path.to_path_buf();
    }
    if let Ok(path) = std::env::var(SCORES_ENV_VAR) {
        return PathBuf::from(path);
    }

    if let Some(data_dir) = dirs::data_dir() {
        data_dir.join("blockstack").join("scores.toml")
    } else {
        PathBuf::from(SCORES_FILE_PATH)
    }
}
