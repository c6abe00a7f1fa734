#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Board dimensions are tiny, so usize <-> i32 casts never truncate or wrap
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    // Coordinates are range-checked before being cast to usize
    clippy::cast_sign_loss
)]

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::catalog::{self, PieceKind};
use crate::game::{
    FALL_INTERVAL_STEP_MS, INITIAL_FALL_INTERVAL_MS, LINES_PER_LEVEL, MIN_FALL_INTERVAL_MS,
    POINTS_PER_LINE, SPAWN_COLUMN, SPAWN_ROW, SPRITE_COUNT, STARTING_LEVEL,
};

/// Colour of a block. Always below [`SPRITE_COUNT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpriteId(u8);

impl SpriteId {
    /// Wraps `id` into the valid sprite range.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id % SPRITE_COUNT)
    }

    #[must_use]
    pub fn random() -> Self {
        Self(fastrand::u8(0..SPRITE_COUNT))
    }

    #[must_use]
    pub fn id(self) -> u8 {
        self.0
    }
}

/// A grid cell: `None` is empty.
pub type Cell = Option<SpriteId>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameMode {
    #[default]
    Classic,
    Hardcore,
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameMode::Classic => f.write_str("Classic"),
            GameMode::Hardcore => f.write_str("Hardcore"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    NotStarted,
    Playing,
    Paused,
    Over,
}

/// Player commands produced by the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
    TogglePause,
    Quit,
}

/// The falling piece. Movement is unchecked here; the board decides.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub rotation: usize,
    pub col: i32,
    pub row: i32,
    pub sprite: SpriteId,
}

impl ActivePiece {
    #[must_use]
    pub fn spawn(kind: PieceKind, sprite: SpriteId) -> Self {
        Self {
            kind,
            rotation: 0,
            col: SPAWN_COLUMN,
            row: SPAWN_ROW,
            sprite,
        }
    }

    /// Offsets inside the 4x4 box, for the current or an overriding rotation.
    #[must_use]
    pub fn occupied_cells(&self, rotation: Option<usize>) -> [(i32, i32); 4] {
        *catalog::cells(self.kind, rotation.unwrap_or(self.rotation))
    }

    /// Grid coordinates of the solid cells at the current rotation.
    #[must_use]
    pub fn absolute_cells(&self) -> [(i32, i32); 4] {
        self.occupied_cells(None)
            .map(|(dc, dr)| (self.col + dc, self.row + dr))
    }

    pub fn translate(&mut self, d_col: i32, d_row: i32) {
        self.col += d_col;
        self.row += d_row;
    }

    pub fn set_rotation(&mut self, rotation: usize) {
        self.rotation = rotation % catalog::frame_count(self.kind);
    }

    /// Rotation index the piece would take on a rotate command, if any.
    #[must_use]
    pub fn next_rotation(&self) -> Option<usize> {
        match catalog::rotation_count(self.kind) {
            0 => None,
            count => Some((self.rotation + 1) % count),
        }
    }
}

/// A lock wrote at least one cell above the visible grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overflow;

#[derive(Resource, Debug, Clone)]
pub struct Board {
    pub width: usize,
    pub height: usize,
    pub cells: Vec<Vec<Cell>>,
}

impl Board {
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![vec![None; height]; width],
        }
    }

    pub fn reset(&mut self) {
        for column in &mut self.cells {
            column.fill(None);
        }
    }

    fn in_bounds(&self, col: i32, row: i32) -> bool {
        col >= 0 && row >= 0 && (col as usize) < self.width && (row as usize) < self.height
    }

    /// Cell at `(col, row)`, or `None` when outside the grid.
    #[must_use]
    pub fn get(&self, col: i32, row: i32) -> Option<Cell> {
        self.in_bounds(col, row)
            .then(|| self.cells[col as usize][row as usize])
    }

    /// Returns false when `(col, row)` is outside the grid.
    pub fn set(&mut self, col: i32, row: i32, cell: Cell) -> bool {
        if !self.in_bounds(col, row) {
            return false;
        }
        self.cells[col as usize][row as usize] = cell;
        true
    }

    /// Cells of one row, left to right.
    #[must_use]
    pub fn row(&self, row: usize) -> Vec<Cell> {
        self.cells.iter().map(|column| column[row]).collect()
    }

    /// Collision predicate for every move, rotation and drop.
    ///
    /// Side walls apply at any height. The floor and placed blocks only
    /// apply to cells that have entered the grid (`row >= 0`).
    #[must_use]
    pub fn can_place(&self, kind: PieceKind, rotation: usize, col: i32, row: i32) -> bool {
        let width = self.width as i32;
        let height = self.height as i32;

        catalog::cells(kind, rotation).iter().all(|&(dc, dr)| {
            let x = col + dc;
            let y = row + dr;

            if x < 0 || x >= width {
                return false;
            }
            if y < 0 {
                return true;
            }
            y < height && self.cells[x as usize][y as usize].is_none()
        })
    }

    /// Writes the piece's sprite into the grid at its current placement.
    ///
    /// Cells above the grid are skipped and reported as an [`Overflow`].
    pub fn lock(&mut self, piece: &ActivePiece) -> Result<(), Overflow> {
        let mut overflow = false;
        for (x, y) in piece.absolute_cells() {
            if y < 0 {
                overflow = true;
                continue;
            }
            self.set(x, y, Some(piece.sprite));
        }

        if overflow { Err(Overflow) } else { Ok(()) }
    }

    #[must_use]
    pub fn is_row_filled(&self, row: usize, mode: GameMode) -> bool {
        let first = self.cells[0][row];
        match mode {
            GameMode::Classic => self.cells.iter().all(|column| column[row].is_some()),
            GameMode::Hardcore => {
                first.is_some() && self.cells.iter().all(|column| column[row] == first)
            }
        }
    }

    /// Removes every qualifying row, top to bottom, and returns how many went.
    pub fn clear_filled_lines(&mut self, mode: GameMode) -> usize {
        let mut lines_cleared = 0;

        for y in 0..self.height {
            if !self.is_row_filled(y, mode) {
                continue;
            }

            for column in &mut self.cells {
                for y2 in (1..=y).rev() {
                    column[y2] = column[y2 - 1];
                }
                column[0] = None;
            }
            lines_cleared += 1;
        }

        lines_cleared
    }

    /// The top row holds a block.
    #[must_use]
    pub fn is_topped(&self) -> bool {
        self.cells.iter().any(|column| column[0].is_some())
    }
}

/// Gameplay tunables, usually taken from the config file.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct Rules {
    pub initial_fall_interval: Duration,
    pub min_fall_interval: Duration,
    pub fall_interval_step: Duration,
    pub lines_per_level: u32,
    pub points_per_line: u32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            initial_fall_interval: Duration::from_millis(INITIAL_FALL_INTERVAL_MS),
            min_fall_interval: Duration::from_millis(MIN_FALL_INTERVAL_MS),
            fall_interval_step: Duration::from_millis(FALL_INTERVAL_STEP_MS),
            lines_per_level: LINES_PER_LEVEL,
            points_per_line: POINTS_PER_LINE,
        }
    }
}

#[derive(Debug, Resource, Clone, PartialEq, Eq)]
pub struct GameState {
    pub score: u32,
    pub lines_cleared: u32,
    pub lines_to_next_level: u32,
    pub level: u32,
    pub fall_interval: Duration,
    pub mode: GameMode,
    pub phase: Phase,
    pub next_piece: Option<ActivePiece>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(&Rules::default(), GameMode::Classic)
    }
}

impl GameState {
    #[must_use]
    pub fn new(rules: &Rules, mode: GameMode) -> Self {
        Self {
            score: 0,
            lines_cleared: 0,
            lines_to_next_level: rules.lines_per_level,
            level: STARTING_LEVEL,
            fall_interval: rules.initial_fall_interval,
            mode,
            phase: Phase::NotStarted,
            next_piece: None,
        }
    }

    /// Books one cleared line. Returns the new fall interval on a level-up
    /// that sped the game up.
    pub fn record_line(&mut self, rules: &Rules) -> Option<Duration> {
        self.score += rules.points_per_line;
        self.lines_cleared += 1;
        self.lines_to_next_level = self.lines_to_next_level.saturating_sub(1);

        if self.lines_to_next_level > 0 {
            return None;
        }

        self.level += 1;
        self.lines_to_next_level = rules.lines_per_level;

        if self.fall_interval > rules.min_fall_interval {
            self.fall_interval = self
                .fall_interval
                .saturating_sub(rules.fall_interval_step)
                .max(rules.min_fall_interval);
            Some(self.fall_interval)
        } else {
            None
        }
    }
}

/// Emitted once when a session tops out.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinalScore {
    pub score: u32,
    pub level: u32,
    pub mode: GameMode,
}
