#![warn(clippy::all, clippy::pedantic)]

// Playfield dimensions
pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 20;

// Number of block sprites; a placed cell always holds an id below this
pub const SPRITE_COUNT: u8 = 7;

// Spawn anchor: the 4x4 box is centred and starts above the visible grid
pub const SPAWN_COLUMN: i32 = BOARD_WIDTH as i32 / 2 - 2;
pub const SPAWN_ROW: i32 = -2;

// Scoring and level progression
pub const POINTS_PER_LINE: u32 = 10;
pub const LINES_PER_LEVEL: u32 = 10;
pub const STARTING_LEVEL: u32 = 1;

// Fall cadence, in milliseconds
pub const INITIAL_FALL_INTERVAL_MS: u64 = 400;
pub const MIN_FALL_INTERVAL_MS: u64 = 50;
pub const FALL_INTERVAL_STEP_MS: u64 = 50;

// High score table
pub const HIGH_SCORE_CAPACITY: usize = 10;
pub const MAX_NAME_LENGTH: usize = 20;
