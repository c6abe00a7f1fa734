#![warn(clippy::all, clippy::pedantic)]

use bevy_ecs::prelude::*;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use log::{debug, error, info, warn};
use std::error;
use std::path::PathBuf;
use std::time::Duration;

use crate::components::{
    ActivePiece, Board, Command, FinalScore, GameMode, GameState, Phase, SpriteId,
};
use crate::config::Config;
use crate::game::MAX_NAME_LENGTH;
use crate::input;
use crate::menu_types::{Menu, MenuOption, MenuState};
use crate::provider::PieceSource;
use crate::scores::{self, HighScoreTable, NameError, ScoreEntry};
use crate::systems;

pub type AppResult<T> = std::result::Result<T, Box<dyn error::Error>>;

/// Front-end context: the session world plus menus and the score table.
pub struct App {
    pub world: World,
    pub should_quit: bool,
    pub menu: Menu,
    pub config: Config,
    pub high_scores: HighScoreTable,
    // No path means the table lives in memory only
    pub scores_path: Option<PathBuf>,
    pub name_input: String,
    pub name_error: Option<NameError>,
    pub pending_score: Option<FinalScore>,
    pub last_rank: Option<usize>,
}

impl App {
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self::with_provider(config, PieceSource::default())
    }

    #[must_use]
    pub fn with_provider(config: Config, source: PieceSource) -> Self {
        let mut world = World::new();
        systems::init_session_world(&mut world, config.gameplay.rules(), source);

        Self {
            world,
            should_quit: false,
            menu: Menu::new(),
            config,
            high_scores: HighScoreTable::seeded(),
            scores_path: None,
            name_input: String::new(),
            name_error: None,
            pending_score: None,
            last_rank: None,
        }
    }

    /// Backs the score table with a file. A file that cannot be read leaves
    /// the seeded table in place.
    #[must_use]
    pub fn with_score_store(mut self) -> Self {
        let path = scores::scores_file_path(self.config.high_scores.path.as_deref());
        match HighScoreTable::load(&path) {
            Ok(table) => {
                info!("Loaded high scores from {}", path.display());
                self.high_scores = table;
            }
            Err(e) => warn!("Could not load high scores: {e:#}"),
        }
        self.scores_path = Some(path);
        self
    }

    pub fn start_game(&mut self, mode: GameMode) {
        systems::start_session(&mut self.world, mode);
        self.pending_score = None;
        self.last_rank = None;
        self.menu.state = MenuState::Game;
    }

    /// Dispatches a terminal event according to the current screen.
    pub fn handle_event(&mut self, event: &Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) if self.menu.state == MenuState::Game => {
                if let Some(command) = input::command_for_mouse(mouse) {
                    self.handle_command(command);
                }
            }
            _ => {}
        }
    }

    pub fn handle_key(&mut self, key: &KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }
        debug!("Key event: {key:?}");

        match self.menu.state {
            MenuState::MainMenu => match key.code {
                KeyCode::Up | KeyCode::Char('w') => {
                    self.menu.selected_option = self.menu.selected_option.prev();
                }
                KeyCode::Down | KeyCode::Char('s') => {
                    self.menu.selected_option = self.menu.selected_option.next();
                }
                KeyCode::Enter | KeyCode::Char(' ') => self.select_menu_option(),
                KeyCode::Esc | KeyCode::Char('q') => self.should_quit = true,
                _ => {}
            },
            MenuState::Game => {
                if key.code == KeyCode::Enter && self.game_state().phase == Phase::Over {
                    self.acknowledge_game_over();
                } else if let Some(command) = input::command_for_key(key) {
                    self.handle_command(command);
                }
            }
            MenuState::NameEntry => match key.code {
                KeyCode::Enter => {
                    if let Err(e) = self.submit_name() {
                        debug!("Rejected name: {e}");
                    }
                }
                KeyCode::Esc => self.cancel_name_entry(),
                KeyCode::Backspace => self.pop_name_char(),
                KeyCode::Char(c) => self.push_name_char(c),
                _ => {}
            },
            MenuState::HighScores => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q')) {
                    self.menu.state = MenuState::MainMenu;
                }
            }
        }
    }

    fn select_menu_option(&mut self) {
        match self.menu.selected_option {
            MenuOption::Classic => self.start_game(GameMode::Classic),
            MenuOption::Hardcore => self.start_game(GameMode::Hardcore),
            MenuOption::HighScores => self.menu.state = MenuState::HighScores,
            MenuOption::Quit => self.should_quit = true,
        }
    }

    /// Routes a player command to the session while the game screen is up.
    pub fn handle_command(&mut self, command: Command) {
        if self.menu.state != MenuState::Game {
            return;
        }

        if command == Command::Quit {
            // A finished game still offers its score to the table
            if self.game_state().phase == Phase::Over {
                self.acknowledge_game_over();
                return;
            }
            systems::apply_command(&mut self.world, command);
            self.pending_score = None;
            self.menu.state = MenuState::MainMenu;
            return;
        }

        systems::apply_command(&mut self.world, command);
    }

    /// Advances the fall cadence by `delta` and collects a finished game.
    pub fn on_tick(&mut self, delta: Duration) {
        if self.menu.state != MenuState::Game {
            return;
        }

        systems::advance_cadence(&mut self.world, delta);
        for final_score in systems::take_final_scores(&mut self.world) {
            self.pending_score = Some(final_score);
        }
    }

    /// Leaves the game-over screen: name entry if the score made the table,
    /// otherwise back to the main menu.
    pub fn acknowledge_game_over(&mut self) {
        if self.game_state().phase != Phase::Over {
            return;
        }

        match self.pending_score {
            Some(final_score) if self.high_scores.qualifies(final_score.score) => {
                self.name_input = "Player".to_string();
                self.name_error = None;
                self.menu.state = MenuState::NameEntry;
            }
            _ => {
                self.pending_score = None;
                self.menu.state = MenuState::MainMenu;
            }
        }
    }

    pub fn push_name_char(&mut self, c: char) {
        if self.name_input.chars().count() <= MAX_NAME_LENGTH && !c.is_control() {
            self.name_input.push(c);
        }
        self.name_error = None;
    }

    pub fn pop_name_char(&mut self) {
        self.name_input.pop();
        self.name_error = None;
    }

    /// Records the pending score under the typed name and shows the table.
    pub fn submit_name(&mut self) -> Result<Option<usize>, NameError> {
        let name = match scores::validate_name(&self.name_input) {
            Ok(name) => name,
            Err(e) => {
                self.name_error = Some(e.clone());
                return Err(e);
            }
        };

        let rank = self
            .pending_score
            .take()
            .and_then(|final_score| {
                self.high_scores
                    .add(ScoreEntry::from_final(name, &final_score))
            });
        self.last_rank = rank;

        if let Some(path) = &self.scores_path {
            if let Err(e) = self.high_scores.save(path) {
                error!("Failed to save high scores: {e:#}");
            }
        }

        self.menu.state = MenuState::HighScores;
        Ok(rank)
    }

    /// Skips name entry; the score is not recorded.
    pub fn cancel_name_entry(&mut self) {
        self.pending_score = None;
        self.name_input.clear();
        self.name_error = None;
        self.menu.state = MenuState::MainMenu;
    }

    #[must_use]
    pub fn game_state(&self) -> &GameState {
        self.world.resource::<GameState>()
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        self.world.resource::<Board>()
    }

    #[must_use]
    pub fn next_piece(&self) -> Option<ActivePiece> {
        self.game_state().next_piece
    }

    /// Grid coordinates and colour of the falling piece.
    pub fn active_cells(&mut self) -> Option<([(i32, i32); 4], SpriteId)> {
        systems::active_piece(&mut self.world).map(|(_, piece)| (piece.absolute_cells(), piece.sprite))
    }

    /// Every visible block: placed cells first, then the falling piece.
    pub fn get_render_blocks(&mut self) -> Vec<((i32, i32), SpriteId)> {
        let mut blocks = Vec::new();

        let board = self.board();
        for (x, column) in board.cells.iter().enumerate() {
            for (y, cell) in column.iter().enumerate() {
                if let Some(sprite) = cell {
                    blocks.push(((x as i32, y as i32), *sprite));
                }
            }
        }

        if let Some((cells, sprite)) = self.active_cells() {
            blocks.extend(
                cells
                    .into_iter()
                    .filter(|&(_, y)| y >= 0)
                    .map(|position| (position, sprite)),
            );
        }

        blocks
    }
}
