#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use crate::app::App;
use crate::catalog;
use crate::components::{GameState, Phase};
use crate::game::{BOARD_HEIGHT, BOARD_WIDTH};
use crate::menu_types::{MenuOption, MenuState};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Row, Table, Wrap},
};

// Each cell is 2 characters wide and 1 tall
const CELL_WIDTH: u16 = 2;
const INFO_WIDTH: u16 = 24;

// Board border colour cycles with the level
const LEVEL_COLORS: [Color; 10] = [
    Color::Gray,
    Color::Cyan,
    Color::Green,
    Color::Yellow,
    Color::Blue,
    Color::Magenta,
    Color::LightRed,
    Color::LightGreen,
    Color::LightBlue,
    Color::Red,
];

pub fn render(f: &mut Frame, app: &mut App) {
    match app.menu.state {
        MenuState::MainMenu => render_main_menu(f, app),
        MenuState::Game => render_game(f, app),
        MenuState::NameEntry => {
            render_game(f, app);
            render_name_entry(f, app);
        }
        MenuState::HighScores => render_high_scores(f, app),
    }
}

#[must_use]
pub fn level_color(level: u32) -> Color {
    LEVEL_COLORS[(level.saturating_sub(1) as usize) % LEVEL_COLORS.len()]
}

fn render_main_menu(f: &mut Frame, app: &App) {
    let area = centered_rect(40, 50, f.area());

    let mut lines = vec![
        Line::from("BLOCKSTACK").style(Style::default().add_modifier(Modifier::BOLD)),
        Line::from(""),
    ];
    for option in MenuOption::ALL {
        let line = if option == app.menu.selected_option {
            Line::from(format!("> {} <", option.label()))
                .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        } else {
            Line::from(option.label())
        };
        lines.push(line);
    }
    lines.push(Line::from(""));
    lines.push(Line::from("↑/↓ select, Enter confirm").style(Style::default().fg(Color::DarkGray)));

    let menu = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Main Menu"));
    f.render_widget(menu, area);
}

fn render_game(f: &mut Frame, app: &mut App) {
    let board_width = BOARD_WIDTH as u16 * CELL_WIDTH + 2;
    let board_height = BOARD_HEIGHT as u16 + 2;

    if f.area().width < board_width + INFO_WIDTH || f.area().height < board_height {
        let warning = Paragraph::new(
            "Terminal too small!\nPlease resize your terminal\nto continue playing.",
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Blockstack"));
        f.render_widget(warning, centered_rect(50, 30, f.area()));
        return;
    }

    let main_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(board_width),
            Constraint::Length(INFO_WIDTH),
            Constraint::Fill(1),
        ])
        .split(f.area());

    let board_area = Rect {
        height: board_height,
        ..main_layout[0]
    };
    render_game_board(f, app, board_area);
    render_info(f, app, main_layout[1]);
}

fn render_game_board(f: &mut Frame, app: &mut App, area: Rect) {
    let (level, phase) = {
        let game_state = app.game_state();
        (game_state.level, game_state.phase)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(level_color(level)));
    let inner_area = block.inner(area);
    f.render_widget(block, area);

    if app.config.display.show_grid {
        for y in 0..BOARD_HEIGHT as u16 {
            for x in 0..BOARD_WIDTH as u16 {
                if let Some(cell) = f
                    .buffer_mut()
                    .cell_mut((inner_area.left() + x * CELL_WIDTH, inner_area.top() + y))
                {
                    cell.set_symbol("·");
                    cell.set_fg(Color::DarkGray);
                }
            }
        }
    }

    for ((x, y), sprite) in app.get_render_blocks() {
        if x < 0 || y < 0 || x >= BOARD_WIDTH as i32 || y >= BOARD_HEIGHT as i32 {
            continue;
        }
        let color = app.config.display.sprite_color(sprite);
        let block_x = inner_area.left() + x as u16 * CELL_WIDTH;
        let block_y = inner_area.top() + y as u16;

        for dx in 0..CELL_WIDTH {
            if let Some(cell) = f.buffer_mut().cell_mut((block_x + dx, block_y)) {
                cell.set_symbol("█");
                cell.set_fg(color);
                cell.set_bg(Color::Black);
            }
        }
    }

    let overlay = match phase {
        Phase::Paused => Some(("PAUSED", Color::White)),
        Phase::Over => Some(("GAME OVER!", Color::Red)),
        Phase::NotStarted | Phase::Playing => None,
    };
    if let Some((text, color)) = overlay {
        let overlay_area = Rect {
            x: inner_area.x,
            y: inner_area.y + inner_area.height / 2,
            width: inner_area.width,
            height: 1,
        };
        let paragraph = Paragraph::new(text)
            .alignment(Alignment::Center)
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD));
        f.render_widget(paragraph, overlay_area);
    }
}

fn render_info(f: &mut Frame, app: &App, area: Rect) {
    let info_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Stats
            Constraint::Length(6), // Next piece
            Constraint::Min(5),    // Status and controls
        ])
        .split(area);

    let game_state = app.game_state();
    let stats = Paragraph::new(stats_text(game_state))
        .block(Block::default().borders(Borders::ALL).title("Info"))
        .wrap(Wrap { trim: true });
    f.render_widget(stats, info_layout[0]);

    render_next_piece(f, app, info_layout[1]);

    let status = match game_state.phase {
        Phase::Over => Paragraph::new("GAME OVER!\nPress Enter to continue")
            .style(Style::default().fg(Color::Red)),
        Phase::Paused => Paragraph::new("Paused\nPress P to resume"),
        Phase::NotStarted | Phase::Playing => Paragraph::new(
            "A/←: Move left\n\
            D/→: Move right\n\
            S/↓: Drop\n\
            R/↑: Rotate\n\
            P: Pause\n\
            Q: Quit",
        ),
    };
    f.render_widget(
        status
            .block(Block::default().borders(Borders::ALL).title("Controls"))
            .wrap(Wrap { trim: true }),
        info_layout[2],
    );
}

#[must_use]
pub fn stats_text(game_state: &GameState) -> String {
    format!(
        "Mode: {}\nScore: {}\nLevel: {}\nLines: {}",
        game_state.mode, game_state.score, game_state.level, game_state.lines_cleared,
    )
}

pub fn render_next_piece(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Next");
    let inner_area = block.inner(area);
    f.render_widget(block, area);

    let Some(next) = app.next_piece() else {
        return;
    };
    let color = app.config.display.sprite_color(next.sprite);

    for &(col, row) in catalog::cells(next.kind, 0) {
        // The top row of every spawn frame is empty
        let x = inner_area.left() + col as u16 * CELL_WIDTH;
        let y = inner_area.top() + (row as u16).saturating_sub(1);
        if x + 1 >= inner_area.right() || y >= inner_area.bottom() {
            continue;
        }
        for dx in 0..CELL_WIDTH {
            if let Some(cell) = f.buffer_mut().cell_mut((x + dx, y)) {
                cell.set_symbol("█");
                cell.set_fg(color);
            }
        }
    }
}

fn render_name_entry(f: &mut Frame, app: &App) {
    let area = centered_rect(50, 30, f.area());
    let score = app.pending_score.map_or(0, |s| s.score);

    let mut lines = vec![
        Line::from(format!("Score: {score}")),
        Line::from("Enter your name:"),
        Line::from(format!("{}_", app.name_input))
            .style(Style::default().fg(Color::Yellow)),
    ];
    if let Some(err) = &app.name_error {
        lines.push(Line::from(err.to_string()).style(Style::default().fg(Color::Red)));
    }
    lines.push(Line::from("Enter: save  Esc: skip").style(Style::default().fg(Color::DarkGray)));

    let dialog = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Game over!"));
    f.render_widget(Clear, area);
    f.render_widget(dialog, area);
}

fn render_high_scores(f: &mut Frame, app: &App) {
    let area = centered_rect(70, 70, f.area());

    let rows = app
        .high_scores
        .entries()
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let row = Row::new(vec![
                format!("{}", i + 1),
                entry.name.clone(),
                entry.score.to_string(),
                entry.level.to_string(),
                entry.mode.to_string(),
            ]);
            if app.last_rank == Some(i) {
                row.style(Style::default().fg(Color::Yellow))
            } else {
                row
            }
        });

    let table = Table::new(
        rows,
        [
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(8),
            Constraint::Length(6),
            Constraint::Length(9),
        ],
    )
    .header(
        Row::new(vec!["#", "Name", "Score", "Level", "Mode"])
            .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("High Scores (Enter to return)"),
    );
    f.render_widget(table, area);
}

/// Helper function to create a centered rect using up certain percentage of the available rect
#[must_use]
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
