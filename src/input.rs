use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};

use crate::components::Command;

/// Game command bound to a key press, if any.
#[must_use]
pub fn command_for_key(key: &KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    match key.code {
        KeyCode::Left | KeyCode::Char('a' | 'A') => Some(Command::MoveLeft),
        KeyCode::Right | KeyCode::Char('d' | 'D') => Some(Command::MoveRight),
        KeyCode::Down | KeyCode::Char('s' | 'S') => Some(Command::SoftDrop),
        KeyCode::Up | KeyCode::Char('r' | 'R' | ' ') => Some(Command::Rotate),
        KeyCode::Char('p' | 'P') => Some(Command::TogglePause),
        KeyCode::Esc | KeyCode::Char('q' | 'Q') => Some(Command::Quit),
        _ => None,
    }
}

/// Mouse controls: left and right buttons shift the piece, middle rotates.
#[must_use]
pub fn command_for_mouse(mouse: &MouseEvent) -> Option<Command> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(Command::MoveLeft),
        MouseEventKind::Down(MouseButton::Right) => Some(Command::MoveRight),
        MouseEventKind::Down(MouseButton::Middle) => Some(Command::Rotate),
        _ => None,
    }
}
