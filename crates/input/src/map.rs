//! Key mapping from terminal events to game actions.

use crate::types::GameAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map a key press to a game action. Letter keys are case-insensitive.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }

    match key.code {
        KeyCode::Left => Some(GameAction::MoveLeft),
        KeyCode::Right => Some(GameAction::MoveRight),
        KeyCode::Down => Some(GameAction::SoftDrop),
        KeyCode::Up => Some(GameAction::RotateCw),
        KeyCode::Enter => Some(GameAction::Start),
        KeyCode::Char(' ') => Some(GameAction::HardDrop),
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'h' | 'a' => Some(GameAction::MoveLeft),
            'l' | 'd' => Some(GameAction::MoveRight),
            'j' | 's' => Some(GameAction::SoftDrop),
            'k' | 'w' | 'x' => Some(GameAction::RotateCw),
            'z' | 'y' => Some(GameAction::RotateCcw),
            'p' => Some(GameAction::Pause),
            'r' => Some(GameAction::Restart),
            _ => None,
        },
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => true,
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        KeyCode::Char('c') | KeyCode::Char('C') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}
