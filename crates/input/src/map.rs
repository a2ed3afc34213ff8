//! Key mapping from terminal events to game actions.
//!
//! Covers the edge-triggered keys. Held keys (left, right, down) go through
//! [`InputHandler`](crate::InputHandler) first.

use crate::types::GameAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to game actions.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    match key.code {
        KeyCode::Left | KeyCode::Char('h' | 'H' | 'a' | 'A') => Some(GameAction::MoveLeft),
        KeyCode::Right | KeyCode::Char('l' | 'L' | 'd' | 'D') => Some(GameAction::MoveRight),
        KeyCode::Down | KeyCode::Char('j' | 'J' | 's' | 'S') => Some(GameAction::SoftDropOn),

        KeyCode::Up | KeyCode::Char('k' | 'K' | 'w' | 'W' | 'x' | 'X') => Some(GameAction::RotateRight),
        KeyCode::Char('z' | 'Z' | 'y' | 'Y') => Some(GameAction::RotateLeft),

        KeyCode::Char(' ') | KeyCode::Enter => Some(GameAction::Start),
        KeyCode::Char('p' | 'P') => Some(GameAction::Pause),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q' | 'Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_keys() {
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Left)), Some(GameAction::MoveLeft));
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Right)), Some(GameAction::MoveRight));
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Down)), Some(GameAction::SoftDropOn));
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Char('H'))), Some(GameAction::MoveLeft));
    }

    #[test]
    fn test_rotation_keys() {
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Up)), Some(GameAction::RotateRight));
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Char('z'))), Some(GameAction::RotateLeft));
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Char('W'))), Some(GameAction::RotateRight));
    }

    #[test]
    fn test_action_keys() {
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Char(' '))), Some(GameAction::Start));
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Char('p'))), Some(GameAction::Pause));
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Char('c'))), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::from(KeyCode::Esc)));
        assert!(should_quit(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
    }
}
