//! Held-key input handler for terminal environments.
//!
//! Left/right act once on press and then repeat while held, one repeat each
//! time the held time strictly exceeds the repeat interval. Down is a held
//! soft-drop switch: it reports `SoftDropOn` once and `SoftDropOff` on release.
//!
//! Many terminals never report key releases. A held key is considered released
//! once no press for it arrived within the release timeout; all timing is
//! driven by [`InputHandler::update`], so the handler is deterministic.

use crossterm::event::KeyCode;

use arrayvec::ArrayVec;

use crate::types::{GameAction, KEY_REPEAT_MS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalDirection {
    Left,
    Right,
    None,
}

/// Tracks held keys and emits repeats.
#[derive(Debug, Clone)]
pub struct InputHandler {
    horizontal: HorizontalDirection,
    down_held: bool,
    repeat_timer_ms: u32,
    idle_ms: u32,
    repeat_ms: u32,
    key_release_timeout_ms: u32,
}

// Shorter than the repeat interval, so a single tap never repeats.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 120;

fn is_left(code: KeyCode) -> bool {
    matches!(code, KeyCode::Left | KeyCode::Char('a' | 'A' | 'h' | 'H'))
}

fn is_right(code: KeyCode) -> bool {
    matches!(code, KeyCode::Right | KeyCode::Char('d' | 'D' | 'l' | 'L'))
}

fn is_down(code: KeyCode) -> bool {
    matches!(code, KeyCode::Down | KeyCode::Char('s' | 'S' | 'j' | 'J'))
}

impl InputHandler {
    pub fn new() -> Self {
        Self::with_repeat_ms(KEY_REPEAT_MS)
    }

    pub fn with_repeat_ms(repeat_ms: u32) -> Self {
        Self {
            horizontal: HorizontalDirection::None,
            down_held: false,
            repeat_timer_ms: 0,
            idle_ms: 0,
            repeat_ms,
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn horizontal(&self) -> HorizontalDirection {
        self.horizontal
    }

    pub fn down_held(&self) -> bool {
        self.down_held
    }

    /// Returns the action for a fresh press; repeated presses of a held key
    /// only keep it alive.
    pub fn handle_key_press(&mut self, code: KeyCode) -> Option<GameAction> {
        let (direction, action) = if is_left(code) {
            (HorizontalDirection::Left, GameAction::MoveLeft)
        } else if is_right(code) {
            (HorizontalDirection::Right, GameAction::MoveRight)
        } else if is_down(code) {
            self.idle_ms = 0;
            if self.down_held {
                return None;
            }
            self.down_held = true;
            return Some(GameAction::SoftDropOn);
        } else {
            return None;
        };

        self.idle_ms = 0;
        if self.horizontal == direction {
            return None;
        }
        self.horizontal = direction;
        self.repeat_timer_ms = 0;
        Some(action)
    }

    pub fn handle_key_release(&mut self, code: KeyCode) -> Option<GameAction> {
        if (is_left(code) && self.horizontal == HorizontalDirection::Left)
            || (is_right(code) && self.horizontal == HorizontalDirection::Right)
        {
            self.horizontal = HorizontalDirection::None;
            self.repeat_timer_ms = 0;
            return None;
        }
        if is_down(code) && self.down_held {
            self.down_held = false;
            return Some(GameAction::SoftDropOff);
        }
        None
    }

    pub fn update(&mut self, elapsed_ms: u32) -> ArrayVec<GameAction, 8> {
        let mut actions = ArrayVec::<GameAction, 8>::new();

        // Auto-release when the terminal does not emit release events.
        self.idle_ms = self.idle_ms.saturating_add(elapsed_ms);
        if self.idle_ms > self.key_release_timeout_ms {
            self.horizontal = HorizontalDirection::None;
            self.repeat_timer_ms = 0;
            if self.down_held {
                self.down_held = false;
                let _ = actions.try_push(GameAction::SoftDropOff);
            }
        }

        let repeat = match self.horizontal {
            HorizontalDirection::Left => Some(GameAction::MoveLeft),
            HorizontalDirection::Right => Some(GameAction::MoveRight),
            HorizontalDirection::None => None,
        };
        if let Some(action) = repeat {
            self.repeat_timer_ms = self.repeat_timer_ms.saturating_add(elapsed_ms);
            if self.repeat_timer_ms > self.repeat_ms {
                self.repeat_timer_ms = 0;
                let _ = actions.try_push(action);
            }
        }

        actions
    }

    /// Forget held keys, e.g. when the game is paused.
    pub fn reset(&mut self) {
        self.horizontal = HorizontalDirection::None;
        self.down_held = false;
        self.repeat_timer_ms = 0;
        self.idle_ms = 0;
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_acts_immediately_then_repeats_strictly_after_interval() {
        let mut ih = InputHandler::new().with_key_release_timeout_ms(10_000);

        assert_eq!(ih.handle_key_press(KeyCode::Left), Some(GameAction::MoveLeft));

        assert!(ih.update(100).is_empty());
        // Exactly at the interval: nothing yet.
        assert!(ih.update(35).is_empty());
        assert_eq!(ih.update(1).as_slice(), &[GameAction::MoveLeft]);

        // Timer restarts after each repeat.
        assert!(ih.update(135).is_empty());
        assert_eq!(ih.update(1).as_slice(), &[GameAction::MoveLeft]);
    }

    #[test]
    fn test_repeated_press_of_held_key_is_swallowed() {
        let mut ih = InputHandler::new();
        assert_eq!(ih.handle_key_press(KeyCode::Right), Some(GameAction::MoveRight));
        assert_eq!(ih.handle_key_press(KeyCode::Right), None);
        assert_eq!(ih.handle_key_press(KeyCode::Left), Some(GameAction::MoveLeft));
    }

    #[test]
    fn test_soft_drop_is_held_switch() {
        let mut ih = InputHandler::new().with_key_release_timeout_ms(10_000);
        assert_eq!(ih.handle_key_press(KeyCode::Down), Some(GameAction::SoftDropOn));
        assert_eq!(ih.handle_key_press(KeyCode::Down), None);
        assert!(ih.update(500).is_empty());
        assert_eq!(ih.handle_key_release(KeyCode::Down), Some(GameAction::SoftDropOff));
        assert_eq!(ih.handle_key_release(KeyCode::Down), None);
    }

    #[test]
    fn test_auto_release_without_release_events() {
        let mut ih = InputHandler::new().with_key_release_timeout_ms(50);

        ih.handle_key_press(KeyCode::Left);
        ih.handle_key_press(KeyCode::Down);
        assert!(ih.update(50).is_empty());

        let actions = ih.update(1);
        assert_eq!(actions.as_slice(), &[GameAction::SoftDropOff]);
        assert_eq!(ih.horizontal(), HorizontalDirection::None);
        assert!(!ih.down_held());
    }

    #[test]
    fn test_default_tap_never_repeats() {
        let mut ih = InputHandler::new();
        assert_eq!(ih.handle_key_press(KeyCode::Left), Some(GameAction::MoveLeft));
        for _ in 0..100 {
            assert!(ih.update(5).is_empty());
        }
    }

    #[test]
    fn test_reset_stops_repeats() {
        let mut ih = InputHandler::new().with_key_release_timeout_ms(10_000);
        ih.handle_key_press(KeyCode::Left);
        assert!(!ih.update(200).is_empty());
        ih.reset();
        assert!(ih.update(200).is_empty());
    }
}
