//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`] and tracks held
//! keys for move repeat and soft drop, including terminals without key-release
//! events.

pub mod handler;
pub mod map;

pub use tui_blockfall_types as types;

pub use handler::{HorizontalDirection, InputHandler};
pub use map::{handle_key_event, should_quit};
