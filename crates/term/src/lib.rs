//! Terminal rendering for the falling-block game.
//!
//! A small game-oriented layer on top of `crossterm`: the field is mirrored
//! into a [`PaintBuffer`] through cell notifications, composed with a
//! [`GameSnapshot`](crate::core::GameSnapshot) into a [`FrameBuffer`], and
//! flushed with diff encoding.
//!
//! Field cells are drawn 2 characters wide to roughly square them up.

pub mod fb;
pub mod game_view;
pub mod paint;
pub mod renderer;

pub use tui_blockfall_core as core;
pub use tui_blockfall_types as types;

pub use fb::{CellStyle, FrameBuffer, Glyph, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use paint::{PaintBuffer, SharedPaint};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
