//! Core game logic module - pure, deterministic, and testable
//!
//! This crate holds the simulation: the field, the piece catalog, the row
//! collapse and the phase machine. It does no I/O. Everything a front end
//! needs arrives through observer callbacks and [`GameSnapshot`].
//!
//! # Module Structure
//!
//! - [`grid`]: locked cells with bounds-checked access
//! - [`pieces`]: templates, colors and the rotation transform
//! - [`field`]: grid merged with the piece in flight; spawn, move, rotate, lock
//! - [`collapse`]: full-row detection and the shift plan
//! - [`game_state`]: phases, timers, intents
//! - [`scoring`]: collapse points and fall speed
//! - [`rng`]: seeded uniform piece queue
//! - [`config`]: tunables and their validation
//! - [`observer`]: notification traits
//!
//! # Example
//!
//! ```
//! use tui_blockfall_core::{GamePhase, GameState};
//! use tui_blockfall_types::GameAction;
//!
//! let mut game = GameState::new(12345);
//! game.apply_action(GameAction::Start);
//! assert_eq!(game.phase(), GamePhase::Playing);
//!
//! game.apply_action(GameAction::MoveLeft);
//! game.tick(5).unwrap();
//!
//! // The piece falls one row per drop interval.
//! let y = game.field().active().unwrap().y;
//! game.tick(550).unwrap();
//! assert_eq!(game.field().active().unwrap().y, y - 1);
//! ```
//!
//! # Coordinates
//!
//! `x` grows to the right, `y` grows upwards; row 0 is the floor. Pieces spawn
//! just above the top row and fall towards row 0.

pub mod collapse;
pub mod config;
pub mod error;
pub mod field;
pub mod game_state;
pub mod grid;
pub mod observer;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use tui_blockfall_types as types;

pub use collapse::{CollapsePlan, RowFate};
pub use config::GameConfig;
pub use error::{ConfigError, OutOfBounds};
pub use field::{ActivePiece, Field, Kick};
pub use game_state::{DelayTarget, GamePhase, GameState};
pub use grid::Grid;
pub use observer::{CellObserver, ChangeLog, GameObserver};
pub use pieces::{get_shape, occupies, transform_local};
pub use rng::{PieceQueue, SimpleRng};
pub use scoring::{collapse_score, tighten_drop_interval};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
