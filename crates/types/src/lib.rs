//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no external dependencies, so they can be used
//! by the simulation core, the input layer and the terminal renderer alike.
//!
//! # Field Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 18 rows (indexed 0-17, **bottom to top**)
//!
//! Pieces spawn above row 17 and fall towards row 0.
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FRAME_MS` | 5 | Minimum delay between driver ticks |
//! | `INITIAL_DROP_MS` | 550 | Fall interval of a fresh game |
//! | `MIN_DROP_MS` | 80 | Fastest fall interval |
//! | `KEY_REPEAT_MS` | 135 | Repeat interval of a held move key |
//! | `WAIT_DELAY_MS` | 2500 | Pause between overflow and the end animation |
//! | `COLLAPSE_SHRINK_MS` | 300 | First part of the row-collapse animation |
//! | `COLLAPSE_SETTLE_MS` | 140 | Second part of the row-collapse animation |
//! | `END_ANIMATION_MS` | 1000 | Game-over animation |
//!
//! # Examples
//!
//! ```
//! use tui_blockfall_types::{PieceKind, Rotation, FIELD_HEIGHT, FIELD_WIDTH};
//!
//! let piece = PieceKind::ALL[5];
//! assert_eq!(piece, PieceKind::T);
//! assert_eq!(piece.as_str(), "t");
//! assert_eq!(piece.size(), 3);
//!
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//! assert_eq!(Rotation::North.rotate_ccw(), Rotation::West);
//!
//! assert_eq!(FIELD_WIDTH, 10);
//! assert_eq!(FIELD_HEIGHT, 18);
//! ```

/// Field width in cells.
pub const FIELD_WIDTH: i32 = 10;
/// Field height in cells.
pub const FIELD_HEIGHT: i32 = 18;

/// Minimum delay between two ticks of the terminal driver.
pub const FRAME_MS: u32 = 5;

/// Fall interval at the start of a game.
pub const INITIAL_DROP_MS: f64 = 550.0;
/// Floor of the fall interval.
pub const MIN_DROP_MS: f64 = 80.0;
/// The fall interval is divided by this factor after every lock.
pub const SPEEDUP_FACTOR: f64 = 1.017;
/// Fraction of the fall interval skipped while soft drop is held.
pub const SOFT_DROP_FACTOR: f64 = 0.85;

/// Held left/right keys repeat once this many milliseconds have passed.
pub const KEY_REPEAT_MS: u32 = 135;

pub const WAIT_DELAY_MS: u32 = 2500;
pub const COLLAPSE_SHRINK_MS: u32 = 300;
pub const COLLAPSE_SETTLE_MS: u32 = 140;
pub const END_ANIMATION_MS: u32 = 1000;

/// Points awarded per collapse event, indexed by the number of rows cleared.
pub const COLLAPSE_SCORES: [u32; 5] = [0, 20, 50, 100, 180];

/// Piece kinds, in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// Every kind, in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Position of this kind in [`PieceKind::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Side length of the square bounding box of this kind's template.
    pub fn size(self) -> i32 {
        match self {
            PieceKind::I => 4,
            PieceKind::O => 2,
            PieceKind::J | PieceKind::L | PieceKind::S | PieceKind::T | PieceKind::Z => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::O => "o",
            PieceKind::S => "s",
            PieceKind::T => "t",
            PieceKind::Z => "z",
        }
    }
}

/// Rotation states. `North` is the template's own orientation; each
/// clockwise step selects the next rotation matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Index into the rotation matrix table (0..4).
    pub fn index(self) -> usize {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Inverse of [`Rotation::index`], taken modulo 4.
    pub fn from_index(index: usize) -> Self {
        match index % 4 {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }

    pub fn rotate_cw(&self) -> Self {
        Self::from_index(self.index() + 1)
    }

    pub fn rotate_ccw(&self) -> Self {
        Self::from_index(self.index() + 3)
    }

    /// Rotation reached by turning once in `direction`.
    pub fn turned(&self, direction: RotateDirection) -> Self {
        match direction {
            RotateDirection::Left => self.rotate_ccw(),
            RotateDirection::Right => self.rotate_cw(),
        }
    }
}

/// One-cell translations of the active piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Down,
    Left,
    Right,
}

impl Direction {
    /// Cell offset `(dx, dy)`; `y` grows upwards so `Down` is `-1`.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::Down => (0, -1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotateDirection {
    Left,
    Right,
}

/// Player intents, as produced by the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    MoveDown,
    RotateLeft,
    RotateRight,
    SoftDropOn,
    SoftDropOff,
    Pause,
    Start,
}

/// Cell on the field (None = empty, Some = locked or active piece kind)
pub type Cell = Option<PieceKind>;
