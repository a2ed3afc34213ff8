use crate::field::ActivePiece;
use crate::game_state::GamePhase;
use crate::types::{PieceKind, Rotation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i32,
    pub y: i32,
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
        }
    }
}

/// Everything a view needs besides the cells themselves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameSnapshot {
    pub phase: GamePhase,
    pub paused: bool,
    pub score: u32,
    pub last_score: u32,
    pub next: PieceKind,
    pub active: Option<ActiveSnapshot>,
    pub drop_interval_ms: f64,
    /// Rows being cleared by the running collapse, 0 outside one.
    pub clearing_rows: u32,
    pub animation_step: u8,
    pub pieces_locked: u32,
    pub rows_cleared: u32,
}

impl GameSnapshot {
    pub fn game_over(&self) -> bool {
        matches!(self.phase, GamePhase::WaitDelay(_) | GamePhase::AnimateEnd)
    }
}
