//! Observer capabilities through which the core reports changes.
//!
//! The core never renders or plays sounds itself. A collaborator registers one
//! observer per layer and reacts to the notifications:
//!
//! - [`CellObserver`]: a cell's logical value may have changed.
//! - [`GameObserver`]: score, phase or preview piece changed.
//!
//! Both are implemented for `Rc<RefCell<T>>` so the collaborator can keep a
//! handle to the state it hands over.

use std::cell::RefCell;
use std::rc::Rc;

use crate::game_state::GamePhase;
use crate::types::{Cell, PieceKind};

/// Receives per-cell change notifications.
pub trait CellObserver {
    fn cell_changed(&mut self, x: i32, y: i32, cell: Cell);
}

/// Receives game-level notifications. Every method defaults to a no-op.
pub trait GameObserver {
    fn score_changed(&mut self, _score: u32) {}

    fn phase_changed(&mut self, _phase: GamePhase) {}

    fn next_piece_changed(&mut self, _kind: PieceKind) {}
}

impl<T: CellObserver> CellObserver for Rc<RefCell<T>> {
    fn cell_changed(&mut self, x: i32, y: i32, cell: Cell) {
        self.borrow_mut().cell_changed(x, y, cell);
    }
}

impl<T: GameObserver> GameObserver for Rc<RefCell<T>> {
    fn score_changed(&mut self, score: u32) {
        self.borrow_mut().score_changed(score);
    }

    fn phase_changed(&mut self, phase: GamePhase) {
        self.borrow_mut().phase_changed(phase);
    }

    fn next_piece_changed(&mut self, kind: PieceKind) {
        self.borrow_mut().next_piece_changed(kind);
    }
}

/// Records every notification it receives, in order.
///
/// Handy for headless drivers and tests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangeLog {
    pub cells: Vec<(i32, i32, Cell)>,
    pub scores: Vec<u32>,
    pub phases: Vec<GamePhase>,
    pub previews: Vec<PieceKind>,
}

impl ChangeLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop everything recorded so far.
    pub fn clear(&mut self) {
        self.cells.clear();
        self.scores.clear();
        self.phases.clear();
        self.previews.clear();
    }

    /// Whether `(x, y)` was reported at least once.
    pub fn touched(&self, x: i32, y: i32) -> bool {
        self.cells.iter().any(|&(cx, cy, _)| cx == x && cy == y)
    }

    /// Last value reported for `(x, y)`.
    pub fn last_value(&self, x: i32, y: i32) -> Option<Cell> {
        self.cells
            .iter()
            .rev()
            .find(|&&(cx, cy, _)| cx == x && cy == y)
            .map(|&(_, _, cell)| cell)
    }
}

impl CellObserver for ChangeLog {
    fn cell_changed(&mut self, x: i32, y: i32, cell: Cell) {
        self.cells.push((x, y, cell));
    }
}

impl GameObserver for ChangeLog {
    fn score_changed(&mut self, score: u32) {
        self.scores.push(score);
    }

    fn phase_changed(&mut self, phase: GamePhase) {
        self.phases.push(phase);
    }

    fn next_piece_changed(&mut self, kind: PieceKind) {
        self.previews.push(kind);
    }
}
