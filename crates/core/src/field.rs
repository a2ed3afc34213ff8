//! Field module - the grid merged with the piece in flight
//!
//! [`Field`] owns the locked [`Grid`] and at most one [`ActivePiece`]. Reads go
//! through the merged view: where the active piece covers a cell it wins,
//! otherwise the grid value shows. Every mutation pushes the merged value of
//! each touched in-bounds cell to the registered [`CellObserver`].
//!
//! Movement is split into a pure check (`can_translate`, `try_rotate`) and an
//! unconditional apply (`translate`, `rotate`). Callers check first.
//!
//! The anchor `(x, y)` is the bottom-left corner of the piece's bounding box.
//! It may sit above the top row while the piece enters the field.

use std::fmt;

use crate::error::OutOfBounds;
use crate::grid::Grid;
use crate::observer::CellObserver;
use crate::pieces::{get_shape, occupies, template_bit};
use crate::types::{Cell, Direction, PieceKind, RotateDirection, Rotation};

/// The piece currently in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i32,
    pub y: i32,
}

impl ActivePiece {
    pub fn size(&self) -> i32 {
        self.kind.size()
    }

    /// Whether the piece occupies absolute cell `(x, y)`.
    pub fn covers(&self, x: i32, y: i32) -> bool {
        occupies(self.kind, x - self.x, y - self.y, self.rotation)
    }

    /// Absolute coordinates of the four occupied cells.
    pub fn cells(&self) -> [(i32, i32); 4] {
        get_shape(self.kind, self.rotation).map(|(dx, dy)| (self.x + dx, self.y + dy))
    }
}

/// Horizontal offset applied by a successful rotation.
///
/// Offsets are tried in declaration order. The integer flag form (1..=5, with
/// 0 meaning "illegal") is available through [`Kick::flag`] and
/// [`Kick::from_flag`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kick {
    Centered,
    Right,
    Left,
    Right2,
    Left2,
}

impl Kick {
    pub const ORDER: [Kick; 5] = [Kick::Centered, Kick::Right, Kick::Left, Kick::Right2, Kick::Left2];

    pub fn offset(self) -> i32 {
        match self {
            Kick::Centered => 0,
            Kick::Right => 1,
            Kick::Left => -1,
            Kick::Right2 => 2,
            Kick::Left2 => -2,
        }
    }

    pub fn flag(self) -> u8 {
        match self {
            Kick::Centered => 1,
            Kick::Right => 2,
            Kick::Left => 3,
            Kick::Right2 => 4,
            Kick::Left2 => 5,
        }
    }

    pub fn from_flag(flag: u8) -> Option<Kick> {
        match flag {
            1 => Some(Kick::Centered),
            2 => Some(Kick::Right),
            3 => Some(Kick::Left),
            4 => Some(Kick::Right2),
            5 => Some(Kick::Left2),
            _ => None,
        }
    }

    /// Smallest piece size for which this kick is tried.
    fn min_size(self) -> i32 {
        match self {
            Kick::Centered => 0,
            Kick::Right | Kick::Left => 3,
            Kick::Right2 | Kick::Left2 => 4,
        }
    }
}

pub struct Field {
    grid: Grid,
    active: Option<ActivePiece>,
    observer: Option<Box<dyn CellObserver>>,
}

impl Field {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            grid: Grid::new(width, height),
            active: None,
            observer: None,
        }
    }

    pub fn width(&self) -> i32 {
        self.grid.width()
    }

    pub fn height(&self) -> i32 {
        self.grid.height()
    }

    /// The locked cells, without the active piece.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.grid.contains(x, y)
    }

    /// Merged read: the active piece's kind where it covers `(x, y)`, else the grid.
    pub fn get(&self, x: i32, y: i32) -> Result<Cell, OutOfBounds> {
        let locked = self.grid.get(x, y)?;
        match self.active {
            Some(piece) if piece.covers(x, y) => Ok(Some(piece.kind)),
            _ => Ok(locked),
        }
    }

    /// Write a locked cell.
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> Result<(), OutOfBounds> {
        self.grid.set(x, y, cell)?;
        self.notify_region(x, y, 1, 1);
        Ok(())
    }

    /// Empty the grid. The active piece is left alone.
    pub fn clear(&mut self) {
        self.grid.clear();
        self.notify_region(0, 0, self.width(), self.height());
    }

    pub fn clear_row(&mut self, y: i32) -> Result<(), OutOfBounds> {
        self.grid.clear_row(y)?;
        self.notify_region(0, y, self.width(), 1);
        Ok(())
    }

    pub fn is_row_full(&self, y: i32) -> bool {
        self.grid.is_row_full(y)
    }

    /// Install the single observer, replacing any previous one.
    pub fn set_observer(&mut self, observer: Box<dyn CellObserver>) {
        self.observer = Some(observer);
    }

    pub fn take_observer(&mut self) -> Option<Box<dyn CellObserver>> {
        self.observer.take()
    }

    pub fn has_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    /// Put a new piece of `kind` at the top, centered, with its lowest
    /// occupied row just above the field.
    pub fn spawn(&mut self, kind: PieceKind) {
        let size = kind.size();
        let x = self.width() / 2 - size / 2 - size % 2;
        let mut y = self.height();
        for ly in 0..size {
            if (0..size).any(|lx| template_bit(kind, lx, ly)) {
                break;
            }
            y -= 1;
        }

        let piece = ActivePiece {
            kind,
            rotation: Rotation::North,
            x,
            y,
        };
        if let Some(old) = self.active.replace(piece) {
            self.notify_region(old.x, old.y, old.size(), old.size());
        }
        self.notify_region(x, y, size, size);
    }

    /// Whether the active piece could move one cell in `direction`.
    pub fn can_translate(&self, direction: Direction) -> bool {
        let Some(piece) = self.active else {
            return false;
        };
        let (dx, dy) = direction.offset();
        !self.overlaps(piece.x + dx, piece.y + dy, piece.rotation)
    }

    /// Move the active piece one cell. No collision check.
    pub fn translate(&mut self, direction: Direction) {
        let Some(piece) = self.active.as_mut() else {
            return;
        };
        let (dx, dy) = direction.offset();
        piece.x += dx;
        piece.y += dy;

        let p = *piece;
        let size = p.size();
        match direction {
            Direction::Down => self.notify_region(p.x, p.y, size, size + 1),
            Direction::Left => self.notify_region(p.x, p.y, size + 1, size),
            Direction::Right => self.notify_region(p.x - 1, p.y, size + 1, size),
        }
    }

    /// First kick under which the turned piece fits, or `None` if the turn is illegal.
    pub fn try_rotate(&self, direction: RotateDirection) -> Option<Kick> {
        let piece = self.active?;
        let rotation = piece.rotation.turned(direction);
        Kick::ORDER
            .into_iter()
            .filter(|kick| piece.size() >= kick.min_size())
            .find(|kick| !self.overlaps(piece.x + kick.offset(), piece.y, rotation))
    }

    /// Turn the active piece and shift it by `kick`. No collision check.
    pub fn rotate(&mut self, direction: RotateDirection, kick: Kick) {
        let Some(piece) = self.active.as_mut() else {
            return;
        };
        let old_x = piece.x;
        piece.rotation = piece.rotation.turned(direction);
        piece.x += kick.offset();

        let p = *piece;
        let left = old_x.min(p.x);
        self.notify_region(left, p.y, p.size() + kick.offset().abs(), p.size());
    }

    /// Whether the active piece, anchored at `(x, y)` in `rotation`, collides.
    ///
    /// Columns outside the field and rows below the floor always collide.
    /// Rows at or above the top are free.
    pub fn overlaps(&self, x: i32, y: i32, rotation: Rotation) -> bool {
        let Some(piece) = self.active else {
            return false;
        };
        get_shape(piece.kind, rotation).iter().any(|&(dx, dy)| {
            let (cx, cy) = (x + dx, y + dy);
            if cx < 0 || cx >= self.width() {
                return true;
            }
            if cy >= self.height() {
                return false;
            }
            !matches!(self.grid.get(cx, cy), Ok(None))
        })
    }

    /// Write the active piece into the grid and drop it.
    ///
    /// Returns `false` when part of the piece was outside the field and got
    /// discarded.
    pub fn lock(&mut self) -> bool {
        let Some(piece) = self.active.take() else {
            return true;
        };
        let mut placed = true;
        for (x, y) in piece.cells() {
            if self.grid.set(x, y, Some(piece.kind)).is_err() {
                placed = false;
            }
        }
        self.notify_region(0, 0, self.width(), self.height());
        placed
    }

    /// Report the merged value of every in-bounds cell of a rectangle.
    fn notify_region(&mut self, x: i32, y: i32, width: i32, height: i32) {
        if self.observer.is_none() {
            return;
        }
        for cy in y..y + height {
            for cx in x..x + width {
                if !self.contains(cx, cy) {
                    continue;
                }
                if let Ok(cell) = self.get(cx, cy) {
                    if let Some(observer) = self.observer.as_mut() {
                        observer.cell_changed(cx, cy, cell);
                    }
                }
            }
        }
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("grid", &self.grid)
            .field("active", &self.active)
            .field("observed", &self.observer.is_some())
            .finish()
    }
}
