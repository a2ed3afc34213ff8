//! Grid module - the persistent field of locked cells
//!
//! The grid is a `width x height` array where each cell is empty or holds the
//! kind of the piece that was locked there. Storage is a flat row-major vector.
//! Coordinates: (x, y) with x growing to the right and y growing **upwards**,
//! so row 0 is the floor.
//!
//! One optional observer is told about every write.

use std::fmt;

use crate::error::OutOfBounds;
use crate::observer::CellObserver;
use crate::types::Cell;

pub struct Grid {
    width: i32,
    height: i32,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
    observer: Option<Box<dyn CellObserver>>,
}

impl Grid {
    /// Create an empty grid. Dimensions are clamped to at least one cell.
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
            observer: None,
        }
    }

    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if !self.contains(x, y) {
            return None;
        }
        Some(self.offset(x, y))
    }

    /// Row-major offset of an in-bounds cell, computed in `usize`.
    #[inline(always)]
    fn offset(&self, x: i32, y: i32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Pure bounds predicate.
    #[inline(always)]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        0 <= x && x < self.width && 0 <= y && y < self.height
    }

    pub fn get(&self, x: i32, y: i32) -> Result<Cell, OutOfBounds> {
        self.index(x, y)
            .map(|idx| self.cells[idx])
            .ok_or(OutOfBounds { x, y })
    }

    /// Write a cell and notify the observer.
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> Result<(), OutOfBounds> {
        let idx = self.index(x, y).ok_or(OutOfBounds { x, y })?;
        self.cells[idx] = cell;
        self.notify(x, y, cell);
        Ok(())
    }

    /// Empty every cell, one notification per cell.
    pub fn clear(&mut self) {
        for y in 0..self.height {
            for x in 0..self.width {
                let idx = self.offset(x, y);
                self.cells[idx] = None;
                self.notify(x, y, None);
            }
        }
    }

    /// Empty one row, one notification per cell.
    pub fn clear_row(&mut self, y: i32) -> Result<(), OutOfBounds> {
        if y < 0 || y >= self.height {
            return Err(OutOfBounds { x: 0, y });
        }
        for x in 0..self.width {
            let idx = self.offset(x, y);
            self.cells[idx] = None;
            self.notify(x, y, None);
        }
        Ok(())
    }

    /// Check if a row is completely filled. Rows outside the grid are never full.
    pub fn is_row_full(&self, y: i32) -> bool {
        if y < 0 || y >= self.height {
            return false;
        }
        let start = self.offset(0, y);
        let end = start + self.width as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Number of non-empty cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Row-major view of the cells, row 0 first.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Install the single observer, replacing any previous one.
    pub fn set_observer(&mut self, observer: Box<dyn CellObserver>) {
        self.observer = Some(observer);
    }

    pub fn take_observer(&mut self) -> Option<Box<dyn CellObserver>> {
        self.observer.take()
    }

    fn notify(&mut self, x: i32, y: i32, cell: Cell) {
        if let Some(observer) = self.observer.as_mut() {
            observer.cell_changed(x, y, cell);
        }
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("occupied", &self.occupied_count())
            .field("observed", &self.observer.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;

    #[test]
    fn test_grid_index_calculation() {
        let grid = Grid::new(10, 18);
        assert_eq!(grid.index(0, 0), Some(0));
        assert_eq!(grid.index(9, 0), Some(9));
        assert_eq!(grid.index(0, 1), Some(10));
        assert_eq!(grid.index(9, 17), Some(179));
        assert_eq!(grid.index(-1, 0), None);
        assert_eq!(grid.index(10, 0), None);
        assert_eq!(grid.index(0, 18), None);
    }

    #[test]
    fn test_grid_flat_array() {
        let mut grid = Grid::new(10, 18);
        grid.set(0, 0, Some(PieceKind::I)).unwrap();
        grid.set(5, 10, Some(PieceKind::T)).unwrap();

        assert_eq!(grid.cells[0], Some(PieceKind::I));
        assert_eq!(grid.cells[10 * 10 + 5], Some(PieceKind::T));
        assert_eq!(grid.occupied_count(), 2);
    }

    #[test]
    fn test_degenerate_dimensions_are_clamped() {
        let grid = Grid::new(0, -3);
        assert_eq!(grid.width(), 1);
        assert_eq!(grid.height(), 1);
        assert!(grid.contains(0, 0));
    }

    #[test]
    fn test_largest_grid_indexes_far_corner() {
        let mut grid = Grid::new(1024, 1024);
        assert_eq!(grid.cells().len(), 1024 * 1024);
        assert_eq!(grid.index(1023, 1023), Some(1024 * 1024 - 1));
        grid.set(1023, 1023, Some(PieceKind::Z)).unwrap();
        assert!(!grid.is_row_full(1023));
        grid.clear_row(1023).unwrap();
        assert_eq!(grid.get(1023, 1023), Ok(None));
    }
}
