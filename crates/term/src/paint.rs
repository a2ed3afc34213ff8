//! PaintBuffer: the renderer's copy of the field, fed by cell notifications.
//!
//! The core pushes the merged value of every cell it touches; the view never
//! reads the field directly. Share one buffer between the field and the view
//! with `Rc<RefCell<PaintBuffer>>`.

use std::cell::RefCell;
use std::rc::Rc;

use crate::core::CellObserver;
use crate::types::Cell;

pub type SharedPaint = Rc<RefCell<PaintBuffer>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaintBuffer {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
    updates: u64,
}

impl PaintBuffer {
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
            updates: 0,
        }
    }

    pub fn shared(width: i32, height: i32) -> SharedPaint {
        Rc::new(RefCell::new(Self::new(width, height)))
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Last reported value; `None` for empty or unknown cells.
    pub fn get(&self, x: i32, y: i32) -> Cell {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        self.cells[y as usize * self.width as usize + x as usize]
    }

    pub fn is_row_full(&self, y: i32) -> bool {
        self.width > 0 && (0..self.width).all(|x| self.get(x, y).is_some())
    }

    /// Notifications received so far.
    pub fn updates(&self) -> u64 {
        self.updates
    }
}

impl CellObserver for PaintBuffer {
    fn cell_changed(&mut self, x: i32, y: i32, cell: Cell) {
        self.updates += 1;
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return;
        }
        self.cells[y as usize * self.width as usize + x as usize] = cell;
    }
}
