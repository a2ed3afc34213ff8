//! Collapse module - full-row detection and the downward shift plan
//!
//! After a lock, [`CollapsePlan::scan`] walks the rows bottom to top and tags
//! each one with an integer:
//!
//! - `k > 0`: the row moves down by `k`
//! - `0`: the row stays
//! - `-(k + 1)`: the row is the `(k + 1)`-th full row from the bottom; it is
//!   cleared and rows above it move down past it
//!
//! The plan is applied in two steps so an animation can run between them:
//! [`clear_full_rows`](CollapsePlan::clear_full_rows) empties the full rows in
//! place, [`commit`](CollapsePlan::commit) moves the survivors down.

use crate::error::OutOfBounds;
use crate::field::Field;

/// What happens to one row during a collapse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowFate {
    Keep,
    /// Moves down by this many rows.
    Shift(i32),
    /// Cleared; `below` full rows lie under it.
    Clear { below: i32 },
}

impl RowFate {
    fn decode(value: i32) -> Self {
        match value {
            0 => RowFate::Keep,
            k if k > 0 => RowFate::Shift(k),
            k => RowFate::Clear { below: -k - 1 },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollapsePlan {
    config: Vec<i32>,
    row_count: u32,
}

impl CollapsePlan {
    pub fn scan(field: &Field) -> Self {
        let mut config = Vec::with_capacity(field.height() as usize);
        let mut count = 0i32;
        for y in 0..field.height() {
            if field.is_row_full(y) {
                count += 1;
                config.push(-count);
            } else {
                config.push(count);
            }
        }
        Self {
            config,
            row_count: count as u32,
        }
    }

    /// Number of full rows found.
    pub fn row_count(&self) -> u32 {
        self.row_count
    }

    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    /// Raw per-row values, row 0 first.
    pub fn config(&self) -> &[i32] {
        &self.config
    }

    /// Fate of row `y`; rows outside the scanned range are kept.
    pub fn fate(&self, y: i32) -> RowFate {
        usize::try_from(y)
            .ok()
            .and_then(|i| self.config.get(i))
            .map_or(RowFate::Keep, |&v| RowFate::decode(v))
    }

    /// Indices of the full rows, bottom first.
    pub fn full_rows(&self) -> impl Iterator<Item = i32> + '_ {
        self.config
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v < 0)
            .map(|(y, _)| y as i32)
    }

    /// Empty every full row in place.
    pub fn clear_full_rows(&self, field: &mut Field) -> Result<(), OutOfBounds> {
        for y in self.full_rows() {
            field.clear_row(y)?;
        }
        Ok(())
    }

    /// Move every surviving row down by its shift, lowest row first.
    pub fn commit(&self, field: &mut Field) -> Result<(), OutOfBounds> {
        for (y, &shift) in self.config.iter().enumerate() {
            if shift <= 0 {
                continue;
            }
            let y = y as i32;
            for x in 0..field.width() {
                let cell = field.grid().get(x, y)?;
                field.set(x, y - shift, cell)?;
                field.set(x, y, None)?;
            }
        }
        Ok(())
    }
}
