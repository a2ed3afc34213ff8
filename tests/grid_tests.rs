//! Grid tests - storage, bounds and change notification

use std::cell::RefCell;
use std::rc::Rc;

use tui_blockfall::core::{ChangeLog, Grid, OutOfBounds};
use tui_blockfall::types::PieceKind;

#[test]
fn test_new_grid_is_empty() {
    let grid = Grid::new(10, 18);
    assert_eq!(grid.width(), 10);
    assert_eq!(grid.height(), 18);
    for y in 0..18 {
        for x in 0..10 {
            assert_eq!(grid.get(x, y), Ok(None));
        }
    }
    assert_eq!(grid.occupied_count(), 0);
}

#[test]
fn test_get_set_out_of_bounds() {
    let mut grid = Grid::new(10, 18);
    assert_eq!(grid.get(-1, 0), Err(OutOfBounds { x: -1, y: 0 }));
    assert_eq!(grid.get(10, 0), Err(OutOfBounds { x: 10, y: 0 }));
    assert_eq!(grid.get(0, 18), Err(OutOfBounds { x: 0, y: 18 }));
    assert_eq!(grid.set(3, -1, Some(PieceKind::T)), Err(OutOfBounds { x: 3, y: -1 }));
    assert_eq!(grid.occupied_count(), 0);
}

#[test]
fn test_contains() {
    let grid = Grid::new(4, 5);
    assert!(grid.contains(0, 0));
    assert!(grid.contains(3, 4));
    assert!(!grid.contains(4, 4));
    assert!(!grid.contains(3, 5));
    assert!(!grid.contains(-1, 2));
}

#[test]
fn test_set_notifies_observer() {
    let log = Rc::new(RefCell::new(ChangeLog::new()));
    let mut grid = Grid::new(4, 4);
    grid.set_observer(Box::new(log.clone()));

    grid.set(2, 3, Some(PieceKind::L)).unwrap();
    assert_eq!(log.borrow().cells, vec![(2, 3, Some(PieceKind::L))]);

    // Failed writes stay silent.
    let _ = grid.set(9, 9, Some(PieceKind::L));
    assert_eq!(log.borrow().cells.len(), 1);
}

#[test]
fn test_clear_notifies_every_cell() {
    let log = Rc::new(RefCell::new(ChangeLog::new()));
    let mut grid = Grid::new(3, 2);
    grid.set(0, 0, Some(PieceKind::O)).unwrap();
    grid.set_observer(Box::new(log.clone()));

    grid.clear();
    assert_eq!(grid.occupied_count(), 0);
    assert_eq!(log.borrow().cells.len(), 6);
    assert!(log.borrow().cells.iter().all(|&(_, _, cell)| cell.is_none()));
}

#[test]
fn test_clear_row() {
    let log = Rc::new(RefCell::new(ChangeLog::new()));
    let mut grid = Grid::new(3, 3);
    for x in 0..3 {
        grid.set(x, 1, Some(PieceKind::S)).unwrap();
        grid.set(x, 2, Some(PieceKind::Z)).unwrap();
    }
    grid.set_observer(Box::new(log.clone()));

    grid.clear_row(1).unwrap();
    assert!(!grid.is_row_full(1));
    assert!(grid.is_row_full(2));
    assert_eq!(log.borrow().cells.len(), 3);

    assert_eq!(grid.clear_row(3), Err(OutOfBounds { x: 0, y: 3 }));
    assert!(grid.clear_row(-1).is_err());
}

#[test]
fn test_row_full_detection() {
    let mut grid = Grid::new(4, 2);
    for x in 0..3 {
        grid.set(x, 0, Some(PieceKind::J)).unwrap();
    }
    assert!(!grid.is_row_full(0));
    grid.set(3, 0, Some(PieceKind::J)).unwrap();
    assert!(grid.is_row_full(0));
    assert!(!grid.is_row_full(1));
    assert!(!grid.is_row_full(7));
}

#[test]
fn test_take_observer_stops_notifications() {
    let log = Rc::new(RefCell::new(ChangeLog::new()));
    let mut grid = Grid::new(2, 2);
    grid.set_observer(Box::new(log.clone()));
    assert!(grid.take_observer().is_some());
    grid.set(0, 0, Some(PieceKind::I)).unwrap();
    assert!(log.borrow().cells.is_empty());
}
