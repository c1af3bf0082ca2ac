//! Structural checks for a freshly generated maze.
//!
//! Every property here is guaranteed by construction; a violation means a
//! generation pass is broken, not that the input was bad.

use std::collections::{BTreeSet, VecDeque};

use thiserror::Error;

use super::items::keys_required;
use super::model::Maze;
use super::walls::neighbor_mask;
use crate::types::{Direction, Pos};

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("grid has {actual} cells, expected {expected}")]
    WrongCellCount { expected: usize, actual: usize },
    #[error("grid size {size} is even")]
    EvenSize { size: usize },
    #[error("border cell {pos:?} is walkable")]
    OpenBorder { pos: Pos },
    #[error("start {pos:?} is not a walkable room cell")]
    BadStart { pos: Pos },
    #[error("found {count} exit cells, expected exactly one")]
    ExitCount { count: usize },
    #[error("recorded exit {pos:?} is not an exit cell")]
    ExitMismatch { pos: Pos },
    #[error("{unreached} walkable cells are unreachable from the start, first at {first:?}")]
    Disconnected { unreached: usize, first: Pos },
    #[error("placed {actual} items, expected {expected}")]
    ItemCount { expected: usize, actual: usize },
    #[error("item at {pos:?} is listed twice or not on an item-bearing passage")]
    BadItem { pos: Pos },
    #[error("wall {pos:?} has key {actual}, neighbors say {expected}")]
    WallKeyMismatch { pos: Pos, expected: String, actual: String },
}

pub fn check_invariants(maze: &Maze) -> Result<(), InvariantViolation> {
    check_shape(maze)?;
    check_start_and_exit(maze)?;
    check_connectivity(maze)?;
    check_items(maze)?;
    check_wall_keys(maze)
}

fn check_shape(maze: &Maze) -> Result<(), InvariantViolation> {
    let grid = &maze.grid;
    let size = grid.size();
    if size % 2 == 0 {
        return Err(InvariantViolation::EvenSize { size });
    }
    if grid.cells().len() != size * size {
        return Err(InvariantViolation::WrongCellCount {
            expected: size * size,
            actual: grid.cells().len(),
        });
    }
    match grid.positions().find(|&pos| !grid.is_interior(pos) && grid.is_walkable(pos)) {
        Some(pos) => Err(InvariantViolation::OpenBorder { pos }),
        None => Ok(()),
    }
}

fn check_start_and_exit(maze: &Maze) -> Result<(), InvariantViolation> {
    let grid = &maze.grid;
    if !maze.start.is_room() || !grid.is_interior(maze.start) || !grid.is_walkable(maze.start) {
        return Err(InvariantViolation::BadStart { pos: maze.start });
    }

    let count = grid.cells().iter().filter(|cell| cell.is_exit()).count();
    if count != 1 {
        return Err(InvariantViolation::ExitCount { count });
    }
    if !grid.cell(maze.exit).is_some_and(|cell| cell.is_exit()) {
        return Err(InvariantViolation::ExitMismatch { pos: maze.exit });
    }
    Ok(())
}

fn check_connectivity(maze: &Maze) -> Result<(), InvariantViolation> {
    let grid = &maze.grid;
    let mut open = VecDeque::from([maze.start]);
    let mut seen = BTreeSet::from([maze.start]);
    while let Some(pos) = open.pop_front() {
        for direction in Direction::ALL {
            let next = pos.step(direction, 1);
            if grid.is_walkable(next) && seen.insert(next) {
                open.push_back(next);
            }
        }
    }

    let mut unreached = grid.positions().filter(|&pos| grid.is_walkable(pos) && !seen.contains(&pos));
    match unreached.next() {
        Some(first) => Err(InvariantViolation::Disconnected { unreached: 1 + unreached.count(), first }),
        None => Ok(()),
    }
}

fn check_items(maze: &Maze) -> Result<(), InvariantViolation> {
    let grid = &maze.grid;
    let expected = keys_required(grid.size());
    if maze.keys.len() != expected {
        return Err(InvariantViolation::ItemCount { expected, actual: maze.keys.len() });
    }
    let flagged = grid.cells().iter().filter(|cell| cell.has_item()).count();
    if flagged != expected {
        return Err(InvariantViolation::ItemCount { expected, actual: flagged });
    }

    let mut seen = BTreeSet::new();
    for &pos in &maze.keys {
        if !seen.insert(pos) || !grid.cell(pos).is_some_and(|cell| cell.has_item()) {
            return Err(InvariantViolation::BadItem { pos });
        }
    }
    Ok(())
}

fn check_wall_keys(maze: &Maze) -> Result<(), InvariantViolation> {
    let grid = &maze.grid;
    for pos in grid.positions() {
        let Some(actual) = grid.cell(pos).and_then(|cell| cell.wall_key()) else {
            continue;
        };
        let expected = neighbor_mask(grid, pos).key();
        let well_formed = actual.len() == 4 && actual.chars().all(|c| c == '0' || c == '1');
        if !well_formed || actual != expected {
            return Err(InvariantViolation::WallKeyMismatch { pos, expected, actual });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MazeConfig;
    use crate::mapgen::MazeGenerator;
    use crate::mapgen::model::{CellKind, WallMask};

    fn maze(size: usize, seed: u64) -> Maze {
        MazeGenerator::new(MazeConfig::new(16, 0, size)).generate(seed).expect("generation")
    }

    #[test]
    fn fresh_maze_passes() {
        assert_eq!(check_invariants(&maze(21, 10)), Ok(()));
    }

    #[test]
    fn opened_border_is_reported() {
        let mut maze = maze(11, 3);
        if let Some(cell) = maze.grid.cell_mut(Pos::new(0, 4)) {
            cell.kind = CellKind::PASSAGE;
        }
        assert_eq!(check_invariants(&maze), Err(InvariantViolation::OpenBorder { pos: Pos::new(0, 4) }));
    }

    #[test]
    fn opened_even_cell_is_reported() {
        let mut maze = maze(11, 4);
        // Even/even cells are never carved; its four connectors may or may not be open.
        let walled_in = Pos::new(2, 2);
        let surrounded = Direction::ALL
            .into_iter()
            .all(|direction| !maze.grid.is_walkable(walled_in.step(direction, 1)));
        if let Some(cell) = maze.grid.cell_mut(walled_in) {
            cell.kind = CellKind::PASSAGE;
        }
        let result = check_invariants(&maze);
        if surrounded {
            assert_eq!(result, Err(InvariantViolation::Disconnected { unreached: 1, first: walled_in }));
        } else {
            assert!(result.is_err(), "re-opened cell should at least break the wall keys");
        }
    }

    #[test]
    fn second_exit_is_reported() {
        let mut maze = maze(11, 5);
        let extra = maze.keys[0];
        if let Some(cell) = maze.grid.cell_mut(extra) {
            cell.kind = CellKind::Exit { accessible: false };
        }
        assert_eq!(check_invariants(&maze), Err(InvariantViolation::ExitCount { count: 2 }));
    }

    #[test]
    fn collected_item_is_reported() {
        let mut maze = maze(21, 6);
        let first = maze.keys[0];
        if let Some(cell) = maze.grid.cell_mut(first) {
            cell.set_item(false);
        }
        assert_eq!(
            check_invariants(&maze),
            Err(InvariantViolation::ItemCount { expected: 8, actual: 7 })
        );
    }

    #[test]
    fn stale_wall_key_is_reported() {
        let mut maze = maze(11, 7);
        let corner = Pos::new(0, 0);
        if let Some(cell) = maze.grid.cell_mut(corner) {
            cell.kind = CellKind::Wall { mask: WallMask::EMPTY.with(Direction::South) };
        }
        assert_eq!(
            check_invariants(&maze),
            Err(InvariantViolation::WallKeyMismatch {
                pos: corner,
                expected: "0000".to_string(),
                actual: "0010".to_string(),
            })
        );
    }
}
