//! Depth-first backtracking carve over the room graph.
//!
//! Rooms are the odd/odd cells; two rooms are adjacent when they sit two cells
//! apart, and the even cell between them becomes a connector when the edge is
//! carved. Each room is opened the moment it is reached, so it is entered once
//! and the carved rooms form a spanning tree.

use rand_chacha::ChaCha8Rng;

use super::grid::Grid;
use super::model::CellKind;
use super::seed::shuffled_directions;
use crate::types::{Direction, Pos};

struct CarveFrame {
    pos: Pos,
    directions: [Direction; 4],
    next: usize,
}

impl CarveFrame {
    fn enter(pos: Pos, rng: &mut ChaCha8Rng) -> Self {
        Self { pos, directions: shuffled_directions(rng), next: 0 }
    }
}

/// Carves every room reachable from `start`, which must be an interior room cell.
pub(super) fn carve_passages(mut grid: Grid, start: Pos, rng: &mut ChaCha8Rng) -> Grid {
    debug_assert!(start.is_room() && grid.is_interior(start));
    grid.set_kind(start, CellKind::PASSAGE);

    let mut stack = vec![CarveFrame::enter(start, rng)];
    while let Some(frame) = stack.last_mut() {
        let Some(&direction) = frame.directions.get(frame.next) else {
            stack.pop();
            continue;
        };
        frame.next += 1;

        let target = frame.pos.step(direction, 2);
        if !grid.is_interior(target) || !matches!(grid.kind_at(target), CellKind::Wall { .. }) {
            continue;
        }

        grid.set_kind(frame.pos.step(direction, 1), CellKind::PASSAGE);
        grid.set_kind(target, CellKind::PASSAGE);
        stack.push(CarveFrame::enter(target, rng));
    }

    grid
}
