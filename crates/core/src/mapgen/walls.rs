//! Wall classification for sprite selection.

use super::grid::Grid;
use super::model::{CellKind, WallMask};
use crate::types::{Direction, Pos};

/// Neighbor mask for the wall at `pos`. Only passages count; the exit and
/// out-of-range neighbors do not.
pub fn neighbor_mask(grid: &Grid, pos: Pos) -> WallMask {
    Direction::ALL.into_iter().fold(WallMask::EMPTY, |mask, direction| {
        match grid.kind_at(pos.step(direction, 1)) {
            CellKind::Passage { .. } => mask.with(direction),
            CellKind::Wall { .. } | CellKind::Exit { .. } => mask,
        }
    })
}

pub(super) fn classify_walls(mut grid: Grid) -> Grid {
    let masks: Vec<(Pos, WallMask)> = grid
        .positions()
        .filter(|&pos| grid.cell(pos).is_some_and(|cell| cell.is_wall()))
        .map(|pos| (pos, neighbor_mask(&grid, pos)))
        .collect();
    for (pos, mask) in masks {
        grid.set_kind(pos, CellKind::Wall { mask });
    }
    grid
}
