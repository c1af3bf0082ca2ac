//! Key placement by rejection sampling over passage cells.

use rand_chacha::ChaCha8Rng;

use super::grid::Grid;
use super::seed::random_index;
use crate::error::GenerationError;
use crate::types::Pos;

/// Keys a grid of the given (odd) size must hold: four per full ten cells of width.
pub fn keys_required(size: usize) -> usize {
    (size / 10) * 4
}

pub(super) fn place_items(
    mut grid: Grid,
    required: usize,
    rng: &mut ChaCha8Rng,
) -> Result<(Grid, Vec<Pos>), GenerationError> {
    let candidates: Vec<Pos> = grid
        .positions()
        .filter(|&pos| grid.cell(pos).is_some_and(|cell| cell.is_passage()))
        .collect();
    if required > candidates.len() {
        return Err(GenerationError::InsufficientPassages {
            required,
            available: candidates.len(),
        });
    }

    let mut keys = Vec::with_capacity(required);
    while keys.len() < required {
        let pos = candidates[random_index(rng, candidates.len())];
        let Some(cell) = grid.cell_mut(pos) else {
            continue;
        };
        if cell.has_item() {
            continue;
        }
        cell.set_item(true);
        keys.push(pos);
    }

    Ok((grid, keys))
}
