//! One generation attempt: the grid moves through each pass by value.

use tracing::debug;

use super::super::carver::carve_passages;
use super::super::exit_path::{ExitSearchError, default_step_budget, place_exit};
use super::super::grid::Grid;
use super::super::items::{keys_required, place_items};
use super::super::model::Maze;
use super::super::seed::{random_odd_coordinate, rng_from_seed};
use super::super::walls::classify_walls;
use crate::config::MazeConfig;
use crate::error::GenerationError;
use crate::types::Pos;

pub(super) enum AttemptError {
    /// Worth retrying with another seed.
    ExitSearch(ExitSearchError),
    Fatal(GenerationError),
}

impl From<ExitSearchError> for AttemptError {
    fn from(error: ExitSearchError) -> Self {
        Self::ExitSearch(error)
    }
}

impl From<GenerationError> for AttemptError {
    fn from(error: GenerationError) -> Self {
        Self::Fatal(error)
    }
}

pub(super) fn build_maze(
    config: &MazeConfig,
    size: usize,
    attempt_seed: u64,
    exit_step_budget: Option<usize>,
) -> Result<Maze, AttemptError> {
    let mut rng = rng_from_seed(attempt_seed);
    let grid = Grid::new(config.cell_size, config.border, size);
    let start = Pos {
        y: random_odd_coordinate(&mut rng, size),
        x: random_odd_coordinate(&mut rng, size),
    };

    let grid = carve_passages(grid, start, &mut rng);
    debug!(?start, passages = grid.passage_count(), "passages carved");

    let budget = exit_step_budget.unwrap_or_else(|| default_step_budget(&grid));
    let (grid, exit_path) = place_exit(grid, start, &mut rng, budget)?;

    let (grid, keys) = place_items(grid, keys_required(size), &mut rng)?;
    debug!(keys = keys.len(), "items placed");

    let grid = classify_walls(grid);

    Ok(Maze { grid, start, exit: exit_path.exit, keys, seed: attempt_seed, attempts: 1 })
}
