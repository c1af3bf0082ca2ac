//! Exit placement by a second depth-first walk over the carved passages.
//!
//! The walk moves one cell at a time, marks every passage it enters as
//! checked, and remembers the tile that sat on top of the deepest path stack.
//! Once more than half of all passages have been checked that tile becomes the
//! exit, so reaching it means crossing a large share of the maze.

use rand_chacha::ChaCha8Rng;
use thiserror::Error;
use tracing::debug;

use super::grid::Grid;
use super::model::CellKind;
use super::seed::shuffled_directions;
use crate::types::Pos;

/// Loop iterations allowed per grid cell before the search gives up.
pub const EXIT_STEPS_PER_CELL: usize = 64;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ExitSearchError {
    #[error("exit search exceeded its budget of {budget} steps")]
    StepBudgetExhausted { budget: usize },
    #[error("exit search ran out of passages after checking {explored} of {total}")]
    SearchExhausted { explored: usize, total: usize },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExitPath {
    pub exit: Pos,
    /// Path-stack size (start included) when the exit tile was on top.
    pub depth: usize,
    /// Passages checked by the walk, start excluded.
    pub explored: usize,
    pub total_passages: usize,
}

pub fn default_step_budget(grid: &Grid) -> usize {
    EXIT_STEPS_PER_CELL * grid.size() * grid.size()
}

pub(super) fn place_exit(
    mut grid: Grid,
    start: Pos,
    rng: &mut ChaCha8Rng,
    step_budget: usize,
) -> Result<(Grid, ExitPath), ExitSearchError> {
    let total_passages = grid.passage_count();
    let threshold = total_passages / 2;

    set_checked(&mut grid, start);
    let mut path = vec![start];
    let mut explored = 0_usize;
    let mut biggest_stack = 0_usize;
    let mut furthest_reached = start;
    let mut steps = 0_usize;

    loop {
        if steps >= step_budget {
            return Err(ExitSearchError::StepBudgetExhausted { budget: step_budget });
        }
        steps += 1;

        let Some(&current) = path.last() else {
            return Err(ExitSearchError::SearchExhausted { explored, total: total_passages });
        };
        if path.len() > biggest_stack {
            biggest_stack = path.len();
            furthest_reached = current;
        }
        if explored > threshold {
            break;
        }

        let next = shuffled_directions(rng)
            .into_iter()
            .map(|direction| current.step(direction, 1))
            .find(|&neighbor| is_unchecked_passage(&grid, neighbor));

        match next {
            Some(neighbor) => {
                set_checked(&mut grid, neighbor);
                explored += 1;
                path.push(neighbor);
            }
            None if path.len() > 1 => {
                path.pop();
            }
            None => {
                return Err(ExitSearchError::SearchExhausted { explored, total: total_passages });
            }
        }
    }

    path.clear();
    clear_checked(&mut grid);
    grid.set_kind(furthest_reached, CellKind::Exit { accessible: false });
    debug!(
        exit = ?furthest_reached,
        depth = biggest_stack,
        explored,
        total_passages,
        steps,
        "exit placed"
    );

    Ok((
        grid,
        ExitPath { exit: furthest_reached, depth: biggest_stack, explored, total_passages },
    ))
}

fn is_unchecked_passage(grid: &Grid, pos: Pos) -> bool {
    matches!(grid.kind_at(pos), CellKind::Passage { checked: false, .. })
}

fn set_checked(grid: &mut Grid, pos: Pos) {
    if let Some(cell) = grid.cell_mut(pos)
        && let CellKind::Passage { checked, .. } = &mut cell.kind
    {
        *checked = true;
    }
}

fn clear_checked(grid: &mut Grid) {
    for cell in grid.cells_mut() {
        if let CellKind::Passage { checked, .. } = &mut cell.kind {
            *checked = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, VecDeque};

    use proptest::prelude::*;

    use super::*;
    use crate::mapgen::carver::carve_passages;
    use crate::mapgen::grid::normalize_size;
    use crate::mapgen::seed::rng_from_seed;
    use crate::types::Direction;

    fn carved(size: usize, start: Pos, rng: &mut ChaCha8Rng) -> Grid {
        carve_passages(Grid::new(8, 0, size), start, rng)
    }

    fn tree_distances(grid: &Grid, start: Pos) -> BTreeMap<Pos, usize> {
        let mut distances = BTreeMap::from([(start, 0)]);
        let mut open = VecDeque::from([start]);
        while let Some(pos) = open.pop_front() {
            let distance = distances[&pos];
            for direction in Direction::ALL {
                let next = pos.step(direction, 1);
                if grid.is_walkable(next) && !distances.contains_key(&next) {
                    distances.insert(next, distance + 1);
                    open.push_back(next);
                }
            }
        }
        distances
    }

    #[test]
    fn exactly_one_exit_is_placed_away_from_start() {
        for seed in [3_u64, 17, 256, 9_001] {
            let mut rng = rng_from_seed(seed);
            let start = Pos::new(5, 5);
            let grid = carved(21, start, &mut rng);
            let before = grid.passage_count();
            let budget = default_step_budget(&grid);

            let (grid, path) = place_exit(grid, start, &mut rng, budget).expect("exit search");

            let exits: Vec<Pos> = grid
                .positions()
                .filter(|&pos| grid.cell(pos).is_some_and(|cell| cell.is_exit()))
                .collect();
            assert_eq!(exits, vec![path.exit], "seed={seed}");
            assert_ne!(path.exit, start);
            assert_eq!(grid.passage_count(), before - 1);
            assert_eq!(path.total_passages, before);
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]
        #[test]
        fn exit_sits_deep_after_covering_half_the_passages(
            seed in any::<u64>(),
            size in 5_usize..=61,
            start_row in any::<usize>(),
            start_col in any::<usize>(),
        ) {
            let size = normalize_size(size);
            let rooms = (size - 1) / 2;
            let start = Pos::new((1 + 2 * (start_row % rooms)) as i32, (1 + 2 * (start_col % rooms)) as i32);
            let mut rng = rng_from_seed(seed);
            let grid = carved(size, start, &mut rng);
            let distances = tree_distances(&grid, start);
            let budget = default_step_budget(&grid);

            let (_, path) = place_exit(grid, start, &mut rng, budget).expect("exit search");

            prop_assert!(
                path.explored > path.total_passages / 2,
                "explored {} of {} passages", path.explored, path.total_passages
            );
            // The carved passages form a tree, so the stack below a tile is its unique path.
            prop_assert_eq!(distances[&path.exit] + 1, path.depth);
            let deepest = distances.values().copied().max().unwrap_or(0);
            prop_assert!(path.depth <= deepest + 1);
        }
    }

    #[test]
    fn exit_depth_matches_its_tree_distance_from_start() {
        let mut rng = rng_from_seed(55);
        let start = Pos::new(7, 7);
        let grid = carved(15, start, &mut rng);
        let distances = tree_distances(&grid, start);
        let budget = default_step_budget(&grid);

        let (_, path) = place_exit(grid, start, &mut rng, budget).expect("exit search");

        // The carved passages form a tree, so the stack below a tile is its unique path.
        assert_eq!(distances[&path.exit] + 1, path.depth);
    }

    #[test]
    fn checked_flags_are_cleared_after_the_search() {
        let mut rng = rng_from_seed(8);
        let start = Pos::new(1, 1);
        let grid = carved(11, start, &mut rng);
        let budget = default_step_budget(&grid);
        let (grid, _) = place_exit(grid, start, &mut rng, budget).expect("exit search");
        assert!(
            grid.cells()
                .iter()
                .all(|cell| !matches!(cell.kind, CellKind::Passage { checked: true, .. }))
        );
    }

    #[test]
    fn smallest_grid_still_places_an_exit() {
        for seed in 0..32_u64 {
            let mut rng = rng_from_seed(seed);
            let start = Pos::new(1, 3);
            let grid = carved(5, start, &mut rng);
            let budget = default_step_budget(&grid);
            let (grid, path) = place_exit(grid, start, &mut rng, budget).expect("exit search");
            assert!(grid.cell(path.exit).is_some_and(|cell| cell.is_exit()), "seed={seed}");
            assert_ne!(path.exit, start, "seed={seed}");
        }
    }

    #[test]
    fn tiny_budget_reports_exhaustion() {
        let mut rng = rng_from_seed(2);
        let start = Pos::new(3, 3);
        let grid = carved(21, start, &mut rng);
        let result = place_exit(grid, start, &mut rng, 3);
        assert_eq!(result.map(|(_, path)| path), Err(ExitSearchError::StepBudgetExhausted { budget: 3 }));
    }

    #[test]
    fn isolated_start_reports_search_exhausted() {
        let mut grid = Grid::new(8, 0, 7);
        let start = Pos::new(3, 3);
        grid.set_kind(start, CellKind::PASSAGE);
        grid.set_kind(Pos::new(5, 5), CellKind::PASSAGE);
        grid.set_kind(Pos::new(1, 1), CellKind::PASSAGE);
        let mut rng = rng_from_seed(0);

        let result = place_exit(grid, start, &mut rng, 100);

        assert_eq!(
            result.map(|(_, path)| path),
            Err(ExitSearchError::SearchExhausted { explored: 0, total: 3 })
        );
    }
}
