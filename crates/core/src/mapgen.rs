//! Procedural maze generation split into one module per pass.

pub mod invariants;
pub mod model;

mod carver;
mod exit_path;
mod generator;
mod grid;
mod items;
mod seed;
mod walls;

pub use exit_path::{EXIT_STEPS_PER_CELL, ExitPath, ExitSearchError};
pub use generator::{MAX_GENERATION_ATTEMPTS, MIN_GRID_SIZE, MazeGenerator};
pub use grid::{Grid, normalize_size};
pub use invariants::{InvariantViolation, check_invariants};
pub use items::keys_required;
pub use model::{Cell, CellKind, Maze, WallMask};
pub use seed::generate_runtime_seed;
pub use walls::neighbor_mask;

use crate::config::MazeConfig;
use crate::error::GenerationError;

/// Generates a level from a fresh runtime seed.
pub fn generate(cell_size: u32, border: u32, grid_size: usize) -> Result<Maze, GenerationError> {
    generate_seeded(&MazeConfig::new(cell_size, border, grid_size), generate_runtime_seed())
}

pub fn generate_seeded(config: &MazeConfig, seed: u64) -> Result<Maze, GenerationError> {
    MazeGenerator::new(*config).generate(seed)
}

/// Uses the config's seed when set, otherwise a runtime seed.
pub fn generate_from_config(config: &MazeConfig) -> Result<Maze, GenerationError> {
    generate_seeded(config, config.seed.unwrap_or_else(generate_runtime_seed))
}
