pub mod config;
pub mod error;
pub mod mapgen;
pub mod types;

pub use config::MazeConfig;
pub use error::GenerationError;
pub use mapgen::{
    Cell, CellKind, Grid, Maze, MazeGenerator, WallMask, check_invariants, generate,
    generate_from_config, generate_seeded,
};
pub use types::*;
