//! Seeded maze generation with bounded retries.

mod pipeline;

use tracing::{info, instrument, warn};

use super::model::Maze;
use super::seed::derive_attempt_seed;
use crate::config::MazeConfig;
use crate::error::GenerationError;

use pipeline::{AttemptError, build_maze};

pub const MIN_GRID_SIZE: usize = 5;
pub const MAX_GENERATION_ATTEMPTS: u32 = 8;

#[derive(Clone, Debug)]
pub struct MazeGenerator {
    config: MazeConfig,
    exit_step_budget: Option<usize>,
    max_attempts: u32,
}

impl MazeGenerator {
    pub fn new(config: MazeConfig) -> Self {
        Self { config, exit_step_budget: None, max_attempts: MAX_GENERATION_ATTEMPTS }
    }

    /// Overrides the exit search budget, which otherwise scales with the grid area.
    pub fn with_exit_step_budget(mut self, budget: usize) -> Self {
        self.exit_step_budget = Some(budget);
        self
    }

    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    /// Same seed and config always produce the same maze, retries included.
    #[instrument(level = "debug", skip(self), fields(size = self.config.grid_size))]
    pub fn generate(&self, seed: u64) -> Result<Maze, GenerationError> {
        let size = self.config.validate()?;

        let mut attempt = 0_u32;
        loop {
            let attempt_seed = derive_attempt_seed(seed, attempt);
            match build_maze(&self.config, size, attempt_seed, self.exit_step_budget) {
                Ok(mut maze) => {
                    attempt += 1;
                    maze.seed = seed;
                    maze.attempts = attempt;
                    info!(
                        size,
                        seed,
                        attempts = attempt,
                        keys = maze.keys.len(),
                        exit = ?maze.exit,
                        "maze generated"
                    );
                    return Ok(maze);
                }
                Err(AttemptError::Fatal(error)) => return Err(error),
                Err(AttemptError::ExitSearch(error)) => {
                    attempt += 1;
                    if attempt >= self.max_attempts {
                        return Err(GenerationError::AttemptsExhausted {
                            attempts: attempt,
                            last: error,
                        });
                    }
                    warn!(seed, attempt, %error, "exit search failed, regenerating");
                }
            }
        }
    }
}
