//! Generation parameters shared by the library entry points and the tools.

use serde::{Deserialize, Serialize};

use crate::error::GenerationError;
use crate::mapgen::{MIN_GRID_SIZE, normalize_size};

pub const DEFAULT_CELL_SIZE: u32 = 32;
pub const DEFAULT_BORDER: u32 = 2;
pub const DEFAULT_GRID_SIZE: usize = 21;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MazeConfig {
    /// Edge length of one cell in pixels.
    pub cell_size: u32,
    /// Frame drawn around the grid by the renderer, in pixels.
    pub border: u32,
    /// Requested cells per side; even values are rounded up.
    pub grid_size: usize,
    /// Fixed seed for reproducible output; a runtime seed is used when absent.
    pub seed: Option<u64>,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            border: DEFAULT_BORDER,
            grid_size: DEFAULT_GRID_SIZE,
            seed: None,
        }
    }
}

impl MazeConfig {
    pub fn new(cell_size: u32, border: u32, grid_size: usize) -> Self {
        Self { cell_size, border, grid_size, seed: None }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn normalized_size(&self) -> usize {
        normalize_size(self.grid_size)
    }

    pub fn validate(&self) -> Result<usize, GenerationError> {
        let size = self.normalized_size();
        if size < MIN_GRID_SIZE {
            return Err(GenerationError::GridTooSmall { size, minimum: MIN_GRID_SIZE });
        }
        let extent = (size as u64)
            .checked_mul(u64::from(self.cell_size))
            .and_then(|cells| cells.checked_add(2 * u64::from(self.border)));
        if !extent.is_some_and(|extent| extent <= i32::MAX as u64) {
            return Err(GenerationError::PixelExtentOverflow {
                size,
                cell_size: self.cell_size,
                border: self.border,
            });
        }
        Ok(size)
    }
}
