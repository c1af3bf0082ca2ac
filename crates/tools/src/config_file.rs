//! TOML config loading with command-line overrides.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use maze_core::MazeConfig;

/// Values given on the command line; each one replaces the file's value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub grid_size: Option<usize>,
    pub cell_size: Option<u32>,
    pub border: Option<u32>,
    pub seed: Option<u64>,
}

pub fn load_config(path: &Path) -> Result<MazeConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

pub fn resolve_config(path: Option<&Path>, overrides: ConfigOverrides) -> Result<MazeConfig> {
    let mut config = match path {
        Some(path) => load_config(path)?,
        None => MazeConfig::default(),
    };

    if let Some(grid_size) = overrides.grid_size {
        config.grid_size = grid_size;
    }
    if let Some(cell_size) = overrides.cell_size {
        config.cell_size = cell_size;
    }
    if let Some(border) = overrides.border {
        config.border = border;
    }
    if overrides.seed.is_some() {
        config.seed = overrides.seed;
    }

    config.validate().context("Invalid maze configuration")?;
    Ok(config)
}
