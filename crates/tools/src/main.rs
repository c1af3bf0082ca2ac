use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use maze_core::generate_from_config;
use tools::config_file::{ConfigOverrides, resolve_config};
use tools::{ascii, init_tracing};
use tracing::info;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Ascii,
    Json,
}

#[derive(Parser)]
#[command(author, version, about = "Generate a maze level", long_about = None)]
struct Args {
    /// TOML file with cell_size, border, grid_size and seed
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Cells per side; even values are rounded up
    #[arg(short, long)]
    size: Option<usize>,

    /// Cell edge length in pixels
    #[arg(long)]
    cell_size: Option<u32>,

    /// Frame width around the grid in pixels
    #[arg(long)]
    border: Option<u32>,

    /// Fixed seed; a runtime seed is used when neither flag nor file sets one
    #[arg(long)]
    seed: Option<u64>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Ascii)]
    format: OutputFormat,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let overrides = ConfigOverrides {
        grid_size: args.size,
        cell_size: args.cell_size,
        border: args.border,
        seed: args.seed,
    };
    let config = resolve_config(args.config.as_deref(), overrides)?;
    let maze = generate_from_config(&config).context("Maze generation failed")?;

    info!(
        seed = maze.seed,
        fingerprint = %format!("0x{:016x}", maze.fingerprint()),
        passages = maze.grid.passage_count(),
        "generated {}x{} maze",
        maze.size(),
        maze.size()
    );

    match args.format {
        OutputFormat::Ascii => print!("{}", ascii::render(&maze)),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&maze)
                .with_context(|| "Failed to serialize maze JSON")?;
            println!("{json}");
        }
    }

    Ok(())
}
