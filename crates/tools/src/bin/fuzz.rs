use anyhow::{Result, bail};
use clap::Parser;
use maze_core::mapgen::MIN_GRID_SIZE;
use maze_core::{MazeConfig, check_invariants, generate_seeded};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use tools::init_tracing;
use tracing::{debug, info};

#[derive(Parser)]
#[command(author, version, about = "Sweep seeds and sizes through the maze invariant checks", long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 1000)]
    count: u32,
    #[arg(long, default_value_t = 5)]
    min_size: usize,
    #[arg(long, default_value_t = 101)]
    max_size: usize,
}

impl Args {
    fn check_sizes(&self) -> Result<()> {
        if self.min_size < MIN_GRID_SIZE {
            bail!("--min-size {} is below the smallest maze size {}", self.min_size, MIN_GRID_SIZE);
        }
        if self.min_size > self.max_size {
            bail!("--min-size {} exceeds --max-size {}", self.min_size, self.max_size);
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    args.check_sizes()?;

    info!(
        seed = args.seed,
        count = args.count,
        "fuzzing sizes {}..={}",
        args.min_size,
        args.max_size
    );
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let span = (args.max_size - args.min_size + 1) as u64;
    let mut retried = 0_u32;

    for run in 0..args.count {
        let size = args.min_size + (rng.next_u64() % span) as usize;
        let maze_seed = rng.next_u64();
        let config = MazeConfig::new(16, 0, size);

        let maze = match generate_seeded(&config, maze_seed) {
            Ok(maze) => maze,
            Err(error) => bail!("run {run}: size={size} seed={maze_seed} failed: {error}"),
        };
        if let Err(violation) = check_invariants(&maze) {
            bail!("run {run}: size={size} seed={maze_seed} broke an invariant: {violation}");
        }
        if maze.attempts > 1 {
            retried += 1;
        }
        debug!(run, size, seed = maze_seed, attempts = maze.attempts, "maze ok");
    }

    println!("Fuzzing completed successfully: {} mazes, {} needed retries.", args.count, retried);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_sizes_are_accepted() {
        let args = Args::try_parse_from(["fuzz"]).expect("no flags needed");
        assert!(args.check_sizes().is_ok());
    }

    #[test]
    fn min_size_below_the_smallest_maze_is_rejected() {
        let args = Args::try_parse_from(["fuzz", "--min-size", "3"]).expect("valid flags");
        let err = args.check_sizes().expect_err("size 3 is too small");
        assert!(err.to_string().contains("below the smallest maze size 5"), "{err}");
    }

    #[test]
    fn inverted_range_is_rejected() {
        let args = Args::try_parse_from(["fuzz", "--min-size", "31", "--max-size", "21"])
            .expect("valid flags");
        assert!(args.check_sizes().is_err());
    }
}
