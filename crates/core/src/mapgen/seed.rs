//! Seed mixing and random helpers shared by the generation passes.

use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

use crate::types::Direction;

static RUNTIME_SEED_COUNTER: AtomicU64 = AtomicU64::new(0);

pub fn generate_runtime_seed() -> u64 {
    let now_nanos =
        SystemTime::now().duration_since(UNIX_EPOCH).map_or(0_u128, |duration| duration.as_nanos());
    let pid = u64::from(process::id());
    let counter = RUNTIME_SEED_COUNTER.fetch_add(1, Ordering::Relaxed);

    let entropy = (now_nanos as u64)
        ^ ((now_nanos >> 64) as u64)
        ^ pid.rotate_left(17)
        ^ counter.rotate_left(7);

    mix_seed_stream(entropy, counter)
}

/// Seed for retry `attempt`; attempt zero keeps the caller's seed.
pub(super) fn derive_attempt_seed(seed: u64, attempt: u32) -> u64 {
    if attempt == 0 {
        return seed;
    }
    mix_seed_stream(seed, u64::from(attempt))
}

pub(super) fn mix_seed_stream(seed: u64, stream: u64) -> u64 {
    let mut mixed = seed ^ stream.wrapping_mul(0xD6E8_FD9A_5B89_7A4D);
    mixed ^= mixed >> 33;
    mixed = mixed.wrapping_mul(0xFF51_AFD7_ED55_8CCD);
    mixed ^= mixed >> 33;
    mixed = mixed.wrapping_mul(0xC4CE_B9FE_1A85_EC53);
    mixed ^ (mixed >> 33)
}

pub(super) fn rng_from_seed(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Uniform index in `0..bound`, rejecting the biased tail of the `u64` range.
pub(super) fn random_index(rng: &mut ChaCha8Rng, bound: usize) -> usize {
    debug_assert!(bound > 0);
    let bound = bound as u64;
    let zone = u64::MAX - (u64::MAX % bound);
    loop {
        let value = rng.next_u64();
        if value < zone {
            return (value % bound) as usize;
        }
    }
}

pub(super) fn shuffled_directions(rng: &mut ChaCha8Rng) -> [Direction; 4] {
    let mut directions = Direction::ALL;
    for i in (1..directions.len()).rev() {
        let j = random_index(rng, i + 1);
        directions.swap(i, j);
    }
    directions
}

/// Random odd coordinate in `[1, size - 2]`.
pub(super) fn random_odd_coordinate(rng: &mut ChaCha8Rng, size: usize) -> i32 {
    let room_count = (size - 1) / 2;
    (2 * random_index(rng, room_count) + 1) as i32
}
