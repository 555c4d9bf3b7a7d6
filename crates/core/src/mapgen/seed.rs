//! Deterministic seed mixing and pseudo-random stream helpers for map generation.

use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use xxhash_rust::xxh3::xxh3_64;

/// Seeded value source owned by exactly one generation call.
pub struct SeededRng {
    stream: ChaCha8Rng,
}

impl SeededRng {
    pub fn from_seed_str(seed: &str) -> Self {
        Self { stream: ChaCha8Rng::seed_from_u64(hash_seed(seed)) }
    }

    /// Uniform integer in `[min, max]`.
    pub fn next_int(&mut self, min: i32, max: i32) -> i32 {
        debug_assert!(min <= max, "reversed range {min}..={max}");
        if max <= min {
            return min;
        }
        let range_size = (i64::from(max) - i64::from(min) + 1) as u64;
        let offset = self.stream.next_u64() % range_size;
        (i64::from(min) + offset as i64) as i32
    }

    /// Uniform count in `[min, max]`; draws exactly like `next_int` over the same range.
    pub fn next_count(&mut self, min: u32, max: u32) -> u32 {
        if max <= min {
            return min;
        }
        let range_size = u64::from(max - min) + 1;
        let offset = self.stream.next_u64() % range_size;
        min + offset as u32
    }

    pub fn next_bool(&mut self, probability: f64) -> bool {
        let fraction = (self.stream.next_u64() >> 11) as f64 / (1_u64 << 53) as f64;
        fraction < probability
    }

    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let index = self.next_int(0, (items.len() - 1) as i32) as usize;
        items.get(index)
    }

    pub fn shuffle<T: Clone>(&mut self, items: &[T]) -> Vec<T> {
        let mut shuffled = items.to_vec();
        for index in (1..shuffled.len()).rev() {
            let swap_with = self.next_int(0, index as i32) as usize;
            shuffled.swap(index, swap_with);
        }
        shuffled
    }
}

pub fn derive_floor_seed(run_seed: &str, floor_number: u32) -> String {
    format!("{run_seed}:{floor_number}")
}

fn hash_seed(seed: &str) -> u64 {
    xxh3_64(seed.as_bytes())
}
