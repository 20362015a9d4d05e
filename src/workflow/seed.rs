//! Random seeds for seeded workflow variants.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of build seeds, injected into the workflow synthesizer.
pub trait SeedSource {
    /// Next non-negative seed.
    fn next_seed(&mut self) -> u32;
}

/// Seeds drawn from a `StdRng`.
pub struct RandomSeeds {
    rng: StdRng,
}

impl RandomSeeds {
    /// Generator seeded from OS entropy. Values are not reproducible.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Generator with a fixed seed, yielding a reproducible sequence.
    #[allow(dead_code)]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl SeedSource for RandomSeeds {
    fn next_seed(&mut self) -> u32 {
        self.rng.gen_range(0..=i32::MAX as u32)
    }
}

/// Command-line flag carrying a seed to the build script.
pub fn seed_flag(seed: u32) -> String {
    format!("--seed {}", seed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeds_fit_in_31_bits() {
        let mut seeds = RandomSeeds::from_entropy();
        for _ in 0..1000 {
            assert!(seeds.next_seed() <= i32::MAX as u32);
        }
    }

    #[test]
    fn test_fixed_seed_is_reproducible() {
        let mut a = RandomSeeds::with_seed(7);
        let mut b = RandomSeeds::with_seed(7);
        let first: Vec<u32> = (0..5).map(|_| a.next_seed()).collect();
        let second: Vec<u32> = (0..5).map(|_| b.next_seed()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_seed_flag() {
        assert_eq!(seed_flag(1234), "--seed 1234");
    }
}
