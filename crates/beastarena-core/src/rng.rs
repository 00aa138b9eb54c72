//! Random number generator abstraction for determinism.
//!
//! In production, this wraps a seeded `StdRng`. In tests and replays,
//! a scripted implementation is injected. Every battle owns its own
//! generator; nothing here is process-global.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Abstraction over random number generation.
pub trait DeterministicRng: Send + Sync {
    /// Generate a random `u32` in the range `[min, max]` inclusive.
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32;

    /// Generate a random `f64` in `[0.0, 1.0)`.
    fn next_f64(&mut self) -> f64;

    /// Returns `true` with the given probability.
    ///
    /// Probabilities at or below zero never fire; at or above one always do.
    fn roll(&mut self, probability: f64) -> bool {
        if probability <= 0.0 {
            return false;
        }
        self.next_f64() < probability
    }

    /// Fisher-Yates shuffle driven by `next_u32_range`.
    #[allow(clippy::cast_possible_truncation)]
    fn shuffle_indices(&mut self, len: usize) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..len).collect();
        for i in (1..len).rev() {
            let j = self.next_u32_range(0, i as u32) as usize;
            indices.swap(i, j.min(i));
        }
        indices
    }
}

/// Production RNG backed by `rand`'s `StdRng`.
#[derive(Debug, Clone)]
pub struct SeededRng {
    inner: StdRng,
}

impl SeededRng {
    /// Creates a generator whose whole stream is determined by `seed`.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }

    /// Creates a generator seeded from the operating system.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            inner: StdRng::from_os_rng(),
        }
    }
}

impl DeterministicRng for SeededRng {
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        self.inner.random_range(min..=max)
    }

    fn next_f64(&mut self) -> f64 {
        self.inner.random::<f64>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_produces_same_stream() {
        let mut a = SeededRng::from_seed(42);
        let mut b = SeededRng::from_seed(42);
        for _ in 0..32 {
            assert_eq!(a.next_u32_range(0, 1000), b.next_u32_range(0, 1000));
            assert!((a.next_f64() - b.next_f64()).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_next_u32_range_stays_in_bounds() {
        let mut rng = SeededRng::from_seed(7);
        for _ in 0..200 {
            let v = rng.next_u32_range(3, 9);
            assert!((3..=9).contains(&v));
        }
    }

    #[test]
    fn test_degenerate_range_returns_min() {
        let mut rng = SeededRng::from_seed(7);
        assert_eq!(rng.next_u32_range(5, 5), 5);
    }

    #[test]
    fn test_roll_bounds() {
        let mut rng = SeededRng::from_seed(1);
        for _ in 0..100 {
            assert!(!rng.roll(0.0));
            assert!(rng.roll(1.0));
        }
    }

    #[test]
    fn test_shuffle_indices_is_a_permutation() {
        let mut rng = SeededRng::from_seed(99);
        let mut shuffled = rng.shuffle_indices(8);
        shuffled.sort_unstable();
        assert_eq!(shuffled, (0..8).collect::<Vec<_>>());
    }

    #[test]
    fn test_shuffle_indices_handles_empty_and_single() {
        let mut rng = SeededRng::from_seed(99);
        assert!(rng.shuffle_indices(0).is_empty());
        assert_eq!(rng.shuffle_indices(1), vec![0]);
    }
}
