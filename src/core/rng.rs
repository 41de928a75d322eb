//! Seedable random source shared by every component that samples
//!
//! Each trial derives its seeds from a master seed, so runs are reproducible
//! no matter which thread evaluates a trial.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::Distribution;

/// 64-bit fractional golden-ratio constant for seed mixing
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Upper bound on re-draws when sampling a non-negative value
const MAX_REDRAWS: usize = 1_000;

/// Mix `stream` into `seed` (splitmix64 finalizer)
pub fn derive_seed(seed: u64, stream: u64) -> u64 {
    let mut z = seed ^ stream.wrapping_add(1).wrapping_mul(MIXING_CONSTANT);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// Deterministic random source
#[derive(Debug, Clone)]
pub struct SimRng(StdRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(StdRng::seed_from_u64(seed))
    }

    /// Independent child stream for `stream`, derived from `seed`
    pub fn for_stream(seed: u64, stream: u64) -> Self {
        Self::new(derive_seed(seed, stream))
    }

    /// Draw one value from `distribution`
    #[inline]
    pub fn sample<T, D: Distribution<T>>(&mut self, distribution: &D) -> T {
        distribution.sample(&mut self.0)
    }

    /// Draw from `distribution`, re-sampling negative values
    ///
    /// Falls back to zero if no non-negative value shows up within
    /// `MAX_REDRAWS` tries, which only happens for distributions that sit
    /// almost entirely below zero.
    pub fn sample_non_negative<D: Distribution<f64>>(&mut self, distribution: &D) -> f64 {
        for _ in 0..MAX_REDRAWS {
            let value = distribution.sample(&mut self.0);
            if value >= 0.0 {
                return value;
            }
        }
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_distr::{Normal, Uniform};

    #[test]
    fn test_same_seed_same_stream() {
        let uniform = Uniform::new(0.0, 1.0);
        let mut a = SimRng::new(42);
        let mut b = SimRng::new(42);
        for _ in 0..100 {
            let (x, y): (f64, f64) = (a.sample(&uniform), b.sample(&uniform));
            assert_eq!(x.to_bits(), y.to_bits());
        }
    }

    #[test]
    fn test_derived_streams_differ() {
        assert_ne!(derive_seed(42, 0), derive_seed(42, 1));
        assert_ne!(derive_seed(42, 0), derive_seed(43, 0));
        assert_eq!(derive_seed(42, 5), derive_seed(42, 5));
    }

    #[test]
    fn test_non_negative_sampling() {
        // Mean close to zero so many raw draws are negative
        let normal = Normal::new(0.1, 1.0).unwrap();
        let mut rng = SimRng::new(7);
        for _ in 0..1_000 {
            assert!(rng.sample_non_negative(&normal) >= 0.0);
        }
    }

    #[test]
    fn test_non_negative_gives_up_at_zero() {
        let normal = Normal::new(-1_000.0, 1.0).unwrap();
        let mut rng = SimRng::new(7);
        assert_eq!(rng.sample_non_negative(&normal), 0.0);
    }
}
