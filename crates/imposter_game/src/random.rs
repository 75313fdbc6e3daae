//! Injectable randomness for round dealing and player ids.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{instrument, trace};

/// Source of the random choices made by the engine.
///
/// Dealing a round draws three indices in order: the category (among the
/// enabled ones), the secret word, then the imposter.
pub trait RandomSource: std::fmt::Debug {
    /// Returns an index uniformly distributed over `0..upper`.
    ///
    /// Callers never pass `upper == 0`.
    fn pick_index(&mut self, upper: usize) -> usize;

    /// Returns 64 random bits, used for player id suffixes.
    fn next_u64(&mut self) -> u64;
}

/// Random source backed by the standard RNG.
#[derive(Debug, Clone)]
pub struct ThreadRandom {
    rng: StdRng,
}

impl ThreadRandom {
    /// Creates a source seeded from the operating system.
    #[instrument]
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Creates a reproducible source from a fixed seed.
    #[instrument]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for ThreadRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for ThreadRandom {
    fn pick_index(&mut self, upper: usize) -> usize {
        self.rng.random_range(0..upper)
    }

    fn next_u64(&mut self) -> u64 {
        self.rng.random()
    }
}

/// Random source that replays a fixed list of picks.
///
/// Each pick is reduced modulo the requested bound; once the script runs out
/// every pick is `0`. `next_u64` counts upwards so generated ids stay unique.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    picks: VecDeque<usize>,
    counter: u64,
}

impl ScriptedRandom {
    /// Creates a source that returns `picks` in order.
    #[instrument]
    pub fn new(picks: Vec<usize>) -> Self {
        Self {
            picks: picks.into(),
            counter: 0,
        }
    }
}

impl RandomSource for ScriptedRandom {
    fn pick_index(&mut self, upper: usize) -> usize {
        let pick = self.picks.pop_front().unwrap_or(0) % upper.max(1);
        trace!(pick, upper, "Scripted pick");
        pick
    }

    fn next_u64(&mut self) -> u64 {
        self.counter += 1;
        self.counter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_picks_wrap_and_exhaust() {
        let mut rng = ScriptedRandom::new(vec![2, 7]);
        assert_eq!(rng.pick_index(5), 2);
        assert_eq!(rng.pick_index(5), 2);
        assert_eq!(rng.pick_index(5), 0);
        assert_ne!(rng.next_u64(), rng.next_u64());
    }

    #[test]
    fn test_thread_random_stays_in_range() {
        let mut rng = ThreadRandom::seeded(42);
        for upper in 1..20 {
            assert!(rng.pick_index(upper) < upper);
        }
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let mut a = ThreadRandom::seeded(7);
        let mut b = ThreadRandom::seeded(7);
        let xs: Vec<usize> = (0..10).map(|_| a.pick_index(100)).collect();
        let ys: Vec<usize> = (0..10).map(|_| b.pick_index(100)).collect();
        assert_eq!(xs, ys);
    }
}
