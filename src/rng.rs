//! Random index source for maze generation and cheese placement.
//!
//! Both the generator and the cheese placer only ever need "a uniform index
//! below `bound`", so they draw through [`RandomIndex`] instead of a concrete
//! RNG. Any [`rand::Rng`] works; tests plug in scripted sources to pin down
//! exact mazes.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniformly distributed indices.
pub trait RandomIndex {
    /// Returns an index in `0..bound`. `bound` is always at least 1.
    fn random_index(&mut self, bound: usize) -> usize;
}

impl<R: Rng + ?Sized> RandomIndex for R {
    fn random_index(&mut self, bound: usize) -> usize {
        self.gen_range(0..bound)
    }
}

/// Builds the session RNG: seeded when a seed is given, from entropy otherwise.
pub fn session_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

#[cfg(test)]
pub(crate) mod scripted {
    use super::RandomIndex;

    /// Replays a fixed list of draws, cycling when exhausted.
    pub struct Scripted {
        draws: Vec<usize>,
        next: usize,
    }

    impl Scripted {
        pub fn new(draws: &[usize]) -> Self {
            Self {
                draws: draws.to_vec(),
                next: 0,
            }
        }
    }

    impl RandomIndex for Scripted {
        fn random_index(&mut self, bound: usize) -> usize {
            let draw = self.draws[self.next % self.draws.len()];
            self.next += 1;
            draw % bound
        }
    }
}
