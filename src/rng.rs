//! Random number generator abstraction for the solver.
//!
//! All random draws (the seed-step cell pick and the weighted collapse)
//! go through the `SolverRng` trait so a run replays byte-identically under
//! a fixed seed. Two implementations are provided:
//!
//! - `StdRandom`: wraps `rand::rngs::StdRng`, the default.
//! - `XorShiftRandom`: a self-contained xorshift64 generator for hosts that
//!   want a reproducible sequence independent of the `rand` version.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Uniform integer source consumed by the solver.
pub trait SolverRng {
    /// Uniform index in `[0, bound)`. `bound` must be non-zero.
    fn next_index(&mut self, bound: usize) -> usize;

    /// Uniform weight threshold in `[1, total]`. `total` must be non-zero.
    fn next_weight(&mut self, total: u64) -> u64;
}

/// Default RNG over `rand::rngs::StdRng`.
pub struct StdRandom {
    rng: StdRng,
}

impl StdRandom {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seed from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl SolverRng for StdRandom {
    fn next_index(&mut self, bound: usize) -> usize {
        debug_assert!(bound > 0, "next_index bound must be non-zero");
        self.rng.gen_range(0..bound)
    }

    fn next_weight(&mut self, total: u64) -> u64 {
        debug_assert!(total > 0, "next_weight total must be non-zero");
        self.rng.gen_range(1..=total)
    }
}

/// Dependency-free xorshift64 generator.
///
/// The sequence is fixed by construction, which keeps recorded runs
/// replayable across toolchain and dependency upgrades.
pub struct XorShiftRandom {
    state: u64,
}

impl XorShiftRandom {
    pub fn from_seed(seed: u64) -> Self {
        // State must never be zero.
        Self {
            state: seed.max(1),
        }
    }

    fn next(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }
}

impl SolverRng for XorShiftRandom {
    fn next_index(&mut self, bound: usize) -> usize {
        debug_assert!(bound > 0, "next_index bound must be non-zero");
        (self.next() % bound as u64) as usize
    }

    fn next_weight(&mut self, total: u64) -> u64 {
        debug_assert!(total > 0, "next_weight total must be non-zero");
        1 + self.next() % total
    }
}
