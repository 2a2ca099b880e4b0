//! Geometric level generator.

use rand::{Rng, SeedableRng, rngs::SmallRng};
use thiserror::Error;

use crate::level_generator::LevelGenerator;

#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
/// Errors that can occur when creating a [`Geometric`] level generator.
#[expect(
    clippy::module_name_repetitions,
    reason = "Using 'Error' would be too generic and may cause confusion."
)]
#[non_exhaustive]
pub enum GeometricError {
    /// The maximum number of levels must be non-zero.
    #[error("max must be non-zero.")]
    ZeroMax,
    /// The probability `$p$` must be in the range `$(0, 1)$`.
    #[error("p must be in (0, 1).")]
    InvalidProbability,
}

/// A level generator using a geometric distribution.
///
/// Every node starts at level 1. A uniform double is drawn from `$[0, 1)$` and,
/// as long as it falls below `$p$` and the node has not reached the ceiling,
/// the node is promoted one level and another double is drawn. The expected
/// level is therefore `$1 / (1 - p)$`, truncated at `total`.
///
/// The random stream is owned by the generator. Given the same seed and the
/// same sequence of calls, the same levels are produced.
#[derive(Debug, Clone)]
pub struct Geometric<R = SmallRng> {
    /// The total number of levels that are assumed to exist.
    total: usize,
    /// The probability that a node is promoted to the next level.
    p: f64,
    /// The random number generator.
    rng: R,
}

impl Geometric {
    /// Create a new geometric level generator with `total` number of levels,
    /// and `p` as the probability that a given node is present in the next
    /// level. The random stream is seeded from the thread-local generator.
    ///
    /// # Errors
    ///
    /// `p` must be strictly between 0 and 1, and `total` must be at least 1.
    #[inline]
    pub fn new(total: usize, p: f64) -> Result<Self, GeometricError> {
        Self::with_rng(total, p, SmallRng::from_rng(&mut rand::rng()))
    }

    /// Create a new geometric level generator whose random stream is seeded
    /// with `seed`, making the sequence of levels reproducible.
    ///
    /// # Errors
    ///
    /// See [`Geometric::new`].
    #[inline]
    pub fn with_seed(total: usize, p: f64, seed: u64) -> Result<Self, GeometricError> {
        Self::with_rng(total, p, SmallRng::seed_from_u64(seed))
    }
}

impl<R> Geometric<R>
where
    R: Rng,
{
    /// Create a new geometric level generator drawing from the given random
    /// number generator.
    ///
    /// # Errors
    ///
    /// See [`Geometric::new`].
    #[inline]
    pub fn with_rng(total: usize, p: f64, rng: R) -> Result<Self, GeometricError> {
        if total == 0 {
            return Err(GeometricError::ZeroMax);
        }
        if !(0.0 < p && p < 1.0) {
            return Err(GeometricError::InvalidProbability);
        }
        Ok(Geometric { total, p, rng })
    }

    /// The probability that a node is promoted to the next level.
    #[inline]
    #[must_use]
    pub fn p(&self) -> f64 {
        self.p
    }
}

impl<R> LevelGenerator for Geometric<R>
where
    R: Rng + SeedableRng + Clone,
{
    #[inline]
    fn total(&self) -> usize {
        self.total
    }

    /// Generate a level for a new node using a geometric distribution.
    ///
    /// A double is drawn before the ceiling is tested, so a node at the
    /// ceiling still consumes one draw.
    #[inline]
    fn level(&mut self) -> usize {
        let mut level = 1;
        while self.rng.random::<f64>() < self.p && level < self.total {
            level += 1;
        }
        level
    }

    /// Fork the generator, seeding the child's stream from a snapshot of this
    /// generator's stream.
    #[inline]
    fn fork(&self) -> Self {
        Geometric {
            total: self.total,
            p: self.p,
            rng: R::from_rng(&mut self.rng.clone()),
        }
    }
}
