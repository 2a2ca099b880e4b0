//! Skiplists use a probabilistic distribution of nodes over the internal
//! levels, whereby the lowest level contains all the nodes, and each level
//! above it contains a random subset of the nodes on the level below.
//!
//! A geometric distribution is used whereby the chance that a node reaches
//! level $n + 1$ is $p$ times the chance of reaching level $n$ (with
//! $0 < p < 1$). This is the only source of balance in the list: there is no
//! rebalancing, rotation or merging.
//!
//! It is very unlikely that this will need to be changed as the default should
//! suffice, but if need be custom level generators can be implemented (the
//! tests use one to pin down exact node layouts).

pub mod geometric;

pub use geometric::{Geometric, GeometricError};

// ////////////////////////////////////////////////////////////////////////////
// Level Generator
// ////////////////////////////////////////////////////////////////////////////

/// Upon the insertion of a new node in the list, the node is replicated to high
/// levels with a certain probability as determined by a [`LevelGenerator`].
///
/// A level is the number of linked tiers a node participates in, so every node
/// has a level of at least 1.
pub trait LevelGenerator {
    /// The total number of levels that are assumed to exist.
    #[must_use]
    fn total(&self) -> usize;

    /// Generate a random level for a new node in the range `[1, total]`.
    ///
    /// This function should _never_ return 0 or a level greater than
    /// [`total`][LevelGenerator::total].
    #[must_use]
    fn level(&mut self) -> usize;

    /// Create an independent generator with the same configuration.
    ///
    /// The new generator owns its own random stream. Implementations should
    /// derive it deterministically from their own state so that a seeded
    /// generator forks into a seeded generator.
    #[must_use]
    fn fork(&self) -> Self
    where
        Self: Sized;
}
