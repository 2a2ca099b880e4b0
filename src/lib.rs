//! Two probabilistic data structures.
//!
//! - [`SkipList`]: an ordered collection of unique elements with expected
//!   `O(log(n))` search, insertion and removal. Nodes live in an arena owned
//!   by the list and are addressed through copyable [`NodeHandle`]s, so a
//!   caller can hold on to a node and later remove it, or walk to its
//!   neighbours, without borrowing the list.
//! - [`BloomFilter`]: a fixed-size set membership test with no false
//!   negatives, deriving many hash functions from a single wide
//!   [FNV](fnv) digest.
//!
//! The skiplist's ordering is given by a [`Comparator`], which **must** be
//! well-behaved (see the [`comparator`] module). The balance of the list comes
//! solely from the random levels drawn by its [`LevelGenerator`]; lists built
//! with a seed are fully reproducible.
//!
//! ```
//! use skipbloom::{BloomFilter, SkipList};
//!
//! let mut words: SkipList<&str> = SkipList::with_seed(8, 0.5, 42).unwrap();
//! words.extend(["pear", "apple", "fig"]);
//! let mut filter = BloomFilter::new(1 << 12, 4, 128).unwrap();
//! for word in &words {
//!     filter.insert(word.as_bytes());
//! }
//! assert!(filter.contains(b"fig"));
//! assert_eq!(words.front(), Some(&"apple"));
//! ```

pub mod bloom_filter;
pub mod comparator;
pub mod fnv;
pub mod level_generator;
pub mod skiplist;
mod skipnode;

pub use bloom_filter::{BloomFilter, BloomFilterError};
pub use comparator::{Comparator, Natural};
pub use fnv::{Digest, Fnv1, Fnv1a, HashWidth};
pub use level_generator::{Geometric, GeometricError, LevelGenerator};
pub use skiplist::{Iter, NodeHandle, SkipList, SkipListError};
