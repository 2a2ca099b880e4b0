//! A Bloom filter: a fixed-size probabilistic set which may report false
//! positives but never false negatives.
//!
//! Each element is hashed once with a wide digest. The digest is read as
//! 32-bit words, and the words of its first half are paired with those of its
//! second half. Every pair `(x, y)` yields one or more bit positions through
//! enhanced double hashing (Dillinger and Manolios, "Bloom Filters in
//! Probabilistic Verification"), so that many hash functions can be derived
//! from a single digest.

use std::{f64::consts::LN_2, fmt};

use bitvec::{order::Lsb0, vec::BitVec};
use thiserror::Error;
use tracing::debug;

use crate::fnv::{Digest, Fnv1a, HashWidth};

#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
/// Errors that can occur when creating a [`BloomFilter`].
#[expect(
    clippy::module_name_repetitions,
    reason = "Using 'Error' would be too generic and may cause confusion."
)]
#[non_exhaustive]
pub enum BloomFilterError {
    /// The filter must have at least one bit.
    #[error("size must be non-zero.")]
    ZeroSize,
    /// The filter must use at least one hash function.
    #[error("n_hash_functions must be non-zero.")]
    ZeroHashFunctions,
    /// The requested digest width is zero or wider than 1024 bits.
    #[error("hash size must be in [1, 1024] bits, got {0}.")]
    UnsupportedHashSize(usize),
    /// The expected number of elements must be non-zero.
    #[error("n_elements must be non-zero.")]
    ZeroElements,
}

/// A Bloom filter over byte strings.
///
/// Bits are only ever set, never cleared: there is no removal. The number of
/// bits is fixed at construction (rounded up to a whole number of bytes).
///
/// # Examples
///
/// ```
/// use skipbloom::BloomFilter;
///
/// let mut filter = BloomFilter::new(1024, 4, 64).unwrap();
/// filter.insert(b"hello");
/// assert!(filter.contains(b"hello"));
/// assert_eq!(filter.n_elements(), 1);
/// ```
#[derive(Clone)]
pub struct BloomFilter<D = Fnv1a> {
    /// Bit `b` lives in byte `b / 8`, at position `b % 8`.
    bits: BitVec<u8, Lsb0>,
    n_hash_functions: usize,
    digest: D,
    n_elements: u64,
}

impl BloomFilter {
    /// Create a filter of `size` bits using `n_hash_functions` hash functions
    /// derived from an FNV-1a digest of at least `hash_bits` bits.
    ///
    /// The digest width is the narrowest of 64, 128, 256, 512 and 1024 bits
    /// which is at least `hash_bits`. Wider digests provide more independent
    /// word pairs, which matters when `n_hash_functions` is large.
    ///
    /// # Errors
    ///
    /// `size` and `n_hash_functions` must be non-zero, and `hash_bits` must be
    /// in `[1, 1024]`.
    #[inline]
    pub fn new(
        size: usize,
        n_hash_functions: usize,
        hash_bits: usize,
    ) -> Result<Self, BloomFilterError> {
        let width =
            HashWidth::round_up(hash_bits).ok_or(BloomFilterError::UnsupportedHashSize(hash_bits))?;
        Self::with_digest(size, n_hash_functions, Fnv1a::new(width))
    }

    /// Create a filter of `size` bits sized for `n_elements` elements, using
    /// [`optimal_k`][BloomFilter::optimal_k] hash functions (at least one).
    ///
    /// # Errors
    ///
    /// See [`BloomFilter::new`]; `n_elements` must also be non-zero.
    #[inline]
    pub fn with_optimal_k(
        size: usize,
        n_elements: u64,
        hash_bits: usize,
    ) -> Result<Self, BloomFilterError> {
        let n_hash_functions = Self::optimal_k(size, n_elements)?.max(1);
        Self::new(size, n_hash_functions, hash_bits)
    }

    /// The number of hash functions minimising the false positive rate of a
    /// filter of `filter_size` bits holding `n_elements` elements.
    ///
    /// This uses the approximation
    ///
    /// ```math
    /// k = 3.8^{1 / (m / n + 4.2)} \cdot \frac{m}{n} \cdot \ln 2
    /// ```
    ///
    /// truncated towards zero.
    ///
    /// # Errors
    ///
    /// `n_elements` must be non-zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipbloom::BloomFilter;
    ///
    /// assert_eq!(BloomFilter::optimal_k(15_000, 2_000).unwrap(), 5);
    /// assert!(BloomFilter::optimal_k(15_000, 0).is_err());
    /// ```
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss,
        reason = "The estimate is a small non-negative float, truncated on purpose."
    )]
    pub fn optimal_k(filter_size: usize, n_elements: u64) -> Result<usize, BloomFilterError> {
        if n_elements == 0 {
            return Err(BloomFilterError::ZeroElements);
        }
        let ratio = filter_size as f64 / n_elements as f64;
        Ok((3.8_f64.powf(1.0 / (ratio + 4.2)) * ratio * LN_2) as usize)
    }
}

impl<D> BloomFilter<D>
where
    D: Digest,
{
    /// Create a filter of `size` bits deriving `n_hash_functions` hash
    /// functions from the given digest.
    ///
    /// # Errors
    ///
    /// `size` and `n_hash_functions` must be non-zero.
    pub fn with_digest(
        size: usize,
        n_hash_functions: usize,
        digest: D,
    ) -> Result<Self, BloomFilterError> {
        if size == 0 {
            return Err(BloomFilterError::ZeroSize);
        }
        if n_hash_functions == 0 {
            return Err(BloomFilterError::ZeroHashFunctions);
        }
        let size = size.div_ceil(8) * 8;
        debug!(
            size,
            n_hash_functions,
            hash_bits = digest.width().bits(),
            "Created bloom filter"
        );
        Ok(BloomFilter {
            bits: BitVec::repeat(false, size),
            n_hash_functions,
            digest,
            n_elements: 0,
        })
    }

    /// Add `data` to the filter.
    pub fn insert(&mut self, data: &[u8]) {
        let words = self.words(data);
        let bits = &mut self.bits;
        derive_positions(&words, bits.len(), self.n_hash_functions, |position| {
            bits.set(position, true);
            true
        });
        self.n_elements += 1;
    }

    /// Returns `true` if `data` may have been added to the filter, and `false`
    /// if it definitely has not.
    #[must_use]
    pub fn contains(&self, data: &[u8]) -> bool {
        let words = self.words(data);
        derive_positions(&words, self.bits.len(), self.n_hash_functions, |position| {
            self.bits[position]
        })
    }

    /// The number of bits of the filter.
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.bits.len()
    }

    /// The number of hash functions applied to every element.
    #[inline]
    #[must_use]
    pub fn n_hash_functions(&self) -> usize {
        self.n_hash_functions
    }

    /// The width in bits of the underlying digest.
    #[inline]
    #[must_use]
    pub fn hash_size(&self) -> usize {
        self.digest.width().bits()
    }

    /// The number of insertions so far, including repeated ones.
    #[inline]
    #[must_use]
    pub fn n_elements(&self) -> u64 {
        self.n_elements
    }

    /// The expected false positive rate given the number of insertions so
    /// far, `$(1 - e^{-kn/m})^k$`. This is zero for an empty filter.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "Counts far beyond 2^52 are not meaningful here."
    )]
    pub fn false_positive_rate(&self) -> f64 {
        let k = self.n_hash_functions as f64;
        let n = self.n_elements as f64;
        let m = self.bits.len() as f64;
        (1.0 - (-k * n / m).exp()).powf(k)
    }

    /// The raw bytes of the filter.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.bits.as_raw_slice()
    }

    /// Hash `data` and split the digest into little-endian 32-bit words.
    fn words(&self, data: &[u8]) -> Vec<u32> {
        self.digest
            .digest(data)
            .chunks_exact(4)
            .map(|chunk| u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect()
    }
}

impl<D> fmt::Debug for BloomFilter<D>
where
    D: Digest,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("BloomFilter")
            .field("size", &self.size())
            .field("n_hash_functions", &self.n_hash_functions)
            .field("hash_size", &self.hash_size())
            .field("n_elements", &self.n_elements)
            .finish_non_exhaustive()
    }
}

/// Derives the `k` bit positions of an element from the words of its digest,
/// passing each to `visit`. Stops early, returning `false`, as soon as `visit`
/// does.
///
/// With `pairs` word pairs available, each pair yields `k / pairs` positions
/// (at least one). When that does not divide `k`, the last pair used yields
/// the leftover positions as well. A pair `(x, y)` yielding a single position
/// uses `x + y`. A pair yielding several starts at `x` and steps by
/// `x += y; y += i`, where `i` is the index of the pair's first hash function.
/// All arithmetic is modulo `size`.
#[expect(
    clippy::cast_possible_truncation,
    reason = "Positions are reduced modulo the bit count, which fits in usize."
)]
fn derive_positions<F>(words: &[u32], size: usize, k: usize, mut visit: F) -> bool
where
    F: FnMut(usize) -> bool,
{
    let pairs = words.len() / 2;
    let size = size as u64;

    let (first, per_pair, last) = if k <= pairs {
        (k, 1, 0)
    } else {
        let per_pair = k / pairs;
        let last = per_pair + k % pairs;
        let last = if last == per_pair { 0 } else { last };
        (k - last, per_pair, last)
    };

    let mut pair = 0;
    let mut i = 0;
    while i < first {
        let mut x = u64::from(words[pair]) % size;
        let mut y = u64::from(words[pair + pairs]) % size;
        if per_pair == 1 {
            x = (x + y) % size;
        }
        if !visit(x as usize) {
            return false;
        }
        for _ in 1..per_pair {
            x = (x + y) % size;
            y = (y + i as u64) % size;
            if !visit(x as usize) {
                return false;
            }
        }
        pair += 1;
        i += per_pair;
    }

    if last > 0 {
        let mut x = u64::from(words[pair]) % size;
        let mut y = u64::from(words[pair + pairs]) % size;
        if !visit(x as usize) {
            return false;
        }
        for _ in 1..last {
            x = (x + y) % size;
            y = (y + i as u64) % size;
            if !visit(x as usize) {
                return false;
            }
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use insta::assert_snapshot;
    use pretty_assertions::assert_eq;
    use rand::{Rng, SeedableRng, rngs::SmallRng};
    use rstest::rstest;

    use super::{BloomFilter, BloomFilterError};
    use crate::{
        SkipList,
        fnv::{Digest, HashWidth},
    };

    /// A digest which ignores its input.
    #[derive(Debug, Clone)]
    struct Fixed(Vec<u32>);

    impl Digest for Fixed {
        fn width(&self) -> HashWidth {
            HashWidth::round_up(self.0.len() * 32).expect("supported width")
        }

        fn digest(&self, _data: &[u8]) -> Vec<u8> {
            self.0.iter().flat_map(|word| word.to_le_bytes()).collect()
        }
    }

    fn as_bytes(values: &[u32; 16]) -> Vec<u8> {
        values.iter().flat_map(|v| v.to_le_bytes()).collect()
    }

    /// Distinct random values, in order.
    fn distinct(rng: &mut SmallRng, n: usize) -> Result<SkipList<[u32; 16]>> {
        let mut list = SkipList::with_seed(8, 0.25, rng.random())?;
        while list.len() < n {
            list.insert(rng.random());
        }
        Ok(list)
    }

    #[rstest]
    #[case(15_000, 2_000, 5)]
    #[case(150_000, 10_000, 11)]
    #[case(100_000, 1_000, 70)]
    #[case(8, 1_000, 0)]
    fn optimal_k(#[case] size: usize, #[case] n: u64, #[case] expected: usize) -> Result<()> {
        assert_eq!(BloomFilter::optimal_k(size, n)?, expected);
        Ok(())
    }

    #[test]
    fn optimal_k_without_elements() {
        assert_eq!(
            BloomFilter::optimal_k(1_000, 0),
            Err(BloomFilterError::ZeroElements)
        );
        assert_eq!(
            BloomFilter::with_optimal_k(1_000, 0, 64).err(),
            Some(BloomFilterError::ZeroElements)
        );
    }

    #[test]
    fn with_optimal_k() -> Result<()> {
        let filter = BloomFilter::with_optimal_k(150_000, 10_000, 128)?;
        assert_eq!(filter.n_hash_functions(), 11);
        let filter = BloomFilter::with_optimal_k(8, 1_000, 128)?;
        assert_eq!(filter.n_hash_functions(), 1);
        Ok(())
    }

    #[rstest]
    #[case(0, 1, 64, BloomFilterError::ZeroSize)]
    #[case(8, 0, 64, BloomFilterError::ZeroHashFunctions)]
    #[case(8, 1, 0, BloomFilterError::UnsupportedHashSize(0))]
    #[case(8, 1, 1025, BloomFilterError::UnsupportedHashSize(1025))]
    fn invalid(
        #[case] size: usize,
        #[case] k: usize,
        #[case] hash_bits: usize,
        #[case] expected: BloomFilterError,
    ) {
        assert_eq!(BloomFilter::new(size, k, hash_bits).err(), Some(expected));
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            BloomFilterError::UnsupportedHashSize(2048).to_string(),
            "hash size must be in [1, 1024] bits, got 2048."
        );
        assert_eq!(BloomFilterError::ZeroSize.to_string(), "size must be non-zero.");
    }

    #[rstest]
    #[case(1, 64)]
    #[case(64, 64)]
    #[case(100, 128)]
    #[case(129, 256)]
    #[case(300, 512)]
    #[case(1000, 1024)]
    fn hash_size(#[case] requested: usize, #[case] expected: usize) -> Result<()> {
        assert_eq!(BloomFilter::new(8, 1, requested)?.hash_size(), expected);
        Ok(())
    }

    #[test]
    fn accessors() -> Result<()> {
        let filter = BloomFilter::new(15_001, 5, 100)?;
        assert_eq!(filter.size(), 15_008);
        assert_eq!(filter.as_bytes().len(), 1_876);
        assert_eq!(filter.n_hash_functions(), 5);
        assert_eq!(filter.hash_size(), 128);
        assert_eq!(filter.n_elements(), 0);
        assert_eq!(filter.false_positive_rate(), 0.0);
        assert!(filter.as_bytes().iter().all(|&byte| byte == 0));
        assert_snapshot!(
            format!("{filter:?}"),
            @"BloomFilter { size: 15008, n_hash_functions: 5, hash_size: 128, n_elements: 0, .. }"
        );
        Ok(())
    }

    #[rstest]
    // One position per pair.
    #[case(2, &[310, 420])]
    // Two positions per pair.
    #[case(4, &[10, 20, 310, 420])]
    // Three positions per pair.
    #[case(6, &[10, 20, 310, 420, 610, 823])]
    // The last pair absorbs the remainder, stepping with the running index.
    #[case(5, &[10, 20, 310, 420, 822])]
    fn positions(#[case] k: usize, #[case] expected: &[usize]) -> Result<()> {
        let mut filter = BloomFilter::with_digest(1_000, k, Fixed(vec![10, 20, 300, 400]))?;
        assert!(!filter.contains(b"anything"));
        filter.insert(b"anything");
        assert_eq!(filter.bits.iter_ones().collect::<Vec<_>>(), expected);
        assert!(filter.contains(b"anything else"));
        Ok(())
    }

    #[test]
    fn positions_wrap() -> Result<()> {
        let mut filter = BloomFilter::with_digest(8, 3, Fixed(vec![u32::MAX, u32::MAX]))?;
        filter.insert(b"");
        // x = y = 7, and y never grows as the only pair starts at index 0.
        assert_eq!(filter.bits.iter_ones().collect::<Vec<_>>(), [5, 6, 7]);
        assert_eq!(filter.as_bytes(), [0b1110_0000]);
        Ok(())
    }

    #[test]
    fn bit_layout() -> Result<()> {
        let mut filter = BloomFilter::with_digest(24, 1, Fixed(vec![9, 0]))?;
        filter.insert(b"");
        assert_eq!(filter.as_bytes(), [0, 0b0000_0010, 0]);
        Ok(())
    }

    #[test]
    fn general() -> Result<()> {
        let mut rng = SmallRng::seed_from_u64(0xdead_beef);
        let list = distinct(&mut rng, 10_000)?;

        let mut filter = BloomFilter::new(100 * 1000 * 8, 16, 64)?;
        assert_eq!(filter.n_hash_functions(), 16);
        assert_eq!(filter.size(), 800_000);
        assert_eq!(filter.n_elements(), 0);
        assert_eq!(filter.false_positive_rate(), 0.0);

        for values in &list {
            let data = as_bytes(values);
            assert!(!filter.contains(&data));
            filter.insert(&data);
            assert!(filter.contains(&data));
        }
        assert_eq!(filter.n_elements(), list.len() as u64);
        Ok(())
    }

    #[test]
    fn repeated_insert_counts() -> Result<()> {
        let mut filter = BloomFilter::new(1_024, 3, 64)?;
        filter.insert(b"twice");
        let bytes = filter.as_bytes().to_vec();
        filter.insert(b"twice");
        assert_eq!(filter.as_bytes(), bytes);
        assert_eq!(filter.n_elements(), 2);
        Ok(())
    }

    /// The observed false positive rate stays close to the expected one.
    ///
    /// The bound allows 8% above the expected rate, plus four standard
    /// deviations of the sampling error.
    #[rstest]
    #[case(15_000, 5, 64, 2_000, 100_000)]
    #[case(15_000, 5, 128, 2_000, 100_000)]
    #[case(150_000, 11, 128, 10_000, 100_000)]
    #[case(150_000, 11, 256, 10_000, 100_000)]
    #[case(150_000, 11, 512, 10_000, 100_000)]
    #[case(150_000, 11, 1024, 1_000, 10_000)]
    #[case(100_000, 70, 1024, 1_000, 10_000)]
    fn false_positives(
        #[case] size: usize,
        #[case] k: usize,
        #[case] hash_bits: usize,
        #[case] n: usize,
        #[case] probes: u32,
    ) -> Result<()> {
        let mut rng = SmallRng::seed_from_u64(0xdead_beef);
        let list = distinct(&mut rng, n)?;

        let mut filter = BloomFilter::new(size, k, hash_bits)?;
        for values in &list {
            filter.insert(&as_bytes(values));
        }
        assert_eq!(filter.n_elements(), n as u64);
        for values in &list {
            assert!(filter.contains(&as_bytes(values)));
        }

        let expected = filter.false_positive_rate();
        let mut false_positives = 0_u32;
        for _ in 0..probes {
            let probe = loop {
                let candidate: [u32; 16] = rng.random();
                if !list.contains(&candidate) {
                    break candidate;
                }
            };
            if filter.contains(&as_bytes(&probe)) {
                false_positives += 1;
            }
        }

        let probes = f64::from(probes);
        let rate = f64::from(false_positives) / probes;
        let bound =
            expected * 1.08 + 4.0 * (expected * (1.0 - expected) / probes).sqrt() + 1.0 / probes;
        assert!(rate <= bound, "expected at most {bound}, was {rate}");
        Ok(())
    }
}
