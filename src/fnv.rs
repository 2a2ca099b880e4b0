//! Fowler–Noll–Vo hashes at widths from 64 to 1024 bits.
//!
//! Both variants start from a fixed offset basis and, for every input byte,
//! combine the byte into the state and multiply the state by the FNV prime of
//! the width (modulo `$2^{width}$`). FNV-1a xors the byte in before
//! multiplying, FNV-1 after.
//!
//! Every FNV prime has the shape `$2^s + c$` with a small `$c$`, so the
//! multiplication is carried out as a shift and a small-factor product over
//! 32-bit limbs.

use std::fmt;

/// Largest number of 32-bit limbs of any supported width.
const MAX_LIMBS: usize = 32;

// ////////////////////////////////////////////////////////////////////////////
// Hash width
// ////////////////////////////////////////////////////////////////////////////

/// The digest widths for which FNV parameters are published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HashWidth {
    /// 64-bit digests.
    Bits64,
    /// 128-bit digests.
    Bits128,
    /// 256-bit digests.
    Bits256,
    /// 512-bit digests.
    Bits512,
    /// 1024-bit digests.
    Bits1024,
}

impl HashWidth {
    /// Every supported width, narrowest first.
    pub const ALL: [Self; 5] = [
        Self::Bits64,
        Self::Bits128,
        Self::Bits256,
        Self::Bits512,
        Self::Bits1024,
    ];

    /// The narrowest supported width of at least `bits` bits, or `None` if
    /// `bits` is zero or wider than 1024.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipbloom::HashWidth;
    ///
    /// assert_eq!(HashWidth::round_up(64), Some(HashWidth::Bits64));
    /// assert_eq!(HashWidth::round_up(65), Some(HashWidth::Bits128));
    /// assert_eq!(HashWidth::round_up(2048), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn round_up(bits: usize) -> Option<Self> {
        if bits == 0 {
            return None;
        }
        Self::ALL.into_iter().find(|width| width.bits() >= bits)
    }

    /// The number of bits of a digest.
    #[inline]
    #[must_use]
    pub const fn bits(self) -> usize {
        match self {
            Self::Bits64 => 64,
            Self::Bits128 => 128,
            Self::Bits256 => 256,
            Self::Bits512 => 512,
            Self::Bits1024 => 1024,
        }
    }

    /// The number of bytes of a digest.
    #[inline]
    #[must_use]
    pub const fn bytes(self) -> usize {
        self.bits() / 8
    }

    const fn limbs(self) -> usize {
        self.bits() / 32
    }

    /// The FNV prime `$2^s + c$` as `(s, c)`.
    const fn prime(self) -> (usize, u32) {
        match self {
            Self::Bits64 => (40, 0x1b3),
            Self::Bits128 => (88, 0x13b),
            Self::Bits256 => (168, 0x163),
            Self::Bits512 => (344, 0x157),
            Self::Bits1024 => (680, 0x18d),
        }
    }

    /// The offset basis, most significant word first.
    const fn offset_basis(self) -> &'static [u32] {
        match self {
            Self::Bits64 => &[0xcbf2_9ce4, 0x8422_2325],
            Self::Bits128 => &[0x6c62_272e, 0x07bb_0142, 0x62b8_2175, 0x6295_c58d],
            Self::Bits256 => &[
                0xdd26_8dbc, 0xaac5_5036, 0x2d98_c384, 0xc4e5_76cc, 0xc8b1_5368, 0x47b6_bbb3,
                0x1023_b4c8, 0xcaee_0535,
            ],
            Self::Bits512 => &[
                0xb86d_b0b1, 0x171f_4416, 0xdca1_e50f, 0x3099_90ac, 0xac87_d059, 0xc900_0000,
                0x0000_0000, 0x0000_0d21, 0xe948_f68a, 0x34c1_92f6, 0x2ea7_9bc9, 0x42db_e7ce,
                0x1820_3641, 0x5f56_e34b, 0xac98_2aac, 0x4afe_9fd9,
            ],
            Self::Bits1024 => &[
                0x0000_0000, 0x0000_0000, 0x005f_7a76, 0x758e_cc4d, 0x32e5_6d5a, 0x5910_28b7,
                0x4b29_fc42, 0x23fd_ada1, 0x6c3b_f34e, 0xda36_74da, 0x9a21_d900, 0x0000_0000,
                0x0000_0000, 0x0000_0000, 0x0000_0000, 0x0000_0000, 0x0000_0000, 0x0000_0000,
                0x0000_0000, 0x0000_0000, 0x0000_0000, 0x0000_0000, 0x0000_0000, 0x0004_c6d7,
                0xeb6e_7380, 0x2734_510a, 0x555f_256c, 0xc005_ae55, 0x6bde_8cc9, 0xc6a9_3b21,
                0xaff4_b16c, 0x71ee_90b3,
            ],
        }
    }
}

impl fmt::Display for HashWidth {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} bits", self.bits())
    }
}

// ////////////////////////////////////////////////////////////////////////////
// Digest
// ////////////////////////////////////////////////////////////////////////////

/// A fixed-width hash function.
///
/// Implementations must be deterministic: the digest is a pure function of
/// the input bytes, and is always [`width().bytes()`][HashWidth::bytes] long.
pub trait Digest {
    /// The width of the digests produced.
    #[must_use]
    fn width(&self) -> HashWidth;

    /// Hash `data`.
    #[must_use]
    fn digest(&self, data: &[u8]) -> Vec<u8>;
}

/// The FNV-1a hash.
///
/// # Examples
///
/// ```
/// use skipbloom::{Digest, Fnv1a, HashWidth};
///
/// let hash = Fnv1a::new(HashWidth::Bits64).digest(b"a");
/// assert_eq!(hash, 0xaf63_dc4c_8601_ec8c_u64.to_be_bytes());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fnv1a {
    width: HashWidth,
}

impl Fnv1a {
    /// FNV-1a at the given width.
    #[inline]
    #[must_use]
    pub const fn new(width: HashWidth) -> Self {
        Fnv1a { width }
    }
}

impl Digest for Fnv1a {
    #[inline]
    fn width(&self) -> HashWidth {
        self.width
    }

    fn digest(&self, data: &[u8]) -> Vec<u8> {
        let mut state = State::new(self.width);
        for &byte in data {
            state.xor(byte);
            state.multiply();
        }
        state.to_bytes()
    }
}

/// The FNV-1 hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fnv1 {
    width: HashWidth,
}

impl Fnv1 {
    /// FNV-1 at the given width.
    #[inline]
    #[must_use]
    pub const fn new(width: HashWidth) -> Self {
        Fnv1 { width }
    }
}

impl Digest for Fnv1 {
    #[inline]
    fn width(&self) -> HashWidth {
        self.width
    }

    fn digest(&self, data: &[u8]) -> Vec<u8> {
        let mut state = State::new(self.width);
        for &byte in data {
            state.multiply();
            state.xor(byte);
        }
        state.to_bytes()
    }
}

// ////////////////////////////////////////////////////////////////////////////
// Multi-limb state
// ////////////////////////////////////////////////////////////////////////////

/// The running hash value, as little-endian 32-bit limbs.
struct State {
    limbs: [u32; MAX_LIMBS],
    width: HashWidth,
}

impl State {
    fn new(width: HashWidth) -> Self {
        let mut limbs = [0; MAX_LIMBS];
        for (limb, &word) in limbs.iter_mut().zip(width.offset_basis().iter().rev()) {
            *limb = word;
        }
        State { limbs, width }
    }

    fn xor(&mut self, byte: u8) {
        self.limbs[0] ^= u32::from(byte);
    }

    /// Multiplies the state by the prime `$2^s + c$`, as
    /// `$state \cdot c + (state \ll s)$`, modulo `$2^{width}$`.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "Only the low 32 bits of each partial sum are kept."
    )]
    fn multiply(&mut self) {
        let n = self.width.limbs();
        let (shift, low) = self.width.prime();
        let (words, bits) = (shift / 32, shift % 32);
        let src = self.limbs;

        let mut carry = 0_u64;
        for (limb, &word) in self.limbs[..n].iter_mut().zip(&src[..n]) {
            let sum = u64::from(word) * u64::from(low) + carry;
            *limb = sum as u32;
            carry = sum >> 32;
        }

        let mut carry = 0_u64;
        for i in words..n {
            let j = i - words;
            let mut shifted = u64::from(src[j]) << bits;
            if bits > 0 && j > 0 {
                shifted |= u64::from(src[j - 1]) >> (32 - bits);
            }
            let sum = u64::from(self.limbs[i]) + (shifted & 0xffff_ffff) + carry;
            self.limbs[i] = sum as u32;
            carry = sum >> 32;
        }
    }

    /// The big-endian bytes of the state.
    fn to_bytes(&self) -> Vec<u8> {
        self.limbs[..self.width.limbs()]
            .iter()
            .rev()
            .flat_map(|limb| limb.to_be_bytes())
            .collect()
    }
}
