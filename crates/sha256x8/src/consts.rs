//! SHA-256 constants and byte-shuffle masks.

#![allow(clippy::indexing_slicing)] // Const mask construction

/// Number of independent message streams processed in lockstep.
pub const LANES: usize = 8;

/// SHA-256 block size in bytes.
pub const BLOCK_LEN: usize = 64;

/// SHA-256 digest size in bytes.
pub const OUT_LEN: usize = 32;

/// SHA-256 initial chaining value (FIPS 180-4 §5.3.3).
pub const H0: [u32; 8] = [
  0x6a09e667, 0xbb67ae85, 0x3c6ef372, 0xa54ff53a, 0x510e527f, 0x9b05688c, 0x1f83d9ab, 0x5be0cd19,
];

/// SHA-256 round constants (FIPS 180-4 §4.2.2).
pub const K: [u32; 64] = [
  0x428a2f98, 0x71374491, 0xb5c0fbcf, 0xe9b5dba5, 0x3956c25b, 0x59f111f1, 0x923f82a4, 0xab1c5ed5, 0xd807aa98,
  0x12835b01, 0x243185be, 0x550c7dc3, 0x72be5d74, 0x80deb1fe, 0x9bdc06a7, 0xc19bf174, 0xe49b69c1, 0xefbe4786,
  0x0fc19dc6, 0x240ca1cc, 0x2de92c6f, 0x4a7484aa, 0x5cb0a9dc, 0x76f988da, 0x983e5152, 0xa831c66d, 0xb00327c8,
  0xbf597fc7, 0xc6e00bf3, 0xd5a79147, 0x06ca6351, 0x14292967, 0x27b70a85, 0x2e1b2138, 0x4d2c6dfc, 0x53380d13,
  0x650a7354, 0x766a0abb, 0x81c2c92e, 0x92722c85, 0xa2bfe8a1, 0xa81a664b, 0xc24b8b70, 0xc76c51a3, 0xd192e819,
  0xd6990624, 0xf40e3585, 0x106aa070, 0x19a4c116, 0x1e376c08, 0x2748774c, 0x34b0bcb5, 0x391c0cb3, 0x4ed8aa4a,
  0x5b9cca4f, 0x682e6ff3, 0x748f82ee, 0x78a5636f, 0x84c87814, 0x8cc70208, 0x90befffa, 0xa4506ceb, 0xbef9a3f7,
  0xc67178f2,
];

/// A 32-byte `vpshufb` control pattern, applied to each 16-byte half.
///
/// Output byte `i` of a half takes input byte `mask[i] & 0x0f` of the same
/// half; a set bit 7 zeroes the output byte instead.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[repr(C, align(32))]
pub struct ShuffleMask([u8; 32]);

impl ShuffleMask {
  #[inline]
  #[must_use]
  pub const fn new(bytes: [u8; 32]) -> Self {
    Self(bytes)
  }

  #[inline]
  #[must_use]
  pub const fn as_bytes(&self) -> &[u8; 32] {
    &self.0
  }

  /// Build a mask by repeating one 16-byte pattern in both halves.
  #[must_use]
  pub const fn repeat(half: [u8; 16]) -> Self {
    let mut bytes = [0u8; 32];
    let mut i = 0;
    while i < 16 {
      bytes[i] = half[i];
      bytes[i + 16] = half[i];
      i += 1;
    }
    Self(bytes)
  }
}

impl core::fmt::Debug for ShuffleMask {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    write!(f, "ShuffleMask({:02x?})", &self.0)
  }
}

/// Reverse the bytes of every 32-bit word.
pub static BYTESWAP_MASK: ShuffleMask =
  ShuffleMask::repeat([0x3, 0x2, 0x1, 0x0, 0x7, 0x6, 0x5, 0x4, 0xb, 0xa, 0x9, 0x8, 0xf, 0xe, 0xd, 0xc]);

/// Leave every byte where it is.
pub static IDENTITY_MASK: ShuffleMask =
  ShuffleMask::repeat([0x0, 0x1, 0x2, 0x3, 0x4, 0x5, 0x6, 0x7, 0x8, 0x9, 0xa, 0xb, 0xc, 0xd, 0xe, 0xf]);

/// Convert native-order words to the big-endian order SHA-256 reads.
#[cfg(target_endian = "little")]
pub static BIG_ENDIAN_MASK: &ShuffleMask = &BYTESWAP_MASK;

/// Convert native-order words to the big-endian order SHA-256 reads.
#[cfg(target_endian = "big")]
pub static BIG_ENDIAN_MASK: &ShuffleMask = &IDENTITY_MASK;
