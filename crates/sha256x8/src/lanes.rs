//! Portable 8 × u32 vector.
//!
//! [`U32x8`] is the scalar model of one 256-bit register: eight independent
//! 32-bit lanes, one per message stream. Every operation is lane-wise, so no
//! lane can observe another. The type is 32-byte aligned so matrices of it
//! can be loaded with aligned 256-bit moves.

#![allow(clippy::indexing_slicing)] // Fixed-size lane arrays

use crate::consts::{LANES, ShuffleMask};

/// Eight 32-bit lanes, 32-byte aligned.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(C, align(32))]
pub struct U32x8(pub [u32; LANES]);

impl U32x8 {
  pub const ZERO: Self = Self([0; LANES]);

  /// Replicate `x` across all lanes.
  #[inline(always)]
  #[must_use]
  pub const fn splat(x: u32) -> Self {
    Self([x; LANES])
  }

  #[inline(always)]
  #[must_use]
  pub const fn to_array(self) -> [u32; LANES] {
    self.0
  }

  #[inline(always)]
  fn map(self, f: impl Fn(u32) -> u32) -> Self {
    let mut out = self.0;
    for x in &mut out {
      *x = f(*x);
    }
    Self(out)
  }

  #[inline(always)]
  fn zip(self, other: Self, f: impl Fn(u32, u32) -> u32) -> Self {
    let mut out = self.0;
    for (x, y) in out.iter_mut().zip(other.0) {
      *x = f(*x, y);
    }
    Self(out)
  }

  /// Lane-wise wrapping addition.
  #[inline(always)]
  #[must_use]
  pub fn wrapping_add(self, other: Self) -> Self {
    self.zip(other, u32::wrapping_add)
  }

  #[inline(always)]
  #[must_use]
  pub fn xor(self, other: Self) -> Self {
    self.zip(other, |x, y| x ^ y)
  }

  #[inline(always)]
  #[must_use]
  pub fn and(self, other: Self) -> Self {
    self.zip(other, |x, y| x & y)
  }

  /// `!self & other`
  #[inline(always)]
  #[must_use]
  pub fn andnot(self, other: Self) -> Self {
    self.zip(other, |x, y| !x & y)
  }

  #[inline(always)]
  #[must_use]
  pub fn rotr<const N: u32>(self) -> Self {
    self.map(|x| x.rotate_right(N))
  }

  #[inline(always)]
  #[must_use]
  pub fn shr<const N: u32>(self) -> Self {
    self.map(|x| x >> N)
  }

  /// Reinterpret 32 bytes of memory as eight native-endian words.
  #[inline(always)]
  #[must_use]
  pub fn from_ne_bytes(bytes: &[u8; 32]) -> Self {
    let mut out = [0u32; LANES];
    let (words, _) = bytes.as_chunks::<4>();
    for (x, w) in out.iter_mut().zip(words) {
      *x = u32::from_ne_bytes(*w);
    }
    Self(out)
  }

  #[inline(always)]
  #[must_use]
  pub fn to_ne_bytes(self) -> [u8; 32] {
    let mut out = [0u8; 32];
    let (chunks, _) = out.as_chunks_mut::<4>();
    for (c, x) in chunks.iter_mut().zip(self.0) {
      *c = x.to_ne_bytes();
    }
    out
  }

  /// Byte shuffle with `vpshufb` semantics.
  ///
  /// Each 16-byte half is shuffled independently: output byte `i` takes
  /// input byte `mask[i] & 0x0f` of the same half, or zero when bit 7 of
  /// `mask[i]` is set.
  #[inline(always)]
  #[must_use]
  pub fn shuffle_bytes(self, mask: &ShuffleMask) -> Self {
    let src = self.to_ne_bytes();
    let mut out = [0u8; 32];
    for (i, (dst, &sel)) in out.iter_mut().zip(mask.as_bytes()).enumerate() {
      if sel & 0x80 == 0 {
        *dst = src[(i & !0x0f) | usize::from(sel & 0x0f)];
      }
    }
    Self::from_ne_bytes(&out)
  }
}

impl From<[u32; LANES]> for U32x8 {
  #[inline]
  fn from(lanes: [u32; LANES]) -> Self {
    Self(lanes)
  }
}

impl From<U32x8> for [u32; LANES] {
  #[inline]
  fn from(v: U32x8) -> Self {
    v.0
  }
}

impl core::fmt::Debug for U32x8 {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    write!(f, "U32x8(")?;
    for (i, x) in self.0.iter().enumerate() {
      if i != 0 {
        f.write_str(" ")?;
      }
      write!(f, "{x:08x}")?;
    }
    f.write_str(")")
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::consts::BYTESWAP_MASK;

  fn ramp() -> U32x8 {
    U32x8([
      0x0011_2233,
      0x4455_6677,
      0x8899_aabb,
      0xccdd_eeff,
      0x0102_0304,
      0x0506_0708,
      0x090a_0b0c,
      0x0d0e_0f10,
    ])
  }

  #[test]
  fn rotr_matches_scalar() {
    let v = ramp();
    let r = v.rotr::<7>();
    for lane in 0..LANES {
      assert_eq!(r.0[lane], v.0[lane].rotate_right(7));
    }
  }

  #[test]
  fn add_wraps() {
    let v = U32x8::splat(u32::MAX).wrapping_add(U32x8::splat(2));
    assert_eq!(v, U32x8::splat(1));
  }

  #[test]
  fn andnot_is_not_self_and_other() {
    let a = U32x8::splat(0xf0f0_f0f0);
    let b = U32x8::splat(0xffff_0000);
    assert_eq!(a.andnot(b), U32x8::splat(0x0f0f_0000));
  }

  #[test]
  fn byteswap_mask_swaps_each_lane() {
    let v = ramp();
    let s = v.shuffle_bytes(&BYTESWAP_MASK);
    for lane in 0..LANES {
      assert_eq!(s.0[lane], v.0[lane].swap_bytes());
    }
  }

  #[test]
  fn high_bit_zeroes_byte() {
    let mut raw = *BYTESWAP_MASK.as_bytes();
    raw[0] = 0x80;
    raw[16] = 0xff;
    let s = ramp().shuffle_bytes(&ShuffleMask::new(raw));
    let bytes = s.to_ne_bytes();
    assert_eq!(bytes[0], 0);
    assert_eq!(bytes[16], 0);
  }

  #[test]
  fn shuffle_stays_within_half() {
    // Selector 0 in the upper half reads byte 16, not byte 0.
    let v = U32x8::from_ne_bytes(&core::array::from_fn(|i| i as u8));
    let s = v.shuffle_bytes(&ShuffleMask::new([0; 32]));
    let bytes = s.to_ne_bytes();
    assert!(bytes[..16].iter().all(|&b| b == 0));
    assert!(bytes[16..].iter().all(|&b| b == 16));
  }
}
