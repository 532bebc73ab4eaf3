//! Eight interleaved SHA-256 chaining values.

#![allow(clippy::indexing_slicing)] // Fixed 8×8 matrix

use crate::{
  U32x8,
  consts::{BIG_ENDIAN_MASK, H0, LANES, OUT_LEN},
  dispatch,
};

/// Chaining values for eight streams, stored index-major.
///
/// Row `r` holds chaining word `r` (`a`..`h`) of every stream; lane `k` of
/// each row belongs to stream `k`. This is the layout the compressor updates
/// in place; [`State::lane`] and [`State::from_lanes`] convert to and from
/// per-stream chaining values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(C, align(32))]
pub struct State(pub [U32x8; LANES]);

impl Default for State {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

impl State {
  /// The SHA-256 initial value in every lane.
  #[must_use]
  pub const fn new() -> Self {
    let mut rows = [U32x8::ZERO; LANES];
    let mut r = 0;
    while r < LANES {
      rows[r] = U32x8::splat(H0[r]);
      r += 1;
    }
    Self(rows)
  }

  /// Build a state from eight per-stream chaining values.
  #[must_use]
  pub fn from_lanes(cvs: &[[u32; 8]; LANES]) -> Self {
    let mut rows = cvs.map(U32x8);
    (dispatch::kernel().transpose)(&mut rows);
    Self(rows)
  }

  /// Chaining value of stream `lane`.
  ///
  /// # Panics
  ///
  /// Panics if `lane >= 8`.
  #[must_use]
  pub fn lane(&self, lane: usize) -> [u32; 8] {
    core::array::from_fn(|r| self.0[r].0[lane])
  }

  /// All eight per-stream chaining values.
  #[must_use]
  pub fn lanes(&self) -> [[u32; 8]; LANES] {
    let mut rows = self.0;
    (dispatch::kernel().transpose)(&mut rows);
    rows.map(U32x8::to_array)
  }

  /// Serialize every lane's chaining value as a big-endian SHA-256 digest.
  ///
  /// After the final padded block has been compressed, `digests()[k]` is the
  /// SHA-256 of stream `k`.
  #[must_use]
  pub fn digests(&self) -> [[u8; OUT_LEN]; LANES] {
    let kernel = dispatch::kernel();
    let mut rows = self.0;
    (kernel.transpose)(&mut rows);
    let mut words = rows.map(U32x8::to_array);
    (kernel.normalize)(words.as_flattened_mut(), BIG_ENDIAN_MASK);
    words.map(|cv| U32x8(cv).to_ne_bytes())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn distinct_cvs() -> [[u32; 8]; LANES] {
    core::array::from_fn(|k| core::array::from_fn(|r| ((k as u32) << 16) | r as u32))
  }

  #[test]
  fn new_broadcasts_iv() {
    let s = State::new();
    for k in 0..LANES {
      assert_eq!(s.lane(k), H0);
    }
  }

  #[test]
  fn lanes_round_trip() {
    let cvs = distinct_cvs();
    let s = State::from_lanes(&cvs);
    assert_eq!(s.lanes(), cvs);
    assert_eq!(s.0[3].0[5], cvs[5][3]);
  }

  #[test]
  fn digests_are_big_endian_words() {
    let cvs = distinct_cvs();
    let d = State::from_lanes(&cvs).digests();
    for k in 0..LANES {
      for r in 0..8 {
        assert_eq!(d[k][r * 4..r * 4 + 4], cvs[k][r].to_be_bytes());
      }
    }
  }
}
