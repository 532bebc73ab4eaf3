//! 8×8 lane transpose.
//!
//! Message words arrive stream-major (row `k` = eight consecutive words of
//! stream `k`) but the round function wants them index-major (row `j` = word
//! `j` of every stream). Transposing the 8×8 matrix converts between the two,
//! and since it is an involution the same call converts back.

#![allow(clippy::indexing_slicing)] // Fixed 8×8 matrix

use crate::{U32x8, consts::LANES, dispatch};

/// Transpose eight 8-lane rows in place: output row `i` lane `j` is input row `j` lane `i`.
///
/// # Examples
///
/// ```
/// use sha256x8::U32x8;
///
/// let mut m: [U32x8; 8] = core::array::from_fn(|r| U32x8(core::array::from_fn(|c| (r * 8 + c) as u32)));
/// sha256x8::transpose(&mut m);
/// assert_eq!(m[2].0[5], 5 * 8 + 2);
/// ```
#[inline]
pub fn transpose(m: &mut [U32x8; LANES]) {
  (dispatch::kernel().transpose)(m);
}

pub(crate) fn transpose_portable(m: &mut [U32x8; LANES]) {
  for i in 0..LANES {
    for j in (i + 1)..LANES {
      let upper = m[i].0[j];
      m[i].0[j] = m[j].0[i];
      m[j].0[i] = upper;
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn tagged() -> [U32x8; LANES] {
    // Every byte of the word encodes its (row, col) position.
    core::array::from_fn(|r| {
      U32x8(core::array::from_fn(|c| {
        let k = (r * LANES + c) as u32;
        k | (k << 8) | (k << 16) | (k << 24)
      }))
    })
  }

  #[test]
  fn moves_each_word_to_mirrored_position() {
    let original = tagged();
    let mut m = original;
    transpose_portable(&mut m);
    for r in 0..LANES {
      for c in 0..LANES {
        assert_eq!(m[c].0[r], original[r].0[c], "row={r} col={c}");
      }
    }
  }

  #[test]
  fn is_self_inverse() {
    let original = tagged();
    let mut m = original;
    transpose_portable(&mut m);
    assert_ne!(m, original);
    transpose_portable(&mut m);
    assert_eq!(m, original);
  }

  #[test]
  fn diagonal_is_fixed() {
    let original = tagged();
    let mut m = original;
    transpose_portable(&mut m);
    for i in 0..LANES {
      assert_eq!(m[i].0[i], original[i].0[i]);
    }
  }
}
