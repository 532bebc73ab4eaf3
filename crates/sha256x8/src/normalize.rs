//! Byte-order normalizer.
//!
//! Rewrites a `u32` buffer in place, one 8-word (32-byte) chunk at a time,
//! through a [`ShuffleMask`]. With [`BYTESWAP_MASK`](crate::BYTESWAP_MASK)
//! this flips every word between native and big-endian byte order, which is
//! its own inverse.

use crate::{U32x8, consts::LANES, consts::ShuffleMask, dispatch, error::Error};

/// Shuffle every 8-word chunk of `buf` in place.
///
/// # Errors
///
/// Returns [`Error::WordCount`] if `buf` is empty or its length is not a
/// multiple of 8. The buffer is untouched in that case.
///
/// # Examples
///
/// ```
/// let mut words = [0x0011_2233u32; 8];
/// sha256x8::normalize(&mut words, &sha256x8::BYTESWAP_MASK)?;
/// assert_eq!(words, [0x3322_1100; 8]);
/// # Ok::<(), sha256x8::Error>(())
/// ```
pub fn normalize(buf: &mut [u32], mask: &ShuffleMask) -> Result<(), Error> {
  check_word_count(buf.len())?;
  (dispatch::kernel().normalize)(buf, mask);
  Ok(())
}

#[inline]
pub(crate) fn check_word_count(len: usize) -> Result<(), Error> {
  if len == 0 || len % LANES != 0 {
    return Err(Error::WordCount { len });
  }
  Ok(())
}

/// Portable normalizer. `buf.len()` is a multiple of 8 (checked by the caller).
pub(crate) fn normalize_portable(buf: &mut [u32], mask: &ShuffleMask) {
  debug_assert_eq!(buf.len() % LANES, 0);
  let (chunks, _) = buf.as_chunks_mut::<LANES>();
  for chunk in chunks {
    *chunk = U32x8(*chunk).shuffle_bytes(mask).0;
  }
}
