//! Precondition errors for the safe entry points.
//!
//! The kernels themselves cannot fail. These errors are raised at the API
//! boundary, before any word is read or written, so a rejected call never
//! leaves partially updated state behind.

use core::fmt;

/// A caller-side precondition was violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Error {
  /// A word buffer handed to the normalizer was empty or not a multiple of 8 words.
  WordCount {
    /// Length of the rejected buffer, in `u32` words.
    len: usize,
  },
  /// A message stream holds fewer than `nblocks * 64` bytes.
  ShortStream {
    /// Lane index of the offending stream.
    lane: usize,
    /// Bytes available in that stream.
    len: usize,
    /// Bytes required for the requested block count.
    required: usize,
  },
  /// `nblocks * 64` does not fit in `usize`.
  BlockCountOverflow {
    /// Requested block count.
    nblocks: usize,
  },
}

impl fmt::Display for Error {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match *self {
      Self::WordCount { len } => write!(f, "word buffer length {len} is not a positive multiple of 8"),
      Self::ShortStream { lane, len, required } => {
        write!(f, "stream {lane} has {len} bytes, {required} required")
      }
      Self::BlockCountOverflow { nblocks } => write!(f, "block count {nblocks} overflows the stream length"),
    }
  }
}

impl core::error::Error for Error {}

#[cfg(test)]
mod tests {
  extern crate alloc;

  use alloc::{format, string::ToString};

  use super::*;

  #[test]
  fn display_messages() {
    assert_eq!(
      Error::WordCount { len: 7 }.to_string(),
      "word buffer length 7 is not a positive multiple of 8"
    );
    assert_eq!(
      Error::ShortStream {
        lane: 3,
        len: 63,
        required: 64
      }
      .to_string(),
      "stream 3 has 63 bytes, 64 required"
    );
    assert_eq!(
      Error::BlockCountOverflow { nblocks: usize::MAX }.to_string(),
      format!("block count {} overflows the stream length", usize::MAX)
    );
  }

  #[test]
  fn is_copy_and_eq() {
    let e = Error::WordCount { len: 0 };
    let e2 = e;
    assert_eq!(e, e2);
  }
}
