//! Multi-lane SHA-256 compressor.
//!
//! One call runs the SHA-256 compression function over `nblocks` consecutive
//! 64-byte blocks of eight streams at once. Each vector operation advances
//! all eight hashes; lanes never mix.
//!
//! The streams must already carry SHA-256 padding. Nothing is buffered
//! between calls: the [`State`] the caller passes in is the only thing that
//! carries over from one call to the next.

#![allow(clippy::indexing_slicing)] // Fixed-size schedule window + matrices

use crate::{
  U32x8,
  consts::{BIG_ENDIAN_MASK, BLOCK_LEN, K, LANES, ShuffleMask},
  dispatch,
  error::Error,
  state::State,
  transpose::transpose_portable,
};

/// Compress `nblocks` blocks of every stream into `state`.
///
/// Uses the standard round constants and reads message words big-endian.
///
/// # Errors
///
/// Returns [`Error::ShortStream`] if any stream holds fewer than
/// `nblocks * 64` bytes, or [`Error::BlockCountOverflow`] if that length
/// does not fit in `usize`. `state` is untouched on error.
///
/// # Examples
///
/// ```
/// use sha256x8::State;
///
/// // SHA-256 padding of the empty message: 0x80, zeros, 64-bit length 0.
/// let mut block = [0u8; 64];
/// block[0] = 0x80;
///
/// let mut state = State::new();
/// sha256x8::compress(&mut state, [&block[..]; 8], 1)?;
/// for digest in state.digests() {
///   assert_eq!(digest[..4], [0xe3, 0xb0, 0xc4, 0x42]);
/// }
/// # Ok::<(), sha256x8::Error>(())
/// ```
#[inline]
pub fn compress(state: &mut State, streams: [&[u8]; LANES], nblocks: usize) -> Result<(), Error> {
  compress_with(state, streams, nblocks, &K, BIG_ENDIAN_MASK)
}

/// Compress with an explicit round-constant table and load shuffle.
///
/// `mask` is applied to every 32 bytes loaded from a stream before the words
/// enter the message schedule.
///
/// # Errors
///
/// Same as [`compress`].
pub fn compress_with(
  state: &mut State,
  streams: [&[u8]; LANES],
  nblocks: usize,
  k: &[u32; 64],
  mask: &ShuffleMask,
) -> Result<(), Error> {
  check_streams(&streams, nblocks)?;
  if nblocks == 0 {
    return Ok(());
  }
  (dispatch::kernel().compress)(&mut state.0, &streams, nblocks, k, mask);
  Ok(())
}

/// Compress from raw stream pointers without any checks.
///
/// # Safety
///
/// Each of the eight pointers must be valid for reads of `nblocks * 64`
/// bytes, that product must not overflow `usize`, and the memory must not be
/// mutated for the duration of the call.
pub unsafe fn compress_unchecked(state: &mut State, streams: &[*const u8; LANES], nblocks: usize) {
  if nblocks == 0 {
    return;
  }
  let len = nblocks * BLOCK_LEN;
  // SAFETY: the caller guarantees every pointer addresses `len` readable bytes.
  let slices = streams.map(|p| unsafe { core::slice::from_raw_parts(p, len) });
  (dispatch::kernel().compress)(&mut state.0, &slices, nblocks, &K, BIG_ENDIAN_MASK);
}

/// Validate stream lengths for `nblocks` blocks.
pub(crate) fn check_streams(streams: &[&[u8]; LANES], nblocks: usize) -> Result<(), Error> {
  let required = nblocks
    .checked_mul(BLOCK_LEN)
    .ok_or(Error::BlockCountOverflow { nblocks })?;
  for (lane, stream) in streams.iter().enumerate() {
    if stream.len() < required {
      return Err(Error::ShortStream {
        lane,
        len: stream.len(),
        required,
      });
    }
  }
  Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Round functions
// ─────────────────────────────────────────────────────────────────────────────

#[inline(always)]
fn ch(e: U32x8, f: U32x8, g: U32x8) -> U32x8 {
  e.and(f).xor(e.andnot(g))
}

#[inline(always)]
fn maj(a: U32x8, b: U32x8, c: U32x8) -> U32x8 {
  a.and(b).xor(a.and(c)).xor(b.and(c))
}

#[inline(always)]
fn big_sigma0(x: U32x8) -> U32x8 {
  x.rotr::<2>().xor(x.rotr::<13>()).xor(x.rotr::<22>())
}

#[inline(always)]
fn big_sigma1(x: U32x8) -> U32x8 {
  x.rotr::<6>().xor(x.rotr::<11>()).xor(x.rotr::<25>())
}

#[inline(always)]
fn small_sigma0(x: U32x8) -> U32x8 {
  x.rotr::<7>().xor(x.rotr::<18>()).xor(x.shr::<3>())
}

#[inline(always)]
fn small_sigma1(x: U32x8) -> U32x8 {
  x.rotr::<17>().xor(x.rotr::<19>()).xor(x.shr::<10>())
}

// ─────────────────────────────────────────────────────────────────────────────
// Portable kernel
// ─────────────────────────────────────────────────────────────────────────────

/// Load block `offset` of every stream and lay it out index-major.
#[inline(always)]
fn load_schedule(streams: &[&[u8]; LANES], offset: usize, mask: &ShuffleMask) -> [U32x8; 16] {
  let mut lo = [U32x8::ZERO; LANES];
  let mut hi = [U32x8::ZERO; LANES];
  for (lane, stream) in streams.iter().enumerate() {
    let (halves, _) = stream[offset..offset + BLOCK_LEN].as_chunks::<32>();
    lo[lane] = U32x8::from_ne_bytes(&halves[0]).shuffle_bytes(mask);
    hi[lane] = U32x8::from_ne_bytes(&halves[1]).shuffle_bytes(mask);
  }
  transpose_portable(&mut lo);
  transpose_portable(&mut hi);

  let mut w = [U32x8::ZERO; 16];
  w[..LANES].copy_from_slice(&lo);
  w[LANES..].copy_from_slice(&hi);
  w
}

/// Advance the 16-slot window by 16 schedule words, in place.
#[inline(always)]
fn expand(w: &mut [U32x8; 16]) {
  for j in 0..16 {
    w[j] = w[j]
      .wrapping_add(small_sigma1(w[(j + 14) % 16]))
      .wrapping_add(w[(j + 9) % 16])
      .wrapping_add(small_sigma0(w[(j + 1) % 16]));
  }
}

/// Portable 8-lane kernel. Every stream holds at least `nblocks * 64` bytes.
pub(crate) fn compress_portable(
  state: &mut [U32x8; LANES],
  streams: &[&[u8]; LANES],
  nblocks: usize,
  k: &[u32; 64],
  mask: &ShuffleMask,
) {
  for block in 0..nblocks {
    let mut w = load_schedule(streams, block * BLOCK_LEN, mask);

    let [mut a, mut b, mut c, mut d, mut e, mut f, mut g, mut h] = *state;

    for (i, &ki) in k.iter().enumerate() {
      if i != 0 && i % 16 == 0 {
        expand(&mut w);
      }

      let t1 = h
        .wrapping_add(big_sigma1(e))
        .wrapping_add(ch(e, f, g))
        .wrapping_add(U32x8::splat(ki))
        .wrapping_add(w[i % 16]);
      let t2 = big_sigma0(a).wrapping_add(maj(a, b, c));

      h = g;
      g = f;
      f = e;
      e = d.wrapping_add(t1);
      d = c;
      c = b;
      b = a;
      a = t1.wrapping_add(t2);
    }

    for (row, v) in state.iter_mut().zip([a, b, c, d, e, f, g, h]) {
      *row = row.wrapping_add(v);
    }
  }
}
