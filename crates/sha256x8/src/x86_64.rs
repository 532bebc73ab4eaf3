//! x86_64 kernels.
//!
//! The AVX2 functions are `unsafe` because they need the `avx2` target
//! feature. The wrappers here are the only way dispatch reaches them, and
//! dispatch only hands out [`AVX2`] after `platform::caps()` has reported
//! [`AVX2_READY`](platform::caps::x86::AVX2_READY).

#![allow(unsafe_code)]

pub(crate) mod avx2;

use crate::{
  U32x8,
  consts::{BLOCK_LEN, LANES, ShuffleMask},
  kernels::{Kernel, Sha256x8KernelId},
};

pub(crate) const AVX2: Kernel = Kernel {
  id: Sha256x8KernelId::X86Avx2,
  normalize: normalize_avx2,
  transpose: transpose_avx2,
  compress: compress_avx2,
};

#[inline]
fn has_avx2() -> bool {
  platform::caps().has(platform::caps::x86::AVX2_READY)
}

fn normalize_avx2(buf: &mut [u32], mask: &ShuffleMask) {
  debug_assert!(has_avx2());
  // SAFETY: this table is only selected when AVX2 is available.
  unsafe { avx2::normalize(buf, mask) }
}

fn transpose_avx2(m: &mut [U32x8; LANES]) {
  debug_assert!(has_avx2());
  // SAFETY: this table is only selected when AVX2 is available.
  unsafe { avx2::transpose(m) }
}

fn compress_avx2(state: &mut [U32x8; LANES], streams: &[&[u8]; LANES], nblocks: usize, k: &[u32; 64], mask: &ShuffleMask) {
  debug_assert!(has_avx2());
  let required = nblocks.checked_mul(BLOCK_LEN);
  assert!(
    streams.iter().all(|s| required.is_some_and(|r| s.len() >= r)),
    "stream shorter than {nblocks} blocks"
  );
  let ptrs = streams.map(<[u8]>::as_ptr);
  // SAFETY: AVX2 is available (see above) and every stream holds
  // `nblocks * 64` readable bytes (asserted).
  unsafe { avx2::compress(state, &ptrs, nblocks, k, mask) }
}
