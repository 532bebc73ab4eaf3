//! AVX2 8-lane SHA-256 kernels.
//!
//! One `__m256i` holds the same schedule or state word for all eight streams,
//! so every round is straight-line vector arithmetic with no horizontal work.

#![allow(unsafe_code)]
#![allow(unsafe_op_in_unsafe_fn)]
#![allow(clippy::inline_always)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::undocumented_unsafe_blocks)]
#![allow(clippy::indexing_slicing)] // Fixed-size vector arrays

use core::arch::x86_64::*;

use crate::{
  U32x8,
  consts::{BLOCK_LEN, LANES, ShuffleMask},
};

#[inline(always)]
unsafe fn loadu(src: *const u8) -> __m256i {
  unsafe { _mm256_loadu_si256(src.cast()) }
}

#[inline(always)]
unsafe fn load(v: &U32x8) -> __m256i {
  // U32x8 is 32-byte aligned.
  unsafe { _mm256_load_si256((v as *const U32x8).cast()) }
}

#[inline(always)]
unsafe fn store(v: &mut U32x8, x: __m256i) {
  unsafe { _mm256_store_si256((v as *mut U32x8).cast(), x) }
}

#[inline(always)]
unsafe fn add(a: __m256i, b: __m256i) -> __m256i {
  unsafe { _mm256_add_epi32(a, b) }
}

#[inline(always)]
unsafe fn xor(a: __m256i, b: __m256i) -> __m256i {
  unsafe { _mm256_xor_si256(a, b) }
}

#[inline(always)]
unsafe fn and(a: __m256i, b: __m256i) -> __m256i {
  unsafe { _mm256_and_si256(a, b) }
}

#[inline(always)]
unsafe fn set1(x: u32) -> __m256i {
  unsafe { _mm256_set1_epi32(x as i32) }
}

#[inline(always)]
unsafe fn rotr<const R: i32, const L: i32>(x: __m256i) -> __m256i {
  unsafe { _mm256_or_si256(_mm256_srli_epi32::<R>(x), _mm256_slli_epi32::<L>(x)) }
}

#[inline(always)]
unsafe fn big_sigma0(x: __m256i) -> __m256i {
  xor(xor(rotr::<2, 30>(x), rotr::<13, 19>(x)), rotr::<22, 10>(x))
}

#[inline(always)]
unsafe fn big_sigma1(x: __m256i) -> __m256i {
  xor(xor(rotr::<6, 26>(x), rotr::<11, 21>(x)), rotr::<25, 7>(x))
}

#[inline(always)]
unsafe fn small_sigma0(x: __m256i) -> __m256i {
  xor(xor(rotr::<7, 25>(x), rotr::<18, 14>(x)), _mm256_srli_epi32::<3>(x))
}

#[inline(always)]
unsafe fn small_sigma1(x: __m256i) -> __m256i {
  xor(xor(rotr::<17, 15>(x), rotr::<19, 13>(x)), _mm256_srli_epi32::<10>(x))
}

#[inline(always)]
unsafe fn ch(e: __m256i, f: __m256i, g: __m256i) -> __m256i {
  // andnot_si256(a, b) = !a & b
  xor(and(e, f), _mm256_andnot_si256(e, g))
}

#[inline(always)]
unsafe fn maj(a: __m256i, b: __m256i, c: __m256i) -> __m256i {
  xor(xor(and(a, b), and(a, c)), and(b, c))
}

#[inline(always)]
unsafe fn interleave128(a: __m256i, b: __m256i) -> (__m256i, __m256i) {
  unsafe {
    (
      _mm256_permute2x128_si256(a, b, 0x20),
      _mm256_permute2x128_si256(a, b, 0x31),
    )
  }
}

#[inline(always)]
unsafe fn transpose_vecs(vecs: &mut [__m256i; LANES]) {
  unsafe {
    let ab_0145 = _mm256_unpacklo_epi32(vecs[0], vecs[1]);
    let ab_2367 = _mm256_unpackhi_epi32(vecs[0], vecs[1]);
    let cd_0145 = _mm256_unpacklo_epi32(vecs[2], vecs[3]);
    let cd_2367 = _mm256_unpackhi_epi32(vecs[2], vecs[3]);
    let ef_0145 = _mm256_unpacklo_epi32(vecs[4], vecs[5]);
    let ef_2367 = _mm256_unpackhi_epi32(vecs[4], vecs[5]);
    let gh_0145 = _mm256_unpacklo_epi32(vecs[6], vecs[7]);
    let gh_2367 = _mm256_unpackhi_epi32(vecs[6], vecs[7]);

    let abcd_04 = _mm256_unpacklo_epi64(ab_0145, cd_0145);
    let abcd_15 = _mm256_unpackhi_epi64(ab_0145, cd_0145);
    let abcd_26 = _mm256_unpacklo_epi64(ab_2367, cd_2367);
    let abcd_37 = _mm256_unpackhi_epi64(ab_2367, cd_2367);
    let efgh_04 = _mm256_unpacklo_epi64(ef_0145, gh_0145);
    let efgh_15 = _mm256_unpackhi_epi64(ef_0145, gh_0145);
    let efgh_26 = _mm256_unpacklo_epi64(ef_2367, gh_2367);
    let efgh_37 = _mm256_unpackhi_epi64(ef_2367, gh_2367);

    let (row0, row4) = interleave128(abcd_04, efgh_04);
    let (row1, row5) = interleave128(abcd_15, efgh_15);
    let (row2, row6) = interleave128(abcd_26, efgh_26);
    let (row3, row7) = interleave128(abcd_37, efgh_37);

    *vecs = [row0, row1, row2, row3, row4, row5, row6, row7];
  }
}

/// Load block `offset` of every stream, shuffle it through `mask`, and
/// transpose it into sixteen index-major schedule words.
#[inline(always)]
unsafe fn load_schedule(ptrs: &[*const u8; LANES], offset: usize, mask: __m256i) -> [__m256i; 16] {
  unsafe {
    let mut lo = [_mm256_setzero_si256(); LANES];
    let mut hi = [_mm256_setzero_si256(); LANES];
    for lane in 0..LANES {
      let p = ptrs[lane].add(offset);
      lo[lane] = _mm256_shuffle_epi8(loadu(p), mask);
      hi[lane] = _mm256_shuffle_epi8(loadu(p.add(32)), mask);
    }
    transpose_vecs(&mut lo);
    transpose_vecs(&mut hi);

    [
      lo[0], lo[1], lo[2], lo[3], lo[4], lo[5], lo[6], lo[7], hi[0], hi[1], hi[2], hi[3], hi[4], hi[5], hi[6], hi[7],
    ]
  }
}

#[inline(always)]
unsafe fn expand(w: &mut [__m256i; 16]) {
  unsafe {
    for j in 0..16 {
      let s1 = small_sigma1(w[(j + 14) % 16]);
      let s0 = small_sigma0(w[(j + 1) % 16]);
      w[j] = add(add(w[j], s1), add(w[(j + 9) % 16], s0));
    }
  }
}

/// Byte-shuffle every 8-word chunk of `buf`.
///
/// # Safety
///
/// Caller must ensure AVX2 is available. `buf.len()` must be a multiple of 8;
/// a trailing partial chunk is left untouched.
#[target_feature(enable = "avx2")]
pub unsafe fn normalize(buf: &mut [u32], mask: &ShuffleMask) {
  let m = loadu(mask.as_bytes().as_ptr());
  let (chunks, _) = buf.as_chunks_mut::<LANES>();
  for chunk in chunks {
    let p = chunk.as_mut_ptr().cast::<__m256i>();
    _mm256_storeu_si256(p, _mm256_shuffle_epi8(_mm256_loadu_si256(p), m));
  }
}

/// Transpose an 8×8 matrix of 32-bit words in place.
///
/// # Safety
///
/// Caller must ensure AVX2 is available.
#[target_feature(enable = "avx2")]
pub unsafe fn transpose(m: &mut [U32x8; LANES]) {
  let mut v = [_mm256_setzero_si256(); LANES];
  for i in 0..LANES {
    v[i] = load(&m[i]);
  }
  transpose_vecs(&mut v);
  for i in 0..LANES {
    store(&mut m[i], v[i]);
  }
}

/// Compress `nblocks` blocks of eight streams into `state`.
///
/// # Safety
///
/// Caller must ensure AVX2 is available and that every pointer in `ptrs` is
/// valid for reads of `nblocks * 64` bytes.
#[target_feature(enable = "avx2")]
pub unsafe fn compress(
  state: &mut [U32x8; LANES],
  ptrs: &[*const u8; LANES],
  nblocks: usize,
  k: &[u32; 64],
  mask: &ShuffleMask,
) {
  let m = loadu(mask.as_bytes().as_ptr());

  let mut s = [_mm256_setzero_si256(); LANES];
  for i in 0..LANES {
    s[i] = load(&state[i]);
  }

  for block in 0..nblocks {
    let mut w = load_schedule(ptrs, block * BLOCK_LEN, m);
    let [mut a, mut b, mut c, mut d, mut e, mut f, mut g, mut h] = s;

    for i in 0..64 {
      if i != 0 && i % 16 == 0 {
        expand(&mut w);
      }

      let t1 = add(
        add(add(h, big_sigma1(e)), add(ch(e, f, g), set1(k[i]))),
        w[i % 16],
      );
      let t2 = add(big_sigma0(a), maj(a, b, c));

      h = g;
      g = f;
      f = e;
      e = add(d, t1);
      d = c;
      c = b;
      b = a;
      a = add(t1, t2);
    }

    let out = [a, b, c, d, e, f, g, h];
    for i in 0..LANES {
      s[i] = add(s[i], out[i]);
    }
  }

  for i in 0..LANES {
    store(&mut state[i], s[i]);
  }
}
