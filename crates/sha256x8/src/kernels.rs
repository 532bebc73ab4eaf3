//! Kernel identifiers and function tables.
//!
//! A [`Kernel`] bundles the three vector primitives (normalize, transpose,
//! compress) for one instruction set, so a single dispatch decision covers
//! every operation and they never mix backends within a call.

use platform::Caps;

use crate::{
  U32x8,
  compress::compress_portable,
  consts::{LANES, ShuffleMask},
  normalize::normalize_portable,
  transpose::transpose_portable,
};

pub(crate) type NormalizeFn = fn(&mut [u32], &ShuffleMask);
pub(crate) type TransposeFn = fn(&mut [U32x8; LANES]);
pub(crate) type CompressFn = fn(&mut [U32x8; LANES], &[&[u8]; LANES], usize, &[u32; 64], &ShuffleMask);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Sha256x8KernelId {
  Portable = 0,
  #[cfg(target_arch = "x86_64")]
  X86Avx2 = 1,
}

pub const ALL: &[Sha256x8KernelId] = &[
  Sha256x8KernelId::Portable,
  #[cfg(target_arch = "x86_64")]
  Sha256x8KernelId::X86Avx2,
];

impl Sha256x8KernelId {
  #[inline]
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Portable => "portable",
      #[cfg(target_arch = "x86_64")]
      Self::X86Avx2 => "x86_64/avx2",
    }
  }
}

#[must_use]
pub fn id_from_name(name: &str) -> Option<Sha256x8KernelId> {
  match name {
    "portable" => Some(Sha256x8KernelId::Portable),
    #[cfg(target_arch = "x86_64")]
    "x86_64/avx2" => Some(Sha256x8KernelId::X86Avx2),
    _ => None,
  }
}

#[inline]
#[must_use]
pub const fn required_caps(id: Sha256x8KernelId) -> Caps {
  match id {
    Sha256x8KernelId::Portable => Caps::NONE,
    #[cfg(target_arch = "x86_64")]
    Sha256x8KernelId::X86Avx2 => platform::caps::x86::AVX2_READY,
  }
}

/// Function table for one backend.
#[derive(Clone, Copy)]
pub(crate) struct Kernel {
  pub id: Sha256x8KernelId,
  pub normalize: NormalizeFn,
  pub transpose: TransposeFn,
  pub compress: CompressFn,
}

impl Kernel {
  pub(crate) const PORTABLE: Self = Self {
    id: Sha256x8KernelId::Portable,
    normalize: normalize_portable,
    transpose: transpose_portable,
    compress: compress_portable,
  };

  #[inline]
  #[must_use]
  pub(crate) const fn name(&self) -> &'static str {
    self.id.as_str()
  }
}

/// Function table for `id`. Callers must check [`required_caps`] first.
#[must_use]
pub(crate) fn kernel_for(id: Sha256x8KernelId) -> Kernel {
  match id {
    Sha256x8KernelId::Portable => Kernel::PORTABLE,
    #[cfg(target_arch = "x86_64")]
    Sha256x8KernelId::X86Avx2 => crate::x86_64::AVX2,
  }
}

/// Kernels the current CPU can run, portable first.
pub fn available_kernels() -> impl Iterator<Item = Sha256x8KernelId> {
  let caps = platform::caps();
  ALL.iter().copied().filter(move |&id| caps.has(required_caps(id)))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn names_round_trip() {
    for &id in ALL {
      assert_eq!(id_from_name(id.as_str()), Some(id));
    }
    assert_eq!(id_from_name("avx512"), None);
  }

  #[test]
  fn portable_needs_nothing() {
    assert!(required_caps(Sha256x8KernelId::Portable).is_empty());
  }

  #[test]
  fn available_kernels_start_with_portable() {
    assert_eq!(available_kernels().next(), Some(Sha256x8KernelId::Portable));
  }

  #[test]
  fn tables_carry_their_id() {
    for &id in ALL {
      assert_eq!(kernel_for(id).name(), id.as_str());
    }
  }
}
