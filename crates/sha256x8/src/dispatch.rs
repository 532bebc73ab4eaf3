//! Kernel selection.
//!
//! The kernel is resolved once per process from the detected capabilities and
//! the [`config`](crate::config) force, then cached. While a
//! `platform::set_caps_override` is active the cache is bypassed so the
//! override takes effect immediately.

use platform::CpuCaps;

use crate::{
  cache::OnceCache,
  config::{self, Sha256x8Force},
  kernels::{ALL, Kernel, Sha256x8KernelId, kernel_for, required_caps},
};

static KERNEL: OnceCache<Kernel> = OnceCache::new();

/// The kernel table every public operation runs through.
#[inline]
pub(crate) fn kernel() -> Kernel {
  if platform::has_override() {
    return resolve(platform::caps());
  }
  KERNEL.get_or_init(|| resolve(platform::caps()))
}

#[must_use]
pub(crate) fn resolve(caps: CpuCaps) -> Kernel {
  let force = config::config(caps).effective_force;
  kernel_for(select(force, caps))
}

/// Pick a kernel id. `force` is already clamped to `caps`.
#[must_use]
fn select(force: Sha256x8Force, caps: CpuCaps) -> Sha256x8KernelId {
  match force {
    Sha256x8Force::Portable => Sha256x8KernelId::Portable,
    #[cfg(target_arch = "x86_64")]
    Sha256x8Force::Avx2 => Sha256x8KernelId::X86Avx2,
    _ => best(caps),
  }
}

/// Fastest supported kernel: the last entry of [`ALL`] whose caps are present.
#[must_use]
fn best(caps: CpuCaps) -> Sha256x8KernelId {
  ALL
    .iter()
    .rev()
    .copied()
    .find(|&id| caps.has(required_caps(id)))
    .unwrap_or(Sha256x8KernelId::Portable)
}

/// Name of the kernel currently used for every operation.
///
/// ```
/// let name = sha256x8::backend_name();
/// assert!(name == "portable" || name == "x86_64/avx2");
/// ```
#[inline]
#[must_use]
pub fn backend_name() -> &'static str {
  kernel().name()
}

/// Whether a vector kernel (anything but `portable`) is in use.
#[inline]
#[must_use]
pub fn available() -> bool {
  kernel().id != Sha256x8KernelId::Portable
}

#[cfg(test)]
mod tests {
  use platform::Caps;

  use super::*;

  #[test]
  fn no_caps_selects_portable() {
    let caps = CpuCaps::new(Caps::NONE);
    assert_eq!(best(caps), Sha256x8KernelId::Portable);
    assert_eq!(select(Sha256x8Force::Auto, caps), Sha256x8KernelId::Portable);
  }

  #[test]
  fn portable_force_wins_over_caps() {
    let caps = platform::caps();
    assert_eq!(select(Sha256x8Force::Portable, caps), Sha256x8KernelId::Portable);
  }

  #[cfg(target_arch = "x86_64")]
  #[test]
  fn avx2_caps_select_avx2() {
    let caps = CpuCaps::new(platform::caps::x86::AVX2_READY);
    assert_eq!(best(caps), Sha256x8KernelId::X86Avx2);
  }

  #[test]
  fn resolved_kernel_is_runnable() {
    let caps = platform::caps();
    assert!(caps.has(required_caps(resolve(caps).id)));
  }

  #[test]
  fn available_tracks_backend_name() {
    assert_eq!(available(), backend_name() != "portable");
  }

  #[test]
  fn backend_name_matches_a_known_kernel() {
    assert!(ALL.iter().any(|id| id.as_str() == backend_name()));
  }
}
