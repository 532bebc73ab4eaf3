//! Runtime CPU detection.
//!
//! - Compile-time detection via `cfg!(target_feature = "...")`
//! - Runtime detection via `std::arch::is_*_feature_detected!` (std only)
//! - Caching via `OnceLock` (std) or per-call compile-time caps (no_std)
//! - User-supplied overrides for bare metal and testing
//! - Miri fallback (always portable)

use core::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crate::caps::{Caps, CpuCaps};

// ─────────────────────────────────────────────────────────────────────────────
// Override Infrastructure
// ─────────────────────────────────────────────────────────────────────────────

static OVERRIDE_SET: AtomicBool = AtomicBool::new(false);
static OVERRIDE_BITS: AtomicU64 = AtomicU64::new(0);

pub(crate) fn set_caps_override(value: Option<Caps>) {
  match value {
    Some(caps) => {
      OVERRIDE_BITS.store(caps.0, Ordering::Release);
      OVERRIDE_SET.store(true, Ordering::Release);
    }
    None => OVERRIDE_SET.store(false, Ordering::Release),
  }
}

pub(crate) fn has_override() -> bool {
  OVERRIDE_SET.load(Ordering::Acquire)
}

#[inline]
fn override_caps() -> Option<CpuCaps> {
  if OVERRIDE_SET.load(Ordering::Acquire) {
    Some(CpuCaps::new(Caps(OVERRIDE_BITS.load(Ordering::Acquire))))
  } else {
    None
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Entry Point
// ─────────────────────────────────────────────────────────────────────────────

#[inline]
pub(crate) fn caps() -> CpuCaps {
  if let Some(caps) = override_caps() {
    return caps;
  }
  cached()
}

#[cfg(feature = "std")]
fn cached() -> CpuCaps {
  use std::sync::OnceLock;
  static DETECTED: OnceLock<CpuCaps> = OnceLock::new();
  *DETECTED.get_or_init(detect)
}

#[cfg(not(feature = "std"))]
fn cached() -> CpuCaps {
  detect()
}

fn detect() -> CpuCaps {
  if cfg!(miri) {
    return CpuCaps::PORTABLE;
  }
  CpuCaps::new(caps_static().union(caps_runtime()))
}

// ─────────────────────────────────────────────────────────────────────────────
// Compile-time Detection
// ─────────────────────────────────────────────────────────────────────────────

/// Features the compiler was told it may assume (`-C target-feature`).
#[must_use]
pub(crate) const fn caps_static() -> Caps {
  #[allow(unused_mut)]
  let mut caps = Caps::NONE;

  #[cfg(target_arch = "x86_64")]
  {
    use crate::caps::x86;
    if cfg!(target_feature = "avx") {
      caps = caps.union(x86::AVX);
    }
    if cfg!(target_feature = "avx2") {
      caps = caps.union(x86::AVX2);
    }
  }

  caps
}

// ─────────────────────────────────────────────────────────────────────────────
// Runtime Detection
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(all(target_arch = "x86_64", feature = "std"))]
fn caps_runtime() -> Caps {
  use crate::caps::x86;

  let mut caps = Caps::NONE;
  // `is_x86_feature_detected!` already accounts for OS XSAVE support of YMM state.
  if std::arch::is_x86_feature_detected!("avx") {
    caps |= x86::AVX;
  }
  if std::arch::is_x86_feature_detected!("avx2") {
    caps |= x86::AVX2;
  }
  caps
}

#[cfg(not(all(target_arch = "x86_64", feature = "std")))]
const fn caps_runtime() -> Caps {
  Caps::NONE
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn runtime_is_superset_of_static() {
    let detected = detect();
    if !cfg!(miri) {
      assert!(detected.caps.has(caps_static()));
    }
  }

  #[test]
  #[cfg(all(target_arch = "x86_64", feature = "std", not(miri)))]
  fn avx2_matches_std_detection() {
    let detected = detect();
    assert_eq!(
      detected.has(crate::caps::x86::AVX2),
      std::arch::is_x86_feature_detected!("avx2")
    );
    assert_eq!(
      detected.has(crate::caps::x86::AVX),
      std::arch::is_x86_feature_detected!("avx")
    );
  }
}
