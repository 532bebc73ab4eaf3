//! CPU capability detection for the sha256x8 workspace.
//!
//! This crate is the single source of truth for "which vector kernels may run
//! on this machine". Hash kernels query [`caps()`] instead of doing ad-hoc
//! detection.
//!
//! # Design Philosophy
//!
//! 1. **One API**: kernels ask `platform::caps()`; nothing else queries CPUID.
//! 2. **Zero-cost when possible**: compile-time features are folded in via `cfg!`.
//! 3. **Cached otherwise**: runtime detection is cached in a `OnceLock` (std).
//! 4. **Miri-safe**: under Miri, only portable caps are reported.
//! 5. **Overridable**: tests and bare-metal deployments can pin the caps.

#![no_std]

#[cfg(feature = "std")]
extern crate std;

pub mod caps;
mod detect;

pub use caps::{Arch, Caps, CpuCaps};

/// Get the detected CPU capabilities.
///
/// With `std`, detection runs once and is cached. Without `std`, only the
/// compile-time target features are reported.
#[inline]
#[must_use]
pub fn caps() -> CpuCaps {
  detect::caps()
}

/// Set or clear the capabilities override.
///
/// When set, [`caps()`] returns the override instead of detecting. Pass
/// `None` to resume detection.
///
/// ```
/// platform::set_caps_override(Some(platform::Caps::NONE));
/// assert!(platform::caps().caps.is_empty());
/// platform::set_caps_override(None);
/// ```
#[inline]
pub fn set_caps_override(value: Option<Caps>) {
  detect::set_caps_override(value);
}

/// Check if an override is currently set.
#[inline]
#[must_use]
pub fn has_override() -> bool {
  detect::has_override()
}

/// Capabilities the compiler may assume at build time.
#[inline]
#[must_use]
pub const fn caps_static() -> Caps {
  detect::caps_static()
}
