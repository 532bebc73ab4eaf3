//! Runtime backend configuration (overrides).
//!
//! The only knob is the forced backend, read once from the
//! `SHA256X8_FORCE` environment variable (`std` only):
//!
//! | value                 | effect                          |
//! |-----------------------|---------------------------------|
//! | unset, empty, `auto`  | best kernel the CPU supports    |
//! | `portable`, `scalar`  | portable kernel                 |
//! | `avx2`                | AVX2 kernel, if supported       |
//!
//! Unrecognized values behave like `auto`. A forced backend the CPU cannot
//! run is clamped back to `auto`.

use platform::CpuCaps;

/// Forced backend selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Sha256x8Force {
  /// Use the default auto selector.
  #[default]
  Auto,
  /// Force the portable kernel.
  Portable,
  /// Force the AVX2 kernel if supported.
  Avx2,
}

impl Sha256x8Force {
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Auto => "auto",
      Self::Portable => "portable",
      Self::Avx2 => "avx2",
    }
  }

  /// Parse a force name, ignoring ASCII case and surrounding whitespace.
  #[must_use]
  pub fn parse(value: &str) -> Option<Self> {
    let value = value.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("auto") {
      return Some(Self::Auto);
    }
    if value.eq_ignore_ascii_case("portable") || value.eq_ignore_ascii_case("scalar") {
      return Some(Self::Portable);
    }
    if value.eq_ignore_ascii_case("avx2") || value.eq_ignore_ascii_case("x86_64/avx2") {
      return Some(Self::Avx2);
    }
    None
  }
}

/// Full runtime configuration (after applying overrides).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sha256x8Config {
  /// Requested force mode (env).
  pub requested_force: Sha256x8Force,
  /// Force mode clamped to detected CPU capabilities.
  pub effective_force: Sha256x8Force,
}

#[cfg(feature = "std")]
fn read_env_force() -> Sha256x8Force {
  std::env::var("SHA256X8_FORCE")
    .ok()
    .and_then(|v| Sha256x8Force::parse(&v))
    .unwrap_or_default()
}

#[cfg(feature = "std")]
fn requested_force() -> Sha256x8Force {
  use std::sync::OnceLock;
  static FORCE: OnceLock<Sha256x8Force> = OnceLock::new();
  *FORCE.get_or_init(read_env_force)
}

#[cfg(not(feature = "std"))]
fn requested_force() -> Sha256x8Force {
  Sha256x8Force::Auto
}

#[inline]
#[must_use]
#[allow(unused_variables)] // `caps` only used on x86_64
pub(crate) fn clamp_force_to_caps(requested: Sha256x8Force, caps: CpuCaps) -> Sha256x8Force {
  match requested {
    Sha256x8Force::Auto | Sha256x8Force::Portable => requested,
    Sha256x8Force::Avx2 => {
      #[cfg(target_arch = "x86_64")]
      {
        if caps.has(platform::caps::x86::AVX2_READY) {
          return Sha256x8Force::Avx2;
        }
      }
      Sha256x8Force::Auto
    }
  }
}

#[inline]
#[must_use]
pub(crate) fn config(caps: CpuCaps) -> Sha256x8Config {
  let requested_force = requested_force();
  Sha256x8Config {
    requested_force,
    effective_force: clamp_force_to_caps(requested_force, caps),
  }
}

/// Process-wide configuration for the current capabilities.
#[inline]
#[must_use]
pub fn get() -> Sha256x8Config {
  config(platform::caps())
}

#[cfg(test)]
mod tests {
  use platform::Caps;

  use super::*;

  #[test]
  fn parse_accepts_aliases_case_insensitively() {
    assert_eq!(Sha256x8Force::parse(""), Some(Sha256x8Force::Auto));
    assert_eq!(Sha256x8Force::parse(" AUTO "), Some(Sha256x8Force::Auto));
    assert_eq!(Sha256x8Force::parse("Scalar"), Some(Sha256x8Force::Portable));
    assert_eq!(Sha256x8Force::parse("portable"), Some(Sha256x8Force::Portable));
    assert_eq!(Sha256x8Force::parse("AVX2"), Some(Sha256x8Force::Avx2));
    assert_eq!(Sha256x8Force::parse("sse9"), None);
  }

  #[test]
  fn as_str_parses_back() {
    for f in [Sha256x8Force::Auto, Sha256x8Force::Portable, Sha256x8Force::Avx2] {
      assert_eq!(Sha256x8Force::parse(f.as_str()), Some(f));
    }
  }

  #[test]
  fn avx2_clamps_to_auto_without_caps() {
    let none = CpuCaps::new(Caps::NONE);
    assert_eq!(clamp_force_to_caps(Sha256x8Force::Avx2, none), Sha256x8Force::Auto);
    assert_eq!(clamp_force_to_caps(Sha256x8Force::Portable, none), Sha256x8Force::Portable);
  }

  #[cfg(target_arch = "x86_64")]
  #[test]
  fn avx2_survives_with_caps() {
    let caps = CpuCaps::new(platform::caps::x86::AVX2_READY);
    assert_eq!(clamp_force_to_caps(Sha256x8Force::Avx2, caps), Sha256x8Force::Avx2);
  }
}
