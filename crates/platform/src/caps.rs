//! CPU capability representation.
//!
//! [`Caps`] answers one question: "which vector instructions may this process
//! legally execute?" Each bit names one ISA extension. Only the extensions a
//! kernel actually requires get a bit; other targets report an empty set.
//!
//! # Bit Layout
//!
//! - Bits 0-31: x86/x86_64 features
//! - Bits 32-63: reserved
//!
//! # Usage
//!
//! ```
//! use platform::caps::{Caps, x86};
//!
//! let caps = platform::caps();
//! if caps.has(x86::AVX2_READY) {
//!   // 8 × u32 lanes per instruction
//! }
//! # let _ = Caps::NONE;
//! ```

use core::fmt;

// ─────────────────────────────────────────────────────────────────────────────
// Core Capability Type
// ─────────────────────────────────────────────────────────────────────────────

/// CPU capabilities: a 64-bit feature bitset.
///
/// `Caps` is `Copy`, `Send`, and `Sync`.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Caps(pub(crate) u64);

impl Caps {
  /// Empty capability set (no features).
  pub const NONE: Self = Self(0);

  /// Create a capability set with a single bit set.
  #[inline]
  #[must_use]
  pub const fn bit(bit: u8) -> Self {
    Self(1u64 << (bit % 64))
  }

  /// Check if all features in `required` are present.
  #[inline(always)]
  #[must_use]
  pub const fn has(self, required: Self) -> bool {
    (self.0 & required.0) == required.0
  }

  /// Union of two capability sets.
  #[inline]
  #[must_use]
  pub const fn union(self, other: Self) -> Self {
    Self(self.0 | other.0)
  }

  /// Remove every feature in `other`.
  #[inline]
  #[must_use]
  pub const fn difference(self, other: Self) -> Self {
    Self(self.0 & !other.0)
  }

  #[inline]
  #[must_use]
  pub const fn is_empty(self) -> bool {
    self.0 == 0
  }

  /// Iterate the names of all features present, in bit order.
  pub fn names(self) -> impl Iterator<Item = &'static str> {
    FEATURE_NAMES
      .iter()
      .filter(move |(caps, _)| self.has(*caps))
      .map(|(_, name)| *name)
  }
}

impl core::ops::BitOr for Caps {
  type Output = Self;

  #[inline]
  fn bitor(self, rhs: Self) -> Self::Output {
    self.union(rhs)
  }
}

impl core::ops::BitOrAssign for Caps {
  #[inline]
  fn bitor_assign(&mut self, rhs: Self) {
    *self = self.union(rhs);
  }
}

impl fmt::Debug for Caps {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_list().entries(self.names()).finish()
  }
}

impl fmt::Display for Caps {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.is_empty() {
      return f.write_str("portable");
    }
    for (i, name) in self.names().enumerate() {
      if i != 0 {
        f.write_str(",")?;
      }
      f.write_str(name)?;
    }
    Ok(())
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Architecture Identification
// ─────────────────────────────────────────────────────────────────────────────

/// Target architecture enumeration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Arch {
  X86_64,
  Aarch64,
  #[default]
  Other,
}

impl Arch {
  /// Get the architecture for the current compilation target.
  #[inline]
  #[must_use]
  pub const fn current() -> Self {
    #[cfg(target_arch = "x86_64")]
    {
      Self::X86_64
    }
    #[cfg(target_arch = "aarch64")]
    {
      Self::Aarch64
    }
    #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
    {
      Self::Other
    }
  }

  #[inline]
  #[must_use]
  pub const fn name(self) -> &'static str {
    match self {
      Self::X86_64 => "x86_64",
      Self::Aarch64 => "aarch64",
      Self::Other => "other",
    }
  }
}

impl fmt::Display for Arch {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// x86_64 Features (bits 0-31)
// ─────────────────────────────────────────────────────────────────────────────

/// x86_64 features the AVX2 kernel depends on.
pub mod x86 {
  use super::Caps;

  pub const AVX: Caps = Caps::bit(0);
  pub const AVX2: Caps = Caps::bit(1);

  /// AVX2-ready: 256-bit integer lanes with `vpshufb`/`vperm2i128`.
  pub const AVX2_READY: Caps = Caps(AVX.0 | AVX2.0);
}

const FEATURE_NAMES: &[(Caps, &str)] = &[(x86::AVX, "avx"), (x86::AVX2, "avx2")];

/// Detected capabilities tagged with the architecture they were detected on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CpuCaps {
  pub arch: Arch,
  pub caps: Caps,
}

impl CpuCaps {
  /// Portable-only capabilities for the current target.
  pub const PORTABLE: Self = Self {
    arch: Arch::current(),
    caps: Caps::NONE,
  };

  #[inline]
  #[must_use]
  pub const fn new(caps: Caps) -> Self {
    Self {
      arch: Arch::current(),
      caps,
    }
  }

  #[inline(always)]
  #[must_use]
  pub const fn has(self, required: Caps) -> bool {
    self.caps.has(required)
  }
}

impl fmt::Display for CpuCaps {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Caps({}, [{}])", self.arch, self.caps)
  }
}

#[cfg(test)]
mod tests {
  extern crate alloc;

  use alloc::{string::ToString, vec::Vec};

  use super::*;

  #[test]
  fn has_requires_every_bit() {
    let caps = x86::AVX;
    assert!(caps.has(x86::AVX));
    assert!(!caps.has(x86::AVX2_READY));
    assert!((caps | x86::AVX2).has(x86::AVX2_READY));
    assert!(caps.has(Caps::NONE));
  }

  #[test]
  fn difference_clears_bits() {
    let caps = x86::AVX2_READY.difference(x86::AVX2);
    assert!(caps.has(x86::AVX));
    assert!(!caps.has(x86::AVX2));
  }

  #[test]
  fn names_follow_bit_order() {
    let names: Vec<_> = (x86::AVX2 | x86::AVX).names().collect();
    assert_eq!(names, ["avx", "avx2"]);
    assert_eq!(Caps::bit(40).names().count(), 0);
  }

  #[test]
  fn display_formats() {
    assert_eq!(Caps::NONE.to_string(), "portable");
    assert_eq!(x86::AVX2_READY.to_string(), "avx,avx2");
    assert_eq!(x86::AVX2.to_string(), "avx2");
  }
}
