//! Dispatch introspection.
//!
//! Reports which kernel is in use and why, without touching the hot path.
//!
//! ```
//! use sha256x8::DispatchInfo;
//!
//! let info = DispatchInfo::current();
//! println!("{info}");
//! // e.g. "x86_64/avx2 (force=auto) on Caps(x86_64, [avx,avx2])"
//! ```

use core::fmt;

use platform::CpuCaps;

use crate::{
  config::{self, Sha256x8Config},
  dispatch,
};

/// Snapshot of the dispatch decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DispatchInfo {
  caps: CpuCaps,
  config: Sha256x8Config,
  kernel: &'static str,
}

impl DispatchInfo {
  #[inline]
  #[must_use]
  pub fn current() -> Self {
    let caps = platform::caps();
    Self {
      caps,
      config: config::config(caps),
      kernel: dispatch::kernel().name(),
    }
  }

  /// Detected (or overridden) CPU capabilities.
  #[inline]
  #[must_use]
  pub fn caps(&self) -> CpuCaps {
    self.caps
  }

  #[inline]
  #[must_use]
  pub fn config(&self) -> Sha256x8Config {
    self.config
  }

  /// Name of the selected kernel.
  #[inline]
  #[must_use]
  pub fn kernel(&self) -> &'static str {
    self.kernel
  }
}

impl fmt::Display for DispatchInfo {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{} (force={}) on {}",
      self.kernel,
      self.config.effective_force.as_str(),
      self.caps
    )
  }
}
