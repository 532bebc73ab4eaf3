//! Lazy process-wide cache for the selected kernel table.
//!
//! Same contract as `std::sync::OnceLock::get_or_init` for `Copy` values, but
//! also works without `std`:
//!
//! - **std**: `OnceLock`
//! - **no_std with atomics**: a three-state atomic latch
//! - **no_std without atomics**: recompute on every call (single-threaded targets)

#[cfg(all(not(feature = "std"), target_has_atomic = "8"))]
use core::{cell::UnsafeCell, mem::MaybeUninit};

pub(crate) struct OnceCache<T: Copy> {
  #[cfg(feature = "std")]
  inner: std::sync::OnceLock<T>,

  #[cfg(all(not(feature = "std"), target_has_atomic = "8"))]
  state: core::sync::atomic::AtomicU8,
  #[cfg(all(not(feature = "std"), target_has_atomic = "8"))]
  value: UnsafeCell<MaybeUninit<T>>,

  #[cfg(all(not(feature = "std"), not(target_has_atomic = "8")))]
  _marker: core::marker::PhantomData<T>,
}

// SAFETY: `value` is written once, by the thread that wins the
// UNINIT -> INITING transition, and only read after READY is published with
// Release ordering.
#[allow(unsafe_code)]
#[cfg(all(not(feature = "std"), target_has_atomic = "8"))]
unsafe impl<T: Copy + Send + Sync> Sync for OnceCache<T> {}

#[cfg(all(not(feature = "std"), target_has_atomic = "8"))]
const UNINIT: u8 = 0;
#[cfg(all(not(feature = "std"), target_has_atomic = "8"))]
const INITING: u8 = 1;
#[cfg(all(not(feature = "std"), target_has_atomic = "8"))]
const READY: u8 = 2;

impl<T: Copy> OnceCache<T> {
  #[must_use]
  pub(crate) const fn new() -> Self {
    Self {
      #[cfg(feature = "std")]
      inner: std::sync::OnceLock::new(),

      #[cfg(all(not(feature = "std"), target_has_atomic = "8"))]
      state: core::sync::atomic::AtomicU8::new(UNINIT),
      #[cfg(all(not(feature = "std"), target_has_atomic = "8"))]
      value: UnsafeCell::new(MaybeUninit::uninit()),

      #[cfg(all(not(feature = "std"), not(target_has_atomic = "8")))]
      _marker: core::marker::PhantomData,
    }
  }

  /// Cached value, running `f` on first use.
  ///
  /// With atomics `f` runs at most once; racing callers spin until it finishes.
  #[inline]
  pub(crate) fn get_or_init(&self, f: impl FnOnce() -> T) -> T {
    #[cfg(feature = "std")]
    {
      *self.inner.get_or_init(f)
    }

    #[cfg(all(not(feature = "std"), target_has_atomic = "8"))]
    {
      use core::sync::atomic::Ordering;

      if self.state.load(Ordering::Acquire) != READY {
        if self
          .state
          .compare_exchange(UNINIT, INITING, Ordering::AcqRel, Ordering::Acquire)
          .is_ok()
        {
          let value = f();
          // SAFETY: INITING gives this thread exclusive access to `value`.
          #[allow(unsafe_code)]
          unsafe {
            (*self.value.get()).write(value);
          }
          self.state.store(READY, Ordering::Release);
          return value;
        }
        while self.state.load(Ordering::Acquire) != READY {
          core::hint::spin_loop();
        }
      }
      // SAFETY: READY is only stored after `value` is written.
      #[allow(unsafe_code)]
      unsafe {
        (*self.value.get()).assume_init()
      }
    }

    #[cfg(all(not(feature = "std"), not(target_has_atomic = "8")))]
    {
      f()
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn initializer_runs_once() {
    static CACHE: OnceCache<u32> = OnceCache::new();

    let mut calls = 0;
    let first = CACHE.get_or_init(|| {
      calls += 1;
      7
    });
    let second = CACHE.get_or_init(|| {
      calls += 1;
      9
    });

    assert_eq!((first, second), (7, 7));
    #[cfg(any(feature = "std", target_has_atomic = "8"))]
    assert_eq!(calls, 1);
  }
}
