//! Eight-way SHA-256 block compression.
//!
//! This crate runs the SHA-256 compression function over eight independent
//! message streams at once, one stream per 32-bit vector lane. It is a
//! building block, not a hasher: callers pad their messages, drive
//! [`compress`] over whole 64-byte blocks, and read the digests back with
//! [`State::digests`].
//!
//! # Operations
//!
//! | Function | Purpose |
//! |----------|---------|
//! | [`compress`] | Compress `n` blocks of eight streams into a [`State`] |
//! | [`normalize`] | Byte-shuffle a `u32` buffer 8 words at a time |
//! | [`transpose`] | 8×8 transpose between stream-major and index-major |
//!
//! # Backends
//!
//! | Kernel | Requires |
//! |--------|----------|
//! | `portable` | nothing |
//! | `x86_64/avx2` | AVX + AVX2 |
//!
//! The fastest kernel the CPU supports is picked on first use. Set
//! `SHA256X8_FORCE=portable` to pin the portable kernel; see [`config`].
//!
//! # Example
//!
//! ```
//! use sha256x8::State;
//!
//! // Eight one-byte messages "\x00".."\x07", each padded to a single block.
//! let blocks: [[u8; 64]; 8] = core::array::from_fn(|k| {
//!   let mut b = [0u8; 64];
//!   b[0] = k as u8;
//!   b[1] = 0x80;
//!   b[63] = 8; // bit length
//!   b
//! });
//!
//! let mut state = State::new();
//! sha256x8::compress(&mut state, blocks.each_ref().map(|b| &b[..]), 1)?;
//! let digests = state.digests();
//! assert_eq!(digests[0][..4], [0x6e, 0x34, 0x0b, 0x9c]);
//! # Ok::<(), sha256x8::Error>(())
//! ```
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

mod cache;
mod compress;
pub mod config;
mod consts;
mod dispatch;
mod error;
mod introspect;
mod kernels;
mod lanes;
mod normalize;
mod state;
mod transpose;
#[cfg(target_arch = "x86_64")]
mod x86_64;


#[doc(hidden)]
#[cfg(feature = "std")]
pub mod __internal {
  pub use crate::kernel_test::{KernelResult, lane_streams, run_all_kernels, verify_kernels};
}

pub use compress::{compress, compress_unchecked, compress_with};
pub use config::{Sha256x8Config, Sha256x8Force};
pub use consts::{BIG_ENDIAN_MASK, BLOCK_LEN, BYTESWAP_MASK, H0, IDENTITY_MASK, K, LANES, OUT_LEN, ShuffleMask};
pub use dispatch::{available, backend_name};
pub use error::Error;
pub use introspect::DispatchInfo;
pub use kernels::{Sha256x8KernelId, available_kernels, id_from_name, required_caps};
pub use lanes::U32x8;
pub use normalize::normalize;
pub use state::State;
pub use transpose::transpose;
