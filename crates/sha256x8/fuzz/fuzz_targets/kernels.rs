//! Cross-kernel equivalence fuzzing.
//!
//! Every kernel available on the current CPU must produce identical
//! compress, normalize, and transpose output for any input.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sha256x8::__internal::verify_kernels;

fuzz_target!(|data: &[u8]| {
  verify_kernels(data).expect("sha256x8 kernels should agree");
});
