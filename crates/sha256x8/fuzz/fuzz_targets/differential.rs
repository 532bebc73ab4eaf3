//! Differential fuzzing against `sha2`.
//!
//! The input is split into eight messages (one per lane, by byte index mod 8),
//! each padded and hashed; every lane must match `sha2::Sha256`.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sha256x8::{BLOCK_LEN, LANES, State};

fn pad_to(msg: &[u8], nblocks: usize) -> Option<Vec<u8>> {
  let needed = (msg.len() + 9).div_ceil(BLOCK_LEN);
  if needed != nblocks {
    return None;
  }
  let mut out = msg.to_vec();
  out.push(0x80);
  out.resize(nblocks * BLOCK_LEN - 8, 0);
  out.extend_from_slice(&((msg.len() as u64) * 8).to_be_bytes());
  Some(out)
}

fuzz_target!(|data: &[u8]| {
  let Some((&sel, rest)) = data.split_first() else {
    return;
  };
  // Every lane gets a message that pads to the same block count.
  let nblocks = usize::from(sel % 4) + 1;
  let max = nblocks * BLOCK_LEN - 9;
  let min = ((nblocks - 1) * BLOCK_LEN).saturating_sub(8);

  let msgs: [Vec<u8>; LANES] = core::array::from_fn(|lane| {
    let mut m: Vec<u8> = rest.iter().skip(lane).step_by(LANES).copied().take(max).collect();
    if m.len() < min {
      m.resize(min, lane as u8);
    }
    m
  });
  let padded: Vec<Vec<u8>> = msgs.iter().filter_map(|m| pad_to(m, nblocks)).collect();
  assert_eq!(padded.len(), LANES);

  let mut state = State::new();
  let streams: [&[u8]; LANES] = core::array::from_fn(|lane| padded[lane].as_slice());
  sha256x8::compress(&mut state, streams, nblocks).expect("padded streams are long enough");

  use sha2::Digest as _;
  for (lane, digest) in state.digests().iter().enumerate() {
    let expected = sha2::Sha256::digest(&msgs[lane]);
    assert_eq!(&digest[..], &expected[..], "lane {lane}");
  }
});
