use sha256x8::{BLOCK_LEN, LANES, State};

fn hex(s: &str) -> [u8; 32] {
  let mut out = [0u8; 32];
  for (i, b) in out.iter_mut().enumerate() {
    *b = u8::from_str_radix(&s[i * 2..i * 2 + 2], 16).expect("valid hex");
  }
  out
}

/// Standard SHA-256 padding.
fn pad(msg: &[u8]) -> Vec<u8> {
  let mut out = msg.to_vec();
  out.push(0x80);
  while out.len() % BLOCK_LEN != BLOCK_LEN - 8 {
    out.push(0);
  }
  out.extend_from_slice(&((msg.len() as u64) * 8).to_be_bytes());
  out
}

fn digests_of(msgs: [&[u8]; LANES]) -> [[u8; 32]; LANES] {
  let padded = msgs.map(pad);
  let nblocks = padded[0].len() / BLOCK_LEN;
  assert!(padded.iter().all(|p| p.len() == nblocks * BLOCK_LEN));

  let mut state = State::new();
  sha256x8::compress(&mut state, padded.each_ref().map(Vec::as_slice), nblocks).expect("padded streams");
  state.digests()
}

#[test]
fn single_byte_messages_per_lane() {
  let expected = [
    "6e340b9cffb37a989ca544e6bb780a2c78901d3fb33738768511a30617afa01d",
    "4bf5122f344554c53bde2ebb8cd2b7e3d1600ad631c385a5d7cce23c7785459a",
    "dbc1b4c900ffe48d575b5da5c638040125f65db0fe3e24494b76ea986457d986",
    "084fed08b978af4d7d196a7446a86b58009e636b611db16211b65a9aadff29c5",
    "e52d9c508c502347344d8c07ad91cbd6068afc75ff6292f062a09ca381c89e71",
    "e77b9a9ae9e30b0dbdb6f510a264ef9de781501d7b6b92ae89eb059c5ab743db",
    "67586e98fad27da0b9968bc039a1ef34c939b9b8e523a8bef89d478608c5ecf6",
    "ca358758f6d27e6cf45272937977a748fd88391db679ceda7dc7bf1f005ee879",
  ];
  let bytes: [[u8; 1]; LANES] = core::array::from_fn(|k| [k as u8]);
  let digests = digests_of(bytes.each_ref().map(|b| &b[..]));
  for (lane, want) in expected.iter().enumerate() {
    assert_eq!(digests[lane], hex(want), "lane={lane}");
  }
}

#[test]
fn empty_message_in_every_lane() {
  let want = hex("e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855");
  for d in digests_of([b"".as_slice(); LANES]) {
    assert_eq!(d, want);
  }
}

#[test]
fn abc_next_to_empty() {
  let abc = hex("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad");
  let empty = hex("e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855");
  let msgs: [&[u8]; LANES] = core::array::from_fn(|k| if k % 2 == 0 { b"abc".as_slice() } else { b"".as_slice() });
  let digests = digests_of(msgs);
  for (lane, d) in digests.iter().enumerate() {
    assert_eq!(*d, if lane % 2 == 0 { abc } else { empty }, "lane={lane}");
  }
}

#[test]
fn two_block_message() {
  let msg = b"abcdbcdecdefdefgefghfghighijhijkijkljklmklmnlmnomnopnopq";
  let want = hex("248d6a61d20638b8e5c026930c3e6039a33ce45964ff2167f6ecedd419db06c1");
  for d in digests_of([msg.as_slice(); LANES]) {
    assert_eq!(d, want);
  }
}
