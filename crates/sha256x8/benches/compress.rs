use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use sha2::digest::{consts::U64, generic_array::GenericArray};
use sha256x8::{BIG_ENDIAN_MASK, BLOCK_LEN, H0, LANES, State, U32x8};

fn streams(nblocks: usize) -> [Vec<u8>; LANES] {
  core::array::from_fn(|lane| {
    (0..nblocks * BLOCK_LEN)
      .map(|i| (i as u8).wrapping_mul(31).wrapping_add(lane as u8))
      .collect()
  })
}

fn compress(c: &mut Criterion) {
  let mut group = c.benchmark_group("sha256x8/compress");

  for nblocks in [1usize, 16, 256] {
    let data = streams(nblocks);
    let refs: [&[u8]; LANES] = data.each_ref().map(Vec::as_slice);
    let blocks: [Vec<GenericArray<u8, U64>>; LANES] = data.each_ref().map(|s| {
      s.chunks_exact(BLOCK_LEN)
        .map(GenericArray::clone_from_slice)
        .collect()
    });
    group.throughput(Throughput::Bytes((LANES * nblocks * BLOCK_LEN) as u64));

    group.bench_with_input(BenchmarkId::new("x8", nblocks), &refs, |b, r| {
      b.iter(|| {
        let mut state = State::new();
        sha256x8::compress(&mut state, *black_box(r), nblocks).unwrap();
        black_box(state)
      })
    });

    group.bench_with_input(BenchmarkId::new("sha2-compress256-x8", nblocks), &blocks, |b, bl| {
      b.iter(|| {
        let mut cvs = [H0; LANES];
        for (cv, lane) in cvs.iter_mut().zip(black_box(bl)) {
          sha2::compress256(cv, lane);
        }
        black_box(cvs)
      })
    });
  }

  group.finish();
}

fn primitives(c: &mut Criterion) {
  let mut group = c.benchmark_group("sha256x8/primitives");

  let words: Vec<u32> = (0..4096u32).map(|i| i.wrapping_mul(0x9e37_79b9)).collect();
  group.throughput(Throughput::Bytes((words.len() * 4) as u64));
  group.bench_function("normalize/16KiB", |b| {
    let mut buf = words.clone();
    b.iter(|| sha256x8::normalize(black_box(&mut buf), BIG_ENDIAN_MASK).unwrap())
  });

  let mut m: [U32x8; LANES] = core::array::from_fn(|r| U32x8(core::array::from_fn(|c| (r * 8 + c) as u32)));
  group.throughput(Throughput::Bytes(256));
  group.bench_function("transpose/8x8", |b| b.iter(|| sha256x8::transpose(black_box(&mut m))));

  group.finish();
}

criterion_group!(benches, compress, primitives);
criterion_main!(benches);
