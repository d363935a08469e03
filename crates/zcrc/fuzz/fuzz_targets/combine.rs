//! Fuzz target for CRC-32 combine: chained combination over arbitrary
//! splits must reproduce the whole-buffer checksum.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use zcrc::{crc32_combine, crc32_combine64, Checksum, ChecksumCombine, Crc32};

#[derive(Arbitrary, Debug)]
struct Input {
  data: Vec<u8>,
  splits: Vec<usize>,
}

fuzz_target!(|input: Input| {
  let data = &input.data;
  if data.is_empty() {
    return;
  }

  // Normalize splits to valid range and sort
  let max_split = data.len() + 1;
  let mut splits: Vec<usize> = input.splits.iter().map(|s| *s % max_split).collect();
  splits.sort_unstable();
  splits.dedup();

  let expected = Crc32::checksum(data);

  let mut chunks = Vec::new();
  let mut prev = 0;
  for &split in &splits {
    if split > prev && split <= data.len() {
      chunks.push(&data[prev..split]);
      prev = split;
    }
  }
  if prev < data.len() {
    chunks.push(&data[prev..]);
  }

  if chunks.is_empty() {
    return;
  }

  let mut combined = Crc32::checksum(chunks[0]);
  for chunk in &chunks[1..] {
    let chunk_crc = Crc32::checksum(chunk);
    combined = Crc32::combine(combined, chunk_crc, chunk.len());
  }
  assert_eq!(combined, expected, "combine chain mismatch");

  // Signed entry points: identity on non-positive lengths, agreement on
  // positive ones.
  let (a, b) = data.split_at(splits.first().copied().unwrap_or(0).min(data.len()));
  let crc_a = Crc32::checksum(a);
  let crc_b = Crc32::checksum(b);
  assert_eq!(crc32_combine(crc_a, crc_b, -1), crc_a);
  assert_eq!(crc32_combine64(crc_a, crc_b, 0), crc_a);
  if let Ok(len32) = i32::try_from(b.len()) {
    assert_eq!(
      crc32_combine(crc_a, crc_b, len32),
      crc32_combine64(crc_a, crc_b, b.len() as i64)
    );
  }
});
