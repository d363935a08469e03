//! Differential fuzz target: streaming, one-shot, and the free-function
//! entry point must all agree with a bitwise reference.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use zcrc::{crc32, Checksum, Crc32};

#[derive(Arbitrary, Debug)]
struct Input {
  data: Vec<u8>,
  chunk_sizes: Vec<usize>,
}

fn crc32_reference(data: &[u8]) -> u32 {
  let mut crc = 0xffff_ffffu32;
  for &b in data {
    crc ^= b as u32;
    for _ in 0..8 {
      let mask = 0u32.wrapping_sub(crc & 1);
      crc = (crc >> 1) ^ (0xedb8_8320 & mask);
    }
  }
  crc ^ 0xffff_ffff
}

fuzz_target!(|input: Input| {
  let data = &input.data;
  let expected = crc32_reference(data);

  // One-shot
  assert_eq!(Crc32::checksum(data), expected, "oneshot mismatch");

  // Free function
  if !data.is_empty() {
    assert_eq!(crc32(0, Some(data)), expected, "entry point mismatch");
  } else {
    assert_eq!(crc32(0, Some(data)), 0, "empty input must reset");
  }

  // Streaming with arbitrary chunk boundaries
  let mut hasher = Crc32::new();
  let mut offset = 0;
  let mut idx = 0;
  while offset < data.len() {
    let size = match input.chunk_sizes.get(idx) {
      Some(&s) => s.max(1),
      None => data.len(),
    };
    let end = (offset + size).min(data.len());
    hasher.update(&data[offset..end]);
    offset = end;
    idx += 1;
  }
  assert_eq!(hasher.finalize(), expected, "streaming mismatch");
});
