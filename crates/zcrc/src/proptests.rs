//! Property tests for the CRC-32 implementation.
//!
//! Two fundamental invariants, verified against the bitwise reference
//! implementation (the mathematical definition of CRC):
//!
//! 1. **Combine correctness**: `crc(A || B) == combine(crc(A), crc(B), len(B))`
//! 2. **Chunking equivalence**: any chunking of input through the streaming
//!    API equals the one-shot result, regardless of update boundaries.

#![cfg(all(test, not(miri)))]

extern crate std;

use proptest::prelude::*;

use crate::{crc32, crc32_combine64, reference::crc32_bitwise, tables::CRC32_POLY, Checksum, ChecksumCombine, Crc32};

/// Apply an arbitrary chunk pattern to data and feed it to a hasher.
///
/// The chunk pattern is cycled until all data is consumed.
fn apply_chunking(data: &[u8], chunk_pattern: &[usize]) -> u32 {
  let mut hasher = Crc32::new();

  if chunk_pattern.is_empty() || data.is_empty() {
    hasher.update(data);
    return hasher.finalize();
  }

  let mut offset = 0;
  let mut pattern_idx = 0;

  while offset < data.len() {
    let chunk_size = chunk_pattern[pattern_idx].max(1);
    let end = (offset + chunk_size).min(data.len());
    hasher.update(&data[offset..end]);
    offset = end;
    pattern_idx = (pattern_idx + 1) % chunk_pattern.len();
  }

  hasher.finalize()
}

proptest! {
  #![proptest_config(ProptestConfig::with_cases(256))]

  #[test]
  fn combine_correctness(
    data in proptest::collection::vec(any::<u8>(), 0..=4096),
    split in any::<usize>()
  ) {
    let split = split % (data.len() + 1);
    let (a, b) = data.split_at(split);

    // Production: combine partial checksums
    let crc_a = Crc32::checksum(a);
    let crc_b = Crc32::checksum(b);
    let combined = Crc32::combine(crc_a, crc_b, b.len());

    // Reference: bitwise computation of the full data
    let expected = crc32_bitwise(CRC32_POLY, !0u32, &data) ^ !0u32;

    prop_assert_eq!(combined, expected,
      "combine(crc(A), crc(B), len(B)) != crc(A||B) at split {}/{}",
      split, data.len());
  }

  #[test]
  fn combine_entry_points_agree(
    data in proptest::collection::vec(any::<u8>(), 0..=1024),
    split in any::<usize>()
  ) {
    let split = split % (data.len() + 1);
    let (a, b) = data.split_at(split);

    let crc_a = Crc32::checksum(a);
    let crc_b = Crc32::checksum(b);

    let via_trait = Crc32::combine(crc_a, crc_b, b.len());
    let via_i64 = crc32_combine64(crc_a, crc_b, b.len() as i64);
    prop_assert_eq!(via_trait, via_i64);
  }

  #[test]
  fn chunking_equivalence(
    data in proptest::collection::vec(any::<u8>(), 0..=4096),
    chunk_pattern in proptest::collection::vec(1usize..=512, 1..=32)
  ) {
    let oneshot = Crc32::checksum(&data);
    let streamed = apply_chunking(&data, &chunk_pattern);
    prop_assert_eq!(streamed, oneshot,
      "chunking pattern {:?} produced different result", chunk_pattern);
  }

  #[test]
  fn resume_correctness(
    data in proptest::collection::vec(any::<u8>(), 0..=4096),
    split in any::<usize>()
  ) {
    let split = split % (data.len() + 1);
    let (a, b) = data.split_at(split);

    let crc_a = Crc32::checksum(a);
    let mut resumed = Crc32::resume(crc_a);
    resumed.update(b);

    prop_assert_eq!(resumed.finalize(), Crc32::checksum(&data),
      "resume(crc(A)).update(B) != crc(A||B)");
  }

  #[test]
  fn streaming_entry_point_composes(
    data in proptest::collection::vec(any::<u8>(), 1..=2048),
    split in any::<usize>()
  ) {
    let split = 1 + split % data.len();
    let (a, b) = data.split_at(split);

    let expected = crc32_bitwise(CRC32_POLY, !0u32, &data) ^ !0u32;
    let mut running = crc32(0, Some(a));
    if !b.is_empty() {
      running = crc32(running, Some(b));
    }
    prop_assert_eq!(running, expected);
  }
}
