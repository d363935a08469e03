//! Cross-kernel equivalence tests.
//!
//! Every enabled strategy must produce bit-identical output for the same
//! `(state, data)` pair; strategy choice is a performance decision only.
//! These tests sweep buffer lengths and starting alignments against each
//! other and against the bitwise reference.

extern crate std;

use std::vec::Vec;

use crate::{portable, reference::crc32_bitwise, tables::CRC32_POLY};

fn gen_bytes(len: usize, mut x: u64) -> Vec<u8> {
  let mut out = std::vec![0u8; len];
  for b in &mut out {
    x ^= x << 13;
    x ^= x >> 7;
    x ^= x << 17;
    *b = (x as u8).wrapping_add((x >> 8) as u8);
  }
  out
}

#[test]
fn bytes_equals_words_all_lengths_and_alignments() {
  // Backing buffer with room to shift the starting alignment.
  let backing = gen_bytes(1024 + 4, 0x0123_4567_89AB_CDEF);

  for align in 0..4usize {
    for len in 0..=1024usize {
      let data = &backing[align..align + len];
      let a = portable::crc32_bytes(!0, data);
      let b = portable::crc32_words(!0, data);
      assert_eq!(a, b, "len {len} align {align}");
    }
  }
}

#[test]
fn words_equals_reference_with_arbitrary_state() {
  let backing = gen_bytes(256, 0xD1B5_4A32_D192_ED03);

  for state in [0u32, !0, 0x1234_5678, 0x8000_0001] {
    for len in [0usize, 1, 3, 4, 5, 31, 32, 33, 255, 256] {
      let data = &backing[..len];
      assert_eq!(
        portable::crc32_words(state, data),
        crc32_bitwise(CRC32_POLY, state, data),
        "state {state:#x} len {len}"
      );
    }
  }
}

#[cfg(any(target_arch = "x86_64", all(target_arch = "aarch64", target_endian = "little")))]
mod folding {
  use super::gen_bytes;
  use crate::{dispatch, portable};

  #[cfg(target_arch = "x86_64")]
  use crate::x86_64::crc32_clmul;

  #[cfg(all(target_arch = "aarch64", target_endian = "little"))]
  use crate::aarch64::crc32_clmul;

  #[test]
  fn folding_matches_scalar_on_identity_states() {
    if !dispatch::has_clmul() {
      return;
    }

    for state in [0u32, !0] {
      for len in [32usize, 64, 96, 128, 320, 1024] {
        let data = gen_bytes(len, 0x5D58_39A7_3D87_1CEB ^ len as u64);
        assert_eq!(
          crc32_clmul(state, &data),
          portable::crc32_words(state, &data),
          "state {state:#x} len {len}"
        );
      }
    }
  }

  #[test]
  fn folding_defers_to_scalar_otherwise() {
    if !dispatch::has_clmul() {
      return;
    }

    // Misaligned lengths and non-identity states must take the scalar path
    // and therefore agree trivially.
    for state in [0u32, !0, 0xCAFE_F00D] {
      for len in [0usize, 1, 31, 33, 63, 65, 100, 1023] {
        let data = gen_bytes(len, 0x9E37_79B9_7F4A_7C15 ^ len as u64);
        assert_eq!(
          crc32_clmul(state, &data),
          portable::crc32_words(state, &data),
          "state {state:#x} len {len}"
        );
      }
    }
  }
}
