//! x86_64 carry-less multiply folding kernel (PCLMULQDQ).
//!
//! # Safety
//!
//! Uses `unsafe` for x86 SIMD intrinsics. The dispatcher verifies PCLMULQDQ
//! support before selecting this kernel; the public wrapper additionally
//! checks the per-call preconditions and falls back to the scalar engine.
#![allow(unsafe_code)]
#![allow(unsafe_op_in_unsafe_fn)]
// SAFETY: Lane indexing is bounded by `as_chunks` group sizes (4 lanes of 8
// bytes per 32-byte block).
#![allow(clippy::indexing_slicing)]

use core::arch::x86_64::*;

use crate::{
  clmul::{FOLD_256, FOLD_288, PRE_FOLD},
  portable,
};

/// Fold one 8-byte lane forward across a 32-byte block.
///
/// `(clmul(lo32, FOLD_288) ^ clmul(hi32, FOLD_256)) << 1`; the shift
/// realigns the reflected product.
#[inline]
#[target_feature(enable = "pclmulqdq")]
unsafe fn fold_lane(q: u64, k: __m128i) -> u64 {
  let v = _mm_set_epi64x((q >> 32) as i64, (q & 0xFFFF_FFFF) as i64);
  let low_product = _mm_clmulepi64_si128(v, k, 0x00);
  let high_product = _mm_clmulepi64_si128(v, k, 0x11);
  ((_mm_cvtsi128_si64(low_product) ^ _mm_cvtsi128_si64(high_product)) as u64) << 1
}

#[inline]
fn read_lanes(block: &[u8; 32]) -> [u64; 4] {
  let (words, _) = block.as_chunks::<8>();
  [
    u64::from_le_bytes(words[0]),
    u64::from_le_bytes(words[1]),
    u64::from_le_bytes(words[2]),
    u64::from_le_bytes(words[3]),
  ]
}

/// 32-byte block folding.
///
/// Caller guarantees `data.len()` is a non-zero multiple of 32 and `state`
/// is 0 or `!0`. Accumulates a running 32-byte residue across blocks, then
/// finishes it byte-wise from a zero register.
#[target_feature(enable = "pclmulqdq")]
unsafe fn crc32_fold(state: u32, data: &[u8]) -> u32 {
  let k = _mm_set_epi64x(FOLD_256 as i64, FOLD_288 as i64);

  let (blocks, _) = data.as_chunks::<32>();
  let Some((first, rest)) = blocks.split_first() else {
    return state;
  };

  let mut lanes = read_lanes(first);
  if state == !0 {
    lanes[3] ^= PRE_FOLD;
  }

  for block in rest {
    let next = read_lanes(block);
    lanes = [
      next[0] ^ fold_lane(lanes[0], k),
      next[1] ^ fold_lane(lanes[1], k),
      next[2] ^ fold_lane(lanes[2], k),
      next[3] ^ fold_lane(lanes[3], k),
    ];
  }

  let mut residue = [0u8; 32];
  let (chunks, _) = residue.as_chunks_mut::<8>();
  for (chunk, lane) in chunks.iter_mut().zip(lanes) {
    *chunk = lane.to_le_bytes();
  }
  portable::crc32_bytes(0, &residue)
}

/// CRC-32 folding kernel with unconditional scalar fallback.
///
/// The folding path applies only to whole 32-byte buffers starting from an
/// identity state; everything else goes through the word-at-a-time engine.
#[inline]
pub(crate) fn crc32_clmul(state: u32, data: &[u8]) -> u32 {
  if data.is_empty() || data.len() % 32 != 0 || (state != 0 && state != !0) {
    return portable::crc32_words(state, data);
  }
  // SAFETY: the dispatcher verified PCLMULQDQ before selecting this kernel.
  unsafe { crc32_fold(state, data) }
}
