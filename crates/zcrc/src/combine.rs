//! GF(2) matrix operations for CRC-32 combination.
//!
//! Given `crc(A)` and `crc(B)`, computes `crc(A || B)` without reprocessing
//! `A`:
//!
//! ```text
//! crc(A || B) = crc(A) * x^(8*len(B)) mod G(x) XOR crc(B)
//! ```
//!
//! The multiplication by `x^(8*len(B))` is a linear operator over GF(2),
//! represented as a 32x32 bit matrix and raised to the required power by
//! square-and-multiply. The loop runs once per bit of the length register,
//! independent of the magnitude of `len_b`.

// SAFETY: All array indexing in this module uses bounded loop indices
// (0..32). Clippy cannot prove this in const fn contexts, but the bounds are
// statically guaranteed by the loop conditions.
#![allow(clippy::indexing_slicing)]

use crate::tables::CRC32_POLY;

// ─────────────────────────────────────────────────────────────────────────────
// GF(2) Matrix Type
// ─────────────────────────────────────────────────────────────────────────────

/// A 32x32 GF(2) matrix represented as 32 u32 rows.
///
/// Row `i` holds the image of basis vector `i`; bit `j` of a row is column
/// `j`. Addition is XOR, multiplication is AND, so matrix-vector products
/// carry nothing.
#[derive(Clone, Copy)]
pub(crate) struct Gf2Matrix32([u32; 32]);

impl Gf2Matrix32 {
  /// The "append one zero bit" operator.
  ///
  /// Shifting the reflected register by one zero bit is
  /// `(crc >> 1) ^ (poly if crc & 1 else 0)`: bit 0 maps to the polynomial,
  /// bit n maps to bit n-1.
  #[must_use]
  pub(crate) const fn shift1() -> Self {
    let mut m = [0u32; 32];
    m[0] = CRC32_POLY;
    let mut n = 1;
    while n < 32 {
      m[n] = 1 << (n - 1);
      n += 1;
    }
    Self(m)
  }

  /// Multiply matrix by a vector (u32 treated as a column vector).
  #[inline]
  #[must_use]
  pub(crate) const fn mul_vec(self, vec: u32) -> u32 {
    let mut result = 0u32;
    let mut i = 0;
    while i < 32 {
      if vec & (1 << i) != 0 {
        result ^= self.0[i];
      }
      i += 1;
    }
    result
  }

  /// Square the matrix (self * self).
  #[inline]
  #[must_use]
  pub(crate) const fn square(self) -> Self {
    let mut result = [0u32; 32];
    let mut i = 0;
    while i < 32 {
      result[i] = self.mul_vec(self.0[i]);
      i += 1;
    }
    Self(result)
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Combine
// ─────────────────────────────────────────────────────────────────────────────

/// Apply the `len_b`-zero-byte operator to `crc_a`, then fold in `crc_b`.
///
/// Precondition: `len_b > 0` (callers handle the degenerate case).
///
/// The operator for the full run of zero bytes is never materialized:
/// starting from the four-zero-bit operator, each squaring doubles the run
/// length the current matrix appends (the first squaring below yields the
/// one-zero-byte operator), and the matrix is applied to the running value
/// whenever the corresponding bit of `len_b` is set. The two half-steps
/// alternate between the `odd` and `even` buffers to avoid copies.
#[must_use]
const fn combine_impl(mut crc_a: u32, crc_b: u32, mut len_b: u64) -> u32 {
  let mut odd = Gf2Matrix32::shift1(); // one zero bit
  let mut even = odd.square(); // two zero bits
  odd = even.square(); // four zero bits

  loop {
    even = odd.square();
    if len_b & 1 != 0 {
      crc_a = even.mul_vec(crc_a);
    }
    len_b >>= 1;
    if len_b == 0 {
      break;
    }

    odd = even.square();
    if len_b & 1 != 0 {
      crc_a = odd.mul_vec(crc_a);
    }
    len_b >>= 1;
    if len_b == 0 {
      break;
    }
  }

  crc_a ^ crc_b
}

/// Combine two CRC-32 values.
///
/// Given `crc_a = crc32(A)` and `crc_b = crc32(B)`, computes `crc32(A || B)`
/// from the two checksums and `len_b = |B|` alone, in time independent of
/// `|B|`.
///
/// A non-positive `len_b` returns `crc_a` unchanged.
#[inline]
#[must_use]
pub const fn crc32_combine(crc_a: u32, crc_b: u32, len_b: i32) -> u32 {
  crc32_combine64(crc_a, crc_b, len_b as i64)
}

/// Combine two CRC-32 values with a 64-bit length.
///
/// Identical to [`crc32_combine`] apart from the width of `len_b`; both
/// entry points funnel into the same core loop.
#[must_use]
pub const fn crc32_combine64(crc_a: u32, crc_b: u32, len_b: i64) -> u32 {
  // Degenerate case (also disallows negative lengths).
  if len_b <= 0 {
    return crc_a;
  }
  combine_impl(crc_a, crc_b, len_b as u64)
}

/// Combine with an unsigned length, for the `ChecksumCombine` trait.
#[inline]
#[must_use]
pub(crate) const fn combine_len(crc_a: u32, crc_b: u32, len_b: usize) -> u32 {
  if len_b == 0 {
    return crc_a;
  }
  combine_impl(crc_a, crc_b, len_b as u64)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
