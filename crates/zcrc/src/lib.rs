//! CRC-32 (IEEE 802.3 / ISO-HDLC) with hardware folding and O(log n) combine.
//!
//! This crate computes the standard reflected CRC-32 (polynomial
//! `0xEDB88320`, as used by Ethernet, gzip, zip and PNG) over a byte stream,
//! and algebraically combines two independently computed checksums into the
//! checksum of their concatenation without rereading the data.
//!
//! # Strategies
//!
//! The streaming engine selects one kernel per process:
//!
//! | Backend | Requirement | Notes |
//! |---------|-------------|-------|
//! | `x86_64/clmul-fold` | PCLMULQDQ | 32-byte block folding, scalar fallback per call |
//! | `aarch64/pmull-fold` | PMULL | 32-byte block folding, scalar fallback per call |
//! | `portable/words` | none | 4 bytes per chained table lookup |
//!
//! All strategies are bit-identical for every input; selection is a
//! performance choice only.
//!
//! # Example
//!
//! ```rust
//! use zcrc::{Checksum, ChecksumCombine, Crc32};
//!
//! // One-shot computation
//! let data = b"123456789";
//! let crc = Crc32::checksum(data);
//! assert_eq!(crc, 0xCBF4_3926);
//!
//! // Streaming computation
//! let mut hasher = Crc32::new();
//! hasher.update(b"1234");
//! hasher.update(b"56789");
//! assert_eq!(hasher.finalize(), crc);
//!
//! // Parallel combine
//! let (a, b) = data.split_at(4);
//! let combined = Crc32::combine(Crc32::checksum(a), Crc32::checksum(b), b.len());
//! assert_eq!(combined, crc);
//! ```
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible. Disable the `std` feature for embedded
//! use; hardware kernels are then only selected when the matching target
//! feature is enabled at compile time.

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

mod combine;
mod dispatch;
mod portable;
mod reference;
mod tables;

#[cfg(any(target_arch = "x86_64", all(target_arch = "aarch64", target_endian = "little")))]
mod clmul;

#[cfg(target_arch = "x86_64")]
mod x86_64;

#[cfg(all(target_arch = "aarch64", target_endian = "little"))]
mod aarch64;

#[cfg(test)]
mod kernel_tests;
#[cfg(all(test, not(miri)))]
mod proptests;

pub use combine::{crc32_combine, crc32_combine64};
pub use tables::{CRC32_POLY, Crc32Tables};
// Re-export traits for convenience
pub use traits::{Checksum, ChecksumCombine};

use dispatch::{KernelDispatcher, Selected};

// ─────────────────────────────────────────────────────────────────────────────
// Kernel Selection
// ─────────────────────────────────────────────────────────────────────────────

/// Canonical name of the scalar word-at-a-time kernel.
const PORTABLE_KERNEL_NAME: &str = "portable/words";

/// Select the best kernel for the current machine.
#[cfg(target_arch = "x86_64")]
fn select_kernel() -> Selected {
  if dispatch::has_clmul() {
    return Selected::new("x86_64/clmul-fold", x86_64::crc32_clmul);
  }
  Selected::new(PORTABLE_KERNEL_NAME, portable::crc32_words)
}

#[cfg(all(target_arch = "aarch64", target_endian = "little"))]
fn select_kernel() -> Selected {
  if dispatch::has_clmul() {
    return Selected::new("aarch64/pmull-fold", aarch64::crc32_clmul);
  }
  Selected::new(PORTABLE_KERNEL_NAME, portable::crc32_words)
}

#[cfg(not(any(target_arch = "x86_64", all(target_arch = "aarch64", target_endian = "little"))))]
fn select_kernel() -> Selected {
  Selected::new(PORTABLE_KERNEL_NAME, portable::crc32_words)
}

/// Process-wide kernel, chosen once.
static DISPATCHER: KernelDispatcher = KernelDispatcher::new(select_kernel);

// ─────────────────────────────────────────────────────────────────────────────
// Streaming Entry Point
// ─────────────────────────────────────────────────────────────────────────────

/// Update a CRC-32 checksum with more data.
///
/// `crc` is the checksum of everything seen so far (0 to start), and the
/// return value is the checksum extended by `data`, so calls compose:
/// `crc32(crc32(0, Some(a)), Some(b)) == crc32(0, Some(a ++ b))`.
///
/// An absent buffer — `None` or an empty slice — returns 0: a reset, not a
/// pass-through of `crc`. This mirrors the classic `crc32(crc, NULL, len)`
/// contract and is deliberate, observable behavior.
///
/// ```rust
/// assert_eq!(zcrc::crc32(0, Some(b"123456789")), 0xCBF4_3926);
/// assert_eq!(zcrc::crc32(0xDEAD_BEEF, None), 0);
/// ```
#[must_use]
pub fn crc32(crc: u32, data: Option<&[u8]>) -> u32 {
  match data {
    Some(buf) if !buf.is_empty() => DISPATCHER.call(crc ^ !0, buf) ^ !0,
    _ => 0,
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Hasher
// ─────────────────────────────────────────────────────────────────────────────

/// CRC-32 checksum (IEEE 802.3 / ISO-HDLC).
///
/// # Properties
///
/// - **Polynomial**: 0x04C11DB7 (normal), 0xEDB88320 (reflected)
/// - **Initial value**: 0xFFFFFFFF
/// - **Final XOR**: 0xFFFFFFFF
/// - **Reflect input/output**: Yes
/// - **Check value**: `crc32(b"123456789") == 0xCBF43926`
#[derive(Clone)]
pub struct Crc32 {
  state: u32,
}

impl Default for Crc32 {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

impl Crc32 {
  /// Create a hasher to resume from a previous CRC value.
  #[inline]
  #[must_use]
  pub const fn resume(crc: u32) -> Self {
    Self { state: crc ^ !0 }
  }

  /// Get the name of the currently selected backend.
  ///
  /// Returns the implementation name (e.g. "portable/words",
  /// "x86_64/clmul-fold").
  #[must_use]
  pub fn backend_name() -> &'static str {
    DISPATCHER.backend_name()
  }
}

impl Checksum for Crc32 {
  const OUTPUT_SIZE: usize = 4;
  type Output = u32;

  #[inline]
  fn new() -> Self {
    Self { state: !0 }
  }

  #[inline]
  fn with_initial(initial: u32) -> Self {
    Self { state: initial ^ !0 }
  }

  #[inline]
  fn update(&mut self, data: &[u8]) {
    self.state = DISPATCHER.call(self.state, data);
  }

  #[inline]
  fn finalize(&self) -> u32 {
    self.state ^ !0
  }

  #[inline]
  fn reset(&mut self) {
    self.state = !0;
  }
}

impl ChecksumCombine for Crc32 {
  fn combine(crc_a: u32, crc_b: u32, len_b: usize) -> u32 {
    combine::combine_len(crc_a, crc_b, len_b)
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
