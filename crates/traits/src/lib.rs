//! Core checksum traits for zcrc.
//!
//! This crate provides the foundational traits the zcrc implementations
//! conform to. It is `no_std` compatible and has zero dependencies.
//!
//! # Trait Hierarchy
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | [`Checksum`] | Streaming and one-shot checksum computation |
//! | [`ChecksumCombine`] | Parallel checksum combination in O(log n) |
//!
//! # Fallibility Discipline
//!
//! This crate denies `unwrap`, `expect`, and indexing in non-test code to ensure
//! all error paths are handled explicitly.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

mod checksum;

pub use checksum::{Checksum, ChecksumCombine};
