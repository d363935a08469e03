//! Kernel dispatch: one-time strategy selection and caching.
//!
//! The dispatcher runs a selector on first use, caches the chosen kernel,
//! and serves it on every later call. Under `std` this is a `OnceLock`;
//! without `std` the kernel pointer is published through atomics. In both
//! cases selection executes its body at most once per process, no caller
//! observes a partially initialized entry, and no caller races on the guard
//! itself.

/// Signature shared by every CRC-32 kernel: pre-complemented state in,
/// pre-complemented state out.
pub(crate) type KernelFn = fn(u32, &[u8]) -> u32;

/// The result of kernel selection.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Selected {
  /// Human-readable name for diagnostics (e.g. "x86_64/clmul-fold").
  pub name: &'static str,
  /// The selected kernel function.
  pub func: KernelFn,
}

impl Selected {
  /// Create a new selected result.
  #[inline]
  #[must_use]
  pub(crate) const fn new(name: &'static str, func: KernelFn) -> Self {
    Self { name, func }
  }
}

/// Caches the selected kernel on first access.
pub(crate) struct KernelDispatcher {
  #[cfg(feature = "std")]
  inner: std::sync::OnceLock<Selected>,

  #[cfg(not(feature = "std"))]
  func: core::sync::atomic::AtomicPtr<()>,
  #[cfg(not(feature = "std"))]
  name_ptr: core::sync::atomic::AtomicPtr<u8>,
  #[cfg(not(feature = "std"))]
  name_len: core::sync::atomic::AtomicUsize,

  /// The selector function that chooses the best kernel.
  selector: fn() -> Selected,
}

impl KernelDispatcher {
  /// Create a new dispatcher with the given selector function.
  ///
  /// The selector is called once on first access to choose the best kernel.
  #[must_use]
  pub(crate) const fn new(selector: fn() -> Selected) -> Self {
    Self {
      #[cfg(feature = "std")]
      inner: std::sync::OnceLock::new(),

      #[cfg(not(feature = "std"))]
      func: core::sync::atomic::AtomicPtr::new(core::ptr::null_mut()),
      #[cfg(not(feature = "std"))]
      name_ptr: core::sync::atomic::AtomicPtr::new(core::ptr::null_mut()),
      #[cfg(not(feature = "std"))]
      name_len: core::sync::atomic::AtomicUsize::new(0),

      selector,
    }
  }

  /// Get the selected kernel, initializing on first call.
  #[inline]
  #[must_use]
  pub(crate) fn get(&self) -> Selected {
    #[cfg(feature = "std")]
    {
      *self.inner.get_or_init(|| (self.selector)())
    }

    #[cfg(not(feature = "std"))]
    {
      use core::sync::atomic::Ordering;

      let func_ptr = self.func.load(Ordering::Acquire);
      if func_ptr.is_null() {
        // First access: run the selector and publish the result. Selection
        // is pure, so concurrent first callers may both run it and publish
        // the same outcome.
        let selected = (self.selector)();

        let new_func_ptr = selected.func as *mut ();
        self.func.store(new_func_ptr, Ordering::Release);

        // Store name pointer and length separately (Rust strings are NOT
        // null-terminated).
        let name_ptr = selected.name.as_ptr() as *mut u8;
        self.name_ptr.store(name_ptr, Ordering::Release);
        self.name_len.store(selected.name.len(), Ordering::Release);

        selected
      } else {
        // Already initialized: reconstruct Selected from cached values.
        // SAFETY: func_ptr was stored from a valid KernelFn.
        #[allow(unsafe_code)]
        let func: KernelFn = unsafe { core::mem::transmute(func_ptr) };

        let name_ptr = self.name_ptr.load(Ordering::Acquire);
        let name_len = self.name_len.load(Ordering::Acquire);

        let name = if name_ptr.is_null() || name_len == 0 {
          "unknown"
        } else {
          // SAFETY: name_ptr and name_len were stored from a valid &'static str.
          #[allow(unsafe_code)]
          unsafe {
            core::str::from_utf8_unchecked(core::slice::from_raw_parts(name_ptr, name_len))
          }
        };
        Selected { name, func }
      }
    }
  }

  /// Get the name of the selected backend.
  #[inline]
  #[must_use]
  pub(crate) fn backend_name(&self) -> &'static str {
    self.get().name
  }

  /// Call the selected kernel.
  #[inline]
  #[must_use]
  pub(crate) fn call(&self, crc: u32, data: &[u8]) -> u32 {
    (self.get().func)(crc, data)
  }
}

// SAFETY: KernelDispatcher uses OnceLock (std) or atomic operations (no_std),
// both of which are thread-safe. The stored function pointers are read-only
// after initialization.
#[allow(unsafe_code)]
unsafe impl Sync for KernelDispatcher {}
#[allow(unsafe_code)]
unsafe impl Send for KernelDispatcher {}

// ─────────────────────────────────────────────────────────────────────────────
// Capability Probes
// ─────────────────────────────────────────────────────────────────────────────

/// Runtime probe for the carry-less multiply extension.
///
/// Without `std` there is no runtime CPUID path; the compile-time target
/// feature decides. Either way an unavailable extension fails closed to the
/// scalar engine.
#[cfg(target_arch = "x86_64")]
#[must_use]
pub(crate) fn has_clmul() -> bool {
  #[cfg(feature = "std")]
  {
    std::arch::is_x86_feature_detected!("pclmulqdq")
  }
  #[cfg(not(feature = "std"))]
  {
    cfg!(target_feature = "pclmulqdq")
  }
}

/// Runtime probe for the PMULL (crypto) extension.
#[cfg(all(target_arch = "aarch64", target_endian = "little"))]
#[must_use]
pub(crate) fn has_clmul() -> bool {
  #[cfg(feature = "std")]
  {
    std::arch::is_aarch64_feature_detected!("aes")
  }
  #[cfg(not(feature = "std"))]
  {
    cfg!(target_feature = "aes")
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
