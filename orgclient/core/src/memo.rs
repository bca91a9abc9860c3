//! Per-Instance Memoization
//!
//! A memoized value is a field on the type that owns it. The first access
//! runs the computation; every later access on the same owner returns the
//! stored value without running it again. Two owners never share a slot,
//! and a slot is never invalidated.
//!
//! A computation that fails leaves the slot empty, so the next access runs
//! it again.
//!
//! # Usage
//!
//! ```ignore
//! struct Report {
//!     total: Memoized<u64>,
//! }
//!
//! impl Report {
//!     fn total(&self) -> u64 {
//!         *self.total.get_or_init(|| expensive_sum())
//!     }
//! }
//! ```

use std::fmt;
use std::future::Future;

use tokio::sync::OnceCell;

/// Lazily computed value owned by a single instance
///
/// Threads racing on an empty slot block until the first computation
/// finishes, so it runs exactly once.
pub struct Memoized<T> {
    slot: once_cell::sync::OnceCell<T>,
}

impl<T> Memoized<T> {
    /// Create an empty slot
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slot: once_cell::sync::OnceCell::new(),
        }
    }

    /// The cached value, if it has been computed
    #[must_use]
    pub fn get(&self) -> Option<&T> {
        self.slot.get()
    }

    /// Whether the computation has completed
    #[must_use]
    pub fn is_cached(&self) -> bool {
        self.slot.get().is_some()
    }

    /// Return the cached value, computing it with `compute` on first access
    pub fn get_or_init<F>(&self, compute: F) -> &T
    where
        F: FnOnce() -> T,
    {
        self.slot.get_or_init(compute)
    }

    /// Return the cached value, computing it with `compute` on first access
    ///
    /// # Errors
    ///
    /// Returns the error from `compute` unchanged. Nothing is cached in that
    /// case and a waiting thread computes again.
    pub fn get_or_try_init<F, E>(&self, compute: F) -> Result<&T, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        self.slot.get_or_try_init(compute)
    }

    /// Consume the slot, returning the cached value if any
    pub fn into_inner(self) -> Option<T> {
        self.slot.into_inner()
    }
}

impl<T> Default for Memoized<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Memoized<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Memoized").field(&self.slot.get()).finish()
    }
}

/// Lazily computed value whose computation is asynchronous
///
/// Concurrent first accesses on the same instance wait for a single
/// computation.
pub struct AsyncMemoized<T> {
    slot: OnceCell<T>,
}

impl<T> AsyncMemoized<T> {
    /// Create an empty slot
    #[must_use]
    pub fn new() -> Self {
        Self {
            slot: OnceCell::new(),
        }
    }

    /// The cached value, if it has been computed
    #[must_use]
    pub fn get(&self) -> Option<&T> {
        self.slot.get()
    }

    /// Whether the computation has completed
    #[must_use]
    pub fn is_cached(&self) -> bool {
        self.slot.initialized()
    }

    /// Return the cached value, awaiting `compute` on first access
    pub async fn get_or_init<F, Fut>(&self, compute: F) -> &T
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        self.slot.get_or_init(compute).await
    }

    /// Return the cached value, awaiting `compute` on first access
    ///
    /// # Errors
    ///
    /// Returns the error from `compute` unchanged. The slot stays empty and
    /// the next call computes again.
    pub async fn get_or_try_init<F, Fut, E>(&self, compute: F) -> Result<&T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        self.slot.get_or_try_init(compute).await
    }

    /// Consume the slot, returning the cached value if any
    pub fn into_inner(self) -> Option<T> {
        self.slot.into_inner()
    }
}

impl<T> Default for AsyncMemoized<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for AsyncMemoized<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AsyncMemoized").field(&self.slot.get()).finish()
    }
}
