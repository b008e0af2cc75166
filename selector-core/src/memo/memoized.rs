//! Memoized Functions
//!
//! A [`Memoized`] wraps a function of an argument list and caches the most
//! recent call.
//!
//! # How It Works
//!
//! 1. The incoming arguments are compared with the stored ones using the
//!    comparator, position by position.
//!
//! 2. If every position matches, the stored result is returned and the
//!    function is not called.
//!
//! 3. Otherwise the function runs and its result replaces the cache.
//!
//! The first call always runs the function. Any call pattern other than an
//! immediate repeat recomputes: the cache holds one entry.

use std::fmt::Debug;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use super::cell::MemoCell;
use super::equality::{identity_eq, EqualityFn, Identical};

/// A function of `&[T]` with a one-entry cache in front of it.
///
/// Cloning a `Memoized` shares the cache.
pub struct Memoized<T, R> {
    func: Arc<dyn Fn(&[T]) -> R + Send + Sync>,
    equal: EqualityFn<T>,
    cell: Arc<Mutex<MemoCell<T, R>>>,
    misses: Arc<AtomicU64>,
}

/// Memoize `func` with the default identity comparator.
pub fn memoize<T, R, F>(func: F) -> Memoized<T, R>
where
    T: Identical + Clone + 'static,
    R: Clone,
    F: Fn(&[T]) -> R + Send + Sync + 'static,
{
    Memoized::with_equality(func, identity_eq::<T>())
}

/// Memoize `func`, comparing arguments with `equal`.
pub fn memoize_with<T, R, F>(func: F, equal: EqualityFn<T>) -> Memoized<T, R>
where
    T: Clone,
    R: Clone,
    F: Fn(&[T]) -> R + Send + Sync + 'static,
{
    Memoized::with_equality(func, equal)
}

impl<T: Clone, R: Clone> Memoized<T, R> {
    pub fn with_equality<F>(func: F, equal: EqualityFn<T>) -> Self
    where
        F: Fn(&[T]) -> R + Send + Sync + 'static,
    {
        Self {
            func: Arc::new(func),
            equal,
            cell: Arc::new(Mutex::new(MemoCell::new())),
            misses: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Call the function, or return the cached result for equal arguments.
    pub fn call(&self, args: &[T]) -> R {
        // The lock is released before `func` runs.
        let cached = self.cell.lock().lookup(|a, b| (self.equal)(a, b), args);
        if let Some(result) = cached {
            tracing::trace!(arity = args.len(), "memoized call hit");
            return result;
        }

        tracing::trace!(arity = args.len(), "memoized call miss");
        self.misses.fetch_add(1, Ordering::Relaxed);
        let result = (self.func)(args);
        self.cell.lock().store(args, result.clone());
        result
    }

    /// Number of calls that ran the wrapped function.
    pub fn miss_count(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn has_value(&self) -> bool {
        self.cell.lock().has_value()
    }

    /// Drop the cached pair. The next call recomputes.
    pub fn clear(&self) {
        self.cell.lock().clear();
    }
}

impl<T, R> Clone for Memoized<T, R> {
    fn clone(&self) -> Self {
        Self {
            func: Arc::clone(&self.func),
            equal: Arc::clone(&self.equal),
            cell: Arc::clone(&self.cell),
            misses: Arc::clone(&self.misses),
        }
    }
}

impl<T, R> Debug for Memoized<T, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Memoized")
            .field("has_value", &self.cell.lock().has_value())
            .field("miss_count", &self.misses.load(Ordering::Relaxed))
            .finish()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
