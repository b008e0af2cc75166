//! Memoization Primitives
//!
//! This module implements the cache that sits at every node of a selector
//! tree, and exposes it on its own for plain functions.
//!
//! # Concepts
//!
//! ## Equality comparators
//!
//! A comparator decides whether two arguments are "the same". The default
//! is identity ([`Identical`]): scalars by value, shared data by pointer.
//! Callers can swap in a structural or custom comparator when creating a
//! memoized function or a selector creator.
//!
//! ## Memo cells
//!
//! A [`MemoCell`] holds exactly one `(args, result)` pair. A call whose
//! arguments match the stored ones pairwise returns the stored result; any
//! other call recomputes. There is no history beyond the last call.
//!
//! # Implementation Notes
//!
//! The cell is locked only to read or to write, never while the wrapped
//! function runs. Nested selectors therefore never deadlock, but two threads
//! calling the same memoized function may interleave their writes.

mod equality;
mod cell;
mod memoized;

pub use equality::{identity_eq, structural_eq, EqualityFn, Identical};
pub use cell::{are_args_equal, MemoCell};
pub use memoized::{memoize, memoize_with, Memoized};
