//! Selector Composition
//!
//! This module turns a nested description of selector functions into one
//! memoized function.
//!
//! # Concepts
//!
//! ## Selectors
//!
//! A [`Selector`] derives a value from its arguments. At the first level of
//! a spec the arguments are the external state; further down they are the
//! results of the previous level.
//!
//! ## Specs
//!
//! A [`SpecNode`] is a bare selector, an ordered group (dependencies first,
//! combiner last) or a keyed mapping. Groups nest: a group inside a level is
//! a sub-selector with its own caches.
//!
//! ## Composed selectors
//!
//! A [`ComposedSelector`] is the built tree. Every level remembers its last
//! arguments and result and is skipped, together with everything after it,
//! when called again with equal arguments. Per-level recomputation counts
//! are available for inspection.
//!
//! # Pipeline
//!
//! spec -> [`normalize`] -> levels -> [`SelectorCreator`] (memoizing each
//! level through a [`MemoizeStrategy`] and wiring dependencies with
//! [`compose_dependencies`]) -> [`ComposedSelector`].

mod function;
mod spec;
mod normalize;
mod compose;
mod tracker;
mod builder;
mod batch;

pub use function::{NodeFn, Selector};
pub use spec::{SelectorRegistry, SpecNode};
pub use normalize::{normalize, Dependency, Level, Normalized};
pub use compose::{compose_dependencies, Args};
pub use tracker::RecomputationTracker;
pub use builder::{ComposedSelector, DefaultMemoize, MemoizeStrategy, PassThrough, SelectorCreator};
pub use batch::{SelectorSet, SelectorsCreator};
