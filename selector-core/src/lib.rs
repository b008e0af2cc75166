//! Selector Core
//!
//! This crate composes memoized selectors: derived values computed from a
//! larger state that are recomputed only when the inputs they depend on
//! actually change.
//!
//! It implements:
//!
//! - A one-entry memoizer with pluggable equality (`memo`)
//! - Selector specs, their normalization and composition (`selector`)
//! - Per-level recomputation tracking
//! - Batch creation of named selectors
//!
//! # Architecture
//!
//! - `value`: the dynamic [`Value`] passed between selectors
//! - `memo`: memo cells, comparators and standalone memoized functions
//! - `selector`: specs, normalization, the builder and composed selectors
//! - `config`: [`MemoizeOptions`], loadable from JSON
//! - `error`: [`SelectorError`]
//!
//! # Example
//!
//! ```rust
//! use selector_core::{create_selector, SpecNode, Value};
//!
//! let total = create_selector(&SpecNode::group([
//!     SpecNode::group([
//!         SpecNode::leaf(|args| args[0].get("a").clone()),
//!         SpecNode::leaf(|args| args[0].get("b").clone()),
//!     ]),
//!     SpecNode::leaf(|args| {
//!         Value::from(args[0].as_i64().unwrap_or(0) + args[1].as_i64().unwrap_or(0))
//!     }),
//! ]))?;
//!
//! let state = Value::from_json(r#"{"a": 1, "b": 3}"#)?;
//! assert_eq!(total.select(&state)?, Value::from(4));
//! assert_eq!(total.recomputations(), vec![1, 1]);
//! # Ok::<(), selector_core::SelectorError>(())
//! ```

pub mod config;
pub mod error;
pub mod memo;
pub mod selector;
pub mod value;

pub use config::{Equality, MemoizeOptions};
pub use error::{Result, SelectorError};
pub use memo::{memoize, memoize_with, Memoized};
pub use selector::{
    ComposedSelector, DefaultMemoize, MemoizeStrategy, PassThrough, Selector, SelectorCreator,
    SelectorRegistry, SelectorSet, SelectorsCreator, SpecNode,
};
pub use value::Value;

/// Build a selector with the default memoizer and identity equality.
pub fn create_selector(spec: &SpecNode) -> Result<ComposedSelector> {
    SelectorCreator::default().create(spec)
}

/// Build one selector, or one per key of a keyed spec, with the defaults.
pub fn create_selectors(specs: &SpecNode) -> Result<SelectorSet> {
    SelectorsCreator::default().create(specs)
}
