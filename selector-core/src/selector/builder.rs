//! Selector Builder
//!
//! Turns a [`SpecNode`] into a [`ComposedSelector`].
//!
//! # Algorithm
//!
//! 1. Normalize the spec into a chain of levels. A bare selector becomes
//!    `[selector, identity]`.
//!
//! 2. Fold the levels right to left, starting from a pass-through identity:
//!    a. nested chains in the level are built as sub-selectors of their own,
//!       so every occurrence of a nested spec gets its own cache;
//!    b. the level's dependencies are composed against the function built
//!       so far, which becomes their combiner;
//!    c. the composition is wrapped with the level's recomputation counter
//!       and handed to the creator's [`MemoizeStrategy`].
//!
//! 3. The outermost wrapped function is the selector.
//!
//! A level that hits its cache skips everything downstream of it, so a
//! change in the state only reaches the levels whose inputs changed.

use std::fmt::Debug;
use std::sync::Arc;

use parking_lot::Mutex;

use super::compose::compose_dependencies;
use super::function::{identity_fn, NodeFn, Selector};
use super::normalize::{normalize, Dependency, Level};
use super::spec::{SelectorRegistry, SpecNode};
use super::tracker::RecomputationTracker;
use crate::config::MemoizeOptions;
use crate::error::Result;
use crate::memo::MemoCell;
use crate::value::Value;

/// A caching policy applied to every level of a selector tree.
///
/// Implementations receive the level's function and return a function with
/// the same observable results. Closures of the same shape implement this
/// trait too.
pub trait MemoizeStrategy: Send + Sync {
    fn memoize(&self, func: NodeFn, options: &MemoizeOptions) -> NodeFn;
}

impl<F> MemoizeStrategy for F
where
    F: Fn(NodeFn, &MemoizeOptions) -> NodeFn + Send + Sync,
{
    fn memoize(&self, func: NodeFn, options: &MemoizeOptions) -> NodeFn {
        self(func, options)
    }
}

/// One-entry cache per level, comparing arguments with the comparator
/// selected by the options.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultMemoize;

impl MemoizeStrategy for DefaultMemoize {
    fn memoize(&self, func: NodeFn, options: &MemoizeOptions) -> NodeFn {
        let equal = options.comparator();
        let cell: Mutex<MemoCell<Value, Value>> = Mutex::new(MemoCell::new());

        Arc::new(move |args: &[Value]| -> Result<Value> {
            let cached = cell.lock().lookup(|a, b| equal(a, b), args);
            if let Some(result) = cached {
                tracing::trace!(arity = args.len(), "selector cache hit");
                return Ok(result);
            }

            // Errors leave the cell as it was, so the next call retries.
            let result = func(args)?;
            cell.lock().store(args, result.clone());
            Ok(result)
        })
    }
}

/// No caching: every call runs the level.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThrough;

impl MemoizeStrategy for PassThrough {
    fn memoize(&self, func: NodeFn, _options: &MemoizeOptions) -> NodeFn {
        func
    }
}

/// Builds selectors with one caching policy.
#[derive(Clone)]
pub struct SelectorCreator {
    strategy: Arc<dyn MemoizeStrategy>,
    options: MemoizeOptions,
}

impl Default for SelectorCreator {
    fn default() -> Self {
        Self::new(DefaultMemoize, MemoizeOptions::default())
    }
}

impl SelectorCreator {
    pub fn new<S>(strategy: S, options: MemoizeOptions) -> Self
    where
        S: MemoizeStrategy + 'static,
    {
        Self {
            strategy: Arc::new(strategy),
            options,
        }
    }

    /// Default caching with custom options.
    pub fn with_options(options: MemoizeOptions) -> Self {
        Self::new(DefaultMemoize, options)
    }

    pub fn options(&self) -> &MemoizeOptions {
        &self.options
    }

    /// Build a selector. Spec errors surface here, before any call.
    pub fn create(&self, spec: &SpecNode) -> Result<ComposedSelector> {
        let levels = normalize(spec)?.into_levels();
        Ok(self.build(levels))
    }

    /// Read a JSON spec against `registry` and build it.
    pub fn create_from_json(
        &self,
        json: &serde_json::Value,
        registry: &SelectorRegistry,
    ) -> Result<ComposedSelector> {
        self.create(&SpecNode::from_json(json, registry)?)
    }

    fn build(&self, levels: Vec<Level>) -> ComposedSelector {
        let tracker = RecomputationTracker::new(levels.len());
        let result_fn = levels.last().and_then(Level::single_selector).cloned();
        let mut nested = 0;

        let mut next = identity_fn();
        for (index, level) in levels.into_iter().enumerate().rev() {
            let deps = level
                .into_deps()
                .into_iter()
                .map(|dep| match dep {
                    Dependency::Selector(selector) => selector.as_fn().clone(),
                    Dependency::Nested(chain) => {
                        nested += 1;
                        self.build(chain).into_fn()
                    }
                })
                .collect();
            let composed = compose_dependencies(deps, next);

            let counter = tracker.clone();
            let counted: NodeFn = Arc::new(move |args: &[Value]| {
                counter.bump(index);
                tracing::trace!(level = index, "selector level recomputing");
                composed(args)
            });
            next = self.strategy.memoize(counted, &self.options);
        }

        tracing::debug!(levels = tracker.len(), nested, "built selector");
        ComposedSelector {
            root: next,
            tracker,
            result_fn,
        }
    }
}

/// The callable result of building a spec.
///
/// Cloning shares the caches and the counters.
#[derive(Clone)]
pub struct ComposedSelector {
    root: NodeFn,
    tracker: RecomputationTracker,
    result_fn: Option<Selector>,
}

impl ComposedSelector {
    /// Evaluate the selector against `args`.
    pub fn call(&self, args: &[Value]) -> Result<Value> {
        (self.root)(args)
    }

    /// Evaluate the selector against a single state value.
    pub fn select(&self, state: &Value) -> Result<Value> {
        self.call(std::slice::from_ref(state))
    }

    /// Per-level recomputation counts, outermost level first.
    pub fn recomputations(&self) -> Vec<u64> {
        self.tracker.recomputations()
    }

    /// Zero the counters. Cached results stay valid.
    pub fn reset_recomputations(&self) {
        tracing::debug!(levels = self.tracker.len(), "resetting recomputations");
        self.tracker.reset();
    }

    /// The final combiner, when the last level is a single selector.
    pub fn result_fn(&self) -> Option<&Selector> {
        self.result_fn.as_ref()
    }

    /// Number of levels in the root chain.
    pub fn node_count(&self) -> usize {
        self.tracker.len()
    }

    pub fn tracker(&self) -> &RecomputationTracker {
        &self.tracker
    }

    pub fn into_fn(self) -> NodeFn {
        self.root
    }
}

/// Reuse a built selector as a dependency. Every place it is used shares
/// its cache.
impl From<ComposedSelector> for Selector {
    fn from(selector: ComposedSelector) -> Self {
        Selector::from_fn(selector.into_fn())
    }
}

impl From<ComposedSelector> for SpecNode {
    fn from(selector: ComposedSelector) -> Self {
        SpecNode::Leaf(selector.into())
    }
}

impl Debug for ComposedSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComposedSelector")
            .field("recomputations", &self.recomputations())
            .field("result_fn", &self.result_fn)
            .finish()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
