//! Batch selector creation.

use indexmap::IndexMap;

use super::builder::{ComposedSelector, SelectorCreator};
use super::spec::SpecNode;
use crate::error::Result;
use crate::value::Value;

/// What a batch build produced: one selector, or one per key.
#[derive(Debug, Clone)]
pub enum SelectorSet {
    Single(ComposedSelector),
    Named(IndexMap<String, ComposedSelector>),
}

impl SelectorSet {
    pub fn single(&self) -> Option<&ComposedSelector> {
        match self {
            SelectorSet::Single(selector) => Some(selector),
            SelectorSet::Named(_) => None,
        }
    }

    pub fn get(&self, name: &str) -> Option<&ComposedSelector> {
        match self {
            SelectorSet::Single(_) => None,
            SelectorSet::Named(selectors) => selectors.get(name),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            SelectorSet::Single(_) => 1,
            SelectorSet::Named(selectors) => selectors.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Evaluate every selector against one state. Named sets produce a map
    /// keyed like the set.
    pub fn select_all(&self, state: &Value) -> Result<Value> {
        match self {
            SelectorSet::Single(selector) => selector.select(state),
            SelectorSet::Named(selectors) => {
                let values = selectors
                    .iter()
                    .map(|(name, selector)| -> Result<(String, Value)> {
                        Ok((name.clone(), selector.select(state)?))
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(Value::map(values))
            }
        }
    }
}

/// Builds several selectors at once with a shared [`SelectorCreator`].
#[derive(Clone, Default)]
pub struct SelectorsCreator {
    creator: SelectorCreator,
}

impl SelectorsCreator {
    pub fn new(creator: SelectorCreator) -> Self {
        Self { creator }
    }

    /// A keyed spec builds one independent selector per key, in declaration
    /// order. Any other spec builds a single selector.
    pub fn create(&self, specs: &SpecNode) -> Result<SelectorSet> {
        match specs {
            SpecNode::Keyed(entries) => entries
                .iter()
                .map(|(name, spec)| -> Result<(String, ComposedSelector)> {
                    Ok((name.clone(), self.creator.create(spec)?))
                })
                .collect::<Result<IndexMap<_, _>>>()
                .map(SelectorSet::Named),
            spec => self.creator.create(spec).map(SelectorSet::Single),
        }
    }
}
