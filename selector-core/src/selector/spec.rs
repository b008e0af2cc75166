//! Selector Specifications
//!
//! A [`SpecNode`] describes a selector tree before it is built:
//!
//! - `Leaf`: a single selector function.
//! - `Group`: an ordered list whose last element is the combiner and whose
//!   earlier elements are dependency levels. An element that is itself a
//!   group lists sibling dependencies evaluated against the same inputs.
//! - `Keyed`: named sub-specifications whose results are reassembled into a
//!   map with the same keys.
//!
//! Specs can also be read from JSON, with selector names resolved through a
//! [`SelectorRegistry`]:
//!
//! ```json
//! [["todos", "filter"], "visible_todos", "count"]
//! ```

use indexmap::IndexMap;

use super::function::Selector;
use crate::error::{Result, SelectorError};
use crate::value::Value;

#[derive(Debug, Clone)]
pub enum SpecNode {
    Leaf(Selector),
    Group(Vec<SpecNode>),
    Keyed(IndexMap<String, SpecNode>),
}

impl SpecNode {
    pub fn leaf<F>(func: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        SpecNode::Leaf(Selector::new(func))
    }

    pub fn group<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<SpecNode>,
    {
        SpecNode::Group(items.into_iter().map(Into::into).collect())
    }

    pub fn keyed<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, SpecNode)>,
    {
        SpecNode::Keyed(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Read a spec from JSON. Strings name registered selectors, arrays
    /// become groups and objects keyed mappings. Any other JSON value is
    /// rejected with [`SelectorError::InvalidSpec`].
    pub fn from_json(json: &serde_json::Value, registry: &SelectorRegistry) -> Result<Self> {
        Self::from_json_at(json, registry, "$")
    }

    fn from_json_at(
        json: &serde_json::Value,
        registry: &SelectorRegistry,
        path: &str,
    ) -> Result<Self> {
        match json {
            serde_json::Value::String(name) => registry
                .get(name)
                .cloned()
                .map(SpecNode::Leaf)
                .ok_or_else(|| SelectorError::UnknownSelector {
                    name: name.clone(),
                    path: path.to_string(),
                }),
            serde_json::Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(i, item)| Self::from_json_at(item, registry, &format!("{path}[{i}]")))
                .collect::<Result<Vec<_>>>()
                .map(SpecNode::Group),
            serde_json::Value::Object(entries) => entries
                .iter()
                .map(|(key, item)| {
                    Self::from_json_at(item, registry, &format!("{path}.{key}"))
                        .map(|node| (key.clone(), node))
                })
                .collect::<Result<IndexMap<_, _>>>()
                .map(SpecNode::Keyed),
            other => Err(SelectorError::invalid_spec(
                path,
                format!(
                    "expected a selector name, an array or an object, found {}",
                    json_type_name(other)
                ),
            )),
        }
    }
}

fn json_type_name(json: &serde_json::Value) -> &'static str {
    match json {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

impl From<Selector> for SpecNode {
    fn from(selector: Selector) -> Self {
        SpecNode::Leaf(selector)
    }
}

impl From<Vec<SpecNode>> for SpecNode {
    fn from(items: Vec<SpecNode>) -> Self {
        SpecNode::Group(items)
    }
}

impl From<IndexMap<String, SpecNode>> for SpecNode {
    fn from(entries: IndexMap<String, SpecNode>) -> Self {
        SpecNode::Keyed(entries)
    }
}

/// Named selectors available to JSON specs.
#[derive(Debug, Clone, Default)]
pub struct SelectorRegistry {
    selectors: IndexMap<String, Selector>,
}

impl SelectorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a selector under `name`. The selector is tagged with the
    /// name unless it already has one. Re-registering a name replaces it.
    pub fn register(&mut self, name: impl Into<String>, selector: Selector) -> &mut Self {
        let name = name.into();
        let selector = match selector.name() {
            Some(_) => selector,
            None => selector.named(name.as_str()),
        };
        self.selectors.insert(name, selector);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Selector> {
        self.selectors.get(name)
    }

    pub fn len(&self) -> usize {
        self.selectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }
}
