//! Spec Normalization
//!
//! Rewrites any [`SpecNode`] into one canonical shape before building, so
//! the builder never inspects spec shapes again:
//!
//! - a chain is a list of [`Level`]s, the last one holding the combiner;
//! - a level is a list of [`Dependency`]s evaluated against the same inputs;
//! - a dependency is either a selector or a nested chain, which the builder
//!   turns into its own memoized sub-selector.
//!
//! Keyed specs become a two-level chain: one level evaluating every value,
//! then a reconstructor rebuilding a map with the original keys.

use std::sync::Arc;

use super::function::Selector;
use super::spec::SpecNode;
use crate::error::{Result, SelectorError};
use crate::value::Value;

#[derive(Debug, Clone)]
pub enum Normalized {
    /// A bare selector, passed through unchanged.
    Leaf(Selector),
    Chain(Vec<Level>),
}

impl Normalized {
    /// The chain form. A bare selector becomes `[selector, identity]`.
    pub fn into_levels(self) -> Vec<Level> {
        match self {
            Normalized::Leaf(selector) => vec![
                Level::new(vec![Dependency::Selector(selector)]),
                Level::new(vec![Dependency::Selector(Selector::identity())]),
            ],
            Normalized::Chain(levels) => levels,
        }
    }
}

/// Sibling dependencies evaluated against the same arguments.
#[derive(Debug, Clone)]
pub struct Level {
    deps: Vec<Dependency>,
}

#[derive(Debug, Clone)]
pub enum Dependency {
    Selector(Selector),
    Nested(Vec<Level>),
}

impl Level {
    fn new(deps: Vec<Dependency>) -> Self {
        Self { deps }
    }

    pub fn deps(&self) -> &[Dependency] {
        &self.deps
    }

    pub fn into_deps(self) -> Vec<Dependency> {
        self.deps
    }

    /// The selector of a single-dependency level, if that is what it holds.
    pub fn single_selector(&self) -> Option<&Selector> {
        match self.deps.as_slice() {
            [Dependency::Selector(selector)] => Some(selector),
            _ => None,
        }
    }
}

/// Normalize a spec. Fails with [`SelectorError::InvalidSpec`] when a group
/// used as a chain is empty and therefore has no combiner.
pub fn normalize(spec: &SpecNode) -> Result<Normalized> {
    match spec {
        SpecNode::Leaf(selector) => Ok(Normalized::Leaf(selector.clone())),
        other => normalize_chain(other, "$").map(Normalized::Chain),
    }
}

fn normalize_chain(spec: &SpecNode, path: &str) -> Result<Vec<Level>> {
    match spec {
        SpecNode::Leaf(selector) => Ok(Normalized::Leaf(selector.clone()).into_levels()),
        SpecNode::Group(items) => {
            if items.is_empty() {
                return Err(SelectorError::invalid_spec(
                    path,
                    "a selector chain needs at least a combiner",
                ));
            }
            items
                .iter()
                .enumerate()
                .map(|(i, item)| level_of(item, &format!("{path}[{i}]")))
                .collect()
        }
        SpecNode::Keyed(entries) => {
            let values = entries
                .iter()
                .map(|(key, item)| dependency_of(item, &format!("{path}.{key}")))
                .collect::<Result<Vec<_>>>()?;
            let keys: Arc<[String]> = entries.keys().cloned().collect();
            Ok(vec![
                Level::new(values),
                Level::new(vec![Dependency::Selector(reconstructor(keys))]),
            ])
        }
    }
}

fn level_of(item: &SpecNode, path: &str) -> Result<Level> {
    match item {
        SpecNode::Leaf(selector) => Ok(Level::new(vec![Dependency::Selector(selector.clone())])),
        SpecNode::Group(members) => members
            .iter()
            .enumerate()
            .map(|(i, member)| dependency_of(member, &format!("{path}[{i}]")))
            .collect::<Result<Vec<_>>>()
            .map(Level::new),
        SpecNode::Keyed(_) => Ok(Level::new(vec![Dependency::Nested(normalize_chain(
            item, path,
        )?)])),
    }
}

fn dependency_of(member: &SpecNode, path: &str) -> Result<Dependency> {
    match member {
        SpecNode::Leaf(selector) => Ok(Dependency::Selector(selector.clone())),
        nested => normalize_chain(nested, path).map(Dependency::Nested),
    }
}

/// Rebuild a map from positional results, keys in declaration order.
fn reconstructor(keys: Arc<[String]>) -> Selector {
    Selector::new(move |values| {
        Value::map(keys.iter().cloned().zip(values.iter().cloned()))
    })
    .named("reconstruct")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(name: &'static str) -> SpecNode {
        SpecNode::leaf(move |args| args[0].get(name).clone())
    }

    #[test]
    fn leaf_passes_through() {
        let selector = Selector::identity();
        match normalize(&SpecNode::Leaf(selector.clone())).unwrap() {
            Normalized::Leaf(out) => assert!(out.ptr_eq(&selector)),
            other => panic!("expected leaf, got {other:?}"),
        }
    }

    #[test]
    fn leaf_chain_ends_in_identity() {
        let levels = normalize(&field("a")).unwrap().into_levels();
        assert_eq!(levels.len(), 2);
        assert_eq!(levels[1].single_selector().and_then(Selector::name), Some("identity"));
    }

    #[test]
    fn group_becomes_one_level_per_element() {
        let spec = SpecNode::group([
            SpecNode::group([field("a"), field("b")]),
            SpecNode::leaf(|args| args[0].clone()),
        ]);
        let Normalized::Chain(levels) = normalize(&spec).unwrap() else {
            panic!("expected chain");
        };
        assert_eq!(levels.len(), 2);
        assert_eq!(levels[0].deps().len(), 2);
        assert!(levels[1].single_selector().is_some());
    }

    #[test]
    fn nested_groups_become_nested_chains() {
        let inner = SpecNode::group([field("a"), SpecNode::leaf(|args| args[0].clone())]);
        let spec = SpecNode::group([
            SpecNode::group([inner, field("b")]),
            SpecNode::leaf(|args| args[0].clone()),
        ]);
        let Normalized::Chain(levels) = normalize(&spec).unwrap() else {
            panic!("expected chain");
        };
        match levels[0].deps() {
            [Dependency::Nested(chain), Dependency::Selector(_)] => assert_eq!(chain.len(), 2),
            other => panic!("unexpected deps: {other:?}"),
        }
    }

    #[test]
    fn keyed_becomes_values_then_reconstructor() {
        let spec = SpecNode::keyed([("first", field("a")), ("second", field("b"))]);
        let Normalized::Chain(levels) = normalize(&spec).unwrap() else {
            panic!("expected chain");
        };
        assert_eq!(levels.len(), 2);
        assert_eq!(levels[0].deps().len(), 2);

        let rebuild = levels[1].single_selector().unwrap();
        assert_eq!(rebuild.name(), Some("reconstruct"));
        let out = rebuild.call(&[Value::from(1), Value::from(2)]).unwrap();
        let keys: Vec<_> = out.as_map().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["first", "second"]);
        assert_eq!(out.get("second").as_i64(), Some(2));
    }

    #[test]
    fn keyed_element_in_chain_is_one_nested_dependency() {
        let spec = SpecNode::group([
            SpecNode::keyed([("x", field("a"))]),
            SpecNode::leaf(|args| args[0].clone()),
        ]);
        let Normalized::Chain(levels) = normalize(&spec).unwrap() else {
            panic!("expected chain");
        };
        assert!(matches!(levels[0].deps(), [Dependency::Nested(_)]));
    }

    #[test]
    fn empty_chain_is_invalid() {
        let err = normalize(&SpecNode::group(Vec::<SpecNode>::new())).unwrap_err();
        assert!(matches!(err, SelectorError::InvalidSpec { ref path, .. } if path == "$"));

        let nested = SpecNode::group([
            SpecNode::group([SpecNode::group(Vec::<SpecNode>::new())]),
            SpecNode::leaf(|args| args[0].clone()),
        ]);
        let err = normalize(&nested).unwrap_err();
        assert!(matches!(err, SelectorError::InvalidSpec { ref path, .. } if path == "$[0][0]"));
    }

    #[test]
    fn empty_dependency_group_is_allowed() {
        let spec = SpecNode::group([
            SpecNode::group(Vec::<SpecNode>::new()),
            SpecNode::leaf(|args| Value::from(args.len() as i64)),
        ]);
        assert!(normalize(&spec).is_ok());
    }
}
