//! Memoize Options
//!
//! Options handed to a [`MemoizeStrategy`](crate::selector::MemoizeStrategy)
//! for every node it wraps. They can be written in code or loaded from JSON:
//!
//! ```json
//! { "equality": "structural" }
//! ```

use std::fmt;

use serde::Deserialize;

use crate::error::Result;
use crate::memo::{identity_eq, structural_eq, EqualityFn};
use crate::value::Value;

/// How a node decides that its arguments are unchanged.
#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Equality {
    /// Scalars by value, lists and maps by identity.
    #[default]
    Identity,

    /// Deep comparison of lists and maps.
    Structural,

    /// A caller-supplied comparator. Not available from JSON.
    #[serde(skip)]
    Custom(EqualityFn<Value>),
}

impl fmt::Debug for Equality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Equality::Identity => f.write_str("Identity"),
            Equality::Structural => f.write_str("Structural"),
            Equality::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MemoizeOptions {
    pub equality: Equality,
}

impl MemoizeOptions {
    /// Options comparing lists and maps by content.
    pub fn structural() -> Self {
        Self {
            equality: Equality::Structural,
        }
    }

    pub fn with_equality<F>(mut self, equal: F) -> Self
    where
        F: Fn(&Value, &Value) -> bool + Send + Sync + 'static,
    {
        self.equality = Equality::Custom(std::sync::Arc::new(equal));
        self
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The comparator these options select.
    pub fn comparator(&self) -> EqualityFn<Value> {
        match &self.equality {
            Equality::Identity => identity_eq::<Value>(),
            Equality::Structural => structural_eq(),
            Equality::Custom(equal) => equal.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SelectorError;

    #[test]
    fn defaults_to_identity() {
        let options = MemoizeOptions::default();
        assert!(matches!(options.equality, Equality::Identity));

        let eq = options.comparator();
        assert!(eq(&Value::from(1), &Value::from(1)));
        assert!(!eq(&Value::list([]), &Value::list([])));
    }

    #[test]
    fn parses_structural_from_json() {
        let options = MemoizeOptions::from_json(r#"{"equality": "structural"}"#).unwrap();
        assert!(matches!(options.equality, Equality::Structural));
        assert!(options.comparator()(&Value::list([]), &Value::list([])));
    }

    #[test]
    fn empty_json_means_defaults() {
        let options = MemoizeOptions::from_json("{}").unwrap();
        assert!(matches!(options.equality, Equality::Identity));
    }

    #[test]
    fn rejects_unknown_equality() {
        let err = MemoizeOptions::from_json(r#"{"equality": "deep"}"#).unwrap_err();
        assert!(matches!(err, SelectorError::Config(_)));
        assert!(MemoizeOptions::from_json(r#"{"equality": "custom"}"#).is_err());
    }

    #[test]
    fn custom_comparator_round_trips() {
        let options = MemoizeOptions::default()
            .with_equality(|a, b| a.as_f64().zip(b.as_f64()).is_some_and(|(x, y)| (x - y).abs() < 0.5));
        let eq = options.comparator();
        assert!(eq(&Value::from(1.0), &Value::from(1.2)));
        assert!(!eq(&Value::from(1.0), &Value::from(2.0)));
        assert_eq!(format!("{:?}", options.equality), "Custom(..)");
    }
}
