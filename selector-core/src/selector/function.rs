//! Selector functions.

use std::fmt::Debug;
use std::sync::Arc;

use crate::error::Result;
use crate::value::Value;

/// A function from an argument list to a value, as it runs inside a tree.
pub type NodeFn = Arc<dyn Fn(&[Value]) -> Result<Value> + Send + Sync>;

/// A shareable handle to a user function: a leaf dependency, a combiner, or
/// a whole composed selector.
///
/// Selectors receive the external state as their argument list when used
/// as first-level dependencies, and the results of the previous level when
/// used as combiners. Cloning is cheap and keeps the same function.
#[derive(Clone)]
pub struct Selector {
    name: Option<Arc<str>>,
    func: NodeFn,
}

impl Selector {
    /// Wrap an infallible function.
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        Self {
            name: None,
            func: Arc::new(move |args: &[Value]| Ok(func(args))),
        }
    }

    /// Wrap a function that may fail. Errors propagate to the caller of the
    /// composed selector and are never cached.
    pub fn try_new<F>(func: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            name: None,
            func: Arc::new(func),
        }
    }

    /// Wrap an already boxed node function.
    pub fn from_fn(func: NodeFn) -> Self {
        Self { name: None, func }
    }

    /// Passes its single argument through; several arguments come back as a list.
    pub fn identity() -> Self {
        Self::from_fn(identity_fn()).named("identity")
    }

    /// Attach a name, shown in `Debug` output and trace events.
    pub fn named(mut self, name: impl Into<Arc<str>>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn call(&self, args: &[Value]) -> Result<Value> {
        (self.func)(args)
    }

    pub fn as_fn(&self) -> &NodeFn {
        &self.func
    }

    /// Whether both handles point at the same function.
    pub fn ptr_eq(&self, other: &Selector) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }
}

pub(crate) fn identity_fn() -> NodeFn {
    Arc::new(|args: &[Value]| {
        Ok(match args {
            [single] => single.clone(),
            _ => Value::list(args.iter().cloned()),
        })
    })
}

impl Debug for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Selector")
            .field("name", &self.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SelectorError;

    #[test]
    fn new_wraps_infallible_function() {
        let double = Selector::new(|args| Value::from(args[0].as_i64().unwrap_or(0) * 2));
        assert_eq!(double.call(&[Value::from(21)]).unwrap(), Value::from(42));
    }

    #[test]
    fn try_new_propagates_errors() {
        let strict = Selector::try_new(|args| Ok(Value::from(args[0].expect_i64()? + 1)));
        assert_eq!(strict.call(&[Value::from(1)]).unwrap(), Value::from(2));
        assert!(matches!(
            strict.call(&[Value::from("x")]),
            Err(SelectorError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn identity_passes_single_argument() {
        let id = Selector::identity();
        let state = Value::list([Value::from(1)]);
        assert!(id.call(&[state.clone()]).unwrap().identical(&state));
        assert_eq!(
            id.call(&[Value::from(1), Value::from(2)]).unwrap(),
            Value::list([Value::from(1), Value::from(2)])
        );
    }

    #[test]
    fn clones_share_the_function() {
        let a = Selector::new(|_| Value::Null).named("a");
        let b = a.clone();
        let c = Selector::new(|_| Value::Null);
        assert!(a.ptr_eq(&b));
        assert!(!a.ptr_eq(&c));
        assert_eq!(b.name(), Some("a"));
        assert_eq!(format!("{c:?}"), "Selector { name: None }");
    }
}
