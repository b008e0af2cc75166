//! Equality comparators used by memo cells.

use std::sync::Arc;

use crate::value::Value;

/// A binary predicate deciding whether two arguments are interchangeable.
///
/// Comparators must be reflexive and free of side effects. They are applied
/// pairwise to argument lists; recursing into compound values is up to the
/// comparator itself.
pub type EqualityFn<T> = Arc<dyn Fn(&T, &T) -> bool + Send + Sync>;

/// Identity comparison, the default policy of the memoizer.
///
/// Plain data compares by value; shared data (`Arc`, and the compound
/// variants of [`Value`]) compares by pointer.
pub trait Identical {
    fn identical(&self, other: &Self) -> bool;
}

macro_rules! identical_by_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Identical for $ty {
                fn identical(&self, other: &Self) -> bool {
                    self == other
                }
            }
        )*
    };
}

identical_by_value!(bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, String, &str, ());

impl<T: ?Sized> Identical for Arc<T> {
    fn identical(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other)
    }
}

impl<T: Identical> Identical for Option<T> {
    fn identical(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => a.identical(b),
            (None, None) => true,
            _ => false,
        }
    }
}

/// The default comparator as a shareable function.
pub fn identity_eq<T: Identical + 'static>() -> EqualityFn<T> {
    Arc::new(|a: &T, b: &T| a.identical(b))
}

/// Deep comparison of [`Value`]s, for callers that want results rebuilt
/// with equal content to count as unchanged.
pub fn structural_eq() -> EqualityFn<Value> {
    Arc::new(|a: &Value, b: &Value| a.structural_eq(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn identity_eq_uses_pointer_for_arcs() {
        let eq = identity_eq::<Arc<Vec<i32>>>();
        let a = Arc::new(vec![1, 2]);
        let b = Arc::new(vec![1, 2]);
        assert!(eq(&a, &a.clone()));
        assert!(!eq(&a, &b));
    }

    #[test]
    fn identity_eq_uses_value_for_scalars() {
        let eq = identity_eq::<i64>();
        assert!(eq(&4, &4));
        assert!(!eq(&4, &5));
    }

    #[test]
    fn structural_eq_sees_through_fresh_values() {
        let eq = structural_eq();
        let a = Value::from(json!({"todos": [1, 2, 3]}));
        let b = Value::from(json!({"todos": [1, 2, 3]}));
        let c = Value::from(json!({"todos": [1, 2]}));
        assert!(eq(&a, &b));
        assert!(!eq(&a, &c));
        assert!(!identity_eq::<Value>()(&a, &b));
    }
}
