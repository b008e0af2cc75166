//! Dependency composition.

use std::sync::Arc;

use smallvec::SmallVec;

use super::function::NodeFn;
use crate::error::Result;
use crate::value::Value;

/// Results of one level, passed positionally to the next.
pub type Args = SmallVec<[Value; 4]>;

/// Build a function that evaluates every dependency against the incoming
/// arguments and feeds the results, in order, to `combiner`.
///
/// Each dependency sees the original arguments, never a sibling's output.
/// Dependencies run left to right; the first error stops the evaluation.
pub fn compose_dependencies(deps: Vec<NodeFn>, combiner: NodeFn) -> NodeFn {
    let deps: Arc<[NodeFn]> = deps.into();
    Arc::new(move |args: &[Value]| -> Result<Value> {
        let params = deps
            .iter()
            .map(|dep| dep(args))
            .collect::<std::result::Result<Args, _>>()?;
        combiner(params.as_slice())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SelectorError;
    use parking_lot::Mutex;

    fn field(name: &'static str) -> NodeFn {
        Arc::new(move |args: &[Value]| Ok(args[0].get(name).clone()))
    }

    fn sum() -> NodeFn {
        Arc::new(|args: &[Value]| Ok(Value::from(args.iter().filter_map(Value::as_i64).sum::<i64>())))
    }

    #[test]
    fn feeds_results_positionally() {
        let minus: NodeFn = Arc::new(|args: &[Value]| -> Result<Value> {
            Ok(Value::from(args[0].expect_i64()? - args[1].expect_i64()?))
        });
        let composed = compose_dependencies(vec![field("a"), field("b")], minus);
        let state = Value::map([("a", Value::from(10)), ("b", Value::from(3))]);
        assert_eq!(composed(&[state]).unwrap(), Value::from(7));
    }

    #[test]
    fn every_dependency_sees_original_args() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let record = |tag: i64| -> NodeFn {
            let seen = seen.clone();
            Arc::new(move |args: &[Value]| {
                seen.lock().push((tag, args.len()));
                Ok(Value::from(tag))
            })
        };
        let composed = compose_dependencies(vec![record(1), record(2), record(3)], sum());
        let out = composed(&[Value::Null, Value::Null]).unwrap();

        assert_eq!(out, Value::from(6));
        assert_eq!(*seen.lock(), vec![(1, 2), (2, 2), (3, 2)]);
    }

    #[test]
    fn first_error_stops_evaluation() {
        let calls = Arc::new(Mutex::new(0));
        let failing: NodeFn = Arc::new(|_: &[Value]| Err(SelectorError::evaluation("boom")));
        let counted: NodeFn = {
            let calls = calls.clone();
            Arc::new(move |_: &[Value]| {
                *calls.lock() += 1;
                Ok(Value::Null)
            })
        };
        let composed = compose_dependencies(vec![failing, counted], sum());

        assert!(composed(&[Value::Null]).is_err());
        assert_eq!(*calls.lock(), 0);
    }

    #[test]
    fn no_dependencies_calls_combiner_with_nothing() {
        let arity: NodeFn = Arc::new(|args: &[Value]| Ok(Value::from(args.len() as i64)));
        let composed = compose_dependencies(Vec::new(), arity);
        assert_eq!(composed(&[Value::Null]).unwrap(), Value::from(0));
    }
}
