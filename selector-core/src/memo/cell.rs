//! Memo Cell
//!
//! Storage for the single most recent call of a memoized function.

/// Compare two argument lists pairwise.
///
/// Returns false when either side is absent (no prior call) or when the
/// lengths differ. Otherwise every position must satisfy `equal(prev, next)`.
/// Positions are visited from last to first; with a pure comparator the
/// order is not observable.
pub fn are_args_equal<T, F>(equal: F, prev: Option<&[T]>, next: Option<&[T]>) -> bool
where
    F: Fn(&T, &T) -> bool,
{
    let (Some(prev), Some(next)) = (prev, next) else {
        return false;
    };
    if prev.len() != next.len() {
        return false;
    }
    prev.iter()
        .zip(next.iter())
        .rev()
        .all(|(p, n)| equal(p, n))
}

/// The last `(args, result)` pair seen by one memoized function.
///
/// `last_result` is meaningful only while `last_args` is `Some`; the two
/// are always written together.
#[derive(Debug, Clone)]
pub struct MemoCell<T, R> {
    last_args: Option<Vec<T>>,
    last_result: Option<R>,
}

impl<T, R> Default for MemoCell<T, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, R> MemoCell<T, R> {
    pub fn new() -> Self {
        Self {
            last_args: None,
            last_result: None,
        }
    }

    /// Whether a result is cached.
    pub fn has_value(&self) -> bool {
        self.last_args.is_some()
    }

    pub fn last_args(&self) -> Option<&[T]> {
        self.last_args.as_deref()
    }

    /// Forget the cached pair. The next lookup misses.
    pub fn clear(&mut self) {
        self.last_args = None;
        self.last_result = None;
    }
}

impl<T: Clone, R: Clone> MemoCell<T, R> {
    /// Return the cached result if `args` match the stored arguments.
    ///
    /// On a hit the stored arguments are replaced by `args`, so the next
    /// comparison runs against the most recent call.
    pub fn lookup<F>(&mut self, equal: F, args: &[T]) -> Option<R>
    where
        F: Fn(&T, &T) -> bool,
    {
        if !are_args_equal(equal, self.last_args.as_deref(), Some(args)) {
            return None;
        }
        let result = self.last_result.clone()?;
        self.last_args = Some(args.to_vec());
        Some(result)
    }

    /// Record a freshly computed result for `args`.
    pub fn store(&mut self, args: &[T], result: R) {
        self.last_args = Some(args.to_vec());
        self.last_result = Some(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eq(a: &i32, b: &i32) -> bool {
        a == b
    }

    #[test]
    fn absent_sides_are_never_equal() {
        assert!(!are_args_equal(eq, None, Some(&[1][..])));
        assert!(!are_args_equal(eq, Some(&[1][..]), None));
        assert!(!are_args_equal::<i32, _>(eq, None, None));
    }

    #[test]
    fn length_mismatch_is_not_equal() {
        assert!(!are_args_equal(eq, Some(&[1, 2][..]), Some(&[1][..])));
    }

    #[test]
    fn empty_lists_are_equal() {
        assert!(are_args_equal::<i32, _>(eq, Some(&[][..]), Some(&[][..])));
    }

    #[test]
    fn every_position_must_match() {
        assert!(are_args_equal(eq, Some(&[1, 2, 3][..]), Some(&[1, 2, 3][..])));
        assert!(!are_args_equal(eq, Some(&[1, 2, 3][..]), Some(&[1, 9, 3][..])));
    }

    #[test]
    fn comparator_sees_prev_then_next() {
        let seen = std::cell::RefCell::new(Vec::new());
        are_args_equal(
            |p: &i32, n: &i32| {
                seen.borrow_mut().push((*p, *n));
                true
            },
            Some(&[1, 2][..]),
            Some(&[10, 20][..]),
        );
        assert_eq!(seen.into_inner(), vec![(2, 20), (1, 10)]);
    }

    #[test]
    fn first_lookup_misses() {
        let mut cell: MemoCell<i32, i32> = MemoCell::new();
        assert!(!cell.has_value());
        assert_eq!(cell.lookup(eq, &[1]), None);
    }

    #[test]
    fn lookup_hits_after_store() {
        let mut cell = MemoCell::new();
        cell.store(&[1, 2], 3);
        assert_eq!(cell.lookup(eq, &[1, 2]), Some(3));
        assert_eq!(cell.lookup(eq, &[2, 1]), None);
    }

    #[test]
    fn clear_forgets_the_pair() {
        let mut cell = MemoCell::new();
        cell.store(&[1], 1);
        cell.clear();
        assert!(cell.last_args().is_none());
        assert_eq!(cell.lookup(eq, &[1]), None);
    }
}
