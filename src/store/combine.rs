use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use super::reducer::Reducer;
use crate::error::{Error, Result};
use crate::identity::Identical;

/// State shape handled by a [`CombinedReducer`]: one shared slice per key.
pub type Slices<K, S> = BTreeMap<K, Arc<S>>;

type SliceReducer<S, A> = Box<dyn Reducer<S, A> + Send + Sync>;

fn same_pointer<S>(prev: &Arc<S>, next: &Arc<S>) -> bool {
    Arc::ptr_eq(prev, next)
}

fn same_value<S: Identical>(prev: &Arc<S>, next: &Arc<S>) -> bool {
    Arc::ptr_eq(prev, next) || (**prev).identical(next)
}

/// A reducer assembled from one reducer per named slice of state.
///
/// Every slice reducer runs on every action, in key order. If all of them
/// hand back their slice unchanged (same `Arc`), the combined reducer hands
/// back the whole state unchanged too. Otherwise it builds a new map holding
/// exactly the registered keys.
///
/// A slice missing from the incoming state is reduced from `S::default()`
/// and always counts as a change.
///
/// Slices are compared by pointer, so a reducer that means "no change" must
/// return `Arc::clone(state)`. For value slices (`String`, numbers, anything
/// [`Identical`]) call [`compare_slices_by_value`](Self::compare_slices_by_value)
/// so that a freshly allocated but identical value also counts as unchanged;
/// the previous `Arc` is kept in that case.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use unistate::{CombinedReducer, Reducer, Slices};
///
/// let reducer = CombinedReducer::new()
///     .slice("hits", |n: &Arc<u32>, _: &()| Arc::new(**n + 1))?
///     .slice("misses", |n: &Arc<u32>, _: &()| Arc::clone(n))?;
///
/// let state: Arc<Slices<&str, u32>> = Arc::default();
/// let next = reducer.reduce(&state, &());
///
/// assert_eq!(*next["hits"], 1);
/// assert_eq!(*next["misses"], 0);
/// # Ok::<(), unistate::Error>(())
/// ```
pub struct CombinedReducer<K, S, A> {
    reducers: BTreeMap<K, SliceReducer<S, A>>,
    same_slice: fn(&Arc<S>, &Arc<S>) -> bool,
}

impl<K, S, A> CombinedReducer<K, S, A>
where
    K: Ord + fmt::Debug,
{
    /// Create an empty combination.
    pub fn new() -> Self {
        Self {
            reducers: BTreeMap::new(),
            same_slice: same_pointer::<S>,
        }
    }

    /// Register the reducer responsible for the slice under `key`.
    ///
    /// Fails with [`Error::DuplicateSlice`] if `key` already has a reducer.
    pub fn slice<R>(mut self, key: K, reducer: R) -> Result<Self>
    where
        R: Reducer<S, A> + Send + Sync + 'static,
    {
        if self.reducers.contains_key(&key) {
            return Err(Error::DuplicateSlice {
                key: format!("{key:?}"),
            });
        }
        self.reducers.insert(key, Box::new(reducer));
        Ok(self)
    }

    /// Treat a slice as unchanged when its new value is [`Identical`] to the
    /// previous one, not only when the reducer returned the same `Arc`.
    pub fn compare_slices_by_value(mut self) -> Self
    where
        S: Identical,
    {
        self.same_slice = same_value::<S>;
        self
    }

    /// Iterate over the registered slice keys, in the order they are reduced.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.reducers.keys()
    }

    pub fn len(&self) -> usize {
        self.reducers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reducers.is_empty()
    }
}

impl<K, S, A> Default for CombinedReducer<K, S, A>
where
    K: Ord + fmt::Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, S, A> fmt::Debug for CombinedReducer<K, S, A>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CombinedReducer")
            .field("slices", &self.reducers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<K, S, A> Reducer<Slices<K, S>, A> for CombinedReducer<K, S, A>
where
    K: Ord + Clone,
    S: Default,
{
    fn reduce(&self, state: &Arc<Slices<K, S>>, action: &A) -> Arc<Slices<K, S>> {
        let mut changed = 0usize;
        let mut next = BTreeMap::new();

        for (key, reducer) in &self.reducers {
            let next_slice = match state.get(key) {
                Some(prev) => {
                    let next_slice = reducer.reduce(prev, action);
                    if (self.same_slice)(prev, &next_slice) {
                        Arc::clone(prev)
                    } else {
                        changed += 1;
                        next_slice
                    }
                }
                None => {
                    changed += 1;
                    reducer.reduce(&Arc::new(S::default()), action)
                }
            };
            next.insert(key.clone(), next_slice);
        }

        if changed == 0 {
            tracing::trace!(slices = self.reducers.len(), "combined state unchanged");
            return Arc::clone(state);
        }

        tracing::debug!(
            changed,
            slices = self.reducers.len(),
            "combined state replaced"
        );
        Arc::new(next)
    }
}

/// Build one reducer out of a mapping from slice key to slice reducer.
///
/// The reducers must share one concrete type; wrap different closures with
/// [`boxed_reducer`](crate::boxed_reducer) first. Yielding the same key twice
/// is rejected with [`Error::DuplicateSlice`].
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use unistate::{boxed_reducer, combine_reducers, Reducer, Slices};
///
/// let combined = combine_reducers([
///     ("a", boxed_reducer(|_: &Arc<String>, _: &()| Arc::new("aaa".to_string()))),
///     ("b", boxed_reducer(|_: &Arc<String>, _: &()| Arc::new("bbb".to_string()))),
/// ])?;
///
/// let next = combined.reduce(&Arc::new(Slices::new()), &());
/// assert_eq!(next["a"].as_str(), "aaa");
/// assert_eq!(next["b"].as_str(), "bbb");
/// # Ok::<(), unistate::Error>(())
/// ```
pub fn combine_reducers<K, S, A, R, I>(reducers: I) -> Result<CombinedReducer<K, S, A>>
where
    K: Ord + fmt::Debug,
    R: Reducer<S, A> + Send + Sync + 'static,
    I: IntoIterator<Item = (K, R)>,
{
    reducers
        .into_iter()
        .try_fold(CombinedReducer::new(), |combined, (key, reducer)| {
            combined.slice(key, reducer)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::reducer::{boxed_reducer, BoxedReducer};
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    type Action = &'static str;

    fn constant(value: &'static str) -> BoxedReducer<String, Action> {
        boxed_reducer(move |_: &Arc<String>, _: &Action| Arc::new(value.to_string()))
    }

    fn passthrough() -> BoxedReducer<String, Action> {
        boxed_reducer(|state: &Arc<String>, _: &Action| Arc::clone(state))
    }

    fn slices(entries: &[(&'static str, &str)]) -> Arc<Slices<&'static str, String>> {
        Arc::new(
            entries
                .iter()
                .map(|(k, v)| (*k, Arc::new(v.to_string())))
                .collect(),
        )
    }

    #[test]
    fn calls_every_reducer_with_its_slice() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let record = |name: &'static str| {
            let seen = Arc::clone(&seen);
            boxed_reducer(move |state: &Arc<String>, action: &Action| {
                seen.lock().unwrap().push((name, state.to_string(), *action));
                Arc::clone(state)
            })
        };

        let combined = combine_reducers([("a", record("a")), ("b", record("b"))]).unwrap();
        combined.reduce(&slices(&[("a", "A"), ("b", "B")]), &"any");

        assert_eq!(
            *seen.lock().unwrap(),
            vec![("a", "A".to_string(), "any"), ("b", "B".to_string(), "any")]
        );
    }

    #[test]
    fn fills_state_per_reducer() {
        let combined = combine_reducers([("a", constant("aaa")), ("b", constant("bbb"))]).unwrap();

        let next = combined.reduce(&Arc::new(Slices::new()), &"any");

        assert_eq!(next["a"].as_str(), "aaa");
        assert_eq!(next["b"].as_str(), "bbb");
    }

    #[test]
    fn keeps_state_identity_when_nothing_changed() {
        let combined = combine_reducers([("a", passthrough()), ("b", passthrough())]).unwrap();
        let state = slices(&[("a", "A"), ("b", "B")]);

        let next = combined.reduce(&state, &"any");

        assert!(Arc::ptr_eq(&state, &next));
    }

    #[test]
    fn second_pass_over_fresh_slices_is_stable() {
        let first_call = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&first_call);
        let once = boxed_reducer(move |state: &Arc<String>, _: &Action| {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                Arc::new("aaa".to_string())
            } else {
                Arc::clone(state)
            }
        });
        let combined = combine_reducers([("a", once), ("b", passthrough())]).unwrap();

        let first = combined.reduce(&Arc::new(Slices::new()), &"any");
        let second = combined.reduce(&first, &"any");

        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn constant_value_slices_are_stable_by_value() {
        let combined = combine_reducers([("a", constant("aaa")), ("b", constant("bbb"))])
            .unwrap()
            .compare_slices_by_value();

        let first = combined.reduce(&Arc::new(Slices::new()), &"any");
        let second = combined.reduce(&first, &"any");

        assert_eq!(second["a"].as_str(), "aaa");
        assert_eq!(second["b"].as_str(), "bbb");
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn constant_value_slices_rebuild_by_pointer() {
        let combined = combine_reducers([("a", constant("aaa")), ("b", constant("bbb"))]).unwrap();

        let first = combined.reduce(&Arc::new(Slices::new()), &"any");
        let second = combined.reduce(&first, &"any");

        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn value_comparison_keeps_previous_slice_handle() {
        let combined = combine_reducers([("a", constant("aaa")), ("b", constant("new"))])
            .unwrap()
            .compare_slices_by_value();
        let state = slices(&[("a", "aaa"), ("b", "old")]);

        let next = combined.reduce(&state, &"any");

        assert!(!Arc::ptr_eq(&state, &next));
        assert!(Arc::ptr_eq(&state["a"], &next["a"]));
        assert_eq!(next["b"].as_str(), "new");
    }

    #[test]
    fn unchanged_slices_keep_their_identity() {
        let combined = combine_reducers([("a", constant("new")), ("b", passthrough())]).unwrap();
        let state = slices(&[("a", "A"), ("b", "B")]);

        let next = combined.reduce(&state, &"any");

        assert!(!Arc::ptr_eq(&state, &next));
        assert_eq!(next["a"].as_str(), "new");
        assert!(Arc::ptr_eq(&state["b"], &next["b"]));
    }

    #[test]
    fn drops_unknown_keys_only_when_rebuilding() {
        let combined = combine_reducers([("a", passthrough())]).unwrap();

        let untouched = slices(&[("a", "A"), ("extra", "X")]);
        assert!(Arc::ptr_eq(&combined.reduce(&untouched, &"any"), &untouched));

        let combined = combine_reducers([("a", constant("new"))]).unwrap();
        let rebuilt = combined.reduce(&untouched, &"any");
        assert_eq!(rebuilt.keys().copied().collect::<Vec<_>>(), vec!["a"]);
    }

    #[test]
    fn missing_slice_counts_as_change() {
        let combined = combine_reducers([("a", passthrough()), ("b", passthrough())]).unwrap();
        let state = slices(&[("a", "A")]);

        let next = combined.reduce(&state, &"any");

        assert!(!Arc::ptr_eq(&state, &next));
        assert_eq!(next["b"].as_str(), "");
        assert!(Arc::ptr_eq(&state["a"], &next["a"]));
    }

    #[test]
    fn rejects_duplicate_keys() {
        let err = combine_reducers([("a", passthrough()), ("a", passthrough())]).unwrap_err();

        assert_eq!(
            err,
            Error::DuplicateSlice {
                key: "\"a\"".to_string()
            }
        );
    }

    #[test]
    fn builder_lists_keys_in_reduce_order() {
        let combined = CombinedReducer::<_, String, Action>::new()
            .slice("zeta", passthrough())
            .and_then(|c| c.slice("alpha", passthrough()))
            .unwrap();

        assert_eq!(combined.len(), 2);
        assert_eq!(combined.keys().copied().collect::<Vec<_>>(), vec!["alpha", "zeta"]);
        assert_eq!(format!("{combined:?}"), "CombinedReducer { slices: [\"alpha\", \"zeta\"] }");
    }
}
