use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use super::inputs::{Inputs, Select};
use crate::identity::Identical;

struct Cached<V, R> {
    values: V,
    result: Arc<R>,
}

/// A memoized value derived from a group of getters.
///
/// Each [`get`](Selector::get) evaluates every input getter and compares the
/// values with those seen on the previous call using [`Identical`]. The
/// combine function only runs when something differs; otherwise the previous
/// result is returned as the very same `Arc`. Only the immediately preceding
/// inputs are remembered.
///
/// Clones share one cache.
pub struct Selector<I: Inputs, R> {
    inputs: Arc<I>,
    combine: Arc<dyn Fn(&I::Values) -> R + Send + Sync>,
    cache: Arc<Mutex<Option<Cached<I::Values, R>>>>,
    recomputations: Arc<AtomicUsize>,
}

impl<I: Inputs, R> Selector<I, R> {
    /// Create a new selector over `inputs`.
    pub fn new<F>(inputs: I, combine: F) -> Self
    where
        F: Fn(&I::Values) -> R + Send + Sync + 'static,
    {
        Self {
            inputs: Arc::new(inputs),
            combine: Arc::new(combine),
            cache: Arc::new(Mutex::new(None)),
            recomputations: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Get the current value, recomputing only if an input changed.
    ///
    /// No lock is held while the getters or the combine function run. If
    /// either panics, the cache keeps its previous contents.
    pub fn get(&self) -> Arc<R> {
        let values = self.inputs.select_all();

        if let Some(cached) = self.lock().as_ref() {
            if cached.values.identical(&values) {
                tracing::trace!("selector inputs unchanged, reusing result");
                return Arc::clone(&cached.result);
            }
        }

        let result = Arc::new((self.combine)(&values));
        let recomputations = self.recomputations.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::trace!(recomputations, "selector recomputed");

        *self.lock() = Some(Cached {
            values,
            result: Arc::clone(&result),
        });
        result
    }

    /// How many times the combine function has run.
    pub fn recomputations(&self) -> usize {
        self.recomputations.load(Ordering::SeqCst)
    }

    /// Forget the cached inputs and result; the next `get` recomputes.
    pub fn reset(&self) {
        *self.lock() = None;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<Cached<I::Values, R>>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Create a memoized selector.
///
/// `inputs` is a tuple of getters (closures or other selectors) or a `Vec`
/// of getters of one type. `combine` receives their current values
/// positionally.
///
/// # Example
///
/// ```
/// use unistate::create_selector;
///
/// let select_a = || "a";
/// let select_b = || "b";
/// let joined = create_selector((select_a, select_b), |(a, b)| format!("{a}{b}"));
///
/// let first = joined.get();
/// assert_eq!(first.as_str(), "ab");
/// // Inputs did not change: same allocation, no recomputation.
/// assert!(std::sync::Arc::ptr_eq(&first, &joined.get()));
/// assert_eq!(joined.recomputations(), 1);
/// ```
pub fn create_selector<I, R, F>(inputs: I, combine: F) -> Selector<I, R>
where
    I: Inputs,
    F: Fn(&I::Values) -> R + Send + Sync + 'static,
{
    Selector::new(inputs, combine)
}

impl<I: Inputs, R> Select for Selector<I, R> {
    type Output = Arc<R>;

    fn select(&self) -> Arc<R> {
        self.get()
    }
}

impl<I: Inputs, R> Clone for Selector<I, R> {
    fn clone(&self) -> Self {
        Self {
            inputs: Arc::clone(&self.inputs),
            combine: Arc::clone(&self.combine),
            cache: Arc::clone(&self.cache),
            recomputations: Arc::clone(&self.recomputations),
        }
    }
}

impl<I: Inputs, R> fmt::Debug for Selector<I, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Selector")
            .field("cached", &self.lock().is_some())
            .field("recomputations", &self.recomputations())
            .finish()
    }
}
