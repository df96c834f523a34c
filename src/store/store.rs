use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use super::reducer::Reducer;

/// A state container driven by a reducer.
///
/// The store owns the current state as an `Arc<S>` and replaces it wholesale
/// on every [`dispatch`](Store::dispatch). Clones share the same state, so a
/// clone can be captured by selector getters while another drives updates.
///
/// Dispatch reads the state, runs the reducer without holding any lock, then
/// writes the result back. Dispatching from inside a reducer is therefore not
/// a deadlock, but the outer dispatch overwrites whatever the inner one wrote;
/// callers must not rely on it. Concurrent dispatches from several threads
/// may lose updates and must be serialized by the caller.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use unistate::create_store;
///
/// let store = create_store(
///     |count: &Arc<i64>, delta: &i64| Arc::new(**count + delta),
///     0_i64,
/// );
///
/// store.dispatch(5);
/// store.dispatch(-2);
/// assert_eq!(*store.state(), 3);
/// ```
pub struct Store<S, A> {
    state: Arc<RwLock<Arc<S>>>,
    reducer: Arc<dyn Reducer<S, A> + Send + Sync>,
}

impl<S, A> Store<S, A> {
    /// Create a new store with the given reducer and initial state.
    ///
    /// Passing an existing `Arc` keeps its identity: `state()` returns that
    /// same pointer until the first change.
    pub fn new<R>(reducer: R, initial: impl Into<Arc<S>>) -> Self
    where
        R: Reducer<S, A> + Send + Sync + 'static,
    {
        Self {
            state: Arc::new(RwLock::new(initial.into())),
            reducer: Arc::new(reducer),
        }
    }

    /// Get the current state.
    pub fn state(&self) -> Arc<S> {
        Arc::clone(&self.state.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Read state without cloning the handle.
    pub fn read<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&S) -> T,
    {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        f(&state)
    }

    /// Run the reducer over the current state and store its result.
    pub fn dispatch(&self, action: A) {
        let current = self.state();
        let next = self.reducer.reduce(&current, &action);
        let changed = !Arc::ptr_eq(&current, &next);

        *self.state.write().unwrap_or_else(PoisonError::into_inner) = next;
        tracing::trace!(changed, "action dispatched");
    }
}

/// Create a store from a reducer and an initial state.
///
/// Shorthand for [`Store::new`].
pub fn create_store<S, A, R>(reducer: R, initial: impl Into<Arc<S>>) -> Store<S, A>
where
    R: Reducer<S, A> + Send + Sync + 'static,
{
    Store::new(reducer, initial)
}

impl<S, A> Clone for Store<S, A> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            reducer: Arc::clone(&self.reducer),
        }
    }
}

impl<S: fmt::Debug, A> fmt::Debug for Store<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.read(|state| f.debug_struct("Store").field("state", state).finish())
    }
}
