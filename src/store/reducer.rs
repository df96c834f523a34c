use std::sync::Arc;

/// A pure transition from the current state and an action to the next state.
///
/// Returning `Arc::clone(state)` signals that nothing changed; stores and
/// combined reducers detect change by pointer identity, never by comparing
/// contents.
///
/// Any `Fn(&Arc<S>, &A) -> Arc<S>` is a reducer.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use unistate::Reducer;
///
/// let counter = |state: &Arc<i32>, action: &&str| match *action {
///     "increment" => Arc::new(**state + 1),
///     _ => Arc::clone(state),
/// };
///
/// let state = Arc::new(1);
/// assert_eq!(*counter.reduce(&state, &"increment"), 2);
/// assert!(Arc::ptr_eq(&counter.reduce(&state, &"noop"), &state));
/// ```
pub trait Reducer<S, A> {
    /// Compute the next state.
    fn reduce(&self, state: &Arc<S>, action: &A) -> Arc<S>;
}

impl<S, A, F> Reducer<S, A> for F
where
    F: Fn(&Arc<S>, &A) -> Arc<S>,
{
    fn reduce(&self, state: &Arc<S>, action: &A) -> Arc<S> {
        self(state, action)
    }
}

/// A type-erased reducer, handy for collections of different closures.
pub type BoxedReducer<S, A> = Box<dyn Fn(&Arc<S>, &A) -> Arc<S> + Send + Sync>;

/// Erase the concrete type of a reducer.
pub fn boxed_reducer<S, A, R>(reducer: R) -> BoxedReducer<S, A>
where
    R: Reducer<S, A> + Send + Sync + 'static,
{
    Box::new(move |state: &Arc<S>, action: &A| reducer.reduce(state, action))
}
