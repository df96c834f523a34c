//! Reducer-driven state containers.
//!
//! A [`Store`] holds one immutable state value and swaps it for whatever its
//! [`Reducer`] returns on each dispatched action. [`combine_reducers`] builds
//! a reducer over a map of named slices out of one reducer per slice; the
//! result is itself a reducer, so it plugs into a store or into another
//! combination.

mod combine;
mod reducer;
mod store;

pub use combine::{combine_reducers, CombinedReducer, Slices};
pub use reducer::{boxed_reducer, BoxedReducer, Reducer};
pub use store::{create_store, Store};
