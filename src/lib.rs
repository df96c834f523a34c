//! # Unistate
//!
//! Unidirectional state containers for Rust.
//!
//! Three independent building blocks:
//!
//! - [`create_store`] - a [`Store`] holding one immutable state value that a
//!   [`Reducer`] replaces on every dispatched action
//! - [`combine_reducers`] - one reducer built from a reducer per named slice
//!   of state; the result is itself a reducer
//! - [`create_selector`] - a memoized [`Selector`] over a group of getters,
//!   usable as a getter of another selector
//!
//! Change detection is by identity, never by deep comparison: states and
//! selector results live behind `Arc`, and an unchanged value is the same
//! pointer. See [`Identical`].
//!
//! ```
//! use std::sync::Arc;
//! use unistate::{boxed_reducer, combine_reducers, create_selector, create_store, Slices};
//!
//! enum Action {
//!     Add(u32),
//!     Rename(&'static str),
//! }
//!
//! let total = boxed_reducer(|n: &Arc<u32>, action: &Action| match action {
//!     Action::Add(k) => Arc::new(**n + k),
//!     _ => Arc::clone(n),
//! });
//! let name = boxed_reducer(|n: &Arc<u32>, action: &Action| match action {
//!     Action::Rename(s) => Arc::new(s.len() as u32),
//!     _ => Arc::clone(n),
//! });
//!
//! let store = create_store(
//!     combine_reducers([("total", total), ("name_len", name)])?,
//!     Slices::new(),
//! );
//!
//! let total = create_selector(
//!     ({
//!         let store = store.clone();
//!         move || store.state()
//!     },),
//!     |(state,)| state.get("total").map_or(0, |n| **n),
//! );
//!
//! store.dispatch(Action::Add(3));
//! store.dispatch(Action::Add(4));
//! assert_eq!(*total.get(), 7);
//! # Ok::<(), unistate::Error>(())
//! ```

mod error;
mod identity;
pub mod selector;
pub mod store;

pub use error::{Error, Result};
pub use identity::Identical;
pub use selector::{create_selector, Inputs, Select, Selector};
pub use store::{
    boxed_reducer, combine_reducers, create_store, BoxedReducer, CombinedReducer, Reducer, Slices,
    Store,
};
