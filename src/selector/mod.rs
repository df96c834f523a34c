//! Memoized derived values.
//!
//! A [`Selector`] reads a group of getters and recomputes its value only when
//! one of them returns something different from the previous call.

mod inputs;
mod selector;

pub use inputs::{Inputs, Select};
pub use selector::{create_selector, Selector};
