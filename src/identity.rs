//! Shallow identity comparison.
//!
//! Change detection in stores and selectors never looks inside a value. Shared
//! handles (`Arc`, `Rc`, references) compare by pointer, scalars and strings
//! compare by value, and containers of those compare element by element.

use std::rc::Rc;
use std::sync::Arc;

/// Shallow "is this the same value" check used for memoization.
///
/// References, `&str` included, compare by address: two `&str` with equal
/// contents but different buffers are not identical, and a getter returning
/// them forces a recompute. Owned `String`s compare by contents. Return a
/// `String` (or an `Arc<str>` you keep around) from getters whose text is
/// rebuilt on every call.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use unistate::Identical;
///
/// let a = Arc::new(vec![1, 2, 3]);
/// let b = Arc::new(vec![1, 2, 3]);
///
/// assert!(a.identical(&Arc::clone(&a)));
/// // Equal contents, different allocation.
/// assert!(!a.identical(&b));
/// ```
pub trait Identical {
    /// Returns `true` when `self` and `other` are the same value.
    fn identical(&self, other: &Self) -> bool;
}

impl<T: ?Sized> Identical for Arc<T> {
    fn identical(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other)
    }
}

impl<T: ?Sized> Identical for Rc<T> {
    fn identical(&self, other: &Self) -> bool {
        Rc::ptr_eq(self, other)
    }
}

impl<T: ?Sized> Identical for &T {
    fn identical(&self, other: &Self) -> bool {
        std::ptr::eq(*self, *other)
    }
}

macro_rules! identical_by_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Identical for $ty {
                #[inline]
                fn identical(&self, other: &Self) -> bool {
                    self == other
                }
            }
        )*
    };
}

identical_by_value!(
    (),
    bool,
    char,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    f32,
    f64,
    String,
);

impl<T: Identical> Identical for Option<T> {
    fn identical(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => a.identical(b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<T: Identical> Identical for Vec<T> {
    fn identical(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other).all(|(a, b)| a.identical(b))
    }
}

macro_rules! identical_tuple {
    ($($name:ident : $idx:tt),+) => {
        impl<$($name: Identical),+> Identical for ($($name,)+) {
            fn identical(&self, other: &Self) -> bool {
                $(self.$idx.identical(&other.$idx))&&+
            }
        }
    };
}

identical_tuple!(A: 0);
identical_tuple!(A: 0, B: 1);
identical_tuple!(A: 0, B: 1, C: 2);
identical_tuple!(A: 0, B: 1, C: 2, D: 3);
identical_tuple!(A: 0, B: 1, C: 2, D: 3, E: 4);
identical_tuple!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5);
identical_tuple!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6);
identical_tuple!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7);
