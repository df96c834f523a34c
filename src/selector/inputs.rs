use crate::identity::Identical;

/// A zero-argument getter a selector can read from.
///
/// Every `Fn() -> T` is a `Select`, and so is every
/// [`Selector`](crate::Selector), which lets selectors feed other selectors.
pub trait Select {
    type Output;

    fn select(&self) -> Self::Output;
}

impl<F, T> Select for F
where
    F: Fn() -> T,
{
    type Output = T;

    fn select(&self) -> T {
        self()
    }
}

/// An ordered group of getters evaluated together.
///
/// Implemented for tuples of up to eight [`Select`]ors (heterogeneous
/// outputs, handed to the combine function as a tuple) and for `Vec`s of one
/// getter type (homogeneous outputs, handed over as a `Vec`).
pub trait Inputs {
    /// Current values of all getters, in order.
    type Values: Identical;

    /// Evaluate every getter once, first to last.
    fn select_all(&self) -> Self::Values;
}

impl Inputs for () {
    type Values = ();

    fn select_all(&self) -> Self::Values {}
}

impl<S> Inputs for Vec<S>
where
    S: Select,
    S::Output: Identical,
{
    type Values = Vec<S::Output>;

    fn select_all(&self) -> Self::Values {
        self.iter().map(Select::select).collect()
    }
}

macro_rules! tuple_inputs {
    ($($name:ident : $idx:tt),+) => {
        impl<$($name),+> Inputs for ($($name,)+)
        where
            $($name: Select, <$name as Select>::Output: Identical,)+
        {
            type Values = ($(<$name as Select>::Output,)+);

            fn select_all(&self) -> Self::Values {
                ($(self.$idx.select(),)+)
            }
        }
    };
}

tuple_inputs!(A: 0);
tuple_inputs!(A: 0, B: 1);
tuple_inputs!(A: 0, B: 1, C: 2);
tuple_inputs!(A: 0, B: 1, C: 2, D: 3);
tuple_inputs!(A: 0, B: 1, C: 2, D: 3, E: 4);
tuple_inputs!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5);
tuple_inputs!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6);
tuple_inputs!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7);
