//! Wiring a source, a transducer and a reducer into one pipeline.
//!
//! [`transduce`] is the single entry point; [`compose`], [`compose3`],
//! [`partial`] and [`partial3`] reshape ordinary functions into the one-argument form that
//! reducers and transducers take.
//!
//! ```rust
//! use seqflow::prelude::*;
//!
//! let top = transduce(naturals(), chain(take(5), map(|x: u64| x + 1)), max);
//! assert_eq!(top, Some(5));
//!
//! let fourth = transduce(values(["a", "b", "c", "d"]), identity(), partial(index, 3));
//! assert_eq!(fourth, Some("d"));
//! ```

use crate::{transducers::Transducer, Sequence};

/// Apply `transducer` to `source` and drain the result with `reducer`.
pub fn transduce<S, T, R, V>(source: S, transducer: T, reducer: R) -> V
where
    S: Sequence,
    T: Transducer<S>,
    R: FnOnce(T::Output) -> V,
{
    reducer(transducer.apply(source))
}

/// `x -> g(f(x))`: run `f`, then `g`.
pub fn compose<A, B, C, F, G>(f: F, g: G) -> impl FnOnce(A) -> C
where
    F: FnOnce(A) -> B,
    G: FnOnce(B) -> C,
{
    move |a| g(f(a))
}

/// `x -> h(g(f(x)))`.
pub fn compose3<A, B, C, D, F, G, H>(f: F, g: G, h: H) -> impl FnOnce(A) -> D
where
    F: FnOnce(A) -> B,
    G: FnOnce(B) -> C,
    H: FnOnce(C) -> D,
{
    move |a| h(g(f(a)))
}

/// Bind the trailing argument of a two-argument function.
pub fn partial<A, B, R, F>(f: F, b: B) -> impl FnOnce(A) -> R
where
    F: FnOnce(A, B) -> R,
{
    move |a| f(a, b)
}

/// Bind the two trailing arguments of a three-argument function.
pub fn partial3<A, B, C, R, F>(f: F, b: B, c: C) -> impl FnOnce(A) -> R
where
    F: FnOnce(A, B, C) -> R,
{
    move |a| f(a, b, c)
}
