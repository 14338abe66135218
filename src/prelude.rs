//! Commonly used imports
//!
//! Use `use seqflow::prelude::*;` for quick access to the most common types and functions.

// Core traits
pub use crate::keyed::{keyed, KeyedSequence, Pair};
pub use crate::Sequence;
pub use crate::transducers::Transducer;

// Sources
pub use crate::build::{
    empty, forever, from_iter, from_slice, generate, naturals, once, queue, reader, shuffle,
    shuffle_seeded, ticker, values,
};

// Transducers
pub use crate::transducers::{
    append, chain, chain3, chain4, debounce, debounce_with, dedup, delta, each, enumerate, every,
    filter, fuse, identity, map, push_back, push_front, skip, skip_while, take, take_while,
    time_delta, unique, visitor, write, zip,
};

// Reducers
pub use crate::reducers::{
    all, any, average, collect, first, for_each, frequency, index, last, length, max, min, reduce,
};

// Pipelines
pub use crate::transduce::{compose, compose3, partial, partial3, transduce};

// Pull adapter
pub use crate::pull::{pull, pull_scoped, pull_scoped_with, pull_with, PullConfig, PullHandle};

// Observable
pub use crate::observable::{
    observe, promise, try_promise, Observable, ObservableBuilder, Subscription,
};
