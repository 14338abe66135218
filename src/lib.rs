//! # Seqflow: Lazy Push Sequences
//!
//! Describe a stream of values once, transform it with composable
//! transducers, and drain it with a reducer. Nothing is computed until a
//! reducer asks, and nothing more is computed once it stops asking.
//!
//! ## Core Traits
//!
//! - **[`Sequence`]**: Produces values in order by calling a visitor that can stop production
//! - **[`KeyedSequence`]**: Produces key/value pairs the same way
//! - **[`Transducer`](transducers::Transducer)**: Maps one sequence to another
//!
//! ## Key Features
//!
//! - **Lazy**: Infinite sources such as [`naturals`](build::naturals) are fine as long as something downstream stops
//! - **Composable**: Chain adapters with methods (`.map()`, `.take()`) or build transducers up front with [`chain`](transducers::chain)
//! - **Pullable**: Turn any sequence into an iterator with [`pull`](pull::pull)
//! - **Observable**: Broadcast updates between threads with [`Observable`](observable::Observable), itself a sequence
//!
//! ## Example
//!
//! ```
//! use seqflow::prelude::*;
//!
//! // Squares of the odd numbers, first three of them
//! let squares = naturals()
//!     .filter(|x| x % 2 == 1)
//!     .map(|x| x * x)
//!     .take(3);
//! assert_eq!(collect(squares), vec![1, 9, 25]);
//!
//! // The same pipeline through the single entry point
//! let top = transduce(naturals(), chain(take(5), map(|x: u64| x + 1)), max);
//! assert_eq!(top, Some(5));
//! ```
//!
//! ## Common Functions
//!
//! **Sources:**
//! - [`values(items)`](build::values) - Owned collection, re-producible
//! - [`naturals()`](build::naturals) - `0, 1, 2, ...`
//! - [`generate(f)`](build::generate) - Infinite calls to `f`
//! - [`queue(receiver)`](build::queue) - Drain a channel
//! - [`reader(r)`](build::reader) - Byte chunks from an `io::Read`
//!
//! **Reducers:**
//! - [`collect`](reducers::collect), [`reduce`](reducers::reduce), [`first`](reducers::first), [`max`](reducers::max), [`any`](reducers::any), ...
//!
//! **Bridges:**
//! - [`pull(seq)`](pull::pull) - Element-at-a-time access on a worker thread
//! - [`observe(value)`](observable::observe) - Shared cell broadcasting its updates

pub mod build;
pub mod observable;
pub mod prelude;
pub mod pull;
pub mod reducers;
pub mod transduce;
pub mod transducers;

mod keyed;
mod sequence;

pub use keyed::*;
pub use sequence::*;
