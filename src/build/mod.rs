//! Building sequences from scratch
//!
//! This module provides the sources pipelines start from: in-memory
//! collections, generator-style infinite producers, external queues and byte
//! readers.

mod collections;
mod generators;
mod queue;
mod reader;

// Re-export building blocks
pub use collections::{
    empty, from_iter, from_slice, once, values, Empty, FromIter, FromSlice, Once, Values,
};
pub use generators::{
    forever, generate, naturals, shuffle, shuffle_seeded, ticker, Forever, Generate, Naturals,
    Shuffle, Ticker,
};
pub use queue::{queue, Queue};
pub use reader::{reader, Reader, DEFAULT_CHUNK_SIZE};
