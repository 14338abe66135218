use std::io;

use super::{Hole, Transducer};
use crate::Sequence;

/// Writes every chunk to an [`io::Write`] and emits the outcome.
///
/// Each chunk is written in full with `write_all`, so a successful element
/// is always the chunk's length. A failed write does not stop the sequence;
/// stop on the first `Err` downstream if that is wanted.
#[derive(Debug, Clone)]
pub struct WriteTo<S, W> {
    seq: S,
    writer: W,
}

/// Create a transducer that writes each byte chunk to `writer`.
///
/// ```rust
/// use seqflow::prelude::*;
///
/// let mut out = Vec::new();
/// let written = collect(write(&mut out).apply(values(["ab", "cde"])));
/// assert_eq!(written.into_iter().map(Result::unwrap).sum::<usize>(), 5);
/// assert_eq!(out, b"abcde");
/// ```
pub fn write<W: io::Write>(writer: W) -> WriteTo<Hole, W> {
    WriteTo { seq: Hole, writer }
}

impl<S, W> WriteTo<S, W> {
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<S, W> Sequence for WriteTo<S, W>
where
    S: Sequence,
    S::Item: AsRef<[u8]>,
    W: io::Write,
{
    type Item = io::Result<usize>;

    fn produce(&mut self, visit: &mut dyn FnMut(io::Result<usize>) -> bool) {
        let writer = &mut self.writer;
        self.seq.produce(&mut |chunk| {
            let chunk = chunk.as_ref();
            visit(writer.write_all(chunk).map(|()| chunk.len()))
        })
    }
}

impl<S, W> Transducer<S> for WriteTo<Hole, W>
where
    S: Sequence,
    S::Item: AsRef<[u8]>,
    W: io::Write,
{
    type Output = WriteTo<S, W>;

    fn apply(self, seq: S) -> WriteTo<S, W> {
        WriteTo {
            seq,
            writer: self.writer,
        }
    }
}
