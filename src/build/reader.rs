use std::io::{self, Read};

use crate::Sequence;

/// Chunk size used by [`reader`].
pub const DEFAULT_CHUNK_SIZE: usize = 8 * 1024;

/// Reads an [`io::Read`] in chunks. Created by [`reader`].
///
/// Each element is the outcome of one successful `read` call: the bytes it
/// returned, or the error it failed with. Production ends at end of input,
/// after the first error, or when the visitor stops. Interrupted reads are
/// retried.
///
/// The reader is not rewound, so a later traversal picks up where the
/// previous one stopped.
#[derive(Debug)]
pub struct Reader<R> {
    inner: R,
    chunk_size: usize,
}

/// Create a sequence of byte chunks read from `inner`.
///
/// ```rust
/// use seqflow::prelude::*;
///
/// let chunks = reader(&b"hello world"[..]).with_chunk_size(4);
/// let bytes: Vec<u8> = collect(chunks).into_iter().flatten().flatten().collect();
/// assert_eq!(bytes, b"hello world");
/// ```
pub fn reader<R: Read>(inner: R) -> Reader<R> {
    Reader {
        inner,
        chunk_size: DEFAULT_CHUNK_SIZE,
    }
}

impl<R> Reader<R> {
    /// Upper bound on the length of each chunk. Values below 1 are raised to 1.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Sequence for Reader<R> {
    type Item = io::Result<Vec<u8>>;

    fn produce(&mut self, visit: &mut dyn FnMut(io::Result<Vec<u8>>) -> bool) {
        let mut buf = vec![0; self.chunk_size];
        loop {
            match self.inner.read(&mut buf) {
                Ok(0) => return,
                Ok(n) => {
                    if !visit(Ok(buf[..n].to_vec())) {
                        return;
                    }
                }
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => {
                    tracing::debug!(error = %err, "reader failed");
                    visit(Err(err));
                    return;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reducers::{collect, length};

    struct Flaky {
        calls: usize,
    }

    impl Read for Flaky {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.calls += 1;
            match self.calls {
                1 => Err(io::ErrorKind::Interrupted.into()),
                2 => {
                    buf[0] = b'x';
                    Ok(1)
                }
                _ => Err(io::Error::other("disk on fire")),
            }
        }
    }

    #[test]
    fn test_reader_splits_into_chunks() {
        let chunks: Vec<Vec<u8>> = collect(reader(&b"abcdefg"[..]).with_chunk_size(3))
            .into_iter()
            .map(Result::unwrap)
            .collect();
        assert_eq!(chunks, vec![b"abc".to_vec(), b"def".to_vec(), b"g".to_vec()]);
    }

    #[test]
    fn test_reader_empty_input() {
        assert_eq!(length(reader(io::empty())), 0);
    }

    #[test]
    fn test_reader_retries_interrupted_and_stops_after_error() {
        let chunks = collect(reader(Flaky { calls: 0 }));
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].as_ref().unwrap(), b"x");
        assert_eq!(chunks[1].as_ref().unwrap_err().to_string(), "disk on fire");
    }

    #[test]
    fn test_reader_resumes_where_it_stopped() {
        let mut chunks = reader(&b"abcd"[..]).with_chunk_size(1);
        assert_eq!(collect((&mut chunks).take(2)).len(), 2);
        let rest: Vec<u8> = collect(&mut chunks).into_iter().flatten().flatten().collect();
        assert_eq!(rest, b"cd");
    }
}
