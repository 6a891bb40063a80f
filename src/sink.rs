//! The append-only output buffer.

use std::mem;

/// Append-only byte buffer that collects the output of one encoding operation.
///
/// A sink starts empty, grows only at its end, and is closed by [`finalize`](Self::finalize),
/// which consumes it. There is no way to rewind, truncate, or overwrite bytes once appended.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ByteSink {
    buf: Vec<u8>,
}

impl ByteSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Create an empty sink with room for `capacity` bytes before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Continue appending after the contents of an existing vector.
    pub fn from_vec(buf: Vec<u8>) -> Self {
        Self { buf }
    }

    pub fn push(&mut self, byte: u8) {
        self.buf.push(byte);
    }

    pub fn append(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Close the sink and hand back everything written to it.
    pub fn finalize(self) -> Vec<u8> {
        self.buf
    }

    /// Swap in a fresh buffer, returning the current one. Used while a sequence of unknown length
    /// is being written, so its count can be placed ahead of its contents.
    pub(crate) fn take(&mut self) -> Vec<u8> {
        mem::take(&mut self.buf)
    }

    /// Put back a buffer from [`take`](Self::take), returning the bytes written in the meantime.
    pub(crate) fn restore(&mut self, buf: Vec<u8>) -> Vec<u8> {
        mem::replace(&mut self.buf, buf)
    }
}

impl std::io::Write for ByteSink {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.append(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn append_in_order() {
        let mut sink = ByteSink::new();
        assert!(sink.is_empty());
        sink.push(1);
        sink.append(&[2, 3]);
        sink.append(&[]);
        sink.push(4);
        assert_eq!(sink.len(), 4);
        assert_eq!(sink.as_bytes(), &[1, 2, 3, 4]);
        assert_eq!(sink.finalize(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn continues_existing() {
        let mut sink = ByteSink::from_vec(vec![0xAA]);
        sink.push(0xBB);
        assert_eq!(sink.finalize(), vec![0xAA, 0xBB]);
    }

    #[test]
    fn take_and_restore() {
        let mut sink = ByteSink::with_capacity(8);
        sink.push(1);
        let outer = sink.take();
        assert!(sink.is_empty());
        sink.append(&[7, 8]);
        let inner = sink.restore(outer);
        assert_eq!(inner, vec![7, 8]);
        assert_eq!(sink.as_bytes(), &[1]);
    }

    #[test]
    fn io_write() {
        use std::io::Write;
        let mut sink = ByteSink::new();
        write!(sink, "n={}", 4).unwrap();
        sink.flush().unwrap();
        assert_eq!(sink.finalize(), b"n=4".to_vec());
    }
}
