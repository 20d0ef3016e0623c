/// A growable byte buffer the renderer writes into.
///
/// Positions are byte offsets from the start of the buffer. The renderer only
/// ever appends, so the position after an append is never smaller than before.
pub trait Sink {
    /// Append `bytes` to the end of the buffer.
    fn append(&mut self, bytes: &[u8]);

    /// Current end of the buffer, i.e. where the next append lands.
    fn position(&self) -> usize;

    /// Hint that `additional` more bytes are about to be appended.
    fn reserve(&mut self, additional: usize) {
        let _ = additional;
    }
}

impl Sink for Vec<u8> {
    fn append(&mut self, bytes: &[u8]) {
        self.extend_from_slice(bytes);
    }

    fn position(&self) -> usize {
        self.len()
    }

    fn reserve(&mut self, additional: usize) {
        Vec::reserve(self, additional);
    }
}

#[cfg(feature = "bytes")]
impl Sink for bytes::BytesMut {
    fn append(&mut self, bytes: &[u8]) {
        self.extend_from_slice(bytes);
    }

    fn position(&self) -> usize {
        self.len()
    }

    fn reserve(&mut self, additional: usize) {
        bytes::BytesMut::reserve(self, additional);
    }
}
