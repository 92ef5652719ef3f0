//! Owned, growable record buffer.
//!
//! A [`Record`] is one streaming unit: conventionally a text line with an
//! optional trailing terminator (`\n`, or `\0` for NUL-terminated find
//! output). Exactly one record is in flight at a time; sources refill it in
//! place, map stages rewrite it in place, and filters and sinks only read
//! it. The buffer grows by capacity doubling and is never shrunk, so a long
//! line early in a stream pays its allocation cost once.

/// One streaming record: an owned byte buffer with explicit growth.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    buf: Vec<u8>,
}

impl Record {
    pub fn new() -> Self {
        Record { buf: Vec::new() }
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        Record {
            buf: bytes.to_vec(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.buf
    }

    /// Raw buffer access for sources that refill the record via
    /// `BufRead::read_until`. Callers clear the record first.
    pub fn buf_mut(&mut self) -> &mut Vec<u8> {
        &mut self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn clear(&mut self) {
        self.buf.clear();
    }

    pub fn truncate(&mut self, len: usize) {
        self.buf.truncate(len);
    }

    pub fn push(&mut self, byte: u8) {
        self.buf.push(byte);
    }

    /// The trailing terminator byte, if the record carries one.
    pub fn terminator(&self) -> Option<u8> {
        match self.buf.last() {
            Some(&b @ (b'\n' | b'\0')) => Some(b),
            _ => None,
        }
    }

    /// Record content without its trailing terminator.
    pub fn content(&self) -> &[u8] {
        match self.terminator() {
            Some(_) => &self.buf[..self.buf.len() - 1],
            None => &self.buf,
        }
    }

    /// Replace the whole record, growing the buffer by doubling when the
    /// new content does not fit the current capacity.
    pub fn set_content(&mut self, bytes: &[u8]) {
        self.buf.clear();
        self.grow_to(bytes.len());
        self.buf.extend_from_slice(bytes);
    }

    fn grow_to(&mut self, need: usize) {
        let mut cap = self.buf.capacity();
        if cap >= need {
            return;
        }
        if cap == 0 {
            cap = 64;
        }
        while cap < need {
            cap *= 2;
        }
        self.buf.reserve_exact(cap - self.buf.len());
    }
}

impl From<&str> for Record {
    fn from(s: &str) -> Self {
        Record::from_bytes(s.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminator_newline() {
        let r = Record::from("hello\n");
        assert_eq!(r.terminator(), Some(b'\n'));
        assert_eq!(r.content(), b"hello");
    }

    #[test]
    fn test_terminator_nul() {
        let r = Record::from_bytes(b"path\0");
        assert_eq!(r.terminator(), Some(b'\0'));
        assert_eq!(r.content(), b"path");
    }

    #[test]
    fn test_no_terminator() {
        let r = Record::from("hello");
        assert_eq!(r.terminator(), None);
        assert_eq!(r.content(), b"hello");
    }

    #[test]
    fn test_empty_record() {
        let r = Record::new();
        assert!(r.is_empty());
        assert_eq!(r.terminator(), None);
        assert_eq!(r.content(), b"");
    }

    #[test]
    fn test_set_content_doubles_capacity() {
        let mut r = Record::new();
        r.set_content(b"ab");
        let cap = r.buf.capacity();
        assert!(cap >= 2);
        // Growing past capacity at least doubles it.
        let big = vec![b'x'; cap + 1];
        r.set_content(&big);
        assert!(r.buf.capacity() >= cap * 2);
        assert_eq!(r.as_bytes(), &big[..]);
    }

    #[test]
    fn test_set_content_within_capacity_keeps_buffer() {
        let mut r = Record::new();
        r.set_content(b"a long enough line\n");
        let cap = r.buf.capacity();
        r.set_content(b"short\n");
        assert_eq!(r.buf.capacity(), cap);
        assert_eq!(r.as_bytes(), b"short\n");
    }
}
