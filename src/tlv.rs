use std::fmt::Write;

use crate::error::{Field, PixError, PixResult};

/// Largest value a 2 digit length prefix can declare
pub const MAX_VALUE_LEN: usize = 99;

/// Length of the `TAG` + `LENGTH` header
pub const HEADER_LEN: usize = 4;

// Field writer
//------------------------------------------------------------------------------

#[derive(Debug, Default, Clone)]
pub struct TlvWriter {
    buf: String,
}

impl TlvWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    /// Appends already serialized fields verbatim
    pub fn push_raw(&mut self, raw: &str) -> &mut Self {
        self.buf.push_str(raw);
        self
    }

    pub fn push(&mut self, tag: u8, value: &str) -> PixResult<&mut Self> {
        debug_assert!(tag < 100, "Tag must fit in 2 digits: {tag}");

        let len = value.len();
        if len > MAX_VALUE_LEN {
            return Err(PixError::FieldTooLong { field: Field::Tag(tag), len, max: MAX_VALUE_LEN });
        }

        // Writing to a String is infallible
        let _ = write!(self.buf, "{tag:02}{len:02}{value}");
        Ok(self)
    }

    /// Wraps the fields of `inner` as the value of a composite field
    pub fn push_nested(&mut self, tag: u8, inner: &TlvWriter) -> PixResult<&mut Self> {
        self.push(tag, inner.as_str())
    }

    pub fn finish(self) -> String {
        self.buf
    }
}

// Field iterator
//------------------------------------------------------------------------------

/// Iterates over `(tag, value)` pairs of serialized fields. Yields an error and
/// stops if a header is truncated, non-numeric or declares more bytes than remain.
pub struct TlvIter<'a> {
    rest: &'a str,
    failed: bool,
}

impl<'a> TlvIter<'a> {
    pub fn new(data: &'a str) -> Self {
        Self { rest: data, failed: false }
    }

    fn parse_header(header: &str) -> Option<(u8, usize)> {
        if !header.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let tag = header[..2].parse().ok()?;
        let len = header[2..].parse().ok()?;
        Some((tag, len))
    }

    fn fail(&mut self, reason: &'static str) -> Option<PixResult<(u8, &'a str)>> {
        self.failed = true;
        Some(Err(PixError::MalformedPayload(reason)))
    }
}

impl<'a> Iterator for TlvIter<'a> {
    type Item = PixResult<(u8, &'a str)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.rest.is_empty() {
            return None;
        }
        if self.rest.len() < HEADER_LEN || !self.rest.is_char_boundary(HEADER_LEN) {
            return self.fail("truncated field header");
        }

        let Some((tag, len)) = Self::parse_header(&self.rest[..HEADER_LEN]) else {
            return self.fail("non-numeric field header");
        };

        let end = HEADER_LEN + len;
        if self.rest.len() < end || !self.rest.is_char_boundary(end) {
            return self.fail("field length exceeds remaining data");
        }

        let value = &self.rest[HEADER_LEN..end];
        self.rest = &self.rest[end..];
        Some(Ok((tag, value)))
    }
}

#[cfg(test)]
mod tlv_tests {
    use test_case::test_case;

    use super::{TlvIter, TlvWriter, MAX_VALUE_LEN};
    use crate::error::{Field, PixError};

    #[test]
    fn test_push() {
        let mut w = TlvWriter::new();
        w.push(59, "John Doe").unwrap().push(60, "Sample City").unwrap();
        assert_eq!(w.as_str(), "5908John Doe6011Sample City");
    }

    #[test]
    fn test_push_empty_value() {
        let mut w = TlvWriter::new();
        w.push(5, "").unwrap();
        assert_eq!(w.finish(), "0500");
    }

    #[test]
    fn test_push_nested() {
        let mut inner = TlvWriter::new();
        inner.push(5, "STORE01").unwrap();
        let mut outer = TlvWriter::new();
        outer.push_nested(62, &inner).unwrap();
        assert_eq!(outer.as_str(), "62110507STORE01");
    }

    #[test]
    fn test_length_counts_bytes() {
        let mut w = TlvWriter::new();
        w.push(60, "São Paulo").unwrap();
        assert_eq!(w.as_str(), "6010São Paulo");
    }

    #[test_case(MAX_VALUE_LEN, true; "at capacity")]
    #[test_case(MAX_VALUE_LEN + 1, false; "over capacity")]
    fn test_capacity(len: usize, ok: bool) {
        let value = "x".repeat(len);
        let mut w = TlvWriter::new();
        let res = w.push(1, &value).map(|_| ());
        match res {
            Ok(()) => assert!(ok),
            Err(PixError::FieldTooLong { field, len: l, max }) => {
                assert!(!ok);
                assert_eq!(field, Field::Tag(1));
                assert_eq!(l, len);
                assert_eq!(max, MAX_VALUE_LEN);
            }
            Err(e) => panic!("Unexpected error: {e}"),
        }
        if !ok {
            assert!(w.is_empty());
        }
    }

    #[test]
    fn test_iter() {
        let fields = TlvIter::new("000201540510.505802BR").collect::<Result<Vec<_>, _>>().unwrap();
        assert_eq!(fields, vec![(0, "01"), (54, "10.50"), (58, "BR")]);
    }

    #[test_case("00"; "truncated header")]
    #[test_case("0A0201"; "non-numeric header")]
    #[test_case("000501"; "value overruns data")]
    fn test_iter_malformed(data: &str) {
        let mut iter = TlvIter::new(data);
        assert!(matches!(iter.next(), Some(Err(PixError::MalformedPayload(_)))));
        assert!(iter.next().is_none());
    }
}
