//! Bounded response-body accumulation.

use crate::http::HttpError;

/// Growable byte accumulator with a hard capacity limit.
///
/// A buffer lives for one request. Overrunning the limit is reported as
/// [`HttpError::CapacityExceeded`], which the pipeline treats as fatal in
/// every error-reporting mode.
#[derive(Debug)]
pub struct ResponseBuffer {
    data: Vec<u8>,
    limit: usize,
}

impl ResponseBuffer {
    pub fn with_limit(limit: usize) -> Self {
        Self {
            data: Vec::new(),
            limit,
        }
    }

    /// Append a chunk, failing if the total would exceed the limit.
    pub fn append(&mut self, chunk: &[u8]) -> Result<(), HttpError> {
        if self.data.len() + chunk.len() > self.limit {
            return Err(HttpError::CapacityExceeded { limit: self.limit });
        }
        self.data.extend_from_slice(chunk);
        Ok(())
    }

    /// Discard accumulated content, keeping the limit.
    pub fn reset(&mut self) {
        self.data.clear();
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Drain the buffer, returning its content as a string.
    ///
    /// Bodies are not guaranteed to be UTF-8; invalid sequences are replaced
    /// rather than rejected.
    pub fn take_string(&mut self) -> String {
        let data = std::mem::take(&mut self.data);
        String::from_utf8_lossy(&data).into_owned()
    }

    /// Consume the buffer, returning its content as a string.
    pub fn into_string(mut self) -> String {
        self.take_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_within_limit() {
        let mut buffer = ResponseBuffer::with_limit(16);
        buffer.append(b"hello ").unwrap();
        buffer.append(b"world").unwrap();
        assert_eq!(buffer.into_string(), "hello world");
    }

    #[test]
    fn test_append_at_exact_limit() {
        let mut buffer = ResponseBuffer::with_limit(5);
        buffer.append(b"12345").unwrap();
        assert_eq!(buffer.len(), 5);
    }

    #[test]
    fn test_overflow_is_capacity_exceeded() {
        let mut buffer = ResponseBuffer::with_limit(4);
        buffer.append(b"123").unwrap();
        let err = buffer.append(b"45").unwrap_err();
        assert!(matches!(err, HttpError::CapacityExceeded { limit: 4 }));
        // Prior content is untouched by the failed append.
        assert_eq!(buffer.len(), 3);
    }

    #[test]
    fn test_reset_keeps_limit() {
        let mut buffer = ResponseBuffer::with_limit(4);
        buffer.append(b"1234").unwrap();
        buffer.reset();
        assert!(buffer.is_empty());
        buffer.append(b"5678").unwrap();
        assert_eq!(buffer.into_string(), "5678");
    }

    #[test]
    fn test_take_string_drains() {
        let mut buffer = ResponseBuffer::with_limit(16);
        buffer.append(b"body").unwrap();
        assert_eq!(buffer.take_string(), "body");
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let mut buffer = ResponseBuffer::with_limit(16);
        buffer.append(&[0x66, 0x6f, 0xff, 0x6f]).unwrap();
        assert_eq!(buffer.into_string(), "fo\u{fffd}o");
    }
}
