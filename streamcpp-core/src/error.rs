//! Framing error types.

/// Errors raised by the envelope framing layer.
///
/// Transport failures and message decode failures are a different category
/// and live in the client crate; this enum only covers the byte-level frame
/// format itself.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnvelopeError {
    /// Payload length does not fit in the 4-byte big-endian length field.
    #[error("payload of {len} bytes exceeds the 32-bit envelope length field")]
    LengthOverflow { len: usize },

    /// Not enough bytes for the 5-byte envelope header.
    #[error("incomplete envelope header: expected {expected} bytes, got {actual}")]
    IncompleteHeader { expected: usize, actual: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EnvelopeError::LengthOverflow { len: usize::MAX };
        assert!(err.to_string().contains("32-bit"));

        let err = EnvelopeError::IncompleteHeader {
            expected: 5,
            actual: 3,
        };
        assert_eq!(
            err.to_string(),
            "incomplete envelope header: expected 5 bytes, got 3"
        );
    }
}
