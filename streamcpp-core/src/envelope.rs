//! Connect streaming envelope framing.
//!
//! The StreamCpp endpoint frames every streamed message in a Connect
//! envelope:
//!
//! ```text
//! [flags:1][length:4][payload:length]
//! ```
//!
//! The length is a big-endian unsigned 32-bit integer and counts only the
//! payload bytes. A well-formed stream is a concatenation of envelopes with
//! no padding between them.

use crate::error::EnvelopeError;

/// Connect streaming envelope flags.
pub mod envelope_flags {
    /// Data frame carrying a serialized message.
    pub const DATA: u8 = 0x00;
    /// Trailer frame carrying UTF-8 trailer metadata. Tested as a bit:
    /// any frame with bit 0x02 set is a trailer.
    pub const TRAILER: u8 = 0x02;
}

/// Envelope header size (flags + length).
pub const ENVELOPE_HEADER_SIZE: usize = 5;

/// Wrap a serialized message in a data-frame envelope.
///
/// Always produces exactly `5 + payload.len()` bytes.
///
/// # Errors
/// Returns [`EnvelopeError::LengthOverflow`] if the payload length does not
/// fit in the 4-byte length field. No partial output is produced.
pub fn encode_envelope(payload: &[u8]) -> Result<Vec<u8>, EnvelopeError> {
    let len = u32::try_from(payload.len())
        .map_err(|_| EnvelopeError::LengthOverflow { len: payload.len() })?;

    let mut frame = Vec::with_capacity(ENVELOPE_HEADER_SIZE + payload.len());
    frame.push(envelope_flags::DATA);
    frame.extend_from_slice(&len.to_be_bytes());
    frame.extend_from_slice(payload);
    Ok(frame)
}

/// Parse an envelope header from the start of `data`.
///
/// Returns `(flags, payload_length)`.
///
/// # Errors
/// Returns [`EnvelopeError::IncompleteHeader`] if `data` holds fewer than
/// [`ENVELOPE_HEADER_SIZE`] bytes.
pub fn parse_envelope_header(data: &[u8]) -> Result<(u8, u32), EnvelopeError> {
    if data.len() < ENVELOPE_HEADER_SIZE {
        return Err(EnvelopeError::IncompleteHeader {
            expected: ENVELOPE_HEADER_SIZE,
            actual: data.len(),
        });
    }

    let flags = data[0];
    let length = u32::from_be_bytes([data[1], data[2], data[3], data[4]]);

    Ok((flags, length))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_envelope() {
        let frame = encode_envelope(b"hello").unwrap();

        assert_eq!(frame.len(), 10);
        assert_eq!(frame[0], envelope_flags::DATA);
        assert_eq!(
            u32::from_be_bytes([frame[1], frame[2], frame[3], frame[4]]),
            5
        );
        assert_eq!(&frame[5..], b"hello");
    }

    #[test]
    fn test_encode_envelope_empty_payload() {
        let frame = encode_envelope(b"").unwrap();
        assert_eq!(frame, [0x00, 0x00, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn test_encode_envelope_length_is_big_endian() {
        let payload = vec![0u8; 256];
        let frame = encode_envelope(&payload).unwrap();
        assert_eq!(&frame[1..5], &[0x00, 0x00, 0x01, 0x00]);
    }

    #[test]
    fn test_parse_envelope_header() {
        let data = [0x00, 0x00, 0x00, 0x00, 0x05, b'h', b'e', b'l', b'l', b'o'];
        let (flags, length) = parse_envelope_header(&data).unwrap();

        assert_eq!(flags, envelope_flags::DATA);
        assert_eq!(length, 5);
    }

    #[test]
    fn test_parse_envelope_header_incomplete() {
        let data = [0x00, 0x00, 0x00]; // only 3 bytes
        let err = parse_envelope_header(&data).unwrap_err();

        assert_eq!(
            err,
            EnvelopeError::IncompleteHeader {
                expected: 5,
                actual: 3
            }
        );
    }

    #[test]
    fn test_round_trip_header() {
        let frame = encode_envelope(b"payload bytes").unwrap();
        let (flags, length) = parse_envelope_header(&frame).unwrap();

        assert_eq!(flags, envelope_flags::DATA);
        assert_eq!(length as usize, frame.len() - ENVELOPE_HEADER_SIZE);
    }
}
