//! Incremental envelope decoding.
//!
//! [`EnvelopeDecoder`] is a push-based state machine: the transport appends
//! raw response-body chunks as they arrive, and the decoder yields complete
//! frames as soon as the internal buffer holds them. Chunk boundaries carry
//! no meaning; a frame header or payload may be split across any number of
//! chunks.
//!
//! # Example
//!
//! ```
//! use streamcpp_core::{EnvelopeDecoder, encode_envelope};
//!
//! let mut decoder = EnvelopeDecoder::new();
//! let frame = encode_envelope(b"payload").unwrap();
//!
//! // Feed the frame one byte at a time.
//! for byte in &frame {
//!     decoder.push(std::slice::from_ref(byte));
//! }
//!
//! let frame = decoder.next_frame().unwrap();
//! assert_eq!(&frame.payload[..], b"payload");
//! assert!(decoder.finish().is_none());
//! ```

use bytes::{Bytes, BytesMut};

use crate::envelope::{ENVELOPE_HEADER_SIZE, envelope_flags, parse_envelope_header};

/// A complete envelope extracted from the byte stream.
///
/// The payload is opaque at this layer; the caller decides how to interpret
/// it based on the flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFrame {
    /// Envelope flags byte.
    pub flags: u8,
    /// Payload bytes, exactly as declared by the envelope length field.
    pub payload: Bytes,
}

impl RawFrame {
    /// Whether the trailer bit (0x02) is set.
    pub fn is_trailer(&self) -> bool {
        self.flags & envelope_flags::TRAILER != 0
    }

    /// Decode the payload as trailer text, replacing invalid UTF-8
    /// sequences. Never fails.
    pub fn trailer_text(&self) -> String {
        String::from_utf8_lossy(&self.payload).into_owned()
    }
}

/// A decoded frame event, as consumed by the orchestrator.
///
/// `T` is the decoded data-frame message type; the raw-frame layer below
/// uses [`RawFrame`] and never deserializes payloads.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameEvent<T> {
    /// A data frame whose payload deserialized into a message.
    Data(T),
    /// A trailer frame, lossily decoded as UTF-8 text.
    Trailer(String),
    /// Residual bytes that never completed an envelope. Emitted at most
    /// once, at end of stream, and only when residual bytes exist.
    Leftover(Bytes),
}

/// Push-based envelope decoder.
///
/// Owns the pending-byte buffer for exactly one response stream. The buffer
/// grows as chunks are pushed and shrinks by one envelope per extracted
/// frame. Dropping the decoder discards any pending bytes; call
/// [`finish`](Self::finish) at end of input to recover them instead.
#[derive(Debug, Default)]
pub struct EnvelopeDecoder {
    buffer: BytesMut,
}

impl EnvelopeDecoder {
    /// Create a decoder with an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an incoming chunk.
    ///
    /// A zero-length chunk is a no-op; it neither produces frames nor
    /// terminates the stream.
    pub fn push(&mut self, chunk: &[u8]) {
        self.buffer.extend_from_slice(chunk);
    }

    /// Extract the next complete frame, if the buffer holds one.
    ///
    /// Returns `None` when more input is needed. All complete frames already
    /// buffered are returned by repeated calls before `None`.
    pub fn next_frame(&mut self) -> Option<RawFrame> {
        let Ok((flags, length)) = parse_envelope_header(&self.buffer) else {
            return None;
        };

        let frame_size = ENVELOPE_HEADER_SIZE + length as usize;
        if self.buffer.len() < frame_size {
            return None;
        }

        let frame = self.buffer.split_to(frame_size);
        let payload = frame.freeze().slice(ENVELOPE_HEADER_SIZE..);
        Some(RawFrame { flags, payload })
    }

    /// Number of bytes buffered but not yet part of a complete frame.
    pub fn pending_len(&self) -> usize {
        self.buffer.len()
    }

    /// Signal end of input and recover any residual bytes.
    ///
    /// Returns `Some` with the residual bytes verbatim iff the buffer is
    /// non-empty (a partial header, or a declared length the stream never
    /// satisfied). An exactly-empty buffer returns `None`.
    pub fn finish(self) -> Option<Bytes> {
        if self.buffer.is_empty() {
            None
        } else {
            Some(self.buffer.freeze())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::encode_envelope;

    // Helper to create a frame with arbitrary flags.
    fn make_frame(flags: u8, payload: &[u8]) -> Vec<u8> {
        let mut frame = Vec::with_capacity(5 + payload.len());
        frame.push(flags);
        frame.extend_from_slice(&(payload.len() as u32).to_be_bytes());
        frame.extend_from_slice(payload);
        frame
    }

    // Drain a decoder into (flags, payload) pairs, then finish it.
    fn drain(mut decoder: EnvelopeDecoder) -> (Vec<(u8, Vec<u8>)>, Option<Vec<u8>>) {
        let mut frames = Vec::new();
        while let Some(frame) = decoder.next_frame() {
            frames.push((frame.flags, frame.payload.to_vec()));
        }
        (frames, decoder.finish().map(|b| b.to_vec()))
    }

    #[test]
    fn test_single_frame_round_trip() {
        let mut decoder = EnvelopeDecoder::new();
        decoder.push(&encode_envelope(b"abc").unwrap());

        let frame = decoder.next_frame().unwrap();
        assert_eq!(frame.flags, envelope_flags::DATA);
        assert!(!frame.is_trailer());
        assert_eq!(&frame.payload[..], b"abc");

        assert!(decoder.next_frame().is_none());
        assert!(decoder.finish().is_none());
    }

    #[test]
    fn test_trailer_bit() {
        let mut decoder = EnvelopeDecoder::new();
        decoder.push(&make_frame(0x02, b"ok"));

        let frame = decoder.next_frame().unwrap();
        assert!(frame.is_trailer());
        assert_eq!(frame.trailer_text(), "ok");
    }

    #[test]
    fn test_trailer_text_lossy() {
        let frame = RawFrame {
            flags: envelope_flags::TRAILER,
            payload: Bytes::from_static(&[0x68, 0x69, 0xFF, 0xFE]),
        };
        assert_eq!(frame.trailer_text(), "hi\u{FFFD}\u{FFFD}");
    }

    #[test]
    fn test_empty_payload_frame() {
        let mut decoder = EnvelopeDecoder::new();
        decoder.push(&make_frame(0x00, b""));

        let frame = decoder.next_frame().unwrap();
        assert_eq!(frame.payload.len(), 0);
        assert!(decoder.finish().is_none());
    }

    #[test]
    fn test_multiple_frames_in_one_chunk() {
        let mut stream = make_frame(0x00, b"first");
        stream.extend_from_slice(&make_frame(0x02, b"second"));

        let mut decoder = EnvelopeDecoder::new();
        decoder.push(&stream);

        // Both frames must come out before more input is requested.
        let first = decoder.next_frame().unwrap();
        assert_eq!(&first.payload[..], b"first");
        let second = decoder.next_frame().unwrap();
        assert!(second.is_trailer());
        assert_eq!(&second.payload[..], b"second");
        assert!(decoder.next_frame().is_none());
    }

    #[test]
    fn test_chunk_boundary_mid_header() {
        let frame = make_frame(0x00, b"payload");

        let mut decoder = EnvelopeDecoder::new();
        decoder.push(&frame[..3]);
        assert!(decoder.next_frame().is_none());
        decoder.push(&frame[3..]);

        let frame = decoder.next_frame().unwrap();
        assert_eq!(&frame.payload[..], b"payload");
    }

    #[test]
    fn test_chunk_boundary_mid_payload() {
        let frame = make_frame(0x00, b"split payload");

        let mut decoder = EnvelopeDecoder::new();
        decoder.push(&frame[..8]);
        assert!(decoder.next_frame().is_none());
        assert_eq!(decoder.pending_len(), 8);
        decoder.push(&frame[8..]);

        let frame = decoder.next_frame().unwrap();
        assert_eq!(&frame.payload[..], b"split payload");
    }

    #[test]
    fn test_empty_chunk_is_noop() {
        let mut decoder = EnvelopeDecoder::new();
        decoder.push(&[]);
        assert!(decoder.next_frame().is_none());
        assert_eq!(decoder.pending_len(), 0);

        decoder.push(&make_frame(0x00, b"x"));
        decoder.push(&[]);
        assert!(decoder.next_frame().is_some());
    }

    #[test]
    fn test_leftover_short_header() {
        let mut decoder = EnvelopeDecoder::new();
        decoder.push(&[0x00, 0x00, 0x01]);

        assert!(decoder.next_frame().is_none());
        assert_eq!(decoder.finish().unwrap(), &[0x00, 0x00, 0x01][..]);
    }

    #[test]
    fn test_leftover_truncated_payload() {
        // Declares 100 payload bytes, supplies 10.
        let mut stream = vec![0x00];
        stream.extend_from_slice(&100u32.to_be_bytes());
        stream.extend_from_slice(&[0xAB; 10]);

        let mut decoder = EnvelopeDecoder::new();
        decoder.push(&stream);

        assert!(decoder.next_frame().is_none());
        let leftover = decoder.finish().unwrap();
        assert_eq!(leftover.len(), 15); // header + 10 bytes, verbatim
        assert_eq!(&leftover[..], &stream[..]);
    }

    #[test]
    fn test_finish_empty_is_none() {
        // Exactly-empty buffer produces no leftover; anything else does.
        assert!(EnvelopeDecoder::new().finish().is_none());

        let mut decoder = EnvelopeDecoder::new();
        decoder.push(&make_frame(0x00, b"consumed"));
        decoder.next_frame().unwrap();
        assert!(decoder.finish().is_none());

        let mut decoder = EnvelopeDecoder::new();
        decoder.push(&[0x00]);
        assert_eq!(decoder.finish().unwrap(), &[0x00][..]);
    }

    #[test]
    fn test_chunk_boundary_invariance() {
        // Three back-to-back envelopes, split at every boundary offset:
        // the frame sequence must match the single-chunk decode exactly.
        let mut stream = make_frame(0x00, b"alpha");
        stream.extend_from_slice(&make_frame(0x00, b""));
        stream.extend_from_slice(&make_frame(0x02, b"done"));

        let mut whole = EnvelopeDecoder::new();
        whole.push(&stream);
        let (expected, expected_leftover) = drain(whole);
        assert_eq!(expected.len(), 3);
        assert!(expected_leftover.is_none());

        for split in 0..=stream.len() {
            let mut decoder = EnvelopeDecoder::new();
            decoder.push(&stream[..split]);
            let mut frames = Vec::new();
            while let Some(frame) = decoder.next_frame() {
                frames.push((frame.flags, frame.payload.to_vec()));
            }
            decoder.push(&stream[split..]);
            while let Some(frame) = decoder.next_frame() {
                frames.push((frame.flags, frame.payload.to_vec()));
            }

            assert_eq!(frames, expected, "split at {split}");
            assert!(decoder.finish().is_none(), "split at {split}");
        }
    }

    #[test]
    fn test_byte_at_a_time() {
        let mut stream = make_frame(0x00, b"one");
        stream.extend_from_slice(&make_frame(0x02, b"two"));

        let mut decoder = EnvelopeDecoder::new();
        let mut frames = Vec::new();
        for byte in &stream {
            decoder.push(std::slice::from_ref(byte));
            while let Some(frame) = decoder.next_frame() {
                frames.push(frame);
            }
        }

        assert_eq!(frames.len(), 2);
        assert_eq!(&frames[0].payload[..], b"one");
        assert_eq!(&frames[1].payload[..], b"two");
        assert!(decoder.finish().is_none());
    }
}
