//! Async frame decoding over the response body.
//!
//! [`FrameDecoder`] wraps a byte-chunk stream and yields [`FrameEvent`]s:
//! decoded data messages, the trailer text, and (at most once, at end of
//! input) any residual bytes that never completed an envelope. The
//! byte-level buffering lives in [`streamcpp_core::EnvelopeDecoder`]; this
//! adapter adds message deserialization and the suspend/resume glue.

use std::marker::PhantomData;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures::Stream;
use prost::Message;
use streamcpp_core::{EnvelopeDecoder, FrameEvent};

use crate::ClientError;

/// Stream adapter that decodes Connect envelope frames into frame events.
///
/// # Frame format
///
/// ```text
/// [flags:1][length:4, big-endian][payload:length]
/// ```
///
/// Bit 0x02 in the flags marks a trailer frame (UTF-8 text, lossily
/// decoded); any other frame is a data frame whose payload must deserialize
/// as `T`. A deserialization failure ends the stream with
/// [`ClientError::MalformedMessage`].
///
/// When the underlying stream ends with buffered bytes that never formed a
/// complete envelope, the decoder emits a single [`FrameEvent::Leftover`]
/// carrying them verbatim. That is a protocol anomaly but not an error:
/// everything decoded before it remains valid.
pub struct FrameDecoder<S, T> {
    /// The underlying byte stream.
    stream: S,
    /// Buffering envelope state machine.
    decoder: EnvelopeDecoder,
    /// Set once the stream has ended or a fatal error was returned.
    finished: bool,
    /// Type marker for the data-frame message type.
    _marker: PhantomData<T>,
}

impl<S, T> FrameDecoder<S, T> {
    /// Create a decoder over the given byte-chunk stream.
    pub fn new(stream: S) -> Self {
        Self {
            stream,
            decoder: EnvelopeDecoder::new(),
            finished: false,
            _marker: PhantomData,
        }
    }

    /// Whether the stream has finished (end of input or fatal error).
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Bytes buffered but not yet part of a complete frame.
    pub fn pending_len(&self) -> usize {
        self.decoder.pending_len()
    }
}

impl<S, T> Unpin for FrameDecoder<S, T> where S: Unpin {}

impl<S, T> Stream for FrameDecoder<S, T>
where
    S: Stream<Item = Result<Bytes, ClientError>> + Unpin,
    T: Message + Default,
{
    type Item = Result<FrameEvent<T>, ClientError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        loop {
            if this.finished {
                return Poll::Ready(None);
            }

            // Drain complete frames before asking for more input.
            if let Some(frame) = this.decoder.next_frame() {
                if frame.is_trailer() {
                    return Poll::Ready(Some(Ok(FrameEvent::Trailer(frame.trailer_text()))));
                }
                return match T::decode(&frame.payload[..]) {
                    Ok(message) => Poll::Ready(Some(Ok(FrameEvent::Data(message)))),
                    Err(source) => {
                        this.finished = true;
                        Poll::Ready(Some(Err(ClientError::MalformedMessage {
                            source,
                            payload: frame.payload,
                        })))
                    }
                };
            }

            match Pin::new(&mut this.stream).poll_next(cx) {
                Poll::Ready(Some(Ok(chunk))) => {
                    this.decoder.push(&chunk);
                    // Loop back to try parsing again.
                }
                Poll::Ready(Some(Err(e))) => {
                    this.finished = true;
                    return Poll::Ready(Some(Err(e)));
                }
                Poll::Ready(None) => {
                    this.finished = true;
                    // A non-empty residual buffer becomes one Leftover
                    // event; an empty one ends the stream silently.
                    return match std::mem::take(&mut this.decoder).finish() {
                        Some(residual) => {
                            Poll::Ready(Some(Ok(FrameEvent::Leftover(residual))))
                        }
                        None => Poll::Ready(None),
                    };
                }
                Poll::Pending => {
                    return Poll::Pending;
                }
            }
        }
    }
}
