//! Client-side error types.
//!
//! Transport failures, HTTP status errors, and message decode failures are
//! kept in distinct variants so callers can tell a broken connection apart
//! from a broken frame. Framing-layer errors ([`EnvelopeError`]) are folded
//! in via `From`.

use bytes::Bytes;
use http::StatusCode;
use streamcpp_core::EnvelopeError;

/// Errors raised while issuing a StreamCpp call or decoding its response.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ClientError {
    /// The server answered with a non-2xx status before any frame was
    /// streamed. The collected response body is kept for diagnostics.
    #[error("server returned {status}: {body}")]
    Http { status: StatusCode, body: String },

    /// Connection-level failure (DNS, TLS, reset, timeout).
    #[error("transport error: {0}")]
    Transport(String),

    /// Request serialization or envelope encoding failure.
    #[error("encode error: {0}")]
    Encode(String),

    /// A data frame's payload did not deserialize into the response schema.
    /// Fatal for the stream; the offending bytes are retained verbatim.
    #[error("malformed data frame: {source}")]
    MalformedMessage {
        source: prost::DecodeError,
        payload: Bytes,
    },

    /// Missing or invalid credential/settings input.
    #[error("configuration error: {0}")]
    Config(String),

    /// A credential value cannot be used as an HTTP header value.
    #[error("credential for header {0} contains bytes not allowed in a header value")]
    InvalidHeader(String),
}

impl ClientError {
    /// Whether this error originated below the framing layer.
    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Transport(_) | ClientError::Http { .. })
    }

    /// The raw payload of the frame that failed to decode, if any.
    pub fn malformed_payload(&self) -> Option<&Bytes> {
        match self {
            ClientError::MalformedMessage { payload, .. } => Some(payload),
            _ => None,
        }
    }
}

impl From<EnvelopeError> for ClientError {
    fn from(err: EnvelopeError) -> Self {
        // Both framing errors occur on the encode side here; the decoder
        // never reports them (short input becomes Leftover instead).
        ClientError::Encode(err.to_string())
    }
}
