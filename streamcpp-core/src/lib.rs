//! Core framing types for the StreamCpp client.
//!
//! This crate implements the byte-level half of the Connect streaming
//! protocol used by the `StreamCpp` RPC: wrapping a serialized message in an
//! envelope frame and incrementally extracting envelopes from a chunked byte
//! stream. It performs no I/O and knows nothing about the message schema;
//! payloads are opaque byte sequences.
//!
//! ## Modules
//!
//! - [`envelope`]: envelope constants, encoding, and header parsing
//! - [`decoder`]: the incremental envelope decoder and frame events
//! - [`error`]: framing error types

mod decoder;
mod envelope;
mod error;

pub use decoder::*;
pub use envelope::*;
pub use error::*;
