//! HTTP transport for the StreamCpp client.
//!
//! The transport is the only part of the crate that performs I/O: it sends
//! the framed request body and hands the streamed response body back as a
//! sequence of byte chunks for the frame decoder.

mod body;
mod hyper;

pub use body::{BodyStream, TransportBody};
pub use hyper::{HyperTransport, HyperTransportBuilder};
