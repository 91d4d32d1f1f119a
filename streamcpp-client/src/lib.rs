//! Streaming client for the `aiserver.v1.AiService/StreamCpp` completion
//! RPC.
//!
//! The service speaks a Connect-style protocol: a single protobuf request
//! message wrapped in an envelope frame is POSTed over HTTPS, and the
//! response body streams back envelope frames carrying incremental
//! completion text plus a trailer. This crate provides:
//!
//! - [`StreamCppClient`]: issues the call and returns a lazy frame-event
//!   stream ([`FrameDecoder`]).
//! - [`collect_completion`] / [`Completion`]: folds the events into the
//!   final completion text, trailer, and diagnostics.
//! - [`Credentials`] / [`Settings`]: session credential loading from the
//!   environment or `settings.toml`.
//! - [`build_request`] / [`FileContext`]: request construction from a file
//!   snapshot and cursor location.
//!
//! The byte-level framing lives in `streamcpp-core`; the message schema in
//! `streamcpp-proto`.
//!
//! # Example
//!
//! ```no_run
//! use streamcpp_client::{Credentials, FileContext, StreamCppClient, build_request};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = StreamCppClient::builder(Credentials::load()?).build()?;
//!
//! let mut ctx = FileContext::new("src/app.py", "def add(a, b):\n    ");
//! ctx.cursor_line = 1;
//! ctx.cursor_col = 4;
//!
//! let completion = client.completion(&build_request(&ctx)).await?;
//! println!("{}", completion.text);
//! if let Some(trailer) = completion.trailer {
//!     eprintln!("trailer: {trailer}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! For frame-by-frame control, use [`StreamCppClient::stream_cpp`] and
//! consume the [`FrameEvent`]s directly.

mod builder;
mod client;
mod completion;
pub mod config;
mod error;
mod frame;
mod request;
mod response;
pub mod transport;

pub use builder::ClientBuilder;
pub use client::{DEFAULT_BASE_URL, STREAM_CPP_PROCEDURE, StreamCppClient};
pub use completion::{Completion, CompletionError, collect_completion};
pub use config::{Credentials, Settings};
pub use error::ClientError;
pub use frame::FrameDecoder;
pub use request::{FileContext, build_request};
pub use response::{Metadata, RpcResponse};
pub use transport::{BodyStream, HyperTransport, HyperTransportBuilder, TransportBody};

// Re-export the framing types callers interact with.
pub use streamcpp_core::{FrameEvent, RawFrame};

// Re-export the schema crate so downstream users need only one dependency.
pub use streamcpp_proto as proto;

pub use bytes::Bytes;
