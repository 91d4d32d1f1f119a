//! Folding frame events into a completion.
//!
//! The accumulator makes a single pass over the event stream: data-frame
//! text is appended in arrival order, the trailer text and any leftover
//! bytes are retained, and the completion flags are tracked for
//! observability only. A mid-stream error carries the text accumulated so
//! far, so callers get partial results instead of silence.

use bytes::Bytes;
use futures::{Stream, StreamExt};
use streamcpp_core::FrameEvent;
use streamcpp_proto::StreamCppResponse;
use tracing::{debug, warn};

use crate::ClientError;

/// The reassembled result of one StreamCpp call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Completion {
    /// Concatenation of every non-empty data-frame `text`, in stream order.
    pub text: String,
    /// Trailer text, if the stream carried a trailer frame.
    pub trailer: Option<String>,
    /// Residual bytes that never completed an envelope. Diagnostic only;
    /// the text above is still valid when this is set.
    pub leftover: Option<Bytes>,
    /// Whether any frame reported the edit as done.
    pub done_edit: bool,
    /// Whether any frame reported the stream as done.
    pub done_stream: bool,
}

/// A stream failure together with everything accumulated before it.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{source}")]
pub struct CompletionError {
    /// Text and metadata collected before the failure.
    pub partial: Completion,
    #[source]
    pub source: ClientError,
}

impl CompletionError {
    pub(crate) fn bare(source: ClientError) -> Self {
        Self {
            partial: Completion::default(),
            source,
        }
    }
}

/// Fold a frame-event stream into a [`Completion`].
///
/// Consumes events as they are produced; nothing beyond the current frame
/// is buffered. On error the accumulated partial completion is returned
/// alongside the failure.
pub async fn collect_completion<S>(mut events: S) -> Result<Completion, CompletionError>
where
    S: Stream<Item = Result<FrameEvent<StreamCppResponse>, ClientError>> + Unpin,
{
    let mut completion = Completion::default();

    while let Some(event) = events.next().await {
        match event {
            Ok(FrameEvent::Data(msg)) => {
                debug!(
                    text_len = msg.text.len(),
                    done_edit = msg.done_edit,
                    done_stream = msg.done_stream,
                    "data frame"
                );
                if !msg.text.is_empty() {
                    completion.text.push_str(&msg.text);
                }
                completion.done_edit |= msg.done_edit;
                completion.done_stream |= msg.done_stream;
            }
            Ok(FrameEvent::Trailer(text)) => {
                debug!(trailer = %text, "trailer frame");
                completion.trailer = Some(text);
            }
            Ok(FrameEvent::Leftover(bytes)) => {
                warn!(len = bytes.len(), "stream ended with an incomplete frame");
                completion.leftover = Some(bytes);
            }
            Err(source) => {
                return Err(CompletionError {
                    partial: completion,
                    source,
                });
            }
        }
    }

    Ok(completion)
}
