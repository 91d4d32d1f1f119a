//! The StreamCpp RPC client.
//!
//! One call: POST a single framed request message to
//! `aiserver.v1.AiService/StreamCpp` and stream the framed response back.

use std::time::Duration;

use bytes::Bytes;
use http::{HeaderValue, Method, Request, header};
use http_body_util::BodyExt;
use prost::Message;
use tokio::time::timeout;
use tracing::debug;

use streamcpp_core::encode_envelope;
use streamcpp_proto::{StreamCppRequest, StreamCppResponse};

use crate::ClientError;
use crate::builder::ClientBuilder;
use crate::completion::{Completion, CompletionError, collect_completion};
use crate::frame::FrameDecoder;
use crate::response::{Metadata, RpcResponse};
use crate::transport::{BodyStream, HyperTransport, TransportBody};

/// Default service base URL.
pub const DEFAULT_BASE_URL: &str = "https://us-only.gcpp.cursor.sh";

/// Full procedure path of the streaming completion RPC.
pub const STREAM_CPP_PROCEDURE: &str = "aiserver.v1.AiService/StreamCpp";

const CONNECT_PROTOCOL_VERSION_HEADER: &str = "connect-protocol-version";
const CONNECT_PROTOCOL_VERSION: &str = "1";
const STREAMING_CONTENT_TYPE: &str = "application/connect+proto";

/// Client for the StreamCpp completion RPC.
///
/// Use [`StreamCppClient::builder`] to create an instance; credentials are
/// validated at build time.
///
/// # Example
///
/// ```no_run
/// use streamcpp_client::{Credentials, FileContext, StreamCppClient, build_request};
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let client = StreamCppClient::builder(Credentials::load()?).build()?;
/// let request = build_request(&FileContext::new("app.py", "print('hi')\n"));
/// let completion = client.completion(&request).await?;
/// println!("{}", completion.text);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct StreamCppClient {
    transport: HyperTransport,
    base_url: String,
    authorization: HeaderValue,
    request_id: HeaderValue,
    session_id: HeaderValue,
    client_version: HeaderValue,
    timeout: Option<Duration>,
}

impl StreamCppClient {
    /// Create a new builder with the given credentials.
    pub fn builder(credentials: crate::Credentials) -> ClientBuilder {
        ClientBuilder::new(credentials)
    }

    /// Called by [`ClientBuilder::build`]; prefer the builder API.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        transport: HyperTransport,
        base_url: String,
        authorization: HeaderValue,
        request_id: HeaderValue,
        session_id: HeaderValue,
        client_version: HeaderValue,
        timeout: Option<Duration>,
    ) -> Self {
        Self {
            transport,
            base_url,
            authorization,
            request_id,
            session_id,
            client_version,
            timeout,
        }
    }

    /// The configured service base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue the RPC and return the decoded frame-event stream.
    ///
    /// The request message is serialized, wrapped in a single envelope, and
    /// sent as the POST body. A non-2xx status is returned as
    /// [`ClientError::Http`] with the collected error body; on success the
    /// response body is wrapped in a [`FrameDecoder`] without buffering.
    pub async fn stream_cpp(
        &self,
        request: &StreamCppRequest,
    ) -> Result<RpcResponse<FrameDecoder<BodyStream, StreamCppResponse>>, ClientError> {
        let payload = request.encode_to_vec();
        let body = Bytes::from(encode_envelope(&payload)?);
        debug!(
            message_bytes = payload.len(),
            body_bytes = body.len(),
            "sending StreamCpp request"
        );

        let url = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            STREAM_CPP_PROCEDURE
        );

        let req = Request::builder()
            .method(Method::POST)
            .uri(&url)
            .header(CONNECT_PROTOCOL_VERSION_HEADER, CONNECT_PROTOCOL_VERSION)
            .header(header::CONTENT_TYPE, STREAMING_CONTENT_TYPE)
            .header("connect-accept-encoding", "gzip")
            .header("connect-content-encoding", "gzip")
            .header("x-cursor-client-type", "ide")
            .header("x-cursor-streaming", "true")
            .header("x-cursor-client-version", self.client_version.clone())
            .header("x-request-id", self.request_id.clone())
            .header("x-session-id", self.session_id.clone())
            .header(header::AUTHORIZATION, self.authorization.clone())
            .header(header::CONTENT_LENGTH, body.len())
            .body(TransportBody::full(body))
            .map_err(|e| ClientError::Transport(format!("failed to build request: {e}")))?;

        // The timeout bounds connection setup and response headers only;
        // the streaming body read is driven by the caller.
        let response = match self.timeout {
            Some(t) => timeout(t, self.transport.request(req)).await.map_err(|_| {
                ClientError::Transport(format!("no response headers within {:?}", t))
            })??,
            None => self.transport.request(req).await?,
        };

        let status = response.status();
        let headers = response.headers().clone();
        debug!(status = %status, "StreamCpp response headers");

        if !status.is_success() {
            let body = response
                .into_body()
                .collect()
                .await
                .map_err(|e| ClientError::Transport(format!("failed to read error body: {e}")))?
                .to_bytes();
            return Err(ClientError::Http {
                status,
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        let events = FrameDecoder::new(BodyStream::new(response.into_body()));
        Ok(RpcResponse::new(events, Metadata::new(headers)))
    }

    /// Issue the RPC and fold the event stream into a [`Completion`].
    ///
    /// A failure after frames were already received carries the text
    /// accumulated so far.
    pub async fn completion(
        &self,
        request: &StreamCppRequest,
    ) -> Result<Completion, CompletionError> {
        let response = self
            .stream_cpp(request)
            .await
            .map_err(CompletionError::bare)?;
        collect_completion(response.into_inner()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_procedure_constants() {
        assert_eq!(STREAM_CPP_PROCEDURE, "aiserver.v1.AiService/StreamCpp");
        assert!(DEFAULT_BASE_URL.starts_with("https://"));
        assert!(!DEFAULT_BASE_URL.ends_with('/'));
    }
}
