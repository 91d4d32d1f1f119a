//! Client builder.

use std::time::Duration;

use http::HeaderValue;

use crate::client::{DEFAULT_BASE_URL, StreamCppClient};
use crate::config::Credentials;
use crate::transport::HyperTransport;
use crate::ClientError;

/// Builder for [`StreamCppClient`].
///
/// Credentials are required up front; everything else has defaults.
///
/// # Example
///
/// ```no_run
/// use streamcpp_client::{ClientBuilder, Credentials};
/// use std::time::Duration;
///
/// # fn main() -> Result<(), streamcpp_client::ClientError> {
/// let credentials = Credentials::load()?;
/// let client = ClientBuilder::new(credentials)
///     .timeout(Duration::from_secs(60))
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ClientBuilder {
    base_url: String,
    credentials: Credentials,
    transport: Option<HyperTransport>,
    timeout: Option<Duration>,
}

impl ClientBuilder {
    /// Create a builder with the given session credentials.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            credentials,
            transport: None,
            timeout: None,
        }
    }

    /// Override the service base URL (scheme and host, no trailing slash).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Use a pre-configured transport instead of the default one.
    pub fn transport(mut self, transport: HyperTransport) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Bound the wait for response headers. Streaming reads after the
    /// headers are not bounded by this.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Validate the credentials as header values and build the client.
    ///
    /// Validation happens before the transport is constructed, so a bad
    /// credential fails without touching TLS setup.
    pub fn build(self) -> Result<StreamCppClient, ClientError> {
        let mut authorization =
            header_value("authorization", &format!("Bearer {}", self.credentials.bearer_token))?;
        authorization.set_sensitive(true);
        let request_id = header_value("x-request-id", &self.credentials.request_id)?;
        let session_id = header_value("x-session-id", &self.credentials.session_id)?;
        let client_version =
            header_value("x-cursor-client-version", &self.credentials.client_version)?;

        let transport = match self.transport {
            Some(transport) => transport,
            None => HyperTransport::new()?,
        };

        Ok(StreamCppClient::new(
            transport,
            self.base_url,
            authorization,
            request_id,
            session_id,
            client_version,
            self.timeout,
        ))
    }
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue, ClientError> {
    HeaderValue::try_from(value).map_err(|_| ClientError::InvalidHeader(name.to_string()))
}
