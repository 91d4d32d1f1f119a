//! Response wrapper types.

use http::HeaderMap;

/// An accepted streaming call: the frame-event stream plus the initial
/// response headers.
#[derive(Debug)]
pub struct RpcResponse<T> {
    inner: T,
    metadata: Metadata,
}

impl<T> RpcResponse<T> {
    /// Create a new response with the given value and metadata.
    pub fn new(inner: T, metadata: Metadata) -> Self {
        Self { inner, metadata }
    }

    /// Extract the inner value, discarding metadata.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Get a reference to the response metadata.
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Decompose into inner value and metadata.
    pub fn into_parts(self) -> (T, Metadata) {
        (self.inner, self.metadata)
    }
}

/// Response metadata wrapper around HTTP headers.
#[derive(Debug, Clone, Default)]
pub struct Metadata {
    headers: HeaderMap,
}

impl Metadata {
    /// Create new metadata from HTTP headers.
    pub fn new(headers: HeaderMap) -> Self {
        Self { headers }
    }

    /// Get a header value as a string, if present and valid UTF-8.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Access the underlying header map.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}
