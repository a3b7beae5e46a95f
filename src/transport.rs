use bytes::Bytes;
use futures::Stream;
use reqwest::StatusCode;
use std::future::Future;
use std::pin::Pin;

use crate::error::Result;

/// Type alias for an incremental response body
pub type BodyStream = Pin<Box<dyn Stream<Item = Result<Bytes>> + Send>>;

/// Type alias for the future returned by post_json
pub type ResponseFuture = Pin<Box<dyn Future<Output = Result<TransportResponse>> + Send>>;

/// Response headers have arrived; the body has not been read yet
pub struct TransportResponse {
    pub status: StatusCode,
    /// `None` when the response has no readable body
    pub body: Option<BodyStream>,
}

impl TransportResponse {
    pub fn new(status: StatusCode, body: Option<BodyStream>) -> Self {
        Self { status, body }
    }
}

impl std::fmt::Debug for TransportResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransportResponse")
            .field("status", &self.status)
            .field("has_body", &self.body.is_some())
            .finish()
    }
}

/// Trait for anything that can carry one chat request to the backend
pub trait Transport: Send + Sync {
    /// POST a JSON body to `url`
    ///
    /// # Arguments
    /// * `url` - Absolute URL of the chat endpoint
    /// * `body` - Serialized JSON request body
    ///
    /// # Returns
    /// The status and, unless the response has none, a stream of body chunks.
    /// Dropping the body stream releases the underlying connection.
    fn post_json(&self, url: &str, body: Bytes) -> ResponseFuture;

    /// Get the transport name for logging
    fn name(&self) -> &str;
}
