use bytes::Bytes;
use futures::TryStreamExt;
use reqwest::{Client, StatusCode};
use tracing::{debug, info};

use crate::error::{ChatError, Result};
use crate::transport::{BodyStream, ResponseFuture, Transport, TransportResponse};

/// reqwest-backed transport
///
/// Issues exactly one request per call. There is no timeout and no retry: a
/// stalled backend stalls the caller until it drops the stream.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        let client = Client::builder().build().map_err(|e| {
            ChatError::RequestError(format!("Failed to create HTTP client: {}", e))
        })?;

        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    fn post_json(&self, url: &str, body: Bytes) -> ResponseFuture {
        let url = url.to_string();
        let client = self.client.clone();

        Box::pin(async move { Self::post_json_impl(url, body, client).await })
    }

    fn name(&self) -> &str {
        "http"
    }
}

impl HttpTransport {
    async fn post_json_impl(
        url: String,
        body: Bytes,
        client: Client,
    ) -> Result<TransportResponse> {
        info!("Sending {} bytes to: {}", body.len(), url);

        let response = client
            .post(&url)
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| ChatError::RequestError(format!("Chat request failed: {}", e)))?;

        let status = response.status();
        info!("Backend responded with status: {}", status);

        if is_null_body_status(status) {
            debug!(%status, "Response status carries no body");
            return Ok(TransportResponse::new(status, None));
        }

        let body: BodyStream = Box::pin(
            response
                .bytes_stream()
                .map_err(|e| ChatError::RequestError(format!("Failed to read body: {}", e))),
        );

        Ok(TransportResponse::new(status, Some(body)))
    }
}

/// Statuses whose responses are defined to have no body
fn is_null_body_status(status: StatusCode) -> bool {
    matches!(status.as_u16(), 101 | 103 | 204 | 205 | 304)
}
