pub mod http;

pub use http::HttpTransport;

use std::sync::Arc;

use crate::config::ClientConfig;
use crate::error::Result;
use crate::models::{ChatRequest, DEFAULT_THREAD_ID};
use crate::streaming::{ChatEventStream, event_stream};
use crate::transport::Transport;

/// Client for the chat backend's streaming endpoint
///
/// Each call to [`ChatClient::send_message`] owns its own request, body reader
/// and line buffer, so concurrent calls never share state.
#[derive(Clone)]
pub struct ChatClient {
    transport: Arc<dyn Transport>,
    config: ClientConfig,
}

impl ChatClient {
    /// Create a client that talks HTTP via reqwest
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let transport = HttpTransport::new()?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn endpoint_url(&self) -> String {
        self.config.endpoint_url()
    }

    /// Send a message on the default thread
    pub fn send_message(&self, message: &str) -> ChatEventStream {
        self.send_message_in_thread(message, DEFAULT_THREAD_ID)
    }

    /// Send a message on a specific thread
    ///
    /// Nothing goes over the wire until the returned stream is first polled.
    pub fn send_message_in_thread(&self, message: &str, thread_id: &str) -> ChatEventStream {
        event_stream(
            self.transport.clone(),
            self.endpoint_url(),
            ChatRequest::new(message, thread_id),
        )
    }
}

impl std::fmt::Debug for ChatClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatClient")
            .field("transport", &self.transport.name())
            .field("config", &self.config)
            .finish()
    }
}
