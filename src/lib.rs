//! # Chat Stream Client
//!
//! Streaming client for a chat backend that answers a single `POST /api/chat`
//! with newline-delimited `data: `-prefixed JSON events.
//!
//! ## Overview
//!
//! Each message produces a lazy [`futures::Stream`] of [`ChatEvent`]s:
//! - the request is sent on first poll
//! - the body is decoded as UTF-8 incrementally, code points split across
//!   chunks included
//! - complete lines starting with `data: ` are parsed and yielded in order
//! - an unterminated trailing line is discarded at end of stream
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chat_stream_client::{ChatClient, ChatEvent, ClientConfig};
//! use futures::StreamExt;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ChatClient::new(ClientConfig::new("http://127.0.0.1:8000"))?;
//! let mut events = client.send_message("hello");
//!
//! while let Some(event) = events.next().await {
//!     match event? {
//!         ChatEvent::Text { content } => print!("{}", content),
//!         ChatEvent::Done => break,
//!         ChatEvent::Unknown { .. } => {}
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`client`] - Chat client and the reqwest transport
//! - [`config`] - Configuration loading and validation
//! - [`error`] - Error types and handling
//! - [`models`] - Request body and event types
//! - [`streaming`] - UTF-8/line decoding and the event stream
//! - [`transport`] - Transport trait between the decoder and HTTP

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod streaming;
pub mod transport;

pub use client::{ChatClient, HttpTransport};
pub use config::ClientConfig;
pub use error::{ChatError, Result};
pub use models::{ChatEvent, ChatRequest, DEFAULT_THREAD_ID};
pub use streaming::ChatEventStream;
