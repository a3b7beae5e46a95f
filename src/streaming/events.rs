use bytes::Bytes;
use futures::{Stream, StreamExt, stream};
use std::collections::VecDeque;
use std::pin::Pin;
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::{ChatError, Result};
use crate::models::{ChatEvent, ChatRequest};
use crate::streaming::decoder::LineDecoder;
use crate::streaming::parser::parse_data_line;
use crate::transport::{BodyStream, Transport};

/// Type alias for the lazy sequence of decoded chat events
pub type ChatEventStream = Pin<Box<dyn Stream<Item = Result<ChatEvent>> + Send>>;

enum State {
    /// Nothing sent yet
    Pending {
        transport: Arc<dyn Transport>,
        url: String,
        request: ChatRequest,
    },
    /// Headers received and status accepted; reading the body
    Reading {
        body: BodyStream,
        decoder: LineDecoder,
        lines: VecDeque<String>,
    },
}

/// Build the event stream for one chat request
///
/// The request is sent on the first poll, not here. Events are yielded in the
/// order their lines appear in the body. The first error ends the stream, and
/// dropping the stream at any point drops the body and its connection.
pub fn event_stream(
    transport: Arc<dyn Transport>,
    url: String,
    request: ChatRequest,
) -> ChatEventStream {
    let initial = State::Pending {
        transport,
        url,
        request,
    };

    Box::pin(stream::try_unfold(initial, next_event))
}

async fn next_event(mut state: State) -> Result<Option<(ChatEvent, State)>> {
    loop {
        state = match state {
            State::Pending {
                transport,
                url,
                request,
            } => {
                let body = Bytes::from(serde_json::to_vec(&request)?);
                info!(
                    transport = transport.name(),
                    thread_id = %request.thread_id,
                    "Sending chat message"
                );

                let response = transport.post_json(&url, body).await?;
                if !response.status.is_success() {
                    return Err(ChatError::TransportError {
                        status: response.status.as_u16(),
                    });
                }

                let body = response.body.ok_or(ChatError::NoBodyError)?;
                State::Reading {
                    body,
                    decoder: LineDecoder::new(),
                    lines: VecDeque::new(),
                }
            }
            State::Reading {
                mut body,
                mut decoder,
                mut lines,
            } => {
                if let Some(line) = lines.pop_front() {
                    if let Some(event) = parse_data_line(&line)? {
                        return Ok(Some((
                            event,
                            State::Reading {
                                body,
                                decoder,
                                lines,
                            },
                        )));
                    }
                    State::Reading {
                        body,
                        decoder,
                        lines,
                    }
                } else {
                    match body.next().await {
                        Some(chunk) => {
                            let chunk = chunk?;
                            debug!(size = chunk.len(), "Received body chunk");
                            lines.extend(decoder.feed(&chunk));
                            State::Reading {
                                body,
                                decoder,
                                lines,
                            }
                        }
                        None => {
                            if let Some(fragment) = decoder.finish() {
                                debug!(
                                    size = fragment.len(),
                                    "Discarding unterminated trailing fragment"
                                );
                            }
                            return Ok(None);
                        }
                    }
                }
            }
        };
    }
}
