use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Thread used when the caller does not name one
pub const DEFAULT_THREAD_ID: &str = "default";

/// Chat request body posted to the backend
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ChatRequest {
    pub message: String,
    pub thread_id: String,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>, thread_id: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            thread_id: thread_id.into(),
        }
    }
}

/// Event decoded from a `data: ` line of the response stream
///
/// The wire form is an object tagged by its `type` field. Tags other than
/// `text` and `done` are kept as [`ChatEvent::Unknown`] with the full payload
/// so callers can decide what to do with them.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatEvent {
    /// A chunk of assistant output
    Text { content: String },
    /// Terminal marker for the current exchange
    Done,
    /// Any other tag, passed through untouched
    Unknown { kind: String, payload: Value },
}

impl ChatEvent {
    pub fn text(content: impl Into<String>) -> Self {
        ChatEvent::Text {
            content: content.into(),
        }
    }

    /// The wire value of the `type` tag
    pub fn kind(&self) -> &str {
        match self {
            ChatEvent::Text { .. } => "text",
            ChatEvent::Done => "done",
            ChatEvent::Unknown { kind, .. } => kind,
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, ChatEvent::Done)
    }
}

/// Known variants in their wire shape
#[derive(Debug, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum WireEvent {
    Text { content: String },
    Done,
}

impl<'de> Deserialize<'de> for ChatEvent {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let kind = match value.get("type") {
            Some(Value::String(kind)) => kind.clone(),
            Some(_) => return Err(de::Error::custom("event `type` must be a string")),
            None => return Err(de::Error::missing_field("type")),
        };

        match kind.as_str() {
            "text" | "done" => {
                let wire =
                    WireEvent::deserialize(value).map_err(<D::Error as de::Error>::custom)?;
                match wire {
                    WireEvent::Text { content } => Ok(ChatEvent::Text { content }),
                    WireEvent::Done => Ok(ChatEvent::Done),
                }
            }
            _ => Ok(ChatEvent::Unknown {
                kind,
                payload: value,
            }),
        }
    }
}

impl Serialize for ChatEvent {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            ChatEvent::Text { content } => WireEvent::Text {
                content: content.clone(),
            }
            .serialize(serializer),
            ChatEvent::Done => WireEvent::Done.serialize(serializer),
            ChatEvent::Unknown { payload, .. } => payload.serialize(serializer),
        }
    }
}
