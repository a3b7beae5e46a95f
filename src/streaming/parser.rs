use crate::error::{ChatError, Result};
use crate::models::ChatEvent;

/// Prefix marking a line that carries an event payload
pub const DATA_PREFIX: &str = "data: ";

/// Parse one complete line of the response body
///
/// Returns `Ok(None)` for lines without the data prefix (blank lines,
/// comments, `event:` fields). A prefixed line whose payload does not decode
/// into a [`ChatEvent`] is an error.
pub fn parse_data_line(line: &str) -> Result<Option<ChatEvent>> {
    let Some(payload) = line.strip_prefix(DATA_PREFIX) else {
        return Ok(None);
    };

    serde_json::from_str::<ChatEvent>(payload)
        .map(Some)
        .map_err(|source| ChatError::MalformedPayloadError {
            line: line.to_string(),
            source,
        })
}
