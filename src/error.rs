use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChatError {
    #[error("HTTP {status}")]
    TransportError { status: u16 },

    #[error("Response carried no body")]
    NoBodyError,

    #[error("Malformed payload: {source} - line was: {line}")]
    MalformedPayloadError {
        line: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Request failed: {0}")]
    RequestError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Environment variable error: {0}")]
    EnvVarError(#[from] std::env::VarError),
}

impl ChatError {
    /// HTTP status attached to a transport failure, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            ChatError::TransportError { status } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ChatError>;
