pub mod chat;

pub use chat::{ChatEvent, ChatRequest, DEFAULT_THREAD_ID};
