pub mod decoder;
pub mod events;
pub mod parser;

pub use decoder::{LineBuffer, LineDecoder, Utf8StreamDecoder};
pub use events::{ChatEventStream, event_stream};
pub use parser::{DATA_PREFIX, parse_data_line};
