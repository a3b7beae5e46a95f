use bytes::{Buf, BytesMut};

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Stateful UTF-8 decoder for a chunked byte stream
///
/// A code point split across two chunks is held back until the rest of its
/// bytes arrive. Invalid sequences decode to U+FFFD instead of failing.
#[derive(Debug)]
pub struct Utf8StreamDecoder {
    pending: BytesMut,
    started: bool,
}

impl Utf8StreamDecoder {
    pub fn new() -> Self {
        Self {
            pending: BytesMut::with_capacity(4),
            started: false,
        }
    }

    /// Decode a chunk, returning all text that is complete so far
    pub fn decode(&mut self, chunk: &[u8]) -> String {
        self.pending.extend_from_slice(chunk);
        let mut out = String::with_capacity(self.pending.len());

        loop {
            match std::str::from_utf8(&self.pending) {
                Ok(text) => {
                    out.push_str(text);
                    self.pending.clear();
                    break;
                }
                Err(e) => {
                    let valid = e.valid_up_to();
                    out.push_str(&String::from_utf8_lossy(&self.pending[..valid]));
                    match e.error_len() {
                        Some(len) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            self.pending.advance(valid + len);
                        }
                        // Truncated code point at the end: wait for the next chunk
                        None => {
                            self.pending.advance(valid);
                            break;
                        }
                    }
                }
            }
        }

        if !self.started && !out.is_empty() {
            self.started = true;
            if let Some(stripped) = out.strip_prefix(BYTE_ORDER_MARK) {
                return stripped.to_string();
            }
        }

        out
    }

    /// Number of bytes held back waiting for the rest of a code point
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}

impl Default for Utf8StreamDecoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Accumulates decoded text and hands out complete `\n`-terminated lines
#[derive(Debug, Default)]
pub struct LineBuffer {
    buffer: String,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
        }
    }

    /// Append text and drain every complete line, in order
    ///
    /// The newline itself is not part of the returned lines. Whatever follows
    /// the last newline stays buffered.
    pub fn push(&mut self, text: &str) -> Vec<String> {
        self.buffer.push_str(text);

        let Some(last_newline) = self.buffer.rfind('\n') else {
            return Vec::new();
        };

        let rest = self.buffer.split_off(last_newline + 1);
        let mut complete = std::mem::replace(&mut self.buffer, rest);
        complete.pop();

        complete.split('\n').map(str::to_string).collect()
    }

    /// Text received after the last newline
    pub fn remainder(&self) -> &str {
        &self.buffer
    }
}

/// Bytes in, complete lines out
#[derive(Debug, Default)]
pub struct LineDecoder {
    utf8: Utf8StreamDecoder,
    lines: LineBuffer,
}

impl LineDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk of raw bytes and return the lines it completed
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        let text = self.utf8.decode(chunk);
        self.lines.push(&text)
    }

    /// End of input. The unterminated fragment, if any, is returned so the
    /// caller can report it; it is never parsed.
    pub fn finish(self) -> Option<String> {
        let mut fragment = self.lines.buffer;
        if self.utf8.pending_len() > 0 {
            fragment.push(char::REPLACEMENT_CHARACTER);
        }
        if fragment.is_empty() {
            None
        } else {
            Some(fragment)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_ascii() {
        let mut decoder = Utf8StreamDecoder::new();
        assert_eq!(decoder.decode(b"hello"), "hello");
        assert_eq!(decoder.pending_len(), 0);
    }

    #[test]
    fn test_code_point_split_across_chunks() {
        let bytes = "é世🎉".as_bytes();
        let mut decoder = Utf8StreamDecoder::new();

        // 'é' is 2 bytes, '世' is 3, '🎉' is 4
        assert_eq!(decoder.decode(&bytes[..1]), "");
        assert_eq!(decoder.pending_len(), 1);
        assert_eq!(decoder.decode(&bytes[1..3]), "é");
        assert_eq!(decoder.decode(&bytes[3..6]), "世");
        assert_eq!(decoder.decode(&bytes[6..7]), "");
        assert_eq!(decoder.decode(&bytes[7..9]), "");
        assert_eq!(decoder.decode(&bytes[9..]), "🎉");
        assert_eq!(decoder.pending_len(), 0);
    }

    #[test]
    fn test_byte_at_a_time() {
        let input = "naïve – ✓";
        let mut decoder = Utf8StreamDecoder::new();
        let mut out = String::new();
        for byte in input.as_bytes() {
            out.push_str(&decoder.decode(std::slice::from_ref(byte)));
        }
        assert_eq!(out, input);
    }

    #[test]
    fn test_invalid_bytes_become_replacement() {
        let mut decoder = Utf8StreamDecoder::new();
        assert_eq!(decoder.decode(b"a\xffb"), "a\u{fffd}b");
        assert_eq!(decoder.decode(b"\xc3("), "\u{fffd}(");
    }

    #[test]
    fn test_leading_bom_is_stripped_once() {
        let mut decoder = Utf8StreamDecoder::new();
        let bom = "\u{feff}".as_bytes();
        assert_eq!(decoder.decode(&bom[..2]), "");
        assert_eq!(decoder.decode(&bom[2..]), "");
        assert_eq!(decoder.decode("x\u{feff}".as_bytes()), "x\u{feff}");
    }

    #[test]
    fn test_line_buffer_keeps_tail() {
        let mut lines = LineBuffer::new();
        assert!(lines.push("data: a").is_empty());
        assert_eq!(lines.push("bc\ndata: d"), vec!["data: abc"]);
        assert_eq!(lines.remainder(), "data: d");
        assert_eq!(lines.push("\n"), vec!["data: d"]);
        assert_eq!(lines.remainder(), "");
    }

    #[test]
    fn test_line_buffer_empty_lines() {
        let mut lines = LineBuffer::new();
        assert_eq!(lines.push("a\n\nb\n"), vec!["a", "", "b"]);
        assert_eq!(lines.push("\n"), vec![""]);
    }

    #[test]
    fn test_crlf_leaves_carriage_return() {
        let mut lines = LineBuffer::new();
        assert_eq!(lines.push("data: x\r\n\r\n"), vec!["data: x\r", "\r"]);
    }

    #[test]
    fn test_line_decoder_finish_reports_fragment() {
        let mut decoder = LineDecoder::new();
        assert_eq!(decoder.feed(b"one\ntw"), vec!["one"]);
        assert_eq!(decoder.finish().as_deref(), Some("tw"));

        let mut decoder = LineDecoder::new();
        assert_eq!(decoder.feed(b"one\n"), vec!["one"]);
        assert_eq!(decoder.finish(), None);
    }
}
