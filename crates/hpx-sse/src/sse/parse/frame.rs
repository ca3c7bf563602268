//! Incremental splitting of a byte stream into SSE frames.

use bytes::{Buf, BytesMut};
use tracing::trace;

use super::constants::{CR, CR_CR, CRLF_CRLF, DELIMITER_OVERLAP, LF, LF_LF};

/// Splits incoming bytes into blank-line terminated frames.
///
/// A frame ends at two consecutive identical line endings: `\n\n`, `\r\r` or
/// `\r\n\r\n`. Mixed pairs such as `\n\r\n` are not delimiters. Bytes after
/// the last delimiter are kept until a later call completes them, so the
/// output does not depend on how the stream was chunked.
#[derive(Debug, Default)]
pub struct FrameParser {
    buffer: BytesMut,
    /// Offset where the next delimiter search starts.
    scan_from: usize,
}

impl FrameParser {
    /// Create an empty parser.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `bytes` and return every frame completed by them.
    ///
    /// Each frame includes its trailing delimiter. Frames that are not valid
    /// UTF-8 are dropped.
    pub fn process(&mut self, bytes: &[u8]) -> Vec<String> {
        let mut frames = Vec::new();
        if bytes.is_empty() {
            return frames;
        }
        self.buffer.extend_from_slice(bytes);

        while let Some(frame_end) = find_delimiter(&self.buffer, self.scan_from) {
            let frame = self.buffer.split_to(frame_end);
            self.scan_from = 0;
            match String::from_utf8(frame.to_vec()) {
                Ok(frame) => frames.push(frame),
                Err(err) => {
                    trace!(len = frame_end, error = %err, "Dropping non UTF-8 SSE frame");
                }
            }
        }

        self.scan_from = self.buffer.len().saturating_sub(DELIMITER_OVERLAP);
        frames
    }

    /// Number of bytes held back waiting for a delimiter.
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Discard any partially received frame.
    pub fn reset(&mut self) {
        self.buffer.advance(self.buffer.len());
        self.scan_from = 0;
    }
}

/// Finds the first frame delimiter at or after `from`.
///
/// Returns the exclusive end of the frame, delimiter included.
fn find_delimiter(bytes: &[u8], from: usize) -> Option<usize> {
    let mut pos = from;
    while let Some(offset) = memchr::memchr2(CR, LF, &bytes[pos..]) {
        let start = pos + offset;
        let rest = &bytes[start..];
        for delimiter in [LF_LF, CR_CR, CRLF_CRLF] {
            if rest.starts_with(delimiter) {
                return Some(start + delimiter.len());
            }
        }
        pos = start + 1;
    }
    None
}
