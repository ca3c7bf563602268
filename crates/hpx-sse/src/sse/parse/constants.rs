//! Common constants used across the SSE parser.

/// Newline byte
pub(crate) const LF: u8 = b'\n';
/// Carriage return byte
pub(crate) const CR: u8 = b'\r';

/// Byte Order Mark as char
pub(crate) const BOM_CHAR: char = '\u{FEFF}';

/// Frame delimiter made of two LFs
pub(crate) const LF_LF: &[u8] = b"\n\n";
/// Frame delimiter made of two CRs
pub(crate) const CR_CR: &[u8] = b"\r\r";
/// Frame delimiter made of two CRLF pairs
pub(crate) const CRLF_CRLF: &[u8] = b"\r\n\r\n";

/// Longest delimiter, minus one byte: how far back a rescan must start so a
/// delimiter split across two reads is still found.
pub(crate) const DELIMITER_OVERLAP: usize = CRLF_CRLF.len() - 1;

pub(crate) const FIELD_EVENT: &str = "event";
pub(crate) const FIELD_DATA: &str = "data";
pub(crate) const FIELD_ID: &str = "id";
pub(crate) const FIELD_RETRY: &str = "retry";
