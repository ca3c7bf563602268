//! Field parsing for a single SSE frame.

use super::{
    constants::{BOM_CHAR, FIELD_DATA, FIELD_EVENT, FIELD_ID, FIELD_RETRY},
    event::ParsedEvent,
};

/// Parse the lines of one frame into a [`ParsedEvent`].
///
/// Lines may end in LF, CR or CRLF. Each non-empty line is split at its first
/// `:`; a line without one is a field name with an empty value, and a single
/// space after the colon is dropped. `id`, `event` and `retry` keep their last
/// value, `data` lines accumulate joined by `\n`. Anything else, including
/// comments (lines starting with `:`), is ignored.
pub fn parse_frame(frame: &str) -> ParsedEvent {
    let frame = frame.strip_prefix(BOM_CHAR).unwrap_or(frame);
    let mut event = ParsedEvent::default();

    for line in frame.split(['\r', '\n']).filter(|line| !line.is_empty()) {
        let (name, value) = split_field(line);
        match name {
            FIELD_ID => event.id = Some(value.to_string()),
            FIELD_EVENT => event.event = Some(value.to_string()),
            FIELD_RETRY => event.retry = Some(value.to_string()),
            FIELD_DATA => match &mut event.data {
                Some(data) => {
                    data.push('\n');
                    data.push_str(value);
                }
                None => event.data = Some(value.to_string()),
            },
            _ => {}
        }
    }

    event
}

fn split_field(line: &str) -> (&str, &str) {
    match line.split_once(':') {
        Some((name, value)) => (name, value.strip_prefix(' ').unwrap_or(value)),
        None => (line, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiple_data_lines() {
        let event = parse_frame("data: foo\ndata: bar\n");
        assert_eq!(event.data.as_deref(), Some("foo\nbar"));
        assert!(event.id.is_none());
        assert!(event.event.is_none());
    }

    #[test]
    fn test_retry_only() {
        let event = parse_frame("retry: 5000\n");
        assert_eq!(event, ParsedEvent {
            retry: Some("5000".to_string()),
            ..Default::default()
        });
    }

    #[test]
    fn test_all_fields() {
        let event = parse_frame("event: update\nid: 42\ndata: {\"qty\":1}\nretry: 10\n\n");
        assert_eq!(event, ParsedEvent {
            id: Some("42".to_string()),
            event: Some("update".to_string()),
            data: Some("{\"qty\":1}".to_string()),
            retry: Some("10".to_string()),
        });
    }

    #[test]
    fn test_later_fields_overwrite() {
        let event = parse_frame("event: a\nevent: b\nid: 1\nid: 2\ndata: x\n\n");
        assert_eq!(event.event.as_deref(), Some("b"));
        assert_eq!(event.id.as_deref(), Some("2"));
    }

    #[test]
    fn test_only_one_leading_space_is_stripped() {
        assert_eq!(parse_frame("data:test\n").data.as_deref(), Some("test"));
        assert_eq!(parse_frame("data: test\n").data.as_deref(), Some("test"));
        assert_eq!(parse_frame("data:  test\n").data.as_deref(), Some(" test"));
    }

    #[test]
    fn test_value_keeps_later_colons() {
        let event = parse_frame("data: a:b: c\n");
        assert_eq!(event.data.as_deref(), Some("a:b: c"));
    }

    #[test]
    fn test_line_without_colon() {
        let event = parse_frame("data\nid\n");
        assert_eq!(event.data.as_deref(), Some(""));
        assert_eq!(event.id.as_deref(), Some(""));
    }

    #[test]
    fn test_comments_and_unknown_fields_are_ignored() {
        let event = parse_frame(": keep-alive\nfoo: bar\nDATA: loud\n");
        assert!(event.is_empty());
        assert!(event.retry.is_none());
    }

    #[test]
    fn test_any_newline_convention() {
        let event = parse_frame("data: a\r\ndata: b\rdata: c\n\r\n");
        assert_eq!(event.data.as_deref(), Some("a\nb\nc"));
    }

    #[test]
    fn test_empty_frame() {
        assert!(parse_frame("\n\n").is_empty());
        assert!(parse_frame("").is_empty());
    }

    #[test]
    fn test_leading_bom_is_stripped() {
        let event = parse_frame("\u{FEFF}data: x\n\n");
        assert_eq!(event.data.as_deref(), Some("x"));
    }

    #[test]
    fn test_nul_in_id_is_kept_raw() {
        let event = parse_frame("id: a\0b\ndata: x\n");
        assert_eq!(event.id.as_deref(), Some("a\0b"));
    }
}
