use std::io::Write;

/// Raw HTTP response head for an SSE stream, written before any frames.
pub const SSE_RESPONSE_HEAD: &str = "HTTP/1.1 200 OK\r\n\
                                     Content-Type: text/event-stream\r\n\
                                     Cache-Control: no-cache\r\n\
                                     Connection: keep-alive\r\n\
                                     X-Accel-Buffering: no\r\n\
                                     \r\n";

/// Formats a named SSE event with a JSON data payload.
///
/// Output format:
/// ```text
/// event: <name>\n
/// data: <json>\n
/// \n
/// ```
pub fn format_sse_event(event_name: &str, json_data: &str) -> String {
    format!("event: {}\ndata: {}\n\n", event_name, json_data)
}

/// Keep-alive SSE comment. EventSource clients ignore lines starting with
/// `:` but the connection stays open.
pub fn format_sse_keepalive() -> &'static str {
    ": ping\n\n"
}

/// Writes a single SSE message, flushing immediately.
pub fn write_sse<W: Write>(writer: &mut W, msg: &str) -> std::io::Result<()> {
    writer.write_all(msg.as_bytes())?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_frame_layout() {
        assert_eq!(format_sse_event("epoch", "{\"epoch\":1}"), "event: epoch\ndata: {\"epoch\":1}\n\n");
    }

    #[test]
    fn writes_whole_frame() {
        let mut out = Vec::new();
        write_sse(&mut out, format_sse_keepalive()).unwrap();
        assert_eq!(out, b": ping\n\n");
    }

    #[test]
    fn response_head_ends_with_blank_line() {
        assert!(SSE_RESPONSE_HEAD.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(SSE_RESPONSE_HEAD.ends_with("\r\n\r\n"));
        assert!(SSE_RESPONSE_HEAD.contains("Content-Type: text/event-stream\r\n"));
    }
}
