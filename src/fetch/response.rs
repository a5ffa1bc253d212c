//! HTTP/1.1 response parsing.
//!
//! The raw buffer is split at the first blank line. Everything before it is
//! decoded lossily and read as a status line followed by `Name: value` lines;
//! everything after it is the body, kept byte for byte.

use std::borrow::Cow;

use log::{debug, trace};
use strum_macros::EnumIter as EnumIterMacro;

use crate::error_handling::Error;

const LINE_TERMINATOR: &str = "\r\n";
const HEAD_TERMINATOR: &[u8] = b"\r\n\r\n";
const HEADER_DELIMITER: &str = ": ";

/// The hundreds-digit grouping of a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum StatusClass {
    /// 1xx
    Informational,
    /// 2xx
    Success,
    /// 3xx
    Redirect,
    /// 4xx
    ClientError,
    /// 5xx
    ServerError,
}

impl StatusClass {
    /// Classifies `code` by its hundreds digit. Codes outside 100..=599 have no class.
    pub fn from_code(code: u16) -> Option<Self> {
        match code / 100 {
            1 => Some(StatusClass::Informational),
            2 => Some(StatusClass::Success),
            3 => Some(StatusClass::Redirect),
            4 => Some(StatusClass::ClientError),
            5 => Some(StatusClass::ServerError),
            _ => None,
        }
    }
}

/// Response headers in arrival order.
///
/// Lookup is case-insensitive and each logical name has one effective value:
/// the first occurrence. Later duplicates are dropped on insert.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, String)>,
}

impl Headers {
    /// Adds a header unless one with the same name (ignoring case) exists.
    /// Returns whether the header was stored.
    pub fn insert(&mut self, name: &str, value: &str) -> bool {
        if self.get(name).is_some() {
            return false;
        }
        self.entries.push((name.to_string(), value.trim().to_string()));
        true
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A fully read and parsed response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedResponse {
    pub status_code: u16,
    pub status_class: StatusClass,
    pub headers: Headers,
    /// Exact bytes after the header block
    pub body: Vec<u8>,
}

impl ParsedResponse {
    pub fn is_redirect(&self) -> bool {
        self.status_class == StatusClass::Redirect
    }

    /// The `Location` header, if any.
    pub fn location(&self) -> Option<&str> {
        self.headers.get("Location")
    }

    /// The body with chunked transfer coding removed.
    ///
    /// Best effort: when the body is not chunked, or the chunk framing does not
    /// parse, the body is returned unchanged.
    pub fn decoded_body(&self) -> Cow<'_, [u8]> {
        let chunked = self
            .headers
            .get("Transfer-Encoding")
            .is_some_and(|te| te.to_ascii_lowercase().contains("chunked"));
        if !chunked {
            return Cow::Borrowed(&self.body);
        }
        match decode_chunked(&self.body) {
            Some(decoded) => Cow::Owned(decoded),
            None => {
                debug!("Chunked body did not decode, using raw body");
                Cow::Borrowed(&self.body)
            }
        }
    }

    /// The decoded body as text, replacing invalid UTF-8.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.decoded_body()).into_owned()
    }
}

/// Parses a raw response buffer.
///
/// Header lines without `": "` are skipped.
///
/// # Errors
///
/// Returns [`Error::MalformedStatusLine`] when the first line is not
/// `HTTP/<version> <code> <reason>` with a code in 100..=599.
pub fn parse(raw: &[u8]) -> Result<ParsedResponse, Error> {
    let (head, body) = match find(raw, HEAD_TERMINATOR) {
        Some(pos) => (&raw[..pos], &raw[pos + HEAD_TERMINATOR.len()..]),
        None => (raw, &raw[raw.len()..]),
    };

    let head = String::from_utf8_lossy(head);
    let mut lines = head.split(LINE_TERMINATOR);
    let status_line = lines.next().unwrap_or_default();
    let status_code = parse_status_line(status_line)?;
    let status_class = StatusClass::from_code(status_code)
        .ok_or_else(|| Error::MalformedStatusLine(status_line.to_string()))?;

    let mut headers = Headers::default();
    for line in lines {
        match line.split_once(HEADER_DELIMITER) {
            Some((name, value)) => {
                if !headers.insert(name, value) {
                    trace!("Ignoring repeated header {name}");
                }
            }
            None => trace!("Ignoring header line without delimiter: {line:?}"),
        }
    }

    Ok(ParsedResponse {
        status_code,
        status_class,
        headers,
        body: body.to_vec(),
    })
}

fn parse_status_line(line: &str) -> Result<u16, Error> {
    let malformed = || Error::MalformedStatusLine(line.to_string());

    let mut parts = line.splitn(3, ' ');
    let version = parts.next().unwrap_or_default();
    let code = parts.next().unwrap_or_default();

    if !version.starts_with("HTTP/") || code.len() != 3 {
        return Err(malformed());
    }
    code.parse::<u16>().map_err(|_| malformed())
}

fn decode_chunked(mut rest: &[u8]) -> Option<Vec<u8>> {
    let mut decoded = Vec::with_capacity(rest.len());
    loop {
        // Tolerate a stream that ended without the last-chunk marker.
        if rest.is_empty() {
            return Some(decoded);
        }
        let line_end = find(rest, LINE_TERMINATOR.as_bytes())?;
        let size_line = std::str::from_utf8(&rest[..line_end]).ok()?;
        let size_hex = size_line.split(';').next()?.trim();
        let size = usize::from_str_radix(size_hex, 16).ok()?;
        rest = &rest[line_end + LINE_TERMINATOR.len()..];

        if size == 0 {
            return Some(decoded);
        }
        if rest.len() < size {
            return None;
        }
        decoded.extend_from_slice(&rest[..size]);
        rest = rest[size..].strip_prefix(LINE_TERMINATOR.as_bytes())?;
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_handling::ErrorKind;
    use strum::IntoEnumIterator;

    #[test]
    fn test_parse_ok_response() {
        let raw = b"HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nConnection: close\r\n\r\n<p>hi</p>";
        let response = parse(raw).unwrap();
        assert_eq!(response.status_code, 200);
        assert_eq!(response.status_class, StatusClass::Success);
        assert_eq!(response.headers.get("content-type"), Some("text/html"));
        assert_eq!(response.headers.len(), 2);
        assert_eq!(response.body, b"<p>hi</p>".to_vec());
    }

    #[test]
    fn test_body_keeps_exact_bytes() {
        let mut raw = b"HTTP/1.1 200 OK\r\n\r\n".to_vec();
        let body = vec![0xff, 0xfe, b'\r', b'\n', b'\r', b'\n', 0x00, b'a'];
        raw.extend_from_slice(&body);
        assert_eq!(parse(&raw).unwrap().body, body);
    }

    #[test]
    fn test_invalid_utf8_in_headers_does_not_abort() {
        let raw = b"HTTP/1.1 200 OK\r\nX-Weird: \xff\xfeok\r\n\r\nbody";
        let response = parse(raw).unwrap();
        assert!(response.headers.get("x-weird").unwrap().ends_with("ok"));
        assert_eq!(response.body, b"body".to_vec());
    }

    #[test]
    fn test_garbage_status_line_is_malformed() {
        let err = parse(b"GARBAGE not a status\r\n\r\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedStatusLine);
        assert!(matches!(err, Error::MalformedStatusLine(line) if line == "GARBAGE not a status"));
    }

    #[test]
    fn test_non_numeric_code_is_malformed() {
        assert!(matches!(
            parse(b"HTTP/1.1 abc OK\r\n\r\n"),
            Err(Error::MalformedStatusLine(_))
        ));
    }

    #[test]
    fn test_out_of_range_code_is_malformed() {
        assert!(matches!(
            parse(b"HTTP/1.1 700 Odd\r\n\r\n"),
            Err(Error::MalformedStatusLine(_))
        ));
    }

    #[test]
    fn test_empty_response_is_malformed() {
        assert!(matches!(parse(b""), Err(Error::MalformedStatusLine(_))));
    }

    #[test]
    fn test_status_line_without_reason() {
        let response = parse(b"HTTP/1.1 204\r\n\r\n").unwrap();
        assert_eq!(response.status_code, 204);
        assert!(response.body.is_empty());
        assert!(response.headers.is_empty());
    }

    #[test]
    fn test_headers_without_body_separator() {
        let response = parse(b"HTTP/1.1 302 Found\r\nLocation: /next").unwrap();
        assert!(response.is_redirect());
        assert_eq!(response.location(), Some("/next"));
        assert!(response.body.is_empty());
    }

    #[test]
    fn test_status_classes() {
        let cases = [
            (100, StatusClass::Informational),
            (204, StatusClass::Success),
            (308, StatusClass::Redirect),
            (404, StatusClass::ClientError),
            (503, StatusClass::ServerError),
        ];
        for (code, class) in cases {
            assert_eq!(StatusClass::from_code(code), Some(class));
        }
        assert_eq!(StatusClass::from_code(99), None);
        assert_eq!(StatusClass::from_code(600), None);
        assert_eq!(StatusClass::iter().count(), 5);
    }

    #[test]
    fn test_location_lookup_is_case_insensitive() {
        let response =
            parse(b"HTTP/1.1 301 Moved\r\nlocation: https://example.com/a\r\n\r\n").unwrap();
        assert_eq!(response.location(), Some("https://example.com/a"));
    }

    #[test]
    fn test_first_header_occurrence_wins() {
        let raw = b"HTTP/1.1 301 Moved\r\nLocation: https://a.example/\r\nLOCATION: https://b.example/\r\n\r\n";
        let response = parse(raw).unwrap();
        assert_eq!(response.location(), Some("https://a.example/"));
        assert_eq!(response.headers.len(), 1);
    }

    #[test]
    fn test_lines_without_delimiter_are_ignored() {
        let raw = b"HTTP/1.1 200 OK\r\nno-delimiter-here\r\nServer:tight\r\nX-Ok: yes\r\n\r\n";
        let response = parse(raw).unwrap();
        assert_eq!(response.headers.len(), 1);
        assert_eq!(response.headers.get("X-Ok"), Some("yes"));
        assert_eq!(response.headers.get("Server"), None);
    }

    #[test]
    fn test_decoded_body_removes_chunking() {
        let raw = b"HTTP/1.1 200 OK\r\nTransfer-Encoding: chunked\r\n\r\n5\r\nHello\r\n7;ext=1\r\n, world\r\n0\r\n\r\n";
        let response = parse(raw).unwrap();
        assert_eq!(response.decoded_body().as_ref(), b"Hello, world");
        assert_eq!(response.text(), "Hello, world");
    }

    #[test]
    fn test_decoded_body_falls_back_on_bad_framing() {
        let raw = b"HTTP/1.1 200 OK\r\nTransfer-Encoding: chunked\r\n\r\nnot-hex\r\nbody";
        let response = parse(raw).unwrap();
        assert_eq!(response.decoded_body().as_ref(), b"not-hex\r\nbody");
    }

    #[test]
    fn test_decoded_body_without_chunking_is_borrowed() {
        let response = parse(b"HTTP/1.1 200 OK\r\n\r\nplain").unwrap();
        assert!(matches!(response.decoded_body(), Cow::Borrowed(b"plain")));
    }
}
