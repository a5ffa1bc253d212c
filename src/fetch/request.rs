//! HTTP/1.1 request construction.

/// A `GET` request ready to be written to a transport.
///
/// Headers keep their insertion order; the wire form is
/// `GET {path} HTTP/1.1\r\nHost: {host}\r\nConnection: close\r\n\r\n`.
/// `Connection: close` makes the server end the stream after one response,
/// which is how the reader knows the response is complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    method: &'static str,
    host: String,
    path: String,
    headers: Vec<(String, String)>,
}

impl Request {
    /// Builds a `GET` request for `path` on `host`. An empty path becomes `/`.
    pub fn get(host: &str, path: &str) -> Self {
        let path = if path.is_empty() { "/" } else { path };
        Self {
            method: "GET",
            host: host.to_string(),
            path: path.to_string(),
            headers: vec![
                ("Host".to_string(), host.to_string()),
                ("Connection".to_string(), "close".to_string()),
            ],
        }
    }

    pub fn method(&self) -> &str {
        self.method
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Serializes the request line and headers.
    pub fn to_wire(&self) -> Vec<u8> {
        let mut wire = format!("{} {} HTTP/1.1\r\n", self.method, self.path);
        for (name, value) in &self.headers {
            wire.push_str(name);
            wire.push_str(": ");
            wire.push_str(value);
            wire.push_str("\r\n");
        }
        wire.push_str("\r\n");
        wire.into_bytes()
    }
}
