// Shared test helpers: an in-memory transport with scripted replies.
//
// Each `open` pops the next reply. The transport records the host of every
// connection and the bytes written on it, so tests can assert exactly what
// went over the wire.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::{self, Cursor, Read, Write};
use std::rc::Rc;

use go2web::fetch::Stream;
use go2web::{SecureTransport, TransportError};

#[derive(Default)]
pub struct MockTransport {
    replies: RefCell<VecDeque<Vec<u8>>>,
    hosts: RefCell<Vec<String>>,
    requests: Rc<RefCell<Vec<String>>>,
}

#[allow(dead_code)] // Not every test file uses every helper
impl MockTransport {
    pub fn new<I, B>(replies: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: AsRef<[u8]>,
    {
        Self {
            replies: RefCell::new(replies.into_iter().map(|r| r.as_ref().to_vec()).collect()),
            ..Default::default()
        }
    }

    /// Hosts connected to, in order.
    pub fn hosts(&self) -> Vec<String> {
        self.hosts.borrow().clone()
    }

    /// Requests written, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }

    pub fn connections(&self) -> usize {
        self.hosts.borrow().len()
    }
}

impl SecureTransport for MockTransport {
    fn open(&self, host: &str) -> Result<Box<dyn Stream>, TransportError> {
        self.hosts.borrow_mut().push(host.to_string());
        let reply = self.replies.borrow_mut().pop_front().ok_or_else(|| {
            TransportError::Io(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                format!("no scripted reply for {host}"),
            ))
        })?;
        Ok(Box::new(MockStream {
            reply: Cursor::new(reply),
            written: Vec::new(),
            requests: Rc::clone(&self.requests),
        }))
    }
}

struct MockStream {
    reply: Cursor<Vec<u8>>,
    written: Vec<u8>,
    requests: Rc<RefCell<Vec<String>>>,
}

impl Read for MockStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reply.read(buf)
    }
}

impl Write for MockStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.written.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for MockStream {
    fn drop(&mut self) {
        let request = String::from_utf8_lossy(&self.written).into_owned();
        self.requests.borrow_mut().push(request);
    }
}

/// A 3xx response pointing at `location`.
#[allow(dead_code)]
pub fn redirect(code: u16, location: &str) -> String {
    format!("HTTP/1.1 {code} Moved\r\nLocation: {location}\r\nConnection: close\r\n\r\n")
}

/// A 200 response carrying `body`.
#[allow(dead_code)]
pub fn ok(body: &str) -> String {
    format!("HTTP/1.1 200 OK\r\nConnection: close\r\n\r\n{body}")
}
