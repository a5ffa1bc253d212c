//! Raw HTTP/1.1 over TLS.
//!
//! This module provides:
//! - Request construction (`request`)
//! - Secure streams to port 443 (`transport`)
//! - Reading a response until the peer closes the stream (`reader`)
//! - Status line and header parsing (`response`)
//! - Bounded redirect following (`redirects`)

mod reader;
mod redirects;
mod request;
mod response;
mod target;
mod transport;


// Re-export public API
pub use reader::read_response;
pub use redirects::RedirectResolver;
pub use request::Request;
pub use response::{parse, Headers, ParsedResponse, StatusClass};
pub use target::Target;
pub use transport::{SecureTransport, Stream, TlsTransport};
