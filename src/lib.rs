//! go2web library: a minimal HTTPS client over raw HTTP/1.1.
//!
//! The core is the protocol layer in [`fetch`]: building a request by hand,
//! writing it to a TLS stream, reading until the peer closes, parsing the
//! status line and headers, and following redirects up to a bound. Search
//! results are memoized in a [`ResultCache`] persisted as JSON.
//!
//! # Example
//!
//! ```no_run
//! use go2web::fetch::{RedirectResolver, TlsTransport};
//!
//! # fn main() -> Result<(), go2web::Error> {
//! go2web::initialization::init_crypto_provider();
//! let resolver = RedirectResolver::new(TlsTransport::new(None, None));
//! let response = resolver.fetch("example.com", "/")?;
//! println!("{} ({} bytes)", response.status_code, response.body.len());
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod cache;
pub mod config;
pub mod error_handling;
pub mod fetch;
pub mod html;
pub mod initialization;
pub mod search;

// Re-export public API
pub use app::run;
pub use cache::ResultCache;
pub use config::{Cli, Command, Config, LogFormat, LogLevel};
pub use error_handling::{Error, ErrorKind, TransportError};
pub use fetch::{ParsedResponse, RedirectResolver, SecureTransport, StatusClass};
