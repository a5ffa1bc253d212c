//! Error handling.
//!
//! Failures are split into:
//! - **Transport**: connection, TLS and I/O faults on the secure stream
//! - **Protocol**: responses that cannot be parsed (malformed status line)
//! - **Application**: invalid input URLs, unexpected search status, cache I/O
//!
//! Callers receive these as an explicit [`Error`] value and decide how to
//! present them; nothing in the library panics on a failed request.

mod types;

// Re-export public API
pub use types::{
    ConfigValidationError, Error, ErrorKind, InitializationError, TransportError,
};
