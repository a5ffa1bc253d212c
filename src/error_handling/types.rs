//! Error type definitions.
//!
//! This module defines all error types used throughout the application.

use std::fmt;

use log::SetLoggerError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// The configuration failed validation.
    #[error("Invalid configuration: {0}")]
    ConfigError(#[from] ConfigValidationError),
}

/// A configuration value that the client cannot work with.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field} {message}")]
pub struct ConfigValidationError {
    /// Name of the offending `Config` field
    pub field: &'static str,
    /// What is wrong with it
    pub message: String,
}

impl ConfigValidationError {
    pub(crate) fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Faults of the secure byte stream: connecting, the TLS session, or I/O on it.
#[derive(Error, Debug)]
pub enum TransportError {
    /// No address of the host accepted a connection.
    #[error("Failed to connect to {host}:{port}: {source}")]
    Connect {
        host: String,
        port: u16,
        #[source]
        source: std::io::Error,
    },

    /// The host cannot be used as a TLS server name.
    #[error("Invalid server name {0:?}")]
    InvalidServerName(String),

    /// The TLS session could not be created.
    #[error("TLS session error: {0}")]
    Tls(#[from] rustls::Error),

    /// Reading from or writing to the stream failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The peer sent more than the client is willing to buffer.
    #[error("Response exceeded {limit} bytes")]
    ResponseTooLarge { limit: usize },
}

/// Crate-wide error.
///
/// Every failure a caller can observe is one of these variants. `Fetch` wraps
/// any failure that happened while resolving a URL so the message names the
/// target being fetched.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Malformed status line: {0:?}")]
    MalformedStatusLine(String),

    #[error("Invalid URL {0:?}")]
    InvalidUrl(String),

    #[error("Unexpected HTTP status {0}")]
    UnexpectedStatus(u16),

    #[error("Cache error: {0}")]
    Cache(String),

    #[error("Failed to fetch {target}: {source}")]
    Fetch {
        target: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// The tag of this failure. `Fetch` reports the kind of the wrapped error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Transport(_) => ErrorKind::Transport,
            Error::MalformedStatusLine(_) => ErrorKind::MalformedStatusLine,
            Error::InvalidUrl(_) => ErrorKind::InvalidUrl,
            Error::UnexpectedStatus(_) => ErrorKind::UnexpectedStatus,
            Error::Cache(_) => ErrorKind::Cache,
            Error::Fetch { source, .. } => source.kind(),
        }
    }

    pub(crate) fn fetching(target: impl Into<String>, source: Error) -> Self {
        Error::Fetch {
            target: target.into(),
            source: Box::new(source),
        }
    }
}

/// Categories of failure, used to tag an [`Error`] without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorKind {
    Transport,
    MalformedStatusLine,
    InvalidUrl,
    UnexpectedStatus,
    Cache,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Transport => "Transport error",
            ErrorKind::MalformedStatusLine => "Malformed status line",
            ErrorKind::InvalidUrl => "Invalid URL",
            ErrorKind::UnexpectedStatus => "Unexpected HTTP status",
            ErrorKind::Cache => "Cache error",
        }
    }
}
