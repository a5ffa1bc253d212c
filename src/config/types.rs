//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    DEFAULT_CACHE_PATH, DEFAULT_MAX_REDIRECTS, DEFAULT_SEARCH_HOST, MAX_REDIRECT_LIMIT,
    READ_TIMEOUT_SECS, TCP_CONNECT_TIMEOUT_SECS,
};
use crate::error_handling::ConfigValidationError;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Library configuration (no CLI dependencies).
///
/// # Examples
///
/// ```no_run
/// use go2web::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     cache_path: PathBuf::from("/tmp/go2web.json"),
///     max_redirects: 3,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,

    /// Search cache file (JSON)
    pub cache_path: PathBuf,

    /// Redirect hops followed before the last response is returned as final
    pub max_redirects: usize,

    /// TCP connect timeout in seconds (0 disables it)
    pub connect_timeout_seconds: u64,

    /// Socket read/write timeout in seconds (0 disables it)
    pub read_timeout_seconds: u64,

    /// Host queried for searches
    pub search_host: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Warn,
            log_format: LogFormat::Plain,
            cache_path: PathBuf::from(DEFAULT_CACHE_PATH),
            max_redirects: DEFAULT_MAX_REDIRECTS,
            connect_timeout_seconds: TCP_CONNECT_TIMEOUT_SECS,
            read_timeout_seconds: READ_TIMEOUT_SECS,
            search_host: DEFAULT_SEARCH_HOST.to_string(),
        }
    }
}

impl Config {
    /// Checks the configuration for values the client cannot work with.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigValidationError`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.max_redirects > MAX_REDIRECT_LIMIT {
            return Err(ConfigValidationError::new(
                "max_redirects",
                format!(
                    "must be at most {MAX_REDIRECT_LIMIT} (got {})",
                    self.max_redirects
                ),
            ));
        }
        if self.search_host.trim().is_empty() {
            return Err(ConfigValidationError::new(
                "search_host",
                "must not be empty",
            ));
        }
        Ok(())
    }
}

/// What a single invocation should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Fetch a URL and display its content
    Fetch(String),
    /// Search for a query and list the result links
    Search(String),
}

/// Command-line interface.
#[derive(Debug, Parser)]
#[command(
    name = "go2web",
    version,
    about = "Fetch web pages and search the web over raw HTTPS"
)]
pub struct Cli {
    /// Fetch and display content from <URL>
    #[arg(short = 'u', long = "url", value_name = "URL", conflicts_with = "search")]
    pub url: Option<String>,

    /// Search <QUERY> and display the top results
    #[arg(short = 's', long = "search", value_name = "QUERY", num_args = 1..)]
    pub search: Option<Vec<String>>,

    /// Search cache file
    #[arg(long, default_value = DEFAULT_CACHE_PATH)]
    pub cache_path: PathBuf,

    /// Redirect hops to follow before giving up
    #[arg(long, default_value_t = DEFAULT_MAX_REDIRECTS)]
    pub max_redirects: usize,

    /// TCP connect timeout in seconds (0 disables it)
    #[arg(long = "connect-timeout", default_value_t = TCP_CONNECT_TIMEOUT_SECS)]
    pub connect_timeout_seconds: u64,

    /// Socket read timeout in seconds (0 disables it)
    #[arg(long = "read-timeout", default_value_t = READ_TIMEOUT_SECS)]
    pub read_timeout_seconds: u64,

    /// Host queried for searches
    #[arg(long, default_value = DEFAULT_SEARCH_HOST)]
    pub search_host: String,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl Cli {
    /// The requested command, or `None` when neither `-u` nor `-s` was given.
    pub fn to_command(&self) -> Option<Command> {
        if let Some(url) = &self.url {
            return Some(Command::Fetch(url.clone()));
        }
        let query = self.search.as_ref()?.join(" ");
        if query.trim().is_empty() {
            return None;
        }
        Some(Command::Search(query))
    }

    /// Builds the library configuration from the parsed options.
    pub fn config(&self) -> Config {
        Config {
            log_level: self.log_level.clone(),
            log_format: self.log_format.clone(),
            cache_path: self.cache_path.clone(),
            max_redirects: self.max_redirects,
            connect_timeout_seconds: self.connect_timeout_seconds,
            read_timeout_seconds: self.read_timeout_seconds,
            search_host: self.search_host.clone(),
        }
    }
}
