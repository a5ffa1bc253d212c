//! Configuration constants.
//!
//! This module defines the constants used throughout the application, including
//! protocol parameters, size limits and the defaults behind [`crate::Config`].

/// Port every request is sent to. Only HTTPS is spoken.
pub const HTTPS_PORT: u16 = 443;

// Redirect handling
/// Default number of redirect hops followed before giving up and returning the
/// last response received
pub const DEFAULT_MAX_REDIRECTS: usize = 5;
/// Upper bound accepted for `--max-redirects`
pub const MAX_REDIRECT_LIMIT: usize = 20;

// Network operation timeouts
/// TCP connection timeout in seconds
pub const TCP_CONNECT_TIMEOUT_SECS: u64 = 10;
/// Socket read/write timeout in seconds
/// A stalled peer otherwise stalls the whole program
pub const READ_TIMEOUT_SECS: u64 = 30;

// Response handling
/// Size of each read from the transport (bytes)
pub const READ_CHUNK_SIZE: usize = 1024;
/// Maximum accumulated response size in bytes (16MB)
/// Responses larger than this are abandoned to prevent memory exhaustion
pub const MAX_RESPONSE_SIZE: usize = 16 * 1024 * 1024;

// URL validation
/// Maximum URL length accepted on the command line (2048 characters).
/// This matches common browser and server limits.
pub const MAX_URL_LENGTH: usize = 2048;

// Search
/// Host queried for `-s`
pub const DEFAULT_SEARCH_HOST: &str = "www.google.com";
/// Number of links kept per search query
pub const MAX_SEARCH_RESULTS: usize = 10;
/// Prefix of result anchors on the search results page
pub const SEARCH_RESULT_PREFIX: &str = "/url?q=";

// Cache
/// Default location of the persisted search cache
pub const DEFAULT_CACHE_PATH: &str = "go2web_cache.json";
