//! Application initialization and resource setup.
//!
//! This module provides functions to initialize the shared resources of one
//! invocation:
//! - Logger
//! - rustls crypto provider
//! - TLS transport and redirect resolver

mod logger;

use rustls::crypto::{ring::default_provider, CryptoProvider};

use crate::config::Config;
use crate::error_handling::InitializationError;
use crate::fetch::{RedirectResolver, TlsTransport};

// Re-export public API
pub use logger::init_logger_with;

/// Initializes the crypto provider for TLS operations.
///
/// Configures the global crypto provider for `rustls`. This must be called before
/// any TLS connections are established.
pub fn init_crypto_provider() {
    // The return value is ignored because reinstalling the provider is harmless
    let _ = CryptoProvider::install_default(default_provider());
}

/// Validates `config` and builds the resolver used for every request of this run.
///
/// # Errors
///
/// Returns `InitializationError::ConfigError` if the configuration is invalid.
pub fn init_resolver(config: &Config) -> Result<RedirectResolver<TlsTransport>, InitializationError> {
    config.validate()?;
    let transport = TlsTransport::from_config(config);
    Ok(RedirectResolver::new(transport).with_max_redirects(config.max_redirects))
}
