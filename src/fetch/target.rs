//! Request targets: the host to connect to and the path to ask for.

use std::fmt;

use log::warn;
use url::Url;

use crate::config::HTTPS_PORT;
use crate::error_handling::Error;

/// Where a request goes. Every target is reached over HTTPS on port 443.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub host: String,
    /// Path plus `?query` when present; never empty
    pub path: String,
}

impl Target {
    pub fn new(host: impl Into<String>, path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            host: host.into(),
            path: if path.is_empty() { "/".to_string() } else { path },
        }
    }

    /// Converts an `http`/`https` URL into a target.
    ///
    /// `http` URLs are fetched over HTTPS and an explicit port other than 443
    /// is ignored; both are logged.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] for other schemes or a missing host.
    pub fn from_url(url: &Url) -> Result<Self, Error> {
        match url.scheme() {
            "https" => {}
            "http" => warn!("Upgrading {url} to https"),
            _ => return Err(Error::InvalidUrl(url.to_string())),
        }

        let host = url
            .host_str()
            .filter(|host| !host.is_empty())
            .ok_or_else(|| Error::InvalidUrl(url.to_string()))?;

        if let Some(port) = url.port().filter(|port| *port != HTTPS_PORT) {
            warn!("Ignoring port {port} in {url}; connecting to {HTTPS_PORT}");
        }

        let mut path = url.path().to_string();
        if let Some(query) = url.query() {
            path.push('?');
            path.push_str(query);
        }

        Ok(Self::new(host, path))
    }

    /// Resolves a `Location` value against this target.
    ///
    /// Absolute URLs replace the target, scheme-relative (`//host/x`) ones keep
    /// https, and relative references resolve against the current URL the way
    /// a browser would (`/a` replaces the path, `b` replaces the last segment).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] when the location cannot be resolved to an
    /// `http`/`https` URL with a host.
    pub fn resolve(&self, location: &str) -> Result<Self, Error> {
        let resolved = match Url::parse(location) {
            Ok(url) => url,
            Err(_) => self
                .url()?
                .join(location)
                .map_err(|_| Error::InvalidUrl(location.to_string()))?,
        };
        Self::from_url(&resolved)
    }

    fn url(&self) -> Result<Url, Error> {
        Url::parse(&self.to_string()).map_err(|_| Error::InvalidUrl(self.to_string()))
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "https://{}{}", self.host, self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn current() -> Target {
        Target::new("example.com", "/docs/page?x=1")
    }

    #[test]
    fn test_empty_path_becomes_root() {
        assert_eq!(Target::new("example.com", "").path, "/");
    }

    #[test]
    fn test_display() {
        assert_eq!(current().to_string(), "https://example.com/docs/page?x=1");
    }

    #[test]
    fn test_resolve_absolute_location() {
        let next = current().resolve("https://other.example/home").unwrap();
        assert_eq!(next, Target::new("other.example", "/home"));
    }

    #[test]
    fn test_resolve_keeps_query() {
        let next = current().resolve("https://other.example/search?q=a+b").unwrap();
        assert_eq!(next.path, "/search?q=a+b");
    }

    #[test]
    fn test_resolve_absolute_path() {
        let next = current().resolve("/login").unwrap();
        assert_eq!(next, Target::new("example.com", "/login"));
    }

    #[test]
    fn test_resolve_relative_path() {
        let next = current().resolve("other").unwrap();
        assert_eq!(next, Target::new("example.com", "/docs/other"));
    }

    #[test]
    fn test_resolve_scheme_relative() {
        let next = current().resolve("//cdn.example/x").unwrap();
        assert_eq!(next, Target::new("cdn.example", "/x"));
    }

    #[test]
    fn test_http_location_is_fetched_over_https() {
        let next = current().resolve("http://example.com/plain").unwrap();
        assert_eq!(next.to_string(), "https://example.com/plain");
    }

    #[test]
    fn test_unsupported_scheme_is_rejected() {
        assert!(matches!(
            current().resolve("ftp://example.com/file"),
            Err(Error::InvalidUrl(_))
        ));
        assert!(matches!(
            current().resolve("mailto:someone@example.com"),
            Err(Error::InvalidUrl(_))
        ));
    }
}
