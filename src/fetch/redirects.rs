//! HTTP redirect chain resolution.
//!
//! This module follows redirect chains manually, one fresh connection per hop,
//! with a bound on the number of hops.

use std::io::Write;

use log::{debug, info, warn};

use crate::config::DEFAULT_MAX_REDIRECTS;
use crate::error_handling::{Error, TransportError};
use crate::fetch::reader::read_response;
use crate::fetch::request::Request;
use crate::fetch::response::{parse, ParsedResponse};
use crate::fetch::target::Target;
use crate::fetch::transport::SecureTransport;

/// Fetches URLs and follows `Location` redirects up to a bound.
///
/// Each attempt builds a request, opens a new stream, reads the whole response
/// and parses it. A redirect response with a usable `Location` is followed
/// while hops remain. Anything else ends the chain and is returned as the final
/// response, including a redirect once the bound is exhausted.
pub struct RedirectResolver<T> {
    transport: T,
    max_redirects: usize,
}

/// Loop-local state of one top-level fetch.
#[derive(Debug)]
struct RedirectChain {
    current: Target,
    attempts_remaining: usize,
    hops: Vec<String>,
}

impl RedirectChain {
    fn new(start: Target, max_redirects: usize) -> Self {
        Self {
            current: start,
            attempts_remaining: max_redirects,
            hops: Vec::new(),
        }
    }

    fn hop(&mut self, next: Target) {
        self.hops.push(self.current.to_string());
        self.current = next;
        self.attempts_remaining -= 1;
    }
}

impl<T: SecureTransport> RedirectResolver<T> {
    /// Creates a resolver following at most `DEFAULT_MAX_REDIRECTS` hops.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }

    pub fn with_max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    pub fn max_redirects(&self) -> usize {
        self.max_redirects
    }

    /// Fetches `path` from `host`, following redirects.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Fetch`] naming the URL whose request failed, wrapping
    /// the transport or parse error. Running out of redirect hops is not an
    /// error.
    pub fn fetch(&self, host: &str, path: &str) -> Result<ParsedResponse, Error> {
        self.fetch_target(Target::new(host, path))
    }

    /// Same as [`fetch`](Self::fetch) for an already built target.
    pub fn fetch_target(&self, start: Target) -> Result<ParsedResponse, Error> {
        let mut chain = RedirectChain::new(start, self.max_redirects);

        loop {
            let response = self
                .fetch_once(&chain.current)
                .map_err(|e| Error::fetching(chain.current.to_string(), e))?;

            debug!("{} -> {}", chain.current, response.status_code);

            if !response.is_redirect() {
                return Ok(response);
            }

            let Some(location) = response.location() else {
                warn!(
                    "Redirect status {} for {} but no Location header",
                    response.status_code, chain.current
                );
                return Ok(response);
            };

            if chain.attempts_remaining == 0 {
                warn!(
                    "Redirect limit ({}) reached at {}; returning the last response",
                    self.max_redirects, chain.current
                );
                return Ok(response);
            }

            let next = match chain.current.resolve(location) {
                Ok(next) => next,
                Err(e) => {
                    warn!("Not following Location {location:?} from {}: {e}", chain.current);
                    return Ok(response);
                }
            };

            info!("Redirect {} {} -> {}", response.status_code, chain.current, next);
            chain.hop(next);
            debug!("Redirect chain so far: {:?}", chain.hops);
        }
    }

    fn fetch_once(&self, target: &Target) -> Result<ParsedResponse, Error> {
        let request = Request::get(&target.host, &target.path);

        let mut stream = self.transport.open(request.host())?;
        stream
            .write_all(&request.to_wire())
            .and_then(|()| stream.flush())
            .map_err(TransportError::from)?;

        let raw = read_response(&mut stream)?;
        drop(stream);
        debug!("Read {} bytes from {target}", raw.len());

        parse(&raw)
    }
}
