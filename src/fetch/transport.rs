//! Secure byte streams to HTTPS hosts.
//!
//! [`SecureTransport`] is the seam between the protocol code and the network:
//! the redirect resolver only ever asks it for a fresh stream to a host.
//! [`TlsTransport`] is the production implementation on top of `rustls`
//! with the `webpki-roots` trust anchors.

use std::io::{Read, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::sync::Arc;
use std::time::Duration;

use log::debug;
use rustls::pki_types::ServerName;
use rustls::{ClientConfig, ClientConnection, RootCertStore, StreamOwned};

use crate::config::{Config, HTTPS_PORT};
use crate::error_handling::TransportError;

/// An established, ordered, reliable byte stream.
pub trait Stream: Read + Write {}

impl<T: Read + Write + ?Sized> Stream for T {}

/// Opens encrypted, authenticated streams to a host on the HTTPS port.
pub trait SecureTransport {
    /// Opens a new stream to `host`. Every call is a new connection.
    fn open(&self, host: &str) -> Result<Box<dyn Stream>, TransportError>;
}

impl<T: SecureTransport + ?Sized> SecureTransport for &T {
    fn open(&self, host: &str) -> Result<Box<dyn Stream>, TransportError> {
        (**self).open(host)
    }
}

/// TLS over TCP to port 443.
#[derive(Clone)]
pub struct TlsTransport {
    tls_config: Arc<ClientConfig>,
    connect_timeout: Option<Duration>,
    read_timeout: Option<Duration>,
}

impl TlsTransport {
    /// Creates a transport trusting the Mozilla root set. `None` disables a timeout.
    pub fn new(connect_timeout: Option<Duration>, read_timeout: Option<Duration>) -> Self {
        let mut root_store = RootCertStore::empty();
        root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

        let tls_config = ClientConfig::builder()
            .with_root_certificates(root_store)
            .with_no_client_auth();

        Self {
            tls_config: Arc::new(tls_config),
            connect_timeout,
            read_timeout,
        }
    }

    /// Creates a transport with the timeouts from `config` (0 seconds means none).
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            seconds(config.connect_timeout_seconds),
            seconds(config.read_timeout_seconds),
        )
    }

    fn connect(&self, host: &str) -> Result<TcpStream, TransportError> {
        let connect_error = |source| TransportError::Connect {
            host: host.to_string(),
            port: HTTPS_PORT,
            source,
        };

        let addrs = (host, HTTPS_PORT).to_socket_addrs().map_err(connect_error)?;

        let mut last_error = None;
        for addr in addrs {
            debug!("Connecting to {host} at {addr}");
            let attempt = match self.connect_timeout {
                Some(timeout) => TcpStream::connect_timeout(&addr, timeout),
                None => TcpStream::connect(addr),
            };
            match attempt {
                Ok(sock) => return Ok(sock),
                Err(e) => {
                    debug!("Connection to {addr} failed: {e}");
                    last_error = Some(e);
                }
            }
        }

        Err(connect_error(last_error.unwrap_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "host resolved to no addresses")
        })))
    }
}

impl SecureTransport for TlsTransport {
    fn open(&self, host: &str) -> Result<Box<dyn Stream>, TransportError> {
        let server_name = ServerName::try_from(host.to_string())
            .map_err(|_| TransportError::InvalidServerName(host.to_string()))?;

        let sock = self.connect(host)?;
        sock.set_read_timeout(self.read_timeout)?;
        sock.set_write_timeout(self.read_timeout)?;

        // The handshake runs on the first write.
        let conn = ClientConnection::new(Arc::clone(&self.tls_config), server_name)?;
        Ok(Box::new(StreamOwned::new(conn, sock)))
    }
}

fn seconds(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}
