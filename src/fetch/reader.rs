//! Draining a transport into a single response buffer.

use std::io::{ErrorKind, Read};

use log::{debug, trace};

use crate::config::{MAX_RESPONSE_SIZE, READ_CHUNK_SIZE};
use crate::error_handling::TransportError;

/// Reads `stream` until the peer closes it, concatenating chunks in arrival order.
///
/// A zero-length read ends the response. A peer that drops the connection
/// without a TLS `close_notify` surfaces as `UnexpectedEof`; since the request
/// asked for `Connection: close`, that is treated as the end of the response.
///
/// # Errors
///
/// Returns [`TransportError::Io`] for any other I/O fault and
/// [`TransportError::ResponseTooLarge`] past `MAX_RESPONSE_SIZE`.
pub fn read_response<R: Read + ?Sized>(stream: &mut R) -> Result<Vec<u8>, TransportError> {
    read_response_limited(stream, MAX_RESPONSE_SIZE)
}

pub(crate) fn read_response_limited<R: Read + ?Sized>(
    stream: &mut R,
    limit: usize,
) -> Result<Vec<u8>, TransportError> {
    let mut response = Vec::new();
    let mut chunk = [0u8; READ_CHUNK_SIZE];

    loop {
        match stream.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => {
                trace!("Read {n} bytes");
                if response.len() + n > limit {
                    return Err(TransportError::ResponseTooLarge { limit });
                }
                response.extend_from_slice(&chunk[..n]);
            }
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
                debug!("Peer closed the stream without close_notify after {} bytes", response.len());
                break;
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(response)
}
