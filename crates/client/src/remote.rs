//! Remote query client
//!
//! Opens one TCP connection per query, performs the devlist exchange, and
//! shapes the decoded records into the logical device model. Any failure
//! at any step aborts the whole query: the wire stream has no
//! resynchronization marker, so there is nothing sensible to salvage.

use common::{Device, Error, NamesDb, Result};
use protocol::request_device_list;
use std::io;
use std::net::{TcpStream, ToSocketAddrs};
use tracing::debug;

use crate::config::ClientConfig;

/// Connection-scoped state for one devlist query.
///
/// Owns the socket; dropping the session closes it on every exit path,
/// success and failure alike.
struct DiscoverySession {
    stream: TcpStream,
}

impl DiscoverySession {
    fn connect(host: &str, config: &ClientConfig) -> Result<Self> {
        let addrs = (host, config.port)
            .to_socket_addrs()
            .map_err(|source| Error::Connect {
                host: host.to_string(),
                source,
            })?;

        let mut last_err = None;
        for addr in addrs {
            let attempt = match config.connect_timeout() {
                Some(timeout) => TcpStream::connect_timeout(&addr, timeout),
                None => TcpStream::connect(addr),
            };
            match attempt {
                Ok(stream) => {
                    stream.set_read_timeout(config.read_timeout())?;
                    stream.set_write_timeout(config.read_timeout())?;
                    return Ok(Self { stream });
                }
                Err(err) => last_err = Some(err),
            }
        }

        Err(Error::Connect {
            host: host.to_string(),
            source: last_err.unwrap_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, "host resolved to no addresses")
            }),
        })
    }
}

/// Query `host` for the devices it exports.
///
/// Performs the fixed request/reply handshake and drains the declared
/// device and interface records in order. Exactly one outbound connection
/// is opened and closed per call, regardless of outcome. No partial list
/// is ever returned.
pub fn query(host: &str, names: &NamesDb, config: &ClientConfig) -> Result<Vec<Device>> {
    let mut session = DiscoverySession::connect(host, config)?;
    debug!(host, port = config.port, "connected");

    let exported = request_device_list(&mut session.stream)?;
    debug!(count = exported.len(), "exported devices received");

    Ok(exported
        .iter()
        .map(|device| Device::from_exported(device, names))
        .collect())
}
