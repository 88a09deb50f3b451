//! Pluggable transport for server-to-server connections.
//!
//! The routing core specifies no timeout of its own; the transport imposes
//! one and surfaces expiry as a connection failure.

use crate::error::{Error, Result};
use crate::host::HostRecord;
use std::net::{Shutdown, SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;
use tracing::debug;

/// An open server-to-server connection.
pub trait Connection: Send {
    /// Canonical name of the remote peer.
    fn peer(&self) -> &str;
    /// Close the connection. Idempotent.
    fn close(&mut self);
}

/// Dials connections to remote hosts.
pub trait Connector: Send + Sync {
    fn dial(&self, host: &HostRecord) -> Result<Box<dyn Connection>>;
}

/// TCP connector with a per-dial timeout.
pub struct TcpConnector {
    timeout: Duration,
}

impl TcpConnector {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for TcpConnector {
    fn default() -> Self {
        Self::new(Duration::from_secs(10))
    }
}

impl Connector for TcpConnector {
    fn dial(&self, host: &HostRecord) -> Result<Box<dyn Connection>> {
        let mut last_err = std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "host record resolves to no address",
        );

        // Try each recorded name in order; first successful dial wins.
        for name in host.names() {
            let addrs: Vec<SocketAddr> = match (name, host.port()).to_socket_addrs() {
                Ok(addrs) => addrs.collect(),
                Err(err) => {
                    last_err = err;
                    continue;
                }
            };
            for addr in addrs {
                match TcpStream::connect_timeout(&addr, self.timeout) {
                    Ok(stream) => {
                        debug!(peer = %host, %addr, "server-to-server connection established");
                        return Ok(Box::new(TcpConnection {
                            peer: host.canonical_name().to_owned(),
                            stream: Some(stream),
                        }));
                    }
                    Err(err) => last_err = err,
                }
            }
        }

        Err(Error::ConnectFailed {
            host: host.canonical_name().to_owned(),
            source: last_err,
        })
    }
}

struct TcpConnection {
    peer: String,
    stream: Option<TcpStream>,
}

impl Connection for TcpConnection {
    fn peer(&self) -> &str {
        &self.peer
    }

    fn close(&mut self) {
        if let Some(stream) = self.stream.take() {
            let _ = stream.shutdown(Shutdown::Both);
        }
    }
}

impl Drop for TcpConnection {
    fn drop(&mut self) {
        self.close();
    }
}
