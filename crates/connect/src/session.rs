//! Per-session connection ownership.
//!
//! Each session owns the server-to-server connections it opens. Connections
//! are keyed by canonical host name and reused within the session; they are
//! never shared across sessions. `disconnect_all` runs at session teardown
//! regardless of how the session ends (also from `Drop`), so sockets are
//! not leaked.

use crate::error::Result;
use crate::host::HostRecord;
use crate::transport::{Connection, Connector};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Shared handle to one open server-to-server connection.
#[derive(Clone)]
pub struct ConnectionHandle {
    peer: String,
    conn: Arc<Mutex<Box<dyn Connection>>>,
}

impl ConnectionHandle {
    pub fn peer(&self) -> &str {
        &self.peer
    }

    /// Access the underlying connection.
    pub fn connection(&self) -> &Arc<Mutex<Box<dyn Connection>>> {
        &self.conn
    }
}

impl std::fmt::Debug for ConnectionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionHandle")
            .field("peer", &self.peer)
            .finish()
    }
}

/// The connections one session has opened to peer servers.
pub struct ConnectionSet {
    connector: Arc<dyn Connector>,
    conns: Mutex<HashMap<String, ConnectionHandle>>,
}

impl ConnectionSet {
    pub fn new(connector: Arc<dyn Connector>) -> Self {
        Self {
            connector,
            conns: Mutex::new(HashMap::new()),
        }
    }

    /// Connect to `host`, reusing an existing open connection if present.
    pub fn connect(&self, host: &HostRecord) -> Result<ConnectionHandle> {
        let key = host.canonical_name().to_owned();
        let mut conns = self.conns.lock();
        if let Some(handle) = conns.get(&key) {
            debug!(peer = key.as_str(), "reusing server-to-server connection");
            return Ok(handle.clone());
        }

        let conn = self.connector.dial(host)?;
        let handle = ConnectionHandle {
            peer: key.clone(),
            conn: Arc::new(Mutex::new(conn)),
        };
        conns.insert(key, handle.clone());
        Ok(handle)
    }

    /// Close and clear every connection this session opened.
    pub fn disconnect_all(&self) {
        let mut conns = self.conns.lock();
        for (peer, handle) in conns.drain() {
            debug!(peer = peer.as_str(), "closing server-to-server connection");
            handle.conn.lock().close();
        }
    }

    pub fn open_count(&self) -> usize {
        self.conns.lock().len()
    }
}

impl Drop for ConnectionSet {
    fn drop(&mut self) {
        self.disconnect_all();
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::Error;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Connector stub that counts dials and closes.
    pub(crate) struct StubConnector {
        pub dials: AtomicUsize,
        pub closes: Arc<AtomicUsize>,
        pub fail: bool,
    }

    impl StubConnector {
        pub(crate) fn new(fail: bool) -> Self {
            Self {
                dials: AtomicUsize::new(0),
                closes: Arc::new(AtomicUsize::new(0)),
                fail,
            }
        }
    }

    struct StubConnection {
        peer: String,
        closes: Arc<AtomicUsize>,
        open: bool,
    }

    impl Connection for StubConnection {
        fn peer(&self) -> &str {
            &self.peer
        }

        fn close(&mut self) {
            if self.open {
                self.open = false;
                self.closes.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    impl Connector for StubConnector {
        fn dial(&self, host: &HostRecord) -> Result<Box<dyn Connection>> {
            self.dials.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(Error::ConnectFailed {
                    host: host.canonical_name().to_owned(),
                    source: std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "stub"),
                });
            }
            Ok(Box::new(StubConnection {
                peer: host.canonical_name().to_owned(),
                closes: Arc::clone(&self.closes),
                open: true,
            }))
        }
    }

    fn host(name: &str) -> HostRecord {
        HostRecord::new([name.to_owned()], 1247)
    }

    #[test]
    fn test_connect_reuses_open_connection() {
        let connector = Arc::new(StubConnector::new(false));
        let set = ConnectionSet::new(Arc::clone(&connector) as Arc<dyn Connector>);

        let h1 = set.connect(&host("hostB.example.org")).unwrap();
        let h2 = set.connect(&host("hostB.example.org")).unwrap();
        assert_eq!(h1.peer(), h2.peer());
        assert_eq!(connector.dials.load(Ordering::SeqCst), 1);
        assert_eq!(set.open_count(), 1);
    }

    #[test]
    fn test_connect_failure_is_fatal() {
        let connector = Arc::new(StubConnector::new(true));
        let set = ConnectionSet::new(connector as Arc<dyn Connector>);
        assert!(matches!(
            set.connect(&host("hostB.example.org")),
            Err(Error::ConnectFailed { .. })
        ));
        assert_eq!(set.open_count(), 0);
    }

    #[test]
    fn test_disconnect_all_closes_everything() {
        let connector = Arc::new(StubConnector::new(false));
        let closes = Arc::clone(&connector.closes);
        let set = ConnectionSet::new(Arc::clone(&connector) as Arc<dyn Connector>);

        set.connect(&host("b1")).unwrap();
        set.connect(&host("b2")).unwrap();
        set.disconnect_all();
        assert_eq!(closes.load(Ordering::SeqCst), 2);
        assert_eq!(set.open_count(), 0);
    }

    #[test]
    fn test_drop_tears_down_connections() {
        let connector = Arc::new(StubConnector::new(false));
        let closes = Arc::clone(&connector.closes);
        {
            let set = ConnectionSet::new(Arc::clone(&connector) as Arc<dyn Connector>);
            set.connect(&host("b1")).unwrap();
        }
        assert_eq!(closes.load(Ordering::SeqCst), 1);
    }
}
