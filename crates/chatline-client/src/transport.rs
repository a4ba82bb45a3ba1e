//! TCP transport for the client.
//!
//! Provides [`Connection`], the sole owner of the byte stream to the server.
//! This is a thin layer that moves raw lines; protocol logic remains in the
//! Sans-IO [`Client`](crate::Client).
//!
//! Every read and write is bounded by [`MAX_LINE`]. A read that returns zero
//! bytes or overflows the line capacity is fatal for the connection.

use std::{fmt, io, net::SocketAddr, time::Duration};

use bytes::{Bytes, BytesMut};
use chatline_proto::MAX_LINE;
use thiserror::Error;
use tokio::{
    io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt},
    net::TcpStream,
};

/// Default service port.
pub const DEFAULT_PORT: u16 = 16271;

/// Default time allowed for the TCP handshake per resolved address.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Transport errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Host name could not be resolved.
    #[error("failed to resolve {host}: {source}")]
    Resolve {
        /// Host that failed to resolve
        host: String,
        /// Resolver error
        #[source]
        source: io::Error,
    },

    /// Host resolved to no addresses.
    #[error("host not found: {host}")]
    NoAddress {
        /// Host that resolved to nothing
        host: String,
    },

    /// TCP handshake failed.
    #[error("failed to connect to {addr}: {source}")]
    Connect {
        /// Address the handshake was attempted against
        addr: SocketAddr,
        /// Socket error
        #[source]
        source: io::Error,
    },

    /// TCP handshake did not complete in time.
    #[error("connection to {addr} timed out after {timeout:?}")]
    ConnectTimeout {
        /// Address the handshake was attempted against
        addr: SocketAddr,
        /// Configured limit
        timeout: Duration,
    },

    /// Read or write failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Peer closed the connection (zero-length read).
    #[error("connection closed by peer")]
    Closed,

    /// Peer sent more than the line capacity in one read, or the caller
    /// tried to send more.
    #[error("line of {len} bytes exceeds the {max}-byte line capacity")]
    Overflow {
        /// Bytes read or offered
        len: usize,
        /// Line capacity
        max: usize,
    },

    /// Reply did not arrive within the configured reply timeout.
    #[error("no reply within {0:?}")]
    ReplyTimeout(Duration),
}

/// Transport configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    /// Time allowed for the TCP handshake per resolved address.
    pub connect_timeout: Duration,
    /// Limit on the synchronous reply read. `None` waits forever.
    pub reply_timeout: Option<Duration>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self { connect_timeout: DEFAULT_CONNECT_TIMEOUT, reply_timeout: None }
    }
}

/// Server endpoint as given by the operator: a host name or a literal
/// address, plus a port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerAddr {
    /// Host name or literal IP address.
    pub host: String,
    /// TCP port.
    pub port: u16,
}

impl ServerAddr {
    /// Create a server address.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self { host: host.into(), port }
    }
}

impl fmt::Display for ServerAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Owned connection to the server.
///
/// Generic over the stream so tests can substitute in-memory pipes. Dropping
/// the connection closes the stream.
#[derive(Debug)]
pub struct Connection<S = TcpStream> {
    stream: S,
    config: TransportConfig,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    /// Wrap an established stream.
    pub fn new(stream: S, config: TransportConfig) -> Self {
        Self { stream, config }
    }

    /// Transport configuration.
    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    /// Write one line.
    ///
    /// # Errors
    ///
    /// - `TransportError::Overflow` if `line` exceeds [`MAX_LINE`]; nothing is
    ///   written
    /// - `TransportError::Io` if the write fails
    pub async fn send_line(&mut self, line: &[u8]) -> Result<(), TransportError> {
        if line.len() > MAX_LINE {
            return Err(TransportError::Overflow { len: line.len(), max: MAX_LINE });
        }

        self.stream.write_all(line).await?;
        self.stream.flush().await?;
        Ok(())
    }

    /// Read whatever one receive returns, up to the line capacity.
    ///
    /// Cancel-safe: the only await point is a single `read`, so dropping the
    /// future before completion loses no data.
    ///
    /// # Errors
    ///
    /// - `TransportError::Closed` on a zero-length read
    /// - `TransportError::Overflow` if the read exceeds [`MAX_LINE`]
    /// - `TransportError::Io` if the read fails
    pub async fn recv_text(&mut self) -> Result<Bytes, TransportError> {
        // One spare byte detects overflow without a second read.
        let mut buf = BytesMut::zeroed(MAX_LINE + 1);
        let len = self.stream.read(&mut buf).await?;

        if len == 0 {
            return Err(TransportError::Closed);
        }
        if len > MAX_LINE {
            return Err(TransportError::Overflow { len, max: MAX_LINE });
        }

        buf.truncate(len);
        Ok(buf.freeze())
    }

    /// Read the reply to a synchronous command.
    ///
    /// Same as [`Connection::recv_text`], bounded by
    /// [`TransportConfig::reply_timeout`] when set.
    ///
    /// # Errors
    ///
    /// - `TransportError::ReplyTimeout` if the limit elapses
    /// - Any error from [`Connection::recv_text`]
    pub async fn recv_reply(&mut self) -> Result<Bytes, TransportError> {
        match self.config.reply_timeout {
            Some(limit) => tokio::time::timeout(limit, self.recv_text())
                .await
                .map_err(|_| TransportError::ReplyTimeout(limit))?,
            None => self.recv_text().await,
        }
    }

    /// Flush and shut down the write half, signalling end of stream to the
    /// peer.
    ///
    /// # Errors
    ///
    /// Returns an error if the shutdown fails.
    pub async fn shutdown(&mut self) -> Result<(), TransportError> {
        self.stream.shutdown().await?;
        Ok(())
    }
}

/// Resolve `addr` and connect to the first address that accepts.
///
/// Host names and literal addresses are both accepted.
///
/// # Errors
///
/// - `TransportError::Resolve` / `TransportError::NoAddress` if resolution
///   fails
/// - The error from the last attempted address if none accepts
pub async fn connect(
    addr: &ServerAddr,
    config: TransportConfig,
) -> Result<Connection, TransportError> {
    let resolved: Vec<SocketAddr> = tokio::net::lookup_host((addr.host.as_str(), addr.port))
        .await
        .map_err(|source| TransportError::Resolve { host: addr.host.clone(), source })?
        .collect();

    let mut last_error = TransportError::NoAddress { host: addr.host.clone() };

    for socket_addr in resolved {
        tracing::debug!(%socket_addr, "connecting");

        match tokio::time::timeout(config.connect_timeout, TcpStream::connect(socket_addr)).await {
            Ok(Ok(stream)) => {
                tracing::info!(%socket_addr, "connected");
                return Ok(Connection::new(stream, config));
            },
            Ok(Err(source)) => {
                tracing::debug!(%socket_addr, %source, "connect failed");
                last_error = TransportError::Connect { addr: socket_addr, source };
            },
            Err(_) => {
                tracing::debug!(%socket_addr, "connect timed out");
                last_error = TransportError::ConnectTimeout {
                    addr: socket_addr,
                    timeout: config.connect_timeout,
                };
            },
        }
    }

    Err(last_error)
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt, duplex};

    use super::*;

    #[test]
    fn server_addr_displays_host_and_port() {
        let addr = ServerAddr::new("chat.example", DEFAULT_PORT);
        assert_eq!(addr.to_string(), "chat.example:16271");
    }

    #[test]
    fn default_config_waits_forever_for_replies() {
        assert_eq!(TransportConfig::default().reply_timeout, None);
    }

    #[tokio::test]
    async fn send_line_writes_verbatim() {
        let (client, mut peer) = duplex(1024);
        let mut conn = Connection::new(client, TransportConfig::default());

        conn.send_line(b"who\n").await.unwrap();

        let mut buf = [0u8; 4];
        peer.read_exact(&mut buf).await.unwrap();
        assert_eq!(&buf, b"who\n");
    }

    #[tokio::test]
    async fn send_line_rejects_overflow() {
        let (client, _peer) = duplex(1024);
        let mut conn = Connection::new(client, TransportConfig::default());

        let result = conn.send_line(&[b'x'; MAX_LINE + 1]).await;
        assert!(matches!(result, Err(TransportError::Overflow { len, .. }) if len == MAX_LINE + 1));
    }

    #[tokio::test]
    async fn recv_text_reports_closed_peer() {
        let (client, peer) = duplex(1024);
        let mut conn = Connection::new(client, TransportConfig::default());
        drop(peer);

        assert!(matches!(conn.recv_text().await, Err(TransportError::Closed)));
    }

    #[tokio::test]
    async fn recv_text_rejects_overflow() {
        let (client, mut peer) = duplex(4096);
        let mut conn = Connection::new(client, TransportConfig::default());
        peer.write_all(&[b'a'; MAX_LINE + 10]).await.unwrap();

        assert!(matches!(conn.recv_text().await, Err(TransportError::Overflow { .. })));
    }

    #[tokio::test]
    async fn recv_reply_times_out_when_configured() {
        let (client, _peer) = duplex(1024);
        let config = TransportConfig {
            reply_timeout: Some(Duration::from_millis(10)),
            ..TransportConfig::default()
        };
        let mut conn = Connection::new(client, config);

        assert!(matches!(conn.recv_reply().await, Err(TransportError::ReplyTimeout(_))));
    }
}
