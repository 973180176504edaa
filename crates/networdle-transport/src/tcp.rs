//! Line-oriented stream transport over TCP.
//!
//! [`StreamConnection`] wraps any `AsyncRead + AsyncWrite` stream and turns
//! it into a [`Connection`] that yields one line per `recv`. A TCP socket may
//! deliver half a line in one segment and a line and a half in the next, so
//! the read side is a [`BufReader`] that keeps leftover bytes between calls.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::io::{
    AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt,
    BufReader, ReadHalf, WriteHalf,
};
use tokio::net::{TcpListener, TcpStream, ToSocketAddrs};
use tokio::sync::Mutex;

use crate::{
    Connection, ConnectionId, DEFAULT_MAX_FRAME_SIZE, Transport,
    TransportError,
};

/// Counter for generating unique connection IDs.
static NEXT_CONNECTION_ID: AtomicU64 = AtomicU64::new(1);

fn next_connection_id() -> ConnectionId {
    ConnectionId::new(NEXT_CONNECTION_ID.fetch_add(1, Ordering::Relaxed))
}

/// A connection over a TCP socket.
pub type TcpConnection = StreamConnection<TcpStream>;

/// A TCP [`Transport`] that listens for incoming game clients.
pub struct TcpTransport {
    listener: TcpListener,
    max_frame_size: usize,
}

impl TcpTransport {
    /// Binds a new TCP transport to the given address.
    pub async fn bind(addr: &str) -> Result<Self, TransportError> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(TransportError::AcceptFailed)?;
        tracing::info!(addr, "TCP transport listening");
        Ok(Self {
            listener,
            max_frame_size: DEFAULT_MAX_FRAME_SIZE,
        })
    }

    /// Sets the frame limit applied to every accepted connection.
    pub fn with_max_frame_size(mut self, max_frame_size: usize) -> Self {
        self.max_frame_size = max_frame_size;
        self
    }

    /// Returns the local address the listener is bound to.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

impl Transport for TcpTransport {
    type Connection = TcpConnection;
    type Error = TransportError;

    async fn accept(&mut self) -> Result<Self::Connection, Self::Error> {
        let (stream, addr) = self
            .listener
            .accept()
            .await
            .map_err(TransportError::AcceptFailed)?;

        let conn = StreamConnection::new(stream, self.max_frame_size)
            .with_peer(addr);
        tracing::debug!(id = %conn.id(), %addr, "accepted TCP connection");
        Ok(conn)
    }
}

impl StreamConnection<TcpStream> {
    /// Opens a TCP connection to a server.
    pub async fn connect(
        addr: impl ToSocketAddrs,
    ) -> Result<Self, TransportError> {
        let stream = TcpStream::connect(addr)
            .await
            .map_err(TransportError::ConnectFailed)?;
        let peer = stream.peer_addr().ok();
        let mut conn = StreamConnection::new(stream, DEFAULT_MAX_FRAME_SIZE);
        conn.peer = peer;
        Ok(conn)
    }
}

/// A line-oriented connection over an arbitrary byte stream.
///
/// Reads and writes are guarded separately so a send never waits for a
/// pending receive.
pub struct StreamConnection<S> {
    id: ConnectionId,
    peer: Option<SocketAddr>,
    reader: Mutex<BufReader<ReadHalf<S>>>,
    writer: Mutex<WriteHalf<S>>,
    max_frame_size: usize,
}

impl<S> StreamConnection<S>
where
    S: AsyncRead + AsyncWrite + Send + 'static,
{
    /// Wraps `stream`, reading lines of at most `max_frame_size` bytes.
    pub fn new(stream: S, max_frame_size: usize) -> Self {
        let (read, write) = tokio::io::split(stream);
        Self {
            id: next_connection_id(),
            peer: None,
            reader: Mutex::new(BufReader::new(read)),
            writer: Mutex::new(write),
            max_frame_size,
        }
    }

    /// Records the remote address for logging.
    pub fn with_peer(mut self, peer: SocketAddr) -> Self {
        self.peer = Some(peer);
        self
    }

    /// Returns the remote address, if known.
    pub fn peer_addr(&self) -> Option<SocketAddr> {
        self.peer
    }

    /// Returns the frame limit for this connection.
    pub fn max_frame_size(&self) -> usize {
        self.max_frame_size
    }
}

impl<S> Connection for StreamConnection<S>
where
    S: AsyncRead + AsyncWrite + Send + 'static,
{
    type Error = TransportError;

    async fn send(&self, data: &[u8]) -> Result<(), Self::Error> {
        let mut writer = self.writer.lock().await;
        writer
            .write_all(data)
            .await
            .map_err(TransportError::SendFailed)?;
        writer.flush().await.map_err(TransportError::SendFailed)
    }

    async fn recv(&self) -> Result<Option<Vec<u8>>, Self::Error> {
        let mut reader = self.reader.lock().await;
        let mut frame = Vec::new();
        // `take` caps the line so a peer that never sends a newline cannot
        // grow the buffer without bound.
        let read = (&mut *reader)
            .take(self.max_frame_size as u64)
            .read_until(b'\n', &mut frame)
            .await
            .map_err(TransportError::ReceiveFailed)?;

        if read == 0 {
            return Ok(None);
        }
        tracing::trace!(id = %self.id, bytes = read, "line received");
        Ok(Some(frame))
    }

    async fn close(&self) -> Result<(), Self::Error> {
        self.writer
            .lock()
            .await
            .shutdown()
            .await
            .map_err(TransportError::CloseFailed)
    }

    fn id(&self) -> ConnectionId {
        self.id
    }
}
