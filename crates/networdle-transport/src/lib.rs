//! Transport abstraction layer for Networdle.
//!
//! Provides the [`Transport`] and [`Connection`] traits that abstract over
//! the byte stream a game is played on, plus the TCP implementation the
//! server and client use.
//!
//! Connections are line oriented: [`Connection::recv`] yields exactly one
//! newline-terminated line per call, no matter how the bytes were split
//! into segments on the way.

#![allow(async_fn_in_trait)]

mod error;
mod tcp;

pub use error::TransportError;
pub use tcp::{StreamConnection, TcpConnection, TcpTransport};

use std::fmt;
use std::future::Future;

/// Largest line (terminator included) a connection will buffer before
/// handing it back unterminated.
pub const DEFAULT_MAX_FRAME_SIZE: usize = 256;

/// Opaque identifier for a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    /// Creates a new `ConnectionId` from a raw `u64`.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying `u64` value.
    pub fn into_inner(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// Accepts new incoming connections.
pub trait Transport: Send + Sync + 'static {
    /// The connection type produced by this transport.
    type Connection: Connection;
    /// The error type for transport operations.
    type Error: std::error::Error + Send + Sync;

    /// Waits for and accepts the next incoming connection.
    async fn accept(&mut self) -> Result<Self::Connection, Self::Error>;
}

/// A single connection that can send and receive lines of bytes.
///
/// The methods return `Send` futures so a session generic over its
/// connection can still be handed to `tokio::spawn`.
pub trait Connection: Send + Sync + 'static {
    /// The error type for connection operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Writes `data` to the remote peer.
    fn send(
        &self,
        data: &[u8],
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Receives the next line from the remote peer, terminator included.
    ///
    /// Returns `Ok(None)` when the peer closed the stream and no bytes
    /// are left. A line that did not fit in the frame limit, or trailing
    /// bytes at end of stream, are returned without a terminator.
    fn recv(
        &self,
    ) -> impl Future<Output = Result<Option<Vec<u8>>, Self::Error>> + Send;

    /// Closes the sending side of the connection.
    fn close(&self) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Returns the unique identifier for this connection.
    fn id(&self) -> ConnectionId;
}
