//! Error types for the session layer.

use std::time::Duration;

use networdle_protocol::ProtocolError;
use networdle_transport::TransportError;

/// Errors that end a session.
///
/// Every variant is fatal for the session that produced it: the
/// connection is closed and nothing is retried. An unknown guess is not
/// an error at all; it is answered with `INVALID GUESS` and play goes on.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Reading from or writing to the connection failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The peer broke the line protocol: a malformed frame, or a message
    /// that is not allowed in the current state.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The peer closed its end of the stream.
    #[error("connection closed by peer")]
    ConnectionClosed,

    /// No message arrived before the receive deadline.
    #[error("no message within {0:?}")]
    Timeout(Duration),

    /// The connection was already closed when I/O was attempted.
    #[error("connection already closed")]
    Closed,
}
