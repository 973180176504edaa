//! Error types for the protocol layer.
//!
//! Each crate in Networdle defines its own error enum. When you see a
//! `ProtocolError`, you know the bytes arrived fine but broke the rules of
//! the line protocol.

/// Errors that can occur while framing or interpreting messages.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolError {
    /// The received bytes are not a valid frame: empty, missing the line
    /// feed terminator, or carrying a byte outside the ASCII range.
    #[error("malformed frame: {0}")]
    MalformedFrame(String),

    /// The frame is well formed but is not a message the receiver accepts
    /// in its current state (e.g. anything other than `START GAME` as the
    /// first message of a session).
    #[error("unexpected message: {0:?}")]
    UnexpectedMessage(String),

    /// A message the caller asked to send cannot be put on the wire.
    #[error("invalid message: {0}")]
    InvalidMessage(String),
}
