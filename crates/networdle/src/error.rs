//! Unified error type for Networdle.

use std::path::PathBuf;

use networdle_game::GameError;
use networdle_protocol::ProtocolError;
use networdle_session::SessionError;
use networdle_transport::TransportError;

/// Top-level error that wraps all crate-specific errors.
///
/// When using the `networdle` crate you deal with this single error type
/// instead of importing errors from each layer. The `#[from]` attribute on
/// each variant generates the `From` impls, so `?` converts layer errors
/// automatically.
#[derive(Debug, thiserror::Error)]
pub enum NetwordleError {
    /// A transport-level error (bind, connect, send, recv).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A protocol-level error (malformed frame, unexpected message).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A session-level error (peer gone, timeout).
    #[error(transparent)]
    Session(#[from] SessionError),

    /// A word list that was read but cannot be played with.
    #[error(transparent)]
    Game(#[from] GameError),

    /// The configuration file could not be read.
    #[error("failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for [`ServerConfig`].
    ///
    /// [`ServerConfig`]: crate::ServerConfig
    #[error("failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The settings can't produce a working server.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Reading player input or writing output failed.
    #[error("console I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The player typed something that can't be sent as a guess.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_transport_error() {
        let err = TransportError::SendFailed(
            std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone"),
        );
        let networdle_err: NetwordleError = err.into();
        assert!(matches!(networdle_err, NetwordleError::Transport(_)));
        assert!(networdle_err.to_string().contains("send"));
    }

    #[test]
    fn test_from_protocol_error() {
        let err = ProtocolError::MalformedFrame("empty frame".into());
        let networdle_err: NetwordleError = err.into();
        assert!(matches!(networdle_err, NetwordleError::Protocol(_)));
        assert!(networdle_err.to_string().contains("empty frame"));
    }

    #[test]
    fn test_from_session_error() {
        let networdle_err: NetwordleError = SessionError::ConnectionClosed.into();
        assert!(matches!(networdle_err, NetwordleError::Session(_)));
    }

    #[test]
    fn test_from_game_error() {
        let networdle_err: NetwordleError = GameError::EmptyWordList.into();
        assert!(matches!(networdle_err, NetwordleError::Game(_)));
        assert_eq!(networdle_err.to_string(), "word list is empty");
    }

    #[test]
    fn test_invalid_config_display() {
        let err = NetwordleError::InvalidConfig("max_frame_size 0".into());
        assert_eq!(err.to_string(), "invalid configuration: max_frame_size 0");
    }

    #[test]
    fn test_invalid_input_display() {
        let err = NetwordleError::InvalidInput("guess contains a newline".into());
        assert_eq!(err.to_string(), "invalid input: guess contains a newline");
    }
}
