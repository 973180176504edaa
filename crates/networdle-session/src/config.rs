//! Session configuration.

use std::time::Duration;

use networdle_transport::DEFAULT_MAX_FRAME_SIZE;

/// Timeouts and limits for one session.
///
/// Every receive is bounded: a client that connects and goes quiet is
/// dropped instead of holding its task open forever.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// How long a new connection has to send `START GAME`.
    ///
    /// Default: 30 seconds.
    pub handshake_timeout: Duration,

    /// How long the server waits for each guess once play has started.
    ///
    /// Default: 5 minutes. There is no limit on the number of guesses,
    /// only on the time between them.
    pub idle_timeout: Duration,

    /// Largest frame, terminator included, a connection reads in one go.
    /// Longer lines arrive unterminated and are rejected as malformed.
    ///
    /// Default: 256 bytes.
    pub max_frame_size: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            handshake_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(300),
            max_frame_size: DEFAULT_MAX_FRAME_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_config_default() {
        let config = SessionConfig::default();
        assert_eq!(config.handshake_timeout, Duration::from_secs(30));
        assert_eq!(config.idle_timeout, Duration::from_secs(300));
        assert_eq!(config.max_frame_size, 256);
    }
}
