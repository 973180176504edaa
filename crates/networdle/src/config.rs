//! Server configuration, loadable from a TOML file.
//!
//! Every field has a default, so a config file only needs the values it
//! changes:
//!
//! ```toml
//! bind_host = "127.0.0.1"
//! target_list = "words/targets.txt"
//! seed = 42
//! idle_timeout_secs = 60
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use networdle_session::SessionConfig;
use networdle_transport::DEFAULT_MAX_FRAME_SIZE;
use serde::Deserialize;

use crate::NetwordleError;

/// Settings for a Networdle server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to listen on. The port is given on the command line.
    pub bind_host: String,
    /// File of accepted guesses, one word per line.
    pub guess_list: PathBuf,
    /// File of candidate targets, one word per line.
    pub target_list: PathBuf,
    /// Seed for target selection. `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Seconds a new connection has to send `START GAME`.
    pub handshake_timeout_secs: u64,
    /// Seconds the server waits for each guess.
    pub idle_timeout_secs: u64,
    /// Longest accepted line in bytes, terminator included.
    pub max_frame_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let session = SessionConfig::default();
        Self {
            bind_host: "0.0.0.0".to_string(),
            guess_list: PathBuf::from("resources/guess.txt"),
            target_list: PathBuf::from("resources/target.txt"),
            seed: None,
            handshake_timeout_secs: session.handshake_timeout.as_secs(),
            idle_timeout_secs: session.idle_timeout.as_secs(),
            max_frame_size: DEFAULT_MAX_FRAME_SIZE,
        }
    }
}

impl ServerConfig {
    /// Loads a config file. Missing keys keep their defaults.
    ///
    /// # Errors
    /// [`NetwordleError::ConfigRead`] if the file can't be read,
    /// [`NetwordleError::ConfigParse`] if it isn't valid TOML or has a value
    /// of the wrong type.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, NetwordleError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| {
            NetwordleError::ConfigRead {
                path: path.to_path_buf(),
                source,
            }
        })?;
        toml::from_str(&contents).map_err(|source| NetwordleError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The socket address to listen on for `port`.
    pub fn bind_address(&self, port: u16) -> String {
        if self.bind_host.contains(':') && !self.bind_host.starts_with('[') {
            format!("[{}]:{port}", self.bind_host)
        } else {
            format!("{}:{port}", self.bind_host)
        }
    }

    /// The per-session timeouts and limits.
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            handshake_timeout: Duration::from_secs(self.handshake_timeout_secs),
            idle_timeout: Duration::from_secs(self.idle_timeout_secs),
            max_frame_size: self.max_frame_size,
        }
    }
}
