//! `NetwordleServer` builder and accept loop.
//!
//! This is the entry point for running a Networdle server. It ties the
//! layers together: transport → session → game.

use std::net::SocketAddr;
use std::time::Duration;

use networdle_game::WordBank;
use networdle_protocol::START_GAME;
use networdle_session::{Session, SessionConfig};
use networdle_transport::{Transport, TcpTransport};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::NetwordleError;

/// How long the accept loop pauses after a failed accept.
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

/// Smallest frame limit that still fits `START GAME` and a whole guess,
/// each with its terminator.
fn min_frame_size(word_length: usize) -> usize {
    START_GAME.len().max(word_length) + 1
}

fn check_frame_size(
    max_frame_size: usize,
    word_length: usize,
) -> Result<(), NetwordleError> {
    let min = min_frame_size(word_length);
    if max_frame_size < min {
        return Err(NetwordleError::InvalidConfig(format!(
            "max_frame_size {max_frame_size} is too small, need at least {min}"
        )));
    }
    Ok(())
}

/// Builder for configuring and starting a Networdle server.
///
/// # Example
///
/// ```rust,no_run
/// use networdle::prelude::*;
///
/// # async fn start() -> Result<(), NetwordleError> {
/// let words = WordBank::load("resources/guess.txt", "resources/target.txt")?;
/// let server = NetwordleServer::builder()
///     .bind("0.0.0.0:4000")
///     .word_bank(words)
///     .build()
///     .await?;
/// server.run().await
/// # }
/// ```
pub struct NetwordleServerBuilder {
    bind_addr: String,
    session_config: SessionConfig,
    words: WordBank,
    seed: Option<u64>,
}

impl NetwordleServerBuilder {
    /// Creates a new builder with default settings and the fallback word
    /// bank.
    pub fn new() -> Self {
        Self {
            bind_addr: "127.0.0.1:4000".to_string(),
            session_config: SessionConfig::default(),
            words: WordBank::fallback(),
            seed: None,
        }
    }

    /// Sets the address to bind the server to.
    pub fn bind(mut self, addr: &str) -> Self {
        self.bind_addr = addr.to_string();
        self
    }

    /// Sets the session configuration.
    pub fn session_config(mut self, config: SessionConfig) -> Self {
        self.session_config = config;
        self
    }

    /// Sets the word lists games are played with.
    pub fn word_bank(mut self, words: WordBank) -> Self {
        self.words = words;
        self
    }

    /// Seeds target selection so a run can be reproduced.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Binds the listener.
    ///
    /// # Errors
    /// [`NetwordleError::InvalidConfig`] if the frame limit can't hold
    /// `START GAME` or a guess; [`NetwordleError::Transport`] if the address
    /// can't be bound.
    pub async fn build(self) -> Result<NetwordleServer, NetwordleError> {
        check_frame_size(
            self.session_config.max_frame_size,
            self.words.word_length(),
        )?;

        let transport = TcpTransport::bind(&self.bind_addr)
            .await?
            .with_max_frame_size(self.session_config.max_frame_size);

        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };

        Ok(NetwordleServer {
            transport,
            words: self.words,
            session_config: self.session_config,
            rng,
        })
    }
}

impl Default for NetwordleServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A bound Networdle server.
///
/// Call [`run()`](Self::run) to start accepting connections.
pub struct NetwordleServer {
    transport: TcpTransport,
    words: WordBank,
    session_config: SessionConfig,
    rng: StdRng,
}

impl NetwordleServer {
    /// Creates a new builder.
    pub fn builder() -> NetwordleServerBuilder {
        NetwordleServerBuilder::new()
    }

    /// Returns the local address the server is bound to.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.transport.local_addr()
    }

    /// Runs the server accept loop.
    ///
    /// Each accepted connection gets a freshly chosen target and its own
    /// task; the loop never waits for a game to finish. Runs until the
    /// process is terminated.
    pub async fn run(mut self) -> Result<(), NetwordleError> {
        tracing::info!(
            addr = ?self.local_addr().ok(),
            targets = self.words.targets().len(),
            word_length = self.words.word_length(),
            "Networdle server listening"
        );

        loop {
            match self.transport.accept().await {
                Ok(conn) => {
                    let target = self.words.choose_target(&mut self.rng);
                    let session = Session::new(
                        conn,
                        target,
                        self.words.guesses(),
                        self.session_config.clone(),
                    );
                    tokio::spawn(async move {
                        if let Err(e) = session.run().await {
                            tracing::debug!(
                                error = %e,
                                "session ended with error"
                            );
                        }
                    });
                }
                Err(e) => {
                    // Usually out of file descriptors; give sessions a
                    // moment to finish before trying again.
                    tracing::error!(error = %e, "accept failed");
                    tokio::time::sleep(ACCEPT_BACKOFF).await;
                }
            }
        }
    }
}
