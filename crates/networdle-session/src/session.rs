//! The per-connection game session.
//!
//! A session plays one game with one client, start to finish:
//!
//! ```text
//!   AwaitingStart ──(START GAME)──→ Playing ──(correct guess)──→ Finished
//!        │                            │  ↺ invalid guess / hint
//!        └──(anything else)──────────→┴──(bad frame, I/O error, timeout)──→ Finished
//! ```
//!
//! - **AwaitingStart**: the first line must be exactly `START GAME`. The
//!   server answers with the all-placeholder hint. Anything else ends the
//!   session without a reply.
//! - **Playing**: each line is a guess. Unknown words get `INVALID GUESS`
//!   and are not counted; known wrong words get a hint; the target gets
//!   the guess count followed by `GAME OVER`.
//! - **Finished**: the connection is closed, exactly once.

use std::fmt;
use std::sync::Arc;

use networdle_game::{Game, GuessList, GuessOutcome, TargetWord};
use networdle_protocol::{
    ControlCatalog, ControlMessageKind, END_GAME, INVALID_GUESS,
    ProtocolError,
};
use networdle_transport::{Connection, ConnectionId, TransportError};

use crate::{ManagedConnection, SessionConfig, SessionError};

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Connected, waiting for `START GAME`.
    AwaitingStart,
    /// Accepting guesses.
    Playing,
    /// Over; the connection is closed. Terminal.
    Finished,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AwaitingStart => write!(f, "AwaitingStart"),
            Self::Playing => write!(f, "Playing"),
            Self::Finished => write!(f, "Finished"),
        }
    }
}

/// One game played over one connection.
pub struct Session<C: Connection<Error = TransportError>> {
    conn: ManagedConnection<C>,
    game: Game,
    catalog: ControlCatalog,
    config: SessionConfig,
    state: SessionState,
}

impl<C: Connection<Error = TransportError>> Session<C> {
    /// Creates a session for a freshly accepted connection.
    ///
    /// The placeholder start response is sized from the guess list, whose
    /// words all share the target's length.
    pub fn new(
        conn: C,
        target: TargetWord,
        guesses: Arc<GuessList>,
        config: SessionConfig,
    ) -> Self {
        let catalog = ControlCatalog::new(guesses.word_length());
        Self {
            conn: ManagedConnection::new(conn),
            game: Game::new(target, guesses),
            catalog,
            config,
            state: SessionState::AwaitingStart,
        }
    }

    /// The connection this session runs on.
    pub fn id(&self) -> ConnectionId {
        self.conn.id()
    }

    /// The current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Number of valid guesses so far.
    pub fn guess_count(&self) -> u32 {
        self.game.guess_count()
    }

    /// Plays the game to the end and closes the connection.
    ///
    /// Returns the number of valid guesses it took to find the target.
    ///
    /// # Errors
    /// Any [`SessionError`] that ended the session early: a bad first
    /// message, a malformed frame, the peer going away, an I/O failure, or
    /// a receive timeout. The connection is closed in every case.
    pub async fn run(mut self) -> Result<u32, SessionError> {
        let id = self.id();
        tracing::info!(%id, "session started");
        tracing::debug!(%id, target = %self.game.target(), "target selected");

        let result = self.drive().await;
        self.finish().await;

        match &result {
            Ok(guesses) => {
                tracing::info!(%id, guesses, "target guessed, session finished");
            }
            Err(e) => {
                tracing::info!(
                    %id,
                    guesses = self.game.guess_count(),
                    error = %e,
                    "session dropped"
                );
            }
        }
        result
    }

    async fn drive(&mut self) -> Result<u32, SessionError> {
        self.await_start().await?;
        loop {
            if let Some(guesses) = self.play_turn().await? {
                return Ok(guesses);
            }
        }
    }

    /// AwaitingStart: one frame, which must be `START GAME`.
    async fn await_start(&mut self) -> Result<(), SessionError> {
        let frame = self
            .conn
            .receive_within(self.config.handshake_timeout)
            .await?;

        if !self
            .catalog
            .classify(&frame, ControlMessageKind::ClientStartGame)
        {
            tracing::debug!(id = %self.id(), "bad START GAME message");
            return Err(ProtocolError::UnexpectedMessage(lossy(&frame)).into());
        }

        let start = self
            .catalog
            .literal(ControlMessageKind::ServerStartResponse);
        self.conn.send(start).await?;
        self.transition(SessionState::Playing);
        Ok(())
    }

    /// Playing: one guess in, one or two lines out.
    ///
    /// Returns `Some(count)` when the guess was the target.
    async fn play_turn(&mut self) -> Result<Option<u32>, SessionError> {
        let frame = self.conn.receive_within(self.config.idle_timeout).await?;

        networdle_protocol::validate(&frame)?;
        let guess = networdle_protocol::decode(&frame)?;

        match self.game.submit(&guess) {
            GuessOutcome::Invalid => {
                tracing::debug!(id = %self.id(), %guess, "invalid guess");
                self.conn.send(INVALID_GUESS).await?;
                Ok(None)
            }
            GuessOutcome::Hint(hint) => {
                tracing::debug!(
                    id = %self.id(),
                    %guess,
                    %hint,
                    count = self.game.guess_count(),
                    "guess scored"
                );
                self.conn.send(&hint).await?;
                Ok(None)
            }
            GuessOutcome::Solved { guesses } => {
                self.conn.send(&guesses.to_string()).await?;
                self.conn.send(END_GAME).await?;
                Ok(Some(guesses))
            }
        }
    }

    async fn finish(&mut self) {
        self.conn.close().await;
        self.transition(SessionState::Finished);
    }

    fn transition(&mut self, next: SessionState) {
        if self.state != next {
            tracing::debug!(
                id = %self.id(),
                from = %self.state,
                to = %next,
                "session state changed"
            );
            self.state = next;
        }
    }
}

/// Renders raw frame bytes for an error message.
fn lossy(frame: &[u8]) -> String {
    String::from_utf8_lossy(frame).trim_end_matches('\n').to_string()
}
