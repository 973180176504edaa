//! The Networdle client: the server's state machine, seen from the other
//! end of the connection.
//!
//! ```text
//!   Connected ──start()──→ Playing ──guess() = GameOver──→ Finished
//!                            ↺ Hint / Invalid
//! ```
//!
//! Every reply is checked against what the server is allowed to send in
//! the current state. A reply that doesn't fit ends the game with
//! [`ProtocolError::UnexpectedMessage`] and closes the connection.

use std::fmt;
use std::time::Duration;

use networdle_game::parse_hint;
use networdle_protocol::{END_GAME, INVALID_GUESS, ProtocolError};
use networdle_session::ManagedConnection;
use networdle_transport::{
    Connection, ConnectionId, TcpConnection, TransportError,
};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::ToSocketAddrs;

use crate::NetwordleError;

/// How long the client waits for each reply by default.
pub const DEFAULT_REPLY_TIMEOUT: Duration = Duration::from_secs(30);

/// What the server said about a guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// A scored guess: exact letters uppercase, misplaced lowercase,
    /// absent `_`.
    Hint(String),
    /// The server doesn't know the word. It was not counted.
    Invalid,
    /// The guess was the target, found after `guesses` valid guesses.
    GameOver { guesses: u32 },
}

/// Where the client is in its game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientState {
    /// Connected, `START GAME` not yet sent.
    Connected,
    /// The server accepted the start; guesses may be sent.
    Playing,
    /// The game is over or the connection failed. Terminal.
    Finished,
}

impl fmt::Display for ClientState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connected => write!(f, "Connected"),
            Self::Playing => write!(f, "Playing"),
            Self::Finished => write!(f, "Finished"),
        }
    }
}

/// One game, played against a server over `C`.
pub struct GameClient<C: Connection<Error = TransportError>> {
    conn: ManagedConnection<C>,
    state: ClientState,
    word_length: Option<usize>,
    reply_timeout: Duration,
}

impl GameClient<TcpConnection> {
    /// Connects to a server over TCP.
    ///
    /// # Errors
    /// [`NetwordleError::Transport`] if the connection can't be made.
    pub async fn connect(addr: impl ToSocketAddrs) -> Result<Self, NetwordleError> {
        let conn = TcpConnection::connect(addr).await?;
        tracing::debug!(id = %conn.id(), peer = ?conn.peer_addr(), "connected");
        Ok(Self::new(conn))
    }
}

impl<C: Connection<Error = TransportError>> GameClient<C> {
    /// Wraps an open connection.
    pub fn new(conn: C) -> Self {
        Self {
            conn: ManagedConnection::new(conn),
            state: ClientState::Connected,
            word_length: None,
            reply_timeout: DEFAULT_REPLY_TIMEOUT,
        }
    }

    /// Sets how long to wait for each reply.
    pub fn with_reply_timeout(mut self, timeout: Duration) -> Self {
        self.reply_timeout = timeout;
        self
    }

    /// The connection's ID.
    pub fn id(&self) -> ConnectionId {
        self.conn.id()
    }

    /// The current state.
    pub fn state(&self) -> ClientState {
        self.state
    }

    /// The word length, known once the server has answered `START GAME`.
    pub fn word_length(&self) -> Option<usize> {
        self.word_length
    }

    /// Sends `START GAME` and waits for the placeholder hint.
    ///
    /// Returns the placeholder; its length is the word length for the
    /// rest of the game.
    ///
    /// # Errors
    /// [`NetwordleError::InvalidInput`] if the game was already started;
    /// [`ProtocolError::UnexpectedMessage`] if the server answers with
    /// anything but a placeholder. Any error other than `InvalidInput`
    /// ends the game.
    pub async fn start(&mut self) -> Result<String, NetwordleError> {
        if self.state != ClientState::Connected {
            return Err(NetwordleError::InvalidInput(format!(
                "cannot start a game while {}",
                self.state
            )));
        }

        let result = self.exchange_start().await;
        if result.is_err() {
            self.finish().await;
        }
        result
    }

    async fn exchange_start(&mut self) -> Result<String, NetwordleError> {
        self.conn.send(networdle_protocol::START_GAME).await?;
        let reply = self.read_line().await?;

        if !networdle_protocol::is_placeholder(&reply) {
            return Err(ProtocolError::UnexpectedMessage(reply).into());
        }

        self.word_length = Some(reply.len());
        self.transition(ClientState::Playing);
        Ok(reply)
    }

    /// Sends one guess and reads the server's verdict.
    ///
    /// # Errors
    /// [`NetwordleError::InvalidInput`], without sending anything, if the
    /// game isn't in progress or `word` is not ASCII or holds a newline.
    /// Any other error ends the game.
    pub async fn guess(&mut self, word: &str) -> Result<Reply, NetwordleError> {
        if self.state != ClientState::Playing {
            return Err(NetwordleError::InvalidInput(format!(
                "cannot guess while {}",
                self.state
            )));
        }
        if !word.is_ascii() {
            return Err(NetwordleError::InvalidInput(
                "guesses must be ASCII".into(),
            ));
        }
        if word.contains('\n') {
            return Err(NetwordleError::InvalidInput(
                "guesses must be a single line".into(),
            ));
        }

        let result = self.exchange_guess(word).await;
        match &result {
            Ok(Reply::GameOver { .. }) | Err(_) => self.finish().await,
            Ok(_) => {}
        }
        result
    }

    async fn exchange_guess(&mut self, word: &str) -> Result<Reply, NetwordleError> {
        self.conn.send(word).await?;
        let reply = self.read_line().await?;

        if reply == INVALID_GUESS {
            return Ok(Reply::Invalid);
        }

        if !reply.is_empty() && reply.bytes().all(|b| b.is_ascii_digit()) {
            let guesses = reply
                .parse()
                .map_err(|_| ProtocolError::InvalidMessage(reply.clone()))?;
            let end = self.read_line().await?;
            if end != END_GAME {
                return Err(ProtocolError::UnexpectedMessage(end).into());
            }
            return Ok(Reply::GameOver { guesses });
        }

        if self.is_hint(&reply) {
            return Ok(Reply::Hint(reply));
        }

        Err(ProtocolError::UnexpectedMessage(reply).into())
    }

    /// Plays a whole game interactively.
    ///
    /// Reads guesses from `input` one line at a time and writes every
    /// server reply to `output`, one per line, exactly as received. Input
    /// the client refuses to send is reported on `output` and play goes on.
    ///
    /// Returns the final guess count, or `None` if `input` ran out first.
    ///
    /// # Errors
    /// I/O errors on `input` or `output`, and any error that ends the game.
    pub async fn play<R, W>(
        &mut self,
        input: R,
        mut output: W,
    ) -> Result<Option<u32>, NetwordleError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        if self.state == ClientState::Connected {
            let placeholder = self.start().await?;
            write_line(&mut output, &placeholder).await?;
        }

        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            let word = line.trim_end_matches('\r');
            match self.guess(word).await {
                Ok(Reply::Hint(hint)) => write_line(&mut output, &hint).await?,
                Ok(Reply::Invalid) => {
                    write_line(&mut output, INVALID_GUESS).await?;
                }
                Ok(Reply::GameOver { guesses }) => {
                    write_line(&mut output, &guesses.to_string()).await?;
                    write_line(&mut output, END_GAME).await?;
                    return Ok(Some(guesses));
                }
                Err(NetwordleError::InvalidInput(reason)) => {
                    write_line(&mut output, &reason).await?;
                }
                Err(e) => return Err(e),
            }
        }

        tracing::debug!(id = %self.id(), "input ended before the game did");
        self.finish().await;
        Ok(None)
    }

    /// Closes the connection. Only the first call does anything.
    pub async fn close(&mut self) -> bool {
        let closed = self.conn.close().await;
        self.transition(ClientState::Finished);
        closed
    }

    /// A hint is as long as the word and holds only letters and `_`.
    fn is_hint(&self, reply: &str) -> bool {
        Some(reply.len()) == self.word_length && parse_hint(reply).is_some()
    }

    async fn read_line(&self) -> Result<String, NetwordleError> {
        let frame = self.conn.receive_within(self.reply_timeout).await?;
        networdle_protocol::validate(&frame)?;
        Ok(networdle_protocol::decode(&frame)?)
    }

    async fn finish(&mut self) {
        self.close().await;
    }

    fn transition(&mut self, next: ClientState) {
        if self.state != next {
            tracing::debug!(
                id = %self.id(),
                from = %self.state,
                to = %next,
                "client state changed"
            );
            self.state = next;
        }
    }
}

async fn write_line<W: AsyncWrite + Unpin>(
    output: &mut W,
    line: &str,
) -> std::io::Result<()> {
    output.write_all(line.as_bytes()).await?;
    output.write_all(b"\n").await?;
    output.flush().await
}

#[cfg(test)]
mod tests {
    use networdle_transport::StreamConnection;
    use tokio::io::{AsyncReadExt, DuplexStream};

    use super::*;

    type Pipe = StreamConnection<DuplexStream>;

    /// A client on one end of a pipe, and a scripted server on the other.
    fn pair() -> (GameClient<Pipe>, Pipe) {
        let (ours, theirs) = tokio::io::duplex(1024);
        (
            GameClient::new(StreamConnection::new(ours, 256))
                .with_reply_timeout(Duration::from_secs(5)),
            StreamConnection::new(theirs, 256),
        )
    }

    async fn expect_line(server: &Pipe, line: &str) {
        let frame = server.recv().await.unwrap().unwrap();
        assert_eq!(frame, format!("{line}\n").into_bytes());
    }

    async fn started() -> (GameClient<Pipe>, Pipe) {
        let (mut client, server) = pair();
        server.send(b"_____\n").await.unwrap();
        assert_eq!(client.start().await.unwrap(), "_____");
        expect_line(&server, "START GAME").await;
        (client, server)
    }

    #[tokio::test]
    async fn test_start_learns_word_length() {
        let (client, _server) = started().await;
        assert_eq!(client.word_length(), Some(5));
        assert_eq!(client.state(), ClientState::Playing);
    }

    #[tokio::test]
    async fn test_start_rejects_non_placeholder() {
        let (mut client, server) = pair();
        server.send(b"GAME OVER\n").await.unwrap();

        let err = client.start().await.unwrap_err();
        assert!(matches!(
            err,
            NetwordleError::Protocol(ProtocolError::UnexpectedMessage(ref m)) if m == "GAME OVER"
        ));
        assert_eq!(client.state(), ClientState::Finished);
    }

    #[tokio::test]
    async fn test_guess_classifies_replies() {
        let (mut client, server) = started().await;

        server.send(b"INVALID GUESS\n").await.unwrap();
        assert_eq!(client.guess("ZZZZZ").await.unwrap(), Reply::Invalid);
        expect_line(&server, "ZZZZZ").await;

        server.send(b"paPe_\n").await.unwrap();
        assert_eq!(
            client.guess("PAPER").await.unwrap(),
            Reply::Hint("paPe_".into())
        );

        server.send(b"2\nGAME OVER\n").await.unwrap();
        assert_eq!(
            client.guess("APPLE").await.unwrap(),
            Reply::GameOver { guesses: 2 }
        );
        assert_eq!(client.state(), ClientState::Finished);
    }

    #[tokio::test]
    async fn test_count_without_game_over_is_unexpected() {
        let (mut client, server) = started().await;
        server.send(b"3\nAPPLE\n").await.unwrap();

        assert!(matches!(
            client.guess("APPLE").await,
            Err(NetwordleError::Protocol(ProtocolError::UnexpectedMessage(_)))
        ));
        assert_eq!(client.state(), ClientState::Finished);
    }

    #[tokio::test]
    async fn test_hint_of_wrong_length_is_unexpected() {
        let (mut client, server) = started().await;
        server.send(b"pa_\n").await.unwrap();

        assert!(matches!(
            client.guess("PAPER").await,
            Err(NetwordleError::Protocol(ProtocolError::UnexpectedMessage(_)))
        ));
    }

    #[tokio::test]
    async fn test_hint_with_foreign_characters_is_unexpected() {
        let (mut client, server) = started().await;
        server.send(b"pa-e_\n").await.unwrap();

        assert!(matches!(
            client.guess("PAPER").await,
            Err(NetwordleError::Protocol(ProtocolError::UnexpectedMessage(ref m))) if m == "pa-e_"
        ));
        assert_eq!(client.state(), ClientState::Finished);
    }

    #[tokio::test]
    async fn test_guess_rejects_bad_input_without_sending() {
        let (mut client, server) = started().await;

        assert!(matches!(
            client.guess("CAFÉS").await,
            Err(NetwordleError::InvalidInput(_))
        ));
        assert!(matches!(
            client.guess("CRANE\nSLATE").await,
            Err(NetwordleError::InvalidInput(_))
        ));
        assert_eq!(client.state(), ClientState::Playing);

        // Nothing reached the server: the next line it sees is this guess.
        server.send(b"INVALID GUESS\n").await.unwrap();
        client.guess("QQQQQ").await.unwrap();
        expect_line(&server, "QQQQQ").await;
    }

    #[tokio::test]
    async fn test_guess_before_start_is_rejected() {
        let (mut client, _server) = pair();
        assert!(matches!(
            client.guess("APPLE").await,
            Err(NetwordleError::InvalidInput(_))
        ));
        assert_eq!(client.state(), ClientState::Connected);
    }

    #[tokio::test]
    async fn test_server_hangup_ends_game() {
        let (mut client, server) = started().await;
        drop(server);

        assert!(matches!(
            client.guess("APPLE").await,
            Err(NetwordleError::Session(_))
        ));
        assert_eq!(client.state(), ClientState::Finished);
    }

    #[tokio::test]
    async fn test_close_is_idempotent() {
        let (mut client, _server) = pair();
        assert!(client.close().await);
        assert!(!client.close().await);
        assert_eq!(client.state(), ClientState::Finished);
    }

    #[tokio::test]
    async fn test_play_echoes_server_replies() {
        let (mut client, server) = pair();
        server
            .send(b"_____\nINVALID GUESS\n__a_E\n2\nGAME OVER\n")
            .await
            .unwrap();

        let input: &[u8] = b"ZZZZZ\nCRANE\nAPPLE\nSLATE\n";
        let (out_writer, mut out_reader) = tokio::io::duplex(1024);

        let guesses = client.play(input, out_writer).await.unwrap();
        assert_eq!(guesses, Some(2));

        let mut printed = String::new();
        out_reader.read_to_string(&mut printed).await.unwrap();
        assert_eq!(printed, "_____\nINVALID GUESS\n__a_E\n2\nGAME OVER\n");
    }

    #[tokio::test]
    async fn test_play_stops_when_input_ends() {
        let (mut client, server) = pair();
        server.send(b"_____\n").await.unwrap();

        let input: &[u8] = b"";
        let mut output = Vec::new();

        assert_eq!(client.play(input, &mut output).await.unwrap(), None);
        assert_eq!(output, b"_____\n");
        assert_eq!(client.state(), ClientState::Finished);
    }
}
