//! Control messages: the reserved lines of the protocol.
//!
//! Every line on the wire is either one of these literals or free-form
//! data (a guess or a hint). Nothing tags a frame as "control"; a frame is
//! a control message only if its payload is exactly the literal.
//!
//! The start response is the one literal that is not fixed: it is the
//! all-placeholder hint, so its length is the word length. That length is
//! fixed once when a [`ControlCatalog`] is built from the loaded word lists.

use std::fmt;

use crate::codec;

/// Client → server: begin a session.
pub const START_GAME: &str = "START GAME";

/// Server → client: the guess is not in the accepted word list.
pub const INVALID_GUESS: &str = "INVALID GUESS";

/// Server → client: the session is over. Sent right after the final count.
pub const END_GAME: &str = "GAME OVER";

/// The character shown for an unresolved letter.
pub const PLACEHOLDER: char = '_';

/// Word length used when nothing else is configured.
pub const DEFAULT_WORD_LENGTH: usize = 5;

/// The kinds of control message in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlMessageKind {
    /// `START GAME`, sent by the client to begin.
    ClientStartGame,
    /// The all-placeholder hint the server answers `START GAME` with.
    ServerStartResponse,
    /// `GAME OVER`, sent by the server after the final count.
    ServerEndGame,
    /// `INVALID GUESS`, sent by the server for words it does not know.
    ServerInvalidGuess,
}

impl fmt::Display for ControlMessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ClientStartGame => write!(f, "ClientStartGame"),
            Self::ServerStartResponse => write!(f, "ServerStartResponse"),
            Self::ServerEndGame => write!(f, "ServerEndGame"),
            Self::ServerInvalidGuess => write!(f, "ServerInvalidGuess"),
        }
    }
}

/// The control literals for one word length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlCatalog {
    start_response: String,
}

impl ControlCatalog {
    /// Builds the catalog for games played with `word_length`-letter words.
    pub fn new(word_length: usize) -> Self {
        Self {
            start_response: placeholder(word_length),
        }
    }

    /// The word length this catalog was built for.
    pub fn word_length(&self) -> usize {
        self.start_response.len()
    }

    /// Returns the literal `kind` maps to.
    pub fn literal(&self, kind: ControlMessageKind) -> &str {
        match kind {
            ControlMessageKind::ClientStartGame => START_GAME,
            ControlMessageKind::ServerStartResponse => &self.start_response,
            ControlMessageKind::ServerEndGame => END_GAME,
            ControlMessageKind::ServerInvalidGuess => INVALID_GUESS,
        }
    }

    /// Returns `true` iff `frame` is a valid frame whose payload is exactly
    /// the literal for `kind`.
    ///
    /// Guesses and hints never classify as any kind, and neither does a
    /// literal with a prefix, suffix, or different case.
    pub fn classify(&self, frame: &[u8], kind: ControlMessageKind) -> bool {
        if !codec::is_valid_frame(frame) {
            return false;
        }
        codec::decode(frame)
            .map(|payload| payload == self.literal(kind))
            .unwrap_or(false)
    }
}

impl Default for ControlCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_WORD_LENGTH)
    }
}

/// Returns a hint with every one of `len` positions unresolved.
pub fn placeholder(len: usize) -> String {
    std::iter::repeat_n(PLACEHOLDER, len).collect()
}

/// Returns `true` if `text` is a non-empty run of placeholders.
///
/// The client uses this to recognise the start response before it knows
/// how long the words are.
pub fn is_placeholder(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c == PLACEHOLDER)
}
