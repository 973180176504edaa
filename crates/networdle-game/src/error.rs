//! Error types for the game layer.

use std::path::PathBuf;

/// Errors that can occur while building word lists.
///
/// A missing or unreadable word file is not an error at this level: the
/// loader falls back to a default. These variants are for lists that were
/// read but cannot be played with.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// A word list file could not be read.
    #[error("failed to read word list {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A word contains something other than ASCII letters.
    #[error("invalid word {0:?}: words must be ASCII letters only")]
    InvalidWord(String),

    /// A word's length differs from the rest of the list. Every hint,
    /// including the placeholder start response, is one word long, so all
    /// words must agree.
    #[error("word {word:?} has {found} letters, expected {expected}")]
    InconsistentWordLength {
        word: String,
        expected: usize,
        found: usize,
    },

    /// There are no words to play with.
    #[error("word list is empty")]
    EmptyWordList,
}
