//! Game rules for Networdle.
//!
//! Everything here is pure and synchronous:
//!
//! - [`hint`] / [`evaluate`]: score a guess against the target with
//!   duplicate-safe exact / misplaced / absent rules
//! - [`GuessList`], [`TargetWord`], [`WordBank`]: the word lists, loaded
//!   once at startup, with fallbacks for missing files
//! - [`Game`]: one player's progress: validates guesses, counts them,
//!   and decides when the game is won

mod error;
mod game;
mod hint;
mod words;

pub use error::GameError;
pub use game::{Game, GuessOutcome};
pub use hint::{evaluate, hint, parse as parse_hint, render, LetterHint};
pub use words::{DEFAULT_TARGET, GuessList, TargetWord, WordBank};
