//! Word lists: the accepted guesses and the candidate targets.
//!
//! Both lists are plain text, one word per line. They are read once when
//! the server starts and never change afterwards, so sessions share the
//! guess list through an `Arc` without any locking.
//!
//! # Fallbacks
//!
//! A server with a missing word file should still be able to run a game.
//! If the target file can't be read, the bank uses [`DEFAULT_TARGET`], or
//! draws its targets from the guess list when that list holds words of
//! another length. If the guess file can't be read, only the targets are
//! accepted as guesses.
//! A file that *was* read but mixes word lengths or contains non-letters
//! is a configuration error and is reported instead.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::GameError;

/// The target used when no target list is available.
pub const DEFAULT_TARGET: &str = "APPLE";

/// Trims and uppercases a raw word. Blank input yields `None`.
fn normalize(raw: &str) -> Result<Option<String>, GameError> {
    let word = raw.trim();
    if word.is_empty() {
        return Ok(None);
    }
    if !word.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(GameError::InvalidWord(word.to_string()));
    }
    Ok(Some(word.to_ascii_uppercase()))
}

/// Checks `word` against the length fixed by the first word seen.
fn check_length(
    word: &str,
    expected: &mut Option<usize>,
) -> Result<(), GameError> {
    match *expected {
        Some(len) if len != word.len() => {
            Err(GameError::InconsistentWordLength {
                word: word.to_string(),
                expected: len,
                found: word.len(),
            })
        }
        Some(_) => Ok(()),
        None => {
            *expected = Some(word.len());
            Ok(())
        }
    }
}

// ---------------------------------------------------------------------------
// TargetWord
// ---------------------------------------------------------------------------

/// The word a session's player is trying to find. Always uppercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TargetWord(String);

impl TargetWord {
    /// Normalizes and wraps a target word.
    ///
    /// # Errors
    /// [`GameError::InvalidWord`] if the word is blank or not all letters.
    pub fn new(word: &str) -> Result<Self, GameError> {
        normalize(word)?
            .map(Self)
            .ok_or_else(|| GameError::InvalidWord(word.to_string()))
    }

    /// The word as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of letters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false` for a constructed target; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for TargetWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Default for TargetWord {
    fn default() -> Self {
        Self(DEFAULT_TARGET.to_string())
    }
}

// ---------------------------------------------------------------------------
// GuessList
// ---------------------------------------------------------------------------

/// The set of words a player may guess. All words share one length.
#[derive(Debug, Clone)]
pub struct GuessList {
    words: HashSet<String>,
    word_length: usize,
}

impl GuessList {
    /// Builds a guess list from raw words.
    ///
    /// Words are trimmed and uppercased; blank entries are skipped.
    ///
    /// # Errors
    /// - [`GameError::InvalidWord`] for entries that are not all letters
    /// - [`GameError::InconsistentWordLength`] if lengths differ
    /// - [`GameError::EmptyWordList`] if nothing is left
    pub fn new<I, S>(words: I) -> Result<Self, GameError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut word_length = None;
        let mut set = HashSet::new();
        for raw in words {
            if let Some(word) = normalize(raw.as_ref())? {
                check_length(&word, &mut word_length)?;
                set.insert(word);
            }
        }
        let word_length = word_length.ok_or(GameError::EmptyWordList)?;
        Ok(Self {
            words: set,
            word_length,
        })
    }

    /// Returns `true` if `word` (already uppercase) may be guessed.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// The length shared by every word in the list.
    pub fn word_length(&self) -> usize {
        self.word_length
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns `true` if the list has no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

// ---------------------------------------------------------------------------
// WordBank
// ---------------------------------------------------------------------------

/// The loaded word lists: shared guesses plus the candidate targets.
#[derive(Debug, Clone)]
pub struct WordBank {
    guesses: Arc<GuessList>,
    targets: Vec<TargetWord>,
}

impl WordBank {
    /// Builds a bank from raw guess and target words.
    ///
    /// Every target is also accepted as a guess, so a game can always be
    /// won.
    ///
    /// # Errors
    /// As for [`GuessList::new`]; additionally every target must have the
    /// guess list's length, and there must be at least one target.
    pub fn new<G, T, S>(guesses: G, targets: T) -> Result<Self, GameError>
    where
        G: IntoIterator<Item = S>,
        T: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut word_length = None;
        let mut target_words = Vec::new();
        for raw in targets {
            if let Some(word) = normalize(raw.as_ref())? {
                check_length(&word, &mut word_length)?;
                target_words.push(TargetWord(word));
            }
        }
        if target_words.is_empty() {
            return Err(GameError::EmptyWordList);
        }

        let mut words: Vec<String> = Vec::new();
        for raw in guesses {
            if let Some(word) = normalize(raw.as_ref())? {
                check_length(&word, &mut word_length)?;
                words.push(word);
            }
        }
        words.extend(target_words.iter().map(|t| t.0.clone()));

        Ok(Self {
            guesses: Arc::new(GuessList::new(words)?),
            targets: target_words,
        })
    }

    /// A bank with only [`DEFAULT_TARGET`], used when nothing can be read.
    pub fn fallback() -> Self {
        let target = TargetWord::default();
        let mut words = HashSet::new();
        words.insert(target.0.clone());
        Self {
            guesses: Arc::new(GuessList {
                words,
                word_length: target.len(),
            }),
            targets: vec![target],
        }
    }

    /// Loads the guess and target files, falling back where they can't be
    /// read.
    ///
    /// # Errors
    /// Only for files that were read but hold unusable words.
    pub fn load(
        guess_path: impl AsRef<Path>,
        target_path: impl AsRef<Path>,
    ) -> Result<Self, GameError> {
        let guesses = match read_words(guess_path.as_ref()) {
            Ok(words) => words,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "failed to read guess list, accepting targets only"
                );
                Vec::new()
            }
        };

        let targets = match read_words(target_path.as_ref()) {
            Ok(words) if !words.is_empty() => words,
            Ok(_) => {
                tracing::warn!(
                    path = %target_path.as_ref().display(),
                    "target list is empty, falling back"
                );
                fallback_targets(&guesses)
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "failed to read target list, falling back"
                );
                fallback_targets(&guesses)
            }
        };

        let bank = Self::new(guesses, targets)?;
        tracing::info!(
            guesses = bank.guesses.len(),
            targets = bank.targets.len(),
            word_length = bank.word_length(),
            "word lists loaded"
        );
        Ok(bank)
    }

    /// The shared guess list.
    pub fn guesses(&self) -> Arc<GuessList> {
        Arc::clone(&self.guesses)
    }

    /// The candidate targets.
    pub fn targets(&self) -> &[TargetWord] {
        &self.targets
    }

    /// The length of every word in the bank.
    pub fn word_length(&self) -> usize {
        self.guesses.word_length()
    }

    /// Picks a target at random from `rng`.
    ///
    /// The random source is passed in rather than taken from a global so a
    /// seeded generator reproduces the same sequence of games.
    pub fn choose_target<R: Rng + ?Sized>(&self, rng: &mut R) -> TargetWord {
        self.targets.choose(rng).cloned().unwrap_or_default()
    }
}

/// Targets to play when the target list can't be used.
///
/// [`DEFAULT_TARGET`] when it fits the guess list, otherwise every guess is
/// a candidate, so the bank keeps one word length.
fn fallback_targets(guesses: &[String]) -> Vec<String> {
    match guesses.first() {
        Some(first) if first.len() != DEFAULT_TARGET.len() => {
            tracing::warn!(
                word_length = first.len(),
                "default target does not fit, drawing targets from guesses"
            );
            guesses.to_vec()
        }
        _ => {
            tracing::warn!(fallback = DEFAULT_TARGET, "using default target");
            vec![DEFAULT_TARGET.to_string()]
        }
    }
}

/// Reads a word file into lines.
fn read_words(path: &Path) -> Result<Vec<String>, GameError> {
    let contents =
        std::fs::read_to_string(path).map_err(|source| GameError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}
