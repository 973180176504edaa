//! Hint generation: scoring a guess against the target.
//!
//! For every position of the guess, the hint shows:
//!
//! - the letter in **uppercase** if it is in the right place,
//! - the letter in **lowercase** if it occurs elsewhere in the target,
//! - `_` otherwise.
//!
//! Duplicate letters are the subtle part. Each letter of the target can
//! justify at most one uppercase or lowercase letter in the hint, so
//! guessing `PAPER` against `APPLE` cannot light up more `P`s than
//! `APPLE` has. Exact matches claim their target letter first; only then
//! do misplaced letters claim what is left, left to right.

use std::fmt;

use networdle_protocol::PLACEHOLDER;

/// Feedback for a single position of a guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LetterHint {
    /// Right letter, right place. Rendered in uppercase.
    Exact(char),
    /// Right letter, wrong place. Rendered in lowercase.
    Present(char),
    /// The letter is not available in the target.
    Absent,
}

impl LetterHint {
    /// The character this hint is rendered as on the wire.
    pub fn to_char(self) -> char {
        match self {
            Self::Exact(c) => c.to_ascii_uppercase(),
            Self::Present(c) => c.to_ascii_lowercase(),
            Self::Absent => PLACEHOLDER,
        }
    }

    /// Reads back a rendered hint character.
    ///
    /// Returns `None` for anything that can't appear in a hint.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            PLACEHOLDER => Some(Self::Absent),
            'A'..='Z' => Some(Self::Exact(c)),
            'a'..='z' => Some(Self::Present(c.to_ascii_uppercase())),
            _ => None,
        }
    }
}

impl fmt::Display for LetterHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Scores `guess` against `target`, position by position.
///
/// Both words are expected to be uppercase and of equal length; the guess
/// list guarantees this before a guess is ever scored. Extra target
/// positions beyond the guess stay [`LetterHint::Absent`].
pub fn evaluate(target: &str, guess: &str) -> Vec<LetterHint> {
    let target: Vec<char> = target.chars().collect();
    let guess: Vec<char> = guess.chars().collect();

    let mut hints = vec![LetterHint::Absent; target.len()];
    let mut consumed = vec![false; target.len()];
    let mut resolved = vec![false; target.len()];

    // Pass 1: exact matches claim their own position.
    for (i, (&g, &t)) in guess.iter().zip(&target).enumerate() {
        if g == t {
            hints[i] = LetterHint::Exact(g);
            consumed[i] = true;
            resolved[i] = true;
        }
    }

    // Pass 2: misplaced letters claim the first unclaimed occurrence.
    for (i, &g) in guess.iter().enumerate().take(target.len()) {
        if resolved[i] {
            continue;
        }
        let free = target
            .iter()
            .zip(consumed.iter())
            .position(|(&t, &used)| t == g && !used);
        if let Some(j) = free {
            consumed[j] = true;
            hints[i] = LetterHint::Present(g);
        }
    }

    hints
}

/// Scores `guess` against `target` and renders the hint string sent to
/// the client.
///
/// ```rust
/// use networdle_game::hint;
///
/// assert_eq!(hint("APPLE", "APPLE"), "APPLE");
/// assert_eq!(hint("APPLE", "PAPER"), "paPe_");
/// ```
pub fn hint(target: &str, guess: &str) -> String {
    render(&evaluate(target, guess))
}

/// Renders a scored guess as a hint string.
pub fn render(hints: &[LetterHint]) -> String {
    hints.iter().map(|h| h.to_char()).collect()
}

/// Parses a hint string received from the server.
///
/// Returns `None` if any character is not a letter or the placeholder.
pub fn parse(hint: &str) -> Option<Vec<LetterHint>> {
    hint.chars().map(LetterHint::from_char).collect()
}
