//! The scoring state of one game: target, accepted guesses, guess count.
//!
//! This is the pure half of a session. It never touches the network; the
//! session feeds it decoded guesses and sends back whatever it returns.

use std::sync::Arc;

use crate::{GuessList, TargetWord, hint};

/// What a submitted guess produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessOutcome {
    /// The word is not in the guess list. Not counted.
    Invalid,
    /// A valid but wrong guess, with its hint.
    Hint(String),
    /// The target was found after `guesses` valid guesses.
    Solved { guesses: u32 },
}

/// One player's game against one target word.
///
/// ```rust
/// use std::sync::Arc;
/// use networdle_game::{Game, GuessList, GuessOutcome, TargetWord};
///
/// let guesses = Arc::new(GuessList::new(["APPLE", "PAPER"]).unwrap());
/// let mut game = Game::new(TargetWord::new("APPLE").unwrap(), guesses);
///
/// assert_eq!(game.submit("zzzzz"), GuessOutcome::Invalid);
/// assert_eq!(game.submit("paper"), GuessOutcome::Hint("paPe_".into()));
/// assert_eq!(game.submit("APPLE"), GuessOutcome::Solved { guesses: 2 });
/// ```
#[derive(Debug, Clone)]
pub struct Game {
    target: TargetWord,
    guesses: Arc<GuessList>,
    guess_count: u32,
    solved: bool,
}

impl Game {
    /// Starts a game with no guesses made.
    pub fn new(target: TargetWord, guesses: Arc<GuessList>) -> Self {
        Self {
            target,
            guesses,
            guess_count: 0,
            solved: false,
        }
    }

    /// Scores a guess. Matching is case-insensitive.
    ///
    /// Once the target has been found the count is frozen: further
    /// submissions report the final score without counting.
    pub fn submit(&mut self, guess: &str) -> GuessOutcome {
        if self.solved {
            return GuessOutcome::Solved {
                guesses: self.guess_count,
            };
        }

        let guess = guess.to_ascii_uppercase();
        if !self.guesses.contains(&guess) {
            return GuessOutcome::Invalid;
        }

        self.guess_count = self.guess_count.saturating_add(1);

        if guess == self.target.as_str() {
            self.solved = true;
            return GuessOutcome::Solved {
                guesses: self.guess_count,
            };
        }

        GuessOutcome::Hint(hint(self.target.as_str(), &guess))
    }

    /// The word being guessed.
    pub fn target(&self) -> &TargetWord {
        &self.target
    }

    /// Number of valid guesses so far.
    pub fn guess_count(&self) -> u32 {
        self.guess_count
    }

    /// Returns `true` once the target has been guessed.
    pub fn is_solved(&self) -> bool {
        self.solved
    }

    /// The length of the target (and of every hint).
    pub fn word_length(&self) -> usize {
        self.target.len()
    }
}
