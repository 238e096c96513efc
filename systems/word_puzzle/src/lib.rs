#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Themed word-guessing puzzle with two-pass letter feedback.

mod themes;

use std::collections::HashMap;

use log::info;
use rand::{seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};

pub use themes::{Theme, UnknownTheme};

/// Fewest attempts any puzzle allows.
pub const MIN_ATTEMPTS: u32 = 6;

/// Feedback for a single guessed letter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LetterFeedback {
    /// Right letter in the right position.
    Correct,
    /// Letter occurs elsewhere in the target.
    Present,
    /// Letter is not available in the target.
    Absent,
}

impl LetterFeedback {
    /// Single character used when printing feedback rows.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Correct => '#',
            Self::Present => '+',
            Self::Absent => '.',
        }
    }
}

/// Scores `guess` against `target`, one feedback entry per target letter.
///
/// ASCII letters of both words are upper-cased first; other characters are
/// compared as they are. A guess with a different number of characters is all
/// [`LetterFeedback::Absent`]. Exact matches are marked first and consume
/// their letter; remaining letters are marked present only while the target
/// still has an unconsumed occurrence.
#[must_use]
pub fn score_guess(target: &str, guess: &str) -> Vec<LetterFeedback> {
    let target: Vec<char> = target.chars().map(|c| c.to_ascii_uppercase()).collect();
    let guess: Vec<char> = guess.chars().map(|c| c.to_ascii_uppercase()).collect();
    let mut feedback = vec![LetterFeedback::Absent; target.len()];
    if guess.len() != target.len() {
        return feedback;
    }

    let mut available: HashMap<char, usize> = HashMap::new();
    for (index, (&wanted, &guessed)) in target.iter().zip(&guess).enumerate() {
        if wanted == guessed {
            feedback[index] = LetterFeedback::Correct;
        } else {
            *available.entry(wanted).or_default() += 1;
        }
    }

    for (index, guessed) in guess.iter().enumerate() {
        if feedback[index] == LetterFeedback::Correct {
            continue;
        }
        if let Some(count) = available.get_mut(guessed).filter(|count| **count > 0) {
            *count -= 1;
            feedback[index] = LetterFeedback::Present;
        }
    }
    feedback
}

/// Hint levels, each revealing more than the last.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HintTier {
    /// Reveals the first letter.
    First,
    /// Reveals the number of vowels.
    Second,
    /// Reveals a definition, or the theme when none is known.
    Third,
}

/// Progress of a puzzle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PuzzleStatus {
    /// Guesses are still accepted.
    InProgress,
    /// The target was guessed.
    Solved,
    /// Every attempt was used without guessing the target.
    Failed,
}

/// Reasons a puzzle or a guess may be rejected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum WordPuzzleError {
    /// The target word is empty or not made of ASCII letters.
    #[error("'{0}' cannot be a target word")]
    InvalidTarget(String),
    /// The guess has the wrong length or contains something other than letters.
    #[error("'{guess}' is not a {expected}-letter word")]
    InvalidGuess {
        /// Rejected guess.
        guess: String,
        /// Length of the target word.
        expected: usize,
    },
    /// The puzzle already ended.
    #[error("the puzzle is over ({status:?})")]
    PuzzleFinished {
        /// Final status of the puzzle.
        status: PuzzleStatus,
    },
}

/// Result of an accepted guess.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessOutcome {
    /// Per-letter feedback.
    pub feedback: Vec<LetterFeedback>,
    /// Status after the guess.
    pub status: PuzzleStatus,
    /// Attempts that remain.
    pub attempts_left: u32,
}

/// A word puzzle and the guesses made so far.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordPuzzle {
    target: String,
    max_attempts: u32,
    theme: Theme,
    level: u32,
    guesses: Vec<(String, Vec<LetterFeedback>)>,
    status: PuzzleStatus,
}

/// Generates a puzzle for `level`, using the level's theme unless one is given.
///
/// Levels up to 3 use five-letter words, up to 7 six-letter words and longer
/// words afterwards. When the theme has no word of the right length its first
/// word is used.
pub fn generate<R>(level: u32, theme: Option<Theme>, rng: &mut R) -> WordPuzzle
where
    R: Rng + ?Sized,
{
    let theme = theme.unwrap_or_else(|| Theme::for_level(level));
    let words = theme.words();
    let candidates: Vec<&str> = words
        .iter()
        .copied()
        .filter(|word| fits_level(word.len(), level))
        .collect();
    let target = candidates
        .choose(rng)
        .or_else(|| words.first())
        .copied()
        .unwrap_or("ALCHEMY");

    let puzzle = WordPuzzle::from_word(target, theme, level);
    info!(
        "word puzzle for level {level}: theme {theme}, {} letters, {} attempts",
        puzzle.target.len(),
        puzzle.max_attempts
    );
    puzzle
}

fn is_ascii_word(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| c.is_ascii_alphabetic())
}

fn fits_level(length: usize, level: u32) -> bool {
    match level {
        0..=3 => length == 5,
        4..=7 => length == 6,
        _ => length >= 7,
    }
}

impl WordPuzzle {
    /// Creates a puzzle for a known target word of ASCII letters.
    pub fn new(target: &str, theme: Theme, level: u32) -> Result<Self, WordPuzzleError> {
        if !is_ascii_word(target) {
            return Err(WordPuzzleError::InvalidTarget(target.to_owned()));
        }
        Ok(Self::from_word(target, theme, level))
    }

    fn from_word(target: &str, theme: Theme, level: u32) -> Self {
        Self {
            target: target.to_ascii_uppercase(),
            max_attempts: 12u32.saturating_sub(level).max(MIN_ATTEMPTS),
            theme,
            level,
            guesses: Vec::new(),
            status: PuzzleStatus::InProgress,
        }
    }

    /// Upper-case target word.
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Total number of attempts allowed.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Theme the word was drawn from.
    #[must_use]
    pub const fn theme(&self) -> Theme {
        self.theme
    }

    /// Level the puzzle was generated for.
    #[must_use]
    pub const fn level(&self) -> u32 {
        self.level
    }

    /// Current status.
    #[must_use]
    pub const fn status(&self) -> PuzzleStatus {
        self.status
    }

    /// Accepted guesses with their feedback, oldest first.
    #[must_use]
    pub fn guesses(&self) -> &[(String, Vec<LetterFeedback>)] {
        &self.guesses
    }

    /// Attempts that remain.
    #[must_use]
    pub fn attempts_left(&self) -> u32 {
        let used = u32::try_from(self.guesses.len()).unwrap_or(u32::MAX);
        self.max_attempts.saturating_sub(used)
    }

    /// Scores a guess and records it.
    ///
    /// Rejected guesses do not consume an attempt.
    pub fn submit(&mut self, guess: &str) -> Result<GuessOutcome, WordPuzzleError> {
        if self.status != PuzzleStatus::InProgress {
            return Err(WordPuzzleError::PuzzleFinished {
                status: self.status,
            });
        }
        let trimmed = guess.trim();
        if !is_ascii_word(trimmed) || trimmed.len() != self.target.len() {
            return Err(WordPuzzleError::InvalidGuess {
                guess: guess.to_owned(),
                expected: self.target.len(),
            });
        }

        let normalized = trimmed.to_ascii_uppercase();
        let feedback = score_guess(&self.target, &normalized);
        self.guesses.push((normalized, feedback.clone()));
        if feedback.iter().all(|f| *f == LetterFeedback::Correct) {
            self.status = PuzzleStatus::Solved;
        } else if self.attempts_left() == 0 {
            self.status = PuzzleStatus::Failed;
        }

        Ok(GuessOutcome {
            feedback,
            status: self.status,
            attempts_left: self.attempts_left(),
        })
    }

    /// Text of the requested hint.
    #[must_use]
    pub fn hint(&self, tier: HintTier) -> String {
        match tier {
            HintTier::First => match self.target.chars().next() {
                Some(letter) => format!("The word starts with '{letter}'."),
                None => String::from("The word is empty."),
            },
            HintTier::Second => {
                let vowels = self
                    .target
                    .chars()
                    .filter(|c| matches!(c, 'A' | 'E' | 'I' | 'O' | 'U'))
                    .count();
                format!("The word contains {vowels} vowels.")
            }
            HintTier::Third => match themes::definition(&self.target) {
                Some(text) => text.to_owned(),
                None => format!("A word connected to {}.", self.theme),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attempts_shrink_with_level_down_to_six() {
        let attempts = |level| {
            WordPuzzle::new("FLAME", Theme::Elements, level)
                .expect("valid target")
                .max_attempts()
        };
        assert_eq!(attempts(1), 11);
        assert_eq!(attempts(6), 6);
        assert_eq!(attempts(40), 6);
    }

    #[test]
    fn targets_must_be_ascii_letters() {
        assert_eq!(
            WordPuzzle::new("straße", Theme::Elements, 1),
            Err(WordPuzzleError::InvalidTarget(String::from("straße")))
        );
        assert!(WordPuzzle::new("", Theme::Elements, 1).is_err());
        assert!(WordPuzzle::new("FIRE2", Theme::Elements, 1).is_err());
        let puzzle = WordPuzzle::new("flame", Theme::Elements, 1).expect("valid target");
        assert_eq!(puzzle.target(), "FLAME");
    }

    #[test]
    fn level_tiers_pick_word_lengths() {
        assert!(fits_level(5, 0));
        assert!(fits_level(5, 3));
        assert!(fits_level(6, 4));
        assert!(fits_level(6, 7));
        assert!(!fits_level(6, 8));
        assert!(fits_level(9, 8));
    }
}
