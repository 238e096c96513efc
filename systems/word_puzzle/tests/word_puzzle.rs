use alchemy_grid_system_word_puzzle::{
    generate, score_guess, HintTier, LetterFeedback, PuzzleStatus, Theme, WordPuzzle,
    WordPuzzleError,
};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use LetterFeedback::{Absent, Correct, Present};

#[test]
fn exact_guess_is_all_correct() {
    assert_eq!(score_guess("FLAME", "flame"), vec![Correct; 5]);
}

#[test]
fn anagram_has_no_absent_letters() {
    let feedback = score_guess("FLAME", "MALEF");
    assert!(!feedback.contains(&Absent), "anagram feedback: {feedback:?}");
    assert_eq!(feedback, vec![Present, Present, Present, Present, Present]);
}

#[test]
fn repeated_letters_are_limited_by_the_target() {
    // Target has two E; the guess has three.
    assert_eq!(
        score_guess("GEESE", "EERIE"),
        vec![Present, Correct, Absent, Absent, Correct]
    );
    assert_eq!(
        score_guess("CRANE", "EERIE"),
        vec![Absent, Absent, Present, Absent, Correct]
    );
}

#[test]
fn length_mismatch_is_all_absent() {
    assert_eq!(score_guess("FLAME", "FLAMES"), vec![Absent; 5]);
    assert_eq!(score_guess("FLAME", ""), vec![Absent; 5]);
}

#[test]
fn generated_words_follow_theme_and_level() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    for level in 0..=20 {
        let puzzle = generate(level, None, &mut rng);
        let expected_theme = Theme::ALL[(level.max(1) as usize - 1) % 7];
        assert_eq!(puzzle.theme(), expected_theme, "level {level}");
        assert!(
            puzzle.theme().words().contains(&puzzle.target()),
            "{} not in {}",
            puzzle.target(),
            puzzle.theme()
        );
        let length = puzzle.target().len();
        match level {
            0..=3 => assert_eq!(length, 5, "level {level}"),
            4..=7 => assert_eq!(length, 6, "level {level}"),
            _ => assert!(length >= 7, "level {level}"),
        }
        assert_eq!(puzzle.max_attempts(), 12u32.saturating_sub(level).max(6));
    }
}

#[test]
fn explicit_theme_overrides_the_level_rotation() {
    let mut rng = ChaCha8Rng::seed_from_u64(9);
    let puzzle = generate(1, Some(Theme::Ocean), &mut rng);
    assert_eq!(puzzle.theme(), Theme::Ocean);
    assert_eq!(puzzle.target().len(), 5);
}

#[test]
fn same_seed_generates_the_same_word() {
    let first = generate(5, None, &mut ChaCha8Rng::seed_from_u64(21));
    let second = generate(5, None, &mut ChaCha8Rng::seed_from_u64(21));
    assert_eq!(first, second);
}

#[test]
fn submitting_the_target_solves_the_puzzle() {
    let mut puzzle = WordPuzzle::new("FLAME", Theme::Elements, 1).expect("valid target");
    let miss = puzzle.submit("blaze").expect("valid guess");
    assert_eq!(miss.status, PuzzleStatus::InProgress);
    assert_eq!(miss.attempts_left, 10);

    let hit = puzzle.submit("FLAME").expect("valid guess");
    assert_eq!(hit.status, PuzzleStatus::Solved);
    assert_eq!(puzzle.guesses().len(), 2);
    assert_eq!(
        puzzle.submit("FLAME"),
        Err(WordPuzzleError::PuzzleFinished {
            status: PuzzleStatus::Solved
        })
    );
}

#[test]
fn invalid_guesses_do_not_use_attempts() {
    let mut puzzle = WordPuzzle::new("FLAME", Theme::Elements, 1).expect("valid target");
    assert!(matches!(
        puzzle.submit("FLAMES"),
        Err(WordPuzzleError::InvalidGuess { expected: 5, .. })
    ));
    assert!(matches!(
        puzzle.submit("FL4ME"),
        Err(WordPuzzleError::InvalidGuess { .. })
    ));
    assert_eq!(puzzle.attempts_left(), 11);
    assert!(puzzle.guesses().is_empty());
}

#[test]
fn guesses_that_only_upper_case_to_ascii_are_rejected() {
    let mut puzzle = WordPuzzle::new("STRANGE", Theme::Elements, 1).expect("valid target");
    assert!(matches!(
        puzzle.submit("straße"),
        Err(WordPuzzleError::InvalidGuess { expected: 7, .. })
    ));
    assert!(puzzle.guesses().is_empty());
    let outcome = puzzle.submit(" strange ").expect("valid guess");
    assert_eq!(outcome.status, PuzzleStatus::Solved);
}

#[test]
fn feedback_length_follows_target_characters() {
    assert_eq!(score_guess("STRAßE", "strasse"), vec![Absent; 6]);
    let feedback = score_guess("STRAßE", "straße");
    assert_eq!(feedback, vec![Correct; 6]);
}

#[test]
fn running_out_of_attempts_fails_the_puzzle() {
    let mut puzzle = WordPuzzle::new("FLAME", Theme::Elements, 9).expect("valid target");
    assert_eq!(puzzle.max_attempts(), 6);
    for attempt in 0..6 {
        let outcome = puzzle.submit("STONE").expect("valid guess");
        let expected = if attempt == 5 {
            PuzzleStatus::Failed
        } else {
            PuzzleStatus::InProgress
        };
        assert_eq!(outcome.status, expected, "attempt {attempt}");
    }
    assert!(puzzle.submit("FLAME").is_err(), "failed puzzles accept nothing");
}

#[test]
fn hints_reveal_progressively_more() {
    let known = WordPuzzle::new("FLAME", Theme::Elements, 1).expect("valid target");
    assert_eq!(known.hint(HintTier::First), "The word starts with 'F'.");
    assert_eq!(known.hint(HintTier::Second), "The word contains 2 vowels.");
    assert_eq!(known.hint(HintTier::Third), "The visible, glowing part of a fire.");

    let unknown = WordPuzzle::new("BLAZE", Theme::Elements, 1).expect("valid target");
    assert_eq!(unknown.hint(HintTier::Third), "A word connected to elements.");
}

fn word(length: usize) -> impl Strategy<Value = String> {
    proptest::collection::vec(prop::sample::select(vec!['A', 'B', 'E', 'L', 'M']), length)
        .prop_map(|letters| letters.into_iter().collect())
}

proptest! {
    #[test]
    fn scoring_is_pure(target in word(5), guess in word(5)) {
        prop_assert_eq!(score_guess(&target, &guess), score_guess(&target, &guess));
    }

    #[test]
    fn marked_letters_never_exceed_the_target_count(target in word(5), guess in word(5)) {
        let feedback = score_guess(&target, &guess);
        prop_assert_eq!(feedback.len(), target.len());
        for letter in guess.chars() {
            let marked = guess
                .chars()
                .zip(&feedback)
                .filter(|(c, f)| *c == letter && **f != Absent)
                .count();
            let available = target.chars().filter(|c| *c == letter).count();
            prop_assert!(marked <= available, "{letter}: {marked} > {available}");
        }
    }
}
