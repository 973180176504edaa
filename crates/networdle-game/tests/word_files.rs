//! Integration tests for loading word lists from disk.

use std::io::Write;

use networdle_game::{DEFAULT_TARGET, GameError, WordBank};
use tempfile::{NamedTempFile, TempDir};

fn word_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write words");
    file
}

#[test]
fn test_load_reads_both_files() {
    let guesses = word_file("crane\nslate\n\ntrace\n");
    let targets = word_file("SLATE\r\nROBOT\r\n");

    let bank = WordBank::load(guesses.path(), targets.path()).unwrap();

    assert_eq!(bank.targets().len(), 2);
    let list = bank.guesses();
    for word in ["CRANE", "SLATE", "TRACE", "ROBOT"] {
        assert!(list.contains(word), "{word} should be accepted");
    }
}

#[test]
fn test_load_missing_target_file_falls_back_to_default() {
    let dir = TempDir::new().unwrap();
    let guesses = word_file("CRANE\nSLATE\n");

    let bank =
        WordBank::load(guesses.path(), dir.path().join("missing.txt")).unwrap();

    assert_eq!(bank.targets().len(), 1);
    assert_eq!(bank.targets()[0].as_str(), DEFAULT_TARGET);
    assert!(bank.guesses().contains(DEFAULT_TARGET));
    assert!(bank.guesses().contains("CRANE"));
}

#[test]
fn test_load_missing_guess_file_accepts_targets_only() {
    let dir = TempDir::new().unwrap();
    let targets = word_file("ROBOT\n");

    let bank =
        WordBank::load(dir.path().join("missing.txt"), targets.path()).unwrap();

    let list = bank.guesses();
    assert_eq!(list.len(), 1);
    assert!(list.contains("ROBOT"));
}

#[test]
fn test_load_with_nothing_readable_still_plays() {
    let dir = TempDir::new().unwrap();
    let bank = WordBank::load(dir.path().join("g.txt"), dir.path().join("t.txt"))
        .unwrap();
    assert_eq!(bank.word_length(), DEFAULT_TARGET.len());
}

#[test]
fn test_load_rejects_mixed_lengths() {
    let guesses = word_file("CRANE\nCAT\n");
    let targets = word_file("SLATE\n");

    let err = WordBank::load(guesses.path(), targets.path()).unwrap_err();
    assert!(matches!(err, GameError::InconsistentWordLength { .. }));
}

#[test]
fn test_load_missing_target_file_draws_target_from_longer_guesses() {
    let dir = TempDir::new().unwrap();
    let guesses = word_file("PLANET\nSTREAM\n");

    let bank =
        WordBank::load(guesses.path(), dir.path().join("missing.txt")).unwrap();

    assert_eq!(bank.word_length(), 6);
    assert_eq!(bank.targets().len(), 2);
    assert!(bank.targets().iter().all(|t| bank.guesses().contains(t.as_str())));
    assert!(!bank.guesses().contains(DEFAULT_TARGET));
}

#[test]
fn test_load_empty_target_file_draws_target_from_guesses() {
    let guesses = word_file("CAT\nDOG\n");
    let targets = word_file("\n\n");

    let bank = WordBank::load(guesses.path(), targets.path()).unwrap();

    assert_eq!(bank.word_length(), 3);
    assert_eq!(bank.targets().len(), 2);
}
