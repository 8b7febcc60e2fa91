// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for glob eligibility tracking and pathname expansion.

use super::*;

// ---------------------------------------------------------------------------
// GlobEligibility
// ---------------------------------------------------------------------------

#[test]
fn eligible_metacharacters_are_detected() {
    let mut tracker = GlobEligibility::new();
    tracker.push_eligible("*.txt");
    assert!(tracker.has_glob_pattern());
}

#[test]
fn ineligible_metacharacters_are_ignored() {
    let mut tracker = GlobEligibility::new();
    tracker.push_ineligible("*.txt");
    assert!(!tracker.has_glob_pattern());
}

#[test]
fn mixed_sources_track_per_byte() {
    let mut tracker = GlobEligibility::new();
    tracker.push_ineligible("quoted*");
    tracker.push_eligible("plain");
    assert!(!tracker.has_glob_pattern());
    tracker.push_eligible("?");
    assert!(tracker.has_glob_pattern());
    assert_eq!(tracker.text, "quoted*plain?");
}

#[test]
fn masked_push_honors_the_mask() {
    let mut tracker = GlobEligibility::new();
    tracker.push_masked("a*b?", &[true, false, true, true]);
    // The `*` byte is masked out; the `?` byte is live
    assert!(tracker.has_glob_pattern());

    let mut tracker = GlobEligibility::new();
    tracker.push_masked("a*", &[true, false]);
    assert!(!tracker.has_glob_pattern());
}

#[test]
fn escape_processing_marks_escaped_metachars_ineligible() {
    let (text, eligible) = process_glob_escapes("a\\*b");
    assert_eq!(text, "a*b");
    assert_eq!(eligible, vec![true, false, true]);
}

#[test]
fn escape_processing_handles_double_backslash() {
    let (text, eligible) = process_glob_escapes("\\\\*");
    assert_eq!(text, "\\*");
    assert_eq!(eligible, vec![false, true]);
}

#[test]
fn escape_before_ordinary_char_stays() {
    let (text, _) = process_glob_escapes("a\\nb");
    assert_eq!(text, "a\\nb");
}

// ---------------------------------------------------------------------------
// expand_glob_pattern
// ---------------------------------------------------------------------------

fn fixture() -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("create tempdir");
    for name in ["alpha.txt", "beta.txt", "gamma.md", ".hidden.txt"] {
        std::fs::write(dir.path().join(name), "").expect("create fixture file");
    }
    dir
}

#[test]
fn matches_are_sorted() {
    let dir = fixture();
    let config = GlobConfig::default();
    let matches = expand_glob_pattern("*.txt", dir.path(), &config);
    assert_eq!(matches, ["alpha.txt", "beta.txt"]);
}

#[test]
fn question_mark_and_class() {
    let dir = fixture();
    let config = GlobConfig::default();
    let matches = expand_glob_pattern("[ab]*.txt", dir.path(), &config);
    assert_eq!(matches, ["alpha.txt", "beta.txt"]);
}

#[test]
fn no_match_returns_the_pattern() {
    let dir = fixture();
    let config = GlobConfig::default();
    let matches = expand_glob_pattern("*.zip", dir.path(), &config);
    assert_eq!(matches, ["*.zip"]);
}

#[test]
fn nullglob_returns_nothing() {
    let dir = fixture();
    let config = GlobConfig { nullglob: true };
    let matches = expand_glob_pattern("*.zip", dir.path(), &config);
    assert!(matches.is_empty());
}

#[test]
fn hidden_files_need_a_dot_pattern() {
    let dir = fixture();
    let config = GlobConfig::default();

    let matches = expand_glob_pattern("*.txt", dir.path(), &config);
    assert!(!matches.iter().any(|m| m.starts_with('.')), "matches: {matches:?}");

    let matches = expand_glob_pattern(".*.txt", dir.path(), &config);
    assert_eq!(matches, [".hidden.txt"]);
}

#[test]
fn invalid_pattern_stays_literal() {
    let dir = fixture();
    let config = GlobConfig::default();
    let matches = expand_glob_pattern("[", dir.path(), &config);
    assert_eq!(matches, ["["]);
}

#[test]
fn absolute_patterns_return_absolute_paths() {
    let dir = fixture();
    let config = GlobConfig::default();
    let pattern = format!("{}/*.md", dir.path().display());
    let matches = expand_glob_pattern(&pattern, std::path::Path::new("/"), &config);
    assert_eq!(matches.len(), 1);
    assert!(matches[0].ends_with("gamma.md"), "matches: {matches:?}");
}
