// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Conditionals, loops, and case execution.

use super::{capture, run_async};

// ---------------------------------------------------------------------------
// if / elif / else
// ---------------------------------------------------------------------------

#[tokio::test]
async fn first_passing_branch_wins() {
    let script = "x=5; if [ $x -gt 10 ]; then echo big; elif [ $x -gt 3 ]; then echo medium; \
                  else echo small; fi";
    let (status, out) = capture(script).await;
    assert_eq!(status, 0);
    assert_eq!(out, "medium\n");
}

#[yare::parameterized(
    then_branch = { "if true; then echo t; else echo e; fi", "t\n" },
    else_branch = { "if false; then echo t; else echo e; fi", "e\n" },
    elif_branch = { "if false; then echo a; elif true; then echo b; else echo c; fi", "b\n" },
)]
fn branch_selection(script: &str, expected: &str) {
    run_async(async {
        let (_, out) = capture(script).await;
        assert_eq!(out, expected, "script: {script}");
    });
}

#[tokio::test]
async fn no_branch_taken_is_success() {
    let (status, out) = capture("if false; then echo t; fi").await;
    assert_eq!(status, 0);
    assert_eq!(out, "");
}

#[tokio::test]
async fn branch_status_propagates() {
    let (status, _) = capture("if true; then false; fi").await;
    assert_eq!(status, 1);
}

#[tokio::test]
async fn condition_may_be_a_pipeline() {
    let (_, out) = capture("if printf x | cat; then echo piped; fi").await;
    assert!(out.ends_with("piped\n"), "out: {out}");
}

// ---------------------------------------------------------------------------
// while / until
// ---------------------------------------------------------------------------

#[tokio::test]
async fn while_counts() {
    let (_, out) = capture("i=0; while [ $i -lt 3 ]; do echo $i; i=$((i+1)); done").await;
    assert_eq!(out, "0\n1\n2\n");
}

#[tokio::test]
async fn while_never_entered_is_success() {
    let (status, out) = capture("while false; do echo x; done").await;
    assert_eq!(status, 0);
    assert_eq!(out, "");
}

#[tokio::test]
async fn until_runs_while_condition_fails() {
    let (_, out) = capture("i=0; until [ $i -ge 2 ]; do echo $i; i=$((i+1)); done").await;
    assert_eq!(out, "0\n1\n");
}

// ---------------------------------------------------------------------------
// for
// ---------------------------------------------------------------------------

#[tokio::test]
async fn for_iterates_words() {
    let (_, out) = capture("for i in 1 2 3; do echo $i; done").await;
    assert_eq!(out, "1\n2\n3\n");
}

#[tokio::test]
async fn for_words_are_expanded_and_split() {
    let (_, out) = capture("list='a b'; for i in $list c; do echo $i; done").await;
    assert_eq!(out, "a\nb\nc\n");
}

#[tokio::test]
async fn for_over_empty_words_is_success() {
    let (status, out) = capture("for i in; do echo $i; done").await;
    assert_eq!(status, 0);
    assert_eq!(out, "");
}

#[tokio::test]
async fn for_variable_survives_the_loop() {
    let (_, out) = capture("for i in a b; do :; done; echo $i").await;
    assert_eq!(out, "b\n");
}

// ---------------------------------------------------------------------------
// case
// ---------------------------------------------------------------------------

#[tokio::test]
async fn case_literal_match() {
    let script = "x=foo; case $x in foo) echo matched;; bar) echo bar;; *) echo default;; esac";
    let (status, out) = capture(script).await;
    assert_eq!(status, 0);
    assert_eq!(out, "matched\n");
}

#[yare::parameterized(
    glob_pattern = { "case abc in a*) echo star;; *) echo no;; esac", "star\n" },
    question_mark = { "case ab in a?) echo q;; *) echo no;; esac", "q\n" },
    bracket_class = { "case b in [ab]) echo class;; *) echo no;; esac", "class\n" },
    alternation = { "case b in a|b) echo alt;; *) echo no;; esac", "alt\n" },
    default_clause = { "case zzz in a) echo a;; *) echo default;; esac", "default\n" },
    anchored_match = { "case abc in b*) echo no;; *) echo anchored;; esac", "anchored\n" },
)]
fn case_matching(script: &str, expected: &str) {
    run_async(async {
        let (_, out) = capture(script).await;
        assert_eq!(out, expected, "script: {script}");
    });
}

#[tokio::test]
async fn case_without_match_is_success() {
    let (status, out) = capture("case x in a) echo a;; b) echo b;; esac").await;
    assert_eq!(status, 0);
    assert_eq!(out, "");
}

#[tokio::test]
async fn case_subject_is_expanded() {
    let (_, out) = capture("x=hello; case $x in hel*) echo yes;; esac").await;
    assert_eq!(out, "yes\n");
}

#[tokio::test]
async fn first_matching_clause_only() {
    let (_, out) = capture("case ab in a*) echo first;; *b) echo second;; esac").await;
    assert_eq!(out, "first\n");
}
