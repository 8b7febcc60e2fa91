// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Simple commands, exit statuses, `$?`, short-circuit chains, groups.

use super::{capture, executor, run_async};

// ---------------------------------------------------------------------------
// Simple commands
// ---------------------------------------------------------------------------

#[tokio::test]
async fn echo_builtin_writes_stdout() {
    let (status, out) = capture("echo hello").await;
    assert_eq!(status, 0);
    assert_eq!(out, "hello\n");
}

#[tokio::test]
async fn external_command_output_is_captured() {
    let (status, out) = capture("printf hi").await;
    assert_eq!(status, 0);
    assert_eq!(out, "hi");
}

#[tokio::test]
async fn external_exit_status() {
    let (status, _) = capture("sh -c 'exit 7'").await;
    assert_eq!(status, 7);
}

#[yare::parameterized(
    true_builtin = { "true", 0 },
    false_builtin = { "false", 1 },
    colon = { ":", 0 },
)]
fn builtin_statuses(script: &str, expected: i32) {
    run_async(async {
        let (status, _) = capture(script).await;
        assert_eq!(status, expected, "script: {script}");
    });
}

// ---------------------------------------------------------------------------
// $? law
// ---------------------------------------------------------------------------

#[tokio::test]
async fn status_parameter_tracks_last_command() {
    let (_, out) = capture("false; echo $?; true; echo $?").await;
    assert_eq!(out, "1\n0\n");
}

#[tokio::test]
async fn status_persists_across_calls() {
    let mut exec = executor();
    let (status, _) = exec.execute_source_captured("false").await.unwrap();
    assert_eq!(status, 1);
    let (_, out) = exec.execute_source_captured("echo $?").await.unwrap();
    assert_eq!(out, "1\n");
}

// ---------------------------------------------------------------------------
// Short-circuit laws
// ---------------------------------------------------------------------------

#[yare::parameterized(
    and_runs = { "true && echo X", "X\n", 0 },
    and_skips = { "false && echo X", "", 1 },
    or_runs = { "false || echo X", "X\n", 0 },
    or_skips = { "true || echo X", "", 0 },
    chain = { "false && echo nope || echo yep", "yep\n", 0 },
)]
fn short_circuit(script: &str, expected_out: &str, expected_status: i32) {
    run_async(async {
        let (status, out) = capture(script).await;
        assert_eq!(out, expected_out, "script: {script}");
        assert_eq!(status, expected_status, "script: {script}");
    });
}

// ---------------------------------------------------------------------------
// Negation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn bang_inverts_status() {
    let (status, _) = capture("! true").await;
    assert_eq!(status, 1);
    let (status, _) = capture("! false").await;
    assert_eq!(status, 0);
}

// ---------------------------------------------------------------------------
// Sequences and groups
// ---------------------------------------------------------------------------

#[tokio::test]
async fn sequence_runs_in_order() {
    let (_, out) = capture("echo a; echo b; echo c").await;
    assert_eq!(out, "a\nb\nc\n");
}

#[tokio::test]
async fn sequence_status_is_the_last_command() {
    let (status, _) = capture("false; true").await;
    assert_eq!(status, 0);
    let (status, _) = capture("true; false").await;
    assert_eq!(status, 1);
}

#[tokio::test]
async fn subshell_isolates_variables() {
    let (_, out) = capture("x=1; (x=2; echo $x); echo $x").await;
    assert_eq!(out, "2\n1\n");
}

#[tokio::test]
async fn brace_group_shares_the_environment() {
    let (_, out) = capture("x=1; { x=2; }; echo $x").await;
    assert_eq!(out, "2\n");
}

#[tokio::test]
async fn subshell_isolates_cwd() {
    let (_, out) = capture("(cd /; pwd); pwd").await;
    let mut lines = out.lines();
    assert_eq!(lines.next(), Some("/"));
    assert_ne!(lines.next(), Some("/"));
}

#[tokio::test]
async fn exit_in_subshell_does_not_kill_the_shell() {
    let (_, out) = capture("(exit 3); echo $?").await;
    assert_eq!(out, "3\n");
}

#[tokio::test]
async fn exit_carries_its_code() {
    let (status, out) = capture("echo before; exit 5; echo after").await;
    assert_eq!(status, 5);
    assert_eq!(out, "before\n");
}

// ---------------------------------------------------------------------------
// errexit hook
// ---------------------------------------------------------------------------

#[tokio::test]
async fn errexit_stops_the_list() {
    let (status, out) = capture("set -e; echo a; false; echo b").await;
    assert_eq!(status, 1);
    assert_eq!(out, "a\n");
}

#[tokio::test]
async fn errexit_ignores_condition_failures() {
    let (status, out) = capture("set -e; if false; then echo t; else echo f; fi; echo done").await;
    assert_eq!(status, 0);
    assert_eq!(out, "f\ndone\n");
}
