// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Variable assignment, scoping, export, positionals, and modifiers.

use super::{capture, executor, run_async};

// ---------------------------------------------------------------------------
// Assignment
// ---------------------------------------------------------------------------

#[tokio::test]
async fn assignment_then_reference() {
    let (_, out) = capture("x=hello; echo $x").await;
    assert_eq!(out, "hello\n");
}

#[tokio::test]
async fn quoted_assignment_keeps_spaces() {
    let (_, out) = capture("x=hello; y=world; z=\"$x $y\"; unset x; echo $z").await;
    assert_eq!(out, "hello world\n");
}

#[tokio::test]
async fn assignments_persist_across_calls() {
    let mut exec = executor();
    exec.execute_source_captured("x=42").await.unwrap();
    let (_, out) = exec.execute_source_captured("echo $x").await.unwrap();
    assert_eq!(out, "42\n");
}

#[tokio::test]
async fn unset_variable_expands_empty() {
    let (status, out) = capture("echo \"[$never_set]\"").await;
    assert_eq!(status, 0);
    assert_eq!(out, "[]\n");
}

#[tokio::test]
async fn unset_removes_the_variable() {
    let (_, out) = capture("x=1; unset x; echo \"[$x]\"").await;
    assert_eq!(out, "[]\n");
}

// ---------------------------------------------------------------------------
// Export and child environments
// ---------------------------------------------------------------------------

#[tokio::test]
async fn exported_variables_reach_children() {
    let (_, out) = capture("export GREETING=hi; sh -c 'echo $GREETING'").await;
    assert_eq!(out, "hi\n");
}

#[tokio::test]
async fn unexported_variables_do_not_reach_children() {
    let (_, out) = capture("SECRET=x; sh -c \"echo [\\$SECRET]\"").await;
    assert_eq!(out, "[]\n");
}

#[tokio::test]
async fn command_scoped_assignment_reaches_only_that_child() {
    let (_, out) = capture("TMPVAR=inner sh -c 'echo $TMPVAR'; echo \"[$TMPVAR]\"").await;
    assert_eq!(out, "inner\n[]\n");
}

#[tokio::test]
async fn export_flag_survives_reassignment() {
    let (_, out) = capture("export V=1; V=2; sh -c 'echo $V'").await;
    assert_eq!(out, "2\n");
}

// ---------------------------------------------------------------------------
// Readonly
// ---------------------------------------------------------------------------

#[tokio::test]
async fn readonly_rejects_reassignment() {
    let (status, out) = capture("readonly R=1; R=2; echo $R").await;
    assert_eq!(status, 0);
    assert_eq!(out, "1\n");
}

#[tokio::test]
async fn readonly_rejects_unset() {
    let (_, out) = capture("readonly R=1; unset R; echo $R").await;
    assert_eq!(out, "1\n");
}

// ---------------------------------------------------------------------------
// Positional parameters
// ---------------------------------------------------------------------------

#[tokio::test]
async fn positionals_and_count() {
    let mut exec = executor().positionals(vec!["one".into(), "two".into()]);
    let (_, out) = exec.execute_source_captured("echo $# $1 $2").await.unwrap();
    assert_eq!(out, "2 one two\n");
}

#[tokio::test]
async fn positional_past_nine_needs_braces() {
    let args: Vec<String> = (1..=11).map(|n| format!("a{n}")).collect();
    let mut exec = executor().positionals(args);
    let (_, out) = exec.execute_source_captured("echo ${10} ${11}").await.unwrap();
    assert_eq!(out, "a10 a11\n");
}

#[tokio::test]
async fn set_rewrites_positionals() {
    let (_, out) = capture("set -- x y z; echo $# $2").await;
    assert_eq!(out, "3 y\n");
}

#[tokio::test]
async fn arg0_is_the_shell_name() {
    let mut exec = executor().arg0("myscript");
    let (_, out) = exec.execute_source_captured("echo $0").await.unwrap();
    assert_eq!(out, "myscript\n");
}

// ---------------------------------------------------------------------------
// Modifiers
// ---------------------------------------------------------------------------

#[yare::parameterized(
    default_on_unset = { "echo ${missing:-fallback}", "fallback\n" },
    default_on_empty = { "x=; echo ${x:-fallback}", "fallback\n" },
    default_unused = { "x=set; echo ${x:-fallback}", "set\n" },
    dash_keeps_empty = { "x=; echo \"[${x-fallback}]\"", "[]\n" },
    alt_on_set = { "x=1; echo ${x:+alt}", "alt\n" },
    alt_on_unset = { "echo \"[${missing:+alt}]\"", "[]\n" },
    default_expands_variables = { "d=deep; echo ${missing:-$d}", "deep\n" },
)]
fn modifiers(script: &str, expected: &str) {
    run_async(async {
        let (_, out) = capture(script).await;
        assert_eq!(out, expected, "script: {script}");
    });
}

#[tokio::test]
async fn assign_modifier_sets_the_variable() {
    let (_, out) = capture("echo ${x:=stored}; echo $x").await;
    assert_eq!(out, "stored\nstored\n");
}

#[tokio::test]
async fn error_modifier_fails_the_command() {
    let (status, out) = capture("echo ${missing:?not set here}").await;
    assert_eq!(status, 1);
    assert_eq!(out, "");
}

#[tokio::test]
async fn error_modifier_failure_is_local_to_the_command() {
    let (status, out) = capture("echo ${missing:?}; echo after").await;
    assert_eq!(status, 0);
    assert_eq!(out, "after\n");
}

// ---------------------------------------------------------------------------
// Special parameters
// ---------------------------------------------------------------------------

#[tokio::test]
async fn pid_parameter_is_numeric() {
    let (_, out) = capture("echo $$").await;
    assert!(out.trim().parse::<u32>().is_ok(), "not a pid: {out}");
}

#[tokio::test]
async fn ifs_controls_field_splitting() {
    let (_, out) = capture("IFS=:; x=a:b:c; for i in $x; do echo $i; done").await;
    assert_eq!(out, "a\nb\nc\n");
}
