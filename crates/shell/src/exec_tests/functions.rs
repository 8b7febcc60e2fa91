// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Function definition, calls, argument binding, and local scoping.

use super::capture;

#[tokio::test]
async fn define_and_call() {
    let (_, out) = capture("greet() { echo hi; }; greet").await;
    assert_eq!(out, "hi\n");
}

#[tokio::test]
async fn arguments_bind_to_positionals() {
    let (_, out) = capture("double() { echo $(($1 * 2)); }; for i in 1 2 3; do double $i; done").await;
    assert_eq!(out, "2\n4\n6\n");
}

#[tokio::test]
async fn caller_positionals_are_restored() {
    let (_, out) = capture("f() { echo $1; }; set -- outer; f inner; echo $1").await;
    assert_eq!(out, "inner\nouter\n");
}

#[tokio::test]
async fn local_variables_do_not_leak() {
    let (_, out) = capture("f() { local x=1; }; x=0; f; echo $x").await;
    assert_eq!(out, "0\n");
}

#[tokio::test]
async fn local_shadows_the_global() {
    let (_, out) = capture("f() { local x=inner; echo $x; }; x=outer; f; echo $x").await;
    assert_eq!(out, "inner\nouter\n");
}

#[tokio::test]
async fn unlocal_writes_hit_the_global() {
    let (_, out) = capture("f() { x=changed; }; x=orig; f; echo $x").await;
    assert_eq!(out, "changed\n");
}

#[tokio::test]
async fn local_outside_function_fails() {
    let (status, _) = capture("local x=1").await;
    assert_eq!(status, 1);
}

#[tokio::test]
async fn function_status_propagates() {
    let (status, _) = capture("fails() { false; }; fails").await;
    assert_eq!(status, 1);
}

#[tokio::test]
async fn frame_pops_even_when_the_body_fails() {
    let (_, out) = capture("f() { local x=in; false; }; x=out; f; echo $x").await;
    assert_eq!(out, "out\n");
}

#[tokio::test]
async fn keyword_definition_syntax() {
    let (_, out) = capture("function greet { echo yo; }; greet").await;
    assert_eq!(out, "yo\n");
}

#[tokio::test]
async fn redefinition_replaces_the_body() {
    let (_, out) = capture("f() { echo one; }; f() { echo two; }; f").await;
    assert_eq!(out, "two\n");
}

#[tokio::test]
async fn function_wins_over_external() {
    let (_, out) = capture("cat() { echo shadowed; }; cat").await;
    assert_eq!(out, "shadowed\n");
}

#[tokio::test]
async fn unset_f_removes_the_function() {
    let (status, _) = capture("f() { echo hi; }; unset -f f; f").await;
    assert_eq!(status, 127);
}

#[tokio::test]
async fn nested_calls_restore_positionals() {
    let script = "inner() { echo i:$1; }; outer() { inner nested; echo o:$1; }; outer top";
    let (_, out) = capture(script).await;
    assert_eq!(out, "i:nested\no:top\n");
}

#[tokio::test]
async fn definition_returns_success() {
    let (status, _) = capture("false; f() { :; }").await;
    assert_eq!(status, 0);
}

#[tokio::test]
async fn recursive_function_with_termination() {
    let script = "count() { echo $1; if [ $1 -gt 1 ]; then count $(($1 - 1)); fi; }; count 3";
    let (_, out) = capture(script).await;
    assert_eq!(out, "3\n2\n1\n");
}

#[tokio::test]
async fn function_call_with_redirection() {
    let dir = tempfile::tempdir().unwrap();
    let mut exec = super::executor().cwd(dir.path());
    exec.execute_source_captured("f() { echo routed; }; f > out.txt").await.unwrap();
    let content = std::fs::read_to_string(dir.path().join("out.txt")).unwrap();
    assert_eq!(content, "routed\n");
}
