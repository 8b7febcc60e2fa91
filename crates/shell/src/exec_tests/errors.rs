// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error settlement: resolution failures, signal deaths, unsupported features.

use std::os::unix::fs::PermissionsExt;

use super::{capture, executor};
use crate::ExecError;

#[tokio::test]
async fn command_not_found_is_127() {
    let (status, _) = capture("definitely-not-a-command-zz").await;
    assert_eq!(status, 127);
}

#[tokio::test]
async fn the_shell_survives_resolution_failures() {
    let (_, out) = capture("definitely-not-a-command-zz; echo still here").await;
    assert_eq!(out, "still here\n");
}

#[tokio::test]
async fn permission_denied_is_126() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("noexec");
    std::fs::write(&path, "#!/bin/sh\necho hi\n").unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

    let script = format!("{}", path.display());
    let (status, _) = capture(&script).await;
    assert_eq!(status, 126);
}

#[tokio::test]
async fn empty_expanded_name_is_not_found() {
    let (status, _) = capture("x=; $x").await;
    // An empty command word resolves to nothing
    assert_eq!(status, 127);
}

#[tokio::test]
async fn signal_death_reports_128_plus_n() {
    let (status, _) = capture("sh -c 'kill -9 $$'").await;
    assert_eq!(status, 137);
}

#[tokio::test]
async fn background_execution_is_unsupported() {
    let (status, out) = capture("echo hi &").await;
    assert_eq!(status, 1);
    assert_eq!(out, "");
}

#[tokio::test]
async fn parse_errors_surface_as_parse() {
    let mut exec = executor();
    let err = exec.execute_source("echo |").await.unwrap_err();
    assert!(matches!(err, ExecError::Parse(_)), "got {err:?}");
    assert_eq!(err.status(), 2);
}

#[tokio::test]
async fn runtime_substitution_parse_error_fails_the_command() {
    // Here-doc bodies parse their substitutions at expansion time
    let (status, out) = capture("cat <<EOF\n$(|)\nEOF\necho after").await;
    assert_eq!(status, 0);
    assert_eq!(out, "after\n");
}

#[tokio::test]
async fn empty_substitution_output_is_an_empty_line_for_echo() {
    let (_, out) = capture("echo $(true); echo after").await;
    assert_eq!(out, "\nafter\n");
}

#[tokio::test]
async fn arithmetic_syntax_error_fails_the_command() {
    let (status, out) = capture("echo $((1 +)); echo ok").await;
    assert_eq!(status, 0);
    assert_eq!(out, "ok\n");
}

#[tokio::test]
async fn input_redirection_on_group_is_unsupported() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("f"), "x\n").unwrap();
    let mut exec = executor().cwd(dir.path());
    let (status, _) = exec.execute_source_captured("{ cat; } < f").await.unwrap();
    assert_eq!(status, 1);
}

#[tokio::test]
async fn unset_positional_expands_empty() {
    let (_, out) = capture("echo \"[$7]\"").await;
    assert_eq!(out, "[]\n");
}
