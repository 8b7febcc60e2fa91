// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! File redirections, here-documents, fd duplication, rollback on failure.

use super::executor;

async fn in_dir(dir: &std::path::Path, script: &str) -> (i32, String) {
    let mut exec = executor().cwd(dir);
    exec.execute_source_captured(script).await.unwrap()
}

fn read(dir: &std::path::Path, name: &str) -> String {
    std::fs::read_to_string(dir.join(name)).unwrap()
}

#[tokio::test]
async fn truncating_output() {
    let dir = tempfile::tempdir().unwrap();
    in_dir(dir.path(), "echo first > f; echo second > f").await;
    assert_eq!(read(dir.path(), "f"), "second\n");
}

#[tokio::test]
async fn appending_output() {
    let dir = tempfile::tempdir().unwrap();
    in_dir(dir.path(), "echo one > f; echo two >> f").await;
    assert_eq!(read(dir.path(), "f"), "one\ntwo\n");
}

#[tokio::test]
async fn input_redirection() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("in"), "from file\n").unwrap();
    let (_, out) = in_dir(dir.path(), "cat < in").await;
    assert_eq!(out, "from file\n");
}

#[tokio::test]
async fn external_output_to_file() {
    let dir = tempfile::tempdir().unwrap();
    in_dir(dir.path(), "printf ext > f").await;
    assert_eq!(read(dir.path(), "f"), "ext");
}

#[tokio::test]
async fn stderr_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let (_, out) = in_dir(dir.path(), "sh -c 'echo out; echo err >&2' 2> e").await;
    assert_eq!(out, "out\n");
    assert_eq!(read(dir.path(), "e"), "err\n");
}

#[tokio::test]
async fn dup_stderr_into_stdout_file() {
    let dir = tempfile::tempdir().unwrap();
    in_dir(dir.path(), "sh -c 'echo out; echo err >&2' > both 2>&1").await;
    let content = read(dir.path(), "both");
    assert!(content.contains("out"), "content: {content}");
    assert!(content.contains("err"), "content: {content}");
}

#[tokio::test]
async fn both_streams_shorthand() {
    let dir = tempfile::tempdir().unwrap();
    in_dir(dir.path(), "sh -c 'echo out; echo err >&2' &> both").await;
    let content = read(dir.path(), "both");
    assert!(content.contains("out") && content.contains("err"), "content: {content}");
}

#[tokio::test]
async fn close_stdout_discards_output() {
    let dir = tempfile::tempdir().unwrap();
    let (status, out) = in_dir(dir.path(), "echo gone >&-").await;
    assert_eq!(status, 0);
    assert_eq!(out, "");
}

#[tokio::test]
async fn builtin_output_honors_redirection() {
    let dir = tempfile::tempdir().unwrap();
    let (_, out) = in_dir(dir.path(), "pwd > where; echo visible").await;
    assert_eq!(out, "visible\n");
    assert!(!read(dir.path(), "where").is_empty());
}

#[tokio::test]
async fn group_output_redirects_as_one() {
    let dir = tempfile::tempdir().unwrap();
    in_dir(dir.path(), "{ echo a; echo b; } > f").await;
    assert_eq!(read(dir.path(), "f"), "a\nb\n");
}

#[tokio::test]
async fn subshell_output_redirects_as_one() {
    let dir = tempfile::tempdir().unwrap();
    in_dir(dir.path(), "(echo s1; echo s2) > f").await;
    assert_eq!(read(dir.path(), "f"), "s1\ns2\n");
}

#[tokio::test]
async fn later_redirection_of_the_same_fd_wins() {
    let dir = tempfile::tempdir().unwrap();
    in_dir(dir.path(), "echo x > a > b").await;
    assert_eq!(read(dir.path(), "b"), "x\n");
}

#[tokio::test]
async fn failed_open_aborts_the_command() {
    let dir = tempfile::tempdir().unwrap();
    let (status, out) = in_dir(dir.path(), "echo hi > missing/dir/f; echo next").await;
    assert_eq!(status, 0);
    assert_eq!(out, "next\n");
    assert!(!dir.path().join("f").exists());
}

#[tokio::test]
async fn failed_open_status_is_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    let (status, _) = in_dir(dir.path(), "echo hi > missing/dir/f").await;
    assert_eq!(status, 1);
}

#[tokio::test]
async fn heredoc_feeds_stdin() {
    let (_, out) = super::capture("cat <<EOF\nline one\nline two\nEOF").await;
    assert_eq!(out, "line one\nline two\n");
}

#[tokio::test]
async fn heredoc_dash_strips_tabs() {
    let (_, out) = super::capture("cat <<-EOF\n\tindented\n\tEOF").await;
    assert_eq!(out, "indented\n");
}

#[tokio::test]
async fn input_file_overrides_earlier_heredoc() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("f"), "file wins\n").unwrap();
    let (_, out) = in_dir(dir.path(), "cat <<EOF < f\nheredoc\nEOF").await;
    assert_eq!(out, "file wins\n");
}

#[tokio::test]
async fn assignment_only_command_still_opens_targets() {
    let dir = tempfile::tempdir().unwrap();
    in_dir(dir.path(), "x=1 > touched").await;
    assert!(dir.path().join("touched").exists());
}
