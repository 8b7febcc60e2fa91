// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Quoting, field splitting, command substitution, arithmetic, tilde, glob.

use super::{capture, executor};

// ---------------------------------------------------------------------------
// Quoting faithfulness
// ---------------------------------------------------------------------------

#[tokio::test]
async fn single_quotes_suppress_expansion() {
    let (_, out) = capture("echo '$USER'").await;
    assert_eq!(out, "$USER\n");
}

#[tokio::test]
async fn double_quotes_expand_variables() {
    let (_, out) = capture("USER=root; echo \"$USER\"").await;
    assert_eq!(out, "root\n");
}

#[tokio::test]
async fn double_quotes_preserve_inner_whitespace() {
    let (_, out) = capture("x='a  b'; echo \"$x\"").await;
    assert_eq!(out, "a  b\n");
}

#[tokio::test]
async fn unquoted_expansion_field_splits() {
    let (_, out) = capture("x='a  b'; echo $x").await;
    assert_eq!(out, "a b\n");
}

#[tokio::test]
async fn empty_unquoted_expansion_vanishes() {
    let (_, out) = capture("x=; echo a $x b").await;
    assert_eq!(out, "a b\n");
}

#[tokio::test]
async fn quoted_empty_string_is_an_argument() {
    // printf sees the empty argument; an unquoted empty expansion is gone
    let (_, out) = capture("printf '[%s]' ''").await;
    assert_eq!(out, "[]");
}

// ---------------------------------------------------------------------------
// "$@" / "$*"
// ---------------------------------------------------------------------------

#[tokio::test]
async fn quoted_at_expands_one_field_per_positional() {
    let mut exec = executor().positionals(vec!["a b".into(), "c".into()]);
    let (_, out) = exec.execute_source_captured("printf '[%s]' \"$@\"").await.unwrap();
    assert_eq!(out, "[a b][c]");
}

#[tokio::test]
async fn quoted_at_with_no_positionals_expands_to_nothing() {
    let (_, out) = capture("printf '[%s]' x \"$@\"").await;
    assert_eq!(out, "[x]");
}

#[tokio::test]
async fn quoted_star_joins_into_one_field() {
    let mut exec = executor().positionals(vec!["a".into(), "b".into()]);
    let (_, out) = exec.execute_source_captured("printf '[%s]' \"$*\"").await.unwrap();
    assert_eq!(out, "[a b]");
}

#[tokio::test]
async fn unquoted_at_field_splits() {
    let mut exec = executor().positionals(vec!["a".into(), "b c".into()]);
    let (_, out) = exec.execute_source_captured("printf '[%s]' $@").await.unwrap();
    assert_eq!(out, "[a][b][c]");
}

// ---------------------------------------------------------------------------
// Command substitution
// ---------------------------------------------------------------------------

#[tokio::test]
async fn substitution_captures_stdout() {
    let (_, out) = capture("echo got:$(printf inner)").await;
    assert_eq!(out, "got:inner\n");
}

#[tokio::test]
async fn substitution_strips_trailing_newlines() {
    let (_, out) = capture("x=$(printf 'v\\n\\n'); echo \"[$x]\"").await;
    assert_eq!(out, "[v]\n");
}

#[tokio::test]
async fn backtick_substitution() {
    let (_, out) = capture("echo `printf back`").await;
    assert_eq!(out, "back\n");
}

#[tokio::test]
async fn nested_substitution() {
    let (_, out) = capture("echo $(echo $(echo deep))").await;
    assert_eq!(out, "deep\n");
}

#[tokio::test]
async fn substitution_runs_builtins() {
    let (_, out) = capture("x=inner; echo $(echo $x)").await;
    assert_eq!(out, "inner\n");
}

#[tokio::test]
async fn substitution_env_changes_do_not_escape() {
    let (_, out) = capture("x=old; y=$(x=new; echo $x); echo $x $y").await;
    assert_eq!(out, "old new\n");
}

#[tokio::test]
async fn substitution_in_double_quotes_keeps_spaces() {
    let (_, out) = capture("echo \"[$(printf 'a  b')]\"").await;
    assert_eq!(out, "[a  b]\n");
}

// ---------------------------------------------------------------------------
// Arithmetic expansion
// ---------------------------------------------------------------------------

#[tokio::test]
async fn arithmetic_with_variables() {
    let (_, out) = capture("a=5; b=3; c=$((a + b * 2)); echo $((c / 2))").await;
    assert_eq!(out, "5\n");
}

#[tokio::test]
async fn arithmetic_undefined_names_are_zero() {
    let (_, out) = capture("echo $((nosuch + 1))").await;
    assert_eq!(out, "1\n");
}

#[tokio::test]
async fn arithmetic_division_by_zero_fails_the_command() {
    let (status, out) = capture("echo $((1 / 0))").await;
    assert_eq!(status, 1);
    assert_eq!(out, "");
}

#[tokio::test]
async fn arithmetic_in_double_quotes() {
    let (_, out) = capture("echo \"=$((2 + 3))=\"").await;
    assert_eq!(out, "=5=\n");
}

// ---------------------------------------------------------------------------
// Tilde
// ---------------------------------------------------------------------------

#[tokio::test]
async fn tilde_expands_to_home() {
    let mut exec = executor().var("HOME", "/tmp/testhome");
    let (_, out) = exec.execute_source_captured("echo ~/sub").await.unwrap();
    assert_eq!(out, "/tmp/testhome/sub\n");
}

#[tokio::test]
async fn quoted_tilde_stays_literal() {
    let (_, out) = capture("echo '~'").await;
    assert_eq!(out, "~\n");
}

#[tokio::test]
async fn unknown_user_tilde_stays_literal() {
    let (_, out) = capture("echo ~no-such-user-zz/x").await;
    assert_eq!(out, "~no-such-user-zz/x\n");
}

// ---------------------------------------------------------------------------
// Pathname expansion
// ---------------------------------------------------------------------------

#[tokio::test]
async fn glob_expands_sorted() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["b.txt", "a.txt", "c.md"] {
        std::fs::write(dir.path().join(name), "").unwrap();
    }
    let mut exec = executor().cwd(dir.path());
    let (_, out) = exec.execute_source_captured("echo *.txt").await.unwrap();
    assert_eq!(out, "a.txt b.txt\n");
}

#[tokio::test]
async fn glob_without_match_stays_literal() {
    let dir = tempfile::tempdir().unwrap();
    let mut exec = executor().cwd(dir.path());
    let (_, out) = exec.execute_source_captured("echo *.nope").await.unwrap();
    assert_eq!(out, "*.nope\n");
}

#[tokio::test]
async fn quoted_glob_stays_literal() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a.txt"), "").unwrap();
    let mut exec = executor().cwd(dir.path());
    let (_, out) = exec.execute_source_captured("echo '*.txt'").await.unwrap();
    assert_eq!(out, "*.txt\n");
}

#[tokio::test]
async fn dotfiles_need_a_dot_pattern() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(".hidden"), "").unwrap();
    std::fs::write(dir.path().join("shown"), "").unwrap();
    let mut exec = executor().cwd(dir.path());
    let (_, out) = exec.execute_source_captured("echo *").await.unwrap();
    assert_eq!(out, "shown\n");
    let (_, out) = exec.execute_source_captured("echo .h*").await.unwrap();
    assert_eq!(out, ".hidden\n");
}

#[tokio::test]
async fn question_mark_matches_one_char() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["ab", "ac", "abc"] {
        std::fs::write(dir.path().join(name), "").unwrap();
    }
    let mut exec = executor().cwd(dir.path());
    let (_, out) = exec.execute_source_captured("echo a?").await.unwrap();
    assert_eq!(out, "ab ac\n");
}

#[tokio::test]
async fn glob_from_variable_expansion() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("m1"), "").unwrap();
    std::fs::write(dir.path().join("m2"), "").unwrap();
    let mut exec = executor().cwd(dir.path());
    let (_, out) = exec.execute_source_captured("p='m*'; echo $p").await.unwrap();
    assert_eq!(out, "m1 m2\n");
}

// ---------------------------------------------------------------------------
// Here-documents
// ---------------------------------------------------------------------------

#[tokio::test]
async fn heredoc_body_is_expanded() {
    let (_, out) = capture("USER=root; cat <<EOF\nhi $USER\nEOF").await;
    assert_eq!(out, "hi root\n");
}

#[tokio::test]
async fn quoted_heredoc_delimiter_suppresses_expansion() {
    let (_, out) = capture("USER=root; cat <<'EOF'\nhi $USER\nEOF").await;
    assert_eq!(out, "hi $USER\n");
}

#[tokio::test]
async fn heredoc_supports_substitution_and_arithmetic() {
    let (_, out) = capture("cat <<EOF\nsum=$((2+3)) sub=$(printf ok)\nEOF").await;
    assert_eq!(out, "sum=5 sub=ok\n");
}
