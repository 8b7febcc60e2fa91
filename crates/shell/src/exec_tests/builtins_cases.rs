// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Builtin semantics: cd, echo, alias, set, test/[ and [[.

use super::{capture, executor, run_async};

// ---------------------------------------------------------------------------
// cd / pwd
// ---------------------------------------------------------------------------

#[tokio::test]
async fn cd_changes_pwd() {
    let dir = tempfile::tempdir().unwrap();
    let canonical = dir.path().canonicalize().unwrap();
    let script = format!("cd {}; pwd", canonical.display());
    let (_, out) = capture(&script).await;
    assert_eq!(out.trim(), canonical.display().to_string());
}

#[tokio::test]
async fn cd_defaults_to_home() {
    let dir = tempfile::tempdir().unwrap();
    let canonical = dir.path().canonicalize().unwrap();
    let mut exec = executor().var("HOME", canonical.display().to_string());
    let (_, out) = exec.execute_source_captured("cd; pwd").await.unwrap();
    assert_eq!(out.trim(), canonical.display().to_string());
}

#[tokio::test]
async fn cd_dash_swaps_and_prints() {
    let a = tempfile::tempdir().unwrap();
    let b = tempfile::tempdir().unwrap();
    let (a_path, b_path) =
        (a.path().canonicalize().unwrap(), b.path().canonicalize().unwrap());
    let script = format!("cd {}; cd {}; cd -; pwd", a_path.display(), b_path.display());
    let (_, out) = capture(&script).await;
    let lines: Vec<_> = out.lines().collect();
    // `cd -` prints the directory it lands in
    assert_eq!(lines[0], a_path.display().to_string());
    assert_eq!(lines[1], a_path.display().to_string());
}

#[tokio::test]
async fn cd_updates_pwd_and_oldpwd_variables() {
    let dir = tempfile::tempdir().unwrap();
    let canonical = dir.path().canonicalize().unwrap();
    let script = format!("cd {}; echo $PWD", canonical.display());
    let (_, out) = capture(&script).await;
    assert_eq!(out.trim(), canonical.display().to_string());
}

#[tokio::test]
async fn cd_missing_directory_fails() {
    let (status, _) = capture("cd /definitely/not/here").await;
    assert_eq!(status, 1);
}

// ---------------------------------------------------------------------------
// echo
// ---------------------------------------------------------------------------

#[tokio::test]
async fn echo_n_suppresses_the_newline() {
    let (_, out) = capture("echo -n no-newline").await;
    assert_eq!(out, "no-newline");
}

#[tokio::test]
async fn echo_joins_arguments_with_single_spaces() {
    let (_, out) = capture("echo a   b\tc").await;
    assert_eq!(out, "a b c\n");
}

// ---------------------------------------------------------------------------
// alias / unalias
// ---------------------------------------------------------------------------

#[tokio::test]
async fn alias_expands_in_interactive_mode() {
    let mut exec = executor().interactive(true);
    exec.execute_source_captured("alias greet='echo hi from alias'").await.unwrap();
    let (_, out) = exec.execute_source_captured("greet there").await.unwrap();
    assert_eq!(out, "hi from alias there\n");
}

#[tokio::test]
async fn alias_does_not_expand_in_script_mode() {
    let mut exec = executor();
    exec.execute_source_captured("alias zzalias='echo nope'").await.unwrap();
    let (status, _) = exec.execute_source_captured("zzalias").await.unwrap();
    assert_eq!(status, 127);
}

#[tokio::test]
async fn alias_self_reference_does_not_loop() {
    let mut exec = executor().interactive(true);
    exec.execute_source_captured("alias echo='echo prefixed'").await.unwrap();
    let (_, out) = exec.execute_source_captured("echo hi").await.unwrap();
    assert_eq!(out, "prefixed hi\n");
}

#[tokio::test]
async fn alias_only_applies_at_command_position() {
    let mut exec = executor().interactive(true);
    exec.execute_source_captured("alias target='BOOM'").await.unwrap();
    let (_, out) = exec.execute_source_captured("echo target").await.unwrap();
    assert_eq!(out, "target\n");
}

#[tokio::test]
async fn alias_listing_is_sorted() {
    let (_, out) = capture("alias b=2; alias a=1; alias").await;
    assert_eq!(out, "alias a='1'\nalias b='2'\n");
}

#[tokio::test]
async fn unalias_removes() {
    let mut exec = executor().interactive(true);
    exec.execute_source_captured("alias gone='echo x'; unalias gone").await.unwrap();
    let (status, _) = exec.execute_source_captured("gone").await.unwrap();
    assert_eq!(status, 127);
}

#[tokio::test]
async fn alias_replacement_may_carry_operators() {
    let mut exec = executor().interactive(true);
    exec.execute_source_captured("alias both='echo one; echo two'").await.unwrap();
    let (_, out) = exec.execute_source_captured("both").await.unwrap();
    assert_eq!(out, "one\ntwo\n");
}

// ---------------------------------------------------------------------------
// test / [
// ---------------------------------------------------------------------------

#[yare::parameterized(
    num_gt_true = { "[ 5 -gt 3 ]", 0 },
    num_gt_false = { "[ 2 -gt 3 ]", 1 },
    num_eq = { "[ 4 -eq 4 ]", 0 },
    num_le = { "[ 3 -le 3 ]", 0 },
    str_eq = { "[ abc = abc ]", 0 },
    str_ne = { "[ abc != abc ]", 1 },
    empty_z = { "[ -z '' ]", 0 },
    nonempty_n = { "[ -n '' ]", 1 },
    bare_nonempty = { "[ hello ]", 0 },
    bare_empty = { "[ '' ]", 1 },
    negate = { "[ ! -z x ]", 0 },
    conjunction = { "[ 1 -eq 1 -a 2 -eq 2 ]", 0 },
    disjunction = { "[ 1 -eq 2 -o 2 -eq 2 ]", 0 },
    grouping = { "[ \\( 1 -eq 2 -o 2 -eq 2 \\) -a x = x ]", 0 },
)]
fn bracket_tests(script: &str, expected: i32) {
    run_async(async {
        let (status, _) = capture(script).await;
        assert_eq!(status, expected, "script: {script}");
    });
}

#[tokio::test]
async fn bracket_requires_closing_bracket() {
    let (status, _) = capture("[ x = x").await;
    assert_eq!(status, 2);
}

#[tokio::test]
async fn file_tests() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("plain"), "").unwrap();
    std::fs::create_dir(dir.path().join("sub")).unwrap();
    let mut exec = executor().cwd(dir.path());
    let (status, _) = exec.execute_source_captured("[ -f plain ]").await.unwrap();
    assert_eq!(status, 0);
    let (status, _) = exec.execute_source_captured("[ -d sub ]").await.unwrap();
    assert_eq!(status, 0);
    let (status, _) = exec.execute_source_captured("[ -e nope ]").await.unwrap();
    assert_eq!(status, 1);
    let (status, _) = exec.execute_source_captured("[ -f sub ]").await.unwrap();
    assert_eq!(status, 1);
}

// ---------------------------------------------------------------------------
// [[ … ]]
// ---------------------------------------------------------------------------

#[yare::parameterized(
    regex_match = { "[[ abc =~ ^a.c$ ]]", 0 },
    regex_no_match = { "[[ abc =~ ^z ]]", 1 },
    regex_search_is_unanchored = { "[[ xabcx =~ abc ]]", 0 },
    cond_and = { "[[ a = a && b = b ]]", 0 },
    cond_or = { "[[ a = b || b = b ]]", 0 },
    cond_not = { "[[ ! a = b ]]", 0 },
)]
fn cond_command(script: &str, expected: i32) {
    run_async(async {
        let (status, _) = capture(script).await;
        assert_eq!(status, expected, "script: {script}");
    });
}

#[tokio::test]
async fn cond_command_does_not_field_split() {
    let (status, _) = capture("x='a b'; [[ $x = 'a b' ]]").await;
    assert_eq!(status, 0);
}

#[tokio::test]
async fn cond_command_in_if() {
    let (_, out) = capture("x=abc; if [[ $x =~ ^ab ]]; then echo re; fi").await;
    assert_eq!(out, "re\n");
}

// ---------------------------------------------------------------------------
// set
// ---------------------------------------------------------------------------

#[tokio::test]
async fn set_lists_option_state() {
    let (_, out) = capture("set").await;
    assert!(out.contains("errexit\toff"), "out: {out}");
    assert!(out.contains("pipefail\toff"), "out: {out}");
}

#[tokio::test]
async fn set_o_toggles_by_name() {
    let (_, out) = capture("set -o pipefail; set").await;
    assert!(out.contains("pipefail\ton"), "out: {out}");
}

#[tokio::test]
async fn set_unknown_option_fails() {
    let (status, _) = capture("set -o nonsense").await;
    assert_eq!(status, 1);
}

#[tokio::test]
async fn set_dashdash_rewrites_positionals() {
    let (_, out) = capture("set -- a 'b c'; echo $#; printf '[%s]' \"$@\"").await;
    assert_eq!(out, "2\n[a][b c]");
}
