// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Invocation modes and exit-code contract.

use crate::prelude::{run, zish};

#[test]
fn version_flag_long() {
    zish()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicates::str::contains("zish"));
}

#[test]
fn version_flag_short() {
    zish().arg("-v").assert().success().stdout(predicates::str::contains("zish"));
}

#[test]
fn dash_c_exits_with_the_command_status() {
    run("exit 7").code(7);
    run("true").code(0);
}

#[test]
fn syntax_errors_exit_2() {
    run("echo |").code(2);
    run("if true; then echo x;").code(2);
}

#[test]
fn command_not_found_exits_127() {
    run("no-such-command-zzz").code(127);
}

#[test]
fn signal_death_exits_128_plus_n() {
    run("sh -c 'kill -9 $$'").code(137);
}

#[test]
fn last_status_is_the_exit_code() {
    run("false").code(1);
    run("false; true").code(0);
}

#[test]
fn script_file_binds_argv() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("args.zish");
    std::fs::write(&script, "echo $0; echo $1 $2; echo $#\n").unwrap();

    zish()
        .arg(&script)
        .arg("one")
        .arg("two")
        .assert()
        .success()
        .stdout(format!("{}\none two\n2\n", script.display()));
}

#[test]
fn script_file_exit_status() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("fail.zish");
    std::fs::write(&script, "exit 3\n").unwrap();

    zish().arg(&script).assert().code(3);
}

#[test]
fn missing_script_reports_an_error() {
    zish().arg("/no/such/script.zish").assert().code(1);
}

#[test]
fn shlvl_increments() {
    zish()
        .arg("-c")
        .arg("echo $SHLVL")
        .env("SHLVL", "5")
        .assert()
        .success()
        .stdout("6\n");
}

#[test]
fn shlvl_starts_at_one_when_unset() {
    zish()
        .arg("-c")
        .arg("echo $SHLVL")
        .env_remove("SHLVL")
        .assert()
        .success()
        .stdout("1\n");
}

#[test]
fn diagnostics_go_to_stderr() {
    run("no-such-command-zzz")
        .code(127)
        .stdout("")
        .stderr(predicates::str::contains("command not found"));
}
