// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Language end-to-end scenarios.

use crate::prelude::{run, zish};

#[test]
fn variable_assignment_quoting_and_unset() {
    run("x=hello; y=world; z=\"$x $y\"; unset x; echo $z")
        .success()
        .stdout("hello world\n");
}

#[test]
fn arithmetic_with_precedence_and_division() {
    run("a=5; b=3; c=$((a + b * 2)); echo $((c / 2))").success().stdout("5\n");
}

#[test]
fn if_elif_else_selects_the_middle_branch() {
    run("x=5; if [ $x -gt 10 ]; then echo big; elif [ $x -gt 3 ]; then echo medium; \
         else echo small; fi")
        .success()
        .stdout("medium\n");
}

#[test]
fn case_matches_the_first_clause() {
    run("x=foo; case $x in foo) echo matched;; bar) echo bar;; *) echo default;; esac")
        .success()
        .stdout("matched\n");
}

#[test]
fn functions_bind_arguments() {
    run("double() { echo $(($1 * 2)); }; for i in 1 2 3; do double $i; done")
        .success()
        .stdout("2\n4\n6\n");
}

#[test]
fn short_circuit_chain() {
    run("false && echo nope || echo yep").success().stdout("yep\n");
}

#[test]
fn single_quotes_suppress_expansion() {
    run("echo '$USER'").success().stdout("$USER\n");
}

#[test]
fn double_quotes_expand() {
    zish()
        .arg("-c")
        .arg("echo \"$USER\"")
        .env("USER", "root")
        .assert()
        .success()
        .stdout("root\n");
}

#[test]
fn heredoc_expands_its_body() {
    zish()
        .arg("-c")
        .arg("cat <<EOF\nhi $USER\nEOF")
        .env("USER", "root")
        .assert()
        .success()
        .stdout("hi root\n");
}

#[test]
fn pipeline_composition() {
    run("printf 'c\\nb\\na\\n' | sort | head -n 2").success().stdout("a\nb\n");
}

#[test]
fn status_parameter_after_a_pipeline() {
    run("true | false; echo $?").success().stdout("1\n");
}
