// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Control-flow parsing: if/elif/else, while/until, for.

use crate::ast::Command;
use crate::parse_error::ParseError;
use crate::parser::Parser;

use super::helpers;

fn get_if(input: &str) -> crate::ast::IfCommand {
    let list = Parser::parse(input).unwrap();
    match helpers::get_command(&list) {
        Command::If(if_cmd) => if_cmd.clone(),
        other => panic!("expected if, got {other:?}"),
    }
}

#[test]
fn plain_if() {
    let if_cmd = get_if("if true; then echo yes; fi");
    assert_eq!(if_cmd.cond.items.len(), 1);
    assert_eq!(if_cmd.then_body.items.len(), 1);
    assert!(if_cmd.elifs.is_empty());
    assert!(if_cmd.else_body.is_none());
}

#[test]
fn if_else() {
    let if_cmd = get_if("if true; then a; else b; fi");
    assert!(if_cmd.else_body.is_some());
}

#[test]
fn if_elif_else() {
    let if_cmd = get_if("if a; then x; elif b; then y; elif c; then z; else w; fi");
    assert_eq!(if_cmd.elifs.len(), 2);
    assert!(if_cmd.else_body.is_some());
}

#[test]
fn multiline_if() {
    let if_cmd = get_if("if true\nthen\n  echo yes\nfi");
    assert_eq!(if_cmd.then_body.items.len(), 1);
}

#[test]
fn if_condition_may_be_a_pipeline() {
    let if_cmd = get_if("if a | b; then c; fi");
    assert!(matches!(if_cmd.cond.items[0].first.command, Command::Pipeline(_)));
}

#[test]
fn nested_if() {
    let if_cmd = get_if("if a; then if b; then c; fi; fi");
    assert!(matches!(if_cmd.then_body.items[0].first.command, Command::If(_)));
}

#[test]
fn while_loop() {
    let list = Parser::parse("while true; do echo; done").unwrap();
    match helpers::get_command(&list) {
        Command::Loop(loop_cmd) => {
            assert!(!loop_cmd.until);
            assert_eq!(loop_cmd.body.items.len(), 1);
        }
        other => panic!("expected loop, got {other:?}"),
    }
}

#[test]
fn until_loop() {
    let list = Parser::parse("until false; do echo; done").unwrap();
    match helpers::get_command(&list) {
        Command::Loop(loop_cmd) => assert!(loop_cmd.until),
        other => panic!("expected loop, got {other:?}"),
    }
}

#[test]
fn for_with_words() {
    let list = Parser::parse("for i in 1 2 3; do echo $i; done").unwrap();
    match helpers::get_command(&list) {
        Command::For(for_cmd) => {
            assert_eq!(for_cmd.name, "i");
            assert_eq!(for_cmd.words.as_ref().map(Vec::len), Some(3));
        }
        other => panic!("expected for, got {other:?}"),
    }
}

#[test]
fn for_without_in_iterates_positionals() {
    let list = Parser::parse("for arg; do echo $arg; done").unwrap();
    match helpers::get_command(&list) {
        Command::For(for_cmd) => assert!(for_cmd.words.is_none()),
        other => panic!("expected for, got {other:?}"),
    }
}

#[test]
fn for_with_empty_in_clause() {
    let list = Parser::parse("for i in; do echo; done").unwrap();
    match helpers::get_command(&list) {
        Command::For(for_cmd) => assert_eq!(for_cmd.words.as_ref().map(Vec::len), Some(0)),
        other => panic!("expected for, got {other:?}"),
    }
}

#[test]
fn for_newline_before_do() {
    let list = Parser::parse("for i in a b\ndo echo\ndone").unwrap();
    assert!(matches!(helpers::get_command(&list), Command::For(_)));
}

parse_error_tests! {
    missing_fi: "if a; then b;" => ParseError::UnexpectedEof { .. },
    missing_then: "if a; b; fi" => ParseError::UnexpectedToken { .. },
    missing_done: "while a; do b;" => ParseError::UnexpectedEof { .. },
    empty_if_condition: "if ; then a; fi" => ParseError::UnexpectedToken { .. },
    empty_then_body: "if a; then fi" => ParseError::UnexpectedToken { .. },
    stray_fi: "fi" => ParseError::UnexpectedToken { .. },
    stray_done: "done" => ParseError::UnexpectedToken { .. },
    for_missing_name: "for in a; do b; done" => ParseError::UnexpectedToken { .. },
}
