// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lists: `;`, newlines, `&&`/`||` chains, background flags, groups.

use crate::ast::{Command, LogicalOp};
use crate::parser::Parser;

use super::helpers;

parse_tests! {
    empty_input: "" => commands: 0,
    separators_only: " ; ; \n ; " => commands: 0,
    single_command: "echo" => commands: 1,
    two_commands: "a; b" => commands: 2,
    three_commands: "a; b; c" => commands: 3,
    newline_separated: "a\nb\nc" => commands: 3,
    trailing_semi: "a; b;" => commands: 2,
    and_chain_is_one_item: "a && b && c" => commands: 1,
    mixed_separators: "a; b\nc" => commands: 3,
}

#[test]
fn and_or_chain_structure() {
    let list = Parser::parse("a && b || c").unwrap();
    let and_or = &list.items[0];
    assert_eq!(and_or.rest.len(), 2);
    assert_eq!(and_or.rest[0].0, LogicalOp::And);
    assert_eq!(and_or.rest[1].0, LogicalOp::Or);
}

#[test]
fn newline_allowed_after_and() {
    let list = Parser::parse("a &&\nb").unwrap();
    assert_eq!(list.items[0].rest.len(), 1);
}

#[test]
fn background_flag() {
    let list = Parser::parse("a &").unwrap();
    assert!(list.items[0].first.background);

    let list = Parser::parse("a").unwrap();
    assert!(!list.items[0].first.background);
}

#[test]
fn background_terminates_the_chain() {
    let list = Parser::parse("a & b").unwrap();
    assert_eq!(list.items.len(), 2);
}

#[test]
fn subshell_body() {
    let list = Parser::parse("(a; b)").unwrap();
    match helpers::get_command(&list) {
        Command::Subshell(subshell) => assert_eq!(subshell.body.items.len(), 2),
        other => panic!("expected subshell, got {other:?}"),
    }
}

#[test]
fn brace_group_body() {
    let list = Parser::parse("{ a; b; }").unwrap();
    match helpers::get_command(&list) {
        Command::BraceGroup(group) => assert_eq!(group.body.items.len(), 2),
        other => panic!("expected brace group, got {other:?}"),
    }
}

#[test]
fn group_with_redirection() {
    let list = Parser::parse("{ a; } > out").unwrap();
    match helpers::get_command(&list) {
        Command::BraceGroup(group) => assert_eq!(group.redirections.len(), 1),
        other => panic!("expected brace group, got {other:?}"),
    }
}

#[test]
fn nested_groups() {
    let list = Parser::parse("{ (a); { b; }; }").unwrap();
    match helpers::get_command(&list) {
        Command::BraceGroup(group) => assert_eq!(group.body.items.len(), 2),
        other => panic!("expected brace group, got {other:?}"),
    }
}
