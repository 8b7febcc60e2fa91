// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pipeline parsing: stages, negation, depth limit.

use crate::ast::Command;
use crate::parse_error::{ParseError, MAX_PIPELINE_STAGES};
use crate::parser::Parser;

use super::helpers;

pipeline_tests! {
    two_stage: "a | b" => stages: 2,
    three_stage: "a | b | c" => stages: 3,
    tight_pipes: "a|b|c" => stages: 3,
    negated_single: "! a" => stages: 1,
    compound_stage: "a | { b; }" => stages: 2,
    subshell_stage: "(a) | b" => stages: 2,
}

#[test]
fn bare_command_is_not_wrapped_in_a_pipeline() {
    let list = Parser::parse("echo hi").unwrap();
    assert!(matches!(helpers::get_command(&list), Command::Simple(_)));
}

#[test]
fn negation_flag_is_set() {
    let list = Parser::parse("! true").unwrap();
    let pipeline = helpers::get_pipeline(&list.items[0]);
    assert!(pipeline.negated);

    let list = Parser::parse("a | b").unwrap();
    let pipeline = helpers::get_pipeline(&list.items[0]);
    assert!(!pipeline.negated);
}

#[test]
fn negated_multi_stage() {
    let list = Parser::parse("! a | b").unwrap();
    let pipeline = helpers::get_pipeline(&list.items[0]);
    assert!(pipeline.negated);
    assert_eq!(pipeline.stages.len(), 2);
}

#[test]
fn newline_allowed_after_pipe() {
    let list = Parser::parse("a |\nb").unwrap();
    let pipeline = helpers::get_pipeline(&list.items[0]);
    assert_eq!(pipeline.stages.len(), 2);
}

#[test]
fn pipe_binds_tighter_than_and() {
    let list = Parser::parse("a | b && c").unwrap();
    let and_or = &list.items[0];
    assert_eq!(and_or.rest.len(), 1);
    assert!(matches!(and_or.first.command, Command::Pipeline(_)));
    assert!(matches!(and_or.rest[0].1.command, Command::Simple(_)));
}

#[test]
fn depth_limit_is_enforced() {
    let input = vec!["a"; MAX_PIPELINE_STAGES + 1].join(" | ");
    let result = Parser::parse(&input);
    assert!(matches!(result, Err(ParseError::PipelineTooDeep { .. })), "got {result:?}");
}

#[test]
fn depth_under_limit_parses() {
    let input = vec!["a"; MAX_PIPELINE_STAGES].join(" | ");
    let list = Parser::parse(&input).unwrap();
    let pipeline = helpers::get_pipeline(&list.items[0]);
    assert_eq!(pipeline.stages.len(), MAX_PIPELINE_STAGES);
}
