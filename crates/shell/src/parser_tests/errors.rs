// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Parser error cases and diagnostics.

use crate::parse_error::ParseError;
use crate::parser::Parser;

parse_error_tests! {
    pipe_at_start: "| cmd" => ParseError::UnexpectedToken { .. },
    and_at_start: "&& cmd" => ParseError::UnexpectedToken { .. },
    and_at_end: "cmd &&" => ParseError::UnexpectedEof { .. },
    pipe_at_end: "cmd |" => ParseError::UnexpectedEof { .. },
    double_pipe_operands: "a | | b" => ParseError::UnexpectedToken { .. },
    lone_rparen: ") x" => ParseError::UnexpectedToken { .. },
    lone_rbrace: "}" => ParseError::UnexpectedToken { .. },
    unclosed_subshell: "(a; b" => ParseError::UnexpectedEof { .. },
    unclosed_group: "{ a; b" => ParseError::UnexpectedEof { .. },
    empty_subshell: "()" => ParseError::UnexpectedToken { .. },
    bang_without_command: "!" => ParseError::UnexpectedEof { .. },
    redirect_without_target: "cmd >" => ParseError::UnexpectedEof { .. },
    lexer_error_is_wrapped: "echo 'abc" => ParseError::Lexer(_),
    substitution_error_is_nested: "echo $(|)" => ParseError::InSubstitution { .. },
}

#[test]
fn unexpected_token_reports_what_was_expected() {
    let err = Parser::parse("if a; b; fi").unwrap_err();
    match err {
        ParseError::UnexpectedToken { expected, .. } => {
            assert_eq!(expected, "command");
        }
        other => panic!("expected UnexpectedToken, got {other:?}"),
    }
}

#[test]
fn incomplete_classification() {
    assert!(Parser::parse("cmd &&").unwrap_err().is_incomplete());
    assert!(Parser::parse("{ a; b").unwrap_err().is_incomplete());
    assert!(Parser::parse("echo 'abc").unwrap_err().is_incomplete());
    assert!(!Parser::parse("| cmd").unwrap_err().is_incomplete());
}

#[test]
fn diagnostic_renders_a_caret() {
    let input = "echo | | bad";
    let err = Parser::parse(input).unwrap_err();
    let diagnostic = err.diagnostic(input).unwrap();
    assert!(diagnostic.contains('^'), "diagnostic: {diagnostic}");
}
