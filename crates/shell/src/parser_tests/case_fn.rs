// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Case statements, function definitions, and the `[[` conditional command.

use crate::ast::Command;
use crate::parse_error::ParseError;
use crate::parser::Parser;

use super::helpers;

fn get_case(input: &str) -> crate::ast::CaseCommand {
    let list = Parser::parse(input).unwrap();
    match helpers::get_command(&list) {
        Command::Case(case_cmd) => case_cmd.clone(),
        other => panic!("expected case, got {other:?}"),
    }
}

#[test]
fn case_with_three_clauses() {
    let case_cmd = get_case("case $x in foo) echo matched;; bar) echo bar;; *) echo default;; esac");
    assert_eq!(case_cmd.clauses.len(), 3);
    helpers::assert_literal(&case_cmd.clauses[0].patterns[0], "foo");
    helpers::assert_literal(&case_cmd.clauses[2].patterns[0], "*");
}

#[test]
fn case_pattern_alternation() {
    let case_cmd = get_case("case $x in a|b|c) echo hi;; esac");
    assert_eq!(case_cmd.clauses[0].patterns.len(), 3);
}

#[test]
fn case_optional_leading_paren() {
    let case_cmd = get_case("case $x in (a) echo hi;; esac");
    assert_eq!(case_cmd.clauses.len(), 1);
}

#[test]
fn case_empty_clause_body() {
    let case_cmd = get_case("case $x in a) ;; b) echo hi;; esac");
    assert!(case_cmd.clauses[0].body.items.is_empty());
    assert_eq!(case_cmd.clauses[1].body.items.len(), 1);
}

#[test]
fn case_last_clause_without_dblsemi() {
    // `esac` ends the last clause after a newline, no `;;` required
    let case_cmd = get_case("case $x in a) echo hi;; b) echo bye\nesac");
    assert_eq!(case_cmd.clauses.len(), 2);
}

#[test]
fn case_multiline() {
    let case_cmd = get_case("case $x in\n  a)\n    echo hi\n    ;;\n  *)\n    echo other\n    ;;\nesac");
    assert_eq!(case_cmd.clauses.len(), 2);
}

#[test]
fn function_parens_syntax() {
    let list = Parser::parse("greet() { echo hi; }").unwrap();
    match helpers::get_command(&list) {
        Command::FunctionDef(def) => {
            assert_eq!(def.name, "greet");
            assert!(matches!(*def.body, Command::BraceGroup(_)));
        }
        other => panic!("expected function def, got {other:?}"),
    }
}

#[test]
fn function_keyword_syntax() {
    let list = Parser::parse("function greet { echo hi; }").unwrap();
    match helpers::get_command(&list) {
        Command::FunctionDef(def) => assert_eq!(def.name, "greet"),
        other => panic!("expected function def, got {other:?}"),
    }
}

#[test]
fn function_keyword_with_parens() {
    let list = Parser::parse("function greet() { echo hi; }").unwrap();
    assert!(matches!(helpers::get_command(&list), Command::FunctionDef(_)));
}

#[test]
fn function_subshell_body() {
    let list = Parser::parse("isolated() (echo hi)").unwrap();
    match helpers::get_command(&list) {
        Command::FunctionDef(def) => assert!(matches!(*def.body, Command::Subshell(_))),
        other => panic!("expected function def, got {other:?}"),
    }
}

#[test]
fn function_body_on_next_line() {
    let list = Parser::parse("greet()\n{ echo hi; }").unwrap();
    assert!(matches!(helpers::get_command(&list), Command::FunctionDef(_)));
}

#[test]
fn call_with_parens_elsewhere_is_not_a_function() {
    // `greet ()` without a body errors; `greet` alone is a plain command
    let list = Parser::parse("greet").unwrap();
    assert!(matches!(helpers::get_command(&list), Command::Simple(_)));
}

#[test]
fn cond_command_collects_operators_as_words() {
    let list = Parser::parse("[[ -f x && $y = z ]]").unwrap();
    let cmd = helpers::get_simple_command(&list.items[0]);
    helpers::assert_literal(&cmd.name, "[[");
    assert_eq!(cmd.args.len(), 6);
    helpers::assert_literal(&cmd.args[0], "-f");
    helpers::assert_literal(&cmd.args[2], "&&");
    helpers::assert_literal(&cmd.args[4], "=");
}

#[test]
fn cond_command_regex_operator() {
    let list = Parser::parse("[[ $x =~ ^a.b$ ]]").unwrap();
    let cmd = helpers::get_simple_command(&list.items[0]);
    assert_eq!(cmd.args.len(), 3);
    helpers::assert_literal(&cmd.args[1], "=~");
}

#[test]
fn cond_command_negation() {
    let list = Parser::parse("[[ ! -d x ]]").unwrap();
    let cmd = helpers::get_simple_command(&list.items[0]);
    helpers::assert_literal(&cmd.args[0], "!");
}

parse_error_tests! {
    case_missing_esac: "case x in a) b;;" => ParseError::UnexpectedEof { .. },
    case_missing_in: "case x a) b;; esac" => ParseError::UnexpectedToken { .. },
    case_missing_paren: "case x in a b;; esac" => ParseError::UnexpectedToken { .. },
    function_body_required: "f() echo" => ParseError::UnexpectedToken { .. },
    cond_missing_close: "[[ -f x" => ParseError::UnexpectedEof { .. },
}
