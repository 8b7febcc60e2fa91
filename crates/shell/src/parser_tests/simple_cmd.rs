// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Simple command parsing: names, arguments, assignments, redirections,
//! and adjacent-token word concatenation.

use crate::ast::{Command, QuoteStyle, Redirection, WordPart};
use crate::parser::Parser;

use super::helpers;

simple_cmd_tests! {
    echo_no_args: "echo" => ("echo", 0),
    echo_one_arg: "echo hello" => ("echo", 1),
    ls_two_args: "ls -la /tmp" => ("ls", 2),
    keyword_in_arg_position: "echo if then fi" => ("echo", 3),
    brace_word_arg: "echo {x}" => ("echo", 1),
    trailing_whitespace: "echo hi   " => ("echo", 1),
}

#[test]
fn assignment_prefix() {
    let list = Parser::parse("FOO=bar cmd").unwrap();
    let cmd = helpers::get_simple_command(&list.items[0]);
    assert_eq!(cmd.assignments.len(), 1);
    assert_eq!(cmd.assignments[0].name, "FOO");
    helpers::assert_literal(&cmd.assignments[0].value, "bar");
    helpers::assert_literal(&cmd.name, "cmd");
}

#[test]
fn assignment_only_command_has_empty_name() {
    let list = Parser::parse("FOO=bar BAZ=qux").unwrap();
    let cmd = helpers::get_simple_command(&list.items[0]);
    assert_eq!(cmd.assignments.len(), 2);
    assert!(cmd.name.is_empty());
}

#[test]
fn empty_assignment_value() {
    let list = Parser::parse("FOO=").unwrap();
    let cmd = helpers::get_simple_command(&list.items[0]);
    helpers::assert_literal(&cmd.assignments[0].value, "");
}

#[test]
fn assignment_with_quoted_value() {
    let list = Parser::parse("z=\"$x $y\"").unwrap();
    let cmd = helpers::get_simple_command(&list.items[0]);
    let parts = &cmd.assignments[0].value.parts;
    assert!(matches!(&parts[0], WordPart::Variable { name, quoted: true, .. } if name == "x"));
    assert!(
        matches!(&parts[1], WordPart::Literal { value, quoted: QuoteStyle::Double } if value == " ")
    );
    assert!(matches!(&parts[2], WordPart::Variable { name, quoted: true, .. } if name == "y"));
}

#[test]
fn invalid_assignment_name_is_a_word() {
    // `2x=1` is not an assignment; it is the command name
    let list = Parser::parse("2x=1").unwrap();
    let cmd = helpers::get_simple_command(&list.items[0]);
    assert!(cmd.assignments.is_empty());
    helpers::assert_literal(&cmd.name, "2x=1");
}

#[test]
fn assignment_after_command_is_an_argument() {
    let list = Parser::parse("env FOO=bar").unwrap();
    let cmd = helpers::get_simple_command(&list.items[0]);
    assert!(cmd.assignments.is_empty());
    assert_eq!(cmd.args.len(), 1);
    helpers::assert_literal(&cmd.args[0], "FOO=bar");
}

#[test]
fn adjacent_tokens_concatenate_into_one_word() {
    let list = Parser::parse("echo a'b'\"c\"$d").unwrap();
    let cmd = helpers::get_simple_command(&list.items[0]);
    assert_eq!(cmd.args.len(), 1);
    let parts = &cmd.args[0].parts;
    assert_eq!(parts.len(), 4);
    assert!(matches!(&parts[0], WordPart::Literal { value, quoted: QuoteStyle::Unquoted } if value == "a"));
    assert!(matches!(&parts[1], WordPart::Literal { value, quoted: QuoteStyle::Single } if value == "b"));
    assert!(matches!(&parts[2], WordPart::Literal { value, quoted: QuoteStyle::Double } if value == "c"));
    assert!(matches!(&parts[3], WordPart::Variable { name, quoted: false, .. } if name == "d"));
}

#[test]
fn separated_tokens_stay_separate_words() {
    let list = Parser::parse("echo a 'b'").unwrap();
    let cmd = helpers::get_simple_command(&list.items[0]);
    assert_eq!(cmd.args.len(), 2);
}

#[test]
fn redirections_attach_to_the_command() {
    let list = Parser::parse("cmd arg > out 2> err < in").unwrap();
    let cmd = helpers::get_simple_command(&list.items[0]);
    assert_eq!(cmd.args.len(), 1);
    assert_eq!(cmd.redirections.len(), 3);
    assert!(matches!(cmd.redirections[0], Redirection::Out { fd: None, append: false, .. }));
    assert!(matches!(cmd.redirections[1], Redirection::Out { fd: Some(2), .. }));
    assert!(matches!(cmd.redirections[2], Redirection::In { fd: None, .. }));
}

#[test]
fn redirection_before_arguments() {
    let list = Parser::parse("cmd > out arg").unwrap();
    let cmd = helpers::get_simple_command(&list.items[0]);
    assert_eq!(cmd.args.len(), 1);
    assert_eq!(cmd.redirections.len(), 1);
}

#[test]
fn redirection_only_command() {
    let list = Parser::parse("> out").unwrap();
    let cmd = helpers::get_simple_command(&list.items[0]);
    assert!(cmd.name.is_empty());
    assert_eq!(cmd.redirections.len(), 1);
}

#[test]
fn command_substitution_argument_is_preparsed() {
    let list = Parser::parse("echo $(ls -l)").unwrap();
    let cmd = helpers::get_simple_command(&list.items[0]);
    match &cmd.args[0].parts[0] {
        WordPart::CommandSubstitution { body: crate::ast::SubstitutionBody::Parsed(inner), .. } => {
            let inner_cmd = helpers::get_simple_command(&inner.items[0]);
            helpers::assert_literal(&inner_cmd.name, "ls");
        }
        other => panic!("expected parsed substitution, got {other:?}"),
    }
}

#[test]
fn arith_argument() {
    let list = Parser::parse("echo $((1+2))").unwrap();
    let cmd = helpers::get_simple_command(&list.items[0]);
    assert!(matches!(&cmd.args[0].parts[0], WordPart::Arith { expr, quoted: false } if expr == "1+2"));
}

#[test]
fn glued_brace_word_is_not_a_group() {
    let list = Parser::parse("{x}").unwrap();
    match helpers::get_command(&list) {
        Command::Simple(cmd) => helpers::assert_literal(&cmd.name, "{x}"),
        other => panic!("expected simple command, got {other:?}"),
    }
}
