// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Variable reference lexing: $VAR, ${VAR}, modifiers, special parameters.

use crate::lexer::Lexer;
use crate::token::TokenKind;

fn var(name: &str) -> TokenKind {
    TokenKind::Variable { name: name.into(), modifier: None }
}

fn var_mod(name: &str, modifier: &str) -> TokenKind {
    TokenKind::Variable { name: name.into(), modifier: Some(modifier.into()) }
}

lex_tests! {
    simple_variable: "$x" => [var("x")],
    underscore_name: "$_foo" => [var("_foo")],
    name_stops_at_dash: "$x-y" => [var("x"), TokenKind::Word("-y".into())],
    braced: "${x}" => [var("x")],
    braced_glued: "${x}y" => [var("x"), TokenKind::Word("y".into())],
    status_param: "$?" => [var("?")],
    pid_param: "$$" => [var("$")],
    count_param: "$#" => [var("#")],
    arg0_param: "$0" => [var("0")],
    at_param: "$@" => [var("@")],
    star_param: "$*" => [var("*")],
    first_positional: "$1" => [var("1")],
    positional_then_digit: "$12" => [var("1"), TokenKind::Word("2".into())],
    braced_positional: "${10}" => [var("10")],
    default_modifier: "${x:-fallback}" => [var_mod("x", ":-fallback")],
    assign_modifier: "${x:=val}" => [var_mod("x", ":=val")],
    error_modifier: "${x:?message}" => [var_mod("x", ":?message")],
    alt_modifier: "${x:+alt}" => [var_mod("x", ":+alt")],
    unset_only_modifier: "${x-d}" => [var_mod("x", "-d")],
    modifier_with_braces: "${x:-${y}}" => [var_mod("x", ":-${y}")],
    two_variables: "$a$b" => [var("a"), var("b")],
    word_then_variable: "pre$x" => [TokenKind::Word("pre".into()), var("x")],
}

lex_error_tests! {
    bare_dollar: "$" => crate::lexer::LexerError::EmptyVariable { .. },
    dollar_space: "$ x" => crate::lexer::LexerError::EmptyVariable { .. },
    empty_braces: "${}" => crate::lexer::LexerError::EmptyVariable { .. },
    unterminated_braced: "${x" => crate::lexer::LexerError::UnterminatedVariable { .. },
    invalid_braced_name: "${-x}" => crate::lexer::LexerError::InvalidVariableName { .. },
}
