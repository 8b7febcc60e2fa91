// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Quote handling: single quotes, double quotes, escapes.

use crate::ast::WordPart;
use crate::lexer::Lexer;
use crate::token::TokenKind;

lex_tests! {
    single_quoted: "'hello'" => [TokenKind::SingleQuoted("hello".into())],
    single_quoted_preserves_dollar: "'$USER'" => [TokenKind::SingleQuoted("$USER".into())],
    single_quoted_preserves_backslash: "'a\\nb'" => [TokenKind::SingleQuoted("a\\nb".into())],
    single_quote_spaces: "'a b  c'" => [TokenKind::SingleQuoted("a b  c".into())],
    empty_single_quotes: "''" => [TokenKind::SingleQuoted("".into())],
    adjacent_quote_word: "'a'b" => [
        TokenKind::SingleQuoted("a".into()),
        TokenKind::Word("b".into()),
    ],
    quote_escape_idiom: "'it'\\''s'" => [
        TokenKind::SingleQuoted("it".into()),
        TokenKind::Word("'".into()),
        TokenKind::SingleQuoted("s".into()),
    ],
}

#[test]
fn empty_double_quotes_keep_one_empty_part() {
    let tokens = Lexer::tokenize("\"\"").unwrap();
    assert_eq!(tokens.len(), 1);
    match &tokens[0].kind {
        TokenKind::DoubleQuoted(parts) => {
            assert_eq!(parts.as_slice(), &[WordPart::double_quoted("")]);
        }
        other => panic!("expected DoubleQuoted, got {other:?}"),
    }
}

#[test]
fn double_quoted_literal() {
    let tokens = Lexer::tokenize("\"hello world\"").unwrap();
    match &tokens[0].kind {
        TokenKind::DoubleQuoted(parts) => {
            assert_eq!(parts.as_slice(), &[WordPart::double_quoted("hello world")]);
        }
        other => panic!("expected DoubleQuoted, got {other:?}"),
    }
}

#[test]
fn double_quoted_variable_is_flagged_quoted() {
    let tokens = Lexer::tokenize("\"x$y\"").unwrap();
    match &tokens[0].kind {
        TokenKind::DoubleQuoted(parts) => {
            assert_eq!(
                parts.as_slice(),
                &[
                    WordPart::double_quoted("x"),
                    WordPart::Variable { name: "y".into(), modifier: None, quoted: true },
                ]
            );
        }
        other => panic!("expected DoubleQuoted, got {other:?}"),
    }
}

#[test]
fn double_quoted_bare_at_has_no_boundary_literals() {
    // `"$@"` must expand to exactly the positionals, so the quoted part
    // stands alone.
    let tokens = Lexer::tokenize("\"$@\"").unwrap();
    match &tokens[0].kind {
        TokenKind::DoubleQuoted(parts) => {
            assert_eq!(
                parts.as_slice(),
                &[WordPart::Variable { name: "@".into(), modifier: None, quoted: true }]
            );
        }
        other => panic!("expected DoubleQuoted, got {other:?}"),
    }
}

#[test]
fn double_quote_escapes() {
    let tokens = Lexer::tokenize(r#""a\"b\$c\\d""#).unwrap();
    match &tokens[0].kind {
        TokenKind::DoubleQuoted(parts) => {
            assert_eq!(parts.as_slice(), &[WordPart::double_quoted("a\"b$c\\d")]);
        }
        other => panic!("expected DoubleQuoted, got {other:?}"),
    }
}

#[test]
fn double_quote_backslash_before_ordinary_char_is_literal() {
    let tokens = Lexer::tokenize(r#""a\nb""#).unwrap();
    match &tokens[0].kind {
        TokenKind::DoubleQuoted(parts) => {
            assert_eq!(parts.as_slice(), &[WordPart::double_quoted("a\\nb")]);
        }
        other => panic!("expected DoubleQuoted, got {other:?}"),
    }
}

#[test]
fn newline_inside_double_quotes_is_literal() {
    let tokens = Lexer::tokenize("\"a\nb\"").unwrap();
    assert_eq!(tokens.len(), 1);
    match &tokens[0].kind {
        TokenKind::DoubleQuoted(parts) => {
            assert_eq!(parts.as_slice(), &[WordPart::double_quoted("a\nb")]);
        }
        other => panic!("expected DoubleQuoted, got {other:?}"),
    }
}
