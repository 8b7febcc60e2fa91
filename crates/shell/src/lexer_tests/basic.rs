// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Basic tokenization: words, operators, separators, comments.

use crate::lexer::Lexer;
use crate::token::TokenKind;

lex_tests! {
    empty_input: "" => [],
    whitespace_only: "   \t  " => [],
    single_word: "echo" => [TokenKind::Word("echo".into())],
    two_words: "echo hello" => [
        TokenKind::Word("echo".into()),
        TokenKind::Word("hello".into()),
    ],
    tabs_separate: "a\tb" => [
        TokenKind::Word("a".into()),
        TokenKind::Word("b".into()),
    ],
    semicolon: "a;b" => [
        TokenKind::Word("a".into()),
        TokenKind::Semi,
        TokenKind::Word("b".into()),
    ],
    double_semicolon: "a ;; b" => [
        TokenKind::Word("a".into()),
        TokenKind::DblSemi,
        TokenKind::Word("b".into()),
    ],
    and_or_operators: "a && b || c" => [
        TokenKind::Word("a".into()),
        TokenKind::And,
        TokenKind::Word("b".into()),
        TokenKind::Or,
        TokenKind::Word("c".into()),
    ],
    pipe: "a | b" => [
        TokenKind::Word("a".into()),
        TokenKind::Pipe,
        TokenKind::Word("b".into()),
    ],
    ampersand: "a & b" => [
        TokenKind::Word("a".into()),
        TokenKind::Ampersand,
        TokenKind::Word("b".into()),
    ],
    parens: "(a)" => [
        TokenKind::LParen,
        TokenKind::Word("a".into()),
        TokenKind::RParen,
    ],
    braces: "{ a; }" => [
        TokenKind::LBrace,
        TokenKind::Word("a".into()),
        TokenKind::Semi,
        TokenKind::RBrace,
    ],
    glued_braces: "a{b}" => [
        TokenKind::Word("a".into()),
        TokenKind::LBrace,
        TokenKind::Word("b".into()),
        TokenKind::RBrace,
    ],
    newline_token: "a\nb" => [
        TokenKind::Word("a".into()),
        TokenKind::Newline,
        TokenKind::Word("b".into()),
    ],
    newlines_collapse: "a\n\n\nb" => [
        TokenKind::Word("a".into()),
        TokenKind::Newline,
        TokenKind::Word("b".into()),
    ],
    escaped_semicolon: "echo \\;" => [
        TokenKind::Word("echo".into()),
        TokenKind::Word(";".into()),
    ],
    escaped_space_joins: "a\\ b" => [TokenKind::Word("a b".into())],
    line_continuation: "echo a\\\nb" => [
        TokenKind::Word("echo".into()),
        TokenKind::Word("ab".into()),
    ],
    comment_to_eol: "echo hi # the rest" => [
        TokenKind::Word("echo".into()),
        TokenKind::Word("hi".into()),
    ],
    comment_whole_line: "# nothing here" => [],
    comment_stops_at_newline: "# note\necho" => [
        TokenKind::Newline,
        TokenKind::Word("echo".into()),
    ],
    hash_inside_word: "a#b" => [TokenKind::Word("a#b".into())],
    digit_word_is_not_fd: "echo 2 x" => [
        TokenKind::Word("echo".into()),
        TokenKind::Word("2".into()),
        TokenKind::Word("x".into()),
    ],
}

span_tests! {
    span_single_word: "echo" => [(0, 4)],
    span_two_words: "echo hello" => [(0, 4), (5, 10)],
    span_pipe: "a|b" => [(0, 1), (1, 2), (2, 3)],
    span_and: "a && b" => [(0, 1), (2, 4), (5, 6)],
}
