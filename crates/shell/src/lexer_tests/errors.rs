// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lexer error reporting.

use crate::lexer::{Lexer, LexerError};

lex_error_tests! {
    unterminated_single: "'abc" => LexerError::UnterminatedSingleQuote { .. },
    unterminated_double: "\"abc" => LexerError::UnterminatedDoubleQuote { .. },
    lone_single_quote: "'" => LexerError::UnterminatedSingleQuote { .. },
    trailing_backslash_in_quotes: "\"abc\\" => LexerError::TrailingBackslash { .. },
}

#[test]
fn error_spans_point_at_the_construct() {
    let err = Lexer::tokenize("echo 'abc").unwrap_err();
    assert_eq!(err.span().start, 5);
}

#[test]
fn incomplete_classification() {
    let incomplete = Lexer::tokenize("echo 'abc").unwrap_err();
    assert!(incomplete.is_incomplete());

    let invalid = Lexer::tokenize(">&x").unwrap_err();
    assert!(!invalid.is_incomplete());
}

#[test]
fn diagnostic_includes_line_and_caret() {
    let err = Lexer::tokenize("echo hi\necho 'oops").unwrap_err();
    let diagnostic = err.diagnostic("echo hi\necho 'oops");
    assert!(diagnostic.contains("line 2"), "diagnostic: {diagnostic}");
    assert!(diagnostic.contains('^'), "diagnostic: {diagnostic}");
}
