// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for lexer error accessors and rendering.

use super::*;

#[test]
fn every_variant_reports_its_span() {
    let span = Span::new(3, 7);
    let cases = [
        LexerError::UnexpectedChar { ch: 'x', span },
        LexerError::UnterminatedVariable { span },
        LexerError::EmptyVariable { span },
        LexerError::InvalidVariableName { name: "-".into(), span },
        LexerError::UnterminatedSubstitution { span },
        LexerError::UnterminatedArith { span },
        LexerError::InvalidRedirection { message: "m".into(), span },
        LexerError::UnterminatedSingleQuote { span },
        LexerError::UnterminatedDoubleQuote { span },
        LexerError::InvalidEscape { ch: 'q', span },
        LexerError::TrailingBackslash { span },
        LexerError::UnterminatedHereDoc { delimiter: "EOF".into(), span },
        LexerError::HereDocTooLarge { span },
    ];
    for err in cases {
        assert_eq!(err.span(), span, "variant: {err:?}");
    }
}

#[test]
fn messages_carry_positions() {
    let err = LexerError::UnterminatedSingleQuote { span: Span::new(5, 9) };
    assert_eq!(err.to_string(), "unterminated single quote at position 5");
}

#[test]
fn heredoc_message_names_the_delimiter() {
    let err = LexerError::UnterminatedHereDoc { delimiter: "END".into(), span: Span::new(4, 6) };
    assert!(err.to_string().contains("'END'"), "message: {err}");
}

#[test]
fn incomplete_covers_continuation_cases() {
    let span = Span::new(0, 1);
    assert!(LexerError::UnterminatedSingleQuote { span }.is_incomplete());
    assert!(LexerError::UnterminatedDoubleQuote { span }.is_incomplete());
    assert!(LexerError::UnterminatedSubstitution { span }.is_incomplete());
    assert!(LexerError::UnterminatedHereDoc { delimiter: "E".into(), span }.is_incomplete());

    assert!(!LexerError::EmptyVariable { span }.is_incomplete());
    assert!(!LexerError::HereDocTooLarge { span }.is_incomplete());
}

#[test]
fn context_renders_the_offending_region() {
    let input = "echo 'oops";
    let err = LexerError::UnterminatedSingleQuote { span: Span::new(5, 10) };
    let context = err.context(input, 20);
    assert!(context.starts_with("echo 'oops"), "context: {context}");
    assert!(context.contains('^'), "context: {context}");
}
