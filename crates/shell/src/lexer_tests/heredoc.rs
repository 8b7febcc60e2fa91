// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Here-document lexing and deferred body capture.

use crate::lexer::{Lexer, LexerError, MAX_HEREDOC_BYTES};
use crate::token::TokenKind;

fn heredoc_token(tokens: &[crate::Token]) -> (&str, &str, bool, bool) {
    for token in tokens {
        if let TokenKind::HereDoc { delimiter, body, quoted, strip_tabs, .. } = &token.kind {
            return (delimiter, body, *quoted, *strip_tabs);
        }
    }
    panic!("no heredoc token in {tokens:?}");
}

#[test]
fn body_is_captured_after_newline() {
    let tokens = Lexer::tokenize("cat <<EOF\nhello\nworld\nEOF\n").unwrap();
    let (delimiter, body, quoted, strip_tabs) = heredoc_token(&tokens);
    assert_eq!(delimiter, "EOF");
    assert_eq!(body, "hello\nworld\n");
    assert!(!quoted);
    assert!(!strip_tabs);
}

#[test]
fn quoted_delimiter_disables_expansion() {
    let tokens = Lexer::tokenize("cat <<'EOF'\n$HOME\nEOF\n").unwrap();
    let (delimiter, body, quoted, _) = heredoc_token(&tokens);
    assert_eq!(delimiter, "EOF");
    assert_eq!(body, "$HOME\n");
    assert!(quoted);
}

#[test]
fn double_quoted_delimiter_counts_as_quoted() {
    let tokens = Lexer::tokenize("cat <<\"END\"\nx\nEND\n").unwrap();
    let (delimiter, _, quoted, _) = heredoc_token(&tokens);
    assert_eq!(delimiter, "END");
    assert!(quoted);
}

#[test]
fn dash_variant_strips_leading_tabs() {
    let tokens = Lexer::tokenize("cat <<-EOF\n\tindented\n\tEOF\n").unwrap();
    let (_, body, _, strip_tabs) = heredoc_token(&tokens);
    assert!(strip_tabs);
    assert_eq!(body, "indented\n");
}

#[test]
fn tokens_after_heredoc_operator_stay_on_the_command() {
    // The body is captured after the newline; `> out` still belongs to cat
    let tokens = Lexer::tokenize("cat <<EOF > out\nbody\nEOF\n").unwrap();
    assert!(matches!(tokens[0].kind, TokenKind::Word(ref w) if w == "cat"));
    assert!(matches!(tokens[1].kind, TokenKind::HereDoc { .. }));
    assert!(matches!(tokens[2].kind, TokenKind::RedirectOut { .. }));
    let (_, body, _, _) = heredoc_token(&tokens);
    assert_eq!(body, "body\n");
}

#[test]
fn two_heredocs_capture_in_order() {
    let tokens = Lexer::tokenize("cat <<A <<B\nfirst\nA\nsecond\nB\n").unwrap();
    let bodies: Vec<_> = tokens
        .iter()
        .filter_map(|t| match &t.kind {
            TokenKind::HereDoc { delimiter, body, .. } => Some((delimiter.clone(), body.clone())),
            _ => None,
        })
        .collect();
    assert_eq!(bodies.len(), 2);
    assert_eq!(bodies[0], ("A".to_string(), "first\n".to_string()));
    assert_eq!(bodies[1], ("B".to_string(), "second\n".to_string()));
}

#[test]
fn unterminated_heredoc_is_an_error() {
    let result = Lexer::tokenize("cat <<EOF\nno end");
    assert!(matches!(result, Err(LexerError::UnterminatedHereDoc { .. })), "got {result:?}");
}

#[test]
fn heredoc_without_newline_is_unterminated() {
    let result = Lexer::tokenize("cat <<EOF");
    assert!(matches!(result, Err(LexerError::UnterminatedHereDoc { .. })), "got {result:?}");
}

#[test]
fn missing_delimiter_word_is_an_error() {
    let result = Lexer::tokenize("cat << ;");
    assert!(matches!(result, Err(LexerError::InvalidRedirection { .. })), "got {result:?}");
}

#[test]
fn oversized_body_is_rejected() {
    let input = format!("cat <<EOF\n{}\nEOF\n", "x".repeat(MAX_HEREDOC_BYTES + 1));
    let result = Lexer::tokenize(&input);
    assert!(matches!(result, Err(LexerError::HereDocTooLarge { .. })), "expected size error");
}
