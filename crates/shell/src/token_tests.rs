// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for token classification helpers.

use super::*;

#[test]
fn keywords_round_trip_through_their_text() {
    for kw in [
        Keyword::If,
        Keyword::Then,
        Keyword::Elif,
        Keyword::Else,
        Keyword::Fi,
        Keyword::While,
        Keyword::Until,
        Keyword::Do,
        Keyword::Done,
        Keyword::For,
        Keyword::In,
        Keyword::Case,
        Keyword::Esac,
        Keyword::Function,
        Keyword::Bang,
    ] {
        assert_eq!(Keyword::from_word(kw.as_str()), Some(kw));
    }
}

#[test]
fn non_keywords_are_rejected() {
    assert_eq!(Keyword::from_word("iffy"), None);
    assert_eq!(Keyword::from_word("IF"), None);
    assert_eq!(Keyword::from_word(""), None);
    assert_eq!(Keyword::from_word("!!"), None);
}

#[test]
fn redirection_classification() {
    assert!(TokenKind::RedirectOut { fd: None }.is_redirection());
    assert!(TokenKind::RedirectAppend { fd: Some(2) }.is_redirection());
    assert!(TokenKind::RedirectIn { fd: None }.is_redirection());
    assert!(TokenKind::RedirectBoth { append: false }.is_redirection());
    assert!(TokenKind::DuplicateFd { source: 2, target: DupTarget::Fd(1), output: true }
        .is_redirection());

    assert!(!TokenKind::Pipe.is_redirection());
    assert!(!TokenKind::Word("x".into()).is_redirection());
}

#[test]
fn variable_name_validation() {
    assert!(is_valid_variable_name("x"));
    assert!(is_valid_variable_name("_private"));
    assert!(is_valid_variable_name("HOME2"));

    assert!(!is_valid_variable_name(""));
    assert!(!is_valid_variable_name("2x"));
    assert!(!is_valid_variable_name("a-b"));
    assert!(!is_valid_variable_name("a.b"));
}

#[test]
fn special_variable_characters() {
    for ch in ['?', '$', '#', '@', '*', '0', '5', '9'] {
        assert!(is_special_variable(ch), "expected special: {ch}");
    }
    for ch in ['a', '_', '-', '!'] {
        assert!(!is_special_variable(ch), "expected ordinary: {ch}");
    }
}

#[test]
fn display_quotes_operators() {
    assert_eq!(TokenKind::And.to_string(), "'&&'");
    assert_eq!(TokenKind::DblSemi.to_string(), "';;'");
    assert_eq!(TokenKind::Keyword(Keyword::Fi).to_string(), "'fi'");
    assert_eq!(TokenKind::Word("ls".into()).to_string(), "word 'ls'");
}
