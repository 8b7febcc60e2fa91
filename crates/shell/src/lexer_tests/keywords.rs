// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reserved word recognition.

use crate::lexer::Lexer;
use crate::token::{Keyword, TokenKind};

lex_tests! {
    if_keyword: "if" => [TokenKind::Keyword(Keyword::If)],
    full_conditional: "if true; then echo; fi" => [
        TokenKind::Keyword(Keyword::If),
        TokenKind::Word("true".into()),
        TokenKind::Semi,
        TokenKind::Keyword(Keyword::Then),
        TokenKind::Word("echo".into()),
        TokenKind::Semi,
        TokenKind::Keyword(Keyword::Fi),
    ],
    loop_keywords: "while until do done" => [
        TokenKind::Keyword(Keyword::While),
        TokenKind::Keyword(Keyword::Until),
        TokenKind::Keyword(Keyword::Do),
        TokenKind::Keyword(Keyword::Done),
    ],
    for_in: "for x in" => [
        TokenKind::Keyword(Keyword::For),
        TokenKind::Word("x".into()),
        TokenKind::Keyword(Keyword::In),
    ],
    case_esac: "case esac" => [
        TokenKind::Keyword(Keyword::Case),
        TokenKind::Keyword(Keyword::Esac),
    ],
    function_keyword: "function f" => [
        TokenKind::Keyword(Keyword::Function),
        TokenKind::Word("f".into()),
    ],
    bang: "! true" => [
        TokenKind::Keyword(Keyword::Bang),
        TokenKind::Word("true".into()),
    ],
    bang_glued_is_word: "!x" => [TokenKind::Word("!x".into())],
    quoted_is_not_keyword: "'if'" => [TokenKind::SingleQuoted("if".into())],
    escaped_is_not_keyword: "\\if" => [TokenKind::Word("if".into())],
    prefix_is_plain_word: "iffy" => [TokenKind::Word("iffy".into())],
    keyword_before_semi: "fi;" => [
        TokenKind::Keyword(Keyword::Fi),
        TokenKind::Semi,
    ],
}

#[test]
fn keyword_glued_to_quote_is_a_word() {
    // `if"x"` concatenates into one word; no reserved meaning survives
    let tokens = Lexer::tokenize("if\"x\"").unwrap();
    assert!(matches!(tokens[0].kind, TokenKind::Word(ref w) if w == "if"));
    assert!(matches!(tokens[1].kind, TokenKind::DoubleQuoted(_)));
}
