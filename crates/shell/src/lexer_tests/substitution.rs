// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command substitution and arithmetic expansion lexing.

use crate::lexer::Lexer;
use crate::token::TokenKind;

fn subst(content: &str) -> TokenKind {
    TokenKind::CommandSubstitution { content: content.into(), backtick: false }
}

fn backtick(content: &str) -> TokenKind {
    TokenKind::CommandSubstitution { content: content.into(), backtick: true }
}

fn arith(content: &str) -> TokenKind {
    TokenKind::Arith { content: content.into() }
}

lex_tests! {
    simple_substitution: "$(echo hi)" => [subst("echo hi")],
    nested_substitution: "$(a $(b))" => [subst("a $(b)")],
    substitution_with_quotes: "$(echo \")\")" => [subst("echo \")\"")],
    substitution_with_parens: "$(echo (a) (b))" => [subst("echo (a) (b)")],
    backtick_substitution: "`ls`" => [backtick("ls")],
    backtick_with_escape: "`a \\` b`" => [backtick("a \\` b")],
    arith_simple: "$((1+2))" => [arith("1+2")],
    arith_spaces: "$(( a * 2 ))" => [arith(" a * 2 ")],
    arith_nested_parens: "$(((1+2)*3))" => [arith("(1+2)*3")],
    subshell_in_substitution_stays_command: "$( (ls) )" => [subst(" (ls) ")],
    substitution_adjacent_word: "a$(b)c" => [
        TokenKind::Word("a".into()),
        subst("b"),
        TokenKind::Word("c".into()),
    ],
}

lex_error_tests! {
    unterminated_substitution: "$(echo" => crate::lexer::LexerError::UnterminatedSubstitution { .. },
    unterminated_backtick: "`ls" => crate::lexer::LexerError::UnterminatedSubstitution { .. },
    unterminated_arith: "$((1+2" => crate::lexer::LexerError::UnterminatedArith { .. },
}
