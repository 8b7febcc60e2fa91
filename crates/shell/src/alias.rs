// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pre-parse alias expansion over the token stream.
//!
//! Aliases replace the first word of a simple command before parsing, so a
//! replacement may contribute arguments, operators, even whole pipelines.
//! Expansion is recursive, bounded by the set of names already expanded in
//! the current word so `alias ls='ls -a'` cannot loop.

use std::collections::HashSet;

use crate::env::Env;
use crate::lexer::Lexer;
use crate::token::{self, Keyword, Span, Token, TokenKind};

/// Expand aliases in a freshly tokenized line.
///
/// Only used in interactive mode; scripts and `-c` strings parse their
/// tokens untouched.
pub fn expand_aliases(tokens: Vec<Token>, env: &Env) -> Vec<Token> {
    let mut out = Vec::with_capacity(tokens.len());
    let mut at_command_start = true;

    for token in tokens {
        if at_command_start {
            if let TokenKind::Word(word) = &token.kind {
                if !is_assignment_word(word) {
                    let mut seen = HashSet::new();
                    if let Some(replacement) =
                        expand_word_alias(word, token.span, env, &mut seen)
                    {
                        // The replacement's last token decides the next
                        // command-start state like any other token run.
                        at_command_start = replacement
                            .last()
                            .map(|t| starts_command_after(&t.kind))
                            .unwrap_or(true);
                        out.extend(replacement);
                        continue;
                    }
                }
                // An assignment word keeps the command position open for the
                // word that follows it.
                at_command_start = is_assignment_word(word);
                out.push(token);
                continue;
            }
        }

        at_command_start = starts_command_after(&token.kind);
        out.push(token);
    }

    out
}

/// Recursively expand one command word, threading the set of names already
/// substituted so a name never expands into itself.
fn expand_word_alias(
    name: &str,
    span: Span,
    env: &Env,
    seen: &mut HashSet<String>,
) -> Option<Vec<Token>> {
    if seen.contains(name) {
        return None;
    }
    let replacement = env.alias(name)?;
    let Ok(mut tokens) = Lexer::tokenize(replacement) else {
        // An alias that does not tokenize cleanly is left unexpanded; the
        // parser will report the original word.
        return None;
    };
    seen.insert(name.to_string());

    // Replacement tokens inherit the original word's span so diagnostics
    // point at what the user actually typed.
    for t in &mut tokens {
        t.span = span;
    }

    // The first word of the replacement is again in command position.
    if let Some(Token { kind: TokenKind::Word(first), .. }) = tokens.first() {
        let first = first.clone();
        if let Some(mut inner) = expand_word_alias(&first, span, env, seen) {
            inner.extend(tokens.into_iter().skip(1));
            return Some(inner);
        }
    }

    Some(tokens)
}

/// Whether the position after this token is a command start (where alias
/// expansion applies to the next word).
fn starts_command_after(kind: &TokenKind) -> bool {
    match kind {
        TokenKind::Semi
        | TokenKind::DblSemi
        | TokenKind::Newline
        | TokenKind::And
        | TokenKind::Or
        | TokenKind::Pipe
        | TokenKind::Ampersand
        | TokenKind::LParen
        | TokenKind::LBrace => true,
        TokenKind::Keyword(kw) => matches!(
            kw,
            Keyword::If
                | Keyword::Then
                | Keyword::Elif
                | Keyword::Else
                | Keyword::While
                | Keyword::Until
                | Keyword::Do
                | Keyword::Bang
        ),
        _ => false,
    }
}

fn is_assignment_word(word: &str) -> bool {
    match word.find('=') {
        Some(pos) => token::is_valid_variable_name(&word[..pos]),
        None => false,
    }
}

#[cfg(test)]
#[path = "alias_tests.rs"]
mod tests;
