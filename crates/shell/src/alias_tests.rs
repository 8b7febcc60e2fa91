// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for pre-parse alias expansion over the token stream.

use super::*;
use crate::env::Env;
use crate::lexer::Lexer;
use crate::token::TokenKind;

fn expand(env: &Env, input: &str) -> Vec<String> {
    let tokens = Lexer::tokenize(input).unwrap();
    expand_aliases(tokens, env)
        .into_iter()
        .map(|t| match t.kind {
            TokenKind::Word(w) => w,
            TokenKind::Semi => ";".to_string(),
            TokenKind::Pipe => "|".to_string(),
            other => format!("<{other}>"),
        })
        .collect()
}

fn env_with(aliases: &[(&str, &str)]) -> Env {
    let mut env = Env::new();
    for (name, replacement) in aliases {
        env.set_alias(*name, *replacement);
    }
    env
}

#[test]
fn first_word_is_replaced() {
    let env = env_with(&[("ll", "ls -l")]);
    assert_eq!(expand(&env, "ll /tmp"), ["ls", "-l", "/tmp"]);
}

#[test]
fn non_alias_words_pass_through() {
    let env = env_with(&[("ll", "ls -l")]);
    assert_eq!(expand(&env, "ls /tmp"), ["ls", "/tmp"]);
}

#[test]
fn argument_position_is_never_expanded() {
    let env = env_with(&[("ll", "ls -l")]);
    assert_eq!(expand(&env, "echo ll"), ["echo", "ll"]);
}

#[test]
fn expansion_applies_after_separators() {
    let env = env_with(&[("ll", "ls -l")]);
    assert_eq!(expand(&env, "echo x; ll"), ["echo", "x", ";", "ls", "-l"]);
    assert_eq!(expand(&env, "echo x | ll"), ["echo", "x", "|", "ls", "-l"]);
}

#[test]
fn self_reference_stops_after_one_round() {
    let env = env_with(&[("ls", "ls -a")]);
    assert_eq!(expand(&env, "ls"), ["ls", "-a"]);
}

#[test]
fn mutual_recursion_is_bounded() {
    let env = env_with(&[("a", "b one"), ("b", "a two")]);
    // a → b one → a two one, and the second `a` is already in the set
    assert_eq!(expand(&env, "a"), ["a", "two", "one"]);
}

#[test]
fn chained_aliases_resolve_through() {
    let env = env_with(&[("top", "mid x"), ("mid", "echo y")]);
    assert_eq!(expand(&env, "top z"), ["echo", "y", "x", "z"]);
}

#[test]
fn assignment_words_keep_the_command_position_open() {
    let env = env_with(&[("ll", "ls -l")]);
    assert_eq!(expand(&env, "FOO=1 ll"), ["FOO=1", "ls", "-l"]);
}

#[test]
fn replacement_spans_point_at_the_original_word() {
    let env = env_with(&[("ll", "ls -l")]);
    let tokens = Lexer::tokenize("ll").unwrap();
    let original_span = tokens[0].span;
    let expanded = expand_aliases(tokens, &env);
    assert!(expanded.iter().all(|t| t.span == original_span));
}

#[test]
fn unparsable_replacement_is_left_alone() {
    let env = env_with(&[("broken", "echo 'unterminated")]);
    assert_eq!(expand(&env, "broken"), ["broken"]);
}

#[test]
fn keywords_reopen_command_position() {
    let env = env_with(&[("body", "echo inside")]);
    let tokens = Lexer::tokenize("if true; then body; fi").unwrap();
    let expanded = expand_aliases(tokens, &env);
    let words: Vec<_> = expanded
        .iter()
        .filter_map(|t| match &t.kind {
            TokenKind::Word(w) => Some(w.as_str()),
            _ => None,
        })
        .collect();
    assert!(words.contains(&"inside"), "words: {words:?}");
}
