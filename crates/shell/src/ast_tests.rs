// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for AST convenience methods.

use super::*;
use crate::Span;

#[test]
fn parse_convenience_wrapper() {
    let list = CommandList::parse("echo hi; echo bye").unwrap();
    assert_eq!(list.items.len(), 2);
}

#[test]
fn parse_propagates_errors() {
    assert!(CommandList::parse("echo |").is_err());
}

#[test]
fn command_span_covers_each_variant() {
    for (input, expected_end) in [
        ("echo hi", 7),
        ("a | b", 5),
        ("(a)", 3),
        ("{ a; }", 6),
        ("if a; then b; fi", 16),
        ("while a; do b; done", 19),
        ("for i in x; do b; done", 22),
        ("case x in a) b;; esac", 21),
        ("f() { a; }", 10),
    ] {
        let list = CommandList::parse(input).unwrap();
        let span = list.items[0].first.command.span();
        assert_eq!(span.start, 0, "input: {input}");
        assert_eq!(span.end, expected_end, "input: {input}");
    }
}

#[test]
fn empty_word_helpers() {
    let word = Word::empty(3);
    assert!(word.is_empty());
    assert_eq!(word.span, Span::empty(3));
    assert_eq!(word.as_bare_literal(), None);
}

#[test]
fn bare_literal_requires_a_single_unquoted_part() {
    let bare = Word { parts: vec![WordPart::literal("x")], span: Span::new(0, 1) };
    assert_eq!(bare.as_bare_literal(), Some("x"));

    let quoted = Word { parts: vec![WordPart::single_quoted("x")], span: Span::new(0, 3) };
    assert_eq!(quoted.as_bare_literal(), None);

    let compound = Word {
        parts: vec![WordPart::literal("x"), WordPart::variable("y")],
        span: Span::new(0, 3),
    };
    assert_eq!(compound.as_bare_literal(), None);
}

#[test]
fn redirection_target_spans() {
    let list = CommandList::parse("cmd > out").unwrap();
    let SimpleCommand { redirections, .. } = match &list.items[0].first.command {
        Command::Simple(cmd) => cmd.clone(),
        other => panic!("expected simple, got {other:?}"),
    };
    assert_eq!(redirections[0].target_span(), Some(Span::new(6, 9)));

    let heredoc = Redirection::HereDoc {
        fd: None,
        delimiter: "EOF".into(),
        body: String::new(),
        strip_tabs: false,
        quoted: false,
    };
    assert_eq!(heredoc.target_span(), None);
}
