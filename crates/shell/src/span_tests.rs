// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for span arithmetic and diagnostics.

use super::*;

#[test]
fn new_and_len() {
    let span = Span::new(2, 5);
    assert_eq!(span.len(), 3);
    assert!(!span.is_empty());
}

#[test]
fn empty_span() {
    let span = Span::empty(4);
    assert_eq!(span.start, 4);
    assert_eq!(span.end, 4);
    assert!(span.is_empty());
    assert_eq!(span.len(), 0);
}

#[test]
fn merge_covers_both() {
    let merged = Span::new(2, 5).merge(Span::new(8, 10));
    assert_eq!(merged, Span::new(2, 10));

    let merged = Span::new(8, 10).merge(Span::new(2, 5));
    assert_eq!(merged, Span::new(2, 10));
}

#[test]
fn slice_extracts_text() {
    let source = "echo hello";
    assert_eq!(Span::new(5, 10).slice(source), "hello");
}

#[test]
fn slice_out_of_bounds_is_empty() {
    assert_eq!(Span::new(5, 99).slice("abc"), "");
}

#[test]
fn context_snippet_places_carets() {
    let snippet = context_snippet("echo | | bad", Span::new(7, 8), 20);
    let lines: Vec<_> = snippet.lines().collect();
    assert_eq!(lines[0], "echo | | bad");
    assert_eq!(lines[1], "       ^");
}

#[test]
fn context_snippet_widens_carets_for_long_spans() {
    let snippet = context_snippet("abcdef", Span::new(1, 4), 20);
    assert!(snippet.ends_with(" ^^^"), "snippet: {snippet}");
}

#[test]
fn locate_span_finds_line_and_column() {
    let source = "first\nsecond line\nthird";
    let (line, col, content) = locate_span(source, Span::new(13, 17));
    assert_eq!(line, 2);
    assert_eq!(col, 7);
    assert_eq!(content, "second line");
}

#[test]
fn locate_span_on_first_line() {
    let (line, col, content) = locate_span("abc def", Span::new(4, 7));
    assert_eq!(line, 1);
    assert_eq!(col, 4);
    assert_eq!(content, "abc def");
}

#[test]
fn diagnostic_context_formats_line_info() {
    let source = "good\n| bad";
    let rendered = diagnostic_context(source, Span::new(5, 6), "unexpected token '|'");
    assert!(rendered.contains("error: unexpected token '|'"), "{rendered}");
    assert!(rendered.contains("line 2, column 1"), "{rendered}");
    assert!(rendered.contains("| bad"), "{rendered}");
}
