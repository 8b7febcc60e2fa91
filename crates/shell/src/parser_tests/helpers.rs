// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared accessors for parser test assertions.

use crate::ast::*;

/// The single command of a one-item list.
pub(crate) fn get_command(list: &CommandList) -> &Command {
    assert_eq!(list.items.len(), 1, "expected one item: {list:?}");
    let and_or = &list.items[0];
    assert!(and_or.rest.is_empty(), "expected no &&/|| chain: {and_or:?}");
    &and_or.first.command
}

pub(crate) fn get_simple_command(and_or: &AndOrList) -> &SimpleCommand {
    match &and_or.first.command {
        Command::Simple(cmd) => cmd,
        other => panic!("expected simple command, got {other:?}"),
    }
}

pub(crate) fn get_pipeline(and_or: &AndOrList) -> &Pipeline {
    match &and_or.first.command {
        Command::Pipeline(pipeline) => pipeline,
        other => panic!("expected pipeline, got {other:?}"),
    }
}

/// Assert a word is the given bare unquoted literal.
pub(crate) fn assert_literal(word: &Word, expected: &str) {
    assert_eq!(word.as_bare_literal(), Some(expected), "word: {word:?}");
}
