// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Redirection operator lexing.

use crate::lexer::Lexer;
use crate::token::{DupTarget, TokenKind};

lex_tests! {
    redirect_out: "> f" => [
        TokenKind::RedirectOut { fd: None },
        TokenKind::Word("f".into()),
    ],
    redirect_append: ">> f" => [
        TokenKind::RedirectAppend { fd: None },
        TokenKind::Word("f".into()),
    ],
    redirect_in: "< f" => [
        TokenKind::RedirectIn { fd: None },
        TokenKind::Word("f".into()),
    ],
    stderr_redirect: "2> f" => [
        TokenKind::RedirectOut { fd: Some(2) },
        TokenKind::Word("f".into()),
    ],
    stderr_append: "2>> f" => [
        TokenKind::RedirectAppend { fd: Some(2) },
        TokenKind::Word("f".into()),
    ],
    fd_input: "3< f" => [
        TokenKind::RedirectIn { fd: Some(3) },
        TokenKind::Word("f".into()),
    ],
    both_streams: "&> f" => [
        TokenKind::RedirectBoth { append: false },
        TokenKind::Word("f".into()),
    ],
    both_streams_append: "&>> f" => [
        TokenKind::RedirectBoth { append: true },
        TokenKind::Word("f".into()),
    ],
    dup_stderr_to_stdout: "2>&1" => [
        TokenKind::DuplicateFd { source: 2, target: DupTarget::Fd(1), output: true },
    ],
    dup_stdin: "<&3" => [
        TokenKind::DuplicateFd { source: 0, target: DupTarget::Fd(3), output: false },
    ],
    close_stdout: ">&-" => [
        TokenKind::DuplicateFd { source: 1, target: DupTarget::Close, output: true },
    ],
    word_then_redirect: "echo hi > f" => [
        TokenKind::Word("echo".into()),
        TokenKind::Word("hi".into()),
        TokenKind::RedirectOut { fd: None },
        TokenKind::Word("f".into()),
    ],
    redirect_glued_to_target: ">f" => [
        TokenKind::RedirectOut { fd: None },
        TokenKind::Word("f".into()),
    ],
}

lex_error_tests! {
    dup_without_fd: ">&x" => crate::lexer::LexerError::InvalidRedirection { .. },
}
