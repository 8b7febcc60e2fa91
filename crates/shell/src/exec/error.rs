// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Execution error types with span information.

use crate::Span;

/// Errors that can occur during shell command execution.
///
/// Most of these settle into an exit status plus a one-line diagnostic at
/// the command boundary; only [`ExecError::Exit`] unwinds further (and
/// terminates the shell when it reaches the top level).
#[derive(Debug, thiserror::Error)]
pub enum ExecError {
    /// The `exit` builtin (or `set -e`) unwinding with a final status.
    #[error("exit {code}")]
    Exit { code: i32 },

    /// Command name did not resolve to anything runnable.
    #[error("{command}: command not found")]
    NotFound { command: String, span: Span },

    /// Command found but not executable.
    #[error("{command}: permission denied")]
    PermissionDenied { command: String, span: Span },

    /// Other spawn failure (fork/exec level, transient).
    #[error("failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
        span: Span,
    },

    /// Redirection target could not be opened or written.
    #[error("redirection failed: {message}")]
    Redirect {
        message: String,
        source: std::io::Error,
        span: Span,
    },

    /// Parameter expansion failure (`${NAME:?}` and friends).
    #[error("{message}")]
    Expansion { message: String, span: Span },

    /// Arithmetic expansion failure.
    #[error("arithmetic: {source}")]
    Arith {
        #[source]
        source: crate::arith::ArithError,
        span: Span,
    },

    /// Variable table failure (readonly assignment, `local` outside a function).
    #[error("{source}")]
    Env {
        #[source]
        source: crate::env::EnvError,
        span: Span,
    },

    /// A shell feature that is not supported by this executor.
    #[error("unsupported feature: {feature}")]
    Unsupported { feature: String, span: Span },

    /// Parse error from a command substitution body evaluated at runtime.
    #[error(transparent)]
    Parse(#[from] crate::ParseError),
}

impl ExecError {
    /// Returns the source span associated with this error.
    pub fn span(&self) -> Span {
        match self {
            ExecError::Exit { .. } => Span::default(),
            ExecError::NotFound { span, .. }
            | ExecError::PermissionDenied { span, .. }
            | ExecError::Spawn { span, .. }
            | ExecError::Redirect { span, .. }
            | ExecError::Expansion { span, .. }
            | ExecError::Arith { span, .. }
            | ExecError::Env { span, .. }
            | ExecError::Unsupported { span, .. } => *span,
            ExecError::Parse(e) => e.span().unwrap_or_default(),
        }
    }

    /// The exit status this error settles into when it fails a command.
    pub fn status(&self) -> i32 {
        match self {
            ExecError::Exit { code } => *code,
            ExecError::NotFound { .. } => 127,
            ExecError::PermissionDenied { .. } => 126,
            ExecError::Parse(_) => 2,
            _ => 1,
        }
    }

    /// Classify a spawn failure by its I/O error kind.
    pub(crate) fn from_spawn(command: String, source: std::io::Error, span: Span) -> Self {
        match source.kind() {
            std::io::ErrorKind::NotFound => ExecError::NotFound { command, span },
            std::io::ErrorKind::PermissionDenied => ExecError::PermissionDenied { command, span },
            _ => ExecError::Spawn { command, source, span },
        }
    }
}
