// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shell command execution.
//!
//! [`ShellExecutor`] owns the session's [`Env`] and walks parsed command
//! lists: builtins and control flow run in-process, external commands are
//! spawned with the exported environment, and pipelines are wired with
//! relay tasks. `$?` and variable mutations persist across calls.

mod builtins;
mod control;
mod error;
mod expand;
mod expand_glob;
mod pipeline;
mod redirect;
mod run;

use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::alias::expand_aliases;
use crate::env::Env;
use crate::lexer::Lexer;
use crate::parser::Parser;
use crate::{CommandList, ParseError};

pub use error::ExecError;
use run::ExecContext;

/// Executes parsed commands against a persistent shell environment.
pub struct ShellExecutor {
    env: Env,
    interactive: bool,
}

impl Default for ShellExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl ShellExecutor {
    /// An executor seeded from the calling process's environment.
    pub fn new() -> Self {
        Self { env: Env::from_process(), interactive: false }
    }

    /// An executor over a prepared environment.
    pub fn with_env(env: Env) -> Self {
        Self { env, interactive: false }
    }

    /// Interactive mode: aliases expand pre-parse.
    pub fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    /// Set the working directory for spawned commands.
    pub fn cwd(mut self, path: impl Into<PathBuf>) -> Self {
        self.env.set_cwd(path.into());
        self
    }

    /// Set a shell variable.
    pub fn var(mut self, name: &str, value: impl Into<String>) -> Self {
        let _ = self.env.set(name, value);
        self
    }

    /// Set multiple shell variables.
    pub fn vars<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (name, value) in vars {
            let _ = self.env.set(name.as_ref(), value);
        }
        self
    }

    /// Bind the positional parameters (`$1`..).
    pub fn positionals(mut self, args: Vec<String>) -> Self {
        self.env.set_positionals(args);
        self
    }

    /// Set `$0`.
    pub fn arg0(mut self, name: impl Into<String>) -> Self {
        self.env.set_arg0(name);
        self
    }

    pub fn env(&self) -> &Env {
        &self.env
    }

    pub fn env_mut(&mut self) -> &mut Env {
        &mut self.env
    }

    /// Tokenize and parse one input line, applying alias expansion in
    /// interactive mode.
    pub fn parse_line(&self, input: &str) -> Result<CommandList, ParseError> {
        if self.interactive {
            let tokens = Lexer::tokenize(input)?;
            let tokens = expand_aliases(tokens, &self.env);
            Parser::parse_tokens(tokens, input.len())
        } else {
            Parser::parse(input)
        }
    }

    /// Execute a parsed command list, returning the exit status.
    ///
    /// Also updates `$?`. The only errors that escape are
    /// [`ExecError::Exit`] (the `exit` builtin, or `errexit`); everything
    /// else settles into the status with a diagnostic on stderr.
    pub async fn execute(&mut self, list: &CommandList) -> Result<i32, ExecError> {
        let mut ctx = ExecContext::new(std::mem::take(&mut self.env), self.interactive);
        let result = run::execute_command_list(&mut ctx, list).await;
        self.env = ctx.env;

        match result {
            Ok(status) => {
                self.env.last_status = status;
                Ok(status)
            }
            Err(err) => {
                if let ExecError::Exit { code } = &err {
                    self.env.last_status = *code;
                }
                Err(err)
            }
        }
    }

    /// Parse and execute a source string.
    pub async fn execute_source(&mut self, input: &str) -> Result<i32, ExecError> {
        let list = self.parse_line(input)?;
        self.execute(&list).await
    }

    /// Parse and execute a source string with stdout captured.
    ///
    /// `exit` settles into the returned status here; tests and embedders
    /// want the output either way.
    pub async fn execute_source_captured(
        &mut self,
        input: &str,
    ) -> Result<(i32, String), ExecError> {
        let list = self.parse_line(input)?;

        let buffer = Arc::new(Mutex::new(Vec::new()));
        let mut ctx = ExecContext::new(std::mem::take(&mut self.env), self.interactive);
        ctx.capture = Some(buffer.clone());
        let result = run::execute_command_list(&mut ctx, &list).await;
        self.env = ctx.env;

        let output = String::from_utf8_lossy(&buffer.lock()).into_owned();
        match result {
            Ok(status) => {
                self.env.last_status = status;
                Ok((status, output))
            }
            Err(ExecError::Exit { code }) => {
                self.env.last_status = code;
                Ok((code, output))
            }
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
#[path = "../exec_tests/mod.rs"]
mod tests;
