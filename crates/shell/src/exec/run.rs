// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Core AST-walking execution logic.

use std::future::Future;
use std::io::Write;
use std::os::unix::process::ExitStatusExt;
use std::pin::Pin;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::io::AsyncWriteExt;

use crate::env::Env;
use crate::{AndOrList, Command, CommandItem, CommandList, LogicalOp, SimpleCommand, Span};

use super::builtins;
use super::control;
use super::error::ExecError;
use super::expand;
use super::redirect;

// ---------------------------------------------------------------------------
// Execution context
// ---------------------------------------------------------------------------

/// Execution context threaded through recursive calls.
///
/// Subshells clone it, so their environment mutations stay local; the
/// capture buffer is shared through the clone so a subshell's output still
/// reaches the surrounding command substitution.
#[derive(Clone)]
pub(crate) struct ExecContext {
    pub(crate) env: Env,
    pub(crate) interactive: bool,
    /// When set, stdout of everything executed is collected here instead of
    /// reaching the terminal (command substitution, builtin redirection).
    pub(crate) capture: Option<Arc<Mutex<Vec<u8>>>>,
    /// Non-zero while evaluating an `if`/`while`/`until` condition, where
    /// `errexit` must not trigger.
    pub(crate) condition_depth: u32,
}

impl ExecContext {
    pub(crate) fn new(env: Env, interactive: bool) -> Self {
        ExecContext { env, interactive, capture: None, condition_depth: 0 }
    }

    /// Write bytes to the shell's stdout (or the active capture buffer).
    pub(crate) fn write_stdout(&mut self, bytes: &[u8]) -> std::io::Result<()> {
        match &self.capture {
            Some(buffer) => {
                buffer.lock().extend_from_slice(bytes);
                Ok(())
            }
            None => {
                let mut out = std::io::stdout().lock();
                out.write_all(bytes)?;
                out.flush()
            }
        }
    }
}

/// Print the one-line diagnostic for a settled error.
pub(crate) fn report(err: &ExecError) {
    eprintln!("zish: {err}");
}

/// Convert a non-`exit` error into its exit status, with a diagnostic.
pub(crate) fn settle(result: Result<i32, ExecError>) -> Result<i32, ExecError> {
    match result {
        Err(err @ ExecError::Exit { .. }) => Err(err),
        Err(err) => {
            report(&err);
            Ok(err.status())
        }
        ok => ok,
    }
}

// ---------------------------------------------------------------------------
// Command list
// ---------------------------------------------------------------------------

/// Execute a full command list, returning the last status.
///
/// Returns a boxed future to support async recursion (command substitution
/// and control-flow bodies re-enter this function).
pub(crate) fn execute_command_list<'a>(
    ctx: &'a mut ExecContext,
    list: &'a CommandList,
) -> Pin<Box<dyn Future<Output = Result<i32, ExecError>> + 'a>> {
    Box::pin(async move {
        let mut status = 0;

        for and_or in &list.items {
            status = execute_and_or_list(ctx, and_or).await?;

            // `set -e` hook: a failing command aborts the shell, except in
            // condition position.
            if ctx.env.options.errexit && ctx.condition_depth == 0 && status != 0 {
                return Err(ExecError::Exit { code: status });
            }
        }

        Ok(status)
    })
}

/// Execute a command list in a subshell context and capture its stdout.
///
/// Used for command substitution. `exit` inside the substitution terminates
/// only the substitution.
pub(crate) async fn capture_command_list(
    ctx: &mut ExecContext,
    list: &CommandList,
) -> Result<String, ExecError> {
    let buffer = Arc::new(Mutex::new(Vec::new()));
    let mut sub = ctx.clone();
    sub.capture = Some(buffer.clone());

    let status = match execute_command_list(&mut sub, list).await {
        Ok(status) => status,
        Err(ExecError::Exit { code }) => code,
        Err(err) => return Err(err),
    };
    ctx.env.last_status = status;

    let bytes = buffer.lock();
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

// ---------------------------------------------------------------------------
// AND / OR chains
// ---------------------------------------------------------------------------

/// Execute an AND/OR chain with short-circuit evaluation.
///
/// Non-`exit` errors settle into `$?` here: they fail the pipeline they
/// occurred in, not the whole chain.
async fn execute_and_or_list(ctx: &mut ExecContext, and_or: &AndOrList) -> Result<i32, ExecError> {
    let mut status = settle(execute_command_item(ctx, &and_or.first).await)?;
    ctx.env.last_status = status;

    for (op, next_item) in &and_or.rest {
        let should_run = match op {
            LogicalOp::And => status == 0,
            LogicalOp::Or => status != 0,
        };
        if should_run {
            status = settle(execute_command_item(ctx, next_item).await)?;
            ctx.env.last_status = status;
        }
    }

    Ok(status)
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

async fn execute_command_item(ctx: &mut ExecContext, item: &CommandItem) -> Result<i32, ExecError> {
    if item.background {
        return Err(ExecError::Unsupported {
            feature: "background execution (&)".to_string(),
            span: item.span,
        });
    }
    execute_command(ctx, &item.command).await
}

/// Dispatch one command. Boxed for the same reason as
/// [`execute_command_list`]: pipelines and function calls recurse here.
pub(crate) fn execute_command<'a>(
    ctx: &'a mut ExecContext,
    cmd: &'a Command,
) -> Pin<Box<dyn Future<Output = Result<i32, ExecError>> + 'a>> {
    Box::pin(async move {
        match cmd {
            Command::Simple(simple) => execute_simple(ctx, simple).await,
            Command::Pipeline(pipeline) => super::pipeline::execute_pipeline(ctx, pipeline).await,
            Command::Subshell(subshell) => control::execute_subshell(ctx, subshell).await,
            Command::BraceGroup(group) => control::execute_brace_group(ctx, group).await,
            Command::If(if_cmd) => control::execute_if(ctx, if_cmd).await,
            Command::Loop(loop_cmd) => control::execute_loop(ctx, loop_cmd).await,
            Command::For(for_cmd) => control::execute_for(ctx, for_cmd).await,
            Command::Case(case_cmd) => control::execute_case(ctx, case_cmd).await,
            Command::FunctionDef(def) => {
                ctx.env.define_function(def.name.clone(), (*def.body).clone());
                Ok(0)
            }
        }
    })
}

// ---------------------------------------------------------------------------
// Simple command
// ---------------------------------------------------------------------------

/// Execute a simple command: expand, resolve (function → builtin → $PATH),
/// and dispatch.
pub(crate) async fn execute_simple(
    ctx: &mut ExecContext,
    cmd: &SimpleCommand,
) -> Result<i32, ExecError> {
    // Assignment-only commands mutate the current environment.
    if cmd.name.is_empty() {
        for assignment in &cmd.assignments {
            let value = expand::expand_word(ctx, &assignment.value).await?;
            ctx.env
                .set(&assignment.name, value)
                .map_err(|source| ExecError::Env { source, span: assignment.span })?;
        }
        // Redirections still open (and so create or truncate) their targets.
        if !cmd.redirections.is_empty() {
            let _plan = redirect::prepare(ctx, &cmd.redirections).await?;
        }
        return Ok(0);
    }

    let name = expand::expand_word(ctx, &cmd.name).await?;
    if name.is_empty() {
        return Err(ExecError::NotFound { command: String::new(), span: cmd.span });
    }

    // Functions run in the current shell with command-scoped assignments.
    if let Some(body) = ctx.env.function(&name).cloned() {
        let saved = apply_assignments(ctx, cmd).await?;
        let result = control::call_function(ctx, cmd, &name, body).await;
        restore_assignments(ctx, saved);
        return result;
    }

    if builtins::is_builtin(&name) {
        let saved = apply_assignments(ctx, cmd).await?;
        let result = run_builtin(ctx, cmd, &name).await;
        restore_assignments(ctx, saved);
        return result;
    }

    run_external(ctx, cmd, &name).await
}

/// Apply command-scoped assignments, returning what to restore afterwards.
async fn apply_assignments(
    ctx: &mut ExecContext,
    cmd: &SimpleCommand,
) -> Result<Vec<(String, Option<String>)>, ExecError> {
    let mut saved = Vec::with_capacity(cmd.assignments.len());
    for assignment in &cmd.assignments {
        let value = expand::expand_word(ctx, &assignment.value).await?;
        saved.push((assignment.name.clone(), ctx.env.get(&assignment.name).map(String::from)));
        ctx.env
            .set(&assignment.name, value)
            .map_err(|source| ExecError::Env { source, span: assignment.span })?;
    }
    Ok(saved)
}

fn restore_assignments(ctx: &mut ExecContext, saved: Vec<(String, Option<String>)>) {
    for (name, old) in saved.into_iter().rev() {
        match old {
            Some(value) => {
                let _ = ctx.env.set(&name, value);
            }
            None => {
                let _ = ctx.env.unset(&name);
            }
        }
    }
}

/// Run a builtin with its output routed through the redirection plan.
async fn run_builtin(
    ctx: &mut ExecContext,
    cmd: &SimpleCommand,
    name: &str,
) -> Result<i32, ExecError> {
    // The conditional command never field-splits or globs its operands.
    let argv = if name == "[[" {
        let mut argv = Vec::with_capacity(cmd.args.len());
        for arg in &cmd.args {
            argv.push(expand::expand_word(ctx, arg).await?);
        }
        argv
    } else {
        expand::expand_words(ctx, &cmd.args).await?
    };

    let plan = redirect::prepare(ctx, &cmd.redirections).await?;
    let output = builtins::run(ctx, name, &argv).await?;
    plan.route_builtin(ctx, &output.stdout, &output.stderr, cmd.span).await?;
    Ok(output.status)
}

// ---------------------------------------------------------------------------
// External commands
// ---------------------------------------------------------------------------

/// Spawn an external command and wait for it.
async fn run_external(
    ctx: &mut ExecContext,
    cmd: &SimpleCommand,
    name: &str,
) -> Result<i32, ExecError> {
    let argv = expand::expand_words(ctx, &cmd.args).await?;

    let mut assigns = Vec::with_capacity(cmd.assignments.len());
    for assignment in &cmd.assignments {
        let value = expand::expand_word(ctx, &assignment.value).await?;
        assigns.push((assignment.name.clone(), value));
    }

    let plan = redirect::prepare(ctx, &cmd.redirections).await?;

    let cmd_span = tracing::info_span!(
        "shell.cmd",
        cmd = %name,
        args = ?argv,
        exit_code = tracing::field::Empty,
    );

    let mut process = tokio::process::Command::new(name);
    process.args(&argv);
    process.current_dir(ctx.env.cwd());
    process.env_clear();
    process.envs(ctx.env.child_env());
    for (key, value) in &assigns {
        process.env(key, value);
    }

    let capture = ctx.capture.is_some();
    let applied = plan.apply_to_command(&mut process, false, capture);

    let mut child = process
        .spawn()
        .map_err(|source| ExecError::from_spawn(name.to_string(), source, cmd.span))?;

    feed_stdin(&mut child, applied.stdin_data, name, cmd.span).await?;

    let status = wait_child(ctx, child, applied.stdout_piped, name, cmd.span).await?;
    cmd_span.record("exit_code", status);
    Ok(status)
}

/// Write heredoc data to the child's stdin pipe, closing it to signal EOF.
pub(crate) async fn feed_stdin(
    child: &mut tokio::process::Child,
    data: Option<Vec<u8>>,
    name: &str,
    span: Span,
) -> Result<(), ExecError> {
    if let Some(data) = data {
        if let Some(mut stdin) = child.stdin.take() {
            let write_result = stdin.write_all(&data).await;
            drop(stdin); // close pipe to signal EOF
            // A child that never reads its stdin is not an error
            if let Err(source) = write_result {
                if source.kind() != std::io::ErrorKind::BrokenPipe {
                    return Err(ExecError::Spawn { command: name.to_string(), source, span });
                }
            }
        }
    }
    Ok(())
}

/// Wait for a child, appending piped stdout to the capture buffer.
pub(crate) async fn wait_child(
    ctx: &mut ExecContext,
    child: tokio::process::Child,
    stdout_piped: bool,
    name: &str,
    span: Span,
) -> Result<i32, ExecError> {
    if stdout_piped {
        let output = child
            .wait_with_output()
            .await
            .map_err(|source| ExecError::Spawn { command: name.to_string(), source, span })?;
        if let Some(buffer) = &ctx.capture {
            buffer.lock().extend_from_slice(&output.stdout);
        }
        Ok(exit_code(&output.status))
    } else {
        let mut child = child;
        let status = child
            .wait()
            .await
            .map_err(|source| ExecError::Spawn { command: name.to_string(), source, span })?;
        Ok(exit_code(&status))
    }
}

/// Map an exit status to the shell convention: 128+N for death by signal N.
pub(crate) fn exit_code(status: &std::process::ExitStatus) -> i32 {
    status.code().unwrap_or_else(|| 128 + status.signal().unwrap_or(0))
}
