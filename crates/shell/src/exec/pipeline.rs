// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pipeline execution: spawn every stage, wire adjacent stages, wait in order.
//!
//! External stages are connected with async relay tasks that copy bytes from
//! one child's stdout to the next child's stdin. Builtin, function, and
//! compound stages run in-process against a cloned context (pipeline stages
//! never mutate the parent shell) with their output buffered and fed to the
//! next stage. All stages are started before any wait; children are reaped
//! in pipeline order.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::io::AsyncWriteExt;

use crate::{Pipeline, SimpleCommand, Span};

use super::builtins;
use super::error::ExecError;
use super::expand;
use super::redirect;
use super::run::{self, ExecContext};

/// One planned stage: a spawned child, or an already-finished in-process run.
enum Stage {
    Child {
        child: tokio::process::Child,
        name: String,
        span: Span,
        /// Stdin is the wiring pipe from the previous stage.
        stdin_wired: bool,
        /// Stdout is piped for output capture (last stage only).
        capture_stdout: bool,
    },
    Done {
        status: i32,
        output: Option<Vec<u8>>,
    },
}

pub(crate) async fn execute_pipeline(
    ctx: &mut ExecContext,
    pipeline: &Pipeline,
) -> Result<i32, ExecError> {
    // `! cmd` without pipes: plain dispatch plus inversion.
    if pipeline.stages.len() == 1 {
        let status = run::settle(run::execute_command(ctx, &pipeline.stages[0]).await)?;
        return Ok(finish(status, pipeline.negated));
    }

    let n = pipeline.stages.len();
    tracing::debug!(stages = n, "shell.pipeline");

    let mut stages: Vec<Stage> = Vec::with_capacity(n);
    let mut relay_tasks: Vec<tokio::task::JoinHandle<()>> = Vec::new();

    // Phase 1: start every stage. Externals are spawned without waiting;
    // in-process stages run immediately against a cloned context with their
    // output buffered.
    for (i, stage) in pipeline.stages.iter().enumerate() {
        let is_last = i == n - 1;
        let stdin_piped = i > 0;
        let stdout_piped = !is_last || ctx.capture.is_some();

        let capture_stdout = is_last && ctx.capture.is_some();

        let planned = match external_stage(stage) {
            Some(cmd) => {
                match spawn_stage(ctx, cmd, stdin_piped, stdout_piped, capture_stdout, &mut relay_tasks)
                    .await
                {
                    Ok(planned) => planned,
                    Err(err @ ExecError::Exit { .. }) => return Err(err),
                    Err(err) => {
                        run::report(&err);
                        Stage::Done { status: err.status(), output: None }
                    }
                }
            }
            None => {
                // In-process stage: builtin, function, or compound command.
                let buffer = Arc::new(Mutex::new(Vec::new()));
                let mut sub = ctx.clone();
                sub.capture = Some(buffer.clone());
                let status = match run::execute_command(&mut sub, stage).await {
                    Ok(status) => status,
                    Err(ExecError::Exit { code }) => code,
                    Err(err) => {
                        run::report(&err);
                        err.status()
                    }
                };
                let output = buffer.lock().clone();
                Stage::Done { status, output: Some(output) }
            }
        };
        stages.push(planned);
    }

    // Phase 2: wire adjacent stages.
    for i in 0..n - 1 {
        enum Source {
            Pipe(tokio::process::ChildStdout),
            Bytes(Vec<u8>),
        }

        let source = match &mut stages[i] {
            Stage::Child { child, .. } => child.stdout.take().map(Source::Pipe),
            Stage::Done { output, .. } => output.take().map(Source::Bytes),
        };
        let sink = match &mut stages[i + 1] {
            Stage::Child { child, stdin_wired: true, .. } => child.stdin.take(),
            _ => None,
        };

        match (source, sink) {
            (Some(Source::Pipe(mut reader)), Some(mut writer)) => {
                relay_tasks.push(tokio::spawn(async move {
                    let _ = tokio::io::copy(&mut reader, &mut writer).await;
                }));
            }
            (Some(Source::Bytes(bytes)), Some(mut writer)) => {
                relay_tasks.push(tokio::spawn(async move {
                    let _ = writer.write_all(&bytes).await;
                }));
            }
            (Some(Source::Pipe(mut reader)), None) => {
                // Next stage does not read the wiring pipe; drain so the
                // writer never blocks.
                relay_tasks.push(tokio::spawn(async move {
                    let _ = tokio::io::copy(&mut reader, &mut tokio::io::sink()).await;
                }));
            }
            // Dropping an unused stdin handle gives the next stage EOF.
            _ => {}
        }
    }

    // Phase 3: reap in pipeline order.
    let mut statuses = Vec::with_capacity(n);
    for (i, stage) in stages.into_iter().enumerate() {
        match stage {
            Stage::Child { child, name, span, capture_stdout, .. } => {
                let status =
                    match run::wait_child(ctx, child, capture_stdout, &name, span).await {
                        Ok(status) => status,
                        Err(err) => {
                            run::report(&err);
                            err.status()
                        }
                    };
                statuses.push(status);
            }
            Stage::Done { status, output } => {
                if i == n - 1 {
                    if let Some(bytes) = output {
                        let _ = ctx.write_stdout(&bytes);
                    }
                }
                statuses.push(status);
            }
        }
    }

    for task in relay_tasks {
        let _ = task.await;
    }

    let mut status = statuses.last().copied().unwrap_or(0);
    if ctx.env.options.pipefail {
        status = statuses.iter().rev().find(|s| **s != 0).copied().unwrap_or(0);
    }

    Ok(finish(status, pipeline.negated))
}

/// A stage runs as an external process when it is a simple command whose
/// name does not resolve to a function or builtin.
///
/// Resolution uses the bare command word: a name produced by expansion is
/// treated as external (functions and builtins are addressed literally).
fn external_stage(stage: &crate::Command) -> Option<&SimpleCommand> {
    let crate::Command::Simple(cmd) = stage else {
        return None;
    };
    let name = cmd.name.as_bare_literal()?;
    if builtins::is_builtin(name) {
        return None;
    }
    Some(cmd)
}

async fn spawn_stage(
    ctx: &mut ExecContext,
    cmd: &SimpleCommand,
    stdin_piped: bool,
    stdout_piped: bool,
    capture_stdout: bool,
    relay_tasks: &mut Vec<tokio::task::JoinHandle<()>>,
) -> Result<Stage, ExecError> {
    let name = expand::expand_word(ctx, &cmd.name).await?;
    if ctx.env.function(&name).is_some() {
        // The bare word named a function after all; run it in-process.
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let mut sub = ctx.clone();
        sub.capture = Some(buffer.clone());
        let status = match run::execute_simple(&mut sub, cmd).await {
            Ok(status) => status,
            Err(ExecError::Exit { code }) => code,
            Err(err) => {
                run::report(&err);
                err.status()
            }
        };
        let output = buffer.lock().clone();
        return Ok(Stage::Done { status, output: Some(output) });
    }

    let argv = expand::expand_words(ctx, &cmd.args).await?;

    let mut assigns = Vec::with_capacity(cmd.assignments.len());
    for assignment in &cmd.assignments {
        let value = expand::expand_word(ctx, &assignment.value).await?;
        assigns.push((assignment.name.clone(), value));
    }

    let plan = redirect::prepare(ctx, &cmd.redirections).await?;

    let mut process = tokio::process::Command::new(&name);
    process.args(&argv);
    process.current_dir(ctx.env.cwd());
    process.env_clear();
    process.envs(ctx.env.child_env());
    for (key, value) in &assigns {
        process.env(key, value);
    }

    let applied = plan.apply_to_command(&mut process, stdin_piped, stdout_piped);

    let mut child = process
        .spawn()
        .map_err(|source| ExecError::from_spawn(name.clone(), source, cmd.span))?;

    // Here-document data is written from a task so a large body cannot
    // stall the remaining spawns.
    if let Some(data) = applied.stdin_data {
        if let Some(mut stdin) = child.stdin.take() {
            relay_tasks.push(tokio::spawn(async move {
                let _ = stdin.write_all(&data).await;
            }));
        }
    }

    Ok(Stage::Child {
        child,
        name,
        span: cmd.span,
        stdin_wired: applied.stdin_wired,
        capture_stdout: applied.stdout_piped && capture_stdout,
    })
}

fn finish(status: i32, negated: bool) -> i32 {
    if negated {
        i32::from(status == 0)
    } else {
        status
    }
}
