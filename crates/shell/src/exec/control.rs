// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Control-flow execution: groups, subshells, conditionals, loops, case,
//! and function calls.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::{
    BraceGroup, CaseCommand, Command, CommandList, ForCommand, IfCommand, LoopCommand,
    SimpleCommand, Span, Subshell,
};

use super::error::ExecError;
use super::expand;
use super::redirect::{self, RedirPlan, StdinPlan};
use super::run::{self, ExecContext};

/// Evaluate a condition list; `errexit` never triggers inside it.
async fn eval_condition(ctx: &mut ExecContext, list: &CommandList) -> Result<i32, ExecError> {
    ctx.condition_depth += 1;
    let result = run::execute_command_list(ctx, list).await;
    ctx.condition_depth -= 1;
    result
}

/// Compound-command redirections are applied to captured output, so only
/// output redirections are meaningful here.
fn ensure_output_only(plan: &RedirPlan, span: Span) -> Result<(), ExecError> {
    if matches!(plan.stdin, StdinPlan::Inherit) {
        Ok(())
    } else {
        Err(ExecError::Unsupported {
            feature: "input redirection on a compound command".to_string(),
            span,
        })
    }
}

// ---------------------------------------------------------------------------
// Subshells and brace groups
// ---------------------------------------------------------------------------

/// Execute a subshell: a cloned context, so no mutation escapes.
///
/// `exit` inside a subshell terminates the subshell only.
pub(crate) async fn execute_subshell(
    ctx: &mut ExecContext,
    subshell: &Subshell,
) -> Result<i32, ExecError> {
    if subshell.redirections.is_empty() {
        let mut sub = ctx.clone();
        return match run::execute_command_list(&mut sub, &subshell.body).await {
            Ok(status) => Ok(status),
            Err(ExecError::Exit { code }) => Ok(code),
            Err(err) => Err(err),
        };
    }

    let plan = redirect::prepare(ctx, &subshell.redirections).await?;
    ensure_output_only(&plan, subshell.span)?;

    let buffer = Arc::new(Mutex::new(Vec::new()));
    let mut sub = ctx.clone();
    sub.capture = Some(buffer.clone());

    let status = match run::execute_command_list(&mut sub, &subshell.body).await {
        Ok(status) => status,
        Err(ExecError::Exit { code }) => code,
        Err(err) => return Err(err),
    };

    let bytes = buffer.lock().clone();
    plan.route_builtin(ctx, &bytes, &[], subshell.span).await?;
    Ok(status)
}

/// Execute a brace group in the current shell context.
pub(crate) async fn execute_brace_group(
    ctx: &mut ExecContext,
    group: &BraceGroup,
) -> Result<i32, ExecError> {
    if group.redirections.is_empty() {
        return run::execute_command_list(ctx, &group.body).await;
    }

    let plan = redirect::prepare(ctx, &group.redirections).await?;
    ensure_output_only(&plan, group.span)?;

    let saved_capture = ctx.capture.clone();
    let buffer = Arc::new(Mutex::new(Vec::new()));
    ctx.capture = Some(buffer.clone());

    let result = run::execute_command_list(ctx, &group.body).await;
    ctx.capture = saved_capture;

    // Output produced before a failure still reaches the redirect target.
    let bytes = buffer.lock().clone();
    plan.route_builtin(ctx, &bytes, &[], group.span).await?;
    result
}

// ---------------------------------------------------------------------------
// Conditionals and loops
// ---------------------------------------------------------------------------

/// `if`: run the first branch whose condition succeeds; 0 if none runs.
pub(crate) async fn execute_if(ctx: &mut ExecContext, if_cmd: &IfCommand) -> Result<i32, ExecError> {
    if eval_condition(ctx, &if_cmd.cond).await? == 0 {
        return run::execute_command_list(ctx, &if_cmd.then_body).await;
    }

    for (cond, body) in &if_cmd.elifs {
        if eval_condition(ctx, cond).await? == 0 {
            return run::execute_command_list(ctx, body).await;
        }
    }

    if let Some(body) = &if_cmd.else_body {
        return run::execute_command_list(ctx, body).await;
    }

    Ok(0)
}

/// `while` / `until`: status is the last body status, 0 if the body never ran.
pub(crate) async fn execute_loop(
    ctx: &mut ExecContext,
    loop_cmd: &LoopCommand,
) -> Result<i32, ExecError> {
    let mut status = 0;

    loop {
        let cond = eval_condition(ctx, &loop_cmd.cond).await?;
        let enter = if loop_cmd.until { cond != 0 } else { cond == 0 };
        if !enter {
            break;
        }
        status = run::execute_command_list(ctx, &loop_cmd.body).await?;
    }

    Ok(status)
}

/// `for`: words are expanded and field-split before iteration.
pub(crate) async fn execute_for(
    ctx: &mut ExecContext,
    for_cmd: &ForCommand,
) -> Result<i32, ExecError> {
    let values = match &for_cmd.words {
        Some(words) => expand::expand_words(ctx, words).await?,
        None => ctx.env.positionals().to_vec(),
    };

    let mut status = 0;
    for value in values {
        ctx.env
            .set(&for_cmd.name, value)
            .map_err(|source| ExecError::Env { source, span: for_cmd.span })?;
        status = run::execute_command_list(ctx, &for_cmd.body).await?;
    }

    Ok(status)
}

/// `case`: first matching pattern wins; patterns use glob syntax, anchored.
pub(crate) async fn execute_case(
    ctx: &mut ExecContext,
    case_cmd: &CaseCommand,
) -> Result<i32, ExecError> {
    let subject = expand::expand_word(ctx, &case_cmd.subject).await?;

    for clause in &case_cmd.clauses {
        for pattern in &clause.patterns {
            let pattern = expand::expand_word(ctx, pattern).await?;
            if case_pattern_matches(&pattern, &subject) {
                return run::execute_command_list(ctx, &clause.body).await;
            }
        }
    }

    Ok(0)
}

fn case_pattern_matches(pattern: &str, subject: &str) -> bool {
    match glob::Pattern::new(pattern) {
        Ok(compiled) => compiled.matches(subject),
        // An unparsable pattern falls back to literal comparison
        Err(_) => pattern == subject,
    }
}

// ---------------------------------------------------------------------------
// Function calls
// ---------------------------------------------------------------------------

/// Call a shell function: bind `$1..` in a fresh frame, run the body, and
/// restore positionals and frame on every path.
pub(crate) async fn call_function(
    ctx: &mut ExecContext,
    cmd: &SimpleCommand,
    name: &str,
    body: Command,
) -> Result<i32, ExecError> {
    tracing::debug!(function = name, "shell.call");

    let args = expand::expand_words(ctx, &cmd.args).await?;
    let plan = redirect::prepare(ctx, &cmd.redirections).await?;
    let redirected = plan.has_redirections();
    if redirected {
        ensure_output_only(&plan, cmd.span)?;
    }

    let saved_positionals = ctx.env.positionals().to_vec();
    ctx.env.set_positionals(args);
    ctx.env.push_frame();

    let result = if redirected {
        let saved_capture = ctx.capture.clone();
        let buffer = Arc::new(Mutex::new(Vec::new()));
        ctx.capture = Some(buffer.clone());

        let result = run::execute_command(ctx, &body).await;
        ctx.capture = saved_capture;

        let bytes = buffer.lock().clone();
        match plan.route_builtin(ctx, &bytes, &[], cmd.span).await {
            Ok(()) => result,
            Err(route_err) => result.and(Err(route_err)),
        }
    } else {
        run::execute_command(ctx, &body).await
    };

    ctx.env.pop_frame();
    ctx.env.set_positionals(saved_positionals);
    result
}
