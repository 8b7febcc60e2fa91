// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Builtin commands, run in the shell's own process.
//!
//! A builtin produces its stdout and stderr as buffers; the executor routes
//! them through the command's redirections (or the active capture).

mod test_expr;

use std::fmt::Write as _;
use std::path::PathBuf;

use crate::token::is_valid_variable_name;

use super::error::ExecError;
use super::run::ExecContext;

pub(crate) struct BuiltinOutput {
    pub(crate) status: i32,
    pub(crate) stdout: Vec<u8>,
    pub(crate) stderr: Vec<u8>,
}

impl BuiltinOutput {
    fn ok() -> Self {
        Self::with_status(0)
    }

    fn with_status(status: i32) -> Self {
        BuiltinOutput { status, stdout: Vec::new(), stderr: Vec::new() }
    }

    fn out(text: String) -> Self {
        BuiltinOutput { status: 0, stdout: text.into_bytes(), stderr: Vec::new() }
    }

    fn fail(builtin: &str, message: impl std::fmt::Display, status: i32) -> Self {
        BuiltinOutput {
            status,
            stdout: Vec::new(),
            stderr: format!("zish: {builtin}: {message}\n").into_bytes(),
        }
    }
}

pub(crate) fn is_builtin(name: &str) -> bool {
    matches!(
        name,
        ":" | "true"
            | "false"
            | "echo"
            | "pwd"
            | "cd"
            | "exit"
            | "export"
            | "readonly"
            | "unset"
            | "alias"
            | "unalias"
            | "set"
            | "local"
            | "test"
            | "["
            | "[["
    )
}

pub(crate) async fn run(
    ctx: &mut ExecContext,
    name: &str,
    argv: &[String],
) -> Result<BuiltinOutput, ExecError> {
    Ok(match name {
        ":" | "true" => BuiltinOutput::ok(),
        "false" => BuiltinOutput::with_status(1),
        "echo" => echo(argv),
        "pwd" => BuiltinOutput::out(format!("{}\n", ctx.env.cwd().display())),
        "cd" => cd(ctx, argv),
        "exit" => return exit(ctx, argv),
        "export" => export(ctx, argv),
        "readonly" => readonly(ctx, argv),
        "unset" => unset(ctx, argv),
        "alias" => alias(ctx, argv),
        "unalias" => unalias(ctx, argv),
        "set" => set(ctx, argv),
        "local" => local(ctx, argv),
        "test" | "[" => test_builtin(ctx, name, argv),
        "[[" => cond_builtin(ctx, argv),
        _ => unreachable!("is_builtin gates dispatch"),
    })
}

// ---------------------------------------------------------------------------
// Trivial builtins
// ---------------------------------------------------------------------------

fn echo(argv: &[String]) -> BuiltinOutput {
    let (suppress_newline, args) = match argv.first().map(String::as_str) {
        Some("-n") => (true, &argv[1..]),
        _ => (false, argv),
    };
    let mut text = args.join(" ");
    if !suppress_newline {
        text.push('\n');
    }
    BuiltinOutput::out(text)
}

// ---------------------------------------------------------------------------
// cd
// ---------------------------------------------------------------------------

fn cd(ctx: &mut ExecContext, argv: &[String]) -> BuiltinOutput {
    if argv.len() > 1 {
        return BuiltinOutput::fail("cd", "too many arguments", 1);
    }

    let (target, print_destination) = match argv.first().map(String::as_str) {
        None => match ctx.env.get("HOME") {
            Some(home) => (PathBuf::from(home), false),
            None => return BuiltinOutput::fail("cd", "HOME not set", 1),
        },
        // `cd -` swaps with $OLDPWD and prints the new directory
        Some("-") => match ctx.env.get("OLDPWD") {
            Some(oldpwd) => (PathBuf::from(oldpwd), true),
            None => return BuiltinOutput::fail("cd", "OLDPWD not set", 1),
        },
        Some(dir) => (PathBuf::from(dir), false),
    };

    let resolved =
        if target.is_absolute() { target.clone() } else { ctx.env.cwd().join(&target) };

    match std::fs::canonicalize(&resolved) {
        Ok(path) if path.is_dir() => {
            ctx.env.set_cwd(path.clone());
            if print_destination {
                BuiltinOutput::out(format!("{}\n", path.display()))
            } else {
                BuiltinOutput::ok()
            }
        }
        Ok(_) => BuiltinOutput::fail("cd", format!("{}: not a directory", target.display()), 1),
        Err(source) => {
            BuiltinOutput::fail("cd", format!("{}: {source}", target.display()), 1)
        }
    }
}

// ---------------------------------------------------------------------------
// exit
// ---------------------------------------------------------------------------

fn exit(ctx: &ExecContext, argv: &[String]) -> Result<BuiltinOutput, ExecError> {
    let code = match argv.first() {
        None => ctx.env.last_status,
        Some(arg) => match arg.parse::<i32>() {
            Ok(code) => code,
            Err(_) => {
                eprintln!("zish: exit: {arg}: numeric argument required");
                2
            }
        },
    };
    Err(ExecError::Exit { code })
}

// ---------------------------------------------------------------------------
// Variable builtins
// ---------------------------------------------------------------------------

fn export(ctx: &mut ExecContext, argv: &[String]) -> BuiltinOutput {
    if argv.is_empty() {
        let mut exported: Vec<_> = ctx.env.child_env().into_iter().collect();
        exported.sort();
        let mut text = String::new();
        for (name, value) in exported {
            let _ = writeln!(text, "export {name}='{value}'");
        }
        return BuiltinOutput::out(text);
    }

    let mut out = BuiltinOutput::ok();
    for arg in argv {
        let (name, value) = match arg.find('=') {
            Some(pos) => (&arg[..pos], Some(arg[pos + 1..].to_string())),
            None => (arg.as_str(), None),
        };
        if !is_valid_variable_name(name) {
            append_fail(&mut out, "export", format!("{arg}: not a valid identifier"), 1);
            continue;
        }
        if let Err(err) = ctx.env.export(name, value) {
            append_fail(&mut out, "export", err, 1);
        }
    }
    out
}

fn readonly(ctx: &mut ExecContext, argv: &[String]) -> BuiltinOutput {
    let mut out = BuiltinOutput::ok();
    for arg in argv {
        let (name, value) = match arg.find('=') {
            Some(pos) => (&arg[..pos], Some(arg[pos + 1..].to_string())),
            None => (arg.as_str(), None),
        };
        if !is_valid_variable_name(name) {
            append_fail(&mut out, "readonly", format!("{arg}: not a valid identifier"), 1);
            continue;
        }
        if let Err(err) = ctx.env.mark_readonly(name, value) {
            append_fail(&mut out, "readonly", err, 1);
        }
    }
    out
}

fn unset(ctx: &mut ExecContext, argv: &[String]) -> BuiltinOutput {
    let (remove_functions, names) = match argv.first().map(String::as_str) {
        Some("-f") => (true, &argv[1..]),
        _ => (false, argv),
    };

    let mut out = BuiltinOutput::ok();
    for name in names {
        if remove_functions {
            ctx.env.remove_function(name);
        } else if let Err(err) = ctx.env.unset(name) {
            append_fail(&mut out, "unset", err, 1);
        }
    }
    out
}

fn local(ctx: &mut ExecContext, argv: &[String]) -> BuiltinOutput {
    if !ctx.env.in_function() {
        return BuiltinOutput::fail("local", "can only be used in a function", 1);
    }

    let mut out = BuiltinOutput::ok();
    for arg in argv {
        let (name, value) = match arg.find('=') {
            Some(pos) => (&arg[..pos], arg[pos + 1..].to_string()),
            None => (arg.as_str(), String::new()),
        };
        if !is_valid_variable_name(name) {
            append_fail(&mut out, "local", format!("{arg}: not a valid identifier"), 1);
            continue;
        }
        if let Err(err) = ctx.env.declare_local(name, value) {
            append_fail(&mut out, "local", err, 1);
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Aliases
// ---------------------------------------------------------------------------

fn alias(ctx: &mut ExecContext, argv: &[String]) -> BuiltinOutput {
    if argv.is_empty() {
        let mut text = String::new();
        for (name, value) in ctx.env.aliases_sorted() {
            let _ = writeln!(text, "alias {name}='{value}'");
        }
        return BuiltinOutput::out(text);
    }

    let mut out = BuiltinOutput::ok();
    for arg in argv {
        match arg.find('=') {
            Some(pos) => {
                ctx.env.set_alias(&arg[..pos], &arg[pos + 1..]);
            }
            None => match ctx.env.alias(arg) {
                Some(value) => {
                    let _ = writeln!(text_of(&mut out), "alias {arg}='{value}'");
                }
                None => append_fail(&mut out, "alias", format!("{arg}: not found"), 1),
            },
        }
    }
    out
}

fn unalias(ctx: &mut ExecContext, argv: &[String]) -> BuiltinOutput {
    let mut out = BuiltinOutput::ok();
    for name in argv {
        if !ctx.env.remove_alias(name) {
            append_fail(&mut out, "unalias", format!("{name}: not found"), 1);
        }
    }
    out
}

// ---------------------------------------------------------------------------
// set
// ---------------------------------------------------------------------------

fn set(ctx: &mut ExecContext, argv: &[String]) -> BuiltinOutput {
    if argv.is_empty() {
        let options = ctx.env.options;
        return BuiltinOutput::out(format!(
            "errexit\t{}\npipefail\t{}\n",
            on_off(options.errexit),
            on_off(options.pipefail),
        ));
    }

    let mut out = BuiltinOutput::ok();
    let mut i = 0;
    while i < argv.len() {
        match argv[i].as_str() {
            "--" => {
                ctx.env.set_positionals(argv[i + 1..].to_vec());
                return out;
            }
            "-e" => ctx.env.options.errexit = true,
            "+e" => ctx.env.options.errexit = false,
            "-o" | "+o" => {
                let enable = argv[i] == "-o";
                i += 1;
                let Some(name) = argv.get(i) else {
                    append_fail(&mut out, "set", "option name required after -o", 2);
                    return out;
                };
                match ctx.env.options.by_name(name) {
                    Some(slot) => *slot = enable,
                    None => {
                        append_fail(&mut out, "set", format!("{name}: invalid option name"), 1);
                    }
                }
            }
            arg if arg.starts_with('-') || arg.starts_with('+') => {
                append_fail(&mut out, "set", format!("{arg}: invalid option"), 2);
                return out;
            }
            _ => {
                // First non-option argument: the rest rewrite $1..
                ctx.env.set_positionals(argv[i..].to_vec());
                return out;
            }
        }
        i += 1;
    }
    out
}

fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}

// ---------------------------------------------------------------------------
// test / [ / [[
// ---------------------------------------------------------------------------

fn test_builtin(ctx: &ExecContext, name: &str, argv: &[String]) -> BuiltinOutput {
    let args = if name == "[" {
        match argv.last().map(String::as_str) {
            Some("]") => &argv[..argv.len() - 1],
            _ => return BuiltinOutput::fail("[", "missing ']'", 2),
        }
    } else {
        argv
    };

    match test_expr::eval(args, false, ctx.env.cwd()) {
        Ok(true) => BuiltinOutput::ok(),
        Ok(false) => BuiltinOutput::with_status(1),
        Err(message) => BuiltinOutput::fail(name, message, 2),
    }
}

fn cond_builtin(ctx: &ExecContext, argv: &[String]) -> BuiltinOutput {
    match test_expr::eval(argv, true, ctx.env.cwd()) {
        Ok(true) => BuiltinOutput::ok(),
        Ok(false) => BuiltinOutput::with_status(1),
        Err(message) => BuiltinOutput::fail("[[", message, 2),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn append_fail(out: &mut BuiltinOutput, builtin: &str, message: impl std::fmt::Display, status: i32) {
    let failure = BuiltinOutput::fail(builtin, message, status);
    out.stderr.extend_from_slice(&failure.stderr);
    out.status = failure.status;
}

fn text_of(out: &mut BuiltinOutput) -> StdoutWriter<'_> {
    StdoutWriter(&mut out.stdout)
}

/// `fmt::Write` adapter over the builtin's stdout buffer.
struct StdoutWriter<'a>(&'a mut Vec<u8>);

impl std::fmt::Write for StdoutWriter<'_> {
    fn write_str(&mut self, s: &str) -> std::fmt::Result {
        self.0.extend_from_slice(s.as_bytes());
        Ok(())
    }
}
