// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Interactive read-eval loop.
//!
//! Reads lines from stdin with a PS1 prompt, accumulating continuation
//! lines (PS2) while the input is syntactically incomplete — unclosed
//! quotes, pending here-documents, or a dangling `&&`. Ctrl-C abandons the
//! line being assembled; EOF ends the session with the last status.

use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader};

use zish_shell::{Env, ExecError, ShellExecutor};

pub async fn run(env: Env) -> anyhow::Result<i32> {
    let mut executor = ShellExecutor::with_env(env).interactive(true).arg0("zish");

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();
    let mut buffer = String::new();

    loop {
        prompt(&executor, buffer.is_empty())?;

        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => {
                // Abandon the current line
                println!();
                buffer.clear();
                continue;
            }
        };

        let Some(line) = line else {
            // EOF terminates the session
            println!();
            return Ok(executor.env().last_status);
        };

        if buffer.is_empty() && line.trim().is_empty() {
            continue;
        }
        if !buffer.is_empty() {
            buffer.push('\n');
        }
        buffer.push_str(&line);

        // More input may still complete the construct
        if let Err(err) = executor.parse_line(&buffer) {
            if err.is_incomplete() {
                continue;
            }
        }

        let source = std::mem::take(&mut buffer);
        match executor.execute_source(&source).await {
            Ok(_) => {}
            Err(ExecError::Exit { code }) => return Ok(code),
            Err(ExecError::Parse(err)) => {
                match err.diagnostic(&source) {
                    Some(diagnostic) => eprintln!("zish: {diagnostic}"),
                    None => eprintln!("zish: {err}"),
                }
                executor.env_mut().last_status = 2;
            }
            Err(err) => {
                eprintln!("zish: {err}");
                executor.env_mut().last_status = err.status();
            }
        }
    }
}

fn prompt(executor: &ShellExecutor, primary: bool) -> std::io::Result<()> {
    let text = if primary {
        executor.env().get("PS1").map(String::from).unwrap_or_else(|| "zish$ ".to_string())
    } else {
        executor.env().get("PS2").map(String::from).unwrap_or_else(|| "> ".to_string())
    };

    let mut out = std::io::stdout().lock();
    out.write_all(text.as_bytes())?;
    out.flush()
}
