// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The zish binary: interactive REPL, `-c` strings, and script execution.

mod repl;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use zish_shell::{Env, ExecError, ShellExecutor};

#[derive(Parser, Debug)]
#[command(name = "zish", disable_version_flag = true, about = "A POSIX-flavored interactive shell")]
struct Cli {
    /// Execute the given command string and exit with its status
    #[arg(short = 'c', value_name = "COMMAND")]
    command: Option<String>,

    /// Print version information and exit
    #[arg(short = 'v', long = "version")]
    version: bool,

    /// Script to execute (bound to $0); without one, run interactively
    script: Option<PathBuf>,

    /// Arguments bound to $1..
    #[arg(trailing_var_arg = true)]
    args: Vec<String>,
}

#[tokio::main]
async fn main() {
    let code = run().await.unwrap_or_else(|err| {
        eprintln!("zish: {err:#}");
        1
    });
    std::process::exit(code);
}

async fn run() -> anyhow::Result<i32> {
    init_tracing();

    // Registering interest in SIGPIPE replaces its fatal default
    // disposition for the shell process; children exec with the default.
    let _sigpipe = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::pipe());

    let cli = Cli::parse();

    if cli.version {
        println!("zish {}", env!("CARGO_PKG_VERSION"));
        return Ok(0);
    }

    let mut env = Env::from_process();
    bump_shlvl(&mut env);

    if let Some(command) = cli.command {
        let arg0 = cli
            .script
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "zish".to_string());
        let mut executor =
            ShellExecutor::with_env(env).arg0(arg0).positionals(cli.args);
        return Ok(run_source(&mut executor, &command).await);
    }

    if let Some(script) = cli.script {
        let source = std::fs::read_to_string(&script)
            .with_context(|| format!("cannot read {}", script.display()))?;
        let mut executor = ShellExecutor::with_env(env)
            .arg0(script.display().to_string())
            .positionals(cli.args);
        return Ok(run_source(&mut executor, &source).await);
    }

    repl::run(env).await
}

/// Execute a whole source string, mapping errors to exit codes:
/// syntax errors exit 2, `exit` carries its own code.
async fn run_source(executor: &mut ShellExecutor, source: &str) -> i32 {
    match executor.execute_source(source).await {
        Ok(status) => status,
        Err(ExecError::Exit { code }) => code,
        Err(ExecError::Parse(err)) => {
            match err.diagnostic(source) {
                Some(diagnostic) => eprintln!("zish: {diagnostic}"),
                None => eprintln!("zish: {err}"),
            }
            2
        }
        Err(err) => {
            eprintln!("zish: {err}");
            err.status()
        }
    }
}

/// Each shell level increments `SHLVL` for its children.
fn bump_shlvl(env: &mut Env) {
    let level = env.get("SHLVL").and_then(|v| v.parse::<i64>().ok()).unwrap_or(0) + 1;
    let _ = env.export("SHLVL", Some(level.to_string()));
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env("ZISH_LOG").unwrap_or_else(|_| EnvFilter::new("off"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
