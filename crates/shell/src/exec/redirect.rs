// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Redirection planning for file I/O, here-documents, and fd duplication.
//!
//! Redirections are resolved into a [`RedirPlan`] before anything runs: all
//! target words are expanded and all files opened up front, so an open
//! failure aborts the command before it has side effects. The plan is then
//! applied to a child process's stdio or used to route a builtin's output.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::{DupTarget, Redirection, Span};

use super::error::ExecError;
use super::expand;
use super::run::ExecContext;

/// Per-stream configuration accumulated while walking the redirection list.
///
/// Later redirections of the same descriptor override earlier ones; fd
/// duplication (`2>&1`) copies the current configuration of the source.
#[derive(Clone)]
enum IoConfig {
    /// Whatever the caller's default is (inherit, or a pipe).
    Default,
    File { path: String, append: bool, span: Span },
    /// `>&-` — the stream is closed; /dev/null stands in.
    Null,
    /// Here-document data fed through a pipe (stdin only).
    Data,
}

pub(crate) enum StdinPlan {
    Inherit,
    File(File),
    Null,
    Data(Vec<u8>),
}

pub(crate) enum OutPlan {
    Inherit,
    File(File),
    Null,
}

/// A fully resolved set of redirections with files already open.
pub(crate) struct RedirPlan {
    pub(crate) stdin: StdinPlan,
    pub(crate) stdout: OutPlan,
    pub(crate) stderr: OutPlan,
}

/// What applying a plan did to a child's stdio.
pub(crate) struct AppliedStdio {
    /// Here-document bytes to write to the child's stdin after spawning.
    pub(crate) stdin_data: Option<Vec<u8>>,
    /// Stdin is the wiring pipe from the previous pipeline stage.
    pub(crate) stdin_wired: bool,
    /// Stdout ended up piped (for capture or pipeline wiring).
    pub(crate) stdout_piped: bool,
}

impl RedirPlan {
    pub(crate) fn has_redirections(&self) -> bool {
        !matches!(
            (&self.stdin, &self.stdout, &self.stderr),
            (StdinPlan::Inherit, OutPlan::Inherit, OutPlan::Inherit)
        )
    }

    /// Apply the plan to a child process.
    ///
    /// `stdin_piped` / `stdout_piped` are the caller's defaults (pipeline
    /// wiring or output capture); explicit redirections override them.
    pub(crate) fn apply_to_command(
        self,
        cmd: &mut tokio::process::Command,
        stdin_piped: bool,
        stdout_piped: bool,
    ) -> AppliedStdio {
        let mut applied =
            AppliedStdio { stdin_data: None, stdin_wired: false, stdout_piped: false };

        match self.stdin {
            StdinPlan::Inherit => {
                if stdin_piped {
                    cmd.stdin(std::process::Stdio::piped());
                    applied.stdin_wired = true;
                }
            }
            StdinPlan::File(file) => {
                cmd.stdin(std::process::Stdio::from(file));
            }
            StdinPlan::Null => {
                cmd.stdin(std::process::Stdio::null());
            }
            StdinPlan::Data(data) => {
                cmd.stdin(std::process::Stdio::piped());
                applied.stdin_data = Some(data);
            }
        }

        match self.stdout {
            OutPlan::Inherit => {
                if stdout_piped {
                    cmd.stdout(std::process::Stdio::piped());
                    applied.stdout_piped = true;
                }
            }
            OutPlan::File(file) => {
                cmd.stdout(std::process::Stdio::from(file));
            }
            OutPlan::Null => {
                cmd.stdout(std::process::Stdio::null());
            }
        }

        match self.stderr {
            OutPlan::Inherit => {}
            OutPlan::File(file) => {
                cmd.stderr(std::process::Stdio::from(file));
            }
            OutPlan::Null => {
                cmd.stderr(std::process::Stdio::null());
            }
        }

        applied
    }

    /// Route a builtin's collected output through the plan.
    pub(crate) async fn route_builtin(
        self,
        ctx: &mut ExecContext,
        stdout: &[u8],
        stderr: &[u8],
        span: Span,
    ) -> Result<(), ExecError> {
        match self.stdout {
            OutPlan::Inherit => ctx.write_stdout(stdout).map_err(|source| {
                ExecError::Redirect { message: "cannot write output".to_string(), source, span }
            })?,
            OutPlan::File(mut file) => {
                file.write_all(stdout).map_err(|source| ExecError::Redirect {
                    message: "cannot write redirected output".to_string(),
                    source,
                    span,
                })?;
            }
            OutPlan::Null => {}
        }

        match self.stderr {
            OutPlan::Inherit => {
                let mut err = std::io::stderr().lock();
                let _ = err.write_all(stderr);
            }
            OutPlan::File(mut file) => {
                file.write_all(stderr).map_err(|source| ExecError::Redirect {
                    message: "cannot write redirected output".to_string(),
                    source,
                    span,
                })?;
            }
            OutPlan::Null => {}
        }

        Ok(())
    }
}

/// Resolve a redirection list into an open-file plan.
pub(crate) async fn prepare(
    ctx: &mut ExecContext,
    redirections: &[Redirection],
) -> Result<RedirPlan, ExecError> {
    let mut stdin_cfg = IoConfig::Default;
    let mut stdout_cfg = IoConfig::Default;
    let mut stderr_cfg = IoConfig::Default;
    let mut stdin_data: Option<Vec<u8>> = None;

    for redir in redirections {
        match redir {
            Redirection::Out { fd, target, append } => {
                let path = expand::expand_word(ctx, target).await?;
                let cfg = IoConfig::File { path, append: *append, span: target.span };
                match fd.unwrap_or(1) {
                    1 => stdout_cfg = cfg,
                    2 => stderr_cfg = cfg,
                    other => {
                        return Err(ExecError::Unsupported {
                            feature: format!("redirection to fd {other}"),
                            span: target.span,
                        });
                    }
                }
            }

            Redirection::In { fd, source } => {
                let path = expand::expand_word(ctx, source).await?;
                match fd.unwrap_or(0) {
                    0 => {
                        stdin_cfg = IoConfig::File { path, append: false, span: source.span };
                        stdin_data = None; // file overrides heredoc
                    }
                    other => {
                        return Err(ExecError::Unsupported {
                            feature: format!("input redirection to fd {other}"),
                            span: source.span,
                        });
                    }
                }
            }

            Redirection::HereDoc { body, strip_tabs, quoted, .. } => {
                // Tab stripping first if <<-
                let stripped = if *strip_tabs {
                    body.lines()
                        .map(|line| line.strip_prefix('\t').unwrap_or(line))
                        .collect::<Vec<_>>()
                        .join("\n")
                } else {
                    body.clone()
                };

                // Expand variables only if the delimiter was unquoted
                let content = if *quoted {
                    stripped
                } else {
                    expand::expand_text(ctx, &stripped).await?
                };

                stdin_cfg = IoConfig::Data;
                stdin_data = Some(content.into_bytes());
            }

            Redirection::Both { append, target } => {
                let path = expand::expand_word(ctx, target).await?;
                let cfg = IoConfig::File { path, append: *append, span: target.span };
                stdout_cfg = cfg.clone();
                stderr_cfg = cfg;
            }

            Redirection::Duplicate { source, target, output } => match target {
                DupTarget::Close => {
                    let null = IoConfig::Null;
                    match source {
                        0 => stdin_cfg = null,
                        1 => stdout_cfg = null,
                        2 => stderr_cfg = null,
                        _ => {}
                    }
                }
                DupTarget::Fd(dest_fd) => {
                    // Copy the current config of dest_fd to source.
                    // e.g. `2>&1` copies stdout config → stderr.
                    let src_config = match dest_fd {
                        0 => stdin_cfg.clone(),
                        1 => stdout_cfg.clone(),
                        2 => stderr_cfg.clone(),
                        _ => IoConfig::Default,
                    };
                    if *output {
                        match source {
                            1 => stdout_cfg = src_config,
                            2 => stderr_cfg = src_config,
                            _ => {}
                        }
                    } else if *source == 0 {
                        stdin_cfg = src_config;
                    }
                }
            },
        }
    }

    let cwd = ctx.env.cwd().to_path_buf();

    let stdin = match stdin_cfg {
        IoConfig::Default => StdinPlan::Inherit,
        IoConfig::File { path, span, .. } => StdinPlan::File(open_read(&path, &cwd, span)?),
        IoConfig::Null => StdinPlan::Null,
        IoConfig::Data => StdinPlan::Data(stdin_data.unwrap_or_default()),
    };

    // `&>` sends stdout and stderr to the same file. The file must be opened
    // once and the handle cloned; a second open with truncate would erase
    // the first stream's writes.
    let (stdout, stderr) = match (stdout_cfg, stderr_cfg) {
        (
            IoConfig::File { path: path1, append: append1, span },
            IoConfig::File { path: path2, append: append2, .. },
        ) if path1 == path2 && append1 == append2 => {
            let file = open_write(&path1, append1, &cwd, span)?;
            let clone = file.try_clone().map_err(|source| ExecError::Redirect {
                message: format!("cannot clone file handle for '{path1}'"),
                source,
                span,
            })?;
            (OutPlan::File(file), OutPlan::File(clone))
        }
        (out_cfg, err_cfg) => (open_out(out_cfg, &cwd)?, open_out(err_cfg, &cwd)?),
    };

    Ok(RedirPlan { stdin, stdout, stderr })
}

fn open_out(cfg: IoConfig, cwd: &Path) -> Result<OutPlan, ExecError> {
    Ok(match cfg {
        IoConfig::Default => OutPlan::Inherit,
        IoConfig::File { path, append, span } => OutPlan::File(open_write(&path, append, cwd, span)?),
        IoConfig::Null => OutPlan::Null,
        // Data is only meaningful for stdin
        IoConfig::Data => OutPlan::Inherit,
    })
}

/// Resolve a path relative to cwd if it's not absolute.
fn resolve_path(path: &str, cwd: &Path) -> PathBuf {
    let p = Path::new(path);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        cwd.join(p)
    }
}

fn open_read(path: &str, cwd: &Path, span: Span) -> Result<File, ExecError> {
    let resolved = resolve_path(path, cwd);
    File::open(&resolved).map_err(|source| ExecError::Redirect {
        message: format!("cannot open '{path}' for reading"),
        source,
        span,
    })
}

fn open_write(path: &str, append: bool, cwd: &Path, span: Span) -> Result<File, ExecError> {
    let resolved = resolve_path(path, cwd);
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(!append)
        .append(append)
        .open(&resolved)
        .map_err(|source| ExecError::Redirect {
            message: format!(
                "cannot open '{path}' for {}",
                if append { "appending" } else { "writing" }
            ),
            source,
            span,
        })
}
