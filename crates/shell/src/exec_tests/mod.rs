// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for the shell executor.

use super::*;

mod basic;
mod builtins_cases;
mod control_flow;
mod errors;
mod expansion;
mod functions;
mod pipelines;
mod redirections;
mod variables;

/// Create a default executor for tests.
pub(crate) fn executor() -> ShellExecutor {
    ShellExecutor::new()
}

/// Run a script with captured stdout, returning (status, stdout).
pub(crate) async fn capture(script: &str) -> (i32, String) {
    executor().execute_source_captured(script).await.unwrap()
}

/// Sync wrapper for async execution in parameterized tests.
pub(crate) fn run_async<F: std::future::Future>(f: F) -> F::Output {
    tokio::runtime::Runtime::new().unwrap().block_on(f)
}
