// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers for binary specs.

use assert_cmd::Command;

/// A fresh `zish` invocation.
pub fn zish() -> Command {
    Command::cargo_bin("zish").expect("zish binary builds")
}

/// Run a script via `zish -c` and return the assertion handle.
pub fn run(script: &str) -> assert_cmd::assert::Assert {
    zish().arg("-c").arg(script).assert()
}
