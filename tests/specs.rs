// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! End-to-end specs driving the compiled `zish` binary.

#[path = "specs/prelude.rs"]
mod prelude;

#[path = "specs/invocation.rs"]
mod invocation;
#[path = "specs/scenarios.rs"]
mod scenarios;
