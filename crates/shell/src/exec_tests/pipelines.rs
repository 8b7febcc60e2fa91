// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pipeline execution: wiring, statuses, negation, pipefail.

use super::{capture, run_async};

#[tokio::test]
async fn builtin_feeds_external() {
    let (status, out) = capture("echo hi | cat").await;
    assert_eq!(status, 0);
    assert_eq!(out, "hi\n");
}

#[tokio::test]
async fn external_to_external() {
    let (_, out) = capture("printf 'b\\na\\n' | sort").await;
    assert_eq!(out, "a\nb\n");
}

#[tokio::test]
async fn three_stage_composition() {
    let (_, out) = capture("printf 'b\\na\\nb\\n' | sort | uniq").await;
    assert_eq!(out, "a\nb\n");
}

#[tokio::test]
async fn external_feeds_external_feeds_builtin_capture() {
    let (_, out) = capture("printf 'x\\ny\\n' | wc -l | tr -d ' '").await;
    assert_eq!(out.trim(), "2");
}

#[yare::parameterized(
    last_stage_wins_failure = { "true | false", 1 },
    last_stage_wins_success = { "false | true", 0 },
    negated_success = { "! true | cat", 1 },
    negated_failure = { "! false", 0 },
)]
fn pipeline_status(script: &str, expected: i32) {
    run_async(async {
        let (status, _) = capture(script).await;
        assert_eq!(status, expected, "script: {script}");
    });
}

#[tokio::test]
async fn pipefail_reports_rightmost_failure() {
    let (status, _) = capture("set -o pipefail; false | true").await;
    assert_eq!(status, 1);
}

#[tokio::test]
async fn pipefail_off_by_default() {
    let (status, _) = capture("false | true").await;
    assert_eq!(status, 0);
}

#[tokio::test]
async fn stage_variables_do_not_escape() {
    let (_, out) = capture("x=old; x=new | cat; echo $x").await;
    assert_eq!(out, "old\n");
}

#[tokio::test]
async fn exit_in_a_stage_is_confined() {
    let (_, out) = capture("exit 9 | true; echo alive").await;
    assert_eq!(out, "alive\n");
}

#[tokio::test]
async fn compound_stage_output_flows_on() {
    let (_, out) = capture("{ echo a; echo b; } | sort -r").await;
    assert_eq!(out, "b\na\n");
}

#[tokio::test]
async fn subshell_stage() {
    let (_, out) = capture("(echo s) | cat").await;
    assert_eq!(out, "s\n");
}

#[tokio::test]
async fn failed_stage_does_not_stall_the_rest() {
    // The missing command settles to 127; the last stage still decides
    let (status, out) = capture("no-such-cmd-zz | cat; echo done").await;
    assert_eq!(status, 0);
    assert_eq!(out, "done\n");
}

#[tokio::test]
async fn heredoc_into_pipeline_stage() {
    let (_, out) = capture("cat <<EOF | tr a-z A-Z\nshout\nEOF").await;
    assert_eq!(out, "SHOUT\n");
}

#[tokio::test]
async fn large_stream_does_not_deadlock() {
    // Bigger than any pipe buffer, relayed across two stages
    let (_, out) = capture("head -c 200000 /dev/zero | wc -c | tr -d ' '").await;
    assert_eq!(out.trim(), "200000");
}
