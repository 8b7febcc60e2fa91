// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for the environment: scoping, export, specials, aliases, functions.

use super::*;
use crate::ast::{Command, SimpleCommand, Word};
use crate::Span;

fn env() -> Env {
    Env::new()
}

#[test]
fn set_and_get() {
    let mut env = env();
    env.set("x", "1").unwrap();
    assert_eq!(env.get("x"), Some("1"));
    assert_eq!(env.get("missing"), None);
}

#[test]
fn writes_without_local_hit_the_global_frame() {
    let mut env = env();
    env.set("x", "global").unwrap();
    env.push_frame();
    env.set("x", "updated").unwrap();
    env.pop_frame();
    assert_eq!(env.get("x"), Some("updated"));
}

#[test]
fn locals_shadow_and_vanish_with_the_frame() {
    let mut env = env();
    env.set("x", "global").unwrap();
    env.push_frame();
    env.declare_local("x", "local".into()).unwrap();
    assert_eq!(env.get("x"), Some("local"));
    env.pop_frame();
    assert_eq!(env.get("x"), Some("global"));
}

#[test]
fn local_writes_stay_in_their_frame() {
    let mut env = env();
    env.push_frame();
    env.declare_local("x", "a".into()).unwrap();
    env.set("x", "b").unwrap();
    assert_eq!(env.get("x"), Some("b"));
    env.pop_frame();
    assert_eq!(env.get("x"), None);
}

#[test]
fn declare_local_requires_a_frame() {
    let mut env = env();
    assert_eq!(env.declare_local("x", "1".into()), Err(EnvError::NotInFunction));
}

#[test]
fn nested_frames_search_top_down() {
    let mut env = env();
    env.push_frame();
    env.declare_local("x", "outer".into()).unwrap();
    env.push_frame();
    env.declare_local("x", "inner".into()).unwrap();
    assert_eq!(env.get("x"), Some("inner"));
    env.pop_frame();
    assert_eq!(env.get("x"), Some("outer"));
}

#[test]
fn unset_removes_the_innermost_occurrence() {
    let mut env = env();
    env.set("x", "global").unwrap();
    env.push_frame();
    env.declare_local("x", "local".into()).unwrap();
    env.unset("x").unwrap();
    assert_eq!(env.get("x"), Some("global"));
}

#[test]
fn export_flag_survives_reassignment() {
    let mut env = env();
    env.export("x", Some("1".into())).unwrap();
    env.set("x", "2").unwrap();
    let child = env.child_env();
    assert_eq!(child.get("x").map(String::as_str), Some("2"));
}

#[test]
fn child_env_is_the_exported_subset() {
    let mut env = env();
    env.set("hidden", "1").unwrap();
    env.export("shown", Some("2".into())).unwrap();
    let child = env.child_env();
    assert!(!child.contains_key("hidden"));
    assert_eq!(child.get("shown").map(String::as_str), Some("2"));
}

#[test]
fn readonly_rejects_set_and_unset() {
    let mut env = env();
    env.mark_readonly("r", Some("1".into())).unwrap();
    assert!(matches!(env.set("r", "2"), Err(EnvError::Readonly { .. })));
    assert!(matches!(env.unset("r"), Err(EnvError::Readonly { .. })));
    assert_eq!(env.get("r"), Some("1"));
}

#[test]
fn special_parameters() {
    let mut env = env();
    env.last_status = 42;
    env.set_arg0("zish");
    env.set_positionals(vec!["a".into(), "b".into()]);

    assert_eq!(env.special("?").as_deref(), Some("42"));
    assert_eq!(env.special("#").as_deref(), Some("2"));
    assert_eq!(env.special("0").as_deref(), Some("zish"));
    assert_eq!(env.special("1").as_deref(), Some("a"));
    assert_eq!(env.special("2").as_deref(), Some("b"));
    assert_eq!(env.special("3"), None);
    assert_eq!(env.special("@").as_deref(), Some("a b"));
    assert_eq!(env.special("*").as_deref(), Some("a b"));
}

#[test]
fn ifs_defaults_to_whitespace() {
    let mut env = env();
    assert_eq!(env.ifs(), DEFAULT_IFS);
    env.set("IFS", ":").unwrap();
    assert_eq!(env.ifs(), ":");
}

#[test]
fn set_cwd_mirrors_pwd_and_oldpwd() {
    let mut env = env();
    let before = env.cwd().display().to_string();
    env.set_cwd("/tmp".into());
    assert_eq!(env.get("PWD"), Some("/tmp"));
    assert_eq!(env.get("OLDPWD"), Some(before.as_str()));
}

#[test]
fn alias_table() {
    let mut env = env();
    env.set_alias("ll", "ls -l");
    assert_eq!(env.alias("ll"), Some("ls -l"));
    assert!(env.remove_alias("ll"));
    assert!(!env.remove_alias("ll"));
}

#[test]
fn aliases_sorted_orders_by_name() {
    let mut env = env();
    env.set_alias("zz", "2");
    env.set_alias("aa", "1");
    let names: Vec<_> = env.aliases_sorted().into_iter().map(|(n, _)| n.to_string()).collect();
    assert_eq!(names, ["aa", "zz"]);
}

#[test]
fn function_table() {
    let mut env = env();
    let body = Command::Simple(SimpleCommand {
        assignments: vec![],
        name: Word::empty(0),
        args: vec![],
        redirections: vec![],
        span: Span::empty(0),
    });
    env.define_function("f", body);
    assert!(env.function("f").is_some());
    assert!(env.remove_function("f"));
    assert!(env.function("f").is_none());
}

#[test]
fn from_process_imports_exported_variables() {
    let env = Env::from_process();
    // PATH is exported in any sane test environment
    assert!(env.child_env().contains_key("PATH"));
}

#[test]
fn clone_isolates_mutations() {
    let mut env = env();
    env.set("x", "1").unwrap();
    let mut copy = env.clone();
    copy.set("x", "2").unwrap();
    assert_eq!(env.get("x"), Some("1"));
}
