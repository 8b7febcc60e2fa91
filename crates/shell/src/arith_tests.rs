// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for arithmetic expansion.

use super::*;
use crate::env::Env;

fn eval_ok(expr: &str) -> i64 {
    eval(expr, &mut Env::new()).unwrap()
}

fn eval_with(expr: &str, vars: &[(&str, &str)]) -> (Result<i64, ArithError>, Env) {
    let mut env = Env::new();
    for (name, value) in vars {
        env.set(*name, *value).unwrap();
    }
    let result = eval(expr, &mut env);
    (result, env)
}

#[yare::parameterized(
    literal = { "42", 42 },
    addition = { "1 + 2", 3 },
    subtraction = { "5 - 9", -4 },
    multiplication_binds_tighter = { "2 + 3 * 4", 14 },
    parens_override = { "(2 + 3) * 4", 20 },
    division = { "17 / 5", 3 },
    modulo = { "17 % 5", 2 },
    unary_minus = { "-3 + 5", 2 },
    unary_plus = { "+7", 7 },
    double_negation = { "- -5", 5 },
    logical_not = { "!0", 1 },
    logical_not_nonzero = { "!42", 0 },
    bitwise_not = { "~0", -1 },
    shifts = { "1 << 4 >> 2", 4 },
    comparisons = { "3 < 4", 1 },
    comparison_false = { "4 <= 3", 0 },
    equality = { "5 == 5", 1 },
    inequality = { "5 != 5", 0 },
    bit_and = { "6 & 3", 2 },
    bit_or = { "6 | 3", 7 },
    bit_xor = { "6 ^ 3", 5 },
    logical_and = { "1 && 2", 1 },
    logical_and_zero = { "0 && 2", 0 },
    logical_or = { "0 || 2", 1 },
    ternary_true = { "1 ? 10 : 20", 10 },
    ternary_false = { "0 ? 10 : 20", 20 },
    ternary_nested = { "0 ? 1 : 1 ? 2 : 3", 2 },
    hex_literal = { "0xff", 255 },
    octal_literal = { "010", 8 },
    precedence_mix = { "1 + 2 << 1", 6 },
    whitespace_is_free = { "  1+1  ", 2 },
)]
fn evaluates(expr: &str, expected: i64) {
    assert_eq!(eval_ok(expr), expected, "expr: {expr}");
}

#[test]
fn variables_read_from_the_environment() {
    let (result, _) = eval_with("a + b * 2", &[("a", "5"), ("b", "3")]);
    assert_eq!(result.unwrap(), 11);
}

#[test]
fn undefined_names_are_zero() {
    assert_eq!(eval_ok("nosuch + 3"), 3);
}

#[test]
fn empty_variable_reads_as_zero() {
    let (result, _) = eval_with("x + 1", &[("x", "")]);
    assert_eq!(result.unwrap(), 1);
}

#[test]
fn non_numeric_variable_is_an_error() {
    let (result, _) = eval_with("x + 1", &[("x", "hello")]);
    assert!(matches!(result, Err(ArithError::InvalidVariableValue { .. })));
}

#[test]
fn prefix_increment_updates_and_yields_new() {
    let (result, env) = eval_with("++x", &[("x", "4")]);
    assert_eq!(result.unwrap(), 5);
    assert_eq!(env.get("x"), Some("5"));
}

#[test]
fn postfix_increment_yields_old() {
    let (result, env) = eval_with("x++", &[("x", "4")]);
    assert_eq!(result.unwrap(), 4);
    assert_eq!(env.get("x"), Some("5"));
}

#[test]
fn prefix_decrement() {
    let (result, env) = eval_with("--x", &[("x", "4")]);
    assert_eq!(result.unwrap(), 3);
    assert_eq!(env.get("x"), Some("3"));
}

#[test]
fn postfix_decrement_in_expression() {
    let (result, env) = eval_with("x-- + 10", &[("x", "4")]);
    assert_eq!(result.unwrap(), 14);
    assert_eq!(env.get("x"), Some("3"));
}

#[test]
fn short_circuit_suppresses_side_effects() {
    let (result, env) = eval_with("0 && x++", &[("x", "4")]);
    assert_eq!(result.unwrap(), 0);
    assert_eq!(env.get("x"), Some("4"));

    let (result, env) = eval_with("1 || x++", &[("x", "4")]);
    assert_eq!(result.unwrap(), 1);
    assert_eq!(env.get("x"), Some("4"));
}

#[test]
fn untaken_ternary_branch_is_inert() {
    let (result, env) = eval_with("1 ? 7 : x++", &[("x", "4")]);
    assert_eq!(result.unwrap(), 7);
    assert_eq!(env.get("x"), Some("4"));
}

#[test]
fn untaken_branch_division_by_zero_is_suppressed() {
    assert_eq!(eval_ok("1 || 1 / 0"), 1);
    assert_eq!(eval_ok("0 ? 1 / 0 : 9"), 9);
}

#[test]
fn division_by_zero() {
    assert!(matches!(eval("1 / 0", &mut Env::new()), Err(ArithError::DivisionByZero)));
    assert!(matches!(eval("1 % 0", &mut Env::new()), Err(ArithError::DivisionByZero)));
}

#[test]
fn overflow_is_detected() {
    let max = i64::MAX.to_string();
    assert!(matches!(eval(&format!("{max} + 1"), &mut Env::new()), Err(ArithError::Overflow)));
    assert!(matches!(eval("1 << 64", &mut Env::new()), Err(ArithError::Overflow)));
    assert!(matches!(eval("1 << -1", &mut Env::new()), Err(ArithError::Overflow)));
}

#[yare::parameterized(
    empty = { "" },
    dangling_operator = { "1 +" },
    operator_only = { "*" },
    missing_close_paren = { "(1 + 2" },
    missing_colon = { "1 ? 2" },
    trailing_garbage = { "1 2" },
    bad_character = { "1 @ 2" },
    bad_number = { "0x" },
)]
fn syntax_errors(expr: &str) {
    assert!(eval(expr, &mut Env::new()).is_err(), "expected error for {expr:?}");
}

#[test]
fn increment_requires_a_variable() {
    assert!(matches!(eval("++5", &mut Env::new()), Err(ArithError::ExpectedVariable { .. })));
}
