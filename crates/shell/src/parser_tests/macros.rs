// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Test macros for shell parser tests.
//!
//! These macros reduce boilerplate in parser tests by providing
//! declarative test generation, matching the pattern in lexer_tests/macros.rs.

/// Generate parse success tests that verify command count.
///
/// # Usage
///
/// ```ignore
/// parse_tests! {
///     name: "input" => commands: N,
/// }
/// ```
macro_rules! parse_tests {
    ($($name:ident: $input:expr => commands: $count:expr),* $(,)?) => {
        $(
            #[test]
            fn $name() {
                let result = Parser::parse($input)
                    .expect(concat!("failed to parse: ", $input));
                assert_eq!(
                    result.items.len(), $count,
                    "input: {:?}, expected {} commands, got {}",
                    $input, $count, result.items.len()
                );
            }
        )*
    };
}

/// Generate parse error tests.
///
/// # Usage
///
/// ```ignore
/// parse_error_tests! {
///     name: "input" => ErrorVariant { .. },
/// }
/// ```
macro_rules! parse_error_tests {
    ($($name:ident: $input:expr => $error:pat),* $(,)?) => {
        $(
            #[test]
            fn $name() {
                let result = Parser::parse($input);
                assert!(
                    matches!(result, Err($error)),
                    "expected error {:?} for input {:?}, got {:?}",
                    stringify!($error), $input, result
                );
            }
        )*
    };
}

/// Generate simple command tests (single command, verifies name and arg count).
///
/// # Usage
///
/// ```ignore
/// simple_cmd_tests! {
///     name: "input" => (cmd_name, arg_count),
/// }
/// ```
macro_rules! simple_cmd_tests {
    ($($name:ident: $input:expr => ($cmd:expr, $args:expr)),* $(,)?) => {
        $(
            #[test]
            fn $name() {
                let result = Parser::parse($input)
                    .expect(concat!("failed to parse: ", $input));
                assert_eq!(result.items.len(), 1);
                let cmd = super::helpers::get_simple_command(&result.items[0]);
                super::helpers::assert_literal(&cmd.name, $cmd);
                assert_eq!(
                    cmd.args.len(), $args,
                    "input: {:?}, expected {} args",
                    $input, $args
                );
            }
        )*
    };
}

/// Generate pipeline tests (verifies stage count).
///
/// # Usage
///
/// ```ignore
/// pipeline_tests! {
///     name: "input" => stages: N,
/// }
/// ```
macro_rules! pipeline_tests {
    ($($name:ident: $input:expr => stages: $count:expr),* $(,)?) => {
        $(
            #[test]
            fn $name() {
                let result = Parser::parse($input)
                    .expect(concat!("failed to parse: ", $input));
                assert_eq!(result.items.len(), 1);
                let pipeline = super::helpers::get_pipeline(&result.items[0]);
                assert_eq!(
                    pipeline.stages.len(), $count,
                    "input: {:?}, expected {} stages",
                    $input, $count
                );
            }
        )*
    };
}

// Macros are exported via #[macro_use] in mod.rs
