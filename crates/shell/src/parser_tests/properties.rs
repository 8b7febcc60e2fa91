// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Property tests: literal words survive the lexer/parser round trip.

use proptest::prelude::*;

use crate::parser::Parser;

use super::helpers;

/// Word material with no quoting or expansion triggers.
fn plain_word() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_/.,:+@%^-]{1,10}"
}

proptest! {
    /// Tokenizing and parsing literal words reproduces them exactly.
    #[test]
    fn literal_words_round_trip(args in prop::collection::vec(plain_word(), 0..6)) {
        let input = format!("cmd {}", args.join(" "));
        let list = Parser::parse(input.trim()).unwrap();
        let cmd = helpers::get_simple_command(&list.items[0]);
        helpers::assert_literal(&cmd.name, "cmd");

        prop_assert_eq!(cmd.args.len(), args.len());
        for (arg, expected) in cmd.args.iter().zip(&args) {
            prop_assert_eq!(arg.as_bare_literal(), Some(expected.as_str()));
        }
    }

    /// Extra whitespace between words never changes the parse.
    #[test]
    fn whitespace_is_normalized(args in prop::collection::vec(plain_word(), 1..5), pad in 1usize..4) {
        let spaced = format!("cmd{}{}", " ".repeat(pad), args.join(&" ".repeat(pad)));
        let tight = format!("cmd {}", args.join(" "));

        let spaced_list = Parser::parse(&spaced).unwrap();
        let tight_list = Parser::parse(&tight).unwrap();

        let spaced_cmd = helpers::get_simple_command(&spaced_list.items[0]);
        let tight_cmd = helpers::get_simple_command(&tight_list.items[0]);
        prop_assert_eq!(spaced_cmd.args.len(), tight_cmd.args.len());
        for (a, b) in spaced_cmd.args.iter().zip(&tight_cmd.args) {
            prop_assert_eq!(a.as_bare_literal(), b.as_bare_literal());
        }
    }
}
