// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Test expression evaluation for `test`/`[` and the `[[` conditional.
//!
//! Grammar (loosest first): `-o`/`||` alternatives, `-a`/`&&` conjunction,
//! `!` negation, then parenthesized groups, unary file/string operators,
//! and binary string/integer comparisons. `[[` additionally gets `=~`.

use std::path::{Path, PathBuf};

/// Evaluate a test expression. Errors are usage messages (status 2).
pub(super) fn eval(args: &[String], extended: bool, cwd: &Path) -> Result<bool, String> {
    if args.is_empty() {
        return Ok(false);
    }

    let mut parser = Parser { args, pos: 0, extended, cwd };
    let value = parser.or_expr()?;
    match parser.peek() {
        None => Ok(value),
        Some(arg) => Err(format!("unexpected argument '{arg}'")),
    }
}

struct Parser<'a> {
    args: &'a [String],
    pos: usize,
    extended: bool,
    cwd: &'a Path,
}

impl Parser<'_> {
    fn peek(&self) -> Option<&str> {
        self.args.get(self.pos).map(String::as_str)
    }

    fn peek_at(&self, offset: usize) -> Option<&str> {
        self.args.get(self.pos + offset).map(String::as_str)
    }

    fn next(&mut self) -> Option<&str> {
        let arg = self.args.get(self.pos).map(String::as_str);
        if arg.is_some() {
            self.pos += 1;
        }
        arg
    }

    fn or_expr(&mut self) -> Result<bool, String> {
        let mut value = self.and_expr()?;
        while matches!(self.peek(), Some("-o") | Some("||")) {
            self.pos += 1;
            let rhs = self.and_expr()?;
            value = value || rhs;
        }
        Ok(value)
    }

    fn and_expr(&mut self) -> Result<bool, String> {
        let mut value = self.not_expr()?;
        while matches!(self.peek(), Some("-a") | Some("&&")) {
            self.pos += 1;
            let rhs = self.not_expr()?;
            value = value && rhs;
        }
        Ok(value)
    }

    fn not_expr(&mut self) -> Result<bool, String> {
        // A lone trailing `!` is an ordinary nonempty operand.
        if self.peek() == Some("!") && self.pos + 1 < self.args.len() {
            self.pos += 1;
            return Ok(!self.not_expr()?);
        }
        self.primary()
    }

    fn primary(&mut self) -> Result<bool, String> {
        match self.peek() {
            None => Err("operand expected".to_string()),
            Some("(") => {
                self.pos += 1;
                let value = self.or_expr()?;
                match self.next() {
                    Some(")") => Ok(value),
                    _ => Err("missing ')'".to_string()),
                }
            }
            Some(op @ ("-f" | "-d" | "-e" | "-z" | "-n")) => {
                let op = op.to_string();
                self.pos += 1;
                let Some(operand) = self.next().map(String::from) else {
                    return Err(format!("{op}: operand expected"));
                };
                Ok(self.unary(&op, &operand))
            }
            Some(_) => {
                // Binary comparison, or a bare nonempty-string test
                let is_binop = self.peek_at(1).is_some_and(|op| self.is_binary_op(op));
                let lhs = self.next().map(String::from).unwrap_or_default();
                if is_binop {
                    let op = self.next().map(String::from).unwrap_or_default();
                    let Some(rhs) = self.next().map(String::from) else {
                        return Err(format!("{op}: operand expected"));
                    };
                    self.binary(&lhs, &op, &rhs)
                } else {
                    Ok(!lhs.is_empty())
                }
            }
        }
    }

    fn is_binary_op(&self, op: &str) -> bool {
        matches!(op, "=" | "==" | "!=" | "-eq" | "-ne" | "-lt" | "-le" | "-gt" | "-ge")
            || (self.extended && op == "=~")
    }

    fn unary(&self, op: &str, operand: &str) -> bool {
        match op {
            "-z" => operand.is_empty(),
            "-n" => !operand.is_empty(),
            "-e" => self.resolve(operand).exists(),
            "-f" => self.resolve(operand).is_file(),
            "-d" => self.resolve(operand).is_dir(),
            _ => false,
        }
    }

    fn binary(&self, lhs: &str, op: &str, rhs: &str) -> Result<bool, String> {
        match op {
            "=" | "==" => Ok(lhs == rhs),
            "!=" => Ok(lhs != rhs),
            "=~" => {
                let regex = regex::Regex::new(rhs)
                    .map_err(|err| format!("invalid regex '{rhs}': {err}"))?;
                Ok(regex.is_match(lhs))
            }
            _ => {
                let lhs = parse_int(lhs)?;
                let rhs = parse_int(rhs)?;
                Ok(match op {
                    "-eq" => lhs == rhs,
                    "-ne" => lhs != rhs,
                    "-lt" => lhs < rhs,
                    "-le" => lhs <= rhs,
                    "-gt" => lhs > rhs,
                    "-ge" => lhs >= rhs,
                    _ => return Err(format!("{op}: unknown operator")),
                })
            }
        }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        let p = Path::new(path);
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            self.cwd.join(p)
        }
    }
}

fn parse_int(text: &str) -> Result<i64, String> {
    text.trim()
        .parse()
        .map_err(|_| format!("integer expression expected: '{text}'"))
}
