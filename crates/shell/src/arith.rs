// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Arithmetic expansion (`$((expr))`) over 64-bit signed integers.
//!
//! Supports the C-like operator set with conventional precedence:
//! `+ - * / % ( ) << >> & | ^ ~ ! && || == != < <= > >= ? :` plus pre/post
//! `++`/`--`. Undefined names evaluate to 0. `&&`, `||`, and `?:` short-
//! circuit: the untaken side is parsed but produces no side effects and no
//! division errors.

use thiserror::Error;

use crate::env::Env;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ArithError {
    #[error("unexpected character '{ch}' in arithmetic expression")]
    UnexpectedChar { ch: char, pos: usize },

    #[error("unexpected '{found}' in arithmetic expression")]
    UnexpectedToken { found: String, pos: usize },

    #[error("unexpected end of arithmetic expression")]
    UnexpectedEnd,

    #[error("invalid number '{text}'")]
    InvalidNumber { text: String, pos: usize },

    #[error("variable '{name}' is not a number")]
    InvalidVariableValue { name: String },

    #[error("'++'/'--' requires a variable name")]
    ExpectedVariable { pos: usize },

    #[error("cannot assign to '{name}'")]
    Assign { name: String },

    #[error("division by zero")]
    DivisionByZero,

    #[error("arithmetic overflow")]
    Overflow,
}

/// Evaluate an arithmetic expression against the environment.
pub fn eval(expr: &str, env: &mut Env) -> Result<i64, ArithError> {
    let tokens = tokenize(expr)?;
    let mut eval = Evaluator { tokens, pos: 0, env };
    let value = eval.expression(0, true)?;
    match eval.peek() {
        None => Ok(value),
        Some(token) => Err(ArithError::UnexpectedToken {
            found: token.text(),
            pos: token.pos,
        }),
    }
}

// ── Tokens ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
enum TokenKind {
    Num(i64),
    Name(String),
    Op(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Token {
    kind: TokenKind,
    pos: usize,
}

impl Token {
    fn text(&self) -> String {
        match &self.kind {
            TokenKind::Num(n) => n.to_string(),
            TokenKind::Name(n) => n.clone(),
            TokenKind::Op(op) => (*op).to_string(),
        }
    }
}

/// Two-character operators, checked before their one-character prefixes.
const DOUBLE_OPS: &[&str] = &["<<", ">>", "<=", ">=", "==", "!=", "&&", "||", "++", "--"];
const SINGLE_OPS: &str = "+-*/%()<>!~&|^?:";

fn tokenize(expr: &str) -> Result<Vec<Token>, ArithError> {
    let mut tokens = Vec::new();
    let mut chars = expr.char_indices().peekable();

    while let Some(&(pos, ch)) = chars.peek() {
        if ch.is_whitespace() {
            chars.next();
            continue;
        }

        if ch.is_ascii_digit() {
            let mut end = pos;
            while let Some(&(p, c)) = chars.peek() {
                if c.is_ascii_alphanumeric() {
                    end = p + c.len_utf8();
                    chars.next();
                } else {
                    break;
                }
            }
            let text = &expr[pos..end];
            let value = parse_number(text)
                .ok_or_else(|| ArithError::InvalidNumber { text: text.to_string(), pos })?;
            tokens.push(Token { kind: TokenKind::Num(value), pos });
            continue;
        }

        if ch.is_ascii_alphabetic() || ch == '_' {
            let mut end = pos;
            while let Some(&(p, c)) = chars.peek() {
                if c.is_ascii_alphanumeric() || c == '_' {
                    end = p + c.len_utf8();
                    chars.next();
                } else {
                    break;
                }
            }
            tokens.push(Token { kind: TokenKind::Name(expr[pos..end].to_string()), pos });
            continue;
        }

        let rest = &expr[pos..];
        if let Some(op) = DOUBLE_OPS.iter().find(|op| rest.starts_with(**op)) {
            chars.next();
            chars.next();
            tokens.push(Token { kind: TokenKind::Op(op), pos });
            continue;
        }

        if let Some(idx) = SINGLE_OPS.find(ch) {
            // Index into a static str of single-byte operators
            let op = &SINGLE_OPS[idx..idx + 1];
            chars.next();
            tokens.push(Token { kind: TokenKind::Op(op), pos });
            continue;
        }

        return Err(ArithError::UnexpectedChar { ch, pos });
    }

    Ok(tokens)
}

/// Parse a literal in C syntax: `0x` hex, leading-`0` octal, else decimal.
fn parse_number(text: &str) -> Option<i64> {
    if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        return i64::from_str_radix(hex, 16).ok();
    }
    if text.len() > 1 && text.starts_with('0') {
        return i64::from_str_radix(&text[1..], 8).ok();
    }
    text.parse().ok()
}

// ── Evaluation ───────────────────────────────────────────────────────────

/// Binary operator precedence. Higher binds tighter; the ternary sits at 1.
fn precedence(op: &str) -> Option<u8> {
    Some(match op {
        "*" | "/" | "%" => 10,
        "+" | "-" => 9,
        "<<" | ">>" => 8,
        "<" | "<=" | ">" | ">=" => 7,
        "==" | "!=" => 6,
        "&" => 5,
        "^" => 4,
        "|" => 3,
        "&&" => 2,
        "||" => 1,
        _ => return None,
    })
}

struct Evaluator<'a> {
    tokens: Vec<Token>,
    pos: usize,
    env: &'a mut Env,
}

impl Evaluator<'_> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_op(&self) -> Option<&'static str> {
        match self.peek() {
            Some(Token { kind: TokenKind::Op(op), .. }) => Some(*op),
            _ => None,
        }
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    /// Precedence-climbing evaluation.
    ///
    /// `active` is false inside an untaken `&&`/`||`/`?:` branch: the branch
    /// is still parsed, but variables are not assigned and arithmetic faults
    /// are suppressed.
    fn expression(&mut self, min_prec: u8, active: bool) -> Result<i64, ArithError> {
        let mut lhs = self.unary(active)?;

        loop {
            // Ternary: lowest precedence, right-associative.
            if min_prec == 0 && self.peek_op() == Some("?") {
                self.advance();
                let taken = lhs != 0;
                let then_val = self.expression(0, active && taken)?;
                match self.peek_op() {
                    Some(":") => self.advance(),
                    _ => {
                        return Err(match self.peek() {
                            Some(t) => {
                                ArithError::UnexpectedToken { found: t.text(), pos: t.pos }
                            }
                            None => ArithError::UnexpectedEnd,
                        })
                    }
                }
                let else_val = self.expression(0, active && !taken)?;
                lhs = if taken { then_val } else { else_val };
                continue;
            }

            let Some(op) = self.peek_op() else { break };
            let Some(prec) = precedence(op) else { break };
            if prec < min_prec.max(1) {
                break;
            }
            self.advance();

            match op {
                "&&" => {
                    let rhs = self.expression(prec + 1, active && lhs != 0)?;
                    lhs = i64::from(lhs != 0 && rhs != 0);
                }
                "||" => {
                    let rhs = self.expression(prec + 1, active && lhs == 0)?;
                    lhs = i64::from(lhs != 0 || rhs != 0);
                }
                _ => {
                    let rhs = self.expression(prec + 1, active)?;
                    lhs = if active { apply_binary(op, lhs, rhs)? } else { 0 };
                }
            }
        }

        Ok(lhs)
    }

    fn unary(&mut self, active: bool) -> Result<i64, ArithError> {
        let Some(token) = self.peek().cloned() else {
            return Err(ArithError::UnexpectedEnd);
        };

        match token.kind {
            TokenKind::Op("+") => {
                self.advance();
                self.unary(active)
            }
            TokenKind::Op("-") => {
                self.advance();
                let value = self.unary(active)?;
                if active {
                    value.checked_neg().ok_or(ArithError::Overflow)
                } else {
                    Ok(0)
                }
            }
            TokenKind::Op("!") => {
                self.advance();
                Ok(i64::from(self.unary(active)? == 0))
            }
            TokenKind::Op("~") => {
                self.advance();
                Ok(!self.unary(active)?)
            }
            TokenKind::Op("++") => {
                self.advance();
                self.prefix_step(1, active, token.pos)
            }
            TokenKind::Op("--") => {
                self.advance();
                self.prefix_step(-1, active, token.pos)
            }
            _ => self.primary(active),
        }
    }

    fn primary(&mut self, active: bool) -> Result<i64, ArithError> {
        let Some(token) = self.peek().cloned() else {
            return Err(ArithError::UnexpectedEnd);
        };

        match token.kind {
            TokenKind::Num(n) => {
                self.advance();
                Ok(n)
            }
            TokenKind::Name(name) => {
                self.advance();
                // Postfix increment/decrement
                match self.peek_op() {
                    Some("++") => {
                        self.advance();
                        self.postfix_step(&name, 1, active)
                    }
                    Some("--") => {
                        self.advance();
                        self.postfix_step(&name, -1, active)
                    }
                    _ if active => self.read_var(&name),
                    _ => Ok(0),
                }
            }
            TokenKind::Op("(") => {
                self.advance();
                let value = self.expression(0, active)?;
                match self.peek_op() {
                    Some(")") => {
                        self.advance();
                        Ok(value)
                    }
                    _ => Err(match self.peek() {
                        Some(t) => ArithError::UnexpectedToken { found: t.text(), pos: t.pos },
                        None => ArithError::UnexpectedEnd,
                    }),
                }
            }
            TokenKind::Op(op) => Err(ArithError::UnexpectedToken { found: op.to_string(), pos: token.pos }),
        }
    }

    fn prefix_step(&mut self, delta: i64, active: bool, op_pos: usize) -> Result<i64, ArithError> {
        let Some(Token { kind: TokenKind::Name(name), .. }) = self.peek().cloned() else {
            return Err(ArithError::ExpectedVariable { pos: op_pos });
        };
        self.advance();
        if !active {
            return Ok(0);
        }
        let old = self.read_var(&name)?;
        let new = old.checked_add(delta).ok_or(ArithError::Overflow)?;
        self.write_var(&name, new)?;
        Ok(new)
    }

    fn postfix_step(&mut self, name: &str, delta: i64, active: bool) -> Result<i64, ArithError> {
        if !active {
            return Ok(0);
        }
        let old = self.read_var(name)?;
        let new = old.checked_add(delta).ok_or(ArithError::Overflow)?;
        self.write_var(name, new)?;
        Ok(old)
    }

    /// Read a variable as an integer; unset or empty reads as 0.
    fn read_var(&self, name: &str) -> Result<i64, ArithError> {
        match self.env.get(name) {
            None => Ok(0),
            Some(value) => {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    return Ok(0);
                }
                parse_number(trimmed)
                    .ok_or_else(|| ArithError::InvalidVariableValue { name: name.to_string() })
            }
        }
    }

    fn write_var(&mut self, name: &str, value: i64) -> Result<(), ArithError> {
        self.env
            .set(name, value.to_string())
            .map_err(|_| ArithError::Assign { name: name.to_string() })
    }
}

fn apply_binary(op: &str, lhs: i64, rhs: i64) -> Result<i64, ArithError> {
    Ok(match op {
        "*" => lhs.checked_mul(rhs).ok_or(ArithError::Overflow)?,
        "/" => {
            if rhs == 0 {
                return Err(ArithError::DivisionByZero);
            }
            lhs.checked_div(rhs).ok_or(ArithError::Overflow)?
        }
        "%" => {
            if rhs == 0 {
                return Err(ArithError::DivisionByZero);
            }
            lhs.checked_rem(rhs).ok_or(ArithError::Overflow)?
        }
        "+" => lhs.checked_add(rhs).ok_or(ArithError::Overflow)?,
        "-" => lhs.checked_sub(rhs).ok_or(ArithError::Overflow)?,
        "<<" => {
            let shift = u32::try_from(rhs).map_err(|_| ArithError::Overflow)?;
            lhs.checked_shl(shift).ok_or(ArithError::Overflow)?
        }
        ">>" => {
            let shift = u32::try_from(rhs).map_err(|_| ArithError::Overflow)?;
            lhs.checked_shr(shift).ok_or(ArithError::Overflow)?
        }
        "<" => i64::from(lhs < rhs),
        "<=" => i64::from(lhs <= rhs),
        ">" => i64::from(lhs > rhs),
        ">=" => i64::from(lhs >= rhs),
        "==" => i64::from(lhs == rhs),
        "!=" => i64::from(lhs != rhs),
        "&" => lhs & rhs,
        "^" => lhs ^ rhs,
        "|" => lhs | rhs,
        _ => unreachable!("precedence() filtered the operator set"),
    })
}

#[cfg(test)]
#[path = "arith_tests.rs"]
mod tests;
