// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Text expansion: expands raw strings (heredoc bodies, modifier defaults)
//! with parameter, command, and arithmetic substitution.

use crate::token::is_special_variable;
use crate::{Span, SubstitutionBody};

use super::super::error::ExecError;
use super::super::run::ExecContext;
use super::modifier::apply_modifier;

/// Expand parameters and substitutions in raw text.
///
/// Handles `$VAR`, `${VAR}`, `${VAR:-default}`, special parameters,
/// `$(cmd)`, `` `cmd` ``, and `$((expr))`. Unset names expand empty.
pub(crate) async fn expand_text(ctx: &mut ExecContext, body: &str) -> Result<String, ExecError> {
    let mut result = String::with_capacity(body.len());
    let mut chars = body.char_indices().peekable();

    while let Some((pos, ch)) = chars.next() {
        if ch == '$' {
            match chars.peek().map(|(_, c)| *c) {
                Some('{') => {
                    chars.next();
                    let expanded = expand_braced(&mut chars, ctx, pos).await?;
                    result.push_str(&expanded);
                }
                Some('(') => {
                    chars.next();
                    let expanded = expand_paren(&mut chars, ctx, pos).await?;
                    result.push_str(&expanded);
                }
                Some(c) if is_valid_variable_start(c) => {
                    let name = scan_name(&mut chars);
                    result.push_str(ctx.env.get(&name).unwrap_or(""));
                }
                Some(c) if is_special_variable(c) => {
                    chars.next();
                    result.push_str(&ctx.env.special(&c.to_string()).unwrap_or_default());
                }
                _ => result.push('$'),
            }
        } else if ch == '`' {
            let expanded = expand_backtick(&mut chars, ctx).await?;
            result.push_str(&expanded);
        } else if ch == '\\' {
            match chars.peek().map(|(_, c)| *c) {
                Some('$') | Some('`') | Some('\\') => {
                    if let Some((_, escaped)) = chars.next() {
                        result.push(escaped);
                    }
                }
                Some('\n') => {
                    chars.next();
                }
                _ => result.push('\\'),
            }
        } else {
            result.push(ch);
        }
    }

    Ok(result)
}

fn is_valid_variable_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

fn is_valid_variable_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

fn scan_name(chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>) -> String {
    let mut name = String::new();
    while let Some(&(_, ch)) = chars.peek() {
        if is_valid_variable_char(ch) {
            name.push(ch);
            chars.next();
        } else {
            break;
        }
    }
    name
}

/// Expand a braced reference (${VAR}, ${VAR:-default}, ${10}, ${#}, …).
async fn expand_braced(
    chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
    ctx: &mut ExecContext,
    start_pos: usize,
) -> Result<String, ExecError> {
    let mut name = String::new();
    let mut modifier = String::new();
    let mut in_modifier = false;
    let mut depth = 1;

    for (_, ch) in chars.by_ref() {
        match ch {
            '}' => {
                depth -= 1;
                if depth == 0 {
                    let span = Span::new(start_pos, start_pos);
                    let value = lookup(ctx, &name);
                    return if in_modifier {
                        apply_modifier(ctx, &name, &modifier, value.as_deref(), span).await
                    } else {
                        Ok(value.unwrap_or_default())
                    };
                }
                if in_modifier {
                    modifier.push(ch);
                }
            }
            '{' => {
                depth += 1;
                if in_modifier {
                    modifier.push(ch);
                }
            }
            ':' | '-' | '+' | '=' | '?' if !in_modifier && depth == 1 && !name.is_empty() => {
                in_modifier = true;
                modifier.push(ch);
            }
            _ => {
                if in_modifier {
                    modifier.push(ch);
                } else if is_valid_variable_char(ch) || (name.is_empty() && is_special_variable(ch))
                {
                    name.push(ch);
                } else {
                    in_modifier = true;
                    modifier.push(ch);
                }
            }
        }
    }

    // Unterminated ${ — leave it literal
    let mut literal = String::from("${");
    literal.push_str(&name);
    if in_modifier {
        literal.push_str(&modifier);
    }
    Ok(literal)
}

fn lookup(ctx: &ExecContext, name: &str) -> Option<String> {
    match name.chars().next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => ctx.env.get(name).map(String::from),
        Some(_) => ctx.env.special(name),
        None => None,
    }
}

/// Expand `$(cmd)` or `$((expr))` after the opening paren was consumed.
async fn expand_paren(
    chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
    ctx: &mut ExecContext,
    start_pos: usize,
) -> Result<String, ExecError> {
    let mut content = String::new();
    let mut depth = 1;

    for (_, ch) in chars.by_ref() {
        match ch {
            '(' => {
                depth += 1;
                content.push(ch);
            }
            ')' => {
                depth -= 1;
                if depth == 0 {
                    // `$((expr))`: the balanced content is one parenthesized group
                    if let Some(expr) =
                        content.strip_prefix('(').and_then(|r| r.strip_suffix(')'))
                    {
                        let span = Span::new(start_pos, start_pos);
                        let value = super::eval_arith(ctx, expr, span).await?;
                        return Ok(value.to_string());
                    }
                    let output =
                        super::execute_substitution(ctx, &SubstitutionBody::Unparsed(content))
                            .await?;
                    return Ok(output.trim_end_matches('\n').to_string());
                }
                content.push(ch);
            }
            _ => content.push(ch),
        }
    }

    Ok(format!("$({content}"))
}

/// Expand a backtick command substitution (`cmd`).
async fn expand_backtick(
    chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
    ctx: &mut ExecContext,
) -> Result<String, ExecError> {
    let mut content = String::new();

    while let Some((_, ch)) = chars.next() {
        if ch == '`' {
            let output =
                super::execute_substitution(ctx, &SubstitutionBody::Unparsed(content)).await?;
            return Ok(output.trim_end_matches('\n').to_string());
        } else if ch == '\\' {
            if let Some(&(_, next)) = chars.peek() {
                if next == '`' || next == '\\' || next == '$' {
                    chars.next();
                    content.push(next);
                    continue;
                }
            }
            content.push(ch);
        } else {
            content.push(ch);
        }
    }

    Ok(format!("`{content}"))
}
