// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Word expansion: expands parsed `Word` AST nodes with tilde, parameter,
//! command substitution, and arithmetic expansion, followed by field
//! splitting and glob expansion where quoting allows.

use crate::{QuoteStyle, Span, Word, WordPart};

use super::super::error::ExecError;
use super::super::expand_glob::{
    expand_glob_pattern, process_glob_escapes, GlobConfig, GlobEligibility,
};
use super::super::run::ExecContext;
use super::modifier::apply_modifier;

// ---------------------------------------------------------------------------
// Tilde expansion
// ---------------------------------------------------------------------------

/// Expand tilde prefix in a word: `~` uses `$HOME` (falling back to the
/// account database), `~user` resolves best-effort.
fn expand_tilde(ctx: &ExecContext, text: &str) -> String {
    if !text.starts_with('~') {
        return text.to_string();
    }

    let slash_pos = text.find('/');
    let prefix_end = slash_pos.unwrap_or(text.len());
    let prefix = &text[1..prefix_end];
    let suffix = slash_pos.map_or("", |pos| &text[pos..]);

    if prefix.is_empty() {
        if let Some(home) = ctx.env.get("HOME") {
            return format!("{home}{suffix}");
        }
        if let Some(home) = dirs::home_dir() {
            return format!("{}{suffix}", home.display());
        }
    } else if let Some(home) = get_user_home(prefix) {
        return format!("{home}{suffix}");
    }

    // Lookup failure leaves the word untouched
    text.to_string()
}

/// Get the home directory for a specific user (best-effort).
fn get_user_home(username: &str) -> Option<String> {
    if let Ok(current_user) = std::env::var("USER") {
        if username == current_user {
            return dirs::home_dir().map(|p| p.display().to_string());
        }
    }
    None
}

// ---------------------------------------------------------------------------
// Parameter lookup
// ---------------------------------------------------------------------------

/// Look up a parameter value: ordinary variables by name, everything else
/// (`?`, `$`, `#`, `0`, `@`, `*`, positionals) as a special parameter.
///
/// `None` means unset, which modifiers distinguish from empty.
fn lookup(ctx: &ExecContext, name: &str) -> Option<String> {
    let first = name.chars().next()?;
    if first.is_ascii_alphabetic() || first == '_' {
        ctx.env.get(name).map(String::from)
    } else {
        ctx.env.special(name)
    }
}

/// Resolve a parameter reference, applying its modifier if present.
pub(super) async fn resolve_parameter(
    ctx: &mut ExecContext,
    name: &str,
    modifier: Option<&str>,
    span: Span,
) -> Result<String, ExecError> {
    let value = lookup(ctx, name);
    match modifier {
        Some(m) => apply_modifier(ctx, name, m, value.as_deref(), span).await,
        None => Ok(value.unwrap_or_default()),
    }
}

// ---------------------------------------------------------------------------
// Word expansion (no field splitting)
// ---------------------------------------------------------------------------

/// Expand a single [`Word`] into one string.
///
/// Used for assignment values, redirection targets, case subjects, and the
/// `[[` evaluator, where POSIX suppresses field splitting and globbing.
pub(crate) async fn expand_word(ctx: &mut ExecContext, word: &Word) -> Result<String, ExecError> {
    let mut result = String::new();
    let mut is_first_part = true;

    for part in &word.parts {
        match part {
            WordPart::Literal { value, quoted } => match quoted {
                QuoteStyle::Unquoted => {
                    let text = if is_first_part && value.starts_with('~') {
                        expand_tilde(ctx, value)
                    } else {
                        value.clone()
                    };
                    result.push_str(&process_glob_escapes(&text).0);
                }
                QuoteStyle::Single | QuoteStyle::Double => result.push_str(value),
            },
            WordPart::Variable { name, modifier, .. } => {
                let value = resolve_parameter(ctx, name, modifier.as_deref(), word.span).await?;
                result.push_str(&value);
            }
            WordPart::CommandSubstitution { body, .. } => {
                let output = super::execute_substitution(ctx, body).await?;
                result.push_str(output.trim_end_matches('\n'));
            }
            WordPart::Arith { expr, .. } => {
                let value = super::eval_arith(ctx, expr, word.span).await?;
                result.push_str(&value.to_string());
            }
        }
        is_first_part = false;
    }
    Ok(result)
}

// ---------------------------------------------------------------------------
// Word expansion with field splitting and globbing
// ---------------------------------------------------------------------------

/// One expanded fragment, tagged with how field splitting treats it.
enum Piece {
    /// Never split; per-byte glob eligibility mask.
    Fixed { text: String, mask: Vec<bool> },
    /// Split on IFS; the text is glob-eligible after splitting.
    Split(String),
    /// Quoted `"$@"`: one ready-made field per positional parameter.
    AtFields(Vec<String>),
}

/// Expand a word into zero or more argument fields (POSIX order:
/// tilde/parameter/substitution/arithmetic, then field splitting, then
/// pathname expansion).
pub(crate) async fn expand_word_split_glob(
    ctx: &mut ExecContext,
    word: &Word,
    config: &GlobConfig,
) -> Result<Vec<String>, ExecError> {
    let mut pieces: Vec<Piece> = Vec::new();
    let mut is_first_part = true;

    for part in &word.parts {
        match part {
            WordPart::Literal { value, quoted } => match quoted {
                QuoteStyle::Unquoted => {
                    let text = if is_first_part && value.starts_with('~') {
                        expand_tilde(ctx, value)
                    } else {
                        value.clone()
                    };
                    let (text, mask) = process_glob_escapes(&text);
                    pieces.push(Piece::Fixed { text, mask });
                }
                QuoteStyle::Single | QuoteStyle::Double => {
                    pieces.push(Piece::Fixed { text: value.clone(), mask: vec![] });
                }
            },
            WordPart::Variable { name, modifier, quoted } => {
                if *quoted && name == "@" && modifier.is_none() {
                    pieces.push(Piece::AtFields(ctx.env.positionals().to_vec()));
                } else if *quoted && name == "*" && modifier.is_none() {
                    let sep = ctx.env.ifs().chars().next().map(String::from).unwrap_or_default();
                    let text = ctx.env.positionals().join(&sep);
                    pieces.push(Piece::Fixed { text, mask: vec![] });
                } else {
                    let value =
                        resolve_parameter(ctx, name, modifier.as_deref(), word.span).await?;
                    if *quoted {
                        pieces.push(Piece::Fixed { text: value, mask: vec![] });
                    } else {
                        pieces.push(Piece::Split(value));
                    }
                }
            }
            WordPart::CommandSubstitution { body, quoted, .. } => {
                let output = super::execute_substitution(ctx, body).await?;
                let trimmed = output.trim_end_matches('\n').to_string();
                if *quoted {
                    pieces.push(Piece::Fixed { text: trimmed, mask: vec![] });
                } else {
                    pieces.push(Piece::Split(trimmed));
                }
            }
            WordPart::Arith { expr, quoted } => {
                let value = super::eval_arith(ctx, expr, word.span).await?;
                let text = value.to_string();
                if *quoted {
                    pieces.push(Piece::Fixed { text, mask: vec![] });
                } else {
                    pieces.push(Piece::Split(text));
                }
            }
        }
        is_first_part = false;
    }

    let fields = split_fields(&pieces, &ctx.env.ifs());

    let mut result = Vec::new();
    for field in fields {
        if field.has_glob_pattern() {
            result.extend(expand_glob_pattern(&field.text, ctx.env.cwd(), config));
        } else {
            result.push(field.text);
        }
    }

    Ok(result)
}

/// Expand a run of words into a flat argument vector.
pub(crate) async fn expand_words(
    ctx: &mut ExecContext,
    words: &[Word],
) -> Result<Vec<String>, ExecError> {
    let config = GlobConfig::default();
    let mut argv = Vec::new();
    for word in words {
        argv.extend(expand_word_split_glob(ctx, word, &config).await?);
    }
    Ok(argv)
}

/// Assemble pieces into fields, splitting only splittable pieces on IFS.
///
/// Empty results from unquoted expansions produce no field; a quoted empty
/// string still produces one. Runs of IFS characters collapse and leading or
/// trailing separators never create empty fields.
fn split_fields(pieces: &[Piece], ifs: &str) -> Vec<GlobEligibility> {
    let mut fields: Vec<GlobEligibility> = Vec::new();
    let mut current = GlobEligibility::new();
    let mut has_content = false;

    for piece in pieces {
        match piece {
            Piece::Fixed { text, mask } => {
                if mask.is_empty() {
                    current.push_ineligible(text);
                } else {
                    current.push_masked(text, mask);
                }
                has_content = true;
            }
            Piece::Split(text) => {
                if ifs.is_empty() {
                    current.push_eligible(text);
                    if !text.is_empty() {
                        has_content = true;
                    }
                    continue;
                }
                for ch in text.chars() {
                    if ifs.contains(ch) {
                        if has_content || !current.text.is_empty() {
                            fields.push(std::mem::take(&mut current));
                            has_content = false;
                        }
                    } else {
                        current.push_eligible_char(ch);
                        has_content = true;
                    }
                }
            }
            Piece::AtFields(values) => {
                if values.is_empty() {
                    continue;
                }
                current.push_ineligible(&values[0]);
                has_content = true;
                for value in &values[1..] {
                    fields.push(std::mem::take(&mut current));
                    current.push_ineligible(value);
                }
            }
        }
    }

    if has_content || !current.text.is_empty() {
        fields.push(current);
    }

    fields
}
