// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Word and text expansion: tilde, parameters, command substitution,
//! arithmetic, field splitting, and globbing.
//!
//! Two expansion modes:
//! - **Word expansion** (`expand_word`, `expand_word_split_glob`): operates
//!   on parsed [`Word`](crate::Word) AST nodes.
//! - **Text expansion** (`expand_text`): operates on raw strings (here-doc
//!   bodies, modifier defaults).

mod modifier;
mod text;
mod word;

use std::future::Future;
use std::pin::Pin;

use crate::{arith, Parser, Span, SubstitutionBody};

use super::error::ExecError;
use super::run::ExecContext;

// Re-export the expansion API
pub(crate) use text::expand_text;
pub(crate) use word::{expand_word, expand_word_split_glob, expand_words};

/// Execute a command substitution and capture its output.
pub(super) async fn execute_substitution(
    ctx: &mut ExecContext,
    body: &SubstitutionBody,
) -> Result<String, ExecError> {
    match body {
        SubstitutionBody::Parsed(ast) => super::run::capture_command_list(ctx, ast).await,
        SubstitutionBody::Unparsed(text) => {
            let ast = Parser::parse(text)?;
            super::run::capture_command_list(ctx, &ast).await
        }
    }
}

/// Evaluate `$((expr))`: the expression text undergoes parameter and command
/// substitution first, then arithmetic evaluation.
///
/// Boxed because the pre-expansion can recurse back into expansion.
pub(super) fn eval_arith<'a>(
    ctx: &'a mut ExecContext,
    expr: &'a str,
    span: Span,
) -> Pin<Box<dyn Future<Output = Result<i64, ExecError>> + 'a>> {
    Box::pin(async move {
        let expanded = text::expand_text(ctx, expr).await?;
        arith::eval(&expanded, &mut ctx.env)
            .map_err(|source| ExecError::Arith { source, span })
    })
}
