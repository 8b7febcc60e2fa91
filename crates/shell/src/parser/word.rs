// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Word assembly: adjacent token concatenation and assignment-word detection.

use super::Parser;
use crate::ast::{SubstitutionBody, Word, WordPart};
use crate::parse_error::ParseError;
use crate::token::{self, Span, Token, TokenKind};

impl Parser {
    #[inline]
    fn is_adjacent(&self, current_end: usize) -> bool {
        self.peek().map(|t| t.span.start == current_end).unwrap_or(false)
    }

    pub(super) fn collect_adjacent_parts(
        &mut self,
        end: &mut usize,
        parts: &mut Vec<WordPart>,
    ) -> Result<(), ParseError> {
        while self.is_adjacent(*end) {
            let token = match self.peek() {
                Some(t) => t.clone(),
                None => break,
            };
            let token_parts = self.token_to_parts(&token)?;
            if token_parts.is_empty() {
                break;
            }
            *end = token.span.end;
            parts.extend(token_parts);
            self.advance();
        }
        Ok(())
    }

    fn parse_command_substitution(
        content: &str,
        backtick: bool,
        quoted: bool,
        span: Span,
    ) -> Result<WordPart, ParseError> {
        let body = Parser::parse(content)
            .map_err(|e| ParseError::InSubstitution { inner: Box::new(e), span })?;
        Ok(WordPart::CommandSubstitution {
            body: SubstitutionBody::Parsed(Box::new(body)),
            backtick,
            quoted,
        })
    }

    /// Returns an empty vec for non-word tokens, one or more parts for word tokens.
    ///
    /// Keywords and braces are demoted to ordinary literals here: the parser
    /// only gives them meaning in command position, which is checked before
    /// word assembly begins.
    fn token_to_parts(&self, token: &Token) -> Result<Vec<WordPart>, ParseError> {
        match &token.kind {
            TokenKind::Word(s) => Ok(vec![WordPart::literal(s.clone())]),
            TokenKind::Keyword(kw) => Ok(vec![WordPart::literal(kw.as_str())]),
            TokenKind::LBrace => Ok(vec![WordPart::literal("{")]),
            TokenKind::RBrace => Ok(vec![WordPart::literal("}")]),
            TokenKind::SingleQuoted(s) => Ok(vec![WordPart::single_quoted(s.clone())]),
            TokenKind::DoubleQuoted(word_parts) => {
                if word_parts.is_empty() {
                    return Ok(vec![WordPart::double_quoted("")]);
                }
                let mut parts = Vec::new();
                for wp in word_parts {
                    match wp {
                        WordPart::CommandSubstitution {
                            body: SubstitutionBody::Unparsed(content),
                            backtick,
                            quoted,
                        } => {
                            parts.push(Self::parse_command_substitution(
                                content, *backtick, *quoted, token.span,
                            )?);
                        }
                        other => parts.push(other.clone()),
                    }
                }
                Ok(parts)
            }
            TokenKind::Variable { name, modifier } => Ok(vec![WordPart::Variable {
                name: name.clone(),
                modifier: modifier.clone(),
                quoted: false,
            }]),
            TokenKind::CommandSubstitution { content, backtick } => {
                Ok(vec![Self::parse_command_substitution(content, *backtick, false, token.span)?])
            }
            TokenKind::Arith { content } => {
                Ok(vec![WordPart::Arith { expr: content.clone(), quoted: false }])
            }
            _ => Ok(vec![]),
        }
    }

    pub(super) fn try_parse_assignment_word(word: &str) -> Option<(&str, &str)> {
        let eq_pos = word.find('=')?;
        let name = &word[..eq_pos];
        let value = &word[eq_pos + 1..];

        if !token::is_valid_variable_name(name) {
            return None;
        }

        Some((name, value))
    }

    pub(super) fn parse_word(&mut self) -> Result<Option<Word>, ParseError> {
        let first_token = match self.peek() {
            Some(t) => t.clone(),
            None => return Ok(None),
        };

        // `}` never begins a word; it only continues one adjacently.
        if matches!(first_token.kind, TokenKind::RBrace) {
            return Ok(None);
        }

        let first_parts = self.token_to_parts(&first_token)?;
        if first_parts.is_empty() {
            return Ok(None);
        }

        let start = first_token.span.start;
        let mut end = first_token.span.end;
        let mut parts = first_parts;
        self.advance();

        self.collect_adjacent_parts(&mut end, &mut parts)?;

        Ok(Some(Word { parts, span: Span::new(start, end) }))
    }
}
