// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Quote handling (single and double quoted strings).

use super::{Lexer, LexerError};
use crate::ast::{SubstitutionBody, WordPart};
use crate::token::{self, Span, Token, TokenKind};

impl Lexer<'_> {
    /// Lex a single-quoted string. Content is preserved literally with no escape processing.
    pub(super) fn lex_single_quote(&mut self, start: usize) -> Result<Token, LexerError> {
        self.chars.next(); // consume opening '
        let content_start = start + 1;
        let mut content_end = content_start;
        while let Some(&(pos, ch)) = self.chars.peek() {
            if ch == '\'' {
                let content = self.input[content_start..content_end].to_string();
                self.chars.next(); // consume closing '
                return Ok(Token::new(TokenKind::SingleQuoted(content), Span::new(start, pos + 1)));
            }
            content_end = pos + ch.len_utf8();
            self.chars.next();
        }
        Err(LexerError::UnterminatedSingleQuote { span: Span::new(start, content_end) })
    }

    /// Lex a double-quoted string.
    ///
    /// Backslash escapes only the characters POSIX gives it power over inside
    /// double quotes (`$`, `` ` ``, `"`, `\`, newline); before anything else
    /// it stays literal. Variable references, command substitutions, and
    /// arithmetic expansions are parsed into separate parts flagged as quoted
    /// so the expander skips field splitting and globbing for them.
    pub(super) fn lex_double_quote(&mut self, start: usize) -> Result<Token, LexerError> {
        self.chars.next(); // consume opening "
        let mut parts: Vec<WordPart> = Vec::new();
        let mut current_literal = String::new();
        let mut last_pos = start + 1;

        while let Some(&(pos, ch)) = self.chars.peek() {
            last_pos = pos + ch.len_utf8();
            match ch {
                '"' => {
                    if !current_literal.is_empty() || parts.is_empty() {
                        // Preserve a lone empty literal so `""` stays a word.
                        parts.push(WordPart::double_quoted(current_literal));
                    }
                    self.chars.next();
                    return Ok(Token::new(TokenKind::DoubleQuoted(parts), Span::new(start, pos + 1)));
                }
                '\\' => {
                    self.chars.next();
                    let Some(&(esc_pos, esc_ch)) = self.chars.peek() else {
                        return Err(LexerError::TrailingBackslash { span: Span::new(pos, pos + 1) });
                    };
                    last_pos = esc_pos + esc_ch.len_utf8();
                    match esc_ch {
                        '\\' | '"' | '$' | '`' => current_literal.push(esc_ch),
                        '\n' => {} // line continuation inside quotes
                        _ => {
                            current_literal.push('\\');
                            current_literal.push(esc_ch);
                        }
                    }
                    self.chars.next();
                }
                '$' => {
                    if !current_literal.is_empty() {
                        parts.push(WordPart::double_quoted(std::mem::take(&mut current_literal)));
                    }
                    // Parse variable, command substitution, or arithmetic
                    let part = self.lex_quoted_dollar(pos)?;
                    parts.push(part);
                }
                '`' => {
                    if !current_literal.is_empty() {
                        parts.push(WordPart::double_quoted(std::mem::take(&mut current_literal)));
                    }
                    // Parse backtick command substitution
                    let part = self.lex_quoted_backtick(pos)?;
                    parts.push(part);
                }
                _ => {
                    current_literal.push(ch);
                    self.chars.next();
                }
            }
        }
        Err(LexerError::UnterminatedDoubleQuote { span: Span::new(start, last_pos) })
    }

    /// Lex a `$` inside a double-quoted string (variable, command
    /// substitution, or arithmetic expansion).
    fn lex_quoted_dollar(&mut self, start: usize) -> Result<WordPart, LexerError> {
        self.chars.next(); // consume $

        let Some(&(name_start, ch)) = self.chars.peek() else {
            // $ at end of string - treat as literal
            return Ok(WordPart::double_quoted("$"));
        };

        match ch {
            '(' => {
                self.chars.next(); // consume (
                let content = self.read_balanced_content('(', ')', start)?;
                if let Some(expr) = content.strip_prefix('(').and_then(|r| r.strip_suffix(')')) {
                    return Ok(WordPart::Arith { expr: expr.to_string(), quoted: true });
                }
                Ok(WordPart::CommandSubstitution {
                    body: SubstitutionBody::Unparsed(content),
                    backtick: false,
                    quoted: true,
                })
            }
            '{' => {
                self.chars.next(); // consume {
                self.lex_quoted_braced_variable(start)
            }
            _ if token::is_special_variable(ch) => {
                self.chars.next();
                Ok(WordPart::Variable { name: ch.to_string(), modifier: None, quoted: true })
            }
            _ if Self::is_valid_variable_start(ch) => {
                let name = self.scan_variable_name(name_start);
                Ok(WordPart::Variable { name, modifier: None, quoted: true })
            }
            _ => {
                // Not a variable - emit $ as literal
                Ok(WordPart::double_quoted("$"))
            }
        }
    }

    /// Lex a braced variable inside a double-quoted string.
    fn lex_quoted_braced_variable(&mut self, start: usize) -> Result<WordPart, LexerError> {
        let var = self.parse_braced_variable(start)?;
        Ok(WordPart::Variable { name: var.name, modifier: var.modifier, quoted: true })
    }

    /// Lex a backtick command substitution inside a double-quoted string.
    fn lex_quoted_backtick(&mut self, start: usize) -> Result<WordPart, LexerError> {
        self.chars.next(); // consume opening `

        let content = self.read_backtick_content(start)?;
        Ok(WordPart::CommandSubstitution {
            body: SubstitutionBody::Unparsed(content),
            backtick: true,
            quoted: true,
        })
    }
}
