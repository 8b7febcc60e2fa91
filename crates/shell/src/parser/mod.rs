// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shell parser that transforms tokens into an Abstract Syntax Tree.

mod compound;
mod redirections;
mod word;

use super::ast::*;
use super::lexer::Lexer;
use super::parse_error::{ParseError, MAX_PIPELINE_STAGES};
use super::token::{Keyword, Span, Token, TokenKind};

/// Stop set for a nested command list: the keywords and delimiters that end
/// it without being consumed.
#[derive(Clone, Copy, Default)]
struct ListStops {
    /// Keywords that terminate the list (e.g. `then`, `done`, `fi`).
    keywords: &'static [Keyword],
    /// Stop at `)` / `}` (subshell and brace group bodies).
    group_end: bool,
    /// Stop at `;;` (case clause bodies).
    case_body: bool,
}

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    input_len: usize,
}

impl Parser {
    /// Parse input string into a command list, or error on invalid syntax.
    pub fn parse(input: &str) -> Result<CommandList, ParseError> {
        let tokens = Lexer::tokenize(input)?;
        Self::parse_tokens(tokens, input.len())
    }

    /// Parse a pre-tokenized line.
    ///
    /// The interactive loop tokenizes first so alias expansion can splice the
    /// token stream before parsing.
    pub fn parse_tokens(tokens: Vec<Token>, input_len: usize) -> Result<CommandList, ParseError> {
        let mut parser = Parser { tokens, pos: 0, input_len };
        parser.parse_command_list(ListStops::default())
    }

    /// Grammar: and_or_list ((';' | '&' | '\n') and_or_list)*
    ///
    /// Stops (without consuming) at whatever `stops` names; at top level that
    /// is end of input only.
    fn parse_command_list(&mut self, stops: ListStops) -> Result<CommandList, ParseError> {
        let start = self.current_span_start();
        let mut items = Vec::new();

        self.skip_separators();

        while !(self.at_end() || self.at_stop(stops)) {
            let and_or = self.parse_and_or_list()?;

            let last_was_background = and_or
                .rest
                .last()
                .map(|(_, item)| item.background)
                .unwrap_or(and_or.first.background);

            items.push(and_or);

            if !last_was_background && !self.at_end() && !self.at_separator() && !self.at_stop(stops)
            {
                return Err(self.unexpected_token("';' or newline"));
            }
            self.skip_separators();
        }

        let end = self.current_span_end();
        Ok(CommandList { items, span: Span::new(start, end.max(start)) })
    }

    /// Parse a nested list and reject an empty one (`if ; then`, `{ }`).
    fn parse_body(&mut self, stops: ListStops, what: &str) -> Result<CommandList, ParseError> {
        let list = self.parse_command_list(stops)?;
        if list.items.is_empty() {
            return Err(match self.peek() {
                Some(token) => ParseError::UnexpectedToken {
                    found: token.kind.clone(),
                    expected: what.to_string(),
                    span: token.span,
                },
                None => ParseError::UnexpectedEof { expected: what.to_string() },
            });
        }
        Ok(list)
    }

    /// Grammar: command_item (('&&' | '||') command_item)*
    ///
    /// AND/OR have equal precedence, left-associative.
    /// A backgrounded command (`cmd &`) terminates the list.
    fn parse_and_or_list(&mut self) -> Result<AndOrList, ParseError> {
        let first = self.parse_command_item()?;
        let start_span = first.span;
        let mut rest = Vec::new();

        if first.background {
            return Ok(AndOrList { first, rest, span: start_span });
        }

        loop {
            let op = match self.peek_kind() {
                Some(TokenKind::And) => LogicalOp::And,
                Some(TokenKind::Or) => LogicalOp::Or,
                _ => break,
            };
            self.advance();
            // A newline may follow `&&` / `||` before the next command.
            self.skip_newlines();
            let item = self.parse_command_item()?;
            let is_background = item.background;
            rest.push((op, item));

            if is_background {
                break;
            }
        }

        let end_span = rest.last().map(|(_, item)| item.span).unwrap_or(start_span);

        Ok(AndOrList { first, rest, span: start_span.merge(end_span) })
    }

    /// Grammar: pipeline '&'?
    fn parse_command_item(&mut self) -> Result<CommandItem, ParseError> {
        let command = self.parse_pipeline()?;
        let start_span = command.span();

        let (background, end_span) = match self.peek_kind() {
            Some(TokenKind::Ampersand) => {
                let span = self.tokens[self.pos].span;
                self.pos += 1;
                (true, span)
            }
            _ => (false, start_span),
        };

        Ok(CommandItem { command, background, span: start_span.merge(end_span) })
    }

    /// Grammar: '!'? command ('|' command)*
    ///
    /// Pipe binds tighter than && and ||. Compound commands may be stages.
    fn parse_pipeline(&mut self) -> Result<Command, ParseError> {
        let bang_span = match self.peek_kind() {
            Some(TokenKind::Keyword(Keyword::Bang)) => {
                let span = self.tokens[self.pos].span;
                self.advance();
                Some(span)
            }
            _ => None,
        };

        let first = self.parse_command()?;

        if bang_span.is_none() && !matches!(self.peek_kind(), Some(TokenKind::Pipe)) {
            return Ok(first);
        }

        let start_span = bang_span.unwrap_or_else(|| first.span());
        let mut end_span = first.span();
        let mut stages = vec![first];

        while matches!(self.peek_kind(), Some(TokenKind::Pipe)) {
            let pipe_span = self.tokens[self.pos].span;
            self.advance();
            // A newline may follow `|` before the next stage.
            self.skip_newlines();
            if stages.len() >= MAX_PIPELINE_STAGES {
                return Err(ParseError::PipelineTooDeep { span: pipe_span });
            }
            let cmd = self.parse_command()?;
            end_span = cmd.span();
            stages.push(cmd);
        }

        Ok(Command::Pipeline(Pipeline {
            stages,
            negated: bang_span.is_some(),
            span: start_span.merge(end_span),
        }))
    }

    /// Grammar: simple | if | while | until | for | case | group | subshell | funcdef
    fn parse_command(&mut self) -> Result<Command, ParseError> {
        match self.peek_kind() {
            Some(TokenKind::LParen) => return self.parse_subshell(),
            // `{` opens a group only when it stands alone; glued to the next
            // token (`{x}`) it is ordinary word material.
            Some(TokenKind::LBrace) if !self.next_token_adjacent() => {
                return self.parse_brace_group();
            }
            Some(TokenKind::RBrace) | Some(TokenKind::RParen) => {
                return Err(self.unexpected_token("command"));
            }
            Some(TokenKind::Keyword(kw)) => {
                let kw = *kw;
                return match kw {
                    Keyword::If => self.parse_if(),
                    Keyword::While => self.parse_loop(false),
                    Keyword::Until => self.parse_loop(true),
                    Keyword::For => self.parse_for(),
                    Keyword::Case => self.parse_case(),
                    Keyword::Function => self.parse_function_keyword(),
                    // `!` is handled by parse_pipeline; anything else is a
                    // stray terminator (`then`, `done`, …).
                    _ => Err(self.unexpected_token("command")),
                };
            }
            Some(TokenKind::Word(w)) if w == "[[" => return self.parse_cond_command(),
            Some(TokenKind::Word(_)) => {
                if let Some(cmd) = self.try_parse_function_parens()? {
                    return Ok(cmd);
                }
            }
            _ => {}
        }

        Ok(Command::Simple(self.parse_simple_command()?))
    }

    /// Grammar: assignment* word word* redir*
    ///
    /// Word tokens matching NAME=VALUE at command-start position are parsed as assignments.
    fn parse_simple_command(&mut self) -> Result<SimpleCommand, ParseError> {
        let start_span = self.peek().map(|t| t.span).unwrap_or_else(|| Span::empty(0));

        let mut assignments = Vec::new();
        while let Some(Token { kind: TokenKind::Word(word), span }) = self.peek().cloned() {
            let Some((name, value_after_eq)) = Self::try_parse_assignment_word(&word) else {
                break;
            };

            self.advance();

            let value_start = span.start + name.len() + 1; // After "NAME="
            let mut value_end = span.end;
            let mut parts = Vec::new();

            if !value_after_eq.is_empty() {
                parts.push(WordPart::literal(value_after_eq.to_string()));
            }

            self.collect_adjacent_parts(&mut value_end, &mut parts)?;

            // Empty literal for the bare `VAR=` case
            if parts.is_empty() {
                parts.push(WordPart::literal(String::new()));
            }

            assignments.push(Assignment {
                name: name.to_string(),
                value: Word { parts, span: Span::new(value_start, value_end) },
                span,
            });
        }

        // A stray terminator keyword cannot begin a command.
        if matches!(self.peek_kind(), Some(TokenKind::Keyword(_))) {
            return Err(self.unexpected_token("command"));
        }

        match self.parse_word()? {
            Some(name) => {
                let mut args = Vec::new();
                let mut redirections = Vec::new();
                let mut end_span = name.span;

                loop {
                    if self.is_redirection_token() {
                        let redir = self.parse_redirection()?;
                        if let Some(span) = redir.target_span() {
                            end_span = span;
                        }
                        redirections.push(redir);
                    } else if let Some(word) = self.parse_word()? {
                        end_span = word.span;
                        args.push(word);
                    } else {
                        break;
                    }
                }

                let span = start_span.merge(end_span);
                Ok(SimpleCommand { assignments, name, args, redirections, span })
            }
            None => {
                if self.is_redirection_token() {
                    // Redirection-only command (`> file`), or redirections
                    // after assignments.
                    let mut redirections = Vec::new();
                    let mut end_span = start_span;
                    while self.is_redirection_token() {
                        let redir = self.parse_redirection()?;
                        if let Some(span) = redir.target_span() {
                            end_span = span;
                        }
                        redirections.push(redir);
                    }
                    Ok(SimpleCommand {
                        assignments,
                        name: Word::empty(start_span.start),
                        args: vec![],
                        redirections,
                        span: start_span.merge(end_span),
                    })
                } else if !assignments.is_empty() {
                    Ok(SimpleCommand {
                        assignments,
                        name: Word::empty(start_span.start),
                        args: vec![],
                        redirections: vec![],
                        span: start_span,
                    })
                } else {
                    Err(self.unexpected_token("command"))
                }
            }
        }
    }

    #[inline]
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    #[inline]
    fn peek_kind(&self) -> Option<&TokenKind> {
        self.peek().map(|t| &t.kind)
    }

    #[inline]
    fn peek_kind_at(&self, offset: usize) -> Option<&TokenKind> {
        self.tokens.get(self.pos + offset).map(|t| &t.kind)
    }

    /// True when the token after the current one starts where this one ends.
    #[inline]
    fn next_token_adjacent(&self) -> bool {
        match (self.tokens.get(self.pos), self.tokens.get(self.pos + 1)) {
            (Some(a), Some(b)) => a.span.end == b.span.start,
            _ => false,
        }
    }

    #[inline]
    fn advance(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    #[inline]
    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    #[inline]
    fn at_separator(&self) -> bool {
        matches!(self.peek_kind(), Some(TokenKind::Semi | TokenKind::Newline))
    }

    fn at_stop(&self, stops: ListStops) -> bool {
        match self.peek_kind() {
            Some(TokenKind::Keyword(kw)) => stops.keywords.contains(kw),
            Some(TokenKind::RParen | TokenKind::RBrace) => stops.group_end,
            Some(TokenKind::DblSemi) => stops.case_body,
            _ => false,
        }
    }

    fn skip_separators(&mut self) {
        while self.at_separator() {
            self.advance();
        }
    }

    fn skip_newlines(&mut self) {
        while matches!(self.peek_kind(), Some(TokenKind::Newline)) {
            self.advance();
        }
    }

    fn current_span_start(&self) -> usize {
        self.peek().map(|t| t.span.start).unwrap_or(0)
    }

    fn current_span_end(&self) -> usize {
        if self.pos > 0 {
            self.tokens[self.pos - 1].span.end
        } else if !self.tokens.is_empty() {
            0
        } else {
            self.input_len
        }
    }

    fn unexpected_token(&self, expected: &str) -> ParseError {
        match self.peek() {
            Some(token) => ParseError::UnexpectedToken {
                found: token.kind.clone(),
                expected: expected.to_string(),
                span: token.span,
            },
            None => ParseError::UnexpectedEof { expected: expected.to_string() },
        }
    }

    /// Consume the given keyword or fail with what was expected.
    fn expect_keyword(&mut self, kw: Keyword) -> Result<Span, ParseError> {
        match self.peek_kind() {
            Some(TokenKind::Keyword(k)) if *k == kw => {
                let span = self.tokens[self.pos].span;
                self.advance();
                Ok(span)
            }
            _ => Err(self.unexpected_token(&format!("'{}'", kw.as_str()))),
        }
    }
}

#[cfg(test)]
#[path = "../parser_tests/mod.rs"]
mod tests;
