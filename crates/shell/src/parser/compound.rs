// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Compound commands: groups, subshells, control flow, and function definitions.

use super::{ListStops, Parser};
use crate::ast::*;
use crate::parse_error::ParseError;
use crate::token::{self, Keyword, Span, TokenKind};

enum CompoundDelimiter {
    Paren,
    Brace,
}

impl CompoundDelimiter {
    fn closing_token(&self) -> TokenKind {
        match self {
            CompoundDelimiter::Paren => TokenKind::RParen,
            CompoundDelimiter::Brace => TokenKind::RBrace,
        }
    }

    fn closing_str(&self) -> &'static str {
        match self {
            CompoundDelimiter::Paren => "')'",
            CompoundDelimiter::Brace => "'}'",
        }
    }
}

const GROUP_BODY: ListStops = ListStops { keywords: &[], group_end: true, case_body: false };
const UNTIL_THEN: ListStops =
    ListStops { keywords: &[Keyword::Then], group_end: false, case_body: false };
const IF_BODY: ListStops = ListStops {
    keywords: &[Keyword::Elif, Keyword::Else, Keyword::Fi],
    group_end: false,
    case_body: false,
};
const UNTIL_DO: ListStops =
    ListStops { keywords: &[Keyword::Do], group_end: false, case_body: false };
const LOOP_BODY: ListStops =
    ListStops { keywords: &[Keyword::Done], group_end: false, case_body: false };
const CASE_BODY: ListStops =
    ListStops { keywords: &[Keyword::Esac], group_end: false, case_body: true };

impl Parser {
    pub(super) fn parse_subshell(&mut self) -> Result<Command, ParseError> {
        self.parse_compound_command(CompoundDelimiter::Paren)
    }

    /// POSIX requires a space after `{` and a `;` or newline before `}`.
    pub(super) fn parse_brace_group(&mut self) -> Result<Command, ParseError> {
        self.parse_compound_command(CompoundDelimiter::Brace)
    }

    /// Opening delimiter must already be identified via peek_kind(); this consumes it.
    fn parse_compound_command(&mut self, delimiter: CompoundDelimiter) -> Result<Command, ParseError> {
        let start = self.tokens[self.pos].span.start;
        self.pos += 1;

        let body = self.parse_body(GROUP_BODY, "command")?;

        match self.peek_kind() {
            Some(k) if *k == delimiter.closing_token() => {
                let mut end = self.tokens[self.pos].span.end;
                self.pos += 1;

                let mut redirections = Vec::new();
                while self.is_redirection_token() {
                    let redir = self.parse_redirection()?;
                    if let Some(span) = redir.target_span() {
                        end = span.end;
                    }
                    redirections.push(redir);
                }

                let span = Span::new(start, end);
                let boxed_body = Box::new(body);
                Ok(match delimiter {
                    CompoundDelimiter::Paren => {
                        Command::Subshell(Subshell { body: boxed_body, redirections, span })
                    }
                    CompoundDelimiter::Brace => {
                        Command::BraceGroup(BraceGroup { body: boxed_body, redirections, span })
                    }
                })
            }
            _ => Err(self.unexpected_token(delimiter.closing_str())),
        }
    }

    /// Grammar: 'if' list 'then' list ('elif' list 'then' list)* ('else' list)? 'fi'
    pub(super) fn parse_if(&mut self) -> Result<Command, ParseError> {
        let start = self.expect_keyword(Keyword::If)?;

        let cond = self.parse_body(UNTIL_THEN, "condition")?;
        self.expect_keyword(Keyword::Then)?;
        let then_body = self.parse_body(IF_BODY, "command")?;

        let mut elifs = Vec::new();
        while matches!(self.peek_kind(), Some(TokenKind::Keyword(Keyword::Elif))) {
            self.advance();
            let elif_cond = self.parse_body(UNTIL_THEN, "condition")?;
            self.expect_keyword(Keyword::Then)?;
            let elif_body = self.parse_body(IF_BODY, "command")?;
            elifs.push((elif_cond, elif_body));
        }

        let else_body = if matches!(self.peek_kind(), Some(TokenKind::Keyword(Keyword::Else))) {
            self.advance();
            Some(Box::new(self.parse_body(
                ListStops { keywords: &[Keyword::Fi], group_end: false, case_body: false },
                "command",
            )?))
        } else {
            None
        };

        let end = self.expect_keyword(Keyword::Fi)?;

        Ok(Command::If(IfCommand {
            cond: Box::new(cond),
            then_body: Box::new(then_body),
            elifs,
            else_body,
            span: start.merge(end),
        }))
    }

    /// Grammar: ('while' | 'until') list 'do' list 'done'
    pub(super) fn parse_loop(&mut self, until: bool) -> Result<Command, ParseError> {
        let start = if until {
            self.expect_keyword(Keyword::Until)?
        } else {
            self.expect_keyword(Keyword::While)?
        };

        let cond = self.parse_body(UNTIL_DO, "condition")?;
        self.expect_keyword(Keyword::Do)?;
        let body = self.parse_body(LOOP_BODY, "command")?;
        let end = self.expect_keyword(Keyword::Done)?;

        Ok(Command::Loop(LoopCommand {
            cond: Box::new(cond),
            body: Box::new(body),
            until,
            span: start.merge(end),
        }))
    }

    /// Grammar: 'for' name ('in' word*)? (';' | newline)* 'do' list 'done'
    ///
    /// Without an `in` clause the loop iterates the positional parameters.
    pub(super) fn parse_for(&mut self) -> Result<Command, ParseError> {
        let start = self.expect_keyword(Keyword::For)?;

        let name = match self.peek_kind() {
            Some(TokenKind::Word(w)) if token::is_valid_variable_name(w) => {
                let name = w.clone();
                self.advance();
                name
            }
            _ => return Err(self.unexpected_token("variable name")),
        };

        let words = if matches!(self.peek_kind(), Some(TokenKind::Keyword(Keyword::In))) {
            self.advance();
            let mut words = Vec::new();
            while let Some(word) = self.parse_word()? {
                words.push(word);
            }
            Some(words)
        } else {
            None
        };

        if matches!(self.peek_kind(), Some(TokenKind::Semi)) {
            self.advance();
        }
        self.skip_newlines();

        self.expect_keyword(Keyword::Do)?;
        let body = self.parse_body(LOOP_BODY, "command")?;
        let end = self.expect_keyword(Keyword::Done)?;

        Ok(Command::For(ForCommand {
            name,
            words,
            body: Box::new(body),
            span: start.merge(end),
        }))
    }

    /// Grammar: 'case' word 'in' ('('? pattern ('|' pattern)* ')' list ';;'?)* 'esac'
    pub(super) fn parse_case(&mut self) -> Result<Command, ParseError> {
        let start = self.expect_keyword(Keyword::Case)?;

        let subject = self.parse_word()?.ok_or_else(|| self.unexpected_token("word"))?;

        self.skip_newlines();
        self.expect_keyword(Keyword::In)?;

        let mut clauses = Vec::new();
        loop {
            self.skip_newlines();
            if matches!(self.peek_kind(), Some(TokenKind::Keyword(Keyword::Esac))) {
                break;
            }
            if self.at_end() {
                return Err(self.unexpected_token("'esac'"));
            }

            // Optional leading `(` before the first pattern.
            if matches!(self.peek_kind(), Some(TokenKind::LParen)) {
                self.advance();
            }

            let first = self.parse_word()?.ok_or_else(|| self.unexpected_token("pattern"))?;
            let clause_start = first.span;
            let mut patterns = vec![first];
            while matches!(self.peek_kind(), Some(TokenKind::Pipe)) {
                self.advance();
                let pat = self.parse_word()?.ok_or_else(|| self.unexpected_token("pattern"))?;
                patterns.push(pat);
            }

            match self.peek_kind() {
                Some(TokenKind::RParen) => {
                    self.advance();
                }
                _ => return Err(self.unexpected_token("')'")),
            }

            // Clause bodies may be empty (`foo) ;;`).
            let body = self.parse_command_list(CASE_BODY)?;
            let clause_end = if body.span.is_empty() { clause_start } else { body.span };

            if matches!(self.peek_kind(), Some(TokenKind::DblSemi)) {
                self.advance();
            }

            clauses.push(CaseClause { patterns, body, span: clause_start.merge(clause_end) });
        }

        let end = self.expect_keyword(Keyword::Esac)?;

        Ok(Command::Case(CaseCommand { subject, clauses, span: start.merge(end) }))
    }

    /// Grammar: 'function' name ('(' ')')? (group | subshell)
    pub(super) fn parse_function_keyword(&mut self) -> Result<Command, ParseError> {
        let start = self.expect_keyword(Keyword::Function)?;

        let name = match self.peek_kind() {
            Some(TokenKind::Word(w)) if token::is_valid_variable_name(w) => {
                let name = w.clone();
                self.advance();
                name
            }
            _ => return Err(self.unexpected_token("function name")),
        };

        if matches!(self.peek_kind(), Some(TokenKind::LParen))
            && matches!(self.peek_kind_at(1), Some(TokenKind::RParen))
        {
            self.advance();
            self.advance();
        }
        self.skip_newlines();

        let body = self.parse_function_body()?;
        let span = start.merge(body.span());
        Ok(Command::FunctionDef(FunctionDef { name, body: Box::new(body), span }))
    }

    /// Grammar: name '(' ')' (group | subshell)
    ///
    /// Returns `Ok(None)` when the lookahead does not match, leaving the
    /// parser position untouched so simple-command parsing can proceed.
    pub(super) fn try_parse_function_parens(&mut self) -> Result<Option<Command>, ParseError> {
        let name = match (self.peek_kind(), self.peek_kind_at(1), self.peek_kind_at(2)) {
            (Some(TokenKind::Word(w)), Some(TokenKind::LParen), Some(TokenKind::RParen))
                if token::is_valid_variable_name(w) =>
            {
                w.clone()
            }
            _ => return Ok(None),
        };

        let start = self.tokens[self.pos].span;
        self.advance(); // name
        self.advance(); // (
        self.advance(); // )
        self.skip_newlines();

        let body = self.parse_function_body()?;
        let span = start.merge(body.span());
        Ok(Some(Command::FunctionDef(FunctionDef { name, body: Box::new(body), span })))
    }

    /// A function body must be a brace group or a subshell.
    fn parse_function_body(&mut self) -> Result<Command, ParseError> {
        match self.peek_kind() {
            Some(TokenKind::LBrace) => self.parse_brace_group(),
            Some(TokenKind::LParen) => self.parse_subshell(),
            _ => Err(self.unexpected_token("'{' or '('")),
        }
    }

    /// Grammar: '[[' raw-word* ']]'
    ///
    /// The conditional command has its own lexical rules: `&&`, `||`, `!`,
    /// `(`, `)`, `<`, and `>` are operands, not shell operators, and the
    /// evaluator never field-splits the expanded words. The parser collects
    /// everything up to `]]` as words of a simple command named `[[`.
    pub(super) fn parse_cond_command(&mut self) -> Result<Command, ParseError> {
        let start = self.tokens[self.pos].span;
        self.advance(); // consume [[

        let name = Word { parts: vec![WordPart::literal("[[")], span: start };
        let mut args = Vec::new();
        let end;

        loop {
            match self.peek_kind() {
                None => return Err(ParseError::UnexpectedEof { expected: "']]'".to_string() }),
                Some(TokenKind::Word(w)) if w == "]]" => {
                    end = self.tokens[self.pos].span;
                    self.advance();
                    break;
                }
                Some(
                    TokenKind::And
                    | TokenKind::Or
                    | TokenKind::LParen
                    | TokenKind::RParen
                    | TokenKind::RedirectIn { fd: None }
                    | TokenKind::RedirectOut { fd: None }
                    | TokenKind::Keyword(Keyword::Bang),
                ) => {
                    let span = self.tokens[self.pos].span;
                    let text = match &self.tokens[self.pos].kind {
                        TokenKind::And => "&&",
                        TokenKind::Or => "||",
                        TokenKind::LParen => "(",
                        TokenKind::RParen => ")",
                        TokenKind::RedirectIn { .. } => "<",
                        TokenKind::RedirectOut { .. } => ">",
                        TokenKind::Keyword(Keyword::Bang) => "!",
                        _ => unreachable!("match arm verified the kind"),
                    };
                    args.push(Word { parts: vec![WordPart::literal(text)], span });
                    self.advance();
                }
                _ => match self.parse_word()? {
                    Some(word) => args.push(word),
                    None => return Err(self.unexpected_token("']]'")),
                },
            }
        }

        Ok(Command::Simple(SimpleCommand {
            assignments: vec![],
            name,
            args,
            redirections: vec![],
            span: start.merge(end),
        }))
    }
}
