//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the program loop.
//! The parser keeps two tokens from the scanner (current and peek) and
//! dispatches expression parsing through lookup tables of:
//! - Prefix handlers, for tokens that start an expression
//! - Infix handlers, for operators between two operands
//!
//! Errors never abort the whole parse. Each failed statement is dropped,
//! its error is recorded, and parsing resumes at the next token.

use std::collections::HashMap;

use tracing::debug;

use crate::{
    ast::ast::Program,
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::Lexer,
        tokens::{Token, TokenKind},
    },
};

use super::{
    lookups::{
        create_token_lookups, precedence_of, InfixHandler, InfixLookup, Precedence,
        PrefixHandler, PrefixLookup,
    },
    stmt::parse_stmt,
};

/// Deepest expression nesting accepted before a statement is abandoned.
pub const MAX_NESTING_DEPTH: usize = 64;

/// The main parser structure that maintains parsing state.
///
/// One `Parser` serves one parse session over one scanner. It is not
/// meant to be shared between threads.
pub struct Parser {
    /// Source of tokens
    lexer: Lexer,
    /// Token under examination
    cur_token: Token,
    /// One token of lookahead
    peek_token: Token,
    /// Errors collected so far, in the order they were found
    errors: Vec<Error>,
    /// Expressions currently being parsed, outermost included
    depth: usize,
    /// Lookup table for prefix expression handlers
    prefix_lookup: PrefixLookup,
    /// Lookup table for infix expression handlers
    infix_lookup: InfixLookup,
}

impl Parser {
    /// Creates a new Parser and loads the current and peek tokens.
    ///
    /// # Arguments
    ///
    /// * `lexer` - Scanner to pull tokens from
    pub fn new(mut lexer: Lexer) -> Self {
        let cur_token = lexer.next_token();
        let peek_token = lexer.next_token();

        let mut parser = Parser {
            lexer,
            cur_token,
            peek_token,
            errors: vec![],
            depth: 0,
            prefix_lookup: HashMap::new(),
            infix_lookup: HashMap::new(),
        };
        create_token_lookups(&mut parser);

        parser
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.cur_token
    }

    /// Returns the lookahead token without advancing.
    pub fn peek_token(&self) -> &Token {
        &self.peek_token
    }

    /// Shifts the peek token into the current slot and pulls a new one.
    pub fn next_token(&mut self) {
        let next = self.lexer.next_token();
        self.cur_token = std::mem::replace(&mut self.peek_token, next);
    }

    pub fn cur_token_is(&self, kind: TokenKind) -> bool {
        self.cur_token.kind == kind
    }

    pub fn peek_token_is(&self, kind: TokenKind) -> bool {
        self.peek_token.kind == kind
    }

    /// Advances only if the peek token is of the expected kind.
    ///
    /// # Returns
    ///
    /// Returns Ok(()) after advancing, otherwise an `UnexpectedToken` error
    /// positioned at the peek token. The parser does not move on failure.
    pub fn expect_peek(&mut self, expected: TokenKind) -> Result<(), Error> {
        if self.peek_token_is(expected) {
            self.next_token();
            Ok(())
        } else {
            Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    expected,
                    found: self.peek_token.kind,
                },
                self.peek_token.span.start,
            ))
        }
    }

    pub fn peek_precedence(&self) -> Precedence {
        precedence_of(self.peek_token.kind)
    }

    pub fn cur_precedence(&self) -> Precedence {
        precedence_of(self.cur_token.kind)
    }

    /// Enters one more level of expression nesting.
    ///
    /// Fails with `NestingTooDeep` at the current token once
    /// [`MAX_NESTING_DEPTH`] levels are open. Every successful call must be
    /// paired with [`Parser::leave_nesting`].
    pub fn enter_nesting(&mut self) -> Result<(), Error> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(Error::new(
                ErrorImpl::NestingTooDeep {
                    limit: MAX_NESTING_DEPTH,
                },
                self.cur_token.span.start,
            ));
        }

        self.depth += 1;
        Ok(())
    }

    pub fn leave_nesting(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Registers a prefix handler for a token.
    ///
    /// # Arguments
    ///
    /// * `kind` - The token kind to register
    /// * `handler` - Called with the parser positioned on that token
    pub fn prefix(&mut self, kind: TokenKind, handler: PrefixHandler) {
        self.prefix_lookup.insert(kind, handler);
    }

    /// Registers an infix handler for a token.
    ///
    /// # Arguments
    ///
    /// * `kind` - The token kind to register
    /// * `handler` - Called with the parser positioned on the operator and the parsed left operand
    pub fn infix(&mut self, kind: TokenKind, handler: InfixHandler) {
        self.infix_lookup.insert(kind, handler);
    }

    pub fn get_prefix_handler(&self, kind: TokenKind) -> Option<PrefixHandler> {
        self.prefix_lookup.get(&kind).copied()
    }

    pub fn get_infix_handler(&self, kind: TokenKind) -> Option<InfixHandler> {
        self.infix_lookup.get(&kind).copied()
    }

    /// Adds an error to the session's list.
    pub fn record_error(&mut self, error: Error) {
        debug!(
            error = %error,
            position = error.get_position().0,
            "recorded parse error"
        );
        self.errors.push(error);
    }

    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<Error> {
        self.errors
    }

    /// Parses statements until the end of input.
    ///
    /// Failed statements are left out of the returned `Program`; check
    /// [`Parser::errors`] afterwards, the tree may be partial.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn parse_program(&mut self) -> Program {
        let mut program = Program::new();

        while !self.cur_token_is(TokenKind::EOF) {
            match parse_stmt(self) {
                Ok(stmt) => program.statements.push(stmt),
                Err(error) => self.record_error(error),
            }

            self.next_token();
        }

        debug!(
            statements = program.len(),
            errors = self.errors.len(),
            "parsed program"
        );

        program
    }
}

/// Parses `source` into a Program.
///
/// This is the main entry point for parsing. It builds a fresh scanner and
/// parser for the source and runs them to the end of input.
///
/// # Returns
///
/// A tuple containing:
/// - The Program, holding every statement that parsed successfully
/// - Every error found, in source order; empty when the parse was clean
pub fn parse(source: &str) -> (Program, Vec<Error>) {
    let mut parser = Parser::new(Lexer::new(source));
    let program = parser.parse_program();

    (program, parser.into_errors())
}
