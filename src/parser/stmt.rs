use tracing::trace;

use crate::{
    ast::{
        ast::Stmt,
        statements::{BlockStmt, ExpressionStmt, LetStmt, ReturnStmt},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{
    expr::{identifier_from, parse_expr},
    lookups::Precedence,
    parser::Parser,
};

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    match parser.current_token().kind {
        TokenKind::Let => parse_let_stmt(parser),
        TokenKind::Return => parse_return_stmt(parser),
        _ => parse_expression_stmt(parser),
    }
}

// let <identifier> = <expression>;
pub fn parse_let_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    trace!("parse_let_stmt");
    let token = parser.current_token().clone();

    parser.expect_peek(TokenKind::Identifier)?;
    let name = identifier_from(parser.current_token());

    parser.expect_peek(TokenKind::Assignment)?;
    parser.next_token();
    let value = parse_expr(parser, Precedence::Lowest)?;

    if parser.peek_token_is(TokenKind::Semicolon) {
        parser.next_token();
    }

    Ok(Stmt::Let(LetStmt { token, name, value }))
}

// return <expression>;
pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    trace!("parse_return_stmt");
    let token = parser.current_token().clone();

    parser.next_token();
    let value = parse_expr(parser, Precedence::Lowest)?;

    if parser.peek_token_is(TokenKind::Semicolon) {
        parser.next_token();
    }

    Ok(Stmt::Return(ReturnStmt { token, value }))
}

pub fn parse_expression_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let token = parser.current_token().clone();
    let expression = parse_expr(parser, Precedence::Lowest)?;

    if parser.peek_token_is(TokenKind::Semicolon) {
        parser.next_token();
    }

    Ok(Stmt::Expression(ExpressionStmt { token, expression }))
}

/// Parses `{ ... }` with the current token on the opening brace and leaves
/// the current token on the closing brace.
///
/// Statements that fail inside the block are recorded and skipped, the block
/// keeps the rest. Running out of input before the `}` fails the whole block.
pub fn parse_block_stmt(parser: &mut Parser) -> Result<BlockStmt, Error> {
    trace!("parse_block_stmt");
    let token = parser.current_token().clone();
    let mut statements = vec![];

    parser.next_token();

    while !parser.cur_token_is(TokenKind::CloseCurly) {
        if parser.cur_token_is(TokenKind::EOF) {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    expected: TokenKind::CloseCurly,
                    found: TokenKind::EOF,
                },
                parser.current_token().span.start,
            ));
        }

        match parse_stmt(parser) {
            Ok(stmt) => statements.push(stmt),
            Err(error) => {
                parser.record_error(error);

                // A statement that broke off on the closing brace leaves it for the block
                if parser.cur_token_is(TokenKind::CloseCurly) {
                    break;
                }
            }
        }

        parser.next_token();
    }

    Ok(BlockStmt { token, statements })
}
