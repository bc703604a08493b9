use tracing::trace;

use crate::{
    ast::{
        ast::Expr,
        expressions::{
            BooleanLiteral, CallExpr, FunctionLiteral, Identifier, IfExpr, InfixExpr,
            IntegerLiteral, PrefixExpr,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
};

use super::{lookups::Precedence, parser::Parser, stmt::parse_block_stmt};

/// Parses an expression whose operators bind tighter than `precedence`.
///
/// On entry the current token starts the expression; on return it is the
/// expression's last token.
///
/// Each call holds one nesting level on the parser while it runs.
pub fn parse_expr(parser: &mut Parser, precedence: Precedence) -> Result<Expr, Error> {
    parser.enter_nesting()?;
    let result = parse_nested_expr(parser, precedence);
    parser.leave_nesting();

    result
}

fn parse_nested_expr(parser: &mut Parser, precedence: Precedence) -> Result<Expr, Error> {
    let token = parser.current_token();
    trace!(token = %token.kind, ?precedence, "parse_expr");

    let Some(prefix) = parser.get_prefix_handler(token.kind) else {
        return Err(Error::new(
            ErrorImpl::NoPrefixParseFn {
                kind: token.kind,
                token: token.value.clone(),
            },
            token.span.start,
        ));
    };

    let mut left = prefix(parser)?;

    // Operators that bind tighter than `precedence` take `left` as their lhs.
    // Passing the operator's own precedence down keeps equal levels left-associative.
    while !parser.peek_token_is(TokenKind::Semicolon) && precedence < parser.peek_precedence() {
        let Some(infix) = parser.get_infix_handler(parser.peek_token().kind) else {
            return Ok(left);
        };

        parser.next_token();
        left = infix(parser, left)?;
    }

    Ok(left)
}

pub(crate) fn identifier_from(token: &Token) -> Identifier {
    Identifier {
        token: token.clone(),
        value: token.value.clone(),
    }
}

pub fn parse_identifier(parser: &mut Parser) -> Result<Expr, Error> {
    Ok(Expr::Identifier(identifier_from(parser.current_token())))
}

pub fn parse_integer_literal(parser: &mut Parser) -> Result<Expr, Error> {
    trace!("parse_integer_literal");
    let token = parser.current_token().clone();

    match token.value.parse::<i64>() {
        Ok(value) => Ok(Expr::Integer(IntegerLiteral { token, value })),
        Err(_) => Err(Error::new(
            ErrorImpl::IntegerParseError {
                literal: token.value.clone(),
            },
            token.span.start,
        )),
    }
}

pub fn parse_boolean_literal(parser: &mut Parser) -> Result<Expr, Error> {
    trace!("parse_boolean_literal");
    let token = parser.current_token().clone();

    Ok(Expr::Boolean(BooleanLiteral {
        value: token.is(TokenKind::True),
        token,
    }))
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    trace!("parse_prefix_expr");
    let operator_token = parser.current_token().clone();

    parser.next_token();
    let right = parse_expr(parser, Precedence::Prefix)?;

    Ok(Expr::Prefix(PrefixExpr {
        operator: operator_token.value.clone(),
        token: operator_token,
        right: Box::new(right),
    }))
}

pub fn parse_infix_expr(parser: &mut Parser, left: Expr) -> Result<Expr, Error> {
    trace!("parse_infix_expr");
    let operator_token = parser.current_token().clone();
    let precedence = parser.cur_precedence();

    parser.next_token();
    let right = parse_expr(parser, precedence)?;

    Ok(Expr::Infix(InfixExpr {
        operator: operator_token.value.clone(),
        token: operator_token,
        left: Box::new(left),
        right: Box::new(right),
    }))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    trace!("parse_grouping_expr");
    parser.next_token();

    let expr = parse_expr(parser, Precedence::Lowest)?;
    parser.expect_peek(TokenKind::CloseParen)?;

    Ok(expr)
}

// if (<condition>) { ... } else { ... }
pub fn parse_if_expr(parser: &mut Parser) -> Result<Expr, Error> {
    trace!("parse_if_expr");
    let token = parser.current_token().clone();

    parser.expect_peek(TokenKind::OpenParen)?;
    parser.next_token();
    let condition = parse_expr(parser, Precedence::Lowest)?;
    parser.expect_peek(TokenKind::CloseParen)?;

    parser.expect_peek(TokenKind::OpenCurly)?;
    let consequence = parse_block_stmt(parser)?;

    let alternative = if parser.peek_token_is(TokenKind::Else) {
        parser.next_token();
        parser.expect_peek(TokenKind::OpenCurly)?;
        Some(parse_block_stmt(parser)?)
    } else {
        None
    };

    Ok(Expr::If(IfExpr {
        token,
        condition: Box::new(condition),
        consequence,
        alternative,
    }))
}

// fn(<parameters>) { ... }
pub fn parse_function_literal(parser: &mut Parser) -> Result<Expr, Error> {
    trace!("parse_function_literal");
    let token = parser.current_token().clone();

    parser.expect_peek(TokenKind::OpenParen)?;
    let parameters = parse_function_parameters(parser)?;

    parser.expect_peek(TokenKind::OpenCurly)?;
    let body = parse_block_stmt(parser)?;

    Ok(Expr::Function(FunctionLiteral {
        token,
        parameters,
        body,
    }))
}

/// Parses `a, b, c)` with the current token on the opening parenthesis.
pub fn parse_function_parameters(parser: &mut Parser) -> Result<Vec<Identifier>, Error> {
    let mut parameters = vec![];

    if parser.peek_token_is(TokenKind::CloseParen) {
        parser.next_token();
        return Ok(parameters);
    }

    parser.expect_peek(TokenKind::Identifier)?;
    parameters.push(identifier_from(parser.current_token()));

    while parser.peek_token_is(TokenKind::Comma) {
        parser.next_token();
        parser.expect_peek(TokenKind::Identifier)?;
        parameters.push(identifier_from(parser.current_token()));
    }

    parser.expect_peek(TokenKind::CloseParen)?;

    Ok(parameters)
}

pub fn parse_call_expr(parser: &mut Parser, callee: Expr) -> Result<Expr, Error> {
    trace!("parse_call_expr");
    let token = parser.current_token().clone();
    let arguments = parse_call_arguments(parser)?;

    Ok(Expr::Call(CallExpr {
        token,
        callee: Box::new(callee),
        arguments,
    }))
}

/// Parses `x, y + 1)` with the current token on the opening parenthesis.
pub fn parse_call_arguments(parser: &mut Parser) -> Result<Vec<Expr>, Error> {
    let mut arguments = vec![];

    if parser.peek_token_is(TokenKind::CloseParen) {
        parser.next_token();
        return Ok(arguments);
    }

    parser.next_token();
    arguments.push(parse_expr(parser, Precedence::Lowest)?);

    while parser.peek_token_is(TokenKind::Comma) {
        parser.next_token();
        parser.next_token();
        arguments.push(parse_expr(parser, Precedence::Lowest)?);
    }

    parser.expect_peek(TokenKind::CloseParen)?;

    Ok(arguments)
}
