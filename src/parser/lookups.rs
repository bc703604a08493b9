use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::{ast::ast::Expr, errors::errors::Error, lexer::tokens::TokenKind};

use super::{expr::*, parser::Parser};

/// Binding strength of an operator, weakest first.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug)]
pub enum Precedence {
    Lowest,
    Equals,      // == !=
    LessGreater, // < >
    Sum,         // + -
    Product,     // * /
    Prefix,      // -x !x
    Call,        // f(x)
}

lazy_static! {
    pub static ref PRECEDENCES: HashMap<TokenKind, Precedence> = {
        let mut map = HashMap::new();
        map.insert(TokenKind::Equals, Precedence::Equals);
        map.insert(TokenKind::NotEquals, Precedence::Equals);
        map.insert(TokenKind::Less, Precedence::LessGreater);
        map.insert(TokenKind::Greater, Precedence::LessGreater);
        map.insert(TokenKind::Plus, Precedence::Sum);
        map.insert(TokenKind::Dash, Precedence::Sum);
        map.insert(TokenKind::Star, Precedence::Product);
        map.insert(TokenKind::Slash, Precedence::Product);
        map.insert(TokenKind::OpenParen, Precedence::Call);
        map
    };
}

/// Precedence of `kind` as an infix operator, `Lowest` if it is not one.
pub fn precedence_of(kind: TokenKind) -> Precedence {
    PRECEDENCES
        .get(&kind)
        .copied()
        .unwrap_or(Precedence::Lowest)
}

pub type PrefixHandler = fn(&mut Parser) -> Result<Expr, Error>;
pub type InfixHandler = fn(&mut Parser, Expr) -> Result<Expr, Error>;

pub fn create_token_lookups(parser: &mut Parser) {
    // Equality and relational
    parser.infix(TokenKind::Equals, parse_infix_expr);
    parser.infix(TokenKind::NotEquals, parse_infix_expr);
    parser.infix(TokenKind::Less, parse_infix_expr);
    parser.infix(TokenKind::Greater, parse_infix_expr);

    // Additive and multiplicative
    parser.infix(TokenKind::Plus, parse_infix_expr);
    parser.infix(TokenKind::Dash, parse_infix_expr);
    parser.infix(TokenKind::Star, parse_infix_expr);
    parser.infix(TokenKind::Slash, parse_infix_expr);

    parser.infix(TokenKind::OpenParen, parse_call_expr);

    // Literals and symbols
    parser.prefix(TokenKind::Identifier, parse_identifier);
    parser.prefix(TokenKind::Integer, parse_integer_literal);
    parser.prefix(TokenKind::True, parse_boolean_literal);
    parser.prefix(TokenKind::False, parse_boolean_literal);
    parser.prefix(TokenKind::Not, parse_prefix_expr);
    parser.prefix(TokenKind::Dash, parse_prefix_expr);
    parser.prefix(TokenKind::OpenParen, parse_grouping_expr);
    parser.prefix(TokenKind::If, parse_if_expr);
    parser.prefix(TokenKind::Fn, parse_function_literal);
}

// Lookup tables inside parser struct, so it's easier
pub type PrefixLookup = HashMap<TokenKind, PrefixHandler>;
pub type InfixLookup = HashMap<TokenKind, InfixHandler>;
