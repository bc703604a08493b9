//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the parser that pulls tokens from the scanner
//! and builds the AST. It uses a Pratt parser for expressions with a
//! static precedence table and handles:
//!
//! - Statement parsing (let, return, expression and block statements)
//! - Expression parsing (prefix/infix operators, grouping, if, functions, calls)
//! - Error collection and recovery
//!
//! Expressions are parsed through prefix handlers (a token that starts an
//! expression) and infix handlers (a token between two operands), looked up
//! by token kind.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;

#[cfg(test)]
mod tests;
