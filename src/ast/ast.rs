use std::{
    fmt::{self, Display},
    slice::Iter,
};

use super::{
    expressions::{
        BooleanLiteral, CallExpr, FunctionLiteral, Identifier, IfExpr, InfixExpr,
        IntegerLiteral, PrefixExpr,
    },
    statements::{BlockStmt, ExpressionStmt, LetStmt, ReturnStmt},
};

/// Node Trait
///
/// Shared by every statement and expression. `Display` renders the node
/// back to source-like text, fully parenthesised for operators.
pub trait Node: Display {
    /// Literal text of the token the node was built from.
    fn token_literal(&self) -> &str;
}

/// Statement
///
/// Closed set of statement kinds; callers match on it exhaustively.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Let(LetStmt),
    Return(ReturnStmt),
    Expression(ExpressionStmt),
    Block(BlockStmt),
}

impl Node for Stmt {
    fn token_literal(&self) -> &str {
        match self {
            Stmt::Let(stmt) => stmt.token_literal(),
            Stmt::Return(stmt) => stmt.token_literal(),
            Stmt::Expression(stmt) => stmt.token_literal(),
            Stmt::Block(stmt) => stmt.token_literal(),
        }
    }
}

impl Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::Let(stmt) => Display::fmt(stmt, f),
            Stmt::Return(stmt) => Display::fmt(stmt, f),
            Stmt::Expression(stmt) => Display::fmt(stmt, f),
            Stmt::Block(stmt) => Display::fmt(stmt, f),
        }
    }
}

/// Expression
///
/// Closed set of expression kinds; recursive children are boxed inside
/// the node structs.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Identifier(Identifier),
    Integer(IntegerLiteral),
    Boolean(BooleanLiteral),
    Prefix(PrefixExpr),
    Infix(InfixExpr),
    If(IfExpr),
    Function(FunctionLiteral),
    Call(CallExpr),
}

impl Node for Expr {
    fn token_literal(&self) -> &str {
        match self {
            Expr::Identifier(expr) => expr.token_literal(),
            Expr::Integer(expr) => expr.token_literal(),
            Expr::Boolean(expr) => expr.token_literal(),
            Expr::Prefix(expr) => expr.token_literal(),
            Expr::Infix(expr) => expr.token_literal(),
            Expr::If(expr) => expr.token_literal(),
            Expr::Function(expr) => expr.token_literal(),
            Expr::Call(expr) => expr.token_literal(),
        }
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Identifier(expr) => Display::fmt(expr, f),
            Expr::Integer(expr) => Display::fmt(expr, f),
            Expr::Boolean(expr) => Display::fmt(expr, f),
            Expr::Prefix(expr) => Display::fmt(expr, f),
            Expr::Infix(expr) => Display::fmt(expr, f),
            Expr::If(expr) => Display::fmt(expr, f),
            Expr::Function(expr) => Display::fmt(expr, f),
            Expr::Call(expr) => Display::fmt(expr, f),
        }
    }
}

/// Root of every parse: the top-level statements in source order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

impl Program {
    pub fn new() -> Self {
        Program { statements: vec![] }
    }

    pub fn iter(&self) -> Iter<'_, Stmt> {
        self.statements.iter()
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

impl Node for Program {
    fn token_literal(&self) -> &str {
        self.statements
            .first()
            .map_or("", |stmt| stmt.token_literal())
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_statements(f, &self.statements)
    }
}

/// Writes a statement list separated by spaces.
///
/// Expression statements carry no terminator of their own, so every one
/// but the last gets a `;` to keep it from running into the next.
pub(crate) fn write_statements(f: &mut fmt::Formatter<'_>, statements: &[Stmt]) -> fmt::Result {
    for (i, stmt) in statements.iter().enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        write!(f, "{}", stmt)?;

        if matches!(stmt, Stmt::Expression(_)) && i + 1 < statements.len() {
            write!(f, ";")?;
        }
    }

    Ok(())
}
