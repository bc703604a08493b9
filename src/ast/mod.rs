/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: Core AST definitions, the `Node` trait and the `Stmt`/`Expr` sum types
/// - expressions: Definitions for the expression node structs
/// - statements: Definitions for the statement node structs

// Every node struct keeps the token it was built from in a `token` field.
macro_rules! impl_node {
    ($($node:ty),+ $(,)?) => {
        $(
            impl $crate::ast::ast::Node for $node {
                fn token_literal(&self) -> &str {
                    &self.token.value
                }
            }
        )+
    };
}

pub mod ast;
pub mod expressions;
pub mod statements;
