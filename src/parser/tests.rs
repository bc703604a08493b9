//! Unit tests for the parser module.
//!
//! This module contains tests for parsing the language constructs including:
//! - Let and return statements
//! - Identifiers, integer and boolean literals
//! - Prefix and infix operators, and their precedence
//! - If expressions, function literals and calls
//! - Error reporting and recovery

use crate::{
    ast::{
        ast::{Expr, Node, Program, Stmt},
        expressions::Identifier,
    },
    errors::errors::ErrorImpl,
    lexer::{lexer::Lexer, tokens::TokenKind},
};

use super::parser::{parse, Parser, MAX_NESTING_DEPTH};

fn parse_clean(source: &str) -> Program {
    let (program, errors) = parse(source);
    let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();

    assert!(errors.is_empty(), "source {:?} had errors: {:?}", source, messages);
    program
}

fn single_expression(source: &str) -> Expr {
    let program = parse_clean(source);
    assert_eq!(program.len(), 1, "source {:?}", source);

    match &program.statements[0] {
        Stmt::Expression(stmt) => stmt.expression.clone(),
        other => panic!("expected an expression statement, got {:?}", other),
    }
}

fn error_messages(source: &str) -> Vec<String> {
    let (_, errors) = parse(source);
    errors.iter().map(|e| e.to_string()).collect()
}

fn names(parameters: &[Identifier]) -> Vec<&str> {
    parameters.iter().map(|p| p.value.as_str()).collect()
}

#[test]
fn test_parse_let_statements() {
    let cases = [
        ("let x = 5;", "x", "5"),
        ("let y = true;", "y", "true"),
        ("let foobar = y;", "foobar", "y"),
        ("let sum = 1 + 2 * 3", "sum", "(1 + (2 * 3))"),
    ];

    for (source, name, value) in cases {
        let program = parse_clean(source);
        assert_eq!(program.len(), 1);

        match &program.statements[0] {
            Stmt::Let(stmt) => {
                assert_eq!(stmt.token_literal(), "let");
                assert_eq!(stmt.name.value, name);
                assert_eq!(stmt.name.token_literal(), name);
                assert_eq!(stmt.value.to_string(), value);
            }
            other => panic!("expected a let statement, got {:?}", other),
        }
    }
}

#[test]
fn test_parse_let_integer_value() {
    let program = parse_clean("let x = 5;");

    match &program.statements[0] {
        Stmt::Let(stmt) => match &stmt.value {
            Expr::Integer(literal) => assert_eq!(literal.value, 5),
            other => panic!("expected an integer literal, got {:?}", other),
        },
        other => panic!("expected a let statement, got {:?}", other),
    }
}

#[test]
fn test_parse_return_statements() {
    let cases = [
        ("return 5;", "5"),
        ("return true;", "true"),
        ("return x + y;", "(x + y)"),
        ("return add(1)", "add(1)"),
    ];

    for (source, value) in cases {
        let program = parse_clean(source);
        assert_eq!(program.len(), 1);

        match &program.statements[0] {
            Stmt::Return(stmt) => {
                assert_eq!(stmt.token_literal(), "return");
                assert_eq!(stmt.value.to_string(), value);
            }
            other => panic!("expected a return statement, got {:?}", other),
        }
    }
}

#[test]
fn test_parse_identifier_expression() {
    match single_expression("foobar;") {
        Expr::Identifier(ident) => {
            assert_eq!(ident.value, "foobar");
            assert_eq!(ident.token_literal(), "foobar");
        }
        other => panic!("expected an identifier, got {:?}", other),
    }
}

#[test]
fn test_parse_integer_literal() {
    match single_expression("5;") {
        Expr::Integer(literal) => {
            assert_eq!(literal.value, 5);
            assert_eq!(literal.token_literal(), "5");
        }
        other => panic!("expected an integer literal, got {:?}", other),
    }
}

#[test]
fn test_parse_largest_integer() {
    match single_expression("9223372036854775807") {
        Expr::Integer(literal) => assert_eq!(literal.value, i64::MAX),
        other => panic!("expected an integer literal, got {:?}", other),
    }
}

#[test]
fn test_parse_boolean_literals() {
    for (source, value) in [("true;", true), ("false;", false)] {
        match single_expression(source) {
            Expr::Boolean(literal) => assert_eq!(literal.value, value),
            other => panic!("expected a boolean literal, got {:?}", other),
        }
    }
}

#[test]
fn test_parse_prefix_expressions() {
    let cases = [
        ("!5;", "!", "5"),
        ("-15;", "-", "15"),
        ("!true;", "!", "true"),
        ("!false;", "!", "false"),
        ("-a", "-", "a"),
    ];

    for (source, operator, right) in cases {
        match single_expression(source) {
            Expr::Prefix(expr) => {
                assert_eq!(expr.operator, operator);
                assert_eq!(expr.right.to_string(), right);
            }
            other => panic!("expected a prefix expression, got {:?}", other),
        }
    }
}

#[test]
fn test_parse_infix_expressions() {
    let cases = [
        ("5 + 5;", "5", "+", "5"),
        ("5 - 5;", "5", "-", "5"),
        ("5 * 5;", "5", "*", "5"),
        ("5 / 5;", "5", "/", "5"),
        ("5 > 5;", "5", ">", "5"),
        ("5 < 5;", "5", "<", "5"),
        ("5 == 5;", "5", "==", "5"),
        ("5 != 5;", "5", "!=", "5"),
        ("true == true", "true", "==", "true"),
        ("true != false", "true", "!=", "false"),
        ("a + b", "a", "+", "b"),
    ];

    for (source, left, operator, right) in cases {
        match single_expression(source) {
            Expr::Infix(expr) => {
                assert_eq!(expr.left.to_string(), left);
                assert_eq!(expr.operator, operator);
                assert_eq!(expr.right.to_string(), right);
            }
            other => panic!("expected an infix expression, got {:?}", other),
        }
    }
}

#[test]
fn test_operator_precedence() {
    let cases = [
        ("-a * b", "((-a) * b)"),
        ("!-a", "(!(-a))"),
        ("a + b + c", "((a + b) + c)"),
        ("a + b - c", "((a + b) - c)"),
        ("a * b * c", "((a * b) * c)"),
        ("a * b / c", "((a * b) / c)"),
        ("a + b / c", "(a + (b / c))"),
        ("a + b * c", "(a + (b * c))"),
        ("a + b * c + d / e - f", "(((a + (b * c)) + (d / e)) - f)"),
        ("3 + 4; -5 * 5", "(3 + 4); ((-5) * 5)"),
        ("5 > 4 == 3 < 4", "((5 > 4) == (3 < 4))"),
        ("5 < 4 != 3 > 4", "((5 < 4) != (3 > 4))"),
        ("3 + 4 * 5 == 3 * 1 + 4 * 5", "((3 + (4 * 5)) == ((3 * 1) + (4 * 5)))"),
        ("true", "true"),
        ("3 > 5 == false", "((3 > 5) == false)"),
        ("3 < 5 == true", "((3 < 5) == true)"),
        ("1 + (2 + 3) + 4", "((1 + (2 + 3)) + 4)"),
        ("(5 + 5) * 2", "((5 + 5) * 2)"),
        ("2 / (5 + 5)", "(2 / (5 + 5))"),
        ("-(5 + 5)", "(-(5 + 5))"),
        ("!(true == true)", "(!(true == true))"),
        ("a + add(b * c) + d", "((a + add((b * c))) + d)"),
        (
            "add(a, b, 1, 2 * 3, 4 + 5, add(6, 7 * 8))",
            "add(a, b, 1, (2 * 3), (4 + 5), add(6, (7 * 8)))",
        ),
        ("add(a + b + c * d / f + g)", "add((((a + b) + ((c * d) / f)) + g))"),
        ("-f(3)", "(-f(3))"),
    ];

    for (source, expected) in cases {
        let program = parse_clean(source);
        assert_eq!(program.to_string(), expected, "source {:?}", source);
    }
}

#[test]
fn test_parse_if_expression() {
    match single_expression("if (x < y) { x }") {
        Expr::If(expr) => {
            assert_eq!(expr.condition.to_string(), "(x < y)");
            assert_eq!(expr.consequence.statements.len(), 1);
            assert_eq!(expr.consequence.to_string(), "{ x }");
            assert!(expr.alternative.is_none());
        }
        other => panic!("expected an if expression, got {:?}", other),
    }
}

#[test]
fn test_parse_if_else_expression() {
    match single_expression("if (x < y) { x } else { y }") {
        Expr::If(expr) => {
            assert_eq!(expr.condition.to_string(), "(x < y)");
            assert_eq!(expr.consequence.to_string(), "{ x }");

            let alternative = expr.alternative.expect("else branch");
            assert_eq!(alternative.to_string(), "{ y }");
        }
        other => panic!("expected an if expression, got {:?}", other),
    }
}

#[test]
fn test_parse_function_literal() {
    match single_expression("fn(x, y) { x + y; }") {
        Expr::Function(func) => {
            assert_eq!(func.token_literal(), "fn");
            assert_eq!(names(&func.parameters), vec!["x", "y"]);
            assert_eq!(func.body.statements.len(), 1);
            assert_eq!(func.body.to_string(), "{ (x + y) }");
        }
        other => panic!("expected a function literal, got {:?}", other),
    }
}

#[test]
fn test_parse_function_parameters() {
    let cases: [(&str, Vec<&str>); 3] = [
        ("fn() {};", vec![]),
        ("fn(x) {};", vec!["x"]),
        ("fn(x, y, z) {};", vec!["x", "y", "z"]),
    ];

    for (source, expected) in cases {
        match single_expression(source) {
            Expr::Function(func) => {
                assert_eq!(names(&func.parameters), expected);
                assert!(func.body.statements.is_empty());
            }
            other => panic!("expected a function literal, got {:?}", other),
        }
    }
}

#[test]
fn test_parse_call_expression() {
    match single_expression("add(1, 2 * 3, 4 + 5);") {
        Expr::Call(call) => {
            assert_eq!(call.callee.to_string(), "add");
            assert_eq!(call.token_literal(), "(");

            let arguments: Vec<String> = call.arguments.iter().map(|a| a.to_string()).collect();
            assert_eq!(arguments, vec!["1", "(2 * 3)", "(4 + 5)"]);
        }
        other => panic!("expected a call expression, got {:?}", other),
    }
}

#[test]
fn test_parse_call_without_arguments() {
    match single_expression("run()") {
        Expr::Call(call) => assert!(call.arguments.is_empty()),
        other => panic!("expected a call expression, got {:?}", other),
    }
}

#[test]
fn test_call_on_function_literal() {
    let program = parse_clean("fn(x) { x }(5)");
    assert_eq!(program.to_string(), "fn(x) { x }(5)");
}

#[test]
fn test_let_with_function_value() {
    let program = parse_clean("let add = fn(a, b) { return a + b; };");

    assert_eq!(program.len(), 1);
    assert_eq!(program.to_string(), "let add = fn(a, b) { return (a + b); };");
}

#[test]
fn test_missing_let_identifier() {
    let (program, errors) = parse("let = 5;");

    assert!(!errors.is_empty());
    assert_eq!(
        errors[0].kind(),
        &ErrorImpl::UnexpectedToken {
            expected: TokenKind::Identifier,
            found: TokenKind::Assignment,
        }
    );
    assert_eq!(errors[0].get_position().0, 4);
    assert!(program.iter().all(|stmt| !matches!(stmt, Stmt::Let(_))));
}

#[test]
fn test_error_messages_and_recovery() {
    let messages = error_messages("let x 5; let = 10; let 838383;");

    assert_eq!(
        messages,
        vec![
            "expected next token to be =, got INT instead",
            "expected next token to be IDENT, got = instead",
            "no prefix parse function for = found",
            "expected next token to be IDENT, got INT instead",
        ]
    );
}

#[test]
fn test_statements_after_error_survive() {
    let (program, errors) = parse("let x = 5; let = 10; let y = 3;");

    assert!(!errors.is_empty());
    let lets: Vec<&str> = program
        .iter()
        .filter_map(|stmt| match stmt {
            Stmt::Let(stmt) => Some(stmt.name.value.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(lets, vec!["x", "y"]);
}

#[test]
fn test_illegal_token_has_no_prefix_handler() {
    let (_, errors) = parse("1 + @");

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].to_string(), "no prefix parse function for ILLEGAL found");
    assert_eq!(
        errors[0].kind(),
        &ErrorImpl::NoPrefixParseFn {
            kind: TokenKind::Illegal,
            token: "@".to_string(),
        }
    );
    assert_eq!(errors[0].get_position().0, 4);
}

#[test]
fn test_integer_overflow() {
    let (program, errors) = parse("99999999999999999999");

    assert!(program.is_empty());
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].to_string(),
        "could not parse \"99999999999999999999\" as integer"
    );
}

#[test]
fn test_missing_close_paren() {
    let messages = error_messages("(1 + 2");

    assert_eq!(messages, vec!["expected next token to be ), got EOF instead"]);
}

#[test]
fn test_unterminated_block() {
    let (program, errors) = parse("if (x) { y");

    assert!(program.is_empty());
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].kind(),
        &ErrorImpl::UnexpectedToken {
            expected: TokenKind::CloseCurly,
            found: TokenKind::EOF,
        }
    );
    assert_eq!(errors[0].get_position().0, 10);
}

#[test]
fn test_bad_statement_inside_block_is_skipped() {
    let (program, errors) = parse("fn(x) { let = 1; x }");

    assert_eq!(errors.len(), 2);
    assert_eq!(program.len(), 1);
    assert_eq!(program.to_string(), "fn(x) { 1; x }");
}

#[test]
fn test_function_parameters_must_be_identifiers() {
    let messages = error_messages("fn(1) { }");

    assert_eq!(messages[0], "expected next token to be IDENT, got INT instead");
}

#[test]
fn test_empty_and_whitespace_sources() {
    for source in ["", "   \n\t "] {
        let program = parse_clean(source);
        assert!(program.is_empty());
    }
}

#[test]
fn test_empty_statements_are_skipped() {
    let (program, errors) = parse(";;");

    // A lone `;` cannot start an expression
    assert_eq!(program.len(), 0);
    assert_eq!(errors.len(), 2);
}

#[test]
fn test_rendering_reparses_to_same_tree() {
    let source = "let f = fn(x, y) { let z = x * y; z + 1 }; \
                  if (f(1, 2) > 1) { f } else { !true }; -f(3)";

    let first = parse_clean(source);
    let rendered = first.to_string();
    let second = parse_clean(&rendered);

    assert_eq!(first.len(), 3);
    assert_eq!(second.len(), 3);
    assert_eq!(second.to_string(), rendered);
}

#[test]
fn test_parser_session_state() {
    let mut parser = Parser::new(Lexer::new("let a = 1;"));

    assert!(parser.cur_token_is(TokenKind::Let));
    assert!(parser.peek_token_is(TokenKind::Identifier));

    assert!(parser.expect_peek(TokenKind::Assignment).is_err());
    assert!(parser.cur_token_is(TokenKind::Let));

    assert!(parser.expect_peek(TokenKind::Identifier).is_ok());
    assert_eq!(parser.current_token().value, "a");

    let program = Parser::new(Lexer::new("a b")).parse_program();
    assert_eq!(program.len(), 2);
    assert!(parser.errors().is_empty());
}

#[test]
fn test_deep_nesting_is_an_error() {
    for source in [
        format!("{}1", "(".repeat(10_000)),
        format!("{}1", "-".repeat(10_000)),
        format!("{}x", "if (x) { ".repeat(10_000)),
    ] {
        let (_, errors) = parse(&source);

        assert!(!errors.is_empty());
        assert!(matches!(
            errors[0].kind(),
            ErrorImpl::NestingTooDeep {
                limit: MAX_NESTING_DEPTH
            }
        ));
    }
}

#[test]
fn test_nesting_at_the_limit_parses() {
    let depth = MAX_NESTING_DEPTH - 1;
    let source = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));

    let program = parse_clean(&source);
    assert_eq!(program.to_string(), "1");

    let (_, errors) = parse(&format!("{}1", "-".repeat(MAX_NESTING_DEPTH)));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].get_position().0, MAX_NESTING_DEPTH as u32);
}

#[test]
fn test_nesting_depth_is_released_after_an_error() {
    let deep = format!("{}1", "-".repeat(MAX_NESTING_DEPTH));
    let (program, errors) = parse(&format!("{}\nlet x = -(-(1));", deep));

    assert_eq!(errors.len(), 1);
    assert_eq!(program.to_string(), "let x = (-(-1));");
}
