//! Unit tests for the parser module.
//!
//! This module contains tests for parsing the language constructs including:
//! - Let and return statements
//! - Literal, prefix and infix expressions
//! - Operator precedence, checked through the canonical rendering
//! - If expressions, function literals and calls
//! - Error accumulation and recovery
//! - Nesting limits and tracing

use crate::{
    ast::{
        ast::{render, Expr, Program, Stmt},
        statements::{LetStmt, ReturnStmt},
    },
    errors::errors::ErrorImpl,
    lexer::lexer::Lexer,
};

use super::parser::{parse, Parser, ParserOptions};

fn parse_checked(source: &str) -> Program {
    let mut parser = Parser::new(Lexer::new(source));
    let program = parser.parse_program();

    assert!(
        parser.errors().is_empty(),
        "parser errors for {:?}: {:?}",
        source,
        parser.error_messages()
    );
    program
}

fn error_messages(source: &str) -> Vec<String> {
    let mut parser = Parser::new(Lexer::new(source));
    parser.parse_program();
    parser.error_messages()
}

fn single_expression(source: &str) -> Expr {
    let program = parse_checked(source);
    assert_eq!(program.len(), 1, "expected one statement in {:?}", source);

    match &program.statements[0] {
        Stmt::Expression(stmt) => stmt.expression.clone(),
        other => panic!("expected expression statement, got {:?}", other),
    }
}

#[test]
fn test_parse_let_statements() {
    let program = parse_checked("let x = 5; let y = true; let z = y;");

    assert_eq!(program.len(), 3);

    let expected = [("x", "5"), ("y", "true"), ("z", "y")];
    for (stmt, (name, value)) in program.iter().zip(expected) {
        match stmt {
            Stmt::Let(LetStmt { name: ident, value: expr }) => {
                assert_eq!(ident.value, name);
                assert_eq!(render(expr), value);
            }
            other => panic!("expected let statement, got {:?}", other),
        }
    }
}

#[test]
fn test_let_without_trailing_semicolon() {
    let program = parse_checked("let x = 5");

    assert_eq!(render(&program), "let x = 5;");
}

#[test]
fn test_parse_return_statements() {
    let program = parse_checked("return 5; return 10; return 993322;");

    assert_eq!(program.len(), 3);
    assert!(program.iter().all(|stmt| matches!(stmt, Stmt::Return(_))));
    assert_eq!(render(&program), "return 5;return 10;return 993322;");
}

#[test]
fn test_bare_return() {
    let program = parse_checked("return;");
    assert_eq!(program.statements, vec![Stmt::Return(ReturnStmt { value: None })]);

    let program = parse_checked("return");
    assert_eq!(render(&program), "return;");

    let program = parse_checked("fn() { return }");
    assert_eq!(render(&program), "fn() return;");
}

#[test]
fn test_return_expression() {
    let program = parse_checked("return a + b * c;");

    assert_eq!(render(&program), "return (a + (b * c));");
}

#[test]
fn test_identifier_expression() {
    match single_expression("foobar;") {
        Expr::Identifier(ident) => assert_eq!(ident.value, "foobar"),
        other => panic!("expected identifier, got {:?}", other),
    }
}

#[test]
fn test_integer_literal_expression() {
    match single_expression("5;") {
        Expr::Integer(int) => {
            assert_eq!(int.value, 5);
            assert_eq!(int.literal, "5");
        }
        other => panic!("expected integer literal, got {:?}", other),
    }
}

#[test]
fn test_boolean_literal_expressions() {
    assert!(matches!(single_expression("true;"), Expr::Boolean(b) if b.value));
    assert!(matches!(single_expression("false;"), Expr::Boolean(b) if !b.value));
}

#[test]
fn test_prefix_expressions() {
    let cases = [
        ("!5;", "!", "5"),
        ("-15;", "-", "15"),
        ("!true;", "!", "true"),
        ("!false;", "!", "false"),
    ];

    for (source, operator, operand) in cases {
        match single_expression(source) {
            Expr::Prefix(prefix) => {
                assert_eq!(prefix.operator, operator);
                assert_eq!(render(prefix.operand.as_ref()), operand);
            }
            other => panic!("expected prefix expression, got {:?}", other),
        }
    }
}

#[test]
fn test_infix_expressions() {
    let operators = ["+", "-", "*", "/", ">", "<", "==", "!="];

    for operator in operators {
        let source = format!("5 {} 5;", operator);
        match single_expression(&source) {
            Expr::Infix(infix) => {
                assert_eq!(render(infix.left.as_ref()), "5");
                assert_eq!(infix.operator, operator);
                assert_eq!(render(infix.right.as_ref()), "5");
            }
            other => panic!("expected infix expression, got {:?}", other),
        }
    }

    assert_eq!(render(&single_expression("true == false")), "(true == false)");
}

#[test]
fn test_operator_precedence() {
    let cases = [
        ("a + b * c", "(a + (b * c))"),
        ("-a * b", "((-a) * b)"),
        ("!-a", "(!(-a))"),
        ("a + b + c", "((a + b) + c)"),
        ("a + b - c", "((a + b) - c)"),
        ("a * b * c", "((a * b) * c)"),
        ("a * b / c", "((a * b) / c)"),
        ("a + b / c", "(a + (b / c))"),
        ("a + b * c + d / e - f", "(((a + (b * c)) + (d / e)) - f)"),
        ("3 + 4; -5 * 5", "(3 + 4)((-5) * 5)"),
        ("5 > 4 == 3 < 4", "((5 > 4) == (3 < 4))"),
        ("5 < 4 != 3 > 4", "((5 < 4) != (3 > 4))"),
        (
            "3 + 4 * 5 == 3 * 1 + 4 * 5",
            "((3 + (4 * 5)) == ((3 * 1) + (4 * 5)))",
        ),
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
    ];

    for (source, expected) in cases {
        let program = parse_checked(source);
        assert_eq!(render(&program), expected, "source: {}", source);
    }
}

#[test]
fn test_if_expression() {
    match single_expression("if (x < y) { x }") {
        Expr::If(if_expr) => {
            assert_eq!(render(if_expr.condition.as_ref()), "(x < y)");
            assert_eq!(if_expr.consequence.statements.len(), 1);
            assert_eq!(render(&if_expr.consequence), "x");
            assert!(if_expr.alternative.is_none());
        }
        other => panic!("expected if expression, got {:?}", other),
    }
}

#[test]
fn test_if_else_expression() {
    let expr = single_expression("if (x < y) { x } else { y; }");

    match &expr {
        Expr::If(if_expr) => {
            let alternative = if_expr.alternative.as_ref().expect("alternative");
            assert_eq!(alternative.statements.len(), 1);
            assert_eq!(render(alternative), "y");
        }
        other => panic!("expected if expression, got {:?}", other),
    }
    assert_eq!(render(&expr), "if (x < y) x else y");
}

#[test]
fn test_if_as_let_value() {
    let program = parse_checked("let max = if (a > b) { a } else { b }; max");

    assert_eq!(program.len(), 2);
    assert_eq!(render(&program), "let max = if (a > b) a else b;max");
}

#[test]
fn test_unterminated_block_is_tolerated() {
    let program = parse_checked("if (x) { y");

    assert_eq!(render(&program), "if x y");
}

#[test]
fn test_function_literal() {
    match single_expression("fn(x, y) { x + y; }") {
        Expr::Function(function) => {
            let names: Vec<&str> = function
                .parameters
                .iter()
                .map(|param| param.value.as_str())
                .collect();
            assert_eq!(names, vec!["x", "y"]);
            assert_eq!(function.body.statements.len(), 1);
            assert_eq!(render(&function.body), "(x + y)");
        }
        other => panic!("expected function literal, got {:?}", other),
    }
}

#[test]
fn test_function_parameters() {
    let cases: [(&str, &[&str]); 3] = [
        ("fn() {};", &[]),
        ("fn(x) {};", &["x"]),
        ("fn(x, y, z) {};", &["x", "y", "z"]),
    ];

    for (source, expected) in cases {
        match single_expression(source) {
            Expr::Function(function) => {
                let names: Vec<&str> = function
                    .parameters
                    .iter()
                    .map(|param| param.value.as_str())
                    .collect();
                assert_eq!(names, expected, "source: {}", source);
            }
            other => panic!("expected function literal, got {:?}", other),
        }
    }
}

#[test]
fn test_parameter_lists_are_not_shared() {
    let program = parse_checked("fn(a, b) {}; fn() {};");

    let counts: Vec<usize> = program
        .iter()
        .map(|stmt| match stmt {
            Stmt::Expression(stmt) => match &stmt.expression {
                Expr::Function(function) => function.parameters.len(),
                other => panic!("expected function literal, got {:?}", other),
            },
            other => panic!("expected expression statement, got {:?}", other),
        })
        .collect();

    assert_eq!(counts, vec![2, 0]);
}

#[test]
fn test_call_expression() {
    match single_expression("add(1, 2 * 3, 4 + 5);") {
        Expr::Call(call) => {
            assert_eq!(render(call.callee.as_ref()), "add");
            assert_eq!(call.arguments.len(), 3);
            assert_eq!(render(&call.arguments[0]), "1");
            assert_eq!(render(&call.arguments[1]), "(2 * 3)");
            assert_eq!(render(&call.arguments[2]), "(4 + 5)");
        }
        other => panic!("expected call expression, got {:?}", other),
    }

    assert_eq!(
        render(&single_expression("add(1, 2 * 3, 4 + 5);")),
        "add(1, (2 * 3), (4 + 5))"
    );
}

#[test]
fn test_call_without_arguments() {
    assert_eq!(render(&single_expression("f()")), "f()");
}

#[test]
fn test_call_on_function_literal() {
    assert_eq!(render(&single_expression("fn(x) { x; }(5)")), "fn(x) x(5)");
}

#[test]
fn test_chained_calls() {
    assert_eq!(render(&single_expression("f(1)(2)")), "f(1)(2)");
}

#[test]
fn test_missing_assign_is_reported_and_parsing_continues() {
    let mut parser = Parser::new(Lexer::new("let x 5; let y = 10;"));
    let program = parser.parse_program();

    assert_eq!(
        parser.error_messages(),
        vec!["expected next token to be ASSIGN, got INT instead"]
    );
    assert_eq!(parser.errors()[0].get_position().0, 6);

    // The dangling `5;` is picked up as its own statement
    assert_eq!(program.len(), 2);
    assert_eq!(
        program.statements.last(),
        parse_checked("let y = 10;").statements.first()
    );
}

#[test]
fn test_let_errors() {
    assert_eq!(
        error_messages("let = 10;"),
        vec![
            "expected next token to be IDENT, got ASSIGN instead",
            "no prefix parse function for ASSIGN",
        ]
    );
    assert_eq!(
        error_messages("let 838383;"),
        vec!["expected next token to be IDENT, got INT instead"]
    );
}

#[test]
fn test_no_prefix_parse_function() {
    assert_eq!(
        error_messages("@"),
        vec!["no prefix parse function for ILLEGAL"]
    );
    assert_eq!(error_messages("}"), vec!["no prefix parse function for RBRACE"]);
}

#[test]
fn test_integer_out_of_range() {
    let (program, errors) = parse("99999999999999999999;");

    assert!(program.is_empty());
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].get_internal_error(),
        &ErrorImpl::IntegerParseError {
            literal: "99999999999999999999".to_string()
        }
    );
    assert_eq!(
        errors[0].to_string(),
        "could not parse 99999999999999999999 as integer"
    );
}

#[test]
fn test_missing_closing_paren() {
    assert_eq!(
        error_messages("(1 + 2"),
        vec!["expected next token to be RPAREN, got EOF instead"]
    );
    assert_eq!(
        error_messages("add(1, 2"),
        vec!["expected next token to be RPAREN, got EOF instead"]
    );
}

#[test]
fn test_if_without_parenthesised_condition() {
    let messages = error_messages("if x { }");

    assert_eq!(
        messages.first().map(String::as_str),
        Some("expected next token to be LPAREN, got IDENT instead")
    );
}

#[test]
fn test_else_without_block() {
    let messages = error_messages("if (x) { y } else z");

    assert_eq!(
        messages.first().map(String::as_str),
        Some("expected next token to be LBRACE, got IDENT instead")
    );
}

#[test]
fn test_invalid_parameter() {
    let messages = error_messages("fn(1) {}");

    assert_eq!(
        messages.first().map(String::as_str),
        Some("expected next token to be IDENT, got INT instead")
    );
}

#[test]
fn test_errors_leave_out_failed_statements() {
    let (program, errors) = parse("let a = 1; let b = ; let c = 3;");

    assert_eq!(
        errors.iter().map(|e| e.to_string()).collect::<Vec<_>>(),
        vec!["no prefix parse function for SEMICOLON"]
    );
    assert_eq!(render(&program), "let a = 1;let c = 3;");
}

#[test]
fn test_nesting_limit() {
    let options = ParserOptions {
        max_depth: 8,
        ..Default::default()
    };
    let mut parser = Parser::with_options(Lexer::new("!!!!!!!!!!x"), options);
    let program = parser.parse_program();

    assert_eq!(parser.options().max_depth, 8);

    assert_eq!(
        parser.error_messages(),
        vec!["expression nesting exceeds maximum depth of 8"]
    );
    // Recovery restarts on the token after the one that hit the limit
    assert_eq!(render(&program), "(!x)");
}

#[test]
fn test_adversarial_nesting_does_not_exhaust_the_stack() {
    let source = format!("{}1", "-".repeat(1000));
    let (program, errors) = parse(&source);

    assert_eq!(errors.len(), 3);
    assert!(errors
        .iter()
        .all(|e| matches!(e.get_internal_error(), ErrorImpl::NestingTooDeep { limit: 256 })));
    assert_eq!(program.len(), 1);
}

#[test]
fn test_trace_log() {
    let options = ParserOptions {
        trace: true,
        ..Default::default()
    };
    let mut parser = Parser::with_options(Lexer::new("1 + 2"), options);
    let program = parser.parse_program();

    assert_eq!(render(&program), "(1 + 2)");
    assert_eq!(
        parser.trace_log(),
        [
            "BEGIN parse_expression_statement",
            "\tBEGIN parse_expression",
            "\t\tBEGIN parse_integer_literal",
            "\t\tEND parse_integer_literal",
            "\t\tBEGIN parse_infix_expression",
            "\t\t\tBEGIN parse_expression",
            "\t\t\t\tBEGIN parse_integer_literal",
            "\t\t\t\tEND parse_integer_literal",
            "\t\t\tEND parse_expression",
            "\t\tEND parse_infix_expression",
            "\tEND parse_expression",
            "END parse_expression_statement",
        ]
    );
}

#[test]
fn test_tracing_does_not_change_the_result() {
    let source = "let f = fn(a, b) { return -a * (b + 1); }; f(1, 2) == 3";

    let mut plain = Parser::new(Lexer::new(source));
    let mut traced = Parser::with_options(
        Lexer::new(source),
        ParserOptions {
            trace: true,
            ..Default::default()
        },
    );

    assert_eq!(plain.parse_program(), traced.parse_program());
    assert!(plain.trace_log().is_empty());
    assert!(!traced.trace_log().is_empty());
}

#[test]
fn test_empty_program() {
    let (program, errors) = parse("");

    assert!(program.is_empty());
    assert!(errors.is_empty());
}
