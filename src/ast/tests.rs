//! Unit tests for the AST module.
//!
//! These build trees by hand and check their canonical rendering.

use super::{
    ast::{render, Expr, Program, Stmt},
    expressions::{
        BooleanLiteral, CallExpr, FunctionLiteral, Identifier, IfExpr, InfixExpr, IntegerLiteral,
        PrefixExpr,
    },
    statements::{BlockStmt, LetStmt, ReturnStmt},
};

fn ident(name: &str) -> Identifier {
    Identifier {
        value: name.to_string(),
    }
}

fn ident_expr(name: &str) -> Expr {
    Expr::Identifier(ident(name))
}

fn int(value: i64) -> Expr {
    Expr::Integer(IntegerLiteral {
        value,
        literal: value.to_string(),
    })
}

fn infix(left: Expr, operator: &str, right: Expr) -> Expr {
    Expr::Infix(InfixExpr {
        left: Box::new(left),
        operator: operator.to_string(),
        right: Box::new(right),
    })
}

#[test]
fn test_render_let_statement() {
    let program = Program {
        statements: vec![Stmt::Let(LetStmt {
            name: ident("myVar"),
            value: ident_expr("anotherVar"),
        })],
    };

    assert_eq!(program.to_string(), "let myVar = anotherVar;");
    assert_eq!(render(&program), "let myVar = anotherVar;");
}

#[test]
fn test_render_return_statement() {
    let bare = Stmt::Return(ReturnStmt { value: None });
    let valued = Stmt::Return(ReturnStmt { value: Some(int(5)) });

    assert_eq!(render(&bare), "return;");
    assert_eq!(render(&valued), "return 5;");
}

#[test]
fn test_program_concatenates_without_separators() {
    let program = Program {
        statements: vec![
            Stmt::Let(LetStmt {
                name: ident("x"),
                value: int(1),
            }),
            ident_expr("x").into_stmt(),
            Stmt::Return(ReturnStmt {
                value: Some(ident_expr("x")),
            }),
        ],
    };

    assert_eq!(program.len(), 3);
    assert_eq!(render(&program), "let x = 1;xreturn x;");
}

#[test]
fn test_render_infix_is_fully_parenthesised() {
    let expr = infix(ident_expr("a"), "+", infix(ident_expr("b"), "*", ident_expr("c")));

    assert_eq!(render(&expr), "(a + (b * c))");
}

#[test]
fn test_render_prefix() {
    let expr = Expr::Prefix(PrefixExpr {
        operator: "!".to_string(),
        operand: Box::new(Expr::Boolean(BooleanLiteral { value: true })),
    });

    assert_eq!(render(&expr), "(!true)");
}

#[test]
fn test_render_integer_keeps_source_text() {
    let expr = Expr::Integer(IntegerLiteral {
        value: 7,
        literal: "007".to_string(),
    });

    assert_eq!(render(&expr), "007");
}

#[test]
fn test_render_if_expression() {
    let consequence = BlockStmt {
        statements: vec![ident_expr("x").into_stmt()],
    };
    let alternative = BlockStmt {
        statements: vec![ident_expr("y").into_stmt()],
    };

    let without_else = Expr::If(IfExpr {
        condition: Box::new(infix(ident_expr("x"), "<", ident_expr("y"))),
        consequence: consequence.clone(),
        alternative: None,
    });
    let with_else = Expr::If(IfExpr {
        condition: Box::new(infix(ident_expr("x"), "<", ident_expr("y"))),
        consequence,
        alternative: Some(alternative),
    });

    assert_eq!(render(&without_else), "if (x < y) x");
    assert_eq!(render(&with_else), "if (x < y) x else y");
}

#[test]
fn test_render_function_literal() {
    let function = Expr::Function(FunctionLiteral {
        parameters: vec![ident("x"), ident("y")],
        body: BlockStmt {
            statements: vec![infix(ident_expr("x"), "+", ident_expr("y")).into_stmt()],
        },
    });

    assert_eq!(render(&function), "fn(x, y) (x + y)");

    let empty = Expr::Function(FunctionLiteral {
        parameters: vec![],
        body: BlockStmt::default(),
    });

    assert_eq!(render(&empty), "fn() ");
}

#[test]
fn test_render_call_expression() {
    let call = Expr::Call(CallExpr {
        callee: Box::new(ident_expr("add")),
        arguments: vec![
            int(1),
            infix(int(2), "*", int(3)),
            infix(int(4), "+", int(5)),
        ],
    });

    assert_eq!(render(&call), "add(1, (2 * 3), (4 + 5))");
}

#[test]
fn test_render_empty_program() {
    assert_eq!(render(&Program::default()), "");
    assert!(Program::default().is_empty());
}
