use std::collections::HashMap;

use crate::{
    ast::ast::{Expr, Stmt},
    lexer::tokens::TokenKind,
};

use super::{expr::*, parser::Parser, stmt::*};

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

pub type StmtHandler = fn(&mut Parser) -> Option<Stmt>;
pub type PrefixHandler = fn(&mut Parser) -> Option<Expr>;
pub type InfixHandler = fn(&mut Parser, Expr) -> Option<Expr>;

pub fn create_token_lookups(parser: &mut Parser) {
    // Equality and relational
    parser.infix(TokenKind::Eq, Precedence::Equals, parse_infix_expr);
    parser.infix(TokenKind::NotEq, Precedence::Equals, parse_infix_expr);
    parser.infix(TokenKind::Lt, Precedence::LessGreater, parse_infix_expr);
    parser.infix(TokenKind::Gt, Precedence::LessGreater, parse_infix_expr);

    // Additive and multiplicative
    parser.infix(TokenKind::Plus, Precedence::Sum, parse_infix_expr);
    parser.infix(TokenKind::Minus, Precedence::Sum, parse_infix_expr);
    parser.infix(TokenKind::Slash, Precedence::Product, parse_infix_expr);
    parser.infix(TokenKind::Asterisk, Precedence::Product, parse_infix_expr);

    parser.infix(TokenKind::LParen, Precedence::Call, parse_call_expr);

    // Literals and symbols
    parser.prefix(TokenKind::Ident, parse_identifier);
    parser.prefix(TokenKind::Int, parse_integer_literal);
    parser.prefix(TokenKind::True, parse_boolean_literal);
    parser.prefix(TokenKind::False, parse_boolean_literal);
    parser.prefix(TokenKind::Bang, parse_prefix_expr);
    parser.prefix(TokenKind::Minus, parse_prefix_expr);
    parser.prefix(TokenKind::LParen, parse_grouped_expr);
    parser.prefix(TokenKind::If, parse_if_expr);
    parser.prefix(TokenKind::Function, parse_function_literal);

    // Statements
    parser.stmt(TokenKind::Let, parse_let_stmt);
    parser.stmt(TokenKind::Return, parse_return_stmt);
}

// Lookup tables inside parser struct, so each parser owns its own
pub type StmtLookup = HashMap<TokenKind, StmtHandler>;
pub type PrefixLookup = HashMap<TokenKind, PrefixHandler>;
pub type InfixLookup = HashMap<TokenKind, InfixHandler>;
pub type PrecedenceLookup = HashMap<TokenKind, Precedence>;
