use crate::{
    ast::{
        ast::Expr,
        expressions::{
            BooleanLiteral, CallExpr, FunctionLiteral, Identifier, IfExpr, InfixExpr,
            IntegerLiteral, PrefixExpr,
        },
    },
    errors::errors::ErrorImpl,
    lexer::tokens::TokenKind,
};

use super::{lookups::Precedence, parser::Parser, stmt::parse_block_stmt};

/// Parses an expression whose operators all bind tighter than `precedence`.
///
/// Returns `None` when the expression could not be built; the reason has
/// already been recorded on the parser.
pub fn parse_expr(parser: &mut Parser, precedence: Precedence) -> Option<Expr> {
    parser.trace("parse_expression");

    let expr = if parser.enter_nested() {
        parse_expr_unguarded(parser, precedence)
    } else {
        None
    };
    parser.leave_nested();

    parser.untrace("parse_expression");
    expr
}

fn parse_expr_unguarded(parser: &mut Parser, precedence: Precedence) -> Option<Expr> {
    // First parse the prefix position
    let token_kind = parser.current_token_kind();
    let Some(prefix_fn) = parser.get_prefix_lookup().get(&token_kind).copied() else {
        parser.error(ErrorImpl::NoPrefixParseFn { kind: token_kind });
        return None;
    };

    let mut left = prefix_fn(parser)?;

    // While the next operator binds tighter than the floor, fold it into lhs
    while parser.peek_token_kind() != TokenKind::Semicolon
        && precedence < parser.peek_precedence()
    {
        let Some(infix_fn) = parser
            .get_infix_lookup()
            .get(&parser.peek_token_kind())
            .copied()
        else {
            return Some(left);
        };

        parser.advance_token();
        left = infix_fn(parser, left)?;
    }

    Some(left)
}

pub fn parse_identifier(parser: &mut Parser) -> Option<Expr> {
    Some(Expr::Identifier(Identifier {
        value: parser.current_token().literal.clone(),
    }))
}

pub fn parse_integer_literal(parser: &mut Parser) -> Option<Expr> {
    parser.trace("parse_integer_literal");

    let literal = parser.current_token().literal.clone();
    let expr = match literal.parse::<i64>() {
        Ok(value) => Some(Expr::Integer(IntegerLiteral { value, literal })),
        Err(_) => {
            parser.error(ErrorImpl::IntegerParseError { literal });
            None
        }
    };

    parser.untrace("parse_integer_literal");
    expr
}

pub fn parse_boolean_literal(parser: &mut Parser) -> Option<Expr> {
    Some(Expr::Boolean(BooleanLiteral {
        value: parser.current_token_kind() == TokenKind::True,
    }))
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Option<Expr> {
    parser.trace("parse_prefix_expression");

    let operator = parser.current_token().literal.clone();
    parser.advance_token();

    let expr = parse_expr(parser, Precedence::Prefix).map(|operand| {
        Expr::Prefix(PrefixExpr {
            operator,
            operand: Box::new(operand),
        })
    });

    parser.untrace("parse_prefix_expression");
    expr
}

pub fn parse_infix_expr(parser: &mut Parser, left: Expr) -> Option<Expr> {
    parser.trace("parse_infix_expression");

    let operator = parser.current_token().literal.clone();
    let precedence = parser.current_precedence();
    parser.advance_token();

    let expr = parse_expr(parser, precedence).map(|right| {
        Expr::Infix(InfixExpr {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        })
    });

    parser.untrace("parse_infix_expression");
    expr
}

pub fn parse_grouped_expr(parser: &mut Parser) -> Option<Expr> {
    parser.advance_token();
    let expr = parse_expr(parser, Precedence::Lowest)?;

    if !parser.expect_peek(TokenKind::RParen) {
        return None;
    }

    Some(expr)
}

pub fn parse_if_expr(parser: &mut Parser) -> Option<Expr> {
    // if (<condition>) { ... } else { ... }
    if !parser.expect_peek(TokenKind::LParen) {
        return None;
    }

    parser.advance_token();
    let condition = parse_expr(parser, Precedence::Lowest)?;

    if !parser.expect_peek(TokenKind::RParen) {
        return None;
    }
    if !parser.expect_peek(TokenKind::LBrace) {
        return None;
    }

    let consequence = parse_block_stmt(parser);

    let alternative = if parser.peek_token_kind() == TokenKind::Else {
        parser.advance_token();

        if !parser.expect_peek(TokenKind::LBrace) {
            return None;
        }

        Some(parse_block_stmt(parser))
    } else {
        None
    };

    Some(Expr::If(IfExpr {
        condition: Box::new(condition),
        consequence,
        alternative,
    }))
}

pub fn parse_function_literal(parser: &mut Parser) -> Option<Expr> {
    if !parser.expect_peek(TokenKind::LParen) {
        return None;
    }

    let parameters = parse_function_parameters(parser)?;

    if !parser.expect_peek(TokenKind::LBrace) {
        return None;
    }

    let body = parse_block_stmt(parser);

    Some(Expr::Function(FunctionLiteral { parameters, body }))
}

/// Parses `(a, b, c)` with `current` on the opening parenthesis.
fn parse_function_parameters(parser: &mut Parser) -> Option<Vec<Identifier>> {
    let mut parameters = Vec::new();

    if parser.peek_token_kind() == TokenKind::RParen {
        parser.advance_token();
        return Some(parameters);
    }

    loop {
        if !parser.expect_peek(TokenKind::Ident) {
            return None;
        }
        parameters.push(Identifier {
            value: parser.current_token().literal.clone(),
        });

        if parser.peek_token_kind() != TokenKind::Comma {
            break;
        }
        parser.advance_token();
    }

    if !parser.expect_peek(TokenKind::RParen) {
        return None;
    }

    Some(parameters)
}

pub fn parse_call_expr(parser: &mut Parser, left: Expr) -> Option<Expr> {
    let arguments = parse_call_arguments(parser)?;

    Some(Expr::Call(CallExpr {
        callee: Box::new(left),
        arguments,
    }))
}

/// Parses `(x, y + 1)` with `current` on the opening parenthesis.
fn parse_call_arguments(parser: &mut Parser) -> Option<Vec<Expr>> {
    let mut arguments = Vec::new();

    if parser.peek_token_kind() == TokenKind::RParen {
        parser.advance_token();
        return Some(arguments);
    }

    parser.advance_token();
    arguments.push(parse_expr(parser, Precedence::Lowest)?);

    while parser.peek_token_kind() == TokenKind::Comma {
        parser.advance_token();
        parser.advance_token();
        arguments.push(parse_expr(parser, Precedence::Lowest)?);
    }

    if !parser.expect_peek(TokenKind::RParen) {
        return None;
    }

    Some(arguments)
}
