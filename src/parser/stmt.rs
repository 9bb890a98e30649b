use crate::{
    ast::{
        ast::Stmt,
        expressions::Identifier,
        statements::{BlockStmt, ExpressionStmt, LetStmt, ReturnStmt},
    },
    lexer::tokens::TokenKind,
};

use super::{expr::parse_expr, lookups::Precedence, parser::Parser};

/// Parses one statement starting at `current`.
///
/// Leaves `current` on the statement's last token (its `;` when present).
pub fn parse_stmt(parser: &mut Parser) -> Option<Stmt> {
    if let Some(stmt_fn) = parser
        .get_stmt_lookup()
        .get(&parser.current_token_kind())
        .copied()
    {
        return stmt_fn(parser);
    }

    parse_expression_stmt(parser)
}

pub fn parse_let_stmt(parser: &mut Parser) -> Option<Stmt> {
    if !parser.expect_peek(TokenKind::Ident) {
        return None;
    }

    let name = Identifier {
        value: parser.current_token().literal.clone(),
    };

    if !parser.expect_peek(TokenKind::Assign) {
        return None;
    }

    parser.advance_token();
    let value = parse_expr(parser, Precedence::Lowest)?;

    if parser.peek_token_kind() == TokenKind::Semicolon {
        parser.advance_token();
    }

    Some(Stmt::Let(LetStmt { name, value }))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Option<Stmt> {
    // A bare `return` may be closed by `;`, `}` or the end of input
    let value = match parser.peek_token_kind() {
        TokenKind::Semicolon | TokenKind::RBrace | TokenKind::EOF => None,
        _ => {
            parser.advance_token();
            Some(parse_expr(parser, Precedence::Lowest)?)
        }
    };

    if parser.peek_token_kind() == TokenKind::Semicolon {
        parser.advance_token();
    }

    Some(Stmt::Return(ReturnStmt { value }))
}

pub fn parse_expression_stmt(parser: &mut Parser) -> Option<Stmt> {
    parser.trace("parse_expression_statement");

    let expression = parse_expr(parser, Precedence::Lowest);

    if parser.peek_token_kind() == TokenKind::Semicolon {
        parser.advance_token();
    }

    parser.untrace("parse_expression_statement");
    expression.map(|expression| Stmt::Expression(ExpressionStmt { expression }))
}

/// Parses the statements of a block with `current` on its `{`.
///
/// Stops on the closing `}`. Running into the end of input instead simply
/// ends the block with what was collected so far.
pub fn parse_block_stmt(parser: &mut Parser) -> BlockStmt {
    parser.advance_token();

    let mut statements = Vec::new();
    while parser.current_token_kind() != TokenKind::RBrace
        && parser.current_token_kind() != TokenKind::EOF
    {
        if let Some(stmt) = parse_stmt(parser) {
            statements.push(stmt);
        }
        parser.advance_token();
    }

    BlockStmt { statements }
}
