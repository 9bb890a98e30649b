//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the program-level entry
//! points. The parser pulls tokens from a `Lexer` on demand and looks at two
//! of them at a time: `current` and the one-token lookahead `peek`.
//!
//! It maintains lookup tables for:
//! - Statement handlers
//! - Prefix handlers, for tokens that start an expression
//! - Infix handlers, for tokens that continue one
//! - Operator precedences
//!
//! Syntax errors never abort the parse. They are accumulated in order and
//! the construct that raised them is left out of the tree.

use std::collections::HashMap;

use crate::{
    ast::ast::Program,
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::Lexer,
        tokens::{Token, TokenKind},
    },
};

use super::{
    lookups::{
        create_token_lookups, InfixHandler, InfixLookup, Precedence, PrecedenceLookup,
        PrefixHandler, PrefixLookup, StmtHandler, StmtLookup,
    },
    stmt::parse_stmt,
    trace::Tracer,
};

/// Deepest expression nesting accepted before the parser gives up on a
/// construct, keeping adversarial input from exhausting the stack.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Per-parser configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// Record `BEGIN`/`END` lines for the expression parse functions.
    pub trace: bool,
    /// Maximum nesting of `parse_expr` calls.
    pub max_depth: usize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        ParserOptions {
            trace: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// The main parser structure that maintains parsing state.
///
/// A parser is single-use: it owns its lexer, its two-token window and its
/// own handler tables, so separate parses share no mutable state.
pub struct Parser {
    /// The token source
    lexer: Lexer,
    /// The token being parsed
    current: Token,
    /// One token of lookahead
    peek: Token,
    /// Diagnostics in the order they were raised
    errors: Vec<Error>,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for prefix expression handlers
    prefix_lookup: PrefixLookup,
    /// Lookup table for infix expression handlers
    infix_lookup: InfixLookup,
    /// Lookup table for operator precedences
    precedence_lookup: PrecedenceLookup,
    options: ParserOptions,
    /// Current nesting of `parse_expr`
    depth: usize,
    tracer: Tracer,
}

impl Parser {
    /// Creates a parser with the default options.
    pub fn new(lexer: Lexer) -> Self {
        Parser::with_options(lexer, ParserOptions::default())
    }

    /// Creates a parser and primes its `current`/`peek` window.
    pub fn with_options(mut lexer: Lexer, options: ParserOptions) -> Self {
        let current = lexer.next_token();
        let peek = lexer.next_token();

        let mut parser = Parser {
            lexer,
            current,
            peek,
            errors: vec![],
            stmt_lookup: HashMap::new(),
            prefix_lookup: HashMap::new(),
            infix_lookup: HashMap::new(),
            precedence_lookup: HashMap::new(),
            options,
            depth: 0,
            tracer: Tracer::new(options.trace),
        };

        create_token_lookups(&mut parser);
        parser
    }

    /// Parses statements until `EOF`.
    ///
    /// Always returns a program. Statements that failed to parse are left
    /// out, so the tree is only complete when `errors()` is empty.
    pub fn parse_program(&mut self) -> Program {
        let mut program = Program::default();

        while self.current_token_kind() != TokenKind::EOF {
            if let Some(stmt) = parse_stmt(self) {
                program.statements.push(stmt);
            }
            // Unconditional, so an unparseable token can never stall the loop.
            self.advance_token();
        }

        program
    }

    /// Diagnostics raised so far, in order.
    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    /// The diagnostic texts of `errors()`.
    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(|error| error.to_string()).collect()
    }

    /// The trace recorded when `ParserOptions::trace` is on.
    pub fn trace_log(&self) -> &[String] {
        self.tracer.log()
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Returns the current token.
    pub fn current_token(&self) -> &Token {
        &self.current
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current.kind
    }

    /// Returns the lookahead token.
    pub fn peek_token(&self) -> &Token {
        &self.peek
    }

    /// Returns the kind of the lookahead token.
    pub fn peek_token_kind(&self) -> TokenKind {
        self.peek.kind
    }

    /// Shifts `peek` into `current` and pulls a fresh lookahead token.
    pub fn advance_token(&mut self) {
        let next = self.lexer.next_token();
        self.current = std::mem::replace(&mut self.peek, next);
    }

    /// Advances if the lookahead token is of `kind`.
    ///
    /// Otherwise records an error and leaves the window where it is; the
    /// caller decides how to abandon the construct.
    pub fn expect_peek(&mut self, kind: TokenKind) -> bool {
        if self.peek_token_kind() == kind {
            self.advance_token();
            true
        } else {
            self.peek_error(kind);
            false
        }
    }

    fn peek_error(&mut self, expected: TokenKind) {
        let error = Error::new(
            ErrorImpl::UnexpectedPeek {
                expected,
                actual: self.peek.kind,
            },
            self.peek.span.start.clone(),
        );
        self.errors.push(error);
    }

    /// Records an error at the start of the current token.
    pub fn error(&mut self, error_impl: ErrorImpl) {
        let position = self.current.span.start.clone();
        self.errors.push(Error::new(error_impl, position));
    }

    pub fn current_precedence(&self) -> Precedence {
        self.precedence_of(self.current.kind)
    }

    pub fn peek_precedence(&self) -> Precedence {
        self.precedence_of(self.peek.kind)
    }

    fn precedence_of(&self, kind: TokenKind) -> Precedence {
        self.precedence_lookup
            .get(&kind)
            .copied()
            .unwrap_or(Precedence::Lowest)
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Returns a reference to the prefix lookup table.
    pub fn get_prefix_lookup(&self) -> &PrefixLookup {
        &self.prefix_lookup
    }

    /// Returns a reference to the infix lookup table.
    pub fn get_infix_lookup(&self) -> &InfixLookup {
        &self.infix_lookup
    }

    /// Registers an infix handler for a token along with its precedence.
    pub fn infix(&mut self, kind: TokenKind, precedence: Precedence, infix_fn: InfixHandler) {
        self.precedence_lookup.insert(kind, precedence);
        self.infix_lookup.insert(kind, infix_fn);
    }

    /// Registers a prefix handler for a token.
    pub fn prefix(&mut self, kind: TokenKind, prefix_fn: PrefixHandler) {
        self.prefix_lookup.insert(kind, prefix_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Enters one level of expression nesting. Returns false, with an error
    /// recorded, once `max_depth` is exceeded. Every call is paired with
    /// `leave_nested`.
    pub(crate) fn enter_nested(&mut self) -> bool {
        self.depth += 1;
        if self.depth > self.options.max_depth {
            self.error(ErrorImpl::NestingTooDeep {
                limit: self.options.max_depth,
            });
            return false;
        }
        true
    }

    pub(crate) fn leave_nested(&mut self) {
        self.depth -= 1;
    }

    pub(crate) fn trace(&mut self, msg: &str) {
        self.tracer.trace(msg);
    }

    pub(crate) fn untrace(&mut self, msg: &str) {
        self.tracer.untrace(msg);
    }
}

/// Lexes and parses `source` in one go.
///
/// # Returns
///
/// The program together with every diagnostic raised while building it.
pub fn parse(source: &str) -> (Program, Vec<Error>) {
    let mut parser = Parser::new(Lexer::new(source));
    let program = parser.parse_program();

    (program, parser.errors)
}
