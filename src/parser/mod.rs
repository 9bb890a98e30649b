//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the parser that transforms a stream of tokens
//! into an Abstract Syntax Tree. It uses a Pratt parser for expressions
//! with operator precedence and handles:
//!
//! - Statement parsing (`let`, `return`, expression statements, blocks)
//! - Expression parsing (prefix and infix operators, calls, `if`, `fn`)
//! - Error accumulation and recovery
//! - Optional tracing of the expression parse functions
//!
//! The parser dispatches through prefix and infix handler tables keyed by
//! token kind, with a precedence table deciding how far an infix operator
//! may extend the expression to its left.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
pub mod trace;

#[cfg(test)]
mod tests;
