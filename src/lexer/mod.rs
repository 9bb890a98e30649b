//! Lexical analysis module.
//!
//! This module contains the lexer that converts source text into a stream
//! of tokens for parsing. It handles:
//!
//! - Pull-based scanning, one token per call with one character of lookahead
//! - Recognition of keywords, identifiers, integers, operators and punctuation
//! - Token position tracking for error reporting
//! - Unknown characters, surfaced as `ILLEGAL` tokens instead of failures

pub mod lexer;
pub mod tokens;
