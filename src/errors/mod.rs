//! Error types for the front end.
//!
//! This module defines the diagnostics produced while parsing. It includes:
//!
//! - Error structures with source position information
//! - Specific error variants for each kind of syntax error
//! - Human-facing names and suggestions for error reports
//!
//! The lexer never fails; every diagnostic is raised by the parser and
//! accumulated rather than returned early.

pub mod errors;
