/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: The `Program` root, the `Stmt`/`Expr` sum types and the `Node` trait
/// - expressions: Definitions for the expression node types
/// - statements: Definitions for the statement node types
///
/// Every node renders to a canonical, fully parenthesised string through
/// `Display`.
pub mod ast;
pub mod expressions;
pub mod statements;

#[cfg(test)]
mod tests;
