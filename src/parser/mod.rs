//! simplec source code parser
//!
//! This module transforms simplec source text into an Abstract Syntax Tree (AST):
//! - [`position`]: byte offsets ↔ `line:column` for diagnostics
//! - [`token`]: the token kind catalog
//! - [`lexer`]: Tokenization (source text → tokens, pulled lazily)
//! - [`scope`]: nested symbol tables
//! - [`ast`]: AST node definitions
//! - [`errors`]: the diagnostic list
//! - [`parse`]: Parsing (tokens → AST), split across `declarations`,
//!   `statements` and `expressions`
//!
//! # Supported language
//!
//! - Types: `int`, `float`
//! - Global and block-local variable declarations
//! - Single-parameter functions, with optional prototypes
//! - Statements: `if`/`else`, `while`, `read`, `write`, `return`, blocks
//! - Expressions: `+ - * /`, unary `-`, assignment, calls, and the
//!   relational operators `< <= > >= ==` in conditions
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser with one token of lookahead.
//! No external parser generator dependencies. Parsing never fails: the
//! result is always a [`Program`] plus an [`ErrorList`] that is empty for
//! well-formed input.

pub mod ast;
mod declarations;
pub mod errors;
mod expressions;
pub mod lexer;
pub mod parse;
pub mod position;
pub mod scope;
mod statements;
pub mod token;

pub use ast::Program;
pub use errors::ErrorList;
pub use parse::Parser;

/// Parse a whole source file. `filename` only appears in diagnostics.
pub fn parse(filename: &str, source: &str) -> (Program, ErrorList) {
    Parser::new(filename, source).parse_program()
}
