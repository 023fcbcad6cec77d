//! # Introduction
//!
//! simplec is the front end of a compiler for a small C-like teaching
//! language: a scanner, a recursive-descent parser and an AST builder that
//! resolves every name against nested lexical scopes.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Scanner → Parser (+ Scope Table) → Program AST + ErrorList
//! ```
//!
//! 1. [`parser::lexer`]: turns the source into tokens on demand and records
//!    line starts in a [`parser::position::SourceFile`].
//! 2. [`parser::Parser`]: pulls tokens one at a time, builds the
//!    [`parser::ast`] bottom-up and opens a [`parser::scope`] for every
//!    function body, block and `if`/`while` arm.
//! 3. [`parser::errors`]: collects diagnostics; parsing always runs to the
//!    end of the file.
//!
//! ## Example
//!
//! ```
//! let (program, errors) = simplec::parser::parse(
//!     "demo.sc",
//!     "int square(int x) { return x * x; }",
//! );
//! assert!(errors.is_empty());
//! assert_eq!(program.decls.len(), 1);
//! ```

pub mod parser;
