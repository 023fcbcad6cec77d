//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure:
//! the single-token lookahead, `expect`, diagnostics, scope bookkeeping and
//! the program entry point.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following organization:
//! - This module: Parser struct, helper methods, and coordination
//! - `declarations`: top-level declarations, prototypes and function definitions
//! - `statements`: statements, blocks and statement-level recovery
//! - `expressions`: `expr`, `expr1`, `term`, `factor` and relational conditions
//!
//! # Error handling
//!
//! No parse function returns `Result`. Each one returns its best-effort node
//! and appends to the shared [`ErrorList`], so one malformed statement never
//! hides the diagnostics for the rest of the file.

use crate::parser::ast::*;
use crate::parser::errors::ErrorList;
use crate::parser::lexer::Scanner;
use crate::parser::position::Pos;
use crate::parser::scope::{ScopeId, ScopeTable, Symbol, SymbolId};
use crate::parser::token::{Token, TokenKind};
use rustc_hash::FxHashSet;

/// Recursive descent parser for simplec
pub struct Parser<'src> {
    pub(crate) scanner: Scanner<'src>,
    pub(crate) errors: ErrorList,
    pub(crate) scopes: ScopeTable,
    pub(crate) top_scope: ScopeId,
    pub(crate) cur_scope: ScopeId,
    /// Current lookahead token
    pub(crate) tok: Token,
    /// End of the most recently consumed token
    pub(crate) prev_end: Pos,
    /// Functions that already have a body
    pub(crate) defined: FxHashSet<SymbolId>,
}

impl<'src> Parser<'src> {
    pub fn new(filename: &str, source: &'src str) -> Self {
        let scanner = Scanner::new(filename, source);
        let mut scopes = ScopeTable::new();
        let top_scope = scopes.new_scope(None);
        let start = scanner.file().pos(0);
        let placeholder = Token::new(TokenKind::Eof, "", start);

        let mut parser = Self {
            scanner,
            errors: ErrorList::new(),
            scopes,
            top_scope,
            cur_scope: top_scope,
            tok: placeholder,
            prev_end: start,
            defined: FxHashSet::default(),
        };
        parser.next();
        parser
    }

    /// Parse the entire program (top-level declarations).
    ///
    /// Always returns a [`Program`]; the accompanying [`ErrorList`] is empty
    /// exactly when the source was well formed.
    pub fn parse_program(mut self) -> (Program, ErrorList) {
        let mut decls = Vec::new();

        while !self.at(TokenKind::Eof) {
            decls.push(self.parse_top_level_declaration());
        }

        let Parser {
            scanner,
            errors,
            scopes,
            top_scope,
            tok,
            ..
        } = self;
        let file = scanner.into_file();
        let span = Span::new(file.pos(0), tok.pos);

        let program = Program {
            decls,
            scopes,
            global: top_scope,
            file,
            span,
        };
        (program, errors)
    }

    // ===== Helper methods =====

    /// Advance the lookahead by one token, skipping comments.
    pub(crate) fn next(&mut self) {
        self.prev_end = self.tok.end();
        loop {
            self.tok = self.scanner.next_token();
            if self.tok.kind != TokenKind::Comment {
                break;
            }
        }
    }

    pub(crate) fn at(&self, kind: TokenKind) -> bool {
        self.tok.kind == kind
    }

    /// Consume a token of `kind` and return its position.
    ///
    /// On a mismatch a diagnostic is recorded and the offending token is
    /// skipped so parsing can go on. Keywords, `;`, `{`, `}` and end of file
    /// are never skipped: they are where callers resynchronise.
    pub(crate) fn expect(&mut self, kind: TokenKind) -> Pos {
        let pos = self.tok.pos;
        if self.at(kind) {
            self.next();
            return pos;
        }

        self.error_expected(&describe(kind));
        if !self.at_sync_point() {
            self.next();
        }
        pos
    }

    fn at_sync_point(&self) -> bool {
        self.tok.kind.is_keyword()
            || matches!(
                self.tok.kind,
                TokenKind::Semi | TokenKind::LBrace | TokenKind::RBrace | TokenKind::Eof
            )
    }

    /// Record a diagnostic at `pos`.
    pub(crate) fn error(&mut self, pos: Pos, message: impl Into<String>) {
        let position = self.scanner.file().position(pos);
        self.errors.add(position, message);
    }

    /// Record `Expected <what>, found <current token>`.
    pub(crate) fn error_expected(&mut self, what: &str) {
        let message = format!("Expected {}, found {}", what, self.tok);
        self.error(self.tok.pos, message);
    }

    /// Span from `start` to the end of the last consumed token.
    pub(crate) fn span_from(&self, start: Pos) -> Span {
        Span::new(start, self.prev_end)
    }

    /// Consume an identifier. On a mismatch the returned [`Ident`] has an
    /// empty name, which no real identifier can have, and an empty span
    /// after the last consumed token.
    pub(crate) fn parse_ident(&mut self) -> Ident {
        if !self.at(TokenKind::Ident) {
            let span = Span::new(self.prev_end, self.prev_end);
            self.expect(TokenKind::Ident);
            return Ident {
                name: String::new(),
                span,
                symbol: None,
            };
        }

        let start = self.tok.pos;
        let name = self.tok.literal.clone();
        self.next();
        Ident {
            name,
            span: self.span_from(start),
            symbol: None,
        }
    }

    /// `int` or `float`; defaults to `int` after reporting anything else.
    pub(crate) fn parse_kind(&mut self) -> BasicType {
        let ty = match self.tok.kind {
            TokenKind::KwInt => BasicType::Int,
            TokenKind::KwFloat => BasicType::Float,
            _ => {
                self.error_expected("'int' or 'float'");
                return BasicType::Int;
            }
        };
        self.next();
        ty
    }

    // ===== Scopes =====

    /// Enter a new scope nested in the current one.
    pub(crate) fn open_scope(&mut self) -> ScopeId {
        let scope = self.scopes.new_scope(Some(self.cur_scope));
        self.cur_scope = scope;
        scope
    }

    /// Leave the current scope. It stays in the arena but is never current
    /// again.
    pub(crate) fn close_scope(&mut self) {
        self.cur_scope = self
            .scopes
            .parent(self.cur_scope)
            .unwrap_or(self.top_scope);
    }

    pub(crate) fn resolve(&self, name: &str) -> Option<SymbolId> {
        self.scopes.lookup(self.cur_scope, name)
    }

    /// Insert `symbol` into the current scope, reporting a redeclaration
    /// when the scope already binds the name.
    pub(crate) fn declare(&mut self, symbol: Symbol) -> Option<SymbolId> {
        let decl = symbol.decl;
        let name = symbol.name.clone();
        match self.scopes.insert(self.cur_scope, symbol) {
            Ok(id) => Some(id),
            Err(existing) => {
                let previous = self.scanner.file().position(self.scopes.symbol(existing).decl);
                self.error(
                    decl,
                    format!("'{}' redeclared in this scope, previous declaration at {}", name, previous),
                );
                None
            }
        }
    }

    /// Bind a freshly declared variable name in the current scope.
    pub(crate) fn declare_variable(&mut self, mut ident: Ident, ty: BasicType) -> Ident {
        if !ident.name.is_empty() {
            ident.symbol = self.declare(Symbol::variable(&ident.name, ty, ident.span.start));
        }
        ident
    }

    /// Resolve a name used as a variable (assignment target, `read` target).
    pub(crate) fn resolve_variable(&mut self, mut ident: Ident, action: &str) -> Ident {
        if ident.name.is_empty() {
            return ident;
        }
        match self.resolve(&ident.name) {
            None => {
                self.error(ident.span.start, format!("undeclared name '{}'", ident.name));
            }
            Some(id) if self.scopes.symbol(id).is_function() => {
                self.error(
                    ident.span.start,
                    format!("cannot {} function '{}'", action, ident.name),
                );
            }
            Some(id) => ident.symbol = Some(id),
        }
        ident
    }
}

/// How an expected token kind is named in diagnostics.
fn describe(kind: TokenKind) -> String {
    match kind {
        TokenKind::Ident => "identifier".to_string(),
        TokenKind::Integer => "integer literal".to_string(),
        TokenKind::Float => "float literal".to_string(),
        TokenKind::String => "string literal".to_string(),
        TokenKind::Eof => "end of file".to_string(),
        _ => format!("'{}'", kind),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookahead_skips_comments() {
        let mut parser = Parser::new("", "// header\nint /* inline */ x;");
        assert!(parser.at(TokenKind::KwInt));
        parser.next();
        assert!(parser.at(TokenKind::Ident));
        assert_eq!(parser.tok.literal, "x");
    }

    #[test]
    fn test_expect_mismatch_records_and_skips() {
        let mut parser = Parser::new("", "x y;");
        parser.expect(TokenKind::Ident);
        let pos = parser.expect(TokenKind::Semi);

        assert_eq!(parser.errors.len(), 1);
        assert_eq!(
            parser.errors.iter().next().unwrap().to_string(),
            "1:3 Expected ';', found 'y'"
        );
        assert_eq!(pos, parser.scanner.file().pos(2));
        assert!(parser.at(TokenKind::Semi));
    }

    #[test]
    fn test_expect_never_skips_sync_tokens() {
        let mut parser = Parser::new("", "}");
        parser.expect(TokenKind::Semi);
        assert!(parser.at(TokenKind::RBrace));
        assert_eq!(parser.errors.len(), 1);
    }

    #[test]
    fn test_scope_open_close() {
        let mut parser = Parser::new("", "");
        let global = parser.cur_scope;
        let inner = parser.open_scope();
        assert_ne!(inner, global);
        parser.close_scope();
        assert_eq!(parser.cur_scope, global);
        parser.close_scope();
        assert_eq!(parser.cur_scope, global);
    }
}
