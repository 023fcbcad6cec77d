//! Statement parsing implementation
//!
//! This module handles parsing of all statement types:
//!
//! - Local declarations: `int i, j;`
//! - Control flow: `if`/`else`, `while`
//! - I/O: `read a, b;`, `write "x = ", x;`
//! - `return expr;`
//! - Compound statements: `{ ... }`
//! - Expression statements: assignments, calls, arithmetic
//!
//! # Grammar
//!
//! ```text
//! block ::= "{" { decl | stmt } "}"
//! stmt  ::= expr ";"
//!         | "if" "(" bool_expr ")" stmt [ "else" stmt ]
//!         | "while" "(" bool_expr ")" stmt
//!         | "read" var_list ";"
//!         | "write" expr_or_str { "," expr_or_str } ";"
//!         | "return" expr ";"
//!         | block
//! ```
//!
//! Every block opens a scope, and so does each arm of an `if` and the body
//! of a `while`, even when it is a single statement.
//!
//! # Recovery
//!
//! A statement that starts with none of the tokens above becomes a
//! [`Stmt::Bad`]: tokens are skipped, one diagnostic each, through the next
//! `;` so that the following statements are parsed normally.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::parse::Parser;
use crate::parser::scope::ScopeId;
use crate::parser::token::TokenKind;

impl Parser<'_> {
    /// Parse a braced block in a new scope.
    pub(crate) fn parse_block(&mut self) -> Block {
        let scope = self.open_scope();
        let block = self.parse_block_body(scope);
        self.close_scope();
        block
    }

    /// Parse a braced block whose statements live in `scope`, which the
    /// caller has already made current.
    pub(crate) fn parse_block_body(&mut self, scope: ScopeId) -> Block {
        let start = self.tok.pos;
        let mut stmts = Vec::new();

        if !self.at(TokenKind::LBrace) {
            self.error_expected("'{'");
            return Block {
                stmts,
                scope,
                span: Span::new(self.prev_end, self.prev_end),
            };
        }
        self.next();

        while !self.at(TokenKind::RBrace) && !self.at(TokenKind::Eof) {
            stmts.push(self.parse_statement());
        }
        self.expect(TokenKind::RBrace);

        Block {
            stmts,
            scope,
            span: self.span_from(start),
        }
    }

    /// Parse a statement
    pub(crate) fn parse_statement(&mut self) -> Stmt {
        match self.tok.kind {
            TokenKind::KwInt | TokenKind::KwFloat => Stmt::Decl(self.parse_var_decl()),
            TokenKind::Ident
            | TokenKind::Integer
            | TokenKind::Float
            | TokenKind::LPar
            | TokenKind::OpMinus => self.parse_expr_statement(),
            TokenKind::KwIf => self.parse_if_statement(),
            TokenKind::KwWhile => self.parse_while_statement(),
            TokenKind::KwRead => self.parse_read_statement(),
            TokenKind::KwWrite => self.parse_write_statement(),
            TokenKind::KwReturn => self.parse_return_statement(),
            TokenKind::LBrace => Stmt::Block(self.parse_block()),
            _ => self.parse_bad_statement(),
        }
    }

    /// Parse a statement in a scope of its own (the arms of `if`/`while`).
    fn parse_scoped_statement(&mut self) -> Stmt {
        self.open_scope();
        let stmt = self.parse_statement();
        self.close_scope();
        stmt
    }

    fn parse_expr_statement(&mut self) -> Stmt {
        let expr = self.parse_expr();
        self.expect(TokenKind::Semi);
        Stmt::Expr {
            span: self.span_from(expr.pos()),
            expr,
        }
    }

    /// Parse if statement. A trailing `else` always belongs to the
    /// innermost `if`, because that `if` looks for it first.
    fn parse_if_statement(&mut self) -> Stmt {
        let start = self.expect(TokenKind::KwIf);

        self.expect(TokenKind::LPar);
        let cond = self.parse_bool_expr();
        self.expect(TokenKind::RPar);

        let then_branch = Box::new(self.parse_scoped_statement());
        let else_branch = if self.at(TokenKind::KwElse) {
            self.next();
            Some(Box::new(self.parse_scoped_statement()))
        } else {
            None
        };

        Stmt::If {
            cond,
            then_branch,
            else_branch,
            span: self.span_from(start),
        }
    }

    fn parse_while_statement(&mut self) -> Stmt {
        let start = self.expect(TokenKind::KwWhile);

        self.expect(TokenKind::LPar);
        let cond = self.parse_bool_expr();
        self.expect(TokenKind::RPar);

        let body = Box::new(self.parse_scoped_statement());

        Stmt::While {
            cond,
            body,
            span: self.span_from(start),
        }
    }

    /// `read a, b, c;`
    fn parse_read_statement(&mut self) -> Stmt {
        let start = self.expect(TokenKind::KwRead);
        let mut targets = Vec::new();

        loop {
            let ident = self.parse_ident();
            targets.push(self.resolve_variable(ident, "read into"));
            if !self.at(TokenKind::Comma) {
                break;
            }
            self.next();
        }
        self.expect(TokenKind::Semi);

        Stmt::Read {
            targets,
            span: self.span_from(start),
        }
    }

    /// `write "label", expr, ...;`
    fn parse_write_statement(&mut self) -> Stmt {
        let start = self.expect(TokenKind::KwWrite);
        let mut items = Vec::new();

        loop {
            if self.at(TokenKind::String) {
                items.push(Expr::Str(self.parse_literal()));
            } else {
                items.push(self.parse_expr());
            }
            if !self.at(TokenKind::Comma) {
                break;
            }
            self.next();
        }
        self.expect(TokenKind::Semi);

        Stmt::Write {
            items,
            span: self.span_from(start),
        }
    }

    fn parse_return_statement(&mut self) -> Stmt {
        let start = self.expect(TokenKind::KwReturn);
        let value = self.parse_expr();
        self.expect(TokenKind::Semi);

        Stmt::Return {
            value,
            span: self.span_from(start),
        }
    }

    /// Skip a malformed statement through the next `;`, reporting every
    /// skipped token. Stops early, without consuming, at `}` or end of file.
    fn parse_bad_statement(&mut self) -> Stmt {
        let start = self.tok.pos;
        let mut skipped = 0;

        while !matches!(
            self.tok.kind,
            TokenKind::Semi | TokenKind::RBrace | TokenKind::Eof
        ) {
            self.error(self.tok.pos, format!("unexpected {} in statement", self.tok));
            self.next();
            skipped += 1;
        }

        if self.at(TokenKind::Semi) {
            if skipped == 0 {
                self.error(self.tok.pos, "empty statement");
            }
            self.next();
        } else if skipped == 0 {
            // Nothing consumed: the statement is missing entirely.
            self.error_expected("statement");
            return Stmt::Bad {
                span: Span::new(self.prev_end, self.prev_end),
            };
        }

        Stmt::Bad {
            span: self.span_from(start),
        }
    }
}
