//! Declaration parsing implementation
//!
//! This module handles everything that can appear at the top level of a
//! program, plus the variable declarations that may open a block:
//!
//! - Variable declarations: `int a, b;`
//! - Function prototypes: `float f(int);`
//! - Function definitions: `int f(float x) { ... }`
//!
//! # Grammar
//!
//! ```text
//! program       ::= { decl | function_decl | function_def }
//! decl          ::= kind var_list ";"
//! function_decl ::= kind ID "(" kind ")" ";"
//! function_def  ::= kind ID "(" kind ID ")" block
//! kind          ::= "int" | "float"
//! var_list      ::= ID { "," ID }
//! ```
//!
//! A prototype and a later definition with the same signature share one
//! [`Symbol`]; anything else reusing a global name is a redeclaration.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::parse::Parser;
use crate::parser::position::Pos;
use crate::parser::scope::{Symbol, SymbolId};
use crate::parser::token::TokenKind;

impl Parser<'_> {
    /// Parse one top-level declaration or definition.
    pub(crate) fn parse_top_level_declaration(&mut self) -> Decl {
        let start = self.tok.pos;

        if !self.tok.kind.is_type_keyword() {
            self.error_expected("declaration");
            self.next();
            return self.skip_to_declaration(start);
        }

        let ty = self.parse_kind();
        if !self.at(TokenKind::Ident) {
            self.error_expected("identifier");
            return self.skip_to_declaration(start);
        }
        let name = self.parse_ident();

        if self.at(TokenKind::LPar) {
            self.parse_function(start, ty, name)
        } else {
            Decl::Var(self.parse_var_list(start, ty, name))
        }
    }

    /// Skip ahead to the next `int`, `float` or end of file.
    fn skip_to_declaration(&mut self, start: Pos) -> Decl {
        while !self.tok.kind.is_type_keyword() && !self.at(TokenKind::Eof) {
            self.next();
        }
        Decl::Bad {
            span: self.span_from(start),
        }
    }

    /// Parse a complete `kind var_list ';'` declaration.
    pub(crate) fn parse_var_decl(&mut self) -> VarDecl {
        let start = self.tok.pos;
        let ty = self.parse_kind();
        let first = self.parse_ident();
        self.parse_var_list(start, ty, first)
    }

    /// Parse the rest of a variable list once its first name is consumed.
    fn parse_var_list(&mut self, start: Pos, ty: BasicType, first: Ident) -> VarDecl {
        let mut names = vec![self.declare_variable(first, ty)];

        while self.at(TokenKind::Comma) {
            self.next();
            let name = self.parse_ident();
            names.push(self.declare_variable(name, ty));
        }
        self.expect(TokenKind::Semi);

        VarDecl {
            ty,
            names,
            span: self.span_from(start),
        }
    }

    /// Parse a prototype or a definition after `kind ID`.
    fn parse_function(&mut self, start: Pos, ret: BasicType, mut name: Ident) -> Decl {
        self.expect(TokenKind::LPar);
        let param_ty = self.parse_kind();

        let param = if self.at(TokenKind::Ident) {
            let param = self.parse_ident();
            self.expect(TokenKind::RPar);
            if !self.at(TokenKind::LBrace) {
                // No body follows: record it as a prototype.
                self.error_expected("'{'");
                name.symbol = self.declare_function(&name, ret, param_ty, false);
                if self.at(TokenKind::Semi) {
                    self.next();
                }
                return Decl::FuncDecl(FuncDecl {
                    ret,
                    name,
                    param_ty,
                    span: self.span_from(start),
                });
            }
            param
        } else {
            self.expect(TokenKind::RPar);
            if !self.at(TokenKind::LBrace) {
                name.symbol = self.declare_function(&name, ret, param_ty, false);
                self.expect(TokenKind::Semi);
                return Decl::FuncDecl(FuncDecl {
                    ret,
                    name,
                    param_ty,
                    span: self.span_from(start),
                });
            }
            self.error(self.tok.pos, "function definition is missing its parameter name");
            Ident {
                name: String::new(),
                span: Span::new(self.prev_end, self.prev_end),
                symbol: None,
            }
        };
        name.symbol = self.declare_function(&name, ret, param_ty, true);

        let scope = self.open_scope();
        let param = self.declare_variable(param, param_ty);
        let body = self.parse_block_body(scope);
        self.close_scope();

        Decl::FuncDef(FuncDef {
            ret,
            name,
            param_ty,
            param,
            body,
            span: self.span_from(start),
        })
    }

    /// Bind a function name in the current scope.
    ///
    /// A matching prototype is reused. Two bodies for one function, a
    /// signature mismatch, or a clash with a variable are reported.
    fn declare_function(
        &mut self,
        name: &Ident,
        ret: BasicType,
        param: BasicType,
        is_definition: bool,
    ) -> Option<SymbolId> {
        let symbol = Symbol::function(&name.name, ret, param, name.span.start);
        let existing = match self.scopes.insert(self.cur_scope, symbol) {
            Ok(id) => {
                if is_definition {
                    self.defined.insert(id);
                }
                return Some(id);
            }
            Err(existing) => existing,
        };

        let previous = self.scopes.symbol(existing);
        let compatible = previous.is_function() && previous.ty == ret && previous.param == Some(param);
        let previous_at = self.scanner.file().position(previous.decl);

        if !compatible {
            self.error(
                name.span.start,
                format!(
                    "'{}' redeclared in this scope, previous declaration at {}",
                    name.name, previous_at
                ),
            );
            return None;
        }

        if is_definition && !self.defined.insert(existing) {
            self.error(
                name.span.start,
                format!("redefinition of function '{}', previous definition at {}", name.name, previous_at),
            );
        }
        Some(existing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::scope::SymbolKind;

    fn parse(src: &str) -> (Program, crate::parser::errors::ErrorList) {
        Parser::new("", src).parse_program()
    }

    #[test]
    fn test_global_variables() {
        let (program, errors) = parse("int a, b; float c;");
        assert!(errors.is_empty(), "{}", errors);
        assert_eq!(program.decls.len(), 2);

        match &program.decls[0] {
            Decl::Var(decl) => {
                assert_eq!(decl.ty, BasicType::Int);
                let names: Vec<&str> = decl.names.iter().map(|n| n.name.as_str()).collect();
                assert_eq!(names, vec!["a", "b"]);
            }
            other => panic!("Expected variable declaration, got {:?}", other),
        }

        let c = program.scopes.lookup(program.global, "c").unwrap();
        assert_eq!(program.scopes.symbol(c).ty, BasicType::Float);
        assert_eq!(program.scopes.symbol(c).kind, SymbolKind::Variable);
    }

    #[test]
    fn test_prototype_then_definition_share_symbol() {
        let (program, errors) = parse("float f(int); float f(int x) { return x; }");
        assert!(errors.is_empty(), "{}", errors);

        let (proto, def) = match (&program.decls[0], &program.decls[1]) {
            (Decl::FuncDecl(proto), Decl::FuncDef(def)) => (proto, def),
            other => panic!("Expected prototype and definition, got {:?}", other),
        };
        assert_eq!(proto.param_ty, BasicType::Int);
        assert!(proto.name.symbol.is_some());
        assert_eq!(proto.name.symbol, def.name.symbol);
        assert_eq!(def.param.name, "x");
        assert_eq!(program.scopes.symbol_count(program.global), 1);
    }

    #[test]
    fn test_mismatched_prototype_is_reported() {
        let (_, errors) = parse("int f(int); int f(float x) { return x; }");
        assert_eq!(errors.len(), 1);
        assert!(errors.to_string().contains("'f' redeclared"));
    }

    #[test]
    fn test_second_definition_is_reported() {
        let (_, errors) = parse("int f(int x) { return x; } int f(int y) { return y; }");
        assert_eq!(errors.len(), 1);
        assert!(errors.to_string().contains("redefinition of function 'f'"));
    }

    #[test]
    fn test_variable_redeclared_in_same_scope() {
        let (program, errors) = parse("int a;\nfloat a;");
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.to_string(),
            "2:7 'a' redeclared in this scope, previous declaration at 1:5\n"
        );
        let a = program.scopes.lookup(program.global, "a").unwrap();
        assert_eq!(program.scopes.symbol(a).ty, BasicType::Int);
    }

    #[test]
    fn test_parameter_lives_in_function_scope() {
        let (program, errors) = parse("int f(int x) { return x; }");
        assert!(errors.is_empty(), "{}", errors);
        let def = program.functions().next().unwrap();
        let x = def.param.symbol.unwrap();

        assert_eq!(program.scopes.scope_of(x), def.body.scope);
        assert_eq!(program.scopes.parent(def.body.scope), Some(program.global));
        assert_eq!(program.scopes.lookup(program.global, "x"), None);
    }

    #[test]
    fn test_junk_at_top_level_is_skipped() {
        let (program, errors) = parse("x = 1; } int a;");
        assert_eq!(errors.len(), 1);
        assert!(matches!(program.decls[0], Decl::Bad { .. }));
        assert!(matches!(program.decls[1], Decl::Var(_)));
    }

    #[test]
    fn test_definition_without_parameter_name() {
        let (program, errors) = parse("int f(int) { return 1; }");
        assert_eq!(errors.len(), 1);
        assert!(errors.to_string().contains("missing its parameter name"));

        let def = program.functions().next().unwrap();
        assert!(def.param.name.is_empty());
        assert!(def.param.symbol.is_none());
        assert_eq!(def.body.stmts.len(), 1);
    }

    #[test]
    fn test_named_prototype_without_body_is_not_a_definition() {
        let (program, errors) = parse("int f(int x);\nint f(int x) { return x; }");
        assert_eq!(errors.to_string(), "1:13 Expected '{', found ';'\n");
        assert!(matches!(program.decls[0], Decl::FuncDecl(_)));

        let def = program.functions().next().unwrap();
        assert_eq!(def.name.symbol, program.scopes.lookup(program.global, "f"));
        assert_eq!(def.body.stmts.len(), 1);
    }

    #[test]
    fn test_missing_name_after_kind() {
        let (program, errors) = parse("int ; float y;");
        assert_eq!(errors.len(), 1);
        assert_eq!(program.decls.len(), 2);
        assert!(program.scopes.lookup(program.global, "y").is_some());
    }
}
