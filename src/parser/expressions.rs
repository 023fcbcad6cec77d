//! Expression parsing implementation
//!
//! Expressions are parsed by plain recursive descent, one function per
//! precedence level, lowest first:
//!
//! ```text
//! expr      ::= ID "=" expr | expr1
//! bool_expr ::= expr1 relop expr1
//! expr1     ::= term { ("+" | "-") term }
//! term      ::= ["-"] factor { ("*" | "/") ["-"] factor }
//! factor    ::= ID | ID "(" expr ")" | INTEGER | FLOAT | "(" expr ")"
//! ```
//!
//! Relational operators only appear in `if`/`while` conditions, through
//! [`Parser::parse_bool_expr`]. Binary operators are left-associative and
//! assignment is right-associative.
//!
//! An identifier that opens an `expr` is consumed before we know whether
//! it is an assignment target. When no `=` follows it is turned into a
//! factor and fed back into the `term`/`expr1` loops as their first operand.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::parse::Parser;
use crate::parser::token::TokenKind;

impl Parser<'_> {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_expr(&mut self) -> Expr {
        if !self.at(TokenKind::Ident) {
            return self.parse_expr1();
        }

        let ident = self.parse_ident();
        if self.at(TokenKind::OpAssign) {
            self.next();
            let target = self.resolve_variable(ident, "assign to");
            let value = self.parse_expr();
            let span = target.span.union(value.span());
            return Expr::Assign {
                target,
                value: Box::new(value),
                span,
            };
        }

        let first = self.finish_ident_factor(ident);
        let term = self.parse_term_rest(first);
        self.parse_expr1_rest(term)
    }

    /// `expr1 relop expr1`. Without a relational operator the left operand
    /// is returned on its own after reporting.
    pub(crate) fn parse_bool_expr(&mut self) -> Expr {
        let lhs = self.parse_expr1();

        let op = match self.tok.kind {
            TokenKind::OpLt => RelOp::Lt,
            TokenKind::OpLe => RelOp::Le,
            TokenKind::OpGt => RelOp::Gt,
            TokenKind::OpGe => RelOp::Ge,
            TokenKind::OpEq => RelOp::Eq,
            _ => {
                self.error_expected("relational operator");
                return lhs;
            }
        };
        self.next();

        let rhs = self.parse_expr1();
        let span = lhs.span().union(rhs.span());
        Expr::Relational {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
            span,
        }
    }

    /// Additive level
    fn parse_expr1(&mut self) -> Expr {
        let first = self.parse_term();
        self.parse_expr1_rest(first)
    }

    fn parse_expr1_rest(&mut self, mut lhs: Expr) -> Expr {
        loop {
            let op = match self.tok.kind {
                TokenKind::OpPlus => BinOp::Add,
                TokenKind::OpMinus => BinOp::Sub,
                _ => return lhs,
            };
            self.next();
            let rhs = self.parse_term();
            lhs = binary(op, lhs, rhs);
        }
    }

    /// Multiplicative level
    fn parse_term(&mut self) -> Expr {
        let first = self.parse_signed_factor();
        self.parse_term_rest(first)
    }

    fn parse_term_rest(&mut self, mut lhs: Expr) -> Expr {
        loop {
            let op = match self.tok.kind {
                TokenKind::OpMultiply => BinOp::Mul,
                TokenKind::OpDivide => BinOp::Div,
                _ => return lhs,
            };
            self.next();
            let rhs = self.parse_signed_factor();
            lhs = binary(op, lhs, rhs);
        }
    }

    /// A factor behind any number of unary minuses. Pairs cancel, so
    /// `--x` is just `x`.
    fn parse_signed_factor(&mut self) -> Expr {
        let start = self.tok.pos;
        let mut negate = false;
        while self.at(TokenKind::OpMinus) {
            negate = !negate;
            self.next();
        }

        let factor = self.parse_factor();
        if !negate {
            return factor;
        }
        Expr::Neg {
            span: Span::new(start, factor.end()),
            operand: Box::new(factor),
        }
    }

    fn parse_factor(&mut self) -> Expr {
        match self.tok.kind {
            TokenKind::Ident => {
                let ident = self.parse_ident();
                self.finish_ident_factor(ident)
            }
            TokenKind::Integer => Expr::Int(self.parse_literal()),
            TokenKind::Float => Expr::Float(self.parse_literal()),
            TokenKind::LPar => {
                let start = self.expect(TokenKind::LPar);
                let inner = self.parse_expr();
                self.expect(TokenKind::RPar);
                Expr::Paren {
                    inner: Box::new(inner),
                    span: self.span_from(start),
                }
            }
            _ => {
                self.error_expected("operand");
                Expr::Bad {
                    span: Span::new(self.prev_end, self.prev_end),
                }
            }
        }
    }

    /// Resolve an identifier already consumed as a factor. Names bound to a
    /// function continue as a call; so does anything followed by `(`, which
    /// is then reported as a call to a non-function.
    fn finish_ident_factor(&mut self, mut ident: Ident) -> Expr {
        let symbol = self.resolve(&ident.name);
        let is_function = symbol.is_some_and(|id| self.scopes.symbol(id).is_function());

        if is_function {
            ident.symbol = symbol;
            return self.parse_call(ident);
        }

        if self.at(TokenKind::LPar) {
            let message = match symbol {
                None => format!("call to undeclared function '{}'", ident.name),
                Some(_) => format!("'{}' is not a function", ident.name),
            };
            self.error(ident.span.start, message);
            return self.parse_call(ident);
        }

        if symbol.is_none() {
            self.error(ident.span.start, format!("undeclared name '{}'", ident.name));
        }
        ident.symbol = symbol;
        Expr::Ident(ident)
    }

    /// `callee "(" expr ")"`, with the callee already consumed
    fn parse_call(&mut self, callee: Ident) -> Expr {
        self.expect(TokenKind::LPar);
        let arg = self.parse_expr();
        self.expect(TokenKind::RPar);

        Expr::Call {
            span: self.span_from(callee.span.start),
            callee,
            arg: Box::new(arg),
        }
    }

    /// Integer, float or string literal at the current token
    pub(crate) fn parse_literal(&mut self) -> Literal {
        let text = self.tok.literal.clone();
        let start = self.tok.pos;
        self.next();
        Literal {
            text,
            span: self.span_from(start),
        }
    }
}

fn binary(op: BinOp, lhs: Expr, rhs: Expr) -> Expr {
    let span = lhs.span().union(rhs.span());
    Expr::Binary {
        op,
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
        span,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::errors::ErrorList;

    /// Parse `src` as the returned expression of a function whose
    /// parameter is `x`, alongside globals `a`, `b` and function `g`.
    fn parse_return(src: &str) -> (Expr, ErrorList) {
        let source = format!(
            "int a, b; float g(int); int f(int x) {{ return {}; }}",
            src
        );
        let (program, errors) = Parser::new("", &source).parse_program();
        let def = program.functions().next().unwrap().clone();
        match def.body.stmts.into_iter().next() {
            Some(Stmt::Return { value, .. }) => (value, errors),
            other => panic!("Expected return statement, got {:?}", other),
        }
    }

    #[test]
    fn test_multiplication_binds_tighter() {
        let (expr, errors) = parse_return("a + b * 4");
        assert!(errors.is_empty(), "{}", errors);
        let Expr::Binary { op: BinOp::Add, rhs, .. } = expr else {
            panic!("Expected addition, got {:?}", expr);
        };
        assert!(matches!(*rhs, Expr::Binary { op: BinOp::Mul, .. }));
    }

    #[test]
    fn test_left_associativity() {
        let (expr, errors) = parse_return("a - b - x");
        assert!(errors.is_empty(), "{}", errors);
        let Expr::Binary { op: BinOp::Sub, lhs, rhs, .. } = expr else {
            panic!("Expected subtraction, got {:?}", expr);
        };
        assert!(matches!(*lhs, Expr::Binary { op: BinOp::Sub, .. }));
        assert!(matches!(*rhs, Expr::Ident(ref i) if i.name == "x"));
    }

    #[test]
    fn test_assignment_is_right_associative() {
        let (expr, errors) = parse_return("a = b = x + 1");
        assert!(errors.is_empty(), "{}", errors);
        let Expr::Assign { target, value, .. } = expr else {
            panic!("Expected assignment, got {:?}", expr);
        };
        assert_eq!(target.name, "a");
        assert!(matches!(*value, Expr::Assign { ref target, .. } if target.name == "b"));
    }

    #[test]
    fn test_identifier_folds_back_into_arithmetic() {
        let (expr, errors) = parse_return("x * 2 + a");
        assert!(errors.is_empty(), "{}", errors);
        let Expr::Binary { op: BinOp::Add, lhs, .. } = expr else {
            panic!("Expected addition, got {:?}", expr);
        };
        assert!(matches!(*lhs, Expr::Binary { op: BinOp::Mul, .. }));
    }

    #[test]
    fn test_unary_minus() {
        let (expr, errors) = parse_return("-a * -b");
        assert!(errors.is_empty(), "{}", errors);
        let Expr::Binary { op: BinOp::Mul, lhs, rhs, .. } = expr else {
            panic!("Expected multiplication, got {:?}", expr);
        };
        assert!(matches!(*lhs, Expr::Neg { .. }));
        assert!(matches!(*rhs, Expr::Neg { .. }));
    }

    #[test]
    fn test_double_negation_cancels() {
        let (expr, errors) = parse_return("--x");
        assert!(errors.is_empty(), "{}", errors);
        assert!(matches!(expr, Expr::Ident(ref i) if i.name == "x"));

        let (expr, _) = parse_return("---x");
        assert!(matches!(expr, Expr::Neg { .. }));

        let (expr, errors) = parse_return("a - -b");
        assert!(errors.is_empty(), "{}", errors);
        let Expr::Binary { op: BinOp::Sub, rhs, .. } = expr else {
            panic!("Expected subtraction, got {:?}", expr);
        };
        assert!(matches!(*rhs, Expr::Neg { .. }));
    }

    #[test]
    fn test_parenthesized_expression() {
        let (expr, errors) = parse_return("(a + b) * 2.5");
        assert!(errors.is_empty(), "{}", errors);
        let Expr::Binary { op: BinOp::Mul, lhs, rhs, .. } = expr else {
            panic!("Expected multiplication, got {:?}", expr);
        };
        assert!(matches!(*lhs, Expr::Paren { .. }));
        assert!(matches!(*rhs, Expr::Float(ref lit) if lit.text == "2.5"));
    }

    #[test]
    fn test_function_call_resolves_symbol() {
        let (expr, errors) = parse_return("g(x + 1) / f(2)");
        assert!(errors.is_empty(), "{}", errors);
        let Expr::Binary { lhs, rhs, .. } = expr else {
            panic!("Expected division, got {:?}", expr);
        };
        assert!(matches!(*lhs, Expr::Call { ref callee, .. } if callee.symbol.is_some()));
        assert!(matches!(*rhs, Expr::Call { ref callee, .. } if callee.name == "f"));
    }

    #[test]
    fn test_call_to_undeclared_function() {
        let (expr, errors) = parse_return("h(1) + 2");
        assert_eq!(errors.len(), 1);
        assert!(errors.to_string().contains("call to undeclared function 'h'"));
        let Expr::Binary { lhs, .. } = expr else {
            panic!("Expected addition, got {:?}", expr);
        };
        assert!(matches!(*lhs, Expr::Call { ref callee, .. } if callee.symbol.is_none()));
    }

    #[test]
    fn test_call_to_variable() {
        let (_, errors) = parse_return("a(1)");
        assert_eq!(errors.len(), 1);
        assert!(errors.to_string().contains("'a' is not a function"));
    }

    #[test]
    fn test_undeclared_variable() {
        let (expr, errors) = parse_return("zz + 1");
        assert_eq!(errors.len(), 1);
        assert!(errors.to_string().contains("undeclared name 'zz'"));
        assert!(matches!(expr, Expr::Binary { .. }));
    }

    #[test]
    fn test_assign_to_function_is_reported() {
        let (_, errors) = parse_return("g = 1");
        assert_eq!(errors.len(), 1);
        assert!(errors.to_string().contains("cannot assign to function 'g'"));
    }

    #[test]
    fn test_missing_operand() {
        let (expr, errors) = parse_return("a +");
        assert_eq!(errors.len(), 1);
        let Expr::Binary { rhs, .. } = expr else {
            panic!("Expected addition, got {:?}", expr);
        };
        assert!(matches!(*rhs, Expr::Bad { .. }));
    }

    #[test]
    fn test_missing_operand_stays_inside_statement() {
        let (program, errors) = Parser::new("", "int f(int x) { return x +     ").parse_program();
        assert!(!errors.is_empty());

        let def = program.functions().next().unwrap();
        let Stmt::Return { value, span } = &def.body.stmts[0] else {
            panic!("Expected return statement, got {:?}", def.body.stmts[0]);
        };
        let Expr::Binary { rhs, .. } = value else {
            panic!("Expected addition, got {:?}", value);
        };
        assert!(matches!(**rhs, Expr::Bad { .. }));
        assert!(span.contains(&value.span()));
        assert!(def.body.span().contains(span));
    }
}
