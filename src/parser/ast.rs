// AST (Abstract Syntax Tree) definitions for simplec

use super::position::{Pos, SourceFile};
use super::scope::{ScopeId, ScopeTable, SymbolId};
use std::fmt;

/// Half-open source range `[start, end)` covered by a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: Pos,
    pub end: Pos,
}

impl Span {
    pub fn new(start: Pos, end: Pos) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    /// Smallest span covering both `self` and `other`.
    pub fn union(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Whether `other` lies entirely within `self`.
    pub fn contains(&self, other: &Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

/// Common accessors shared by every node family.
pub trait Node {
    fn span(&self) -> Span;

    fn pos(&self) -> Pos {
        self.span().start
    }

    fn end(&self) -> Pos {
        self.span().end
    }
}

/// The two value types of the language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BasicType {
    Int,
    Float,
}

impl fmt::Display for BasicType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BasicType::Int => write!(f, "int"),
            BasicType::Float => write!(f, "float"),
        }
    }
}

/// Additive and multiplicative operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

/// Relational operators, only valid in `if`/`while` conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelOp {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
}

/// A name occurrence. `symbol` points back into the program's
/// [`ScopeTable`] and is `None` when the name could not be resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct Ident {
    pub name: String,
    pub span: Span,
    pub symbol: Option<SymbolId>,
}

/// Integer, float or string literal, kept as written.
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    pub text: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Ident(Ident),
    Int(Literal),
    Float(Literal),
    /// Only produced inside `write` lists
    Str(Literal),
    Neg {
        operand: Box<Expr>,
        span: Span,
    },
    Binary {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
        span: Span,
    },
    Relational {
        op: RelOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
        span: Span,
    },
    Assign {
        target: Ident,
        value: Box<Expr>,
        span: Span,
    },
    Paren {
        inner: Box<Expr>,
        span: Span,
    },
    Call {
        callee: Ident,
        arg: Box<Expr>,
        span: Span,
    },
    /// Placeholder where no expression could be parsed
    Bad {
        span: Span,
    },
}

/// `int a, b, c;`
#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub ty: BasicType,
    pub names: Vec<Ident>,
    pub span: Span,
}

/// Prototype: `float f(int);`
#[derive(Debug, Clone, PartialEq)]
pub struct FuncDecl {
    pub ret: BasicType,
    pub name: Ident,
    pub param_ty: BasicType,
    pub span: Span,
}

/// `int f(float x) { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct FuncDef {
    pub ret: BasicType,
    pub name: Ident,
    pub param_ty: BasicType,
    pub param: Ident,
    pub body: Block,
    pub span: Span,
}

/// Braced statement list with the scope it introduced
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub scope: ScopeId,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Expr {
        expr: Expr,
        span: Span,
    },
    /// Local declaration inside a block
    Decl(VarDecl),
    If {
        cond: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
        span: Span,
    },
    While {
        cond: Expr,
        body: Box<Stmt>,
        span: Span,
    },
    Read {
        targets: Vec<Ident>,
        span: Span,
    },
    Write {
        items: Vec<Expr>,
        span: Span,
    },
    Return {
        value: Expr,
        span: Span,
    },
    Block(Block),
    /// Malformed statement skipped during recovery
    Bad {
        span: Span,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Decl {
    Var(VarDecl),
    FuncDecl(FuncDecl),
    FuncDef(FuncDef),
    /// Tokens skipped while looking for the next declaration
    Bad {
        span: Span,
    },
}

/// Root of the tree. Owns every scope and symbol created during the parse
/// as well as the line table needed to render node positions.
#[derive(Debug, Clone)]
pub struct Program {
    pub decls: Vec<Decl>,
    pub scopes: ScopeTable,
    pub global: ScopeId,
    pub file: SourceFile,
    pub span: Span,
}

impl Program {
    /// Function definitions in source order
    pub fn functions(&self) -> impl Iterator<Item = &FuncDef> {
        self.decls.iter().filter_map(|decl| match decl {
            Decl::FuncDef(def) => Some(def),
            _ => None,
        })
    }
}

impl Node for Ident {
    fn span(&self) -> Span {
        self.span
    }
}

impl Node for Literal {
    fn span(&self) -> Span {
        self.span
    }
}

impl Node for Expr {
    fn span(&self) -> Span {
        match self {
            Expr::Ident(ident) => ident.span,
            Expr::Int(lit) | Expr::Float(lit) | Expr::Str(lit) => lit.span,
            Expr::Neg { span, .. }
            | Expr::Binary { span, .. }
            | Expr::Relational { span, .. }
            | Expr::Assign { span, .. }
            | Expr::Paren { span, .. }
            | Expr::Call { span, .. }
            | Expr::Bad { span } => *span,
        }
    }
}

impl Node for VarDecl {
    fn span(&self) -> Span {
        self.span
    }
}

impl Node for FuncDecl {
    fn span(&self) -> Span {
        self.span
    }
}

impl Node for FuncDef {
    fn span(&self) -> Span {
        self.span
    }
}

impl Node for Block {
    fn span(&self) -> Span {
        self.span
    }
}

impl Node for Stmt {
    fn span(&self) -> Span {
        match self {
            Stmt::Decl(decl) => decl.span,
            Stmt::Block(block) => block.span,
            Stmt::Expr { span, .. }
            | Stmt::If { span, .. }
            | Stmt::While { span, .. }
            | Stmt::Read { span, .. }
            | Stmt::Write { span, .. }
            | Stmt::Return { span, .. }
            | Stmt::Bad { span } => *span,
        }
    }
}

impl Node for Decl {
    fn span(&self) -> Span {
        match self {
            Decl::Var(decl) => decl.span,
            Decl::FuncDecl(decl) => decl.span,
            Decl::FuncDef(def) => def.span,
            Decl::Bad { span } => *span,
        }
    }
}

impl Node for Program {
    fn span(&self) -> Span {
        self.span
    }
}
