//! Token kind catalog
//!
//! The closed set of lexical categories produced by the scanner, grouped
//! into keywords, operators, grouping punctuation and literals.

use super::position::Pos;
use std::fmt;

/// Lexical category of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Eof,
    Illegal,
    Comment,

    // Keywords
    KwInt,
    KwFloat,
    KwIf,
    KwElse,
    KwWhile,
    KwReturn,
    KwRead,
    KwWrite,

    // Operators
    OpPlus,     // +
    OpMinus,    // -
    OpMultiply, // *
    OpDivide,   // /
    OpAssign,   // =
    OpEq,       // ==
    OpLt,       // <
    OpLe,       // <=
    OpGt,       // >
    OpGe,       // >=

    // Grouping
    LPar,   // (
    RPar,   // )
    LBrace, // {
    RBrace, // }
    Semi,   // ;
    Comma,  // ,

    // Literals
    Ident,
    Integer,
    Float,
    String,
}

impl TokenKind {
    pub const KEYWORDS: &'static [TokenKind] = &[
        TokenKind::KwInt,
        TokenKind::KwFloat,
        TokenKind::KwIf,
        TokenKind::KwElse,
        TokenKind::KwWhile,
        TokenKind::KwReturn,
        TokenKind::KwRead,
        TokenKind::KwWrite,
    ];

    pub const OPERATORS: &'static [TokenKind] = &[
        TokenKind::OpPlus,
        TokenKind::OpMinus,
        TokenKind::OpMultiply,
        TokenKind::OpDivide,
        TokenKind::OpAssign,
        TokenKind::OpEq,
        TokenKind::OpLt,
        TokenKind::OpLe,
        TokenKind::OpGt,
        TokenKind::OpGe,
    ];

    pub const GROUPING: &'static [TokenKind] = &[
        TokenKind::LPar,
        TokenKind::RPar,
        TokenKind::LBrace,
        TokenKind::RBrace,
        TokenKind::Semi,
        TokenKind::Comma,
    ];

    /// Catalog spelling of the kind: the exact text for fixed tokens, a
    /// descriptive name for the others.
    pub fn as_str(self) -> &'static str {
        match self {
            TokenKind::Eof => "EOF",
            TokenKind::Illegal => "Illegal",
            TokenKind::Comment => "Comment",
            TokenKind::KwInt => "int",
            TokenKind::KwFloat => "float",
            TokenKind::KwIf => "if",
            TokenKind::KwElse => "else",
            TokenKind::KwWhile => "while",
            TokenKind::KwReturn => "return",
            TokenKind::KwRead => "read",
            TokenKind::KwWrite => "write",
            TokenKind::OpPlus => "+",
            TokenKind::OpMinus => "-",
            TokenKind::OpMultiply => "*",
            TokenKind::OpDivide => "/",
            TokenKind::OpAssign => "=",
            TokenKind::OpEq => "==",
            TokenKind::OpLt => "<",
            TokenKind::OpLe => "<=",
            TokenKind::OpGt => ">",
            TokenKind::OpGe => ">=",
            TokenKind::LPar => "(",
            TokenKind::RPar => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::Semi => ";",
            TokenKind::Comma => ",",
            TokenKind::Ident => "Identifier",
            TokenKind::Integer => "Integer",
            TokenKind::Float => "Float",
            TokenKind::String => "String",
        }
    }

    /// Keyword lookup for a scanned identifier. Exact and case-sensitive.
    pub fn lookup(ident: &str) -> TokenKind {
        match ident {
            "int" => TokenKind::KwInt,
            "float" => TokenKind::KwFloat,
            "if" => TokenKind::KwIf,
            "else" => TokenKind::KwElse,
            "while" => TokenKind::KwWhile,
            "return" => TokenKind::KwReturn,
            "read" => TokenKind::KwRead,
            "write" => TokenKind::KwWrite,
            _ => TokenKind::Ident,
        }
    }

    /// Reverse lookup over every fixed spelling (keywords, operators and
    /// grouping punctuation).
    pub fn from_literal(text: &str) -> Option<TokenKind> {
        Self::KEYWORDS
            .iter()
            .chain(Self::OPERATORS)
            .chain(Self::GROUPING)
            .copied()
            .find(|kind| kind.as_str() == text)
    }

    pub fn is_keyword(self) -> bool {
        Self::KEYWORDS.contains(&self)
    }

    pub fn is_operator(self) -> bool {
        Self::OPERATORS.contains(&self)
    }

    pub fn is_grouping(self) -> bool {
        Self::GROUPING.contains(&self)
    }

    pub fn is_literal(self) -> bool {
        matches!(
            self,
            TokenKind::Ident | TokenKind::Integer | TokenKind::Float | TokenKind::String
        )
    }

    /// `<`, `<=`, `>`, `>=` or `==`.
    pub fn is_relational(self) -> bool {
        matches!(
            self,
            TokenKind::OpLt | TokenKind::OpLe | TokenKind::OpGt | TokenKind::OpGe | TokenKind::OpEq
        )
    }

    /// `int` or `float`.
    pub fn is_type_keyword(self) -> bool {
        matches!(self, TokenKind::KwInt | TokenKind::KwFloat)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One scanned lexeme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
    pub pos: Pos,
}

impl Token {
    pub fn new(kind: TokenKind, literal: impl Into<String>, pos: Pos) -> Self {
        Self {
            kind,
            literal: literal.into(),
            pos,
        }
    }

    /// Position immediately after the last byte of the literal.
    pub fn end(&self) -> Pos {
        self.pos.advance(self.literal.len())
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Eof => write!(f, "end of file"),
            _ => write!(f, "'{}'", self.literal),
        }
    }
}
