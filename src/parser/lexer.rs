//! Scanner (tokenizer) for simplec source code
//!
//! A hand-rolled state machine that hands out one [`Token`] per call to
//! [`Scanner::next_token`]. The parser pulls tokens lazily, so the scanner never
//! materialises the whole token stream. Line starts are recorded in the
//! owned [`SourceFile`] as newlines are consumed, which is what later turns
//! token positions into `line:column` pairs.
//!
//! Lexical errors never abort scanning: an unexpected character, an
//! unterminated string or an unterminated block comment is returned as a
//! [`TokenKind::Illegal`] token for the parser to report.

use super::position::{Pos, SourceFile};
use super::token::{Token, TokenKind};

/// Scanner over one in-memory source buffer.
pub struct Scanner<'src> {
    src: &'src str,
    file: SourceFile,
    /// Current character, `None` at end of input.
    ch: Option<char>,
    /// Byte offset of `ch`.
    offset: usize,
    /// Byte offset of the character after `ch`.
    read_offset: usize,
    /// Set once the iterator has yielded `Eof`.
    done: bool,
}

impl<'src> Scanner<'src> {
    /// Create a scanner for `src`. `filename` is only used in diagnostics
    /// and may be empty.
    pub fn new(filename: &str, src: &'src str) -> Self {
        let mut scanner = Self {
            src,
            file: SourceFile::new(filename, src.len()),
            ch: None,
            offset: 0,
            read_offset: 0,
            done: false,
        };
        scanner.advance();
        scanner
    }

    /// Line table built so far.
    pub fn file(&self) -> &SourceFile {
        &self.file
    }

    pub fn into_file(self) -> SourceFile {
        self.file
    }

    /// Scan the next token. Once the input is exhausted every call returns
    /// an `Eof` token positioned at the end of the file.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let start = self.offset;
        let pos = self.file.pos(start);

        let Some(ch) = self.ch else {
            return Token::new(TokenKind::Eof, "", pos);
        };

        if is_letter(ch) {
            return self.scan_identifier(start, pos);
        }
        if ch.is_ascii_digit() {
            return self.scan_number(start, pos);
        }
        if ch == '"' {
            return self.scan_string(start, pos);
        }
        if ch == '/' && matches!(self.peek(), Some('/') | Some('*')) {
            return self.scan_comment(start, pos);
        }

        self.advance();
        let kind = match ch {
            '+' => TokenKind::OpPlus,
            '-' => TokenKind::OpMinus,
            '*' => TokenKind::OpMultiply,
            '/' => TokenKind::OpDivide,
            '=' => self.select_token('=', TokenKind::OpEq, TokenKind::OpAssign),
            '<' => self.select_token('=', TokenKind::OpLe, TokenKind::OpLt),
            '>' => self.select_token('=', TokenKind::OpGe, TokenKind::OpGt),
            '(' => TokenKind::LPar,
            ')' => TokenKind::RPar,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            ';' => TokenKind::Semi,
            ',' => TokenKind::Comma,
            _ => TokenKind::Illegal,
        };

        Token::new(kind, &self.src[start..self.offset], pos)
    }

    /// Identifier or keyword
    fn scan_identifier(&mut self, start: usize, pos: Pos) -> Token {
        while self.ch.is_some_and(|c| is_letter(c) || c.is_ascii_digit()) {
            self.advance();
        }
        let literal = &self.src[start..self.offset];
        Token::new(TokenKind::lookup(literal), literal, pos)
    }

    /// Integer, or float when a `.` follows the integer part
    fn scan_number(&mut self, start: usize, pos: Pos) -> Token {
        self.skip_digits();

        let kind = if self.ch == Some('.') {
            self.advance();
            self.skip_digits();
            TokenKind::Float
        } else {
            TokenKind::Integer
        };

        Token::new(kind, &self.src[start..self.offset], pos)
    }

    /// String literal, quotes included. No escape processing.
    fn scan_string(&mut self, start: usize, pos: Pos) -> Token {
        self.advance(); // opening quote

        while self.ch.is_some_and(|c| c != '"') {
            self.advance();
        }

        let kind = if self.ch.is_some() {
            self.advance(); // closing quote
            TokenKind::String
        } else {
            TokenKind::Illegal
        };

        Token::new(kind, &self.src[start..self.offset], pos)
    }

    /// `// ...` up to (not including) the newline, or `/* ... */`
    fn scan_comment(&mut self, start: usize, pos: Pos) -> Token {
        self.advance(); // '/'

        if self.ch == Some('/') {
            while self.ch.is_some_and(|c| c != '\n') {
                self.advance();
            }
            return Token::new(TokenKind::Comment, &self.src[start..self.offset], pos);
        }

        self.advance(); // '*'
        let mut kind = TokenKind::Illegal;
        while let Some(c) = self.ch {
            self.advance();
            if c == '*' && self.ch == Some('/') {
                self.advance();
                kind = TokenKind::Comment;
                break;
            }
        }

        Token::new(kind, &self.src[start..self.offset], pos)
    }

    /// Consume the expected second character of a two-character operator
    /// if it is there.
    fn select_token(&mut self, expected: char, two: TokenKind, one: TokenKind) -> TokenKind {
        if self.ch == Some(expected) {
            self.advance();
            two
        } else {
            one
        }
    }

    fn skip_digits(&mut self) {
        while self.ch.is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.ch, Some(' ' | '\t' | '\r' | '\n')) {
            self.advance();
        }
    }

    /// Character after the current one, without consuming anything
    fn peek(&self) -> Option<char> {
        self.src[self.read_offset..].chars().next()
    }

    /// Move to the next character, recording a line start after every
    /// newline that becomes current.
    fn advance(&mut self) {
        match self.src[self.read_offset..].chars().next() {
            Some(c) => {
                self.offset = self.read_offset;
                self.read_offset += c.len_utf8();
                if c == '\n' {
                    self.file.add_line(self.offset + 1);
                }
                self.ch = Some(c);
            }
            None => {
                self.offset = self.src.len();
                self.ch = None;
            }
        }
    }
}

impl Iterator for Scanner<'_> {
    type Item = Token;

    /// Yields every token up to and including the first `Eof`.
    fn next(&mut self) -> Option<Token> {
        if self.done {
            return None;
        }
        let token = self.next_token();
        if token.kind == TokenKind::Eof {
            self.done = true;
        }
        Some(token)
    }
}

fn is_letter(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}
