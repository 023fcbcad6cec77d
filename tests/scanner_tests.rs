// Integration tests for the scanner and the source position index

use simplec::parser::lexer::Scanner;
use simplec::parser::token::{Token, TokenKind};

fn scan_all(src: &str) -> Vec<Token> {
    Scanner::new("", src).collect()
}

#[test]
fn test_every_catalog_literal_scans_to_its_kind() {
    let fixed = TokenKind::KEYWORDS
        .iter()
        .chain(TokenKind::OPERATORS)
        .chain(TokenKind::GROUPING);

    for &kind in fixed {
        let tokens = scan_all(kind.as_str());
        assert_eq!(tokens.len(), 2, "scanning {:?}", kind.as_str());
        assert_eq!(tokens[0].kind, kind);
        assert_eq!(tokens[0].literal, kind.as_str());
        assert_eq!(tokens[1].kind, TokenKind::Eof);
    }
}

#[test]
fn test_catalog_round_trips_through_from_literal() {
    for &kind in TokenKind::KEYWORDS.iter().chain(TokenKind::OPERATORS) {
        assert_eq!(TokenKind::from_literal(kind.as_str()), Some(kind));
    }
}

#[test]
fn test_function_header_sequence() {
    use TokenKind::*;
    let kinds: Vec<TokenKind> = scan_all("int a (int b){ c = b + a * 4;}")
        .into_iter()
        .map(|t| t.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            KwInt, Ident, LPar, KwInt, Ident, RPar, LBrace, Ident, OpAssign, Ident, OpPlus, Ident,
            OpMultiply, Integer, Semi, RBrace, Eof,
        ]
    );
}

#[test]
fn test_literals_keep_their_text() {
    let tokens = scan_all("12345 1234.56789 \"hi there\" name_1");
    let pairs: Vec<(TokenKind, &str)> = tokens
        .iter()
        .map(|t| (t.kind, t.literal.as_str()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            (TokenKind::Integer, "12345"),
            (TokenKind::Float, "1234.56789"),
            (TokenKind::String, "\"hi there\""),
            (TokenKind::Ident, "name_1"),
            (TokenKind::Eof, ""),
        ]
    );
}

#[test]
fn test_positions_are_monotonic_and_lines_counted() {
    let src = "int f(int x)\n{\n\twhile (x > 0)\r\n\t\tx = x - 1; // tick\n\twrite \"done\";\n\treturn x;\n}\n";
    let mut scanner = Scanner::new("loop.sc", src);
    let tokens: Vec<Token> = (&mut scanner).collect();

    for pair in tokens.windows(2) {
        assert!(pair[0].pos <= pair[1].pos, "{:?} then {:?}", pair[0], pair[1]);
    }

    let file = scanner.into_file();
    let newlines = src.bytes().filter(|&b| b == b'\n').count();
    assert_eq!(file.line_count(), newlines);

    let write = tokens
        .iter()
        .find(|t| t.kind == TokenKind::KwWrite)
        .unwrap();
    assert_eq!(file.position(write.pos).to_string(), "loop.sc:5:2");

    let eof = tokens.last().unwrap();
    let end = file.position(eof.pos);
    assert_eq!((end.line, end.column), (newlines + 1, 1));
}

#[test]
fn test_illegal_characters_do_not_stop_scanning() {
    use TokenKind::*;
    let kinds: Vec<TokenKind> = scan_all("a % b & c")
        .into_iter()
        .map(|t| t.kind)
        .collect();
    assert_eq!(kinds, vec![Ident, Illegal, Ident, Illegal, Ident, Eof]);
}
