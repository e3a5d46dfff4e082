use super::*;
use logos::Logos;

#[test]
fn test_basic_tokens() {
    let input = "
    PROGRAM Demo;
    var x : integer;
    ";
    let mut lexer = Token::lexer(input);

    assert_eq!(lexer.next(), Some(Ok(Token::KeywordProgram)));
    assert_eq!(lexer.next(), Some(Ok(Token::Ident("Demo".to_string()))));
    assert_eq!(lexer.next(), Some(Ok(Token::Semicolon)));
    assert_eq!(lexer.next(), Some(Ok(Token::KeywordVar)));
    assert_eq!(lexer.next(), Some(Ok(Token::Ident("x".to_string()))));
    assert_eq!(lexer.next(), Some(Ok(Token::Colon)));
    assert_eq!(lexer.next(), Some(Ok(Token::KeywordInteger)));
    assert_eq!(lexer.next(), Some(Ok(Token::Semicolon)));
    assert_eq!(lexer.next(), None);
}

#[test]
fn test_keywords_ignore_case() {
    let mut lexer = Token::lexer("Begin END begin");
    assert_eq!(lexer.next(), Some(Ok(Token::KeywordBegin)));
    assert_eq!(lexer.next(), Some(Ok(Token::KeywordEnd)));
    assert_eq!(lexer.next(), Some(Ok(Token::KeywordBegin)));
}

#[test]
fn test_symbols() {
    let mut lexer = Token::lexer(":= : <> <= < >= > ^");
    assert_eq!(lexer.next(), Some(Ok(Token::Assign)));
    assert_eq!(lexer.next(), Some(Ok(Token::Colon)));
    assert_eq!(lexer.next(), Some(Ok(Token::NotEq)));
    assert_eq!(lexer.next(), Some(Ok(Token::LessEq)));
    assert_eq!(lexer.next(), Some(Ok(Token::Less)));
    assert_eq!(lexer.next(), Some(Ok(Token::GreaterEq)));
    assert_eq!(lexer.next(), Some(Ok(Token::Greater)));
    assert_eq!(lexer.next(), Some(Ok(Token::Power)));
}

#[test]
fn test_literals() {
    let mut lexer = Token::lexer("42 'a' \"hi\" 2.5");
    assert_eq!(lexer.next(), Some(Ok(Token::Number(42))));
    assert_eq!(lexer.next(), Some(Ok(Token::Char(b'a'))));
    assert_eq!(lexer.next(), Some(Ok(Token::String("hi".to_string()))));
    assert_eq!(lexer.next(), Some(Ok(Token::Double(2.5))));
}

#[test]
fn test_comments_are_skipped() {
    let mut lexer = Token::lexer("x (* a comment * with stars *) y");
    assert_eq!(lexer.next(), Some(Ok(Token::Ident("x".to_string()))));
    assert_eq!(lexer.next(), Some(Ok(Token::Ident("y".to_string()))));
    assert_eq!(lexer.next(), None);
}

#[test]
fn test_comments_with_non_ascii_text() {
    let mut lexer = Token::lexer("(* Kiểm tra *) begin (**) end");
    assert_eq!(lexer.next(), Some(Ok(Token::KeywordBegin)));
    assert_eq!(lexer.next(), Some(Ok(Token::KeywordEnd)));
    assert_eq!(lexer.next(), None);
}

#[test]
fn test_unterminated_comment() {
    let mut scanner = Scanner::new("x (* never closed");
    assert!(scanner.next_lexeme().is_ok());

    let err = scanner.next_lexeme().unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidSymbol);
    assert_eq!((err.line, err.column), (1, 3));
}

#[test]
fn test_parenthesis_is_not_a_comment() {
    let mut lexer = Token::lexer("(x)");
    assert_eq!(lexer.next(), Some(Ok(Token::LParen)));
    assert_eq!(lexer.next(), Some(Ok(Token::Ident("x".to_string()))));
    assert_eq!(lexer.next(), Some(Ok(Token::RParen)));
}

#[test]
fn test_number_overflow_is_an_error() {
    let mut lexer = Token::lexer("99999999999");
    assert!(lexer.next().unwrap().is_err());
}

#[test]
fn test_scanner_positions() {
    let mut scanner = Scanner::new("program\n  p;");

    let program = scanner.next_lexeme().unwrap();
    assert_eq!(program.kind(), TokenKind::Program);
    assert_eq!((program.line, program.column), (1, 1));

    let name = scanner.next_lexeme().unwrap();
    assert_eq!(name.token, Some(Token::Ident("p".to_string())));
    assert_eq!((name.line, name.column), (2, 3));

    let semicolon = scanner.next_lexeme().unwrap();
    assert_eq!(semicolon.span, 11..12);

    let eof = scanner.next_lexeme().unwrap();
    assert_eq!(eof.kind(), TokenKind::Eof);
    assert_eq!(eof.token, None);
}

#[test]
fn test_scanner_error_recovery_position() {
    let mut scanner = Scanner::new("x @");
    assert!(scanner.next_lexeme().is_ok());

    let err = scanner.next_lexeme().unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidSymbol);
    assert_eq!((err.line, err.column), (1, 3));
}

#[test]
fn test_columns_count_characters() {
    let mut scanner = Scanner::new("\"\u{e9}\u{e9}\" x\n(* \u{e9} *) y");
    assert_eq!(scanner.next_lexeme().unwrap().kind(), TokenKind::String);

    let x = scanner.next_lexeme().unwrap();
    assert_eq!(x.span, 7..8);
    assert_eq!((x.line, x.column), (1, 6));

    let y = scanner.next_lexeme().unwrap();
    assert_eq!((y.line, y.column), (2, 9));
}
