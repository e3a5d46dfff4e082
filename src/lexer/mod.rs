use logos::Logos;

use crate::error::{CompileError, ErrorKind};

use std::fmt;
use std::ops::Range;

#[cfg(test)]
pub mod test;

#[derive(Logos, Debug, PartialEq)]
#[logos(skip r"[ \n\r\t\f]+")] // Ignore this regex pattern between tokens
#[derive(Clone)]
pub enum Token {
    #[regex(r"[0-9]+", |lex| lex.slice().parse::<i32>().ok())]
    Number(i32),

    #[regex(r"[0-9]+\.[0-9]+", |lex| lex.slice().parse::<f64>().ok())]
    Double(f64),

    #[regex(r"'[\x20-\x26\x28-\x7E]'", |lex| lex.slice().as_bytes()[1])]
    Char(u8),

    #[regex(r#""[^"\n]*""#, |lex| {
        let s = lex.slice();
        s[1..s.len() - 1].to_string()
    })]
    String(String),

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Ident(String),

    #[token("program", ignore(case))]
    KeywordProgram,

    #[token("const", ignore(case))]
    KeywordConst,

    #[token("type", ignore(case))]
    KeywordType,

    #[token("var", ignore(case))]
    KeywordVar,

    #[token("function", ignore(case))]
    KeywordFunction,

    #[token("procedure", ignore(case))]
    KeywordProcedure,

    #[token("begin", ignore(case))]
    KeywordBegin,

    #[token("end", ignore(case))]
    KeywordEnd,

    #[token("call", ignore(case))]
    KeywordCall,

    #[token("if", ignore(case))]
    KeywordIf,

    #[token("then", ignore(case))]
    KeywordThen,

    #[token("else", ignore(case))]
    KeywordElse,

    #[token("while", ignore(case))]
    KeywordWhile,

    #[token("do", ignore(case))]
    KeywordDo,

    #[token("for", ignore(case))]
    KeywordFor,

    #[token("to", ignore(case))]
    KeywordTo,

    #[token("array", ignore(case))]
    KeywordArray,

    #[token("of", ignore(case))]
    KeywordOf,

    #[token("integer", ignore(case))]
    KeywordInteger,

    #[token("char", ignore(case))]
    KeywordChar,

    #[token("string", ignore(case))]
    KeywordString,

    #[token("double", ignore(case))]
    KeywordDouble,

    #[token("switch", ignore(case))]
    KeywordSwitch,

    #[token("case", ignore(case))]
    KeywordCase,

    #[token("break", ignore(case))]
    KeywordBreak,

    #[token("default", ignore(case))]
    KeywordDefault,

    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("*")]
    Times,

    #[token("/")]
    Slash,

    #[token("^")]
    Power,

    #[token(":=")]
    Assign,

    #[token("=")]
    Eq,

    #[token("<>")]
    NotEq,

    #[token("<=")]
    LessEq,

    #[token("<")]
    Less,

    #[token(">=")]
    GreaterEq,

    #[token(">")]
    Greater,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token(",")]
    Comma,

    #[token(";")]
    Semicolon,

    #[token(":")]
    Colon,

    #[token(".")]
    Period,

    /// `(* ... *)`, always skipped by its callback. An unterminated comment
    /// is a lexical error.
    #[token("(*", skip_comment)]
    Comment,
}

fn skip_comment(lex: &mut logos::Lexer<Token>) -> logos::FilterResult<(), ()> {
    match lex.remainder().find("*)") {
        Some(end) => {
            lex.bump(end + 2);
            logos::FilterResult::Skip
        }
        None => {
            lex.bump(lex.remainder().len());
            logos::FilterResult::Error(())
        }
    }
}

/// Payload-free tag of a [`Token`], plus `Eof` for the end of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Ident,
    Number,
    Double,
    Char,
    String,
    Program,
    Const,
    Type,
    Var,
    Function,
    Procedure,
    Begin,
    End,
    Call,
    If,
    Then,
    Else,
    While,
    Do,
    For,
    To,
    Array,
    Of,
    Integer,
    CharType,
    StringType,
    DoubleType,
    Switch,
    Case,
    Break,
    Default,
    Plus,
    Minus,
    Times,
    Slash,
    Power,
    Assign,
    Eq,
    NotEq,
    LessEq,
    Less,
    GreaterEq,
    Greater,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
    Semicolon,
    Colon,
    Period,
    Comment,
    Eof,
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Number(_) => TokenKind::Number,
            Token::Double(_) => TokenKind::Double,
            Token::Char(_) => TokenKind::Char,
            Token::String(_) => TokenKind::String,
            Token::Ident(_) => TokenKind::Ident,
            Token::KeywordProgram => TokenKind::Program,
            Token::KeywordConst => TokenKind::Const,
            Token::KeywordType => TokenKind::Type,
            Token::KeywordVar => TokenKind::Var,
            Token::KeywordFunction => TokenKind::Function,
            Token::KeywordProcedure => TokenKind::Procedure,
            Token::KeywordBegin => TokenKind::Begin,
            Token::KeywordEnd => TokenKind::End,
            Token::KeywordCall => TokenKind::Call,
            Token::KeywordIf => TokenKind::If,
            Token::KeywordThen => TokenKind::Then,
            Token::KeywordElse => TokenKind::Else,
            Token::KeywordWhile => TokenKind::While,
            Token::KeywordDo => TokenKind::Do,
            Token::KeywordFor => TokenKind::For,
            Token::KeywordTo => TokenKind::To,
            Token::KeywordArray => TokenKind::Array,
            Token::KeywordOf => TokenKind::Of,
            Token::KeywordInteger => TokenKind::Integer,
            Token::KeywordChar => TokenKind::CharType,
            Token::KeywordString => TokenKind::StringType,
            Token::KeywordDouble => TokenKind::DoubleType,
            Token::KeywordSwitch => TokenKind::Switch,
            Token::KeywordCase => TokenKind::Case,
            Token::KeywordBreak => TokenKind::Break,
            Token::KeywordDefault => TokenKind::Default,
            Token::Plus => TokenKind::Plus,
            Token::Minus => TokenKind::Minus,
            Token::Times => TokenKind::Times,
            Token::Slash => TokenKind::Slash,
            Token::Power => TokenKind::Power,
            Token::Assign => TokenKind::Assign,
            Token::Eq => TokenKind::Eq,
            Token::NotEq => TokenKind::NotEq,
            Token::LessEq => TokenKind::LessEq,
            Token::Less => TokenKind::Less,
            Token::GreaterEq => TokenKind::GreaterEq,
            Token::Greater => TokenKind::Greater,
            Token::LParen => TokenKind::LParen,
            Token::RParen => TokenKind::RParen,
            Token::LBracket => TokenKind::LBracket,
            Token::RBracket => TokenKind::RBracket,
            Token::Comma => TokenKind::Comma,
            Token::Semicolon => TokenKind::Semicolon,
            Token::Colon => TokenKind::Colon,
            Token::Period => TokenKind::Period,
            Token::Comment => TokenKind::Comment,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TokenKind::Ident => "an identifier",
            TokenKind::Number => "a number",
            TokenKind::Double => "a double literal",
            TokenKind::Char => "a character literal",
            TokenKind::String => "a string literal",
            TokenKind::Program => "'program'",
            TokenKind::Const => "'const'",
            TokenKind::Type => "'type'",
            TokenKind::Var => "'var'",
            TokenKind::Function => "'function'",
            TokenKind::Procedure => "'procedure'",
            TokenKind::Begin => "'begin'",
            TokenKind::End => "'end'",
            TokenKind::Call => "'call'",
            TokenKind::If => "'if'",
            TokenKind::Then => "'then'",
            TokenKind::Else => "'else'",
            TokenKind::While => "'while'",
            TokenKind::Do => "'do'",
            TokenKind::For => "'for'",
            TokenKind::To => "'to'",
            TokenKind::Array => "'array'",
            TokenKind::Of => "'of'",
            TokenKind::Integer => "'integer'",
            TokenKind::CharType => "'char'",
            TokenKind::StringType => "'string'",
            TokenKind::DoubleType => "'double'",
            TokenKind::Switch => "'switch'",
            TokenKind::Case => "'case'",
            TokenKind::Break => "'break'",
            TokenKind::Default => "'default'",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Times => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::Power => "'^'",
            TokenKind::Assign => "':='",
            TokenKind::Eq => "'='",
            TokenKind::NotEq => "'<>'",
            TokenKind::LessEq => "'<='",
            TokenKind::Less => "'<'",
            TokenKind::GreaterEq => "'>='",
            TokenKind::Greater => "'>'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::Comma => "','",
            TokenKind::Semicolon => "';'",
            TokenKind::Colon => "':'",
            TokenKind::Period => "'.'",
            TokenKind::Comment => "a comment",
            TokenKind::Eof => "end of file",
        };
        f.write_str(text)
    }
}

/// A token together with where it was found. `token` is `None` at end of input.
#[derive(Debug, Clone, PartialEq)]
pub struct Lexeme {
    pub token: Option<Token>,
    pub span: Range<usize>,
    pub line: usize,
    pub column: usize,
}

impl Lexeme {
    pub fn kind(&self) -> TokenKind {
        self.token.as_ref().map_or(TokenKind::Eof, Token::kind)
    }
}

/// Byte offsets of line starts, for turning spans into 1-based line/column
/// pairs. Columns count characters, not bytes.
#[derive(Debug, Clone)]
struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    fn new(source: &str) -> Self {
        let mut starts = vec![0];
        starts.extend(
            source
                .bytes()
                .enumerate()
                .filter(|(_, b)| *b == b'\n')
                .map(|(i, _)| i + 1),
        );
        LineIndex { starts }
    }

    fn position(&self, source: &str, offset: usize) -> (usize, usize) {
        let line = self.starts.partition_point(|start| *start <= offset);
        let column = source[self.starts[line - 1]..offset].chars().count() + 1;
        (line, column)
    }
}

/// Pulls lexemes one at a time out of a source text.
pub struct Scanner<'a> {
    lexer: logos::Lexer<'a, Token>,
    lines: LineIndex,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Scanner {
            lexer: Token::lexer(source),
            lines: LineIndex::new(source),
        }
    }

    pub fn next_lexeme(&mut self) -> Result<Lexeme, CompileError> {
        let Some(token) = self.lexer.next() else {
            let end = self.lexer.source().len();
            let (line, column) = self.lines.position(self.lexer.source(), end);
            return Ok(Lexeme {
                token: None,
                span: end..end,
                line,
                column,
            });
        };

        let span = self.lexer.span();
        let (line, column) = self.lines.position(self.lexer.source(), span.start);

        match token {
            Ok(token) => {
                tracing::trace!(?token, line, column, "scanned");
                Ok(Lexeme {
                    token: Some(token),
                    span,
                    line,
                    column,
                })
            }
            Err(()) => Err(CompileError::new(ErrorKind::InvalidSymbol, span, line, column)),
        }
    }
}
