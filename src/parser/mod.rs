pub mod declaration;
pub mod expression;
pub mod statement;


use crate::error::{CompileError, ErrorKind, KplResult};
use crate::lexer::{Lexeme, Scanner, Token, TokenKind};
use crate::symtab::SymbolTable;

use std::fs;
use std::path::Path;

pub type ParseResult<T> = Result<T, CompileError>;

/// Single-lookahead recursive-descent parser. Semantic actions run as the
/// productions are matched, so a successful parse leaves a fully resolved
/// symbol table behind.
pub struct Parser<'a> {
    scanner: Scanner<'a>,
    current: Option<Lexeme>,
    look_ahead: Lexeme,
    symtab: SymbolTable,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> ParseResult<Self> {
        let mut scanner = Scanner::new(source);
        let look_ahead = scanner.next_lexeme()?;
        Ok(Parser {
            scanner,
            current: None,
            look_ahead,
            symtab: SymbolTable::new(),
        })
    }

    pub fn into_symtab(self) -> SymbolTable {
        self.symtab
    }

    fn peek(&self) -> TokenKind {
        self.look_ahead.kind()
    }

    /// Shifts the window: the lookahead becomes current and the old current
    /// token is dropped.
    fn scan(&mut self) -> ParseResult<()> {
        let next = self.scanner.next_lexeme()?;
        self.current = Some(std::mem::replace(&mut self.look_ahead, next));
        Ok(())
    }

    fn eat(&mut self, kind: TokenKind) -> ParseResult<()> {
        if self.peek() == kind {
            self.scan()
        } else {
            Err(self.error_at_look_ahead(ErrorKind::MissingToken(kind)))
        }
    }

    fn eat_ident(&mut self) -> ParseResult<String> {
        match &self.look_ahead.token {
            Some(Token::Ident(name)) => {
                let name = name.clone();
                self.scan()?;
                Ok(name)
            }
            _ => Err(self.error_at_look_ahead(ErrorKind::MissingToken(TokenKind::Ident))),
        }
    }

    fn eat_number(&mut self) -> ParseResult<i32> {
        match self.look_ahead.token {
            Some(Token::Number(n)) => {
                self.scan()?;
                Ok(n)
            }
            _ => Err(self.error_at_look_ahead(ErrorKind::MissingToken(TokenKind::Number))),
        }
    }

    fn eat_char(&mut self) -> ParseResult<u8> {
        match self.look_ahead.token {
            Some(Token::Char(c)) => {
                self.scan()?;
                Ok(c)
            }
            _ => Err(self.error_at_look_ahead(ErrorKind::MissingToken(TokenKind::Char))),
        }
    }

    fn error_at_look_ahead(&self, kind: ErrorKind) -> CompileError {
        let lexeme = &self.look_ahead;
        CompileError::new(kind, lexeme.span.clone(), lexeme.line, lexeme.column)
    }

    /// Semantic errors point at the token that was just consumed.
    fn error_at_current(&self, kind: ErrorKind) -> CompileError {
        let lexeme = self.current.as_ref().unwrap_or(&self.look_ahead);
        CompileError::new(kind, lexeme.span.clone(), lexeme.line, lexeme.column)
    }

    /// Program := PROGRAM ident ; Block .
    pub fn compile_program(&mut self) -> ParseResult<()> {
        self.eat(TokenKind::Program)?;
        let name = self.eat_ident()?;

        let program = self.symtab.create_program(&name);
        if let Some(scope) = self.symtab.object(program).own_scope() {
            self.symtab.enter_block(scope);
        }

        self.eat(TokenKind::Semicolon)?;
        self.compile_block()?;
        self.eat(TokenKind::Period)?;

        self.symtab.exit_block();
        tracing::info!(program = %name, "compiled");
        Ok(())
    }
}

/// Compiles a source text, returning the resolved symbol table.
pub fn compile_str(source: &str) -> ParseResult<SymbolTable> {
    let mut parser = Parser::new(source)?;
    parser.compile_program()?;
    Ok(parser.into_symtab())
}

/// Reads and compiles the file at `path`.
pub fn compile(path: impl AsRef<Path>) -> KplResult<SymbolTable> {
    let source = fs::read_to_string(path.as_ref())?;
    tracing::debug!(path = %path.as_ref().display(), bytes = source.len(), "read source");
    Ok(compile_str(&source)?)
}
