use ariadne::{Color, Config, Fmt, IndexType, Label, Report, ReportKind, Source};
use thiserror::Error;

use crate::lexer::TokenKind;
use crate::types::Type;

use std::ops::Range;

pub type KplResult<T> = Result<T, KplError>;

/// Everything that can stop a compilation.
#[derive(Debug, Error)]
pub enum KplError {
    #[error("can't read input file: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Compile(#[from] CompileError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    #[error("invalid symbol")]
    InvalidSymbol,

    #[error("missing {0}")]
    MissingToken(TokenKind),

    #[error("invalid constant")]
    InvalidConstant,

    #[error("invalid type")]
    InvalidType,

    #[error("invalid basic type, expected 'integer' or 'char'")]
    InvalidBasicType,

    #[error("invalid parameter")]
    InvalidParameter,

    #[error("invalid statement")]
    InvalidStatement,

    #[error("invalid expression")]
    InvalidExpression,

    #[error("invalid term")]
    InvalidTerm,

    #[error("invalid factor")]
    InvalidFactor,

    #[error("invalid comparator")]
    InvalidComparator,

    #[error("invalid arguments")]
    InvalidArguments,

    #[error("a reference parameter needs an assignable variable as argument")]
    InvalidReferenceArgument,

    #[error("wrong number of array dimensions")]
    DimensionalityMismatch,

    #[error("duplicate identifier `{0}`")]
    DuplicateIdentifier(String),

    #[error("undeclared identifier `{0}`")]
    UndeclaredIdentifier(String),

    #[error("undeclared constant `{0}`")]
    UndeclaredConstant(String),

    #[error("undeclared type `{0}`")]
    UndeclaredType(String),

    #[error("undeclared variable `{0}`")]
    UndeclaredVariable(String),

    #[error("undeclared function `{0}`")]
    UndeclaredFunction(String),

    #[error("undeclared procedure `{0}`")]
    UndeclaredProcedure(String),

    #[error("`{name}` is not a {expected}")]
    InvalidIdentifierKind { name: String, expected: &'static str },

    #[error("`{0}` is not an integer constant")]
    NotAnIntConstant(String),

    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: Type, found: Type },

    #[error("the number of arguments does not match the number of parameters")]
    ParameterArgumentCountMismatch,
}

/// A positioned error. The first one raised aborts the compilation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{line}-{column}: {kind}")]
pub struct CompileError {
    pub kind: ErrorKind,
    pub span: Range<usize>,
    pub line: usize,
    pub column: usize,
}

impl CompileError {
    pub fn new(kind: ErrorKind, span: Range<usize>, line: usize, column: usize) -> Self {
        CompileError {
            kind,
            span,
            line,
            column,
        }
    }

    fn code(&self) -> &'static str {
        match self.kind {
            ErrorKind::InvalidSymbol => "Lexical Error",
            ErrorKind::MissingToken(_)
            | ErrorKind::InvalidConstant
            | ErrorKind::InvalidType
            | ErrorKind::InvalidBasicType
            | ErrorKind::InvalidParameter
            | ErrorKind::InvalidStatement
            | ErrorKind::InvalidExpression
            | ErrorKind::InvalidTerm
            | ErrorKind::InvalidFactor
            | ErrorKind::InvalidComparator
            | ErrorKind::InvalidArguments => "Syntax Error",
            _ => "Semantic Error",
        }
    }

    pub fn report(&self, file: &str) -> Report<'static, (String, Range<usize>)> {
        let label = match &self.kind {
            ErrorKind::MissingToken(expected) => {
                format!("expected {} here", Fmt::fg(expected, Color::Yellow))
            }
            ErrorKind::TypeMismatch { expected, found } => format!(
                "expected {}, found {}",
                Fmt::fg(expected, Color::Green),
                Fmt::fg(found, Color::Red),
            ),
            kind => kind.to_string(),
        };

        // spans come from the lexer as byte offsets
        Report::build(ReportKind::Error, (file.to_string(), self.span.clone()))
            .with_config(Config::default().with_index_type(IndexType::Byte))
            .with_code(self.code())
            .with_message(format!(
                "{} at line {}, column {}",
                self.kind, self.line, self.column
            ))
            .with_label(
                Label::new((file.to_string(), self.span.clone()))
                    .with_message(label)
                    .with_color(Color::Red),
            )
            .finish()
    }

    /// Prints the diagnostic for this error to stderr.
    pub fn eprint(&self, file: &str, source: &str) -> std::io::Result<()> {
        self.report(file)
            .eprint((file.to_string(), Source::from(source)))
    }
}
