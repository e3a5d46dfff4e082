pub mod error;
pub mod lexer;
pub mod parser;
pub mod semantics;
pub mod symtab;
pub mod types;

pub use error::{CompileError, ErrorKind, KplError, KplResult};
pub use parser::{Parser, compile, compile_str};
pub use symtab::SymbolTable;
