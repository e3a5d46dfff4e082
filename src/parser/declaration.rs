use crate::error::ErrorKind;
use crate::lexer::TokenKind;
use crate::parser::{ParseResult, Parser};
use crate::symtab::{ObjectKind, ParamKind};
use crate::types::{ConstantValue, Type};

impl Parser<'_> {
    /// Block := [CONST ...] [TYPE ...] [VAR ...] SubDecls BEGIN Statements END
    ///
    /// Each section is entered only when its keyword is the lookahead, so an
    /// absent section consumes nothing.
    pub fn compile_block(&mut self) -> ParseResult<()> {
        while self.peek() == TokenKind::Const {
            self.eat(TokenKind::Const)?;
            loop {
                self.compile_const_decl()?;
                if self.peek() != TokenKind::Ident {
                    break;
                }
            }
        }

        while self.peek() == TokenKind::Type {
            self.eat(TokenKind::Type)?;
            loop {
                self.compile_type_decl()?;
                if self.peek() != TokenKind::Ident {
                    break;
                }
            }
        }

        while self.peek() == TokenKind::Var {
            self.eat(TokenKind::Var)?;
            loop {
                self.compile_var_decl()?;
                if self.peek() != TokenKind::Ident {
                    break;
                }
            }
        }

        self.compile_sub_decls()?;

        self.eat(TokenKind::Begin)?;
        self.compile_statements()?;
        self.eat(TokenKind::End)
    }

    /// Reads a declared name and makes sure it is new in the current block.
    fn compile_fresh_ident(&mut self) -> ParseResult<String> {
        let name = self.eat_ident()?;
        self.symtab
            .check_fresh_ident(&name)
            .map_err(|kind| self.error_at_current(kind))?;
        Ok(name)
    }

    fn compile_const_decl(&mut self) -> ParseResult<()> {
        let name = self.compile_fresh_ident()?;
        self.eat(TokenKind::Eq)?;
        let value = self.compile_constant()?;

        let constant = self.symtab.create_constant(&name, value);
        self.symtab.declare(constant);

        self.eat(TokenKind::Semicolon)
    }

    fn compile_type_decl(&mut self) -> ParseResult<()> {
        let name = self.compile_fresh_ident()?;
        self.eat(TokenKind::Eq)?;
        let actual = self.compile_type()?;

        let ty = self.symtab.create_type(&name, actual);
        self.symtab.declare(ty);

        self.eat(TokenKind::Semicolon)
    }

    fn compile_var_decl(&mut self) -> ParseResult<()> {
        let name = self.compile_fresh_ident()?;
        self.eat(TokenKind::Colon)?;
        let ty = self.compile_type()?;

        let variable = self.symtab.create_variable(&name, ty);
        self.symtab.declare(variable);

        self.eat(TokenKind::Semicolon)
    }

    fn compile_sub_decls(&mut self) -> ParseResult<()> {
        loop {
            match self.peek() {
                TokenKind::Function => self.compile_func_decl()?,
                TokenKind::Procedure => self.compile_proc_decl()?,
                _ => return Ok(()),
            }
        }
    }

    /// FUNCTION ident Params : BasicType ; Block ;
    ///
    /// The function is declared and its scope opened before the parameters,
    /// so they land in the function's own block.
    fn compile_func_decl(&mut self) -> ParseResult<()> {
        self.eat(TokenKind::Function)?;
        let name = self.compile_fresh_ident()?;

        let function = self.symtab.create_function(&name);
        self.symtab.declare(function);
        if let Some(scope) = self.symtab.object(function).own_scope() {
            self.symtab.enter_block(scope);
        }

        self.compile_params()?;

        self.eat(TokenKind::Colon)?;
        let return_type = self.compile_basic_type()?;
        self.symtab.set_return_type(function, return_type);

        self.eat(TokenKind::Semicolon)?;
        self.compile_block()?;
        self.eat(TokenKind::Semicolon)?;

        self.symtab.exit_block();
        Ok(())
    }

    /// PROCEDURE ident Params ; Block ;
    fn compile_proc_decl(&mut self) -> ParseResult<()> {
        self.eat(TokenKind::Procedure)?;
        let name = self.compile_fresh_ident()?;

        let procedure = self.symtab.create_procedure(&name);
        self.symtab.declare(procedure);
        if let Some(scope) = self.symtab.object(procedure).own_scope() {
            self.symtab.enter_block(scope);
        }

        self.compile_params()?;

        self.eat(TokenKind::Semicolon)?;
        self.compile_block()?;
        self.eat(TokenKind::Semicolon)?;

        self.symtab.exit_block();
        Ok(())
    }

    /// Constant := [+|-] (number | int-constant-ident) | char
    pub fn compile_constant(&mut self) -> ParseResult<ConstantValue> {
        match self.peek() {
            TokenKind::Plus => {
                self.eat(TokenKind::Plus)?;
                self.compile_int_constant()
            }
            TokenKind::Minus => {
                self.eat(TokenKind::Minus)?;
                let value = self.compile_int_constant()?;
                value
                    .negate()
                    .ok_or_else(|| self.error_at_current(ErrorKind::InvalidConstant))
            }
            TokenKind::Char => Ok(ConstantValue::Char(self.eat_char()?)),
            _ => self.compile_int_constant(),
        }
    }

    fn compile_int_constant(&mut self) -> ParseResult<ConstantValue> {
        match self.peek() {
            TokenKind::Number => Ok(ConstantValue::Int(self.eat_number()?)),
            TokenKind::Ident => {
                let name = self.eat_ident()?;
                self.symtab
                    .check_int_constant(&name)
                    .map_err(|kind| self.error_at_current(kind))
            }
            _ => Err(self.error_at_look_ahead(ErrorKind::InvalidConstant)),
        }
    }

    /// Type := INTEGER | CHAR | STRING | DOUBLE | ARRAY [ number ] OF Type | ident
    pub fn compile_type(&mut self) -> ParseResult<Type> {
        match self.peek() {
            TokenKind::Integer => {
                self.eat(TokenKind::Integer)?;
                Ok(Type::Int)
            }
            TokenKind::CharType => {
                self.eat(TokenKind::CharType)?;
                Ok(Type::Char)
            }
            TokenKind::StringType => {
                self.eat(TokenKind::StringType)?;
                Ok(Type::String)
            }
            TokenKind::DoubleType => {
                self.eat(TokenKind::DoubleType)?;
                Ok(Type::Double)
            }
            TokenKind::Array => {
                self.eat(TokenKind::Array)?;
                self.eat(TokenKind::LBracket)?;
                let size = self.eat_number()?;
                self.eat(TokenKind::RBracket)?;
                self.eat(TokenKind::Of)?;
                let element = self.compile_type()?;
                Ok(Type::array(size, element))
            }
            TokenKind::Ident => {
                let name = self.eat_ident()?;
                let id = self
                    .symtab
                    .check_declared_type(&name)
                    .map_err(|kind| self.error_at_current(kind))?;
                match &self.symtab.object(id).kind {
                    ObjectKind::Type { actual } => Ok(actual.duplicate()),
                    _ => Err(self.error_at_current(ErrorKind::InvalidType)),
                }
            }
            _ => Err(self.error_at_look_ahead(ErrorKind::InvalidType)),
        }
    }

    /// BasicType := INTEGER | CHAR
    pub fn compile_basic_type(&mut self) -> ParseResult<Type> {
        match self.peek() {
            TokenKind::Integer => {
                self.eat(TokenKind::Integer)?;
                Ok(Type::Int)
            }
            TokenKind::CharType => {
                self.eat(TokenKind::CharType)?;
                Ok(Type::Char)
            }
            _ => Err(self.error_at_look_ahead(ErrorKind::InvalidBasicType)),
        }
    }

    /// Params := [ ( [Param (; Param)*] ) ]
    fn compile_params(&mut self) -> ParseResult<()> {
        if self.peek() != TokenKind::LParen {
            return Ok(());
        }

        self.eat(TokenKind::LParen)?;
        if self.peek() == TokenKind::RParen {
            return self.eat(TokenKind::RParen);
        }

        self.compile_param()?;
        while self.peek() == TokenKind::Semicolon {
            self.eat(TokenKind::Semicolon)?;
            self.compile_param()?;
        }
        self.eat(TokenKind::RParen)
    }

    /// Param := ident : BasicType | VAR ident : BasicType
    fn compile_param(&mut self) -> ParseResult<()> {
        let kind = match self.peek() {
            TokenKind::Ident => ParamKind::Value,
            TokenKind::Var => {
                self.eat(TokenKind::Var)?;
                ParamKind::Reference
            }
            _ => return Err(self.error_at_look_ahead(ErrorKind::InvalidParameter)),
        };

        let name = self.compile_fresh_ident()?;
        let Some(owner) = self.symtab.current_owner() else {
            return Err(self.error_at_current(ErrorKind::InvalidParameter));
        };

        self.eat(TokenKind::Colon)?;
        let ty = self.compile_basic_type()?;

        let param = self.symtab.create_parameter(&name, kind, ty, owner);
        self.symtab.declare(param);
        Ok(())
    }
}
