use crate::error::ErrorKind;
use crate::lexer::TokenKind;
use crate::parser::{ParseResult, Parser};
use crate::semantics::{check_int_type, check_type_equality};
use crate::symtab::{ObjectId, ObjectKind, ParamKind};
use crate::types::Type;

impl Parser<'_> {
    /// Expression := [+|-] Term ((+|-) Term)*
    pub fn compile_expression(&mut self) -> ParseResult<Type> {
        match self.peek() {
            TokenKind::Plus | TokenKind::Minus => {
                self.scan()?;
                let ty = self.compile_expression2()?;
                check_int_type(&ty).map_err(|kind| self.error_at_current(kind))?;
                Ok(ty)
            }
            _ => self.compile_expression2(),
        }
    }

    fn compile_expression2(&mut self) -> ParseResult<Type> {
        let ty = self.compile_term()?;
        self.compile_expression3(&ty)?;
        Ok(ty)
    }

    fn compile_expression3(&mut self, ty: &Type) -> ParseResult<()> {
        loop {
            match self.peek() {
                TokenKind::Plus | TokenKind::Minus => {
                    self.scan()?;
                    let rhs = self.compile_term()?;
                    check_type_equality(ty, &rhs).map_err(|kind| self.error_at_current(kind))?;
                }
                // FOLLOW(Expression)
                TokenKind::To
                | TokenKind::Do
                | TokenKind::RParen
                | TokenKind::Comma
                | TokenKind::Eq
                | TokenKind::NotEq
                | TokenKind::LessEq
                | TokenKind::Less
                | TokenKind::GreaterEq
                | TokenKind::Greater
                | TokenKind::RBracket
                | TokenKind::Semicolon
                | TokenKind::End
                | TokenKind::Else
                | TokenKind::Then
                | TokenKind::Case
                | TokenKind::Begin
                | TokenKind::Default
                | TokenKind::Break => return Ok(()),
                _ => return Err(self.error_at_look_ahead(ErrorKind::InvalidExpression)),
            }
        }
    }

    /// Term := Factor ((*|/|^) Factor)*, integer operands only.
    pub fn compile_term(&mut self) -> ParseResult<Type> {
        let ty = self.compile_factor()?;

        loop {
            match self.peek() {
                TokenKind::Times | TokenKind::Slash | TokenKind::Power => {
                    check_int_type(&ty).map_err(|kind| self.error_at_current(kind))?;
                    self.scan()?;
                    let rhs = self.compile_factor()?;
                    check_int_type(&rhs).map_err(|kind| self.error_at_current(kind))?;
                }
                // FOLLOW(Term)
                TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::To
                | TokenKind::Do
                | TokenKind::RParen
                | TokenKind::Comma
                | TokenKind::Eq
                | TokenKind::NotEq
                | TokenKind::LessEq
                | TokenKind::Less
                | TokenKind::GreaterEq
                | TokenKind::Greater
                | TokenKind::RBracket
                | TokenKind::Semicolon
                | TokenKind::End
                | TokenKind::Else
                | TokenKind::Then
                | TokenKind::Case
                | TokenKind::Begin
                | TokenKind::Default
                | TokenKind::Break => return Ok(ty),
                _ => return Err(self.error_at_look_ahead(ErrorKind::InvalidTerm)),
            }
        }
    }

    /// Factor := number | char | string | double | ( Expression )
    ///         | constant | variable Indexes | parameter | function Arguments
    pub fn compile_factor(&mut self) -> ParseResult<Type> {
        match self.peek() {
            TokenKind::Number => {
                self.scan()?;
                Ok(Type::Int)
            }
            TokenKind::Char => {
                self.scan()?;
                Ok(Type::Char)
            }
            TokenKind::String => {
                self.scan()?;
                Ok(Type::String)
            }
            TokenKind::Double => {
                self.scan()?;
                Ok(Type::Double)
            }
            TokenKind::LParen => {
                self.eat(TokenKind::LParen)?;
                let ty = self.compile_expression()?;
                self.eat(TokenKind::RParen)?;
                Ok(ty)
            }
            TokenKind::Ident => {
                let name = self.eat_ident()?;
                let id = self
                    .symtab
                    .check_declared_ident(&name)
                    .map_err(|kind| self.error_at_current(kind))?;

                match self.symtab.object(id).kind.clone() {
                    ObjectKind::Constant { value } => Ok(value.ty()),
                    ObjectKind::Variable { ty, .. } | ObjectKind::Parameter { ty, .. } => {
                        self.compile_indexes(ty)
                    }
                    ObjectKind::Function {
                        params,
                        return_type,
                        ..
                    } => {
                        self.compile_arguments(&params)?;
                        return_type.ok_or_else(|| self.error_at_current(ErrorKind::InvalidFactor))
                    }
                    _ => Err(self.error_at_current(ErrorKind::InvalidFactor)),
                }
            }
            _ => Err(self.error_at_look_ahead(ErrorKind::InvalidFactor)),
        }
    }

    /// Indexes := ([ Expression ])*
    ///
    /// Each index peels one array dimension. A bare name keeps the whole
    /// array, but once indexing starts it has to reach a non-array element.
    pub fn compile_indexes(&mut self, ty: Type) -> ParseResult<Type> {
        let mut ty = ty;
        let mut indexed = false;

        while self.peek() == TokenKind::LBracket {
            let Some(element) = ty.element().cloned() else {
                return Err(self.error_at_look_ahead(ErrorKind::DimensionalityMismatch));
            };

            self.eat(TokenKind::LBracket)?;
            let index = self.compile_expression()?;
            check_int_type(&index).map_err(|kind| self.error_at_current(kind))?;
            self.eat(TokenKind::RBracket)?;

            ty = element;
            indexed = true;
        }

        if indexed && ty.is_array() {
            return Err(self.error_at_current(ErrorKind::DimensionalityMismatch));
        }
        Ok(ty)
    }

    /// Arguments := [ ( [Expression (, Expression)*] ) ], matched by position
    /// against `params`.
    pub fn compile_arguments(&mut self, params: &[ObjectId]) -> ParseResult<()> {
        match self.peek() {
            TokenKind::LParen => {
                self.eat(TokenKind::LParen)?;

                if self.peek() == TokenKind::RParen {
                    if !params.is_empty() {
                        return Err(self.error_at_look_ahead(ErrorKind::ParameterArgumentCountMismatch));
                    }
                    return self.eat(TokenKind::RParen);
                }

                let mut params = params.iter();
                loop {
                    let Some(param) = params.next() else {
                        return Err(self.error_at_look_ahead(ErrorKind::ParameterArgumentCountMismatch));
                    };
                    self.compile_argument(*param)?;

                    if self.peek() != TokenKind::Comma {
                        break;
                    }
                    self.eat(TokenKind::Comma)?;
                }

                if params.next().is_some() {
                    return Err(self.error_at_look_ahead(ErrorKind::ParameterArgumentCountMismatch));
                }
                self.eat(TokenKind::RParen)
            }
            // FOLLOW(Factor)
            TokenKind::Times
            | TokenKind::Slash
            | TokenKind::Power
            | TokenKind::Plus
            | TokenKind::Minus
            | TokenKind::To
            | TokenKind::Do
            | TokenKind::RParen
            | TokenKind::Comma
            | TokenKind::Eq
            | TokenKind::NotEq
            | TokenKind::LessEq
            | TokenKind::Less
            | TokenKind::GreaterEq
            | TokenKind::Greater
            | TokenKind::RBracket
            | TokenKind::Semicolon
            | TokenKind::End
            | TokenKind::Else
            | TokenKind::Then
            | TokenKind::Case
            | TokenKind::Begin
            | TokenKind::Default
            | TokenKind::Break => {
                if params.is_empty() {
                    Ok(())
                } else {
                    Err(self.error_at_current(ErrorKind::ParameterArgumentCountMismatch))
                }
            }
            _ => Err(self.error_at_look_ahead(ErrorKind::InvalidArguments)),
        }
    }

    /// A reference parameter only takes something assignable.
    fn compile_argument(&mut self, param: ObjectId) -> ParseResult<()> {
        let (kind, expected) = match &self.symtab.object(param).kind {
            ObjectKind::Parameter { kind, ty, .. } => (*kind, ty.clone()),
            _ => return Err(self.error_at_look_ahead(ErrorKind::InvalidArguments)),
        };

        let found = match kind {
            ParamKind::Value => self.compile_expression()?,
            ParamKind::Reference => {
                if self.peek() != TokenKind::Ident {
                    return Err(self.error_at_look_ahead(ErrorKind::InvalidReferenceArgument));
                }
                let ty = self.compile_lvalue()?;
                if !matches!(self.peek(), TokenKind::Comma | TokenKind::RParen) {
                    return Err(self.error_at_look_ahead(ErrorKind::InvalidReferenceArgument));
                }
                ty
            }
        };

        check_type_equality(&expected, &found).map_err(|kind| self.error_at_current(kind))
    }
}
