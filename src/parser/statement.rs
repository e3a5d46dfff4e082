use crate::error::ErrorKind;
use crate::lexer::TokenKind;
use crate::parser::{ParseResult, Parser};
use crate::semantics::check_type_equality;
use crate::symtab::ObjectKind;
use crate::types::Type;

impl Parser<'_> {
    /// Statements := Statement (; Statement)*
    pub fn compile_statements(&mut self) -> ParseResult<()> {
        self.compile_statement()?;
        while self.peek() == TokenKind::Semicolon {
            self.eat(TokenKind::Semicolon)?;
            self.compile_statement()?;
        }
        Ok(())
    }

    pub fn compile_statement(&mut self) -> ParseResult<()> {
        match self.peek() {
            TokenKind::Ident => self.compile_assign_st(),
            TokenKind::Call => self.compile_call_st(),
            TokenKind::Begin => self.compile_group_st(),
            TokenKind::If => self.compile_if_st(),
            TokenKind::While => self.compile_while_st(),
            TokenKind::For => self.compile_for_st(),
            TokenKind::Switch => self.compile_switch_st(),
            // empty statement, FOLLOW(Statement)
            TokenKind::Semicolon | TokenKind::End | TokenKind::Else | TokenKind::Case => Ok(()),
            _ => Err(self.error_at_look_ahead(ErrorKind::InvalidStatement)),
        }
    }

    /// LValue := ident Indexes. Yields the type being assigned to.
    pub fn compile_lvalue(&mut self) -> ParseResult<Type> {
        let name = self.eat_ident()?;
        let id = self
            .symtab
            .check_declared_lvalue_ident(&name)
            .map_err(|kind| self.error_at_current(kind))?;

        match self.symtab.object(id).kind.clone() {
            ObjectKind::Variable { ty, .. } | ObjectKind::Parameter { ty, .. } => {
                self.compile_indexes(ty)
            }
            ObjectKind::Function { return_type, .. } => {
                return_type.ok_or_else(|| self.error_at_current(ErrorKind::InvalidStatement))
            }
            _ => Err(self.error_at_current(ErrorKind::InvalidIdentifierKind {
                name,
                expected: "variable, parameter or the enclosing function",
            })),
        }
    }

    fn compile_assign_st(&mut self) -> ParseResult<()> {
        let target = self.compile_lvalue()?;
        self.eat(TokenKind::Assign)?;
        let value = self.compile_expression()?;
        check_type_equality(&target, &value).map_err(|kind| self.error_at_current(kind))
    }

    fn compile_call_st(&mut self) -> ParseResult<()> {
        self.eat(TokenKind::Call)?;
        let name = self.eat_ident()?;
        let id = self
            .symtab
            .check_declared_procedure(&name)
            .map_err(|kind| self.error_at_current(kind))?;
        let params = self.symtab.object(id).params().to_vec();
        self.compile_arguments(&params)
    }

    fn compile_group_st(&mut self) -> ParseResult<()> {
        self.eat(TokenKind::Begin)?;
        self.compile_statements()?;
        self.eat(TokenKind::End)
    }

    fn compile_if_st(&mut self) -> ParseResult<()> {
        self.eat(TokenKind::If)?;
        self.compile_condition()?;
        self.eat(TokenKind::Then)?;
        self.compile_statement()?;
        if self.peek() == TokenKind::Else {
            self.eat(TokenKind::Else)?;
            self.compile_statement()?;
        }
        Ok(())
    }

    fn compile_while_st(&mut self) -> ParseResult<()> {
        self.eat(TokenKind::While)?;
        self.compile_condition()?;
        self.eat(TokenKind::Do)?;
        self.compile_statement()
    }

    /// FOR ident := Expression TO Expression DO Statement, all three of one type.
    fn compile_for_st(&mut self) -> ParseResult<()> {
        self.eat(TokenKind::For)?;
        let name = self.eat_ident()?;
        let id = self
            .symtab
            .check_declared_variable(&name)
            .map_err(|kind| self.error_at_current(kind))?;
        let ty = match &self.symtab.object(id).kind {
            ObjectKind::Variable { ty, .. } => ty.clone(),
            _ => return Err(self.error_at_current(ErrorKind::InvalidStatement)),
        };

        self.eat(TokenKind::Assign)?;
        let from = self.compile_expression()?;
        check_type_equality(&ty, &from).map_err(|kind| self.error_at_current(kind))?;

        self.eat(TokenKind::To)?;
        let to = self.compile_expression()?;
        check_type_equality(&ty, &to).map_err(|kind| self.error_at_current(kind))?;

        self.eat(TokenKind::Do)?;
        self.compile_statement()
    }

    /// SWITCH Expression BEGIN (CASE Constant : Statements [BREAK])* [DEFAULT : Statement] END
    fn compile_switch_st(&mut self) -> ParseResult<()> {
        self.eat(TokenKind::Switch)?;
        let ty = self.compile_expression()?;
        self.eat(TokenKind::Begin)?;

        while self.peek() == TokenKind::Case {
            self.eat(TokenKind::Case)?;
            let label = self.compile_constant()?;
            check_type_equality(&ty, &label.ty()).map_err(|kind| self.error_at_current(kind))?;
            self.eat(TokenKind::Colon)?;
            self.compile_statements()?;
            if self.peek() == TokenKind::Break {
                self.eat(TokenKind::Break)?;
            }
        }

        if self.peek() == TokenKind::Default {
            self.eat(TokenKind::Default)?;
            self.eat(TokenKind::Colon)?;
            self.compile_statement()?;
        }

        self.eat(TokenKind::End)
    }

    /// Condition := Expression relop Expression, both sides of one type.
    pub fn compile_condition(&mut self) -> ParseResult<()> {
        let lhs = self.compile_expression()?;

        match self.peek() {
            TokenKind::Eq
            | TokenKind::NotEq
            | TokenKind::LessEq
            | TokenKind::Less
            | TokenKind::GreaterEq
            | TokenKind::Greater => self.scan()?,
            _ => return Err(self.error_at_look_ahead(ErrorKind::InvalidComparator)),
        }

        let rhs = self.compile_expression()?;
        check_type_equality(&lhs, &rhs).map_err(|kind| self.error_at_current(kind))
    }
}
