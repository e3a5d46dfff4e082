//! Name-resolution and compatibility rules layered on the symbol table.
//!
//! Every check returns the bare [`ErrorKind`]; the parser attaches the
//! position of the token it was looking at.


use crate::error::ErrorKind;
use crate::symtab::{ObjectId, ObjectKind, SymbolTable};
use crate::types::{ConstantValue, Type};

pub type CheckResult<T> = Result<T, ErrorKind>;

impl SymbolTable {
    /// Fails if `name` is already declared in the current scope. Outer
    /// declarations may be shadowed.
    pub fn check_fresh_ident(&self, name: &str) -> CheckResult<()> {
        let Some(scope) = self.current_scope() else {
            return Ok(());
        };
        match self.find_in_scope(scope, name) {
            Some(_) => Err(ErrorKind::DuplicateIdentifier(name.to_string())),
            None => Ok(()),
        }
    }

    pub fn check_declared_ident(&self, name: &str) -> CheckResult<ObjectId> {
        self.lookup(name)
            .ok_or_else(|| ErrorKind::UndeclaredIdentifier(name.to_string()))
    }

    fn check_declared_role(
        &self,
        name: &str,
        expected: &'static str,
        undeclared: fn(String) -> ErrorKind,
        accept: fn(&ObjectKind) -> bool,
    ) -> CheckResult<ObjectId> {
        let id = self.lookup(name).ok_or_else(|| undeclared(name.to_string()))?;
        if accept(&self.object(id).kind) {
            Ok(id)
        } else {
            Err(ErrorKind::InvalidIdentifierKind {
                name: name.to_string(),
                expected,
            })
        }
    }

    pub fn check_declared_constant(&self, name: &str) -> CheckResult<ObjectId> {
        self.check_declared_role(name, "constant", ErrorKind::UndeclaredConstant, |kind| {
            matches!(kind, ObjectKind::Constant { .. })
        })
    }

    pub fn check_declared_type(&self, name: &str) -> CheckResult<ObjectId> {
        self.check_declared_role(name, "type", ErrorKind::UndeclaredType, |kind| {
            matches!(kind, ObjectKind::Type { .. })
        })
    }

    pub fn check_declared_variable(&self, name: &str) -> CheckResult<ObjectId> {
        self.check_declared_role(name, "variable", ErrorKind::UndeclaredVariable, |kind| {
            matches!(kind, ObjectKind::Variable { .. })
        })
    }

    pub fn check_declared_function(&self, name: &str) -> CheckResult<ObjectId> {
        self.check_declared_role(name, "function", ErrorKind::UndeclaredFunction, |kind| {
            matches!(kind, ObjectKind::Function { .. })
        })
    }

    pub fn check_declared_procedure(&self, name: &str) -> CheckResult<ObjectId> {
        self.check_declared_role(name, "procedure", ErrorKind::UndeclaredProcedure, |kind| {
            matches!(kind, ObjectKind::Procedure { .. })
        })
    }

    /// Resolves an assignment target. A function name is only assignable
    /// inside that function's own body, where it sets the return value.
    pub fn check_declared_lvalue_ident(&self, name: &str) -> CheckResult<ObjectId> {
        let id = self.check_declared_ident(name)?;
        match self.object(id).kind {
            ObjectKind::Variable { .. } | ObjectKind::Parameter { .. } => Ok(id),
            ObjectKind::Function { .. } if self.current_owner() == Some(id) => Ok(id),
            _ => Err(ErrorKind::InvalidIdentifierKind {
                name: name.to_string(),
                expected: "variable, parameter or the enclosing function",
            }),
        }
    }

    /// Value of a named constant that must be an integer.
    pub fn check_int_constant(&self, name: &str) -> CheckResult<ConstantValue> {
        let id = self.check_declared_constant(name)?;
        match self.object(id).kind {
            ObjectKind::Constant {
                value: value @ ConstantValue::Int(_),
            } => Ok(value),
            _ => Err(ErrorKind::NotAnIntConstant(name.to_string())),
        }
    }
}

/// Structural equality, no coercions.
pub fn check_type_equality(expected: &Type, found: &Type) -> CheckResult<()> {
    if expected == found {
        Ok(())
    } else {
        Err(ErrorKind::TypeMismatch {
            expected: expected.clone(),
            found: found.clone(),
        })
    }
}

pub fn check_int_type(ty: &Type) -> CheckResult<()> {
    check_type_equality(&Type::Int, ty)
}
