use crate::symtab::{ObjectId, ObjectKind, ParamKind, SymbolTable};

use std::fmt::{self, Write};

impl SymbolTable {
    /// Renders the program tree, one object per line, nested blocks indented.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        if let Some(program) = self.program() {
            // writing into a String cannot fail
            let _ = self.write_object(&mut out, program, 0);
        }
        out
    }

    fn write_object(&self, out: &mut String, id: ObjectId, indent: usize) -> fmt::Result {
        let object = self.object(id);
        write!(out, "{:indent$}", "", indent = indent)?;

        match &object.kind {
            ObjectKind::Program { .. } => write!(out, "Program {}", object.name)?,
            ObjectKind::Constant { value } => write!(out, "Const {} = {}", object.name, value)?,
            ObjectKind::Type { actual } => write!(out, "Type {} = {}", object.name, actual)?,
            ObjectKind::Variable { ty, .. } => write!(out, "Var {} : {}", object.name, ty)?,
            ObjectKind::Function {
                params,
                return_type,
                ..
            } => {
                write!(out, "Function {}", object.name)?;
                self.write_params(out, params)?;
                if let Some(ty) = return_type {
                    write!(out, " : {}", ty)?;
                }
            }
            ObjectKind::Procedure { params, .. } => {
                write!(out, "Procedure {}", object.name)?;
                self.write_params(out, params)?;
            }
            ObjectKind::Parameter { kind, ty, .. } => match kind {
                ParamKind::Value => write!(out, "Param {} : {}", object.name, ty)?,
                ParamKind::Reference => write!(out, "Param VAR {} : {}", object.name, ty)?,
            },
        }
        out.push('\n');

        if let Some(scope) = object.own_scope() {
            for child in &self.scope(scope).objects {
                self.write_object(out, *child, indent + 4)?;
            }
        }
        Ok(())
    }

    fn write_params(&self, out: &mut String, params: &[ObjectId]) -> fmt::Result {
        let params = params
            .iter()
            .map(|param| {
                let object = self.object(*param);
                match &object.kind {
                    ObjectKind::Parameter {
                        kind: ParamKind::Reference,
                        ty,
                        ..
                    } => format!("VAR {}: {}", object.name, ty),
                    ObjectKind::Parameter { ty, .. } => format!("{}: {}", object.name, ty),
                    _ => object.name.clone(),
                }
            })
            .collect::<Vec<_>>()
            .join("; ");
        write!(out, "({})", params)
    }
}

impl fmt::Display for SymbolTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dump())
    }
}
