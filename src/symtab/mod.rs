pub mod print;


use crate::types::{ConstantValue, Type};

/// Index of an [`Object`] in the symbol table arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(usize);

/// Index of a [`Scope`] in the symbol table arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Value,
    Reference,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ObjectKind {
    Program {
        scope: ScopeId,
    },
    Constant {
        value: ConstantValue,
    },
    Type {
        actual: Type,
    },
    Variable {
        ty: Type,
        /// Block the variable lives in, kept for storage layout.
        scope: Option<ScopeId>,
    },
    Function {
        scope: ScopeId,
        params: Vec<ObjectId>,
        /// Unknown until the parameter list has been parsed.
        return_type: Option<Type>,
    },
    Procedure {
        scope: ScopeId,
        params: Vec<ObjectId>,
    },
    Parameter {
        kind: ParamKind,
        ty: Type,
        owner: ObjectId,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Object {
    pub name: String,
    pub kind: ObjectKind,
}

impl Object {
    /// Human readable role, used in diagnostics and dumps.
    pub fn role(&self) -> &'static str {
        match self.kind {
            ObjectKind::Program { .. } => "program",
            ObjectKind::Constant { .. } => "constant",
            ObjectKind::Type { .. } => "type",
            ObjectKind::Variable { .. } => "variable",
            ObjectKind::Function { .. } => "function",
            ObjectKind::Procedure { .. } => "procedure",
            ObjectKind::Parameter { .. } => "parameter",
        }
    }

    /// Parameter list of a routine, empty for anything else.
    pub fn params(&self) -> &[ObjectId] {
        match &self.kind {
            ObjectKind::Function { params, .. } | ObjectKind::Procedure { params, .. } => params,
            _ => &[],
        }
    }

    /// Scope opened by a program or routine.
    pub fn own_scope(&self) -> Option<ScopeId> {
        match self.kind {
            ObjectKind::Program { scope }
            | ObjectKind::Function { scope, .. }
            | ObjectKind::Procedure { scope, .. } => Some(scope),
            _ => None,
        }
    }
}

/// The objects declared directly inside one block.
#[derive(Debug, Clone, PartialEq)]
pub struct Scope {
    pub objects: Vec<ObjectId>,
    pub owner: ObjectId,
    pub outer: Option<ScopeId>,
}

/// Compilation-wide name table: an arena of objects and scopes, the builtin
/// routines, the program root and the currently open scope.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    objects: Vec<Object>,
    scopes: Vec<Scope>,
    globals: Vec<ObjectId>,
    program: Option<ObjectId>,
    current: Option<ScopeId>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    /// Creates a table seeded with the builtin routines.
    pub fn new() -> Self {
        let mut symtab = SymbolTable {
            objects: vec![],
            scopes: vec![],
            globals: vec![],
            program: None,
            current: None,
        };
        symtab.seed_builtins();
        symtab
    }

    fn seed_builtins(&mut self) {
        let readc = self.create_function("READC");
        self.set_return_type(readc, Type::Char);
        self.globals.push(readc);

        let readi = self.create_function("READI");
        self.set_return_type(readi, Type::Int);
        self.globals.push(readi);

        for (name, param, ty) in [("WRITEI", "i", Type::Int), ("WRITEC", "ch", Type::Char)] {
            let proc = self.create_procedure(name);
            let param = self.create_parameter(param, ParamKind::Value, ty, proc);
            self.attach_parameter(proc, param);
            self.globals.push(proc);
        }

        let writeln = self.create_procedure("WRITELN");
        self.globals.push(writeln);
    }

    fn alloc(&mut self, name: &str, kind: ObjectKind) -> ObjectId {
        let id = ObjectId(self.objects.len());
        self.objects.push(Object {
            name: name.to_string(),
            kind,
        });
        id
    }

    fn alloc_scope(&mut self, owner: ObjectId, outer: Option<ScopeId>) -> ScopeId {
        let id = ScopeId(self.scopes.len());
        self.scopes.push(Scope {
            objects: vec![],
            owner,
            outer,
        });
        id
    }

    /// Allocates an object that owns a fresh scope nested in the current one.
    fn alloc_with_scope(&mut self, name: &str, kind: impl FnOnce(ScopeId) -> ObjectKind) -> ObjectId {
        let id = ObjectId(self.objects.len());
        let scope = self.alloc_scope(id, self.current);
        self.alloc(name, kind(scope))
    }

    pub fn create_program(&mut self, name: &str) -> ObjectId {
        let id = self.alloc_with_scope(name, |scope| ObjectKind::Program { scope });
        self.program = Some(id);
        id
    }

    pub fn create_constant(&mut self, name: &str, value: ConstantValue) -> ObjectId {
        self.alloc(name, ObjectKind::Constant { value })
    }

    pub fn create_type(&mut self, name: &str, actual: Type) -> ObjectId {
        self.alloc(name, ObjectKind::Type { actual })
    }

    /// The variable is attributed to the currently open scope.
    pub fn create_variable(&mut self, name: &str, ty: Type) -> ObjectId {
        let scope = self.current;
        self.alloc(name, ObjectKind::Variable { ty, scope })
    }

    pub fn create_function(&mut self, name: &str) -> ObjectId {
        self.alloc_with_scope(name, |scope| ObjectKind::Function {
            scope,
            params: vec![],
            return_type: None,
        })
    }

    pub fn create_procedure(&mut self, name: &str) -> ObjectId {
        self.alloc_with_scope(name, |scope| ObjectKind::Procedure {
            scope,
            params: vec![],
        })
    }

    pub fn create_parameter(&mut self, name: &str, kind: ParamKind, ty: Type, owner: ObjectId) -> ObjectId {
        self.alloc(name, ObjectKind::Parameter { kind, ty, owner })
    }

    pub fn set_return_type(&mut self, function: ObjectId, ty: Type) {
        if let ObjectKind::Function { return_type, .. } = &mut self.objects[function.0].kind {
            *return_type = Some(ty);
        }
    }

    fn attach_parameter(&mut self, routine: ObjectId, param: ObjectId) {
        match &mut self.objects[routine.0].kind {
            ObjectKind::Function { params, .. } | ObjectKind::Procedure { params, .. } => {
                params.push(param)
            }
            _ => {}
        }
    }

    /// Registers `id` in the current scope. Parameters are also appended to
    /// their owner's parameter list. Freshness is the caller's business.
    ///
    /// Declaring with no block open is a caller bug. Release builds log it and
    /// leave the table untouched.
    pub fn declare(&mut self, id: ObjectId) {
        debug_assert!(self.current.is_some(), "declare outside of any block");
        let Some(scope) = self.current else {
            tracing::warn!(name = %self.objects[id.0].name, "declaration outside of any block");
            return;
        };

        if let ObjectKind::Parameter { owner, .. } = self.objects[id.0].kind {
            self.attach_parameter(owner, id);
        }
        tracing::debug!(
            name = %self.objects[id.0].name,
            role = self.objects[id.0].role(),
            "declare"
        );
        self.scopes[scope.0].objects.push(id);
    }

    /// Finds `name` among the objects declared directly in `scope`.
    pub fn find_in_scope(&self, scope: ScopeId, name: &str) -> Option<ObjectId> {
        self.scopes[scope.0]
            .objects
            .iter()
            .copied()
            .find(|id| self.objects[id.0].name == name)
    }

    /// Innermost binding of `name`, walking outward and then into the builtins.
    pub fn lookup(&self, name: &str) -> Option<ObjectId> {
        let mut scope = self.current;
        while let Some(id) = scope {
            if let Some(found) = self.find_in_scope(id, name) {
                return Some(found);
            }
            scope = self.scopes[id.0].outer;
        }

        self.globals
            .iter()
            .copied()
            .find(|id| self.objects[id.0].name == name)
    }

    pub fn enter_block(&mut self, scope: ScopeId) {
        tracing::debug!(owner = %self.objects[self.scopes[scope.0].owner.0].name, "enter block");
        self.current = Some(scope);
    }

    pub fn exit_block(&mut self) {
        let Some(scope) = self.current else {
            tracing::warn!("exit_block called with no open block");
            return;
        };
        tracing::debug!(owner = %self.objects[self.scopes[scope.0].owner.0].name, "exit block");
        self.current = self.scopes[scope.0].outer;
    }

    pub fn object(&self, id: ObjectId) -> &Object {
        &self.objects[id.0]
    }

    pub fn object_mut(&mut self, id: ObjectId) -> &mut Object {
        &mut self.objects[id.0]
    }

    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.0]
    }

    pub fn current_scope(&self) -> Option<ScopeId> {
        self.current
    }

    /// Owner of the currently open scope.
    pub fn current_owner(&self) -> Option<ObjectId> {
        self.current.map(|scope| self.scopes[scope.0].owner)
    }

    pub fn program(&self) -> Option<ObjectId> {
        self.program
    }

    pub fn globals(&self) -> &[ObjectId] {
        &self.globals
    }
}
