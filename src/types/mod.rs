#[cfg(test)]
pub mod test;

use std::fmt;

/// A KPL type. Arrays own their element type, so every `Type` is a tree.
///
/// Equality is structural: two arrays are equal when their sizes match and
/// their element types are (recursively) equal. Cloning a type is a deep copy.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    Int,
    Char,
    String,
    Double,
    Array { size: i32, element: Box<Type> },
}

impl Type {
    pub fn array(size: i32, element: Type) -> Self {
        Type::Array {
            size,
            element: Box::new(element),
        }
    }

    /// Independent deep copy, used whenever a named type is instantiated.
    pub fn duplicate(&self) -> Self {
        self.clone()
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Type::Array { .. })
    }

    pub fn element(&self) -> Option<&Type> {
        match self {
            Type::Array { element, .. } => Some(element),
            _ => None,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Int => write!(f, "integer"),
            Type::Char => write!(f, "char"),
            Type::String => write!(f, "string"),
            Type::Double => write!(f, "double"),
            Type::Array { size, element } => write!(f, "array[{}] of {}", size, element),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstantValue {
    Int(i32),
    Char(u8),
}

impl ConstantValue {
    pub fn ty(&self) -> Type {
        match self {
            ConstantValue::Int(_) => Type::Int,
            ConstantValue::Char(_) => Type::Char,
        }
    }

    /// Folds a unary minus. Characters cannot be negated.
    pub fn negate(self) -> Option<ConstantValue> {
        match self {
            ConstantValue::Int(i) => i.checked_neg().map(ConstantValue::Int),
            ConstantValue::Char(_) => None,
        }
    }
}

impl fmt::Display for ConstantValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstantValue::Int(i) => write!(f, "{}", i),
            ConstantValue::Char(c) => write!(f, "'{}'", *c as char),
        }
    }
}
