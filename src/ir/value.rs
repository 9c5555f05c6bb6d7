use std::fmt;

use crate::types::Type;

/// An SSA value: a per-function dense id plus its static type.
///
/// `id == 0` is reserved for the invalid value (undefined identifiers,
/// void call results). Ids are allocated monotonically by
/// `Function::new_value`, so each id is defined at most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Value {
    pub id: u32,
    pub ty: Type,
}

impl Value {
    pub const INVALID: Value = Value {
        id: 0,
        ty: Type::Unknown,
    };

    pub fn new(id: u32, ty: Type) -> Self {
        Self { id, ty }
    }

    pub fn is_valid(self) -> bool {
        self.id != 0
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::INVALID
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "%{}", self.id)
        } else {
            f.write_str("void")
        }
    }
}
