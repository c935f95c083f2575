use super::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Type {
    Bool,
    I64,
    Id,
    String,
}

impl Type {
    pub fn name(self) -> &'static str {
        match self {
            Self::Bool => "Bool",
            Self::I64 => "I64",
            Self::Id => "Id",
            Self::String => "String",
        }
    }

    /// Returns true when the value can be stored in a field of this type.
    ///
    /// `Null` matches every type; nullability is enforced by validation, not
    /// by the type system.
    pub fn matches(self, value: &Value) -> bool {
        match value.ty() {
            Some(ty) => ty == self,
            None => true,
        }
    }
}
