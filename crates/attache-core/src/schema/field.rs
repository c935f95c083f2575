use super::ModelId;
use crate::stmt::Type;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldId {
    pub model: ModelId,
    pub index: usize,
}

#[derive(Debug, Clone)]
pub struct Field {
    pub id: FieldId,

    /// Name of the field
    pub name: String,

    pub ty: Type,

    /// Nullable fields are not required to hold a value at save time.
    pub nullable: bool,

    /// Populated by the framework (e.g. generated primary keys) rather than
    /// by the application.
    pub auto: bool,

    pub primary_key: bool,

    /// Internal bookkeeping column (timestamps and the like). Excluded from
    /// delegation by default.
    pub bookkeeping: bool,

    /// Backs a belongs-to association.
    pub foreign_key: bool,
}

impl Field {
    /// True when the field is delegatable by default: anything that is not
    /// framework plumbing.
    pub fn is_plain(&self) -> bool {
        !self.primary_key && !self.auto && !self.bookkeeping && !self.foreign_key
    }
}
