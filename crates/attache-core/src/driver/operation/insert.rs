use super::Operation;

use crate::{schema::ModelId, stmt};

#[derive(Debug)]
pub struct Insert {
    /// Which model to insert into
    pub model: ModelId,

    /// The full row, including the primary key
    pub row: stmt::ValueRecord,
}

impl From<Insert> for Operation {
    fn from(value: Insert) -> Self {
        Self::Insert(value)
    }
}
