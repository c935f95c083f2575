use super::Operation;

use crate::{schema::ModelId, stmt};

#[derive(Debug)]
pub struct DeleteByKey {
    /// Which model to delete from
    pub model: ModelId,

    /// Which key to delete
    pub key: stmt::Id,
}

impl From<DeleteByKey> for Operation {
    fn from(value: DeleteByKey) -> Self {
        Self::DeleteByKey(value)
    }
}
