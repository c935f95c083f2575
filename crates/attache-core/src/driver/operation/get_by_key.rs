use super::Operation;

use crate::{schema::ModelId, stmt};

#[derive(Debug)]
pub struct GetByKey {
    /// Which model to get from
    pub model: ModelId,

    /// Which key to fetch
    pub key: stmt::Id,
}

impl From<GetByKey> for Operation {
    fn from(value: GetByKey) -> Self {
        Self::GetByKey(value)
    }
}
