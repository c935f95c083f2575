use super::Operation;

use crate::{schema::ModelId, stmt};

#[derive(Debug)]
pub struct UpdateByKey {
    /// Which model to update
    pub model: ModelId,

    /// Which key to update
    pub key: stmt::Id,

    /// The columns to write. Only the entries present here are touched.
    pub assignments: stmt::Assignments,
}

impl From<UpdateByKey> for Operation {
    fn from(value: UpdateByKey) -> Self {
        Self::UpdateByKey(value)
    }
}
