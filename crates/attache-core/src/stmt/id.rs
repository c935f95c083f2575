use crate::schema::ModelId;

use std::fmt;
use uuid::Uuid;

/// A record identifier.
///
/// Identifiers carry the model they belong to so that a key for one model
/// cannot silently address a row of another.
#[derive(Clone, Hash, Eq, PartialEq)]
pub struct Id {
    /// The model the identifier is associated with.
    model: ModelId,

    key: Uuid,
}

impl Id {
    /// Generate a fresh identifier for the given model.
    pub fn generate(model: ModelId) -> Self {
        Self {
            model,
            key: Uuid::new_v4(),
        }
    }

    /// The model this identifier represents
    pub fn model_id(&self) -> ModelId {
        self.model
    }
}

impl fmt::Display for Id {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "{}", self.key)
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "Id({}, {})", self.model.0, self.key)
    }
}
