mod builder;
pub use builder::{Builder, Delegated, ModelBuilder};

mod field;
pub use field::{Field, FieldId};

mod model;
pub use model::{BelongsTo, Delegation, Model, ModelId};

/// The application schema: every model, association, and delegation mapping,
/// fully resolved and validated. Immutable once built.
#[derive(Debug)]
pub struct Schema {
    pub models: Vec<Model>,
}

impl Schema {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub fn model(&self, id: ModelId) -> &Model {
        &self.models[id.0]
    }

    pub fn model_by_name(&self, name: &str) -> Option<&Model> {
        self.models.iter().find(|model| model.name == name)
    }
}
