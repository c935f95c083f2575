use super::{Field, FieldId};

use std::fmt;

#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct ModelId(pub usize);

#[derive(Debug, Clone)]
pub struct Model {
    /// Uniquely identifies the model within the schema
    pub id: ModelId,

    /// Name of the model
    pub name: String,

    /// Fields contained by the model
    pub fields: Vec<Field>,

    /// Index of the primary-key field
    pub primary_key: usize,

    /// Belongs-to associations declared on the model
    pub associations: Vec<BelongsTo>,

    /// The delegation mapping table: one entry per attribute this model
    /// exposes on behalf of an associated model. Established at build time,
    /// immutable afterwards.
    pub delegations: Vec<Delegation>,
}

/// A belongs-to association: this model holds a foreign key referencing the
/// target model's primary key.
#[derive(Debug, Clone)]
pub struct BelongsTo {
    /// Name of the association
    pub name: String,

    /// The associated model
    pub target: ModelId,

    /// Index of the foreign-key field on the owning model
    pub foreign_key: usize,

    /// Saving the owner cascades to the associated record. Forced on for
    /// associations that are the target of a delegation.
    pub autosave: bool,
}

/// One entry of a model's delegation mapping table.
#[derive(Debug, Clone)]
pub struct Delegation {
    /// The attribute name exposed on the delegating model
    pub attribute: String,

    /// Index into the model's associations
    pub association: usize,

    /// The backing field on the associated model
    pub target: FieldId,
}

impl Model {
    pub fn field(&self, field: FieldId) -> &Field {
        assert_eq!(self.id, field.model);
        &self.fields[field.index]
    }

    pub fn field_by_name(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name == name)
    }

    pub fn primary_key_field(&self) -> &Field {
        &self.fields[self.primary_key]
    }

    pub fn association_by_name(&self, name: &str) -> Option<(usize, &BelongsTo)> {
        self.associations
            .iter()
            .enumerate()
            .find(|(_, association)| association.name == name)
    }

    /// Look up the delegation mapping entry for an attribute name, if any.
    pub fn delegation(&self, attribute: &str) -> Option<&Delegation> {
        self.delegations
            .iter()
            .find(|delegation| delegation.attribute == attribute)
    }

    pub fn delegated_attributes(&self) -> impl Iterator<Item = &str> + '_ {
        self.delegations
            .iter()
            .map(|delegation| delegation.attribute.as_str())
    }
}

impl fmt::Debug for ModelId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "ModelId({})", self.0)
    }
}
