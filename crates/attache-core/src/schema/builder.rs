use super::{BelongsTo, Delegation, Field, FieldId, Model, ModelId, Schema};
use crate::{stmt::Type, Error, Result};

use std::collections::HashMap;

/// Builds a [`Schema`] from model declarations.
///
/// All name resolution and delegation validation happens in [`Builder::build`]
/// so that misconfiguration surfaces when the schema is declared, never at
/// attribute access time.
#[derive(Default)]
pub struct Builder {
    models: Vec<ModelBuilder>,
}

pub struct ModelBuilder {
    name: String,
    fields: Vec<FieldSpec>,
    associations: Vec<AssociationSpec>,
    delegations: Vec<DelegationSpec>,
}

/// Which attributes a model delegates to an association.
#[derive(Debug, Default, Clone)]
pub struct Delegated {
    /// Explicit attribute list. When absent, the set is derived from the
    /// target model's columns minus the rejected set.
    attributes: Option<Vec<String>>,

    /// Caller-supplied rejections, on top of the default rejected set
    /// (primary key, auto, bookkeeping, and foreign-key columns).
    reject: Vec<String>,
}

struct FieldSpec {
    name: String,
    ty: Type,
    nullable: bool,
    auto: bool,
    primary_key: bool,
    bookkeeping: bool,
}

struct AssociationSpec {
    name: String,
    target: String,
}

struct DelegationSpec {
    association: String,
    delegated: Delegated,
}

impl Model {
    pub fn builder(name: impl Into<String>) -> ModelBuilder {
        ModelBuilder {
            name: name.into(),
            fields: vec![],
            associations: vec![],
            delegations: vec![],
        }
    }
}

impl Delegated {
    /// Delegate every column of the target minus the rejected set.
    pub fn all() -> Self {
        Self::default()
    }

    /// Delegate exactly the named attributes.
    pub fn only<I, S>(attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            attributes: Some(attributes.into_iter().map(Into::into).collect()),
            reject: vec![],
        }
    }

    /// Reject additional columns when the attribute set is derived.
    pub fn reject<I, S>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reject.extend(attributes.into_iter().map(Into::into));
        self
    }
}

impl ModelBuilder {
    /// Add an auto-generated `id` primary key.
    pub fn id(self) -> Self {
        self.push_field(FieldSpec {
            name: "id".to_string(),
            ty: Type::Id,
            nullable: true,
            auto: true,
            primary_key: true,
            bookkeeping: false,
        })
    }

    pub fn field(self, name: impl Into<String>, ty: Type) -> Self {
        self.push_field(FieldSpec {
            name: name.into(),
            ty,
            nullable: true,
            auto: false,
            primary_key: false,
            bookkeeping: false,
        })
    }

    pub fn required_field(self, name: impl Into<String>, ty: Type) -> Self {
        self.push_field(FieldSpec {
            name: name.into(),
            ty,
            nullable: false,
            auto: false,
            primary_key: false,
            bookkeeping: false,
        })
    }

    /// Internal bookkeeping column; excluded from delegation by default.
    pub fn bookkeeping_field(self, name: impl Into<String>, ty: Type) -> Self {
        self.push_field(FieldSpec {
            name: name.into(),
            ty,
            nullable: true,
            auto: false,
            primary_key: false,
            bookkeeping: true,
        })
    }

    /// Declare a belongs-to association. A nullable `{name}_id` foreign-key
    /// field is added to this model.
    pub fn belongs_to(mut self, name: impl Into<String>, target: impl Into<String>) -> Self {
        self.associations.push(AssociationSpec {
            name: name.into(),
            target: target.into(),
        });
        self
    }

    /// Delegate attributes to a previously declared association.
    pub fn delegates_attributes_to(
        mut self,
        association: impl Into<String>,
        delegated: Delegated,
    ) -> Self {
        self.delegations.push(DelegationSpec {
            association: association.into(),
            delegated,
        });
        self
    }

    fn push_field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }
}

impl Builder {
    pub fn model(mut self, model: ModelBuilder) -> Self {
        self.models.push(model);
        self
    }

    pub fn build(self) -> Result<Schema> {
        let ids = self.resolve_model_ids()?;
        let mut models = vec![];

        for (index, builder) in self.models.iter().enumerate() {
            models.push(builder.to_model(ModelId(index), &ids)?);
        }

        // Delegations resolve against fully built models, so they are
        // processed in a second pass.
        for (index, builder) in self.models.iter().enumerate() {
            for spec in &builder.delegations {
                let (association_index, entries) =
                    resolve_delegation(&models, index, spec)?;

                let model = &mut models[index];
                model.associations[association_index].autosave = true;
                model.delegations.extend(entries);
            }
        }

        Ok(Schema { models })
    }

    fn resolve_model_ids(&self) -> Result<HashMap<String, ModelId>> {
        let mut ids = HashMap::new();

        for (index, builder) in self.models.iter().enumerate() {
            if ids.insert(builder.name.clone(), ModelId(index)).is_some() {
                return Err(Error::schema(format!(
                    "duplicate model `{}`",
                    builder.name
                )));
            }
        }

        Ok(ids)
    }
}

impl ModelBuilder {
    fn to_model(&self, id: ModelId, ids: &HashMap<String, ModelId>) -> Result<Model> {
        let mut fields: Vec<Field> = vec![];
        let mut associations = vec![];

        for spec in &self.fields {
            push_field(
                &mut fields,
                &self.name,
                id,
                Field {
                    id: FieldId {
                        model: id,
                        index: 0,
                    },
                    name: spec.name.clone(),
                    ty: spec.ty,
                    nullable: spec.nullable,
                    auto: spec.auto,
                    primary_key: spec.primary_key,
                    bookkeeping: spec.bookkeeping,
                    foreign_key: false,
                },
            )?;
        }

        for spec in &self.associations {
            let Some(target) = ids.get(&spec.target).copied() else {
                return Err(Error::schema(format!(
                    "association `{}` on model `{}` references unknown model `{}`",
                    spec.name, self.name, spec.target
                )));
            };

            let foreign_key = fields.len();
            push_field(
                &mut fields,
                &self.name,
                id,
                Field {
                    id: FieldId {
                        model: id,
                        index: 0,
                    },
                    name: format!("{}_id", spec.name),
                    ty: Type::Id,
                    nullable: true,
                    auto: false,
                    primary_key: false,
                    bookkeeping: false,
                    foreign_key: true,
                },
            )?;

            associations.push(BelongsTo {
                name: spec.name.clone(),
                target,
                foreign_key,
                autosave: false,
            });
        }

        let Some(primary_key) = fields.iter().position(|field| field.primary_key) else {
            return Err(Error::schema(format!(
                "model `{}` has no primary key",
                self.name
            )));
        };

        Ok(Model {
            id,
            name: self.name.clone(),
            fields,
            primary_key,
            associations,
            delegations: vec![],
        })
    }
}

fn push_field(fields: &mut Vec<Field>, model_name: &str, model: ModelId, mut field: Field) -> Result<()> {
    if fields.iter().any(|existing| existing.name == field.name) {
        return Err(Error::schema(format!(
            "duplicate field `{}` on model `{}`",
            field.name, model_name
        )));
    }

    field.id = FieldId {
        model,
        index: fields.len(),
    };
    fields.push(field);
    Ok(())
}

/// Compute the mapping-table entries for one `delegates_attributes_to`
/// declaration. Runs once at build time.
fn resolve_delegation(
    models: &[Model],
    child_index: usize,
    spec: &DelegationSpec,
) -> Result<(usize, Vec<Delegation>)> {
    let child = &models[child_index];

    let Some((association_index, association)) = child.association_by_name(&spec.association)
    else {
        return Err(Error::schema(format!(
            "model `{}` delegates attributes to unknown association `{}`",
            child.name, spec.association
        )));
    };

    let target = &models[association.target.0];

    let attributes: Vec<&Field> = match &spec.delegated.attributes {
        Some(names) => {
            let mut attributes = vec![];

            for name in names {
                let Some(field) = target.field_by_name(name) else {
                    return Err(Error::schema(format!(
                        "model `{}` delegates unknown attribute `{}` to `{}`",
                        child.name, name, target.name
                    )));
                };
                attributes.push(field);
            }

            attributes
        }
        None => target
            .fields
            .iter()
            .filter(|field| field.is_plain())
            .filter(|field| !spec.delegated.reject.iter().any(|name| *name == field.name))
            .collect(),
    };

    let mut entries = vec![];

    for field in attributes {
        if child.field_by_name(&field.name).is_some() {
            return Err(Error::schema(format!(
                "delegated attribute `{}` collides with a field on model `{}`",
                field.name, child.name
            )));
        }

        let already_delegated = child.delegation(&field.name).is_some()
            || entries
                .iter()
                .any(|entry: &Delegation| entry.attribute == field.name);

        if already_delegated {
            return Err(Error::schema(format!(
                "attribute `{}` is delegated twice on model `{}`",
                field.name, child.name
            )));
        }

        entries.push(Delegation {
            attribute: field.name.clone(),
            association: association_index,
            target: field.id,
        });
    }

    Ok((association_index, entries))
}
