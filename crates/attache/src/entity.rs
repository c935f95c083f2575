use crate::{relation::BelongsTo, ChangeSet};

use attache_core::{
    schema::{ModelId, Schema},
    stmt::{Id, Value, ValueRecord},
    Error, Result,
};

use indexmap::IndexMap;
use std::{cell::RefCell, rc::Rc, sync::Arc};

/// A live record instance.
///
/// Attribute access is name-keyed: a name resolves either to one of the
/// model's own fields or, through the model's delegation mapping table, to a
/// field on an associated record. Delegated reads against an unbuilt
/// association yield `Value::Null`; the first delegated write builds the
/// association exactly once.
#[derive(Debug)]
pub struct Entity {
    pub(crate) schema: Arc<Schema>,
    pub(crate) model: ModelId,

    /// Current field values, indexed like the model's fields
    pub(crate) row: Vec<Value>,

    pub(crate) persisted: bool,

    /// Dirty state for this record's own fields
    pub(crate) changes: ChangeSet,

    /// One slot per belongs-to association, in declaration order
    pub(crate) parents: Vec<BelongsTo>,
}

/// Where an attribute name resolved to.
enum Target {
    /// One of the record's own fields
    Own(usize),

    /// A field on an associated record: (association index, field index on
    /// the target model)
    Delegated(usize, usize),
}

impl Entity {
    pub(crate) fn new(schema: Arc<Schema>, model: ModelId) -> Entity {
        let descriptor = schema.model(model);
        let row = vec![Value::Null; descriptor.fields.len()];
        let parents = (0..descriptor.associations.len())
            .map(|_| BelongsTo::default())
            .collect();

        Entity {
            schema,
            model,
            row,
            persisted: false,
            changes: ChangeSet::default(),
            parents,
        }
    }

    pub(crate) fn load(schema: Arc<Schema>, model: ModelId, record: ValueRecord) -> Result<Entity> {
        let descriptor = schema.model(model);

        if record.len() != descriptor.fields.len() {
            attache_core::bail!(
                "loaded row arity mismatch for `{}`: expected {}, got {}",
                descriptor.name,
                descriptor.fields.len(),
                record.len()
            );
        }

        let parents = (0..descriptor.associations.len())
            .map(|_| BelongsTo::default())
            .collect();

        Ok(Entity {
            schema,
            model,
            row: record.fields,
            persisted: true,
            changes: ChangeSet::default(),
            parents,
        })
    }

    pub fn model_id(&self) -> ModelId {
        self.model
    }

    pub fn model_name(&self) -> &str {
        &self.schema.model(self.model).name
    }

    /// The primary-key value, once assigned.
    pub fn key(&self) -> Option<&Id> {
        let primary_key = self.schema.model(self.model).primary_key;
        self.row[primary_key].as_id()
    }

    pub fn is_persisted(&self) -> bool {
        self.persisted
    }

    /// Read an attribute. A delegated attribute with no built association
    /// reads as `Value::Null`, never an error.
    pub fn attribute(&self, name: &str) -> Result<Value> {
        match self.target(name)? {
            Target::Own(index) => Ok(self.row[index].clone()),
            Target::Delegated(association, index) => match self.parents[association].get() {
                Some(parent) => Ok(parent.borrow().row[index].clone()),
                None => Ok(Value::Null),
            },
        }
    }

    /// Write an attribute. Writing a delegated attribute builds the
    /// association first if needed; afterwards the association is always
    /// present.
    pub fn set_attribute(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        match self.target(name)? {
            Target::Own(index) => self.set_at(index, value.into()),
            Target::Delegated(association, index) => {
                let parent = self.ensure_parent(association);
                let mut parent = parent.borrow_mut();
                parent.set_at(index, value.into())
            }
        }
    }

    /// Whether the attribute has changed since the record was loaded or last
    /// saved. Unbuilt associations report `false`.
    pub fn attribute_changed(&self, name: &str) -> Result<bool> {
        match self.target(name)? {
            Target::Own(index) => Ok(self.changes.contains(index)),
            Target::Delegated(association, index) => match self.parents[association].get() {
                Some(parent) => Ok(parent.borrow().changes.contains(index)),
                None => Ok(false),
            },
        }
    }

    /// The `(original, current)` pair for a dirty attribute, `None` when the
    /// attribute is clean or the association is unbuilt.
    pub fn attribute_change(&self, name: &str) -> Result<Option<(Value, Value)>> {
        match self.target(name)? {
            Target::Own(index) => Ok(self.change_at(index)),
            Target::Delegated(association, index) => match self.parents[association].get() {
                Some(parent) => Ok(parent.borrow().change_at(index)),
                None => Ok(None),
            },
        }
    }

    /// The value the attribute had before the current change, or the current
    /// value when the attribute is clean.
    pub fn attribute_was(&self, name: &str) -> Result<Value> {
        match self.target(name)? {
            Target::Own(index) => Ok(self.was_at(index)),
            Target::Delegated(association, index) => match self.parents[association].get() {
                Some(parent) => Ok(parent.borrow().was_at(index)),
                None => Ok(Value::Null),
            },
        }
    }

    /// Flag an attribute as about to change, recording its current value as
    /// the original. For a delegated attribute this builds the association
    /// first so the flag has somewhere to live.
    pub fn attribute_will_change(&mut self, name: &str) -> Result<()> {
        match self.target(name)? {
            Target::Own(index) => {
                self.will_change_at(index);
                Ok(())
            }
            Target::Delegated(association, index) => {
                let parent = self.ensure_parent(association);
                parent.borrow_mut().will_change_at(index);
                Ok(())
            }
        }
    }

    /// Whether anything on this record, or on a built associated record, is
    /// dirty.
    pub fn changed(&self) -> bool {
        if !self.changes.is_empty() {
            return true;
        }

        self.parents
            .iter()
            .filter_map(BelongsTo::get)
            .any(|parent| parent.borrow().changed())
    }

    /// Ordered map of dirty attribute name to original value. Delegated
    /// entries are merged in from built associations under their delegated
    /// names; this is a computed view over the parents' dirty state, not a
    /// second copy.
    pub fn changed_attributes(&self) -> IndexMap<String, Value> {
        let model = self.schema.model(self.model);
        let mut out = IndexMap::new();

        for (index, original) in self.changes.iter() {
            out.insert(model.fields[index].name.clone(), original.clone());
        }

        for delegation in &model.delegations {
            let Some(parent) = self.parents[delegation.association].get() else {
                continue;
            };

            let parent = parent.borrow();
            if let Some(original) = parent.changes.original(delegation.target.index) {
                out.insert(delegation.attribute.clone(), original.clone());
            }
        }

        out
    }

    /// Build the association if absent, returning the associated record.
    /// Repeated calls return the identical instance.
    pub fn build_parent(&mut self, association: &str) -> Result<Rc<RefCell<Entity>>> {
        let index = self.association_index(association)?;
        Ok(self.ensure_parent(index))
    }

    /// The associated record, if built.
    pub fn parent(&self, association: &str) -> Result<Option<Rc<RefCell<Entity>>>> {
        let index = self.association_index(association)?;
        Ok(self.parents[index].get())
    }

    fn association_index(&self, name: &str) -> Result<usize> {
        let model = self.schema.model(self.model);

        match model.association_by_name(name) {
            Some((index, _)) => Ok(index),
            None => Err(Error::schema(format!(
                "unknown association `{name}` on model `{}`",
                model.name
            ))),
        }
    }

    fn target(&self, name: &str) -> Result<Target> {
        let model = self.schema.model(self.model);

        if let Some(index) = model.field_index(name) {
            return Ok(Target::Own(index));
        }

        if let Some(delegation) = model.delegation(name) {
            return Ok(Target::Delegated(
                delegation.association,
                delegation.target.index,
            ));
        }

        Err(Error::schema(format!(
            "unknown attribute `{name}` on model `{}`",
            model.name
        )))
    }

    /// Build the parent record in memory, exactly once. The transition is
    /// one-way: once present, the slot is never rebuilt for the life of this
    /// instance.
    fn ensure_parent(&mut self, association: usize) -> Rc<RefCell<Entity>> {
        if let Some(parent) = self.parents[association].get() {
            return parent;
        }

        let target = self.schema.model(self.model).associations[association].target;
        let entity = Entity::new(self.schema.clone(), target);
        self.parents[association].set(entity)
    }

    pub(crate) fn set_at(&mut self, index: usize, value: Value) -> Result<()> {
        let schema = self.schema.clone();
        let field = &schema.model(self.model).fields[index];

        if !field.ty.matches(&value) {
            return Err(Error::type_conversion(&value, field.ty.name()));
        }

        if self.changes.original(index) == Some(&value) {
            // Writing the recorded original back re-cleans the attribute.
            self.changes.forget(index);
        } else if self.row[index] != value {
            let original = self.row[index].clone();
            self.changes.record(index, original);
        }

        self.row[index] = value;
        Ok(())
    }

    fn change_at(&self, index: usize) -> Option<(Value, Value)> {
        self.changes
            .original(index)
            .map(|original| (original.clone(), self.row[index].clone()))
    }

    fn was_at(&self, index: usize) -> Value {
        match self.changes.original(index) {
            Some(original) => original.clone(),
            None => self.row[index].clone(),
        }
    }

    fn will_change_at(&mut self, index: usize) {
        let current = self.row[index].clone();
        self.changes.record_current(index, current);
    }
}
