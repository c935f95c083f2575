mod builder;
pub use builder::Builder;

use crate::Entity;

use attache_core::{
    driver::{operation, Driver, Operation, Response},
    schema::{ModelId, Schema},
    stmt::{Id, ValueRecord},
    Error, Result,
};

use std::{cell::RefCell, sync::Arc};

/// Handle to the schema and the storage driver.
pub struct Db {
    pub(crate) schema: Arc<Schema>,

    /// The driver is exclusively owned by the current caller; interior
    /// mutability stands in for the async connection pool this scale does
    /// not need.
    pub(crate) driver: RefCell<Box<dyn Driver>>,
}

impl Db {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// A new, unpersisted record instance of the named model.
    pub fn entity(&self, model: &str) -> Result<Entity> {
        let model = self.model_id(model)?;
        Ok(Entity::new(self.schema.clone(), model))
    }

    /// Re-fetch a record by identity, hydrating its associations from their
    /// stored foreign keys.
    pub fn get(&self, model: &str, key: &Id) -> Result<Entity> {
        let model = self.model_id(model)?;
        let record = self.fetch(model, key)?;

        let mut entity = Entity::load(self.schema.clone(), model, record)?;
        entity.hydrate_parents(self)?;
        Ok(entity)
    }

    /// Delete a record by identity. Deleting an absent key is a no-op.
    pub fn delete(&self, model: &str, key: &Id) -> Result<()> {
        let model = self.model_id(model)?;
        self.exec(
            operation::DeleteByKey {
                model,
                key: key.clone(),
            }
            .into(),
        )?;
        Ok(())
    }

    /// Clear all stored data.
    pub fn reset(&self) -> Result<()> {
        self.driver.borrow_mut().reset(&self.schema)
    }

    pub(crate) fn exec(&self, op: Operation) -> Result<Response> {
        self.driver.borrow_mut().exec(&self.schema, op)
    }

    pub(crate) fn fetch(&self, model: ModelId, key: &Id) -> Result<ValueRecord> {
        let response = self.exec(
            operation::GetByKey {
                model,
                key: key.clone(),
            }
            .into(),
        )?;

        let rows = response.into_values()?;

        match rows.into_iter().next() {
            Some(record) => Ok(record),
            None => Err(Error::record_not_found(format!(
                "model={:?} key={key}",
                model
            ))),
        }
    }

    fn model_id(&self, name: &str) -> Result<ModelId> {
        match self.schema.model_by_name(name) {
            Some(model) => Ok(model.id),
            None => Err(Error::schema(format!("unknown model `{name}`"))),
        }
    }
}
