use super::Db;

use attache_core::{
    driver::Driver,
    schema::{self, ModelBuilder},
    Result,
};

use std::{cell::RefCell, sync::Arc};

/// Configures and builds a [`Db`].
#[derive(Default)]
pub struct Builder {
    schema: schema::Builder,
}

impl Builder {
    /// Register a model with the schema.
    pub fn register(mut self, model: ModelBuilder) -> Self {
        self.schema = self.schema.model(model);
        self
    }

    /// Validate the schema and hand it to the driver.
    ///
    /// Every delegation declaration is resolved here; a misconfigured
    /// mapping fails the build, not a later attribute access.
    pub fn build(self, mut driver: impl Driver) -> Result<Db> {
        let schema = Arc::new(self.schema.build()?);
        driver.register_schema(&schema)?;

        log::debug!("database ready; models={}", schema.models.len());

        Ok(Db {
            schema,
            driver: RefCell::new(Box::new(driver)),
        })
    }
}
