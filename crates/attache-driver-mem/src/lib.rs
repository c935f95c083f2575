use attache_core::{
    bail,
    driver::{operation, Driver, Operation, Response},
    schema::{Model, ModelId, Schema},
    stmt::{Id, ValueRecord},
    Error, Result,
};

use std::collections::HashMap;

/// In-memory storage driver. One table per model, keyed by primary key.
#[derive(Debug, Default)]
pub struct Mem {
    tables: HashMap<ModelId, HashMap<Id, ValueRecord>>,
}

impl Mem {
    pub fn new() -> Self {
        Self::default()
    }

    fn table_mut(&mut self, model: ModelId) -> Result<&mut HashMap<Id, ValueRecord>> {
        match self.tables.get_mut(&model) {
            Some(table) => Ok(table),
            None => bail!("model {model:?} is not registered with the driver"),
        }
    }

    fn insert(&mut self, schema: &Schema, op: operation::Insert) -> Result<Response> {
        let model = schema.model(op.model);
        check_row(model, &op.row)?;

        let Some(key) = op.row[model.primary_key].as_id().cloned() else {
            bail!("insert into `{}` requires a primary key", model.name);
        };

        let table = self.table_mut(op.model)?;

        if table.contains_key(&key) {
            bail!("duplicate key {key} in `{}`", model.name);
        }

        table.insert(key, op.row);
        Ok(Response::count(1))
    }

    fn get_by_key(&mut self, schema: &Schema, op: operation::GetByKey) -> Result<Response> {
        let model = schema.model(op.model);
        let table = self.table_mut(op.model)?;

        match table.get(&op.key) {
            Some(row) => Ok(Response::values(vec![row.clone()])),
            None => Err(Error::record_not_found(format!(
                "model={} key={}",
                model.name, op.key
            ))),
        }
    }

    fn update_by_key(&mut self, schema: &Schema, op: operation::UpdateByKey) -> Result<Response> {
        let model = schema.model(op.model);

        for (index, value) in op.assignments.iter() {
            let Some(field) = model.fields.get(index) else {
                bail!("assignment index {index} out of range for `{}`", model.name);
            };

            if !field.ty.matches(value) {
                return Err(Error::type_conversion(value, "column type"));
            }
        }

        let table = self.table_mut(op.model)?;

        let Some(row) = table.get_mut(&op.key) else {
            return Err(Error::record_not_found(format!(
                "model={} key={}",
                model.name, op.key
            )));
        };

        for (index, value) in op.assignments.iter() {
            row[index] = value.clone();
        }

        Ok(Response::count(1))
    }

    fn delete_by_key(&mut self, _schema: &Schema, op: operation::DeleteByKey) -> Result<Response> {
        let table = self.table_mut(op.model)?;
        let removed = table.remove(&op.key).is_some();
        Ok(Response::count(removed as u64))
    }
}

impl Driver for Mem {
    fn register_schema(&mut self, schema: &Schema) -> Result<()> {
        for model in &schema.models {
            self.tables.entry(model.id).or_default();
        }

        Ok(())
    }

    fn exec(&mut self, schema: &Schema, op: Operation) -> Result<Response> {
        log::debug!("exec; op={op:?}");

        match op {
            Operation::Insert(op) => self.insert(schema, op),
            Operation::GetByKey(op) => self.get_by_key(schema, op),
            Operation::UpdateByKey(op) => self.update_by_key(schema, op),
            Operation::DeleteByKey(op) => self.delete_by_key(schema, op),
        }
    }

    fn reset(&mut self, _schema: &Schema) -> Result<()> {
        for table in self.tables.values_mut() {
            table.clear();
        }

        Ok(())
    }
}

fn check_row(model: &Model, row: &ValueRecord) -> Result<()> {
    if row.len() != model.fields.len() {
        bail!(
            "row arity mismatch for `{}`: expected {}, got {}",
            model.name,
            model.fields.len(),
            row.len()
        );
    }

    for (field, value) in model.fields.iter().zip(row.iter()) {
        if !field.ty.matches(value) {
            return Err(Error::type_conversion(value, "column type"));
        }
    }

    Ok(())
}
