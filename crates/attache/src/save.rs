use crate::{Db, Entity};

use attache_core::{
    driver::operation,
    err,
    stmt::{Assignments, Id, Value, ValueRecord},
    Error, Result,
};

/// Which columns an update writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdateMode {
    /// Write only the dirty columns
    #[default]
    Changed,

    /// Write every non-key column
    Full,
}

/// Per-call save configuration. Threaded explicitly through each save rather
/// than held in process-wide state.
#[derive(Debug, Clone, Copy)]
pub struct SaveOptions {
    pub validate: bool,
    pub mode: UpdateMode,
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self {
            validate: true,
            mode: UpdateMode::Changed,
        }
    }
}

impl Entity {
    /// Validating save. Returns `Ok(false)` when validation rejects the
    /// record or one of its autosaved associations.
    pub fn save(&mut self, db: &Db) -> Result<bool> {
        self.save_with(db, SaveOptions::default())
    }

    pub fn save_with(&mut self, db: &Db, options: SaveOptions) -> Result<bool> {
        if options.validate {
            if let Err(err) = self.validate() {
                if err.is_validation() {
                    log::debug!("save aborted; err={err}");
                    return Ok(false);
                }

                return Err(err);
            }
        }

        self.persist(db, options.mode)?;
        Ok(true)
    }

    /// Save that treats a validation failure as an error.
    pub fn save_strict(&mut self, db: &Db) -> Result<()> {
        self.validate()?;
        self.persist(db, UpdateMode::Changed)
    }

    /// Discard in-memory changes and re-fetch the record and its built
    /// associations from storage. Both sides end with empty change sets.
    pub fn reload(&mut self, db: &Db) -> Result<()> {
        let Some(key) = self.key().cloned() else {
            return Err(Error::record_not_found(
                "cannot reload a record that was never saved",
            ));
        };

        let record = db.fetch(self.model, &key)?;
        self.row = record.fields;
        self.changes.clear();
        self.persisted = true;

        self.hydrate_parents(db)?;

        log::debug!("reloaded; model={} key={key}", self.model_name());
        Ok(())
    }

    /// Resolve each association from its stored foreign key. An already
    /// built parent is refreshed in place so its identity is preserved; a
    /// null foreign key clears the slot, discarding a never-saved parent.
    pub(crate) fn hydrate_parents(&mut self, db: &Db) -> Result<()> {
        let schema = self.schema.clone();
        let model = schema.model(self.model);

        for (index, association) in model.associations.iter().enumerate() {
            match self.row[association.foreign_key].as_id().cloned() {
                None => self.parents[index].clear(),
                Some(foreign_key) => {
                    let record = db.fetch(association.target, &foreign_key)?;

                    if let Some(parent) = self.parents[index].get() {
                        let mut parent = parent.borrow_mut();
                        parent.row = record.fields;
                        parent.changes.clear();
                        parent.persisted = true;
                    } else {
                        let parent =
                            Entity::load(self.schema.clone(), association.target, record)?;
                        self.parents[index].set(parent);
                    }
                }
            }
        }

        Ok(())
    }

    /// Required (non-nullable, non-auto) fields must hold a value, here and
    /// on every built autosave association. Runs before anything is written
    /// so a failing parent never leaves a half-persisted child.
    fn validate(&self) -> Result<()> {
        let model = self.schema.model(self.model);

        for (field, value) in model.fields.iter().zip(self.row.iter()) {
            if !field.nullable && !field.auto && value.is_null() {
                return Err(Error::validation(format!(
                    "`{}` on `{}` must not be null",
                    field.name, model.name
                )));
            }
        }

        for (index, association) in model.associations.iter().enumerate() {
            if !association.autosave {
                continue;
            }

            if let Some(parent) = self.parents[index].get() {
                parent.borrow().validate()?;
            }
        }

        Ok(())
    }

    fn persist(&mut self, db: &Db, mode: UpdateMode) -> Result<()> {
        let schema = self.schema.clone();
        let model = schema.model(self.model);

        // Autosave cascade: built parents are persisted first so their keys
        // exist when the foreign keys are assigned.
        for (index, association) in model.associations.iter().enumerate() {
            if !association.autosave {
                continue;
            }

            let Some(parent) = self.parents[index].get() else {
                continue;
            };

            parent.borrow_mut().persist(db, mode)?;

            let key = parent
                .borrow()
                .key()
                .cloned()
                .ok_or_else(|| err!("autosaved `{}` record has no key", association.name))?;

            if self.row[association.foreign_key] != Value::Id(key.clone()) {
                self.set_at(association.foreign_key, Value::Id(key))?;
            }
        }

        if self.persisted {
            let key = self
                .key()
                .cloned()
                .ok_or_else(|| err!("persisted `{}` record has no key", model.name))?;

            let assignments = self.update_assignments(mode);

            if !assignments.is_empty() {
                db.exec(
                    operation::UpdateByKey {
                        model: self.model,
                        key,
                        assignments,
                    }
                    .into(),
                )?;
            }
        } else {
            if self.row[model.primary_key].is_null() && model.primary_key_field().auto {
                self.row[model.primary_key] = Value::Id(Id::generate(self.model));
            }

            db.exec(
                operation::Insert {
                    model: self.model,
                    row: ValueRecord::from_vec(self.row.clone()),
                }
                .into(),
            )?;

            self.persisted = true;
        }

        self.changes.clear();
        log::debug!("saved; model={} key={:?}", model.name, self.key());
        Ok(())
    }

    fn update_assignments(&self, mode: UpdateMode) -> Assignments {
        let model = self.schema.model(self.model);
        let mut assignments = Assignments::default();

        match mode {
            UpdateMode::Changed => {
                for (index, _) in self.changes.iter() {
                    if index == model.primary_key {
                        continue;
                    }

                    assignments.set(index, self.row[index].clone());
                }
            }
            UpdateMode::Full => {
                for (index, value) in self.row.iter().enumerate() {
                    if index == model.primary_key {
                        continue;
                    }

                    assignments.set(index, value.clone());
                }
            }
        }

        assignments
    }
}
