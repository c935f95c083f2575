mod changes;
pub use changes::ChangeSet;

pub mod db;
pub use db::Db;

mod entity;
pub use entity::Entity;

pub mod relation;
pub use relation::BelongsTo;

mod save;
pub use save::{SaveOptions, UpdateMode};

pub use attache_core::{driver, schema, stmt, Error, Result};

#[cfg(feature = "mem")]
pub use attache_driver_mem::Mem;
