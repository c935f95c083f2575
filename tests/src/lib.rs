#[macro_use]
mod macros;

use attache::schema::{Delegated, Model};
use attache::stmt::Type;

pub use attache::{stmt::Value, Db, Entity, Mem, SaveOptions, UpdateMode};

/// Schema shared by most delegation tests: `users` delegates its contact
/// attributes to a lazily built `contacts` record.
pub fn users_db() -> Db {
    init_logging();

    Db::builder()
        .register(
            Model::builder("contacts")
                .id()
                .field("firstname", Type::String)
                .field("lastname", Type::String)
                .bookkeeping_field("created_at", Type::I64)
                .bookkeeping_field("updated_at", Type::I64),
        )
        .register(
            Model::builder("users")
                .id()
                .field("login", Type::String)
                .belongs_to("contact", "contacts")
                .delegates_attributes_to("contact", Delegated::all()),
        )
        .build(Mem::new())
        .unwrap()
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Save options for a given update mode, validation on.
pub fn mode_options(mode: UpdateMode) -> SaveOptions {
    SaveOptions {
        validate: true,
        mode,
    }
}
