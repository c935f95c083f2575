//! Delegation configuration is resolved and validated when the schema is
//! built, never at attribute access time.

use tests::*;

use attache::schema::{Delegated, Model};
use attache::stmt::Type;

use pretty_assertions::assert_eq;

#[test]
fn delegation_forces_autosave_on_the_association() {
    let db = users_db();

    let users = db.schema().model_by_name("users").unwrap();
    let (_, association) = users.association_by_name("contact").unwrap();
    assert!(association.autosave);
}

#[test]
fn derived_attribute_set_excludes_plumbing_columns() {
    let db = users_db();

    let users = db.schema().model_by_name("users").unwrap();
    let delegated: Vec<_> = users.delegated_attributes().collect();

    // Primary key, bookkeeping, and foreign-key columns are rejected by
    // default.
    assert_eq!(delegated, vec!["firstname", "lastname"]);
}

#[test]
fn caller_rejects_narrow_the_derived_set() {
    let db = Db::builder()
        .register(
            Model::builder("contacts")
                .id()
                .field("firstname", Type::String)
                .field("lastname", Type::String),
        )
        .register(
            Model::builder("users")
                .id()
                .belongs_to("contact", "contacts")
                .delegates_attributes_to("contact", Delegated::all().reject(["lastname"])),
        )
        .build(Mem::new())
        .unwrap();

    let users = db.schema().model_by_name("users").unwrap();
    let delegated: Vec<_> = users.delegated_attributes().collect();
    assert_eq!(delegated, vec!["firstname"]);
}

#[test]
fn explicit_attribute_list_is_used_verbatim() {
    let db = Db::builder()
        .register(
            Model::builder("contacts")
                .id()
                .field("firstname", Type::String)
                .field("lastname", Type::String),
        )
        .register(
            Model::builder("users")
                .id()
                .belongs_to("contact", "contacts")
                .delegates_attributes_to("contact", Delegated::only(["lastname"])),
        )
        .build(Mem::new())
        .unwrap();

    let users = db.schema().model_by_name("users").unwrap();
    let delegated: Vec<_> = users.delegated_attributes().collect();
    assert_eq!(delegated, vec!["lastname"]);
}

#[test]
fn unknown_association_fails_the_build() {
    let err = assert_err!(Db::builder()
        .register(Model::builder("contacts").id())
        .register(
            Model::builder("users")
                .id()
                .delegates_attributes_to("contact", Delegated::all()),
        )
        .build(Mem::new()));

    assert!(err.is_schema(), "{err}");
}

#[test]
fn unknown_attribute_fails_the_build() {
    let err = assert_err!(Db::builder()
        .register(Model::builder("contacts").id())
        .register(
            Model::builder("users")
                .id()
                .belongs_to("contact", "contacts")
                .delegates_attributes_to("contact", Delegated::only(["nickname"])),
        )
        .build(Mem::new()));

    assert!(err.is_schema(), "{err}");
}

#[test]
fn colliding_attribute_fails_the_build() {
    let err = assert_err!(Db::builder()
        .register(Model::builder("contacts").id().field("login", Type::String))
        .register(
            Model::builder("users")
                .id()
                .field("login", Type::String)
                .belongs_to("contact", "contacts")
                .delegates_attributes_to("contact", Delegated::all()),
        )
        .build(Mem::new()));

    assert!(err.is_schema(), "{err}");
}
