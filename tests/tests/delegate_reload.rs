//! Reload re-fetches both sides, discards unsaved values, and leaves both
//! change sets empty.

use tests::*;

use pretty_assertions::assert_eq;
use std::rc::Rc;

#[test]
fn reload_discards_unsaved_delegated_changes() {
    let db = users_db();
    let mut user = db.entity("users").unwrap();

    user.set_attribute("firstname", "John").unwrap();
    user.save_strict(&db).unwrap();

    user.set_attribute("firstname", "Bob").unwrap();
    assert_eq!(user.changed_attributes().len(), 1);

    let contact = user.parent("contact").unwrap().unwrap();
    assert_eq!(contact.borrow().changed_attributes().len(), 1);

    user.reload(&db).unwrap();

    assert_eq!(user.attribute("firstname").unwrap(), Value::from("John"));
    assert_eq!(user.changed_attributes().len(), 0);
    assert_eq!(contact.borrow().changed_attributes().len(), 0);
}

#[test]
fn reload_preserves_the_contact_identity() {
    let db = users_db();
    let mut user = db.entity("users").unwrap();

    user.set_attribute("firstname", "John").unwrap();
    user.save_strict(&db).unwrap();
    let before = user.parent("contact").unwrap().unwrap();

    user.reload(&db).unwrap();
    let after = user.parent("contact").unwrap().unwrap();

    assert!(Rc::ptr_eq(&before, &after));
}

#[test]
fn reload_drops_a_never_saved_contact() {
    let db = users_db();
    let mut user = db.entity("users").unwrap();

    user.set_attribute("login", "jsmith").unwrap();
    user.save_strict(&db).unwrap();

    // Builds an in-memory contact that is never persisted.
    user.set_attribute("firstname", "Bob").unwrap();
    assert!(user.parent("contact").unwrap().is_some());

    user.reload(&db).unwrap();

    assert_none!(user.parent("contact").unwrap());
    assert_eq!(user.attribute("firstname").unwrap(), Value::Null);
}

#[test]
fn reload_before_save_is_record_not_found() {
    let db = users_db();
    let mut user = db.entity("users").unwrap();

    let err = assert_err!(user.reload(&db));
    assert!(err.is_record_not_found(), "{err}");
}
