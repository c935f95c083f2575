//! Reading delegated attributes before any association exists: every getter
//! yields the neutral value and nothing reports dirty.

use tests::*;

use pretty_assertions::assert_eq;

#[test]
fn reading_with_no_contact_yields_null() {
    let db = users_db();
    let user = db.entity("users").unwrap();

    assert_eq!(user.attribute("firstname").unwrap(), Value::Null);
    assert_eq!(user.attribute("lastname").unwrap(), Value::Null);
}

#[test]
fn was_is_null_with_no_contact() {
    let db = users_db();
    let user = db.entity("users").unwrap();

    assert_eq!(user.attribute_was("firstname").unwrap(), Value::Null);
}

#[test]
fn nothing_is_changed_with_no_contact() {
    let db = users_db();
    let user = db.entity("users").unwrap();

    assert!(!user.attribute_changed("firstname").unwrap());
    assert_none!(user.attribute_change("firstname").unwrap());
    assert!(!user.changed());
    assert_eq!(user.changed_attributes().len(), 0);
}

#[test]
fn the_association_slot_stays_empty_on_reads() {
    let db = users_db();
    let user = db.entity("users").unwrap();

    user.attribute("firstname").unwrap();
    user.attribute_was("firstname").unwrap();
    assert_none!(user.parent("contact").unwrap());
}

#[test]
fn unknown_attribute_is_a_schema_error() {
    let db = users_db();
    let user = db.entity("users").unwrap();

    let err = assert_err!(user.attribute("nickname"));
    assert!(err.is_schema(), "{err}");
}
