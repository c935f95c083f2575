//! Saving a user cascades to the built contact and clears the dirty state on
//! both sides, under both update modes.

use tests::*;

use pretty_assertions::assert_eq;

fn save_clears_changes(options: SaveOptions) {
    let db = users_db();
    let mut user = db.entity("users").unwrap();

    user.set_attribute("firstname", "John").unwrap();
    assert_eq!(user.changed_attributes().len(), 1);

    let contact = user.parent("contact").unwrap().unwrap();
    assert_eq!(contact.borrow().changed_attributes().len(), 1);

    assert!(user.save_with(&db, options).unwrap());

    assert_eq!(user.changed_attributes().len(), 0);
    assert_eq!(contact.borrow().changed_attributes().len(), 0);
    assert!(!user.changed());
}

#[test]
fn save_clears_changes_with_partial_updates() {
    save_clears_changes(mode_options(UpdateMode::Changed));
}

#[test]
fn save_clears_changes_with_full_updates() {
    save_clears_changes(mode_options(UpdateMode::Full));
}

#[test]
fn save_without_validation_clears_changes() {
    save_clears_changes(SaveOptions {
        validate: false,
        mode: UpdateMode::Changed,
    });
}

#[test]
fn save_strict_clears_changes() {
    let db = users_db();
    let mut user = db.entity("users").unwrap();

    user.set_attribute("firstname", "John").unwrap();
    let contact = user.parent("contact").unwrap().unwrap();

    user.save_strict(&db).unwrap();

    assert_eq!(user.changed_attributes().len(), 0);
    assert_eq!(contact.borrow().changed_attributes().len(), 0);
}

#[test]
fn saving_assigns_keys_to_both_records() {
    let db = users_db();
    let mut user = db.entity("users").unwrap();

    user.set_attribute("firstname", "John").unwrap();
    assert_none!(user.key());

    user.save_strict(&db).unwrap();

    assert!(user.key().is_some());
    assert!(user.is_persisted());

    let contact = user.parent("contact").unwrap().unwrap();
    assert!(contact.borrow().key().is_some());
    assert!(contact.borrow().is_persisted());
    assert_eq!(
        user.attribute("contact_id").unwrap(),
        Value::Id(contact.borrow().key().cloned().unwrap())
    );
}

#[test]
fn saving_a_clean_persisted_user_is_a_no_op() {
    let db = users_db();
    let mut user = db.entity("users").unwrap();

    user.set_attribute("firstname", "John").unwrap();
    user.save_strict(&db).unwrap();

    assert!(user.save(&db).unwrap());
    assert!(!user.changed());
}
