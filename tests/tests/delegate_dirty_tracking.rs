//! Change-tracking queries forwarded through the delegation mapping, against
//! a built association holding unsaved values.

use tests::*;

use pretty_assertions::assert_eq;

fn user_with_contact(db: &Db) -> Entity {
    let mut user = db.entity("users").unwrap();

    let contact = user.build_parent("contact").unwrap();
    contact
        .borrow_mut()
        .set_attribute("firstname", "John")
        .unwrap();
    contact
        .borrow_mut()
        .set_attribute("lastname", "Smith")
        .unwrap();

    user
}

#[test]
fn the_user_reports_changed() {
    let db = users_db();
    let user = user_with_contact(&db);

    assert!(user.changed());
}

#[test]
fn the_contact_reports_changed() {
    let db = users_db();
    let user = user_with_contact(&db);

    let contact = user.parent("contact").unwrap().unwrap();
    assert!(contact.borrow().changed());
}

#[test]
fn reads_go_through_the_association() {
    let db = users_db();
    let user = user_with_contact(&db);

    assert_eq!(user.attribute("firstname").unwrap(), Value::from("John"));
    assert_eq!(user.attribute("lastname").unwrap(), Value::from("Smith"));
}

#[test]
fn change_pairs_original_with_current() {
    let db = users_db();
    let user = user_with_contact(&db);

    assert!(user.attribute_changed("firstname").unwrap());
    assert_eq!(
        user.attribute_change("firstname").unwrap(),
        Some((Value::Null, Value::from("John")))
    );
}

#[test]
fn was_is_null_for_a_new_contact() {
    let db = users_db();
    let user = user_with_contact(&db);

    assert_eq!(user.attribute_was("firstname").unwrap(), Value::Null);
}

#[test]
fn will_change_on_an_existing_value_pairs_it_with_itself() {
    let db = users_db();
    let mut user = user_with_contact(&db);
    user.save_strict(&db).unwrap();

    user.attribute_will_change("firstname").unwrap();

    assert_eq!(
        user.attribute_change("firstname").unwrap(),
        Some((Value::from("John"), Value::from("John")))
    );
}

#[test]
fn will_change_on_a_dirty_attribute_rebases_the_original() {
    let db = users_db();
    let mut user = db.entity("users").unwrap();

    user.set_attribute("firstname", "John").unwrap();
    user.attribute_will_change("firstname").unwrap();

    assert_eq!(
        user.attribute_change("firstname").unwrap(),
        Some((Value::from("John"), Value::from("John")))
    );
}

#[test]
fn will_change_with_no_contact_pairs_null_with_null() {
    let db = users_db();
    let mut user = db.entity("users").unwrap();

    user.attribute_will_change("firstname").unwrap();

    assert_eq!(
        user.attribute_change("firstname").unwrap(),
        Some((Value::Null, Value::Null))
    );
}

#[test]
fn changed_attributes_merges_delegated_entries() {
    let db = users_db();
    let mut user = db.entity("users").unwrap();

    user.set_attribute("firstname", "John").unwrap();

    let changed = user.changed_attributes();
    assert_eq!(changed.len(), 1);
    assert_eq!(changed.get("firstname"), Some(&Value::Null));

    let contact = user.parent("contact").unwrap().unwrap();
    assert_eq!(contact.borrow().changed_attributes().len(), 1);
}

#[test]
fn own_fields_track_their_own_changes() {
    let db = users_db();
    let mut user = db.entity("users").unwrap();

    assert!(!user.attribute_changed("login").unwrap());

    user.set_attribute("login", "jsmith").unwrap();

    assert!(user.attribute_changed("login").unwrap());
    assert_eq!(
        user.attribute_change("login").unwrap(),
        Some((Value::Null, Value::from("jsmith")))
    );
    assert_eq!(user.attribute_was("login").unwrap(), Value::Null);
    assert_none!(user.parent("contact").unwrap());
}

#[test]
fn writing_the_original_value_back_re_cleans_the_attribute() {
    let db = users_db();
    let mut user = db.entity("users").unwrap();

    user.set_attribute("login", "jsmith").unwrap();
    assert!(user.attribute_changed("login").unwrap());

    user.set_attribute("login", Value::Null).unwrap();

    assert!(!user.attribute_changed("login").unwrap());
    assert!(!user.changed());
}

#[test]
fn a_delegated_write_back_to_the_original_re_cleans() {
    let db = users_db();
    let mut user = user_with_contact(&db);
    user.save_strict(&db).unwrap();

    user.set_attribute("firstname", "Bob").unwrap();
    assert!(user.attribute_changed("firstname").unwrap());

    user.set_attribute("firstname", "John").unwrap();

    assert!(!user.attribute_changed("firstname").unwrap());
    assert!(!user.changed());
}

#[test]
fn rewriting_the_same_value_stays_clean() {
    let db = users_db();
    let mut user = db.entity("users").unwrap();

    user.set_attribute("login", Value::Null).unwrap();

    assert!(!user.attribute_changed("login").unwrap());
}
