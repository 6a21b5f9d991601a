//! End-to-end flows through the query builder, executor, and memory backend.

use credstore::{
    AttributeKey, MemoryBackend, Payload, ReturnFlag, StatusKind, Value, ValueKey,
    GENERIC_PASSWORD, INTERNET_PASSWORD,
};

#[test]
fn test_save_search_update_delete_roundtrip() {
    let backend = MemoryBackend::new();
    let base = GENERIC_PASSWORD
        .query()
        .with_service("Service")
        .with_account("Account");

    // Save.
    base.for_save()
        .with_label("Label")
        .value_data("1234")
        .execute(&backend)
        .expect("save");

    // Search returns the saved payload.
    let found = base
        .for_search()
        .set_return(ReturnFlag::Data, true)
        .execute(&backend)
        .expect("search");
    assert_eq!(found.data, Some(Payload::from("1234")));

    // Update account and payload through the second mapping.
    base.for_update()
        .set_attribute_to_update(AttributeKey::Account, Value::Text("NewAccount".to_string()))
        .set_value_to_update(ValueKey::Data, Value::Bytes(Payload::from("5678")))
        .execute(&backend)
        .expect("update");

    // The old selector no longer matches, the new one does.
    let err = base
        .for_search()
        .set_return(ReturnFlag::Data, true)
        .execute(&backend)
        .unwrap_err();
    assert_eq!(err.kind(), StatusKind::ItemNotFound);

    let renamed = GENERIC_PASSWORD
        .query()
        .with_service("Service")
        .with_account("NewAccount");
    let found = renamed
        .for_search()
        .set_return(ReturnFlag::Data, true)
        .execute(&backend)
        .expect("search after update");
    assert_eq!(found.data, Some(Payload::from("5678")));

    // Delete, then search reports the distinguished absence.
    renamed.for_delete().execute(&backend).expect("delete");
    let err = renamed.for_search().execute(&backend).unwrap_err();
    assert_eq!(err.kind(), StatusKind::ItemNotFound);
}

#[test]
fn test_duplicate_add_surfaces_duplicate_item() {
    let backend = MemoryBackend::new();
    let save = GENERIC_PASSWORD
        .save_query()
        .with_service("Service")
        .with_account("Account")
        .value_data("first");

    save.execute(&backend).expect("first add");
    let err = save.execute(&backend).unwrap_err();
    assert_eq!(err.kind(), StatusKind::DuplicateItem);
    assert!(err.status().is_some());
}

#[test]
fn test_upsert_replaces_instead_of_conflicting() {
    let backend = MemoryBackend::new();
    let base = GENERIC_PASSWORD
        .query()
        .with_service("Service")
        .with_account("Account");

    base.for_save()
        .value_data("first")
        .execute_upsert(&backend)
        .expect("first upsert");
    base.for_save()
        .value_data("second")
        .execute_upsert(&backend)
        .expect("second upsert");

    let found = base
        .for_search()
        .set_return(ReturnFlag::Data, true)
        .execute(&backend)
        .expect("search");
    assert_eq!(found.data, Some(Payload::from("second")));
}

#[test]
fn test_delete_of_absent_item_is_success() {
    let backend = MemoryBackend::new();
    GENERIC_PASSWORD
        .delete_query()
        .with_service("Service")
        .with_account("nobody")
        .execute(&backend)
        .expect("idempotent delete");
}

#[test]
fn test_update_rename_onto_existing_item_is_duplicate() {
    let backend = MemoryBackend::new();
    for account in ["alice", "bob"] {
        GENERIC_PASSWORD
            .save_query()
            .with_service("Service")
            .with_account(account)
            .value_data("pw")
            .execute(&backend)
            .expect("save");
    }

    let err = GENERIC_PASSWORD
        .update_query()
        .with_service("Service")
        .with_account("alice")
        .set_attribute_to_update(AttributeKey::Account, Value::Text("bob".to_string()))
        .execute(&backend)
        .unwrap_err();
    assert_eq!(err.kind(), StatusKind::DuplicateItem);

    // The colliding update left both items intact.
    GENERIC_PASSWORD
        .search_query()
        .with_service("Service")
        .with_account("alice")
        .execute(&backend)
        .expect("alice untouched");
}

#[test]
fn test_update_without_match_is_item_not_found() {
    let backend = MemoryBackend::new();
    let err = GENERIC_PASSWORD
        .update_query()
        .with_account("ghost")
        .set_attribute_to_update(AttributeKey::Label, Value::Text("x".to_string()))
        .execute(&backend)
        .unwrap_err();
    assert_eq!(err.kind(), StatusKind::ItemNotFound);
}

#[test]
fn test_save_without_identifying_attributes_is_missing_attribute() {
    let backend = MemoryBackend::new();
    let err = GENERIC_PASSWORD
        .save_query()
        .value_data("orphan")
        .execute(&backend)
        .unwrap_err();
    assert_eq!(err.kind(), StatusKind::MissingRequiredAttribute);
    assert!(err.message().is_some());
}

#[test]
fn test_untyped_null_never_reaches_the_backend() {
    // A loosely-typed null is rejected at conversion time, before any
    // builder or backend is involved.
    let err = Value::from_untyped(&serde_json::Value::Null).unwrap_err();
    assert_eq!(err.kind(), StatusKind::MissingRequiredAttribute);
    assert!(err.status().is_none());

    // A well-typed loose input flows through the whole pipeline.
    let backend = MemoryBackend::new();
    let account = Value::from_untyped(&serde_json::json!("loose-account")).unwrap();
    GENERIC_PASSWORD
        .save_query()
        .with_service("Service")
        .set_attribute(AttributeKey::Account, account.clone())
        .value_data("ok")
        .execute(&backend)
        .expect("save with converted value");

    let found = GENERIC_PASSWORD
        .search_query()
        .with_service("Service")
        .set_attribute(AttributeKey::Account, account)
        .set_return(ReturnFlag::Data, true)
        .execute(&backend)
        .expect("search with converted value");
    assert_eq!(found.data, Some(Payload::from("ok")));
}

#[test]
fn test_categories_do_not_observe_each_other() {
    let backend = MemoryBackend::new();
    GENERIC_PASSWORD
        .save_query()
        .with_service("Service")
        .with_account("alice")
        .value_data("generic")
        .execute(&backend)
        .expect("save generic");

    let err = INTERNET_PASSWORD
        .search_query()
        .with_account("alice")
        .execute(&backend)
        .unwrap_err();
    assert_eq!(err.kind(), StatusKind::ItemNotFound);
}

#[test]
fn test_search_can_return_attributes_and_references() {
    let backend = MemoryBackend::new();
    INTERNET_PASSWORD
        .save_query()
        .with_server("example.com")
        .with_account("alice")
        .with_port(443)
        .value_data("pw")
        .execute(&backend)
        .expect("save");

    let found = INTERNET_PASSWORD
        .search_query()
        .with_server("example.com")
        .set_return(ReturnFlag::Attributes, true)
        .set_return(ReturnFlag::Reference, true)
        .set_return(ReturnFlag::PersistentReference, true)
        .execute(&backend)
        .expect("search");

    assert!(found.data.is_none());
    let attributes = found.attributes.expect("attributes requested");
    assert_eq!(
        attributes.get(&AttributeKey::Port),
        Some(&Value::Integer(443))
    );
    assert!(found.reference.is_some());
    assert!(found.persistent_reference.is_some());
}
