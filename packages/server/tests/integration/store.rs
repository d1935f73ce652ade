use std::time::Duration;

use sea_orm::{DbBackend, FromQueryResult, Statement};
use serde_json::{Value, json};
use starter_server::database::ensure_indexes;
use starter_server::store::{ExampleFields, ExamplePatch, ExampleStore};

use crate::common::TestApp;

fn fields(title: &str) -> ExampleFields {
    ExampleFields {
        title: title.to_string(),
        description: Some("desc".into()),
        content: "content".into(),
        metadata: json!({ "k": "v" }),
    }
}

#[tokio::test]
async fn create_assigns_id_and_equal_timestamps() {
    let app = TestApp::spawn().await;
    let store = ExampleStore::new(&app.db);

    let a = store.create(fields("a")).await.unwrap();
    let b = store.create(fields("b")).await.unwrap();

    assert!(!a.id.is_empty());
    assert_ne!(a.id, b.id);
    assert_eq!(a.created_at, a.updated_at);
    assert_eq!(store.get(&a.id).await.unwrap(), Some(a));
}

#[tokio::test]
async fn list_applies_offset_and_limit_to_newest_first() {
    let app = TestApp::spawn().await;
    let store = ExampleStore::new(&app.db);
    let mut ids = Vec::new();
    for i in 0..4 {
        ids.push(store.create(fields(&format!("e{i}"))).await.unwrap().id);
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    let (items, total) = store.list(1, 2).await.unwrap();

    assert_eq!(total, 4);
    let got: Vec<_> = items.into_iter().map(|m| m.id).collect();
    assert_eq!(got, vec![ids[2].clone(), ids[1].clone()]);
}

#[tokio::test]
async fn update_replaces_fields_and_keeps_created_at() {
    let app = TestApp::spawn().await;
    let store = ExampleStore::new(&app.db);
    let original = store.create(fields("before")).await.unwrap();
    tokio::time::sleep(Duration::from_millis(5)).await;

    let updated = store
        .update(
            &original.id,
            ExampleFields {
                title: "after".into(),
                description: None,
                content: "new".into(),
                metadata: json!({}),
            },
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.title, "after");
    assert_eq!(updated.description, None);
    assert_eq!(updated.created_at, original.created_at);
    assert!(updated.updated_at > original.updated_at);
}

#[tokio::test]
async fn patch_writes_only_present_fields() {
    let app = TestApp::spawn().await;
    let store = ExampleStore::new(&app.db);
    let original = store.create(fields("title")).await.unwrap();

    let patched = store
        .patch(
            &original.id,
            ExamplePatch {
                content: Some("patched".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(patched.content, "patched");
    assert_eq!(patched.title, original.title);
    assert_eq!(patched.description, original.description);
    assert_eq!(patched.metadata, original.metadata);
}

#[tokio::test]
async fn missing_rows_are_reported_not_errors() {
    let app = TestApp::spawn().await;
    let store = ExampleStore::new(&app.db);

    assert_eq!(store.get("missing").await.unwrap(), None);
    assert_eq!(store.update("missing", fields("x")).await.unwrap(), None);
    assert_eq!(
        store
            .patch("missing", ExamplePatch::default())
            .await
            .unwrap(),
        None
    );
    assert!(!store.delete("missing").await.unwrap());
}

#[tokio::test]
async fn delete_is_a_hard_delete() {
    let app = TestApp::spawn().await;
    let store = ExampleStore::new(&app.db);
    let model = store.create(fields("gone")).await.unwrap();

    assert!(store.delete(&model.id).await.unwrap());

    assert_eq!(store.get(&model.id).await.unwrap(), None);
    let (_, total) = store.list(0, 10).await.unwrap();
    assert_eq!(total, 0);
}

#[tokio::test]
async fn listing_index_exists_and_ensure_is_repeatable() {
    let app = TestApp::spawn().await;
    let find_index = || {
        Value::find_by_statement(Statement::from_string(
            DbBackend::Sqlite,
            "SELECT name FROM sqlite_master WHERE type = 'index' AND name = 'idx_example_created_at'",
        ))
        .one(&app.db)
    };

    assert!(find_index().await.unwrap().is_some());

    ensure_indexes(&app.db).await;

    assert!(find_index().await.unwrap().is_some());
}
