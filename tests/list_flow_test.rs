mod common;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use common::{product_json, ScriptedPrompt, TestApp};
use produtos_console::models::ProductId;
use produtos_console::viewmodel::{DeleteOutcome, ListPhase};

#[tokio::test]
async fn refresh_replaces_the_rows_wholesale() {
    let app = TestApp::spawn().await;
    app.mount_catalog(
        json!([
            product_json(1, "Café", 12.5, 3),
            product_json(2, "Erva Mate", 8.9, 0),
        ]),
        Some(1),
    )
    .await;
    app.mount_catalog(json!([product_json(2, "Erva Mate", 8.9, 0)]), None)
        .await;

    let mut list = app.list_model(ScriptedPrompt::answering(true));

    list.refresh().await;
    assert_eq!(*list.phase(), ListPhase::Loaded);
    assert_eq!(list.products().len(), 2);

    list.refresh().await;
    assert_eq!(*list.phase(), ListPhase::Loaded);
    assert_eq!(list.products().len(), 1);
    assert_eq!(list.products()[0].id, ProductId(2));
}

#[tokio::test]
async fn refresh_is_idempotent_without_server_changes() {
    let app = TestApp::spawn().await;
    app.mount_catalog(
        json!([
            product_json(1, "Café", 12.5, 3),
            product_json(2, "Erva Mate", 8.9, 0),
        ]),
        None,
    )
    .await;

    let mut list = app.list_model(ScriptedPrompt::answering(true));

    list.refresh().await;
    let first: Vec<_> = list.products().to_vec();
    list.refresh().await;

    assert_eq!(list.products(), first.as_slice());
    assert_eq!(*list.phase(), ListPhase::Loaded);
}

#[tokio::test]
async fn failed_refresh_keeps_the_stale_rows() {
    let app = TestApp::spawn().await;
    app.mount_catalog(
        json!([
            product_json(1, "Café", 12.5, 3),
            product_json(2, "Erva Mate", 8.9, 0),
        ]),
        Some(1),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/api/produtos/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&app.server)
        .await;

    let mut list = app.list_model(ScriptedPrompt::answering(true));

    list.refresh().await;
    assert_eq!(list.products().len(), 2);

    list.refresh().await;
    let message = list.error_message().expect("refresh should have failed");
    assert!(message.starts_with("Failed to load products:"), "{message}");
    assert_eq!(list.products().len(), 2, "stale rows must survive");
}

#[tokio::test]
async fn recovery_after_a_failed_refresh() {
    let app = TestApp::spawn().await;
    Mock::given(method("GET"))
        .and(path("/api/produtos/"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&app.server)
        .await;
    app.mount_catalog(json!([product_json(1, "Café", 12.5, 3)]), None)
        .await;

    let mut list = app.list_model(ScriptedPrompt::answering(true));

    list.refresh().await;
    assert!(list.error_message().is_some());

    list.refresh().await;
    assert_eq!(*list.phase(), ListPhase::Loaded);
    assert_eq!(list.products().len(), 1);
}

#[tokio::test]
async fn confirmed_delete_refetches_the_catalog() {
    let app = TestApp::spawn().await;
    app.mount_catalog(
        json!([
            product_json(1, "Café", 12.5, 3),
            product_json(2, "Erva Mate", 8.9, 0),
        ]),
        Some(1),
    )
    .await;
    Mock::given(method("DELETE"))
        .and(path("/api/produtos/1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&app.server)
        .await;
    app.mount_catalog(json!([product_json(2, "Erva Mate", 8.9, 0)]), None)
        .await;

    let prompt = ScriptedPrompt::answering(true);
    let mut list = app.list_model(prompt.clone());

    list.refresh().await;
    let outcome = list.request_delete(ProductId(1)).await;

    assert_eq!(outcome, DeleteOutcome::Deleted);
    assert_eq!(
        prompt.questions(),
        vec!["Are you sure you want to delete the product \"Café\"?".to_string()]
    );
    assert_eq!(*list.phase(), ListPhase::Loaded);
    assert_eq!(list.products().len(), 1);
    assert_eq!(list.products()[0].id, ProductId(2));
}

#[tokio::test]
async fn declined_delete_never_reaches_the_service() {
    let app = TestApp::spawn().await;
    app.mount_catalog(json!([product_json(1, "Café", 12.5, 3)]), None)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/produtos/1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&app.server)
        .await;

    let mut list = app.list_model(ScriptedPrompt::answering(false));

    list.refresh().await;
    let outcome = list.request_delete(ProductId(1)).await;

    assert_eq!(outcome, DeleteOutcome::Declined);
    assert_eq!(list.products().len(), 1);
    assert_eq!(*list.phase(), ListPhase::Loaded);
}

#[tokio::test]
async fn failed_delete_keeps_the_rows_and_reports() {
    let app = TestApp::spawn().await;
    app.mount_catalog(json!([product_json(1, "Café", 12.5, 3)]), None)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/produtos/1"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&app.server)
        .await;

    let mut list = app.list_model(ScriptedPrompt::answering(true));

    list.refresh().await;
    let outcome = list.request_delete(ProductId(1)).await;

    assert_eq!(outcome, DeleteOutcome::Failed);
    let message = list.error_message().expect("delete should have failed");
    assert!(message.starts_with("Failed to delete product:"), "{message}");
    assert_eq!(list.products().len(), 1);
}

#[tokio::test]
async fn delete_after_refetch_sees_the_current_catalog() {
    // A product deleted elsewhere disappears on refresh; deleting it then
    // reports an unknown id without any HTTP traffic.
    let app = TestApp::spawn().await;
    app.mount_catalog(json!([product_json(1, "Café", 12.5, 3)]), Some(1))
        .await;
    app.mount_catalog(json!([]), None).await;

    let mut list = app.list_model(ScriptedPrompt::answering(true));

    list.refresh().await;
    assert_eq!(list.products().len(), 1);

    list.refresh().await;
    assert_eq!(*list.phase(), ListPhase::Loaded, "empty catalog is not an error");
    assert!(list.products().is_empty());

    let outcome = list.request_delete(ProductId(1)).await;
    assert_eq!(outcome, DeleteOutcome::UnknownId);
}
