use httpmock::prelude::*;
use listing_desk::app::commands::{self, TableArgs};
use listing_desk::{BackofficeClient, DeskError, LocalStateStore, Settings};
use tempfile::TempDir;

fn settings_for(server: &MockServer, dir: &TempDir) -> Settings {
    Settings {
        api_base_url: server.base_url(),
        state_dir: dir.path().to_str().unwrap().to_string(),
        page_size: 25,
        timeout_secs: 5,
        auth_token: None,
    }
}

fn client_for(settings: &Settings) -> BackofficeClient {
    BackofficeClient::new(&settings.api_base_url, settings.timeout_secs, None).unwrap()
}

fn empty_listings_body() -> serde_json::Value {
    serde_json::json!({ "items": [], "total": 0, "page": 1, "page_size": 25 })
}

#[tokio::test]
async fn batch_uses_the_saved_selection_and_expands_it() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/api/listings");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(empty_listings_body());
    });
    let batch_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/batch-view")
            .json_body(serde_json::json!({ "skus": ["AB001", "AB002", "AB003"] }));
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({ "batch_id": "bv-42" }));
    });

    let settings = settings_for(&server, &temp_dir);
    let store = LocalStateStore::new(settings.state_dir.clone());
    let api = client_for(&settings);

    // checking rows on the listings page saves the selection
    commands::listings_page(
        &api,
        &store,
        &settings,
        &TableArgs::default(),
        &[],
        &[],
        &["AB001-AB003".to_string(), "AB002".to_string()],
    )
    .await
    .unwrap();

    let handoff = commands::batch_command(&api, &store, &settings, &[])
        .await
        .unwrap();

    batch_mock.assert();
    assert_eq!(handoff.batch_id, "bv-42");
    assert_eq!(handoff.skus, vec!["AB001", "AB002", "AB003"]);
}

#[tokio::test]
async fn explicit_skus_bypass_the_saved_selection() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start();

    let batch_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/batch-view")
            .json_body(serde_json::json!({ "skus": ["X1", "X2"] }));
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({ "batch_id": "bv-7" }));
    });

    let settings = settings_for(&server, &temp_dir);
    let store = LocalStateStore::new(settings.state_dir.clone());
    let api = client_for(&settings);

    let handoff = commands::batch_command(&api, &store, &settings, &["X1,X2".to_string()])
        .await
        .unwrap();

    batch_mock.assert();
    assert_eq!(handoff.skus, vec!["X1", "X2"]);
}

#[tokio::test]
async fn empty_selection_aborts_before_any_request() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start();

    let batch_mock = server.mock(|when, then| {
        when.method(POST).path("/api/batch-view");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({ "batch_id": "bv-0" }));
    });

    let settings = settings_for(&server, &temp_dir);
    let store = LocalStateStore::new(settings.state_dir.clone());
    let api = client_for(&settings);

    let err = commands::batch_command(&api, &store, &settings, &[])
        .await
        .unwrap_err();

    assert!(matches!(err, DeskError::EmptySelection));
    batch_mock.assert_hits(0);
}

#[tokio::test]
async fn generate_expands_ranges_before_requesting_metadata() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start();

    let generate_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/metadata/generate")
            .json_body(serde_json::json!({ "skus": ["A1", "A2", "A3"] }));
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "generated": [
                    { "sku": "A1", "title": "Generated title A1", "keywords": [] },
                    { "sku": "A2", "title": "Generated title A2", "keywords": [] }
                ],
                "failures": [
                    { "sku": "A3", "reason": "no product data" }
                ]
            }));
    });

    let settings = settings_for(&server, &temp_dir);
    let store = LocalStateStore::new(settings.state_dir.clone());
    let api = client_for(&settings);

    let report = commands::generate_command(&api, &store, &settings, &["A1-A3".to_string()])
        .await
        .unwrap();

    generate_mock.assert();
    assert_eq!(report.generated.len(), 2);
    assert_eq!(report.failures.len(), 1);
}
