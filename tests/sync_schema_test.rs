use anyhow::Result;
use httpmock::prelude::*;
use listing_desk::app::commands;
use listing_desk::core::SyncKind;
use listing_desk::BackofficeClient;

fn client_for(server: &MockServer) -> Result<BackofficeClient> {
    Ok(BackofficeClient::new(&server.base_url(), 5, None)?)
}

#[tokio::test]
async fn sync_job_reports_counts_and_row_errors() -> Result<()> {
    let server = MockServer::start();
    let sync_mock = server.mock(|when, then| {
        when.method(POST).path("/api/sync/db-to-ebay");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "processed": 240,
                "created": 12,
                "updated": 226,
                "failed": 2,
                "errors": [
                    { "sku": "AB010", "reason": "listing ended on eBay" },
                    { "sku": "AB011", "reason": "missing category" }
                ]
            }));
    });

    let api = client_for(&server)?;
    let report = commands::sync_command(&api, SyncKind::DbToEbay).await?;

    sync_mock.assert();
    assert_eq!(report.processed, 240);
    assert_eq!(report.failed, 2);
    assert_eq!(report.errors[1].sku, "AB011");
    Ok(())
}

#[tokio::test]
async fn schema_lists_field_requirements() -> Result<()> {
    let server = MockServer::start();
    let schema_mock = server.mock(|when, then| {
        when.method(GET).path("/api/categories/625/schema");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "category_id": "625",
                "category_name": "Cameras & Photo",
                "fields": [
                    {
                        "name": "Brand",
                        "requirement": "required",
                        "data_type": "string",
                        "allowed_values": ["Canon", "Nikon", "Sony"],
                        "max_length": 65
                    },
                    {
                        "name": "Model",
                        "requirement": "recommended",
                        "data_type": "string"
                    }
                ]
            }));
    });

    let api = client_for(&server)?;
    let schema = commands::schema_command(&api, "625").await?;

    schema_mock.assert();
    assert_eq!(schema.category_name, "Cameras & Photo");
    assert_eq!(schema.fields.len(), 2);
    assert_eq!(schema.fields[0].allowed_values.len(), 3);
    assert!(schema.fields[1].allowed_values.is_empty());
    Ok(())
}

#[tokio::test]
async fn unknown_category_surfaces_backend_message() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/categories/999999/schema");
        then.status(404).body("category 999999 not cached");
    });

    let api = client_for(&server)?;
    let err = commands::schema_command(&api, "999999").await.unwrap_err();

    match err {
        listing_desk::DeskError::ApiStatusError { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "category 999999 not cached");
        }
        other => panic!("expected ApiStatusError, got {:?}", other),
    }
    Ok(())
}
