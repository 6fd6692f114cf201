use crate::domain::model::{
    CategorySchema, Listing, MetadataReport, Page, SkuItem, SyncKind, SyncReport,
};
use crate::domain::ports::ListingApi;
use crate::utils::error::{DeskError, Result};
use async_trait::async_trait;
use reqwest::{header, Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

/// Thin client over the back-office REST API. One method per endpoint the
/// pages consume; no backend business logic lives here.
pub struct BackofficeClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct BatchViewResponse {
    batch_id: String,
}

impl BackofficeClient {
    pub fn new(base_url: &str, timeout_secs: u64, auth_token: Option<&str>) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        if let Some(token) = auth_token {
            let value = header::HeaderValue::from_str(&format!("Bearer {}", token)).map_err(
                |_| DeskError::InvalidConfigValueError {
                    field: "auth_token".to_string(),
                    value: "<redacted>".to_string(),
                    reason: "token contains characters not valid in a header".to_string(),
                },
            )?;
            headers.insert(header::AUTHORIZATION, value);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .default_headers(headers)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Non-2xx statuses become `ApiStatusError` carrying whatever message
    /// body the backend sent.
    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(DeskError::ApiStatusError {
                status: status.as_u16(),
                message: message.trim().to_string(),
            });
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl ListingApi for BackofficeClient {
    async fn fetch_listings(&self, query: &[(String, String)]) -> Result<Page<Listing>> {
        let url = self.url("/api/listings");
        tracing::debug!("GET {} with {} query params", url, query.len());
        let response = self.client.get(&url).query(query).send().await?;
        Self::decode(response).await
    }

    async fn fetch_inventory(&self, query: &[(String, String)]) -> Result<Page<SkuItem>> {
        let url = self.url("/api/inventory");
        tracing::debug!("GET {} with {} query params", url, query.len());
        let response = self.client.get(&url).query(query).send().await?;
        Self::decode(response).await
    }

    async fn generate_metadata(&self, skus: &[String]) -> Result<MetadataReport> {
        let url = self.url("/api/metadata/generate");
        tracing::debug!("POST {} for {} SKUs", url, skus.len());
        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "skus": skus }))
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn run_sync(&self, kind: SyncKind) -> Result<SyncReport> {
        let url = self.url(&format!("/api/sync/{}", kind.as_path()));
        tracing::debug!("POST {}", url);
        let response = self.client.post(&url).send().await?;
        Self::decode(response).await
    }

    async fn fetch_category_schema(&self, category_id: &str) -> Result<CategorySchema> {
        let url = self.url(&format!("/api/categories/{}/schema", category_id));
        tracing::debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        Self::decode(response).await
    }

    async fn send_batch(&self, skus: &[String]) -> Result<String> {
        let url = self.url("/api/batch-view");
        tracing::debug!("POST {} with {} SKUs", url, skus.len());
        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "skus": skus }))
            .send()
            .await?;
        let parsed: BatchViewResponse = Self::decode(response).await?;
        Ok(parsed.batch_id)
    }
}
