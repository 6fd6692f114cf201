use crate::domain::model::{
    CategorySchema, Listing, MetadataReport, Page, SkuItem, SyncKind, SyncReport,
};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Persistence seam for page state blobs (filters, column layout,
/// selection). Named blobs, JSON payloads; `None` means never saved.
pub trait StateStore: Send + Sync {
    fn read_state(
        &self,
        name: &str,
    ) -> impl std::future::Future<Output = Result<Option<Vec<u8>>>> + Send;
    fn write_state(
        &self,
        name: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_base_url(&self) -> &str;
    fn state_dir(&self) -> &str;
    fn page_size(&self) -> u32;
    fn request_timeout_secs(&self) -> u64;
}

/// The backend consumption contract. Everything the pages need from the
/// REST API goes through here so commands stay testable against a mock.
#[async_trait]
pub trait ListingApi: Send + Sync {
    async fn fetch_listings(&self, query: &[(String, String)]) -> Result<Page<Listing>>;
    async fn fetch_inventory(&self, query: &[(String, String)]) -> Result<Page<SkuItem>>;
    async fn generate_metadata(&self, skus: &[String]) -> Result<MetadataReport>;
    async fn run_sync(&self, kind: SyncKind) -> Result<SyncReport>;
    async fn fetch_category_schema(&self, category_id: &str) -> Result<CategorySchema>;
    async fn send_batch(&self, skus: &[String]) -> Result<String>;
}
