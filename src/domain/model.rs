use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One marketplace listing row as the backend serves it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    pub sku: String,
    #[serde(default)]
    pub item_id: Option<String>,
    pub title: String,
    pub category_id: String,
    pub price: f64,
    pub quantity: i64,
    pub status: String,
    #[serde(default)]
    pub profit: Option<f64>,
    #[serde(default)]
    pub listed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// One inventory row (stock-keeping view, independent of marketplace state).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkuItem {
    pub sku: String,
    pub product_name: String,
    pub stock: i64,
    pub cost: f64,
    #[serde(default)]
    pub supplier: Option<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Paginated response envelope shared by the table endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
}

impl<T> Page<T> {
    pub fn page_count(&self) -> u64 {
        if self.page_size == 0 {
            return 0;
        }
        self.total.div_ceil(self.page_size as u64)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedMetadata {
    pub sku: String,
    pub title: String,
    #[serde(default)]
    pub seo_description: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkuFailure {
    pub sku: String,
    pub reason: String,
}

/// Result of a bulk SEO/title generation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataReport {
    pub generated: Vec<GeneratedMetadata>,
    #[serde(default)]
    pub failures: Vec<SkuFailure>,
}

/// Direction of a spreadsheet/database/eBay sync job. The client only
/// triggers these; the work happens backend-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SyncKind {
    ExcelToDb,
    DbToEbay,
    EbayToDb,
}

impl SyncKind {
    /// Path segment the backend routes on.
    pub fn as_path(&self) -> &'static str {
        match self {
            SyncKind::ExcelToDb => "excel-to-db",
            SyncKind::DbToEbay => "db-to-ebay",
            SyncKind::EbayToDb => "ebay-to-db",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncReport {
    pub processed: u64,
    pub created: u64,
    pub updated: u64,
    pub failed: u64,
    #[serde(default)]
    pub errors: Vec<SkuFailure>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Requirement {
    Required,
    Recommended,
    Optional,
}

/// One field in a category's eBay requirement schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldRequirement {
    pub name: String,
    pub requirement: Requirement,
    pub data_type: String,
    #[serde(default)]
    pub allowed_values: Vec<String>,
    #[serde(default)]
    pub max_length: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySchema {
    pub category_id: String,
    pub category_name: String,
    pub fields: Vec<FieldRequirement>,
}
