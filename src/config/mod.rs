pub mod cli;
pub mod profile;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use profile::DeskProfile;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_PAGE_SIZE: u32 = 50;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Parser)]
#[command(name = "listing-desk")]
#[command(about = "Back-office CLI for eBay listings and SKU inventory")]
pub struct CliConfig {
    #[arg(long, global = true, help = "Back-office API base URL")]
    pub api_base_url: Option<String>,

    #[arg(long, global = true, help = "Directory for persisted page state")]
    pub state_dir: Option<String>,

    #[arg(long, global = true, help = "Rows per table page")]
    pub page_size: Option<u32>,

    #[arg(long, global = true, help = "HTTP request timeout in seconds")]
    pub timeout: Option<u64>,

    #[arg(long, global = true, help = "TOML profile with backend settings")]
    pub profile: Option<String>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "JSON log output (for cron-driven runs)")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Browse the marketplace listings table
    Listings {
        #[arg(long)]
        page: Option<u32>,
        /// Filter override, e.g. title=contains:lamp or price=min:10
        #[arg(long = "filter")]
        filters: Vec<String>,
        /// Drop one column's saved filter
        #[arg(long = "clear-filter")]
        clear_filters: Vec<String>,
        #[arg(long)]
        sort: Option<String>,
        #[arg(long)]
        desc: bool,
        #[arg(long = "show")]
        show_columns: Vec<String>,
        #[arg(long = "hide")]
        hide_columns: Vec<String>,
        /// Replace the saved selection with these SKU inputs
        #[arg(long = "select")]
        select: Vec<String>,
    },
    /// Browse the SKU inventory table
    Inventory {
        #[arg(long)]
        page: Option<u32>,
        #[arg(long = "filter")]
        filters: Vec<String>,
        #[arg(long = "clear-filter")]
        clear_filters: Vec<String>,
        #[arg(long)]
        sort: Option<String>,
        #[arg(long)]
        desc: bool,
    },
    /// Expand hybrid SKU inputs (ranges, lists) without sending anything
    Expand {
        #[arg(required = true)]
        inputs: Vec<String>,
    },
    /// Send the selection to the backend batch view
    Batch {
        /// SKU inputs; falls back to the listings page's saved selection
        skus: Vec<String>,
    },
    /// Bulk-generate SEO/title metadata for the selection
    Generate {
        skus: Vec<String>,
    },
    /// Trigger a backend sync job
    Sync {
        #[arg(value_enum)]
        kind: SyncKindArg,
    },
    /// Show a category's eBay field-requirement schema
    Schema {
        category_id: String,
    },
    /// Export the current listings page to CSV
    Export {
        #[arg(long, default_value = "listings.csv")]
        output: String,
    },
}

/// CLI spelling of the sync directions; kept out of the domain so the
/// models stay clap-free.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SyncKindArg {
    ExcelToDb,
    DbToEbay,
    EbayToDb,
}

impl From<SyncKindArg> for crate::domain::model::SyncKind {
    fn from(arg: SyncKindArg) -> Self {
        match arg {
            SyncKindArg::ExcelToDb => Self::ExcelToDb,
            SyncKindArg::DbToEbay => Self::DbToEbay,
            SyncKindArg::EbayToDb => Self::EbayToDb,
        }
    }
}

/// Effective settings after merging CLI flags over the profile over the
/// built-in defaults. Explicit flags always win.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub api_base_url: String,
    pub state_dir: String,
    pub page_size: u32,
    pub timeout_secs: u64,
    pub auth_token: Option<String>,
}

impl Settings {
    pub fn resolve(cli: &CliConfig, profile: Option<&DeskProfile>) -> Self {
        let backend = profile.map(|p| &p.backend);
        let tables = profile.and_then(|p| p.tables.as_ref());

        Self {
            api_base_url: cli
                .api_base_url
                .clone()
                .or_else(|| backend.map(|b| b.base_url.clone()))
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            state_dir: cli
                .state_dir
                .clone()
                .or_else(|| tables.and_then(|t| t.state_dir.clone()))
                .unwrap_or_else(|| ".listing-desk".to_string()),
            page_size: cli
                .page_size
                .or_else(|| tables.and_then(|t| t.page_size))
                .unwrap_or(DEFAULT_PAGE_SIZE),
            timeout_secs: cli
                .timeout
                .or_else(|| backend.and_then(|b| b.timeout_seconds))
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
            auth_token: backend.and_then(|b| b.auth_token.clone()),
        }
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validation::validate_url("api_base_url", &self.api_base_url)?;
        validation::validate_path("state_dir", &self.state_dir)?;
        validation::validate_range("page_size", self.page_size, 1, 500)?;
        validation::validate_positive_number("timeout", self.timeout_secs as usize, 1)?;
        Ok(())
    }
}

impl ConfigProvider for Settings {
    fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    fn state_dir(&self) -> &str {
        &self.state_dir
    }

    fn page_size(&self) -> u32 {
        self.page_size
    }

    fn request_timeout_secs(&self) -> u64 {
        self.timeout_secs
    }
}
